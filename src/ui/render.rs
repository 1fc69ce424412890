//! Plain-text rendering of the dashboard screens. Every function returns the
//! text instead of printing it.

use crate::{
    auth::UserProfile,
    features::{
        achievements::Achievement, dashboard::DashboardSummary, employees::Employee,
        health::HealthStatus,
    },
    ui::gate::View,
};

pub const TITLE: &str = "СТП | Панель управления";
pub const LOADING: &str = "Загрузка...";
const EMPTY_CELL: &str = "—";

/// Renders the outcome of the gate.
#[must_use]
pub fn view(view: &View, bot_name: Option<&str>, error: Option<&str>) -> String {
    match view {
        View::Loading => LOADING.to_string(),
        View::Dashboard(profile) => profile_card(profile),
        View::Login => login_prompt(bot_name, error),
    }
}

#[must_use]
pub fn profile_card(profile: &UserProfile) -> String {
    let mut lines = vec![
        TITLE.to_string(),
        String::new(),
        "Информация о пользователе".to_string(),
        format!("ФИО: {}", profile.fullname),
    ];

    if let Some(username) = non_empty(profile.username.as_deref()) {
        lines.push(format!("Username: @{username}"));
    }
    if let Some(position) = non_empty(profile.position.as_deref()) {
        lines.push(format!("Должность: {position}"));
    }
    if let Some(division) = non_empty(profile.division.as_deref()) {
        lines.push(format!("Направление: {division}"));
    }
    lines.push(format!("User ID: {}", profile.user_id));
    lines.push(format!("Роль: {}", profile.role));

    lines.join("\n")
}

#[must_use]
pub fn login_prompt(bot_name: Option<&str>, error: Option<&str>) -> String {
    let mut lines = vec![TITLE.to_string(), String::new()];

    match non_empty(bot_name) {
        Some(bot) => lines.push(format!("Войдите через Telegram: @{bot}")),
        None => lines.push("Войдите через Telegram.".to_string()),
    }
    lines.push(
        "Передайте данные виджета: stp-admin login --callback-url <url> | --assertion <json>"
            .to_string(),
    );

    if let Some(error) = non_empty(error) {
        lines.push(String::new());
        lines.push(format!("Ошибка: {error}"));
    }

    lines.join("\n")
}

#[must_use]
pub fn already_signed_in(profile: &UserProfile) -> String {
    format!(
        "Вы уже вошли как {} ({}). Для смены аккаунта выполните stp-admin logout.",
        profile.fullname, profile.role
    )
}

#[must_use]
pub fn summary(summary: &DashboardSummary) -> String {
    [
        format!("Всего сотрудников: {}", summary.employees),
        format!("Всего достижений: {}", summary.achievements),
    ]
    .join("\n")
}

#[must_use]
pub fn employees_table(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "Сотрудники не найдены".to_string();
    }

    let header = [
        "ФИО",
        "Должность",
        "Подразделение",
        "Руководитель",
        "Email",
        "Роль",
    ]
    .map(str::to_string);

    let rows: Vec<[String; 6]> = employees
        .iter()
        .map(|employee| {
            [
                employee.fullname.clone(),
                cell(employee.position.as_deref()),
                cell(employee.division.as_deref()),
                cell(employee.head.as_deref()),
                cell(employee.email.as_deref()),
                employee.role.to_string(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|title| title.chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(table_row(&header, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(rows.iter().map(|row| table_row(row, &widths)));
    lines.push(format!("Всего: {}", employees.len()));

    lines.join("\n")
}

#[must_use]
pub fn achievements(achievements: &[Achievement]) -> String {
    if achievements.is_empty() {
        return "Достижения не найдены".to_string();
    }

    achievements
        .iter()
        .map(|achievement| {
            format!(
                "#{} {} ({}, {})\n  {}\n  KPI: {}\n  Награда: {} баллов, период: {}",
                achievement.id,
                achievement.name,
                achievement.division,
                achievement.position,
                achievement.description,
                achievement.kpi,
                achievement.reward,
                achievement.period,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[must_use]
pub fn health(status: &HealthStatus, version: &str, commit: &str) -> String {
    let mut lines = vec![format!("API: {}", status.status)];
    if let Some(details) = status.details.as_deref() {
        lines.push(format!("Details: {details}"));
    }
    lines.push(format!(
        "Checked: {}",
        status.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push(format!("Version: {version}"));
    lines.push(format!("Commit: {commit}"));
    lines.join("\n")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn cell(value: Option<&str>) -> String {
    non_empty(value).unwrap_or(EMPTY_CELL).to_string()
}

fn table_row(values: &[String; 6], widths: &[usize; 6]) -> String {
    values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let pad = width.saturating_sub(value.chars().count());
            format!("{value}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
