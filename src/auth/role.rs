use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee role as stored by the backend. The wire format is a bare integer;
/// unknown values are kept so newer backends do not break the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Role {
    Unauthorized,
    Specialist,
    Head,
    Duty,
    Administrator,
    Gok,
    Mip,
    Recruiter,
    Root,
    Other(i64),
}

impl Role {
    #[must_use]
    pub fn id(self) -> i64 {
        i64::from(self)
    }

    #[must_use]
    pub fn name(self) -> String {
        match self {
            Role::Unauthorized => "Не авторизован".to_string(),
            Role::Specialist => "Специалист".to_string(),
            Role::Head => "Руководитель".to_string(),
            Role::Duty => "Дежурный".to_string(),
            Role::Administrator => "Администратор".to_string(),
            Role::Gok => "ГОК".to_string(),
            Role::Mip => "МИП".to_string(),
            Role::Recruiter => "Рекрутер".to_string(),
            Role::Root => "root".to_string(),
            Role::Other(id) => format!("Роль {id}"),
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Role::Specialist => "👤",
            Role::Head => "👑",
            Role::Duty => "👮",
            Role::Administrator => "🛡️",
            Role::Gok => "🔎",
            Role::Mip => "📝",
            Role::Recruiter => "🙋",
            Role::Root => "⚡",
            Role::Unauthorized | Role::Other(_) => "",
        }
    }
}

impl From<i64> for Role {
    fn from(id: i64) -> Self {
        match id {
            0 => Role::Unauthorized,
            1 => Role::Specialist,
            2 => Role::Head,
            3 => Role::Duty,
            4 => Role::Administrator,
            5 => Role::Gok,
            6 => Role::Mip,
            7 => Role::Recruiter,
            10 => Role::Root,
            other => Role::Other(other),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        match role {
            Role::Unauthorized => 0,
            Role::Specialist => 1,
            Role::Head => 2,
            Role::Duty => 3,
            Role::Administrator => 4,
            Role::Gok => 5,
            Role::Mip => 6,
            Role::Recruiter => 7,
            Role::Root => 10,
            Role::Other(id) => id,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let emoji = self.emoji();
        if emoji.is_empty() {
            write!(formatter, "{}", self.name())
        } else {
            write!(formatter, "{emoji} {}", self.name())
        }
    }
}
