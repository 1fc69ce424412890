//! Dashboard data behind an established session. Every call takes the bearer
//! token explicitly; the backend decides what the caller may see.

pub mod achievements;
pub mod dashboard;
pub mod employees;
pub mod health;
