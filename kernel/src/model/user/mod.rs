use crate::model::{id::UserId, role::Role};
use chrono::{DateTime, Utc};
pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// イベントに非正規化して埋め込む主催者情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOrganizer {
    pub organizer_id: UserId,
    pub organizer_name: String,
}

#[derive(Debug, Default)]
pub struct UserListOptions {
    pub role: Option<Role>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}
