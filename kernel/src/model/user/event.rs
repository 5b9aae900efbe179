use crate::model::{id::UserId, role::Role};

pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug)]
pub struct UpdateUserRole {
    pub user_id: UserId,
    pub role: Role,
}

#[derive(Debug)]
pub struct UpdateUserProfile {
    pub user_id: UserId,
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug)]
pub struct DeleteUser {
    pub user_id: UserId,
}
