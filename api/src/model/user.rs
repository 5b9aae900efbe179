use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        event::{CreateUser, UpdateUserProfile, UpdateUserRole},
        User, UserListOptions,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Admin,
    Organizer,
    Participant,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Organizer => Self::Organizer,
            Role::Participant => Self::Participant,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Admin => Self::Admin,
            RoleName::Organizer => Self::Organizer,
            RoleName::Participant => Self::Participant,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub items: Vec<UserResponse>,
}

impl From<Vec<User>> for UsersResponse {
    fn from(value: Vec<User>) -> Self {
        Self {
            items: value.into_iter().map(UserResponse::from).collect(),
        }
    }
}

// パスワードハッシュはレスポンス型に含めない
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleName,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            name,
            email,
            role,
            student_id,
            department,
            year,
            created_at,
            updated_at: _,
        } = value;
        Self {
            user_id,
            name,
            email,
            role: RoleName::from(role),
            student_id,
            department,
            year,
            created_at,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 6))]
    pub password: String,
    #[garde(skip)]
    pub role: RoleName,
    #[garde(skip)]
    pub student_id: Option<String>,
    #[garde(skip)]
    pub department: Option<String>,
    #[garde(range(min = 1, max = 10))]
    pub year: Option<i32>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            name,
            email,
            password,
            role,
            student_id,
            department,
            year,
        } = value;
        Self {
            name,
            email,
            password,
            role: Role::from(role),
            student_id,
            department,
            year,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserProfileRequest {
    #[garde(length(min = 1))]
    pub name: Option<String>,
    #[garde(skip)]
    pub student_id: Option<String>,
    #[garde(skip)]
    pub department: Option<String>,
    #[garde(range(min = 1, max = 10))]
    pub year: Option<i32>,
}

#[derive(new)]
pub struct UpdateUserProfileRequestWithUserId(UserId, UpdateUserProfileRequest);

impl From<UpdateUserProfileRequestWithUserId> for UpdateUserProfile {
    fn from(value: UpdateUserProfileRequestWithUserId) -> Self {
        let UpdateUserProfileRequestWithUserId(
            user_id,
            UpdateUserProfileRequest {
                name,
                student_id,
                department,
                year,
            },
        ) = value;
        UpdateUserProfile {
            user_id,
            name,
            student_id,
            department,
            year,
        }
    }
}

// ロールは列挙型でデシリアライズするため、不正な値は
// サービス層に到達する前に 400 で弾かれる。
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    pub role: RoleName,
}

#[derive(new)]
pub struct UpdateUserRoleRequestWithUserId(UserId, UpdateUserRoleRequest);

impl From<UpdateUserRoleRequestWithUserId> for UpdateUserRole {
    fn from(value: UpdateUserRoleRequestWithUserId) -> Self {
        let UpdateUserRoleRequestWithUserId(user_id, UpdateUserRoleRequest { role }) = value;
        Self {
            user_id,
            role: Role::from(role),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    #[garde(skip)]
    pub role: Option<RoleName>,
    #[garde(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    #[garde(range(min = 0))]
    pub skip: Option<i64>,
}

impl From<UserListQuery> for UserListOptions {
    fn from(value: UserListQuery) -> Self {
        let UserListQuery { role, limit, skip } = value;
        Self {
            role: role.map(Role::from),
            limit,
            skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_rejects_unknown_value() {
        let res = serde_json::from_str::<UpdateUserRoleRequest>(r#"{"role":"superuser"}"#);
        assert!(res.is_err());

        let res = serde_json::from_str::<UpdateUserRoleRequest>(r#"{"role":"organizer"}"#).unwrap();
        assert!(matches!(Role::from(res.role), Role::Organizer));
    }

    #[test]
    fn test_create_user_request_validation() {
        let ok = CreateUserRequest {
            name: "Bea".into(),
            email: "bea@example.edu".into(),
            password: "secret1".into(),
            role: RoleName::Participant,
            student_id: None,
            department: None,
            year: Some(2),
        };
        assert!(ok.validate(&()).is_ok());

        let bad_email = CreateUserRequest {
            email: "not-an-email".into(),
            ..ok
        };
        assert!(bad_email.validate(&()).is_err());

        let short_password = CreateUserRequest {
            name: "Bea".into(),
            email: "bea@example.edu".into(),
            password: "short".into(),
            role: RoleName::Participant,
            student_id: None,
            department: None,
            year: None,
        };
        assert!(short_password.validate(&()).is_err());
    }
}
