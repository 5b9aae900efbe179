use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, id::UserId, user::User};
use registry::AppRegistry;
use shared::error::AppError;

// ログイン時に設定する HTTP-only クッキーの名前
pub const AUTH_TOKEN_COOKIE: &str = "auth-token";

pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub user: User,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }

    pub fn can_manage_events(&self) -> bool {
        self.user.role.can_manage_events()
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    // Authorization ヘッダーまたはクッキーからアクセストークンを取り出し、
    // リクエストごとに Redis と突き合わせて検証する。
    // クライアント側が保持するロール情報は信用しない。
    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .extract::<Option<TypedHeader<Authorization<Bearer>>>>()
            .await
            .ok()
            .flatten()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

        let token = match bearer {
            Some(token) => token,
            None => {
                let jar = parts
                    .extract::<CookieJar>()
                    .await
                    .map_err(|_| AppError::UnauthorizedError)?;
                jar.get(AUTH_TOKEN_COOKIE)
                    .map(|cookie| cookie.value().to_string())
                    .ok_or(AppError::UnauthorizedError)?
            }
        };

        let access_token = AccessToken(token);
        let user_id = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthorizedError)?;
        let user = registry
            .user_repository()
            .find_current_user(user_id)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        Ok(Self { access_token, user })
    }
}
