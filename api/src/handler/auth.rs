use crate::{
    extractor::{AuthorizedUser, AUTH_TOKEN_COOKIE},
    model::{
        auth::{LoginRequest, LoginResponse},
        user::{CreateUserRequest, UserResponse},
    },
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use garde::Validate;
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;
use shared::{
    env::{which, Environment},
    error::{AppError, AppResult},
};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let user = registry.user_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let user_id = registry
        .auth_repository()
        .verify_user(&req.email, &req.password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user_id))
        .await?;
    let user = registry
        .user_repository()
        .find_current_user(user_id)
        .await?
        .ok_or(AppError::UnauthenticatedError)?;

    // トークンはボディに加えて HTTP-only クッキーでも渡す
    let mut cookie = Cookie::new(AUTH_TOKEN_COOKIE, access_token.0.clone());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::seconds(registry.auth_token_ttl() as i64));
    if which() == Environment::Production {
        cookie.set_secure(true);
    }

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user: UserResponse::from(user),
            access_token: access_token.0,
        }),
    ))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;

    let mut removal = Cookie::from(AUTH_TOKEN_COOKIE);
    removal.set_path("/");
    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}
