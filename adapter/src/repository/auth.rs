use crate::{
    database::{model::user::UserCredentialRow, ConnectionPool},
    redis::{
        model::{AuthorizationKey, AuthorizedUserId},
        RedisClient,
    },
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(AuthorizedUserId::into_inner))
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let user_item = sqlx::query_as::<_, UserCredentialRow>(
            "SELECT user_id, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(user_item) = user_item else {
            return Err(AppError::UnauthenticatedError);
        };

        let valid = bcrypt::verify(password, &user_item.password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(user_item.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        // トークンは推測不能なランダム値。検証は Redis への存在確認で行う。
        let access_token = AccessToken(uuid::Uuid::new_v4().simple().to_string());
        let key: AuthorizationKey = (&access_token).into();
        self.kv
            .set_ex(&key, &AuthorizedUserId::new(event.user_id), self.ttl)
            .await?;
        Ok(access_token)
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key: AuthorizationKey = access_token.into();
        self.kv.delete(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use kernel::model::{role::Role, user::event::CreateUser};
    use kernel::repository::user::UserRepository;
    use shared::config::RedisConfig;

    // Redis への接続は遅延なので、資格情報の検証だけならダミー設定でよい
    fn auth_repo(pool: sqlx::PgPool) -> AuthRepositoryImpl {
        let kv = Arc::new(
            RedisClient::new(&RedisConfig {
                host: "localhost".into(),
                port: 6379,
            })
            .unwrap(),
        );
        AuthRepositoryImpl::new(ConnectionPool::new(pool), kv, 60)
    }

    #[sqlx::test]
    async fn test_verify_user_credentials(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let users = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let repo = auth_repo(pool);

        let created = users
            .create(CreateUser {
                name: "Login User".into(),
                email: "login@example.com".into(),
                password: "correct-horse".into(),
                role: Role::Participant,
                student_id: None,
                department: None,
                year: None,
            })
            .await?;

        let verified = repo.verify_user("login@example.com", "correct-horse").await?;
        assert_eq!(verified, created.user_id);

        // パスワード不一致
        let res = repo.verify_user("login@example.com", "wrong-password").await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        // 存在しないメールアドレス
        let res = repo.verify_user("nobody@example.com", "correct-horse").await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        Ok(())
    }
}
