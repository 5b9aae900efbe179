use crate::database::{model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, DeleteUser, UpdateUserProfile, UpdateUserRole},
        User, UserListOptions,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

const USER_COLUMNS: &str =
    "user_id, name, email, role, student_id, department, year, created_at, updated_at";

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        // メールアドレスの一意性は UNIQUE インデックスが最終的に保証するが、
        // 先に存在確認を行い分かりやすいメッセージを返す
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&event.email)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if exists {
            return Err(AppError::UnprocessableEntity(
                "User already exists with this email".into(),
            ));
        }

        let user_id = UserId::new();
        let password_hash = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
                INSERT INTO users
                (user_id, name, email, password_hash, role, student_id, department, year)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(&password_hash)
        .bind(event.role.to_string())
        .bind(&event.student_id)
        .bind(&event.department)
        .bind(event.year)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        User::try_from(row)
    }

    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self, options: UserListOptions) -> AppResult<Vec<User>> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(format!(
            "SELECT {USER_COLUMNS} FROM users WHERE TRUE"
        ));
        if let Some(role) = options.role {
            builder.push(" AND role = ").push_bind(role.to_string());
        }
        builder.push(" ORDER BY created_at DESC");
        if let Some(limit) = options.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }
        if let Some(skip) = options.skip {
            builder.push(" OFFSET ").push_bind(skip);
        }

        let rows: Vec<UserRow> = builder
            .build_query_as()
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_role(&self, event: UpdateUserRole) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
                UPDATE users
                SET role = $2
                WHERE user_id = $1
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(event.user_id)
        .bind(event.role.to_string())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "ユーザー（{}）が見つかりませんでした。",
                event.user_id
            )));
        };

        User::try_from(row)
    }

    async fn update_profile(&self, event: UpdateUserProfile) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
                UPDATE users
                SET
                    name = COALESCE($2, name),
                    student_id = COALESCE($3, student_id),
                    department = COALESCE($4, department),
                    year = COALESCE($5, year)
                WHERE user_id = $1
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(event.user_id)
        .bind(&event.name)
        .bind(&event.student_id)
        .bind(&event.department)
        .bind(event.year)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "ユーザー（{}）が見つかりませんでした。",
                event.user_id
            )));
        };

        User::try_from(row)
    }

    async fn delete(&self, event: DeleteUser) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // 参照整合性の方針：
        // - 主催イベントが残っている間は削除を拒否する
        // - 参加者としての登録は全イベントから取り除く
        {
            let organized = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM events WHERE organizer_id = $1",
            )
            .bind(event.user_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if organized > 0 {
                return Err(AppError::UnprocessableEntity(format!(
                    "ユーザー（{}）は主催イベントが残っているため削除できません。",
                    event.user_id
                )));
            }
        }

        sqlx::query(
            r#"
                UPDATE events
                SET
                    participants = array_remove(participants, $1),
                    current_participants = current_participants - 1
                WHERE participants @> ARRAY[$1]
            "#,
        )
        .bind(event.user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let res = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(event.user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "ユーザー（{}）が見つかりませんでした。",
                event.user_id
            )));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}
