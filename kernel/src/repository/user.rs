use crate::model::{
    id::UserId,
    user::{
        event::{CreateUser, DeleteUser, UpdateUserProfile, UpdateUserRole},
        User, UserListOptions,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn find_current_user(&self, user_id: UserId) -> AppResult<Option<User>>;
    // 作成日時の新しい順に返す
    async fn find_all(&self, options: UserListOptions) -> AppResult<Vec<User>>;
    async fn update_role(&self, event: UpdateUserRole) -> AppResult<User>;
    async fn update_profile(&self, event: UpdateUserProfile) -> AppResult<User>;
    // ユーザー削除。主催イベントが残っている場合は拒否し、
    // 参加者リストからは自身の ID を取り除く。
    async fn delete(&self, event: DeleteUser) -> AppResult<()>;
}
