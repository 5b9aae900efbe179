use crate::model::{event::Event, id::EventId, stats::DashboardStats};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AdminRepository: Send + Sync {
    // ダッシュボード向けの集計（読み取りのみ）
    async fn dashboard_stats(&self) -> AppResult<DashboardStats>;
    async fn toggle_event_featured(&self, event_id: EventId) -> AppResult<Event>;
}
