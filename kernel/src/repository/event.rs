use crate::model::{
    calendar::{CalendarEvent, DateRange},
    event::{
        event::{CreateEvent, DeleteEvent, UpdateEvent},
        Event, EventListOptions,
    },
    id::{EventId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: CreateEvent) -> AppResult<Event>;
    // 作成日時の新しい順に返す
    async fn find_all(&self, options: EventListOptions) -> AppResult<Vec<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    // 部分更新。主催者・管理者チェックは呼び出し側（ハンドラ）で行う。
    async fn update(&self, event: UpdateEvent) -> AppResult<Event>;
    async fn delete(&self, event: DeleteEvent) -> AppResult<()>;
    // イベントへの参加登録。定員・締切・重複登録のチェックと
    // 参加者リストへの追加を単一の条件付き UPDATE で行う。
    async fn register_participant(&self, event_id: EventId, user_id: UserId) -> AppResult<()>;
    async fn unregister_participant(&self, event_id: EventId, user_id: UserId) -> AppResult<()>;
    // カレンダー表示用の日付範囲投影（日付・時刻の昇順）
    async fn find_by_date_range(&self, range: DateRange) -> AppResult<Vec<CalendarEvent>>;
}
