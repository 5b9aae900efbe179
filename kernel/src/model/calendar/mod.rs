use crate::model::{
    event::{EventCategory, EventStatus},
    id::EventId,
};
use chrono::NaiveDate;
use derive_new::new;

// カレンダー表示用の軽量なイベント投影
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub event_id: EventId,
    pub title: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub category: EventCategory,
    pub status: EventStatus,
    pub featured: bool,
    pub current_participants: i32,
    pub max_participants: Option<i32>,
}

// 両端を含む日付範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
