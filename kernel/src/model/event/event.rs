use crate::model::{
    event::{EventCategory, EventStatus},
    id::{EventId, UserId},
};
use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;

#[derive(new)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub category: EventCategory,
    pub max_participants: Option<i32>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub requirements: Vec<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub organizer_id: UserId,
    pub organizer_name: String,
}

// 部分更新。None のフィールドは既存値を維持する。
#[derive(Debug)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub max_participants: Option<i32>,
    pub status: Option<EventStatus>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub requirements: Option<Vec<String>>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug)]
pub struct DeleteEvent {
    pub event_id: EventId,
}
