use kernel::model::{
    calendar::CalendarEvent,
    event::{Event, EventCategory, EventStatus},
    id::{EventId, UserId},
    user::EventOrganizer,
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub category: String,
    pub max_participants: Option<i32>,
    pub current_participants: i32,
    pub organizer_id: UserId,
    pub organizer_name: String,
    pub status: String,
    pub featured: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub requirements: Vec<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub participants: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(value: EventRow) -> Result<Self, Self::Error> {
        let EventRow {
            event_id,
            title,
            description,
            event_date,
            event_time,
            location,
            category,
            max_participants,
            current_participants,
            organizer_id,
            organizer_name,
            status,
            featured,
            registration_deadline,
            requirements,
            contact_email,
            contact_phone,
            participants,
            created_at,
            updated_at,
        } = value;
        let category = EventCategory::from_str(&category)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        let status = EventStatus::from_str(&status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(Event {
            event_id,
            title,
            description,
            event_date,
            event_time,
            location,
            category,
            max_participants,
            current_participants,
            organizer: EventOrganizer {
                organizer_id,
                organizer_name,
            },
            status,
            featured,
            registration_deadline,
            requirements,
            contact_email,
            contact_phone,
            participants,
            created_at,
            updated_at,
        })
    }
}

// カレンダー投影用。一覧に不要な列は取得しない。
#[derive(sqlx::FromRow)]
pub struct CalendarEventRow {
    pub event_id: EventId,
    pub title: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub category: String,
    pub status: String,
    pub featured: bool,
    pub current_participants: i32,
    pub max_participants: Option<i32>,
}

impl TryFrom<CalendarEventRow> for CalendarEvent {
    type Error = AppError;

    fn try_from(value: CalendarEventRow) -> Result<Self, Self::Error> {
        let CalendarEventRow {
            event_id,
            title,
            event_date,
            event_time,
            category,
            status,
            featured,
            current_participants,
            max_participants,
        } = value;
        let category = EventCategory::from_str(&category)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        let status = EventStatus::from_str(&status)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(CalendarEvent {
            event_id,
            title,
            event_date,
            event_time,
            category,
            status,
            featured,
            current_participants,
            max_participants,
        })
    }
}

// 参加登録が失敗した理由を切り分けるための型
#[derive(sqlx::FromRow)]
pub struct RegistrationStateRow {
    pub max_participants: Option<i32>,
    pub current_participants: i32,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub already_registered: bool,
}
