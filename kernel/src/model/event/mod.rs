use crate::model::{id::EventId, user::EventOrganizer};
use chrono::{DateTime, NaiveDate, Utc};
use strum::{AsRefStr, Display, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EventCategory {
    Academic,
    Cultural,
    Sports,
    Technical,
    Social,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub category: EventCategory,
    pub max_participants: Option<i32>,
    pub current_participants: i32,
    pub organizer: EventOrganizer,
    pub status: EventStatus,
    pub featured: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub requirements: Vec<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub participants: Vec<crate::model::id::UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 一覧取得時の絞り込み条件。
// 呼び出し側で任意の辞書を組み立てるのではなく、
// 利用可能な条件をフィールドとして列挙する。
#[derive(Debug, Default)]
pub struct EventListOptions {
    pub status: Option<EventStatus>,
    pub category: Option<EventCategory>,
    pub featured: Option<bool>,
    pub organizer: Option<crate::model::id::UserId>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            EventCategory::from_str("academic").unwrap(),
            EventCategory::Academic
        );
        assert_eq!(
            EventCategory::from_str("social").unwrap(),
            EventCategory::Social
        );
        assert!(EventCategory::from_str("misc").is_err());
    }

    #[test]
    fn test_status_default_is_upcoming() {
        assert_eq!(EventStatus::default(), EventStatus::Upcoming);
        assert_eq!(EventStatus::Upcoming.to_string(), "upcoming");
    }
}
