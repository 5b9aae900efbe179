use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        event::{CreateEvent, UpdateEvent},
        Event, EventCategory, EventListOptions, EventStatus,
    },
    id::{EventId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryName {
    Academic,
    Cultural,
    Sports,
    Technical,
    Social,
}

impl From<EventCategory> for CategoryName {
    fn from(value: EventCategory) -> Self {
        match value {
            EventCategory::Academic => Self::Academic,
            EventCategory::Cultural => Self::Cultural,
            EventCategory::Sports => Self::Sports,
            EventCategory::Technical => Self::Technical,
            EventCategory::Social => Self::Social,
        }
    }
}

impl From<CategoryName> for EventCategory {
    fn from(value: CategoryName) -> Self {
        match value {
            CategoryName::Academic => Self::Academic,
            CategoryName::Cultural => Self::Cultural,
            CategoryName::Sports => Self::Sports,
            CategoryName::Technical => Self::Technical,
            CategoryName::Social => Self::Social,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusName {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl From<EventStatus> for StatusName {
    fn from(value: EventStatus) -> Self {
        match value {
            EventStatus::Upcoming => Self::Upcoming,
            EventStatus::Ongoing => Self::Ongoing,
            EventStatus::Completed => Self::Completed,
            EventStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<StatusName> for EventStatus {
    fn from(value: StatusName) -> Self {
        match value {
            StatusName::Upcoming => Self::Upcoming,
            StatusName::Ongoing => Self::Ongoing,
            StatusName::Completed => Self::Completed,
            StatusName::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[garde(email)]
    pub email: String,
    #[garde(skip)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(length(min = 1))]
    pub description: String,
    #[garde(skip)]
    pub date: NaiveDate,
    #[garde(length(min = 1))]
    pub time: String,
    #[garde(length(min = 1))]
    pub location: String,
    #[garde(skip)]
    pub category: CategoryName,
    #[garde(range(min = 1))]
    pub max_participants: Option<i32>,
    #[garde(skip)]
    pub registration_deadline: Option<DateTime<Utc>>,
    #[garde(skip)]
    pub requirements: Option<Vec<String>>,
    #[garde(dive)]
    pub contact_info: ContactInfo,
}

// 主催者の情報はアクセストークンから解決してから合成する
#[derive(new)]
pub struct CreateEventRequestWithOrganizer(CreateEventRequest, UserId, String);

impl From<CreateEventRequestWithOrganizer> for CreateEvent {
    fn from(value: CreateEventRequestWithOrganizer) -> Self {
        let CreateEventRequestWithOrganizer(
            CreateEventRequest {
                title,
                description,
                date,
                time,
                location,
                category,
                max_participants,
                registration_deadline,
                requirements,
                contact_info,
            },
            organizer_id,
            organizer_name,
        ) = value;
        CreateEvent {
            title,
            description,
            event_date: date,
            event_time: time,
            location,
            category: EventCategory::from(category),
            max_participants,
            registration_deadline,
            requirements: requirements.unwrap_or_default(),
            contact_email: contact_info.email,
            contact_phone: contact_info.phone,
            organizer_id,
            organizer_name,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(length(min = 1))]
    pub title: Option<String>,
    #[garde(length(min = 1))]
    pub description: Option<String>,
    #[garde(skip)]
    pub date: Option<NaiveDate>,
    #[garde(length(min = 1))]
    pub time: Option<String>,
    #[garde(length(min = 1))]
    pub location: Option<String>,
    #[garde(skip)]
    pub category: Option<CategoryName>,
    #[garde(range(min = 1))]
    pub max_participants: Option<i32>,
    #[garde(skip)]
    pub status: Option<StatusName>,
    #[garde(skip)]
    pub registration_deadline: Option<DateTime<Utc>>,
    #[garde(skip)]
    pub requirements: Option<Vec<String>>,
    #[garde(dive)]
    pub contact_info: Option<ContactInfo>,
}

#[derive(new)]
pub struct UpdateEventRequestWithId(EventId, UpdateEventRequest);

impl From<UpdateEventRequestWithId> for UpdateEvent {
    fn from(value: UpdateEventRequestWithId) -> Self {
        let UpdateEventRequestWithId(
            event_id,
            UpdateEventRequest {
                title,
                description,
                date,
                time,
                location,
                category,
                max_participants,
                status,
                registration_deadline,
                requirements,
                contact_info,
            },
        ) = value;
        let (contact_email, contact_phone) = match contact_info {
            Some(ContactInfo { email, phone }) => (Some(email), phone),
            None => (None, None),
        };
        UpdateEvent {
            event_id,
            title,
            description,
            event_date: date,
            event_time: time,
            location,
            category: category.map(EventCategory::from),
            max_participants,
            status: status.map(EventStatus::from),
            registration_deadline,
            requirements,
            contact_email,
            contact_phone,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventListQuery {
    #[garde(skip)]
    pub status: Option<StatusName>,
    #[garde(skip)]
    pub category: Option<CategoryName>,
    #[garde(skip)]
    pub featured: Option<bool>,
    #[garde(skip)]
    pub organizer: Option<UserId>,
    #[garde(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    #[garde(range(min = 0))]
    pub skip: Option<i64>,
}

impl From<EventListQuery> for EventListOptions {
    fn from(value: EventListQuery) -> Self {
        let EventListQuery {
            status,
            category,
            featured,
            organizer,
            limit,
            skip,
        } = value;
        Self {
            status: status.map(EventStatus::from),
            category: category.map(EventCategory::from),
            featured,
            organizer,
            limit,
            skip,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub items: Vec<EventResponse>,
}

impl From<Vec<Event>> for EventsResponse {
    fn from(value: Vec<Event>) -> Self {
        Self {
            items: value.into_iter().map(EventResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub category: CategoryName,
    pub max_participants: Option<i32>,
    pub current_participants: i32,
    pub organizer: UserId,
    pub organizer_name: String,
    pub status: StatusName,
    pub featured: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub requirements: Vec<String>,
    pub contact_info: ContactInfo,
    pub participants: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            event_id,
            title,
            description,
            event_date,
            event_time,
            location,
            category,
            max_participants,
            current_participants,
            organizer,
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
        Self {
            event_id,
            title,
            description,
            date: event_date,
            time: event_time,
            location,
            category: CategoryName::from(category),
            max_participants,
            current_participants,
            organizer: organizer.organizer_id,
            organizer_name: organizer.organizer_name,
            status: StatusName::from(status),
            featured,
            registration_deadline,
            requirements,
            contact_info: ContactInfo {
                email: contact_email,
                phone: contact_phone,
            },
            participants,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_event_request_to_command() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{
                "title": "Open Lecture",
                "description": "Guest talk",
                "date": "2026-09-20",
                "time": "16:30",
                "location": "Hall B",
                "category": "academic",
                "maxParticipants": 50,
                "contactInfo": { "email": "lectures@example.edu" }
            }"#,
        )
        .unwrap();
        assert!(req.validate(&()).is_ok());

        let organizer_id = UserId::new();
        let command =
            CreateEvent::from(CreateEventRequestWithOrganizer::new(
                req,
                organizer_id,
                "Prof. Chen".into(),
            ));
        assert_eq!(command.event_time, "16:30");
        assert_eq!(command.organizer_id, organizer_id);
        assert_eq!(command.max_participants, Some(50));
        assert!(command.requirements.is_empty());
        assert!(command.contact_phone.is_none());
    }

    #[test]
    fn test_event_list_query_rejects_unknown_category() {
        let res = serde_json::from_str::<EventListQuery>(r#"{"category":"misc"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_create_event_request_requires_contact_email() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{
                "title": "Open Lecture",
                "description": "Guest talk",
                "date": "2026-09-20",
                "time": "16:30",
                "location": "Hall B",
                "category": "academic",
                "contactInfo": { "email": "not-an-email" }
            }"#,
        )
        .unwrap();
        assert!(req.validate(&()).is_err());
    }
}
