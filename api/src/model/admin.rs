use crate::model::{event::EventResponse, user::UserResponse};
use kernel::model::stats::{DashboardStats, EventsByCategory, UsersByRole};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_users: i64,
    pub total_events: i64,
    pub upcoming_events: i64,
    pub total_registrations: i64,
    pub users_by_role: UsersByRoleResponse,
    pub events_by_category: EventsByCategoryResponse,
    pub recent_users: Vec<UserResponse>,
    pub recent_events: Vec<EventResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersByRoleResponse {
    pub admin: i64,
    pub organizer: i64,
    pub participant: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsByCategoryResponse {
    pub academic: i64,
    pub cultural: i64,
    pub sports: i64,
    pub technical: i64,
    pub social: i64,
}

impl From<UsersByRole> for UsersByRoleResponse {
    fn from(value: UsersByRole) -> Self {
        let UsersByRole {
            admin,
            organizer,
            participant,
        } = value;
        Self {
            admin,
            organizer,
            participant,
        }
    }
}

impl From<EventsByCategory> for EventsByCategoryResponse {
    fn from(value: EventsByCategory) -> Self {
        let EventsByCategory {
            academic,
            cultural,
            sports,
            technical,
            social,
        } = value;
        Self {
            academic,
            cultural,
            sports,
            technical,
            social,
        }
    }
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(value: DashboardStats) -> Self {
        let DashboardStats {
            total_users,
            total_events,
            upcoming_events,
            total_registrations,
            users_by_role,
            events_by_category,
            recent_users,
            recent_events,
        } = value;
        Self {
            total_users,
            total_events,
            upcoming_events,
            total_registrations,
            users_by_role: users_by_role.into(),
            events_by_category: events_by_category.into(),
            recent_users: recent_users.into_iter().map(UserResponse::from).collect(),
            recent_events: recent_events.into_iter().map(EventResponse::from).collect(),
        }
    }
}
