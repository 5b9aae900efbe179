use crate::model::{event::Event, user::User};

// 管理者ダッシュボード向けの集計結果
#[derive(Debug)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_events: i64,
    pub upcoming_events: i64,
    pub total_registrations: i64,
    pub users_by_role: UsersByRole,
    pub events_by_category: EventsByCategory,
    pub recent_users: Vec<User>,
    pub recent_events: Vec<Event>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct UsersByRole {
    pub admin: i64,
    pub organizer: i64,
    pub participant: i64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct EventsByCategory {
    pub academic: i64,
    pub cultural: i64,
    pub sports: i64,
    pub technical: i64,
    pub social: i64,
}
