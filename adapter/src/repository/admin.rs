use crate::database::{
    model::{event::EventRow, user::UserRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::Event,
    id::EventId,
    stats::{DashboardStats, EventsByCategory, UsersByRole},
    user::User,
};
use kernel::repository::admin::AdminRepository;
use shared::error::{AppError, AppResult};

const RECENT_LIMIT: i64 = 10;

#[derive(new)]
pub struct AdminRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AdminRepository for AdminRepositoryImpl {
    async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let pool = self.db.inner_ref();

        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let total_events = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
            .fetch_one(pool)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let upcoming_events =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE status = 'upcoming'")
                .fetch_one(pool)
                .await
                .map_err(AppError::SpecificOperationError)?;

        // 全イベントの current_participants の総和
        let total_registrations = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(current_participants), 0)::BIGINT FROM events",
        )
        .fetch_one(pool)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let role_counts = sqlx::query_as::<_, (String, i64)>(
            "SELECT role, COUNT(*) FROM users GROUP BY role",
        )
        .fetch_all(pool)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let mut users_by_role = UsersByRole::default();
        for (role, count) in role_counts {
            match role.as_str() {
                "admin" => users_by_role.admin = count,
                "organizer" => users_by_role.organizer = count,
                "participant" => users_by_role.participant = count,
                _ => {}
            }
        }

        let category_counts = sqlx::query_as::<_, (String, i64)>(
            "SELECT category, COUNT(*) FROM events GROUP BY category",
        )
        .fetch_all(pool)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let mut events_by_category = EventsByCategory::default();
        for (category, count) in category_counts {
            match category.as_str() {
                "academic" => events_by_category.academic = count,
                "cultural" => events_by_category.cultural = count,
                "sports" => events_by_category.sports = count,
                "technical" => events_by_category.technical = count,
                "social" => events_by_category.social = count,
                _ => {}
            }
        }

        let recent_users = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, name, email, role, student_id, department, year,
                       created_at, updated_at
                FROM users
                ORDER BY created_at DESC
                LIMIT $1
            "#,
        )
        .bind(RECENT_LIMIT)
        .fetch_all(pool)
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(User::try_from)
        .collect::<AppResult<Vec<User>>>()?;

        let recent_events = sqlx::query_as::<_, EventRow>(
            r#"
                SELECT event_id, title, description, event_date, event_time, location,
                       category, max_participants, current_participants, organizer_id,
                       organizer_name, status, featured, registration_deadline,
                       requirements, contact_email, contact_phone, participants,
                       created_at, updated_at
                FROM events
                ORDER BY created_at DESC
                LIMIT $1
            "#,
        )
        .bind(RECENT_LIMIT)
        .fetch_all(pool)
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Event::try_from)
        .collect::<AppResult<Vec<Event>>>()?;

        Ok(DashboardStats {
            total_users,
            total_events,
            upcoming_events,
            total_registrations,
            users_by_role,
            events_by_category,
            recent_users,
            recent_events,
        })
    }

    async fn toggle_event_featured(&self, event_id: EventId) -> AppResult<Event> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
                UPDATE events
                SET featured = NOT featured
                WHERE event_id = $1
                RETURNING event_id, title, description, event_date, event_time, location,
                          category, max_participants, current_participants, organizer_id,
                          organizer_name, status, featured, registration_deadline,
                          requirements, contact_email, contact_phone, participants,
                          created_at, updated_at
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event_id
            )));
        };

        Event::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{event::EventRepositoryImpl, user::UserRepositoryImpl};
    use chrono::NaiveDate;
    use kernel::model::{
        event::{event::CreateEvent, EventCategory},
        id::UserId,
        role::Role,
        user::event::{CreateUser, DeleteUser},
    };
    use kernel::repository::{event::EventRepository, user::UserRepository};

    fn demo_user(role: Role, email: &str) -> CreateUser {
        CreateUser {
            name: "Stats User".into(),
            email: email.into(),
            password: "hunter2secret".into(),
            role,
            student_id: None,
            department: None,
            year: None,
        }
    }

    fn demo_event(organizer_id: UserId, category: EventCategory) -> CreateEvent {
        CreateEvent {
            title: "Event".into(),
            description: "Description".into(),
            event_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            event_time: "10:00".into(),
            location: "Auditorium".into(),
            category,
            max_participants: None,
            registration_deadline: None,
            requirements: vec![],
            contact_email: "contact@example.edu".into(),
            contact_phone: None,
            organizer_id,
            organizer_name: "Organizer".into(),
        }
    }

    #[sqlx::test]
    async fn test_dashboard_stats(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let conn = ConnectionPool::new(pool);
        let users = UserRepositoryImpl::new(conn.clone());
        let events = EventRepositoryImpl::new(conn.clone());
        let admin = AdminRepositoryImpl::new(conn);

        let organizer = users
            .create(demo_user(Role::Organizer, "org@example.com"))
            .await?;
        let participant = users
            .create(demo_user(Role::Participant, "who@example.com"))
            .await?;

        let a = events
            .create(demo_event(organizer.user_id, EventCategory::Academic))
            .await?;
        let b = events
            .create(demo_event(organizer.user_id, EventCategory::Sports))
            .await?;

        events
            .register_participant(a.event_id, participant.user_id)
            .await?;
        events
            .register_participant(b.event_id, participant.user_id)
            .await?;

        let stats = admin.dashboard_stats().await?;
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.upcoming_events, 2);
        // 全イベントの参加者数の合計と一致する
        assert_eq!(stats.total_registrations, 2);
        assert_eq!(stats.users_by_role.organizer, 1);
        assert_eq!(stats.users_by_role.participant, 1);
        assert_eq!(stats.users_by_role.admin, 0);
        assert_eq!(stats.events_by_category.academic, 1);
        assert_eq!(stats.events_by_category.sports, 1);
        assert_eq!(stats.recent_users.len(), 2);
        assert_eq!(stats.recent_events.len(), 2);

        Ok(())
    }

    #[sqlx::test]
    async fn test_toggle_event_featured(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let conn = ConnectionPool::new(pool);
        let events = EventRepositoryImpl::new(conn.clone());
        let admin = AdminRepositoryImpl::new(conn);

        let event = events
            .create(demo_event(UserId::new(), EventCategory::Social))
            .await?;
        assert!(!event.featured);

        let toggled = admin.toggle_event_featured(event.event_id).await?;
        assert!(toggled.featured);
        let toggled = admin.toggle_event_featured(event.event_id).await?;
        assert!(!toggled.featured);

        let res = admin.toggle_event_featured(kernel::model::id::EventId::new()).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_user_referential_policy(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let conn = ConnectionPool::new(pool);
        let users = UserRepositoryImpl::new(conn.clone());
        let events = EventRepositoryImpl::new(conn.clone());

        let organizer = users
            .create(demo_user(Role::Organizer, "owner@example.com"))
            .await?;
        let participant = users
            .create(demo_user(Role::Participant, "member@example.com"))
            .await?;

        let event = events
            .create(demo_event(organizer.user_id, EventCategory::Cultural))
            .await?;
        events
            .register_participant(event.event_id, participant.user_id)
            .await?;

        // 主催イベントが残っている間は削除できない
        let res = users
            .delete(DeleteUser {
                user_id: organizer.user_id,
            })
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        // 参加者の削除では参加者リストから ID が取り除かれる
        users
            .delete(DeleteUser {
                user_id: participant.user_id,
            })
            .await?;
        let stored = events.find_by_id(event.event_id).await?.unwrap();
        assert_eq!(stored.current_participants, 0);
        assert!(stored.participants.is_empty());

        Ok(())
    }
}
