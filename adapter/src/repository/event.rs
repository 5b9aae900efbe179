use crate::database::{
    model::event::{CalendarEventRow, EventRow, RegistrationStateRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::model::{
    calendar::{CalendarEvent, DateRange},
    event::{
        event::{CreateEvent, DeleteEvent, UpdateEvent},
        Event, EventListOptions,
    },
    id::{EventId, UserId},
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

const EVENT_COLUMNS: &str = "event_id, title, description, event_date, event_time, location, \
     category, max_participants, current_participants, organizer_id, organizer_name, status, \
     featured, registration_deadline, requirements, contact_email, contact_phone, participants, \
     created_at, updated_at";

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<Event> {
        // current_participants・status・featured は初期値で固定する
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
                INSERT INTO events
                (event_id, title, description, event_date, event_time, location, category,
                max_participants, organizer_id, organizer_name, registration_deadline,
                requirements, contact_email, contact_phone)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(EventId::new())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.event_time)
        .bind(&event.location)
        .bind(event.category.to_string())
        .bind(event.max_participants)
        .bind(event.organizer_id)
        .bind(&event.organizer_name)
        .bind(event.registration_deadline)
        .bind(&event.requirements)
        .bind(&event.contact_email)
        .bind(&event.contact_phone)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Event::try_from(row)
    }

    async fn find_all(&self, options: EventListOptions) -> AppResult<Vec<Event>> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE TRUE"
        ));
        if let Some(status) = options.status {
            builder.push(" AND status = ").push_bind(status.to_string());
        }
        if let Some(category) = options.category {
            builder
                .push(" AND category = ")
                .push_bind(category.to_string());
        }
        if let Some(featured) = options.featured {
            builder.push(" AND featured = ").push_bind(featured);
        }
        if let Some(organizer) = options.organizer {
            builder.push(" AND organizer_id = ").push_bind(organizer);
        }
        builder.push(" ORDER BY created_at DESC");
        if let Some(limit) = options.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }
        if let Some(skip) = options.skip {
            builder.push(" OFFSET ").push_bind(skip);
        }

        let rows: Vec<EventRow> = builder
            .build_query_as()
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Event::try_from).collect()
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1"
        ))
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Event::try_from).transpose()
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<Event> {
        // None は「既存値を維持」。contact_phone などの nullable 列を
        // null に戻す更新は提供しない。
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
                UPDATE events
                SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    event_date = COALESCE($4, event_date),
                    event_time = COALESCE($5, event_time),
                    location = COALESCE($6, location),
                    category = COALESCE($7, category),
                    max_participants = COALESCE($8, max_participants),
                    status = COALESCE($9, status),
                    registration_deadline = COALESCE($10, registration_deadline),
                    requirements = COALESCE($11, requirements),
                    contact_email = COALESCE($12, contact_email),
                    contact_phone = COALESCE($13, contact_phone)
                WHERE event_id = $1
                RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.event_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.event_time)
        .bind(&event.location)
        .bind(event.category.map(|c| c.to_string()))
        .bind(event.max_participants)
        .bind(event.status.map(|s| s.to_string()))
        .bind(event.registration_deadline)
        .bind(&event.requirements)
        .bind(&event.contact_email)
        .bind(&event.contact_phone)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event.event_id
            )));
        };

        Event::try_from(row)
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event.event_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "イベント（{}）が見つかりませんでした。",
                event.event_id
            )));
        }

        Ok(())
    }

    async fn register_participant(&self, event_id: EventId, user_id: UserId) -> AppResult<()> {
        // 重複登録・定員・締切のチェックと参加者の追加を
        // 単一の条件付き UPDATE で行う。
        // 先読みしてから書き込む方式では同時リクエストで定員を
        // 超過しうるため、条件はストア側で一括評価させる。
        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    participants = array_append(participants, $2),
                    current_participants = current_participants + 1
                WHERE event_id = $1
                  AND NOT (participants @> ARRAY[$2])
                  AND (max_participants IS NULL OR current_participants < max_participants)
                  AND (registration_deadline IS NULL OR NOW() <= registration_deadline)
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            // 失敗理由の切り分け。この読み取りはエラーメッセージの
            // 生成にのみ使い、登録可否の判定には使わない。
            let state = sqlx::query_as::<_, RegistrationStateRow>(
                r#"
                    SELECT
                        max_participants,
                        current_participants,
                        registration_deadline,
                        participants @> ARRAY[$2] AS already_registered
                    FROM events
                    WHERE event_id = $1
                "#,
            )
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

            let Some(state) = state else {
                return Err(AppError::EntityNotFound(format!(
                    "イベント（{}）が見つかりませんでした。",
                    event_id
                )));
            };

            if state.already_registered {
                return Err(AppError::UnprocessableEntity(
                    "Already registered for this event".into(),
                ));
            }
            if let Some(max) = state.max_participants {
                if state.current_participants >= max {
                    return Err(AppError::UnprocessableEntity("Event is full".into()));
                }
            }
            if let Some(deadline) = state.registration_deadline {
                if Utc::now() > deadline {
                    return Err(AppError::UnprocessableEntity(
                        "Registration deadline has passed".into(),
                    ));
                }
            }

            return Err(AppError::NoRowsAffectedError(
                "No event record has been updated".into(),
            ));
        }

        Ok(())
    }

    async fn unregister_participant(&self, event_id: EventId, user_id: UserId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    participants = array_remove(participants, $2),
                    current_participants = current_participants - 1
                WHERE event_id = $1
                  AND participants @> ARRAY[$2]
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM events WHERE event_id = $1)")
                    .bind(event_id)
                    .fetch_one(self.db.inner_ref())
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            if !exists {
                return Err(AppError::EntityNotFound(format!(
                    "イベント（{}）が見つかりませんでした。",
                    event_id
                )));
            }

            return Err(AppError::UnprocessableEntity(
                "Not registered for this event".into(),
            ));
        }

        Ok(())
    }

    async fn find_by_date_range(&self, range: DateRange) -> AppResult<Vec<CalendarEvent>> {
        let rows = sqlx::query_as::<_, CalendarEventRow>(
            r#"
                SELECT
                    event_id,
                    title,
                    event_date,
                    event_time,
                    category,
                    status,
                    featured,
                    current_participants,
                    max_participants
                FROM events
                WHERE event_date BETWEEN $1 AND $2
                ORDER BY event_date ASC, event_time ASC
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(CalendarEvent::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use kernel::model::event::{EventCategory, EventStatus};

    fn demo_event(organizer_id: UserId, max_participants: Option<i32>) -> CreateEvent {
        CreateEvent {
            title: "Tech Fest".into(),
            description: "Annual technical festival".into(),
            event_date: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
            event_time: "14:00".into(),
            location: "Main Hall".into(),
            category: EventCategory::Technical,
            max_participants,
            registration_deadline: None,
            requirements: vec!["student card".into()],
            contact_email: "events@example.edu".into(),
            contact_phone: None,
            organizer_id,
            organizer_name: "Alice Organizer".into(),
        }
    }

    #[sqlx::test]
    async fn test_create_update_delete_event(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo.create(demo_event(UserId::new(), Some(100))).await?;
        assert_eq!(created.current_participants, 0);
        assert_eq!(created.status, EventStatus::Upcoming);
        assert!(!created.featured);

        let updated = repo
            .update(UpdateEvent {
                event_id: created.event_id,
                title: Some("Tech Fest 2026".into()),
                description: None,
                event_date: None,
                event_time: None,
                location: None,
                category: None,
                max_participants: None,
                status: Some(EventStatus::Ongoing),
                registration_deadline: None,
                requirements: None,
                contact_email: None,
                contact_phone: None,
            })
            .await?;
        assert_eq!(updated.title, "Tech Fest 2026");
        assert_eq!(updated.status, EventStatus::Ongoing);
        // 未指定のフィールドは維持される
        assert_eq!(updated.location, created.location);

        repo.delete(DeleteEvent {
            event_id: created.event_id,
        })
        .await?;
        assert!(repo.find_by_id(created.event_id).await?.is_none());

        Ok(())
    }

    #[sqlx::test]
    async fn test_update_keeps_unspecified_nullable_fields(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let mut create = demo_event(UserId::new(), Some(30));
        create.contact_phone = Some("03-1234-5678".into());
        create.registration_deadline = Some(Utc::now() + Duration::days(7));
        let created = repo.create(create).await?;

        let updated = repo
            .update(UpdateEvent {
                event_id: created.event_id,
                title: Some("Renamed".into()),
                description: None,
                event_date: None,
                event_time: None,
                location: None,
                category: None,
                max_participants: None,
                status: None,
                registration_deadline: None,
                requirements: None,
                contact_email: None,
                contact_phone: None,
            })
            .await?;

        // None 指定は既存値の維持であり、null への更新ではない
        assert_eq!(updated.contact_phone, created.contact_phone);
        assert_eq!(updated.registration_deadline, created.registration_deadline);
        assert_eq!(updated.max_participants, Some(30));

        Ok(())
    }

    #[sqlx::test]
    async fn test_registration_capacity_and_duplicates(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));
        let event = repo.create(demo_event(UserId::new(), Some(2))).await?;

        let user_a = UserId::new();
        let user_b = UserId::new();
        let user_c = UserId::new();

        repo.register_participant(event.event_id, user_a).await?;
        repo.register_participant(event.event_id, user_b).await?;

        // 定員超過
        let res = repo.register_participant(event.event_id, user_c).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(ref m)) if m == "Event is full"));

        // 重複登録
        let res = repo.register_participant(event.event_id, user_a).await;
        assert!(
            matches!(res, Err(AppError::UnprocessableEntity(ref m)) if m == "Already registered for this event")
        );

        let stored = repo.find_by_id(event.event_id).await?.unwrap();
        assert_eq!(stored.current_participants, 2);
        assert_eq!(
            stored.current_participants,
            stored.participants.len() as i32
        );

        // 未登録ユーザーの解除は失敗する
        let res = repo.unregister_participant(event.event_id, user_c).await;
        assert!(
            matches!(res, Err(AppError::UnprocessableEntity(ref m)) if m == "Not registered for this event")
        );

        repo.unregister_participant(event.event_id, user_a).await?;
        let stored = repo.find_by_id(event.event_id).await?.unwrap();
        assert_eq!(stored.current_participants, 1);
        assert_eq!(stored.participants, vec![user_b]);

        Ok(())
    }

    #[sqlx::test]
    async fn test_registration_deadline(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let mut create = demo_event(UserId::new(), None);
        create.registration_deadline = Some(Utc::now() - Duration::hours(1));
        let event = repo.create(create).await?;

        let res = repo.register_participant(event.event_id, UserId::new()).await;
        assert!(
            matches!(res, Err(AppError::UnprocessableEntity(ref m)) if m == "Registration deadline has passed")
        );

        Ok(())
    }

    #[sqlx::test]
    async fn test_register_missing_event(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo.register_participant(EventId::new(), UserId::new()).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }

    #[sqlx::test]
    async fn test_find_all_filters(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));
        let organizer = UserId::new();

        let mut cultural = demo_event(organizer, None);
        cultural.category = EventCategory::Cultural;
        repo.create(cultural).await?;
        repo.create(demo_event(organizer, None)).await?;
        repo.create(demo_event(UserId::new(), None)).await?;

        let technical = repo
            .find_all(EventListOptions {
                category: Some(EventCategory::Technical),
                ..Default::default()
            })
            .await?;
        assert_eq!(technical.len(), 2);

        let by_organizer = repo
            .find_all(EventListOptions {
                organizer: Some(organizer),
                ..Default::default()
            })
            .await?;
        assert_eq!(by_organizer.len(), 2);

        let paged = repo
            .find_all(EventListOptions {
                limit: Some(2),
                skip: Some(1),
                ..Default::default()
            })
            .await?;
        assert_eq!(paged.len(), 2);

        Ok(())
    }

    #[sqlx::test]
    async fn test_calendar_projection(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let mut in_june = demo_event(UserId::new(), None);
        in_june.event_date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        in_june.event_time = "18:00".into();
        repo.create(in_june).await?;

        let mut earlier_in_june = demo_event(UserId::new(), None);
        earlier_in_june.event_date = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        earlier_in_june.event_time = "09:00".into();
        repo.create(earlier_in_june).await?;

        let mut in_july = demo_event(UserId::new(), None);
        in_july.event_date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        repo.create(in_july).await?;

        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        );
        let events = repo.find_by_date_range(range).await?;
        assert_eq!(events.len(), 2);
        // 同じ日付の中では時刻の昇順
        assert_eq!(events[0].event_time, "09:00");
        assert_eq!(events[1].event_time, "18:00");

        Ok(())
    }
}
