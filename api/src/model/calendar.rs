use crate::model::event::{CategoryName, StatusName};
use chrono::{Datelike, NaiveDate, Utc};
use garde::Validate;
use kernel::model::calendar::{CalendarEvent, DateRange};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    #[garde(skip)]
    pub start_date: Option<NaiveDate>,
    #[garde(skip)]
    pub end_date: Option<NaiveDate>,
    #[garde(skip)]
    pub year: Option<i32>,
    #[garde(range(min = 1, max = 12))]
    pub month: Option<u32>,
}

impl CalendarQuery {
    // 明示的な日付範囲が優先。なければ year/month（省略時は今月）の月全体
    pub fn date_range(&self) -> AppResult<DateRange> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(AppError::UnprocessableEntity(
                        "endDate must not be before startDate".into(),
                    ));
                }
                Ok(DateRange::new(start, end))
            }
            (Some(_), None) | (None, Some(_)) => Err(AppError::UnprocessableEntity(
                "startDate and endDate must be specified together".into(),
            )),
            (None, None) => {
                let today = Utc::now().date_naive();
                let year = self.year.unwrap_or_else(|| today.year());
                let month = self.month.unwrap_or_else(|| today.month());
                month_range(year, month)
            }
        }
    }
}

// 月初から月末までの範囲（月は 1 始まり）
pub fn month_range(year: i32, month: u32) -> AppResult<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        AppError::UnprocessableEntity(format!("無効な年月です: {year}-{month}"))
    })?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::UnprocessableEntity(format!("無効な年月です: {year}-{month}")))?;
    let end = next.pred_opt().ok_or_else(|| {
        AppError::UnprocessableEntity(format!("無効な年月です: {year}-{month}"))
    })?;
    Ok(DateRange::new(start, end))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub category: CategoryName,
    pub status: StatusName,
    pub featured: bool,
    pub current_participants: i32,
    pub max_participants: Option<i32>,
}

impl From<CalendarEvent> for CalendarEventResponse {
    fn from(value: CalendarEvent) -> Self {
        let CalendarEvent {
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
        Self {
            id: event_id.to_string(),
            title,
            date: event_date,
            time: event_time,
            category: category.into(),
            status: status.into(),
            featured,
            current_participants,
            max_participants,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventsResponse {
    pub items: Vec<CalendarEventResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2026, 2, 28)] // 平年の 2 月
    #[case(2028, 2, 29)] // うるう年
    #[case(2026, 9, 30)]
    #[case(2026, 12, 31)] // 年またぎ
    fn month_range_covers_whole_month(#[case] year: i32, #[case] month: u32, #[case] last: u32) {
        let range = month_range(year, month).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(year, month, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(year, month, last).unwrap());
    }

    #[test]
    fn explicit_range_wins_over_month() {
        let query = CalendarQuery {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 10),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 20),
            year: Some(2026),
            month: Some(7),
        };
        let range = query.date_range().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());
    }

    #[test]
    fn reversed_range_is_rejected() {
        let query = CalendarQuery {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 20),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 10),
            year: None,
            month: None,
        };
        assert!(query.date_range().is_err());
    }

    #[test]
    fn half_open_range_is_rejected() {
        let query = CalendarQuery {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 20),
            end_date: None,
            year: None,
            month: None,
        };
        assert!(query.date_range().is_err());
    }
}
