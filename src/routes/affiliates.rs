// Leaderboard route - ranked affiliates for a date window

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use super::AppState;
use crate::error::{AppError, FieldError};
use crate::models::affiliate::normalize;
use crate::models::leaderboard::LeaderboardResponse;
use crate::utils::dates::{is_iso_date, local_today, resolve, Period};

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub period: Option<String>,
}

impl LeaderboardQuery {
    /// Validate the query and settle the `(start_at, end_at)` pair to send upstream.
    ///
    /// Explicit dates win and are passed on verbatim. With no dates at all, a
    /// valid `period` is resolved against `today`.
    pub fn window(&self, today: NaiveDate) -> Result<(String, String), AppError> {
        let period = self.period.as_deref().map(str::parse::<Period>);

        if let (None, None, Some(Ok(period))) = (&self.start_at, &self.end_at, &period) {
            let range = resolve(*period, today);
            return Ok((range.start_at_string(), range.end_at_string()));
        }

        let mut errors = Vec::new();
        let start_at = check_date("start_at", self.start_at.as_deref(), &mut errors);
        let end_at = check_date("end_at", self.end_at.as_deref(), &mut errors);

        if let Some(Err(_)) = period {
            errors.push(FieldError::new(
                "period",
                "Invalid enum value. Expected 'today' | 'week' | 'month'",
            ));
        }

        match (start_at, end_at) {
            (Some(start_at), Some(end_at)) if errors.is_empty() => Ok((start_at, end_at)),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

fn check_date(field: &str, value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        None => {
            errors.push(FieldError::new(field, "Required"));
            None
        }
        Some(value) if !is_iso_date(value) => {
            errors.push(FieldError::new(field, "Invalid date format. Use YYYY-MM-DD"));
            None
        }
        Some(value) => Some(value.to_string()),
    }
}

/// GET /api/affiliates
pub async fn leaderboard_handler(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let (start_at, end_at) = query.window(local_today())?;

    let payload = state.rainbet.fetch_affiliates(&start_at, &end_at).await?;
    let affiliates = normalize(&payload);
    info!("Processed {} affiliates", affiliates.len());

    Ok(Json(LeaderboardResponse::new(affiliates, start_at, end_at)))
}
