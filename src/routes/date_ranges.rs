// Date range route - concrete dates for a period token

use axum::{extract::Path, Json};

use crate::error::AppError;
use crate::models::leaderboard::DateRangeResponse;
use crate::utils::dates::{local_today, resolve_token};

/// GET /api/date-ranges/:period
pub async fn date_range_handler(
    Path(period): Path<String>,
) -> Result<Json<DateRangeResponse>, AppError> {
    let range = resolve_token(&period, local_today())?;
    Ok(Json(DateRangeResponse::new(range)))
}
