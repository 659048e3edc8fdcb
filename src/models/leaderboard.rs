// Response envelopes served to the leaderboard front end

use serde::Serialize;

use super::affiliate::AffiliateRecord;
use crate::utils::dates::DateRange;

/// Window the leaderboard was requested for, echoed back verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodWindow {
    pub start_at: String,
    pub end_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    pub data: Vec<AffiliateRecord>,
    /// Always `data.len()`
    pub total: usize,
    pub period: PeriodWindow,
}

impl LeaderboardResponse {
    pub fn new(data: Vec<AffiliateRecord>, start_at: String, end_at: String) -> Self {
        Self {
            success: true,
            total: data.len(),
            data,
            period: PeriodWindow { start_at, end_at },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DateRangeResponse {
    pub success: bool,
    pub data: DateRange,
}

impl DateRangeResponse {
    pub fn new(data: DateRange) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
