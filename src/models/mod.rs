// Data models
pub mod affiliate;
pub mod leaderboard;
