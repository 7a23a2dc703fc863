pub mod leaderboard;
pub mod record;
