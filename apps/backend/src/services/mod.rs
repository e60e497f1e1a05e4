pub mod achievements;
pub mod streaks;
