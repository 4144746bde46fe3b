pub mod matches;
pub mod pairings;
pub mod players;
pub mod standings;
