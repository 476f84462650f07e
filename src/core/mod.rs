pub mod fetched;
pub mod player;

pub use fetched::Fetched;
pub use player::{Match, PlayerProfile, PlayerStats};
