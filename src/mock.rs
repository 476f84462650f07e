//! Synthetic player data for running without a render key.
//!
//! Profiles and stats are fixed; match history varies map, result and score
//! on every call unless a seeded RNG is passed in.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::{Match, PlayerProfile, PlayerStats};

pub const MOCK_MAPS: [&str; 5] = ["Mirage", "Dust2", "Inferno", "Nuke", "Overpass"];
pub const MOCK_RESULTS: [&str; 2] = ["win", "loss"];

/// Matches returned per mock page
pub const MOCK_PAGE_SIZE: usize = 10;

pub fn mock_profile(player_id: &str) -> PlayerProfile {
    PlayerProfile {
        nickname: Some(format!("Player_{}", player_id)),
        level: Some(10),
        kda: Some(1.25),
    }
}

pub fn mock_matches(player_id: &str, page: u32) -> Vec<Match> {
    mock_matches_with_rng(player_id, page, &mut rand::thread_rng())
}

/// Newest first: match `i` is dated today minus `i` days
pub fn mock_matches_with_rng<R: Rng>(player_id: &str, page: u32, rng: &mut R) -> Vec<Match> {
    let today = Utc::now().date_naive();

    (0..MOCK_PAGE_SIZE)
        .map(|i| {
            let date = today - Duration::days(i as i64);
            Match {
                id: Some(format!("{}_{}_{}", player_id, page, i)),
                date: Some(date.format("%Y-%m-%d").to_string()),
                result: MOCK_RESULTS.choose(rng).map(|r| r.to_string()),
                score: Some(format!("16-{}", rng.gen_range(0..16))),
                map: MOCK_MAPS.choose(rng).map(|m| m.to_string()),
            }
        })
        .collect()
}

pub fn mock_stats(_player_id: &str) -> PlayerStats {
    PlayerStats {
        kda: Some(1.25),
        headshot: Some(52.3),
        winrate: Some(54.8),
        kills: Some(1250),
        deaths: Some(1000),
        assists: Some(320),
    }
}
