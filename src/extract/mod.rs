//! Pattern-based field extraction from rendered player pages.
//!
//! Extraction never fails: every field is independently optional, so a page
//! whose layout drifted yields partial nulls instead of an error.

pub mod rules;

use crate::core::{Match, PlayerProfile, PlayerStats};
use rules::{FieldRule, MATCH_BLOCK, MATCH_RULES, PROFILE_RULES, STATS_RULES};

/// Run every rule in `rules` against `haystack`, starting from `R::default()`
pub fn apply_rules<R: Default>(rules: &[FieldRule<R>], haystack: &str) -> R {
    let mut record = R::default();
    for rule in rules {
        if let Some(raw) = rule.capture(haystack) {
            tracing::debug!("Extracted {} = {:?}", rule.field, raw);
            (rule.apply)(&mut record, raw);
        }
    }
    record
}

/// Extract nickname, level and KDA from a profile page
pub fn extract_profile(html: &str) -> PlayerProfile {
    apply_rules(&PROFILE_RULES, html)
}

/// Extract every match block, in document order
///
/// Blocks where nothing matched are kept as all-null matches.
pub fn extract_matches(html: &str) -> Vec<Match> {
    let matches: Vec<Match> = MATCH_BLOCK
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|block| apply_rules(&MATCH_RULES, block.as_str()))
        .collect();

    tracing::debug!("Found {} match blocks", matches.len());
    matches
}

/// Extract aggregate stats from a stats page
pub fn extract_stats(html: &str) -> PlayerStats {
    apply_rules(&STATS_RULES, html)
}
