//! Rule tables: one ordered list of `(field, patterns, apply)` per record.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{Match, PlayerProfile, PlayerStats};

/// One extraction rule for a field of record `R`
///
/// Patterns are tried in order; the first capture group of the first
/// matching pattern is handed to `apply`, which parses it and assigns the
/// field. A capture that fails to parse leaves the field untouched.
pub struct FieldRule<R> {
    pub field: &'static str,
    pub patterns: Vec<Regex>,
    pub apply: fn(&mut R, &str),
}

impl<R> FieldRule<R> {
    fn new(field: &'static str, patterns: &[&str], apply: fn(&mut R, &str)) -> Self {
        Self {
            field,
            patterns: patterns.iter().map(|p| compile(p)).collect(),
            apply,
        }
    }

    /// Trimmed first capture of the first matching pattern
    pub fn capture<'h>(&self, haystack: &'h str) -> Option<&'h str> {
        self.patterns.iter().find_map(|re| {
            re.captures(haystack)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
        })
    }
}

/// Patterns are literals in this file; a bad one is a programming error
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid extraction pattern {:?}: {}", pattern, e))
}

/// Labeled token: `label`, then `"`/whitespace/`:` separators, then `value`
fn labeled(label: &str, value: &str) -> String {
    format!(r#"(?i){}["\s:]+({})"#, label, value)
}

// ASCII only: a run of other Unicode digits must not shadow a later match
const INTEGER: &str = "[0-9]+";
const DECIMAL: &str = r"[0-9]+\.?[0-9]*";

fn set_string(slot: &mut Option<String>, raw: &str) {
    if !raw.is_empty() {
        *slot = Some(raw.to_string());
    }
}

fn set_parsed<T: std::str::FromStr>(slot: &mut Option<T>, raw: &str) {
    if let Ok(value) = raw.parse::<T>() {
        *slot = Some(value);
    }
}

/// Profile page rules
pub static PROFILE_RULES: Lazy<Vec<FieldRule<PlayerProfile>>> = Lazy::new(|| {
    vec![
        FieldRule::new(
            "nickname",
            &[
                r#"(?i)<h1[^>]*class="[^"]*(?:player-name|profile-name|username)[^"]*"[^>]*>([^<]+)</h1>"#,
                r#"(?i)<div[^>]*class="[^"]*nickname[^"]*"[^>]*>([^<]+)</div>"#,
                r#"(?i)<span[^>]*class="[^"]*player-nick[^"]*"[^>]*>([^<]+)</span>"#,
            ],
            |p: &mut PlayerProfile, raw: &str| set_string(&mut p.nickname, raw),
        ),
        FieldRule::new(
            "level",
            &[labeled("(?:level|nível|lvl)", INTEGER).as_str()],
            |p: &mut PlayerProfile, raw: &str| set_parsed(&mut p.level, raw),
        ),
        FieldRule::new(
            "kda",
            &[labeled("kda", DECIMAL).as_str()],
            |p: &mut PlayerProfile, raw: &str| set_parsed(&mut p.kda, raw),
        ),
    ]
});

/// Block-level elements holding one match each
pub static MATCH_BLOCK: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?i)<div[^>]*class="[^"]*match[^"]*"[^>]*>([\s\S]*?)</div>"#)
});

/// Rules applied to the inner content of each match block
pub static MATCH_RULES: Lazy<Vec<FieldRule<Match>>> = Lazy::new(|| {
    vec![
        FieldRule::new("id", &[labeled("match-id", INTEGER).as_str()], |m: &mut Match, raw: &str| {
            set_string(&mut m.id, raw)
        }),
        FieldRule::new("date", &[labeled("date", r#"[^"<]+"#).as_str()], |m: &mut Match, raw: &str| {
            set_string(&mut m.date, raw)
        }),
        FieldRule::new("result", &[labeled("result", r"(?-u:\w)+").as_str()], |m: &mut Match, raw: &str| {
            set_string(&mut m.result, raw)
        }),
        FieldRule::new("score", &[labeled("score", "[0-9-]+").as_str()], |m: &mut Match, raw: &str| {
            set_string(&mut m.score, raw)
        }),
        FieldRule::new("map", &[labeled("map", r#"[^"<]+"#).as_str()], |m: &mut Match, raw: &str| {
            set_string(&mut m.map, raw)
        }),
    ]
});

/// Stats page rules
pub static STATS_RULES: Lazy<Vec<FieldRule<PlayerStats>>> = Lazy::new(|| {
    vec![
        FieldRule::new("kda", &[labeled("kda", DECIMAL).as_str()], |s: &mut PlayerStats, raw: &str| {
            set_parsed(&mut s.kda, raw)
        }),
        FieldRule::new("headshot", &[labeled("headshot", DECIMAL).as_str()], |s: &mut PlayerStats, raw: &str| {
            set_parsed(&mut s.headshot, raw)
        }),
        FieldRule::new("winrate", &[labeled("winrate", DECIMAL).as_str()], |s: &mut PlayerStats, raw: &str| {
            set_parsed(&mut s.winrate, raw)
        }),
        FieldRule::new("kills", &[labeled("kills", INTEGER).as_str()], |s: &mut PlayerStats, raw: &str| {
            set_parsed(&mut s.kills, raw)
        }),
        FieldRule::new("deaths", &[labeled("deaths", INTEGER).as_str()], |s: &mut PlayerStats, raw: &str| {
            set_parsed(&mut s.deaths, raw)
        }),
        FieldRule::new("assists", &[labeled("assists", INTEGER).as_str()], |s: &mut PlayerStats, raw: &str| {
            set_parsed(&mut s.assists, raw)
        }),
    ]
});
