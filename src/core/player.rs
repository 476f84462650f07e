use serde::{Deserialize, Serialize};

/// Basic profile data scraped from a player page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerProfile {
    /// Display nickname
    #[serde(default)]
    pub nickname: Option<String>,

    /// Account level
    #[serde(default)]
    pub level: Option<u64>,

    /// Kill/death/assist ratio
    #[serde(default)]
    pub kda: Option<f64>,
}

/// One finished match from a player's history
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Match {
    #[serde(default)]
    pub id: Option<String>,

    /// ISO calendar date (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,

    /// "win", "loss" or whatever the page shows
    #[serde(default)]
    pub result: Option<String>,

    /// Final score, "N-M"
    #[serde(default)]
    pub score: Option<String>,

    #[serde(default)]
    pub map: Option<String>,
}

/// Aggregated statistics for a player
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerStats {
    #[serde(default)]
    pub kda: Option<f64>,

    /// Headshot percentage
    #[serde(default)]
    pub headshot: Option<f64>,

    /// Win percentage
    #[serde(default)]
    pub winrate: Option<f64>,

    #[serde(default)]
    pub kills: Option<u64>,

    #[serde(default)]
    pub deaths: Option<u64>,

    #[serde(default)]
    pub assists: Option<u64>,
}

impl PlayerProfile {
    /// True when no field could be recovered
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none() && self.level.is_none() && self.kda.is_none()
    }
}

impl Match {
    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "#{} {} {} {} ({})",
            self.id.as_deref().unwrap_or("?"),
            self.date.as_deref().unwrap_or("?"),
            self.map.as_deref().unwrap_or("?"),
            self.score.as_deref().unwrap_or("?"),
            self.result.as_deref().unwrap_or("?"),
        )
    }
}

impl PlayerStats {
    /// True when no field could be recovered
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_nulls() {
        let profile = PlayerProfile::default();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "nickname": null, "level": null, "kda": null })
        );
        assert!(profile.is_empty());
    }

    #[test]
    fn test_match_from_partial_json() {
        let m: Match = serde_json::from_str(r#"{"id": "42", "map": "Mirage"}"#).unwrap();
        assert_eq!(m.id.as_deref(), Some("42"));
        assert_eq!(m.map.as_deref(), Some("Mirage"));
        assert!(m.date.is_none());
        assert_eq!(m.display(), "#42 ? Mirage ? (?)");
    }

    #[test]
    fn test_stats_is_empty() {
        let mut stats = PlayerStats::default();
        assert!(stats.is_empty());

        stats.kills = Some(3);
        assert!(!stats.is_empty());
    }
}
