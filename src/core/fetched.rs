use serde::{Deserialize, Serialize};

/// Pipeline result with retrieval metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fetched<T> {
    /// The extracted (or mocked) record
    pub data: T,

    /// Whether the data came from the cache
    pub cached: bool,

    /// Retrieval latency in milliseconds
    pub latency_ms: f64,
}

impl<T> Fetched<T> {
    pub fn fresh(data: T, latency_ms: f64) -> Self {
        Self { data, cached: false, latency_ms }
    }

    pub fn from_cache(data: T, latency_ms: f64) -> Self {
        Self { data, cached: true, latency_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_flags() {
        let fresh = Fetched::fresh(1u8, 2.5);
        assert!(!fresh.cached);
        assert_eq!(fresh.latency_ms, 2.5);

        let hit = Fetched::from_cache("x", 0.1);
        assert!(hit.cached);
        assert_eq!(hit.data, "x");
    }
}
