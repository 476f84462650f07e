//! JSON envelopes and query parsing for the HTTP surface.

use serde::Serialize;

/// Success body: `{success, data, page?, cached}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
    /// Only set on paginated routes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    pub cached: bool,
}

impl<T> DataResponse<T> {
    pub fn new(data: T, cached: bool) -> Self {
        Self { success: true, data, page: None, cached }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Failure body: `{success: false, error}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub mode: String,
}

/// Parse the `page` query value; missing or blank means page 1
pub fn parse_page(raw: Option<&str>) -> std::result::Result<u32, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(value) => match value.parse::<u32>() {
            Ok(page) if page > 0 => Ok(page),
            _ => Err(format!("Invalid page: {}", value)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerStats;
    use serde_json::json;

    #[test]
    fn test_parse_page_defaults_to_first() {
        assert_eq!(parse_page(None), Ok(1));
        assert_eq!(parse_page(Some("")), Ok(1));
        assert_eq!(parse_page(Some("  ")), Ok(1));
    }

    #[test]
    fn test_parse_page_valid() {
        assert_eq!(parse_page(Some("3")), Ok(3));
        assert_eq!(parse_page(Some(" 12 ")), Ok(12));
    }

    #[test]
    fn test_parse_page_rejects_zero_and_garbage() {
        assert_eq!(parse_page(Some("0")), Err("Invalid page: 0".to_string()));
        assert_eq!(parse_page(Some("abc")), Err("Invalid page: abc".to_string()));
        assert!(parse_page(Some("-1")).is_err());
        assert!(parse_page(Some("1.5")).is_err());
    }

    #[test]
    fn test_data_response_omits_page() {
        let body = serde_json::to_value(DataResponse::new(PlayerStats::default(), true)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["cached"], true);
        assert!(body.get("page").is_none());
        assert_eq!(body["data"]["kills"], json!(null));
    }

    #[test]
    fn test_data_response_with_page() {
        let body = serde_json::to_value(DataResponse::new(Vec::<u8>::new(), false).with_page(2)).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [], "page": 2, "cached": false }));
    }

    #[test]
    fn test_error_response() {
        let body = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "boom" }));
    }
}
