use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use serde_json::Value;

pub const UNKNOWN: &str = "unknown";

/// Record of a submission that filled the honeypot field. Written once, never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct HoneypotLogEntry {
    pub ip_address: String,
    pub user_agent: String,
    pub payload: Value,
}

impl HoneypotLogEntry {
    /// Captures request metadata alongside the untouched request body.
    #[must_use]
    pub fn from_request(headers: &HeaderMap, ip_headers: &[String], payload: Value) -> Self {
        Self { ip_address: client_ip(headers, ip_headers), user_agent: user_agent(headers), payload }
    }
}

/// Returns the first non-empty value among `ip_headers`, in order. A comma-separated
/// chain contributes its left-most entry.
#[must_use]
pub fn client_ip(headers: &HeaderMap, ip_headers: &[String]) -> String {
    ip_headers
        .iter()
        .filter_map(|name| headers.get(name.as_str()).and_then(|v| v.to_str().ok()))
        .filter_map(|raw| raw.split(',').next().map(str::trim))
        .find(|ip| !ip.is_empty())
        .map_or_else(|| UNKNOWN.to_string(), ToString::to_string)
}

#[must_use]
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|ua| !ua.is_empty())
        .map_or_else(|| UNKNOWN.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn ip_headers() -> Vec<String> {
        vec!["cf-connecting-ip".into(), "x-real-ip".into()]
    }

    #[test]
    fn test_client_ip_prefers_first_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        headers.insert("cf-connecting-ip", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(client_ip(&headers, &ip_headers()), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_through_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-connecting-ip", HeaderValue::from_static(""));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));

        assert_eq!(client_ip(&headers, &ip_headers()), "198.51.100.4");
    }

    #[test]
    fn test_client_ip_takes_left_most_of_chain() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.4, 10.0.0.1"));

        assert_eq!(client_ip(&headers, &["x-forwarded-for".to_string()]), "198.51.100.4");
    }

    #[test]
    fn test_missing_metadata_is_unknown() {
        let entry = HoneypotLogEntry::from_request(&HeaderMap::new(), &ip_headers(), json!({"company": "x"}));

        assert_eq!(entry.ip_address, UNKNOWN);
        assert_eq!(entry.user_agent, UNKNOWN);
        assert_eq!(entry.payload, json!({"company": "x"}));
    }

    #[test]
    fn test_user_agent_is_captured() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("curl/8.5.0"));

        assert_eq!(user_agent(&headers), "curl/8.5.0");
    }
}
