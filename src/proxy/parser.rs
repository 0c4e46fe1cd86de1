//! Candidate parsing
//!
//! Extracts `ip:port` tokens from fetched source bodies. Only literal
//! IPv4:port tokens survive; hostnames and IPv6 are discarded. The cap
//! applies to raw entries in source order, so entries beyond it are never
//! examined at all.

use crate::proxy::fetcher::SourceBody;
use crate::proxy::models::{Candidate, ProtocolClass};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Full-token IPv4:port pattern. Purely syntactic: octet range is not
/// checked, matching the upstream sources' own conventions.
static PROXY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}:\d{1,5}$")
        .expect("invalid proxy address regex")
});

/// Parses candidates out of raw source bodies.
pub struct CandidateParser;

impl CandidateParser {
    /// Extract up to `cap` raw entries from the body and keep the valid ones.
    ///
    /// The only error is a JSON-declared body that does not decode to an
    /// array; malformed individual entries are dropped silently.
    pub fn parse(
        body: &SourceBody,
        class: ProtocolClass,
        cap: usize,
    ) -> Result<Vec<Candidate>, serde_json::Error> {
        match body {
            SourceBody::Text(text) => Ok(Self::parse_text(text, class, cap)),
            SourceBody::Json(raw) => Self::parse_json(raw, class, cap),
        }
    }

    fn parse_text(text: &str, class: ProtocolClass, cap: usize) -> Vec<Candidate> {
        text.lines()
            .take(cap)
            .filter_map(|line| {
                let line = line.trim();
                if line.is_empty() {
                    return None;
                }
                Self::validate(line, class)
            })
            .collect()
    }

    /// Strict JSON shape: the body must be an array; each element needs both
    /// an `ip` and a `port` field (number or string).
    fn parse_json(
        raw: &str,
        class: ProtocolClass,
        cap: usize,
    ) -> Result<Vec<Candidate>, serde_json::Error> {
        let items: Vec<Value> = serde_json::from_str(raw)?;
        let candidates = items
            .iter()
            .take(cap)
            .filter_map(|item| {
                let ip = item.get("ip").and_then(field_to_string);
                let port = item.get("port").and_then(field_to_string);
                match (ip, port) {
                    (Some(ip), Some(port)) => Self::validate(&format!("{ip}:{port}"), class),
                    _ => {
                        debug!(%item, "missing ip or port in JSON item");
                        None
                    }
                }
            })
            .collect();
        Ok(candidates)
    }

    fn validate(token: &str, class: ProtocolClass) -> Option<Candidate> {
        if PROXY_PATTERN.is_match(token) {
            Some(Candidate::new(token, class))
        } else {
            debug!(token, %class, "invalid proxy format");
            None
        }
    }
}

fn field_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASS: ProtocolClass = ProtocolClass::Socks5;

    fn text(body: &str) -> SourceBody {
        SourceBody::Text(body.to_string())
    }

    fn json(body: &str) -> SourceBody {
        SourceBody::Json(body.to_string())
    }

    #[test]
    fn test_parse_text_keeps_valid_tokens() {
        let body = text("1.2.3.4:1080\nnot-a-proxy\n5.6.7.8:1081\n");
        let candidates = CandidateParser::parse(&body, CLASS, 50).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].address, "1.2.3.4:1080");
        assert_eq!(candidates[1].address, "5.6.7.8:1081");
    }

    #[test]
    fn test_parse_text_skips_blank_lines() {
        let body = text("\n  \n1.2.3.4:1080\n\n");
        let candidates = CandidateParser::parse(&body, CLASS, 50).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_parse_text_rejects_hostnames_and_ipv6() {
        let body = text("proxy.example.com:1080\n[::1]:1080\n1.2.3.4\n1.2.3.4:123456\n");
        let candidates = CandidateParser::parse(&body, CLASS, 50).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_parse_text_cap_boundary() {
        let body: String = (0..60).map(|i| format!("10.0.0.{i}:1080\n")).collect();
        let candidates = CandidateParser::parse(&text(&body), CLASS, 50).unwrap();
        assert_eq!(candidates.len(), 50);
        assert_eq!(candidates[0].address, "10.0.0.0:1080");
        assert_eq!(candidates[49].address, "10.0.0.49:1080");
    }

    #[test]
    fn test_cap_counts_raw_entries_not_valid_ones() {
        // The invalid first line consumes one slot of the cap.
        let body = text("garbage\n1.2.3.4:1080\n5.6.7.8:1081\n");
        let candidates = CandidateParser::parse(&body, CLASS, 2).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].address, "1.2.3.4:1080");
    }

    #[test]
    fn test_parse_json_skips_items_missing_fields() {
        let body = json(r#"[{"ip":"9.9.9.9","port":8080},{"ip":"8.8.8.8"}]"#);
        let candidates = CandidateParser::parse(&body, CLASS, 50).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].address, "9.9.9.9:8080");
    }

    #[test]
    fn test_parse_json_port_as_string() {
        let body = json(r#"[{"ip":"9.9.9.9","port":"1080"}]"#);
        let candidates = CandidateParser::parse(&body, CLASS, 50).unwrap();
        assert_eq!(candidates[0].address, "9.9.9.9:1080");
    }

    #[test]
    fn test_parse_json_invalid_body_is_error() {
        assert!(CandidateParser::parse(&json("not json"), CLASS, 50).is_err());
        assert!(CandidateParser::parse(&json(r#"{"ip":"9.9.9.9"}"#), CLASS, 50).is_err());
    }

    #[test]
    fn test_parse_json_cap_applies_to_array_entries() {
        let items: Vec<String> = (0..10)
            .map(|i| format!(r#"{{"ip":"10.0.0.{i}","port":1080}}"#))
            .collect();
        let body = json(&format!("[{}]", items.join(",")));
        let candidates = CandidateParser::parse(&body, CLASS, 3).unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[2].address, "10.0.0.2:1080");
    }

    #[test]
    fn test_parsed_candidates_always_match_pattern() {
        let body = text("1.2.3.4:1080\njunk:port\n256.1.1.1:80\n9.9.9.9:65535\n");
        for candidate in CandidateParser::parse(&body, CLASS, 50).unwrap() {
            assert!(PROXY_PATTERN.is_match(&candidate.address));
        }
    }
}
