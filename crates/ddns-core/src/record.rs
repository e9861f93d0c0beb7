//! Record data model
//!
//! Plain value types shared by the reconciler and provider implementations.
//! Everything here lives for one invocation; nothing is persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;

/// Separator accepted inside a single record token ("www,blog,mail")
pub const RECORD_NAME_SEPARATOR: char = ',';

/// DNS record type managed by the reconciler
///
/// Only address records are supported today; the enum is the extension
/// point for further typed host records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// A record (IPv4)
    #[serde(rename = "A")]
    A,
    /// AAAA record (IPv6)
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// Wire name used in provider URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }

    /// Record type matching an address
    pub fn for_ip(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::Aaaa,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a record gets written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// The record does not exist yet (POST)
    Create,
    /// The record exists; its values are replaced wholesale (PUT)
    Update,
}

impl WriteMode {
    /// Pick the mode from the result of a read
    pub fn for_existing(exists: bool) -> Self {
        if exists {
            WriteMode::Update
        } else {
            WriteMode::Create
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Create => f.write_str("create"),
            WriteMode::Update => f.write_str("update"),
        }
    }
}

/// One record to converge: (zone, name, type) plus the desired value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpec {
    zone: String,
    name: String,
    record_type: RecordType,
    ttl_seconds: u32,
    desired_value: String,
}

impl RecordSpec {
    /// Create a record spec
    pub fn new(
        zone: impl Into<String>,
        name: impl Into<String>,
        record_type: RecordType,
        ttl_seconds: u32,
        desired_value: impl Into<String>,
    ) -> Self {
        Self {
            zone: zone.into(),
            name: name.into(),
            record_type,
            ttl_seconds,
            desired_value: desired_value.into(),
        }
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn ttl_seconds(&self) -> u32 {
        self.ttl_seconds
    }

    pub fn desired_value(&self) -> &str {
        &self.desired_value
    }
}

/// What the provider currently holds for a (zone, name, type) triple
///
/// Absence is expressed by the provider returning `None`; a value of this
/// type always describes an existing record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteRecordState {
    /// Values of the record set
    pub values: BTreeSet<String>,
    /// TTL reported by the provider, if any
    pub ttl: Option<u32>,
}

impl RemoteRecordState {
    /// Build a state from the values returned by the provider
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            ttl: None,
        }
    }

    /// Attach the provider-reported TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Whether the record set already contains `value`
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }
}

/// Input of one reconciliation pass (one address family)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileRequest {
    /// Zone under management (e.g. "example.com")
    pub zone: String,
    /// Raw record tokens as given on the command line
    pub record_names: Vec<String>,
    /// Value every record should end up holding
    pub desired_value: String,
    /// TTL written with created/updated records
    pub ttl_seconds: u32,
    /// Record type of this pass
    pub record_type: RecordType,
}

impl ReconcileRequest {
    /// Create a request for an address discovered for one family
    ///
    /// A fully-qualified zone ("example.com.") is stored without its
    /// trailing dot, as provider URLs expect.
    pub fn new(
        zone: impl Into<String>,
        record_names: Vec<String>,
        desired_ip: IpAddr,
        ttl_seconds: u32,
    ) -> Self {
        let mut zone = zone.into();
        if zone.ends_with('.') {
            zone.pop();
        }

        Self {
            zone,
            record_names,
            desired_value: desired_ip.to_string(),
            ttl_seconds,
            record_type: RecordType::for_ip(&desired_ip),
        }
    }

    /// Record names to process, in order (see [`expand_record_names`])
    pub fn expanded_names(&self) -> Vec<String> {
        expand_record_names(&self.record_names)
    }

    /// Build the `RecordSpec` for one expanded name
    pub fn spec_for(&self, name: &str) -> RecordSpec {
        RecordSpec::new(
            self.zone.clone(),
            name,
            self.record_type,
            self.ttl_seconds,
            self.desired_value.clone(),
        )
    }
}

/// Normalize raw record tokens into record names
///
/// If any token contains ',', the record set is exactly the comma-split of
/// the first token and every other token is ignored. Otherwise it is the
/// literal list of tokens given.
pub fn expand_record_names<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let batched = tokens
        .iter()
        .any(|t| t.as_ref().contains(RECORD_NAME_SEPARATOR));

    match tokens.first() {
        Some(first) if batched => first
            .as_ref()
            .split(RECORD_NAME_SEPARATOR)
            .map(str::to_string)
            .collect(),
        _ => tokens.iter().map(|t| t.as_ref().to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_expand_single_name() {
        assert_eq!(expand_record_names(&["www"]), vec!["www"]);
    }

    #[test]
    fn test_expand_comma_list() {
        assert_eq!(
            expand_record_names(&["www,blog,mail"]),
            vec!["www", "blog", "mail"]
        );
    }

    #[test]
    fn test_expand_literal_tokens_keep_order() {
        assert_eq!(
            expand_record_names(&["@", "www", "subdomain"]),
            vec!["@", "www", "subdomain"]
        );
    }

    #[test]
    fn test_expand_uses_first_token_when_any_has_comma() {
        // the comma sits in the second token, yet only the first one is split
        assert_eq!(expand_record_names(&["www", "blog,mail"]), vec!["www"]);
        assert_eq!(
            expand_record_names(&["a,b", "c", "d,e"]),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_expand_keeps_empty_segments() {
        assert_eq!(expand_record_names(&["www,,blog"]), vec!["www", "", "blog"]);
    }

    #[test]
    fn test_expand_empty_input() {
        let empty: [&str; 0] = [];
        assert!(expand_record_names(&empty).is_empty());
    }

    #[test]
    fn test_record_type_wire_names() {
        assert_eq!(RecordType::A.to_string(), "A");
        assert_eq!(RecordType::Aaaa.to_string(), "AAAA");
        assert_eq!(
            serde_json::from_str::<RecordType>("\"AAAA\"").ok(),
            Some(RecordType::Aaaa)
        );
    }

    #[test]
    fn test_request_derives_type_from_ip() {
        let v4 = ReconcileRequest::new(
            "example.com",
            vec!["www".into()],
            IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5)),
            300,
        );
        assert_eq!(v4.record_type, RecordType::A);
        assert_eq!(v4.desired_value, "203.0.113.5");

        let v6 = ReconcileRequest::new(
            "example.com",
            vec!["www".into()],
            IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)),
            300,
        );
        assert_eq!(v6.record_type, RecordType::Aaaa);
        assert_eq!(v6.desired_value, "2001:db8::1");
    }

    #[test]
    fn test_request_strips_trailing_zone_dot() {
        let request = ReconcileRequest::new(
            "example.com.",
            vec!["www".into()],
            IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5)),
            300,
        );
        assert_eq!(request.zone, "example.com");
        assert_eq!(request.spec_for("www").zone(), "example.com");
    }

    #[test]
    fn test_write_mode_from_existence() {
        assert_eq!(WriteMode::for_existing(false), WriteMode::Create);
        assert_eq!(WriteMode::for_existing(true), WriteMode::Update);
    }

    #[test]
    fn test_remote_state_membership() {
        let state = RemoteRecordState::new(["192.0.2.1", "192.0.2.2"]).with_ttl(600);
        assert!(state.contains("192.0.2.2"));
        assert!(!state.contains("192.0.2.3"));
        assert_eq!(state.ttl, Some(600));
    }
}
