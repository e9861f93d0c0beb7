//! Test doubles and common utilities for reconciliation contract tests
//!
//! The doubles record every call so tests can assert on exactly which
//! provider operations were issued.

#![allow(dead_code)]

use ddns_core::error::{Error, ProviderError, Result};
use ddns_core::traits::{DnsProvider, IpSource, IpVersion};
use ddns_core::{RecordSpec, RecordType, RemoteRecordState, WriteMode};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ZONE: &str = "example.com";

type RecordKey = (String, String, RecordType);

/// A recorded write_record() call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCall {
    pub zone: String,
    pub name: String,
    pub record_type: RecordType,
    pub ttl: u32,
    pub value: String,
    pub mode: WriteMode,
}

/// An in-memory DnsProvider that tracks calls
pub struct MockDnsProvider {
    /// Remote record sets
    records: Arc<Mutex<HashMap<RecordKey, Vec<String>>>>,
    /// Names passed to read_record(), in call order
    reads: Arc<Mutex<Vec<String>>>,
    /// Every write_record() call, in call order
    writes: Arc<Mutex<Vec<WriteCall>>>,
    /// Names whose read fails with the given status
    failing_reads: Arc<Mutex<HashMap<String, u16>>>,
    /// Names whose write fails with the given status
    failing_writes: Arc<Mutex<HashMap<String, u16>>>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            reads: Arc::new(Mutex::new(Vec::new())),
            writes: Arc::new(Mutex::new(Vec::new())),
            failing_reads: Arc::new(Mutex::new(HashMap::new())),
            failing_writes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a new MockDnsProvider that shares state with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            records: Arc::clone(&other.records),
            reads: Arc::clone(&other.reads),
            writes: Arc::clone(&other.writes),
            failing_reads: Arc::clone(&other.failing_reads),
            failing_writes: Arc::clone(&other.failing_writes),
        }
    }

    /// Seed an existing remote record set
    pub fn with_record(self, name: &str, record_type: RecordType, values: &[&str]) -> Self {
        self.records.lock().unwrap().insert(
            (ZONE.to_string(), name.to_string(), record_type),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Make read_record() fail for `name`
    pub fn failing_read(self, name: &str, status: u16) -> Self {
        self.failing_reads
            .lock()
            .unwrap()
            .insert(name.to_string(), status);
        self
    }

    /// Make write_record() fail for `name`
    pub fn failing_write(self, name: &str, status: u16) -> Self {
        self.failing_writes
            .lock()
            .unwrap()
            .insert(name.to_string(), status);
        self
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    /// Current remote values for a record
    pub fn values(&self, name: &str, record_type: RecordType) -> Option<Vec<String>> {
        self.records
            .lock()
            .unwrap()
            .get(&(ZONE.to_string(), name.to_string(), record_type))
            .cloned()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn read_record(
        &self,
        zone: &str,
        name: &str,
        record_type: RecordType,
    ) -> std::result::Result<Option<RemoteRecordState>, ProviderError> {
        self.reads.lock().unwrap().push(name.to_string());

        if let Some(status) = self.failing_reads.lock().unwrap().get(name) {
            return Err(ProviderError::api(*status, "read refused"));
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&(zone.to_string(), name.to_string(), record_type))
            .map(|values| RemoteRecordState::new(values.clone())))
    }

    async fn write_record(
        &self,
        spec: &RecordSpec,
        mode: WriteMode,
    ) -> std::result::Result<(), ProviderError> {
        self.writes.lock().unwrap().push(WriteCall {
            zone: spec.zone().to_string(),
            name: spec.name().to_string(),
            record_type: spec.record_type(),
            ttl: spec.ttl_seconds(),
            value: spec.desired_value().to_string(),
            mode,
        });

        if let Some(status) = self.failing_writes.lock().unwrap().get(spec.name()) {
            return Err(ProviderError::api(*status, "write refused"));
        }

        self.records.lock().unwrap().insert(
            (
                spec.zone().to_string(),
                spec.name().to_string(),
                spec.record_type(),
            ),
            vec![spec.desired_value().to_string()],
        );
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// An IpSource returning a fixed address (or a fixed failure)
pub struct StaticIpSource {
    version: IpVersion,
    ip: Option<IpAddr>,
    calls: Arc<AtomicUsize>,
}

impl StaticIpSource {
    pub fn new(ip: IpAddr) -> Self {
        let version = match ip {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        };
        Self {
            version,
            ip: Some(ip),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source for `version` whose every call fails
    pub fn failing(version: IpVersion) -> Self {
        Self {
            version,
            ip: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Share the call counter with the returned handle
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<IpAddr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ip
            .ok_or_else(|| Error::discovery("echo service returned HTTP 503"))
    }

    fn version(&self) -> IpVersion {
        self.version
    }
}

/// Build a request for the test zone
pub fn request(names: &[&str], desired: &str) -> ddns_core::ReconcileRequest {
    ddns_core::ReconcileRequest::new(
        ZONE,
        names.iter().map(|n| n.to_string()).collect(),
        desired.parse().expect("valid test IP"),
        300,
    )
}
