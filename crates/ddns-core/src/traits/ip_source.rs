// # IP Source Trait
//
// Defines the interface for discovering the caller's public address for
// one address family.
//
// ## Implementations
//
// - HTTP echo services: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// async fn show(source: &dyn IpSource) -> ddns_core::Result<()> {
//     let ip = source.current().await?;
//     println!("{:?} address: {}", source.version(), ip);
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;

/// IP version (v4 or v6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Whether `ip` belongs to this family
    pub fn matches(&self, ip: &IpAddr) -> bool {
        match self {
            IpVersion::V4 => ip.is_ipv4(),
            IpVersion::V6 => ip.is_ipv6(),
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => f.write_str("IPv4"),
            IpVersion::V6 => f.write_str("IPv6"),
        }
    }
}

/// Trait for IP source implementations
///
/// Sources are observers: they report an address and never decide whether
/// DNS must change.
///
/// A failure here is fatal for the address family being processed; sources
/// must not retry.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: an address of [`IpSource::version`]'s family
    /// - `Err(Error)`: if the address cannot be determined
    async fn current(&self) -> Result<IpAddr, crate::Error>;

    /// The address family this source reports
    fn version(&self) -> IpVersion;
}
