use crate::logging::LogLevel;
use clap::Parser;
use ddns_core::config::{
    DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_IPV4_URL, DEFAULT_IPV6_URL,
    DEFAULT_TTL_SECS,
};

#[derive(Debug, Parser)]
#[command(name = "ddnsctl")]
#[command(about = "Point Gandi LiveDNS records at this host's public IPv4/IPv6 address")]
#[command(version)]
pub struct Cli {
    /// DNS zone (domain), e.g. example.com
    pub zone: String,

    /// Record names to update; a single comma-separated token is split
    /// into multiple names (e.g. "www,blog")
    #[arg(value_name = "RECORD", required = true, num_args = 1..)]
    pub records: Vec<String>,

    /// TTL written with the records (seconds)
    #[arg(long, default_value_t = DEFAULT_TTL_SECS)]
    pub ttl: u32,

    /// Skip the IPv4 (A record) pass
    #[arg(long)]
    pub noipv4: bool,

    /// Skip the IPv6 (AAAA record) pass
    #[arg(long)]
    pub noipv6: bool,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log level: CRITICAL, ERROR, WARNING, INFO, DEBUG (or 3, 2, 1, 0, -1)
    #[arg(long, default_value = "INFO", allow_hyphen_values = true)]
    pub log: LogLevel,

    /// LiveDNS API base URL
    #[arg(long, env = "GANDI_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Echo service returning the public IPv4 address
    #[arg(long, env = "IPV4_PROVIDER_URL", default_value = DEFAULT_IPV4_URL)]
    pub ipv4_url: String,

    /// Echo service returning the public IPv6 address
    #[arg(long, env = "IPV6_PROVIDER_URL", default_value = DEFAULT_IPV6_URL)]
    pub ipv6_url: String,

    /// Per-request HTTP timeout (seconds)
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ddnsctl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["example.com", "www"]);
        assert_eq!(cli.zone, "example.com");
        assert_eq!(cli.records, vec!["www"]);
        assert_eq!(cli.ttl, 300);
        assert!(!cli.noipv4);
        assert!(!cli.noipv6);
        assert!(!cli.dry_run);
        assert_eq!(cli.log, LogLevel::Info);
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn test_multiple_record_tokens() {
        let cli = parse(&["example.com", "www", "blog", "@"]);
        assert_eq!(cli.records, vec!["www", "blog", "@"]);
    }

    #[test]
    fn test_skip_flags_are_independent() {
        let cli = parse(&["example.com", "www", "--noipv6"]);
        assert!(cli.noipv6);
        assert!(!cli.noipv4);

        let cli = parse(&["example.com", "www", "--noipv4"]);
        assert!(cli.noipv4);
        assert!(!cli.noipv6);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&[
            "example.com",
            "www,blog",
            "--ttl",
            "600",
            "--dry-run",
            "--log",
            "debug",
            "--timeout",
            "5",
        ]);
        assert_eq!(cli.ttl, 600);
        assert!(cli.dry_run);
        assert_eq!(cli.log, LogLevel::Debug);
        assert_eq!(cli.timeout, 5);
    }

    #[test]
    fn test_negative_numeric_log_level() {
        let cli = parse(&["example.com", "www", "--log", "-1"]);
        assert_eq!(cli.log, LogLevel::Debug);
    }

    #[test]
    fn test_missing_record_is_rejected() {
        assert!(Cli::try_parse_from(["ddnsctl", "example.com"]).is_err());
        assert!(Cli::try_parse_from(["ddnsctl"]).is_err());
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["ddnsctl", "example.com", "www", "--log", "LOUD"]).is_err());
    }
}
