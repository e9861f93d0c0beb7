// # ddnsctl - one-shot DNS record updater
//
// This binary is a THIN integration layer:
// - DO NOT add business logic or DNS logic here
// - All reconciliation logic lives in ddns-core
//
// ddnsctl is responsible for:
// 1. Parsing the command line
// 2. Loading the API token from the environment
// 3. Building the provider and IP sources
// 4. Running the IPv4 and IPv6 passes once, in order
//
// ## Environment
//
// - `API_TOKEN`: Gandi LiveDNS personal access token (required)
// - `GANDI_API_URL`: API base URL (optional)
// - `IPV4_PROVIDER_URL` / `IPV6_PROVIDER_URL`: echo services (optional)
// - `SSL_CERT_FILE` / `SSL_CERT_DIR`: extra trusted roots (optional)
//
// ## Example
//
// ```bash
// export API_TOKEN=...
// ddnsctl example.com www,blog --ttl 600 --noipv6
// ```

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use ddns_core::config::{IpSourceConfig, ProviderConfig, RunConfig, TransportConfig};
use ddns_core::{Credential, IpVersion, Reconciler, Runner};
use ddns_ip_http::HttpIpSource;
use ddns_provider_gandi::GandiProvider;
use std::env;
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Environment variable holding the API token
const API_TOKEN_ENV: &str = "API_TOKEN";

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Every enabled pass succeeded
    Success = 0,
    /// Bad arguments, credential or transport settings
    ConfigError = 1,
    /// At least one pass failed
    UpdateFailed = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                DdnsExitCode::ConfigError.into()
            } else {
                DdnsExitCode::Success.into()
            };
        }
    };

    if let Err(e) = logging::init(cli.log) {
        eprintln!("{}", e);
        return DdnsExitCode::ConfigError.into();
    }

    info!("DNS record update started.");
    let code = run(cli);
    info!("DNS record update ended.");

    code.into()
}

fn run(cli: Cli) -> DdnsExitCode {
    let (runner, config) = match build(&cli) {
        Ok(parts) => parts,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return DdnsExitCode::ConfigError;
        }
    };

    // Passes run sequentially; a single-threaded runtime is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::UpdateFailed;
        }
    };

    let summary = rt.block_on(runner.run(&config));

    if summary.is_success() {
        DdnsExitCode::Success
    } else {
        DdnsExitCode::UpdateFailed
    }
}

/// Validate everything and assemble the runner before touching the network
fn build(cli: &Cli) -> Result<(Runner, RunConfig)> {
    let config = RunConfig::new(cli.zone.clone(), cli.records.clone())
        .with_ttl(cli.ttl)
        .with_skip_ipv4(cli.noipv4)
        .with_skip_ipv6(cli.noipv6)
        .with_dry_run(cli.dry_run);
    config.validate()?;

    let credential = load_credential(env::var(API_TOKEN_ENV).ok())?;
    debug!("Using API token {}", credential.masked());

    let transport = TransportConfig::from_env().with_timeout_secs(cli.timeout);
    let provider_config = ProviderConfig::new(credential).with_base_url(cli.api_url.clone());
    let ip_config = IpSourceConfig {
        ipv4_url: cli.ipv4_url.clone(),
        ipv6_url: cli.ipv6_url.clone(),
    };
    ip_config.validate()?;

    let provider = GandiProvider::new(&provider_config, &transport)
        .context("Failed to initialise the LiveDNS client")?;

    let mut runner = Runner::new(Reconciler::new(Box::new(provider)));
    for version in [IpVersion::V4, IpVersion::V6] {
        let source = HttpIpSource::from_config(&ip_config, version, &transport)
            .with_context(|| format!("Failed to initialise the {} echo client", version))?;
        runner = runner.with_ip_source(Box::new(source));
    }

    if config.dry_run {
        info!("Dry run: no record will be written");
    }

    Ok((runner, config))
}

/// Parse the token read from the environment
fn load_credential(raw: Option<String>) -> Result<Credential> {
    let raw = raw
        .filter(|token| !token.is_empty())
        .with_context(|| {
            format!(
                "{} is required. Set it via: export {}=your_token",
                API_TOKEN_ENV, API_TOKEN_ENV
            )
        })?;

    Ok(Credential::parse(raw)?)
}
