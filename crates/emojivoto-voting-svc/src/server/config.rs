use crate::server::duration::parse_duration;
use anyhow::bail;
use clap::Parser;
use core::time::Duration;
use emojivoto_core::tally::FaultConfig;
use std::net::{Ipv4Addr, SocketAddr};

/// Runtime configuration for the `emojivoto-voting-svc` binary.
///
/// All values are parsed from CLI arguments or environment variables. Only
/// the port is required; the fault settings are lenient and fall back to
/// safe defaults with a warning instead of aborting startup.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "emojivoto-voting-svc",
    version,
    about = "A gRPC vote tally service with configurable failure injection"
)]
pub struct CliArgs {
    /// Port to serve gRPC on. The server listens on all interfaces.
    ///
    /// Environment variable: `GRPC_PORT`
    #[arg(long, env = "GRPC_PORT")]
    pub grpc_port: u16,

    /// Probability in `[0.0, 1.0]` that any call fails before touching the
    /// tally.
    ///
    /// Unparseable values fall back to `0.0`; out-of-range values are
    /// clamped. Both cases log a warning.
    ///
    /// Environment variable: `FAILURE_RATE`
    #[arg(long, env = "FAILURE_RATE")]
    pub failure_rate: Option<String>,

    /// Fixed delay applied to every call that is not failed, e.g. `250ms` or
    /// `1.5s`.
    ///
    /// Unparseable values fall back to `0` with a warning.
    ///
    /// Environment variable: `ARTIFICIAL_DELAY`
    #[arg(long, env = "ARTIFICIAL_DELAY")]
    pub artificial_delay: Option<String>,

    /// Reject votes for shortcodes that are not in the emoji catalog.
    ///
    /// By default unknown shortcodes are tallied like any other.
    ///
    /// Environment variable: `VALIDATE_CHOICES`
    #[arg(long, env = "VALIDATE_CHOICES", default_value_t = false)]
    pub validate_choices: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: SocketAddr,
    pub fault: FaultConfig,
    pub validate_choices: bool,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.grpc_port == 0 {
            bail!("GRPC_PORT must be greater than 0");
        }

        let failure_rate = parse_failure_rate(args.failure_rate.as_deref());
        let artificial_delay = parse_artificial_delay(args.artificial_delay.as_deref());

        Ok(Self {
            server_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.grpc_port)),
            fault: FaultConfig::new(failure_rate, artificial_delay),
            validate_choices: args.validate_choices,
        })
    }
}

const DEFAULT_FAILURE_RATE: f64 = 0.0;
const DEFAULT_ARTIFICIAL_DELAY: Duration = Duration::ZERO;

/// Parses `FAILURE_RATE`, never failing.
pub fn parse_failure_rate(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return DEFAULT_FAILURE_RATE;
    };

    let rate = match raw.parse::<f64>() {
        Ok(rate) if rate.is_finite() => rate,
        _ => {
            tracing::warn!(
                "Invalid value for FAILURE_RATE {raw:?}. Using {DEFAULT_FAILURE_RATE} instead"
            );
            return DEFAULT_FAILURE_RATE;
        }
    };

    if !(0.0..=1.0).contains(&rate) {
        let clamped = rate.clamp(0.0, 1.0);
        tracing::warn!(
            "FAILURE_RATE is set to {rate}. It should be a value between 0.0 and 1.0; using {clamped}"
        );
        return clamped;
    }

    rate
}

/// Parses `ARTIFICIAL_DELAY`, never failing.
pub fn parse_artificial_delay(raw: Option<&str>) -> Duration {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return DEFAULT_ARTIFICIAL_DELAY;
    };

    match parse_duration(raw) {
        Ok(delay) => delay,
        Err(e) => {
            tracing::warn!(
                "Invalid value for ARTIFICIAL_DELAY {raw:?} ({e}). Using {DEFAULT_ARTIFICIAL_DELAY:?} instead"
            );
            DEFAULT_ARTIFICIAL_DELAY
        }
    }
}
