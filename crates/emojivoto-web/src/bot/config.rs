use anyhow::Context;
use clap::Parser;
use core::time::Duration;
use reqwest::Url;

/// Runtime configuration for `vote-bot`.
///
/// Only `WEB_HOST` is required. `TTL` and `REQUEST_RATE` are lenient: values
/// that do not parse are ignored.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vote-bot",
    version,
    about = "Casts a steady stream of votes through the emojivoto gateway"
)]
pub struct CliArgs {
    /// `host:port` of the gateway.
    ///
    /// Environment variable: `WEB_HOST`
    #[arg(long, env = "WEB_HOST")]
    pub web_host: String,

    /// Value for the `Host` header, for routing through an ingress.
    ///
    /// Environment variable: `HOST_OVERRIDE`
    #[arg(long, env = "HOST_OVERRIDE")]
    pub host_override: Option<String>,

    /// Seconds to run before exiting. Unset, `0` or invalid runs forever.
    ///
    /// Environment variable: `TTL`
    #[arg(long, env = "TTL")]
    pub ttl: Option<String>,

    /// Votes per second. Unset, invalid or below 1 means 1.
    ///
    /// Environment variable: `REQUEST_RATE`
    #[arg(long, env = "REQUEST_RATE")]
    pub request_rate: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub web_url: Url,
    pub host_override: Option<String>,
    pub ttl: Option<Duration>,
    pub request_rate: u32,
}

impl BotConfig {
    /// Pause between two votes.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(1) / self.request_rate.max(1)
    }
}

impl TryFrom<CliArgs> for BotConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let web_host = args.web_host.trim();
        if web_host.is_empty() {
            anyhow::bail!("WEB_HOST must be set");
        }
        let web_url = Url::parse(&format!("http://{web_host}"))
            .with_context(|| format!("WEB_HOST {web_host} is invalid"))?;

        Ok(Self {
            web_url,
            host_override: args.host_override.filter(|h| !h.trim().is_empty()),
            ttl: parse_ttl(args.ttl.as_deref()),
            request_rate: parse_request_rate(args.request_rate.as_deref()),
        })
    }
}

pub fn parse_ttl(raw: Option<&str>) -> Option<Duration> {
    let secs = raw?.trim().parse::<u64>().ok()?;
    (secs > 0).then(|| Duration::from_secs(secs))
}

pub fn parse_request_rate(raw: Option<&str>) -> u32 {
    raw.and_then(|r| r.trim().parse::<i64>().ok())
        .filter(|&r| r >= 1)
        .map_or(1, |r| u32::try_from(r).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(web_host: &str) -> CliArgs {
        CliArgs {
            web_host: web_host.to_owned(),
            host_override: None,
            ttl: None,
            request_rate: None,
        }
    }

    #[test]
    fn defaults_run_forever_at_one_per_second() {
        let config = BotConfig::try_from(args("web-svc:80")).unwrap();
        assert_eq!(config.web_url.as_str(), "http://web-svc/");
        assert_eq!(config.ttl, None);
        assert_eq!(config.request_rate, 1);
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert!(config.host_override.is_none());
    }

    #[test]
    fn keeps_non_default_port() {
        let config = BotConfig::try_from(args("localhost:8080")).unwrap();
        assert_eq!(config.web_url.port(), Some(8080));
    }

    #[test]
    fn invalid_web_host_is_rejected() {
        assert!(BotConfig::try_from(args("")).is_err());
        assert!(BotConfig::try_from(args("bad host:80")).is_err());
    }

    #[test]
    fn ttl_ignores_invalid_values() {
        assert_eq!(parse_ttl(None), None);
        assert_eq!(parse_ttl(Some("0")), None);
        assert_eq!(parse_ttl(Some("soon")), None);
        assert_eq!(parse_ttl(Some("-3")), None);
        assert_eq!(parse_ttl(Some("30")), Some(Duration::from_secs(30)));
    }

    #[test]
    fn request_rate_is_at_least_one() {
        assert_eq!(parse_request_rate(None), 1);
        assert_eq!(parse_request_rate(Some("fast")), 1);
        assert_eq!(parse_request_rate(Some("0")), 1);
        assert_eq!(parse_request_rate(Some("-4")), 1);
        assert_eq!(parse_request_rate(Some("20")), 20);
    }

    #[test]
    fn interval_divides_a_second() {
        let mut config = BotConfig::try_from(args("web:80")).unwrap();
        config.request_rate = 4;
        assert_eq!(config.interval(), Duration::from_millis(250));
    }
}
