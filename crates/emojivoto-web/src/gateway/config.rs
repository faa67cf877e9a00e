use anyhow::bail;
use clap::Parser;
use std::net::{Ipv4Addr, SocketAddr};

/// Runtime configuration for the `emojivoto-web` gateway.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "emojivoto-web",
    version,
    about = "HTTP gateway over the emojivoto emoji and voting services"
)]
pub struct CliArgs {
    /// Port to serve HTTP on. The gateway listens on all interfaces.
    ///
    /// Environment variable: `WEB_PORT`
    #[arg(long, env = "WEB_PORT")]
    pub web_port: u16,

    /// Address of the emoji service, e.g. `emoji-svc:8080`.
    ///
    /// Environment variable: `EMOJISVC_HOST`
    #[arg(long, env = "EMOJISVC_HOST")]
    pub emojisvc_host: String,

    /// Address of the voting service, e.g. `voting-svc:8080`.
    ///
    /// Environment variable: `VOTINGSVC_HOST`
    #[arg(long, env = "VOTINGSVC_HOST")]
    pub votingsvc_host: String,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    pub emoji_uri: String,
    pub voting_uri: String,
}

impl TryFrom<CliArgs> for GatewayConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.web_port == 0 {
            bail!("WEB_PORT must be greater than 0");
        }
        Ok(Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.web_port)),
            emoji_uri: grpc_uri("EMOJISVC_HOST", &args.emojisvc_host)?,
            voting_uri: grpc_uri("VOTINGSVC_HOST", &args.votingsvc_host)?,
        })
    }
}

/// Prefixes a bare `host:port` with `http://`.
fn grpc_uri(name: &str, host: &str) -> anyhow::Result<String> {
    let host = host.trim();
    if host.is_empty() {
        bail!("{name} must be set");
    }
    if host.contains("://") {
        Ok(host.to_owned())
    } else {
        Ok(format!("http://{host}"))
    }
}
