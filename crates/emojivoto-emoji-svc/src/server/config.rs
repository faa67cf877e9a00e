use anyhow::bail;
use clap::Parser;
use std::net::{Ipv4Addr, SocketAddr};

/// Runtime configuration for the `emojivoto-emoji-svc` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "emojivoto-emoji-svc",
    version,
    about = "A gRPC service serving the emoji catalog"
)]
pub struct CliArgs {
    /// Port to serve gRPC on. The server listens on all interfaces.
    ///
    /// Environment variable: `GRPC_PORT`
    #[arg(long, env = "GRPC_PORT")]
    pub grpc_port: u16,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: SocketAddr,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.grpc_port == 0 {
            bail!("GRPC_PORT must be greater than 0");
        }
        Ok(Self {
            server_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.grpc_port)),
        })
    }
}
