//! The `fitcheck serve` command.

use clap::Args;
use fitcheck_core::Config;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

/// Execute the serve command.
pub async fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    crate::server::serve(config).await
}
