//! Serve command implementation

use crate::config::load_config_or_default;
use crate::domain::RegulateError;
use crate::server;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    ///
    /// Runs until the shutdown channel flips to `true`; in-flight requests are
    /// allowed to finish.
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        println!(
            "🚀 GraniteRegulate API listening on http://{}",
            config.server.bind_address()
        );

        let shutdown = async move {
            let _ = shutdown_signal.wait_for(|stop| *stop).await;
        };

        match server::serve(&config, shutdown).await {
            Ok(()) => Ok(0),
            Err(e @ RegulateError::Configuration(_)) => {
                eprintln!("❌ {e}");
                Ok(2)
            }
            Err(e) => Err(e.into()),
        }
    }
}
