//! CLI entry point.
//!
//! Wires configuration from the environment and dispatches to the server
//! or to one-off maintenance commands.

use clap::{Parser, Subcommand};

use publico_axum::{CorsConfig, ServerConfig};
use publico_content::DefaultContentClient;
use publico_core::AppFilter;

#[derive(Parser)]
#[command(name = "publico")]
#[command(about = "Public-sector app catalog server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (API and image proxy).
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PUBLICO_PORT")]
        port: Option<u16>,

        /// Directory of built frontend assets to serve with SPA fallback
        #[arg(long = "static-dir")]
        static_dir: Option<std::path::PathBuf>,

        /// Restrict CORS to these origins (repeatable); default allows all
        #[arg(long = "allow-origin")]
        allow_origins: Vec<String>,
    },

    /// Verify content-store connectivity and print the catalog size.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve {
            port,
            static_dir,
            allow_origins,
        } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(dir) = static_dir {
                config = config.with_static_dir(dir);
            }
            if !allow_origins.is_empty() {
                config.cors = CorsConfig::AllowOrigins(allow_origins);
            }
            publico_axum::start_server(config).await?;
        }
        Commands::Check => {
            use publico_core::ContentStore;

            let config = ServerConfig::from_env()?;
            let store = DefaultContentClient::new(&config.content);
            let apps = store
                .list_apps(&AppFilter::default())
                .await
                .map_err(|e| anyhow::anyhow!("content store check failed: {e}"))?;
            println!("content store reachable, {} published apps", apps.len());
        }
    }

    Ok(())
}
