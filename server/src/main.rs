use anyhow::Result;
use axum::Router;
use clap::Parser;
use docret_core::loader::LoaderOptions;
use docret_server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Folder holding the documents
    #[arg(long, default_value = ".")]
    docs: PathBuf,
    /// Only load files with this extension (empty = every file)
    #[arg(long, default_value = "txt")]
    ext: String,
    /// Descend into subfolders
    #[arg(long, default_value_t = false)]
    recursive: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = ServerConfig {
        docs_dir: args.docs,
        loader: LoaderOptions { extension: args.ext, recursive: args.recursive },
        admin_token: std::env::var("ADMIN_TOKEN").ok(),
        cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN").ok(),
    };
    let app: Router = build_app(config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
