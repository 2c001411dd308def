use clap::Parser;
use pmoguide::{Catalog, TvGuideExt};
use pmoserver::logs::{LoggingOptions, init_logging};
use pmoserver::ServerBuilder;
use rust_embed::RustEmbed;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

/// Icônes des chaînes, embarquées dans le binaire et servies sous /public
#[derive(RustEmbed, Clone)]
#[folder = "public"]
struct PublicAssets;

/// Command line arguments for the PMOTV server.
#[derive(Parser, Debug)]
#[command(name = "pmotv")]
#[command(about = "TV guide HTTP service: channel groups and daily program grids")]
#[command(version)]
struct Args {
    /// Listen connections on address, by default listen all available addresses
    #[arg(short, long)]
    address: Option<IpAddr>,

    /// Listen connections on port
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(LoggingOptions::default());

    // ========== Phase 1 : Jeu de données ==========

    let catalog = Arc::new(Catalog::builtin());
    info!("📺 {} channel(s) loaded", catalog.channels().len());

    // ========== Phase 2 : Configuration du serveur ==========

    let mut builder = ServerBuilder::new("PMO-TV-Server").http_port(args.port);
    if let Some(address) = args.address {
        builder = builder.address(address);
    }
    let mut server = builder.build();

    server.init_tvguide(catalog).await;
    server.add_dir::<PublicAssets>("/public").await;

    // ========== Phase 3 : Démarrage ==========

    server.start().await?;

    info!("✅ PMOTV is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    info!("bye!");
    Ok(())
}
