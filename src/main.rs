use clap::Parser;
use routepick::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "routepick", about = "RoutePick: AI-curated travel routes, in your terminal")]
struct Args {
    /// Base URL of the RoutePick planning server
    #[arg(long)]
    backend_url: Option<String>,

    /// Terminals narrower than this many columns get the compact layout
    #[arg(long)]
    compact_width: Option<u16>,

    /// Don't capture the mouse (keeps native text selection)
    #[arg(long)]
    no_mouse: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to routepick.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("routepick.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::error!("{}; using defaults", e);
        Default::default()
    });
    let cli = CliOverrides {
        backend_url: args.backend_url,
        compact_width: args.compact_width,
        no_mouse: args.no_mouse,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("RoutePick starting up against {}", resolved.backend_url);

    routepick::tui::run(resolved)
}
