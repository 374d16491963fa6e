use cardstack::core::config::{self, CardstackConfig, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardstack", about = "Browse a feed of articles as a stack of cards")]
struct Args {
    /// JSON feed to load (demo articles if omitted)
    #[arg(short, long)]
    feed: Option<PathBuf>,

    /// Number of cards visible at once
    #[arg(short, long)]
    window_size: Option<usize>,

    /// Log level written to cardstack.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to cardstack.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("cardstack.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{}; falling back to defaults", e);
            CardstackConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            feed_path: args.feed,
            window_size: args.window_size,
        },
    );

    log::info!(
        "Cardstack starting up: window {} cards, feed {:?}",
        resolved.deck.window_size,
        resolved.feed_path
    );

    cardstack::tui::run(resolved)
}
