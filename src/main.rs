use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use zakhar::ThemeMode;
use zakhar::core::config::{self, CliOverrides, ZakharConfig};

#[derive(Parser)]
#[command(name = "zakhar", version, about = "Terminal chat client for the Zakhar AI assistant")]
struct Args {
    /// Chat service base URL (requests go to <BASE_URL>/chat)
    #[arg(long)]
    base_url: Option<String>,

    /// Colour scheme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to zakhar.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("zakhar.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            eprintln!("warning: {} (using defaults)", e);
            ZakharConfig::default()
        }
    };
    let cli = CliOverrides {
        base_url: args.base_url,
        theme: args.theme,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Zakhar starting up (endpoint: {}, theme: {:?}, retries: {})",
        resolved.base_url,
        resolved.theme,
        resolved.retry.max_retries
    );

    zakhar::tui::run(resolved)
}
