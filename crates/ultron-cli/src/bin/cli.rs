use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use ultron_client::client::{GameQueryClient, GameQueryServer};
use ultron_client::config::{ConfigLoadError, UltronConfig};
use ultron_runner::{init_logging, print_player_status, BotRunner, LoggingConsumer};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enables debug mode
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// Path to the config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// GameQuery host to connect to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// GameQuery port to connect to (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Path to the game client's latest.log (overrides config)
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// In-game name of the bot account (overrides config)
    #[arg(long)]
    bot_name: Option<String>,

    /// Print the player status and exit
    #[arg(long)]
    status: bool,

    /// Also write logs to a file in the data directory
    #[arg(long)]
    log_to_file: bool,
}

fn create_example_config() -> Result<(), Box<dyn Error>> {
    let config_path = UltronConfig::config_path();

    // Never overwrite an existing config file
    if config_path.exists() {
        return Err(format!(
            "Config file already exists at {}. Please edit it manually or delete it to create a new one.",
            config_path.display()
        )
        .into());
    }

    // Create parent directories if they don't exist
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Create example config content
    let example_config = r#"# Ultron Configuration
# Edit this file to point at your game client

[server]
host = "localhost"
port = 25566

[bot]
name = "IronManForever"
log_path = "/path/to/.minecraft/logs/latest.log"
home = [-4188.0, 59.0, 4259.0]

[watcher]
poll_interval_secs = 2
farm_timeout_secs = 300
goto_timeout_secs = 300
"#;

    fs::write(&config_path, example_config)?;
    info!("Created example config at {}", config_path.display());
    eprintln!("Config file created at: {}", config_path.display());
    eprintln!("Please edit it with your log path and home coordinates, then run ultron again.");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let _guard = init_logging("cli", cli.log_to_file)?;

    info!("Starting ultron...");

    // Load or create config
    let load_result = match &cli.config {
        Some(path) => UltronConfig::load_from(path),
        None => UltronConfig::load(),
    };
    let mut config = match load_result {
        Ok(cfg) => cfg,
        Err(ConfigLoadError::NotFound) if cli.config.is_none() => {
            info!("No config found, creating example config");
            create_example_config()?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // CLI flags override the config file
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(log_path) = cli.log_path {
        config.bot.log_path = log_path;
    }
    if let Some(bot_name) = cli.bot_name {
        config.bot.name = bot_name;
    }

    if cli.status {
        let server = GameQueryServer::new(config.server.host.clone(), config.server.port);
        let client = GameQueryClient::new(server);
        print_player_status(&client).await?;
        return Ok(());
    }

    if config.bot.log_path.as_os_str().is_empty() {
        return Err(
            "No log_path configured. Set [bot] log_path in the config file or pass --log-path."
                .into(),
        );
    }

    let mut runner = BotRunner::new(config);
    runner.add_consumer(Box::new(LoggingConsumer::new()));
    runner.run().await?;

    Ok(())
}
