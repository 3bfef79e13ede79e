use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use wrapsnake::Config;
use wrapsnake::game::SnakeGame;

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;
    config.validate()?;

    let mut game = SnakeGame::new(config)?;
    let outcome = game.play()?;
    info!("finished: {:?} with score {}", outcome, game.state().snake().len());

    println!("Score: {}", game.state().snake().len());
    Ok(())
}

// The game owns stdout, so logging is silent unless sent to a file or asked for via RUST_LOG.
fn init_logging(config: &Config) -> Result<()> {
    let default_filter = if config.log_file.is_some() { "info" } else { "off" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
