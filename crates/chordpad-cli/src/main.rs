//! chordpad: command-line front end for the chord engine

mod commands;
mod config;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::Command;

fn main() -> Result<()> {
    // Initialize logging on stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("chordpad=info".parse()?)
            .add_directive("chordpad_core=warn".parse()?))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::from_args(&args)?;
    let config = config::load_config();

    for line in command.run(&config)? {
        println!("{}", line);
    }
    Ok(())
}
