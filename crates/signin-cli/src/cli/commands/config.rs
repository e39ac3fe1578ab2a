//! `signin config` handlers.

use std::path::Path;

use anyhow::{Context, Result};
use signin_core::config::{Config, paths};

/// Prints where the config lives, noting when it has not been created yet.
pub fn path() {
    let config_path = paths::config_path();
    println!("{}", config_path.display());
    if !config_path.exists() {
        eprintln!("(not created yet; run `signin config init`)");
    }
}

/// Writes the commented default config and reports the backend it selects.
pub fn init() -> Result<()> {
    let config_path = paths::config_path();
    Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    describe_backend(&config_path)
}

pub fn generate() -> Result<()> {
    print!("{}", Config::generate()?);
    Ok(())
}

fn describe_backend(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;
    println!(
        "Submissions go to the {:?} backend ({} ms simulated latency)",
        config.submitter.backend, config.demo.latency_ms
    );
    Ok(())
}
