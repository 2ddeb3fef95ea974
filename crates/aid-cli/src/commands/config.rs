// Rust guideline compliant 2026-10-16

//! Implementation of the `aid config` commands.

use crate::terminal::print_success;
use crate::OutputFormatter;
use aid_core::Config;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Configuration subcommands.
#[derive(Debug, Clone, clap::Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default config.toml to the config directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Writes the default configuration to `<dir>/config.toml`.
///
/// # Returns
///
/// The path written, or `None` if a file already existed and `force` was
/// not set.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn init(dir: &Path, force: bool) -> Result<Option<PathBuf>> {
    let path = dir.join("config.toml");
    if path.exists() && !force {
        return Ok(None);
    }
    std::fs::create_dir_all(dir)?;
    Config::default().save(dir)?;
    Ok(Some(path))
}

/// Runs a configuration subcommand.
///
/// # Errors
///
/// Returns an error if the configuration cannot be written.
pub fn execute(
    action: ConfigAction,
    dir: &Path,
    config: &Config,
    formatter: &dyn OutputFormatter,
    use_color: bool,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", formatter.format_config(config));
        }
        ConfigAction::Init { force } => match init(dir, force)? {
            Some(path) => print_success(&format!("Wrote {}", path.display()), use_color),
            None => anyhow::bail!(
                "{} already exists; pass --force to overwrite",
                dir.join("config.toml").display()
            ),
        },
    }
    Ok(())
}
