//! `smb config` – show where the config lives and what it says.

use anyhow::Result;
use smb_core::config::{self, SmbConfig};

pub fn run_config(cfg: &SmbConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", cfg.to_toml_string()?);
    Ok(())
}
