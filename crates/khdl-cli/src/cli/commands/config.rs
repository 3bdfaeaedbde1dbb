//! `khdl config` – show where the config lives and what is in effect.

use anyhow::Result;
use khdl_core::config::{self, KhdlConfig};

pub fn show_config(cfg: &KhdlConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
