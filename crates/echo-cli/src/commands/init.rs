use anyhow::{Context, Result};
use echo_infrastructure::{ConfigService, EchoPaths};

pub fn run(paths: &EchoPaths) -> Result<()> {
    let path = ConfigService::new(paths)
        .ensure_config_file()
        .context("Failed to write default config")?;
    println!("Config: {}", path.display());
    Ok(())
}
