use anyhow::Result;

use flexscroll_core::AppConfig;

pub fn run(config: &AppConfig, write: bool) -> Result<()> {
    print!("{}", config.to_toml()?);

    if write {
        config.save()?;
        eprintln!("\nWritten to {}", AppConfig::config_path().display());
    }

    Ok(())
}
