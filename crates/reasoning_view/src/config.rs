use anyhow::Result;
use std::path::PathBuf;

/// Directory holding `settings.json`, usually `~/.config/reasoning-view`
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home.join(".config").join("reasoning-view"))
}
