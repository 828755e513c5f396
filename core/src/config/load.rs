use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the errscan data directory: `$ERRSCAN_HOME`, falling back to ~/.errscan
pub fn get_errscan_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(v) = std::env::var("ERRSCAN_HOME") {
        if !v.trim().is_empty() {
            return Ok(PathBuf::from(v));
        }
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".errscan"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    let data_dir = get_errscan_data_dir()?;
    load_from(&data_dir.join("config.toml"), Path::new("errscan.toml"))
}

/// Load the first existing file of `primary`, `local`; defaults when neither exists.
/// Environment overrides are applied last.
pub fn load_from(primary: &Path, local: &Path) -> anyhow::Result<AppConfig> {
    let mut cfg: AppConfig = if primary.exists() {
        let s = std::fs::read_to_string(primary)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local.exists() {
        let s = std::fs::read_to_string(local)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    Ok(cfg)
}

fn apply_env_overrides(
    cfg: &mut AppConfig,
    get: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let set = |k: &str| get(k).filter(|v| !v.trim().is_empty());

    if let Some(v) = set("ERRSCAN_MODE") {
        cfg.scan.mode = v.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(v) = set("ERRSCAN_FORMAT") {
        cfg.scan.format = v.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(v) = set("ERRSCAN_COLOR") {
        cfg.scan.color = v.parse().map_err(anyhow::Error::msg)?;
    }
    Ok(())
}
