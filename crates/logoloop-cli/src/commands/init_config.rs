use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use logoloop_core::AppConfig;

pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists.\nUse --force to overwrite it with the defaults.",
            path.display()
        );
    }

    AppConfig::default().save_to(path)?;
    info!(path = %path.display(), "Default configuration written");
    println!("Wrote default configuration to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = std::env::temp_dir().join(format!("logoloop-init-{}", std::process::id()));
        let path = dir.join("config.toml");

        run(&path, false).unwrap();
        assert!(AppConfig::load_from(&path).is_ok());
        assert!(run(&path, false).is_err());
        assert!(run(&path, true).is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
