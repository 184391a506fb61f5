use std::path::{Path, PathBuf};

use covgen::packages::root_prefix_key;

use crate::cli::CliError;

pub const CONFIG_FILE: &str = "covgen.toml";

const ROOT_MARKERS: [&str; 3] = [CONFIG_FILE, "settings.gradle.kts", "settings.gradle"];

/// Nearest ancestor of `start` (inclusive) that holds `covgen.toml` or a Gradle settings
/// script. Falls back to the module containing `start`, then to `start` itself.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut cur = start.to_path_buf();
    loop {
        if ROOT_MARKERS.iter().any(|m| cur.join(m).is_file()) {
            return cur;
        }
        if !cur.pop() {
            break;
        }
    }
    match root_prefix_key(start) {
        Some(prefix) if !prefix.is_empty() => PathBuf::from(prefix),
        _ => start.to_path_buf(),
    }
}

#[derive(serde::Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CovToml {
    pub generator: GeneratorConfig,
}

#[derive(serde::Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GeneratorConfig {
    pub hilt: bool,
    pub base_package: Option<String>,
}

/// Load `covgen.toml` from `root`. A missing file yields the defaults.
pub fn load_config(root: &Path) -> Result<CovToml, CliError> {
    let p = root.join(CONFIG_FILE);
    if !p.is_file() {
        return Ok(CovToml::default());
    }
    let s = std::fs::read_to_string(&p)
        .map_err(|e| CliError::operational(format!("failed to read {CONFIG_FILE}: {e}")))?;
    let cfg: CovToml = toml::from_str(&s)
        .map_err(|e| CliError::user(format!("failed to parse {CONFIG_FILE}: {e}")))?;
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}
