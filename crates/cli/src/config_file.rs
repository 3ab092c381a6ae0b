use anyhow::{Context, Result, bail};
use argtok_parse::TokenizerConfig;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "argtok.json";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: TokenizerConfig,
}

/// Load the tokenizer config.
///
/// An explicit path must exist. Without one, `./argtok.json` is used when
/// present and `Ok(None)` is returned otherwise.
pub fn load_config(config_path: Option<&Path>) -> Result<Option<LoadedConfig>> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;

    let (path, explicit) = match config_path {
        Some(p) => (resolve_against(&cwd, p), true),
        None => (cwd.join(DEFAULT_CONFIG_NAME), false),
    };

    if !path.exists() {
        if explicit {
            bail!("config not found: {}", path.display());
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = TokenizerConfig::from_json_str(&contents)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    Ok(Some(LoadedConfig { path, config }))
}

/// Write the default config into `dir`. Returns the path written.
pub fn write_default_config(dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let dest = dir.join(DEFAULT_CONFIG_NAME);
    if dest.exists() && !overwrite {
        bail!(
            "{} already exists (use --force to overwrite)",
            dest.display()
        );
    }

    let bytes = serde_json::to_vec_pretty(&TokenizerConfig::default())
        .context("failed to serialize config")?;
    let mut out = String::from_utf8(bytes).context("config is not valid UTF-8")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if overwrite && dest.exists() {
        fs::remove_file(&dest).with_context(|| format!("failed to remove {}", dest.display()))?;
    }
    fs::rename(&tmp, &dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest)
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
