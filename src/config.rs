use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub render: RenderConfig,
    pub card: CardDefaults,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self { Self { port: 3000 } }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory holding the three card font files.
    pub fonts_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self { Self { fonts_dir: PathBuf::from("assets/fonts") } }
}

/// Values a card falls back to when the query string leaves a field out.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CardDefaults {
    pub title: String,
    pub description: String,
    pub avatar: String,
    pub author: String,
    pub logo: Option<String>,
    pub theme: String,
}

impl Default for CardDefaults {
    fn default() -> Self {
        Self {
            title: "Mrinal Chandra Sarkar".to_string(),
            description: "Statistician, analyst and open source enthusiast from Kolkata, India."
                .to_string(),
            avatar: "https://og.anuragroy.dev/memoji.png".to_string(),
            author: "mrinal.tk".to_string(),
            logo: None,
            theme: "rose".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout for avatar/logo downloads, in seconds.
    pub timeout_secs: u64,
    /// Largest avatar/logo response accepted, in bytes.
    pub max_bytes: u64,
    /// Total size of the downloaded media cache, in bytes.
    pub cache_capacity: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_bytes: 10 * 1024 * 1024,
            cache_capacity: 64 * 1024 * 1024,
        }
    }
}

/// Load the config file, falling back to defaults when it doesn't exist.
pub fn load(path: &str) -> Result<Config> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            serde_yaml::from_str(&text).with_context(|| format!("Failed to parse {path}"))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {path}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let config = load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.card.theme, "rose");
        assert_eq!(config.card.logo, None);
        assert_eq!(config.render.fonts_dir, PathBuf::from("assets/fonts"));
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "server:\n  port: 8080\ncard:\n  theme: blue\n  logo: \"🦀\"\n",
        )
        .unwrap();
        let config = load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.card.theme, "blue");
        assert_eq!(config.card.logo.as_deref(), Some("🦀"));
        // Untouched sections keep their defaults.
        assert_eq!(config.card.author, "mrinal.tk");
        assert_eq!(config.fetch.timeout_secs, 10);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "server: [not a map]\n").unwrap();
        assert!(load(path.to_str().unwrap()).is_err());
    }
}
