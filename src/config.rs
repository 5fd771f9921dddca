use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub code: CodeConfig,
}

/// Body text font.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    /// Size in points.
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Times New Roman".to_string(),
            size: 12,
        }
    }
}

/// Font for code blocks and inline code runs.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    pub family: String,
    pub size: u32,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            family: "Courier New".to_string(),
            size: 10,
        }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_fonts() {
        let config = Config::default();
        assert_eq!(config.font.family, "Times New Roman");
        assert_eq!(config.font.size, 12);
        assert_eq!(config.code.family, "Courier New");
        assert_eq!(config.code.size, 10);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: Config = toml::from_str("[font]\nfamily = \"Georgia\"\n").unwrap();
        assert_eq!(config.font.family, "Georgia");
        assert_eq!(config.font.size, 12);
        assert_eq!(config.code.family, "Courier New");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("does-not-exist.toml"));
        assert_eq!(config.font.size, 12);
    }
}
