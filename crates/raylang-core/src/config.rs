use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::error::{RaylangError, RaylangResult};

/// Scene-level defaults applied by the scene builder when the author does
/// not set a field explicitly.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderDefaults {
    pub threads: u32,
    pub subsamples: u32,
    pub background: Color,
    pub ambient_light: Color,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            threads: 4,
            subsamples: 1,
            background: Color::Black,
            ambient_light: Color::White,
        }
    }
}

/// How to reach the external renderer executable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RendererConfig {
    pub program: String,
    /// Extra arguments passed before the scene document path.
    pub args: Vec<String>,
    /// Directory encoded documents are written to before rendering.
    pub staging_dir: PathBuf,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "raylang-renderer".to_string(),
            args: Vec::new(),
            staging_dir: PathBuf::from(".raylang/staging"),
        }
    }
}

/// Contents of `raylang.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct RaylangConfig {
    #[serde(default)]
    pub render: RenderDefaults,
    #[serde(default)]
    pub renderer: RendererConfig,
}

impl RaylangConfig {
    pub const FILE_NAME: &'static str = "raylang.toml";

    pub fn from_toml_str(contents: &str) -> RaylangResult<Self> {
        toml::from_str(contents).map_err(|e| RaylangError::Config(e.to_string()))
    }

    pub fn load_from_file(path: &Path) -> RaylangResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> RaylangResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> RaylangResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| RaylangError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RaylangConfig::default();
        assert_eq!(config.render.threads, 4);
        assert_eq!(config.render.subsamples, 1);
        assert_eq!(config.render.background, Color::Black);
        assert_eq!(config.renderer.program, "raylang-renderer");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RaylangConfig::from_toml_str(
            r#"
[render]
threads = 8
background = "sky_blue"

[renderer]
program = "/opt/raylang/bin/render"
"#,
        )
        .unwrap();
        assert_eq!(config.render.threads, 8);
        assert_eq!(config.render.subsamples, 1);
        assert_eq!(config.render.background, Color::SkyBlue);
        assert_eq!(config.render.ambient_light, Color::White);
        assert_eq!(config.renderer.program, "/opt/raylang/bin/render");
        assert_eq!(config.renderer.staging_dir, PathBuf::from(".raylang/staging"));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = RaylangConfig::from_toml_str("[render]\nthreads = \"many\"").unwrap_err();
        assert!(matches!(err, RaylangError::Config(_)));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("raylang-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(RaylangConfig::FILE_NAME);

        let mut config = RaylangConfig::default();
        config.render.threads = 2;
        config.renderer.args = vec!["--quiet".to_string()];
        config.save_to_file(&path).unwrap();

        let loaded = RaylangConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            RaylangConfig::load_or_default(Path::new("/nonexistent/raylang.toml")).unwrap();
        assert_eq!(config, RaylangConfig::default());
    }
}
