//! Dashboard configuration, read from an optional JSON file in the working directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "tariff_dashboard.json";

pub const DEFAULT_DATA_FILE: &str = "한국농수산식품유통공사_국영무역품목 양허세율_20200925.csv";

/// Hangul fonts tried, in order, when no `font_path` is configured.
const SYSTEM_HANGUL_FONTS: [&str; 6] = [
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "C:\\Windows\\Fonts\\malgun.ttf",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Tariff CSV loaded at startup.
    pub data_path: PathBuf,
    pub window_title: String,
    /// Font with Hangul coverage; egui's bundled fonts have none.
    pub font_path: Option<PathBuf>,
    /// PNG export size in pixels.
    pub export_size: [u32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            window_title: "농수산물 양허세율 대시보드".to_string(),
            font_path: None,
            export_size: [1400, 800],
        }
    }
}

impl DashboardConfig {
    /// Read the config at `path`. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Font used for both the UI and exported charts: the configured one, else
    /// the first Hangul system font found.
    pub fn resolved_font_path(&self) -> Option<PathBuf> {
        self.font_path
            .clone()
            .or_else(|| first_existing(SYSTEM_HANGUL_FONTS.iter().map(PathBuf::from)))
    }

    /// Load `tariff_dashboard.json`, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        match Self::from_file(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}; using default configuration", e);
                Self::default()
            }
        }
    }
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::from_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{ "data_path": "data/tariffs.csv", "font_path": "/usr/share/fonts/NanumGothic.ttf" }"#,
        )
        .unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/tariffs.csv"));
        assert_eq!(
            config.font_path,
            Some(PathBuf::from("/usr/share/fonts/NanumGothic.ttf"))
        );
        assert_eq!(config.export_size, [1400, 800]);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = DashboardConfig::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid config"));
    }

    #[test]
    fn test_configured_font_wins() {
        let config = DashboardConfig {
            font_path: Some(PathBuf::from("fonts/custom.ttf")),
            ..DashboardConfig::default()
        };
        assert_eq!(
            config.resolved_font_path(),
            Some(PathBuf::from("fonts/custom.ttf"))
        );
    }

    #[test]
    fn test_first_existing_font_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.ttf");
        fs::write(&present, b"font").unwrap();

        let candidates = vec![dir.path().join("absent.ttf"), dir.path().to_path_buf(), present.clone()];
        assert_eq!(first_existing(candidates), Some(present));
        assert_eq!(first_existing(vec![dir.path().join("absent.ttf")]), None);
    }
}
