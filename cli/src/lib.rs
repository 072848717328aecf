use edgefinder::TraceConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Where and how traced lines are written
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct OutputSettings {
    pub svg: PathBuf,
    pub geojson: Option<PathBuf>,
    /// Directory for the classification and region debug images
    pub debug_dir: Option<PathBuf>,
    pub target_width_mm: f64,
    pub target_height_mm: f64,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            svg: PathBuf::from("image.svg"),
            geojson: None,
            debug_dir: None,
            target_width_mm: 297.0,
            target_height_mm: 210.0,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Every RGB component above this is classified white
    pub colour_threshold: u8,
    pub trace: TraceConfig,
    pub output: OutputSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colour_threshold: 64,
            trace: TraceConfig::default(),
            output: OutputSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load settings from JSON string
    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load settings
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(SettingsError::UnsupportedFileFormat),
        }
    }

    /// Convert settings to TOML string
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Convert settings to JSON string
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgefinder::SimplificationMethod;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            colour_threshold = 100

            [trace]
            area_size_threshold = 40
            simplification = "visvalingam_whyatt"

            [output]
            svg = "plot.svg"
            "#,
        )
        .expect("Should parse TOML");

        assert_eq!(settings.colour_threshold, 100);
        assert_eq!(settings.trace.area_size_threshold, 40);
        assert_eq!(settings.trace.epsilon, 0.01);
        assert_eq!(settings.trace.simplification, SimplificationMethod::VisvalingamWhyatt);
        assert_eq!(settings.output.svg, PathBuf::from("plot.svg"));
        assert_eq!(settings.output.target_width_mm, 297.0);
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let settings = Settings {
            colour_threshold: 12,
            ..Settings::default()
        };

        let json_path = dir.path().join("settings.json");
        fs::write(&json_path, settings.to_json().expect("Should serialize")).expect("Should write");
        assert_eq!(Settings::from_file(&json_path).expect("Should load JSON"), settings);

        let toml_path = dir.path().join("settings.toml");
        fs::write(&toml_path, settings.to_toml().expect("Should serialize")).expect("Should write");
        assert_eq!(Settings::from_file(&toml_path).expect("Should load TOML"), settings);

        let yaml_path = dir.path().join("settings.yaml");
        fs::write(&yaml_path, "").expect("Should write");
        assert!(matches!(
            Settings::from_file(&yaml_path),
            Err(SettingsError::UnsupportedFileFormat)
        ));
    }
}
