use crate::geometry::alias::Vector;
use crate::placement::service::{DEFAULT_OBJECT_OFFSET, DEFAULT_SCALE_MULTIPLIER};
use crate::ui::scale_slider::grid_range;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    #[error("scale slider range [{minimum}, {maximum}] holds no 0.1 step")]
    InvalidSliderRange {
        minimum: f32,
        maximum: f32,
    },
    #[error("scale multiplier must be positive, got {multiplier}")]
    NonPositiveScaleMultiplier {
        multiplier: f32,
    },
    #[error("frame log interval must be positive")]
    ZeroFrameLogInterval,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScaleSliderSettings {
    pub minimum: f32,
    pub maximum: f32,
    pub initial: f32,
}

impl Default for ScaleSliderSettings {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 1.0,
            initial: 0.5,
        }
    }
}

/// Startup knobs of the application; every field falls back to its default when absent.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub model_asset: String,
    pub template_node: String,
    pub scale_multiplier: f32,
    pub object_offset: [f32; 3],
    pub scale_slider: ScaleSliderSettings,
    pub occlusion_initially_enabled: bool,
    /// Draws detected planes translucent white instead of depth-only.
    pub visualize_planes: bool,
    pub show_statistics: bool,
    /// Every n-th frame gets logged.
    pub frame_log_interval: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            model_asset: "Samba Dancing".to_string(),
            template_node: "Base".to_string(),
            scale_multiplier: DEFAULT_SCALE_MULTIPLIER,
            object_offset: [DEFAULT_OBJECT_OFFSET.x, DEFAULT_OBJECT_OFFSET.y, DEFAULT_OBJECT_OFFSET.z],
            scale_slider: ScaleSliderSettings::default(),
            occlusion_initially_enabled: true,
            visualize_planes: false,
            show_statistics: true,
            frame_log_interval: 120,
        }
    }
}

impl AppSettings {
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: AppSettings = serde_json::from_str(text).map_err(|source| SettingsError::Parse { source })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| SettingsError::Io { path: path.display().to_string(), source })?;
        Self::from_json_str(&text)
    }

    #[must_use]
    pub fn object_offset(&self) -> Vector {
        Vector::new(self.object_offset[0], self.object_offset[1], self.object_offset[2])
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let slider = &self.scale_slider;
        if false == (slider.minimum <= slider.maximum) || grid_range(slider.minimum, slider.maximum).is_none() {
            return Err(SettingsError::InvalidSliderRange { minimum: slider.minimum, maximum: slider.maximum });
        }
        if false == (self.scale_multiplier > 0.0) {
            return Err(SettingsError::NonPositiveScaleMultiplier { multiplier: self.scale_multiplier });
        }
        if 0 == self.frame_log_interval {
            return Err(SettingsError::ZeroFrameLogInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::assert_abs_diff_eq;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let system_under_test = AppSettings::default();

        assert_eq!(system_under_test.model_asset, "Samba Dancing");
        assert_eq!(system_under_test.template_node, "Base");
        assert_eq!(system_under_test.scale_multiplier, 1.7);
        assert_abs_diff_eq!(system_under_test.object_offset(), Vector::new(0.0, 0.001, 0.0));
        assert!(system_under_test.occlusion_initially_enabled);
        assert_eq!(system_under_test.visualize_planes, false);
        assert!(system_under_test.show_statistics);
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let system_under_test = AppSettings::from_json_str("{}").expect("valid settings");
        assert_eq!(system_under_test, AppSettings::default());
    }

    #[test]
    fn test_partial_override() {
        let system_under_test = AppSettings::from_json_str(
            r#"{ "visualize_planes": true, "scale_slider": { "maximum": 3.0 } }"#
        ).expect("valid settings");

        assert!(system_under_test.visualize_planes);
        assert_eq!(system_under_test.scale_slider.maximum, 3.0);
        assert_eq!(system_under_test.scale_slider.minimum, 0.0);
        assert_eq!(system_under_test.scale_slider.initial, 0.5);
        assert_eq!(system_under_test.model_asset, "Samba Dancing");
    }

    #[test]
    fn test_inverted_slider_range_is_rejected() {
        let error = AppSettings::from_json_str(r#"{ "scale_slider": { "minimum": 2.0, "maximum": 1.0 } }"#)
            .expect_err("range is inverted");
        assert!(matches!(error, SettingsError::InvalidSliderRange { .. }));
    }

    #[test]
    fn test_slider_range_without_steps_is_rejected() {
        let error = AppSettings::from_json_str(r#"{ "scale_slider": { "minimum": 0.31, "maximum": 0.39, "initial": 0.35 } }"#)
            .expect_err("no 0.1 step inside the range");
        assert!(matches!(error, SettingsError::InvalidSliderRange { .. }));
    }

    #[test]
    fn test_off_grid_slider_range_is_accepted() {
        let system_under_test = AppSettings::from_json_str(r#"{ "scale_slider": { "minimum": 0.05 } }"#).expect("valid settings");
        assert_eq!(system_under_test.scale_slider.minimum, 0.05);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.7)]
    fn test_non_positive_scale_multiplier_is_rejected(#[case] multiplier: f32) {
        let error = AppSettings::from_json_str(&format!(r#"{{ "scale_multiplier": {multiplier} }}"#))
            .expect_err("multiplier is not positive");
        assert!(matches!(error, SettingsError::NonPositiveScaleMultiplier { .. }));
    }

    #[test]
    fn test_nan_scale_multiplier_is_rejected() {
        let settings = AppSettings { scale_multiplier: f32::NAN, ..AppSettings::default() };
        assert!(matches!(settings.validate(), Err(SettingsError::NonPositiveScaleMultiplier { .. })));
    }

    #[test]
    fn test_zero_frame_log_interval_is_rejected() {
        let error = AppSettings::from_json_str(r#"{ "frame_log_interval": 0 }"#).expect_err("interval is zero");
        assert!(matches!(error, SettingsError::ZeroFrameLogInterval));
    }

    #[test]
    fn test_malformed_json() {
        let error = AppSettings::from_json_str("{ scale").expect_err("not json");
        assert!(matches!(error, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().expect("temporary file");
        write!(file, r#"{{ "show_statistics": false, "frame_log_interval": 10 }}"#).expect("write settings");

        let system_under_test = AppSettings::from_json_file(file.path()).expect("valid settings");

        assert_eq!(system_under_test.show_statistics, false);
        assert_eq!(system_under_test.frame_log_interval, 10);
    }

    #[test]
    fn test_missing_file() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let error = AppSettings::from_json_file(directory.path().join("absent.json")).expect_err("file is absent");
        assert!(matches!(error, SettingsError::Io { .. }));
    }
}
