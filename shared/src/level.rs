//! Level geometry definitions and the file loader.
//!
//! A level file is a top-level sequence of segment records:
//!
//! ```json
//! [
//!   { "a": [0, 40], "b": [2000, 40], "friction": 0.8 },
//!   { "a": [0, 40], "b": [0, 1200] }
//! ]
//! ```
//!
//! `.yml`/`.yaml` files are read as YAML (with the `yaml` feature), anything
//! else as JSON.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{DEFAULT_SEGMENT_FRICTION, TEST_AREA_FLOOR_Y};

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON level: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "yaml")]
    #[error("malformed YAML level: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("YAML level {} requires the `yaml` feature (serde_yaml)", path.display())]
    YamlUnsupported { path: PathBuf },
    #[error("segment {index} is invalid: {reason}")]
    InvalidSegment { index: usize, reason: &'static str },
}

/// One immovable line of level geometry.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct SegmentDef {
    pub a: [f32; 2],
    pub b: [f32; 2],
    #[serde(default = "default_friction")]
    pub friction: f32,
}

fn default_friction() -> f32 {
    DEFAULT_SEGMENT_FRICTION
}

impl SegmentDef {
    pub fn new(a: [f32; 2], b: [f32; 2]) -> Self {
        Self {
            a,
            b,
            friction: DEFAULT_SEGMENT_FRICTION,
        }
    }

    fn validate(&self, index: usize) -> Result<(), LevelError> {
        let finite = self.a.iter().chain(self.b.iter()).all(|c| c.is_finite());
        if !finite {
            return Err(LevelError::InvalidSegment {
                index,
                reason: "endpoint is not finite",
            });
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(LevelError::InvalidSegment {
                index,
                reason: "friction must be a finite, non-negative number",
            });
        }
        Ok(())
    }
}

/// Serialization format of a level file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelFormat {
    Json,
    Yaml,
}

impl LevelFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LevelDef {
    pub segments: Vec<SegmentDef>,
}

impl LevelDef {
    /// Read and parse a level file. The format is chosen from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let format = LevelFormat::from_path(path);
        if format == LevelFormat::Yaml && !cfg!(feature = "yaml") {
            return Err(LevelError::YamlUnsupported {
                path: path.to_path_buf(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::parse(&text, format)?;
        log::info!(
            "loaded level {} ({} segments)",
            path.display(),
            level.segments.len()
        );
        Ok(level)
    }

    pub fn parse(text: &str, format: LevelFormat) -> Result<Self, LevelError> {
        let level: Self = match format {
            LevelFormat::Json => serde_json::from_str(text)?,
            #[cfg(feature = "yaml")]
            LevelFormat::Yaml => serde_yaml::from_str(text)?,
            #[cfg(not(feature = "yaml"))]
            LevelFormat::Yaml => {
                return Err(LevelError::YamlUnsupported {
                    path: PathBuf::from("<inline>"),
                });
            }
        };

        for (index, segment) in level.segments.iter().enumerate() {
            segment.validate(index)?;
        }
        Ok(level)
    }

    /// A boxed area of the given size: floor, both walls and a ceiling.
    pub fn test_area(width: f32, height: f32) -> Self {
        let floor = TEST_AREA_FLOOR_Y;
        Self {
            segments: vec![
                SegmentDef::new([0.0, floor], [width, floor]),
                SegmentDef::new([0.0, floor], [0.0, height]),
                SegmentDef::new([width, floor], [width, height]),
                SegmentDef::new([0.0, height], [width, height]),
            ],
        }
    }
}
