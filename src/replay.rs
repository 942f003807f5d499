//! Scripted event replay.
//!
//! Drives a [`Session`] from a JSON event script instead of a live window,
//! and reports the final frame and rectangles. Used by the
//! `rect-canvas-replay` binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, EditorConfig};
use crate::editor::Editor;
use crate::error::SessionError;
use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::render::{CommandRecorder, DrawCommand, Raster};
use crate::session::Session;

/// Errors that can occur while replaying a script.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// I/O error reading the script
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Script is not valid JSON
    #[error("Invalid event script: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration cannot drive an editor
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Background image could not be read
    #[error("Failed to read image: {0}")]
    Image(#[from] image::ImageError),

    /// The session rejected an event
    #[error("Event {index} failed: {source}")]
    Event {
        index: usize,
        #[source]
        source: SessionError,
    },

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A recorded sequence of input events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventScript {
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl EventScript {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Final state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Draw calls of the last frame
    pub frame: Vec<DrawCommand>,
    /// Frames drawn during the replay
    pub frames: usize,
    pub rectangles: Vec<Rect>,
    pub selected: Option<usize>,
    pub scale: f32,
    pub offset: (f32, f32),
    /// Events whose default platform action was suppressed
    pub suppressed: usize,
}

/// Read the pixel size of an image file without keeping its pixels.
pub fn load_raster(path: &Path) -> Result<Raster, ReplayError> {
    let (width, height) = image::image_dimensions(path)?;
    log::info!("Image {:?} is {}x{}", path, width, height);
    Ok(Raster::new(width, height))
}

/// Replay `script` against a fresh editor built from `config`.
pub fn run(
    script: &EventScript,
    config: &EditorConfig,
    image: Option<Raster>,
) -> Result<ReplayReport, ReplayError> {
    let mut session = Session::new(Editor::new(config)?, CommandRecorder::new());
    let subscription = session.attach()?;
    session.set_image(image);

    let mut suppressed = 0;
    for (index, event) in script.events.iter().enumerate() {
        let response = session
            .dispatch(&subscription, *event)
            .map_err(|source| ReplayError::Event { index, source })?;
        if response.suppress_default {
            suppressed += 1;
        }
    }
    log::info!("Replayed {} events", script.events.len());

    let editor = session.editor();
    let report = ReplayReport {
        frame: session.surface().commands().to_vec(),
        frames: session.surface().frames(),
        rectangles: editor.store().as_slice().to_vec(),
        selected: editor.store().selected(),
        scale: editor.camera().scale(),
        offset: editor.camera().offset(),
        suppressed,
    };
    session.detach(subscription)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "events": [
            {"type": "pressed", "button": "primary", "position": {"x": 100.0, "y": 100.0}},
            {"type": "moved", "position": {"x": 150.0, "y": 130.0}},
            {"type": "released", "button": "primary", "position": {"x": 150.0, "y": 130.0}},
            {"type": "pressed", "button": "primary", "position": {"x": 120.0, "y": 110.0}},
            {"type": "released", "button": "primary", "position": {"x": 120.0, "y": 110.0}},
            {"type": "context_menu", "position": {"x": 5.0, "y": 5.0}},
            {"type": "pressed", "button": "secondary", "position": {"x": 0.0, "y": 0.0}},
            {"type": "moved", "position": {"x": 20.0, "y": 10.0}},
            {"type": "released", "button": "secondary", "position": {"x": 20.0, "y": 10.0}}
        ]
    }"#;

    #[test]
    fn test_replay_script() {
        let script = EventScript::from_json(SCRIPT).unwrap();
        let report = run(&script, &EditorConfig::default(), Some(Raster::new(2500, 1667))).unwrap();

        assert_eq!(report.rectangles, vec![Rect::new(100.0, 100.0, 50.0, 30.0)]);
        assert_eq!(report.selected, Some(0));
        assert_eq!(report.offset, (20.0, 10.0));
        assert_eq!(report.scale, 1.0);
        assert_eq!(report.suppressed, 1);

        assert_eq!(
            report.frame[0],
            DrawCommand::Clear {
                width: 1600.0,
                height: 800.0
            }
        );
        assert!(matches!(
            report.frame[1],
            DrawCommand::DrawImage { x, y, .. } if x == 20.0 && y == 10.0
        ));
        assert!(matches!(
            &report.frame[2],
            DrawCommand::StrokeRect { rect, .. } if *rect == Rect::new(120.0, 110.0, 50.0, 30.0)
        ));
    }

    #[test]
    fn test_empty_script() {
        let script = EventScript::from_json("{}").unwrap();
        let report = run(&script, &EditorConfig::default(), None).unwrap();
        assert!(report.rectangles.is_empty());
        assert_eq!(report.frames, 1);
        assert_eq!(
            report.frame,
            vec![DrawCommand::Clear {
                width: 1600.0,
                height: 800.0
            }]
        );
    }

    #[test]
    fn test_bad_script() {
        let err = EventScript::from_json(r#"{"events": [{"type": "teleport"}]}"#).unwrap_err();
        assert!(matches!(err, ReplayError::Json(_)));
    }

    #[test]
    fn test_missing_script_file() {
        let err = EventScript::load(Path::new("/nonexistent/script.json")).unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EditorConfig::default();
        config.zoom.min_scale = 5.0;
        config.zoom.max_scale = 2.0;
        let err = run(&EventScript::default(), &config, None).unwrap_err();
        assert!(matches!(err, ReplayError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_raster_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("background.png");
        image::RgbImage::new(7, 3).save(&path).unwrap();

        assert_eq!(load_raster(&path).unwrap(), Raster::new(7, 3));
    }

    #[test]
    fn test_load_raster_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_raster(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ReplayError::Image(_)));
    }
}
