//! Named camera positions used as navigation targets.

use crate::core::data::viewport::CameraPose;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene `{name}` not found")]
    ReferenceNotFound { name: String },

    #[error("scene name `{name}` is used more than once")]
    DuplicateName { name: String },

    #[error("scene `{name}` has an invalid camera: center ({center_x}, {center_y}), zoom {zoom}")]
    InvalidCamera {
        name: String,
        center_x: f64,
        center_y: f64,
        zoom: f64,
    },

    #[error("failed to parse scene table: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneCoordinate {
    pub name: String,
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
}

impl SceneCoordinate {
    pub fn new(name: impl Into<String>, center_x: f64, center_y: f64, zoom: f64) -> Self {
        Self {
            name: name.into(),
            center_x,
            center_y,
            zoom,
        }
    }

    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.center_x, self.center_y, self.zoom)
    }

    fn validate(&self) -> Result<(), SceneError> {
        self.pose()
            .validate()
            .map_err(|_| SceneError::InvalidCamera {
                name: self.name.clone(),
                center_x: self.center_x,
                center_y: self.center_y,
                zoom: self.zoom,
            })
    }
}

/// Ordered scene list with unique names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<SceneCoordinate>", into = "Vec<SceneCoordinate>")]
pub struct SceneTable {
    scenes: Vec<SceneCoordinate>,
}

impl SceneTable {
    pub fn new(scenes: Vec<SceneCoordinate>) -> Result<Self, SceneError> {
        let mut table = Self::default();
        for scene in scenes {
            table.push(scene)?;
        }
        Ok(table)
    }

    /// The two stops of the built-in tour.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            scenes: vec![
                SceneCoordinate::new("pos0", -1.5, 0.0, 1.35),
                SceneCoordinate::new(
                    "pos1",
                    -0.6619150588774977,
                    0.4626763853121446,
                    6252.914748397133,
                ),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn find(&self, name: &str) -> Result<&SceneCoordinate, SceneError> {
        self.scenes
            .iter()
            .find(|scene| scene.name == name)
            .ok_or_else(|| SceneError::ReferenceNotFound {
                name: name.to_owned(),
            })
    }

    /// Appends a scene, rejecting duplicate names and invalid cameras.
    pub fn push(&mut self, scene: SceneCoordinate) -> Result<(), SceneError> {
        scene.validate()?;

        if self.scenes.iter().any(|existing| existing.name == scene.name) {
            return Err(SceneError::DuplicateName { name: scene.name });
        }

        self.scenes.push(scene);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneCoordinate> {
        self.scenes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl TryFrom<Vec<SceneCoordinate>> for SceneTable {
    type Error = SceneError;

    fn try_from(scenes: Vec<SceneCoordinate>) -> Result<Self, Self::Error> {
        Self::new(scenes)
    }
}

impl From<SceneTable> for Vec<SceneCoordinate> {
    fn from(table: SceneTable) -> Self {
        table.scenes
    }
}
