//! Command logic behind the `fractal-voyage` binary.

pub mod fly;
pub mod render;
pub mod scenes;

use crate::config::ConfigError;
use crate::controllers::render_loop::RenderError;
use crate::controllers::session::{ExplorerSession, SessionError};
use crate::core::data::complex::Complex;
use crate::core::data::viewport::{CameraPose, ViewportError};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Viewport(#[from] ViewportError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("failed to write {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where a command points the camera.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraTarget {
    Scene(String),
    Pose(CameraPose),
}

impl CameraTarget {
    /// Resolves the target against the session's scene table.
    pub fn resolve(&self, session: &ExplorerSession) -> Result<CameraPose, CliError> {
        match self {
            Self::Scene(name) => Ok(session
                .scenes()
                .find(name)
                .map_err(SessionError::from)?
                .pose()),
            Self::Pose(pose) => Ok(*pose),
        }
    }

    /// Starts an animated trip from the session's current camera.
    pub fn navigate(
        &self,
        session: &mut ExplorerSession,
        duration: Option<Duration>,
        now: Duration,
    ) -> Result<(), CliError> {
        match self {
            Self::Scene(name) => session.navigate_to_scene(name, duration, now)?,
            Self::Pose(pose) => session.navigate_to(*pose, duration, now)?,
        };
        Ok(())
    }
}

/// Parses `RE,IM` into a complex number.
pub fn parse_complex(input: &str) -> Result<Complex, String> {
    let (re, im) = input
        .split_once(',')
        .ok_or_else(|| format!("expected RE,IM but got `{input}`"))?;

    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|err| format!("invalid number `{}`: {err}", part.trim()))
    };

    let value = Complex::new(parse(re)?, parse(im)?);
    if !value.is_finite() {
        return Err(format!("`{input}` is not a finite complex number"));
    }

    Ok(value)
}
