use crate::controllers::cli::{CameraTarget, CliError};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::render_loop::{RenderedFrame, render_frame};
use crate::controllers::session::ExplorerSession;
use crate::core::budget::CeilingRamp;
use std::path::Path;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub target: CameraTarget,
    /// Fixed ceiling in place of the configured one.
    pub iterations: Option<u32>,
}

/// Renders a single still of `request.target` and hands it to `presenter`.
pub struct RenderCommandController<P: FilePresenterPort> {
    presenter: P,
}

impl<P: FilePresenterPort> RenderCommandController<P> {
    pub fn new(presenter: P) -> Self {
        Self { presenter }
    }

    pub fn run(
        &self,
        session: &mut ExplorerSession,
        request: &RenderRequest,
        ceiling: u32,
        filepath: impl AsRef<Path>,
    ) -> Result<RenderedFrame, CliError> {
        let filepath = filepath.as_ref();
        let pose = request.target.resolve(session)?;
        session.jump_to(pose)?;
        session.set_ceiling_ramp(CeilingRamp::settled(request.iterations.unwrap_or(ceiling)));

        let contract = session.tick(Duration::ZERO);
        let frame = render_frame(&contract)?;

        self.presenter
            .present(&frame.field, filepath)
            .map_err(|source| CliError::Io {
                path: filepath.to_path_buf(),
                source,
            })?;

        info!(path = %filepath.display(), "frame saved");
        Ok(frame)
    }
}
