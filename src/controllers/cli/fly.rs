use crate::controllers::cli::{CameraTarget, CliError};
use crate::controllers::frame_clock::{DriveReport, SimulatedClock, drive_until_settled};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::render_loop::render_frame;
use crate::controllers::session::ExplorerSession;
use crate::core::data::viewport::CameraPose;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct FlightRequest {
    pub start: CameraPose,
    pub target: CameraTarget,
    /// `None` uses the tuned default duration.
    pub duration: Option<Duration>,
    pub fps: u32,
    pub max_frames: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightSummary {
    pub report: DriveReport,
    pub written: Vec<PathBuf>,
}

/// Animates a navigation on a simulated clock and writes every frame.
pub struct FlyCommandController<P: FilePresenterPort> {
    presenter: P,
}

impl<P: FilePresenterPort> FlyCommandController<P> {
    pub fn new(presenter: P) -> Self {
        Self { presenter }
    }

    pub fn run(
        &self,
        session: &mut ExplorerSession,
        request: &FlightRequest,
        out_dir: impl AsRef<Path>,
    ) -> Result<FlightSummary, CliError> {
        let out_dir = out_dir.as_ref();
        std::fs::create_dir_all(out_dir).map_err(|source| CliError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let mut clock = SimulatedClock::from_fps(request.fps);
        session.jump_to(request.start)?;
        request.target.navigate(session, request.duration, Duration::ZERO)?;

        info!(
            fps = request.fps,
            max_frames = request.max_frames,
            out_dir = %out_dir.display(),
            "flight started"
        );

        let mut written = Vec::new();
        let report = drive_until_settled(session, &mut clock, request.max_frames, |index, contract, _| {
            let frame = render_frame(contract)?;
            let path = out_dir.join(format!("frame_{index:05}.{}", self.presenter.extension()));

            self.presenter
                .present(&frame.field, &path)
                .map_err(|source| CliError::Io {
                    path: path.clone(),
                    source,
                })?;

            debug!(path = %path.display(), "flight frame saved");
            written.push(path);
            Ok::<_, CliError>(())
        })?;

        Ok(FlightSummary { report, written })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use crate::core::data::grayscale_field::GrayscaleField;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPresenter {
        paths: RefCell<Vec<PathBuf>>,
    }

    impl FilePresenterPort for &RecordingPresenter {
        fn present(&self, _: &GrayscaleField, filepath: impl AsRef<Path>) -> std::io::Result<()> {
            self.paths.borrow_mut().push(filepath.as_ref().to_path_buf());
            Ok(())
        }

        fn extension(&self) -> &'static str {
            "pgm"
        }
    }

    fn session() -> ExplorerSession {
        let config = ExplorerConfig {
            width: 16,
            height: 12,
            ..ExplorerConfig::default()
        };
        ExplorerSession::new(&config).unwrap()
    }

    fn out_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fractal_voyage_{name}_{}", std::process::id()))
    }

    #[test]
    fn writes_numbered_frames_until_settled() {
        let presenter = RecordingPresenter::default();
        let controller = FlyCommandController::new(&presenter);
        let mut session = session();
        let dir = out_dir("fly_settled");
        let request = FlightRequest {
            start: CameraPose::default(),
            target: CameraTarget::Scene("pos0".to_owned()),
            duration: Some(Duration::from_millis(500)),
            fps: 20,
            max_frames: 100,
        };

        let summary = controller.run(&mut session, &request, &dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(summary.report.settled);
        assert_eq!(summary.report.final_pose, CameraPose::new(-1.5, 0.0, 1.35));
        assert_eq!(summary.written.len() as u32, summary.report.frames);
        assert_eq!(*presenter.paths.borrow(), summary.written);
        assert_eq!(summary.written[0], dir.join("frame_00000.pgm"));
    }

    #[test]
    fn deep_start_resets_before_travelling() {
        let presenter = RecordingPresenter::default();
        let controller = FlyCommandController::new(&presenter);
        let mut session = session();
        let dir = out_dir("fly_reset");
        let request = FlightRequest {
            start: CameraPose::new(-0.6619150588774977, 0.4626763853121446, 6252.914748397133),
            target: CameraTarget::Scene("pos0".to_owned()),
            duration: Some(Duration::from_millis(400)),
            fps: 50,
            max_frames: 200,
        };

        let summary = controller.run(&mut session, &request, &dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        // 500ms reset, 100ms pause, 400ms travel at 20ms per frame.
        assert!(summary.report.settled);
        assert!(summary.report.frames >= 50);
        assert_eq!(summary.report.final_pose, CameraPose::new(-1.5, 0.0, 1.35));
    }

    #[test]
    fn unknown_target_fails_before_any_frame() {
        let presenter = RecordingPresenter::default();
        let controller = FlyCommandController::new(&presenter);
        let mut session = session();
        let dir = out_dir("fly_unknown");
        let request = FlightRequest {
            start: CameraPose::default(),
            target: CameraTarget::Scene("nowhere".to_owned()),
            duration: None,
            fps: 30,
            max_frames: 10,
        };

        let result = controller.run(&mut session, &request, &dir);
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(result.is_err());
        assert!(presenter.paths.borrow().is_empty());
    }
}
