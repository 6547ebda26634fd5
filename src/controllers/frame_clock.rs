use crate::controllers::session::ExplorerSession;
use crate::core::camera::status::AnimationFrame;
use crate::core::data::viewport::CameraPose;
use crate::core::fractals::frame_contract::FrameContract;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Source of session time, measured from the session epoch.
pub trait Clock {
    fn now(&self) -> Duration;

    /// Blocks (or pretends to) until the next frame is due and returns its
    /// timestamp.
    fn next_frame(&mut self) -> Duration;
}

/// Real time paced at a fixed frame interval.
#[derive(Debug, Clone)]
pub struct WallClock {
    epoch: Instant,
    frame_interval: Duration,
    next_deadline: Duration,
}

impl WallClock {
    #[must_use]
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            epoch: Instant::now(),
            frame_interval,
            next_deadline: Duration::ZERO,
        }
    }
}

impl Clock for WallClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn next_frame(&mut self) -> Duration {
        self.next_deadline += self.frame_interval;

        let now = self.now();
        if now < self.next_deadline {
            std::thread::sleep(self.next_deadline - now);
        } else {
            // Fell behind; drop the backlog rather than bursting frames.
            self.next_deadline = now;
        }

        self.now()
    }
}

/// Deterministic clock that advances one frame interval per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedClock {
    elapsed: Duration,
    frame_interval: Duration,
}

impl SimulatedClock {
    #[must_use]
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            frame_interval,
        }
    }

    #[must_use]
    pub fn from_fps(fps: u32) -> Self {
        Self::new(frame_interval_for(fps))
    }

    pub fn advance(&mut self, by: Duration) -> Duration {
        self.elapsed += by;
        self.elapsed
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Duration {
        self.elapsed
    }

    fn next_frame(&mut self) -> Duration {
        self.advance(self.frame_interval)
    }
}

/// Interval for `fps` frames per second; zero is treated as one.
#[must_use]
pub fn frame_interval_for(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriveReport {
    pub frames: u32,
    pub settled: bool,
    pub final_pose: CameraPose,
    pub elapsed: Duration,
}

/// Ticks `session` once per clock frame until its animation settles or
/// `max_frames` frames have been produced.
///
/// `on_frame` sees every frame contract in order along with the animation
/// frame that produced it. Its first error stops the drive.
pub fn drive_until_settled<C, F, E>(
    session: &mut ExplorerSession,
    clock: &mut C,
    max_frames: u32,
    mut on_frame: F,
) -> Result<DriveReport, E>
where
    C: Clock,
    F: FnMut(u32, &FrameContract, Option<&AnimationFrame>) -> Result<(), E>,
{
    let started = clock.now();
    let mut frames = 0;

    while frames < max_frames && session.is_animating() {
        let now = clock.next_frame();
        let contract = session.tick(now);

        if let Some(frame) = session.last_animation_frame() {
            for event in &frame.events {
                debug!(frame = frames, ?event, "animation event");
            }
        }

        on_frame(frames, &contract, session.last_animation_frame())?;
        frames += 1;
    }

    let settled = !session.is_animating();
    if !settled {
        warn!(max_frames, "animation still running after frame limit");
    }

    let report = DriveReport {
        frames,
        settled,
        final_pose: session.pose(),
        elapsed: clock.now().saturating_sub(started),
    };
    info!(
        frames = report.frames,
        settled = report.settled,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "drive finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use crate::core::camera::status::AnimatorState;
    use std::convert::Infallible;

    fn session() -> ExplorerSession {
        let config = ExplorerConfig {
            width: 64,
            height: 48,
            ..ExplorerConfig::default()
        };
        ExplorerSession::new(&config).unwrap()
    }

    #[test]
    fn simulated_clock_advances_one_interval_per_frame() {
        let mut clock = SimulatedClock::new(Duration::from_millis(20));

        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.next_frame(), Duration::from_millis(20));
        assert_eq!(clock.next_frame(), Duration::from_millis(40));
        assert_eq!(clock.advance(Duration::from_millis(5)), Duration::from_millis(45));
    }

    #[test]
    fn wall_clock_paces_frames() {
        let mut clock = WallClock::new(Duration::from_millis(2));

        let first = clock.next_frame();
        let second = clock.next_frame();

        assert!(first >= Duration::from_millis(2));
        assert!(second >= Duration::from_millis(4));
        assert!(clock.now() >= second);
    }

    #[test]
    fn zero_fps_is_treated_as_one() {
        assert_eq!(frame_interval_for(0), Duration::from_secs(1));
        assert_eq!(SimulatedClock::from_fps(50).frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn idle_session_produces_no_frames() {
        let mut session = session();
        let mut clock = SimulatedClock::from_fps(60);

        let report =
            drive_until_settled(&mut session, &mut clock, 100, |_, _, _| Ok::<_, Infallible>(()))
                .unwrap();

        assert_eq!(report.frames, 0);
        assert!(report.settled);
        assert_eq!(report.final_pose, CameraPose::default());
    }

    #[test]
    fn drives_scene_navigation_to_rest() {
        let mut session = session();
        let mut clock = SimulatedClock::from_fps(50);
        session
            .navigate_to_scene("pos1", Some(Duration::from_millis(1000)), clock.now())
            .unwrap();

        let mut seen = Vec::new();
        let report = drive_until_settled(&mut session, &mut clock, 500, |index, contract, _| {
            seen.push((index, contract.zoom));
            Ok::<_, Infallible>(())
        })
        .unwrap();

        assert!(report.settled);
        assert_eq!(report.final_pose, session.scenes().find("pos1").unwrap().pose());
        assert_eq!(seen.len() as u32, report.frames);
        assert_eq!(session.animator_state(), AnimatorState::Idle);
        assert!(report.elapsed >= Duration::from_millis(1000));
    }

    #[test]
    fn frame_limit_stops_an_unfinished_drive() {
        let mut session = session();
        let mut clock = SimulatedClock::from_fps(10);
        session
            .navigate_to(CameraPose::new(0.3, 0.1, 40.0), Some(Duration::from_secs(10)), clock.now())
            .unwrap();

        let report =
            drive_until_settled(&mut session, &mut clock, 5, |_, _, _| Ok::<_, Infallible>(()))
                .unwrap();

        assert_eq!(report.frames, 5);
        assert!(!report.settled);
        assert!(session.is_animating());
    }

    #[test]
    fn callback_error_stops_the_drive() {
        let mut session = session();
        let mut clock = SimulatedClock::from_fps(10);
        session
            .navigate_to(CameraPose::new(0.3, 0.1, 40.0), None, clock.now())
            .unwrap();

        let result = drive_until_settled(&mut session, &mut clock, 50, |index, _, _| {
            if index == 2 { Err("sink full") } else { Ok(()) }
        });

        assert_eq!(result, Err("sink full"));
    }
}
