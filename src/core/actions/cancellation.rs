use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

pub const CANCEL_CHECK_INTERVAL_PIXELS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation cancelled")]
pub struct Cancelled;

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Monotonic frame counter; starting a frame supersedes every older one.
#[derive(Debug, Default)]
pub struct FrameGeneration {
    current: AtomicU64,
}

impl FrameGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame and returns its ticket.
    pub fn begin(&self) -> FrameTicket<'_> {
        let id = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        FrameTicket {
            generation: self,
            id,
        }
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }
}

/// Cancelled as soon as a newer frame begins.
#[derive(Debug, Clone, Copy)]
pub struct FrameTicket<'a> {
    generation: &'a FrameGeneration,
    id: u64,
}

impl FrameTicket<'_> {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl CancelToken for FrameTicket<'_> {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.generation.current() != self.id
    }
}
