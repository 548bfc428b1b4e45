// CLASSIFICATION: COMMUNITY
// Filename: state.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Process-wide bring-up state.
//!
//! NotLoaded → InProgress → Loaded | Failed, each transition taken at most
//! once. There is no teardown: Loaded and Failed are terminal, since the
//! co-processor cannot be rolled back after a partial load.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use once_cell::sync::Lazy;

const NOT_LOADED: u8 = 0;
const IN_PROGRESS: u8 = 1;
const LOADED: u8 = 2;
const FAILED: u8 = 3;

/// Poll interval while another caller holds the bring-up.
const SETTLE_POLL: Duration = Duration::from_millis(1);

/// Observable bring-up phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpPhase {
    NotLoaded,
    InProgress,
    Loaded,
    Failed,
}

/// At-most-once guard around the load sequence.
#[derive(Debug, Default)]
pub struct BringUpState {
    phase: AtomicU8,
}

static GLOBAL: Lazy<Arc<BringUpState>> = Lazy::new(|| Arc::new(BringUpState::new()));

impl BringUpState {
    pub const fn new() -> Self {
        Self {
            phase: AtomicU8::new(NOT_LOADED),
        }
    }

    /// The single instance shared by every orchestrator in this process.
    pub fn global() -> Arc<BringUpState> {
        Arc::clone(&GLOBAL)
    }

    pub fn phase(&self) -> BringUpPhase {
        match self.phase.load(Ordering::Acquire) {
            NOT_LOADED => BringUpPhase::NotLoaded,
            IN_PROGRESS => BringUpPhase::InProgress,
            LOADED => BringUpPhase::Loaded,
            _ => BringUpPhase::Failed,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.phase() == BringUpPhase::Loaded
    }

    /// Claim the right to run bring-up. Only the first caller wins; the
    /// phase it lost to is returned otherwise.
    pub fn try_begin(&self) -> Result<(), BringUpPhase> {
        self.phase
            .compare_exchange(NOT_LOADED, IN_PROGRESS, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| self.phase())
    }

    /// Record full success. Only valid after a successful [`try_begin`];
    /// returns `false` (and changes nothing) otherwise.
    ///
    /// [`try_begin`]: BringUpState::try_begin
    pub fn mark_loaded(&self) -> bool {
        self.finish(LOADED)
    }

    /// Record a fatal failure of the claimed attempt.
    pub fn mark_failed(&self) -> bool {
        self.finish(FAILED)
    }

    fn finish(&self, to: u8) -> bool {
        self.phase
            .compare_exchange(IN_PROGRESS, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Block until no attempt is in progress and return the settled phase.
    pub fn wait_settled(&self) -> BringUpPhase {
        loop {
            match self.phase() {
                BringUpPhase::InProgress => thread::sleep(SETTLE_POLL),
                phase => return phase,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_once() {
        let state = BringUpState::new();
        assert_eq!(state.phase(), BringUpPhase::NotLoaded);
        state.try_begin().unwrap();
        assert_eq!(state.try_begin(), Err(BringUpPhase::InProgress));
        assert!(state.mark_loaded());
        assert!(state.is_loaded());
        assert_eq!(state.try_begin(), Err(BringUpPhase::Loaded));
        assert!(!state.mark_failed());
        assert!(state.is_loaded());
    }

    #[test]
    fn mark_without_begin_is_rejected() {
        let state = BringUpState::new();
        assert!(!state.mark_loaded());
        assert!(!state.mark_failed());
        assert_eq!(state.phase(), BringUpPhase::NotLoaded);
    }

    #[test]
    fn failed_attempt_is_terminal() {
        let state = BringUpState::new();
        state.try_begin().unwrap();
        assert!(state.mark_failed());
        assert_eq!(state.phase(), BringUpPhase::Failed);
        assert_eq!(state.try_begin(), Err(BringUpPhase::Failed));
        assert!(!state.mark_loaded());
        assert_eq!(state.wait_settled(), BringUpPhase::Failed);
    }

    #[test]
    fn wait_settled_blocks_until_holder_finishes() {
        let state = Arc::new(BringUpState::new());
        state.try_begin().unwrap();
        let holder = {
            let s = Arc::clone(&state);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                s.mark_loaded()
            })
        };
        assert_eq!(state.wait_settled(), BringUpPhase::Loaded);
        assert!(holder.join().unwrap());
    }

    #[test]
    fn racing_claims_have_one_winner() {
        let state = Arc::new(BringUpState::new());
        let winners: usize = (0..8)
            .map(|_| {
                let s = Arc::clone(&state);
                std::thread::spawn(move || s.try_begin().is_ok())
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();
        assert_eq!(winners, 1);
    }
}
