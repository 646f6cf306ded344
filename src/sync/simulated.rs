//! In-memory media player.
//!
//! Drives `recsync simulate` and the synchronizer tests. Clones share the
//! same player, so a test can keep one handle while the synchronizer holds
//! another.

use std::cell::RefCell;
use std::rc::Rc;

use crate::sync::player::{PlayerError, PlayerHandle};

#[derive(Debug)]
struct State {
    position: f64,
    playing: bool,
    rate: f64,
    /// Clock error of this player: 1.0 is exact, 0.99 runs 1% slow
    skew: f64,
    available: bool,
    stalled: bool,
    buffered_until: Option<f64>,
    seeks: Vec<f64>,
}

/// A player whose clock only moves when [`advance`](Self::advance) is called.
#[derive(Debug, Clone)]
pub struct SimulatedPlayer {
    state: Rc<RefCell<State>>,
}

impl SimulatedPlayer {
    /// A paused player at `position` seconds.
    pub fn new(position: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                position,
                playing: false,
                rate: 1.0,
                skew: 1.0,
                available: true,
                stalled: false,
                buffered_until: None,
                seeks: Vec::new(),
            })),
        }
    }

    /// Let `seconds` of wall time pass.
    pub fn advance(&self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        if state.playing && !state.stalled {
            state.position += seconds * state.rate * state.skew;
        }
    }

    pub fn position(&self) -> f64 {
        self.state.borrow().position
    }

    /// Move the playhead without recording a seek.
    pub fn set_position(&self, position: f64) {
        self.state.borrow_mut().position = position;
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    pub fn rate(&self) -> f64 {
        self.state.borrow().rate
    }

    pub fn set_skew(&self, skew: f64) {
        self.state.borrow_mut().skew = skew;
    }

    /// An unavailable player fails every call.
    pub fn set_available(&self, available: bool) {
        self.state.borrow_mut().available = available;
    }

    /// A stalled player keeps answering but its clock stops.
    pub fn set_stalled(&self, stalled: bool) {
        self.state.borrow_mut().stalled = stalled;
    }

    /// Seeks past `until` fail with [`PlayerError::NotBuffered`]. `None` lifts the limit.
    pub fn set_buffered_until(&self, until: Option<f64>) {
        self.state.borrow_mut().buffered_until = until;
    }

    /// Targets of every accepted seek, oldest first.
    pub fn seeks(&self) -> Vec<f64> {
        self.state.borrow().seeks.clone()
    }

    fn check_available(&self) -> Result<(), PlayerError> {
        if self.state.borrow().available {
            Ok(())
        } else {
            Err(PlayerError::Unavailable)
        }
    }
}

impl PlayerHandle for SimulatedPlayer {
    fn current_time(&self) -> Result<f64, PlayerError> {
        self.check_available()?;
        Ok(self.position())
    }

    fn set_current_time(&self, seconds: f64) -> Result<(), PlayerError> {
        self.check_available()?;
        let mut state = self.state.borrow_mut();
        if let Some(until) = state.buffered_until {
            if seconds > until {
                return Err(PlayerError::NotBuffered(seconds));
            }
        }
        state.position = seconds;
        state.seeks.push(seconds);
        Ok(())
    }

    fn play(&self) -> Result<(), PlayerError> {
        self.check_available()?;
        self.state.borrow_mut().playing = true;
        Ok(())
    }

    fn pause(&self) -> Result<(), PlayerError> {
        self.check_available()?;
        self.state.borrow_mut().playing = false;
        Ok(())
    }

    fn set_playback_rate(&self, rate: f64) -> Result<(), PlayerError> {
        self.check_available()?;
        self.state.borrow_mut().rate = rate;
        Ok(())
    }
}
