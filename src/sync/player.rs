//! PlayerHandle trait and related types.

use std::rc::Rc;

/// A media player owned by the host.
///
/// The synchronizer only ever holds handles; it never controls the player's
/// lifecycle. Every call is synchronous and may fail while the player is
/// buffering or gone.
pub trait PlayerHandle {
    /// Current playback position in seconds.
    fn current_time(&self) -> Result<f64, PlayerError>;

    /// Seek to `seconds`.
    ///
    /// Seeking to the position the player is already at must be harmless,
    /// since a correction can be re-issued before the previous one lands.
    fn set_current_time(&self, seconds: f64) -> Result<(), PlayerError>;

    fn play(&self) -> Result<(), PlayerError> {
        Ok(())
    }

    fn pause(&self) -> Result<(), PlayerError> {
        Ok(())
    }

    fn set_playback_rate(&self, _rate: f64) -> Result<(), PlayerError> {
        Ok(())
    }
}

impl<P: PlayerHandle + ?Sized> PlayerHandle for &P {
    fn current_time(&self) -> Result<f64, PlayerError> {
        (**self).current_time()
    }

    fn set_current_time(&self, seconds: f64) -> Result<(), PlayerError> {
        (**self).set_current_time(seconds)
    }

    fn play(&self) -> Result<(), PlayerError> {
        (**self).play()
    }

    fn pause(&self) -> Result<(), PlayerError> {
        (**self).pause()
    }

    fn set_playback_rate(&self, rate: f64) -> Result<(), PlayerError> {
        (**self).set_playback_rate(rate)
    }
}

impl<P: PlayerHandle + ?Sized> PlayerHandle for Rc<P> {
    fn current_time(&self) -> Result<f64, PlayerError> {
        (**self).current_time()
    }

    fn set_current_time(&self, seconds: f64) -> Result<(), PlayerError> {
        (**self).set_current_time(seconds)
    }

    fn play(&self) -> Result<(), PlayerError> {
        (**self).play()
    }

    fn pause(&self) -> Result<(), PlayerError> {
        (**self).pause()
    }

    fn set_playback_rate(&self, rate: f64) -> Result<(), PlayerError> {
        (**self).set_playback_rate(rate)
    }
}

/// Error from a player operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayerError {
    #[error("player is not responding")]
    Unavailable,

    #[error("position {0}s is not buffered yet")]
    NotBuffered(f64),

    #[error("player operation failed: {0}")]
    Failed(String),
}

/// Notifications the host forwards from the master player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// Periodic position update during playback
    TimeUpdate,
    /// The user (or the host) moved the playhead
    Seeked,
    Play,
    Pause,
    RateChange(f64),
}
