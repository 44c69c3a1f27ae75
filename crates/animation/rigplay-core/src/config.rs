//! Playback configuration.

use serde::{Deserialize, Serialize};

/// Initial playback state applied to freshly built animations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial speed multiplier.
    pub speed: f32,
    /// Initial animation-wide alpha.
    pub alpha: f32,
    /// Step used by [`Animation::tick`](crate::Animation::tick), in milliseconds.
    pub frame_delta_ms: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            alpha: 1.0,
            frame_delta_ms: 1000.0 / 60.0,
        }
    }
}
