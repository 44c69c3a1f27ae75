//! Error types for animation construction and loading.
//!
//! Authored data is validated once, when an [`Animation`](crate::Animation) is
//! built. Every variant here describes a data bug; nothing is raised from
//! `update`.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    #[error("Animation '{animation}' has zero length")]
    ZeroLength { animation: String },

    #[error("Animation '{animation}' has no mainline keys")]
    EmptyMainline { animation: String },

    #[error("Mainline key {index} of '{animation}' is not strictly after its predecessor")]
    UnsortedMainline { animation: String, index: usize },

    #[error("Timeline '{timeline}' in '{animation}' has no keys")]
    EmptyTimeline { animation: String, timeline: String },

    /// Also raised for duplicate key times.
    #[error("Key {index} of timeline '{timeline}' in '{animation}' is not strictly after its predecessor")]
    UnsortedTimelineKeys {
        animation: String,
        timeline: String,
        index: usize,
    },

    #[error("Key time {time} of timeline '{timeline}' lies outside [0, {length}]")]
    KeyTimeOutOfRange {
        timeline: String,
        time: u32,
        length: u32,
    },

    #[error("Timeline '{timeline}' declares id {id} but sits at position {position}")]
    TimelineIdMismatch {
        timeline: String,
        id: u32,
        position: usize,
    },

    #[error("Timeline name '{timeline}' appears more than once in '{animation}'")]
    DuplicateTimelineName { animation: String, timeline: String },

    #[error("Key {index} of timeline '{timeline}' does not match the timeline's part kind")]
    PartKindMismatch { timeline: String, index: usize },

    #[error("Mainline key {key} of '{animation}' references missing timeline {timeline}")]
    DanglingTimelineRef {
        animation: String,
        key: usize,
        timeline: u32,
    },

    #[error("Mainline key {key} of '{animation}' references missing key {key_index} of timeline '{timeline}'")]
    DanglingKeyRef {
        animation: String,
        key: usize,
        timeline: String,
        key_index: usize,
    },

    /// The parent must be an earlier entry of the same mainline key.
    #[error("Object ref {object} of mainline key {key} in '{animation}' has parent {parent} which is not an earlier ref")]
    DanglingParentRef {
        animation: String,
        key: usize,
        object: usize,
        parent: usize,
    },

    #[error("Invalid curve: {reason}")]
    InvalidCurve { reason: String },

    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl AnimationError {
    /// Label for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Serialization { .. } => "serialization",
            Self::InvalidCurve { .. } => "curve",
            _ => "data",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
