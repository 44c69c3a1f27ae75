//! Authored animation data as handed over by a loader.
//!
//! These types are plain values: cloning one yields a fully independent copy.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::mainline::Mainline;
use crate::timeline::Timeline;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimationData {
    pub name: String,
    /// Length in milliseconds.
    pub length: u32,
    #[serde(default)]
    pub looping: bool,
    pub mainline: Mainline,
    pub timelines: Vec<Timeline>,
}

impl AnimationData {
    /// Validate structural invariants: non-zero length, dense timeline ids,
    /// unique timeline names, sorted keys and resolvable mainline refs.
    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.length == 0 {
            return Err(AnimationError::ZeroLength {
                animation: self.name.clone(),
            });
        }
        let mut names = HashSet::with_capacity(self.timelines.len());
        for (position, timeline) in self.timelines.iter().enumerate() {
            if timeline.id.index() != position {
                return Err(AnimationError::TimelineIdMismatch {
                    timeline: timeline.name.clone(),
                    id: timeline.id.0,
                    position,
                });
            }
            if !names.insert(timeline.name.as_str()) {
                return Err(AnimationError::DuplicateTimelineName {
                    animation: self.name.clone(),
                    timeline: timeline.name.clone(),
                });
            }
            timeline.validate(&self.name, self.length)?;
        }
        self.mainline.validate(&self.name, &self.timelines)
    }
}

/// A named group of animations sharing the same parts.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityData {
    pub name: String,
    #[serde(default)]
    pub animations: Vec<AnimationData>,
}
