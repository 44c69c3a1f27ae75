//! Per-part keyframe tracks.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::ids::{AssetRef, TimelineId};
use crate::interp::{Curve, Spin};
use crate::pose::Part;

/// One keyframe of a timeline. `curve` eases towards the following key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TimelineKey {
    /// Milliseconds from the start of the animation.
    pub time: u32,
    #[serde(default)]
    pub curve: Curve,
    #[serde(default)]
    pub spin: Spin,
    pub part: Part,
}

/// Whether a timeline animates a bone or a drawable sprite.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineKind {
    #[default]
    Bone,
    Sprite {
        #[serde(default)]
        z_index: i32,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    /// Position of this timeline in its animation and in the pose buffer.
    pub id: TimelineId,
    pub name: String,
    #[serde(default)]
    pub kind: TimelineKind,
    pub keys: Vec<TimelineKey>,
}

impl Timeline {
    #[inline]
    pub fn is_sprite(&self) -> bool {
        matches!(self.kind, TimelineKind::Sprite { .. })
    }

    /// Draw order of a sprite timeline; `None` for bones.
    #[inline]
    pub fn z_index(&self) -> Option<i32> {
        match self.kind {
            TimelineKind::Sprite { z_index } => Some(z_index),
            TimelineKind::Bone => None,
        }
    }

    /// Overwrite the asset of every sprite key. Returns the number of keys touched.
    pub fn set_asset(&mut self, asset: &AssetRef) -> usize {
        let mut touched = 0;
        for key in &mut self.keys {
            if let Some(sprite) = key.part.sprite_mut() {
                sprite.asset = asset.clone();
                touched += 1;
            }
        }
        touched
    }

    /// Check key ordering, time range, part kinds and curves against the
    /// owning animation's length.
    pub fn validate(&self, animation: &str, length: u32) -> Result<(), AnimationError> {
        if self.keys.is_empty() {
            return Err(AnimationError::EmptyTimeline {
                animation: animation.to_string(),
                timeline: self.name.clone(),
            });
        }
        let sprite = self.is_sprite();
        let mut last: Option<u32> = None;
        for (index, key) in self.keys.iter().enumerate() {
            if key.time > length {
                return Err(AnimationError::KeyTimeOutOfRange {
                    timeline: self.name.clone(),
                    time: key.time,
                    length,
                });
            }
            if last.is_some_and(|prev| key.time <= prev) {
                return Err(AnimationError::UnsortedTimelineKeys {
                    animation: animation.to_string(),
                    timeline: self.name.clone(),
                    index,
                });
            }
            if key.part.is_sprite() != sprite {
                return Err(AnimationError::PartKindMismatch {
                    timeline: self.name.clone(),
                    index,
                });
            }
            key.curve.validate()?;
            last = Some(key.time);
        }
        Ok(())
    }
}
