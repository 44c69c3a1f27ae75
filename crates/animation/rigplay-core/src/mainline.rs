//! Mainline: which timeline keys are active at each breakpoint and how they
//! are parented.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::ids::TimelineId;
use crate::interp::Curve;
use crate::timeline::Timeline;

/// Binds one timeline key to an optional parent for the span of a mainline key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectRef {
    pub timeline: TimelineId,
    /// Index into the timeline's `keys`.
    pub key: usize,
    /// Index of the parent within the same mainline key's `objects`. Must
    /// point to an earlier entry.
    #[serde(default)]
    pub parent: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MainlineKey {
    pub time: u32,
    /// Reshapes the time ratio before the timeline keys' own curves apply.
    #[serde(default)]
    pub curve: Curve,
    /// Parents precede children.
    pub objects: Vec<ObjectRef>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Mainline {
    pub keys: Vec<MainlineKey>,
}

impl Mainline {
    pub fn new(keys: Vec<MainlineKey>) -> Self {
        Self { keys }
    }

    /// Last key with `time <= t`. Before the first key this yields the last
    /// key when looping (the previous loop is still running) and the first
    /// key otherwise.
    ///
    /// Panics if the mainline is empty; built animations always have a key.
    pub fn key_before_time(&self, t: f32, looping: bool) -> &MainlineKey {
        let after = self.keys.partition_point(|k| k.time as f32 <= t);
        match after {
            0 if looping => &self.keys[self.keys.len() - 1],
            0 => &self.keys[0],
            n => &self.keys[n - 1],
        }
    }

    /// Check ordering and that every ref resolves against `timelines`.
    pub fn validate(&self, animation: &str, timelines: &[Timeline]) -> Result<(), AnimationError> {
        if self.keys.is_empty() {
            return Err(AnimationError::EmptyMainline {
                animation: animation.to_string(),
            });
        }
        for (index, key) in self.keys.iter().enumerate() {
            if index > 0 && key.time <= self.keys[index - 1].time {
                return Err(AnimationError::UnsortedMainline {
                    animation: animation.to_string(),
                    index,
                });
            }
            key.curve.validate()?;
            for (object, r) in key.objects.iter().enumerate() {
                let timeline = timelines.get(r.timeline.index()).ok_or_else(|| {
                    AnimationError::DanglingTimelineRef {
                        animation: animation.to_string(),
                        key: index,
                        timeline: r.timeline.0,
                    }
                })?;
                if r.key >= timeline.keys.len() {
                    return Err(AnimationError::DanglingKeyRef {
                        animation: animation.to_string(),
                        key: index,
                        timeline: timeline.name.clone(),
                        key_index: r.key,
                    });
                }
                if let Some(parent) = r.parent {
                    if parent >= object {
                        return Err(AnimationError::DanglingParentRef {
                            animation: animation.to_string(),
                            key: index,
                            object,
                            parent,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(time: u32) -> MainlineKey {
        MainlineKey {
            time,
            curve: Curve::Linear,
            objects: Vec::new(),
        }
    }

    fn mainline() -> Mainline {
        Mainline::new(vec![key(100), key(300), key(600)])
    }

    #[test]
    fn finds_last_key_at_or_before() {
        let m = mainline();
        assert_eq!(m.key_before_time(100.0, false).time, 100);
        assert_eq!(m.key_before_time(299.9, false).time, 100);
        assert_eq!(m.key_before_time(300.0, true).time, 300);
        assert_eq!(m.key_before_time(10_000.0, false).time, 600);
    }

    #[test]
    fn before_first_key_depends_on_looping() {
        let m = mainline();
        assert_eq!(m.key_before_time(50.0, true).time, 600);
        assert_eq!(m.key_before_time(50.0, false).time, 100);
    }

    #[test]
    fn parent_must_come_first() {
        let m = Mainline::new(vec![MainlineKey {
            time: 0,
            curve: Curve::Linear,
            objects: vec![ObjectRef {
                timeline: TimelineId(0),
                key: 0,
                parent: Some(0),
            }],
        }]);
        let tl = Timeline {
            id: TimelineId(0),
            name: "root".into(),
            kind: Default::default(),
            keys: vec![crate::timeline::TimelineKey {
                time: 0,
                curve: Curve::Linear,
                spin: Default::default(),
                part: crate::pose::Part::Bone(Default::default()),
            }],
        };
        assert!(matches!(
            m.validate("idle", &[tl]),
            Err(AnimationError::DanglingParentRef { object: 0, parent: 0, .. })
        ));
    }

    #[test]
    fn unsorted_and_empty_mainlines_are_rejected() {
        let m = Mainline::new(vec![key(100), key(100)]);
        assert!(matches!(
            m.validate("idle", &[]),
            Err(AnimationError::UnsortedMainline { index: 1, .. })
        ));
        assert!(matches!(
            Mainline::default().validate("idle", &[]),
            Err(AnimationError::EmptyMainline { .. })
        ));
    }
}
