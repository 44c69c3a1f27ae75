//! Animation playback: time advance, mainline resolution, per-timeline
//! tweening and composition into the pose buffer.

use std::fmt;

use hashbrown::HashMap;
use log::{debug, trace, warn};

use crate::config::PlaybackConfig;
use crate::data::AnimationData;
use crate::error::AnimationError;
use crate::ids::{AssetRef, TimelineId};
use crate::mainline::{Mainline, MainlineKey, ObjectRef};
use crate::pose::{Part, PartPose};
use crate::render::{SpriteDraw, SpriteRenderer};
use crate::timeline::Timeline;

/// Hook run on a tweened part (still in local space) before composition.
pub type Transformation = Box<dyn Fn(&mut Part) + Send + Sync>;

/// A playable animation: authored data plus its pose buffer and playback state.
///
/// Construction validates the data and prepares the pose buffer, so every
/// `Animation` is ready for [`update`](Self::update).
pub struct Animation {
    data: AnimationData,
    by_name: HashMap<String, TimelineId>,

    // Pose buffer, one slot per timeline.
    parts: Vec<Part>,
    active: Vec<bool>,
    draw_order: Vec<TimelineId>,

    transformations: HashMap<String, Transformation>,
    root: PartPose,

    /// Milliseconds.
    time: f32,
    speed: f32,
    alpha: f32,
    frame_delta_ms: f32,
}

/// Map `t` into the playable range: wrapped into [0, length) when looping,
/// clamped into [0, length] otherwise.
fn wrap_time(t: f32, length: f32, looping: bool) -> f32 {
    if t.is_nan() {
        return 0.0;
    }
    if !looping {
        return t.clamp(0.0, length);
    }
    if !t.is_finite() {
        return 0.0;
    }
    let m = t.rem_euclid(length);
    // rem_euclid can round up to `length` for tiny negative inputs
    if m >= length {
        0.0
    } else {
        m
    }
}

impl Animation {
    pub fn new(data: AnimationData) -> Result<Self, AnimationError> {
        Self::with_config(data, &PlaybackConfig::default())
    }

    pub fn with_config(data: AnimationData, cfg: &PlaybackConfig) -> Result<Self, AnimationError> {
        data.validate()?;

        let mut anim = Self {
            by_name: HashMap::with_capacity(data.timelines.len()),
            parts: Vec::with_capacity(data.timelines.len()),
            active: vec![false; data.timelines.len()],
            draw_order: Vec::new(),
            transformations: HashMap::new(),
            root: PartPose::IDENTITY,
            time: 0.0,
            speed: cfg.speed,
            alpha: cfg.alpha,
            frame_delta_ms: cfg.frame_delta_ms,
            data,
        };
        anim.prepare();
        Ok(anim)
    }

    /// Size the pose buffer and build the z-ordered sprite list.
    fn prepare(&mut self) {
        self.by_name.clear();
        self.parts.clear();
        self.draw_order.clear();

        for timeline in &self.data.timelines {
            self.by_name.insert(timeline.name.clone(), timeline.id);
            // Seed each slot with the first key so the variant matches the timeline kind.
            self.parts.push(timeline.keys[0].part.clone());
            if timeline.is_sprite() {
                self.draw_order.push(timeline.id);
            }
        }
        let timelines = &self.data.timelines;
        self.draw_order
            .sort_by_key(|id| timelines[id.index()].z_index().unwrap_or_default());
        self.active = vec![false; self.parts.len()];

        debug!(
            "prepared animation '{}': {} timelines, {} sprites, {} mainline keys",
            self.data.name,
            self.parts.len(),
            self.draw_order.len(),
            self.data.mainline.keys.len()
        );
    }

    /// Advance by `delta` milliseconds (scaled by speed) and refresh the pose buffer.
    pub fn update(&mut self, delta: f32) {
        self.set_time(self.time + self.speed * delta);
        self.apply_pose();
    }

    /// Advance by the configured frame delta.
    pub fn tick(&mut self) {
        self.update(self.frame_delta_ms);
    }

    /// Rewind to zero and refresh the pose buffer.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.update(0.0);
    }

    fn apply_pose(&mut self) {
        let Self {
            data,
            parts,
            active,
            transformations,
            root,
            time,
            ..
        } = self;

        let main_key = data.mainline.key_before_time(*time, data.looping);
        trace!(
            "'{}' t={} -> mainline key @{} ({} objects)",
            data.name,
            time,
            main_key.time,
            main_key.objects.len()
        );

        active.fill(false);
        for object in &main_key.objects {
            // Parents precede children, so the parent slot is already in world space.
            let parent = match object.parent {
                Some(p) => *parts[main_key.objects[p].timeline.index()].pose(),
                None => *root,
            };
            let timeline = &data.timelines[object.timeline.index()];
            let slot = &mut parts[object.timeline.index()];

            tween_part(data, main_key, object, *time, slot);
            if let Some(transform) = transformations.get(timeline.name.as_str()) {
                transform(&mut *slot);
            }
            slot.pose_mut().unmap(&parent);
            active[object.timeline.index()] = true;
        }
    }

    /// Paint the visible sprites in ascending z order. Sprite slots that the
    /// current mainline key does not reference are skipped.
    pub fn draw<R: SpriteRenderer + ?Sized>(&self, renderer: &mut R) {
        for id in &self.draw_order {
            if !self.active[id.index()] {
                continue;
            }
            if let Some(sprite) = self.parts[id.index()].sprite() {
                renderer.draw_sprite(SpriteDraw {
                    timeline: *id,
                    name: &self.data.timelines[id.index()].name,
                    pose: &sprite.pose,
                    asset: &sprite.asset,
                    alpha: self.alpha * sprite.alpha,
                });
            }
        }
    }

    /// Overwrite the asset on every sprite key of timelines named `timeline`.
    /// Returns the number of keys touched.
    pub fn set_asset(&mut self, timeline: &str, asset: &AssetRef) -> usize {
        self.data
            .timelines
            .iter_mut()
            .filter(|t| t.name == timeline)
            .map(|t| t.set_asset(asset))
            .sum()
    }

    /// Register a hook for the timeline named `timeline`, replacing any previous one.
    pub fn set_transformation<F>(&mut self, timeline: &str, f: F)
    where
        F: Fn(&mut Part) + Send + Sync + 'static,
    {
        self.transformations
            .insert(timeline.to_string(), Box::new(f));
    }

    pub fn remove_transformation(&mut self, timeline: &str) -> bool {
        self.transformations.remove(timeline).is_some()
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = wrap_time(time, self.data.length as f32, self.data.looping);
    }

    /// Current time in milliseconds.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// True once a non-looping animation has reached its end.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.time == self.data.length as f32
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    #[inline]
    pub fn length(&self) -> u32 {
        self.data.length
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.data.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.data.looping = looping;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    pub fn root(&self) -> &PartPose {
        &self.root
    }

    /// Pose every parentless part is composed into.
    pub fn root_mut(&mut self) -> &mut PartPose {
        &mut self.root
    }

    /// The pose buffer, indexed by timeline id.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, id: TimelineId) -> Option<&Part> {
        self.parts.get(id.index())
    }

    /// Pose-buffer slot of the timeline named `name`.
    pub fn part_by_name(&self, name: &str) -> Option<&Part> {
        self.by_name.get(name).and_then(|id| self.part(*id))
    }

    /// Whether the timeline was driven by the mainline key of the last update.
    pub fn is_active(&self, id: TimelineId) -> bool {
        self.active.get(id.index()).copied().unwrap_or(false)
    }

    /// Sprite timelines in ascending z order.
    pub fn draw_order(&self) -> &[TimelineId] {
        &self.draw_order
    }

    pub fn timelines(&self) -> &[Timeline] {
        &self.data.timelines
    }

    pub fn timeline(&self, name: &str) -> Option<&Timeline> {
        self.by_name
            .get(name)
            .map(|id| &self.data.timelines[id.index()])
    }

    pub fn mainline(&self) -> &Mainline {
        &self.data.mainline
    }

    pub fn data(&self) -> &AnimationData {
        &self.data
    }
}

/// Interpolate the local pose for `object` into `slot`.
fn tween_part(
    data: &AnimationData,
    main_key: &MainlineKey,
    object: &ObjectRef,
    time: f32,
    slot: &mut Part,
) {
    let timeline = &data.timelines[object.timeline.index()];
    let key = &timeline.keys[object.key];
    let length = data.length as f32;

    let (next, time_of_next) = if object.key + 1 == timeline.keys.len() {
        if !data.looping {
            // Last key of a one-shot: hold it.
            slot.clone_from(&key.part);
            return;
        }
        let first = &timeline.keys[0];
        (first, first.time as f32 + length)
    } else {
        let next = &timeline.keys[object.key + 1];
        (next, next.time as f32)
    };

    let key_time = key.time as f32;
    let mut elapsed = time - key_time;
    if elapsed < 0.0 && data.looping {
        // The mainline wrapped back to the previous loop's last key.
        elapsed += length;
    }
    let span = time_of_next - key_time;
    let raw = if span > 0.0 {
        elapsed / span
    } else {
        warn!(
            "timeline '{}' key {} has an empty interpolation window",
            timeline.name, object.key
        );
        0.0
    };
    let ratio = main_key.curve.ease(raw);

    let curve = &key.curve;
    let from = key.part.pose();
    let to = next.part.pose();
    *slot.pose_mut() = PartPose {
        position: curve.interpolate_vec2(from.position, to.position, ratio),
        angle: curve.interpolate_angle(from.angle, to.angle, ratio, key.spin),
        scale: curve.interpolate_vec2(from.scale, to.scale, ratio),
        pivot: curve.interpolate_vec2(from.pivot, to.pivot, ratio),
    };

    if let (Some(dst), Some(a), Some(b)) = (slot.sprite_mut(), key.part.sprite(), next.part.sprite())
    {
        dst.alpha = curve.interpolate(a.alpha, b.alpha, ratio);
        // Assets switch at key boundaries only.
        dst.asset.clone_from(&a.asset);
    }
}

/// Deep copy of the authored data and playback state. Transformation hooks
/// belong to the original and are not carried over.
impl Clone for Animation {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            by_name: self.by_name.clone(),
            parts: self.parts.clone(),
            active: self.active.clone(),
            draw_order: self.draw_order.clone(),
            transformations: HashMap::new(),
            root: self.root,
            time: self.time,
            speed: self.speed,
            alpha: self.alpha,
            frame_delta_ms: self.frame_delta_ms,
        }
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("name", &self.data.name)
            .field("length", &self.data.length)
            .field("looping", &self.data.looping)
            .field("time", &self.time)
            .field("speed", &self.speed)
            .field("alpha", &self.alpha)
            .field("timelines", &self.data.timelines.len())
            .field(
                "transformations",
                &self.transformations.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
