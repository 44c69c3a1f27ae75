//! Entity: a named set of animations over the same parts, with cross-cutting
//! asset and alpha changes.

use log::{debug, warn};

use crate::animation::Animation;
use crate::config::PlaybackConfig;
use crate::data::EntityData;
use crate::error::AnimationError;
use crate::ids::AssetRef;

#[derive(Clone, Debug, Default)]
pub struct Entity {
    name: String,
    animations: Vec<Animation>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            animations: Vec::new(),
        }
    }

    pub fn from_data(data: EntityData) -> Result<Self, AnimationError> {
        Self::from_data_with_config(data, &PlaybackConfig::default())
    }

    /// Build and validate every animation of `data`.
    pub fn from_data_with_config(
        data: EntityData,
        cfg: &PlaybackConfig,
    ) -> Result<Self, AnimationError> {
        let animations = data
            .animations
            .into_iter()
            .map(|anim| Animation::with_config(anim, cfg))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "built entity '{}' with {} animations",
            data.name,
            animations.len()
        );
        Ok(Self {
            name: data.name,
            animations,
        })
    }

    /// Authored data of every animation, suitable for serialization.
    pub fn to_data(&self) -> EntityData {
        EntityData {
            name: self.name.clone(),
            animations: self.animations.iter().map(|a| a.data().clone()).collect(),
        }
    }

    pub fn push(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    /// Replace the asset of every sprite key on timelines named `timeline`,
    /// across all animations. Returns the number of keys touched.
    pub fn set_asset(&mut self, timeline: &str, asset: impl Into<AssetRef>) -> usize {
        let asset = asset.into();
        let touched: usize = self
            .animations
            .iter_mut()
            .map(|a| a.set_asset(timeline, &asset))
            .sum();
        if touched == 0 {
            warn!(
                "entity '{}': no sprite keys on timeline '{}' to receive asset '{}'",
                self.name,
                timeline,
                asset.as_str()
            );
        }
        touched
    }

    /// Set the animation-wide alpha of every animation.
    pub fn set_alpha(&mut self, alpha: f32) {
        for animation in &mut self.animations {
            animation.set_alpha(alpha);
        }
    }

    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name() == name)
    }

    pub fn animation_mut(&mut self, name: &str) -> Option<&mut Animation> {
        self.animations.iter_mut().find(|a| a.name() == name)
    }

    /// Panics if `index` is out of range.
    pub fn animation_at(&self, index: usize) -> &Animation {
        &self.animations[index]
    }

    /// Panics if `index` is out of range.
    pub fn animation_at_mut(&mut self, index: usize) -> &mut Animation {
        &mut self.animations[index]
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn animations_mut(&mut self) -> &mut [Animation] {
        &mut self.animations
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
