//! Renderer seam. The core never touches pixels; it hands each visible sprite
//! slot, in draw order, to a [`SpriteRenderer`].

use crate::ids::{AssetRef, TimelineId};
use crate::pose::PartPose;

/// One sprite ready to be painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteDraw<'a> {
    pub timeline: TimelineId,
    pub name: &'a str,
    /// World-space pose.
    pub pose: &'a PartPose,
    pub asset: &'a AssetRef,
    /// Animation alpha multiplied by the slot's tweened alpha.
    pub alpha: f32,
}

/// Implemented by adapters that own the actual drawing backend.
pub trait SpriteRenderer {
    fn draw_sprite(&mut self, sprite: SpriteDraw<'_>);
}

impl<F> SpriteRenderer for F
where
    F: FnMut(SpriteDraw<'_>),
{
    fn draw_sprite(&mut self, sprite: SpriteDraw<'_>) {
        self(sprite)
    }
}
