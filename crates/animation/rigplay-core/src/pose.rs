//! Part poses and parent-space composition.

use serde::{Deserialize, Serialize};

use crate::ids::AssetRef;

/// 2D vector.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

fn unit_scale() -> Vec2 {
    Vec2::ONE
}

/// Transform of one part, local to its parent until [`PartPose::unmap`] is
/// applied. Angles are radians and may exceed one turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PartPose {
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub angle: f32,
    #[serde(default = "unit_scale")]
    pub scale: Vec2,
    /// Normalized drawing origin; carried through composition unchanged.
    #[serde(default)]
    pub pivot: Vec2,
}

impl Default for PartPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartPose {
    pub const IDENTITY: PartPose = PartPose {
        position: Vec2::ZERO,
        angle: 0.0,
        scale: Vec2::ONE,
        pivot: Vec2::ZERO,
    };

    /// Compose this local pose into `parent`'s space.
    ///
    /// Scale multiplies, the angle accumulates (mirrored when the parent is
    /// flipped on exactly one axis) and the position is scaled, rotated by the
    /// parent angle and then offset by the parent position.
    pub fn unmap(&mut self, parent: &PartPose) {
        let flip = parent.scale.x.signum() * parent.scale.y.signum();
        self.angle = self.angle * flip + parent.angle;

        self.scale.x *= parent.scale.x;
        self.scale.y *= parent.scale.y;

        let px = self.position.x * parent.scale.x;
        let py = self.position.y * parent.scale.y;
        let (sin, cos) = parent.angle.sin_cos();
        self.position.x = px * cos - py * sin + parent.position.x;
        self.position.y = px * sin + py * cos + parent.position.y;
    }

    /// Owned variant of [`PartPose::unmap`].
    pub fn unmapped(mut self, parent: &PartPose) -> Self {
        self.unmap(parent);
        self
    }
}

/// Sprite-only attributes of a part.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpritePart {
    #[serde(flatten)]
    pub pose: PartPose,
    #[serde(default = "full_alpha")]
    pub alpha: f32,
    pub asset: AssetRef,
}

fn full_alpha() -> f32 {
    1.0
}

/// A bone (pose only) or a sprite (pose + alpha + asset).
///
/// Used both for authored key payloads and for pose-buffer slots.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Part {
    Bone(PartPose),
    Sprite(SpritePart),
}

impl Part {
    #[inline]
    pub fn pose(&self) -> &PartPose {
        match self {
            Part::Bone(pose) => pose,
            Part::Sprite(sprite) => &sprite.pose,
        }
    }

    #[inline]
    pub fn pose_mut(&mut self) -> &mut PartPose {
        match self {
            Part::Bone(pose) => pose,
            Part::Sprite(sprite) => &mut sprite.pose,
        }
    }

    #[inline]
    pub fn sprite(&self) -> Option<&SpritePart> {
        match self {
            Part::Sprite(sprite) => Some(sprite),
            Part::Bone(_) => None,
        }
    }

    #[inline]
    pub fn sprite_mut(&mut self) -> Option<&mut SpritePart> {
        match self {
            Part::Sprite(sprite) => Some(sprite),
            Part::Bone(_) => None,
        }
    }

    #[inline]
    pub fn is_sprite(&self) -> bool {
        matches!(self, Part::Sprite(_))
    }
}
