//! rigplay core: 2D skeletal/sprite animation playback (renderer-agnostic).
//!
//! Authored data (mainline + timelines) goes in; an interpolated, hierarchy
//! resolved pose buffer comes out for any playback time. Loading file formats
//! and painting sprites are left to adapters.

pub mod animation;
pub mod config;
pub mod data;
pub mod entity;
pub mod error;
pub mod ids;
pub mod interp;
pub mod mainline;
pub mod pose;
pub mod render;
pub mod stored_entity;
pub mod timeline;

// Re-exports for consumers (adapters)
pub use animation::{Animation, Transformation};
pub use config::PlaybackConfig;
pub use data::{AnimationData, EntityData};
pub use entity::Entity;
pub use error::AnimationError;
pub use ids::{AssetRef, TimelineId};
pub use interp::{Curve, Spin};
pub use mainline::{Mainline, MainlineKey, ObjectRef};
pub use pose::{Part, PartPose, SpritePart, Vec2};
pub use render::{SpriteDraw, SpriteRenderer};
pub use stored_entity::{entity_to_json, parse_entity_json};
pub use timeline::{Timeline, TimelineKey, TimelineKind};

pub type Result<T> = core::result::Result<T, AnimationError>;
