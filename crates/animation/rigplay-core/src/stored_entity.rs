//! JSON interchange for whole entities.

use crate::data::EntityData;
use crate::entity::Entity;
use crate::error::AnimationError;

/// Parse an entity document (the serde form of [`EntityData`]) and build a
/// validated [`Entity`] from it.
pub fn parse_entity_json(s: &str) -> Result<Entity, AnimationError> {
    let data: EntityData = serde_json::from_str(s)?;
    Entity::from_data(data)
}

/// Serialize an entity's authored data back into the same document shape.
pub fn entity_to_json(entity: &Entity) -> Result<String, AnimationError> {
    Ok(serde_json::to_string_pretty(&entity.to_data())?)
}
