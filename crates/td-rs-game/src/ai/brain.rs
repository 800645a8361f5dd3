//! Brain ECS component — owns a creature's behavior implementation.

use bevy_ecs::prelude::*;

use super::behavior::CreatureBehavior;

/// One-to-one holder for the boxed behavior. The creature owns its brain;
/// brains never share state.
#[derive(Component)]
pub struct Brain(pub Box<dyn CreatureBehavior>);

impl std::fmt::Debug for Brain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Brain").field(&self.0).finish()
    }
}
