//! Per-kind brain assembly.

use super::behavior::CreatureBehavior;
use super::behaviors::{HoldPosition, SeekAndShoot, SeekRandomTarget};

/// Create the behavior implementation for a given creature kind.
///
/// Raiders and harriers share the same hunting policy; only the creature's
/// locomotion changes how the waypoint search treats terrain.
pub fn create_brain(type_id: &str) -> Box<dyn CreatureBehavior> {
    match type_id {
        "td:raider" | "td:harrier" => Box::new(SeekRandomTarget::new("td:golem")),
        "td:golem" => Box::new(SeekAndShoot::new(
            "td:raider",
            vec!["td:raider".into(), "td:harrier".into()],
            8.0,
            30,
        )),
        _ => Box::new(HoldPosition),
    }
}
