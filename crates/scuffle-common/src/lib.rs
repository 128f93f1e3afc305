//! # Scuffle Common
//!
//! Common types, utilities, and shared abstractions for the Scuffle fighter core.
//!
//! This crate provides foundational types used across all Scuffle crates:
//! - Geometry (axis-aligned rects, translation, mirroring)
//! - ID types (player slots, sprite handles)
//! - Version information for tuning tables and replays
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod geometry;
pub mod ids;
pub mod version;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::ids::*;
    pub use crate::version::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_box_sits_on_position() {
        let body = collision_box_rect(0.6, 1.4);
        let placed = translate(body, Vec2::new(2.0, 0.0));

        assert!((placed.center_x() - 2.0).abs() < 1e-6);
        assert_eq!(placed.y_min(), 0.0);
    }

    #[test]
    fn test_player_slot_opponent() {
        assert_eq!(PlayerSlot::P1.opponent(), PlayerSlot::P2);
        assert_eq!(PlayerSlot::P2.opponent(), PlayerSlot::P1);
    }

    #[test]
    fn test_version_compatibility() {
        let v1 = SchemaVersion::new(1, 0, 0);
        let v2 = SchemaVersion::new(1, 1, 0);
        let v3 = SchemaVersion::new(2, 0, 0);

        assert!(v2.is_compatible_with(&v1));
        assert!(!v1.is_compatible_with(&v3));
    }
}
