//! ID types for fighters and presentation resources.

use serde::{Deserialize, Serialize};

/// Which side of the match a fighter plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// Player one (starts on the left)
    P1,
    /// Player two (starts on the right)
    P2,
}

impl PlayerSlot {
    /// Both slots in tick order.
    pub const ALL: [Self; 2] = [Self::P1, Self::P2];

    /// The other slot.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }

    /// Index into per-slot arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::P1 => 0,
            Self::P2 => 1,
        }
    }
}

impl std::fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::P1 => write!(f, "P1"),
            Self::P2 => write!(f, "P2"),
        }
    }
}

/// Opaque handle to a sprite owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpriteId(pub u16);

impl SpriteId {
    /// Creates a sprite handle from a raw index.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index() {
        assert_eq!(PlayerSlot::P1.index(), 0);
        assert_eq!(PlayerSlot::P2.index(), 1);
        assert_eq!(PlayerSlot::ALL.len(), 2);
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(PlayerSlot::P2.to_string(), "P2");
    }
}
