//! Hitbox data paired with its precomputed mirror image.

use crate::types::{Direction, HitBoxData};

/// A [`HitBoxData`] authored facing +x, plus its mirror for fighters facing -x.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientableHitbox {
    forward: HitBoxData,
    backward: HitBoxData,
}

impl OrientableHitbox {
    /// Wraps hitbox data and mirrors it once up front.
    #[must_use]
    pub fn new(data: HitBoxData) -> Self {
        let backward = data.mirrored();
        Self {
            forward: data,
            backward,
        }
    }

    /// Returns the variant for a facing. Only `Backward` selects the mirror.
    #[must_use]
    pub fn oriented(&self, facing: Direction) -> &HitBoxData {
        match facing {
            Direction::Backward => &self.backward,
            Direction::Forward | Direction::None => &self.forward,
        }
    }
}

impl From<HitBoxData> for OrientableHitbox {
    fn from(data: HitBoxData) -> Self {
        Self::new(data)
    }
}
