//! Unordered pair of geometry objects tested against each other.

use super::GeomIndex;

/// Pair of distinct geometry indices, stored as `(min, max)`.
///
/// `CollisionPair::new(3, 1) == CollisionPair::new(1, 3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    first: GeomIndex,
    second: GeomIndex,
}

impl CollisionPair {
    /// Create a pair, normalizing the order of the two indices.
    ///
    /// Self pairs (`a == b`) are representable so that callers can report
    /// them; [`GeometryModel::add_collision_pair`] rejects them.
    ///
    /// [`GeometryModel::add_collision_pair`]: super::GeometryModel::add_collision_pair
    #[must_use]
    pub fn new(a: GeomIndex, b: GeomIndex) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }

    /// Smaller geometry index.
    #[must_use]
    pub const fn first(&self) -> GeomIndex {
        self.first
    }

    /// Larger geometry index.
    #[must_use]
    pub const fn second(&self) -> GeomIndex {
        self.second
    }

    /// Whether the pair names `geom_id`.
    #[must_use]
    pub const fn contains(&self, geom_id: GeomIndex) -> bool {
        self.first == geom_id || self.second == geom_id
    }

    /// The partner of `geom_id` in this pair, if `geom_id` is in it.
    #[must_use]
    pub const fn other(&self, geom_id: GeomIndex) -> Option<GeomIndex> {
        if self.first == geom_id {
            Some(self.second)
        } else if self.second == geom_id {
            Some(self.first)
        } else {
            None
        }
    }

    pub(crate) const fn is_self_pair(&self) -> bool {
        self.first == self.second
    }
}

impl From<(GeomIndex, GeomIndex)> for CollisionPair {
    fn from((a, b): (GeomIndex, GeomIndex)) -> Self {
        Self::new(a, b)
    }
}

impl std::fmt::Display for CollisionPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
