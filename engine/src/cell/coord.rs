//! Cube Coordinates
//!
//! Integer cube coordinates `(q, r, s)` plus a layer index `h`.
//!
//! The constructor never trusts a caller-supplied `s`: it is always derived
//! as `-q - r`, so every `CellCoord` in the crate satisfies `q + r + s == 0`.
//! Square cells reuse the same type with `q` as column and `r` as row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical grid position.
///
/// Equality, hashing and ordering consider `(q, r, s, h)`, which is also the
/// canonical key of a cell inside a [`Grid`](crate::grid::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawCoord")]
pub struct CellCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
    pub h: i32,
}

/// Wire form of a coordinate. `s` is accepted but discarded on load.
#[derive(Deserialize)]
struct RawCoord {
    q: i32,
    r: i32,
    #[serde(default)]
    #[allow(dead_code)]
    s: Option<i32>,
    #[serde(default)]
    h: i32,
}

impl From<RawCoord> for CellCoord {
    fn from(raw: RawCoord) -> Self {
        CellCoord::new(raw.q, raw.r, raw.h)
    }
}

impl CellCoord {
    /// The origin on layer 0.
    pub const ORIGIN: CellCoord = CellCoord { q: 0, r: 0, s: 0, h: 0 };

    /// Creates a coordinate, deriving `s = -q - r`.
    pub const fn new(q: i32, r: i32, h: i32) -> Self {
        Self { q, r, s: -q - r, h }
    }

    /// Creates a coordinate on layer 0.
    pub const fn flat(q: i32, r: i32) -> Self {
        Self::new(q, r, 0)
    }

    /// Same `(q, r)` on another layer.
    pub const fn with_h(self, h: i32) -> Self {
        Self::new(self.q, self.r, h)
    }

    /// Component-wise sum of the planar part. Keeps this coordinate's layer.
    pub const fn add(self, offset: CellCoord) -> Self {
        Self::new(self.q + offset.q, self.r + offset.r, self.h)
    }

    /// [`add`](Self::add) that returns `None` instead of overflowing `q`,
    /// `r` or the derived `s`.
    pub fn checked_add(self, offset: CellCoord) -> Option<Self> {
        let q = self.q.checked_add(offset.q)?;
        let r = self.r.checked_add(offset.r)?;
        q.checked_neg()?.checked_sub(r)?;
        Some(Self::new(q, r, self.h))
    }

    /// Component-wise difference of the planar part. Keeps this coordinate's layer.
    pub const fn sub(self, other: CellCoord) -> Self {
        Self::new(self.q - other.q, self.r - other.r, self.h)
    }

    /// Scales the planar part by `k`.
    pub const fn scale(self, k: i32) -> Self {
        Self::new(self.q * k, self.r * k, self.h)
    }

    /// Returns `true` when `q + r + s == 0`.
    ///
    /// Always true for values built through this module; kept for
    /// assertions on data that came from elsewhere.
    pub const fn is_valid(&self) -> bool {
        self.q + self.r + self.s == 0
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {} @{})", self.q, self.r, self.s, self.h)
    }
}
