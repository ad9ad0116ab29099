use std::fmt;

/// Offset hex address of a single grid cell.
///
/// `x` is the column, `z` is the row and `y` is the layer (always 0 on a flat
/// grid). Rows alternate between two neighbor offset tables, see
/// [`HexCoord::directions`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Neighbor offsets for cells on even rows (`z % 2 == 0`).
const EVEN_ROW_DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(0, 0, 1),
    HexCoord::new(1, 0, 1),
    HexCoord::new(1, 0, 0),
    HexCoord::new(1, 0, -1),
    HexCoord::new(0, 0, -1),
    HexCoord::new(-1, 0, 0),
];

/// Neighbor offsets for cells on odd rows.
const ODD_ROW_DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(-1, 0, 1),
    HexCoord::new(0, 0, 1),
    HexCoord::new(1, 0, 0),
    HexCoord::new(0, 0, -1),
    HexCoord::new(-1, 0, -1),
    HexCoord::new(-1, 0, 0),
];

impl HexCoord {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate on the flat layer (`y == 0`).
    pub const fn flat(x: i32, z: i32) -> Self {
        Self::new(x, 0, z)
    }

    /// Returns true when this cell sits on an even row.
    pub const fn is_even_row(self) -> bool {
        self.z.rem_euclid(2) == 0
    }

    /// Offset table for this cell's row parity.
    ///
    /// Even rows are shifted half a cell towards +x relative to odd rows, so
    /// the diagonal neighbors differ between the two tables. The tables must
    /// stay separate.
    pub const fn directions(self) -> &'static [HexCoord; 6] {
        if self.is_even_row() {
            &EVEN_ROW_DIRECTIONS
        } else {
            &ODD_ROW_DIRECTIONS
        }
    }

    /// All six candidate neighbors, whether or not a tile exists there.
    pub fn neighbor_candidates(self) -> [HexCoord; 6] {
        (*self.directions()).map(|offset| self + offset)
    }

    /// Converts to cube coordinates `(q, r, s)` with `q + r + s == 0`.
    pub const fn to_cube(self) -> (i32, i32, i32) {
        let q = self.x - ((self.z + self.z.rem_euclid(2)) >> 1);
        let r = self.z;
        (q, r, -q - r)
    }

    /// Number of hex steps between two cells, ignoring terrain and layer.
    pub fn distance(self, other: HexCoord) -> u32 {
        let (q1, r1, s1) = self.to_cube();
        let (q2, r2, s2) = other.to_cube();
        let dq = (q1 - q2).unsigned_abs();
        let dr = (r1 - r2).unsigned_abs();
        let ds = (s1 - s2).unsigned_abs();
        dq.max(dr).max(ds)
    }
}

impl std::ops::Add for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// World-space position as seen by the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPosition {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Fixed per-axis spacing between cell centers in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexLayout {
    pub x_offset: f32,
    pub y_offset: f32,
    pub z_offset: f32,
}

impl HexLayout {
    pub const DEFAULT: Self = Self {
        x_offset: 2.0,
        y_offset: 1.0,
        z_offset: 1.73,
    };

    /// Rounds a world position to the nearest coordinate.
    ///
    /// No tile needs to exist at the result.
    pub fn coordinate_of(&self, position: WorldPosition) -> HexCoord {
        HexCoord::new(
            (position.x / self.x_offset).round() as i32,
            (position.y / self.y_offset).round() as i32,
            (position.z / self.z_offset).round() as i32,
        )
    }

    /// World position of a cell center.
    pub fn world_of(&self, coord: HexCoord) -> WorldPosition {
        WorldPosition::new(
            coord.x as f32 * self.x_offset,
            coord.y as f32 * self.y_offset,
            coord.z as f32 * self.z_offset,
        )
    }
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
