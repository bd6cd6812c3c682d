/// Single coordinate axis used for grid size and row/column positions.
pub type Coord = u8;

/// Count type used for cell totals and move counts.
pub type CellCount = u16;

/// Moves are counted in cells, same range.
pub type MoveCount = u16;

/// Score values can go negative on wrong reveals.
pub type Score = i32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}
