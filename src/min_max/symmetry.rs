use enumset::{EnumSet, EnumSetType};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// The dihedral group of the square (D4), acting on an N×N grid.
#[derive(EnumIter, EnumSetType, Debug, Hash)]
#[enumset(repr = "u8")]
pub enum GridSymmetry {
    Identity,
    /// clockwise
    Rotate90,
    Rotate180,
    Rotate270,
    /// top row <-> bottom row
    FlipHorizontal,
    /// left column <-> right column
    FlipVertical,
    /// along the main diagonal (transpose)
    FlipDiagonal,
    FlipAntiDiagonal,
}

pub type GridSymmetries = EnumSet<GridSymmetry>;

impl GridSymmetry {
    /// Where the cell at `(row, col)` ends up after applying this symmetry.
    pub fn map(self, size: usize, row: usize, col: usize) -> (usize, usize) {
        debug_assert!(row < size && col < size);
        let last = size - 1;
        match self {
            GridSymmetry::Identity => (row, col),
            GridSymmetry::Rotate90 => (col, last - row),
            GridSymmetry::Rotate180 => (last - row, last - col),
            GridSymmetry::Rotate270 => (last - col, row),
            GridSymmetry::FlipHorizontal => (last - row, col),
            GridSymmetry::FlipVertical => (row, last - col),
            GridSymmetry::FlipDiagonal => (col, row),
            GridSymmetry::FlipAntiDiagonal => (last - col, last - row),
        }
    }

    pub fn map_index(self, size: usize, index: usize) -> usize {
        let (row, col) = self.map(size, index / size, index % size);
        row * size + col
    }

    /// Transformed copy of a row-major grid.
    pub fn apply<T: Copy>(self, size: usize, cells: &[T]) -> Vec<T> {
        debug_assert_eq!(cells.len(), size * size);
        let mut transformed = cells.to_vec();
        for (index, &cell) in cells.iter().enumerate() {
            transformed[self.map_index(size, index)] = cell;
        }
        transformed
    }

    /// All symmetries that map `cells` onto itself. Always contains the identity.
    pub fn invariants<T: Eq>(size: usize, cells: &[T]) -> GridSymmetries {
        GridSymmetry::iter()
            .filter(|symmetry| {
                cells.iter().enumerate().all(|(index, cell)| cells[symmetry.map_index(size, index)] == *cell)
            })
            .collect()
    }
}

/// The symmetries a concrete board is invariant under.
///
/// Invariant symmetries form a subgroup of D4, so the orbit of an index is just
/// its image under every member and the smallest image is a stable representative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSymmetry {
    size: usize,
    symmetries: GridSymmetries,
}

impl BoardSymmetry {
    pub fn of<T: Eq>(size: usize, cells: &[T]) -> Self {
        Self { size, symmetries: GridSymmetry::invariants(size, cells) }
    }

    pub fn canonicalize(&self, index: usize) -> usize {
        self.symmetries.iter()
            .map(|symmetry| symmetry.map_index(self.size, index))
            .min()
            .unwrap_or(index)
    }

    pub fn is_canonical(&self, index: usize) -> bool {
        self.canonicalize(index) == index
    }
}
