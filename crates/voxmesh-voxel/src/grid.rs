//! Dense boolean occupancy grid.
//!
//! The grid is a cube of side `size` stored as one owned buffer. Power-of-two
//! grids address cells with the bit-packed index `x | y << B | z << 2B`; any
//! other size falls back to `x + y*size + z*size*size`. For power-of-two sizes
//! both layouts are the same, so the choice only affects how the index is
//! computed. Every access is bounds-checked first: a coordinate outside
//! `[0, size)` is an error, never an alias of another cell.

use rayon::prelude::*;
use voxmesh_core::constants::MAX_FIELD_BITS;
use voxmesh_core::{CellPos, Error, Result};

/// How a grid turns coordinates into buffer offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridIndexing {
    /// `x | (y << bits) | (z << 2*bits)`; requires `size == 1 << bits`.
    BitPacked { bits: u32 },
    /// `x + y*size + z*size*size`.
    Linear,
}

/// Dense 3-D boolean store with bounded access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    size: u32,
    indexing: GridIndexing,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Allocate an empty grid of `size^3` cells.
    ///
    /// Power-of-two sizes use bit-packed indexing.
    pub fn new(size: u32) -> Result<Self> {
        let indexing = if size.is_power_of_two() {
            GridIndexing::BitPacked {
                bits: size.trailing_zeros(),
            }
        } else {
            GridIndexing::Linear
        };
        Self::allocate(size, indexing)
    }

    /// Allocate an empty grid of side `2^bits`.
    pub fn with_field_bits(bits: u32) -> Result<Self> {
        if bits > MAX_FIELD_BITS {
            return Err(Error::config("fieldBits", bits, "must be at most 10"));
        }
        Self::allocate(1 << bits, GridIndexing::BitPacked { bits })
    }

    /// Allocate an empty grid that always uses linear indexing.
    pub fn linear(size: u32) -> Result<Self> {
        Self::allocate(size, GridIndexing::Linear)
    }

    fn allocate(size: u32, indexing: GridIndexing) -> Result<Self> {
        if size == 0 {
            return Err(Error::config("size", size, "grid must hold at least one cell"));
        }
        let cells = u128::from(size).pow(3);
        let len = usize::try_from(cells).map_err(|_| Error::Allocation { cells })?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| Error::Allocation { cells })?;
        buffer.resize(len, false);

        tracing::trace!(size, ?indexing, "allocated occupancy grid");

        Ok(Self {
            size,
            indexing,
            cells: buffer,
        })
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Indexing scheme in use.
    #[inline]
    pub fn indexing(&self) -> GridIndexing {
        self.indexing
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid holds at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the coordinate lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        let size = self.size as i64;
        (0..size).contains(&(x as i64))
            && (0..size).contains(&(y as i64))
            && (0..size).contains(&(z as i64))
    }

    #[inline]
    fn index(&self, x: i32, y: i32, z: i32) -> Result<usize> {
        if !self.contains(x, y, z) {
            return Err(Error::IndexOutOfRange {
                x,
                y,
                z,
                size: self.size,
            });
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        Ok(match self.indexing {
            GridIndexing::BitPacked { bits } => x | (y << bits) | (z << (bits << 1)),
            GridIndexing::Linear => {
                let size = self.size as usize;
                x + y * size + z * size * size
            }
        })
    }

    /// Read a cell.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Result<bool> {
        Ok(self.cells[self.index(x, y, z)?])
    }

    /// Write a cell.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: bool) -> Result<()> {
        let index = self.index(x, y, z)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Read a cell by position.
    #[inline]
    pub fn get_cell(&self, pos: CellPos) -> Result<bool> {
        self.get(pos.x, pos.y, pos.z)
    }

    /// Write a cell by position.
    #[inline]
    pub fn set_cell(&mut self, pos: CellPos, value: bool) -> Result<()> {
        self.set(pos.x, pos.y, pos.z, value)
    }

    /// Overwrite every cell with `f(x, y, z)`.
    ///
    /// Z-slabs are filled in parallel. Both indexing schemes lay a slab out as
    /// `x + y*size`, so the result does not depend on the scheme.
    pub fn fill_with<F>(&mut self, f: F)
    where
        F: Fn(i32, i32, i32) -> bool + Sync,
    {
        let size = self.size as usize;
        self.cells
            .par_chunks_mut(size * size)
            .enumerate()
            .for_each(|(z, slab)| {
                for (offset, cell) in slab.iter_mut().enumerate() {
                    let x = offset % size;
                    let y = offset / size;
                    *cell = f(x as i32, y as i32, z as i32);
                }
            });
    }

    /// Number of solid cells.
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn power_of_two_uses_bit_packing() {
        let grid = OccupancyGrid::new(8).unwrap();
        assert_eq!(grid.indexing(), GridIndexing::BitPacked { bits: 3 });
        assert_eq!(grid.len(), 512);

        let grid = OccupancyGrid::new(6).unwrap();
        assert_eq!(grid.indexing(), GridIndexing::Linear);
        assert_eq!(grid.len(), 216);
    }

    #[test]
    fn set_then_get() {
        let mut grid = OccupancyGrid::with_field_bits(3).unwrap();
        assert!(!grid.get(1, 2, 3).unwrap());
        grid.set(1, 2, 3, true).unwrap();
        assert!(grid.get(1, 2, 3).unwrap());
        assert!(!grid.get(3, 2, 1).unwrap());
        assert_eq!(grid.count_occupied(), 1);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut grid = OccupancyGrid::new(8).unwrap();
        for (x, y, z) in [(8, 0, 0), (0, 8, 0), (0, 0, 8), (-1, 0, 0), (0, -1, 7), (i32::MIN, 0, 0)] {
            assert!(matches!(
                grid.get(x, y, z),
                Err(Error::IndexOutOfRange { size: 8, .. })
            ));
            assert!(matches!(
                grid.set(x, y, z, true),
                Err(Error::IndexOutOfRange { .. })
            ));
        }
        assert_eq!(grid.count_occupied(), 0);
    }

    #[test]
    fn overflowing_coordinate_does_not_alias() {
        // With 3 bits, (8, 0, 0) would pack to the same offset as (0, 1, 0).
        let mut grid = OccupancyGrid::with_field_bits(3).unwrap();
        let err = grid.set(8, 0, 0, true).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange {
                x: 8,
                y: 0,
                z: 0,
                size: 8
            }
        ));
        assert!(!grid.get(0, 1, 0).unwrap());

        grid.set(0, 1, 0, true).unwrap();
        assert!(grid.get(8, 0, 0).is_err());
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            OccupancyGrid::new(0),
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            OccupancyGrid::with_field_bits(MAX_FIELD_BITS + 1),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn oversized_grid_is_an_allocation_error() {
        // 2^21 per side is 2^63 cells, beyond any addressable buffer.
        assert!(matches!(
            OccupancyGrid::new(1 << 21),
            Err(Error::Allocation { .. })
        ));
        assert!(matches!(
            OccupancyGrid::linear(u32::MAX),
            Err(Error::Allocation { .. })
        ));
    }

    #[test]
    fn fill_with_matches_sequential_writes() {
        let rule = |x: i32, y: i32, z: i32| (x * 3 + y * 5 + z * 7) % 4 == 0;

        let mut filled = OccupancyGrid::new(6).unwrap();
        filled.fill_with(rule);

        let mut written = OccupancyGrid::new(6).unwrap();
        for z in 0..6 {
            for y in 0..6 {
                for x in 0..6 {
                    written.set(x, y, z, rule(x, y, z)).unwrap();
                }
            }
        }
        assert_eq!(filled, written);
    }

    proptest! {
        // Bit-packed and linear grids agree cell by cell.
        #[test]
        fn bit_packed_matches_linear(
            writes in proptest::collection::vec((0..16i32, 0..16i32, 0..16i32, any::<bool>()), 0..64),
        ) {
            let mut packed = OccupancyGrid::new(16).unwrap();
            let mut linear = OccupancyGrid::linear(16).unwrap();
            for &(x, y, z, v) in &writes {
                packed.set(x, y, z, v).unwrap();
                linear.set(x, y, z, v).unwrap();
            }
            for &(x, y, z, _) in &writes {
                prop_assert_eq!(packed.get(x, y, z).unwrap(), linear.get(x, y, z).unwrap());
            }
            prop_assert_eq!(packed.count_occupied(), linear.count_occupied());
        }
    }
}
