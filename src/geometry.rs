//! Placement geometry for a `width` x `height` grid.
//!
//! Cells are numbered row-major, `pos = row * width + col`. A placement is a
//! straight, gap-free run of cells lying inside a single row or a single
//! column. Enumerations over the empty grid depend only on the dimensions
//! and the ship length, so they are memoized per length.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::common::BoardError;

/// A ship-shaped run of cells, kept sorted ascending.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    cells: Vec<usize>,
}

impl Placement {
    /// Build a placement from arbitrary-order cells.
    pub fn new(mut cells: Vec<usize>) -> Self {
        cells.sort_unstable();
        Self { cells }
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.cells.binary_search(&pos).is_ok()
    }

    /// `true` if the two placements share a cell.
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.cells.iter().any(|&c| other.contains(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }
}

impl fmt::Debug for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Placement{:?}", self.cells)
    }
}

impl From<&[usize]> for Placement {
    fn from(cells: &[usize]) -> Self {
        Placement::new(cells.to_vec())
    }
}

/// Grid dimensions, derived row/column sets and the per-length placement cache.
#[derive(Clone)]
pub struct Geometry {
    width: usize,
    height: usize,
    rows: Vec<Vec<usize>>,
    columns: Vec<Vec<usize>>,
    cache: RefCell<BTreeMap<usize, Arc<[Placement]>>>,
}

impl Geometry {
    /// Derive row and column sets for a `width` x `height` grid. Dimensions
    /// are validated by the board.
    pub fn new(width: usize, height: usize) -> Self {
        let rows = (0..height)
            .map(|r| (r * width..(r + 1) * width).collect())
            .collect();
        let columns = (0..width)
            .map(|c| (0..height).map(|r| r * width + c).collect())
            .collect();
        Self {
            width,
            height,
            rows,
            columns,
            cache: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// `height` sets of `width` cells each.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// `width` sets of `height` cells each.
    pub fn columns(&self) -> &[Vec<usize>] {
        &self.columns
    }

    /// `(row, col)` of `pos`.
    pub fn row_col(&self, pos: usize) -> (usize, usize) {
        (pos / self.width, pos % self.width)
    }

    pub fn check_position(&self, pos: usize) -> Result<(), BoardError> {
        if pos < self.size() {
            Ok(())
        } else {
            Err(BoardError::OutOfRange {
                position: pos,
                size: self.size(),
            })
        }
    }

    /// Orthogonal neighbours of `pos`, clipped at the edges without wrapping.
    pub fn neighbors(&self, pos: usize) -> impl Iterator<Item = usize> {
        let (row, col) = self.row_col(pos);
        let width = self.width;
        let up = (row > 0).then(|| pos - width);
        let down = (row + 1 < self.height).then(|| pos + width);
        let left = (col > 0).then(|| pos - 1);
        let right = (col + 1 < width).then(|| pos + 1);
        [up, down, left, right].into_iter().flatten()
    }

    fn check_length(&self, length: usize) -> Result<(), BoardError> {
        if length == 0 {
            return Err(BoardError::InvalidPlacement { cells: Vec::new() });
        }
        if length > self.width && length > self.height {
            return Err(BoardError::ShipTooLong {
                length,
                max: self.width.max(self.height),
            });
        }
        Ok(())
    }

    /// Every legal placement of a ship of `length` on the empty grid, sorted
    /// and free of duplicates. Computed once per length.
    pub fn placements(&self, length: usize) -> Result<Arc<[Placement]>, BoardError> {
        if let Some(cached) = self.cache.borrow().get(&length) {
            return Ok(Arc::clone(cached));
        }
        self.check_length(length)?;

        let mut all: Vec<Placement> = self
            .rows
            .iter()
            .chain(self.columns.iter())
            .flat_map(|line| line.windows(length))
            .map(Placement::from)
            .collect();
        // a single cell is both a horizontal and a vertical run
        all.sort_unstable();
        all.dedup();

        log::trace!(
            "enumerated {} placements of length {} on {}x{}",
            all.len(),
            length,
            self.width,
            self.height
        );
        let all: Arc<[Placement]> = all.into();
        self.cache.borrow_mut().insert(length, Arc::clone(&all));
        Ok(all)
    }

    /// Every legal placement of a ship of `length` that covers `anchor`.
    pub fn placements_through(
        &self,
        length: usize,
        anchor: usize,
    ) -> Result<Vec<Placement>, BoardError> {
        self.check_position(anchor)?;
        self.check_length(length)?;
        let (row, col) = self.row_col(anchor);

        let mut out = Vec::new();
        let first = col.saturating_sub(length - 1);
        for start in first..=col {
            if start + length > self.width {
                break;
            }
            out.push(Placement::from(&self.rows[row][start..start + length]));
        }
        let first = row.saturating_sub(length - 1);
        for start in first..=row {
            if start + length > self.height {
                break;
            }
            out.push(Placement::from(&self.columns[col][start..start + length]));
        }
        out.sort_unstable();
        out.dedup();
        Ok(out)
    }
}

impl fmt::Debug for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Geometry")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cached_lengths", &self.cache.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}
