use crate::foundation::error::{ReelError, ReelResult};

/// Value domain of a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Levels {
    /// `{0, 1}`: blank / filled.
    Binary,
    /// `{0, 1, 2}`: blank / mid / dark.
    Ternary,
}

impl Levels {
    /// Largest cell value allowed by this domain.
    pub fn max_value(self) -> u8 {
        match self {
            Self::Binary => 1,
            Self::Ternary => 2,
        }
    }

    /// Non-zero values in ascending order.
    pub fn filled_values(self) -> std::ops::RangeInclusive<u8> {
        1..=self.max_value()
    }
}

/// Immutable rectangular puzzle grid, stored row-major.
///
/// Constructors validate the shape and the value domain, so every `Grid` in circulation is
/// non-empty, rectangular and in-domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    levels: Levels,
    cells: Vec<u8>,
}

impl Grid {
    /// Build a grid from a flat row-major buffer.
    pub fn from_cells(rows: usize, cols: usize, levels: Levels, cells: Vec<u8>) -> ReelResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(ReelError::invalid_input(format!(
                "grid must be non-empty, got {rows}x{cols}"
            )));
        }
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| ReelError::invalid_input("grid size overflows usize"))?;
        if cells.len() != expected {
            return Err(ReelError::invalid_input(format!(
                "grid buffer holds {} cells, expected {rows}x{cols}",
                cells.len()
            )));
        }
        let max = levels.max_value();
        if let Some(pos) = cells.iter().position(|&v| v > max) {
            return Err(ReelError::invalid_input(format!(
                "cell ({}, {}) has value {} outside the {:?} domain",
                pos / cols,
                pos % cols,
                cells[pos],
                levels
            )));
        }
        Ok(Self {
            rows,
            cols,
            levels,
            cells,
        })
    }

    /// Build a grid from nested rows. All rows must share the first row's length.
    pub fn from_rows<R: AsRef<[u8]>>(levels: Levels, rows: &[R]) -> ReelResult<Self> {
        let Some(first) = rows.first() else {
            return Err(ReelError::invalid_input("grid must have at least one row"));
        };
        let cols = first.as_ref().len();
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ReelError::invalid_input(format!(
                    "row {i} has {} cells, expected {cols}",
                    row.len()
                )));
            }
            cells.extend_from_slice(row);
        }
        Self::from_cells(rows.len(), cols, levels, cells)
    }

    /// Number of rows (R).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (C).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value domain.
    pub fn levels(&self) -> Levels {
        self.levels
    }

    /// Value at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Row-major cell buffer.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Borrow row `i`.
    pub fn row(&self, i: usize) -> &[u8] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.cols)
    }

    /// Column `j` read top to bottom.
    pub fn column(&self, j: usize) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().skip(j).step_by(self.cols).copied()
    }

    /// Value-preserving transpose (columns become rows).
    pub fn transpose(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for j in 0..self.cols {
            cells.extend(self.column(j));
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            levels: self.levels,
            cells,
        }
    }

    /// Count of cells with a non-zero value.
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v > 0).count()
    }

    /// `(row, col)` of every active cell in row-major order.
    pub fn active_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0)
            .map(move |(i, _)| (i / cols, i % cols))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/model.rs"]
mod tests;
