use crate::grid::model::Grid;

/// Run lengths of one target value along a line, in encounter order.
///
/// A line with no run of the target value is `[0]`, never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Hint(Vec<u32>);

impl Hint {
    /// The sentinel hint of a line without any run.
    pub fn blank() -> Self {
        Self(vec![0])
    }

    /// Run lengths as stored (the sentinel included).
    pub fn runs(&self) -> &[u32] {
        &self.0
    }

    /// `true` for the `[0]` sentinel.
    pub fn is_blank(&self) -> bool {
        self.0 == [0]
    }

    /// Number of target cells covered by this hint.
    pub fn filled_cells(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, run) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{run}")?;
        }
        Ok(())
    }
}

/// Derive the hint for `target` over one line.
///
/// Only the exact target value extends a run; any other value, zero or not, ends it.
pub fn derive_hints(line: impl IntoIterator<Item = u8>, target: u8) -> Hint {
    let mut runs = Vec::new();
    let mut count = 0u32;
    for cell in line {
        if cell == target {
            count += 1;
        } else if count > 0 {
            runs.push(count);
            count = 0;
        }
    }
    if count > 0 {
        runs.push(count);
    }
    if runs.is_empty() {
        return Hint::blank();
    }
    Hint(runs)
}

/// Hints of every line for one non-zero level.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LevelHints {
    /// Target value these hints count.
    pub level: u8,
    /// One hint per line, indexed by row (or column) number.
    pub lines: Vec<Hint>,
}

/// Row and column hints of a grid, split by level.
///
/// `rows` and `cols` each hold one [`LevelHints`] per non-zero level, ascending.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HintSet {
    /// Row hints, read left to right.
    pub rows: Vec<LevelHints>,
    /// Column hints, read top to bottom.
    pub cols: Vec<LevelHints>,
}

impl HintSet {
    /// Row hints for `level`, if the grid has that level.
    pub fn rows_for(&self, level: u8) -> Option<&[Hint]> {
        self.rows
            .iter()
            .find(|h| h.level == level)
            .map(|h| h.lines.as_slice())
    }

    /// Column hints for `level`, if the grid has that level.
    pub fn cols_for(&self, level: u8) -> Option<&[Hint]> {
        self.cols
            .iter()
            .find(|h| h.level == level)
            .map(|h| h.lines.as_slice())
    }

    /// Serialize as pretty JSON for display or export.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Derive the full [`HintSet`] of a grid.
pub fn derive_hint_set(grid: &Grid) -> HintSet {
    let transposed = grid.transpose();
    let per_level = |g: &Grid| -> Vec<LevelHints> {
        grid.levels()
            .filled_values()
            .map(|level| LevelHints {
                level,
                lines: g
                    .iter_rows()
                    .map(|line| derive_hints(line.iter().copied(), level))
                    .collect(),
            })
            .collect()
    };
    HintSet {
        rows: per_level(grid),
        cols: per_level(&transposed),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hints/derive.rs"]
mod tests;
