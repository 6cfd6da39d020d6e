use image::GrayImage;

use crate::foundation::error::{ReelError, ReelResult};
use crate::grid::model::{Grid, Levels};

/// Threshold cut points mapping 8-bit intensity to grid values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cutpoints {
    /// One threshold: intensity `< t` is filled (1), everything else blank (0).
    Binary(u8),
    /// Two thresholds with digitize semantics; boundary values land in the higher bucket.
    ///
    /// `v < low` is 0, `low <= v < high` is 1, `v >= high` is 2.
    Ternary {
        /// Lower bin edge.
        low: u8,
        /// Upper bin edge, strictly greater than `low`.
        high: u8,
    },
}

impl Cutpoints {
    /// Parse one or two thresholds, each within `[0, 255]`, strictly increasing.
    pub fn new(values: &[i32]) -> ReelResult<Self> {
        let to_u8 = |v: i32| {
            u8::try_from(v).map_err(|_| {
                ReelError::invalid_input(format!("cutpoint {v} is outside [0, 255]"))
            })
        };
        match values {
            [t] => Ok(Self::Binary(to_u8(*t)?)),
            [low, high] => {
                let (low, high) = (to_u8(*low)?, to_u8(*high)?);
                if low >= high {
                    return Err(ReelError::invalid_input(format!(
                        "cutpoints must be strictly increasing, got [{low}, {high}]"
                    )));
                }
                Ok(Self::Ternary { low, high })
            }
            _ => Err(ReelError::invalid_input(format!(
                "expected 1 or 2 cutpoints, got {}",
                values.len()
            ))),
        }
    }

    /// Value domain of grids produced with these cut points.
    pub fn levels(self) -> Levels {
        match self {
            Self::Binary(_) => Levels::Binary,
            Self::Ternary { .. } => Levels::Ternary,
        }
    }

    /// Bucket for a single intensity.
    pub fn bucket(self, v: u8) -> u8 {
        match self {
            Self::Binary(t) => u8::from(v < t),
            Self::Ternary { low, high } => {
                if v < low {
                    0
                } else if v < high {
                    1
                } else {
                    2
                }
            }
        }
    }
}

/// Quantize a luma image (already resized to the grid resolution) into a [`Grid`].
///
/// Image rows become grid rows; the grid is `height x width`.
pub fn quantize(pixels: &GrayImage, cutpoints: &Cutpoints) -> ReelResult<Grid> {
    let (w, h) = pixels.dimensions();
    if w == 0 || h == 0 {
        return Err(ReelError::invalid_input(format!(
            "pixel matrix must be non-empty, got {w}x{h}"
        )));
    }
    let cells = pixels.as_raw().iter().map(|&v| cutpoints.bucket(v)).collect();
    Grid::from_cells(h as usize, w as usize, cutpoints.levels(), cells)
}

/// Quantize a nested row-major intensity matrix into a [`Grid`].
pub fn quantize_rows<R: AsRef<[u8]>>(rows: &[R], cutpoints: &Cutpoints) -> ReelResult<Grid> {
    let bucketed: Vec<Vec<u8>> = rows
        .iter()
        .map(|r| r.as_ref().iter().map(|&v| cutpoints.bucket(v)).collect())
        .collect();
    Grid::from_rows(cutpoints.levels(), &bucketed)
}

#[cfg(test)]
#[path = "../../tests/unit/grid/quantize.rs"]
mod tests;
