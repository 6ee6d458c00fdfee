use crate::paginate::SAFETY_MARGIN;

/// Nominal row height used by [`GridMeasure`].
pub const GRID_LINE_HEIGHT: f64 = 32.0;

/// Rendered-height capability for the dialogue box. Implementations must be
/// monotonically non-decreasing in candidate length for a fixed font and box.
pub trait TextMeasure: Send + Sync {
    fn measure(&self, candidate: &str) -> f64;

    /// Height available for dialogue text in the same units as `measure`.
    fn box_height(&self) -> f64;
}

/// Monospace text box: characters wrap at `columns`, explicit newlines start a
/// new row, every row is `line_height` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMeasure {
    pub columns: usize,
    pub rows: usize,
    pub line_height: f64,
}

impl GridMeasure {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            line_height: GRID_LINE_HEIGHT,
        }
    }

    pub fn row_count(&self, candidate: &str) -> usize {
        let columns = self.columns.max(1);
        candidate
            .split('\n')
            .map(|segment| segment.chars().count().div_ceil(columns).max(1))
            .sum()
    }
}

impl TextMeasure for GridMeasure {
    fn measure(&self, candidate: &str) -> f64 {
        self.row_count(candidate) as f64 * self.line_height
    }

    fn box_height(&self) -> f64 {
        self.rows as f64 * self.line_height + SAFETY_MARGIN
    }
}
