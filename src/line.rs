//! Slide-and-merge for a single row or column.
//!
//! The input line is always oriented so that the move points toward index 0;
//! callers reverse right/down lines by walking the cells from the far end
//! (see [`Direction::line_cells`](crate::grid::Direction::line_cells)).

/// Result of collapsing one line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collapse {
    /// Line values after the move, zero padded to the input length.
    pub values: Vec<u32>,
    /// Sum of the values produced by merges on this line.
    pub score: u32,
    /// Indices into `values` that hold a merge product, ascending.
    pub merged_at: Vec<usize>,
}

impl Collapse {
    pub fn is_merge_site(&self, index: usize) -> bool {
        self.merged_at.binary_search(&index).is_ok()
    }

    pub fn merges(&self) -> usize {
        self.merged_at.len()
    }
}

/// Compacts `line` toward index 0 and merges equal neighbours once.
///
/// A tile that was produced by a merge is never merged again in the same
/// pass, so `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]` and `[2, 2, 4, 0]` becomes
/// `[4, 4, 0, 0]`.
pub fn collapse_line(line: &[u32]) -> Collapse {
    let compacted: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut values = Vec::with_capacity(line.len());
    let mut merged_at = Vec::new();
    let mut score: u32 = 0;
    let mut i = 0;

    while i < compacted.len() {
        let value = compacted[i];

        if compacted.get(i + 1) == Some(&value) {
            let doubled = value.saturating_mul(2);

            merged_at.push(values.len());
            values.push(doubled);
            score = score.saturating_add(doubled);

            // skip the consumed neighbour
            i += 2;
        } else {
            values.push(value);
            i += 1;
        }
    }

    values.resize(line.len(), 0);

    Collapse {
        values,
        score,
        merged_at,
    }
}
