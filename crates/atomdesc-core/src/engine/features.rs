use crate::engine::error::EngineError;

/// A growing, fixed-width dense feature store.
///
/// Every appended row must have the same length: either the width is
/// established up front with [`FeatureStore::with_width`] (the pre-allocation
/// path used by the workflow), or the first append establishes it. A
/// mismatched row is a fatal error; a silently ragged feature matrix is worse
/// than a hard stop.
#[derive(Debug, Default)]
pub struct FeatureStore {
    data: Vec<f64>,
    width: Option<usize>,
    rows: usize,
}

impl FeatureStore {
    /// Creates an empty store; the first appended row fixes the width.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the width established up front.
    pub fn with_width(width: usize) -> Self {
        Self {
            data: Vec::new(),
            width: Some(width),
            rows: 0,
        }
    }

    /// The established row width, if any row has been appended or the width
    /// was fixed at construction.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Number of rows appended so far.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns true if no rows have been appended.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Appends one feature row.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WidthMismatch`] if the row length disagrees with
    /// the established width.
    pub fn append(&mut self, row: Vec<f64>) -> Result<(), EngineError> {
        match self.width {
            Some(expected) if expected != row.len() => {
                return Err(EngineError::WidthMismatch {
                    expected,
                    got: row.len(),
                });
            }
            Some(_) => {}
            None => self.width = Some(row.len()),
        }
        self.data.extend_from_slice(&row);
        self.rows += 1;
        Ok(())
    }

    /// Consumes the store, returning an immutable view.
    ///
    /// No further appends are possible afterwards, which prevents width drift
    /// mid-dataset.
    pub fn finalize(self) -> FeatureMatrix {
        FeatureMatrix {
            data: self.data,
            width: self.width.unwrap_or(0),
            rows: self.rows,
        }
    }
}

/// The finalized, immutable dataset-level feature matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Vec<f64>,
    width: usize,
    rows: usize,
}

impl FeatureMatrix {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns true if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// The shared row width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// One feature row.
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.width;
        &self.data[start..start + self.width]
    }

    /// The whole matrix as a flat row-major slice, for zero-copy handoff to
    /// downstream consumers.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
