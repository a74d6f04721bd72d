//! One-Hot Encoding of Action Classes
//!
//! Actuator actions are discrete classes (lower, hold, raise). The table
//! stores them as `f32` like every other column, so values are truncated
//! toward zero before lookup, matching integer-cast semantics: `2.9` encodes
//! class `2`, `-0.4` truncates to `0`, `-1.2` truncates to `-1` and is
//! rejected.

use ndarray::Array2;

use crate::error::SequenceError;

/// Encoder mapping integer class indices to one-hot rows
#[derive(Debug, Clone, Copy)]
pub struct CategoricalEncoder {
    num_classes: usize,
}

impl CategoricalEncoder {
    /// Default number of action classes (lower, hold, raise)
    pub const DEFAULT_NUM_CLASSES: usize = 3;

    /// Create an encoder for the given number of classes
    pub fn new(num_classes: usize) -> Result<Self, SequenceError> {
        if num_classes == 0 {
            return Err(SequenceError::Config(
                "num_classes must be positive".to_string(),
            ));
        }
        Ok(Self { num_classes })
    }

    /// Number of classes per one-hot row
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Encode class indices into a `(values.len(), num_classes)` matrix
    ///
    /// Each row carries exactly one `1.0` at the truncated class index.
    /// Any value whose truncation falls outside `[0, num_classes)` aborts
    /// the call; no matrix is produced.
    pub fn one_hot(&self, values: &[f32]) -> Result<Array2<f32>, SequenceError> {
        let mut matrix = Array2::zeros((values.len(), self.num_classes));

        for (row, &value) in values.iter().enumerate() {
            let class = value.trunc() as i64;
            if !value.is_finite() || class < 0 || class as usize >= self.num_classes {
                return Err(SequenceError::ClassOutOfRange {
                    value: value as f64,
                    num_classes: self.num_classes,
                });
            }
            matrix[[row, class as usize]] = 1.0;
        }

        Ok(matrix)
    }
}

impl Default for CategoricalEncoder {
    fn default() -> Self {
        Self {
            num_classes: Self::DEFAULT_NUM_CLASSES,
        }
    }
}
