//! Sliding-Window Sequence Assembly
//!
//! Turns the telemetry table into behavior-cloning training tensors: every
//! contiguous run of `seq_len` rows becomes one window, each step's input
//! columns are concatenated (with the positional signal injected where
//! flagged), and each step's action column is one-hot encoded.
//!
//! Windows never share state: window `s` reads rows `s..s + seq_len` and
//! writes only its own slice of the output tensors, so a future parallel map
//! over `s` needs no synchronization.

use ndarray::{Array3, Array4};
use tracing::debug;

use crate::encoding::PositionalEncoder;
use crate::error::SequenceError;
use crate::onehot::CategoricalEncoder;
use crate::table::FeatureTable;

#[derive(Debug, Clone)]
struct InputColumn {
    name: String,
    positional: bool,
}

/// Ordered input columns with per-column positional-encoding flags
#[derive(Debug, Clone)]
pub struct InputSpec {
    columns: Vec<InputColumn>,
}

impl InputSpec {
    /// Build from parallel name and flag lists
    ///
    /// Caller contract: the lists must be the same length and positionally
    /// aligned.
    pub fn new<S: Into<String>>(
        names: Vec<S>,
        positional: Vec<bool>,
    ) -> Result<Self, SequenceError> {
        if names.len() != positional.len() {
            return Err(SequenceError::Config(format!(
                "{} input columns but {} positional-encoding flags",
                names.len(),
                positional.len()
            )));
        }

        let columns = names
            .into_iter()
            .zip(positional)
            .map(|(name, positional)| InputColumn {
                name: name.into(),
                positional,
            })
            .collect();
        Ok(Self { columns })
    }

    /// Number of declared input columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no input columns are declared
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Ordered output columns holding integer class indices
///
/// Current scope trains against a single action column; the first entry is
/// used and any further entries are ignored.
#[derive(Debug, Clone)]
pub struct TargetSpec {
    columns: Vec<String>,
}

impl TargetSpec {
    /// Build from a non-empty list of column names
    pub fn new<S: Into<String>>(names: Vec<S>) -> Result<Self, SequenceError> {
        if names.is_empty() {
            return Err(SequenceError::Config(
                "target spec needs at least one column".to_string(),
            ));
        }
        Ok(Self {
            columns: names.into_iter().map(Into::into).collect(),
        })
    }

    fn primary(&self) -> &str {
        &self.columns[0]
    }
}

/// Assembles sliding-window training tensors from a telemetry table
///
/// The table is borrowed immutably for the builder's lifetime; extraction is
/// exhaustive and deterministic.
///
/// # Example
///
/// ```rust
/// use telemetry_sequences::{
///     generate_synthetic_telemetry, InputSpec, SequenceBuilder, TargetSpec,
///     ACTUATOR_ACTIONS, ACTUATOR_POSITIONS, THICKNESS_PROFILES,
/// };
///
/// let table = generate_synthetic_telemetry(32, 7);
/// let inputs = InputSpec::new(
///     vec![ACTUATOR_POSITIONS, THICKNESS_PROFILES],
///     vec![true, true],
/// ).unwrap();
/// let targets = TargetSpec::new(vec![ACTUATOR_ACTIONS]).unwrap();
///
/// let (x, y) = SequenceBuilder::new(&table).build(5, &inputs, &targets).unwrap();
/// assert_eq!(x.shape(), &[28, 5, 48 + 360]);
/// assert_eq!(y.shape(), &[28, 5, 48, 3]);
/// ```
pub struct SequenceBuilder<'a> {
    table: &'a FeatureTable,
    encoder: PositionalEncoder,
    categorical: CategoricalEncoder,
}

impl<'a> SequenceBuilder<'a> {
    /// Create a builder over an immutable table
    pub fn new(table: &'a FeatureTable) -> Self {
        Self {
            table,
            encoder: PositionalEncoder::new(),
            categorical: CategoricalEncoder::default(),
        }
    }

    /// Replace the positional encoder
    pub fn with_encoder(mut self, encoder: PositionalEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Set the number of action classes
    pub fn with_num_classes(mut self, num_classes: usize) -> Result<Self, SequenceError> {
        self.categorical = CategoricalEncoder::new(num_classes)?;
        Ok(self)
    }

    /// Build input and output tensors over every sliding window
    ///
    /// Returns `(x, y)` with shapes `(num_windows, seq_len, input_width)` and
    /// `(num_windows, seq_len, target_width, num_classes)`, where
    /// `num_windows = max(0, rows - seq_len + 1)`. A table shorter than
    /// `seq_len` yields zero windows, not an error.
    pub fn build(
        &self,
        seq_len: usize,
        inputs: &InputSpec,
        targets: &TargetSpec,
    ) -> Result<(Array3<f32>, Array4<f32>), SequenceError> {
        if seq_len == 0 {
            return Err(SequenceError::Config(
                "seq_len must be positive".to_string(),
            ));
        }

        // Resolve widths before the window loop so missing columns surface
        // immediately and empty results still carry the declared trailing
        // dimensions.
        let mut input_width = 0;
        for column in &inputs.columns {
            input_width += self.table.column_width(&column.name)?;
        }
        let target_width = self.table.column_width(targets.primary())?;
        let num_classes = self.categorical.num_classes();

        let rows = self.table.rows();
        let num_windows = (rows + 1).saturating_sub(seq_len);

        let mut x = Array3::zeros((num_windows, seq_len, input_width));
        let mut y = Array4::zeros((num_windows, seq_len, target_width, num_classes));

        for s in 0..num_windows {
            for i in 0..seq_len {
                let row = s + i;

                let mut offset = 0;
                for column in &inputs.columns {
                    let feature = self.table.row(&column.name, row)?;
                    if column.positional {
                        let encoded = self.encoder.apply(feature, i)?;
                        for (j, &value) in encoded.iter().enumerate() {
                            x[[s, i, offset + j]] = value;
                        }
                    } else {
                        for (j, &value) in feature.iter().enumerate() {
                            x[[s, i, offset + j]] = value;
                        }
                    }
                    offset += feature.len();
                }

                let actions = self.table.row(targets.primary(), row)?;
                let one_hot = self.categorical.one_hot(actions)?;
                for t in 0..target_width {
                    for c in 0..num_classes {
                        y[[s, i, t, c]] = one_hot[[t, c]];
                    }
                }
            }
        }

        debug!(
            "assembled {} windows of {} steps ({} input features, {} target slots)",
            num_windows, seq_len, input_width, target_width
        );

        Ok((x, y))
    }
}
