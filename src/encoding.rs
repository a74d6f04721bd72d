//! Intra-Feature Positional Encoding
//!
//! Telemetry feature vectors have a spatial ordering along their elements:
//! actuator profiles run across the machine width, thickness scans run across
//! the sheet. This module generates a deterministic sinusoidal signal over
//! that ordering and injects it additively into the raw vector.
//!
//! The classic transformer encoding produces a `(length, d_model)` matrix;
//! here the consumer has exactly one scalar slot per feature element, so the
//! matrix is collapsed by a row-wise sum into a length-`length` vector. This
//! trades encoding richness for shape compatibility with the raw channel.

use ndarray::Array1;

use crate::error::SequenceError;

/// How the in-window step offset participates in the signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingMode {
    /// Signal depends only on element positions within the feature vector.
    /// Identical vectors at different time steps receive identical
    /// augmentation.
    #[default]
    IntraFeature,
    /// Element positions are shifted by the in-window step offset, so the
    /// same vector at different time steps receives a different signal.
    OffsetAware,
}

/// Sinusoidal positional encoder for 1D feature vectors
///
/// # Formula
///
/// For element position `p` and frequency index `k` in `[0, d/2)`:
///
/// ```text
/// div_term[k] = exp(-(2k) * ln(10000) / d)
/// signal[p]   = sum_k sin(p * div_term[k]) + cos(p * div_term[k])
/// ```
///
/// No normalization is applied to the summed signal.
///
/// # Example
///
/// ```rust
/// use telemetry_sequences::PositionalEncoder;
///
/// let encoder = PositionalEncoder::new();
/// let signal = encoder.signal(48);
/// assert_eq!(signal.len(), 48);
/// ```
#[derive(Debug, Clone)]
pub struct PositionalEncoder {
    internal_dim: usize,
    mode: EncodingMode,
}

impl PositionalEncoder {
    /// Default internal dimension of the collapsed encoding matrix
    pub const DEFAULT_INTERNAL_DIM: usize = 16;

    /// Create an encoder with the default internal dimension
    pub fn new() -> Self {
        Self::with_internal_dim(Self::DEFAULT_INTERNAL_DIM)
    }

    /// Create an encoder with a custom internal dimension
    ///
    /// The dimension is normalized at construction: zero falls back to 2,
    /// odd values are incremented so sin/cos pairs stay balanced.
    pub fn with_internal_dim(internal_dim: usize) -> Self {
        let internal_dim = match internal_dim {
            0 => 2,
            d if d % 2 != 0 => d + 1,
            d => d,
        };
        Self {
            internal_dim,
            mode: EncodingMode::IntraFeature,
        }
    }

    /// Set the encoding mode
    pub fn with_mode(mut self, mode: EncodingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Normalized internal dimension
    pub fn internal_dim(&self) -> usize {
        self.internal_dim
    }

    /// Generate the additive signal for a feature vector of the given length
    ///
    /// Pure function of `(length, internal_dim)`: two calls with identical
    /// arguments produce bit-identical output.
    pub fn signal(&self, length: usize) -> Array1<f32> {
        self.signal_shifted(length, 0)
    }

    fn signal_shifted(&self, length: usize, shift: usize) -> Array1<f32> {
        if length == 0 {
            return Array1::zeros(0);
        }

        let d = self.internal_dim;
        let half = d / 2;
        let div_term: Vec<f32> = (0..half)
            .map(|k| (-((2 * k) as f32) * 10000.0f32.ln() / d as f32).exp())
            .collect();

        let mut signal = Array1::zeros(length);
        for p in 0..length {
            let position = (p + shift) as f32;
            let mut sum = 0.0f32;
            for &term in &div_term {
                let angle = position * term;
                sum += angle.sin() + angle.cos();
            }
            signal[p] = sum;
        }

        signal
    }

    /// Add the positional signal to a feature vector
    ///
    /// `step_offset` is the in-window time-step index. It only affects the
    /// result in [`EncodingMode::OffsetAware`]; the default mode keeps the
    /// source behavior where the offset is accepted but unused.
    pub fn apply(&self, feature: &[f32], step_offset: usize) -> Result<Array1<f32>, SequenceError> {
        let shift = match self.mode {
            EncodingMode::IntraFeature => 0,
            EncodingMode::OffsetAware => step_offset,
        };
        let signal = self.signal_shifted(feature.len(), shift);

        // The signal length always equals the feature length by construction;
        // the addition boundary still verifies it.
        if signal.len() != feature.len() {
            return Err(SequenceError::Shape {
                expected: feature.len(),
                actual: signal.len(),
            });
        }

        Ok(Array1::from_iter(
            feature.iter().zip(signal.iter()).map(|(f, s)| f + s),
        ))
    }
}

impl Default for PositionalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_signal_length() {
        let encoder = PositionalEncoder::new();
        for length in [0, 1, 4, 48, 360] {
            assert_eq!(encoder.signal(length).len(), length);
        }
    }

    #[test]
    fn test_signal_deterministic() {
        let encoder = PositionalEncoder::new();
        let a = encoder.signal(100);
        let b = encoder.signal(100);
        assert_eq!(a, b);
    }

    #[test]
    fn test_internal_dim_normalization() {
        assert_eq!(PositionalEncoder::with_internal_dim(0).internal_dim(), 2);
        assert_eq!(PositionalEncoder::with_internal_dim(15).internal_dim(), 16);
        assert_eq!(PositionalEncoder::with_internal_dim(16).internal_dim(), 16);
    }

    #[test]
    fn test_odd_dim_behaves_as_next_even() {
        let odd = PositionalEncoder::with_internal_dim(15);
        let even = PositionalEncoder::with_internal_dim(16);
        assert_eq!(odd.signal(32), even.signal(32));
    }

    #[test]
    fn test_signal_matches_formula() {
        // d = 4: div_term = [exp(0), exp(-ln(10000) / 2)]
        let encoder = PositionalEncoder::with_internal_dim(4);
        let signal = encoder.signal(4);

        let div_term = [1.0f32, (-(10000.0f32.ln()) / 2.0).exp()];
        for p in 0..4 {
            let expected: f32 = div_term
                .iter()
                .map(|&t| {
                    let angle = p as f32 * t;
                    angle.sin() + angle.cos()
                })
                .sum();
            assert_relative_eq!(signal[p], expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_apply_adds_signal() {
        let encoder = PositionalEncoder::new();
        let feature = vec![1.0f32, 2.0, 3.0, 4.0];
        let signal = encoder.signal(4);

        let encoded = encoder.apply(&feature, 0).unwrap();
        for p in 0..4 {
            assert_relative_eq!(encoded[p], feature[p] + signal[p], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_apply_empty_feature() {
        let encoder = PositionalEncoder::new();
        let encoded = encoder.apply(&[], 0).unwrap();
        assert_eq!(encoded.len(), 0);
    }

    #[test]
    fn test_intra_feature_ignores_offset() {
        let encoder = PositionalEncoder::new();
        let feature = vec![0.5f32; 8];

        let at_zero = encoder.apply(&feature, 0).unwrap();
        let at_five = encoder.apply(&feature, 5).unwrap();
        assert_eq!(at_zero, at_five);
    }

    #[test]
    fn test_offset_aware_shifts_signal() {
        let encoder = PositionalEncoder::new().with_mode(EncodingMode::OffsetAware);
        let feature = vec![0.5f32; 8];

        let at_zero = encoder.apply(&feature, 0).unwrap();
        let at_five = encoder.apply(&feature, 5).unwrap();
        assert_ne!(at_zero, at_five);

        // Offset zero matches the default mode exactly.
        let intra = PositionalEncoder::new().apply(&feature, 3).unwrap();
        assert_eq!(at_zero, intra);
    }
}
