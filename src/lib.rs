//! Temporal Sequence Preparation for Actuator Telemetry
//!
//! This crate turns a table of per-time-step actuator telemetry (positions,
//! deviations, actions, thickness profiles, aggregates) into fixed-length
//! sliding-window tensors for behavior-cloning training.
//!
//! # Components
//!
//! - **FeatureTable**: row-indexed, column-named telemetry storage
//! - **PositionalEncoder**: additive intra-feature sinusoidal signal
//! - **CategoricalEncoder**: one-hot encoding of discrete action classes
//! - **SequenceBuilder**: exhaustive sliding-window tensor assembly
//!
//! # Example
//!
//! ```rust
//! use telemetry_sequences::{
//!     generate_synthetic_telemetry, InputSpec, SequenceBuilder, TargetSpec,
//!     ACTUATOR_ACTIONS, ACTUATOR_POSITIONS,
//! };
//!
//! let table = generate_synthetic_telemetry(32, 7);
//! let inputs = InputSpec::new(vec![ACTUATOR_POSITIONS], vec![true]).unwrap();
//! let targets = TargetSpec::new(vec![ACTUATOR_ACTIONS]).unwrap();
//!
//! let (x, y) = SequenceBuilder::new(&table).build(5, &inputs, &targets).unwrap();
//! assert_eq!(x.shape(), &[28, 5, 48]);
//! assert_eq!(y.shape(), &[28, 5, 48, 3]);
//! ```

pub mod builder;
pub mod encoding;
pub mod error;
pub mod onehot;
pub mod table;

pub use builder::*;
pub use encoding::*;
pub use error::*;
pub use onehot::*;
pub use table::*;
