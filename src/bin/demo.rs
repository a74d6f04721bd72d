//! Demo: Telemetry Sequence Preparation
//!
//! Walks through the full pipeline: synthetic telemetry, the intra-feature
//! positional signal, one-hot action encoding, and sliding-window tensor
//! assembly.

use telemetry_sequences::{
    generate_synthetic_telemetry, CategoricalEncoder, EncodingMode, InputSpec, PositionalEncoder,
    SequenceBuilder, TargetSpec, ACTUATOR_ACTIONS, ACTUATOR_DEVIATIONS, ACTUATOR_POSITIONS,
    AVERAGES, THICKNESS_PROFILES,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn print_separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    FmtSubscriber::builder().with_max_level(Level::DEBUG).init();

    println!("Telemetry Sequence Preparation - Demo");

    // ===== 1. Synthetic telemetry =====
    print_separator("1. Synthetic Telemetry Table");

    let table = generate_synthetic_telemetry(64, 42);
    println!("Rows: {}", table.rows());
    for name in table.column_names() {
        println!("  {:20} width {}", name, table.column_width(name)?);
    }

    // ===== 2. Positional signal =====
    print_separator("2. Intra-Feature Positional Signal");

    let encoder = PositionalEncoder::new();
    let signal = encoder.signal(8);
    println!("Internal dimension: {}", encoder.internal_dim());
    println!(
        "Signal for an 8-element feature: [{:.4}, {:.4}, {:.4}, {:.4}, ...]",
        signal[0], signal[1], signal[2], signal[3]
    );

    let raw = table.row(ACTUATOR_POSITIONS, 0)?;
    let encoded = encoder.apply(&raw[..8], 0)?;
    println!(
        "First actuator positions raw:     [{:.4}, {:.4}, {:.4}]",
        raw[0], raw[1], raw[2]
    );
    println!(
        "First actuator positions encoded: [{:.4}, {:.4}, {:.4}]",
        encoded[0], encoded[1], encoded[2]
    );

    // ===== 3. One-hot actions =====
    print_separator("3. One-Hot Action Encoding");

    let categorical = CategoricalEncoder::default();
    let actions = table.row(ACTUATOR_ACTIONS, 0)?;
    let one_hot = categorical.one_hot(&actions[..5])?;
    println!("First five actions: {:?}", &actions[..5]);
    println!("One-hot shape: {:?}", one_hot.shape());
    for row in one_hot.rows() {
        println!("  {:?}", row.to_vec());
    }

    // ===== 4. Sequence assembly =====
    print_separator("4. Sliding-Window Sequence Assembly");

    let inputs = InputSpec::new(
        vec![
            ACTUATOR_POSITIONS,
            ACTUATOR_DEVIATIONS,
            THICKNESS_PROFILES,
            AVERAGES,
        ],
        vec![true, true, true, false],
    )?;
    let targets = TargetSpec::new(vec![ACTUATOR_ACTIONS])?;

    let builder = SequenceBuilder::new(&table);
    let (x, y) = builder.build(8, &inputs, &targets)?;

    println!("Input tensor:  {:?}  (windows, steps, features)", x.shape());
    println!("Output tensor: {:?}  (windows, steps, slots, classes)", y.shape());

    // ===== 5. Offset-aware variant =====
    print_separator("5. Offset-Aware Encoding Variant");

    let offset_builder = SequenceBuilder::new(&table)
        .with_encoder(PositionalEncoder::new().with_mode(EncodingMode::OffsetAware));
    let (x_aware, _) = offset_builder.build(8, &inputs, &targets)?;

    println!(
        "Default mode, window 0, feature 0: step 0 = {:.4}, step 7 = {:.4}",
        x[[0, 0, 0]],
        x[[0, 7, 0]]
    );
    println!(
        "Offset-aware,  window 0, feature 0: step 0 = {:.4}, step 7 = {:.4}",
        x_aware[[0, 0, 0]],
        x_aware[[0, 7, 0]]
    );

    Ok(())
}
