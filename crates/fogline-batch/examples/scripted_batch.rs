//! Run a batch over two scripted replays and print the summary.
//!
//! Demonstrates the full pipeline without a real engine: the scripted
//! driver stands in for the playback collaborator.
//!
//! ```sh
//! RUST_LOG=info cargo run --example scripted_batch
//! ```

use fogline_batch::{run_batch, BatchConfig};
use fogline_core::ExtractionConfig;
use fogline_test_utils::{synthetic_skirmish, ScriptedDriver, SessionEnd};
use tracing_subscriber::filter::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base = std::env::temp_dir().join("fogline-scripted-batch");
    let _ = std::fs::remove_dir_all(&base);
    let replays_dir = base.join("Replays");
    std::fs::create_dir_all(&replays_dir).expect("create replays dir");

    let mut driver = ScriptedDriver::new();

    // A clean replay and one whose player-2 engine dies mid-run.
    let mut good = synthetic_skirmish(42, 300);
    good.metadata.replay_id = "9001".into();
    driver.insert("9001_alice_bob_ScriptedPlateau.SC2Replay", good);

    let mut broken = synthetic_skirmish(43, 300);
    broken.metadata.replay_id = "9002".into();
    broken.p2_end = SessionEnd::Protocol {
        reason: "engine crashed".into(),
    };
    driver.insert("9002_alice_bob_ScriptedPlateau.SC2Replay", broken);

    for name in [
        "9001_alice_bob_ScriptedPlateau.SC2Replay",
        "9002_alice_bob_ScriptedPlateau.SC2Replay",
    ] {
        std::fs::write(replays_dir.join(name), b"scripted").expect("touch replay file");
    }

    let mut config = BatchConfig::new(&replays_dir, base.join("Output"));
    config.extraction = ExtractionConfig {
        interval: 4,
        ..Default::default()
    };
    config.stop_sentinel = base.join("STOP");

    let summary = run_batch(&driver, &config).expect("batch runs");
    println!(
        "discovered {} / processed {} / failed {} (output under {})",
        summary.discovered,
        summary.processed,
        summary.failed,
        config.output_dir.display()
    );
}
