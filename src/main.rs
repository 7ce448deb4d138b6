// src/main.rs
mod classifier;
mod config;
mod engine;
mod landmarks;
mod smoothing;
mod store;

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::EngineConfig;
use crate::engine::{Prediction, RecognitionEngine};
use crate::landmarks::Landmark;
use crate::store::GestureStore;

const CONFIG_FILE: &str = "engine_config.json";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        return Ok(());
    }

    let config = EngineConfig::load_or_default(Path::new(CONFIG_FILE));
    let store = GestureStore::load(&config.store_path).with_context(|| {
        format!("failed to load gesture store from {}", config.store_path.display())
    })?;
    let mut engine = RecognitionEngine::with_store(config, store);
    info!(gestures = engine.gestures().count, "recognition engine ready");

    match args[1].as_str() {
        "train" => {
            if args.len() < 4 {
                bail!("usage: {} train <label> <samples.json>", args[0]);
            }
            run_train(&mut engine, &args[2], Path::new(&args[3]))
        }
        "predict" => {
            if args.len() < 3 {
                bail!("usage: {} predict <frames.json>", args[0]);
            }
            run_predict(&mut engine, Path::new(&args[2]))
        }
        "list" => {
            run_list(&engine);
            Ok(())
        }
        other => bail!("unknown command: {}", other),
    }
}

fn print_usage(program: &str) {
    println!("ISL gesture recognition engine\n");
    println!("Usage:");
    println!("  {program} train <label> <samples.json>   record training samples");
    println!("  {program} predict <frames.json>          classify recorded frames");
    println!("  {program} list                           show trained gestures\n");
    println!("Sample files hold a JSON array of landmark frames; each frame is");
    println!("an array of {{\"x\", \"y\", \"z\"}} points, one per hand key point.");
    println!("Settings are read from {CONFIG_FILE} when present.");
}

fn run_train(engine: &mut RecognitionEngine, label: &str, path: &Path) -> Result<()> {
    let samples = read_frames(path, engine.config().landmark_count)?;
    let outcome = engine.train(label, &samples)?;

    // Persist synchronously after every successful training call. The
    // in-memory append stands even if this save fails.
    let store_path = engine.config().store_path.clone();
    engine.store().save(&store_path).with_context(|| {
        format!("failed to persist gesture store to {}", store_path.display())
    })?;

    println!("Trained {}: {} sample(s) total", outcome.label, outcome.total_samples);
    Ok(())
}

fn run_predict(engine: &mut RecognitionEngine, path: &Path) -> Result<()> {
    let frames = read_frames(path, engine.config().landmark_count)?;

    for frame in &frames {
        match engine.predict(frame) {
            Prediction::NoGesturesKnown => println!("No gestures trained yet"),
            Prediction::LowConfidence { confidence } => {
                println!("Uncertain ({confidence:.2}%)");
            }
            Prediction::Recognized {
                gesture,
                confidence,
                window,
            } => {
                println!("{gesture} ({confidence:.2}%)  window: {window:?}");
            }
        }
    }
    Ok(())
}

fn run_list(engine: &RecognitionEngine) {
    let gestures = engine.gestures();
    println!("{} gesture(s) trained", gestures.count);
    for label in gestures.labels {
        println!("  {label}");
    }
}

/// Reads one or more landmark frames from a JSON file. Frames with the
/// wrong point count are rejected here; the engine assumes valid frames.
fn read_frames(path: &Path, landmark_count: usize) -> Result<Vec<Vec<Landmark>>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let frames: Vec<Vec<Landmark>> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of landmark frames", path.display()))?;

    if frames.is_empty() {
        bail!("{} holds no frames", path.display());
    }
    for (index, frame) in frames.iter().enumerate() {
        if frame.len() != landmark_count {
            bail!(
                "frame {} has {} landmarks, expected {}",
                index,
                frame.len(),
                landmark_count
            );
        }
    }
    Ok(frames)
}
