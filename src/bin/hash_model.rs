//! Model manifest utility for AgeWell classifiers.
//!
//! Writes `manifest.json` next to `agewell_model.json`, recording its SHA-256
//! digest so the application can detect a corrupted or swapped model at startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin hash_model -- <model_dir>
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use agewell::adapters::model::{ExportedModel, ModelManifest, MANIFEST_FILE, MODEL_FILE};

fn usage() -> String {
    "Usage: hash_model <model_dir>".to_string()
}

fn parse_args() -> Result<PathBuf> {
    let args = env::args().skip(1);
    let mut model_dir: Option<PathBuf> = None;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => bail!(usage()),
            _ => {
                if model_dir.is_none() {
                    model_dir = Some(PathBuf::from(arg));
                } else {
                    bail!(usage());
                }
            }
        }
    }

    model_dir.ok_or_else(|| anyhow::anyhow!(usage()))
}

fn main() -> Result<()> {
    let model_dir = parse_args()?;

    let model_dir = if model_dir.is_file() {
        model_dir
            .parent()
            .context("Model path has no parent directory")?
            .to_path_buf()
    } else {
        model_dir
    };

    let model_path = model_dir.join(MODEL_FILE);
    let bytes = fs::read(&model_path)
        .with_context(|| format!("Failed to read {}", model_path.display()))?;

    // Refuse to bless a model the application would reject anyway.
    let model: ExportedModel = serde_json::from_slice(&bytes)
        .with_context(|| format!("{} is not a valid model export", model_path.display()))?;
    model.validate()?;

    let manifest = ModelManifest::for_files([(MODEL_FILE, bytes.as_slice())]);
    let manifest_bytes =
        serde_json::to_vec_pretty(&manifest).context("Failed to serialize manifest.json")?;

    let manifest_path = model_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, &manifest_bytes)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    println!("Wrote manifest: {}", manifest_path.display());
    for (name, digest) in &manifest.files {
        println!("  {name}  sha256={digest}");
    }

    Ok(())
}
