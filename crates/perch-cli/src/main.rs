//! Perch - position a floating element over a scene file
//!
//! Usage: `perch <scene.json>`
//!
//! Prints one JSON line for the initial layout and one for every frame that
//! resized the target or changed the window.

mod scene;

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use perch_geometry::{OptimalPosition, get_optimal_position};
use perch_observer::ResizeObserverRegistry;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::scene::{Frame, Scene, Stage};

/// One line of output
#[derive(Debug, Serialize)]
struct Report<'a> {
    /// `None` for the initial layout
    frame: Option<usize>,
    position: Option<&'a OptimalPosition>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: perch <scene.json>")?;

    run(Path::new(&path))
}

fn run(path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene {}", path.display()))?;
    let scene = Scene::from_json(&json)
        .with_context(|| format!("Failed to parse scene {}", path.display()))?;
    let mut stage = scene.build().context("Invalid scene")?;

    tracing::info!(
        "Positioning over {} nodes with {} candidates",
        scene.nodes.len(),
        stage.presets.len()
    );
    print_position(&scene, &stage, None)?;

    let registry = ResizeObserverRegistry::polling();
    let resized = Rc::new(Cell::new(false));
    let _observer = {
        let resized = Rc::clone(&resized);
        registry.observe(stage.target, move |entry| {
            tracing::debug!(
                "Target resized to {}x{}",
                entry.border_box_size.inline_size,
                entry.border_box_size.block_size
            );
            resized.set(true);
        })
    };
    // First measurement of the target
    registry.poll(&stage.document);
    resized.set(false);

    for (index, frame) in scene.frames.iter().enumerate() {
        stage
            .apply(frame)
            .with_context(|| format!("Invalid frame {}", index))?;
        registry.poll(&stage.document);

        if needs_update(frame, resized.replace(false)) {
            print_position(&scene, &stage, Some(index))?;
        } else {
            tracing::debug!("Frame {}: target size and window unchanged", index);
        }
    }

    Ok(())
}

/// A new position is due when the target resized or the viewport changed
fn needs_update(frame: &Frame, target_resized: bool) -> bool {
    target_resized || frame.window.is_some()
}

fn print_position(scene: &Scene, stage: &Stage, frame: Option<usize>) -> Result<()> {
    let position = get_optimal_position(&stage.document, stage.options(scene));
    if position.is_none() {
        tracing::info!("No position found");
    }

    let report = Report { frame, position: position.as_ref() };
    println!("{}", serde_json::to_string(&report).context("Failed to serialize position")?);
    Ok(())
}
