//! Watch command - Re-render the roadmap whenever the file changes
//!
//! The parent directory is watched rather than the file itself, since many
//! editors save by writing a new file and renaming it over the old one.

use anyhow::{Context, Result};
use colored::Colorize;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::RmapConfig;
use crate::locate;
use crate::output::{OutputConfig, OutputFormat};

use super::show;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Whether an event path refers to the watched roadmap.
fn is_roadmap_event(event_path: &Path, roadmap: &Path) -> bool {
    event_path.file_name().is_some() && event_path.file_name() == roadmap.file_name()
}

fn redraw(path: &Path, hide_ids: bool, flat: bool, config: &RmapConfig, output: &OutputConfig) {
    match show::render(path, hide_ids, flat, config, output.clone()) {
        Ok(rendered) => {
            if output.use_colors() {
                print!("{}", CLEAR_SCREEN);
            }
            println!("{}", rendered.trim_end());
            println!(
                "\n{}",
                format!("Watching {} (Ctrl+C to stop)", path.display()).dimmed()
            );
        }
        // Keep watching; the file is often mid-edit.
        Err(e) => warn!("Failed to render {}: {:#}", path.display(), e),
    }
}

/// Run the watch command.
pub async fn run(
    path: Option<&str>,
    hide_ids: bool,
    flat: bool,
    config: &RmapConfig,
    format: OutputFormat,
) -> Result<()> {
    let roadmap_path = locate::resolve_roadmap_path(path, config)?;
    let roadmap_path = roadmap_path
        .canonicalize()
        .with_context(|| format!("Cannot watch {}", roadmap_path.display()))?;
    let watch_dir = roadmap_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let output = super::output_config(format, config);
    redraw(&roadmap_path, hide_ids, flat, config, &output);

    let (tx, mut rx) = mpsc::channel::<()>(16);
    let target = roadmap_path.clone();
    let mut debouncer = new_debouncer(config.debounce(), move |res: DebounceEventResult| {
        match res {
            Ok(events) => {
                if events.iter().any(|e| is_roadmap_event(&e.path, &target)) {
                    let _ = tx.blocking_send(());
                }
            }
            Err(e) => error!("Watch error: {:?}", e),
        }
    })
    .context("Failed to create file watcher")?;

    debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", watch_dir.display()))?;
    info!(path = %roadmap_path.display(), "watching roadmap");

    loop {
        tokio::select! {
            changed = rx.recv() => {
                if changed.is_none() {
                    break;
                }
                debug!("roadmap changed, re-rendering");
                redraw(&roadmap_path, hide_ids, flat, config, &output);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopping watch");
                break;
            }
        }
    }

    Ok(())
}
