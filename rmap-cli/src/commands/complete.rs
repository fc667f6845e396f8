//! Complete command - Mark a roadmap item done
//!
//! The item is matched by its exact text. Its checkbox becomes `[x]` and the
//! next pending item after it becomes `[>]`. The edit is previewed first and
//! written only after confirmation or with `--yes`.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use rmap_core::source::{active_item, complete_item, is_json_snapshot, parse_roadmap_data};
use serde::Serialize;

use crate::config::RmapConfig;
use crate::locate;
use crate::output::{Output, OutputFormat, TableDisplay};

/// One line changed by the edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedLine {
    /// 1-based line number
    pub line: usize,
    pub before: String,
    pub after: String,
}

/// Outcome of a complete run.
#[derive(Debug, Serialize)]
pub struct CompleteResult {
    pub path: String,
    pub item: String,
    pub changes: Vec<ChangedLine>,
    /// False for dry runs and declined prompts
    pub written: bool,
    /// First active item after the edit
    pub next_active: Option<String>,
}

impl TableDisplay for CompleteResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        if self.written {
            lines.push(format!(
                "{} Completed '{}' in {}",
                "SUCCESS:".green().bold(),
                self.item,
                self.path.cyan()
            ));
        } else {
            lines.push(format!(
                "{} '{}' in {} (not written)",
                "PREVIEW:".yellow().bold(),
                self.item,
                self.path.cyan()
            ));
        }

        lines.extend(render_changes(&self.changes));

        if let Some(next) = &self.next_active {
            lines.push(format!("{}: {}", "Active".cyan(), next));
        }

        lines.join("\n")
    }
}

/// Diff lines for display, `-` before and `+` after.
fn render_changes(changes: &[ChangedLine]) -> Vec<String> {
    changes
        .iter()
        .flat_map(|c| {
            [
                format!("  {:>4} {}", c.line, format!("- {}", c.before).red()),
                format!("  {:>4} {}", c.line, format!("+ {}", c.after).green()),
            ]
        })
        .collect()
}

/// Lines that differ between two versions of the same file.
///
/// Marking an item complete never adds or removes lines, so a positional
/// comparison is enough.
pub fn changed_lines(before: &str, after: &str) -> Vec<ChangedLine> {
    before
        .lines()
        .zip(after.lines())
        .enumerate()
        .filter(|(_, (b, a))| b != a)
        .map(|(idx, (b, a))| ChangedLine {
            line: idx + 1,
            before: b.to_string(),
            after: a.to_string(),
        })
        .collect()
}

fn confirm_write(path: &Path, changes: &[ChangedLine]) -> Result<bool> {
    if !(io::stdin().is_terminal() && io::stdout().is_terminal()) {
        anyhow::bail!(
            "Refusing to modify {} without confirmation. Pass --yes to write, or --dry-run to preview.",
            path.display()
        );
    }

    for line in render_changes(changes) {
        println!("{}", line);
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Write changes to {}?", path.display()))
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Run the complete command.
pub async fn run(
    text: &str,
    path: Option<&str>,
    yes: bool,
    dry_run: bool,
    config: &RmapConfig,
    format: OutputFormat,
) -> Result<()> {
    let roadmap_path = locate::resolve_roadmap_path(path, config)?;
    if is_json_snapshot(&roadmap_path) {
        anyhow::bail!(
            "{} is a JSON snapshot; complete items in the markdown roadmap instead",
            roadmap_path.display()
        );
    }

    let before = fs::read_to_string(&roadmap_path)
        .with_context(|| format!("Failed to read {}", roadmap_path.display()))?;
    let after = complete_item(&roadmap_path, text, false)?;
    let changes = changed_lines(&before, &after);

    let write = !dry_run && (yes || confirm_write(&roadmap_path, &changes)?);
    if write {
        complete_item(&roadmap_path, text, true)?;
        tracing::info!(path = %roadmap_path.display(), item = text, "item completed");
    }

    let result = CompleteResult {
        path: roadmap_path.display().to_string(),
        item: text.to_string(),
        changes,
        written: write,
        next_active: active_item(&parse_roadmap_data(&after).items).map(|i| i.item_text.clone()),
    };

    Output::with_config(result, super::output_config(format, config)).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_lines() {
        let before = "## P\n- [>] A {id: a}\n- [ ] B\n";
        let after = "## P\n- [x] A {id: a}\n- [>] B\n";

        let changes = changed_lines(before, after);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].line, 2);
        assert_eq!(changes[0].after, "- [x] A {id: a}");
        assert_eq!(changes[1].before, "- [ ] B");
    }

    #[test]
    fn test_no_changes_when_already_done() {
        let text = "- [x] A\n";
        assert!(changed_lines(text, text).is_empty());
    }

    #[test]
    fn test_result_table() {
        colored::control::set_override(false);
        let result = CompleteResult {
            path: "ROADMAP.md".to_string(),
            item: "A".to_string(),
            changes: changed_lines("- [>] A\n- [ ] B\n", "- [x] A\n- [>] B\n"),
            written: true,
            next_active: Some("B".to_string()),
        };
        let table = TableDisplay::to_table(&result);

        assert!(table.starts_with("SUCCESS: Completed 'A' in ROADMAP.md"));
        assert!(table.contains("     1 - - [>] A"));
        assert!(table.contains("     2 + - [>] B"));
        assert!(table.ends_with("Active: B"));
    }
}
