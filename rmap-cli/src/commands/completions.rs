//! Completions command - Print shell completion scripts for `rmap`

use std::io;

use clap::Command;
use clap_complete::{generate, Shell};
use colored::Colorize;
use serde::Serialize;

use crate::output::{Output, OutputFormat, TableDisplay};

const BIN_NAME: &str = "rmap";

/// How to install the completion script for one shell.
#[derive(Debug, Serialize)]
pub struct CompletionInstructions {
    pub shell: String,
    /// Shell commands, with `#` comment lines between them
    pub steps: Vec<String>,
}

impl TableDisplay for CompletionInstructions {
    fn to_table(&self) -> String {
        let mut lines = vec![
            format!("Completions for {} in {}", BIN_NAME.cyan().bold(), self.shell.yellow()),
            String::new(),
        ];
        lines.extend(self.steps.iter().map(|step| {
            if step.starts_with('#') {
                format!("  {}", step.dimmed())
            } else {
                format!("  {}", step)
            }
        }));
        lines.join("\n")
    }

    fn to_markdown(&self) -> String {
        format!("## {} completions\n\n```sh\n{}\n```", self.shell, self.steps.join("\n"))
    }
}

/// Installation steps for `shell`.
fn install_steps(shell: Shell) -> Vec<String> {
    let gen = format!("{} completions {}", BIN_NAME, shell);
    let steps: &[&str] = match shell {
        Shell::Bash => &[
            "# load on startup from ~/.bashrc",
            "eval \"$({gen})\"",
            "# or install for bash-completion",
            "{gen} > ~/.local/share/bash-completion/completions/{bin}",
        ],
        Shell::Zsh => &[
            "# write into a directory on $fpath, before compinit runs",
            "{gen} > ~/.zfunc/_{bin}",
            "fpath=(~/.zfunc $fpath)",
        ],
        Shell::Fish => &["{gen} > ~/.config/fish/completions/{bin}.fish"],
        Shell::PowerShell => &[
            "# append to $PROFILE",
            "Invoke-Expression (& {gen} | Out-String)",
        ],
        Shell::Elvish => &["# append to ~/.elvish/rc.elv", "eval ({gen} | slurp)"],
        _ => &["{gen}"],
    };

    steps
        .iter()
        .map(|s| s.replace("{gen}", &gen).replace("{bin}", BIN_NAME))
        .collect()
}

/// Write the completion script for `shell` to stdout.
///
/// Takes the full clap command because only main can build it.
pub fn generate_completions_with_cmd(shell: Shell, cmd: &mut Command) {
    generate(shell, cmd, BIN_NAME, &mut io::stdout());
}

/// Print installation instructions for `shell`.
pub fn run(shell: Shell, format: OutputFormat) -> anyhow::Result<()> {
    let instructions = CompletionInstructions {
        shell: shell.to_string(),
        steps: install_steps(shell),
    };
    Output::new(instructions, format).render()
}
