use anyhow::{Context, Result};
use life_system_seeding::TextFormat;
use std::{
    fs,
    io::{self, BufRead, IsTerminal},
    path::Path,
};

/// Reads grid text from `path`.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read grid from {}", path.display()))
}

/// Reads grid text from standard input.
///
/// The grid ends at the first empty line or at the end of input. An
/// interactive terminal also gets a prompt.
pub(crate) fn read_stdin(format: &TextFormat, prompt: bool) -> Result<String> {
    let stdin = io::stdin();
    if prompt && stdin.is_terminal() {
        eprintln!(
            "Enter the grid one row per line using '{}' for live and '{}' for dead cells.\n\
             Every row must have the same length. Finish with an empty line.",
            format.live(),
            format.dead()
        );
    }
    read_until_blank(stdin.lock())
}

fn read_until_blank<R: BufRead>(reader: R) -> Result<String> {
    let mut text = String::new();
    for line in reader.lines() {
        let line = line.context("failed to read grid from standard input")?;
        if line.is_empty() {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}
