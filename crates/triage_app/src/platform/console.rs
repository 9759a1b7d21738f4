//! Line-oriented command parsing for the interactive session.

use std::borrow::Cow;
use std::io::{self, BufRead};
use std::path::PathBuf;

use triage_logging::triage_warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A plain line, appended to the email text.
    AppendText(String),
    ClearText,
    PickFile(PathBuf),
    DropFiles(Vec<PathBuf>),
    DragEnter,
    DragLeave,
    RemoveFile,
    Submit,
    Copy,
    CopyAndClear,
    EditReply(String),
    ToggleRaw,
    Health,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &[&str] = &[
    "Type or paste the email; plain lines are appended to the text box.",
    "  :file <path>          pick a .txt/.pdf file (max 2 MB)",
    "  :drop <path>...       drop files on the drop zone (first one is used)",
    "  :drag / :leave        drag over / away from the drop zone",
    "  :remove               remove the selected file and text",
    "  :clear                clear the text box",
    "  :send                 analyze the email",
    "  :copy / :copy-clear   copy the reply (and clear the inputs)",
    "  :reply <text>         replace the generated reply",
    "  :raw                  show or hide the raw server response",
    "  :health               check that the server is reachable",
    "  :help / :quit",
    "Start a text line with '::' to enter a literal ':'.",
];

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(literal) = line.strip_prefix("::") {
        return Command::AppendText(format!(":{literal}"));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Command::AppendText(line.to_string());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match (name, rest) {
        ("file", path) if !path.is_empty() => Command::PickFile(PathBuf::from(path)),
        ("drop", paths) if !paths.is_empty() => {
            Command::DropFiles(paths.split_whitespace().map(PathBuf::from).collect())
        }
        ("drag", "") => Command::DragEnter,
        ("leave", "") => Command::DragLeave,
        ("remove", "") => Command::RemoveFile,
        ("clear", "") => Command::ClearText,
        ("send", "") => Command::Submit,
        ("copy", "") => Command::Copy,
        ("copy-clear", "") => Command::CopyAndClear,
        ("reply", text) => Command::EditReply(text.to_string()),
        ("raw", "") => Command::ToggleRaw,
        ("health", "") => Command::Health,
        ("help", "") | ("h", "") | ("?", "") => Command::Help,
        ("quit", "") | ("q", "") | ("exit", "") => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Parses each input line and hands it to `emit` until input ends or `emit` returns false.
///
/// Invalid UTF-8 is replaced with U+FFFD and never ends the input.
pub fn read_commands<R: BufRead>(
    mut reader: R,
    mut emit: impl FnMut(Command) -> bool,
) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            triage_warn!("Input line was not valid UTF-8; invalid bytes replaced");
        }
        if !emit(parse_line(&line)) {
            return Ok(());
        }
    }
}

/// Appends a pasted line to the current text box contents.
pub fn append_line(current: &str, line: &str) -> String {
    if current.is_empty() {
        line.to_string()
    } else {
        format!("{current}\n{line}")
    }
}
