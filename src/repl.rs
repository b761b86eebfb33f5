// SPDX-License-Identifier: MIT
//
// Line commands for the interactive session.
//
// Each line read from stdin is parsed into a `Command`. Pane ids are the
// numbers `panes` prints; line and column numbers are 1-indexed, like the
// editor shows them.
//
//   | Command                | Action                                   |
//   |------------------------|------------------------------------------|
//   | `panes`                | List panes in enumeration order          |
//   | `roles`                | Show the Left/Right panes and the pair   |
//   | `docs`                 | List vault documents                     |
//   | `commands`             | List palette commands                    |
//   | `new`                  | Add an empty pane                        |
//   | `open <pane> <path>`   | Open a document in a pane                |
//   | `focus <pane>`         | Make a pane active                       |
//   | `close <pane>`         | Close a pane                             |
//   | `cursor <line> [col]`  | Move the active pane's cursor            |
//   | `scroll <pane> <line>` | Scroll a pane                            |
//   | `mirror`               | Mirror the active cursor                 |
//   | `ribbon`               | Click the ribbon icon                    |
//   | `split`                | Re-run the split view command            |
//   | `run <command-id>`     | Run any palette command by id            |
//   | `uri k=v ...`          | Dispatch a URI action                    |
//   | `settings`             | Show the settings form                   |
//   | `set <key> <value>`    | Change a setting                         |
//   | `help`                 | Show this table                          |
//   | `quit` / `q`           | Leave                                    |

use std::collections::BTreeMap;
use std::path::PathBuf;

use parallax_core::command::CommandId;
use parallax_core::{PaneId, Position};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Panes,
    Roles,
    Documents,
    Commands,
    New,
    Open { pane: PaneId, path: PathBuf },
    Focus(PaneId),
    Close(PaneId),
    Cursor(Position),
    Scroll { pane: PaneId, line: usize },
    Run(CommandId),
    Ribbon,
    Uri(BTreeMap<String, String>),
    Settings,
    Set { key: String, value: String },
    Help,
    Quit,

    /// Blank input.
    Empty,

    /// Anything unrecognised, with a hint for the user.
    Invalid(String),
}

pub const HELP: &str = "\
panes | roles | docs | commands | new | open <pane> <path> | focus <pane> | close <pane>
cursor <line> [col] | scroll <pane> <line> | mirror | ribbon | split | run <id>
uri action=mirror [line=N col=N] | uri action=open-split
settings | set <key> <value> | help | quit";

/// Parse one input line.
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let (cmd, arg) = trimmed
        .find(char::is_whitespace)
        .map_or((trimmed, ""), |pos| (&trimmed[..pos], trimmed[pos..].trim_start()));

    match cmd {
        "panes" => Command::Panes,
        "roles" => Command::Roles,
        "docs" => Command::Documents,
        "commands" => Command::Commands,
        "new" => Command::New,
        "open" => parse_open(arg),
        "focus" => pane_arg(arg, Command::Focus),
        "close" => pane_arg(arg, Command::Close),
        "cursor" => parse_cursor(arg),
        "scroll" => parse_scroll(arg),
        "mirror" => Command::Run(CommandId::MirrorCursor),
        "split" => Command::Run(CommandId::OpenSplitView),
        "run" => CommandId::parse(arg).map_or_else(
            || Command::Invalid(format!("unknown command id `{arg}`")),
            Command::Run,
        ),
        "ribbon" => Command::Ribbon,
        "uri" => parse_uri(arg),
        "settings" => Command::Settings,
        "set" => parse_set(arg),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Invalid(format!("unknown command `{cmd}`, try `help`")),
    }
}

fn parse_number(word: Option<&str>) -> Option<usize> {
    word?.parse().ok()
}

fn pane_arg(arg: &str, make: fn(PaneId) -> Command) -> Command {
    parse_number(Some(arg)).map_or_else(|| Command::Invalid("expected a pane id".into()), make)
}

fn parse_open(arg: &str) -> Command {
    let Some((pane, path)) = arg.split_once(char::is_whitespace) else {
        return Command::Invalid("usage: open <pane> <path>".into());
    };
    match pane.parse() {
        Ok(pane) => Command::Open {
            pane,
            path: PathBuf::from(path.trim()),
        },
        Err(_) => Command::Invalid(format!("`{pane}` is not a pane id")),
    }
}

fn parse_cursor(arg: &str) -> Command {
    let mut words = arg.split_whitespace();
    let line = parse_number(words.next());
    let col = match words.next() {
        None => Some(1),
        word => parse_number(word),
    };
    match (line, col) {
        (Some(line), Some(col)) if line > 0 && col > 0 => {
            Command::Cursor(Position::from_one_based(line, col))
        }
        _ => Command::Invalid("usage: cursor <line> [col], both from 1".into()),
    }
}

fn parse_scroll(arg: &str) -> Command {
    let mut words = arg.split_whitespace();
    match (parse_number(words.next()), parse_number(words.next())) {
        (Some(pane), Some(line)) if line > 0 => Command::Scroll {
            pane,
            line: line - 1,
        },
        _ => Command::Invalid("usage: scroll <pane> <line>".into()),
    }
}

fn parse_uri(arg: &str) -> Command {
    let mut params = BTreeMap::new();
    for pair in arg.split(['&', ' ']).filter(|p| !p.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            return Command::Invalid(format!("`{pair}` is not key=value"));
        };
        params.insert(key.to_string(), value.to_string());
    }
    Command::Uri(params)
}

fn parse_set(arg: &str) -> Command {
    match arg.split_once(char::is_whitespace) {
        Some((key, value)) => Command::Set {
            key: key.to_string(),
            value: value.trim().to_string(),
        },
        // An empty value clears text fields.
        None if !arg.is_empty() => Command::Set {
            key: arg.to_string(),
            value: String::new(),
        },
        None => Command::Invalid("usage: set <key> <value>".into()),
    }
}
