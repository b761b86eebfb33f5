// SPDX-License-Identifier: MIT
//
// parallax — two documents side by side, cursors kept in step.
//
// This is the main binary that wires the crates together:
//
//   parallax-core      → roles, layout, document pairing, cursor mirroring
//   parallax-workspace → in-memory panes and documents loaded from a vault
//
// The workspace plays the host. Startup mirrors a plugin being enabled:
//
//   settings → Plugin::load → vault → restore panes → on_layout_ready
//
// Then every stdin line flows through:
//
//   parse_command → Session::execute → workspace / plugin
//   drain events → Plugin::on_event      drain notices → stdout

mod repl;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use parallax_core::host::OpenOptions;
use parallax_core::{DocumentRef, Host, HostError, Plugin, SplitDirection, ViewKind};
use parallax_workspace::{Vault, Workspace};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::repl::{Command, HELP, parse_command};

/// parallax - parallel reading of two markdown documents
#[derive(Parser, Debug)]
#[command(name = "parallax")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Vault directory; every `*.md` file below it is a document
    #[arg(long, value_name = "DIR", default_value = ".")]
    vault: PathBuf,

    /// Settings file (default: <config dir>/parallax/settings.toml)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Split direction for this session, overriding the settings
    #[arg(long, value_name = "horizontal|vertical")]
    direction: Option<SplitDirection>,

    /// Documents to restore into editor panes before the layout runs
    #[arg(long = "open", value_name = "DOC")]
    restore: Vec<PathBuf>,
}

// ─── Session ────────────────────────────────────────────────────────────────

/// Whether the read loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The host workspace and the plugin running inside it.
struct Session {
    workspace: Workspace,
    plugin: Plugin,
}

impl Session {
    const fn new(workspace: Workspace, plugin: Plugin) -> Self {
        Self { workspace, plugin }
    }

    /// Open each document in its own editor pane, as a restored workspace
    /// would have them.
    fn restore(&mut self, documents: &[PathBuf]) -> Result<(), HostError> {
        for path in documents {
            let pane = self.workspace.add_pane(ViewKind::Empty)?;
            self.workspace
                .open_document(pane, &DocumentRef::new(path), OpenOptions::editable())?;
        }
        Ok(())
    }

    /// Forward queued workspace events to the plugin and print notices.
    fn pump(&mut self, out: &mut impl Write) -> io::Result<()> {
        for event in self.workspace.drain_events() {
            self.plugin.on_event(&event);
        }
        for notice in self.workspace.take_notices() {
            writeln!(out, "! {notice}")?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        debug!(?command, "executing");
        let outcome = match command {
            Command::Empty => Ok(()),
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                Ok(())
            }
            Command::Invalid(message) => {
                writeln!(out, "{message}")?;
                Ok(())
            }
            Command::Panes => {
                self.print_panes(out)?;
                Ok(())
            }
            Command::Roles => {
                self.print_roles(out)?;
                Ok(())
            }
            Command::Documents => {
                for doc in self.workspace.documents() {
                    writeln!(out, "{doc}")?;
                }
                Ok(())
            }
            Command::Commands => {
                for cmd in parallax_core::command::CommandId::ALL {
                    writeln!(out, "{:<24} {}", cmd.id(), cmd.name())?;
                }
                Ok(())
            }
            Command::Settings => {
                self.print_settings(out)?;
                Ok(())
            }
            Command::New => match self.workspace.add_pane(ViewKind::Empty) {
                Ok(id) => {
                    writeln!(out, "pane {id}")?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Command::Open { pane, path } => {
                self.workspace
                    .open_document(pane, &DocumentRef::new(path), OpenOptions::editable())
            }
            Command::Focus(pane) => self.workspace.set_active_pane(pane),
            Command::Close(pane) => self.workspace.close_pane(pane),
            Command::Scroll { pane, line } => self.workspace.scroll_to(pane, line),
            Command::Cursor(position) => match self.workspace.active_pane() {
                Some(pane) => self.workspace.set_cursor(pane, position),
                None => {
                    writeln!(out, "no active pane")?;
                    Ok(())
                }
            },
            // Plugin failures are already shown as notices.
            Command::Run(id) => {
                self.plugin.run_command(&mut self.workspace, id).ok();
                Ok(())
            }
            Command::Ribbon => {
                self.plugin.ribbon_clicked(&mut self.workspace).ok();
                Ok(())
            }
            Command::Uri(params) => {
                self.plugin.handle_uri(&mut self.workspace, &params).ok();
                Ok(())
            }
            Command::Set { key, value } => {
                match self.plugin.update_setting(&key, &value) {
                    Ok(()) => writeln!(out, "{key} updated")?,
                    Err(e) => writeln!(out, "error: {e}")?,
                }
                Ok(())
            }
        };

        if let Err(e) = outcome {
            writeln!(out, "error: {e}")?;
        }
        self.pump(out)?;
        Ok(Flow::Continue)
    }

    fn print_panes(&self, out: &mut impl Write) -> io::Result<()> {
        let roles = self.plugin.manager().roles();
        let active = self.workspace.active_pane();
        for info in self.workspace.panes() {
            let marker = if active == Some(info.id) { '*' } else { ' ' };
            let role = roles
                .role_of(info.id)
                .map_or_else(String::new, |r| format!("[{r}]"));
            let view = match info.view {
                ViewKind::Editor => "editor",
                ViewKind::Empty => "empty",
                ViewKind::Other => "other",
            };
            let document = info.document.map(|d| d.to_string()).unwrap_or_default();
            let cursor = self
                .workspace
                .cursor(info.id)
                .map(|p| p.to_string())
                .unwrap_or_default();
            writeln!(out, "{marker}{:>3} {role:<7} {view:<6} {document} {cursor}", info.id)?;
        }
        Ok(())
    }

    fn print_roles(&self, out: &mut impl Write) -> io::Result<()> {
        let session = self.plugin.manager().session();
        for tracked in session.roles().tracked() {
            writeln!(out, "{:<6} pane {}", tracked.role.to_string(), tracked.id)?;
        }
        if !session.roles().is_complete() {
            writeln!(out, "not a left/right layout")?;
        }
        if let Some(pair) = session.pair() {
            writeln!(out, "pair   {} | {}", pair.left, pair.right)?;
        }
        Ok(())
    }

    fn print_settings(&self, out: &mut impl Write) -> io::Result<()> {
        let settings = self.plugin.settings();
        for field in settings.form() {
            let value = if field.value.is_empty() { "(unset)" } else { "(set)" };
            writeln!(out, "{:<18} {value:<8} {}", field.key, field.name)?;
        }
        writeln!(out, "{:<18} {}", "direction", self.plugin.direction())?;
        writeln!(out, "{:<18} {}", "close_other", settings.close_other)?;
        writeln!(out, "{:<18} {}", "pairing", settings.pairing)?;
        writeln!(out, "{:<18} {}", "left_file", settings.left_file)?;
        writeln!(out, "{:<18} {}", "right_file", settings.right_file)?;
        writeln!(out, "{:<18} {}", "left_suffix", settings.left_suffix)?;
        writeln!(out, "{:<18} {}", "right_suffix", settings.right_suffix)?;
        Ok(())
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut out = io::stdout().lock();

    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if session.execute(parse_command(&line), &mut out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let settings_path = cli.settings.or_else(parallax_core::settings::Settings::default_path);
    let mut plugin = Plugin::load(settings_path).context("failed to load settings")?;
    if let Some(direction) = cli.direction {
        plugin.override_direction(direction);
    }

    let vault = Vault::open(&cli.vault)
        .with_context(|| format!("failed to open vault {}", cli.vault.display()))?;
    let mut session = Session::new(Workspace::new(vault), plugin);
    info!(documents = session.workspace.vault().len(), "starting");
    session
        .restore(&cli.restore)
        .context("failed to restore panes")?;

    // Layout failures are reported as notices, not fatal.
    session.plugin.on_layout_ready(&mut session.workspace).ok();
    session.pump(&mut io::stdout().lock())?;

    run(&mut session)?;
    session.plugin.on_unload();
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
