//! Plugin facade — the entry points the host calls.
//!
//! Lifecycle: [`Plugin::load`] when the plugin is enabled,
//! [`Plugin::on_layout_ready`] once the workspace has restored its panes,
//! [`Plugin::on_event`] for every workspace event, and [`Plugin::on_unload`]
//! on teardown. Palette commands, the ribbon icon, and URI actions funnel
//! into the same two operations: initialize the layout, mirror the cursor.
//!
//! Every failure is logged and shown as a notice. Results are returned so
//! callers (and tests) can inspect them, but nothing here panics or asks
//! the host to stop.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::assign::{self, PairingPolicy};
use crate::command::{CommandId, UriAction};
use crate::error::{Error, Result};
use crate::host::{Host, HostEvent, SplitDirection};
use crate::layout::LayoutOutcome;
use crate::manager::LayoutManager;
use crate::settings::{Settings, SettingsError};
use crate::sync::Mirrored;

pub struct Plugin {
    manager: LayoutManager,
    settings: Settings,
    settings_path: Option<PathBuf>,
    /// Session-only split direction; never written to the settings file.
    direction: Option<SplitDirection>,
}

impl Plugin {
    /// A plugin with the given settings. Settings edits are written to
    /// `settings_path` when one is given.
    #[must_use]
    pub fn new(settings: Settings, settings_path: Option<PathBuf>) -> Self {
        Self {
            manager: LayoutManager::new(),
            settings,
            settings_path,
            direction: None,
        }
    }

    /// Load settings from `settings_path` (defaults when absent).
    ///
    /// # Errors
    ///
    /// Fails when the settings file exists but cannot be read or parsed.
    pub fn load(settings_path: Option<PathBuf>) -> std::result::Result<Self, SettingsError> {
        let settings = match &settings_path {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        Ok(Self::new(settings, settings_path))
    }

    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub const fn manager(&self) -> &LayoutManager {
        &self.manager
    }

    /// Split in `direction` for the rest of the session, whatever the
    /// settings say.
    pub const fn override_direction(&mut self, direction: SplitDirection) {
        self.direction = Some(direction);
    }

    /// The direction the next split will use.
    #[must_use]
    pub fn direction(&self) -> SplitDirection {
        self.direction.unwrap_or(self.settings.direction)
    }

    // -- Lifecycle ------------------------------------------------------------

    /// Build the parallel view once the workspace is ready.
    ///
    /// # Errors
    ///
    /// The initializer's error, after it has been reported.
    pub fn on_layout_ready<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<LayoutOutcome> {
        let policy = self.settings.pairing_policy();
        let direction = self.direction();
        let result = self.manager.ensure_split_layout(host, direction, &policy);
        match &result {
            Ok(out) => info!(
                left = %out.pair.left,
                right = %out.pair.right,
                created = ?out.created,
                "parallel view ready"
            ),
            Err(e) => report(host, "layout initialization failed", e),
        }
        result
    }

    /// React to a workspace event.
    ///
    /// Tracked panes closing are only logged; the roles keep pointing at the
    /// closed pane until the next layout initialization, and mirroring
    /// reports the layout as stale in the meantime.
    pub fn on_event(&self, event: &HostEvent) {
        let roles = self.manager.roles();
        match event {
            HostEvent::DocumentOpened { pane, document } => {
                let Some(role) = roles.role_of(*pane) else {
                    debug!(pane, %document, "document opened outside the parallel view");
                    return;
                };
                debug!(%role, pane, %document, "document opened in parallel view");
                if let PairingPolicy::Convention {
                    left_suffix,
                    right_suffix,
                } = self.settings.pairing_policy()
                {
                    let name = document.name();
                    let counterpart = assign::counterpart_name(name, &left_suffix, &right_suffix)
                        .or_else(|| assign::counterpart_name(name, &right_suffix, &left_suffix));
                    if let Some(counterpart) = counterpart {
                        debug!(%document, %counterpart, "counterpart by naming convention");
                    }
                }
            }
            HostEvent::PaneClosed { pane } => {
                if let Some(role) = roles.role_of(*pane) {
                    warn!(%role, pane, "tracked pane closed, the parallel layout is stale");
                }
            }
        }
    }

    /// Forget all session state.
    pub fn on_unload(&mut self) {
        info!("unloading");
        self.manager.reset();
    }

    // -- Actions --------------------------------------------------------------

    /// Run a palette command.
    ///
    /// # Errors
    ///
    /// The command's error, after it has been reported.
    pub fn run_command<H: Host + ?Sized>(&mut self, host: &mut H, command: CommandId) -> Result<()> {
        debug!(%command, "running command");
        match command {
            CommandId::MirrorCursor => self.mirror_active(host).map(|_| ()),
            CommandId::OpenSplitView => self.on_layout_ready(host).map(|_| ()),
        }
    }

    /// The ribbon icon: mirror from the active pane, or the most recent one
    /// when nothing has focus.
    ///
    /// # Errors
    ///
    /// As [`Self::mirror_active`].
    pub fn ribbon_clicked<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<Mirrored> {
        self.mirror_active(host)
    }

    /// Mirror the active cursor and confirm with a notice either way.
    ///
    /// # Errors
    ///
    /// [`Error::NoActiveDocument`] or [`Error::StaleLayout`], after they
    /// have been reported.
    pub fn mirror_active<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<Mirrored> {
        let result = self.manager.mirror_from_active(host);
        match &result {
            Ok(done) => host.notice(&format!(
                "Cursor {} mirrored to the {} pane",
                done.position, done.to
            )),
            Err(e) => report(host, "mirroring skipped", e),
        }
        result
    }

    /// Handle a URI action.
    ///
    /// # Errors
    ///
    /// [`Error::Uri`] for a malformed parameter map, otherwise the error of
    /// the command it runs. All are reported before returning.
    pub fn handle_uri<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        params: &BTreeMap<String, String>,
    ) -> Result<()> {
        let action = match UriAction::from_params(params) {
            Ok(action) => action,
            Err(e) => {
                let e = Error::from(e);
                report(host, "rejected URI action", &e);
                return Err(e);
            }
        };

        if let Some(cursor) = action.cursor {
            let placed = host
                .active_pane()
                .ok_or(Error::NoActiveDocument)
                .and_then(|pane| host.set_cursor(pane, cursor).map_err(Error::from));
            if let Err(e) = placed {
                report(host, "cannot place cursor", &e);
                return Err(e);
            }
        }

        self.run_command(host, action.command)
    }

    /// Edit one setting and persist the result.
    ///
    /// # Errors
    ///
    /// Invalid keys or values, or a failed save. The in-memory value is kept
    /// even when saving fails.
    pub fn update_setting(&mut self, key: &str, value: &str) -> std::result::Result<(), SettingsError> {
        self.settings.set_field(key, value)?;
        if let Some(path) = &self.settings_path {
            self.settings.save(path)?;
        }
        debug!(key, "setting updated");
        Ok(())
    }
}

fn report<H: Host + ?Sized>(host: &mut H, context: &str, error: &Error) {
    warn!(%error, "{context}");
    host.notice(&format!("Parallax: {error}"));
}
