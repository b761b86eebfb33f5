//! End-to-end scenarios: the plugin driving a real workspace.

use std::fs;

use parallax_core::host::OpenOptions;
use parallax_core::settings::{PairingMode, Settings};
use parallax_core::{DocumentRef, Error, Host, HostEvent, PaneId, Plugin, Position, Role, ViewKind};
use pretty_assertions::assert_eq;

use crate::document::Document;
use crate::vault::Vault;
use crate::workspace::Workspace;

const EN: &str = "Chapter one\n\
It was a dark and stormy night.\n\
The rain fell in torrents.\n\
Except at occasional intervals,\n\
when it was checked by a violent gust\n\
of wind which swept up the streets.\n";

const CN: &str = "第一章\n\
那是一个漆黑的暴风雨之夜。\n\
大雨倾盆而下。\n\
只是偶尔有间歇，\n\
被一阵猛烈的狂风阻挡，\n\
狂风席卷了街道。\n";

fn witte_vault() -> Vault {
    Vault::from_documents([
        Document::from_text("notes.md", "scratch\n"),
        Document::from_text("witte-cn.md", CN),
        Document::from_text("witte-en.md", EN),
    ])
}

fn plugin() -> Plugin {
    Plugin::new(Settings::default(), None)
}

fn editor(ws: &mut Workspace, name: &str) -> PaneId {
    let id = ws.add_pane(ViewKind::Empty).unwrap();
    ws.open_document(id, &DocumentRef::new(name), OpenOptions::editable())
        .unwrap();
    id
}

fn shown(ws: &Workspace, pane: PaneId) -> Option<String> {
    ws.pane(pane)
        .and_then(|p| p.document)
        .map(|d| d.to_string())
}

/// Forward queued events like a host would.
fn pump(ws: &mut Workspace, plugin: &Plugin) -> Vec<HostEvent> {
    let events = ws.drain_events();
    for event in &events {
        plugin.on_event(event);
    }
    events
}

// ── Layout initialization ────────────────────────────────────────────────

#[test]
fn no_editor_creates_one_right_pane() {
    let mut ws = Workspace::new(witte_vault());
    let explorer = ws.add_pane(ViewKind::Other).unwrap();
    let mut plugin = plugin();

    let out = plugin.on_layout_ready(&mut ws).unwrap();

    let right = out.created.unwrap();
    assert_eq!(ws.panes().len(), 2);
    assert_eq!(out.left, None);
    assert_eq!(plugin.manager().roles().left(), None);
    assert_eq!(plugin.manager().roles().right(), Some(right));
    assert_eq!(shown(&ws, right).as_deref(), Some("witte-cn.md"));
    assert_eq!(ws.pane(explorer).unwrap().view, ViewKind::Other);
    assert_eq!(ws.active_pane(), Some(right));
}

#[test]
fn one_editor_is_split_and_becomes_left() {
    let mut ws = Workspace::new(witte_vault());
    let draft = editor(&mut ws, "notes.md");
    let mut plugin = plugin();

    let out = plugin.on_layout_ready(&mut ws).unwrap();

    let right = out.created.unwrap();
    let ids: Vec<_> = ws.panes().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![draft, right]);
    assert_eq!(shown(&ws, draft).as_deref(), Some("witte-en.md"));
    assert_eq!(shown(&ws, right).as_deref(), Some("witte-cn.md"));
    assert_eq!(ws.active_pane(), Some(draft));
}

#[test]
fn two_editors_are_reused_in_enumeration_order() {
    let mut ws = Workspace::new(witte_vault());
    let a = editor(&mut ws, "notes.md");
    let b = editor(&mut ws, "notes.md");
    let c = editor(&mut ws, "notes.md");
    let mut plugin = plugin();

    let out = plugin.on_layout_ready(&mut ws).unwrap();

    assert_eq!(out.created, None);
    assert_eq!(ws.panes().len(), 3);
    assert_eq!(plugin.manager().roles().left(), Some(a));
    assert_eq!(plugin.manager().roles().right(), Some(b));
    assert_eq!(shown(&ws, a).as_deref(), Some("witte-en.md"));
    assert_eq!(shown(&ws, b).as_deref(), Some("witte-cn.md"));
    assert_eq!(shown(&ws, c).as_deref(), Some("notes.md"));
}

#[test]
fn rerunning_the_command_creates_nothing() {
    let mut ws = Workspace::new(witte_vault());
    editor(&mut ws, "notes.md");
    let mut plugin = plugin();
    plugin.on_layout_ready(&mut ws).unwrap();

    let again = plugin.on_layout_ready(&mut ws).unwrap();

    assert_eq!(again.created, None);
    assert_eq!(ws.panes().len(), 2);
}

// ── Document assignment ──────────────────────────────────────────────────

#[test]
fn named_pair_regardless_of_store_order() {
    let layouts = [
        ("a/witte-en.md", "b/witte-cn.md"),
        ("b/witte-en.md", "a/witte-cn.md"),
    ];
    for (en, cn) in layouts {
        let vault = Vault::from_documents([
            Document::from_text(en, EN),
            Document::from_text(cn, CN),
        ]);
        let mut ws = Workspace::new(vault);
        let left = editor(&mut ws, en);
        let mut plugin = plugin();

        let out = plugin.on_layout_ready(&mut ws).unwrap();

        assert_eq!(shown(&ws, left).as_deref(), Some(en));
        assert_eq!(shown(&ws, out.right).as_deref(), Some(cn));
    }
}

#[test]
fn missing_name_opens_nothing() {
    let vault = Vault::from_documents([
        Document::from_text("notes.md", ""),
        Document::from_text("witte-en.md", EN),
    ]);
    let mut ws = Workspace::new(vault);
    let a = editor(&mut ws, "notes.md");
    let b = editor(&mut ws, "notes.md");
    ws.drain_events();
    let mut plugin = plugin();

    let err = plugin.on_layout_ready(&mut ws).unwrap_err();

    assert_eq!(err, Error::DocumentNotFound("witte-cn.md".into()));
    assert!(ws.drain_events().is_empty());
    assert_eq!(shown(&ws, a).as_deref(), Some("notes.md"));
    assert_eq!(shown(&ws, b).as_deref(), Some("notes.md"));
    assert_eq!(
        ws.take_notices(),
        vec!["Parallax: document not found: witte-cn.md"]
    );
}

#[test]
fn convention_pairs_sibling_files() {
    let vault = Vault::from_documents([
        Document::from_text("essays/moon-cn.md", CN),
        Document::from_text("essays/moon-en.md", EN),
        Document::from_text("notes.md", ""),
    ]);
    let mut ws = Workspace::new(vault);
    let left = editor(&mut ws, "notes.md");
    ws.drain_events();
    let mut settings = Settings::default();
    settings.pairing = PairingMode::Convention;
    let mut plugin = Plugin::new(settings, None);

    let out = plugin.on_layout_ready(&mut ws).unwrap();

    assert_eq!(shown(&ws, left).as_deref(), Some("essays/moon-en.md"));
    assert_eq!(shown(&ws, out.right).as_deref(), Some("essays/moon-cn.md"));
    let events = pump(&mut ws, &plugin);
    assert_eq!(events.len(), 2);
}

// ── Mirroring ────────────────────────────────────────────────────────────

fn parallel() -> (Workspace, Plugin, PaneId, PaneId) {
    let mut ws = Workspace::new(witte_vault());
    let left = editor(&mut ws, "notes.md");
    let mut plugin = plugin();
    let out = plugin.on_layout_ready(&mut ws).unwrap();
    pump(&mut ws, &plugin);
    (ws, plugin, left, out.right)
}

#[test]
fn mirror_left_to_right() {
    let (mut ws, mut plugin, left, right) = parallel();
    ws.set_cursor(left, Position::new(5, 3)).unwrap();

    let done = plugin.mirror_active(&mut ws).unwrap();

    assert_eq!((done.from, done.to), (Role::Left, Role::Right));
    assert_eq!(ws.cursor(right).unwrap(), Position::new(5, 3));
    assert_eq!(ws.cursor(left).unwrap(), Position::new(5, 3));
    assert_eq!(ws.take_notices(), vec!["Cursor 6:4 mirrored to the right pane"]);
}

#[test]
fn mirror_right_to_left_keeps_scroll() {
    let (mut ws, mut plugin, left, right) = parallel();
    ws.scroll_to(left, 4).unwrap();
    ws.set_active_pane(right).unwrap();
    ws.set_cursor(right, Position::new(2, 1)).unwrap();

    let done = plugin.ribbon_clicked(&mut ws).unwrap();

    assert_eq!(done.to, Role::Left);
    assert_eq!(ws.cursor(left).unwrap(), Position::new(2, 1));
    assert_eq!(ws.pane_state(left).unwrap().scroll_top, 4);
}

#[test]
fn mirror_from_untracked_pane_acts_as_left() {
    let (mut ws, mut plugin, left, right) = parallel();
    let other = editor(&mut ws, "notes.md");
    ws.set_cursor(left, Position::new(1, 1)).unwrap();
    ws.set_cursor(other, Position::new(0, 2)).unwrap();

    let done = plugin.mirror_active(&mut ws).unwrap();

    assert_eq!(done.source, other);
    assert_eq!(done.target, right);
    assert_eq!(ws.cursor(right).unwrap(), Position::new(0, 2));
    assert_eq!(ws.cursor(left).unwrap(), Position::new(1, 1));
}

#[test]
fn mirror_with_closed_right_pane_is_stale() {
    let (mut ws, mut plugin, left, right) = parallel();
    ws.set_cursor(left, Position::new(3, 2)).unwrap();
    ws.close_pane(right).unwrap();
    let events = pump(&mut ws, &plugin);
    assert_eq!(events, vec![HostEvent::PaneClosed { pane: right }]);
    ws.set_active_pane(left).unwrap();

    let err = plugin.mirror_active(&mut ws).unwrap_err();

    assert_eq!(
        err,
        Error::StaleLayout {
            role: Role::Right,
            pane: Some(right),
        }
    );
    assert_eq!(ws.cursor(left).unwrap(), Position::new(3, 2));
    assert_eq!(
        ws.take_notices(),
        vec![format!("Parallax: not a left/right layout: right pane {right} is gone")]
    );
}

#[test]
fn mirror_target_is_clamped_to_shorter_document() {
    let (mut ws, mut plugin, left, right) = parallel();
    ws.set_cursor(left, Position::new(1, 30)).unwrap();

    plugin.mirror_active(&mut ws).unwrap();

    assert_eq!(ws.cursor(right).unwrap(), Position::new(1, 13));
}

#[test]
fn reopening_split_view_recovers_from_stale_layout() {
    let (mut ws, mut plugin, left, right) = parallel();
    ws.close_pane(right).unwrap();
    ws.set_active_pane(left).unwrap();

    let out = plugin.on_layout_ready(&mut ws).unwrap();

    let new_right = out.created.unwrap();
    assert_ne!(new_right, right);
    assert_eq!(plugin.manager().roles().right(), Some(new_right));
    ws.set_cursor(left, Position::new(4, 0)).unwrap();
    ws.take_notices();
    plugin.mirror_active(&mut ws).unwrap();
    assert_eq!(ws.cursor(new_right).unwrap(), Position::new(4, 0));
}

// ── Vault on disk ────────────────────────────────────────────────────────

#[test]
fn loads_vault_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("witte")).unwrap();
    fs::write(dir.path().join("witte/witte-en.md"), EN).unwrap();
    fs::write(dir.path().join("witte/witte-cn.md"), CN).unwrap();
    let mut ws = Workspace::new(Vault::open(dir.path()).unwrap());
    let mut plugin = plugin();

    let out = plugin.on_layout_ready(&mut ws).unwrap();

    assert_eq!(out.pair.left, DocumentRef::new("witte/witte-en.md"));
    assert_eq!(out.pair.right, DocumentRef::new("witte/witte-cn.md"));
}
