#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::MIN_SIZE;
use crate::geometry::ResizeHandle;
use crate::storage::MemoryStore;

// =============================================================
// Helpers
// =============================================================

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn ctrl_modifier() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn key(name: &str) -> Key {
    Key(name.to_owned())
}

fn has_action(actions: &[Action], pred: impl Fn(&Action) -> bool) -> bool {
    actions.iter().any(pred)
}

fn committed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::HistoryChanged { .. }))
}

fn bounds_of(core: &EditorCore, id: &str) -> Bounds {
    core.section(id).map(Section::bounds).unwrap_or_default()
}

/// Press, move, and release the primary button.
fn drag(core: &mut EditorCore, from: Point, to: Point) -> Vec<Action> {
    core.on_pointer_down(from, Button::Primary, no_modifiers());
    core.on_pointer_move(to, no_modifiers());
    core.on_pointer_up(to, Button::Primary, no_modifiers())
}

fn bakery() -> SectionTemplate {
    templates::find_template("Bakery").unwrap_or_else(|| SectionTemplate::new("Bakery", "🍞", "", ""))
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_core_starts_with_default_layout() {
    let core = EditorCore::new();
    assert_eq!(core.canvas, templates::default_sections());
    assert_eq!(core.history.len(), 1);
    assert_eq!(core.input, InputState::Idle);
    assert_eq!(core.selection(), None);
    assert!(!core.can_undo());
}

#[test]
fn from_restored_adopts_state() {
    let restored = Restored {
        canvas: CanvasState::new(),
        history: History::new(CanvasState::new()),
        camera: Camera { pan_x: 1.0, pan_y: 2.0, zoom: 2.0 },
    };
    let core = EditorCore::from_restored(restored);
    assert!(core.canvas.is_empty());
    assert_eq!(core.camera.zoom, 2.0);
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn drag_moves_section_and_commits_once() {
    let mut core = EditorCore::new();
    let actions = drag(&mut core, pt(100.0, 100.0), pt(120.0, 110.0));
    assert_eq!(bounds_of(&core, "produce"), Bounds::new(70, 60, 300, 200));
    assert!(committed(&actions));
    assert_eq!(core.history.len(), 2);
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn pointer_down_on_body_selects_and_starts_drag() {
    let mut core = EditorCore::new();
    let actions = core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert_eq!(core.selection(), Some("produce"));
    assert!(matches!(core.input, InputState::DraggingSection { ref id, grab, .. } if id == "produce" && grab == CanvasPoint::new(50, 50)));
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(Some("produce".into()))));
    assert!(has_action(&actions, |a| *a == Action::SetCursor("move".into())));
}

#[test]
fn live_drag_does_not_commit() {
    let mut core = EditorCore::new();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_move(pt(150.0, 100.0), no_modifiers());
    assert!(has_action(&actions, |a| *a == Action::SectionsChanged));
    assert!(!committed(&actions));
    assert_eq!(core.history.len(), 1);
    assert_eq!(bounds_of(&core, "produce").x, 100);
}

#[test]
fn drag_clamps_to_canvas() {
    let mut core = EditorCore::new();
    drag(&mut core, pt(100.0, 100.0), pt(-500.0, -500.0));
    assert_eq!(bounds_of(&core, "produce"), Bounds::new(0, 0, 300, 200));
}

#[test]
fn drag_back_to_start_commits_nothing() {
    let mut core = EditorCore::new();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    core.on_pointer_move(pt(200.0, 150.0), no_modifiers());
    core.on_pointer_move(pt(100.0, 100.0), no_modifiers());
    let actions = core.on_pointer_up(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(!committed(&actions));
    assert_eq!(core.history.len(), 1);
}

#[test]
fn click_without_move_commits_nothing() {
    let mut core = EditorCore::new();
    let actions = drag(&mut core, pt(100.0, 100.0), pt(100.0, 100.0));
    assert!(!committed(&actions));
    assert_eq!(core.selection(), Some("produce"));
}

#[test]
fn drag_respects_zoom_and_pan() {
    let mut core = EditorCore::new();
    core.camera = Camera { pan_x: 100.0, pan_y: 0.0, zoom: 2.0 };
    // Canvas (100, 100) is screen (300, 200).
    drag(&mut core, pt(300.0, 200.0), pt(340.0, 220.0));
    assert_eq!(bounds_of(&core, "produce"), Bounds::new(70, 60, 300, 200));
}

#[test]
fn second_pointer_down_during_drag_is_ignored() {
    let mut core = EditorCore::new();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    let actions = core.on_pointer_down(pt(400.0, 100.0), Button::Primary, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.selection(), Some("produce"));
}

// =============================================================
// Resizing
// =============================================================

#[test]
fn resize_nw_handle_keeps_opposite_corner() {
    let mut core = EditorCore::new();
    core.select(Some("dairy".into()));
    let actions = drag(&mut core, pt(1030.0, 50.0), pt(1090.0, 80.0));
    assert_eq!(bounds_of(&core, "dairy"), Bounds::new(1090, 80, 60, 270));
    assert!(committed(&actions));
}

#[test]
fn pointer_down_on_handle_sets_resize_cursor() {
    let mut core = EditorCore::new();
    let actions = core.on_pointer_down(pt(350.0, 250.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::ResizingSection { handle: ResizeHandle::Se, .. }));
    assert!(has_action(&actions, |a| *a == Action::SetCursor("se-resize".into())));
}

#[test]
fn resize_stops_at_min_size() {
    let mut core = EditorCore::new();
    drag(&mut core, pt(350.0, 250.0), pt(0.0, 0.0));
    let b = bounds_of(&core, "produce");
    assert_eq!((b.x, b.y, b.width, b.height), (50, 50, MIN_SIZE, MIN_SIZE));
}

#[test]
fn resize_to_same_bounds_commits_nothing() {
    let mut core = EditorCore::new();
    let actions = drag(&mut core, pt(350.0, 250.0), pt(350.0, 250.0));
    assert!(!committed(&actions));
}

// =============================================================
// Panning and empty-canvas clicks
// =============================================================

#[test]
fn click_on_empty_canvas_clears_selection() {
    let mut core = EditorCore::new();
    core.select(Some("deli".into()));
    let actions = core.on_pointer_down(pt(600.0, 500.0), Button::Primary, no_modifiers());
    assert_eq!(core.selection(), None);
    assert!(has_action(&actions, |a| *a == Action::SelectionChanged(None)));
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn middle_button_pans_and_persists_view_on_release() {
    let mut core = EditorCore::new();
    core.on_pointer_down(pt(600.0, 500.0), Button::Middle, no_modifiers());
    assert!(matches!(core.input, InputState::Panning { .. }));
    core.on_pointer_move(pt(650.0, 470.0), no_modifiers());
    assert_eq!((core.camera.pan_x, core.camera.pan_y), (50.0, -30.0));
    let actions = core.on_pointer_up(pt(650.0, 470.0), Button::Middle, no_modifiers());
    assert!(has_action(&actions, |a| matches!(a, Action::ViewChanged(c) if c.pan_x == 50.0)));
    assert!(!committed(&actions));
}

#[test]
fn alt_primary_on_empty_canvas_pans() {
    let mut core = EditorCore::new();
    let alt = Modifiers { alt: true, ..Default::default() };
    core.on_pointer_down(pt(600.0, 500.0), Button::Primary, alt);
    assert!(matches!(core.input, InputState::Panning { .. }));
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = EditorCore::new();
    let actions = core.on_pointer_down(pt(100.0, 100.0), Button::Secondary, no_modifiers());
    assert!(actions.is_empty());
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn idle_move_and_up_are_noops() {
    let mut core = EditorCore::new();
    assert!(core.on_pointer_move(pt(10.0, 10.0), no_modifiers()).is_empty());
    assert!(core.on_pointer_up(pt(10.0, 10.0), Button::Primary, no_modifiers()).is_empty());
}

// =============================================================
// Template drop
// =============================================================

#[test]
fn template_drop_inside_canvas_creates_section() {
    let mut core = EditorCore::new();
    core.on_template_pointer_down(bakery());
    core.on_pointer_move(pt(500.0, 500.0), no_modifiers());
    assert_eq!(core.ghost_preview(), Some(Bounds::new(450, 450, 200, 150)));
    let actions = core.on_pointer_up(pt(500.0, 500.0), Button::Primary, no_modifiers());

    assert!(committed(&actions));
    assert_eq!(core.canvas.len(), 7);
    let created = &core.canvas.sections()[6];
    assert_eq!(created.bounds(), Bounds::new(450, 450, 200, 150));
    assert_eq!(created.name, "Bakery");
    assert!(created.id.starts_with("section-"));
    assert_eq!(core.selection(), Some(created.id.as_str()));
    assert_eq!(core.ghost_preview(), None);
}

#[test]
fn template_drop_outside_canvas_is_discarded() {
    let mut core = EditorCore::new();
    core.on_template_pointer_down(bakery());
    core.on_pointer_move(pt(1300.0, 100.0), no_modifiers());
    let actions = core.on_pointer_up(pt(1300.0, 100.0), Button::Primary, no_modifiers());
    assert!(!committed(&actions));
    assert_eq!(core.canvas.len(), 6);
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn template_drop_checks_unrounded_pointer() {
    let mut core = EditorCore::new();
    core.on_template_pointer_down(bakery());
    let actions = core.on_pointer_up(pt(1200.4, 100.0), Button::Primary, no_modifiers());
    assert!(!committed(&actions));
    assert_eq!(core.canvas.len(), 6);

    core.on_template_pointer_down(bakery());
    let actions = core.on_pointer_up(pt(1200.0, 600.0), Button::Primary, no_modifiers());
    assert!(committed(&actions));
    assert_eq!(core.canvas.len(), 7);
}

#[test]
fn template_drops_get_distinct_ids() {
    let mut core = EditorCore::new();
    for _ in 0..2 {
        core.on_template_pointer_down(bakery());
        core.on_pointer_up(pt(500.0, 500.0), Button::Primary, no_modifiers());
    }
    let new_ids: Vec<&str> = core.canvas.sections()[6..].iter().map(|s| s.id.as_str()).collect();
    assert_eq!(new_ids.len(), 2);
    assert_ne!(new_ids[0], new_ids[1]);
}

#[test]
fn escape_cancels_template_drag() {
    let mut core = EditorCore::new();
    core.on_template_pointer_down(bakery());
    core.on_pointer_move(pt(500.0, 500.0), no_modifiers());
    core.on_key_down(&key("Escape"), no_modifiers());
    assert_eq!(core.input, InputState::Idle);
    assert!(core.on_pointer_up(pt(500.0, 500.0), Button::Primary, no_modifiers()).is_empty());
    assert_eq!(core.canvas.len(), 6);
}

// =============================================================
// Explicit edits
// =============================================================

#[test]
fn add_section_uses_blank_position_and_fallbacks() {
    let mut core = EditorCore::new();
    let actions = core.add_section(SectionTemplate::new("", "", "", ""));
    assert!(committed(&actions));
    let created = core.canvas.sections().last().cloned().unwrap();
    assert_eq!(created.bounds(), Bounds::new(100, 100, 200, 150));
    assert_eq!(created.name, templates::DEFAULT_NAME);
    assert_eq!(created.emoji, templates::DEFAULT_EMOJI);
    assert_eq!(core.selection(), Some(created.id.as_str()));
}

#[test]
fn update_section_fields_commits_only_on_change() {
    let mut core = EditorCore::new();
    let patch = SectionPatch { name: Some("Artisan Bakery".into()), ..Default::default() };
    assert!(committed(&core.update_section_fields("bakery", &patch)));
    assert!(core.update_section_fields("bakery", &patch).is_empty());
    assert!(core.update_section_fields("missing", &patch).is_empty());
    assert!(core.update_section_fields("bakery", &SectionPatch::default()).is_empty());
    assert_eq!(core.history.len(), 2);
}

#[test]
fn set_section_bounds_clamps_and_commits() {
    let mut core = EditorCore::new();
    let actions = core.set_section_bounds("deli", Bounds::new(1190, 590, 10, 10));
    assert!(committed(&actions));
    assert_eq!(bounds_of(&core, "deli"), Bounds::new(1150, 550, 50, 50));
    assert!(core.set_section_bounds("deli", Bounds::new(1150, 550, 50, 50)).is_empty());
}

#[test]
fn delete_section_removes_and_clears_selection() {
    let mut core = EditorCore::new();
    core.select(Some("meat".into()));
    let actions = core.delete_section("meat");
    assert!(committed(&actions));
    assert!(core.section("meat").is_none());
    assert_eq!(core.selection(), None);
    assert!(core.delete_section("meat").is_empty());
}

#[test]
fn toggle_visibility_commits() {
    let mut core = EditorCore::new();
    assert!(committed(&core.toggle_visibility("frozen")));
    assert!(!core.section("frozen").unwrap().visible);
    assert!(committed(&core.toggle_visibility("frozen")));
    assert!(core.section("frozen").unwrap().visible);
    assert_eq!(core.history.len(), 3);
}

#[test]
fn bulk_visibility_commits_when_something_changes() {
    let mut core = EditorCore::new();
    assert!(core.set_all_visible(true).is_empty());
    assert!(committed(&core.set_all_visible(false)));
    assert_eq!(core.canvas.visible().count(), 0);
}

#[test]
fn clear_all_then_reset_to_default() {
    let mut core = EditorCore::new();
    core.select(Some("deli".into()));
    assert!(committed(&core.clear_all()));
    assert!(core.canvas.is_empty());
    assert_eq!(core.selection(), None);
    assert!(core.clear_all().is_empty());
    assert!(committed(&core.reset_to_default()));
    assert_eq!(core.canvas, templates::default_sections());
    assert_eq!(core.history.len(), 3);
}

#[test]
fn explicit_edits_wait_for_active_drag() {
    let mut core = EditorCore::new();
    core.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    assert!(core.delete_section("produce").is_empty());
    assert!(core.clear_all().is_empty());
    assert!(core.section("produce").is_some());
}

// =============================================================
// Undo / redo
// =============================================================

#[test]
fn undo_redo_round_trip() {
    let mut core = EditorCore::new();
    drag(&mut core, pt(100.0, 100.0), pt(120.0, 110.0));
    let moved = core.canvas.clone();

    let actions = core.undo();
    assert!(has_action(&actions, |a| *a == Action::HistoryChanged { cursor: 0, len: 2 }));
    assert_eq!(core.canvas, templates::default_sections());
    assert_eq!(core.selection(), None);

    core.redo();
    assert_eq!(core.canvas, moved);
}

#[test]
fn undo_mid_drag_ends_gesture_and_keeps_redo() {
    let mut core = EditorCore::new();
    drag(&mut core, pt(100.0, 100.0), pt(120.0, 110.0));
    core.on_pointer_down(pt(130.0, 120.0), Button::Primary, no_modifiers());
    assert!(core.gesture_in_progress());

    let actions = core.on_key_down(&key("z"), ctrl_modifier());
    assert!(has_action(&actions, |a| *a == Action::SetCursor("default".to_owned())));
    assert_eq!(core.input, InputState::Idle);

    let actions = core.on_pointer_up(pt(130.0, 120.0), Button::Primary, no_modifiers());
    assert!(!committed(&actions));
    assert_eq!(core.history.len(), 2);
    assert_eq!(core.history.cursor(), 0);
    assert!(core.can_redo());
    assert_eq!(core.canvas, templates::default_sections());
}

#[test]
fn redo_mid_resize_ends_gesture() {
    let mut core = EditorCore::new();
    core.delete_section("deli");
    core.undo();
    core.select(Some("produce".into()));
    core.on_pointer_down(pt(350.0, 250.0), Button::Primary, no_modifiers());
    assert!(matches!(core.input, InputState::ResizingSection { .. }));

    core.redo();
    core.on_pointer_move(pt(400.0, 300.0), no_modifiers());
    let actions = core.on_pointer_up(pt(400.0, 300.0), Button::Primary, no_modifiers());
    assert!(!committed(&actions));
    assert_eq!(bounds_of(&core, "produce"), Bounds::new(50, 50, 300, 200));
    assert!(core.section("deli").is_none());
    assert!(!core.can_redo());
}

#[test]
fn undo_at_oldest_entry_is_noop() {
    let mut core = EditorCore::new();
    core.select(Some("deli".into()));
    assert!(core.undo().is_empty());
    assert!(core.redo().is_empty());
    assert_eq!(core.selection(), Some("deli"));
}

#[test]
fn edit_after_undo_discards_redo() {
    let mut core = EditorCore::new();
    core.delete_section("deli");
    core.undo();
    core.toggle_visibility("bakery");
    assert!(!core.can_redo());
    assert_eq!(core.history.len(), 2);
    assert!(core.section("deli").is_some());
}

#[test]
fn keyboard_shortcuts_drive_history() {
    let mut core = EditorCore::new();
    core.delete_section("deli");
    core.on_key_down(&key("z"), ctrl_modifier());
    assert!(core.section("deli").is_some());
    core.on_key_down(&key("y"), ctrl_modifier());
    assert!(core.section("deli").is_none());
    core.on_key_down(&key("z"), Modifiers { meta: true, ..Default::default() });
    core.on_key_down(&key("Z"), Modifiers { meta: true, shift: true, ..Default::default() });
    assert!(core.section("deli").is_none());
}

#[test]
fn shortcuts_with_alt_are_ignored() {
    let mut core = EditorCore::new();
    core.delete_section("deli");
    let actions = core.on_key_down(&key("z"), Modifiers { ctrl: true, alt: true, ..Default::default() });
    assert!(actions.is_empty());
    assert!(core.section("deli").is_none());
}

#[test]
fn delete_key_removes_selection() {
    let mut core = EditorCore::new();
    assert!(core.on_key_down(&key("Delete"), no_modifiers()).is_empty());
    core.select(Some("bakery".into()));
    assert!(committed(&core.on_key_down(&key("Backspace"), no_modifiers())));
    assert!(core.section("bakery").is_none());
}

// =============================================================
// View
// =============================================================

#[test]
fn ctrl_wheel_zooms_around_pointer() {
    let mut core = EditorCore::new();
    let focus = pt(400.0, 300.0);
    let before = core.camera.screen_to_world(focus);
    let actions = core.on_wheel(focus, WheelDelta { dx: 0.0, dy: -100.0 }, ctrl_modifier());
    assert!(has_action(&actions, |a| matches!(a, Action::ViewChanged(_))));
    assert!((core.camera.zoom - 1.1).abs() < 1e-9);
    let after = core.camera.screen_to_world(focus);
    assert!((before.x - after.x).abs() < 1e-9 && (before.y - after.y).abs() < 1e-9);

    core.on_wheel(focus, WheelDelta { dx: 0.0, dy: 100.0 }, ctrl_modifier());
    assert!((core.camera.zoom - 1.0).abs() < 1e-9);
}

#[test]
fn ctrl_wheel_without_vertical_delta_zooms_in() {
    let mut core = EditorCore::new();
    let actions = core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 40.0, dy: 0.0 }, ctrl_modifier());
    assert!(has_action(&actions, |a| matches!(a, Action::ViewChanged(_))));
    assert!((core.camera.zoom - 1.1).abs() < 1e-9);
}

#[test]
fn plain_wheel_is_left_to_host() {
    let mut core = EditorCore::new();
    assert!(core.on_wheel(pt(0.0, 0.0), WheelDelta { dx: 0.0, dy: -100.0 }, no_modifiers()).is_empty());
    assert_eq!(core.camera.zoom, 1.0);
}

#[test]
fn zoom_buttons_clamp_and_reset() {
    let mut core = EditorCore::new();
    for _ in 0..40 {
        core.zoom_by(-0.1);
    }
    assert_eq!(core.camera.zoom, crate::consts::MIN_ZOOM);
    assert!(core.zoom_by(-0.1).is_empty());
    assert!(!core.reset_view().is_empty());
    assert_eq!(core.camera, Camera::default());
    assert!(core.reset_view().is_empty());
}

#[test]
fn view_changes_never_touch_history() {
    let mut core = EditorCore::new();
    core.zoom_by(0.5);
    core.on_pointer_down(pt(600.0, 500.0), Button::Middle, no_modifiers());
    core.on_pointer_move(pt(700.0, 500.0), no_modifiers());
    core.on_pointer_up(pt(700.0, 500.0), Button::Middle, no_modifiers());
    assert_eq!(core.history.len(), 1);
}

// =============================================================
// Selection and cursor queries
// =============================================================

#[test]
fn select_unknown_id_clears() {
    let mut core = EditorCore::new();
    core.select(Some("deli".into()));
    core.select(Some("nope".into()));
    assert_eq!(core.selection(), None);
}

#[test]
fn cursor_at_reflects_hover_target() {
    let core = EditorCore::new();
    assert_eq!(core.cursor_at(pt(200.0, 150.0)), "move");
    assert_eq!(core.cursor_at(pt(50.0, 50.0)), "nw-resize");
    assert_eq!(core.cursor_at(pt(600.0, 500.0)), "grab");
}

// =============================================================
// Event dispatch
// =============================================================

#[test]
fn apply_routes_events() {
    let mut core = EditorCore::new();
    core.apply(Event::DeleteSection("deli".into()));
    assert!(core.section("deli").is_none());
    core.apply(Event::Undo);
    assert!(core.section("deli").is_some());
    core.apply(Event::ZoomBy(0.5));
    assert_eq!(core.camera.zoom, 1.5);
}

#[test]
fn events_decode_from_json() {
    let event: Event = serde_json::from_str(r#"{"type":"toggle_visibility","data":"bakery"}"#).unwrap();
    assert_eq!(event, Event::ToggleVisibility("bakery".into()));
    let event: Event = serde_json::from_str(
        r#"{"type":"pointer_down","data":{"screen":{"x":1.0,"y":2.0},"button":"primary","modifiers":{"shift":false,"ctrl":false,"alt":false,"meta":false}}}"#,
    )
    .unwrap();
    assert!(matches!(event, Event::PointerDown { button: Button::Primary, .. }));
}

#[test]
fn actions_encode_with_type_tag() {
    let value = serde_json::to_value(Action::HistoryChanged { cursor: 1, len: 2 }).unwrap();
    assert_eq!(value, serde_json::json!({ "type": "history_changed", "data": { "cursor": 1, "len": 2 } }));
}

// =============================================================
// Editor (persisting session)
// =============================================================

#[test]
fn editor_writes_through_on_commit() {
    let store = MemoryStore::new();
    let mut editor = Editor::open(&store);
    assert!(store.is_empty());
    editor.apply(Event::DeleteSection("deli".into()));
    assert!(store.get(crate::persistence::SECTIONS_KEY).unwrap().is_some());
    assert!(store.get(crate::persistence::HISTORY_KEY).unwrap().is_some());
    assert!(store.get(crate::persistence::VIEW_KEY).unwrap().is_none());
}

#[test]
fn editor_does_not_persist_live_drag() {
    let store = MemoryStore::new();
    let mut editor = Editor::open(&store);
    editor.on_pointer_down(pt(100.0, 100.0), Button::Primary, no_modifiers());
    editor.on_pointer_move(pt(150.0, 100.0), no_modifiers());
    assert!(store.is_empty());
    editor.on_pointer_up(pt(150.0, 100.0), Button::Primary, no_modifiers());
    assert_eq!(store.len(), 2);
}

#[test]
fn editor_reopens_where_it_left_off() {
    let store = MemoryStore::new();
    {
        let mut editor = Editor::open(&store);
        editor.apply(Event::DeleteSection("deli".into()));
        editor.apply(Event::ZoomBy(0.5));
    }
    let editor = Editor::open(&store);
    assert!(editor.canvas().get("deli").is_none());
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.camera().zoom, 1.5);
    assert!(editor.core.can_undo());
}
