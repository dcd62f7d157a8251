//! Interaction controller and editor session.
//!
//! `EditorCore` owns the canvas, its history, the camera, the selection, and
//! the active gesture. Every input goes through one of its methods (or the
//! typed [`Event`] passed to [`EditorCore::apply`]) and comes back as a list
//! of [`Action`]s describing side effects for the host. It has no platform
//! dependencies, so the whole editor is testable without a UI.
//!
//! `Editor` wraps a core with a persistence adapter and writes through to
//! storage whenever the history or the view changes.

use std::mem;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::{Camera, Point};
use crate::consts::{
    BLANK_SECTION_X, BLANK_SECTION_Y, DEFAULT_SECTION_HEIGHT, DEFAULT_SECTION_WIDTH, TEMPLATE_GRAB_OFFSET_X,
    TEMPLATE_GRAB_OFFSET_Y, ZOOM_STEP,
};
use crate::doc::{CanvasState, Section, SectionId, SectionPatch, fresh_section_id};
use crate::geometry::{self, Bounds, CanvasPoint};
use crate::hit::{self, HitPart};
use crate::history::History;
use crate::input::{Button, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::persistence::{Persistence, Restored};
use crate::storage::KeyValueStore;
use crate::templates::{self, SectionTemplate};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Side effects returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Action {
    /// Section geometry changed live, without a commit.
    SectionsChanged,
    /// The history gained an entry or its cursor moved; canvas and history should be persisted.
    HistoryChanged { cursor: usize, len: usize },
    SelectionChanged(Option<SectionId>),
    /// Pan or zoom settled; the view should be persisted.
    ViewChanged(Camera),
    SetCursor(String),
    RenderNeeded,
}

/// Typed input accepted by [`EditorCore::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Event {
    PointerDown { screen: Point, button: Button, modifiers: Modifiers },
    PointerMove { screen: Point, modifiers: Modifiers },
    PointerUp { screen: Point, button: Button, modifiers: Modifiers },
    /// Pointer pressed on a palette swatch outside the canvas.
    TemplatePointerDown { template: SectionTemplate },
    Wheel { screen: Point, delta: WheelDelta, modifiers: Modifiers },
    KeyDown { key: Key, modifiers: Modifiers },
    AddSection(SectionTemplate),
    UpdateSection { id: SectionId, patch: SectionPatch },
    SetBounds { id: SectionId, bounds: Bounds },
    DeleteSection(SectionId),
    ToggleVisibility(SectionId),
    ShowAll,
    HideAll,
    ClearAll,
    ResetToDefault,
    Undo,
    Redo,
    Select(Option<SectionId>),
    ZoomBy(f64),
    ResetView,
}

/// Core editor state: all logic that doesn't depend on storage or a platform.
#[derive(Debug, Clone)]
pub struct EditorCore {
    pub canvas: CanvasState,
    pub history: History,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
}

impl Default for EditorCore {
    fn default() -> Self {
        let canvas = templates::default_sections();
        Self {
            history: History::new(canvas.clone()),
            canvas,
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
        }
    }
}

impl EditorCore {
    /// Start from the default six-section layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from previously persisted state.
    #[must_use]
    pub fn from_restored(restored: Restored) -> Self {
        Self {
            canvas: restored.canvas,
            history: restored.history,
            camera: restored.camera,
            ui: UiState::default(),
            input: InputState::default(),
        }
    }

    /// Dispatch a typed event to the matching handler.
    pub fn apply(&mut self, event: Event) -> Vec<Action> {
        match event {
            Event::PointerDown { screen, button, modifiers } => self.on_pointer_down(screen, button, modifiers),
            Event::PointerMove { screen, modifiers } => self.on_pointer_move(screen, modifiers),
            Event::PointerUp { screen, button, modifiers } => self.on_pointer_up(screen, button, modifiers),
            Event::TemplatePointerDown { template } => self.on_template_pointer_down(template),
            Event::Wheel { screen, delta, modifiers } => self.on_wheel(screen, delta, modifiers),
            Event::KeyDown { key, modifiers } => self.on_key_down(&key, modifiers),
            Event::AddSection(template) => self.add_section(template),
            Event::UpdateSection { id, patch } => self.update_section_fields(&id, &patch),
            Event::SetBounds { id, bounds } => self.set_section_bounds(&id, bounds),
            Event::DeleteSection(id) => self.delete_section(&id),
            Event::ToggleVisibility(id) => self.toggle_visibility(&id),
            Event::ShowAll => self.set_all_visible(true),
            Event::HideAll => self.set_all_visible(false),
            Event::ClearAll => self.clear_all(),
            Event::ResetToDefault => self.reset_to_default(),
            Event::Undo => self.undo(),
            Event::Redo => self.redo(),
            Event::Select(id) => self.select(id),
            Event::ZoomBy(delta) => self.zoom_by(delta),
            Event::ResetView => self.reset_view(),
        }
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if self.input.is_active() {
            return Vec::new();
        }
        let world = self.to_canvas(screen);
        let hit = hit::hit_test(world, &self.canvas, self.ui.selected_id.as_deref());

        match (button, hit) {
            (Button::Middle, None) => self.start_panning(screen),
            (Button::Primary, None) if modifiers.alt => self.start_panning(screen),
            (Button::Primary, None) => self.set_selection(None),
            (Button::Primary, Some(hit)) => {
                let Some(orig) = self.canvas.get(&hit.section_id).map(Section::bounds) else {
                    return Vec::new();
                };
                let cursor = match hit.part {
                    HitPart::Body => {
                        let grab = CanvasPoint::new(world.x - orig.x, world.y - orig.y);
                        self.input = InputState::DraggingSection { id: hit.section_id.clone(), grab, orig };
                        "move"
                    }
                    HitPart::ResizeHandle(handle) => {
                        self.input = InputState::ResizingSection { id: hit.section_id.clone(), handle, orig };
                        handle.cursor()
                    }
                };
                let mut actions = self.set_selection(Some(hit.section_id));
                actions.push(Action::SetCursor(cursor.to_owned()));
                actions
            }
            _ => Vec::new(),
        }
    }

    /// Begin dragging a palette template. The ghost is grabbed near its top-left.
    pub fn on_template_pointer_down(&mut self, template: SectionTemplate) -> Vec<Action> {
        if self.input.is_active() {
            return Vec::new();
        }
        self.input = InputState::CreatingFromTemplate {
            template,
            grab: CanvasPoint::new(TEMPLATE_GRAB_OFFSET_X, TEMPLATE_GRAB_OFFSET_Y),
            pointer: None,
        };
        vec![Action::SetCursor("grabbing".to_owned())]
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.to_canvas(screen);
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { start } => {
                self.camera.pan_x = screen.x - start.x;
                self.camera.pan_y = screen.y - start.y;
                vec![Action::RenderNeeded]
            }
            InputState::DraggingSection { id, grab, .. } => {
                let grab = *grab;
                let Some(section) = self.canvas.get_mut(id) else {
                    return Vec::new();
                };
                let bounds = section.bounds();
                let origin = geometry::move_section(bounds, world, grab);
                Self::update_live(section, Bounds { x: origin.x, y: origin.y, ..bounds })
            }
            InputState::ResizingSection { id, handle, .. } => {
                let handle = *handle;
                let Some(section) = self.canvas.get_mut(id) else {
                    return Vec::new();
                };
                let next = geometry::resize_section(section.bounds(), handle, world);
                Self::update_live(section, next)
            }
            InputState::CreatingFromTemplate { pointer, .. } => {
                *pointer = Some(world);
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => vec![Action::ViewChanged(self.camera), Action::SetCursor("default".to_owned())],
            InputState::DraggingSection { id, orig, .. } | InputState::ResizingSection { id, orig, .. } => {
                let mut actions = vec![Action::SetCursor("default".to_owned())];
                let moved = self.canvas.get(&id).is_some_and(|s| s.bounds() != orig);
                if moved {
                    self.commit(&mut actions);
                }
                actions
            }
            InputState::CreatingFromTemplate { template, grab, .. } => {
                let mut actions = vec![Action::SetCursor("default".to_owned())];
                let exact = self.camera.screen_to_world(screen);
                if !exact.in_canvas() {
                    debug!(x = exact.x, y = exact.y, "template dropped outside canvas; discarded");
                    actions.push(Action::RenderNeeded);
                    return actions;
                }
                let world = exact.to_canvas();
                let section = new_section(template, geometry::drop_bounds(world, grab));
                let id = section.id.clone();
                self.canvas.push(section);
                self.commit(&mut actions);
                actions.extend(self.set_selection(Some(id)));
                actions
            }
        }
    }

    /// Ctrl/Cmd + wheel zooms around the pointer; only a positive `dy` zooms out.
    /// Plain wheel is left to the host.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.command() {
            return Vec::new();
        }
        let step = if delta.dy > 0.0 { -ZOOM_STEP } else { ZOOM_STEP };
        if self.camera.zoom_by(step, Some(screen)) {
            vec![Action::ViewChanged(self.camera), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Keyboard input ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() && !modifiers.alt {
            if key.is("y") || (modifiers.shift && key.is("z")) {
                return self.redo();
            }
            if key.is("z") {
                return self.undo();
            }
            return Vec::new();
        }
        if key.is("Delete") || key.is("Backspace") {
            return match self.ui.selected_id.clone() {
                Some(id) => self.delete_section(&id),
                None => Vec::new(),
            };
        }
        if key.is("Escape") {
            let mut actions = Vec::new();
            if matches!(self.input, InputState::CreatingFromTemplate { .. }) {
                self.input = InputState::Idle;
                actions.push(Action::SetCursor("default".to_owned()));
                actions.push(Action::RenderNeeded);
            }
            actions.extend(self.set_selection(None));
            return actions;
        }
        Vec::new()
    }

    // --- Explicit edits ---

    /// Add a blank section from the add dialog, at the fixed blank position.
    pub fn add_section(&mut self, draft: SectionTemplate) -> Vec<Action> {
        if self.gesture_in_progress() {
            return Vec::new();
        }
        let bounds = Bounds::new(BLANK_SECTION_X, BLANK_SECTION_Y, DEFAULT_SECTION_WIDTH, DEFAULT_SECTION_HEIGHT);
        let section = new_section(draft, bounds);
        let id = section.id.clone();
        self.canvas.push(section);
        let mut actions = Vec::new();
        self.commit(&mut actions);
        actions.extend(self.set_selection(Some(id)));
        actions
    }

    /// Edit name, emoji, colors, or visibility of one section.
    pub fn update_section_fields(&mut self, id: &str, patch: &SectionPatch) -> Vec<Action> {
        if self.gesture_in_progress() || !self.canvas.apply_patch(id, patch) {
            return Vec::new();
        }
        self.committed()
    }

    /// Set a section's geometry directly. Inputs are clamped like any other edit.
    pub fn set_section_bounds(&mut self, id: &str, bounds: Bounds) -> Vec<Action> {
        if self.gesture_in_progress() {
            return Vec::new();
        }
        let next = geometry::clamp_bounds(bounds);
        let Some(section) = self.canvas.get_mut(id) else {
            return Vec::new();
        };
        if section.bounds() == next {
            return Vec::new();
        }
        section.set_bounds(next);
        self.committed()
    }

    pub fn delete_section(&mut self, id: &str) -> Vec<Action> {
        if self.gesture_in_progress() || self.canvas.remove(id).is_none() {
            return Vec::new();
        }
        let mut actions = self.committed();
        if self.ui.selected_id.as_deref() == Some(id) {
            actions.extend(self.set_selection(None));
        }
        actions
    }

    pub fn toggle_visibility(&mut self, id: &str) -> Vec<Action> {
        let Some(visible) = self.canvas.get(id).map(|s| s.visible) else {
            return Vec::new();
        };
        self.update_section_fields(id, &SectionPatch { visible: Some(!visible), ..Default::default() })
    }

    /// Show or hide every section at once.
    pub fn set_all_visible(&mut self, visible: bool) -> Vec<Action> {
        if self.gesture_in_progress() || !self.canvas.set_all_visible(visible) {
            return Vec::new();
        }
        self.committed()
    }

    pub fn clear_all(&mut self) -> Vec<Action> {
        self.replace_canvas(CanvasState::new())
    }

    pub fn reset_to_default(&mut self) -> Vec<Action> {
        self.replace_canvas(templates::default_sections())
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        match self.history.undo() {
            Some(state) => self.restore_snapshot(state),
            None => Vec::new(),
        }
    }

    pub fn redo(&mut self) -> Vec<Action> {
        match self.history.redo() {
            Some(state) => self.restore_snapshot(state),
            None => Vec::new(),
        }
    }

    // --- Selection / view ---

    /// Select a section by id, or clear the selection. Unknown ids clear it.
    pub fn select(&mut self, id: Option<SectionId>) -> Vec<Action> {
        let id = id.filter(|id| self.canvas.get(id).is_some());
        self.set_selection(id)
    }

    /// Zoom by `delta` around the canvas origin (toolbar buttons).
    pub fn zoom_by(&mut self, delta: f64) -> Vec<Action> {
        if self.camera.zoom_by(delta, None) {
            vec![Action::ViewChanged(self.camera), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        if self.camera == Camera::default() {
            return Vec::new();
        }
        self.camera.reset();
        vec![Action::ViewChanged(self.camera), Action::RenderNeeded]
    }

    // --- Queries ---

    /// The currently selected section id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.canvas.get(id)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Where a template would land if dropped now, while one is being dragged.
    #[must_use]
    pub fn ghost_preview(&self) -> Option<Bounds> {
        match &self.input {
            InputState::CreatingFromTemplate { grab, pointer: Some(pointer), .. } => {
                Some(geometry::drop_bounds(*pointer, *grab))
            }
            _ => None,
        }
    }

    /// CSS cursor for hovering `screen` while idle.
    #[must_use]
    pub fn cursor_at(&self, screen: Point) -> &'static str {
        let world = self.to_canvas(screen);
        match hit::hit_test(world, &self.canvas, self.selection()).map(|h| h.part) {
            Some(HitPart::ResizeHandle(handle)) => handle.cursor(),
            Some(HitPart::Body) => "move",
            None => "grab",
        }
    }

    // --- Internals ---

    fn to_canvas(&self, screen: Point) -> CanvasPoint {
        self.camera.screen_to_world(screen).to_canvas()
    }

    fn gesture_in_progress(&self) -> bool {
        matches!(self.input, InputState::DraggingSection { .. } | InputState::ResizingSection { .. })
    }

    fn start_panning(&mut self, screen: Point) -> Vec<Action> {
        let start = Point::new(screen.x - self.camera.pan_x, screen.y - self.camera.pan_y);
        self.input = InputState::Panning { start };
        vec![Action::SetCursor("grabbing".to_owned())]
    }

    fn update_live(section: &mut Section, next: Bounds) -> Vec<Action> {
        if section.bounds() == next {
            return Vec::new();
        }
        section.set_bounds(next);
        vec![Action::SectionsChanged, Action::RenderNeeded]
    }

    fn set_selection(&mut self, id: Option<SectionId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id.clone_from(&id);
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    fn replace_canvas(&mut self, next: CanvasState) -> Vec<Action> {
        if self.gesture_in_progress() || self.canvas == next {
            return Vec::new();
        }
        self.canvas = next;
        let mut actions = self.committed();
        actions.extend(self.set_selection(None));
        actions
    }

    fn restore_snapshot(&mut self, state: CanvasState) -> Vec<Action> {
        self.canvas = state;
        let mut actions = vec![Action::HistoryChanged { cursor: self.history.cursor(), len: self.history.len() }];
        // A drag or resize started on the replaced canvas has nothing left to commit.
        if self.gesture_in_progress() {
            debug!("history step ended the active gesture");
            self.input = InputState::Idle;
            actions.push(Action::SetCursor("default".to_owned()));
        }
        actions.extend(self.set_selection(None));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn committed(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.commit(&mut actions);
        actions
    }

    fn commit(&mut self, actions: &mut Vec<Action>) {
        self.history.commit(&self.canvas);
        actions.push(Action::HistoryChanged { cursor: self.history.cursor(), len: self.history.len() });
        actions.push(Action::RenderNeeded);
    }
}

fn new_section(template: SectionTemplate, bounds: Bounds) -> Section {
    let template = template.with_fallbacks();
    Section {
        id: fresh_section_id(),
        name: template.name,
        emoji: template.emoji,
        color: template.color,
        text_color: template.text_color,
        x: bounds.x,
        y: bounds.y,
        width: bounds.width,
        height: bounds.height,
        visible: true,
    }
}

/// The editor session: an `EditorCore` that writes through to storage.
pub struct Editor<S: KeyValueStore> {
    pub core: EditorCore,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> Editor<S> {
    /// Open a session from whatever `store` holds, falling back to defaults.
    #[must_use]
    pub fn open(store: S) -> Self {
        let persistence = Persistence::new(store);
        let core = EditorCore::from_restored(persistence.restore());
        Self { core, persistence }
    }

    #[must_use]
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Apply an event and persist whatever it settled.
    pub fn apply(&mut self, event: Event) -> Vec<Action> {
        let actions = self.core.apply(event);
        self.sync(&actions);
        actions
    }

    // --- Delegated input ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.apply(Event::PointerDown { screen, button, modifiers })
    }

    pub fn on_pointer_move(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        self.apply(Event::PointerMove { screen, modifiers })
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.apply(Event::PointerUp { screen, button, modifiers })
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.apply(Event::Wheel { screen, delta, modifiers })
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.apply(Event::KeyDown { key, modifiers })
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn canvas(&self) -> &CanvasState {
        &self.core.canvas
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.core.history
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.core.selection()
    }

    fn sync(&self, actions: &[Action]) {
        if actions.iter().any(|a| matches!(a, Action::HistoryChanged { .. })) {
            self.persistence.save_canvas(&self.core.canvas);
            self.persistence.save_history(&self.core.history);
        }
        if actions.iter().any(|a| matches!(a, Action::ViewChanged(_))) {
            self.persistence.save_view(&self.core.camera);
        }
    }
}
