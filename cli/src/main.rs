use std::io::{self, Write};
use std::path::{Path, PathBuf};

use catalog::catalog::{LOW_STOCK_THRESHOLD, SEARCH_LIMIT};
use catalog::{Catalog, CatalogError, ProduceQuery};
use clap::{Args, Parser, Subcommand};
use editor::camera::{Camera, Point};
use editor::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use editor::doc::{Section, SectionPatch};
use editor::engine::{Action, Editor, Event};
use editor::geometry::{self, Bounds, CanvasPoint, ResizeHandle};
use editor::history::History;
use editor::hit::{self, HitPart};
use editor::input::{Button, Modifiers};
use editor::persistence::{HISTORY_KEY, SECTIONS_KEY, VIEW_KEY};
use editor::storage::{FileStore, KeyValueStore, StorageError};
use editor::templates::{self, SectionTemplate};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("no section with id `{0}`")]
    UnknownSection(String),
    #[error("no template named `{0}`; `storemap templates --all` lists them")]
    UnknownTemplate(String),
    #[error("no color theme named `{0}`; `storemap themes` lists them")]
    UnknownTheme(String),
    #[error("section `{0}` is hidden or covered; there is nothing to grab")]
    NotGrabbable(String),
    #[error("no produce item with id `{0}`")]
    UnknownProduce(String),
    #[error("point ({x}, {y}) is outside the {w}x{h} canvas", w = CANVAS_WIDTH, h = CANVAS_HEIGHT)]
    InvalidPoint { x: i32, y: i32 },
}

#[derive(Parser, Debug)]
#[command(name = "storemap", about = "Store map layout editor and produce catalog CLI")]
struct Cli {
    /// Directory holding the saved layout, history, and view.
    #[arg(long, env = "STOREMAP_DATA_DIR", default_value = ".storemap")]
    data_dir: PathBuf,

    /// Produce catalog JSON file. The built-in sample is used when absent.
    #[arg(long, env = "STOREMAP_CATALOG")]
    catalog: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List section templates.
    Templates {
        /// Include service areas beyond the drag palette.
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// List color themes for blank sections.
    Themes,
    /// Delete the saved layout, history, and view.
    Forget,
    Produce(ProduceCommand),
    #[command(flatten)]
    Layout(LayoutCommand),
}

#[derive(Subcommand, Debug)]
enum LayoutCommand {
    /// Print the current layout.
    Show,
    /// Print the undo history.
    History,
    /// Add a blank section at the default position.
    Add(SectionFields),
    /// Change a section's name, emoji, or colors.
    Edit {
        id: String,
        #[command(flatten)]
        fields: SectionFields,
    },
    /// Drop a template with the pointer at canvas point (x, y).
    Drop {
        template: String,
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
    },
    /// Move a section's top-left corner to (x, y).
    Move {
        id: String,
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
    },
    /// Drag one of a section's resize handles to (x, y).
    Resize {
        id: String,
        handle: ResizeHandle,
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
    },
    Delete {
        id: String,
    },
    /// Show a hidden section or hide a visible one.
    Toggle {
        id: String,
    },
    ShowAll,
    HideAll,
    /// Remove every section.
    Clear,
    /// Restore the default six-department layout.
    Reset,
    Undo,
    Redo,
    /// Change zoom by a step, e.g. 0.1 or -0.1.
    Zoom {
        #[arg(allow_hyphen_values = true)]
        delta: f64,
    },
    ResetView,
}

#[derive(Args, Debug, Default)]
struct SectionFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    emoji: Option<String>,
    /// Named theme supplying both colors; explicit colors override it.
    #[arg(long)]
    theme: Option<String>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    text_color: Option<String>,
}

#[derive(Args, Debug)]
struct ProduceCommand {
    #[command(subcommand)]
    command: ProduceSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProduceSubcommand {
    /// Filtered, sorted, paginated listing.
    List(ListArgs),
    /// Distinct categories and aisles.
    Categories,
    /// Items in an aisle, optionally narrowed to one section.
    Location {
        aisle: String,
        #[arg(long)]
        section: Option<String>,
    },
    LowStock {
        #[arg(long, default_value_t = LOW_STOCK_THRESHOLD)]
        threshold: u32,
    },
    Search {
        text: String,
        #[arg(long, default_value_t = SEARCH_LIMIT)]
        limit: usize,
    },
    /// One item by id.
    Get { id: String },
    /// Stock and value totals.
    Stats {
        #[arg(long, default_value_t = LOW_STOCK_THRESHOLD)]
        low_stock_threshold: u32,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    page: Option<String>,
    #[arg(long)]
    limit: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    aisle: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value_t = false)]
    in_stock: bool,
    #[arg(long, default_value_t = false)]
    organic: bool,
    #[arg(long, default_value_t = false)]
    local: bool,
    #[arg(long)]
    sort_by: Option<String>,
    #[arg(long)]
    sort_order: Option<String>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing();

    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let Cli { data_dir, catalog, pretty, command } = cli;
    let printer = Printer { pretty };

    match command {
        Command::Templates { all } => {
            let list = if all { templates::all_store_sections() } else { templates::default_templates() };
            printer.print(out, &list)
        }
        Command::Themes => printer.print(out, &templates::color_themes()),
        Command::Forget => forget(&FileStore::new(data_dir), out, printer),
        Command::Produce(produce) => run_produce(catalog.as_deref(), produce, out, printer),
        Command::Layout(layout) => run_layout(&data_dir, layout, out, printer),
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

fn run_layout(data_dir: &Path, command: LayoutCommand, out: &mut impl Write, printer: Printer) -> Result<(), CliError> {
    let mut editor = Editor::open(FileStore::new(data_dir));
    debug!(data_dir = %data_dir.display(), sections = editor.canvas().len(), "layout opened");

    let (actions, focus) = match command {
        LayoutCommand::Show => return printer.print(out, &LayoutReport::of(&editor)),
        LayoutCommand::History => return printer.print(out, &HistoryReport::of(editor.history())),
        LayoutCommand::Add(fields) => (editor.apply(Event::AddSection(fields.into_template()?)), None),
        LayoutCommand::Edit { id, fields } => {
            require(&editor, &id)?;
            let patch = fields.into_patch()?;
            (editor.apply(Event::UpdateSection { id: id.clone(), patch }), Some(id))
        }
        LayoutCommand::Drop { template, x, y } => (drop_template(&mut editor, &template, x, y)?, None),
        LayoutCommand::Move { id, x, y } => (drag_section(&mut editor, &id, x, y)?, Some(id)),
        LayoutCommand::Resize { id, handle, x, y } => {
            (drag_handle(&mut editor, &id, handle, CanvasPoint::new(x, y))?, Some(id))
        }
        LayoutCommand::Delete { id } => {
            require(&editor, &id)?;
            (editor.apply(Event::DeleteSection(id)), None)
        }
        LayoutCommand::Toggle { id } => {
            require(&editor, &id)?;
            (editor.apply(Event::ToggleVisibility(id.clone())), Some(id))
        }
        LayoutCommand::ShowAll => (editor.apply(Event::ShowAll), None),
        LayoutCommand::HideAll => (editor.apply(Event::HideAll), None),
        LayoutCommand::Clear => (editor.apply(Event::ClearAll), None),
        LayoutCommand::Reset => (editor.apply(Event::ResetToDefault), None),
        LayoutCommand::Undo => (editor.apply(Event::Undo), None),
        LayoutCommand::Redo => (editor.apply(Event::Redo), None),
        LayoutCommand::Zoom { delta } => (editor.apply(Event::ZoomBy(delta)), None),
        LayoutCommand::ResetView => (editor.apply(Event::ResetView), None),
    };

    let focus = focus.or_else(|| editor.selection().map(str::to_owned));
    let report = EditReport::of(&editor, &actions, focus.as_deref());
    if !report.changed {
        info!("command left the layout unchanged");
    }
    printer.print(out, &report)
}

fn require<'a>(editor: &'a Editor<FileStore>, id: &str) -> Result<&'a Section, CliError> {
    editor.canvas().get(id).ok_or_else(|| CliError::UnknownSection(id.to_owned()))
}

/// Replays a palette drag: grab the template, move onto the canvas, release.
fn drop_template(editor: &mut Editor<FileStore>, name: &str, x: i32, y: i32) -> Result<Vec<Action>, CliError> {
    let template = templates::find_template(name).ok_or_else(|| CliError::UnknownTemplate(name.to_owned()))?;
    if !geometry::in_canvas(CanvasPoint::new(x, y)) {
        return Err(CliError::InvalidPoint { x, y });
    }

    let screen = to_screen(editor, CanvasPoint::new(x, y));
    let modifiers = Modifiers::default();
    let mut actions = editor.apply(Event::TemplatePointerDown { template });
    actions.extend(editor.on_pointer_move(screen, modifiers));
    actions.extend(editor.on_pointer_up(screen, Button::Primary, modifiers));
    Ok(actions)
}

/// Replays a body drag that leaves the section's top-left corner at `(x, y)`.
fn drag_section(editor: &mut Editor<FileStore>, id: &str, x: i32, y: i32) -> Result<Vec<Action>, CliError> {
    let bounds = require(editor, id)?.bounds();
    let mut actions = editor.apply(Event::Select(Some(id.to_owned())));
    let grab = grab_point(editor, id, bounds).ok_or_else(|| CliError::NotGrabbable(id.to_owned()))?;
    let release = CanvasPoint::new(x.saturating_add(grab.x - bounds.x), y.saturating_add(grab.y - bounds.y));
    actions.extend(press_move_release(editor, grab, release));
    Ok(actions)
}

/// Replays dragging one resize handle of the selected section to `to`.
fn drag_handle(
    editor: &mut Editor<FileStore>,
    id: &str,
    handle: ResizeHandle,
    to: CanvasPoint,
) -> Result<Vec<Action>, CliError> {
    let bounds = require(editor, id)?.bounds();
    let mut actions = editor.apply(Event::Select(Some(id.to_owned())));
    let anchor = geometry::handle_anchors(bounds)
        .into_iter()
        .find_map(|(h, pt)| (h == handle).then_some(pt))
        .filter(|&pt| lands_on(editor, id, pt, HitPart::ResizeHandle(handle)))
        .ok_or_else(|| CliError::NotGrabbable(id.to_owned()))?;
    actions.extend(press_move_release(editor, anchor, to));
    Ok(actions)
}

/// First point of the section's body that a click would land on: the
/// center, then a coarse grid across the bounds.
fn grab_point(editor: &Editor<FileStore>, id: &str, bounds: Bounds) -> Option<CanvasPoint> {
    let center = CanvasPoint::new(bounds.x + bounds.width / 2, bounds.y + bounds.height / 2);
    let grid = (1..GRAB_GRID).flat_map(|row| {
        (1..GRAB_GRID).map(move |col| {
            CanvasPoint::new(bounds.x + bounds.width * col / GRAB_GRID, bounds.y + bounds.height * row / GRAB_GRID)
        })
    });
    std::iter::once(center).chain(grid).find(|&pt| lands_on(editor, id, pt, HitPart::Body))
}

const GRAB_GRID: i32 = 8;

fn lands_on(editor: &Editor<FileStore>, id: &str, pt: CanvasPoint, part: HitPart) -> bool {
    hit::hit_test(pt, editor.canvas(), editor.selection()).is_some_and(|hit| hit.section_id == id && hit.part == part)
}

fn press_move_release(editor: &mut Editor<FileStore>, from: CanvasPoint, to: CanvasPoint) -> Vec<Action> {
    let modifiers = Modifiers::default();
    let (from, to) = (to_screen(editor, from), to_screen(editor, to));
    let mut actions = editor.on_pointer_down(from, Button::Primary, modifiers);
    actions.extend(editor.on_pointer_move(to, modifiers));
    actions.extend(editor.on_pointer_up(to, Button::Primary, modifiers));
    actions
}

fn to_screen(editor: &Editor<FileStore>, world: CanvasPoint) -> Point {
    editor.camera().world_to_screen(Point::new(f64::from(world.x), f64::from(world.y)))
}

fn forget(store: &FileStore, out: &mut impl Write, printer: Printer) -> Result<(), CliError> {
    for key in [SECTIONS_KEY, HISTORY_KEY, VIEW_KEY] {
        store.remove(key)?;
    }
    info!(data_dir = %store.root().display(), "saved layout removed");
    printer.print(out, &Forgotten { forgotten: store.root() })
}

impl SectionFields {
    fn theme_colors(&self) -> Result<Option<(String, String)>, CliError> {
        let Some(name) = &self.theme else {
            return Ok(None);
        };
        templates::color_themes()
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .map(|t| Some((t.color, t.text_color)))
            .ok_or_else(|| CliError::UnknownTheme(name.clone()))
    }

    fn into_template(self) -> Result<SectionTemplate, CliError> {
        let (theme_color, theme_text) = self.theme_colors()?.unzip();
        Ok(SectionTemplate {
            name: self.name.unwrap_or_default(),
            emoji: self.emoji.unwrap_or_default(),
            color: self.color.or(theme_color).unwrap_or_default(),
            text_color: self.text_color.or(theme_text).unwrap_or_default(),
        })
    }

    fn into_patch(self) -> Result<SectionPatch, CliError> {
        let (theme_color, theme_text) = self.theme_colors()?.unzip();
        Ok(SectionPatch {
            name: self.name,
            emoji: self.emoji,
            color: self.color.or(theme_color),
            text_color: self.text_color.or(theme_text),
            visible: None,
        })
    }
}

// =============================================================================
// PRODUCE
// =============================================================================

fn run_produce(
    path: Option<&Path>,
    produce: ProduceCommand,
    out: &mut impl Write,
    printer: Printer,
) -> Result<(), CliError> {
    let catalog = match path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::sample()?,
    };

    match produce.command {
        ProduceSubcommand::List(args) => printer.print(out, &catalog.list(&args.into_query())?),
        ProduceSubcommand::Categories => printer.print(out, &catalog.categories()),
        ProduceSubcommand::Location { aisle, section } => {
            printer.print(out, &catalog.by_location(&aisle, section.as_deref()))
        }
        ProduceSubcommand::LowStock { threshold } => printer.print(out, &catalog.low_stock(threshold)),
        ProduceSubcommand::Search { text, limit } => printer.print(out, &catalog.search(&text, limit)?),
        ProduceSubcommand::Get { id } => {
            let item = catalog.get(&id).ok_or(CliError::UnknownProduce(id))?;
            printer.print(out, item)
        }
        ProduceSubcommand::Stats { low_stock_threshold } => printer.print(out, &catalog.stats(low_stock_threshold)),
    }
}

impl ListArgs {
    fn into_query(self) -> ProduceQuery {
        let flag = |on: bool| on.then(|| "true".to_owned());
        ProduceQuery {
            page: self.page,
            limit: self.limit,
            category: self.category,
            aisle: self.aisle,
            search: self.search,
            in_stock: flag(self.in_stock),
            organic: flag(self.organic),
            local: flag(self.local),
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Printer {
    pretty: bool,
}

impl Printer {
    fn print(self, out: &mut impl Write, value: &impl Serialize) -> Result<(), CliError> {
        let rendered = if self.pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
        writeln!(out, "{rendered}")?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryStatus {
    cursor: usize,
    len: usize,
    can_undo: bool,
    can_redo: bool,
}

impl HistoryStatus {
    fn of(history: &History) -> Self {
        Self {
            cursor: history.cursor(),
            len: history.len(),
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
        }
    }
}

#[derive(Debug, Serialize)]
struct LayoutReport<'a> {
    sections: &'a [Section],
    view: Camera,
    history: HistoryStatus,
}

impl<'a> LayoutReport<'a> {
    fn of(editor: &'a Editor<FileStore>) -> Self {
        Self {
            sections: editor.canvas().sections(),
            view: editor.camera(),
            history: HistoryStatus::of(editor.history()),
        }
    }
}

#[derive(Debug, Serialize)]
struct Forgotten<'a> {
    forgotten: &'a Path,
}

#[derive(Debug, Serialize)]
struct HistoryEntry {
    index: usize,
    sections: usize,
    current: bool,
}

#[derive(Debug, Serialize)]
struct HistoryReport {
    #[serde(flatten)]
    status: HistoryStatus,
    entries: Vec<HistoryEntry>,
}

impl HistoryReport {
    fn of(history: &History) -> Self {
        let entries = history
            .entries()
            .iter()
            .enumerate()
            .map(|(index, state)| HistoryEntry { index, sections: state.len(), current: index == history.cursor() })
            .collect();
        Self { status: HistoryStatus::of(history), entries }
    }
}

#[derive(Debug, Serialize)]
struct EditReport<'a> {
    changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<&'a Section>,
    sections: usize,
    view: Camera,
    history: HistoryStatus,
}

impl<'a> EditReport<'a> {
    fn of(editor: &'a Editor<FileStore>, actions: &[Action], focus: Option<&str>) -> Self {
        let changed = actions.iter().any(|a| matches!(a, Action::HistoryChanged { .. } | Action::ViewChanged(_)));
        Self {
            changed,
            section: focus.and_then(|id| editor.canvas().get(id)),
            sections: editor.canvas().len(),
            view: editor.camera(),
            history: HistoryStatus::of(editor.history()),
        }
    }
}
