//! Section presets: the template palette, color themes, and the default layout.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use serde::{Deserialize, Serialize};

use crate::doc::{CanvasState, Section};

/// Fallback label for a section created without a name.
pub const DEFAULT_NAME: &str = "New Section";
/// Fallback icon for a section created without an emoji.
pub const DEFAULT_EMOJI: &str = "📦";
/// Fallback background style (the gray theme).
pub const DEFAULT_COLOR: &str = "bg-gray-100 border-gray-300";
/// Fallback label style (the gray theme).
pub const DEFAULT_TEXT_COLOR: &str = "text-gray-800";

/// A named preset used to stamp out new sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTemplate {
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub text_color: String,
}

impl SectionTemplate {
    #[must_use]
    pub fn new(name: &str, emoji: &str, color: &str, text_color: &str) -> Self {
        Self {
            name: name.to_owned(),
            emoji: emoji.to_owned(),
            color: color.to_owned(),
            text_color: text_color.to_owned(),
        }
    }

    /// Replace empty fields with the gray "New Section" defaults.
    #[must_use]
    pub fn with_fallbacks(self) -> Self {
        fn or(value: String, fallback: &str) -> String {
            if value.trim().is_empty() { fallback.to_owned() } else { value }
        }
        Self {
            name: or(self.name, DEFAULT_NAME),
            emoji: or(self.emoji, DEFAULT_EMOJI),
            color: or(self.color, DEFAULT_COLOR),
            text_color: or(self.text_color, DEFAULT_TEXT_COLOR),
        }
    }
}

/// A named background/label style pair offered by the add dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTheme {
    pub name: String,
    pub color: String,
    pub text_color: String,
}

const TEMPLATES: [(&str, &str, &str, &str); 20] = [
    ("Fresh Produce", "🥬", "bg-green-100 border-green-300", "text-green-800"),
    ("Bakery", "🍞", "bg-yellow-100 border-yellow-300", "text-yellow-800"),
    ("Deli", "🥪", "bg-orange-100 border-orange-300", "text-orange-800"),
    ("Meat & Seafood", "🥩", "bg-red-100 border-red-300", "text-red-800"),
    ("Dairy & Eggs", "🥛", "bg-blue-100 border-blue-300", "text-blue-800"),
    ("Frozen Foods", "🧊", "bg-cyan-100 border-cyan-300", "text-cyan-800"),
    ("Beverages", "🥤", "bg-purple-100 border-purple-300", "text-purple-800"),
    ("Snacks", "🍿", "bg-pink-100 border-pink-300", "text-pink-800"),
    ("Health & Beauty", "💊", "bg-indigo-100 border-indigo-300", "text-indigo-800"),
    ("Household", "🧽", "bg-gray-100 border-gray-300", "text-gray-800"),
    ("Electronics", "📱", "bg-slate-100 border-slate-300", "text-slate-800"),
    ("Pet Supplies", "🐕", "bg-amber-100 border-amber-300", "text-amber-800"),
    ("Baby Care", "👶", "bg-rose-100 border-rose-300", "text-rose-800"),
    ("Pharmacy", "💉", "bg-emerald-100 border-emerald-300", "text-emerald-800"),
    ("Flowers", "🌸", "bg-fuchsia-100 border-fuchsia-300", "text-fuchsia-800"),
    ("Auto Care", "🔧", "bg-zinc-100 border-zinc-300", "text-zinc-800"),
    ("Garden Center", "🌱", "bg-lime-100 border-lime-300", "text-lime-800"),
    ("Customer Service", "🎧", "bg-sky-100 border-sky-300", "text-sky-800"),
    ("Checkout", "💳", "bg-violet-100 border-violet-300", "text-violet-800"),
    ("Entrance", "🚪", "bg-neutral-100 border-neutral-300", "text-neutral-800"),
];

const EXTRA_SECTIONS: [(&str, &str, &str, &str); 6] = [
    ("Seafood", "🐟", "bg-teal-100 border-teal-300", "text-teal-800"),
    ("Wine & Spirits", "🍷", "bg-red-200 border-red-400", "text-red-900"),
    ("Coffee Bar", "☕", "bg-amber-200 border-amber-400", "text-amber-900"),
    ("Restrooms", "🚻", "bg-gray-200 border-gray-400", "text-gray-900"),
    ("ATM", "🏧", "bg-green-200 border-green-400", "text-green-900"),
    ("Shopping Carts", "🛒", "bg-blue-200 border-blue-400", "text-blue-900"),
];

const THEMES: [(&str, &str); 8] = [
    ("Green", "green"),
    ("Blue", "blue"),
    ("Red", "red"),
    ("Yellow", "yellow"),
    ("Orange", "orange"),
    ("Purple", "purple"),
    ("Pink", "pink"),
    ("Cyan", "cyan"),
];

/// The drag-and-drop template palette.
#[must_use]
pub fn default_templates() -> Vec<SectionTemplate> {
    TEMPLATES.iter().map(|(n, e, c, t)| SectionTemplate::new(n, e, c, t)).collect()
}

/// Every section kind a store may have: the palette plus a few service areas.
#[must_use]
pub fn all_store_sections() -> Vec<SectionTemplate> {
    TEMPLATES
        .iter()
        .chain(EXTRA_SECTIONS.iter())
        .map(|(n, e, c, t)| SectionTemplate::new(n, e, c, t))
        .collect()
}

/// Look up a template by name, ignoring ASCII case.
#[must_use]
pub fn find_template(name: &str) -> Option<SectionTemplate> {
    all_store_sections().into_iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// Color themes offered when adding a blank section.
#[must_use]
pub fn color_themes() -> Vec<ColorTheme> {
    THEMES
        .iter()
        .map(|(name, hue)| ColorTheme {
            name: (*name).to_owned(),
            color: format!("bg-{hue}-100 border-{hue}-300"),
            text_color: format!("text-{hue}-800"),
        })
        .collect()
}

/// The six-department layout used when nothing has been saved yet.
#[must_use]
pub fn default_sections() -> CanvasState {
    let layout: [(&str, usize, i32, i32, i32, i32); 6] = [
        ("produce", 0, 50, 50, 300, 200),
        ("bakery", 1, 370, 50, 200, 120),
        ("deli", 2, 590, 50, 200, 120),
        ("meat", 3, 810, 50, 200, 200),
        ("dairy", 4, 1030, 50, 120, 300),
        ("frozen", 5, 1030, 370, 120, 200),
    ];
    CanvasState::from_sections(
        layout
            .iter()
            .map(|&(id, template, x, y, width, height)| {
                let (name, emoji, color, text_color) = TEMPLATES[template];
                Section {
                    id: id.to_owned(),
                    name: name.to_owned(),
                    emoji: emoji.to_owned(),
                    color: color.to_owned(),
                    text_color: text_color.to_owned(),
                    x,
                    y,
                    width,
                    height,
                    visible: true,
                }
            })
            .collect(),
    )
}
