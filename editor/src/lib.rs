//! Layout editor engine for the supermarket store map.
//!
//! This crate owns everything behind the admin map editor: the section data
//! model, clamped move/resize geometry, snapshot undo/redo, best-effort
//! persistence, pan/zoom view state, and the pointer/keyboard interaction
//! controller. It has no UI; hosts feed it input events and act on the
//! returned [`engine::Action`]s. With the `web` feature it also builds to
//! WebAssembly and persists to browser `localStorage`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller ([`engine::EditorCore`]) and persisting session ([`engine::Editor`]) |
//! | [`doc`] | Sections, sparse patches, and the canvas state |
//! | [`geometry`] | Clamped move/resize math and resize-handle anchors |
//! | [`history`] | Bounded snapshot undo/redo |
//! | [`persistence`] | Best-effort load/save over a key-value store |
//! | [`storage`] | Key-value store trait and backends |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against handles and section bodies |
//! | [`templates`] | Palette templates, color themes, and the default layout |
//! | [`consts`] | Canvas size, minimum section size, zoom limits, history cap |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod hit;
pub mod input;
pub mod persistence;
pub mod storage;
pub mod templates;
#[cfg(feature = "web")]
pub mod wasm;
