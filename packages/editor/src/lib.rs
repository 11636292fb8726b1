//! # menukit-editor
//!
//! The direct-manipulation editing engine behind the menu designer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ dom: markup ↔ owned node tree + outline     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorRuntime                       │
//! │  - interaction state (one tagged union)     │
//! │  - host commands (select/delete/move/...)   │
//! │  - selection, image toolbar, drag engine    │
//! │  - overlay projection for the embedder      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ bridge: wire messages to/from the host      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The tree is source of truth**: outline, overlays, and the host
//!    mirror are derived views, rebuilt rather than patched
//! 2. **Paths are ephemeral**: resolved at execution time, never trusted
//!    across mutations; stale paths degrade to silent no-ops
//! 3. **One resync per mutation**: every structural change ends with one
//!    outline update and one full-document snapshot, in that order
//! 4. **Geometry behind a trait**: the runtime is headless; rects come
//!    through [`Measure`], so tests and embedders supply their own layout

pub mod commands;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod geometry;
pub mod layout;
pub mod overlay;
pub mod runtime;
pub mod selection;

pub use commands::{Command, Direction, InsertPosition};
pub use config::EditorConfig;
pub use error::CommandFailure;
pub use events::Event;
pub use geometry::{Point, Rect, Viewport};
pub use layout::{BlockLayout, Measure};
pub use overlay::Overlays;
pub use runtime::{
    DragMode, DragSession, DropSide, DropSpot, EditorRuntime, Highlight, Interaction,
};
