//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Program display with the cursor character highlighted
//! - [`registers`]: The working register and every written slot
//! - [`frames`]: Loop frames, pending calls and known functions
//! - [`terminal`]: Program output up to the step being shown
//! - [`status`]: Status bar with keybindings and execution state
//!
//! Each pane module exports a `render_*` function taking a `*RenderData`
//! bundle and, where the pane scrolls, a `*ScrollState`.

pub mod frames;
pub mod registers;
pub mod source;
pub mod status;
pub mod terminal;

// Re-export render functions for convenience
pub use frames::{render_frames_pane, FramesRenderData, FramesScrollState};
pub use registers::{render_register_pane, RegisterRenderData, RegisterScrollState};
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use terminal::{render_terminal_pane, TerminalRenderData, TerminalScrollState};
