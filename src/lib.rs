//! Editor windows for egui hosts: a docking/show/focus lifecycle over hosting containers,
//! dock areas and tabs, with notifications, a typed window factory and JSON helpers.
//!
//! The platform side (creating, placing and painting native windows) sits behind
//! [`WindowHost`]. [`HeadlessHost`] implements it without a display.

#![forbid(unsafe_code)]

pub mod dock_builder;
pub mod editor_window;
#[cfg(feature = "json")]
pub mod json;

pub use dock_builder::{DockLayout, DockLayoutBuilder, DockNodeId, LayoutNode, SplitDirection};
pub use editor_window::{
    Content, EditorWindows, EditorWindowsOptions, HeadlessHost, PopupLocation, ShowMode,
    WindowHost, WindowId, WindowRequest, WindowState, WindowTypeDescriptor, WindowTypeId,
};

#[cfg(feature = "json")]
pub use json::{JsonError, from_json, from_json_overwrite, to_json};

#[cfg(feature = "persistence")]
pub use editor_window::{LAYOUT_SNAPSHOT_VERSION, LayoutPersistenceError, LayoutSnapshot};
