use egui::{Rect, Vec2};

use super::geometry::{BorderInsets, PopupLocation, fit_drop_down_rect};
use super::types::{ContainerId, EventInterests, ParentView, ShowMode, ViewKind};

/// What the host needs to create a platform window for a container.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerRequest {
    pub mode: ShowMode,
    pub rect: Rect,
    pub title: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShowOptions {
    /// Let the host restore a previously saved placement for this container.
    pub load_position: bool,

    /// Present the window now instead of on the next frame.
    pub display_immediately: bool,
}

/// Settings of the active window, mirrored onto the view hosting it.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSettings {
    pub title: String,
    pub auto_repaint_on_scene_change: bool,
    pub depth_buffer_bits: u32,
    pub event_interests: EventInterests,
    pub dont_clear_background: bool,

    /// Window min size grown by the view borders.
    pub min_size: Vec2,

    /// Window max size grown by the view borders.
    pub max_size: Vec2,
}

/// The platform layer: creates, places, shows and paints containers.
///
/// Only [`Self::create_container`] and [`Self::show_container`] can fail; their errors reach the
/// caller of the triggering [`super::EditorWindows`] operation unchanged.
pub trait WindowHost {
    type Error: std::error::Error + 'static;

    /// Monotonic clock in seconds, drives notification fades.
    fn time_since_startup(&self) -> f64;

    fn create_container(
        &mut self,
        container: ContainerId,
        request: &ContainerRequest,
    ) -> Result<(), Self::Error>;

    fn show_container(
        &mut self,
        container: ContainerId,
        mode: ShowMode,
        options: ShowOptions,
    ) -> Result<(), Self::Error>;

    fn set_container_position(&mut self, container: ContainerId, rect: Rect);

    fn set_container_title(&mut self, container: ContainerId, title: &str);

    fn close_container(&mut self, container: ContainerId);

    /// Give keyboard focus to a view and raise its container.
    fn focus_view(&mut self, view: ParentView);

    fn repaint(&mut self, view: ParentView);

    fn apply_view_settings(&mut self, view: ParentView, settings: &ViewSettings);

    /// Rebuild the rendering context of a view after its depth buffer format changed.
    fn recreate_context(&mut self, view: ParentView);

    fn make_modal(&mut self, container: ContainerId);

    fn border_size(&self, kind: ViewKind) -> BorderInsets;

    /// Monitor rectangles in global screen coordinates.
    fn monitors(&self) -> Vec<Rect>;

    /// Placement of a drop-down container next to `anchor`.
    fn drop_down_rect(
        &self,
        container: ContainerId,
        anchor: Rect,
        size: Vec2,
        priority: &[PopupLocation],
    ) -> Rect {
        let _ = container;
        fit_drop_down_rect(anchor, size, priority, &self.monitors())
    }
}
