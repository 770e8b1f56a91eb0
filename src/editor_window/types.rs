use egui::{Rect, Vec2};

use super::notification::Notification;
use super::title::{Content, WindowTypeId};

/// Handle of a live editor window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct WindowId(pub(crate) u64);

impl WindowId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Handle of a hosting container (one top-level platform window).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ContainerId(pub(crate) u64);

impl ContainerId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Handle of a tab group inside a normal container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DockAreaId(pub(crate) u64);

impl DockAreaId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// How a container is presented by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ShowMode {
    /// Regular dockable window: a split view holding dock areas.
    NormalWindow,

    /// Always-on-top tool window.
    Utility,

    /// Undecorated transient window (`show_popup`).
    Popup,

    /// Drop-down anchored to a control (`show_as_drop_down`).
    PopupMenu,

    /// Auxiliary window that closes when it loses focus.
    AuxWindow,

    /// Blocks input to every other container until closed.
    Modal,
}

impl ShowMode {
    /// Everything except normal windows hosts exactly one view with no dock area.
    pub fn is_single_view(self) -> bool {
        self != Self::NormalWindow
    }
}

/// Derived lifecycle state of a window, see [`super::EditorWindows::state`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowState {
    Unparented,
    Docked,
    Floating,
    Modal,
    Popup,
    Closed,
}

/// Non-owning back-reference from a window to the view hosting it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParentView {
    /// The container's root is a single host view showing this window.
    Host(ContainerId),

    /// The window is a tab in a dock area.
    Dock(DockAreaId),
}

/// Which kind of view a border metric is asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Host,
    DockArea,
}

impl ParentView {
    pub fn kind(self) -> ViewKind {
        match self {
            Self::Host(_) => ViewKind::Host,
            Self::Dock(_) => ViewKind::DockArea,
        }
    }
}

/// Input events a window wants on top of the default set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct EventInterests {
    pub wants_mouse_move: bool,
    pub wants_mouse_enter_leave_window: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum SplitAxis {
    Horizontal,
    Vertical,
}

/// A single editor window. Mutated only through [`super::EditorWindows`].
#[derive(Clone, Debug)]
pub struct EditorWindow {
    pub(super) id: WindowId,
    pub(super) window_type: WindowTypeId,
    pub(super) title: Content,
    pub(super) position: Rect,
    pub(super) min_size: Vec2,
    pub(super) max_size: Vec2,
    pub(super) depth_buffer_bits: u32,
    pub(super) auto_repaint_on_scene_change: bool,
    pub(super) event_interests: EventInterests,
    pub(super) dont_clear_background: bool,
    pub(super) notification: Option<Notification>,
    pub(super) parent: Option<ParentView>,
}

impl EditorWindow {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn window_type(&self) -> WindowTypeId {
        self.window_type
    }

    pub fn title_content(&self) -> &Content {
        &self.title
    }

    /// Client rectangle in screen space (excludes container borders).
    pub fn position(&self) -> Rect {
        self.position
    }

    pub fn min_size(&self) -> Vec2 {
        self.min_size
    }

    pub fn max_size(&self) -> Vec2 {
        self.max_size
    }

    pub fn depth_buffer_bits(&self) -> u32 {
        self.depth_buffer_bits
    }

    pub fn auto_repaint_on_scene_change(&self) -> bool {
        self.auto_repaint_on_scene_change
    }

    pub fn wants_mouse_move(&self) -> bool {
        self.event_interests.wants_mouse_move
    }

    pub fn wants_mouse_enter_leave_window(&self) -> bool {
        self.event_interests.wants_mouse_enter_leave_window
    }

    pub fn event_interests(&self) -> EventInterests {
        self.event_interests
    }

    pub fn dont_clear_background(&self) -> bool {
        self.dont_clear_background
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn parent(&self) -> Option<ParentView> {
        self.parent
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SplitChild {
    Dock(DockAreaId),
    Split(SplitNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SplitNode {
    pub axis: SplitAxis,
    pub children: Vec<SplitChild>,
}

impl SplitNode {
    pub fn new(axis: SplitAxis, children: Vec<SplitChild>) -> Self {
        Self { axis, children }
    }

    /// Dock areas in depth-first, left-to-right order.
    pub fn dock_areas(&self) -> Vec<DockAreaId> {
        let mut out = Vec::new();
        let mut stack: Vec<&SplitChild> = self.children.iter().rev().collect();
        while let Some(child) = stack.pop() {
            match child {
                SplitChild::Dock(dock) => out.push(*dock),
                SplitChild::Split(node) => stack.extend(node.children.iter().rev()),
            }
        }
        out
    }

    /// True if `dock` is a direct child of this node (not nested deeper).
    pub fn has_direct_dock(&self, dock: DockAreaId) -> bool {
        self.children
            .iter()
            .any(|c| matches!(c, SplitChild::Dock(d) if *d == dock))
    }

    /// Remove `dock` anywhere below this node, pruning nested splits that become empty.
    pub(super) fn remove_dock(&mut self, dock: DockAreaId) -> bool {
        let mut removed = false;
        self.children.retain_mut(|child| match child {
            SplitChild::Dock(d) => {
                if *d == dock {
                    removed = true;
                    false
                } else {
                    true
                }
            }
            SplitChild::Split(node) => {
                if !removed && node.remove_dock(dock) {
                    removed = true;
                }
                !node.children.is_empty()
            }
        });
        removed
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RootView {
    /// Single host view: utility, popup, drop-down, aux and modal containers.
    Host(WindowId),

    /// Split view holding one or more dock areas: normal containers.
    Split(SplitNode),
}

/// A top-level platform window, owned by [`super::EditorWindows`].
#[derive(Clone, Debug)]
pub struct HostingContainer {
    pub(super) id: ContainerId,
    pub(super) mode: ShowMode,
    pub(super) rect: Rect,
    pub(super) title: String,
    pub(super) root: RootView,
    pub(super) aux: bool,
    pub(super) dont_save_to_layout: bool,
    pub(super) maximized: Option<WindowId>,

    /// Depth bits of the host view, for single-view containers.
    pub(super) view_depth_buffer_bits: u32,
}

impl HostingContainer {
    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn mode(&self) -> ShowMode {
        self.mode
    }

    /// Outer rectangle in screen space, borders included.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn root(&self) -> &RootView {
        &self.root
    }

    pub fn is_aux(&self) -> bool {
        self.aux
    }

    pub fn dont_save_to_layout(&self) -> bool {
        self.dont_save_to_layout
    }

    pub fn maximized_window(&self) -> Option<WindowId> {
        self.maximized
    }

    pub fn dock_areas(&self) -> Vec<DockAreaId> {
        match &self.root {
            RootView::Host(_) => Vec::new(),
            RootView::Split(node) => node.dock_areas(),
        }
    }
}

/// An ordered group of tabs with one selected tab.
#[derive(Clone, Debug)]
pub struct DockArea {
    pub(super) id: DockAreaId,
    pub(super) container: ContainerId,
    pub(super) panes: Vec<WindowId>,
    pub(super) selected: usize,
    pub(super) depth_buffer_bits: u32,
}

impl DockArea {
    pub fn id(&self) -> DockAreaId {
        self.id
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    pub fn panes(&self) -> &[WindowId] {
        &self.panes
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.panes.get(self.selected).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dock_areas_are_listed_depth_first() {
        let node = SplitNode::new(
            SplitAxis::Horizontal,
            vec![
                SplitChild::Dock(DockAreaId(1)),
                SplitChild::Split(SplitNode::new(
                    SplitAxis::Vertical,
                    vec![SplitChild::Dock(DockAreaId(2)), SplitChild::Dock(DockAreaId(3))],
                )),
                SplitChild::Dock(DockAreaId(4)),
            ],
        );
        assert_eq!(
            node.dock_areas(),
            vec![DockAreaId(1), DockAreaId(2), DockAreaId(3), DockAreaId(4)]
        );
        assert!(node.has_direct_dock(DockAreaId(4)));
        assert!(!node.has_direct_dock(DockAreaId(2)));
    }

    #[test]
    fn removing_last_dock_of_nested_split_prunes_it() {
        let mut node = SplitNode::new(
            SplitAxis::Horizontal,
            vec![
                SplitChild::Dock(DockAreaId(1)),
                SplitChild::Split(SplitNode::new(
                    SplitAxis::Vertical,
                    vec![SplitChild::Dock(DockAreaId(2))],
                )),
            ],
        );
        assert!(node.remove_dock(DockAreaId(2)));
        assert_eq!(node.children, vec![SplitChild::Dock(DockAreaId(1))]);
        assert!(!node.remove_dock(DockAreaId(2)));
    }
}
