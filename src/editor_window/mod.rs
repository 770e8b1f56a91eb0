use std::collections::{BTreeMap, VecDeque};

mod debug;
mod factory;
mod geometry;
mod headless;
mod host;
mod integrity;
mod lifecycle;
mod notification;
mod options;
#[cfg(feature = "persistence")]
mod persistence;
mod properties;
mod scheduler;
mod title;
mod topology;
mod types;

#[cfg(test)]
mod notification_tests;
#[cfg(test)]
mod position_tests;

pub use factory::WindowRequest;
pub use geometry::{BorderInsets, PopupLocation, fit_drop_down_rect};
pub use headless::{HeadlessHost, HeadlessHostError, HostCall};
pub use host::{ContainerRequest, ShowOptions, ViewSettings, WindowHost};
pub use notification::{FadeStep, Notification};
pub use options::EditorWindowsOptions;
#[cfg(feature = "persistence")]
pub use persistence::{
    ContainerSnapshot, LAYOUT_SNAPSHOT_VERSION, LayoutNodeSnapshot, LayoutPersistenceError,
    LayoutSnapshot, WindowSnapshot,
};
pub use scheduler::FrameScheduler;
pub use title::{Content, WindowTypeDescriptor, WindowTypeId, WindowTypeRegistry};
pub use types::{
    ContainerId, DockArea, DockAreaId, EditorWindow, EventInterests, HostingContainer,
    ParentView, RootView, ShowMode, SplitAxis, SplitChild, SplitNode, ViewKind, WindowState,
    WindowId,
};

/// Owns every editor window, the containers hosting them and the per-frame scheduler.
///
/// All operations are addressed by [`WindowId`] and are forgiving: asking a closed window to
/// focus, showing an already shown window or closing twice are silent no-ops. Work that the
/// platform may refuse (creating or showing a container) returns the host's error unchanged.
///
/// Call [`Self::tick`] once per frame to drive notification fades.
#[derive(Debug)]
pub struct EditorWindows<H: WindowHost> {
    pub options: EditorWindowsOptions,

    host: H,
    types: WindowTypeRegistry,

    windows: BTreeMap<WindowId, EditorWindow>,
    containers: BTreeMap<ContainerId, HostingContainer>,
    dock_areas: BTreeMap<DockAreaId, DockArea>,

    scheduler: FrameScheduler,
    focused_view: Option<ParentView>,

    next_window_serial: u64,
    next_container_serial: u64,
    next_dock_area_serial: u64,

    debug_log: VecDeque<String>,
    debug_last_integrity_hash: u64,
}

impl<H: WindowHost> EditorWindows<H> {
    pub fn new(host: H) -> Self {
        Self::new_with_options(host, EditorWindowsOptions::default())
    }

    pub fn new_with_options(host: H, options: EditorWindowsOptions) -> Self {
        Self {
            options,
            host,
            types: WindowTypeRegistry::default(),
            windows: BTreeMap::new(),
            containers: BTreeMap::new(),
            dock_areas: BTreeMap::new(),
            scheduler: FrameScheduler::default(),
            focused_view: None,
            next_window_serial: 1,
            next_container_serial: 1,
            next_dock_area_serial: 1,
            debug_log: VecDeque::new(),
            debug_last_integrity_hash: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn types(&self) -> &WindowTypeRegistry {
        &self.types
    }

    pub fn register_window_type(&mut self, descriptor: WindowTypeDescriptor) -> WindowTypeId {
        self.types.register(descriptor)
    }

    pub fn window(&self, id: WindowId) -> Option<&EditorWindow> {
        self.windows.get(&id)
    }

    /// All live windows, in creation order.
    pub fn windows(&self) -> impl Iterator<Item = &EditorWindow> + '_ {
        self.windows.values()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn container(&self, id: ContainerId) -> Option<&HostingContainer> {
        self.containers.get(&id)
    }

    pub fn containers(&self) -> impl Iterator<Item = &HostingContainer> + '_ {
        self.containers.values()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn dock_area(&self, id: DockAreaId) -> Option<&DockArea> {
        self.dock_areas.get(&id)
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// The container currently hosting `id`, directly or through a dock area.
    pub fn container_of(&self, id: WindowId) -> Option<ContainerId> {
        match self.windows.get(&id)?.parent? {
            ParentView::Host(container) => Some(container),
            ParentView::Dock(dock) => self.dock_areas.get(&dock).map(|d| d.container),
        }
    }

    pub fn state(&self, id: WindowId) -> WindowState {
        let Some(window) = self.windows.get(&id) else {
            return WindowState::Closed;
        };
        let Some(parent) = window.parent else {
            return WindowState::Unparented;
        };
        let Some(container) = self
            .container_of(id)
            .and_then(|c| self.containers.get(&c))
        else {
            return WindowState::Unparented;
        };

        match container.mode {
            ShowMode::Modal => WindowState::Modal,
            ShowMode::Popup | ShowMode::PopupMenu => WindowState::Popup,
            ShowMode::Utility | ShowMode::AuxWindow => WindowState::Floating,
            ShowMode::NormalWindow => {
                let lone_tab = match parent {
                    ParentView::Dock(dock) => {
                        let docks = container.dock_areas();
                        docks.len() == 1
                            && docks[0] == dock
                            && self.dock_areas.get(&dock).is_some_and(|d| d.panes.len() == 1)
                    }
                    ParentView::Host(_) => true,
                };
                if lone_tab {
                    WindowState::Floating
                } else {
                    WindowState::Docked
                }
            }
        }
    }

    /// True if the window shares its container with other windows.
    pub fn docked(&self, id: WindowId) -> bool {
        self.state(id) == WindowState::Docked
    }

    /// True if the window is the active view of its parent (the selected tab).
    pub fn has_focus(&self, id: WindowId) -> bool {
        self.is_active_view(id)
    }

    /// The active window of the view that last received focus.
    pub fn focused_window(&self) -> Option<WindowId> {
        self.active_window_of(self.focused_view?)
    }

    /// Number of tabs next to (and including) `id`, or 0 when not docked in a dock area.
    pub fn tab_count(&self, id: WindowId) -> usize {
        match self.windows.get(&id).and_then(|w| w.parent) {
            Some(ParentView::Dock(dock)) => self.dock_areas.get(&dock).map_or(0, |d| d.panes.len()),
            _ => 0,
        }
    }

    pub(crate) fn active_window_of(&self, view: ParentView) -> Option<WindowId> {
        match view {
            ParentView::Host(container) => match self.containers.get(&container)?.root {
                RootView::Host(window) => Some(window),
                RootView::Split(_) => None,
            },
            ParentView::Dock(dock) => self.dock_areas.get(&dock)?.active_window(),
        }
    }

    pub(crate) fn is_active_view(&self, id: WindowId) -> bool {
        self.windows
            .get(&id)
            .and_then(|w| w.parent)
            .and_then(|parent| self.active_window_of(parent))
            == Some(id)
    }

    fn allocate_window_id(&mut self) -> WindowId {
        let id = WindowId(self.next_window_serial);
        self.next_window_serial += 1;
        id
    }

    fn allocate_container_id(&mut self) -> ContainerId {
        let id = ContainerId(self.next_container_serial);
        self.next_container_serial += 1;
        id
    }

    fn allocate_dock_area_id(&mut self) -> DockAreaId {
        let id = DockAreaId(self.next_dock_area_serial);
        self.next_dock_area_serial += 1;
        id
    }
}
