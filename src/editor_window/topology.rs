use std::collections::BTreeSet;

use egui::{Pos2, Rect};

use crate::dock_builder::{DockLayout, LayoutNode};

use super::EditorWindows;
use super::host::{ContainerRequest, ShowOptions, WindowHost};
use super::title::WindowTypeId;
use super::types::{
    ContainerId, DockArea, DockAreaId, HostingContainer, ParentView, RootView, ShowMode,
    SplitAxis, SplitChild, SplitNode, ViewKind, WindowId,
};

/// A tab removed from the model whose host side effects are still pending.
#[derive(Clone, Copy, Debug)]
pub(super) struct DetachedTab {
    container: ContainerId,
    dock: DockAreaId,
    dock_removed: bool,
    container_removed: bool,
    new_active: Option<WindowId>,
}

impl<H: WindowHost> EditorWindows<H> {
    /// Record a normal container whose single dock area holds `window` as its only tab.
    ///
    /// Model only: the host is told by [`Self::open_container`].
    pub(super) fn build_normal_container(
        &mut self,
        window: WindowId,
        screen_pos: Pos2,
    ) -> Option<ContainerId> {
        let (size, title) = {
            let w = self.windows.get(&window)?;
            (w.position.size(), w.title.text.clone())
        };

        let container_id = self.allocate_container_id();
        let dock_id = self.allocate_dock_area_id();

        // The dock area exists before the rect is computed, so its borders apply.
        let border = self.host.border_size(ViewKind::DockArea);
        let rect = border.add(Rect::from_min_size(screen_pos, size));

        self.dock_areas.insert(
            dock_id,
            DockArea {
                id: dock_id,
                container: container_id,
                panes: vec![window],
                selected: 0,
                depth_buffer_bits: 0,
            },
        );
        self.containers.insert(
            container_id,
            HostingContainer {
                id: container_id,
                mode: ShowMode::NormalWindow,
                rect,
                title,
                root: RootView::Split(SplitNode::new(
                    SplitAxis::Horizontal,
                    vec![SplitChild::Dock(dock_id)],
                )),
                aux: false,
                dont_save_to_layout: false,
                maximized: None,
                view_depth_buffer_bits: 0,
            },
        );
        if let Some(w) = self.windows.get_mut(&window) {
            w.parent = Some(ParentView::Dock(dock_id));
        }
        Some(container_id)
    }

    /// Record a container whose root is a single host view showing `window`.
    ///
    /// The container rect is the window rect: a host view has no border yet when it is placed.
    pub(super) fn build_single_view_container(
        &mut self,
        window: WindowId,
        mode: ShowMode,
    ) -> Option<ContainerId> {
        let (rect, title) = {
            let w = self.windows.get(&window)?;
            (w.position, w.title.text.clone())
        };

        let container_id = self.allocate_container_id();
        self.containers.insert(
            container_id,
            HostingContainer {
                id: container_id,
                mode,
                rect,
                title,
                root: RootView::Host(window),
                aux: false,
                dont_save_to_layout: false,
                maximized: None,
                view_depth_buffer_bits: 0,
            },
        );
        if let Some(w) = self.windows.get_mut(&window) {
            w.parent = Some(ParentView::Host(container_id));
        }
        Some(container_id)
    }

    /// Create and show a container that is already recorded in the model.
    ///
    /// On host failure the container is dropped from the model (its windows become unparented)
    /// and the error is returned unchanged.
    pub(super) fn open_container(
        &mut self,
        container_id: ContainerId,
        show: ShowOptions,
    ) -> Result<(), H::Error> {
        let Some(container) = self.containers.get(&container_id) else {
            return Ok(());
        };
        let mode = container.mode;
        let request = ContainerRequest {
            mode,
            rect: container.rect,
            title: container.title.clone(),
        };

        if let Err(err) = self.host.create_container(container_id, &request) {
            log::warn!("host refused to create {container_id:?} ({mode:?}): {err}");
            self.discard_container(container_id);
            self.debug_log_event(format!("create FAILED {container_id:?}"));
            return Err(err);
        }

        for window in self.active_windows_in(container_id) {
            self.make_parent_settings_match(window);
        }

        if let Err(err) = self.host.show_container(container_id, mode, show) {
            log::warn!("host failed to show {container_id:?} ({mode:?}): {err}");
            self.discard_container(container_id);
            self.host.close_container(container_id);
            self.debug_log_event(format!("show FAILED {container_id:?}"));
            return Err(err);
        }

        log::debug!("opened {container_id:?} as {mode:?}");
        self.debug_log_event(format!("open {container_id:?} mode={mode:?}"));
        self.debug_check_integrity();
        Ok(())
    }

    /// The active window of every view in the container.
    pub(super) fn active_windows_in(&self, container_id: ContainerId) -> Vec<WindowId> {
        let Some(container) = self.containers.get(&container_id) else {
            return Vec::new();
        };
        match &container.root {
            RootView::Host(window) => vec![*window],
            RootView::Split(node) => node
                .dock_areas()
                .iter()
                .filter_map(|dock| self.dock_areas.get(dock)?.active_window())
                .collect(),
        }
    }

    /// Drop a container from the model. Its windows stay alive, unparented.
    pub(super) fn discard_container(&mut self, container_id: ContainerId) -> Vec<WindowId> {
        let Some(container) = self.containers.remove(&container_id) else {
            return Vec::new();
        };

        let mut orphans = Vec::new();
        let mut docks = Vec::new();
        match container.root {
            RootView::Host(window) => orphans.push(window),
            RootView::Split(node) => {
                for dock in node.dock_areas() {
                    if let Some(area) = self.dock_areas.remove(&dock) {
                        orphans.extend(area.panes);
                    }
                    docks.push(dock);
                }
            }
        }

        for window in &orphans {
            if let Some(w) = self.windows.get_mut(window) {
                w.parent = None;
            }
        }

        self.focused_view = self.focused_view.filter(|view| match view {
            ParentView::Host(c) => *c != container_id,
            ParentView::Dock(d) => !docks.contains(d),
        });

        orphans
    }

    /// Tear down a container on both sides.
    pub(super) fn close_container_now(&mut self, container_id: ContainerId) {
        if !self.containers.contains_key(&container_id) {
            return;
        }
        self.discard_container(container_id);
        self.host.close_container(container_id);
        log::debug!("closed {container_id:?}");
        self.debug_log_event(format!("close {container_id:?}"));
        self.debug_check_integrity();
    }

    /// Model only: insert an unparented window as the selected tab of `dock`.
    pub(super) fn attach_tab(
        &mut self,
        dock: DockAreaId,
        window: WindowId,
        index: Option<usize>,
    ) -> bool {
        if !self.windows.get(&window).is_some_and(|w| w.parent.is_none()) {
            return false;
        }
        let Some(area) = self.dock_areas.get_mut(&dock) else {
            return false;
        };

        let index = index.unwrap_or(area.panes.len()).min(area.panes.len());
        area.panes.insert(index, window);
        area.selected = index;

        if let Some(w) = self.windows.get_mut(&window) {
            w.parent = Some(ParentView::Dock(dock));
        }
        true
    }

    /// Add `window` as the selected tab of `dock` and let the host know.
    pub(super) fn add_tab(&mut self, dock: DockAreaId, window: WindowId) -> bool {
        if !self.attach_tab(dock, window, None) {
            return false;
        }
        self.make_parent_settings_match(window);
        self.host.repaint(ParentView::Dock(dock));
        self.debug_log_event(format!("tab add {window:?} -> {dock:?}"));
        self.debug_check_integrity();
        true
    }

    /// Model only: remove `window` from `dock`, tearing down an emptied dock area and container.
    pub(super) fn detach_tab(&mut self, dock: DockAreaId, window: WindowId) -> Option<DetachedTab> {
        let area = self.dock_areas.get_mut(&dock)?;
        let index = area.panes.iter().position(|&w| w == window)?;
        let was_active = area.active_window();

        area.panes.remove(index);
        if index < area.selected {
            area.selected -= 1;
        }
        if area.selected >= area.panes.len() {
            area.selected = area.panes.len().saturating_sub(1);
        }

        let now_active = area.active_window();
        let container_id = area.container;
        let dock_removed = area.panes.is_empty();

        if let Some(w) = self.windows.get_mut(&window) {
            w.parent = None;
        }

        let mut container_removed = false;
        if let Some(container) = self.containers.get_mut(&container_id) {
            if container.maximized == Some(window) {
                container.maximized = None;
            }
            if dock_removed && let RootView::Split(node) = &mut container.root {
                node.remove_dock(dock);
                container_removed = node.children.is_empty();
            }
        }

        if dock_removed {
            self.dock_areas.remove(&dock);
            if self.focused_view == Some(ParentView::Dock(dock)) {
                self.focused_view = None;
            }
        }
        if container_removed {
            self.containers.remove(&container_id);
        }

        Some(DetachedTab {
            container: container_id,
            dock,
            dock_removed,
            container_removed,
            new_active: (now_active != was_active).then_some(now_active).flatten(),
        })
    }

    /// Host side effects of a [`DetachedTab`].
    pub(super) fn finish_detach(&mut self, detached: DetachedTab) {
        if detached.container_removed {
            self.host.close_container(detached.container);
            return;
        }
        if let Some(window) = detached.new_active {
            self.make_parent_settings_match(window);
        }
        if !detached.dock_removed {
            self.host.repaint(ParentView::Dock(detached.dock));
        } else if let Some(first) = self
            .containers
            .get(&detached.container)
            .and_then(|c| c.dock_areas().first().copied())
        {
            self.host.repaint(ParentView::Dock(first));
        }
    }

    /// Remove `window` from `dock` on both sides. The window ends up unparented.
    pub(super) fn remove_tab(&mut self, dock: DockAreaId, window: WindowId) -> bool {
        let Some(detached) = self.detach_tab(dock, window) else {
            return false;
        };
        self.finish_detach(detached);
        self.debug_log_event(format!(
            "tab remove {window:?} from {dock:?} dock_removed={} container_removed={}",
            detached.dock_removed, detached.container_removed
        ));
        self.debug_check_integrity();
        true
    }

    /// Detach a window from whatever hosts it. Host-view containers are closed.
    pub(super) fn unparent(&mut self, window: WindowId) {
        match self.windows.get(&window).and_then(|w| w.parent) {
            Some(ParentView::Dock(dock)) => {
                self.remove_tab(dock, window);
            }
            Some(ParentView::Host(container)) => self.close_container_now(container),
            None => {}
        }
    }

    /// First dock area (in container order) that holds a window of type `ty`.
    pub(super) fn dock_area_hosting_type(&self, ty: WindowTypeId) -> Option<DockAreaId> {
        self.containers
            .values()
            .flat_map(HostingContainer::dock_areas)
            .find(|dock| {
                self.dock_areas.get(dock).is_some_and(|area| {
                    area.panes
                        .iter()
                        .any(|w| self.windows.get(w).is_some_and(|w| w.window_type == ty))
                })
            })
    }

    /// Spawn a normal container with the splits and tab groups of `layout` at `rect`.
    ///
    /// Windows already hosted elsewhere are detached first; closed and repeated windows are
    /// skipped, and groups left empty are pruned. Returns `None` if nothing remains.
    pub fn spawn_layout(
        &mut self,
        layout: &DockLayout,
        rect: Rect,
    ) -> Result<Option<ContainerId>, H::Error> {
        for window in layout.windows() {
            self.unparent(window);
        }

        let container_id = self.allocate_container_id();
        let mut used = BTreeSet::new();
        let root = match self.build_layout_child(&layout.root, container_id, &mut used) {
            Some(SplitChild::Split(node)) => node,
            Some(dock @ SplitChild::Dock(_)) => SplitNode::new(SplitAxis::Horizontal, vec![dock]),
            None => return Ok(None),
        };

        let title = root
            .dock_areas()
            .first()
            .and_then(|dock| self.dock_areas.get(dock)?.active_window())
            .and_then(|w| self.windows.get(&w))
            .map(|w| w.title.text.clone())
            .unwrap_or_default();

        self.containers.insert(
            container_id,
            HostingContainer {
                id: container_id,
                mode: ShowMode::NormalWindow,
                rect,
                title,
                root: RootView::Split(root),
                aux: false,
                dont_save_to_layout: false,
                maximized: None,
                view_depth_buffer_bits: 0,
            },
        );

        self.open_container(
            container_id,
            ShowOptions {
                load_position: false,
                display_immediately: true,
            },
        )?;
        Ok(Some(container_id))
    }

    fn build_layout_child(
        &mut self,
        node: &LayoutNode,
        container_id: ContainerId,
        used: &mut BTreeSet<WindowId>,
    ) -> Option<SplitChild> {
        match node {
            LayoutNode::Tabs { windows, selected } => {
                let selected_window = windows.get(*selected).copied();
                let panes: Vec<WindowId> = windows
                    .iter()
                    .copied()
                    .filter(|w| self.windows.get(w).is_some_and(|w| w.parent.is_none()))
                    .filter(|w| used.insert(*w))
                    .collect();
                if panes.is_empty() {
                    return None;
                }

                let dock_id = self.allocate_dock_area_id();
                for window in &panes {
                    if let Some(w) = self.windows.get_mut(window) {
                        w.parent = Some(ParentView::Dock(dock_id));
                    }
                }
                let selected = selected_window
                    .and_then(|selected| panes.iter().position(|w| *w == selected))
                    .unwrap_or(0);
                self.dock_areas.insert(
                    dock_id,
                    DockArea {
                        id: dock_id,
                        container: container_id,
                        panes,
                        selected,
                        depth_buffer_bits: 0,
                    },
                );
                Some(SplitChild::Dock(dock_id))
            }
            LayoutNode::Split { axis, children } => {
                let children: Vec<SplitChild> = children
                    .iter()
                    .filter_map(|child| self.build_layout_child(child, container_id, used))
                    .collect();
                (!children.is_empty()).then(|| SplitChild::Split(SplitNode::new(*axis, children)))
            }
        }
    }
}
