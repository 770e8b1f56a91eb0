use egui::{Rect, Vec2};

use super::EditorWindows;
use super::host::{ShowOptions, ViewSettings, WindowHost};
use super::title::Content;
use super::types::{ContainerId, DockAreaId, ParentView, RootView, ViewKind, WindowId};

impl<H: WindowHost> EditorWindows<H> {
    /// Mirror the window's settings onto its parent view, if it is the active view there.
    pub(super) fn make_parent_settings_match(&mut self, id: WindowId) {
        if !self.is_active_view(id) {
            return;
        }
        let Some(window) = self.windows.get(&id) else {
            return;
        };
        let Some(parent) = window.parent else {
            return;
        };

        let border = self.host.border_size(parent.kind()).sum();
        let settings = ViewSettings {
            title: window.title.text.clone(),
            auto_repaint_on_scene_change: window.auto_repaint_on_scene_change,
            depth_buffer_bits: window.depth_buffer_bits,
            event_interests: window.event_interests,
            dont_clear_background: window.dont_clear_background,
            min_size: window.min_size + border,
            max_size: window.max_size + border,
        };

        let view_depth = match parent {
            ParentView::Host(container) => self
                .containers
                .get_mut(&container)
                .map(|c| &mut c.view_depth_buffer_bits),
            ParentView::Dock(dock) => self
                .dock_areas
                .get_mut(&dock)
                .map(|d| &mut d.depth_buffer_bits),
        };
        let depth_changed = view_depth.is_some_and(|depth| {
            let changed = *depth != settings.depth_buffer_bits;
            *depth = settings.depth_buffer_bits;
            changed
        });

        self.host.apply_view_settings(parent, &settings);
        if depth_changed {
            log::debug!(
                "{parent:?} depth buffer now {} bits, recreating context",
                settings.depth_buffer_bits
            );
            self.host.recreate_context(parent);
        }
    }

    /// Set the client rect of a window.
    ///
    /// - Single-view containers follow the rect.
    /// - The only tab of a container's only dock area moves the whole container (grown by the
    ///   dock borders).
    /// - Any other tab is split off into a new top-level container at the rect, so its siblings
    ///   keep their placement.
    ///
    /// # Errors
    /// Host errors from creating the split-off container. The window is left unparented then.
    pub fn set_position(&mut self, id: WindowId, rect: Rect) -> Result<(), H::Error> {
        let Some(window) = self.windows.get_mut(&id) else {
            return Ok(());
        };
        window.position = rect;
        let parent = window.parent;

        match parent {
            None => Ok(()),
            Some(ParentView::Host(container_id)) => {
                if let Some(container) = self.containers.get_mut(&container_id) {
                    container.rect = rect;
                }
                self.host.set_container_position(container_id, rect);
                Ok(())
            }
            Some(ParentView::Dock(dock)) => {
                if let Some(container_id) = self.sole_tab_container(dock) {
                    let outer = self.host.border_size(ViewKind::DockArea).add(rect);
                    if let Some(container) = self.containers.get_mut(&container_id) {
                        container.rect = outer;
                    }
                    self.host.set_container_position(container_id, outer);
                    Ok(())
                } else {
                    self.split_off_into_new_container(id, dock, rect)
                }
            }
        }
    }

    /// The container of `dock` if `dock` is its only dock area, sits directly under the root
    /// split, and holds a single tab.
    fn sole_tab_container(&self, dock: DockAreaId) -> Option<ContainerId> {
        let area = self.dock_areas.get(&dock)?;
        if area.panes.len() != 1 {
            return None;
        }
        let container = self.containers.get(&area.container)?;
        match &container.root {
            RootView::Split(node) if node.children.len() == 1 && node.has_direct_dock(dock) => {
                Some(container.id)
            }
            _ => None,
        }
    }

    /// Move a tab out of a shared container into a new one at `rect`.
    ///
    /// Both topology changes land in the model before the host hears about either, so a repaint
    /// in between never sees the tab in two places or in none.
    fn split_off_into_new_container(
        &mut self,
        id: WindowId,
        dock: DockAreaId,
        rect: Rect,
    ) -> Result<(), H::Error> {
        let Some(detached) = self.detach_tab(dock, id) else {
            return Ok(());
        };
        let new_container = self.build_normal_container(id, rect.min);

        log::debug!("split {id:?} off {dock:?} into {new_container:?}");
        self.debug_log_event(format!("split off {id:?} from {dock:?} -> {new_container:?}"));

        self.finish_detach(detached);
        match new_container {
            Some(container_id) => self.open_container(
                container_id,
                ShowOptions {
                    load_position: true,
                    display_immediately: true,
                },
            ),
            None => Ok(()),
        }
    }

    pub fn set_min_size(&mut self, id: WindowId, min_size: Vec2) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.min_size = min_size;
            self.make_parent_settings_match(id);
        }
    }

    pub fn set_max_size(&mut self, id: WindowId, max_size: Vec2) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.max_size = max_size;
            self.make_parent_settings_match(id);
        }
    }

    /// Set the title. Single-view containers also take it as their platform window title.
    pub fn set_title_content(&mut self, id: WindowId, title: impl Into<Content>) {
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        window.title = title.into();
        let text = window.title.text.clone();

        if let Some(ParentView::Host(container_id)) = window.parent
            && let Some(container) = self.containers.get_mut(&container_id)
            && container.root == RootView::Host(id)
        {
            container.title.clone_from(&text);
            self.host.set_container_title(container_id, &text);
        }
        self.make_parent_settings_match(id);
    }

    pub fn set_depth_buffer_bits(&mut self, id: WindowId, bits: u32) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.depth_buffer_bits = bits;
            self.make_parent_settings_match(id);
        }
    }

    pub fn set_auto_repaint_on_scene_change(&mut self, id: WindowId, enabled: bool) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.auto_repaint_on_scene_change = enabled;
            self.make_parent_settings_match(id);
        }
    }

    pub fn set_wants_mouse_move(&mut self, id: WindowId, enabled: bool) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.event_interests.wants_mouse_move = enabled;
            self.make_parent_settings_match(id);
        }
    }

    pub fn set_wants_mouse_enter_leave_window(&mut self, id: WindowId, enabled: bool) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.event_interests.wants_mouse_enter_leave_window = enabled;
            self.make_parent_settings_match(id);
        }
    }

    pub fn set_dont_clear_background(&mut self, id: WindowId, enabled: bool) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.dont_clear_background = enabled;
            self.make_parent_settings_match(id);
        }
    }
}

