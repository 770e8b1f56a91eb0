use egui::{Rect, Vec2};

use super::EditorWindows;
use super::geometry::{PopupLocation, fit_drop_down_rect};
use super::host::{ShowOptions, WindowHost};
use super::types::{ContainerId, ParentView, ShowMode, WindowId};

impl<H: WindowHost> EditorWindows<H> {
    /// Show an unparented window in a new normal container at its position.
    ///
    /// No-op for parented or closed windows.
    ///
    /// # Errors
    /// Host errors from creating or showing the container. The window stays unparented then.
    pub fn show(&mut self, id: WindowId) -> Result<(), H::Error> {
        self.show_normal(id, false)
    }

    /// Like [`Self::show`], but asks the host to present the container right away.
    pub fn show_immediate(&mut self, id: WindowId) -> Result<(), H::Error> {
        self.show_normal(id, true)
    }

    fn show_normal(&mut self, id: WindowId, display_immediately: bool) -> Result<(), H::Error> {
        let Some(window) = self.windows.get(&id) else {
            return Ok(());
        };
        if window.parent.is_some() {
            log::trace!("show {id:?}: already parented");
            return Ok(());
        }

        let screen_pos = window.position.min;
        let Some(container) = self.build_normal_container(id, screen_pos) else {
            return Ok(());
        };
        self.open_container(
            container,
            ShowOptions {
                load_position: true,
                display_immediately,
            },
        )
    }

    /// Show in a floating utility container that stays on top of normal windows.
    pub fn show_utility(&mut self, id: WindowId) -> Result<(), H::Error> {
        self.show_with_mode(id, ShowMode::Utility)?;
        Ok(())
    }

    /// Show in a borderless popup container.
    pub fn show_popup(&mut self, id: WindowId) -> Result<(), H::Error> {
        self.show_with_mode(id, ShowMode::Popup)?;
        Ok(())
    }

    /// Show as an auxiliary window, then focus it.
    pub fn show_aux_window(&mut self, id: WindowId) -> Result<(), H::Error> {
        let Some(container) = self.show_with_mode(id, ShowMode::AuxWindow)? else {
            return Ok(());
        };
        self.focus(id);
        if let Some(container) = self.containers.get_mut(&container) {
            container.aux = true;
        }
        Ok(())
    }

    /// Show in a modal container and ask the host to block every other container.
    pub fn show_modal(&mut self, id: WindowId) -> Result<(), H::Error> {
        let Some(container) = self.show_with_mode(id, ShowMode::Modal)? else {
            return Ok(());
        };
        self.host.make_modal(container);
        self.debug_log_event(format!("modal {container:?}"));
        Ok(())
    }

    /// Show as a drop-down next to `anchor`, using the default placement priority.
    pub fn show_as_drop_down(
        &mut self,
        id: WindowId,
        anchor: Rect,
        size: Vec2,
    ) -> Result<(), H::Error> {
        self.show_as_drop_down_with_priority(id, anchor, size, &[])
    }

    /// Show as a drop-down next to `anchor`, trying the locations in `priority` order.
    ///
    /// An empty `priority` uses [`super::EditorWindowsOptions::drop_down_priority`]. The window
    /// ends up focused with its size pinned, and its container is kept out of saved layouts.
    pub fn show_as_drop_down_with_priority(
        &mut self,
        id: WindowId,
        anchor: Rect,
        size: Vec2,
        priority: &[PopupLocation],
    ) -> Result<(), H::Error> {
        if !self.windows.get(&id).is_some_and(|w| w.parent.is_none()) {
            return Ok(());
        }
        let priority = if priority.is_empty() {
            self.options.drop_down_priority.clone()
        } else {
            priority.to_vec()
        };

        let first_guess = fit_drop_down_rect(anchor, size, &priority, &self.host.monitors());
        if let Some(window) = self.windows.get_mut(&id) {
            window.position = first_guess;
        }

        let Some(container) = self.show_with_mode(id, ShowMode::PopupMenu)? else {
            return Ok(());
        };

        let placed = self.host.drop_down_rect(container, anchor, size, &priority);
        self.set_position(id, placed)?;
        if let Some(window) = self.windows.get_mut(&id) {
            window.min_size = placed.size();
            window.max_size = placed.size();
        }
        self.make_parent_settings_match(id);

        if self.focused_window() != Some(id) {
            self.focus(id);
        }
        if let Some(container) = self.containers.get_mut(&container) {
            container.aux = true;
            container.dont_save_to_layout = true;
        }
        log::debug!("drop-down {id:?} at {placed:?}");
        Ok(())
    }

    /// Show an unparented window in a new single-view container of `mode`.
    ///
    /// Returns the new container, or `None` when the window was not eligible.
    fn show_with_mode(
        &mut self,
        id: WindowId,
        mode: ShowMode,
    ) -> Result<Option<ContainerId>, H::Error> {
        if !self.windows.get(&id).is_some_and(|w| w.parent.is_none()) {
            log::trace!("show {id:?} as {mode:?}: closed or already parented");
            return Ok(None);
        }
        let Some(container) = self.build_single_view_container(id, mode) else {
            return Ok(None);
        };
        self.open_container(
            container,
            ShowOptions {
                load_position: true,
                display_immediately: false,
            },
        )?;
        Ok(Some(container))
    }

    /// Close and destroy a window. Closing a closed window does nothing.
    pub fn close(&mut self, id: WindowId) {
        if !self.windows.contains_key(&id) {
            return;
        }

        if let Some(container) = self
            .container_of(id)
            .and_then(|c| self.containers.get_mut(&c))
            && container.maximized == Some(id)
        {
            container.maximized = None;
        }

        self.unparent(id);
        self.scheduler.unregister(id);
        self.windows.remove(&id);

        log::debug!("closed window {id:?}");
        self.debug_log_event(format!("window close {id:?}"));
        self.debug_check_integrity();
    }

    /// Take a docked window out of its dock area without destroying it.
    ///
    /// Returns true if the window was docked. It is unparented afterwards.
    pub fn remove_from_dock_area(&mut self, id: WindowId) -> bool {
        match self.windows.get(&id).and_then(|w| w.parent) {
            Some(ParentView::Dock(dock)) => self.remove_tab(dock, id),
            _ => false,
        }
    }

    /// Select the window's tab, repaint it and give its container keyboard focus.
    pub fn focus(&mut self, id: WindowId) {
        let Some(parent) = self.windows.get(&id).and_then(|w| w.parent) else {
            log::trace!("focus {id:?}: not parented");
            return;
        };
        self.show_tab(id);
        self.focused_view = Some(parent);
        self.host.focus_view(parent);
    }

    /// Make the window the selected tab of its dock area and repaint it.
    ///
    /// Returns true if the selection changed.
    pub fn show_tab(&mut self, id: WindowId) -> bool {
        let Some(parent) = self.windows.get(&id).and_then(|w| w.parent) else {
            return false;
        };

        let mut changed = false;
        if let ParentView::Dock(dock) = parent
            && let Some(area) = self.dock_areas.get_mut(&dock)
            && let Some(index) = area.panes.iter().position(|&w| w == id)
            && area.selected != index
        {
            area.selected = index;
            changed = true;
        }

        if changed {
            self.make_parent_settings_match(id);
        }
        self.host.repaint(parent);
        changed
    }

    /// Ask the host to repaint the window. Ignored unless it is the active view of its parent.
    pub fn repaint(&mut self, id: WindowId) {
        if !self.is_active_view(id) {
            return;
        }
        if let Some(parent) = self.windows.get(&id).and_then(|w| w.parent) {
            self.host.repaint(parent);
        }
    }

    /// Select the tab after `id` in its dock area, wrapping around.
    ///
    /// Returns true only if the selection changed.
    pub fn show_next_tab_if_possible(&mut self, id: WindowId) -> bool {
        let Some(ParentView::Dock(dock)) = self.windows.get(&id).and_then(|w| w.parent) else {
            return false;
        };
        let Some(area) = self.dock_areas.get_mut(&dock) else {
            return false;
        };
        let Some(index) = area.panes.iter().position(|&w| w == id) else {
            return false;
        };

        let next = (index + 1) % area.panes.len();
        if next == area.selected {
            return false;
        }
        area.selected = next;
        let active = area.panes[next];

        self.make_parent_settings_match(active);
        self.host.repaint(ParentView::Dock(dock));
        true
    }

    /// Maximize a docked window inside its normal container, or restore it.
    ///
    /// Returns false if the window cannot be maximized (not docked in a normal container).
    pub fn set_maximized(&mut self, id: WindowId, maximized: bool) -> bool {
        let Some(ParentView::Dock(dock)) = self.windows.get(&id).and_then(|w| w.parent) else {
            return false;
        };
        let Some(container) = self
            .dock_areas
            .get(&dock)
            .and_then(|area| self.containers.get_mut(&area.container))
        else {
            return false;
        };
        if container.mode != ShowMode::NormalWindow {
            return false;
        }

        if maximized {
            container.maximized = Some(id);
        } else if container.maximized == Some(id) {
            container.maximized = None;
        } else {
            return true;
        }
        let container_id = container.id;

        self.show_tab(id);
        self.debug_log_event(format!("maximize {id:?} in {container_id:?} = {maximized}"));
        true
    }

    pub fn is_maximized(&self, id: WindowId) -> bool {
        self.container_of(id)
            .and_then(|c| self.containers.get(&c))
            .is_some_and(|c| c.maximized == Some(id))
    }
}
