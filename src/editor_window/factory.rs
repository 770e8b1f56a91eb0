use egui::Rect;

use super::EditorWindows;
use super::host::WindowHost;
use super::title::{Content, WindowTypeId};
use super::types::{EditorWindow, EventInterests, WindowId};

/// How [`EditorWindows::get_window`] should create a window that is not open yet.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowRequest {
    /// Show in a floating utility container instead of a normal one.
    pub utility: bool,

    /// Title for a newly created window. The type's default title otherwise.
    pub title: Option<Content>,

    /// Focus an already open window.
    pub focus: bool,

    /// Try to dock a new window as a tab next to the first open window of these types, in order.
    pub dock_next_to: Vec<WindowTypeId>,
}

impl Default for WindowRequest {
    fn default() -> Self {
        Self {
            utility: false,
            title: None,
            focus: true,
            dock_next_to: Vec::new(),
        }
    }
}

impl WindowRequest {
    pub fn utility(mut self) -> Self {
        self.utility = true;
        self
    }

    pub fn with_title(mut self, title: impl Into<Content>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    pub fn dock_next_to(mut self, types: impl IntoIterator<Item = WindowTypeId>) -> Self {
        self.dock_next_to.extend(types);
        self
    }
}

impl<H: WindowHost> EditorWindows<H> {
    /// First live window of type `ty`, in creation order.
    pub fn find_window(&self, ty: WindowTypeId) -> Option<WindowId> {
        self.windows
            .values()
            .find(|w| w.window_type == ty)
            .map(|w| w.id)
    }

    /// Every live window of type `ty`, in creation order.
    pub fn find_windows(&self, ty: WindowTypeId) -> Vec<WindowId> {
        self.windows
            .values()
            .filter(|w| w.window_type == ty)
            .map(|w| w.id)
            .collect()
    }

    /// Create an unparented window of type `ty` with the default title and geometry.
    pub fn create_window(&mut self, ty: WindowTypeId) -> WindowId {
        let id = self.allocate_window_id();
        let window = EditorWindow {
            id,
            window_type: ty,
            title: self.types.default_title_content(ty),
            position: self.options.default_window_rect,
            min_size: self.options.default_min_size,
            max_size: self.options.default_max_size,
            depth_buffer_bits: 0,
            auto_repaint_on_scene_change: false,
            event_interests: EventInterests::default(),
            dont_clear_background: false,
            notification: None,
            parent: None,
        };
        self.windows.insert(id, window);

        log::trace!("created {id:?} of {ty:?}");
        self.debug_log_event(format!("window create {id:?} type={ty:?}"));
        id
    }

    /// The first open window of type `ty`, or a new unparented one. Never shows anything.
    pub fn get_window_dont_show(&mut self, ty: WindowTypeId) -> WindowId {
        match self.find_window(ty) {
            Some(id) => id,
            None => self.create_window(ty),
        }
    }

    /// The first open window of type `ty`, created and shown if there is none.
    ///
    /// An open window is shown (if unparented) and focused when `request.focus` is set. A new
    /// window is docked next to the first match of `request.dock_next_to`, or shown on its own.
    ///
    /// # Errors
    /// Host errors from showing a new window. The window stays alive and unparented then.
    pub fn get_window(
        &mut self,
        ty: WindowTypeId,
        request: WindowRequest,
    ) -> Result<WindowId, H::Error> {
        if let Some(id) = self.find_window(ty) {
            if request.focus {
                self.show(id)?;
                self.focus(id);
            }
            return Ok(id);
        }

        let id = self.create_window(ty);
        if let Some(title) = request.title {
            self.set_title_content(id, title);
        }

        for neighbor in &request.dock_next_to {
            if let Some(dock) = self.dock_area_hosting_type(*neighbor)
                && self.add_tab(dock, id)
            {
                log::debug!("docked new {id:?} next to {neighbor:?} in {dock:?}");
                return Ok(id);
            }
        }

        if request.utility {
            self.show_utility(id)?;
        } else {
            self.show(id)?;
        }
        Ok(id)
    }

    /// Like [`Self::get_window`], but a new window is placed at `rect` with its size pinned.
    pub fn get_window_with_rect(
        &mut self,
        ty: WindowTypeId,
        rect: Rect,
        request: WindowRequest,
    ) -> Result<WindowId, H::Error> {
        if let Some(id) = self.find_window(ty) {
            if request.focus {
                self.focus(id);
            }
            return Ok(id);
        }

        let id = self.create_window(ty);
        if let Some(window) = self.windows.get_mut(&id) {
            window.min_size = rect.size();
            window.max_size = rect.size();
            window.position = rect;
        }
        if let Some(title) = request.title {
            self.set_title_content(id, title);
        }

        if request.utility {
            self.show_utility(id)?;
        } else {
            self.show(id)?;
        }
        Ok(id)
    }

    /// Focus the first open window of type `ty`, if any.
    pub fn focus_window_if_its_open(&mut self, ty: WindowTypeId) {
        if let Some(id) = self.find_window(ty) {
            self.focus(id);
        }
    }
}
