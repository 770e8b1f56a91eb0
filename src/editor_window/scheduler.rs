use super::types::WindowId;

/// Per-frame update hook, ticked once per frame by [`super::EditorWindows::tick`].
///
/// Holds at most one entry per window. Entries keep registration order.
#[derive(Clone, Debug, Default)]
pub struct FrameScheduler {
    entries: Vec<WindowId>,
}

impl FrameScheduler {
    /// Returns `false` if `window` was already registered.
    pub fn register(&mut self, window: WindowId) -> bool {
        if self.entries.contains(&window) {
            return false;
        }
        self.entries.push(window);
        true
    }

    /// Returns `false` if `window` was not registered.
    pub fn unregister(&mut self, window: WindowId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|&w| w != window);
        self.entries.len() != before
    }

    pub fn is_registered(&self, window: WindowId) -> bool {
        self.entries.contains(&window)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.entries.iter().copied()
    }

    /// Snapshot of the entries to run this frame; callbacks may unregister while running.
    pub(super) fn due(&self) -> Vec<WindowId> {
        self.entries.clone()
    }
}
