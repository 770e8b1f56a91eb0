use itertools::Itertools as _;

use super::EditorWindows;
use super::host::WindowHost;
use super::integrity;
use super::types::RootView;

/// One line per container: mode, root and tab groups.
fn topology_summary<H: WindowHost>(windows: &EditorWindows<H>, max_lines: usize) -> String {
    windows
        .containers
        .values()
        .take(max_lines)
        .map(|container| {
            let root = match &container.root {
                RootView::Host(window) => format!("host {window:?}"),
                RootView::Split(node) => node
                    .dock_areas()
                    .iter()
                    .map(|dock| match windows.dock_areas.get(dock) {
                        Some(area) => format!("{dock:?}{:?}@{}", area.panes, area.selected),
                        None => format!("{dock:?} MISSING"),
                    })
                    .join(" | "),
            };
            format!("{:?} {:?}: {root}", container.id, container.mode)
        })
        .join("\n")
}

impl<H: WindowHost> EditorWindows<H> {
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_event_log {
            return;
        }
        self.push_debug_log_line(message.into());
    }

    fn debug_integrity_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_integrity {
            return;
        }
        self.push_debug_log_line(message.into());
    }

    fn push_debug_log_line(&mut self, message: String) {
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        let now = self.host.time_since_startup();
        self.debug_log.push_back(format!("[t={now:.3}] {message}"));
    }

    /// Recorded debug lines, oldest first. Empty unless the debug options are enabled.
    pub fn debug_event_log(&self) -> impl Iterator<Item = &str> + '_ {
        self.debug_log.iter().map(String::as_str)
    }

    pub fn debug_log_text(&self) -> String {
        self.debug_log.iter().join("\n")
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    /// Problems in the container/dock/window topology. Empty when consistent.
    pub fn integrity_issues(&self) -> Vec<String> {
        integrity::topology_issues(&self.windows, &self.containers, &self.dock_areas)
    }

    pub(super) fn debug_check_integrity(&mut self) {
        if !self.options.debug_integrity {
            return;
        }

        let issues = self.integrity_issues();
        let hash = integrity::hash_issues(&issues);
        let prev = std::mem::replace(&mut self.debug_last_integrity_hash, hash);
        if prev == hash {
            return;
        }

        if issues.is_empty() {
            if prev != 0 {
                self.debug_integrity_log_event("integrity OK");
            }
            return;
        }

        log::warn!("editor window topology has {} issue(s)", issues.len());
        self.debug_integrity_log_event(format!("integrity FAIL issues={}", issues.len()));
        for issue in &issues {
            log::warn!("  {issue}");
            self.debug_integrity_log_event(issue.clone());
        }
        let summary = topology_summary(self, 48);
        self.debug_integrity_log_event(format!("integrity topology:\n{summary}"));

        if self.options.debug_integrity_panic && cfg!(debug_assertions) {
            panic!(
                "editor window integrity failure\n{}\n{summary}",
                issues.join("\n")
            );
        }
    }
}
