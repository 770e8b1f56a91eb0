use std::collections::BTreeMap;
use std::hash::{Hash as _, Hasher as _};

use ahash::{HashMap, HashMapExt as _, HashSet, HashSetExt as _};

use super::types::{
    ContainerId, DockArea, DockAreaId, EditorWindow, HostingContainer, ParentView, RootView,
    WindowId,
};

pub(super) fn topology_issues(
    windows: &BTreeMap<WindowId, EditorWindow>,
    containers: &BTreeMap<ContainerId, HostingContainer>,
    dock_areas: &BTreeMap<DockAreaId, DockArea>,
) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();
    let mut owner_of_dock: HashMap<DockAreaId, ContainerId> = HashMap::new();

    for (&container_id, container) in containers {
        match &container.root {
            RootView::Host(window) => match windows.get(window) {
                None => issues.push(format!(
                    "integrity: container {container_id:?} hosts missing window {window:?}"
                )),
                Some(w) if w.parent != Some(ParentView::Host(container_id)) => {
                    issues.push(format!(
                        "integrity: container {container_id:?} hosts {window:?} with parent {:?}",
                        w.parent
                    ));
                }
                Some(_) => {}
            },
            RootView::Split(node) => {
                let docks = node.dock_areas();
                if docks.is_empty() {
                    issues.push(format!("integrity: container {container_id:?} has no dock areas"));
                }
                for dock in docks {
                    if let Some(prev) = owner_of_dock.insert(dock, container_id) {
                        issues.push(format!(
                            "integrity: dock {dock:?} listed by {prev:?} and {container_id:?}"
                        ));
                    }
                    match dock_areas.get(&dock) {
                        None => issues.push(format!(
                            "integrity: container {container_id:?} references missing dock {dock:?}"
                        )),
                        Some(area) if area.container != container_id => issues.push(format!(
                            "integrity: dock {dock:?} claims {:?} but sits in {container_id:?}",
                            area.container
                        )),
                        Some(_) => {}
                    }
                }
            }
        }

        if let Some(maximized) = container.maximized {
            let inside = windows.get(&maximized).and_then(|w| w.parent).is_some_and(|p| match p {
                ParentView::Host(c) => c == container_id,
                ParentView::Dock(d) => owner_of_dock.get(&d) == Some(&container_id),
            });
            if !inside {
                issues.push(format!(
                    "integrity: container {container_id:?} maximizes foreign window {maximized:?}"
                ));
            }
        }
    }

    for (&dock_id, area) in dock_areas {
        if !owner_of_dock.contains_key(&dock_id) {
            issues.push(format!("integrity: dock {dock_id:?} unreachable from any container"));
        }
        if area.panes.is_empty() {
            issues.push(format!("integrity: dock {dock_id:?} has no tabs"));
        } else if area.selected >= area.panes.len() {
            issues.push(format!(
                "integrity: dock {dock_id:?} selects {} of {} tabs",
                area.selected,
                area.panes.len()
            ));
        }

        let mut seen: HashSet<WindowId> = HashSet::new();
        for &window in &area.panes {
            if !seen.insert(window) {
                issues.push(format!("integrity: dock {dock_id:?} lists {window:?} twice"));
            }
            match windows.get(&window) {
                None => issues.push(format!(
                    "integrity: dock {dock_id:?} holds missing window {window:?}"
                )),
                Some(w) if w.parent != Some(ParentView::Dock(dock_id)) => issues.push(format!(
                    "integrity: dock {dock_id:?} holds {window:?} whose parent is {:?}",
                    w.parent
                )),
                Some(_) => {}
            }
        }
    }

    for (&window_id, window) in windows {
        let held = match window.parent {
            None => true,
            Some(ParentView::Host(container)) => containers
                .get(&container)
                .is_some_and(|c| c.root == RootView::Host(window_id)),
            Some(ParentView::Dock(dock)) => dock_areas
                .get(&dock)
                .is_some_and(|area| area.panes.contains(&window_id)),
        };
        if !held {
            issues.push(format!(
                "integrity: window {window_id:?} parent {:?} does not hold it",
                window.parent
            ));
        }
    }

    issues
}

pub(super) fn hash_issues(lines: &[String]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for line in lines {
        line.hash(&mut hasher);
    }
    hasher.finish()
}
