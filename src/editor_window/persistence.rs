use std::path::Path;

use egui::{Rect, Vec2};

use crate::dock_builder::{DockLayout, LayoutNode};

use super::EditorWindows;
use super::geometry::clamp_pos_to_monitors_best_effort;
use super::host::WindowHost;
use super::title::Content;
use super::types::{ContainerId, RootView, ShowMode, SplitAxis, SplitChild, SplitNode, WindowId};

pub const LAYOUT_SNAPSHOT_VERSION: u32 = 1;

/// Failure to save or restore a layout. `E` is the host error type.
#[derive(Debug)]
pub enum LayoutPersistenceError<E> {
    UnsupportedVersion { found: u32, expected: u32 },
    RonSerialize(ron::Error),
    RonDeserialize(ron::error::SpannedError),
    Io(std::io::Error),
    Host(E),
}

impl<E: std::fmt::Display> std::fmt::Display for LayoutPersistenceError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported layout snapshot version: {found} (expected {expected})"
                )
            }
            Self::RonSerialize(err) => write!(f, "ron serialize error: {err}"),
            Self::RonDeserialize(err) => write!(f, "ron deserialize error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Host(err) => write!(f, "host error: {err}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for LayoutPersistenceError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedVersion { .. } => None,
            Self::RonSerialize(err) => Some(err),
            Self::RonDeserialize(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Host(err) => Some(err),
        }
    }
}

impl<E> From<std::io::Error> for LayoutPersistenceError<E> {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl<E> From<ron::Error> for LayoutPersistenceError<E> {
    fn from(err: ron::Error) -> Self {
        Self::RonSerialize(err)
    }
}

impl<E> From<ron::error::SpannedError> for LayoutPersistenceError<E> {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::RonDeserialize(err)
    }
}

/// A window as saved in a layout. The type is stored by registered name.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct WindowSnapshot {
    pub type_name: String,
    pub title: Content,
    pub position: Rect,
    pub min_size: Vec2,
    pub max_size: Vec2,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum LayoutNodeSnapshot {
    Tabs {
        windows: Vec<WindowSnapshot>,
        selected: usize,
    },
    Split {
        axis: SplitAxis,
        children: Vec<LayoutNodeSnapshot>,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ContainerSnapshot {
    pub rect: Rect,
    pub root: LayoutNodeSnapshot,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LayoutSnapshot {
    pub version: u32,
    pub containers: Vec<ContainerSnapshot>,
}

fn pretty_ron_config() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new()
        .depth_limit(128)
        .separate_tuple_members(true)
        .enumerate_arrays(true)
}

impl<H: WindowHost> EditorWindows<H> {
    fn snapshot_window(&self, id: WindowId) -> Option<WindowSnapshot> {
        let window = self.windows.get(&id)?;
        let Some(type_name) = self.types.type_name(window.window_type) else {
            log::debug!("not saving {id:?}: unregistered type {:?}", window.window_type);
            return None;
        };
        Some(WindowSnapshot {
            type_name: type_name.to_owned(),
            title: window.title.clone(),
            position: window.position,
            min_size: window.min_size,
            max_size: window.max_size,
        })
    }

    fn snapshot_split(&self, node: &SplitNode) -> LayoutNodeSnapshot {
        let children = node
            .children
            .iter()
            .filter_map(|child| match child {
                SplitChild::Split(nested) => Some(self.snapshot_split(nested)),
                SplitChild::Dock(dock) => {
                    let area = self.dock_areas.get(dock)?;
                    let mut windows = Vec::new();
                    let mut selected = 0;
                    for (index, &pane) in area.panes.iter().enumerate() {
                        if let Some(window) = self.snapshot_window(pane) {
                            if index == area.selected {
                                selected = windows.len();
                            }
                            windows.push(window);
                        }
                    }
                    Some(LayoutNodeSnapshot::Tabs { windows, selected })
                }
            })
            .collect();
        LayoutNodeSnapshot::Split {
            axis: node.axis,
            children,
        }
    }

    /// Capture every normal container that is not excluded from saved layouts.
    pub fn snapshot_layout(&self) -> LayoutSnapshot {
        let containers = self
            .containers
            .values()
            .filter(|c| c.mode == ShowMode::NormalWindow && !c.dont_save_to_layout)
            .filter_map(|c| match &c.root {
                RootView::Split(node) => Some(ContainerSnapshot {
                    rect: c.rect,
                    root: self.snapshot_split(node),
                }),
                RootView::Host(_) => None,
            })
            .collect();

        LayoutSnapshot {
            version: LAYOUT_SNAPSHOT_VERSION,
            containers,
        }
    }

    pub fn snapshot_layout_to_ron_string(
        &self,
    ) -> Result<String, LayoutPersistenceError<H::Error>> {
        let snapshot = self.snapshot_layout();
        Ok(ron::ser::to_string_pretty(&snapshot, pretty_ron_config())?)
    }

    pub fn save_layout_to_ron_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(), LayoutPersistenceError<H::Error>> {
        let ron = self.snapshot_layout_to_ron_string()?;
        std::fs::write(path, ron)?;
        Ok(())
    }

    /// Create the windows of a saved tab tree. Windows of unknown types are dropped.
    fn restore_node(&mut self, node: LayoutNodeSnapshot) -> LayoutNode {
        match node {
            LayoutNodeSnapshot::Tabs { windows, selected } => {
                let mut restored = Vec::new();
                let mut restored_selected = 0;
                for (index, snapshot) in windows.into_iter().enumerate() {
                    let Some(ty) = self.types.find(&snapshot.type_name) else {
                        log::debug!(
                            "dropping saved window of unknown type {:?}",
                            snapshot.type_name
                        );
                        continue;
                    };
                    let id = self.create_window(ty);
                    if let Some(window) = self.windows.get_mut(&id) {
                        window.title = snapshot.title;
                        window.position = snapshot.position;
                        window.min_size = snapshot.min_size;
                        window.max_size = snapshot.max_size;
                    }
                    if index == selected {
                        restored_selected = restored.len();
                    }
                    restored.push(id);
                }
                LayoutNode::Tabs {
                    windows: restored,
                    selected: restored_selected,
                }
            }
            LayoutNodeSnapshot::Split { axis, children } => LayoutNode::Split {
                axis,
                children: children
                    .into_iter()
                    .map(|child| self.restore_node(child))
                    .collect(),
            },
        }
    }

    /// Recreate the saved containers next to the current ones.
    ///
    /// Container positions are pulled back onto the host's monitors. Returns the new containers.
    /// If the host refuses any container, every window restored by this call is closed again
    /// before the error is returned.
    pub fn load_layout_snapshot(
        &mut self,
        snapshot: LayoutSnapshot,
    ) -> Result<Vec<ContainerId>, LayoutPersistenceError<H::Error>> {
        if snapshot.version != LAYOUT_SNAPSHOT_VERSION {
            return Err(LayoutPersistenceError::UnsupportedVersion {
                found: snapshot.version,
                expected: LAYOUT_SNAPSHOT_VERSION,
            });
        }

        let monitors = self.host.monitors();
        let mut spawned = Vec::new();
        let mut restored = Vec::new();
        for container in snapshot.containers {
            let layout = DockLayout {
                root: self.restore_node(container.root),
            };
            restored.extend(layout.windows());
            let size = container.rect.size();
            let min = clamp_pos_to_monitors_best_effort(container.rect.min, size, &monitors);
            let rect = Rect::from_min_size(min, size);

            match self.spawn_layout(&layout, rect) {
                Ok(Some(id)) => spawned.push(id),
                Ok(None) => log::debug!("saved container at {rect:?} restored empty, skipped"),
                Err(err) => {
                    log::warn!(
                        "layout restore failed, rolling back {} container(s)",
                        spawned.len()
                    );
                    for window in restored {
                        self.close(window);
                    }
                    return Err(LayoutPersistenceError::Host(err));
                }
            }
        }

        log::debug!("restored {} container(s) from layout", spawned.len());
        Ok(spawned)
    }

    pub fn load_layout_from_ron_str(
        &mut self,
        ron_str: &str,
    ) -> Result<Vec<ContainerId>, LayoutPersistenceError<H::Error>> {
        let snapshot: LayoutSnapshot = ron::from_str(ron_str)?;
        self.load_layout_snapshot(snapshot)
    }

    pub fn load_layout_from_ron_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<ContainerId>, LayoutPersistenceError<H::Error>> {
        let ron_str = std::fs::read_to_string(path)?;
        self.load_layout_from_ron_str(&ron_str)
    }
}

#[cfg(test)]
mod tests {
    use egui::{Pos2, pos2, vec2};

    use super::*;
    use crate::dock_builder::{DockLayoutBuilder, SplitDirection};
    use crate::editor_window::{HeadlessHost, WindowState, WindowTypeDescriptor};

    fn session() -> (EditorWindows<HeadlessHost>, Vec<WindowId>) {
        let mut windows = EditorWindows::new(HeadlessHost::default());
        let scene = windows.register_window_type(WindowTypeDescriptor::new("Scene"));
        let game = windows.register_window_type(WindowTypeDescriptor::new("Game"));
        let inspector = windows.register_window_type(WindowTypeDescriptor::new("Inspector"));

        let ids = vec![
            windows.create_window(scene),
            windows.create_window(game),
            windows.create_window(inspector),
        ];

        let mut b = DockLayoutBuilder::new();
        let root = b.add_node();
        let (right, main) = b.split_node(root, SplitDirection::Right);
        b.dock_windows([ids[0], ids[1]], main);
        b.select(main, ids[1]);
        b.dock_window(ids[2], right);

        let rect = Rect::from_min_size(pos2(100.0, 100.0), vec2(800.0, 600.0));
        windows.spawn_layout(&b.finish(root), rect).unwrap();
        (windows, ids)
    }

    #[test]
    fn persistence_roundtrip_restores_layout() {
        let (mut windows, ids) = session();
        let ron = windows.snapshot_layout_to_ron_string().unwrap();
        let before = windows.snapshot_layout();

        for id in ids {
            windows.close(id);
        }
        assert_eq!(windows.container_count(), 0);

        let restored = windows.load_layout_from_ron_str(&ron).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(windows.window_count(), 3);
        assert_eq!(windows.snapshot_layout(), before);
        assert!(windows.integrity_issues().is_empty());

        let docked = windows
            .windows()
            .filter(|w| windows.state(w.id()) == WindowState::Docked)
            .count();
        assert_eq!(docked, 3);
    }

    #[test]
    fn unknown_types_are_dropped_on_load() {
        let (windows, _ids) = session();
        let ron = windows.snapshot_layout_to_ron_string().unwrap();

        let mut fresh = EditorWindows::new(HeadlessHost::default());
        fresh.register_window_type(WindowTypeDescriptor::new("Inspector"));
        fresh.load_layout_from_ron_str(&ron).unwrap();

        assert_eq!(fresh.window_count(), 1);
        assert_eq!(fresh.container_count(), 1);
        assert!(fresh.integrity_issues().is_empty());
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let (mut windows, _ids) = session();
        let mut snapshot = windows.snapshot_layout();
        snapshot.version = LAYOUT_SNAPSHOT_VERSION + 1;

        let err = windows.load_layout_snapshot(snapshot).unwrap_err();
        assert!(matches!(
            err,
            LayoutPersistenceError::UnsupportedVersion { found, expected }
                if found == LAYOUT_SNAPSHOT_VERSION + 1 && expected == LAYOUT_SNAPSHOT_VERSION
        ));
    }

    #[test]
    fn restored_container_is_clamped_onto_monitor() {
        let (mut windows, _ids) = session();
        let mut snapshot = windows.snapshot_layout();
        snapshot.containers[0].rect =
            Rect::from_min_size(pos2(5000.0, 5000.0), vec2(800.0, 600.0));

        let restored = windows.load_layout_snapshot(snapshot).unwrap();
        let rect = windows.container(restored[0]).unwrap().rect();
        assert_eq!(rect.min, Pos2::new(1120.0, 480.0));
    }

    #[test]
    fn host_failure_rolls_back_the_whole_restore() {
        let (mut windows, _ids) = session();
        let mut snapshot = windows.snapshot_layout();
        snapshot.containers.push(snapshot.containers[0].clone());
        assert_eq!(windows.container_count(), 1);

        // The first restored container opens, the second one is refused.
        windows.host_mut().refuse_container = Some(ContainerId(3));
        let err = windows.load_layout_snapshot(snapshot).unwrap_err();

        assert!(matches!(err, LayoutPersistenceError::Host(_)));
        assert_eq!(windows.container_count(), 1);
        assert!(windows.container(ContainerId(2)).is_none());
        assert_eq!(windows.window_count(), 3);
        assert!(windows.integrity_issues().is_empty());
    }

    #[test]
    fn drop_downs_are_not_saved() {
        let (mut windows, ids) = session();
        let scene_type = windows.window(ids[0]).unwrap().window_type();
        let popup = windows.create_window(scene_type);
        windows
            .show_as_drop_down(
                popup,
                Rect::from_min_size(pos2(10.0, 10.0), vec2(80.0, 20.0)),
                vec2(200.0, 150.0),
            )
            .unwrap();

        assert_eq!(windows.container_count(), 2);
        assert_eq!(windows.snapshot_layout().containers.len(), 1);
    }
}
