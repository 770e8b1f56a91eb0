use std::collections::BTreeMap;

use crate::editor_window::{SplitAxis, WindowId};

/// Split direction with Dear ImGui `DockBuilder::SplitNode`-like semantics.
///
/// The direction indicates where the *side* node is placed relative to the *main* node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SplitDirection {
    fn axis(self) -> SplitAxis {
        match self {
            Self::Left | Self::Right => SplitAxis::Horizontal,
            Self::Up | Self::Down => SplitAxis::Vertical,
        }
    }

    /// True if the side node comes first along the axis.
    fn side_first(self) -> bool {
        matches!(self, Self::Left | Self::Up)
    }
}

/// A logical node id used by [`DockLayoutBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DockNodeId(u64);

/// A declared container layout: nested splits with tab groups at the leaves.
///
/// Spawn it with [`crate::editor_window::EditorWindows::spawn_layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct DockLayout {
    pub root: LayoutNode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutNode {
    Tabs {
        windows: Vec<WindowId>,
        selected: usize,
    },
    Split {
        axis: SplitAxis,
        children: Vec<LayoutNode>,
    },
}

impl DockLayout {
    /// A single tab group.
    pub fn tabs(windows: impl IntoIterator<Item = WindowId>) -> Self {
        Self {
            root: LayoutNode::Tabs {
                windows: windows.into_iter().collect(),
                selected: 0,
            },
        }
    }

    /// Every window in the layout, depth-first.
    pub fn windows(&self) -> Vec<WindowId> {
        fn collect(node: &LayoutNode, out: &mut Vec<WindowId>) {
            match node {
                LayoutNode::Tabs { windows, .. } => out.extend(windows.iter().copied()),
                LayoutNode::Split { children, .. } => {
                    for child in children {
                        collect(child, out);
                    }
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }
}

#[derive(Clone, Debug)]
enum Node {
    Tabs {
        windows: Vec<WindowId>,
        selected: usize,
    },
    Split {
        dir: SplitDirection,
        main: DockNodeId,
        side: DockNodeId,
    },
}

/// A builder that feels close to Dear ImGui's `DockBuilder`:
/// create empty nodes, split them, dock windows into leaf nodes, then `finish()`.
///
/// Leaves are tab groups. Nodes may stay empty; empty groups are pruned when the layout is
/// spawned.
#[derive(Clone, Debug)]
pub struct DockLayoutBuilder {
    next_node_id: u64,
    nodes: BTreeMap<DockNodeId, Node>,
}

impl Default for DockLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DockLayoutBuilder {
    pub fn new() -> Self {
        Self {
            next_node_id: 1,
            nodes: BTreeMap::new(),
        }
    }

    fn alloc_node_id(&mut self) -> DockNodeId {
        let id = DockNodeId(self.next_node_id);
        self.next_node_id = self.next_node_id.saturating_add(1);
        id
    }

    /// Create an empty leaf node (a tab group).
    #[must_use]
    pub fn add_node(&mut self) -> DockNodeId {
        let id = self.alloc_node_id();
        self.nodes.insert(
            id,
            Node::Tabs {
                windows: Vec::new(),
                selected: 0,
            },
        );
        id
    }

    /// Split an existing node and return `(side, main)` (Dear ImGui semantics).
    ///
    /// The `node` itself becomes the split, and its original content moves into `main`.
    #[must_use]
    pub fn split_node(
        &mut self,
        node: DockNodeId,
        dir: SplitDirection,
    ) -> (DockNodeId, DockNodeId) {
        let old = self.nodes.remove(&node).unwrap_or(Node::Tabs {
            windows: Vec::new(),
            selected: 0,
        });
        let main = self.alloc_node_id();
        self.nodes.insert(main, old);

        let side = self.add_node();
        self.nodes.insert(node, Node::Split { dir, main, side });

        (side, main)
    }

    /// Dock a window into a leaf node.
    ///
    /// Returns false (and docks nothing) if `node` is a split or unknown.
    pub fn dock_window(&mut self, window: WindowId, node: DockNodeId) -> bool {
        match self.nodes.get_mut(&node) {
            Some(Node::Tabs { windows, .. }) => {
                windows.push(window);
                true
            }
            Some(Node::Split { .. }) => {
                log::warn!("dock_window: node {node:?} is not a leaf tab group");
                false
            }
            None => {
                log::warn!("dock_window: node {node:?} does not exist");
                false
            }
        }
    }

    /// Dock several windows into a leaf node, tabbed together.
    pub fn dock_windows(&mut self, windows: impl IntoIterator<Item = WindowId>, node: DockNodeId) {
        for window in windows {
            self.dock_window(window, node);
        }
    }

    /// Make `window` the selected tab of its leaf node.
    pub fn select(&mut self, node: DockNodeId, window: WindowId) -> bool {
        if let Some(Node::Tabs { windows, selected }) = self.nodes.get_mut(&node)
            && let Some(index) = windows.iter().position(|&w| w == window)
        {
            *selected = index;
            return true;
        }
        false
    }

    /// Finish building. `root` is usually the first `add_node()`, mutated by splits since.
    pub fn finish(mut self, root: DockNodeId) -> DockLayout {
        fn build(node_id: DockNodeId, nodes: &mut BTreeMap<DockNodeId, Node>) -> LayoutNode {
            match nodes.remove(&node_id) {
                Some(Node::Tabs { windows, selected }) => LayoutNode::Tabs { windows, selected },
                Some(Node::Split { dir, main, side }) => {
                    let main = build(main, nodes);
                    let side = build(side, nodes);
                    let children = if dir.side_first() {
                        vec![side, main]
                    } else {
                        vec![main, side]
                    };
                    LayoutNode::Split {
                        axis: dir.axis(),
                        children,
                    }
                }
                None => LayoutNode::Tabs {
                    windows: Vec::new(),
                    selected: 0,
                },
            }
        }

        DockLayout {
            root: build(root, &mut self.nodes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_node_semantics_match_imgui() {
        let mut b = DockLayoutBuilder::new();
        let dockspace = b.add_node();

        let (right, main) = b.split_node(dockspace, SplitDirection::Right);
        b.dock_window(WindowId(1), main);
        b.dock_window(WindowId(2), right);

        let layout = b.finish(dockspace);
        let LayoutNode::Split { axis, children } = &layout.root else {
            panic!("root should be a split, got {:?}", layout.root);
        };
        assert_eq!(*axis, SplitAxis::Horizontal);

        // Right split: main is first (left), side is second (right).
        assert_eq!(
            children,
            &vec![
                LayoutNode::Tabs {
                    windows: vec![WindowId(1)],
                    selected: 0
                },
                LayoutNode::Tabs {
                    windows: vec![WindowId(2)],
                    selected: 0
                },
            ]
        );
        assert_eq!(layout.windows(), vec![WindowId(1), WindowId(2)]);
    }

    #[test]
    fn docking_into_a_split_is_refused() {
        let mut b = DockLayoutBuilder::new();
        let dockspace = b.add_node();
        let (_side, _main) = b.split_node(dockspace, SplitDirection::Left);
        assert!(!b.dock_window(WindowId(1), dockspace));
        assert!(b.finish(dockspace).windows().is_empty());
    }

    #[test]
    fn select_picks_tab_in_leaf() {
        let mut b = DockLayoutBuilder::new();
        let node = b.add_node();
        b.dock_windows([WindowId(1), WindowId(2), WindowId(3)], node);
        assert!(b.select(node, WindowId(3)));
        assert!(!b.select(node, WindowId(9)));

        let layout = b.finish(node);
        assert_eq!(
            layout.root,
            LayoutNode::Tabs {
                windows: vec![WindowId(1), WindowId(2), WindowId(3)],
                selected: 2
            }
        );
    }
}
