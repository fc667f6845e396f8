//! Roadmap dependency forest.
//!
//! Turns a flat list of roadmap items into a forest where every item hangs
//! under the item named by its **last** `depends_on` entry. The result is a
//! single-parent tree, not a DAG: earlier dependencies are ignored for
//! structure.
//!
//! # Pipeline
//!
//! ```text
//! items -> build_tree (arena + id index) -> assign_depths (BFS) -> flatten (pre-order)
//! ```
//!
//! # Degenerate input
//!
//! - **Dangling reference**: the item becomes a root.
//! - **Duplicate ids**: the last item carrying an id is the one referenced.
//! - **Parent loops** (self-reference, mutual last dependencies): the BFS never
//!   revisits a node, and loop members that no root reaches are detached from
//!   their parent and promoted to roots, so every item is still emitted once.
//!
//! Nodes live in an arena and refer to each other by index, which keeps
//! ownership flat and makes the visited set a plain `Vec<bool>`.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace};

use crate::types::RoadmapItem;

/// Returns true when at least one item carries an id or a dependency.
///
/// Switches rendering from a flat phase-grouped list to an indented tree.
/// Items that opt in without any resolvable edge still render fine as a
/// forest of singleton roots.
pub fn has_dependency_info<'a, I>(items: I) -> bool
where
    I: IntoIterator<Item = &'a RoadmapItem>,
{
    items
        .into_iter()
        .any(|item| item.id().is_some() || !item.depends_on.is_empty())
}

/// A node of the dependency forest.
#[derive(Debug, Clone)]
pub struct TreeNode<'a> {
    /// The wrapped item.
    pub item: &'a RoadmapItem,
    /// Arena indices of children, in discovery (input) order.
    pub children: Vec<usize>,
    /// 0 for roots, `parent.depth + 1` otherwise.
    pub depth: usize,
    parent: Option<usize>,
}

impl<'a> TreeNode<'a> {
    fn new(item: &'a RoadmapItem) -> Self {
        Self {
            item,
            children: Vec::new(),
            depth: 0,
            parent: None,
        }
    }

    /// Arena index of the parent, `None` for roots.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// One line of the rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlatEntry<'a> {
    pub item: &'a RoadmapItem,
    pub depth: usize,
}

/// Arena-backed forest built from one item sequence.
///
/// Node `i` wraps the `i`-th input item.
#[derive(Debug, Clone)]
pub struct Forest<'a> {
    nodes: Vec<TreeNode<'a>>,
    roots: Vec<usize>,
}

/// Build the dependency forest for `items`.
///
/// Roots keep their relative input order, children keep the order in which
/// they were discovered. Depths are assigned before returning. Never fails.
pub fn build_tree<'a, I>(items: I) -> Forest<'a>
where
    I: IntoIterator<Item = &'a RoadmapItem>,
{
    let items: Vec<&'a RoadmapItem> = items.into_iter().collect();

    // Overwrite-on-insert: a later duplicate id replaces the earlier target.
    let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(items.len());
    for (idx, &item) in items.iter().enumerate() {
        if let Some(id) = item.id() {
            index.insert(id, idx);
        }
    }

    let mut nodes: Vec<TreeNode<'a>> = items.iter().map(|&item| TreeNode::new(item)).collect();
    let mut roots = Vec::new();

    for (idx, &item) in items.iter().enumerate() {
        let Some(parent_id) = item.parent_ref() else {
            roots.push(idx);
            continue;
        };

        match index.get(parent_id) {
            Some(&parent) => {
                nodes[parent].children.push(idx);
                nodes[idx].parent = Some(parent);
            }
            None => {
                trace!(
                    item = item.label(),
                    parent = parent_id,
                    "unresolved parent reference, promoting to root"
                );
                roots.push(idx);
            }
        }
    }

    let mut forest = Forest { nodes, roots };
    forest.assign_depths();
    forest
}

/// Pre-order rendering order of `forest`.
pub fn flatten_tree<'a>(forest: &Forest<'a>) -> Vec<FlatEntry<'a>> {
    forest.flatten()
}

impl<'a> Forest<'a> {
    /// Number of nodes (equal to the number of input items).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena indices of the roots, in input order.
    pub fn root_indices(&self) -> &[usize] {
        &self.roots
    }

    /// Root nodes, in input order.
    pub fn roots(&self) -> impl Iterator<Item = &TreeNode<'a>> + '_ {
        self.roots.iter().map(move |&idx| &self.nodes[idx])
    }

    /// Node at arena index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    pub fn node(&self, idx: usize) -> &TreeNode<'a> {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[TreeNode<'a>] {
        &self.nodes
    }

    /// Children of the node at `idx`.
    pub fn children(&self, idx: usize) -> impl Iterator<Item = &TreeNode<'a>> + '_ {
        self.nodes[idx]
            .children
            .iter()
            .map(move |&child| &self.nodes[child])
    }

    /// Deepest depth in the forest, 0 when empty.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Assign depths breadth-first from the roots.
    ///
    /// Each node is enqueued at most once. Nodes no root reaches can only sit
    /// on a parent loop; the first such node in input order is cut from its
    /// parent and becomes a root, and the walk continues from there until
    /// every node has a depth. Calling this again is a no-op.
    pub fn assign_depths(&mut self) {
        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::with_capacity(self.nodes.len());

        for &root in &self.roots {
            self.nodes[root].depth = 0;
            visited[root] = true;
            queue.push_back(root);
        }
        self.drain_queue(&mut visited, &mut queue);

        let mut promoted = false;
        for idx in 0..self.nodes.len() {
            if visited[idx] {
                continue;
            }

            self.detach(idx);
            debug!(
                item = self.nodes[idx].item.label(),
                "breaking dependency loop, promoting to root"
            );

            self.roots.push(idx);
            self.nodes[idx].depth = 0;
            visited[idx] = true;
            queue.push_back(idx);
            self.drain_queue(&mut visited, &mut queue);
            promoted = true;
        }

        if promoted {
            self.roots.sort_unstable();
        }
    }

    fn drain_queue(&mut self, visited: &mut [bool], queue: &mut VecDeque<usize>) {
        while let Some(current) = queue.pop_front() {
            let child_depth = self.nodes[current].depth + 1;
            for pos in 0..self.nodes[current].children.len() {
                let child = self.nodes[current].children[pos];
                if visited[child] {
                    continue;
                }
                visited[child] = true;
                self.nodes[child].depth = child_depth;
                queue.push_back(child);
            }
        }
    }

    fn detach(&mut self, idx: usize) {
        if let Some(parent) = self.nodes[idx].parent.take() {
            self.nodes[parent].children.retain(|&child| child != idx);
        }
    }

    /// Pre-order walk: each node is followed by its whole subtree before
    /// any sibling. Iterative, so long chains cannot exhaust the stack.
    pub fn flatten(&self) -> Vec<FlatEntry<'a>> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();

        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            out.push(FlatEntry {
                item: node.item,
                depth: node.depth,
            });
            stack.extend(node.children.iter().rev().copied());
        }

        out
    }
}
