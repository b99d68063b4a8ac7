//! Stateless traversal utilities over an already-built category tree.
//!
//! Every function here is pure: no mutation, safe to call repeatedly and in
//! any order. Traversals run on explicit stacks so deeply nested exports
//! cannot exhaust the call stack.

use std::collections::VecDeque;

use serde::Serialize;

use linklift_shared::{BookmarkNode, Category, CategoryNode, NodeId, TreeNode};

/// Suffix distinguishing a folder's "direct bookmarks" key from the
/// folder's own key.
pub const DIRECT_SUFFIX: char = '@';

/// Label of the virtual leaf standing for a folder's direct bookmarks.
pub const DIRECT_LABEL: &str = "(bookmarks in this folder)";

/// Selection key for a category node itself.
pub fn node_key(id: NodeId) -> String {
    id.to_string()
}

/// Selection key for a category's direct bookmarks only.
pub fn direct_key(id: NodeId) -> String {
    format!("{id}{DIRECT_SUFFIX}")
}

// ---------------------------------------------------------------------------
// Flattening
// ---------------------------------------------------------------------------

/// All categories in pre-order, root excluded.
pub fn flatten_categories(tree: &CategoryNode) -> Vec<Category> {
    let mut result = Vec::new();
    let mut stack: Vec<&TreeNode> = tree.children.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if let TreeNode::Category(folder) = node {
            result.push(folder.category());
            for child in folder.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    result
}

/// All bookmarks in pre-order.
pub fn flatten_bookmarks(tree: &CategoryNode) -> Vec<BookmarkNode> {
    let mut result = Vec::new();
    let mut stack: Vec<&TreeNode> = tree.children.iter().rev().collect();

    while let Some(node) = stack.pop() {
        match node {
            TreeNode::Bookmark(bookmark) => result.push(bookmark.clone()),
            TreeNode::Category(folder) => {
                for child in folder.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
    }

    result
}

// ---------------------------------------------------------------------------
// Display tree
// ---------------------------------------------------------------------------

/// A display-oriented tree node: key, label, children. Mirrors the category
/// structure; individual bookmarks appear only aggregated behind the
/// virtual "(bookmarks in this folder)" leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    pub key: String,
    pub label: String,
    pub children: Vec<DisplayNode>,
}

/// Build the selectable display tree, rooted at the synthetic root.
///
/// Every category with at least one direct bookmark child gets one extra
/// virtual leaf appended after its sub-categories, keyed `<id>@`, so a
/// folder's direct bookmarks can be selected independently of its
/// sub-folders.
pub fn build_display_tree(tree: &CategoryNode) -> DisplayNode {
    struct Frame<'t> {
        node: &'t CategoryNode,
        pending: VecDeque<&'t CategoryNode>,
        children: Vec<DisplayNode>,
    }

    fn open(node: &CategoryNode) -> Frame<'_> {
        Frame {
            node,
            pending: node
                .children
                .iter()
                .filter_map(|n| match n {
                    TreeNode::Category(folder) => Some(folder),
                    TreeNode::Bookmark(_) => None,
                })
                .collect(),
            children: Vec::new(),
        }
    }

    let mut stack = vec![open(tree)];

    while let Some(mut frame) = stack.pop() {
        if let Some(sub) = frame.pending.pop_front() {
            stack.push(frame);
            stack.push(open(sub));
        } else {
            let mut children = frame.children;
            if frame.node.has_direct_bookmarks() {
                children.push(DisplayNode {
                    key: direct_key(frame.node.id),
                    label: DIRECT_LABEL.to_string(),
                    children: Vec::new(),
                });
            }
            let built = DisplayNode {
                key: node_key(frame.node.id),
                label: frame.node.name.clone(),
                children,
            };
            match stack.last_mut() {
                Some(parent) => parent.children.push(built),
                None => return built,
            }
        }
    }

    unreachable!("the root frame terminates the walk");
}
