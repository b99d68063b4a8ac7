//! Tree-selection model: which node keys are checked, and which bookmarks
//! that puts on the wait-upload list.
//!
//! A checked key is either a category id ("include this folder's role") or
//! a category id plus [`crate::index::DIRECT_SUFFIX`] ("include only this
//! folder's direct bookmarks"). Selection is additive, not hierarchical:
//! the derivation visits every category regardless of its ancestors'
//! checked state, so unchecking a parent never deselects an independently
//! checked child.

use std::collections::HashSet;

use linklift_shared::{BookmarkNode, CategoryNode, TreeNode};

use crate::index::{direct_key, flatten_categories, node_key};

/// The set of checked node keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    checked: HashSet<String>,
}

impl Selection {
    /// Nothing checked.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The initial state after a tree is built: the root id and every
    /// category id checked, so the wait-upload list covers every bookmark.
    /// The `@` keys start unchecked; a checked plain key already implies
    /// the folder's direct bookmarks.
    pub fn full_default(tree: &CategoryNode) -> Self {
        let mut checked: HashSet<String> = flatten_categories(tree)
            .into_iter()
            .map(|c| node_key(c.id))
            .collect();
        checked.insert(node_key(tree.id));
        Self { checked }
    }

    pub fn check(&mut self, key: impl Into<String>) {
        self.checked.insert(key.into());
    }

    pub fn uncheck(&mut self, key: &str) {
        self.checked.remove(key);
    }

    pub fn toggle(&mut self, key: &str) {
        if !self.checked.remove(key) {
            self.checked.insert(key.to_string());
        }
    }

    pub fn is_checked(&self, key: &str) -> bool {
        self.checked.contains(key)
    }

    /// Replace the whole checked set.
    pub fn set(&mut self, keys: impl IntoIterator<Item = String>) {
        self.checked = keys.into_iter().collect();
    }

    /// Checked keys in sorted order, for stable display.
    pub fn checked_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.checked.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Whether a folder's direct bookmarks are included: its own key or
    /// its `@` key is checked.
    fn includes_direct(&self, folder: &CategoryNode) -> bool {
        self.is_checked(&node_key(folder.id)) || self.is_checked(&direct_key(folder.id))
    }
}

/// Derive the wait-upload bookmark list from the tree and the checked set.
///
/// Pre-order over the whole tree, matching [`crate::index::flatten_bookmarks`]
/// order restricted to included bookmarks. Recursion into a sub-category is
/// never skipped because its parent is unchecked; a bookmark is included
/// iff its direct parent folder's plain or `@` key is checked.
pub fn wait_upload_bookmarks(tree: &CategoryNode, selection: &Selection) -> Vec<BookmarkNode> {
    let mut result = Vec::new();
    let root_included = selection.includes_direct(tree);
    let mut stack: Vec<(&TreeNode, bool)> = tree
        .children
        .iter()
        .rev()
        .map(|child| (child, root_included))
        .collect();

    while let Some((node, parent_included)) = stack.pop() {
        match node {
            TreeNode::Bookmark(bookmark) => {
                if parent_included {
                    result.push(bookmark.clone());
                }
            }
            TreeNode::Category(folder) => {
                let included = selection.includes_direct(folder);
                for child in folder.children.iter().rev() {
                    stack.push((child, included));
                }
            }
        }
    }

    result
}
