//! Core domain types for linklift: categories, bookmarks, the parsed tree,
//! and the tag-linking strategy.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display-only name of the synthetic root node. The root is never a tag.
pub const ROOT_NAME: &str = "(Root)";

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for tree node identifiers (time-sortable).
///
/// Ids are generated once at parse time and are stable for the lifetime of
/// the in-memory tree; they are never reused or recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Generate a new time-sortable node identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The fixed reserved id of the synthetic root node.
    pub fn root() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the synthetic root's reserved id.
    pub fn is_root(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NodeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Name sanitization
// ---------------------------------------------------------------------------

/// Characters that cannot survive in a category name: `/` (the name later
/// becomes a URL path segment), `+` (tag cross-search joins multiple tags
/// with `+`), and whitespace. Each offending character becomes a `-`.
static NAME_SANITIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/+\s]").expect("sanitize regex"));

/// Sanitize a raw folder name for use as a tag / URL segment.
pub fn sanitize_name(raw: &str) -> String {
    NAME_SANITIZE_RE.replace_all(raw, "-").into_owned()
}

// ---------------------------------------------------------------------------
// Tree model
// ---------------------------------------------------------------------------

/// A folder's identity: id plus sanitized name.
///
/// Duplicate folder names at different tree positions are distinct entities;
/// id equality, not name equality, defines identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: NodeId,
    pub name: String,
}

impl Category {
    /// Create a category with a fresh id and a sanitized name.
    pub fn new(raw_name: &str) -> Self {
        Self {
            id: NodeId::new(),
            name: sanitize_name(raw_name),
        }
    }
}

/// A child of a category: either a sub-folder or a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Category(CategoryNode),
    Bookmark(BookmarkNode),
}

/// A folder node with its ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: NodeId,
    pub name: String,
    pub children: Vec<TreeNode>,
}

impl CategoryNode {
    /// The synthetic root wrapping a parse's top-level nodes.
    pub fn root(children: Vec<TreeNode>) -> Self {
        Self {
            id: NodeId::root(),
            name: ROOT_NAME.to_string(),
            children,
        }
    }

    /// This node's identity as a [`Category`].
    pub fn category(&self) -> Category {
        Category {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// Whether this folder has at least one bookmark directly in it
    /// (not counting sub-folders).
    pub fn has_direct_bookmarks(&self) -> bool {
        self.children
            .iter()
            .any(|n| matches!(n, TreeNode::Bookmark(_)))
    }
}

/// A bookmark with the full ancestor-category chain it was found under,
/// root excluded, ordered outermost-to-innermost. The URL is carried
/// verbatim from the export; linklift never validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkNode {
    pub id: NodeId,
    pub name: String,
    pub url: String,
    pub categories: Vec<Category>,
}

// ---------------------------------------------------------------------------
// LinkTagStrategy
// ---------------------------------------------------------------------------

/// Policy governing which ancestor folder names become candidate tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkTagStrategy {
    /// Every folder on the bookmark's path becomes a tag.
    FolderPath,
    /// Only the innermost enclosing folder becomes a tag.
    ClosedFolder,
    /// Ancestry is ignored; every bookmark gets only the fallback tag.
    Other,
}

impl LinkTagStrategy {
    /// Stable kebab-case name used in config files and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FolderPath => "folder-path",
            Self::ClosedFolder => "closed-folder",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for LinkTagStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LinkTagStrategy {
    type Err = crate::error::LinkliftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "folder-path" => Ok(Self::FolderPath),
            "closed-folder" => Ok(Self::ClosedFolder),
            "other" => Ok(Self::Other),
            _ => Err(crate::error::LinkliftError::config(format!(
                "unknown link tag strategy '{s}': expected 'folder-path', 'closed-folder', or 'other'"
            ))),
        }
    }
}
