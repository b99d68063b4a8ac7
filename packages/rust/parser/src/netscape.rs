//! Netscape bookmark file parser.
//!
//! Every browser's "Export bookmarks" emits the same nested markup:
//! a `<dl>` list of `<dt>` entries, where a folder is an `<h3>` heading
//! followed by a nested `<dl>`, and a bookmark is a single `<a>` link.
//! The parser turns that into a [`CategoryNode`] tree rooted at one
//! synthetic root, dropping folders with no bookmarks anywhere below them.
//!
//! Real exports nest deeply, so the descent runs on an explicit frame
//! stack instead of call recursion.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use linklift_shared::{
    BookmarkNode, Category, CategoryNode, LinkliftError, NodeId, Result, TreeNode,
};

use crate::dom::{ExportDocument, MarkupNode};

/// Parse raw export markup into the category tree.
///
/// Fails with [`LinkliftError::MissingRoot`] when the document has no
/// top-level `<body> > <dl>` container, and with [`LinkliftError::Structure`]
/// when any entry is neither a folder nor a link. A failed parse installs
/// nothing; the error aborts the whole attempt.
#[instrument(skip_all, fields(markup_len = markup.len()))]
pub fn parse_document(markup: &str) -> Result<CategoryNode> {
    let doc = ExportDocument::parse(markup);
    let root_list = doc.root_list().ok_or(LinkliftError::MissingRoot)?;
    let tree = parse_list(&root_list)?;

    debug!(top_level_nodes = tree.children.len(), "export parsed");
    Ok(tree)
}

/// One open folder during the descent: its identity (`None` for the
/// synthetic root), the entries not yet visited, and the surviving
/// children built so far.
struct Frame<N> {
    category: Option<Category>,
    pending: VecDeque<N>,
    children: Vec<TreeNode>,
}

/// Parse a top-level list node into the category tree.
///
/// Generic over [`MarkupNode`] so the algorithm stays independent of the
/// concrete markup library. Pruning is post-order: a folder is attached to
/// its parent only when, after all of its entries are processed, it still
/// has surviving children, so a folder containing only empty folders is
/// itself dropped.
pub fn parse_list<N: MarkupNode>(root_list: &N) -> Result<CategoryNode> {
    // Ancestor chain of the currently open folders, outermost first,
    // root excluded. Bookmarks snapshot it at creation.
    let mut chain: Vec<Category> = Vec::new();
    let mut stack: Vec<Frame<N>> = vec![Frame {
        category: None,
        pending: root_list.children("dt").into(),
        children: Vec::new(),
    }];

    while let Some(mut frame) = stack.pop() {
        if let Some(entry) = frame.pending.pop_front() {
            let header = entry.children("h3").into_iter().next();
            let list = entry.children("dl").into_iter().next();

            if let (Some(header), Some(list)) = (header, list) {
                // Folder: open a new frame; its node is built when the
                // frame is exhausted.
                let category = Category::new(&header.text());
                chain.push(category.clone());
                stack.push(frame);
                stack.push(Frame {
                    category: Some(category),
                    pending: list.children("dt").into(),
                    children: Vec::new(),
                });
                continue;
            }

            if let Some(link) = entry.children("a").into_iter().next() {
                frame.children.push(TreeNode::Bookmark(BookmarkNode {
                    id: NodeId::new(),
                    name: link.text(),
                    url: link.attribute("href").unwrap_or_default(),
                    categories: chain.clone(),
                }));
                stack.push(frame);
                continue;
            }

            let context = chain
                .last()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| linklift_shared::ROOT_NAME.to_string());
            return Err(LinkliftError::structure(format!(
                "entry under '{context}' is neither a folder (<h3> + <dl>) nor a link (<a>)"
            )));
        } else {
            // Folder exhausted: attach it, or drop it if nothing survived.
            match frame.category {
                None => return Ok(CategoryNode::root(frame.children)),
                Some(category) => {
                    chain.pop();
                    if frame.children.is_empty() {
                        debug!(folder = %category.name, "dropping empty folder");
                    } else if let Some(parent) = stack.last_mut() {
                        parent.children.push(TreeNode::Category(CategoryNode {
                            id: category.id,
                            name: category.name,
                            children: frame.children,
                        }));
                    }
                }
            }
        }
    }

    unreachable!("the synthetic root frame terminates the parse");
}
