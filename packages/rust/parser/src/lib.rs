//! Bookmark-export parsing for linklift.
//!
//! Turns a browser's exported bookmark file (Netscape bookmark file format)
//! into a [`linklift_shared::CategoryNode`] tree:
//! - [`dom`] — the minimal markup-traversal interface and its `scraper` adapter
//! - [`netscape`] — the explicit-stack descent with empty-folder pruning

pub mod dom;
pub mod netscape;

pub use dom::{DomNode, ExportDocument, MarkupNode};
pub use netscape::{parse_document, parse_list};
