//! Minimal markup-traversal capability interface and its `scraper` adapter.
//!
//! The parse algorithm in [`crate::netscape`] only needs three operations on
//! a markup node: direct children by tag, text content, and an attribute
//! lookup. Keeping that surface behind [`MarkupNode`] confines the concrete
//! markup library to this module.

use scraper::{ElementRef, Html};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Traversal capabilities the bookmark parser needs from a markup node.
pub trait MarkupNode: Sized {
    /// Direct child elements with the given tag name, in document order.
    fn children(&self, tag: &str) -> Vec<Self>;

    /// Concatenated text content, trimmed.
    fn text(&self) -> String;

    /// Attribute value by name, if present.
    fn attribute(&self, name: &str) -> Option<String>;
}

// ---------------------------------------------------------------------------
// scraper adapter
// ---------------------------------------------------------------------------

/// A parsed bookmark-export document.
pub struct ExportDocument {
    html: Html,
}

impl ExportDocument {
    /// Parse raw export markup into a document.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// The top-level list container: the first `<dl>` that is a direct
    /// child of `<body>`. `None` means the document is not a bookmark export.
    pub fn root_list(&self) -> Option<DomNode<'_>> {
        DomNode(self.html.root_element())
            .children("body")
            .into_iter()
            .next()?
            .children("dl")
            .into_iter()
            .next()
    }
}

/// [`MarkupNode`] implementation backed by a `scraper` element.
#[derive(Debug, Clone, Copy)]
pub struct DomNode<'a>(ElementRef<'a>);

impl MarkupNode for DomNode<'_> {
    fn children(&self, tag: &str) -> Vec<Self> {
        self.0
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name().eq_ignore_ascii_case(tag))
            .map(DomNode)
            .collect()
    }

    fn text(&self) -> String {
        self.0.text().collect::<String>().trim().to_string()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_list_finds_body_level_dl() {
        let doc = ExportDocument::parse(
            "<html><body><h1>Bookmarks</h1><dl><dt><a href=\"https://a.com\">A</a></dt></dl></body></html>",
        );
        assert!(doc.root_list().is_some());
    }

    #[test]
    fn root_list_ignores_nested_dl() {
        // A <dl> buried inside a <div> is not the top-level container.
        let doc = ExportDocument::parse("<html><body><div><dl></dl></div></body></html>");
        assert!(doc.root_list().is_none());
    }

    #[test]
    fn children_are_direct_and_ordered() {
        let doc = ExportDocument::parse(
            "<html><body><dl>\
             <dt><a href=\"https://one.com\">one</a></dt>\
             <p></p>\
             <dt><a href=\"https://two.com\">two</a></dt>\
             </dl></body></html>",
        );
        let list = doc.root_list().expect("root list");
        let entries = list.children("dt");
        assert_eq!(entries.len(), 2);
        let first_link = &entries[0].children("a")[0];
        assert_eq!(first_link.text(), "one");
        assert_eq!(
            first_link.attribute("href").as_deref(),
            Some("https://one.com")
        );
    }

    #[test]
    fn tag_match_is_case_insensitive() {
        // Browser exports use uppercase tags; the HTML parser lowercases
        // them, but the adapter should not depend on that.
        let doc = ExportDocument::parse(
            "<HTML><BODY><DL><DT><A HREF=\"https://x.com\">x</A></DT></DL></BODY></HTML>",
        );
        let list = doc.root_list().expect("root list");
        assert_eq!(list.children("DT").len(), 1);
    }

    #[test]
    fn text_is_trimmed() {
        let doc = ExportDocument::parse(
            "<html><body><dl><dt><a href=\"https://a.com\">  padded name \n</a></dt></dl></body></html>",
        );
        let list = doc.root_list().expect("root list");
        let link = &list.children("dt")[0].children("a")[0];
        assert_eq!(link.text(), "padded name");
    }
}
