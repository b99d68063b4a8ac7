//! Import session: file → tree → selection → tags → upload payload.
//!
//! One [`ImportSession`] holds the authoritative state: the parsed tree,
//! the checked node keys, the checked tags, and the strategy. Every derived
//! view (display tree, flat lists, wait-upload bookmarks, candidate tags)
//! is recomputed from that state after each mutation, never patched
//! incrementally. The only suspend point is the file read; the parse is
//! synchronous and a failed parse leaves the prior state untouched.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument, warn};

use linklift_parser::parse_document;
use linklift_shared::{
    AppConfig, BookmarkNode, Category, CategoryNode, LinkTagStrategy, LinkliftError, NodeId,
    Result, TagPolicy,
};

use crate::index::{self, DisplayNode};
use crate::selection::{self, Selection};
use crate::tags;

// ---------------------------------------------------------------------------
// Upload payload
// ---------------------------------------------------------------------------

/// One bookmark as the upload service receives it.
#[derive(Debug, Clone, Serialize)]
pub struct UploadBookmark {
    pub id: NodeId,
    pub name: String,
    pub url: String,
    pub categories: Vec<Category>,
    /// Effective tag set: the bookmark's strategy-derived names plus the
    /// fallback, intersected with the checked tags.
    pub tags: Vec<String>,
}

/// The payload handed to the upload collaborator. Field casing and strategy
/// values match the upload service's wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub tag_names: Vec<String>,
    pub bookmarks: Vec<UploadBookmark>,
    pub link_tag_strategy: LinkTagStrategy,
}

/// Outcome of asking the session for its payload.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Configuration confirmed; hand this to the upload collaborator.
    Ready(UploadPayload),
    /// Nothing is selected. Not an error: the user stays in the selection
    /// stage and adjusts the configuration.
    EmptySelection,
}

/// The external collaborator that performs the actual submission
/// (network call, progress, cancel handling). The core only produces the
/// payload; it is delivered only after explicit confirmation and only when
/// the wait-upload list is non-empty.
pub trait UploadSink {
    fn deliver(&self, payload: &UploadPayload) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Per-file state: created wholesale when a file is parsed, discarded
/// wholesale when another file is chosen or the session resets.
#[derive(Debug, Clone)]
struct DocState {
    file_name: String,
    tree: CategoryNode,
    selection: Selection,
    checked_tags: Vec<String>,
}

/// The import session state machine: `Idle` (no document) until a file
/// loads, then selection/strategy edits until submission.
#[derive(Debug, Clone)]
pub struct ImportSession {
    policy: TagPolicy,
    strategy: LinkTagStrategy,
    accept_extensions: Vec<String>,
    doc: Option<DocState>,
}

impl ImportSession {
    /// Create a session with the given tag policy and initial strategy.
    pub fn new(policy: TagPolicy, strategy: LinkTagStrategy) -> Self {
        Self {
            policy,
            strategy,
            accept_extensions: AppConfig::default().import.accept_extensions,
            doc: None,
        }
    }

    /// Create a session from the application config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let strategy: LinkTagStrategy = config.import.strategy.parse()?;
        Ok(Self {
            policy: TagPolicy::from(config),
            strategy,
            accept_extensions: config.import.accept_extensions.clone(),
            doc: None,
        })
    }

    // -- Loading ------------------------------------------------------------

    /// Read and parse a bookmark export. The single async boundary: the
    /// file read suspends, the parse itself is synchronous. On any failure
    /// the previous document (if any) stays installed.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn load_file(&mut self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if !linklift_shared::accepts_file_name(&self.accept_extensions, &name) {
            return Err(LinkliftError::validation(format!(
                "'{name}' is not a bookmark export (expected {})",
                self.accept_extensions.join(" or ")
            )));
        }

        let markup = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LinkliftError::io(path, e))?;
        self.load_markup(&name, &markup)
    }

    /// Parse export markup and atomically install the new tree with the
    /// full default selection and freshly derived tags.
    pub fn load_markup(&mut self, file_name: &str, markup: &str) -> Result<()> {
        let tree = parse_document(markup)?;
        let selection = Selection::full_default(&tree);

        self.doc = Some(DocState {
            file_name: file_name.to_string(),
            tree,
            selection,
            checked_tags: Vec::new(),
        });
        self.refresh_checked_tags();

        info!(
            file = file_name,
            categories = self.categories().len(),
            bookmarks = self.bookmarks().len(),
            "bookmark export loaded"
        );
        Ok(())
    }

    /// Discard the current document and all derived state.
    pub fn reset(&mut self) {
        self.doc = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.doc.is_some()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.doc.as_ref().map(|d| d.file_name.as_str())
    }

    pub fn tree(&self) -> Option<&CategoryNode> {
        self.doc.as_ref().map(|d| &d.tree)
    }

    // -- Mutations ----------------------------------------------------------

    /// Change the linking strategy. Replaces any manual tag checks with the
    /// freshly computed defaults.
    pub fn set_strategy(&mut self, strategy: LinkTagStrategy) {
        self.strategy = strategy;
        self.refresh_checked_tags();
    }

    pub fn strategy(&self) -> LinkTagStrategy {
        self.strategy
    }

    /// Replace the checked node-key set.
    pub fn set_checked_keys(&mut self, keys: impl IntoIterator<Item = String>) {
        if let Some(doc) = self.doc.as_mut() {
            doc.selection.set(keys);
        }
        self.refresh_checked_tags();
    }

    /// Toggle one node key.
    pub fn toggle_key(&mut self, key: &str) {
        if let Some(doc) = self.doc.as_mut() {
            doc.selection.toggle(key);
        }
        self.refresh_checked_tags();
    }

    /// Uncheck one node key.
    pub fn uncheck_key(&mut self, key: &str) {
        if let Some(doc) = self.doc.as_mut() {
            doc.selection.uncheck(key);
        }
        self.refresh_checked_tags();
    }

    /// Manually set the checked tags. Only offerable names survive
    /// (candidates that are not over-length); the fallback is always
    /// re-added, it is never removable.
    pub fn set_checked_tags(&mut self, names: Vec<String>) {
        let candidates = self.candidate_tags();
        let checked: Vec<String> = candidates
            .iter()
            .filter(|name| {
                **name == self.policy.fallback
                    || (names.iter().any(|n| n == *name)
                        && name.chars().count() <= self.policy.max_name_len)
            })
            .cloned()
            .collect();
        if let Some(doc) = self.doc.as_mut() {
            doc.checked_tags = checked;
        }
    }

    // -- Derived views ------------------------------------------------------

    /// Flat category list (pre-order, root excluded).
    pub fn categories(&self) -> Vec<Category> {
        self.tree().map(index::flatten_categories).unwrap_or_default()
    }

    /// Flat bookmark list (pre-order).
    pub fn bookmarks(&self) -> Vec<BookmarkNode> {
        self.tree().map(index::flatten_bookmarks).unwrap_or_default()
    }

    /// The selectable display tree.
    pub fn display_tree(&self) -> Option<DisplayNode> {
        self.tree().map(index::build_display_tree)
    }

    /// Bookmarks currently included by the selection.
    pub fn wait_upload(&self) -> Vec<BookmarkNode> {
        match self.doc.as_ref() {
            Some(doc) => selection::wait_upload_bookmarks(&doc.tree, &doc.selection),
            None => Vec::new(),
        }
    }

    /// Sorted checked node keys, for stable display.
    pub fn checked_keys(&self) -> Vec<String> {
        self.doc
            .as_ref()
            .map(|d| d.selection.checked_keys())
            .unwrap_or_default()
    }

    /// The full candidate tag set for the current wait-upload list.
    pub fn candidate_tags(&self) -> Vec<String> {
        tags::candidate_tags(self.strategy, &self.wait_upload(), &self.policy)
    }

    /// The currently checked tags.
    pub fn checked_tags(&self) -> Vec<String> {
        self.doc
            .as_ref()
            .map(|d| d.checked_tags.clone())
            .unwrap_or_default()
    }

    /// Whether a displayed tag's checkbox is permanently disabled.
    pub fn tag_disabled(&self, name: &str) -> bool {
        tags::tag_disabled(name, &self.policy)
    }

    /// Recompute the checked-tag subset from the current strategy and
    /// wait-upload list. This replaces any manual checks the user made.
    fn refresh_checked_tags(&mut self) {
        let candidates = self.candidate_tags();
        let checked = tags::default_checked_tags(&candidates, &self.policy);
        if let Some(doc) = self.doc.as_mut() {
            doc.checked_tags = checked;
        }
    }

    // -- Submission ---------------------------------------------------------

    /// Confirm the configuration and build the upload payload.
    #[instrument(skip(self))]
    pub fn submit(&self) -> SubmitOutcome {
        let bookmarks = self.wait_upload();
        if bookmarks.is_empty() {
            warn!("no bookmarks selected for upload; check the import configuration");
            return SubmitOutcome::EmptySelection;
        }

        let checked = self.checked_tags();
        let bookmarks: Vec<UploadBookmark> = bookmarks
            .into_iter()
            .map(|b| {
                let tags = tags::bookmark_tags(self.strategy, &b, &checked, &self.policy);
                UploadBookmark {
                    id: b.id,
                    name: b.name,
                    url: b.url,
                    categories: b.categories,
                    tags,
                }
            })
            .collect();

        info!(
            bookmarks = bookmarks.len(),
            tags = checked.len(),
            strategy = %self.strategy,
            "upload payload ready"
        );

        SubmitOutcome::Ready(UploadPayload {
            tag_names: checked,
            bookmarks,
            link_tag_strategy: self.strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::node_key;

    const WORK_NOTES: &str = "<html><body><dl>\
         <dt><h3>Work/Notes</h3><dl>\
         <dt><a href=\"https://example.com\">Example</a></dt>\
         </dl></dt>\
         </dl></body></html>";

    const NESTED: &str = "<html><body><dl>\
         <dt><h3>A</h3><dl>\
         <dt><h3>B</h3><dl>\
         <dt><a href=\"https://x.example\">x</a></dt>\
         </dl></dt>\
         </dl></dt>\
         </dl></body></html>";

    fn session() -> ImportSession {
        ImportSession::new(TagPolicy::default(), LinkTagStrategy::FolderPath)
    }

    fn loaded(markup: &str) -> ImportSession {
        let mut s = session();
        s.load_markup("bookmarks.html", markup).expect("load markup");
        s
    }

    fn payload_of(s: &ImportSession) -> UploadPayload {
        match s.submit() {
            SubmitOutcome::Ready(payload) => payload,
            SubmitOutcome::EmptySelection => panic!("expected a payload"),
        }
    }

    #[test]
    fn end_to_end_folder_path_scenario() {
        let s = loaded(WORK_NOTES);

        let categories = s.categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Work-Notes");

        assert_eq!(s.candidate_tags(), vec!["Other", "Work-Notes"]);
        assert_eq!(s.checked_tags(), vec!["Other", "Work-Notes"]);

        let payload = payload_of(&s);
        assert_eq!(payload.tag_names, vec!["Other", "Work-Notes"]);
        assert_eq!(payload.bookmarks.len(), 1);
        let bookmark = &payload.bookmarks[0];
        assert_eq!(bookmark.name, "Example");
        assert_eq!(bookmark.url, "https://example.com");
        assert_eq!(bookmark.tags, vec!["Other", "Work-Notes"]);
        assert_eq!(bookmark.categories[0].name, "Work-Notes");
    }

    #[test]
    fn default_selection_covers_every_bookmark() {
        let s = loaded(NESTED);
        assert_eq!(s.wait_upload(), s.bookmarks());
    }

    #[test]
    fn strategy_change_replaces_manual_tag_checks() {
        let mut s = loaded(NESTED);
        assert_eq!(s.checked_tags(), vec!["Other", "A", "B"]);

        // Manually drop everything but the fallback...
        s.set_checked_tags(vec![]);
        assert_eq!(s.checked_tags(), vec!["Other"]);

        // ...then change strategy: the manual edit is replaced, not merged.
        s.set_strategy(LinkTagStrategy::ClosedFolder);
        assert_eq!(s.candidate_tags(), vec!["Other", "B"]);
        assert_eq!(s.checked_tags(), vec!["Other", "B"]);
    }

    #[test]
    fn selection_change_recomputes_tags() {
        let mut s = loaded(NESTED);
        s.set_checked_keys(std::iter::empty::<String>());
        // No wait-upload bookmarks: only the fallback remains a candidate.
        assert_eq!(s.candidate_tags(), vec!["Other"]);
        assert_eq!(s.checked_tags(), vec!["Other"]);
    }

    #[test]
    fn fallback_is_not_removable() {
        let mut s = loaded(WORK_NOTES);
        s.set_checked_tags(vec![]);
        assert_eq!(s.checked_tags(), vec!["Other"]);
    }

    #[test]
    fn submit_with_empty_selection_blocks_without_error() {
        let mut s = loaded(WORK_NOTES);
        s.set_checked_keys(std::iter::empty::<String>());

        assert!(matches!(s.submit(), SubmitOutcome::EmptySelection));
        // Still in the selection stage; nothing was torn down.
        assert!(s.is_loaded());
        assert_eq!(s.bookmarks().len(), 1);
    }

    #[test]
    fn submit_without_document_is_empty() {
        let s = session();
        assert!(matches!(s.submit(), SubmitOutcome::EmptySelection));
    }

    #[test]
    fn failed_parse_leaves_prior_state_untouched() {
        let mut s = loaded(WORK_NOTES);

        let err = s
            .load_markup("broken.html", "<html><body><h1>nope</h1></body></html>")
            .unwrap_err();
        assert!(matches!(err, LinkliftError::MissingRoot));

        assert_eq!(s.file_name(), Some("bookmarks.html"));
        assert_eq!(s.bookmarks().len(), 1);
    }

    #[test]
    fn uncheck_and_toggle_drive_wait_upload() {
        let mut s = loaded(NESTED);
        let b_key = s
            .categories()
            .into_iter()
            .find(|c| c.name == "B")
            .map(|c| node_key(c.id))
            .expect("B folder");

        s.uncheck_key(&b_key);
        assert!(s.wait_upload().is_empty());

        s.toggle_key(&b_key);
        assert_eq!(s.wait_upload().len(), 1);
    }

    #[test]
    fn reserved_folder_is_offered_but_not_default_checked() {
        let s = loaded(
            "<html><body><dl>\
             <dt><h3>Bookmarks bar</h3><dl>\
             <dt><a href=\"https://a.example\">a</a></dt>\
             </dl></dt>\
             </dl></body></html>",
        );

        assert_eq!(s.candidate_tags(), vec!["Other", "Bookmarks-bar"]);
        assert_eq!(s.checked_tags(), vec!["Other"]);
        assert!(!s.tag_disabled("Bookmarks-bar"));
    }

    #[test]
    fn overlong_folder_is_offered_but_disabled() {
        let s = loaded(
            "<html><body><dl>\
             <dt><h3>This folder name is way too long to link</h3><dl>\
             <dt><a href=\"https://a.example\">a</a></dt>\
             </dl></dt>\
             </dl></body></html>",
        );

        let long_name = "This-folder-name-is-way-too-long-to-link";
        assert_eq!(s.candidate_tags(), vec!["Other", long_name]);
        assert_eq!(s.checked_tags(), vec!["Other"]);
        assert!(s.tag_disabled(long_name));

        // A manual check of a disabled name does not stick.
        let mut s = s;
        s.set_checked_tags(vec!["Other".into(), long_name.into()]);
        assert_eq!(s.checked_tags(), vec!["Other"]);
    }

    #[test]
    fn payload_matches_upload_wire_shape() {
        let s = loaded(WORK_NOTES);
        let payload = payload_of(&s);

        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert!(json.get("tagNames").is_some());
        assert_eq!(json["linkTagStrategy"], "FOLDER_PATH");
        assert_eq!(json["bookmarks"][0]["tags"][0], "Other");
        assert_eq!(json["bookmarks"][0]["url"], "https://example.com");
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut s = loaded(WORK_NOTES);
        s.reset();
        assert!(!s.is_loaded());
        assert!(s.bookmarks().is_empty());
        assert!(s.display_tree().is_none());
    }

    #[tokio::test]
    async fn load_file_rejects_unaccepted_extension() {
        let mut s = session();
        let err = s
            .load_file(std::path::Path::new("/tmp/notes.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, LinkliftError::Validation { .. }));
        assert!(!s.is_loaded());
    }

    #[tokio::test]
    async fn load_file_reads_chrome_fixture() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/html/bookmarks-chrome.html");

        let mut s = session();
        s.load_file(&path).await.expect("load fixture");

        assert_eq!(s.file_name(), Some("bookmarks-chrome.html"));
        assert_eq!(s.bookmarks().len(), 5);
        // Default selection covers the whole export.
        assert_eq!(s.wait_upload().len(), 5);
        // The bookmarks-bar folder name is offered but not default-checked.
        assert!(s.candidate_tags().contains(&"Bookmarks-bar".to_string()));
        assert!(!s.checked_tags().contains(&"Bookmarks-bar".to_string()));
    }
}
