//! Core import pipeline for linklift.
//!
//! Ties the parsed category tree to its derived views (flat lists, the
//! selectable display tree, the wait-upload bookmark list, derived tags)
//! and owns the import session state machine that produces the final
//! upload payload.

pub mod index;
pub mod selection;
pub mod session;
pub mod tags;

pub use index::{
    DIRECT_LABEL, DIRECT_SUFFIX, DisplayNode, build_display_tree, direct_key, flatten_bookmarks,
    flatten_categories, node_key,
};
pub use selection::{Selection, wait_upload_bookmarks};
pub use session::{ImportSession, SubmitOutcome, UploadBookmark, UploadPayload, UploadSink};
pub use tags::{bookmark_tags, candidate_tags, default_checked_tags, tag_disabled};
