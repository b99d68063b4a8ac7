//! Shared types, error model, and configuration for linklift.
//!
//! This crate is the foundation depended on by all other linklift crates.
//! It provides:
//! - [`LinkliftError`] — the unified error type
//! - Domain types ([`CategoryNode`], [`BookmarkNode`], [`NodeId`], [`LinkTagStrategy`])
//! - Configuration ([`AppConfig`], [`TagPolicy`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ImportConfig, TagPolicy, TagsConfig, accepts_file_name, accepts_path, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{LinkliftError, Result};
pub use types::{
    Category, CategoryNode, BookmarkNode, LinkTagStrategy, NodeId, ROOT_NAME, TreeNode,
    sanitize_name,
};
