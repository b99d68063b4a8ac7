//! Tag derivation: which folder names become candidate tags, which of those
//! are checked by default, and which tags a single bookmark ends up with.
//!
//! All functions are total over a well-formed tree; they never fail.

use linklift_shared::{BookmarkNode, LinkTagStrategy, TagPolicy};

/// Append a name if it is not already present (first occurrence wins the
/// position, like a JS `Set`).
fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// Names a single bookmark's ancestor chain yields under a strategy,
/// fallback excluded.
fn chain_names(strategy: LinkTagStrategy, bookmark: &BookmarkNode) -> Vec<String> {
    match strategy {
        LinkTagStrategy::Other => Vec::new(),
        LinkTagStrategy::FolderPath => {
            bookmark.categories.iter().map(|c| c.name.clone()).collect()
        }
        LinkTagStrategy::ClosedFolder => bookmark
            .categories
            .last()
            .map(|c| vec![c.name.clone()])
            .unwrap_or_default(),
    }
}

/// The full candidate tag set for the current wait-upload bookmarks:
/// the fallback first, then every name the strategy yields, in first-seen
/// order, duplicates collapsed.
pub fn candidate_tags(
    strategy: LinkTagStrategy,
    bookmarks: &[BookmarkNode],
    policy: &TagPolicy,
) -> Vec<String> {
    let mut names = vec![policy.fallback.clone()];
    for bookmark in bookmarks {
        for name in chain_names(strategy, bookmark) {
            push_unique(&mut names, &name);
        }
    }
    names
}

/// The default-checked subset of a candidate set: the reserved folder name
/// and over-length names are excluded; the fallback is always present.
pub fn default_checked_tags(candidates: &[String], policy: &TagPolicy) -> Vec<String> {
    candidates
        .iter()
        .filter(|name| {
            *name == &policy.fallback
                || (*name != &policy.reserved && name.chars().count() <= policy.max_name_len)
        })
        .cloned()
        .collect()
}

/// Whether a displayed tag's checkbox is permanently disabled: the fallback
/// (always checked, never removable) and over-length names (shown but never
/// checkable). The reserved name stays enabled; it is only excluded from
/// the defaults.
pub fn tag_disabled(name: &str, policy: &TagPolicy) -> bool {
    name == policy.fallback || name.chars().count() > policy.max_name_len
}

/// The effective tag set attached to one wait-upload bookmark: its own
/// strategy-derived names plus the fallback, intersected with the currently
/// checked tags. The fallback survives the intersection unconditionally.
pub fn bookmark_tags(
    strategy: LinkTagStrategy,
    bookmark: &BookmarkNode,
    checked: &[String],
    policy: &TagPolicy,
) -> Vec<String> {
    let mut names = vec![policy.fallback.clone()];
    for name in chain_names(strategy, bookmark) {
        push_unique(&mut names, &name);
    }
    names.retain(|name| *name == policy.fallback || checked.iter().any(|c| c == name));
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use linklift_shared::{Category, NodeId};

    fn policy() -> TagPolicy {
        TagPolicy {
            fallback: "Other".into(),
            reserved: "Bookmarks-bar".into(),
            max_name_len: 20,
        }
    }

    fn bookmark(chain: &[&str]) -> BookmarkNode {
        BookmarkNode {
            id: NodeId::new(),
            name: "b".into(),
            url: "https://example.com".into(),
            categories: chain.iter().map(|name| Category::new(name)).collect(),
        }
    }

    #[test]
    fn other_strategy_yields_only_fallback() {
        let bookmarks = vec![bookmark(&["A", "B"]), bookmark(&["C"])];
        let tags = candidate_tags(LinkTagStrategy::Other, &bookmarks, &policy());
        assert_eq!(tags, vec!["Other"]);
    }

    #[test]
    fn folder_path_takes_whole_chain() {
        let bookmarks = vec![bookmark(&["A", "B", "C"])];
        let tags = candidate_tags(LinkTagStrategy::FolderPath, &bookmarks, &policy());
        assert_eq!(tags, vec!["Other", "A", "B", "C"]);
    }

    #[test]
    fn closed_folder_takes_innermost_per_bookmark() {
        let bookmarks = vec![bookmark(&["A", "B", "C"]), bookmark(&["X", "Y"])];
        let tags = candidate_tags(LinkTagStrategy::ClosedFolder, &bookmarks, &policy());
        // Innermost of each chain, never A, B, or X
        assert_eq!(tags, vec!["Other", "C", "Y"]);
    }

    #[test]
    fn empty_chain_contributes_nothing_beyond_fallback() {
        let bookmarks = vec![bookmark(&[])];
        for strategy in [
            LinkTagStrategy::FolderPath,
            LinkTagStrategy::ClosedFolder,
            LinkTagStrategy::Other,
        ] {
            assert_eq!(candidate_tags(strategy, &bookmarks, &policy()), vec!["Other"]);
        }
    }

    #[test]
    fn candidates_are_deduplicated_in_first_seen_order() {
        let bookmarks = vec![bookmark(&["A", "B"]), bookmark(&["B", "A"])];
        let tags = candidate_tags(LinkTagStrategy::FolderPath, &bookmarks, &policy());
        assert_eq!(tags, vec!["Other", "A", "B"]);
    }

    #[test]
    fn defaults_exclude_reserved_and_overlong_names() {
        let candidates = vec![
            "Other".to_string(),
            "Bookmarks-bar".to_string(),
            "Short".to_string(),
            "x".repeat(21),
        ];
        let checked = default_checked_tags(&candidates, &policy());
        assert_eq!(checked, vec!["Other", "Short"]);
    }

    #[test]
    fn overlong_fallback_still_survives_defaults() {
        let mut policy = policy();
        policy.max_name_len = 2;
        let candidates = vec!["Other".to_string(), "Long-name".to_string()];
        assert_eq!(default_checked_tags(&candidates, &policy), vec!["Other"]);
    }

    #[test]
    fn disabled_flags() {
        let policy = policy();
        assert!(tag_disabled("Other", &policy));
        assert!(tag_disabled(&"x".repeat(21), &policy));
        // Reserved is excluded from defaults but remains checkable
        assert!(!tag_disabled("Bookmarks-bar", &policy));
        assert!(!tag_disabled("Short", &policy));
    }

    #[test]
    fn length_limit_counts_characters_not_bytes() {
        let policy = TagPolicy {
            max_name_len: 3,
            ..self::policy()
        };
        assert!(!tag_disabled("书签栏", &policy));
        assert!(tag_disabled("四个字符", &policy));
    }

    #[test]
    fn bookmark_tags_intersect_with_checked() {
        let b = bookmark(&["A", "B"]);
        let checked = vec!["Other".to_string(), "B".to_string()];
        let tags = bookmark_tags(LinkTagStrategy::FolderPath, &b, &checked, &policy());
        assert_eq!(tags, vec!["Other", "B"]);
    }

    #[test]
    fn bookmark_tags_keep_fallback_even_when_unchecked() {
        let b = bookmark(&["A"]);
        let tags = bookmark_tags(LinkTagStrategy::FolderPath, &b, &[], &policy());
        assert_eq!(tags, vec!["Other"]);
    }

    #[test]
    fn bookmark_tags_respect_strategy() {
        let b = bookmark(&["A", "B"]);
        let checked = vec!["Other".to_string(), "A".to_string(), "B".to_string()];
        assert_eq!(
            bookmark_tags(LinkTagStrategy::ClosedFolder, &b, &checked, &policy()),
            vec!["Other", "B"]
        );
        assert_eq!(
            bookmark_tags(LinkTagStrategy::Other, &b, &checked, &policy()),
            vec!["Other"]
        );
    }
}
