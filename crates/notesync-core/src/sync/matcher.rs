//! Pairing of local files and remote notes by name
//!
//! Matching is a single equality join on the name: no case folding, no fuzzy
//! matching, no rename detection. When a name occurs more than once on one
//! side, the first enumerated item takes part in the join and the others are
//! set aside as duplicates.

use crate::{LocalItem, RemoteItem};
use std::collections::HashMap;

/// A local file and a remote note with the same name
#[derive(Debug, Clone, Copy)]
pub struct MatchedPair<'a> {
    pub local: &'a LocalItem,
    pub remote: &'a RemoteItem,
}

impl<'a> MatchedPair<'a> {
    pub fn name(&self) -> &'a str {
        &self.local.name
    }
}

/// Result of joining both listings
#[derive(Debug, Default)]
pub struct Matching<'a> {
    /// Names present on both sides, in local enumeration order
    pub pairs: Vec<MatchedPair<'a>>,
    /// Files without a note of the same name
    pub local_only: Vec<&'a LocalItem>,
    /// Notes without a file of the same name
    pub remote_only: Vec<&'a RemoteItem>,
    /// Files whose name was already taken by an earlier file
    pub duplicate_local: Vec<&'a LocalItem>,
    /// Notes whose name was already taken by an earlier note
    pub duplicate_remote: Vec<&'a RemoteItem>,
}

/// Join local and remote items by exact name.
pub fn match_items<'a>(local: &'a [LocalItem], remote: &'a [RemoteItem]) -> Matching<'a> {
    let mut matching = Matching::default();

    let mut remote_by_name: HashMap<&str, &RemoteItem> = HashMap::with_capacity(remote.len());
    for item in remote {
        if remote_by_name.contains_key(item.name.as_str()) {
            matching.duplicate_remote.push(item);
        } else {
            remote_by_name.insert(item.name.as_str(), item);
        }
    }

    let mut seen_local: HashMap<&str, &LocalItem> = HashMap::with_capacity(local.len());
    for item in local {
        if seen_local.contains_key(item.name.as_str()) {
            matching.duplicate_local.push(item);
            continue;
        }
        seen_local.insert(item.name.as_str(), item);

        match remote_by_name.get(item.name.as_str()) {
            Some(note) => matching.pairs.push(MatchedPair {
                local: item,
                remote: note,
            }),
            None => matching.local_only.push(item),
        }
    }

    for item in remote {
        let is_first = remote_by_name
            .get(item.name.as_str())
            .is_some_and(|first| std::ptr::eq(*first, item));
        if is_first && !seen_local.contains_key(item.name.as_str()) {
            matching.remote_only.push(item);
        }
    }

    matching
}
