//! The struct-link table relating logical divs to physical divs.
//!
//! Each link records that a physical division (a scanned page, an audio
//! track) realizes part of a logical division. The table is insertion-ordered
//! and a plain multiset: the same pair may be added more than once, and
//! removal drops one matching occurrence.

use std::collections::HashMap;

/// An ordered pair linking a logical div to a physical div.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructLink {
    /// Id of the logical div.
    pub from: String,
    /// Id of the physical div.
    pub to: String,
}

impl StructLink {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Insertion-ordered collection of struct links.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkTable {
    links: Vec<StructLink>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one link. Duplicates are permitted.
    pub fn add_link(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.links.push(StructLink::new(from, to));
    }

    /// Append one link per physical id, preserving the input order.
    pub fn add_links<I, S>(&mut self, logical_id: &str, physical_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for physical_id in physical_ids {
            self.add_link(logical_id, physical_id);
        }
    }

    /// Remove one occurrence of the pair, if present. Removing a pair that is
    /// not in the table is a no-op. Returns whether a link was removed.
    pub fn remove_link(&mut self, from: &str, to: &str) -> bool {
        match self
            .links
            .iter()
            .position(|link| link.from == from && link.to == to)
        {
            Some(index) => {
                self.links.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether at least one occurrence of the pair exists.
    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.links
            .iter()
            .any(|link| link.from == from && link.to == to)
    }

    /// Physical ids directly linked to the logical div, in insertion order.
    pub fn linked_to<'a>(&'a self, logical_id: &'a str) -> impl Iterator<Item = &'a str> {
        self.links
            .iter()
            .filter(move |link| link.from == logical_id)
            .map(|link| link.to.as_str())
    }

    pub fn links(&self) -> &[StructLink] {
        &self.links
    }

    /// Keep only the links for which the predicate holds.
    pub fn retain(&mut self, keep: impl FnMut(&StructLink) -> bool) {
        self.links.retain(keep);
    }

    /// Rewrite the logical side of every link per the `(old, new)` id pairs.
    ///
    /// All pairs are applied simultaneously, so swapped ids do not chain:
    /// with `[("A", "B"), ("B", "C")]` a link from `A` ends at `B`, not `C`.
    pub fn remap_from(&mut self, remap: &[(String, String)]) {
        if remap.is_empty() {
            return;
        }
        let mapping: HashMap<&str, &str> = remap
            .iter()
            .map(|(old, new)| (old.as_str(), new.as_str()))
            .collect();
        for link in &mut self.links {
            if let Some(new) = mapping.get(link.from.as_str()) {
                link.from = (*new).to_string();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
