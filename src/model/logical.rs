//! The logical structure tree and its edit operations.
//!
//! The logical tree holds the intellectual hierarchy of a digitized work
//! (work, chapter, sub-chapter). Every edit operation validates its
//! preconditions before touching the tree, so a failed call leaves the tree
//! exactly as it was, and every successful edit ends with a full `LOG_` id
//! reassignment.

use tracing::debug;

use super::div::Div;
use super::ids::{self, DMD_LOGICAL_ROOT_ID, LOGICAL_ID_PREFIX};
use crate::error::{Error, Result};

/// Where a new div is inserted relative to the target div.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// First entry of the target's child list.
    FirstChild,
    /// Last entry of the target's child list.
    LastChild,
    /// Immediately preceding sibling of the target.
    Before,
    /// Immediately following sibling of the target.
    After,
    /// New parent of the target, spliced into the target's former slot.
    ParentOf,
}

/// `(old_id, new_id)` pairs for divs whose id changed during renumbering.
///
/// Renumbering recycles ids: an edit in the middle of the tree shifts every
/// div behind it to a new id, often one that belonged to a different div
/// moments before. Holders of id references (the struct-link table) apply the
/// remap to keep pointing at the same divs.
pub type IdRemap = Vec<(String, String)>;

/// The intellectual-hierarchy tree of a container document.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogicalTree {
    root: Div,
}

impl LogicalTree {
    /// Create a fresh tree whose root div carries the document type and
    /// references the fixed root descriptive section.
    pub fn new(document_type: impl Into<String>) -> Self {
        let mut root = Div::new(document_type);
        root.id = ids::format_id(LOGICAL_ID_PREFIX, 0);
        root.dmd_ids.push(DMD_LOGICAL_ROOT_ID.to_string());
        Self { root }
    }

    /// Wrap an externally read root div. Ids are kept as read.
    pub fn from_root(root: Div) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Div {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Div {
        &mut self.root
    }

    /// Insert a new div of `new_type` at `position` relative to the div with
    /// `target_id`, then renumber the whole tree. Returns the id remap of the
    /// renumbering.
    ///
    /// The root has no siblings and cannot be reparented: `Before`, `After`
    /// and `ParentOf` targeting the root fail with
    /// [`Error::RootCannotHaveParent`]. An unknown target fails with
    /// [`Error::ChildNotFound`].
    pub fn insert(&mut self, target_id: &str, new_type: impl Into<String>, position: Position) -> Result<IdRemap> {
        let new_type = new_type.into();
        if self.root.id == target_id {
            match position {
                Position::FirstChild => self.root.children.insert(0, Div::new(new_type)),
                Position::LastChild => self.root.children.push(Div::new(new_type)),
                Position::Before | Position::After | Position::ParentOf => {
                    return Err(Error::RootCannotHaveParent);
                }
            }
        } else {
            match position {
                Position::FirstChild | Position::LastChild => {
                    let target = self.root.find_mut(target_id).ok_or(Error::ChildNotFound)?;
                    match position {
                        Position::FirstChild => target.children.insert(0, Div::new(new_type)),
                        _ => target.children.push(Div::new(new_type)),
                    }
                }
                Position::Before | Position::After => {
                    let parent = self
                        .root
                        .find_parent_of_mut(target_id)
                        .ok_or(Error::ChildNotFound)?;
                    let index = child_index(parent, target_id)?;
                    let at = if position == Position::After { index + 1 } else { index };
                    parent.children.insert(at, Div::new(new_type));
                }
                Position::ParentOf => {
                    let parent = self
                        .root
                        .find_parent_of_mut(target_id)
                        .ok_or(Error::ChildNotFound)?;
                    let index = child_index(parent, target_id)?;
                    let target = parent.children.remove(index);
                    let mut wrapper = Div::new(new_type);
                    wrapper.children.push(target);
                    parent.children.insert(index, wrapper);
                }
            }
        }
        let remap = self.renumber();
        debug!(target = target_id, ?position, "inserted logical div");
        Ok(remap)
    }

    /// Detach the div with `id` and insert it into the child list of
    /// `new_parent_id` at `index` (clamped to the list length), then renumber.
    /// Returns the id remap of the renumbering.
    pub fn move_div(&mut self, id: &str, new_parent_id: &str, index: usize) -> Result<IdRemap> {
        if id == self.root.id {
            return Err(Error::RootCannotHaveParent);
        }
        let subtree = self.root.find(id).ok_or(Error::ChildNotFound)?;
        if subtree.contains(new_parent_id) {
            return Err(Error::MoveIntoOwnSubtree);
        }
        if !self.root.contains(new_parent_id) {
            return Err(Error::ChildNotFound);
        }

        let node = detach(&mut self.root, id).ok_or(Error::ChildNotFound)?;
        // Cannot fail: new_parent_id was verified to exist outside the
        // detached subtree.
        let new_parent = self.root.find_mut(new_parent_id).ok_or(Error::ChildNotFound)?;
        let at = index.min(new_parent.children.len());
        new_parent.children.insert(at, node);

        let remap = self.renumber();
        debug!(id, new_parent = new_parent_id, index = at, "moved logical div");
        Ok(remap)
    }

    /// Detach the div with `id` together with its subtree, renumber, and hand
    /// the subtree back to the caller along with the id remap. The detached
    /// subtree keeps its pre-removal ids.
    pub fn remove(&mut self, id: &str) -> Result<(Div, IdRemap)> {
        if id == self.root.id {
            return Err(Error::RootCannotBeRemoved);
        }
        let node = detach(&mut self.root, id).ok_or(Error::ChildNotFound)?;
        let remap = self.renumber();
        debug!(id, subtree_size = node.subtree_size(), "removed logical div");
        Ok((node, remap))
    }

    /// Reassign ids over the mutated tree and record how surviving ids moved.
    ///
    /// Called after the structural change and before control returns to the
    /// caller, while freshly inserted divs still carry the empty id.
    fn renumber(&mut self) -> IdRemap {
        let old: Vec<String> = self.root.iter().map(|div| div.id.clone()).collect();
        ids::assign_ids(&mut self.root, LOGICAL_ID_PREFIX);
        old.into_iter()
            .zip(self.root.iter())
            .filter(|(old_id, div)| !old_id.is_empty() && *old_id != div.id)
            .map(|(old_id, div)| (old_id, div.id.clone()))
            .collect()
    }
}

fn child_index(parent: &Div, id: &str) -> Result<usize> {
    parent
        .children
        .iter()
        .position(|child| child.id == id)
        .ok_or(Error::ChildNotFound)
}

fn detach(root: &mut Div, id: &str) -> Option<Div> {
    let parent = root.find_parent_of_mut(id)?;
    let index = parent.children.iter().position(|child| child.id == id)?;
    Some(parent.children.remove(index))
}
