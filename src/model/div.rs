//! Structure divisions — the `<div>` elements of both structure trees.
//!
//! A [`Div`] exclusively owns its children; there is no parent back-reference.
//! Upward navigation is recomputed by traversal from the tree root (see
//! [`Div::find_parent_of`]), never cached, so the tree stays a plain owned
//! hierarchy without reference cycles.

/// A node in the logical or physical structure tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Div {
    /// Identifier, e.g. `LOG_0007` or `PHYS_0002`. Managed by id assignment
    /// after every structural mutation; treat as read-only.
    pub id: String,
    /// Type label: free-form in the logical tree (`"Chapter"`), derived from
    /// the media MIME type in the physical tree (`"page"`, `"track"`).
    pub div_type: String,
    /// 1-based position among siblings; only meaningful in the physical tree.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub order: Option<u64>,
    /// Human pagination label, `"uncounted"` until one is assigned.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub order_label: Option<String>,
    /// Referenced descriptive metadata section ids (dmdSec).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub dmd_ids: Vec<String>,
    /// Referenced administrative metadata section ids (amdSec).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub adm_ids: Vec<String>,
    /// Referenced file-section record ids (fptr).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub file_ids: Vec<String>,
    /// Child divs, exclusively owned. Dropping a div drops its subtree.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Div>,
}

impl Div {
    /// Create a div of the given type with no id assigned yet.
    pub fn new(div_type: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            div_type: div_type.into(),
            order: None,
            order_label: None,
            dmd_ids: Vec::new(),
            adm_ids: Vec::new(),
            file_ids: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: u64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_order_label(mut self, label: impl Into<String>) -> Self {
        self.order_label = Some(label.into());
        self
    }

    /// Append a child div.
    pub fn add_child(&mut self, child: Div) {
        self.children.push(child);
    }

    /// Pre-order depth-first iterator over this div and its subtree.
    pub fn iter(&self) -> DfsIter<'_> {
        DfsIter { stack: vec![self] }
    }

    /// Pre-order iterator over the subtree below this div (self excluded).
    pub fn descendants(&self) -> impl Iterator<Item = &Div> {
        self.iter().skip(1)
    }

    /// Number of divs in this subtree, including self.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Div::subtree_size).sum::<usize>()
    }

    /// Whether the given id occurs in this subtree (including self).
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Find a div by id in this subtree.
    pub fn find(&self, id: &str) -> Option<&Div> {
        self.iter().find(|div| div.id == id)
    }

    /// Find a div by id in this subtree, mutably.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Div> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Find the parent of the div with the given id.
    ///
    /// Returns `None` if the id names this div itself (no parent within the
    /// subtree) or does not occur at all.
    pub fn find_parent_of(&self, id: &str) -> Option<&Div> {
        if self.children.iter().any(|child| child.id == id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_parent_of(id))
    }

    /// Mutable variant of [`Div::find_parent_of`].
    pub fn find_parent_of_mut(&mut self, id: &str) -> Option<&mut Div> {
        if self.children.iter().any(|child| child.id == id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_parent_of_mut(id))
    }
}

/// Pre-order depth-first iterator over a div subtree.
pub struct DfsIter<'a> {
    stack: Vec<&'a Div>,
}

impl<'a> Iterator for DfsIter<'a> {
    type Item = &'a Div;

    fn next(&mut self) -> Option<Self::Item> {
        let div = self.stack.pop()?;
        self.stack.extend(div.children.iter().rev());
        Some(div)
    }
}
