//! The container document: orchestrates both structure trees, the link
//! table, the metadata sections and the file section, and exposes the public
//! edit/query surface of the crate.

use std::collections::HashSet;

use tracing::debug;

use super::div::Div;
use super::ids::{self, AMD_ID_PREFIX, DMD_ID_PREFIX, DMD_LOGICAL_ROOT_ID};
use super::links::LinkTable;
use super::logical::{LogicalTree, Position};
use super::mdsec::{MdDomain, MdSec, MdWrap, MetadataRecord, SectionKind};
use super::physical::{FileRecord, MediaFile, PhysicalSequence};
use crate::error::{Error, Result};

/// Header record of a container document, carrying the software-agent note.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    pub agent_role: String,
    pub agent_type: String,
    pub agent_other_type: String,
    pub agent_name: String,
    pub note: String,
}

impl Header {
    pub fn new() -> Self {
        Self {
            agent_role: "CREATOR".to_string(),
            agent_type: "OTHER".to_string(),
            agent_other_type: "SOFTWARE".to_string(),
            agent_name: concat!("metsedit ", env!("CARGO_PKG_VERSION")).to_string(),
            note: concat!("Created with metsedit ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

/// An administrative metadata section together with its collection kind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmdSec {
    pub kind: SectionKind,
    pub sec: MdSec,
}

/// The collections an external reader produces when opening an existing
/// container representation. [`Document::from_parts`] normalizes them to the
/// same minimal shape [`Document::new`] guarantees.
#[derive(Debug, Clone)]
pub struct DocumentParts {
    pub header: Option<Header>,
    pub dmd_secs: Vec<MdSec>,
    pub amd_secs: Vec<AmdSec>,
    pub file_sec: Vec<FileRecord>,
    pub logical_root: Div,
    pub physical_root: Div,
    pub links: LinkTable,
}

impl DocumentParts {
    pub fn new(logical_root: Div, physical_root: Div) -> Self {
        Self {
            header: None,
            dmd_secs: Vec::new(),
            amd_secs: Vec::new(),
            file_sec: Vec::new(),
            logical_root,
            physical_root,
            links: LinkTable::new(),
        }
    }
}

/// An in-memory METS-style container document.
///
/// All mutation goes through `&mut self`; one editing session owns one
/// document exclusively. Failed operations leave the document unchanged.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    header: Header,
    dmd_secs: Vec<MdSec>,
    amd_secs: Vec<AmdSec>,
    file_sec: Vec<FileRecord>,
    logical: LogicalTree,
    physical: PhysicalSequence,
    links: LinkTable,
}

impl Document {
    /// Create an empty container of the given document type.
    ///
    /// The logical root carries the document type and references a fresh
    /// descriptive section with the fixed id `DMDLOG_ROOT`; the physical root
    /// is the fixed `PHYSICAL` div; the link table starts empty.
    pub fn new(document_type: impl Into<String>) -> Self {
        Self {
            header: Header::new(),
            dmd_secs: vec![MdSec::new(DMD_LOGICAL_ROOT_ID).with_records(MetadataRecord::new())],
            amd_secs: Vec::new(),
            file_sec: Vec::new(),
            logical: LogicalTree::new(document_type),
            physical: PhysicalSequence::new(),
            links: LinkTable::new(),
        }
    }

    /// Build a document from externally read collections.
    ///
    /// Normalizes missing default sections the same way [`Document::new`]
    /// does, so both paths guarantee the same minimal shape. Ids read from
    /// the existing representation are never reassigned here.
    pub fn from_parts(parts: DocumentParts) -> Self {
        let mut document = Self {
            header: parts.header.unwrap_or_default(),
            dmd_secs: parts.dmd_secs,
            amd_secs: parts.amd_secs,
            file_sec: parts.file_sec,
            logical: LogicalTree::from_root(parts.logical_root),
            physical: PhysicalSequence::from_root(parts.physical_root),
            links: parts.links,
        };
        document.normalize();
        document
    }

    /// Ensure the root descriptive section exists and is referenced by the
    /// logical root. Idempotent.
    fn normalize(&mut self) {
        if !self.dmd_secs.iter().any(|sec| sec.id == DMD_LOGICAL_ROOT_ID) {
            self.dmd_secs.insert(
                0,
                MdSec::new(DMD_LOGICAL_ROOT_ID).with_records(MetadataRecord::new()),
            );
            debug!("created missing root descriptive section");
        }
        let root = self.logical.root_mut();
        if !root.dmd_ids.iter().any(|id| id == DMD_LOGICAL_ROOT_ID) {
            root.dmd_ids.insert(0, DMD_LOGICAL_ROOT_ID.to_string());
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn logical(&self) -> &LogicalTree {
        &self.logical
    }

    pub fn physical(&self) -> &PhysicalSequence {
        &self.physical
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    pub fn dmd_secs(&self) -> &[MdSec] {
        &self.dmd_secs
    }

    pub fn amd_secs(&self) -> &[AmdSec] {
        &self.amd_secs
    }

    pub fn file_sec(&self) -> &[FileRecord] {
        &self.file_sec
    }

    // ------------------------------------------------------------------
    // Physical sequence
    // ------------------------------------------------------------------

    /// Configure the physical div type used for media whose MIME type is
    /// neither image, audio nor video.
    pub fn set_physical_fallback_type(&mut self, div_type: impl Into<String>) {
        self.physical.set_fallback_type(div_type);
    }

    /// Rebuild the physical sequence and the file section from an ordered
    /// media-file list. Any previous sequence is replaced entirely.
    pub fn insert_media_files(&mut self, media_files: &[MediaFile]) {
        self.file_sec = self.physical.build(media_files);
    }

    /// Assign pagination labels across the physical leaves, starting at the
    /// leaf with `start_order`. See [`PhysicalSequence::paginate`].
    pub fn paginate<I>(&mut self, start_order: u64, labels: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        self.physical.paginate(start_order, labels)
    }

    // ------------------------------------------------------------------
    // Logical tree edits
    // ------------------------------------------------------------------

    /// Insert a new logical div relative to the div with `target_id`.
    /// See [`LogicalTree::insert`] for position semantics and errors.
    ///
    /// Renumbering shifts the ids of divs behind the insertion point; links
    /// of shifted divs follow them to their new ids.
    pub fn add_div(&mut self, target_id: &str, new_type: impl Into<String>, position: Position) -> Result<()> {
        let remap = self.logical.insert(target_id, new_type, position)?;
        self.links.remap_from(&remap);
        Ok(())
    }

    /// Move a logical div (and its subtree) under a new parent. Links of
    /// divs renumbered by the move follow them to their new ids.
    pub fn move_div(&mut self, id: &str, new_parent_id: &str, index: usize) -> Result<()> {
        let remap = self.logical.move_div(id, new_parent_id, index)?;
        self.links.remap_from(&remap);
        Ok(())
    }

    /// Remove a logical div and hand back its subtree.
    ///
    /// Link entries of the removed subtree are purged before renumbering can
    /// recycle its ids onto surviving divs; links of surviving divs follow
    /// them to their new ids.
    pub fn remove_div(&mut self, id: &str) -> Result<Div> {
        let (removed, remap) = self.logical.remove(id)?;
        let gone: HashSet<&str> = removed.iter().map(|div| div.id.as_str()).collect();
        let before = self.links.len();
        self.links.retain(|link| !gone.contains(link.from.as_str()));
        let purged = before - self.links.len();
        self.links.remap_from(&remap);
        if purged > 0 {
            debug!(id, purged, "purged links of removed subtree");
        }
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Struct links
    // ------------------------------------------------------------------

    /// Append one link from a logical div to a physical div.
    pub fn add_link(&mut self, logical_id: impl Into<String>, physical_id: impl Into<String>) {
        self.links.add_link(logical_id, physical_id);
    }

    /// Append one link per physical id, preserving the input order.
    pub fn add_links<I, S>(&mut self, logical_id: &str, physical_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.links.add_links(logical_id, physical_ids);
    }

    /// Remove one occurrence of the link, if present.
    pub fn remove_link(&mut self, logical_id: &str, physical_id: &str) -> bool {
        self.links.remove_link(logical_id, physical_id)
    }

    /// The physical divs directly linked to the logical div, ordered by the
    /// physical `order` attribute rather than link-insertion order.
    pub fn physical_divs_linked_to(&self, logical_id: &str) -> Vec<&Div> {
        let targets: HashSet<&str> = self.links.linked_to(logical_id).collect();
        let mut divs: Vec<&Div> = self
            .physical
            .root()
            .descendants()
            .filter(|div| targets.contains(div.id.as_str()))
            .collect();
        divs.sort_by_key(|div| div.order);
        divs
    }

    /// Link the logical div to every physical div any of its descendants is
    /// directly linked to.
    ///
    /// The union over all descendants is computed depth-first; physical divs
    /// the node is already linked to are skipped, a physical div reachable
    /// from two descendants is added once, and the descendants' own links are
    /// left untouched. Returns the number of links added.
    pub fn inherit_links_from_descendants(&mut self, logical_id: &str) -> Result<usize> {
        let node = self.logical.root().find(logical_id).ok_or(Error::ChildNotFound)?;

        let mut seen: HashSet<String> = self.links.linked_to(logical_id).map(String::from).collect();
        let mut to_add: Vec<String> = Vec::new();
        for descendant in node.descendants() {
            for target in self.links.linked_to(&descendant.id) {
                if seen.insert(target.to_string()) {
                    to_add.push(target.to_string());
                }
            }
        }

        let added = to_add.len();
        for target in to_add {
            self.links.add_link(logical_id, target);
        }
        debug!(logical_id, added, "inherited links from descendants");
        Ok(added)
    }

    /// Drop every link whose logical or physical side does not exist in its
    /// tree. Returns the number of links removed.
    ///
    /// Editing keeps the table consistent on its own; this is for documents
    /// built from external parts whose link table references unknown ids.
    pub fn prune_stale_links(&mut self) -> usize {
        let mut valid: HashSet<&str> = self.logical.root().iter().map(|div| div.id.as_str()).collect();
        valid.extend(self.physical.root().iter().map(|div| div.id.as_str()));

        let before = self.links.len();
        self.links
            .retain(|link| valid.contains(link.from.as_str()) && valid.contains(link.to.as_str()));
        before - self.links.len()
    }

    // ------------------------------------------------------------------
    // Metadata sections
    // ------------------------------------------------------------------

    /// The descriptive section at `index`.
    pub fn dmd_sec(&self, index: usize) -> Result<&MdSec> {
        self.dmd_secs.get(index).ok_or(Error::MdSecIndexNotFound(index))
    }

    /// The descriptive section with the given id.
    pub fn dmd_sec_by_id(&self, id: &str) -> Result<&MdSec> {
        self.dmd_secs
            .iter()
            .find(|sec| sec.id == id)
            .ok_or_else(|| Error::MdSecIdNotFound(id.to_string()))
    }

    /// The structured record of the descriptive section at `index`.
    ///
    /// Distinguishes a section with no payload at all
    /// ([`Error::MdSecWithoutData`]) from one whose payload is not of the
    /// structured kind ([`Error::MdSecWithoutRecords`]).
    pub fn record_of_dmd_sec(&self, index: usize) -> Result<&MetadataRecord> {
        let sec = self.dmd_sec(index)?;
        match &sec.data {
            None => Err(Error::MdSecWithoutData(index)),
            Some(MdWrap::Foreign(_)) => Err(Error::MdSecWithoutRecords(index)),
            Some(MdWrap::Records(record)) => Ok(record),
        }
    }

    /// The first structured record among the descriptive sections referenced
    /// by the logical div with `div_id`.
    pub fn first_record_of_logical_div(&self, div_id: &str) -> Result<&MetadataRecord> {
        let div = self.logical.root().find(div_id).ok_or(Error::ChildNotFound)?;
        for dmd_id in &div.dmd_ids {
            if let Some(sec) = self.dmd_secs.iter().find(|sec| &sec.id == dmd_id) {
                if let Some(MdWrap::Records(record)) = &sec.data {
                    return Ok(record);
                }
            }
        }
        Err(Error::DivWithoutMetadata(div.id.clone()))
    }

    /// Create a metadata section for the logical div with `div_id`.
    ///
    /// The domain decides the target collection: descriptive sections get the
    /// next `DMDLOG_` id and a `dmd_ids` reference on the div, administrative
    /// ones the next `AMD_` id and an `adm_ids` reference. Returns the new
    /// section id.
    pub fn add_metadata_section(&mut self, div_id: &str, domain: MdDomain, data: MdWrap) -> Result<String> {
        let kind = domain.target_section();
        let id = if kind.is_administrative() {
            ids::format_id(AMD_ID_PREFIX, self.amd_secs.len())
        } else {
            let numbered = self
                .dmd_secs
                .iter()
                .filter(|sec| sec.id != DMD_LOGICAL_ROOT_ID)
                .count();
            ids::format_id(DMD_ID_PREFIX, numbered)
        };

        let div = self
            .logical
            .root_mut()
            .find_mut(div_id)
            .ok_or(Error::ChildNotFound)?;
        if kind.is_administrative() {
            div.adm_ids.push(id.clone());
        } else {
            div.dmd_ids.push(id.clone());
        }

        let sec = MdSec {
            id: id.clone(),
            data: Some(data),
        };
        if kind.is_administrative() {
            self.amd_secs.push(AmdSec { kind, sec });
        } else {
            self.dmd_secs.push(sec);
        }
        debug!(div_id, section = %id, "created metadata section");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mdsec::MetadataEntry;

    #[test]
    fn new_document_has_minimal_shape() {
        let document = Document::new("Manuscript");

        assert_eq!(document.logical().root().div_type, "Manuscript");
        assert_eq!(document.logical().root().dmd_ids, [DMD_LOGICAL_ROOT_ID]);
        assert_eq!(document.dmd_secs().len(), 1);
        assert_eq!(document.dmd_secs()[0].id, DMD_LOGICAL_ROOT_ID);
        assert_eq!(document.physical().root().div_type, "PHYSICAL");
        assert!(document.links().is_empty());
        assert!(document.file_sec().is_empty());
    }

    #[test]
    fn from_parts_normalizes_missing_root_section() {
        let logical_root = Div::new("Monograph");
        let physical_root = Div::new("PHYSICAL");
        let document = Document::from_parts(DocumentParts::new(logical_root, physical_root));

        assert_eq!(document.dmd_secs()[0].id, DMD_LOGICAL_ROOT_ID);
        assert_eq!(document.logical().root().dmd_ids, [DMD_LOGICAL_ROOT_ID]);
    }

    #[test]
    fn from_parts_is_idempotent_on_normalized_input() {
        let first = Document::from_parts(DocumentParts::new(Div::new("Monograph"), Div::new("PHYSICAL")));

        let mut parts = DocumentParts::new(first.logical().root().clone(), first.physical().root().clone());
        parts.dmd_secs = first.dmd_secs().to_vec();
        let second = Document::from_parts(parts);

        assert_eq!(second.dmd_secs().len(), 1);
        assert_eq!(second.logical().root().dmd_ids, [DMD_LOGICAL_ROOT_ID]);
    }

    #[test]
    fn mdsec_lookup_errors_are_distinct() {
        let mut document = Document::new("TestType");
        let root_id = document.logical().root().id.clone();
        document
            .add_metadata_section(&root_id, MdDomain::Description, MdWrap::Foreign("<mods/>".into()))
            .unwrap();

        assert_eq!(document.dmd_sec(5).unwrap_err(), Error::MdSecIndexNotFound(5));
        assert_eq!(
            document.dmd_sec_by_id("DMDLOG_9999").unwrap_err(),
            Error::MdSecIdNotFound("DMDLOG_9999".to_string())
        );
        // Index 1 holds the foreign payload; a record is the wrong kind.
        assert_eq!(document.record_of_dmd_sec(1).unwrap_err(), Error::MdSecWithoutRecords(1));
    }

    #[test]
    fn record_of_dmd_sec_distinguishes_missing_data() {
        let mut document = Document::new("TestType");
        document.dmd_secs.push(MdSec::new("DMDLOG_0000"));
        assert_eq!(document.record_of_dmd_sec(1).unwrap_err(), Error::MdSecWithoutData(1));
    }

    #[test]
    fn first_record_of_logical_div_skips_foreign_sections() {
        let mut document = Document::new("TestType");
        let root_id = document.logical().root().id.clone();
        document.add_div(&root_id, "Chapter", Position::LastChild).unwrap();

        let chapter_id = document.logical().root().children[0].id.clone();
        document
            .add_metadata_section(&chapter_id, MdDomain::Description, MdWrap::Foreign("<mods/>".into()))
            .unwrap();
        assert_eq!(
            document.first_record_of_logical_div(&chapter_id).unwrap_err(),
            Error::DivWithoutMetadata(chapter_id.clone())
        );

        let record = MetadataRecord::new().with_entry(MetadataEntry::new("TitleDocMain", "A title"));
        document
            .add_metadata_section(&chapter_id, MdDomain::Description, MdWrap::Records(record.clone()))
            .unwrap();
        assert_eq!(document.first_record_of_logical_div(&chapter_id).unwrap(), &record);
    }

    #[test]
    fn metadata_sections_land_in_domain_target_collection() {
        let mut document = Document::new("TestType");
        let root_id = document.logical().root().id.clone();

        let dmd_id = document
            .add_metadata_section(&root_id, MdDomain::Description, MdWrap::Records(MetadataRecord::new()))
            .unwrap();
        let amd_id = document
            .add_metadata_section(&root_id, MdDomain::Rights, MdWrap::Foreign("<rights/>".into()))
            .unwrap();

        assert_eq!(dmd_id, "DMDLOG_0000");
        assert_eq!(amd_id, "AMD_0000");
        assert_eq!(document.amd_secs()[0].kind, SectionKind::RightsMd);
        assert!(document.logical().root().dmd_ids.contains(&dmd_id));
        assert_eq!(document.logical().root().adm_ids, [amd_id]);
    }

    #[test]
    fn prune_stale_links_drops_dangling_entries_of_read_documents() {
        let mut logical_root = Div::new("Monograph");
        logical_root.id = "LOG_0000".to_string();
        logical_root.add_child(Div::new("Chapter"));
        logical_root.children[0].id = "LOG_0001".to_string();
        let mut physical_root = Div::new("PHYSICAL");
        physical_root.add_child(Div::new("page"));
        physical_root.children[0].id = "PHYS_0001".to_string();

        let mut parts = DocumentParts::new(logical_root, physical_root);
        parts.links.add_link("LOG_0001", "PHYS_0001");
        parts.links.add_link("LOG_9999", "PHYS_0001");
        parts.links.add_link("LOG_0001", "PHYS_9999");

        let mut document = Document::from_parts(parts);
        assert_eq!(document.prune_stale_links(), 2);
        assert_eq!(document.links().len(), 1);
        assert!(document.links().contains("LOG_0001", "PHYS_0001"));
    }

    #[test]
    fn removing_a_div_purges_its_links_before_ids_recycle() {
        let mut document = Document::new("TestType");
        let root_id = document.logical().root().id.clone();
        document.add_div(&root_id, "Chapter", Position::LastChild).unwrap();
        document.add_div(&root_id, "Chapter", Position::LastChild).unwrap();
        document.add_link("LOG_0001", "PHYS_0001");

        document.remove_div("LOG_0001").unwrap();

        // The second chapter now holds the recycled id LOG_0001 and must not
        // pick up the removed div's link.
        assert_eq!(document.logical().root().children.len(), 1);
        assert_eq!(document.logical().root().children[0].id, "LOG_0001");
        assert!(document.links().is_empty());
    }
}
