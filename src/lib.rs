//! # metsedit
//!
//! An in-memory editing model for the structural and descriptive metadata of
//! digitized works, following the METS container layout: a logical structure
//! tree (work, chapter, sub-chapter), a physical structure sequence (pages,
//! tracks in scan order), and a struct-link table recording which physical
//! divisions realize which logical divisions.
//!
//! Reading and writing the serialized container format is left to external
//! collaborators; this crate only manipulates the in-memory collections.
//!
//! ## Quick Start
//!
//! ```
//! use metsedit::{Document, FileLocationType, MediaFile, Position};
//!
//! // A fresh container: logical root of the given type, empty physical
//! // sequence, empty link table.
//! let mut doc = Document::new("Manuscript");
//!
//! // Grow the logical hierarchy. Ids are renumbered after every edit.
//! let root = doc.logical().root().id.clone();
//! doc.add_div(&root, "Chapter", Position::LastChild).unwrap();
//! doc.add_div("LOG_0001", "SubChapter", Position::FirstChild).unwrap();
//!
//! // Ingest the scanned media in order.
//! doc.insert_media_files(&[
//!     MediaFile::new("images/00001.tif", FileLocationType::Url, "image/tiff"),
//!     MediaFile::new("images/00002.tif", FileLocationType::Url, "image/tiff"),
//! ]);
//!
//! // Record which pages realize which logical units.
//! doc.add_links("LOG_0002", ["PHYS_0001", "PHYS_0002"]);
//! let inherited = doc.inherit_links_from_descendants("LOG_0001").unwrap();
//! assert_eq!(inherited, 2);
//! ```
//!
//! ## Editing model
//!
//! The [`Document`] is a single-session, single-threaded structure: all
//! mutation goes through `&mut self`, and every operation either completes
//! fully (tree mutated, ids reassigned) or fails before any mutation is
//! visible. Errors are deterministic contract violations, see [`Error`].

pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    AmdSec, Div, Document, DocumentParts, FileLocationType, FileRecord, Header, IdRemap, LinkTable,
    LogicalTree, MdDomain, MdSec, MdWrap, MediaFile, MetadataEntry, MetadataGroup, MetadataRecord,
    Paginator, PhysicalSequence, Position, SectionKind, StructLink,
};
