//! Core data model for container documents.
//!
//! This module contains:
//! - Structure divisions and tree traversal
//! - Deterministic id assignment
//! - The logical tree and its edit operations
//! - The physical sequence, media-file ingest and pagination labels
//! - The struct-link table
//! - Metadata sections and payloads
//! - The container document orchestrating all of the above

mod div;
mod document;
pub mod ids;
mod links;
mod logical;
mod mdsec;
mod pagination;
mod physical;

// Re-export structure types
pub use div::{DfsIter, Div};

// Re-export id assignment
pub use ids::{
    AMD_ID_PREFIX, DMD_ID_PREFIX, DMD_LOGICAL_ROOT_ID, FILE_ID_PREFIX, LOGICAL_ID_PREFIX,
    PHYSICAL_ID_PREFIX, assign_ids, format_id,
};

// Re-export the logical tree and edit positions
pub use logical::{IdRemap, LogicalTree, Position};

// Re-export the physical sequence and media types
pub use physical::{
    FileLocationType, FileRecord, MediaFile, PAGE_DIV_TYPE, PHYSICAL_ROOT_TYPE, PhysicalSequence,
    TRACK_DIV_TYPE, UNCOUNTED_ORDER_LABEL,
};

// Re-export the pagination label generator
pub use pagination::Paginator;

// Re-export the link table
pub use links::{LinkTable, StructLink};

// Re-export metadata sections
pub use mdsec::{
    MdDomain, MdSec, MdWrap, MetadataEntry, MetadataGroup, MetadataRecord, SectionKind,
};

// Re-export the container document
pub use document::{AmdSec, Document, DocumentParts, Header};
