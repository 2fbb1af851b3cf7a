//! Metadata sections and their payloads.
//!
//! A structure div references metadata sections by id. A section may hold a
//! structured record (named entries and nestable groups), an opaque payload
//! of some other kind, or no payload at all — the accessors on
//! [`crate::Document`] distinguish the three cases.

/// A single named metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataEntry {
    pub name: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named group of metadata entries. Groups nest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataGroup {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub metadata: Vec<MetadataEntry>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub groups: Vec<MetadataGroup>,
}

impl MetadataGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_entry(mut self, entry: MetadataEntry) -> Self {
        self.metadata.push(entry);
        self
    }

    pub fn with_group(mut self, group: MetadataGroup) -> Self {
        self.groups.push(group);
        self
    }
}

/// The structured payload of a metadata section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataRecord {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub metadata: Vec<MetadataEntry>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub groups: Vec<MetadataGroup>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: MetadataEntry) -> Self {
        self.metadata.push(entry);
        self
    }

    pub fn with_group(mut self, group: MetadataGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.groups.is_empty()
    }
}

/// The wrapped payload of a metadata section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MdWrap {
    /// A structured record this crate understands.
    Records(MetadataRecord),
    /// A payload of some other kind, carried opaquely (e.g. foreign markup).
    Foreign(String),
}

impl MdWrap {
    /// The structured record, if the payload is of that kind.
    pub fn records(&self) -> Option<&MetadataRecord> {
        match self {
            MdWrap::Records(record) => Some(record),
            MdWrap::Foreign(_) => None,
        }
    }
}

/// A metadata section: an id plus an optional wrapped payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MdSec {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub data: Option<MdWrap>,
}

impl MdSec {
    /// Create a section with no payload.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: None,
        }
    }

    pub fn with_records(mut self, record: MetadataRecord) -> Self {
        self.data = Some(MdWrap::Records(record));
        self
    }

    pub fn with_foreign(mut self, payload: impl Into<String>) -> Self {
        self.data = Some(MdWrap::Foreign(payload.into()));
        self
    }
}

/// Classification of a piece of metadata, deciding which section collection
/// of the container document stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MdDomain {
    /// Bibliographic description of the work.
    Description,
    /// Description of the source material.
    Source,
    /// Digitization provenance.
    DigitalProvenance,
    /// Rights and licensing.
    Rights,
    /// Technical properties of the digital object.
    Technical,
}

/// The section collections of the container document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionKind {
    DmdSec,
    SourceMd,
    DigiprovMd,
    RightsMd,
    TechMd,
}

impl MdDomain {
    /// The section collection that stores metadata of this domain.
    pub fn target_section(self) -> SectionKind {
        match self {
            MdDomain::Description => SectionKind::DmdSec,
            MdDomain::Source => SectionKind::SourceMd,
            MdDomain::DigitalProvenance => SectionKind::DigiprovMd,
            MdDomain::Rights => SectionKind::RightsMd,
            MdDomain::Technical => SectionKind::TechMd,
        }
    }
}

impl SectionKind {
    /// Whether sections of this kind live in the administrative collection
    /// rather than the descriptive one.
    pub fn is_administrative(self) -> bool {
        !matches!(self, SectionKind::DmdSec)
    }
}
