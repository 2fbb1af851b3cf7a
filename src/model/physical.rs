//! The physical structure sequence — scan/media order.
//!
//! The physical tree is flat in practice: a fixed `PHYSICAL` root with one
//! leaf div per media file, in scan order. It is built in one bulk pass from
//! an ordered media-file list; rebuilding replaces the previous sequence
//! entirely.

use tracing::debug;

use super::div::Div;
use super::ids::{self, FILE_ID_PREFIX, PHYSICAL_ID_PREFIX};

/// Type of the physical root div.
pub const PHYSICAL_ROOT_TYPE: &str = "PHYSICAL";
/// Order label of a leaf that has not been paginated manually yet.
pub const UNCOUNTED_ORDER_LABEL: &str = "uncounted";
/// Div type of image media.
pub const PAGE_DIV_TYPE: &str = "page";
/// Div type of audio and video media.
pub const TRACK_DIV_TYPE: &str = "track";

/// How a media file location is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileLocationType {
    Url,
    Path,
}

/// A media file handed over by the file-management collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaFile {
    pub file_path: String,
    pub location_type: FileLocationType,
    pub mime_type: String,
}

impl MediaFile {
    pub fn new(
        file_path: impl Into<String>,
        location_type: FileLocationType,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            location_type,
            mime_type: mime_type.into(),
        }
    }
}

/// A file-section record, referenced from a physical leaf div by id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileRecord {
    /// `FILE_<n>`, 1-based, parallel to the physical leaf ids.
    pub id: String,
    pub location: String,
    pub location_type: FileLocationType,
    pub mime_type: String,
}

/// The scan/media-order tree of a container document.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalSequence {
    root: Div,
    /// Div type used for MIME types outside `image/*`, `audio/*`, `video/*`.
    fallback_type: String,
}

impl PhysicalSequence {
    /// Create an empty sequence with the fixed `PHYSICAL` root.
    pub fn new() -> Self {
        let mut root = Div::new(PHYSICAL_ROOT_TYPE);
        root.id = ids::format_id(PHYSICAL_ID_PREFIX, 0);
        Self {
            root,
            fallback_type: PAGE_DIV_TYPE.to_string(),
        }
    }

    /// Wrap an externally read root div. Ids are kept as read.
    pub fn from_root(root: Div) -> Self {
        Self {
            root,
            fallback_type: PAGE_DIV_TYPE.to_string(),
        }
    }

    pub fn root(&self) -> &Div {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Div {
        &mut self.root
    }

    /// Configure the div type assigned to media whose MIME type is neither
    /// image, audio nor video.
    pub fn set_fallback_type(&mut self, div_type: impl Into<String>) {
        self.fallback_type = div_type.into();
    }

    /// Map a MIME type to the div type of its physical leaf.
    pub fn div_type_for_mime(&self, mime_type: &str) -> &str {
        if mime_type.starts_with("image/") {
            PAGE_DIV_TYPE
        } else if mime_type.starts_with("audio/") || mime_type.starts_with("video/") {
            TRACK_DIV_TYPE
        } else {
            &self.fallback_type
        }
    }

    /// Rebuild the sequence from an ordered media-file list.
    ///
    /// Replaces all children of the physical root: media file `i` (0-based)
    /// becomes one leaf div with `order = i + 1`, the `uncounted` order label,
    /// its div type derived from the MIME type, and a reference to the
    /// matching `FILE_` record. Leaf ids are assigned `PHYS_0001..`. Returns
    /// the file-section records, one per media file in input order.
    pub fn build(&mut self, media_files: &[MediaFile]) -> Vec<FileRecord> {
        self.root.children.clear();
        let mut records = Vec::with_capacity(media_files.len());

        for (i, media_file) in media_files.iter().enumerate() {
            let file_id = ids::format_id(FILE_ID_PREFIX, i + 1);
            let mut leaf = Div::new(self.div_type_for_mime(&media_file.mime_type))
                .with_order(i as u64 + 1)
                .with_order_label(UNCOUNTED_ORDER_LABEL);
            leaf.file_ids.push(file_id.clone());
            self.root.children.push(leaf);
            records.push(FileRecord {
                id: file_id,
                location: media_file.file_path.clone(),
                location_type: media_file.location_type,
                mime_type: media_file.mime_type.clone(),
            });
        }

        ids::assign_ids(&mut self.root, PHYSICAL_ID_PREFIX);
        debug!(media_files = records.len(), "rebuilt physical sequence");
        records
    }

    /// Assign pagination labels to the leaves from `start_order` on.
    ///
    /// Labels are drawn from the sequence in scan order, one per leaf whose
    /// `order` is at least `start_order`, until either side runs out. Returns
    /// the number of leaves relabeled.
    pub fn paginate<I>(&mut self, start_order: u64, labels: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut labels = labels.into_iter();
        let mut relabeled = 0;
        for leaf in &mut self.root.children {
            if leaf.order.is_none_or(|order| order < start_order) {
                continue;
            }
            let Some(label) = labels.next() else { break };
            leaf.order_label = Some(label);
            relabeled += 1;
        }
        debug!(start_order, relabeled, "assigned pagination labels");
        relabeled
    }
}

impl Default for PhysicalSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiffs(n: usize) -> Vec<MediaFile> {
        (1..=n)
            .map(|i| {
                MediaFile::new(
                    format!("images/{i:05}.tif"),
                    FileLocationType::Url,
                    "image/tiff",
                )
            })
            .collect()
    }

    #[test]
    fn build_assigns_order_label_type_and_ids() {
        let mut sequence = PhysicalSequence::new();
        let records = sequence.build(&tiffs(5));

        assert_eq!(sequence.root().div_type, PHYSICAL_ROOT_TYPE);
        assert_eq!(sequence.root().children.len(), 5);
        assert_eq!(records.len(), 5);

        for (i, leaf) in sequence.root().children.iter().enumerate() {
            assert_eq!(leaf.id, ids::format_id(PHYSICAL_ID_PREFIX, i + 1));
            assert_eq!(leaf.order, Some(i as u64 + 1));
            assert_eq!(leaf.order_label.as_deref(), Some(UNCOUNTED_ORDER_LABEL));
            assert_eq!(leaf.div_type, PAGE_DIV_TYPE);
            assert_eq!(leaf.file_ids, [ids::format_id(FILE_ID_PREFIX, i + 1)]);
        }
    }

    #[test]
    fn build_maps_mime_prefixes_to_div_types() {
        let mut sequence = PhysicalSequence::new();
        sequence.build(&[
            MediaFile::new("a.jpg", FileLocationType::Url, "image/jpeg"),
            MediaFile::new("b.mp3", FileLocationType::Url, "audio/mpeg"),
            MediaFile::new("c.mp4", FileLocationType::Url, "video/mp4"),
        ]);

        let types: Vec<&str> = sequence
            .root()
            .children
            .iter()
            .map(|leaf| leaf.div_type.as_str())
            .collect();
        assert_eq!(types, [PAGE_DIV_TYPE, TRACK_DIV_TYPE, TRACK_DIV_TYPE]);
    }

    #[test]
    fn fallback_type_is_configurable() {
        let mut sequence = PhysicalSequence::new();
        assert_eq!(sequence.div_type_for_mime("application/pdf"), PAGE_DIV_TYPE);

        sequence.set_fallback_type("other");
        sequence.build(&[MediaFile::new("x.pdf", FileLocationType::Url, "application/pdf")]);
        assert_eq!(sequence.root().children[0].div_type, "other");
    }

    #[test]
    fn paginate_relabels_from_start_order() {
        let mut sequence = PhysicalSequence::new();
        sequence.build(&tiffs(4));

        let relabeled = sequence.paginate(2, crate::model::Paginator::arabic(1));
        assert_eq!(relabeled, 3);

        let labels: Vec<&str> = sequence
            .root()
            .children
            .iter()
            .filter_map(|leaf| leaf.order_label.as_deref())
            .collect();
        assert_eq!(labels, [UNCOUNTED_ORDER_LABEL, "1", "2", "3"]);
    }

    #[test]
    fn paginate_stops_when_labels_run_out() {
        let mut sequence = PhysicalSequence::new();
        sequence.build(&tiffs(3));

        let relabeled = sequence.paginate(1, vec!["i".to_string(), "ii".to_string()]);
        assert_eq!(relabeled, 2);
        assert_eq!(
            sequence.root().children[2].order_label.as_deref(),
            Some(UNCOUNTED_ORDER_LABEL)
        );
    }

    #[test]
    fn rebuild_replaces_previous_sequence() {
        let mut sequence = PhysicalSequence::new();
        sequence.build(&tiffs(5));
        let records = sequence.build(&tiffs(2));

        assert_eq!(sequence.root().children.len(), 2);
        assert_eq!(records.len(), 2);
        assert_eq!(sequence.root().children[1].id, "PHYS_0002");
    }
}
