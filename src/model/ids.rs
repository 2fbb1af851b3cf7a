//! Deterministic identifier assignment for structure trees.
//!
//! After every structural mutation the whole tree is renumbered: a pre-order
//! depth-first walk visits every div except the root, a counter starts at 1,
//! and each visited div gets `<PREFIX>_<counter>` with the counter zero-padded
//! to four digits. Running the assignment twice without an intervening
//! mutation yields the identical id set.

use tracing::debug;

use super::div::Div;

/// Id prefix of logical tree divs (`LOG_0001`).
pub const LOGICAL_ID_PREFIX: &str = "LOG";
/// Id prefix of physical tree divs (`PHYS_0001`).
pub const PHYSICAL_ID_PREFIX: &str = "PHYS";
/// Id prefix of file-section records (`FILE_0001`).
pub const FILE_ID_PREFIX: &str = "FILE";
/// Id prefix of descriptive metadata sections (`DMDLOG_0000`).
pub const DMD_ID_PREFIX: &str = "DMDLOG";
/// Id prefix of administrative metadata sections (`AMD_0000`).
pub const AMD_ID_PREFIX: &str = "AMD";
/// Fixed id of the descriptive section attached to the logical root.
pub const DMD_LOGICAL_ROOT_ID: &str = "DMDLOG_ROOT";

/// Format an id from a prefix and a number, zero-padded to four digits.
pub fn format_id(prefix: &str, number: usize) -> String {
    format!("{prefix}_{number:04}")
}

/// Reassign the id of every div below `root` (the root keeps its id).
pub fn assign_ids(root: &mut Div, prefix: &str) {
    let mut counter = 1;
    for child in &mut root.children {
        assign_subtree(child, prefix, &mut counter);
    }
    debug!(prefix, assigned = counter - 1, "reassigned div ids");
}

fn assign_subtree(div: &mut Div, prefix: &str, counter: &mut usize) {
    div.id = format_id(prefix, *counter);
    *counter += 1;
    for child in &mut div.children {
        assign_subtree(child, prefix, counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter() -> Div {
        Div::new("Chapter")
    }

    #[test]
    fn format_id_zero_pads_to_four_digits() {
        assert_eq!(format_id(LOGICAL_ID_PREFIX, 7), "LOG_0007");
        assert_eq!(format_id(PHYSICAL_ID_PREFIX, 2), "PHYS_0002");
        assert_eq!(format_id(FILE_ID_PREFIX, 12345), "FILE_12345");
    }

    #[test]
    fn assignment_is_preorder_and_skips_root() {
        let mut root = Div::new("Book");
        root.id = "LOG_0000".to_string();
        let mut first = chapter();
        first.add_child(chapter());
        first.add_child(chapter());
        root.add_child(first);
        root.add_child(chapter());

        assign_ids(&mut root, LOGICAL_ID_PREFIX);

        assert_eq!(root.id, "LOG_0000");
        assert_eq!(root.children[0].id, "LOG_0001");
        assert_eq!(root.children[0].children[0].id, "LOG_0002");
        assert_eq!(root.children[0].children[1].id, "LOG_0003");
        assert_eq!(root.children[1].id, "LOG_0004");
    }

    #[test]
    fn assignment_is_idempotent() {
        let mut root = Div::new("Book");
        let mut sub = chapter();
        sub.add_child(chapter());
        root.add_child(sub);
        root.add_child(chapter());

        assign_ids(&mut root, LOGICAL_ID_PREFIX);
        let first_pass: Vec<String> = root.iter().map(|d| d.id.clone()).collect();
        assign_ids(&mut root, LOGICAL_ID_PREFIX);
        let second_pass: Vec<String> = root.iter().map(|d| d.id.clone()).collect();

        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn assignment_forms_contiguous_id_set() {
        let mut root = Div::new("Book");
        for _ in 0..3 {
            let mut child = chapter();
            child.add_child(chapter());
            root.add_child(child);
        }

        assign_ids(&mut root, LOGICAL_ID_PREFIX);

        let expected: Vec<String> = (1..=6).map(|n| format_id(LOGICAL_ID_PREFIX, n)).collect();
        let mut actual: Vec<String> = root.descendants().map(|d| d.id.clone()).collect();
        actual.sort();
        assert_eq!(actual, expected);
    }
}
