//! Pagination label sequences for the physical structure.
//!
//! Media ingest labels every physical leaf `uncounted`; real pagination is
//! assigned afterwards from a label sequence. A [`Paginator`] renders a label
//! template (text and counter fragments) at a running counter value: arabic
//! or roman page counts, free text before and after the counter, square
//! brackets around counts not printed in the original ("fictitious"
//! pagination), and a configurable increment for column counting.

use super::physical::UNCOUNTED_ORDER_LABEL;

/// One building block of a pagination label.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Fragment {
    /// Literal text reproduced in every label.
    Text(String),
    /// Arabic page counter.
    Arabic,
    /// Roman-numeral page counter.
    Roman { uppercase: bool },
}

/// Infinite generator of pagination labels.
///
/// Each call to [`Iterator::next`] renders the template at the current
/// counter value and advances the counter by the increment.
///
/// ```
/// use metsedit::Paginator;
///
/// let labels: Vec<String> = Paginator::roman(5).take(3).collect();
/// assert_eq!(labels, ["V", "VI", "VII"]);
///
/// let mut folios = Paginator::arabic(1).with_suffix("r").fictitious();
/// assert_eq!(folios.next().as_deref(), Some("[1r]"));
/// ```
#[derive(Debug, Clone)]
pub struct Paginator {
    fragments: Vec<Fragment>,
    value: u64,
    increment: u64,
    fictitious: bool,
}

impl Paginator {
    /// Arabic page count starting at `start`: `1`, `2`, `3`, …
    pub fn arabic(start: u64) -> Self {
        Self::counting(Fragment::Arabic, start)
    }

    /// Uppercase roman page count starting at `start`: `I`, `II`, `III`, …
    pub fn roman(start: u64) -> Self {
        Self::counting(Fragment::Roman { uppercase: true }, start)
    }

    /// Lowercase roman page count starting at `start`: `i`, `ii`, `iii`, …
    pub fn roman_lower(start: u64) -> Self {
        Self::counting(Fragment::Roman { uppercase: false }, start)
    }

    /// The same free-text label for every page.
    pub fn freetext(text: impl Into<String>) -> Self {
        Self {
            fragments: vec![Fragment::Text(text.into())],
            value: 0,
            increment: 0,
            fictitious: false,
        }
    }

    /// The `uncounted` label media ingest starts every leaf with.
    pub fn uncounted() -> Self {
        Self::freetext(UNCOUNTED_ORDER_LABEL)
    }

    fn counting(counter: Fragment, start: u64) -> Self {
        Self {
            fragments: vec![counter],
            value: start,
            increment: 1,
            fictitious: false,
        }
    }

    /// Prepend literal text to every label, e.g. `Fol. ` for foliation.
    pub fn with_prefix(mut self, text: impl Into<String>) -> Self {
        self.fragments.insert(0, Fragment::Text(text.into()));
        self
    }

    /// Append literal text to every label, e.g. `r` for recto folios.
    pub fn with_suffix(mut self, text: impl Into<String>) -> Self {
        self.fragments.push(Fragment::Text(text.into()));
        self
    }

    /// Advance the counter by `increment` per label instead of one. Column
    /// counting uses two, a label per sheet of a two-column layout.
    pub fn with_increment(mut self, increment: u64) -> Self {
        self.increment = increment;
        self
    }

    /// Wrap every label in square brackets, marking a count that is not
    /// printed in the original.
    pub fn fictitious(mut self) -> Self {
        self.fictitious = true;
        self
    }

    fn render(&self) -> String {
        let mut label = String::new();
        if self.fictitious {
            label.push('[');
        }
        for fragment in &self.fragments {
            match fragment {
                Fragment::Text(text) => label.push_str(text),
                Fragment::Arabic => label.push_str(&self.value.to_string()),
                Fragment::Roman { uppercase: true } => label.push_str(&to_roman(self.value)),
                Fragment::Roman { uppercase: false } => {
                    label.push_str(&to_roman(self.value).to_lowercase());
                }
            }
        }
        if self.fictitious {
            label.push(']');
        }
        label
    }
}

impl Iterator for Paginator {
    type Item = String;

    /// Never `None`; there is always a next page number.
    fn next(&mut self) -> Option<String> {
        let label = self.render();
        self.value = self.value.saturating_add(self.increment);
        Some(label)
    }
}

const ROMAN_NUMERALS: [(u64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Uppercase roman numeral of `n`. Zero renders empty.
fn to_roman(mut n: u64) -> String {
    let mut out = String::new();
    for (value, numeral) in ROMAN_NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(paginator: Paginator, n: usize) -> Vec<String> {
        paginator.take(n).collect()
    }

    #[test]
    fn arabic_counts_from_start() {
        assert_eq!(labels(Paginator::arabic(1), 3), ["1", "2", "3"]);
        assert_eq!(labels(Paginator::arabic(67), 2), ["67", "68"]);
    }

    #[test]
    fn roman_counts_in_both_cases() {
        assert_eq!(labels(Paginator::roman(6), 2), ["VI", "VII"]);
        assert_eq!(labels(Paginator::roman_lower(7), 1), ["vii"]);
    }

    #[test]
    fn roman_numerals_use_subtractive_notation() {
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(48), "XLVIII");
        assert_eq!(to_roman(1994), "MCMXCIV");
    }

    #[test]
    fn fictitious_labels_are_bracketed() {
        assert_eq!(labels(Paginator::arabic(55).fictitious(), 1), ["[55]"]);
        assert_eq!(labels(Paginator::roman(48).fictitious(), 1), ["[XLVIII]"]);
    }

    #[test]
    fn increment_supports_column_counting() {
        assert_eq!(labels(Paginator::arabic(1).with_increment(2), 3), ["1", "3", "5"]);
    }

    #[test]
    fn prefix_and_suffix_wrap_the_counter() {
        let foliation = Paginator::arabic(12).with_prefix("Fol. ").with_suffix("r");
        assert_eq!(labels(foliation, 2), ["Fol. 12r", "Fol. 13r"]);
    }

    #[test]
    fn freetext_repeats_verbatim() {
        assert_eq!(labels(Paginator::uncounted(), 2), ["uncounted", "uncounted"]);
        assert_eq!(labels(Paginator::freetext("Plate").fictitious(), 1), ["[Plate]"]);
    }
}
