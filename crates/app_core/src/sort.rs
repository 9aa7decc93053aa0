//! Listing order for image collections

use app_fs::ImageEntry;
use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "lastModified")]
    LastModified,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// How the grid is ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub by: SortBy,
    pub direction: SortDirection,
    /// Compare digit runs numerically ("img2" < "img10")
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub natural: bool,
}

impl SortConfig {
    pub fn new(by: SortBy, direction: SortDirection) -> Self {
        Self { by, direction, natural: false }
    }

    pub fn with_natural(mut self, natural: bool) -> Self {
        self.natural = natural;
        self
    }

    /// Compare two entries under this configuration
    pub fn compare(&self, a: &ImageEntry, b: &ImageEntry) -> Ordering {
        let cmp = match self.by {
            SortBy::Name if self.natural => natural_sort_key(&a.name).cmp(&natural_sort_key(&b.name)),
            SortBy::Name => compare_names(&a.name, &b.name),
            SortBy::LastModified => a.last_modified.cmp(&b.last_modified),
        };

        match self.direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    }
}

/// Return a sorted copy of `entries`
///
/// The sort is stable: entries that compare equal keep their input order.
pub fn sort_images(entries: &[ImageEntry], config: SortConfig) -> Vec<ImageEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| config.compare(a, b));
    sorted
}

thread_local! {
    static COLLATOR: Option<Collator> =
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!("Collator unavailable, names sort by code point: {}", e);
                None
            }
        };
}

/// Locale-aware name comparison (Unicode root collation)
///
/// Punctuation sorts before digits and letters, accents and kana compare by
/// their base letter, and lower case sorts before upper case on a tie.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}

/// Generate a natural sort key (handles numbers correctly)
/// "image2.jpg" < "image10.jpg"
fn natural_sort_key(s: &str) -> Vec<NaturalSortPart> {
    let mut parts = Vec::new();
    let mut current_num = String::new();
    let mut current_str = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            if !current_str.is_empty() {
                parts.push(NaturalSortPart::Str(current_str.to_lowercase()));
                current_str.clear();
            }
            current_num.push(c);
        } else {
            if !current_num.is_empty() {
                parts.push(NaturalSortPart::num(&current_num));
                current_num.clear();
            }
            current_str.push(c);
        }
    }

    if !current_num.is_empty() {
        parts.push(NaturalSortPart::num(&current_num));
    }
    if !current_str.is_empty() {
        parts.push(NaturalSortPart::Str(current_str.to_lowercase()));
    }

    parts
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalSortPart {
    Num(u64),
    Str(String),
}

impl NaturalSortPart {
    // Digit runs too long for u64 fall back to text comparison
    fn num(digits: &str) -> Self {
        digits
            .parse::<u64>()
            .map(NaturalSortPart::Num)
            .unwrap_or_else(|_| NaturalSortPart::Str(digits.to_string()))
    }
}
