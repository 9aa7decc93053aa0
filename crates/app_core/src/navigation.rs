//! Focus navigation for the full-size view

use app_fs::ImageEntry;
use serde::{Deserialize, Serialize};

/// Which sequence next/prev walks through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusDomain {
    /// The full sorted listing
    #[default]
    Grid,
    /// The pinned side-panel entries
    Pinned,
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// The entry shown full-size
///
/// The domain is fixed when focus is taken and kept until focus is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Focus {
    pub path: String,
    pub domain: FocusDomain,
}

impl Focus {
    pub fn new(path: impl Into<String>, domain: FocusDomain) -> Self {
        Self { path: path.into(), domain }
    }
}

/// Index after `current` in a ring of `len`
pub fn next_index(current: usize, len: usize) -> usize {
    (current + 1) % len
}

/// Index before `current` in a ring of `len`
pub fn prev_index(current: usize, len: usize) -> usize {
    (current + len - 1) % len
}

/// Neighbour of `focused` in `sequence`, wrapping at both ends
///
/// Returns `None` (no move) when the sequence has fewer than two entries or
/// the focused path is not part of it.
pub fn navigate<'a>(
    sequence: &'a [ImageEntry],
    focused: &str,
    direction: Direction,
) -> Option<&'a ImageEntry> {
    let len = sequence.len();
    if len <= 1 {
        return None;
    }

    let current = sequence.iter().position(|e| e.path == focused)?;
    let target = match direction {
        Direction::Next => next_index(current, len),
        Direction::Prev => prev_index(current, len),
    };

    sequence.get(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(n: usize) -> Vec<ImageEntry> {
        (0..n)
            .map(|i| ImageEntry::new(format!("/p/{}.png", i), i as i64))
            .collect()
    }

    #[test]
    fn test_index_arithmetic() {
        assert_eq!(next_index(0, 3), 1);
        assert_eq!(next_index(2, 3), 0);
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(prev_index(2, 3), 1);
    }

    #[test]
    fn test_wraps_both_ways() {
        let s = seq(3);
        assert_eq!(navigate(&s, &s[2].path, Direction::Next), Some(&s[0]));
        assert_eq!(navigate(&s, &s[0].path, Direction::Prev), Some(&s[2]));
        assert_eq!(navigate(&s, &s[1].path, Direction::Next), Some(&s[2]));
    }

    #[test]
    fn test_full_cycle_returns_home() {
        for len in 2..6 {
            let s = seq(len);
            let start = s[1 % len].path.clone();
            let mut current = start.clone();
            for _ in 0..len {
                current = navigate(&s, &current, Direction::Next).unwrap().path.clone();
            }
            assert_eq!(current, start);
        }
    }

    #[test]
    fn test_noop_cases() {
        let one = seq(1);
        assert_eq!(navigate(&one, &one[0].path, Direction::Next), None);
        assert_eq!(navigate(&[], "file:///p/0.png", Direction::Prev), None);

        let s = seq(4);
        assert_eq!(navigate(&s, "file:///p/gone.png", Direction::Next), None);
    }
}
