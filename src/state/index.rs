//! Tag index derived from the catalog
//!
//! Built once at load: the sorted set of distinct tags plus an A–Z bucket
//! view used by the letter filter.

use std::collections::BTreeSet;
use std::fmt;

use super::data::ProjectRecord;

/// A letter of the A–Z filter strip (always uppercase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Initial(u8);

impl Initial {
    /// Accepts an ASCII letter of either case
    pub fn new(letter: char) -> Option<Self> {
        if letter.is_ascii_alphabetic() {
            Some(Initial(letter.to_ascii_uppercase() as u8))
        } else {
            None
        }
    }

    /// The initial a tag is filed under, if any
    pub fn of(tag: &str) -> Option<Self> {
        tag.chars().next().and_then(Initial::new)
    }

    pub fn all() -> impl Iterator<Item = Initial> {
        (b'A'..=b'Z').map(Initial)
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    fn slot(self) -> usize {
        (self.0 - b'A') as usize
    }
}

impl fmt::Display for Initial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Distinct tags across the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagIndex {
    /// Case-sensitive, sorted ascending
    all_tags: Vec<String>,
    /// One bucket per letter, each a sorted subsequence of `all_tags`
    by_initial: [Vec<String>; 26],
}

impl TagIndex {
    pub fn build(projects: &[ProjectRecord]) -> Self {
        let distinct: BTreeSet<&str> = projects
            .iter()
            .flat_map(|p| p.techs.iter().map(String::as_str))
            .collect();

        let mut index = TagIndex::default();
        for tag in distinct {
            // Tags that do not start with a letter stay out of every bucket.
            if let Some(initial) = Initial::of(tag) {
                index.by_initial[initial.slot()].push(tag.to_string());
            }
            index.all_tags.push(tag.to_string());
        }
        index
    }

    pub fn all_tags(&self) -> &[String] {
        &self.all_tags
    }

    pub fn tags_for(&self, initial: Initial) -> &[String] {
        &self.by_initial[initial.slot()]
    }

    /// Whether any tag is filed under `initial`
    pub fn has_tags(&self, initial: Initial) -> bool {
        !self.tags_for(initial).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.all_tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn project(id: u32, techs: &[&str]) -> ProjectRecord {
        ProjectRecord {
            id,
            name: format!("Project {id}"),
            description: String::new(),
            techs: techs.iter().map(|t| t.to_string()).collect(),
            repo_url: format!("https://example.com/{id}"),
            image: String::new(),
            is_live: false,
            live_url: None,
            featured: false,
        }
    }

    #[test]
    fn test_empty_catalog_yields_empty_index() {
        let index = TagIndex::build(&[]);
        assert!(index.is_empty());
        assert!(Initial::all().all(|i| !index.has_tags(i)));
    }

    #[test]
    fn test_tags_are_distinct_and_sorted() {
        let index = TagIndex::build(&[
            project(1, &["Python", "Flask", "NumPy"]),
            project(2, &["NumPy", "C", "Python"]),
        ]);
        assert_eq!(index.all_tags(), ["C", "Flask", "NumPy", "Python"]);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let index = TagIndex::build(&[project(1, &["scikit-learn", "Scikit-learn"])]);
        assert_eq!(index.all_tags(), ["Scikit-learn", "scikit-learn"]);

        let s = Initial::new('s').unwrap();
        assert_eq!(index.tags_for(s), ["Scikit-learn", "scikit-learn"]);
    }

    #[test]
    fn test_non_letter_tags_are_not_bucketed() {
        let index = TagIndex::build(&[project(1, &["/proc filesystem", "3D", "C"])]);
        assert_eq!(index.all_tags().len(), 3);

        let bucketed: usize = Initial::all().map(|i| index.tags_for(i).len()).sum();
        assert_eq!(bucketed, 1);
    }

    #[test]
    fn test_initial_accepts_letters_only() {
        assert_eq!(Initial::new('z').map(Initial::as_char), Some('Z'));
        assert_eq!(Initial::new('1'), None);
        assert_eq!(Initial::new('É'), None);
        assert_eq!(Initial::all().count(), 26);
    }

    #[test]
    fn test_embedded_catalog_has_empty_letters() {
        let catalog = crate::state::catalog::Catalog::embedded().unwrap();
        let index = TagIndex::build(catalog.projects());
        assert!(!index.has_tags(Initial::new('K').unwrap()));
        assert!(index.has_tags(Initial::new('Z').unwrap()));
        assert!(index.all_tags().iter().any(|t| t == "/proc filesystem"));
    }

    proptest! {
        #[test]
        fn every_tag_sits_in_exactly_its_own_bucket(
            tags in proptest::collection::vec("[A-Za-z0-9/ ][a-z ]{0,6}", 0..24)
        ) {
            let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let index = TagIndex::build(&[project(1, &refs)]);

            for tag in index.all_tags() {
                let homes: Vec<Initial> = Initial::all()
                    .filter(|i| index.tags_for(*i).contains(tag))
                    .collect();
                match Initial::of(tag) {
                    Some(initial) => prop_assert_eq!(homes, vec![initial]),
                    None => prop_assert!(homes.is_empty()),
                }
            }
        }

        #[test]
        fn buckets_are_sorted_subsequences(
            tags in proptest::collection::vec("[A-Za-z][a-zA-Z]{0,5}", 0..24)
        ) {
            let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let index = TagIndex::build(&[project(1, &refs)]);

            prop_assert!(index.all_tags().windows(2).all(|w| w[0] < w[1]));
            for initial in Initial::all() {
                let bucket = index.tags_for(initial);
                prop_assert!(bucket.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
