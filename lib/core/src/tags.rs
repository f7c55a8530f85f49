//! Tag decomposition
//!
//! Each collection's tags are aggregated into one `,`-joined string of
//! `value-type` compounds (see [`Tag::compound`]). Decomposition splits that
//! string back into the tag types and specific values the encoders consume.
//!
//! Compounds that do not split into exactly two parts on `-` are dropped
//! silently. Either part may be empty: `-cat1` yields an empty value under
//! type `cat1`. A label that itself contains `-` therefore never reaches
//! the encoders.

use crate::catalog::Catalog;
use crate::model::{CollectionTag, Tag, TagId};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TOKEN_DELIMITER: &str = ",";
pub const COMPONENT_DELIMITER: char = '-';

/// Tag types and specific values present on one collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagComponents {
    pub tag_types: Vec<String>,
    pub specific_values: Vec<String>,
}

impl TagComponents {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tag_types.is_empty()
    }
}

/// Split one compound token into `(specific_value, tag_type)`
pub fn parse_token(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split(COMPONENT_DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(value), Some(tag_type), None) => Some((value, tag_type)),
        _ => None,
    }
}

/// Decompose an aggregated tag string
pub fn decompose(raw: &str) -> TagComponents {
    let mut components = TagComponents::default();
    for token in raw.split(TOKEN_DELIMITER).map(str::trim).filter(|t| !t.is_empty()) {
        match parse_token(token) {
            Some((value, tag_type)) => {
                components.tag_types.push(tag_type.to_string());
                components.specific_values.push(value.to_string());
            }
            None => debug!(token, "dropping malformed tag token"),
        }
    }
    components
}

/// Build the aggregated tag string for every catalog row.
///
/// Links to unknown tags or to collections outside the catalog are dropped.
/// Rows without tags get an empty string.
pub fn aggregate_tag_strings(
    catalog: &Catalog,
    links: &[CollectionTag],
    tags: &[Tag],
) -> Vec<String> {
    let compounds: AHashMap<TagId, String> = tags.iter().map(|t| (t.id, t.compound())).collect();
    let mut per_row: Vec<Vec<&str>> = vec![Vec::new(); catalog.len()];
    let mut dropped = 0usize;

    for link in links {
        match (catalog.index_of(link.collection_id), compounds.get(&link.tag_id)) {
            (Some(row), Some(compound)) => per_row[row].push(compound.as_str()),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, "collection-tag links without an active collection or known tag");
    }

    per_row
        .into_iter()
        .map(|tokens| tokens.join(TOKEN_DELIMITER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Collection;

    #[test]
    fn test_parse_token() {
        assert_eq!(parse_token("x-cat1"), Some(("x", "cat1")));
        assert_eq!(parse_token("abc"), None);
        assert_eq!(parse_token("a-b-c"), None);
        assert_eq!(parse_token("-cat1"), Some(("", "cat1")));
        assert_eq!(parse_token("x-"), Some(("x", "")));
        assert_eq!(parse_token("-"), Some(("", "")));
    }

    #[test]
    fn test_empty_parts_are_kept() {
        let c = decompose("-cat1,x-");
        assert_eq!(c.tag_types, vec!["cat1", ""]);
        assert_eq!(c.specific_values, vec!["", "x"]);
    }

    #[test]
    fn test_decompose_keeps_order_and_case() {
        let c = decompose("Running-Cardio, yoga-Mind");
        assert_eq!(c.tag_types, vec!["Cardio", "Mind"]);
        assert_eq!(c.specific_values, vec!["Running", "yoga"]);
    }

    #[test]
    fn test_malformed_tokens_do_not_affect_valid_ones() {
        let c = decompose("abc,x-cat1,a-b-c");
        assert_eq!(c.tag_types, vec!["cat1"]);
        assert_eq!(c.specific_values, vec!["x"]);
    }

    #[test]
    fn test_empty_input_yields_empty_lists() {
        let c = decompose("");
        assert!(c.is_empty());
        assert!(c.specific_values.is_empty());
        assert!(decompose(" , ,").is_empty());
    }

    #[test]
    fn test_aggregate_tag_strings() {
        let catalog = Catalog::build(&[
            Collection::new(10, "a", "quiz", 1),
            Collection::new(20, "b", "quiz", 1),
        ])
        .unwrap();
        let tags = vec![Tag::new(1, "deep breath", "mind"), Tag::new(2, "run", "body")];
        let links = vec![
            CollectionTag { collection_id: 10, tag_id: 1 },
            CollectionTag { collection_id: 10, tag_id: 2 },
            CollectionTag { collection_id: 99, tag_id: 1 },
            CollectionTag { collection_id: 20, tag_id: 42 },
        ];

        let strings = aggregate_tag_strings(&catalog, &links, &tags);
        assert_eq!(strings, vec!["deep_breath-mind,run-body".to_string(), String::new()]);
    }
}
