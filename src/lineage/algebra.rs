//! ID-based lineage path algebra.
//!
//! A person ID encodes their position in a strict lineage tree as a
//! sequence of birth-order integers: "1-1-4-6" is the 6th child of the
//! 4th child of the 1st child of the founder's 1st child. The
//! operations here parse IDs into generation paths, find the lowest
//! common ancestor of two IDs, and classify the kinship between them.
//! Every operation is a stateless pure function of its inputs; parse
//! failures propagate unchanged to the caller.

use std::collections::HashMap;

use crate::error::{KinshipError, Result};
use crate::types::{CommonAncestor, GenerationPath, Relationship, SEPARATOR};

/// Parse an identifier into its generation path.
///
/// If the string contains the separator it is split and each segment
/// parsed as a non-negative integer; otherwise every character is read
/// as one single-digit generation index. The form is picked by a single
/// structural check, so the compact form cannot express any index >= 10.
///
/// Empty segments (leading, trailing, or doubled separators) and
/// non-digit characters are parse errors, never silently skipped. The
/// empty string parses to the empty path.
pub fn parse_id(identifier: &str) -> Result<GenerationPath> {
    if identifier.is_empty() {
        return Ok(GenerationPath::default());
    }

    if identifier.contains(SEPARATOR) {
        parse_delimited(identifier)
    } else {
        parse_compact(identifier)
    }
}

fn parse_delimited(identifier: &str) -> Result<GenerationPath> {
    let mut indices = Vec::new();
    for (position, segment) in identifier.split(SEPARATOR).enumerate() {
        let index = segment
            .parse::<u32>()
            .map_err(|_| KinshipError::parse(identifier, segment, position))?;
        indices.push(index);
    }
    Ok(GenerationPath::new(indices))
}

fn parse_compact(identifier: &str) -> Result<GenerationPath> {
    let mut indices = Vec::new();
    for (position, ch) in identifier.chars().enumerate() {
        let digit = ch
            .to_digit(10)
            .ok_or_else(|| KinshipError::parse(identifier, ch.to_string(), position))?;
        indices.push(digit);
    }
    Ok(GenerationPath::new(indices))
}

/// Generation depth of an identifier. A founder's direct child has
/// depth 1; an identifier parsing to the empty path has depth 0.
pub fn generation_depth(identifier: &str) -> Result<usize> {
    Ok(parse_id(identifier)?.depth())
}

/// Lowest common ancestor of two identifiers.
///
/// Both paths are walked in lockstep from index 0 while the elements
/// match; the matched prefix is the result. A zero-length match on
/// non-empty inputs reports `Disjoint` rather than an ambiguous empty
/// path; `EmptyInput` marks the degenerate case of an empty path on
/// either side.
pub fn common_ancestor(id1: &str, id2: &str) -> Result<CommonAncestor> {
    let path1 = parse_id(id1)?;
    let path2 = parse_id(id2)?;

    if path1.is_empty() || path2.is_empty() {
        return Ok(CommonAncestor::EmptyInput);
    }

    let shared = path1.common_prefix(&path2);
    if shared.is_empty() {
        Ok(CommonAncestor::Disjoint)
    } else {
        Ok(CommonAncestor::Shared(shared))
    }
}

/// Total number of tree edges separating two individuals through their
/// nearest shared ancestor node.
pub fn relationship_distance(id1: &str, id2: &str) -> Result<usize> {
    let path1 = parse_id(id1)?;
    let path2 = parse_id(id2)?;
    let common_depth = path1.common_prefix(&path2).depth();
    Ok((path1.depth() - common_depth) + (path2.depth() - common_depth))
}

/// Classify the kinship between two identifiers.
///
/// Cousin level is the generational distance from the nearest shared
/// ancestor to the closer of the two; removal is the difference of the
/// two distances. A cousin level of 0 is either the same person or a
/// direct ancestor/descendant line.
pub fn classify(id1: &str, id2: &str) -> Result<Relationship> {
    let path1 = parse_id(id1)?;
    let path2 = parse_id(id2)?;
    let common_depth = path1.common_prefix(&path2).depth();

    let gen1 = path1.depth() - common_depth;
    let gen2 = path2.depth() - common_depth;
    let level = gen1.min(gen2);
    let removal = gen1.abs_diff(gen2);

    Ok(match (level, removal) {
        (0, 0) => Relationship::Same,
        (0, removal) => Relationship::DirectLine {
            generations: removal,
        },
        (level, removal) => Relationship::Cousin { level, removal },
    })
}

/// Birth order among siblings: the last element of the parsed path.
pub fn birth_order(identifier: &str) -> Result<u32> {
    parse_id(identifier)?
        .last()
        .ok_or_else(|| KinshipError::empty_path(identifier))
}

/// Spouse lookup in a caller-supplied affinity table. The table is an
/// opaque injected mapping; it is never owned or mutated here.
pub fn affinity_link<'a>(
    identifier: &str,
    spouse_links: &'a HashMap<String, String>,
) -> Option<&'a str> {
    spouse_links.get(identifier).map(String::as_str)
}

/// English ordinal form of `n`: 1st, 2nd, 3rd, 4th, ... with the
/// 11th/12th/13th exception.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimited() {
        let path = parse_id("1-1-4-6").unwrap();
        assert_eq!(path.indices(), &[1, 1, 4, 6]);
    }

    #[test]
    fn test_parse_compact_matches_delimited() {
        let compact = parse_id("1146821").unwrap();
        let delimited = parse_id("1-1-4-6-8-2-1").unwrap();
        assert_eq!(compact.indices(), &[1, 1, 4, 6, 8, 2, 1]);
        assert_eq!(compact, delimited);
    }

    #[test]
    fn test_parse_round_trip() {
        for id in ["1", "1-1-4-6", "0-3-12", "1-1-4-6-8-2-1"] {
            assert_eq!(parse_id(id).unwrap().to_string(), id);
        }
    }

    #[test]
    fn test_parse_multi_digit_segment() {
        let path = parse_id("1-12-3").unwrap();
        assert_eq!(path.indices(), &[1, 12, 3]);
    }

    #[test]
    fn test_parse_rejects_empty_segment() {
        let err = parse_id("1--4").unwrap_err();
        match err {
            KinshipError::Parse {
                segment, position, ..
            } => {
                assert_eq!(segment, "");
                assert_eq!(position, 1);
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
        assert!(parse_id("-1-4").is_err());
        assert!(parse_id("1-4-").is_err());
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        assert!(parse_id("1-a-4").is_err());
        assert!(parse_id("12x4").is_err());
    }

    #[test]
    fn test_parse_empty_string_is_empty_path() {
        assert!(parse_id("").unwrap().is_empty());
    }

    #[test]
    fn test_generation_depth() {
        assert_eq!(generation_depth("1-1-4-6-8-2-1").unwrap(), 7);
        assert_eq!(generation_depth("1").unwrap(), 1);
        assert_eq!(generation_depth("").unwrap(), 0);
    }

    #[test]
    fn test_common_ancestor_shared() {
        let ancestor = common_ancestor("1-1-4-6-8-2-1", "1-1-4").unwrap();
        assert_eq!(ancestor.path().unwrap().to_string(), "1-1-4");
        assert_eq!(ancestor.depth(), 3);
    }

    #[test]
    fn test_common_ancestor_self_is_full_path() {
        let ancestor = common_ancestor("1-1-4-6", "1-1-4-6").unwrap();
        assert_eq!(ancestor.path().unwrap(), &parse_id("1-1-4-6").unwrap());
    }

    #[test]
    fn test_common_ancestor_disjoint_vs_empty() {
        assert_eq!(common_ancestor("1-2", "2-2").unwrap(), CommonAncestor::Disjoint);
        assert_eq!(common_ancestor("", "1-2").unwrap(), CommonAncestor::EmptyInput);
        assert_eq!(common_ancestor("", "").unwrap(), CommonAncestor::EmptyInput);
    }

    #[test]
    fn test_distance_via_lca() {
        // common ancestor 1-1-4 at depth 3: (7-3) + (3-3) = 4
        assert_eq!(relationship_distance("1-1-4-6-8-2-1", "1-1-4").unwrap(), 4);
    }

    #[test]
    fn test_distance_symmetric() {
        let pairs = [("1-1-4-6", "1-1-5-3"), ("1-2", "2-2"), ("1", "1-1-4")];
        for (a, b) in pairs {
            assert_eq!(
                relationship_distance(a, b).unwrap(),
                relationship_distance(b, a).unwrap()
            );
        }
    }

    #[test]
    fn test_distance_zero_iff_identical() {
        assert_eq!(relationship_distance("1-1-4", "1-1-4").unwrap(), 0);
        assert_eq!(relationship_distance("114", "1-1-4").unwrap(), 0);
        assert_ne!(relationship_distance("1-1-4", "1-1-5").unwrap(), 0);
    }

    #[test]
    fn test_classify_same_person() {
        assert_eq!(classify("1-1-4-6", "1-1-4-6").unwrap(), Relationship::Same);
    }

    #[test]
    fn test_classify_direct_line() {
        // strict prefix: removal equals the length difference
        assert_eq!(
            classify("1-1-4-6-8-2-1", "1-1-4").unwrap(),
            Relationship::DirectLine { generations: 4 }
        );
        assert_eq!(
            classify("1-1-4", "1-1-4-6-8-2-1").unwrap(),
            Relationship::DirectLine { generations: 4 }
        );
    }

    #[test]
    fn test_classify_second_cousin() {
        // common ancestor "1-1", gen1 = gen2 = 2
        assert_eq!(
            classify("1-1-4-6", "1-1-5-3").unwrap(),
            Relationship::Cousin {
                level: 2,
                removal: 0
            }
        );
        assert_eq!(classify("1-1-4-6", "1-1-5-3").unwrap().to_string(), "2nd cousin");
    }

    #[test]
    fn test_classify_third_cousin() {
        // common ancestor "1", gen1 = gen2 = 3
        assert_eq!(
            classify("1-1-4-6", "1-3-1-7").unwrap(),
            Relationship::Cousin {
                level: 3,
                removal: 0
            }
        );
    }

    #[test]
    fn test_classify_cousin_removed() {
        // common ancestor "1-1", gen1 = 2, gen2 = 3
        assert_eq!(
            classify("1-1-4-6", "1-1-5-3-2").unwrap(),
            Relationship::Cousin {
                level: 2,
                removal: 1
            }
        );
    }

    #[test]
    fn test_classify_propagates_parse_error() {
        assert!(matches!(
            classify("1--4", "1-1").unwrap_err(),
            KinshipError::Parse { .. }
        ));
    }

    #[test]
    fn test_birth_order() {
        assert_eq!(birth_order("1-1-4-6-8-2-1").unwrap(), 1);
        assert_eq!(birth_order("1-1-4-6").unwrap(), 6);
        assert!(matches!(
            birth_order("").unwrap_err(),
            KinshipError::EmptyPath { .. }
        ));
    }

    #[test]
    fn test_affinity_link() {
        let mut spouse_links = HashMap::new();
        spouse_links.insert("1-1-4-6".to_string(), "1-1-5-3".to_string());

        assert_eq!(affinity_link("1-1-4-6", &spouse_links), Some("1-1-5-3"));
        assert_eq!(affinity_link("1-1-4", &spouse_links), None);
        // lookup never grows or mutates the table
        assert_eq!(spouse_links.len(), 1);
    }

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(23), "23rd");
        assert_eq!(ordinal(101), "101st");
    }

    #[test]
    fn test_ordinal_teens_exception() {
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(111), "111th");
        assert_eq!(ordinal(112), "112th");
        assert_eq!(ordinal(113), "113th");
    }
}
