//! Flattening of the region tree into an indented listing.
//!
//! The walk is pre-order and depth-first: a node's own entry comes before
//! any of its descendants, and siblings keep their document order. Depth
//! counts tree levels below the root, so a node without a path still pushes
//! its children one level deeper even though it lists nothing itself.
//!
//! An explicit stack drives the walk, so deep catalogs do not grow the call
//! stack.

use std::fmt;

use serde::Serialize;

use crate::features::regions::models::{RegionIndex, RegionNode};
use crate::shared::constants::{INDENT_UNIT, RECORD_MARKER};

/// One listing entry: a region path and its depth below the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlattenedRecord<'a> {
    pub depth: usize,
    pub path: &'a str,
}

impl fmt::Display for FlattenedRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str(INDENT_UNIT)?;
        }
        write!(f, "{}{}", RECORD_MARKER, self.path)
    }
}

/// Lazy pre-order iterator over the listed nodes of a region tree
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    stack: Vec<(usize, &'a RegionNode)>,
}

impl<'a> Flatten<'a> {
    fn new(top_level: &'a [RegionNode]) -> Self {
        Self {
            stack: top_level.iter().rev().map(|node| (0, node)).collect(),
        }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = FlattenedRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, node)) = self.stack.pop() {
            self.stack
                .extend(node.subregions.iter().rev().map(|child| (depth + 1, child)));

            if let Some(path) = node.listed_path() {
                return Some(FlattenedRecord { depth, path });
            }
        }
        None
    }
}

/// Walk the index, yielding one record per node with a non-empty path.
///
/// The index is only borrowed; calling this again yields the same sequence.
pub fn flatten(index: &RegionIndex) -> Flatten<'_> {
    Flatten::new(&index.subregions)
}

/// Canonical text form: one line per record, each terminated by a newline
pub fn render_text<'a>(records: impl IntoIterator<Item = FlattenedRecord<'a>>) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(depth: usize, path: &str) -> FlattenedRecord<'_> {
        FlattenedRecord { depth, path }
    }

    fn sample_index() -> RegionIndex {
        RegionIndex::new(vec![
            RegionNode::new("europe").with_subregions(vec![
                RegionNode::new("europe/albania"),
                RegionNode::new("europe/germany").with_subregions(vec![
                    RegionNode::new("europe/germany/bayern"),
                    RegionNode::new("europe/germany/berlin"),
                ]),
            ]),
            RegionNode::group(vec![RegionNode::new("asia/japan")]),
            RegionNode::new("antarctica"),
        ])
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let index = RegionIndex::default();
        assert_eq!(flatten(&index).count(), 0);
        assert_eq!(render_text(flatten(&index)), "");
    }

    #[test]
    fn test_continent_with_country() {
        let index = RegionIndex::new(vec![
            RegionNode::new("europe").with_subregions(vec![RegionNode::new("europe/albania")])
        ]);

        let records: Vec<_> = flatten(&index).collect();
        assert_eq!(records, vec![record(0, "europe"), record(1, "europe/albania")]);
        assert_eq!(render_text(records), "- europe\n  - europe/albania\n");
    }

    #[test]
    fn test_pathless_node_still_deepens_children() {
        let index = RegionIndex::new(vec![RegionNode::group(vec![
            RegionNode::new("a"),
            RegionNode::new("b"),
        ])]);

        let records: Vec<_> = flatten(&index).collect();
        assert_eq!(records, vec![record(1, "a"), record(1, "b")]);
    }

    #[test]
    fn test_empty_path_counts_as_absent() {
        let index = RegionIndex::new(vec![
            RegionNode::new("").with_subregions(vec![RegionNode::new("a")])
        ]);

        let records: Vec<_> = flatten(&index).collect();
        assert_eq!(records, vec![record(1, "a")]);
    }

    #[test]
    fn test_three_levels_in_document_order() {
        let index = RegionIndex::new(vec![RegionNode::new("north-america").with_subregions(
            vec![RegionNode::new("north-america/us")
                .with_subregions(vec![RegionNode::new("north-america/us/california")])],
        )]);

        let records: Vec<_> = flatten(&index).collect();
        assert_eq!(
            records,
            vec![
                record(0, "north-america"),
                record(1, "north-america/us"),
                record(2, "north-america/us/california"),
            ]
        );
        assert_eq!(records[2].to_string(), "    - north-america/us/california");
    }

    #[test]
    fn test_preorder_with_sibling_order() {
        let index = sample_index();
        let paths: Vec<&str> = flatten(&index).map(|r| r.path).collect();

        assert_eq!(
            paths,
            vec![
                "europe",
                "europe/albania",
                "europe/germany",
                "europe/germany/bayern",
                "europe/germany/berlin",
                "asia/japan",
                "antarctica",
            ]
        );
    }

    #[test]
    fn test_depth_is_tree_level() {
        let index = sample_index();
        let depths: Vec<(usize, &str)> = flatten(&index).map(|r| (r.depth, r.path)).collect();

        assert!(depths.contains(&(2, "europe/germany/bayern")));
        assert!(depths.contains(&(1, "asia/japan")));
        assert!(depths.contains(&(0, "antarctica")));
    }

    #[test]
    fn test_repeat_walks_are_identical() {
        let index = sample_index();
        let first = render_text(flatten(&index));
        let second = render_text(flatten(&index));

        assert_eq!(first, second);
        assert_eq!(first.lines().count(), 7);
    }

    #[test]
    fn test_iterator_is_lazy() {
        let index = sample_index();
        let mut walk = flatten(&index);

        assert_eq!(walk.next(), Some(record(0, "europe")));
        assert_eq!(walk.next(), Some(record(1, "europe/albania")));
        // A fresh walk starts over regardless of an unfinished one
        assert_eq!(flatten(&index).next(), Some(record(0, "europe")));
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let depth = 50_000;
        let mut node = RegionNode::new(format!("level-{}", depth - 1));
        for level in (0..depth - 1).rev() {
            node = RegionNode::new(format!("level-{}", level)).with_subregions(vec![node]);
        }
        let index = RegionIndex::new(vec![node]);

        let records: Vec<_> = flatten(&index).collect();
        assert_eq!(records.len(), depth);
        assert_eq!(records.last().map(|r| r.depth), Some(depth - 1));
    }

    #[test]
    fn test_records_serialize_as_pairs() {
        let json = serde_json::to_string(&record(2, "europe/germany/bayern")).unwrap();
        assert_eq!(json, r#"{"depth":2,"path":"europe/germany/bayern"}"#);
    }
}
