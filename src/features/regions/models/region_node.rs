use serde::{Deserialize, Serialize};

/// A node in the region hierarchy.
///
/// `path` is absent on purely organizational nodes. Those are still walked,
/// they just produce no listing entry of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub subregions: Vec<RegionNode>,
}

impl RegionNode {
    #[allow(dead_code)]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            subregions: Vec::new(),
        }
    }

    /// A node without a path of its own
    #[allow(dead_code)]
    pub fn group(subregions: Vec<RegionNode>) -> Self {
        Self {
            path: None,
            subregions,
        }
    }

    #[allow(dead_code)]
    pub fn with_subregions(mut self, subregions: Vec<RegionNode>) -> Self {
        self.subregions = subregions;
        self
    }

    /// The path, if present and non-empty. An empty string counts as absent.
    pub fn listed_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

// Tear down iteratively so a deep catalog cannot overflow the stack on drop.
impl Drop for RegionNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.subregions);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.subregions);
        }
    }
}

/// Root of the region index. Never listed itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionIndex {
    #[serde(default)]
    pub subregions: Vec<RegionNode>,
}

impl RegionIndex {
    pub fn new(subregions: Vec<RegionNode>) -> Self {
        Self { subregions }
    }

    pub fn is_empty(&self) -> bool {
        self.subregions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_path_conflates_empty_and_absent() {
        assert_eq!(RegionNode::new("europe").listed_path(), Some("europe"));
        assert_eq!(RegionNode::new("").listed_path(), None);
        assert_eq!(RegionNode::group(vec![]).listed_path(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let node: RegionNode = serde_json::from_str(r#"{"path": "europe"}"#).unwrap();
        assert_eq!(node, RegionNode::new("europe"));

        let node: RegionNode = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(node, RegionNode::group(vec![]));

        let index: RegionIndex = serde_json::from_str(r#"{}"#).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let node: RegionNode = serde_json::from_str(
            r#"{"path": "europe", "name": "Europe", "urls": {"pbf": "x"}, "subregions": []}"#,
        )
        .unwrap();
        assert_eq!(node.listed_path(), Some("europe"));
    }

    #[test]
    fn test_deep_chain_drops_without_overflow() {
        let mut node = RegionNode::new("level-0");
        for level in 1..200_000 {
            node = RegionNode::new(format!("level-{}", level)).with_subregions(vec![node]);
        }
        drop(node);
    }
}
