use std::collections::HashMap;

use serde::Deserialize;

use super::{RegionIndex, RegionNode};

/// A parsed region catalog, before it is turned into a [`RegionIndex`].
///
/// Two shapes are accepted. The nested shape carries `subregions` directly.
/// The Geofabrik `index-v1*.json` shape is a GeoJSON feature collection where
/// every region is a flat feature pointing at its `parent`. A document with a
/// `features` array is read as the latter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub subregions: Vec<RegionNode>,
    #[serde(default)]
    pub features: Option<Vec<Feature>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureProperties {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub urls: Option<FeatureUrls>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureUrls {
    #[serde(default)]
    pub pbf: Option<String>,
}

const PBF_SUFFIX: &str = "-latest.osm.pbf";

impl FeatureProperties {
    /// The download path encoded in the `.osm.pbf` URL, e.g.
    /// `https://download.geofabrik.de/north-america/us/california-latest.osm.pbf`
    /// gives `north-america/us/california`.
    fn pbf_path(&self) -> Option<&str> {
        let url = self.urls.as_ref()?.pbf.as_deref()?;
        let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        let (_, path) = after_scheme.split_once('/')?;
        path.strip_suffix(PBF_SUFFIX).filter(|p| !p.is_empty())
    }

    /// Last `/` segment of the id. US states carry ids like `us/california`.
    fn leaf_name(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }
}

impl CatalogDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn into_index(self) -> RegionIndex {
        match self.features {
            Some(features) => {
                if !self.subregions.is_empty() {
                    tracing::warn!(
                        "Document carries both features and subregions; using features"
                    );
                }
                index_from_features(&features)
            }
            None => RegionIndex::new(self.subregions),
        }
    }
}

/// Nest parent-linked features into a region tree.
///
/// A region's path comes from its `.osm.pbf` download URL. Without one it is
/// the parent's path joined with the last segment of the region's id. Sibling
/// order follows document order.
fn index_from_features(features: &[Feature]) -> RegionIndex {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(features.len());
    let mut accepted = vec![false; features.len()];

    for (i, feature) in features.iter().enumerate() {
        let id = feature.properties.id.as_str();
        if id.is_empty() {
            tracing::warn!("Skipping feature #{} with an empty id", i);
            continue;
        }
        if positions.contains_key(id) {
            tracing::warn!("Skipping duplicate feature id '{}'", id);
            continue;
        }
        positions.insert(id, i);
        accepted[i] = true;
    }

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); features.len()];

    for (i, feature) in features.iter().enumerate() {
        if !accepted[i] {
            continue;
        }
        let parent = feature
            .properties
            .parent
            .as_deref()
            .filter(|p| *p != feature.properties.id)
            .and_then(|p| positions.get(p).copied());

        match parent {
            Some(p) => children[p].push(i),
            None => {
                if let Some(missing) = feature.properties.parent.as_deref() {
                    if missing != feature.properties.id {
                        tracing::debug!(
                            "Parent '{}' of '{}' not in index; listing at top level",
                            missing,
                            feature.properties.id
                        );
                    }
                }
                roots.push(i);
            }
        }
    }

    // Pre-order walk assigning paths top-down.
    let mut paths: Vec<Option<String>> = vec![None; features.len()];
    let mut order = Vec::with_capacity(features.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    for &root in &roots {
        let properties = &features[root].properties;
        let path = properties.pbf_path().unwrap_or(properties.id.as_str());
        paths[root] = Some(path.to_string());
    }

    while let Some(i) = stack.pop() {
        order.push(i);
        let prefix = paths[i].clone().unwrap_or_default();
        for &child in children[i].iter().rev() {
            let properties = &features[child].properties;
            let path = match properties.pbf_path() {
                Some(path) => path.to_string(),
                None => format!("{}/{}", prefix, properties.leaf_name()),
            };
            paths[child] = Some(path);
            stack.push(child);
        }
    }

    let unreachable = accepted.iter().filter(|a| **a).count() - order.len();
    if unreachable > 0 {
        tracing::warn!(
            "Dropping {} feature(s) whose parent chain never reaches a top-level region",
            unreachable
        );
    }

    // Children come after their parent in pre-order, so assembling in reverse
    // always finds them already built.
    let mut nodes: Vec<Option<RegionNode>> = vec![None; features.len()];
    for &i in order.iter().rev() {
        let subregions = children[i]
            .iter()
            .filter_map(|&child| nodes[child].take())
            .collect();
        nodes[i] = Some(RegionNode {
            path: paths[i].take(),
            subregions,
        });
    }

    RegionIndex::new(roots.iter().filter_map(|&i| nodes[i].take()).collect())
}
