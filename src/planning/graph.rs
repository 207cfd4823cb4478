use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::Concept;

pub const DEFAULT_GRAPH_PATH: &str = "knowledge_graph.json";

/// Prerequisite edges keyed by concept. `A -> [B, C]` means A must be learned before B and C.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrerequisiteGraph {
    adjacency: BTreeMap<Concept, Vec<Concept>>,
}

impl PrerequisiteGraph {
    pub fn new(adjacency: BTreeMap<Concept, Vec<Concept>>) -> Self {
        Self { adjacency }
    }

    pub fn from_adjacency<I, K, S, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<Concept>,
        S: IntoIterator<Item = V>,
        V: Into<Concept>,
    {
        let adjacency = entries
            .into_iter()
            .map(|(concept, successors)| {
                (
                    concept.into(),
                    successors.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { adjacency }
    }

    pub fn adjacency(&self) -> &BTreeMap<Concept, Vec<Concept>> {
        &self.adjacency
    }

    pub fn successors(&self, concept: &str) -> &[Concept] {
        self.adjacency
            .get(concept)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every concept mentioned, either as a key or as a successor.
    pub fn concepts(&self) -> BTreeSet<&str> {
        self.adjacency
            .iter()
            .flat_map(|(concept, successors)| {
                std::iter::once(concept.as_str()).chain(successors.iter().map(String::as_str))
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Number of recorded prerequisite edges pointing at each concept.
    pub fn in_degrees(&self) -> HashMap<&str, usize> {
        let mut in_degree: HashMap<&str, usize> = HashMap::new();
        for (concept, successors) in &self.adjacency {
            in_degree.entry(concept.as_str()).or_insert(0);
            for successor in successors {
                *in_degree.entry(successor.as_str()).or_insert(0) += 1;
            }
        }
        in_degree
    }

    /// 测度论与泛函分析知识点先修图（默认配置）
    pub fn builtin() -> Self {
        Self::from_adjacency([
            // 测度论基础部分
            ("集合论基础", vec!["外测度", "可测集"]),
            ("外测度", vec!["可测集", "测度"]),
            ("可测集", vec!["测度", "可测函数"]),
            ("测度", vec!["可测函数", "Lebesgue积分"]),
            ("可测函数", vec!["Lebesgue积分"]),
            ("Lebesgue积分", vec!["乘积测度", "Fubini定理", "Lp空间"]),
            ("乘积测度", vec!["Fubini定理"]),
            ("Fubini定理", vec![]),
            ("Lp空间", vec!["泛函分析基础"]),
            // 泛函分析部分
            ("度量空间", vec!["赋范空间", "Banach空间"]),
            ("赋范空间", vec!["Banach空间", "Hilbert空间"]),
            ("Banach空间", vec!["线性算子", "对偶空间"]),
            ("Hilbert空间", vec!["线性算子", "对偶空间"]),
            ("线性算子", vec!["紧算子", "谱理论"]),
            ("对偶空间", vec!["弱拓扑"]),
            ("弱拓扑", vec![]),
            ("紧算子", vec!["谱理论"]),
            ("谱理论", vec![]),
            ("泛函分析基础", vec!["度量空间"]),
        ])
    }
}

#[derive(Debug, thiserror::Error)]
enum GraphLoadError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "message", rename_all = "snake_case")]
pub enum FallbackReason {
    Missing,
    Unreadable(String),
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum GraphOrigin {
    File(PathBuf),
    Default(FallbackReason),
}

impl GraphOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, GraphOrigin::Default(_))
    }
}

/// The graph chosen for serving plus where it came from.
#[derive(Debug, Clone)]
pub struct GraphSource {
    pub graph: PrerequisiteGraph,
    pub origin: GraphOrigin,
}

impl GraphSource {
    pub fn builtin(reason: FallbackReason) -> Self {
        Self {
            graph: PrerequisiteGraph::builtin(),
            origin: GraphOrigin::Default(reason),
        }
    }

    pub fn from_graph(graph: PrerequisiteGraph, path: impl Into<PathBuf>) -> Self {
        Self {
            graph,
            origin: GraphOrigin::File(path.into()),
        }
    }
}

pub fn load_graph() -> GraphSource {
    load_graph_from(DEFAULT_GRAPH_PATH)
}

/// Loads the graph from a JSON document. A malformed source must never take the
/// planner down, so every failure yields the built-in graph and records why.
pub fn load_graph_from(path: impl AsRef<Path>) -> GraphSource {
    let path = path.as_ref();

    match read_graph(path) {
        Ok(graph) => {
            info!(
                path = %path.display(),
                concepts = graph.concepts().len(),
                edges = graph.edge_count(),
                "knowledge graph loaded"
            );
            GraphSource::from_graph(graph, path)
        }
        Err(GraphLoadError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "knowledge graph config not found, using built-in graph");
            GraphSource::builtin(FallbackReason::Missing)
        }
        Err(GraphLoadError::Io(err)) => {
            warn!(path = %path.display(), error = %err, "knowledge graph unreadable, using built-in graph");
            GraphSource::builtin(FallbackReason::Unreadable(err.to_string()))
        }
        Err(GraphLoadError::Parse(err)) => {
            warn!(path = %path.display(), error = %err, "knowledge graph malformed, using built-in graph");
            GraphSource::builtin(FallbackReason::Malformed(err.to_string()))
        }
    }
}

fn read_graph(path: &Path) -> Result<PrerequisiteGraph, GraphLoadError> {
    let raw = std::fs::read_to_string(path)?;
    let adjacency: BTreeMap<Concept, Vec<Concept>> = serde_json::from_str(&raw)?;
    Ok(PrerequisiteGraph::new(adjacency))
}
