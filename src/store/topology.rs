//! EdgeTopology - explicit adjacency map standing in for a bracket topology provider.

use std::collections::BTreeMap;

use super::{BracketTopology, MatchRef};
use crate::models::{MatchId, StoreError};
use serde::{Deserialize, Serialize};

/// Outgoing edges of one match, as imported.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: MatchId,
    pub to: Vec<MatchRef>,
}

/// Next-match edges keyed by source match. Previous matches are the reverse edges.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EdgeTopology {
    next: BTreeMap<MatchId, Vec<MatchRef>>,
}

impl EdgeTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `add_edges`.
    pub fn with_edges<I, R>(mut self, from: MatchId, to: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<MatchRef>,
    {
        self.add_edges(from, to);
        self
    }

    pub fn add_edges<I, R>(&mut self, from: MatchId, to: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<MatchRef>,
    {
        self.next
            .entry(from)
            .or_default()
            .extend(to.into_iter().map(Into::into));
    }

    pub fn extend(&mut self, edges: impl IntoIterator<Item = Edge>) {
        for edge in edges {
            self.add_edges(edge.from, edge.to);
        }
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.next
            .iter()
            .map(|(from, to)| Edge {
                from: *from,
                to: to.clone(),
            })
            .collect()
    }
}

impl From<Vec<Edge>> for EdgeTopology {
    fn from(edges: Vec<Edge>) -> Self {
        let mut topology = Self::new();
        topology.extend(edges);
        topology
    }
}

impl BracketTopology for EdgeTopology {
    fn next_matches(&self, id: MatchId) -> Result<Vec<MatchRef>, StoreError> {
        Ok(self.next.get(&id).cloned().unwrap_or_default())
    }

    fn previous_matches(&self, id: MatchId) -> Result<Vec<MatchRef>, StoreError> {
        Ok(self
            .next
            .iter()
            .filter(|(_, to)| to.iter().any(|r| r.normalize() == Some(id)))
            .map(|(from, _)| MatchRef::Id(*from))
            .collect())
    }
}
