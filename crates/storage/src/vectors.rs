// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vector collections: keyed by collection name, each holding a document set
//! scored by cosine similarity on `Search`.
//!
//! No ANN index — a linear scan over the collection's documents. Workspace
//! collections are small (single-workspace, single-writer by design); an
//! index would be premature for this scale.

use crate::atomic::write_json_atomic;
use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDoc {
    pub id: String,
    pub vector: Vec<f32>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorCollection {
    docs: BTreeMap<String, VectorDoc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDoc {
    pub doc: VectorDoc,
    pub score: f32,
}

impl VectorCollection {
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json_atomic(path, self)
    }

    /// Replace any existing document with the same `id`.
    pub fn upsert(&mut self, doc: VectorDoc) {
        self.docs.insert(doc.id.clone(), doc);
    }

    /// Score every document against `query` by cosine similarity and return
    /// the top `k`, highest score first.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredDoc> {
        let mut scored: Vec<ScoredDoc> = self
            .docs
            .values()
            .map(|doc| ScoredDoc {
                doc: doc.clone(),
                score: cosine_similarity(query, &doc.vector),
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
#[path = "vectors_tests.rs"]
mod tests;
