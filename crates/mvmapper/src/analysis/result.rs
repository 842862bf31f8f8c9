//! Caller-constructed analysis result types.
//!
//! These types form the adapter boundary: any statistical library whose
//! output fits these shapes can feed the exporter. The exporter treats them
//! as read-only input and takes their shapes on trust until extraction time,
//! where ill-formed matrices are rejected.

use serde::{Deserialize, Serialize};

/// Rectangular row-major matrix of per-entity scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreMatrix {
    rows: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    /// Build a matrix from row vectors.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, taken from the first row.
    pub fn n_cols(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether every row has the same width.
    pub fn is_rectangular(&self) -> bool {
        let width = self.n_cols();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// A single row.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    /// Iterate over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}

/// Which analysis produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Principal-component ordination.
    Ordination,
    /// Discriminant analysis of principal components.
    Discriminant,
    /// Spatial principal component analysis.
    SpatialComponent,
}

impl AnalysisKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::Ordination => "ordination",
            AnalysisKind::Discriminant => "discriminant",
            AnalysisKind::SpatialComponent => "spatial component",
        }
    }
}

/// Result of a principal-component ordination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdinationResult {
    /// Unique identifier per entity, in the analysis's native order.
    pub keys: Vec<String>,
    /// Retained component scores, one row per entity.
    pub scores: ScoreMatrix,
}

/// Result of a discriminant analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscriminantResult {
    /// Unique identifier per entity, in the analysis's native order.
    pub keys: Vec<String>,
    /// Retained component scores, one row per entity.
    pub scores: ScoreMatrix,
    /// Group membership assigned prior to the analysis, one label per entity.
    pub groups: Vec<String>,
    /// Group membership predicted by the model, one label per entity.
    pub assigned: Vec<String>,
    /// Posterior probability distribution over groups, one row per entity.
    pub posterior: ScoreMatrix,
}

/// Result of a spatial principal component analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialComponentResult {
    /// Unique identifier per entity, in the analysis's native order.
    pub keys: Vec<String>,
    /// Retained component scores, one row per entity.
    pub scores: ScoreMatrix,
    /// Neighbourhood-averaged scores, same row count and ordering as `scores`.
    pub lag_scores: ScoreMatrix,
}

/// An analysis result accepted by the exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// Principal-component ordination.
    Ordination(OrdinationResult),
    /// Discriminant analysis.
    Discriminant(DiscriminantResult),
    /// Spatial principal component analysis.
    SpatialComponent(SpatialComponentResult),
}

impl AnalysisResult {
    /// The variant of this result.
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisResult::Ordination(_) => AnalysisKind::Ordination,
            AnalysisResult::Discriminant(_) => AnalysisKind::Discriminant,
            AnalysisResult::SpatialComponent(_) => AnalysisKind::SpatialComponent,
        }
    }
}
