//! Analysis result variants accepted by the exporter.

mod result;

pub use result::{
    AnalysisKind, AnalysisResult, DiscriminantResult, OrdinationResult, ScoreMatrix,
    SpatialComponentResult,
};
