//! Application layer for Points-to Analysis
//!
//! - **PointerAnalysis**: configure and run the analysis
//! - **PointerAnalysisResult**: context-sensitive and projected queries

pub mod analyzer;
pub mod result;

pub use analyzer::PointerAnalysis;
pub use result::{AnalysisStats, AnalysisSummary, CSCallEdge, CallEdgeSummary, PointerAnalysisResult};
