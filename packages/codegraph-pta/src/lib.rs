/*
 * Codegraph PTA - Context-Sensitive Pointer Analysis
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Program IR (classes, fields, methods, statements)
 * - features/    : Vertical slices (call_graph, points_to)
 * - config/      : PTAConfig, presets, YAML loading
 * - errors       : PtaError
 *
 * Single-threaded, deterministic solver; one session per analysis.
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Solver entry points carry full context
#![allow(clippy::type_complexity)] // Complex types are necessary for analysis
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::derivable_impls)] // Manual impl for documentation
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::upper_case_acronyms)] // PTA, CS naming
#![allow(clippy::len_without_is_empty)] // Size accessors only

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models (program IR)
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ContextPolicy, PTAConfig, Preset, WorklistOrder};
pub use errors::{PtaError, Result};
pub use features::call_graph::{CallGraph, CallKind, ChaBuilder};
pub use features::points_to::{
    AnalysisStats, AnalysisSummary, ContextSelector, PointerAnalysis, PointerAnalysisResult,
};
pub use shared::models::{Program, ProgramBuilder};
