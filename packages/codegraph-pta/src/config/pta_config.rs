//! Pointer analysis configuration

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use serde::{Deserialize, Serialize};

/// Upper bound for `context_depth` / `heap_context_depth`
pub const MAX_CONTEXT_DEPTH: usize = 8;

/// Context-sensitivity policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextPolicy {
    /// One shared context for everything
    Insensitive,

    /// k-limited call strings (k-CFA)
    CallSite,

    /// k-limited receiver allocation sites
    Object,

    /// k-limited classes declaring the receiver's allocating method
    Type,
}

impl ContextPolicy {
    pub const NAMES: [&'static str; 4] = ["insensitive", "call-site", "object", "type"];

    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "insensitive" | "ci" => Ok(Self::Insensitive),
            "call-site" | "callsite" | "cfa" => Ok(Self::CallSite),
            "object" | "obj" => Ok(Self::Object),
            "type" => Ok(Self::Type),
            _ => Err(ConfigError::unknown_policy(s, &Self::NAMES)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insensitive => "insensitive",
            Self::CallSite => "call-site",
            Self::Object => "object",
            Self::Type => "type",
        }
    }
}

impl Default for ContextPolicy {
    fn default() -> Self {
        ContextPolicy::Object
    }
}

impl std::fmt::Display for ContextPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dequeue order of the propagation worklist. Results do not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorklistOrder {
    Fifo,
    Lifo,
}

impl Default for WorklistOrder {
    fn default() -> Self {
        WorklistOrder::Fifo
    }
}

/// Pointer analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PTAConfig {
    /// Context-sensitivity policy
    pub policy: ContextPolicy,

    /// Length limit of method contexts (k)
    pub context_depth: usize,

    /// Length limit of heap contexts
    pub heap_context_depth: usize,

    /// Worklist dequeue order
    pub worklist_order: WorklistOrder,

    /// Additional entry methods, by `<Class: subsignature>` or `Class.name`
    pub extra_entries: Vec<String>,
}

impl PTAConfig {
    /// Create from preset
    pub fn from_preset(preset: Preset) -> Self {
        let (policy, context_depth, heap_context_depth) = match preset {
            Preset::Fast => (ContextPolicy::Insensitive, 0, 0),
            Preset::Balanced => (ContextPolicy::Object, 1, 0),
            Preset::Thorough => (ContextPolicy::Object, 2, 1),
        };
        Self {
            policy,
            context_depth,
            heap_context_depth,
            worklist_order: WorklistOrder::Fifo,
            extra_entries: Vec::new(),
        }
    }

    /// Context-insensitive configuration
    pub fn insensitive() -> Self {
        Self::from_preset(Preset::Fast)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.context_depth > MAX_CONTEXT_DEPTH {
            return Err(ConfigError::range_with_hint(
                "context_depth",
                self.context_depth,
                0,
                MAX_CONTEXT_DEPTH,
                "Deep contexts multiply cloned methods without a matching precision gain",
            ));
        }

        if self.heap_context_depth > self.context_depth {
            return Err(ConfigError::range_with_hint(
                "heap_context_depth",
                self.heap_context_depth,
                0,
                self.context_depth,
                "Heap contexts are suffixes of method contexts and cannot be longer",
            ));
        }

        if self.extra_entries.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "extra_entries must not contain empty method names".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder: Set policy
    pub fn policy(mut self, v: ContextPolicy) -> Self {
        self.policy = v;
        self
    }

    /// Builder: Set context_depth
    pub fn context_depth(mut self, v: usize) -> Self {
        self.context_depth = v;
        self
    }

    /// Builder: Set heap_context_depth
    pub fn heap_context_depth(mut self, v: usize) -> Self {
        self.heap_context_depth = v;
        self
    }

    /// Builder: Set worklist_order
    pub fn worklist_order(mut self, v: WorklistOrder) -> Self {
        self.worklist_order = v;
        self
    }

    /// Builder: Add an extra entry method
    pub fn extra_entry(mut self, signature: impl Into<String>) -> Self {
        self.extra_entries.push(signature.into());
        self
    }

    /// Short description, e.g. `2-object (heap 1)`
    pub fn describe(&self) -> String {
        match self.policy {
            ContextPolicy::Insensitive => "context-insensitive".to_string(),
            policy => format!(
                "{}-{} (heap {})",
                self.context_depth, policy, self.heap_context_depth
            ),
        }
    }
}

impl Default for PTAConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}
