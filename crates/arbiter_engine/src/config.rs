//! Engine configuration.

use arbiter_language::Dialect;

/// How an unbound variable evaluates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VariableResolution {
    /// Unbound variables are an `UndefinedSymbol` error.
    #[default]
    Strict,
    /// Unbound variables evaluate to `null`.
    Lenient,
}

/// Configuration for an [`Interpreter`](crate::Interpreter).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Unbound variable handling.
    pub variables: VariableResolution,
    /// Maximum nesting of `par`/`seq`/`sel` blocks.
    pub max_depth: usize,
    /// Script dialect used when the engine parses source itself.
    pub dialect: Dialect,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_dialect(Dialect::Standard)
    }
}

impl EngineConfig {
    /// Default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Creates the default configuration for a dialect.
    ///
    /// The standard dialect resolves variables strictly, the extended
    /// dialect leniently.
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        let variables = match dialect {
            Dialect::Standard => VariableResolution::Strict,
            Dialect::Extended => VariableResolution::Lenient,
        };
        Self {
            variables,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            dialect,
        }
    }

    /// Builder method to set variable resolution.
    #[must_use]
    pub fn with_variables(mut self, variables: VariableResolution) -> Self {
        self.variables = variables;
        self
    }

    /// Builder method to set the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder method to set the dialect without touching variable resolution.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}
