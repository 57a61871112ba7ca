//! Abstract syntax tree for the Arbiter rule-script DSL.
//!
//! [`Term`]s evaluate to [`Value`]s; [`Statement`]s perform actions and are
//! executed by the engine. Both are immutable once parsed and print back to
//! script text that parses to the same tree.

use std::fmt::{self, Write as _};

use arbiter_foundation::{Error, LtMap, LtVec, Result, Value};

use crate::dialect::NUMERIC_SIGIL;

/// Source of variable values during term evaluation.
pub trait Bindings {
    /// Returns the value bound to `name`.
    ///
    /// # Errors
    /// Implementations decide how an unbound name is reported.
    fn lookup(&self, name: &str) -> Result<Value>;
}

/// A scalar literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Real literal. Only finite values have a script spelling, so a
    /// non-finite value displays as `null` and does not round-trip.
    Real(f64),
    /// Decoded string literal.
    String(String),
}

impl Literal {
    /// Converts to a runtime value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::Int(*n),
            Self::Real(n) => Value::Real(*n),
            Self::String(s) => Value::from(s.as_str()),
        }
    }
}

/// An expression node that evaluates to a value.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    /// A scalar literal.
    Literal(Literal),
    /// `[t1, t2, ...]`
    Array(Vec<Term>),
    /// `{"k": t, ...}` in declared order. Duplicate keys are kept here and
    /// resolved (last write wins) on evaluation.
    Map(Vec<(String, Term)>),
    /// A variable reference. `numeric` marks the `#name` form, whose value is
    /// coerced to a number.
    Variable {
        /// Name without sigil.
        name: String,
        /// True for `#name`.
        numeric: bool,
    },
}

impl Term {
    /// `null` literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// String literal.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::Literal(Literal::String(s.into()))
    }

    /// Integer literal.
    #[must_use]
    pub const fn int(n: i64) -> Self {
        Self::Literal(Literal::Int(n))
    }

    /// Plain variable reference.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            numeric: false,
        }
    }

    /// Returns true for the `null` literal.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Literal(Literal::Null))
    }

    /// Evaluates the term.
    ///
    /// Only variables consult `bindings`; everything else is pure.
    ///
    /// # Errors
    /// Propagates lookup failures, and returns a type mismatch when a
    /// numeric variable is bound to something that is not a number.
    pub fn evaluate(&self, bindings: &dyn Bindings) -> Result<Value> {
        match self {
            Self::Literal(lit) => Ok(lit.to_value()),
            Self::Array(items) => {
                let values = items
                    .iter()
                    .map(|t| t.evaluate(bindings))
                    .collect::<Result<LtVec<_>>>()?;
                Ok(Value::Array(values))
            }
            Self::Map(entries) => {
                let mut map = LtMap::new();
                for (key, term) in entries {
                    map.insert_mut(key.as_str(), term.evaluate(bindings)?);
                }
                Ok(Value::Map(map))
            }
            Self::Variable { name, numeric } => {
                let value = bindings.lookup(name)?;
                if !*numeric || value.is_null() {
                    return Ok(value);
                }
                value
                    .coerce_number()
                    .ok_or_else(|| Error::type_mismatch("number", value.type_name()))
            }
        }
    }
}

/// An action node.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `def(key, value).` binds a symbol.
    Def {
        /// Symbol name.
        key: String,
        /// Value term.
        value: Term,
    },
    /// `run(target, arg1, arg2).` invokes a callable for its side effects.
    Run {
        /// Callable term.
        target: Term,
        /// First argument.
        arg1: Term,
        /// Second argument.
        arg2: Term,
    },
    /// `eval(module, targets[, policy]).` invokes a rule module.
    Eval {
        /// Module name term (string or variable).
        module: Term,
        /// Target path or paths.
        targets: Term,
        /// Optional module policy.
        policy: Option<Term>,
    },
    /// `par([path[, policy]]) { ... }` runs every child and tallies outcomes.
    Par {
        /// Scope path.
        path: Option<Term>,
        /// Threshold policy.
        policy: Option<Term>,
        /// Child statements.
        children: Vec<Statement>,
    },
    /// `seq([path[, policy]]) { ... }` runs children until one does not succeed.
    Seq {
        /// Scope path.
        path: Option<Term>,
        /// Trailing argument; evaluated, never interpreted.
        policy: Option<Term>,
        /// Child statements.
        children: Vec<Statement>,
    },
    /// `sel([path[, policy]]) { ... }` runs children until one does not fail.
    Sel {
        /// Scope path.
        path: Option<Term>,
        /// Trailing argument; evaluated, never interpreted.
        policy: Option<Term>,
        /// Child statements.
        children: Vec<Statement>,
    },
}

impl Statement {
    /// The statement's keyword.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Def { .. } => "def",
            Self::Run { .. } => "run",
            Self::Eval { .. } => "eval",
            Self::Par { .. } => "par",
            Self::Seq { .. } => "seq",
            Self::Sel { .. } => "sel",
        }
    }

    /// Child statements of a composite statement (empty for leaves).
    #[must_use]
    pub fn children(&self) -> &[Statement] {
        match self {
            Self::Par { children, .. } | Self::Seq { children, .. } | Self::Sel { children, .. } => {
                children
            }
            _ => &[],
        }
    }

    /// Nesting depth: 0 for leaves, 1 + deepest child for composites.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Par { children, .. } | Self::Seq { children, .. } | Self::Sel { children, .. } => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "    ".repeat(indent);
        match self {
            Self::Def { key, value } => writeln!(f, "{pad}def({key}, {value})."),
            Self::Run { target, arg1, arg2 } => {
                writeln!(f, "{pad}run({target}, {arg1}, {arg2}).")
            }
            Self::Eval {
                module,
                targets,
                policy,
            } => match policy {
                Some(policy) => writeln!(f, "{pad}eval({module}, {targets}, {policy})."),
                None => writeln!(f, "{pad}eval({module}, {targets})."),
            },
            Self::Par {
                path,
                policy,
                children,
            }
            | Self::Seq {
                path,
                policy,
                children,
            }
            | Self::Sel {
                path,
                policy,
                children,
            } => {
                let args = match (path, policy) {
                    (path, Some(policy)) => {
                        let path = path.clone().unwrap_or_else(Term::null);
                        format!("{path}, {policy}")
                    }
                    (Some(path), None) => path.to_string(),
                    (None, None) => String::new(),
                };
                write_block(f, &pad, self.keyword(), &args, children, indent)
            }
        }
    }
}

fn write_block(
    f: &mut fmt::Formatter<'_>,
    pad: &str,
    keyword: &str,
    args: &str,
    children: &[Statement],
    indent: usize,
) -> fmt::Result {
    if children.is_empty() {
        return writeln!(f, "{pad}{keyword}({args}) {{}}");
    }
    writeln!(f, "{pad}{keyword}({args}) {{")?;
    for child in children {
        child.write_indented(f, indent + 1)?;
    }
    writeln!(f, "{pad}}}")
}

/// A parsed script: top-level statements in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    /// Top-level statements.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Creates a program.
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Returns true if there are no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Deepest composite nesting in the program.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.statements.iter().map(Statement::depth).max().unwrap_or(0)
    }
}

// =============================================================================
// Display
// =============================================================================

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c.is_control() => write!(f, "\\u{:04x}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(n) if n.is_finite() => write!(f, "{n:?}"),
            Self::Null | Self::Real(_) => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::String(s) => write_string(f, s),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Self::Map(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_string(f, key)?;
                    write!(f, ": {value}")?;
                }
                f.write_char('}')
            }
            Self::Variable { name, numeric } => {
                if *numeric {
                    f.write_char(NUMERIC_SIGIL)?;
                }
                f.write_str(name)
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}
