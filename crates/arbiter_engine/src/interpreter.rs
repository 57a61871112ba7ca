//! Tree-walking interpreter.
//!
//! Executes parsed [`Statement`]s against a [`Context`]. Rule outcomes come
//! back as [`Status`] values with [`Feedback`] in the log; an `Err` means the
//! run could not proceed (unknown module, unbound variable in strict mode,
//! malformed policy, failing callable).
//!
//! - `def` and `run` always yield `SUCCESS`.
//! - `eval` yields whatever the resolved module returns.
//! - `par` runs every child, then compares the tallies with its policy.
//! - `seq` stops at the first child that does not succeed.
//! - `sel` stops at the first child that does not fail.
//! - A program is an implicit `seq` over its top-level statements.
//!
//! Every composite pushes a frame (transparent unless given a path), binds
//! any registry modules scoped to the new frame's path, and pops the frame
//! before returning.

use arbiter_foundation::{Error, ErrorKind, Result, Value};
use arbiter_language::{Bindings, Program, Statement, Term};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::context::Context;
use crate::feedback::{Feedback, FeedbackLog};
use crate::policy::ParPolicy;
use crate::registry::Registry;
use crate::status::Status;
use crate::symbols::SymbolTable;

/// Outcome of a whole run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Overall status.
    pub status: Status,
    /// Findings in report order.
    pub feedback: Vec<Feedback>,
}

impl RunReport {
    /// Returns true if the run succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Executes statements with a fixed registry and configuration.
#[derive(Debug)]
pub struct Interpreter<'r> {
    registry: &'r Registry,
    config: EngineConfig,
}

impl<'r> Interpreter<'r> {
    /// Creates an interpreter.
    #[must_use]
    pub const fn new(registry: &'r Registry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creates a context over `entity` with the registry's root bindings.
    #[must_use]
    pub fn context(&self, entity: Value) -> Context {
        let mut ctx = Context::new(entity);
        ctx.add_modules(self.registry.root().iter().cloned());
        ctx
    }

    /// Runs a program against `entity`.
    ///
    /// Definitions made by the program remain in `symbols` afterwards.
    ///
    /// # Errors
    /// Returns the first engine error raised by any statement.
    pub fn run(
        &self,
        program: &Program,
        entity: Value,
        symbols: &mut SymbolTable,
    ) -> Result<RunReport> {
        let mut ctx = self.context(entity);
        let mut feedback = FeedbackLog::new();
        let status = self.execute_all(&program.statements, &mut ctx, symbols, &mut feedback)?;
        debug!(%status, findings = feedback.len(), "run finished");
        Ok(RunReport {
            status,
            feedback: feedback.into_entries(),
        })
    }

    /// Executes statements as an implicit `seq` in the current frame.
    ///
    /// # Errors
    /// Returns the first engine error raised by any statement.
    pub fn execute_all(
        &self,
        statements: &[Statement],
        ctx: &mut Context,
        symbols: &mut SymbolTable,
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        for statement in statements {
            let status = self.execute_at(statement, ctx, symbols, feedback, 0)?;
            if !status.is_success() {
                return Ok(status);
            }
        }
        Ok(Status::Success)
    }

    /// Executes one statement.
    ///
    /// # Errors
    /// Returns an engine error if the statement cannot be executed.
    pub fn execute(
        &self,
        statement: &Statement,
        ctx: &mut Context,
        symbols: &mut SymbolTable,
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        self.execute_at(statement, ctx, symbols, feedback, 0)
    }

    /// Evaluates a term against `symbols` with the configured resolution.
    ///
    /// # Errors
    /// Propagates lookup and coercion failures.
    pub fn evaluate(&self, term: &Term, symbols: &SymbolTable) -> Result<Value> {
        term.evaluate(&symbols.resolver(self.config.variables))
    }

    fn execute_at(
        &self,
        statement: &Statement,
        ctx: &mut Context,
        symbols: &mut SymbolTable,
        feedback: &mut FeedbackLog,
        depth: usize,
    ) -> Result<Status> {
        let status = match statement {
            Statement::Def { key, value } => {
                let value = self.evaluate(value, symbols)?;
                trace!(key = %key, %value, "def");
                symbols.define(key.clone(), value);
                Status::Success
            }
            Statement::Run { target, arg1, arg2 } => {
                self.run_callable(target, arg1, arg2, symbols)?;
                Status::Success
            }
            Statement::Eval {
                module,
                targets,
                policy,
            } => self.eval_module(module, targets, policy.as_ref(), ctx, symbols, feedback)?,
            Statement::Par {
                path,
                policy,
                children,
            } => {
                let policy = policy
                    .as_ref()
                    .map(|term| self.evaluate(term, symbols))
                    .transpose()?;
                let policy = ParPolicy::from_value(policy.as_ref())?;
                self.scoped(statement, path.as_ref(), ctx, symbols, depth, |ctx, symbols| {
                    let (mut successes, mut failures) = (0, 0);
                    for child in children {
                        match self.execute_at(child, ctx, symbols, feedback, depth + 1)? {
                            Status::Success => successes += 1,
                            Status::Failed => failures += 1,
                            Status::Active => {}
                        }
                    }
                    trace!(successes, failures, "par tally");
                    Ok(policy.decide(successes, failures))
                })?
            }
            Statement::Seq {
                path,
                policy,
                children,
            } => {
                self.evaluate_ignored(policy.as_ref(), symbols)?;
                self.scoped(statement, path.as_ref(), ctx, symbols, depth, |ctx, symbols| {
                    for child in children {
                        let status = self.execute_at(child, ctx, symbols, feedback, depth + 1)?;
                        if !status.is_success() {
                            return Ok(status);
                        }
                    }
                    Ok(Status::Success)
                })?
            }
            Statement::Sel {
                path,
                policy,
                children,
            } => {
                self.evaluate_ignored(policy.as_ref(), symbols)?;
                self.scoped(statement, path.as_ref(), ctx, symbols, depth, |ctx, symbols| {
                    for child in children {
                        let status = self.execute_at(child, ctx, symbols, feedback, depth + 1)?;
                        if !status.is_failed() {
                            return Ok(status);
                        }
                    }
                    Ok(Status::Failed)
                })?
            }
        };
        debug!(statement = statement.keyword(), path = %ctx.path(), %status, "executed");
        Ok(status)
    }

    /// Evaluates the trailing argument of `seq`/`sel` so unbound symbols
    /// still surface; the value itself has no meaning for those statements.
    fn evaluate_ignored(&self, term: Option<&Term>, symbols: &SymbolTable) -> Result<()> {
        if let Some(term) = term {
            let value = self.evaluate(term, symbols)?;
            trace!(%value, "ignored composite argument");
        }
        Ok(())
    }

    /// Runs `body` inside a frame pushed for a composite statement.
    fn scoped<F>(
        &self,
        statement: &Statement,
        path: Option<&Term>,
        ctx: &mut Context,
        symbols: &mut SymbolTable,
        depth: usize,
        body: F,
    ) -> Result<Status>
    where
        F: FnOnce(&mut Context, &mut SymbolTable) -> Result<Status>,
    {
        if depth >= self.config.max_depth {
            return Err(Error::new(ErrorKind::DepthExceeded(self.config.max_depth)));
        }
        let segment = match path {
            Some(term) => segment_of(&self.evaluate(term, symbols)?)?,
            None => None,
        };

        ctx.push(segment.as_deref());
        if let Some(bindings) = self.registry.scope(ctx.path().as_str()) {
            ctx.add_modules(bindings.iter().cloned());
        }
        let label = frame_label(statement.keyword(), ctx.path().as_str());
        let result = body(ctx, symbols);
        ctx.pop();
        result.map_err(|e| e.in_frame(label))
    }

    fn run_callable(
        &self,
        target: &Term,
        arg1: &Term,
        arg2: &Term,
        symbols: &SymbolTable,
    ) -> Result<()> {
        let callee = self.evaluate(target, symbols)?;
        let Value::Fn(func) = &callee else {
            let name = match target {
                Term::Variable { name, .. } => name.clone(),
                _ => callee.to_string(),
            };
            return Err(Error::new(ErrorKind::NotCallable(name)));
        };
        let args = [self.evaluate(arg1, symbols)?, self.evaluate(arg2, symbols)?];
        trace!(callable = %func.name, "run");
        func.call(&args).map(|_| ())
    }

    fn eval_module(
        &self,
        module: &Term,
        targets: &Term,
        policy: Option<&Term>,
        ctx: &Context,
        symbols: &SymbolTable,
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        let name = self.evaluate(module, symbols)?;
        let Some(name) = name.as_str() else {
            return Err(Error::type_mismatch("module name string", name.type_name()));
        };
        let targets = normalize_targets(self.evaluate(targets, symbols)?);
        let policy = match policy {
            Some(term) => Some(self.evaluate(term, symbols)?).filter(|v| !v.is_null()),
            None => None,
        };

        let factory = ctx.get_module(name)?;
        let label = frame_label(&format!("eval {name}"), ctx.path().as_str());
        let module = factory
            .construct(policy.as_ref())
            .map_err(|e| e.in_frame(label.clone()))?;
        module
            .process(ctx.entity(), ctx.path(), &targets, feedback)
            .map_err(|e| e.in_frame(label))
    }
}

/// Converts an evaluated path term into a frame segment.
fn segment_of(value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.to_string())),
        Value::Int(n) => Ok(Some(n.to_string())),
        other => Err(Error::type_mismatch("path string", other.type_name())),
    }
}

/// Normalizes `eval` targets: arrays as-is, `null` as none, scalars as one.
fn normalize_targets(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.into_iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn frame_label(what: &str, path: &str) -> String {
    if path.is_empty() {
        what.to_string()
    } else {
        format!("{what} at {path}")
    }
}
