//! Scope stack.
//!
//! A [`Context`] is a stack of [`Frame`]s that is never empty. Each frame
//! narrows the document to a sub-node and owns its own module bindings and
//! lexical symbols. Lookups search from the innermost frame outwards and the
//! first binding found wins.
//!
//! Frames hold a clone of their sub-node; `Value` collections are persistent,
//! so the clone shares structure with the document.

use std::collections::HashMap;
use std::fmt;

use arbiter_foundation::{Error, Path, Result, Value};
use tracing::trace;

use crate::module::ModuleBinding;

/// One scope of the stack.
#[derive(Clone, Default)]
pub struct Frame {
    /// The sub-node this frame addresses (`Null` if absent).
    pub entity: Value,
    /// Absolute path of `entity`; the root is `""`.
    pub path: Path,
    modules: HashMap<String, ModuleBinding>,
    symbols: HashMap<String, Value>,
}

impl Frame {
    fn new(entity: Value, path: Path) -> Self {
        Self {
            entity,
            path,
            modules: HashMap::new(),
            symbols: HashMap::new(),
        }
    }

    /// Returns true if this frame itself binds module `name`.
    #[must_use]
    pub fn binds_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Names of modules bound in this frame, sorted.
    #[must_use]
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.modules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns this frame's own lexical symbol `name`.
    #[must_use]
    pub fn symbol(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("path", &self.path)
            .field("entity", &self.entity)
            .field("modules", &self.module_names())
            .field("symbols", &self.symbols)
            .finish()
    }
}

/// Stack of frames over one document.
#[derive(Clone, Debug)]
pub struct Context {
    frames: Vec<Frame>,
}

impl Context {
    /// Creates a context whose root frame addresses `entity`.
    #[must_use]
    pub fn new(entity: Value) -> Self {
        Self {
            frames: vec![Frame::new(entity, Path::root())],
        }
    }

    /// Pushes a child frame.
    ///
    /// A transparent segment (`None`, `""` or `"."`) keeps the parent's
    /// entity and path; any other segment narrows to the addressed sub-node.
    /// Either way the child starts with no modules or symbols of its own.
    pub fn push(&mut self, segment: Option<&str>) {
        let parent = self.top();
        let frame = if Path::is_transparent(segment) {
            Frame::new(parent.entity.clone(), parent.path.clone())
        } else {
            let segment = segment.unwrap_or_default();
            let entity = parent.entity.get_path(segment).cloned().unwrap_or_default();
            Frame::new(entity, parent.path.join(Some(segment)))
        };
        trace!(path = %frame.path, depth = self.frames.len(), "push frame");
        self.frames.push(frame);
    }

    /// Pops the top frame. The root frame is never popped.
    pub fn pop(&mut self) -> Option<Frame> {
        if self.frames.len() <= 1 {
            return None;
        }
        let frame = self.frames.pop();
        trace!(depth = self.frames.len(), "pop frame");
        frame
    }

    /// Number of frames, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The innermost frame.
    #[must_use]
    pub fn top(&self) -> &Frame {
        // The root frame is never popped, so the stack is never empty.
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// The root frame.
    #[must_use]
    pub fn root(&self) -> &Frame {
        &self.frames[0]
    }

    /// Frames from root to top.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Entity of the innermost frame.
    #[must_use]
    pub fn entity(&self) -> &Value {
        &self.top().entity
    }

    /// Path of the innermost frame.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.top().path
    }

    /// Binds one module in the innermost frame.
    pub fn add_module(&mut self, name: impl Into<String>, binding: ModuleBinding) {
        self.top_mut().modules.insert(name.into(), binding);
    }

    /// Merges bindings into the innermost frame only.
    pub fn add_modules<I, S>(&mut self, bindings: I)
    where
        I: IntoIterator<Item = (S, ModuleBinding)>,
        S: Into<String>,
    {
        let modules = &mut self.top_mut().modules;
        for (name, binding) in bindings {
            modules.insert(name.into(), binding);
        }
    }

    /// Finds the nearest binding of module `name`.
    ///
    /// # Errors
    /// Returns `ModuleNotFound` if no frame binds `name`.
    pub fn get_module(&self, name: &str) -> Result<ModuleBinding> {
        let found = self
            .frames
            .iter()
            .rev()
            .enumerate()
            .find_map(|(distance, frame)| frame.modules.get(name).map(|m| (distance, m)));
        match found {
            Some((distance, binding)) => {
                trace!(module = name, distance, "resolved module");
                Ok(binding.clone())
            }
            None => Err(Error::module_not_found(name)),
        }
    }

    /// Finds the nearest lexical symbol `name`.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.symbols.get(name))
    }

    /// Binds a lexical symbol in the innermost frame.
    pub fn put_entry(&mut self, name: impl Into<String>, value: Value) {
        self.top_mut().symbols.insert(name.into(), value);
    }
}
