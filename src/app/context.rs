//! What methods and event handlers see: the app context, the method table
//! and the style handle.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use super::AppInner;
use crate::dom::{Document, Event, NodeId};
use crate::error::Error;
use crate::reactive::Store;
use crate::style::{Declarations, StyleError, StyleSpec};

/// A named method.
pub type Method = Rc<dyn Fn(&Context, &[Value]) -> Result<(), Error>>;

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

/// The method table of an app.
#[derive(Clone, Default)]
pub struct Methods {
    table: BTreeMap<String, Method>,
}

impl Methods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `method` under `name`, replacing any previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        method: impl Fn(&Context, &[Value]) -> Result<(), Error> + 'static,
    ) {
        self.table.insert(name.into(), Rc::new(method));
    }

    pub fn get(&self, name: &str) -> Option<&Method> {
        self.table.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Method names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// An event handler calling `name` without arguments.
    pub fn handler(
        &self,
        name: &str,
    ) -> impl Fn(&Context, &Event) -> Result<(), Error> + 'static {
        self.handler_with(name, Vec::new())
    }

    /// An event handler calling `name` with fixed arguments.
    pub fn handler_with(
        &self,
        name: &str,
        args: Vec<Value>,
    ) -> impl Fn(&Context, &Event) -> Result<(), Error> + 'static {
        let name = name.to_string();
        move |ctx: &Context, _event: &Event| ctx.call(&name, &args)
    }
}

impl fmt::Debug for Methods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Handle given to methods and event handlers.
#[derive(Clone)]
pub struct Context {
    app: Rc<AppInner>,
}

impl Context {
    pub(crate) fn new(app: Rc<AppInner>) -> Self {
        Self { app }
    }

    /// The state store. Writes re-render.
    pub fn state(&self) -> &Store {
        &self.app.store
    }

    /// The style registry. Mutations re-render.
    pub fn style(&self) -> StyleHandle<'_> {
        StyleHandle { app: &self.app }
    }

    pub fn methods(&self) -> &Methods {
        &self.app.methods
    }

    /// Call the method `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<(), Error> {
        let method = self
            .app
            .methods
            .get(name)
            .cloned()
            .ok_or_else(|| Error::MethodNotFound(name.to_string()))?;
        method(self, args)
    }

    /// Run a render pass now.
    pub fn render(&self) {
        self.app.render();
    }

    /// The style the app was mounted with.
    pub fn initial_style(&self) -> &StyleSpec {
        &self.app.initial_style
    }

    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.app.document
    }

    /// The render root.
    pub fn root(&self) -> NodeId {
        self.app.root
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("locator", &self.app.locator)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// StyleHandle
// ---------------------------------------------------------------------------

/// Style operations of a mounted app. Every mutation re-renders.
pub struct StyleHandle<'a> {
    app: &'a AppInner,
}

impl<'a> StyleHandle<'a> {
    pub(crate) fn new(app: &'a AppInner) -> Self {
        Self { app }
    }

    /// The declarations of `selector`.
    pub fn get(&self, selector: &str) -> Result<Declarations, StyleError> {
        self.app.style.borrow().get(selector).cloned()
    }

    /// One declaration of `selector`.
    pub fn get_property(&self, selector: &str, property: &str) -> Result<Option<String>, StyleError> {
        Ok(self
            .app
            .style
            .borrow()
            .get_property(selector, property)?
            .map(str::to_owned))
    }

    pub fn put(&self, selector: &str, property: &str, value: &str) {
        self.app.style.borrow_mut().put(selector, property, value);
        self.app.render();
    }

    /// Remove one declaration, or the whole rule when `property` is `None`.
    pub fn del(&self, selector: &str, property: Option<&str>) {
        self.app.style.borrow_mut().del(selector, property);
        self.app.render();
    }

    /// Replace every rule with `spec`.
    pub fn reset(&self, spec: &StyleSpec) -> Result<(), StyleError> {
        self.app.style.borrow_mut().reset(spec)?;
        self.app.render();
        Ok(())
    }

    /// Go back to the style the app was mounted with.
    pub fn reset_initial(&self) -> Result<(), StyleError> {
        self.reset(&self.app.initial_style)
    }

    /// The rule texts currently serialized, in order.
    pub fn rules(&self) -> Vec<String> {
        self.app.style.borrow().serialize()
    }
}
