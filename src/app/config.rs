//! App configuration (builder).

use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

use super::context::{Context, Methods};
use crate::css::util::content_hash;
use crate::error::Error;
use crate::reactive::State;
use crate::style::{StyleRegistry, StyleSpec, DEFAULT_SCOPE_PREFIX};
use crate::view::Node;

/// A view: state snapshot, method table and style registry in, node tree out.
pub type View = Rc<dyn Fn(&State, &Methods, &StyleRegistry) -> Node>;

/// Configuration for one app instance.
#[derive(Clone)]
pub struct AppConfig {
    /// Selector of the render root.
    pub locator: String,
    /// Initial state.
    pub state: Map<String, Value>,
    pub methods: Methods,
    /// Initial style, also the target of `reset_initial`.
    pub style: StyleSpec,
    /// `None` renders nothing.
    pub view: Option<View>,
    /// Prefix of minted scope classes.
    pub scope_prefix: String,
    /// Id of the `<style>` element; derived from the locator when `None`.
    pub stylesheet_id: Option<String>,
}

impl AppConfig {
    /// A config mounting at `locator`, with empty state, no methods, no style
    /// and no view.
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            state: Map::new(),
            methods: Methods::new(),
            style: StyleSpec::Empty,
            view: None,
            scope_prefix: DEFAULT_SCOPE_PREFIX.to_string(),
            stylesheet_id: None,
        }
    }

    /// Add initial state entries (builder).
    pub fn with_state<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.state.insert(key.into(), value.into());
        }
        self
    }

    /// Add initial state from a JSON object (builder).
    pub fn with_state_json(mut self, state: Value) -> Result<Self, Error> {
        match state {
            Value::Object(entries) => {
                self.state.extend(entries);
                Ok(self)
            }
            other => Err(Error::InvalidState(other.to_string())),
        }
    }

    /// Register a named method (builder).
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&Context, &[Value]) -> Result<(), Error> + 'static,
    ) -> Self {
        self.methods.insert(name, method);
        self
    }

    /// Set the initial style (builder).
    pub fn with_style(mut self, style: StyleSpec) -> Self {
        self.style = style;
        self
    }

    /// Set the view (builder).
    pub fn with_view(
        mut self,
        view: impl Fn(&State, &Methods, &StyleRegistry) -> Node + 'static,
    ) -> Self {
        self.view = Some(Rc::new(view));
        self
    }

    /// Set the scope class prefix (builder).
    pub fn with_scope_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.scope_prefix = prefix.into();
        self
    }

    /// Set the stylesheet element id (builder).
    pub fn with_stylesheet_id(mut self, id: impl Into<String>) -> Self {
        self.stylesheet_id = Some(id.into());
        self
    }

    /// The stylesheet id this config resolves to.
    pub fn resolved_stylesheet_id(&self) -> String {
        self.stylesheet_id
            .clone()
            .unwrap_or_else(|| format!("css-{}", content_hash(&self.locator)))
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("locator", &self.locator)
            .field("state", &self.state)
            .field("methods", &self.methods)
            .field("style", &self.style)
            .field("view", &self.view.is_some())
            .field("scope_prefix", &self.scope_prefix)
            .field("stylesheet_id", &self.stylesheet_id)
            .finish()
    }
}
