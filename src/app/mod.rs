//! Application: mounting, the render pass and the public app handle.
//!
//! An [`App`] owns one render root in a shared host document, one state
//! store, one style registry and one view. Every state write and every style
//! mutation runs a full render pass synchronously:
//!
//! 1. capture focus if it is inside the root,
//! 2. call the view on a state snapshot,
//! 3. replace every child of the root,
//! 4. scope the style rules and rewrite the stylesheet,
//! 5. restore focus and selection.

pub mod config;
pub mod context;

pub use config::{AppConfig, View};
pub use context::{Context, Method, Methods, StyleHandle};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::{debug, debug_span, warn};

use crate::dom::{Document, NodeId};
use crate::error::Error;
use crate::reactive::Store;
use crate::render::{materialize, FocusSnapshot, RenderCycle};
use crate::style::{ScopeBinder, StyleRegistry, StyleSpec};

// ---------------------------------------------------------------------------
// AppInner
// ---------------------------------------------------------------------------

/// Shared state of a mounted app. Listeners and the store hook reach it
/// through weak references.
pub(crate) struct AppInner {
    pub(crate) document: Rc<RefCell<Document>>,
    pub(crate) locator: String,
    pub(crate) root: NodeId,
    pub(crate) store: Store,
    pub(crate) style: RefCell<StyleRegistry>,
    pub(crate) initial_style: StyleSpec,
    pub(crate) binder: ScopeBinder,
    pub(crate) methods: Methods,
    pub(crate) view: Option<View>,
    pub(crate) cycle: RenderCycle,
    pub(crate) mounted: Cell<bool>,
    this: Weak<AppInner>,
}

impl AppInner {
    /// One full render pass. Refused while another pass is running.
    pub(crate) fn render(&self) {
        if !self.mounted.get() {
            return;
        }
        let Some(guard) = self.cycle.begin() else {
            warn!(root = %self.locator, "render requested during a render; skipped");
            return;
        };
        let span = debug_span!("render", root = %self.locator, pass = guard.pass());
        let _enter = span.enter();

        let focus = FocusSnapshot::capture(&self.document.borrow(), self.root);
        let state = self.store.snapshot();
        // The view sees a copy so that style writes made from it cannot
        // collide with this borrow.
        let style = self.style.borrow().clone();
        let tree = self
            .view
            .as_ref()
            .map(|view| view(&state, &self.methods, &style));

        let Ok(mut doc) = self.document.try_borrow_mut() else {
            warn!(root = %self.locator, "document is borrowed; render skipped");
            return;
        };
        doc.remove_children(self.root);
        if let Some(tree) = &tree {
            materialize(&mut doc, self.root, tree, &self.this, &state);
        }
        self.style
            .borrow_mut()
            .apply(&mut doc, self.root, &self.binder);
        if let Some(focus) = focus {
            focus.restore(&mut doc);
        }
        debug!(children = doc.children(self.root).len(), "render complete");
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// A mounted application.
pub struct App {
    inner: Rc<AppInner>,
}

impl App {
    /// Mount an app at `config.locator` and run the first render.
    ///
    /// Nothing is created when the locator matches no element or the style
    /// spec is invalid.
    pub fn mount(document: Rc<RefCell<Document>>, config: AppConfig) -> Result<App, Error> {
        let stylesheet_id = config.resolved_stylesheet_id();
        let AppConfig {
            locator,
            state,
            methods,
            style,
            view,
            scope_prefix,
            ..
        } = config;

        let (root, registry) = {
            let mut doc = document.borrow_mut();
            let root = doc
                .query_selector(doc.document_element(), &locator)?
                .ok_or_else(|| Error::MountTargetNotFound(locator.clone()))?;
            let registry = StyleRegistry::from_spec(&mut doc, &stylesheet_id, &style)?;
            (root, registry)
        };

        let binder = ScopeBinder::new(locator.as_str()).with_prefix(scope_prefix);
        let inner = Rc::new_cyclic(|this| AppInner {
            document,
            locator,
            root,
            store: Store::new(state),
            style: RefCell::new(registry),
            initial_style: style,
            binder,
            methods,
            view,
            cycle: RenderCycle::new(),
            mounted: Cell::new(true),
            this: Weak::clone(this),
        });

        let hook = Rc::downgrade(&inner);
        inner.store.on_write(Rc::new(move || {
            if let Some(app) = hook.upgrade() {
                app.render();
            }
        }));

        debug!(root = %inner.locator, stylesheet = %stylesheet_id, "app mounted");
        inner.render();
        Ok(App { inner })
    }

    /// The state store. Writes re-render.
    pub fn state(&self) -> &Store {
        &self.inner.store
    }

    /// The style registry. Mutations re-render.
    pub fn style(&self) -> StyleHandle<'_> {
        StyleHandle::new(&self.inner)
    }

    /// A context, as given to methods and handlers.
    pub fn context(&self) -> Context {
        Context::new(Rc::clone(&self.inner))
    }

    /// Call the method `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<(), Error> {
        self.context().call(name, args)
    }

    /// Run a render pass now.
    pub fn render(&self) {
        self.inner.render();
    }

    /// Number of render passes run so far, the mount render included.
    pub fn render_count(&self) -> u64 {
        self.inner.cycle.count()
    }

    /// The render root.
    pub fn root(&self) -> NodeId {
        self.inner.root
    }

    pub fn locator(&self) -> &str {
        &self.inner.locator
    }

    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.inner.document
    }

    /// Id of the stylesheet element.
    pub fn stylesheet_id(&self) -> String {
        self.inner.style.borrow().sheet_id().to_string()
    }

    /// Stop rendering, empty the root and remove the stylesheet.
    pub fn unmount(self) {
        self.inner.mounted.set(false);
        self.inner.store.clear_hook();
        let mut doc = self.inner.document.borrow_mut();
        doc.remove_children(self.inner.root);
        self.inner.style.borrow().detach(&mut doc);
        debug!(root = %self.inner.locator, "app unmounted");
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("locator", &self.inner.locator)
            .field("root", &self.inner.root)
            .field("store", &self.inner.store)
            .field("renders", &self.inner.cycle.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{el, Node};
    use serde_json::json;

    fn document_with(id: &str) -> Rc<RefCell<Document>> {
        let mut doc = Document::new();
        let root = doc.append_element(doc.body(), "div");
        doc.set_attribute(root, "id", id);
        Rc::new(RefCell::new(doc))
    }

    fn counter_config() -> AppConfig {
        AppConfig::new("#counter")
            .with_state([("counter", json!(0))])
            .with_view(|state, _, _| {
                el("div")
                    .child(el("h1").text(format!("Counter: {}", state.get_i64("counter").unwrap_or(0))))
                    .into()
            })
    }

    // ── Mounting ─────────────────────────────────────────────────────

    #[test]
    fn mount_renders_once() {
        let doc = document_with("counter");
        let app = App::mount(Rc::clone(&doc), counter_config()).unwrap();
        assert_eq!(app.render_count(), 1);
        assert_eq!(
            doc.borrow().inner_html(app.root()),
            "<div><h1>Counter: 0</h1></div>"
        );
        assert!(doc.borrow().style_element(&app.stylesheet_id()).is_some());
    }

    #[test]
    fn mount_target_not_found_creates_nothing() {
        let doc = document_with("other");
        let before = doc.borrow().len();
        let err = App::mount(Rc::clone(&doc), counter_config()).unwrap_err();
        assert!(matches!(err, Error::MountTargetNotFound(ref l) if l == "#counter"));
        assert_eq!(doc.borrow().len(), before);
    }

    #[test]
    fn invalid_style_fails_mount() {
        let doc = document_with("counter");
        let err = App::mount(
            Rc::clone(&doc),
            counter_config().with_style(StyleSpec::css("h1 { color }")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Style(_)));
    }

    // ── Rendering ────────────────────────────────────────────────────

    #[test]
    fn each_write_renders_once() {
        let doc = document_with("counter");
        let app = App::mount(Rc::clone(&doc), counter_config()).unwrap();
        app.state().update("counter", |v| json!(v.as_i64().unwrap_or(0) + 1));
        assert_eq!(app.render_count(), 2);
        assert_eq!(
            doc.borrow().inner_html(app.root()),
            "<div><h1>Counter: 1</h1></div>"
        );
    }

    #[test]
    fn write_from_inside_the_view_is_kept_but_not_rendered() {
        let doc = document_with("echo");
        let slot: Rc<RefCell<Option<Context>>> = Rc::new(RefCell::new(None));
        let view_slot = Rc::clone(&slot);
        let config = AppConfig::new("#echo").with_view(move |state, _, _| {
            if let Some(ctx) = view_slot.borrow().as_ref() {
                ctx.state().set("echo", true);
            }
            Node::text(format!("{:?}", state.get_bool("echo")))
        });
        let app = App::mount(Rc::clone(&doc), config).unwrap();
        *slot.borrow_mut() = Some(app.context());

        app.render();
        assert_eq!(app.render_count(), 2);
        assert_eq!(app.state().get("echo"), Some(json!(true)));
        assert_eq!(doc.borrow().inner_html(app.root()), "None");

        // Drop the context held by the view before the app goes away.
        slot.borrow_mut().take();
    }

    // ── Methods ──────────────────────────────────────────────────────

    #[test]
    fn call_runs_methods_with_arguments() {
        let doc = document_with("counter");
        let config = counter_config().with_method("add", |ctx, args| {
            let step = args.first().and_then(Value::as_i64).unwrap_or(1);
            ctx.state().update("counter", |v| json!(v.as_i64().unwrap_or(0) + step));
            Ok(())
        });
        let app = App::mount(Rc::clone(&doc), config).unwrap();
        app.call("add", &[json!(5)]).unwrap();
        assert_eq!(app.state().get("counter"), Some(json!(5)));
        assert!(matches!(app.call("nope", &[]), Err(Error::MethodNotFound(_))));
    }

    #[test]
    fn method_update_reads_other_keys() {
        let doc = document_with("counter");
        let config = counter_config().with_method("total", |ctx, _| {
            ctx.state().update("total", |_| {
                json!(ctx.state().get("counter").and_then(|v| v.as_i64()).unwrap_or(0) + 1)
            });
            Ok(())
        });
        let app = App::mount(Rc::clone(&doc), config).unwrap();
        app.state().set("counter", 2);
        app.call("total", &[]).unwrap();
        assert_eq!(app.state().get("total"), Some(json!(3)));
        assert_eq!(app.render_count(), 3);
    }

    // ── Unmount ──────────────────────────────────────────────────────

    #[test]
    fn unmount_clears_root_and_stylesheet() {
        let doc = document_with("counter");
        let app = App::mount(Rc::clone(&doc), counter_config()).unwrap();
        let (root, sheet_id) = (app.root(), app.stylesheet_id());
        let ctx = app.context();
        app.unmount();

        assert!(doc.borrow().children(root).is_empty());
        assert!(doc.borrow().style_element(&sheet_id).is_none());
        ctx.state().set("counter", 3);
        assert!(doc.borrow().children(root).is_empty());
    }
}
