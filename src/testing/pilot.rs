//! Pilot: programmatic interaction with a mounted app.
//!
//! The `Pilot` mounts an [`App`] into its own host document and simulates
//! what a user does in a browser: clicking, typing, changing and submitting
//! controls, moving focus and selecting text. Every action dispatches the
//! same events a browser would, so handlers, bindings and re-renders run
//! exactly as they do in an embedding.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::app::{App, AppConfig};
use crate::dom::{dispatch, Document, Event, NodeId};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```ignore
/// use uberapp::testing::Pilot;
///
/// let pilot = Pilot::new(counter_config())?;
/// pilot.click("button")?;
/// assert_eq!(pilot.text_of("h1")?, "Counter: 1");
/// ```
pub struct Pilot {
    document: Rc<RefCell<Document>>,
    app: App,
}

impl Pilot {
    /// Mount `config` into a fresh document.
    ///
    /// A `#id` locator that matches nothing gets a `<div id=…>` in the body
    /// first.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        Self::with_document(Document::new(), config)
    }

    /// Mount `config` into `document`, creating the `#id` root if missing.
    pub fn with_document(mut document: Document, config: AppConfig) -> Result<Self, Error> {
        ensure_root(&mut document, &config.locator)?;
        Self::mount(Rc::new(RefCell::new(document)), config)
    }

    /// Mount `config` into a shared document as is.
    pub fn mount(document: Rc<RefCell<Document>>, config: AppConfig) -> Result<Self, Error> {
        let app = App::mount(Rc::clone(&document), config)?;
        Ok(Self { document, app })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Borrow the host document.
    pub fn document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    /// The shared document handle.
    pub fn document_handle(&self) -> &Rc<RefCell<Document>> {
        &self.document
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The first element under the root matching `selector`.
    pub fn query(&self, selector: &str) -> Result<NodeId, Error> {
        self.document
            .borrow()
            .query_selector(self.app.root(), selector)?
            .ok_or_else(|| Error::ElementNotFound(selector.to_string()))
    }

    /// Every element under the root matching `selector`.
    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, Error> {
        Ok(self.document.borrow().query_selector_all(self.app.root(), selector)?)
    }

    /// Text content of the first match.
    pub fn text_of(&self, selector: &str) -> Result<String, Error> {
        let id = self.query(selector)?;
        Ok(self.document.borrow().text_content(id))
    }

    /// Text content of every match.
    pub fn texts_of(&self, selector: &str) -> Result<Vec<String>, Error> {
        let doc = self.document.borrow();
        Ok(doc
            .query_selector_all(self.app.root(), selector)?
            .into_iter()
            .map(|id| doc.text_content(id))
            .collect())
    }

    /// Live value of the first match.
    pub fn value_of(&self, selector: &str) -> Result<Option<String>, Error> {
        let id = self.query(selector)?;
        Ok(self.document.borrow().value(id).map(str::to_owned))
    }

    /// The root's children as HTML.
    pub fn html(&self) -> String {
        self.document.borrow().inner_html(self.app.root())
    }

    /// The rules of the app's stylesheet, in order.
    pub fn stylesheet_rules(&self) -> Vec<String> {
        let doc = self.document.borrow();
        doc.style_element(&self.app.stylesheet_id())
            .map(|sheet| doc.css_rules(sheet).to_vec())
            .unwrap_or_default()
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.document.borrow().active_element()
    }

    /// Selection range of the focused element.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let doc = self.document.borrow();
        doc.active_element().and_then(|id| doc.selection_range(id))
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Click the first match.
    ///
    /// A focusable target takes focus first. Clicking a submit button inside
    /// a form submits that form unless a click handler prevented it.
    pub fn click(&self, selector: &str) -> Result<(), Error> {
        let target = self.query(selector)?;
        let focused = self.document.borrow_mut().focus(target);
        if focused {
            dispatch(&self.document, target, "focus");
        }
        let form = {
            let doc = self.document.borrow();
            if is_submit_control(&doc, target) {
                doc.closest_form(target)
            } else {
                None
            }
        };

        let event = dispatch(&self.document, target, "click");
        if let Some(form) = form {
            let still_there = self.document.borrow().contains(form);
            if still_there && !event.is_default_prevented() {
                dispatch(&self.document, form, "submit");
            }
        }
        Ok(())
    }

    /// Dispatch `submit` at the first match (a form or a control inside one).
    pub fn submit(&self, selector: &str) -> Result<Event, Error> {
        let target = self.query(selector)?;
        let form = self.document.borrow().closest_form(target).unwrap_or(target);
        Ok(dispatch(&self.document, form, "submit"))
    }

    /// Focus the first match. Returns whether it took focus.
    pub fn focus(&self, selector: &str) -> Result<bool, Error> {
        let target = self.query(selector)?;
        let focused = self.document.borrow_mut().focus(target);
        if focused {
            dispatch(&self.document, target, "focus");
        }
        Ok(focused)
    }

    /// Set the selection of the first match, focusing it.
    pub fn select(&self, selector: &str, start: usize, end: usize) -> Result<bool, Error> {
        let target = self.query(selector)?;
        let mut doc = self.document.borrow_mut();
        Ok(doc.focus(target) && doc.set_selection_range(target, start, end))
    }

    /// Focus the first match and type `text` one character at a time.
    ///
    /// Each character replaces the current selection of the focused element
    /// and fires `input` then `keyup`. Keystrokes follow focus, so typing
    /// continues in whatever element a re-render restored focus to.
    pub fn type_text(&self, selector: &str, text: &str) -> Result<(), Error> {
        let target = self.query(selector)?;
        if !self.document.borrow_mut().focus(target) {
            return Err(Error::msg(format!("`{selector}` cannot take focus")));
        }

        for ch in text.chars() {
            let Some(active) = self.document.borrow().active_element() else {
                break;
            };
            insert_char(&mut self.document.borrow_mut(), active, ch);
            dispatch(&self.document, active, "input");
            let active = self.document.borrow().active_element().unwrap_or(active);
            dispatch(&self.document, active, "keyup");
        }
        Ok(())
    }

    /// Set the value of the first match and fire `change`.
    pub fn change(&self, selector: &str, value: &str) -> Result<(), Error> {
        let target = self.query(selector)?;
        self.document.borrow_mut().set_value(target, value);
        dispatch(&self.document, target, "change");
        Ok(())
    }

    /// Fire `change` at the focused element, as leaving a field does.
    pub fn commit(&self) {
        let active = self.document.borrow().active_element();
        if let Some(active) = active {
            dispatch(&self.document, active, "change");
        }
    }
}

fn ensure_root(doc: &mut Document, locator: &str) -> Result<(), Error> {
    if doc.query_selector(doc.document_element(), locator)?.is_some() {
        return Ok(());
    }
    if let Some(id) = locator.strip_prefix('#') {
        let root = doc.append_element(doc.body(), "div");
        doc.set_attribute(root, "id", id);
    }
    Ok(())
}

fn is_submit_control(doc: &Document, id: NodeId) -> bool {
    let Some(el) = doc.element(id) else {
        return false;
    };
    match el.tag.as_str() {
        "button" => el
            .attribute("type")
            .is_none_or(|t| t.eq_ignore_ascii_case("submit")),
        "input" => matches!(el.input_type().as_deref(), Some("submit" | "image")),
        _ => false,
    }
}

/// Replace the selection of `id` with `ch`, leaving the caret after it.
fn insert_char(doc: &mut Document, id: NodeId, ch: char) {
    let current: Vec<char> = doc.value(id).unwrap_or_default().chars().collect();
    let (start, end) = doc
        .selection_range(id)
        .unwrap_or((current.len(), current.len()));
    let (start, end) = (start.min(current.len()), end.min(current.len()));

    let mut next: String = current[..start].iter().collect();
    next.push(ch);
    next.extend(&current[end..]);
    doc.set_value(id, next);
    doc.set_selection_range(id, start + 1, start + 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::el;
    use serde_json::json;

    fn echo_config() -> AppConfig {
        AppConfig::new("#echo")
            .with_state([("message", json!("world"))])
            .with_view(|state, _, _| {
                el("div")
                    .child(el("p").text(format!("Hello {}", state.get_str("message").unwrap_or(""))))
                    .child(el("input:text").bind_on("message", "keyup"))
                    .into()
            })
    }

    #[test]
    fn new_creates_missing_root() {
        let pilot = Pilot::new(echo_config()).unwrap();
        assert_eq!(pilot.text_of("p").unwrap(), "Hello world");
        assert_eq!(pilot.app().render_count(), 1);
    }

    #[test]
    fn query_errors() {
        let pilot = Pilot::new(echo_config()).unwrap();
        assert!(matches!(pilot.query("h6"), Err(Error::ElementNotFound(_))));
        assert!(matches!(pilot.query("p["), Err(Error::Selector(_))));
    }

    #[test]
    fn type_text_inserts_at_the_caret() {
        let pilot = Pilot::new(echo_config()).unwrap();
        pilot.select("input", 0, 0).unwrap();
        pilot.type_text("input", "a ").unwrap();
        assert_eq!(pilot.text_of("p").unwrap(), "Hello a world");
        assert_eq!(pilot.selection(), Some((2, 2)));
    }

    #[test]
    fn click_focuses_the_target_across_renders() {
        let config = AppConfig::new("#clicks")
            .with_state([("clicks", json!(0))])
            .with_method("hit", |ctx, _| {
                ctx.state().update("clicks", |v| json!(v.as_i64().unwrap_or(0) + 1));
                Ok(())
            })
            .with_view(|state, methods, _| {
                el("div")
                    .child(el("p").text(format!("{}", state.get_i64("clicks").unwrap_or(0))))
                    .child(el("button#hit").text("hit").on("click", methods.handler("hit")))
                    .into()
            });
        let pilot = Pilot::new(config).unwrap();
        let before = pilot.query("#hit").unwrap();
        pilot.click("#hit").unwrap();

        let after = pilot.query("#hit").unwrap();
        assert_ne!(before, after);
        assert_eq!(pilot.text_of("p").unwrap(), "1");
        assert_eq!(pilot.active_element(), Some(after));
    }

    #[test]
    fn click_on_plain_element_leaves_focus_alone() {
        let pilot = Pilot::new(echo_config()).unwrap();
        pilot.click("p").unwrap();
        assert_eq!(pilot.active_element(), None);
    }

    #[test]
    fn insert_char_replaces_selection() {
        let mut doc = Document::new();
        let input = doc.append_element(doc.body(), "input");
        doc.set_value(input, "hello");
        doc.set_selection_range(input, 1, 4);
        insert_char(&mut doc, input, 'X');
        assert_eq!(doc.value(input), Some("hXo"));
        assert_eq!(doc.selection_range(input), Some((2, 2)));
    }

    #[test]
    fn submit_controls() {
        let mut doc = Document::new();
        let form = doc.append_element(doc.body(), "form");
        let plain = doc.append_element(form, "button");
        let typed = doc.append_element(form, "button");
        doc.set_attribute(typed, "type", "button");
        let input = doc.append_element(form, "input");
        doc.set_attribute(input, "type", "submit");
        assert!(is_submit_control(&doc, plain));
        assert!(!is_submit_control(&doc, typed));
        assert!(is_submit_control(&doc, input));
    }
}
