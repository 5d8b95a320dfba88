//! Node types: NodeId, NodeData, ElementData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a document node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Input types whose controls expose a text selection.
const TEXT_INPUT_TYPES: &[&str] = &["text", "search", "url", "tel", "password"];

/// Data associated with a single document node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

impl NodeData {
    /// The element payload, if this is an element node.
    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    /// Mutable element payload, if this is an element node.
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    /// The text, if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NodeData::Text(text) => Some(text),
            NodeData::Element(_) => None,
        }
    }
}

/// An element: tag name, id, class list, other attributes and the live
/// state of form controls.
///
/// `id` and `class` are held in dedicated fields; [`ElementData::attribute`]
/// and [`ElementData::set_attribute`] route through them so callers can treat
/// every attribute uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Lowercase tag name (e.g. "div", "input").
    pub tag: String,
    /// Optional unique id (CSS #id selector).
    pub id: Option<String>,
    /// CSS classes (for .class selector), in insertion order, no duplicates.
    pub classes: Vec<String>,
    /// Every other attribute in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Live value of a form control. Seeded by the `value` attribute.
    pub value: Option<String>,
    /// Selection range of a text-entry control, in characters.
    pub selection: Option<(usize, usize)>,
}

impl ElementData {
    /// Create an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            value: None,
            selection: None,
        }
    }

    /// Set the CSS id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Check whether this element has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. Duplicates are ignored.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Remove a CSS class.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Read an attribute. `class` is the space-joined class list.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" if self.classes.is_empty() => None,
            "class" => Some(self.classes.join(" ")),
            _ => self
                .attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
        }
    }

    /// Whether an attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        match name {
            "id" => self.id.is_some(),
            "class" => !self.classes.is_empty(),
            _ => self.attributes.iter().any(|(key, _)| key == name),
        }
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// `class` replaces the class list, `value` also resets the live value.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match name.as_str() {
            "id" => self.id = Some(value),
            "class" => {
                self.classes.clear();
                for class in value.split_whitespace() {
                    self.add_class(class);
                }
            }
            _ => {
                if name == "value" {
                    self.value = Some(value.clone());
                }
                match self.attributes.iter_mut().find(|(key, _)| *key == name) {
                    Some((_, slot)) => *slot = value,
                    None => self.attributes.push((name, value)),
                }
            }
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, name: &str) {
        match name {
            "id" => self.id = None,
            "class" => self.classes.clear(),
            _ => self.attributes.retain(|(key, _)| key != name),
        }
    }

    /// The `type` of an `input`, defaulting to `text`.
    pub fn input_type(&self) -> Option<String> {
        (self.tag == "input").then(|| {
            self.attribute("type")
                .map(|t| t.to_ascii_lowercase())
                .unwrap_or_else(|| "text".to_string())
        })
    }

    /// Whether this element can hold focus.
    pub fn is_focusable(&self) -> bool {
        if self.has_attribute("disabled") && self.is_form_control() {
            return false;
        }
        match self.tag.as_str() {
            "input" => self.input_type().as_deref() != Some("hidden"),
            "textarea" | "select" | "button" => true,
            "a" => self.has_attribute("href") || self.has_attribute("tabindex"),
            _ => self.has_attribute("tabindex"),
        }
    }

    /// Whether this element is a form control carrying a value.
    pub fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select" | "button")
    }

    /// Whether this element exposes a text selection range.
    pub fn supports_selection(&self) -> bool {
        match self.tag.as_str() {
            "textarea" => true,
            "input" => self
                .input_type()
                .is_some_and(|t| TEXT_INPUT_TYPES.contains(&t.as_str())),
            _ => false,
        }
    }
}
