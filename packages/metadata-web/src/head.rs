use sherby_metadata::{HeadError, HeadStore};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlHeadElement, Node};

/// The web target's head store, backed by the live `document.head`.
#[derive(Debug, Clone)]
pub struct WebHead {
    document: Document,
}

impl WebHead {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Use the document of the current window.
    pub fn from_window() -> Result<Self, HeadError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| {
                HeadError::dom(
                    "window.document",
                    "should be run in a context with a `Window` object",
                )
            })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn head(&self) -> Result<HtmlHeadElement, HeadError> {
        self.document.head().ok_or(HeadError::MissingHead)
    }
}

/// Turn whatever a DOM call threw into a [`HeadError`].
pub(crate) fn js_error(operation: &'static str, err: JsValue) -> HeadError {
    let message = match err.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => err.as_string().unwrap_or_else(|| format!("{err:?}")),
    };
    HeadError::dom(operation, message)
}

impl HeadStore for WebHead {
    type Element = Element;

    fn meta_elements(&self) -> Result<Vec<Element>, HeadError> {
        let nodes = self
            .head()?
            .query_selector_all("meta")
            .map_err(|err| js_error("querySelectorAll", err))?;

        Ok((0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn create_meta(&self) -> Result<Element, HeadError> {
        self.document
            .create_element("meta")
            .map_err(|err| js_error("createElement", err))
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), HeadError> {
        element
            .set_attribute(name, value)
            .map_err(|err| js_error("setAttribute", err))
    }

    fn append(&self, element: &Element) -> Result<(), HeadError> {
        self.head()?
            .append_child(element)
            .map(drop)
            .map_err(|err| js_error("appendChild", err))
    }

    fn remove(&self, element: &Element) -> Result<(), HeadError> {
        let head = self.head()?;
        let node: &Node = element;
        if !head.contains(Some(node)) {
            return Err(HeadError::Detached);
        }
        head.remove_child(element)
            .map(drop)
            .map_err(|err| js_error("removeChild", err))
    }

    fn title(&self) -> String {
        self.document.title()
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }
}
