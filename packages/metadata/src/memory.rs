use std::cell::RefCell;

use crate::{HeadError, HeadStore, IdentityAttribute, CONTENT_ATTRIBUTE};

/// A handle to a `<meta>` element owned by a [`MemoryHead`]. Two handles are equal when they point at the
/// same element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryMeta(usize);

#[derive(Default)]
struct MemoryHeadState {
    title: String,
    // every element ever created, attached or not
    elements: Vec<Vec<(String, String)>>,
    // indices into `elements` in document order
    children: Vec<usize>,
}

/// A [`HeadStore`] that keeps the title and `<meta>` elements in memory.
///
/// ```rust
/// use sherby_metadata::{HeadStore, IdentityAttribute, MemoryHead};
///
/// let head = MemoryHead::default()
///     .with_title("Old title")
///     .with_meta(IdentityAttribute::Name, "description", "Old description");
///
/// assert_eq!(head.title(), "Old title");
/// assert_eq!(head.query(IdentityAttribute::Name, "description").len(), 1);
/// ```
#[derive(Default)]
pub struct MemoryHead {
    state: RefCell<MemoryHeadState>,
}

impl MemoryHead {
    /// Create a [`MemoryHead`] with an empty title and no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial document title.
    pub fn with_title(self, title: impl ToString) -> Self {
        self.state.borrow_mut().title = title.to_string();
        self
    }

    /// Append a `<meta>` element identified by `attribute="value"` with the given content.
    pub fn with_meta(
        self,
        attribute: IdentityAttribute,
        value: impl ToString,
        content: impl ToString,
    ) -> Self {
        self.with_raw_meta(attribute.as_str(), value, content)
    }

    /// Append a `<meta>` element with an arbitrary identity attribute, e.g. `http-equiv` or `charset`.
    pub fn with_raw_meta(
        self,
        attribute: &str,
        value: impl ToString,
        content: impl ToString,
    ) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let id = state.elements.len();
            state.elements.push(vec![
                (attribute.to_string(), value.to_string()),
                (CONTENT_ATTRIBUTE.to_string(), content.to_string()),
            ]);
            state.children.push(id);
        }
        self
    }

    /// All attached elements with `attribute="value"`, in document order.
    pub fn query(&self, attribute: IdentityAttribute, value: &str) -> Vec<MemoryMeta> {
        let state = self.state.borrow();
        state
            .children
            .iter()
            .copied()
            .filter(|&id| {
                state.elements[id]
                    .iter()
                    .any(|(name, current)| name == attribute.as_str() && current == value)
            })
            .map(MemoryMeta)
            .collect()
    }

    /// The content of an element, attached or not.
    pub fn content(&self, element: &MemoryMeta) -> Option<String> {
        self.attribute(element, CONTENT_ATTRIBUTE)
    }

    /// Whether the element is currently a child of the head.
    pub fn is_attached(&self, element: &MemoryMeta) -> bool {
        self.state.borrow().children.contains(&element.0)
    }

    /// The number of `<meta>` elements in the head.
    pub fn len(&self) -> usize {
        self.state.borrow().children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HeadStore for MemoryHead {
    type Element = MemoryMeta;

    fn meta_elements(&self) -> Result<Vec<MemoryMeta>, HeadError> {
        Ok(self
            .state
            .borrow()
            .children
            .iter()
            .copied()
            .map(MemoryMeta)
            .collect())
    }

    fn attribute(&self, element: &MemoryMeta, name: &str) -> Option<String> {
        let state = self.state.borrow();
        state
            .elements
            .get(element.0)?
            .iter()
            .find(|(current, _)| current == name)
            .map(|(_, value)| value.clone())
    }

    fn create_meta(&self) -> Result<MemoryMeta, HeadError> {
        let mut state = self.state.borrow_mut();
        state.elements.push(Vec::new());
        Ok(MemoryMeta(state.elements.len() - 1))
    }

    fn set_attribute(&self, element: &MemoryMeta, name: &str, value: &str) -> Result<(), HeadError> {
        let mut state = self.state.borrow_mut();
        let attributes = state
            .elements
            .get_mut(element.0)
            .ok_or_else(|| HeadError::dom("setAttribute", "unknown element"))?;
        match attributes.iter_mut().find(|(current, _)| current == name) {
            Some((_, current)) => *current = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn append(&self, element: &MemoryMeta) -> Result<(), HeadError> {
        let mut state = self.state.borrow_mut();
        if element.0 >= state.elements.len() {
            return Err(HeadError::dom("appendChild", "unknown element"));
        }
        // appending an attached node moves it to the end
        state.children.retain(|&id| id != element.0);
        state.children.push(element.0);
        Ok(())
    }

    fn remove(&self, element: &MemoryMeta) -> Result<(), HeadError> {
        let mut state = self.state.borrow_mut();
        let position = state
            .children
            .iter()
            .position(|&id| id == element.0)
            .ok_or(HeadError::Detached)?;
        state.children.remove(position);
        Ok(())
    }

    fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    fn set_title(&self, title: &str) {
        self.state.borrow_mut().title = title.to_string();
    }
}
