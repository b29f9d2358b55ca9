use std::rc::Rc;

use crate::HeadError;

/// A provider for the parts of a document the metadata component touches: the `<meta>` children of the
/// head and the document title.
///
/// The browser implementation lives in `sherby-metadata-web`; [`MemoryHead`](crate::MemoryHead) keeps
/// everything in memory for tests and headless rendering.
pub trait HeadStore {
    /// A handle to a `<meta>` element. Clones refer to the same element.
    type Element: Clone;

    /// Every `<meta>` element currently in the head, in document order.
    fn meta_elements(&self) -> Result<Vec<Self::Element>, HeadError>;

    /// Read an attribute of an element.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Create a new, detached `<meta>` element.
    fn create_meta(&self) -> Result<Self::Element, HeadError>;

    /// Set an attribute on an element.
    fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), HeadError>;

    /// Set the content of a `<meta>` element.
    fn set_content(&self, element: &Self::Element, content: &str) -> Result<(), HeadError> {
        self.set_attribute(element, crate::CONTENT_ATTRIBUTE, content)
    }

    /// Append an element to the end of the head.
    fn append(&self, element: &Self::Element) -> Result<(), HeadError>;

    /// Detach an element from the head.
    fn remove(&self, element: &Self::Element) -> Result<(), HeadError>;

    /// The current document title.
    fn title(&self) -> String;

    /// Set the document title.
    fn set_title(&self, title: &str);
}

impl<H: HeadStore + ?Sized> HeadStore for Rc<H> {
    type Element = H::Element;

    fn meta_elements(&self) -> Result<Vec<Self::Element>, HeadError> {
        (**self).meta_elements()
    }

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String> {
        (**self).attribute(element, name)
    }

    fn create_meta(&self) -> Result<Self::Element, HeadError> {
        (**self).create_meta()
    }

    fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), HeadError> {
        (**self).set_attribute(element, name, value)
    }

    fn set_content(&self, element: &Self::Element, content: &str) -> Result<(), HeadError> {
        (**self).set_content(element, content)
    }

    fn append(&self, element: &Self::Element) -> Result<(), HeadError> {
        (**self).append(element)
    }

    fn remove(&self, element: &Self::Element) -> Result<(), HeadError> {
        (**self).remove(element)
    }

    fn title(&self) -> String {
        (**self).title()
    }

    fn set_title(&self, title: &str) {
        (**self).set_title(title)
    }
}
