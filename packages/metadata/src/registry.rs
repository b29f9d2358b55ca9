use rustc_hash::FxHashMap;

use crate::{identity_key, HeadError, HeadStore, IdentityAttribute};

/// The `<meta>` elements owned by a metadata component, keyed by their `name` or `property`.
///
/// The registry is the single source of truth for "is there already an element for this key". It is
/// seeded once from the head and afterwards only changed by the [`Reconciler`](crate::Reconciler).
/// Removing a key never touches the document; detaching the element is up to the caller.
#[derive(Debug, Clone)]
pub struct MetaRegistry<E> {
    elements: FxHashMap<String, E>,
}

impl<E> Default for MetaRegistry<E> {
    fn default() -> Self {
        Self {
            elements: FxHashMap::default(),
        }
    }
}

impl<E: Clone> MetaRegistry<E> {
    /// Adopt every identifiable `<meta>` element in the head.
    ///
    /// When two elements share a key the later one wins and the earlier one is left in the document,
    /// untracked.
    pub fn scan<H>(head: &H) -> Result<Self, HeadError>
    where
        H: HeadStore<Element = E>,
    {
        let mut registry = Self::default();

        for element in head.meta_elements()? {
            let name = head.attribute(&element, IdentityAttribute::Name.as_str());
            let property = head.attribute(&element, IdentityAttribute::Property.as_str());

            let Some(key) = identity_key(name, property) else {
                continue;
            };

            if registry.set(key.clone(), element).is_some() {
                tracing::debug!("<meta> `{key}` appears more than once, tracking the last one");
            }
        }

        tracing::trace!("adopted {} <meta> elements", registry.len());

        Ok(registry)
    }

    pub fn get(&self, key: &str) -> Option<&E> {
        self.elements.get(key)
    }

    /// Track `element` under `key`, returning the element previously tracked there.
    pub fn set(&mut self, key: impl Into<String>, element: E) -> Option<E> {
        self.elements.insert(key.into(), element)
    }

    /// Stop tracking `key`. The element stays wherever it is in the document.
    pub fn remove(&mut self, key: &str) -> Option<E> {
        self.elements.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
