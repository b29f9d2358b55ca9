use crate::{
    HeadError, HeadStore, IdentityAttribute, MetaRegistry, MetaValue, MetadataRecord, TITLE_KEY,
};

/// A single change the [`Reconciler`] applied to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaEdit {
    /// The document title was set. A falsy `title` sets it to the empty string.
    SetTitle(String),

    /// A new `<meta>` element was appended to the head.
    Create {
        key: String,
        attribute: IdentityAttribute,
        content: String,
    },

    /// The content of a tracked element was replaced.
    Update { key: String, content: String },

    /// A tracked element was detached from the head and forgotten.
    Remove { key: String },
}

/// Applies metadata records to a document head.
///
/// The diff baseline is the [`MetaRegistry`], not the previously applied record. Keys missing from a record
/// are left alone; a falsy value is what clears a tag.
pub struct Reconciler<H: HeadStore> {
    head: H,
    registry: MetaRegistry<H::Element>,
}

impl<H: HeadStore> Reconciler<H> {
    /// Create a reconciler over `head`, adopting the `<meta>` elements already there.
    pub fn new(head: H) -> Result<Self, HeadError> {
        let registry = MetaRegistry::scan(&head)?;
        Ok(Self { head, registry })
    }

    /// Apply every entry of `data` to the document and return the edits that were made.
    pub fn reconcile(&mut self, data: &MetadataRecord) -> Result<Vec<MetaEdit>, HeadError> {
        let mut edits = Vec::new();

        for (key, value) in data.iter() {
            if let Some(edit) = self.apply(key, value)? {
                tracing::trace!("{edit:?}");
                edits.push(edit);
            }
        }

        tracing::debug!(
            "reconciled {} metadata entries with {} edits",
            data.len(),
            edits.len()
        );

        Ok(edits)
    }

    fn apply(&mut self, key: &str, value: &MetaValue) -> Result<Option<MetaEdit>, HeadError> {
        if key == TITLE_KEY {
            let title = if value.is_truthy() {
                value.to_content()
            } else {
                String::new()
            };
            self.head.set_title(&title);
            return Ok(Some(MetaEdit::SetTitle(title)));
        }

        if let Some(element) = self.registry.get(key) {
            if value.is_truthy() {
                let content = value.to_content();
                self.head.set_content(element, &content)?;
                return Ok(Some(MetaEdit::Update {
                    key: key.to_string(),
                    content,
                }));
            }

            self.head.remove(element)?;
            self.registry.remove(key);
            return Ok(Some(MetaEdit::Remove {
                key: key.to_string(),
            }));
        }

        // nothing to create and nothing to remove
        if !value.is_truthy() {
            return Ok(None);
        }

        let attribute = IdentityAttribute::for_key(key);
        let content = value.to_content();

        let element = self.head.create_meta()?;
        self.head.set_attribute(&element, attribute.as_str(), key)?;
        self.head.set_content(&element, &content)?;
        self.head.append(&element)?;
        self.registry.set(key, element);

        Ok(Some(MetaEdit::Create {
            key: key.to_string(),
            attribute,
            content,
        }))
    }

    pub fn head(&self) -> &H {
        &self.head
    }

    pub fn registry(&self) -> &MetaRegistry<H::Element> {
        &self.registry
    }
}
