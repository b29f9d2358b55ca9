/// The attribute a `<meta>` element's content lives in.
pub const CONTENT_ATTRIBUTE: &str = "content";

/// The key that targets the document title instead of a `<meta>` element.
pub const TITLE_KEY: &str = "title";

const OPEN_GRAPH_PREFIX: &str = "og:";

/// The attribute that identifies a `<meta>` element.
///
/// Open Graph tags (`og:title`, `og:description`, ...) are identified by their `property` attribute, every
/// other tag by its `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityAttribute {
    Name,
    Property,
}

impl IdentityAttribute {
    /// Pick the identity attribute for a metadata key.
    pub fn for_key(key: &str) -> Self {
        if key.starts_with(OPEN_GRAPH_PREFIX) {
            IdentityAttribute::Property
        } else {
            IdentityAttribute::Name
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityAttribute::Name => "name",
            IdentityAttribute::Property => "property",
        }
    }
}

impl std::fmt::Display for IdentityAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the key of a `<meta>` element that already lives in the head.
///
/// A non-empty `name` wins, then a non-empty `property`. Elements identified any other way have no key.
pub fn identity_key(name: Option<String>, property: Option<String>) -> Option<String> {
    name.filter(|name| !name.is_empty())
        .or_else(|| property.filter(|property| !property.is_empty()))
}
