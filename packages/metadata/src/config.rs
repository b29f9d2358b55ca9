/// The name of the event that carries metadata updates.
pub const DEFAULT_EVENT_NAME: &str = "sherby-metadata";

/// Configuration for a [`SherbyMetadata`](crate::SherbyMetadata) component.
///
/// # Example
///
/// ```rust
/// use sherby_metadata::MetadataConfig;
///
/// let config = MetadataConfig::default().with_event_name("page-metadata");
/// assert_eq!(config.event_name(), "page-metadata");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConfig {
    pub(crate) event_name: String,
    pub(crate) stop_propagation: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            event_name: DEFAULT_EVENT_NAME.to_string(),
            stop_propagation: true,
        }
    }
}

impl MetadataConfig {
    /// Listen for updates under a different event name.
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = name.into();
        self
    }

    /// Choose whether update events stop propagating once this component has seen them.
    ///
    /// Defaults to `true`, so listeners further out never receive an update this component handled.
    pub fn with_stop_propagation(mut self, stop: bool) -> Self {
        self.stop_propagation = stop;
        self
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn stop_propagation(&self) -> bool {
        self.stop_propagation
    }
}
