use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    HeadError, HeadStore, MetaEdit, MetadataConfig, MetadataEvent, MetadataRecord, Payload,
    Reconciler, UpdateChannel,
};

struct MetadataState<H: HeadStore> {
    data: MetadataRecord,
    reconciler: Reconciler<H>,
}

impl<H: HeadStore> MetadataState<H> {
    fn replace(&mut self, data: MetadataRecord) -> Result<Vec<MetaEdit>, HeadError> {
        self.data = data;
        self.reconciler.reconcile(&self.data)
    }
}

/// Manages the `<meta>` tags and title of a page for search engines.
///
/// The component owns the tags it creates and adopts the ones it finds in the head when it is
/// constructed. Page-level code updates the metadata either by assigning a new record with
/// [`set_data`](Self::set_data) or, once the component is mounted, by dispatching an update event that
/// carries the record.
///
/// ```rust
/// use std::rc::Rc;
/// use sherby_metadata::{HeadStore, MemoryHead, MetadataRecord, SherbyMetadata};
///
/// let head = Rc::new(MemoryHead::new());
/// let metadata = SherbyMetadata::new(head.clone()).unwrap();
///
/// metadata
///     .set_data(
///         MetadataRecord::new()
///             .with("title", "This is the page title")
///             .with("description", "This is the page description"),
///     )
///     .unwrap();
///
/// assert_eq!(head.title(), "This is the page title");
/// assert_eq!(head.len(), 1);
/// ```
pub struct SherbyMetadata<H: HeadStore> {
    state: Rc<RefCell<MetadataState<H>>>,
    config: MetadataConfig,
    mounts: Rc<Cell<usize>>,
}

impl<H: HeadStore + 'static> SherbyMetadata<H> {
    /// Create the component with the default configuration.
    pub fn new(head: H) -> Result<Self, HeadError> {
        Self::with_config(head, MetadataConfig::default())
    }

    /// Create the component, adopting the `<meta>` elements already in `head`.
    ///
    /// Nothing is written to the document until the first record arrives.
    pub fn with_config(head: H, config: MetadataConfig) -> Result<Self, HeadError> {
        let state = MetadataState {
            data: MetadataRecord::new(),
            reconciler: Reconciler::new(head)?,
        };

        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            config,
            mounts: Rc::new(Cell::new(0)),
        })
    }

    /// The record most recently assigned or received.
    pub fn data(&self) -> MetadataRecord {
        self.state.borrow().data.clone()
    }

    /// Replace the current record and apply it to the document.
    ///
    /// Every assignment is reconciled, even when the record equals the current one. Keys that were in the
    /// previous record but are missing from `data` keep their tags.
    pub fn set_data(&self, data: MetadataRecord) -> Result<Vec<MetaEdit>, HeadError> {
        self.state.borrow_mut().replace(data)
    }

    /// Handle an update event.
    ///
    /// Returns `Ok(None)` when the payload was not a plain record, in which case the current record is kept.
    pub fn handle_event<P: Payload>(
        &self,
        event: &MetadataEvent<P>,
    ) -> Result<Option<Vec<MetaEdit>>, HeadError> {
        receive(&self.state, &self.config, event)
    }

    /// Start listening for update events on `channel`.
    ///
    /// The component listens for as long as the returned [`Mounted`] guard lives.
    pub fn mount<C: UpdateChannel>(&self, channel: &C) -> Result<Mounted<C::Listener>, HeadError> {
        let state = Rc::downgrade(&self.state);
        let config = self.config.clone();

        let listener = channel.listen(
            &self.config.event_name,
            Box::new(move |event: &MetadataEvent<C::Payload>| {
                let Some(state) = state.upgrade() else {
                    return;
                };
                if let Err(err) = receive(&state, &config, event) {
                    tracing::error!("Failed to apply a metadata update: {err}");
                }
            }),
        )?;

        tracing::trace!("listening for `{}` events", self.config.event_name);
        self.mounts.set(self.mounts.get() + 1);

        Ok(Mounted {
            _listener: listener,
            mounts: self.mounts.clone(),
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.mounts.get() > 0
    }

    pub fn config(&self) -> &MetadataConfig {
        &self.config
    }

    /// The keys of the `<meta>` elements the component currently owns.
    pub fn tracked_keys(&self) -> Vec<String> {
        let state = self.state.borrow();
        let mut keys: Vec<_> = state
            .reconciler
            .registry()
            .keys()
            .map(str::to_string)
            .collect();
        keys.sort();
        keys
    }
}

fn receive<H: HeadStore, P: Payload>(
    state: &RefCell<MetadataState<H>>,
    config: &MetadataConfig,
    event: &MetadataEvent<P>,
) -> Result<Option<Vec<MetaEdit>>, HeadError> {
    let admitted = event.detail().admit();

    if config.stop_propagation {
        event.stop_propagation();
    }

    let Some(data) = admitted else {
        tracing::debug!("Ignoring a metadata event whose detail is not a plain object");
        return Ok(None);
    };

    let Ok(mut state) = state.try_borrow_mut() else {
        tracing::warn!("Ignoring a metadata event dispatched while the head was being updated");
        return Ok(None);
    };

    state.replace(data).map(Some)
}

/// Keeps a [`SherbyMetadata`] component listening for update events. Dropping it unmounts the component.
#[must_use = "the component stops listening as soon as the guard is dropped"]
pub struct Mounted<L> {
    _listener: L,
    mounts: Rc<Cell<usize>>,
}

impl<L> Mounted<L> {
    /// Stop listening for update events.
    pub fn unmount(self) {}
}

impl<L> Drop for Mounted<L> {
    fn drop(&mut self) {
        self.mounts.set(self.mounts.get().saturating_sub(1));
    }
}
