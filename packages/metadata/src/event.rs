use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use slab::Slab;

use crate::{HeadError, MetadataRecord};

/// A candidate metadata record carried by an update event.
///
/// Payloads come from outside the component and may be anything the sender chose to dispatch. `admit`
/// turns the payload into a record if, and only if, it is a plain key/value object.
pub trait Payload {
    fn admit(&self) -> Option<MetadataRecord>;
}

impl Payload for serde_json::Value {
    fn admit(&self) -> Option<MetadataRecord> {
        MetadataRecord::admit(self)
    }
}

impl Payload for MetadataRecord {
    fn admit(&self) -> Option<MetadataRecord> {
        Some(self.clone())
    }
}

/// A missing payload is an `undefined` detail and is never admitted.
impl<P: Payload> Payload for Option<P> {
    fn admit(&self) -> Option<MetadataRecord> {
        self.as_ref().and_then(Payload::admit)
    }
}

/// An update event delivered to a mounted component.
#[derive(Debug)]
pub struct MetadataEvent<P> {
    detail: P,
    propagation_stopped: Cell<bool>,
}

impl<P> MetadataEvent<P> {
    pub fn new(detail: P) -> Self {
        Self {
            detail,
            propagation_stopped: Cell::new(false),
        }
    }

    /// The payload the sender attached to the event.
    pub fn detail(&self) -> &P {
        &self.detail
    }

    /// Keep the event from reaching any listener further out.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// A callback invoked for every update event a channel delivers.
pub type EventHandler<P> = Box<dyn Fn(&MetadataEvent<P>)>;

/// Something that broadcasts metadata update events, like the browser window.
///
/// Listening returns a guard. The listener stays attached for as long as the guard lives and is detached
/// when it is dropped.
pub trait UpdateChannel {
    type Payload: Payload + 'static;

    /// The guard that keeps a listener attached.
    type Listener;

    fn listen(
        &self,
        event_name: &str,
        handler: EventHandler<Self::Payload>,
    ) -> Result<Self::Listener, HeadError>;
}

type ListenerTable<P> = RefCell<Slab<(String, Rc<dyn Fn(&MetadataEvent<P>)>)>>;

/// An [`UpdateChannel`] that dispatches events in memory.
///
/// A channel plays the part of one event target. Every listener attached to it sees each event, in the
/// order they were attached. Channels made with [`nested`](Self::nested) sit inside their parent: events
/// dispatched on them bubble outwards, and stopping propagation keeps them from reaching the parent's
/// listeners.
pub struct MemoryChannel<P> {
    listeners: Rc<ListenerTable<P>>,
    parent: Option<Box<MemoryChannel<P>>>,
}

impl<P> Default for MemoryChannel<P> {
    fn default() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Slab::new())),
            parent: None,
        }
    }
}

impl<P> Clone for MemoryChannel<P> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
            parent: self.parent.clone(),
        }
    }
}

impl<P: 'static> MemoryChannel<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel inside this one, e.g. an element inside the page shell.
    pub fn nested(&self) -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Slab::new())),
            parent: Some(Box::new(self.clone())),
        }
    }

    /// Deliver `detail` to every listener of `event_name` and return the event once it has settled.
    pub fn dispatch(&self, event_name: &str, detail: P) -> MetadataEvent<P> {
        let event = MetadataEvent::new(detail);

        let mut target = Some(self);
        while let Some(channel) = target {
            channel.deliver(event_name, &event);
            if event.propagation_stopped() {
                break;
            }
            target = channel.parent.as_deref();
        }
        event
    }

    fn deliver(&self, event_name: &str, event: &MetadataEvent<P>) {
        // snapshot so handlers can attach or detach listeners while we dispatch
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, (name, _))| name == event_name)
            .map(|(_, (_, handler))| handler.clone())
            .collect();

        for handler in handlers {
            handler(event);
        }
    }

    /// Attach a listener that is not tied to a component, e.g. an outer page shell.
    pub fn listen_with(
        &self,
        event_name: &str,
        handler: impl Fn(&MetadataEvent<P>) + 'static,
    ) -> MemoryListener<P> {
        let id = self
            .listeners
            .borrow_mut()
            .insert((event_name.to_string(), Rc::new(handler)));

        MemoryListener {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// The number of listeners attached to this channel across all event names.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<P: Payload + 'static> UpdateChannel for MemoryChannel<P> {
    type Payload = P;
    type Listener = MemoryListener<P>;

    fn listen(
        &self,
        event_name: &str,
        handler: EventHandler<P>,
    ) -> Result<MemoryListener<P>, HeadError> {
        Ok(self.listen_with(event_name, handler))
    }
}

/// Keeps a listener attached to a [`MemoryChannel`] until dropped.
pub struct MemoryListener<P> {
    listeners: Weak<ListenerTable<P>>,
    id: usize,
}

impl<P> Drop for MemoryListener<P> {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut listeners = listeners.borrow_mut();
            if listeners.contains(self.id) {
                listeners.remove(self.id);
            }
        }
    }
}
