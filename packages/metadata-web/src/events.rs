use sherby_metadata::{EventHandler, HeadError, MetadataEvent, MetadataRecord, Payload, UpdateChannel};
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::{CustomEvent, Event, EventTarget};

use crate::head::js_error;

/// The `detail` of a metadata `CustomEvent`.
#[derive(Debug, Clone)]
pub struct JsPayload(JsValue);

impl JsPayload {
    pub fn new(detail: JsValue) -> Self {
        Self(detail)
    }

    pub fn value(&self) -> &JsValue {
        &self.0
    }
}

impl Payload for JsPayload {
    fn admit(&self) -> Option<MetadataRecord> {
        crate::convert::admit(&self.0)
    }
}

/// Delivers `CustomEvent`s dispatched on a DOM event target, the window by default.
///
/// ```js
/// window.dispatchEvent(new CustomEvent('sherby-metadata', {
///   detail: { title: 'This is the page title' }
/// }));
/// ```
#[derive(Debug, Clone)]
pub struct WindowChannel {
    target: EventTarget,
}

impl WindowChannel {
    pub fn new(target: EventTarget) -> Self {
        Self { target }
    }

    /// Listen on the current window.
    pub fn from_window() -> Result<Self, HeadError> {
        let window = web_sys::window().ok_or_else(|| {
            HeadError::dom(
                "window",
                "should be run in a context with a `Window` object",
            )
        })?;
        Ok(Self::new(window.into()))
    }
}

impl UpdateChannel for WindowChannel {
    type Payload = JsPayload;
    type Listener = WindowListener;

    fn listen(
        &self,
        event_name: &str,
        handler: EventHandler<JsPayload>,
    ) -> Result<WindowListener, HeadError> {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let detail = event
                .dyn_ref::<CustomEvent>()
                .map(CustomEvent::detail)
                .unwrap_or(JsValue::UNDEFINED);

            let metadata_event = MetadataEvent::new(JsPayload::new(detail));
            handler(&metadata_event);

            if metadata_event.propagation_stopped() {
                event.stop_propagation();
            }
        });

        self.target
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            .map_err(|err| js_error("addEventListener", err))?;

        Ok(WindowListener {
            target: self.target.clone(),
            event_name: event_name.to_string(),
            closure,
        })
    }
}

/// Keeps a listener attached to its event target. The listener is removed when this is dropped.
pub struct WindowListener {
    target: EventTarget,
    event_name: String,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(&self.event_name, self.closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to remove the `{}` listener: {err:?}", self.event_name);
        }
    }
}
