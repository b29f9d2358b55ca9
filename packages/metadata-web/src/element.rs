use sherby_metadata::{HeadError, MetadataRecord, Mounted, SherbyMetadata};
use wasm_bindgen::{prelude::*, JsCast};

use crate::{convert, WebHead, WindowChannel, WindowListener};

fn to_js_error(err: HeadError) -> JsError {
    JsError::new(&err.to_string())
}

/// The `<sherby-metadata>` element, exported to JavaScript.
///
/// A custom element class forwards its `data` property and lifecycle callbacks here:
///
/// ```js
/// import { SherbyMetadataElement } from './sherby_metadata_web.js';
///
/// class SherbyMetadata extends HTMLElement {
///   #inner = new SherbyMetadataElement();
///   get data() { return this.#inner.data; }
///   set data(value) { this.#inner.data = value; }
///   connectedCallback() { this.#inner.connectedCallback(); }
///   disconnectedCallback() { this.#inner.disconnectedCallback(); }
/// }
///
/// customElements.define('sherby-metadata', SherbyMetadata);
/// ```
#[wasm_bindgen]
pub struct SherbyMetadataElement {
    component: SherbyMetadata<WebHead>,
    mounted: Option<Mounted<WindowListener>>,
}

#[wasm_bindgen]
impl SherbyMetadataElement {
    /// Create the element and adopt the `<meta>` tags already in the document head.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SherbyMetadataElement, JsError> {
        let head = WebHead::from_window().map_err(to_js_error)?;
        let component = SherbyMetadata::new(head).map_err(to_js_error)?;

        Ok(Self {
            component,
            mounted: None,
        })
    }

    /// A copy of the metadata currently applied to the page.
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> JsValue {
        convert::record_to_object(&self.component.data()).into()
    }

    /// Replace the metadata and apply it to the document head.
    #[wasm_bindgen(setter)]
    pub fn set_data(&self, value: JsValue) {
        let data = if value.is_object() {
            convert::record_from_object(value.unchecked_ref())
        } else {
            tracing::warn!("`data` must be an object, treating {value:?} as an empty record");
            MetadataRecord::new()
        };

        if let Err(err) = self.component.set_data(data) {
            tracing::error!("Failed to update the document head: {err}");
        }
    }

    /// Start listening for `sherby-metadata` events on the window.
    #[wasm_bindgen(js_name = connectedCallback)]
    pub fn connected_callback(&mut self) -> Result<(), JsError> {
        if self.mounted.is_some() {
            return Ok(());
        }

        let channel = WindowChannel::from_window().map_err(to_js_error)?;
        self.mounted = Some(self.component.mount(&channel).map_err(to_js_error)?);
        Ok(())
    }

    /// Stop listening for `sherby-metadata` events.
    #[wasm_bindgen(js_name = disconnectedCallback)]
    pub fn disconnected_callback(&mut self) {
        self.mounted = None;
    }

    #[wasm_bindgen(getter, js_name = isConnected)]
    pub fn is_connected(&self) -> bool {
        self.component.is_mounted()
    }
}
