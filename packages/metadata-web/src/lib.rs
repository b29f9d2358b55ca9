//! Sherby Metadata for the web
//!
//! This crate binds [`sherby_metadata`] to the browser through `web-sys`:
//!
//! - [`WebHead`] reads and writes the `<meta>` children of `document.head` and the document title.
//! - [`WindowChannel`] delivers `sherby-metadata` `CustomEvent`s dispatched on the window. Only details that are
//!   plain objects are admitted, and only their own enumerable keys are read.
//! - [`SherbyMetadataElement`] is exported to JavaScript and backs the `<sherby-metadata>` custom element.
//!
//! ```rust, no_run
//! use sherby_metadata::{MetadataRecord, SherbyMetadata};
//! use sherby_metadata_web::{WebHead, WindowChannel};
//!
//! let metadata = SherbyMetadata::new(WebHead::from_window().unwrap()).unwrap();
//! let _mounted = metadata.mount(&WindowChannel::from_window().unwrap()).unwrap();
//!
//! metadata
//!     .set_data(MetadataRecord::new().with("description", "This is the page description"))
//!     .unwrap();
//! ```

pub use sherby_metadata;

pub mod convert;
mod element;
mod events;
mod head;

pub use element::*;
pub use events::*;
pub use head::*;
