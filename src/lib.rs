//! Demos for the sherby-metadata workspace live under `demos/`.
//!
//! ```sh
//! cargo run --example headless
//! ```
