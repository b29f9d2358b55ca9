#![doc = include_str!("../README.md")]

mod attribute;
mod component;
mod config;
mod error;
mod event;
mod head;
mod memory;
mod reconcile;
mod record;
mod registry;
mod value;

pub use attribute::*;
pub use component::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use head::*;
pub use memory::*;
pub use reconcile::*;
pub use record::*;
pub use registry::*;
pub use value::*;
