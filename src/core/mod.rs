//! Core invoice record, dataset model, and the forward transform.
//!
//! This module provides the canonical invoice record shared by every
//! transform, the row-oriented dataset it is built from, and the small
//! value-cleaning rules applied on the way in and out.

mod amount;
pub mod columns;
mod dataset;
mod defaults;
mod error;
mod forward;
mod normalize;
mod resolve;
mod serialize;
mod types;

pub use amount::*;
pub use dataset::*;
pub use defaults::*;
pub use error::*;
pub use forward::*;
pub use normalize::*;
pub use resolve::*;
pub use serialize::*;
pub use types::*;
