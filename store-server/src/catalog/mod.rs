//! Catalog Maintenance Module
//!
//! Tooling that runs on bulk import/edit, before any cart operation:
//! dimension recovery from free-text reference codes and shipping weight
//! estimation for roll-format materials.

mod dimensions;
mod weight;

pub use dimensions::*;
pub use weight::*;
