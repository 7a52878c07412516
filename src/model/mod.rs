//! # Reaction Graph Model
//!
//! Plain DTOs for the compound/reaction multigraph. These types cross every
//! boundary: graph ↔ storage ↔ query service ↔ HTTP.
//!
//! This module is pure data — no I/O, no state, no async.

pub mod compound;
pub mod reaction;
pub mod path;
pub mod value;
pub mod property_map;

pub use compound::Compound;
pub use reaction::{Discriminator, ReactionEdge, ReactionId, ReactionKey, UNKNOWN_REAGENT};
pub use path::PathRecord;
pub use value::Value;
pub use property_map::{PropertyMap, PropertyMapExt, property_map_from_json, props};
