// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Primitive types for representing photo metadata, the coordinates and
//! capture times extracted from it, and the resulting route points.

mod gps;
mod metadata;
mod point;
mod time;

pub use gps::*;
pub use metadata::*;
pub use point::*;
pub use time::*;
