//! Display-side logic for consumers of the restaurant API: list
//! accumulation/filter/sort, opening-hours normalization and the detail
//! carousel photo list. Pure functions over the wire models, no I/O.

pub mod hours;
pub mod list;
pub mod photos;
