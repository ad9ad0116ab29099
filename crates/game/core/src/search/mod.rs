//! Graph searches over the hex grid.
//!
//! All searches are synchronous and side-effect free apart from the grid's
//! neighbor memoization.
//!
//! - [`compute_range`]: weighted movement range under a point budget
//! - [`compute_path`]: unit-cost path with closest-cell fallback
//! - [`enemies_in_range`]: hop-radius enemy lookup for attack targeting

pub mod path;
pub mod range;
pub mod targeting;

pub use path::compute_path;
pub use range::{RangeResult, compute_range};
pub use targeting::enemies_in_range;
