pub mod least_referenced;

pub use least_referenced::{Eviction, LeastReferenced};
