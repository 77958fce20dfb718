pub mod identity;
pub mod position_map;

pub use identity::{ContentKeyed, IdentityKey, KeyKind, Keyed, TrackedSeq};
pub use position_map::PositionMap;
