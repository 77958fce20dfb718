pub use crate::builder::IndexCacheBuilder;
pub use crate::cache::{DEFAULT_LIMIT, EntryInfo, IndexCache};
pub use crate::ds::{ContentKeyed, IdentityKey, KeyKind, Keyed, TrackedSeq};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{IndexMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::traits::{ConcurrentIndexLookup, IndexLookup, SequenceKey};
