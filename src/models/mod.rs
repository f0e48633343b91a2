pub mod snapshot;
pub mod stats;
pub mod tag;
pub mod work;

pub use snapshot::{BackupSnapshot, SnapshotMetadata};
pub use stats::{EpisodeStats, Stats};
pub use tag::{Tag, TagCreate, TagUpdate};
pub use work::{Episode, Work, WorkCreate, WorkKind, WorkPage, WorkQuery, WorkStatus, WorkUpdate};
