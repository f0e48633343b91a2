/// Version tag written into every backup snapshot. A mismatch on import is a
/// warning, not a rejection.
pub const BACKUP_VERSION: &str = "1.0.0";

pub mod backup {

    /// Filename stem for exported files: `watchvault-backup-<date>.<ext>`.
    pub const EXPORT_FILE_STEM: &str = "watchvault-backup";

    pub const JSON_MIME: &str = "application/json";

    pub const CSV_MIME: &str = "text/csv";
}

pub mod archive {

    /// Date-keyed auto-backup slots are named `auto_backup_<ISO-date>`.
    pub const SLOT_PREFIX: &str = "auto_backup_";

    /// Settings slot holding the last backup timestamp.
    pub const LAST_BACKUP_KEY: &str = "last_backup";

    /// How many date-keyed snapshots survive a prune.
    pub const RETAINED_SNAPSHOTS: usize = 7;
}

pub mod legacy {

    pub const WORKS_FILE: &str = "works.json";

    pub const TAGS_FILE: &str = "tags.json";
}

pub mod episode_kinds {

    pub const EPISODE: &str = "episode";
    pub const SPECIAL: &str = "special";
    pub const OVA: &str = "ova";
    pub const MOVIE: &str = "movie";
    pub const CHAPTER: &str = "chapter";
}
