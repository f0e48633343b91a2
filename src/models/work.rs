use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a tracked work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkKind {
    Anime,
    Movie,
    Series,
    Novel,
    Comic,
    Game,
}

impl fmt::Display for WorkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Anime => "anime",
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Novel => "novel",
            Self::Comic => "comic",
            Self::Game => "game",
        };
        write!(f, "{s}")
    }
}

impl Default for WorkKind {
    fn default() -> Self {
        Self::Anime
    }
}

impl FromStr for WorkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anime" => Ok(Self::Anime),
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            "novel" => Ok(Self::Novel),
            "comic" => Ok(Self::Comic),
            "game" => Ok(Self::Game),
            other => Err(format!("unknown work type: {other}")),
        }
    }
}

/// Tracking status of a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkStatus {
    Ongoing,
    Completed,
    Paused,
    Dropped,
    NotStarted,
    Cancelled,
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Dropped => "dropped",
            Self::NotStarted => "not-started",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl Default for WorkStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl FromStr for WorkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            "dropped" => Ok(Self::Dropped),
            "not-started" => Ok(Self::NotStarted),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown work status: {other}")),
        }
    }
}

/// A sub-unit of a work (episode, chapter, special, ...).
///
/// The kind stays a plain string: the well-known values are in
/// [`crate::constants::episode_kinds`], but custom kinds registered by the
/// front end pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub number: i32,
    pub season: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub watched: bool,
    #[serde(default)]
    pub date_watched: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A tracked media item.
///
/// `id` is immutable and globally unique. `episodes` are owned and embedded;
/// they are kept in (season, number) order by convention but the store does
/// not re-sort after mutation - callers do. `tag_ids` reference shared tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: WorkKind,
    pub status: WorkStatus,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default)]
    pub reminder_frequency: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<i32>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
    pub date_added: String,
    #[serde(default)]
    pub date_updated: Option<String>,
}

/// Payload for creating a work; identity and timestamps are assigned by the
/// catalog service. Every field defaults so that loosely-shaped legacy
/// records still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkCreate {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: WorkKind,
    pub status: WorkStatus,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub reminder_enabled: Option<bool>,
    #[serde(default)]
    pub reminder_frequency: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<i32>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkUpdate {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<WorkKind>,
    pub status: Option<WorkStatus>,
    pub year: Option<i32>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub note: Option<String>,
    pub source: Option<String>,
    pub reminder_enabled: Option<bool>,
    pub reminder_frequency: Option<String>,
    pub tag_ids: Option<Vec<i32>>,
    pub episodes: Option<Vec<Episode>>,
}

/// One page of a filtered work listing.
#[derive(Debug, Clone, Serialize)]
pub struct WorkPage {
    pub works: Vec<Work>,
    pub total: usize,
    pub page: usize,
    pub size: usize,
}

/// Filters and pagination for listing works.
#[derive(Debug, Clone, Default)]
pub struct WorkQuery {
    pub title: Option<String>,
    pub kind: Option<WorkKind>,
    pub status: Option<WorkStatus>,
    pub year: Option<i32>,
    pub tag_ids: Vec<i32>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}
