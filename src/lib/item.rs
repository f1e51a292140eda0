use std::fmt;
use std::path::{Path, PathBuf};

/// One audio file as the import pipeline sees it.
///
/// Empty strings mean "unset" for the text fields; `track == 0` means the
/// track number is unset. Within one inference pass an item is identified by
/// its position in the group slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaItem {
    pub path: PathBuf,
    pub artist: String,
    pub title: String,
    pub track: u32,
    pub album: String,
}

impl MediaItem {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Base file name: final path component with the last extension stripped.
    ///
    /// Derived from `path` on every call rather than cached, since the host
    /// may rename files between invocations.
    pub fn base_name(&self) -> String {
        base_name(&self.path)
    }
}

/// Strip directory and final extension from a path, lossily for non-UTF8.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A single field value inferred for an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagField {
    Artist(String),
    Title(String),
    Track(u32),
    Album(String),
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagField::Artist(v) => write!(f, "artist = '{}'", v),
            TagField::Title(v) => write!(f, "title = '{}'", v),
            TagField::Track(v) => write!(f, "track = {}", v),
            TagField::Album(v) => write!(f, "album = '{}'", v),
        }
    }
}

/// One inferred change, addressed by the item's index in the processed group.
///
/// The engine only ever reports mutations; applying them to files (or not,
/// for a dry run) is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMutation {
    pub item: usize,
    pub field: TagField,
}
