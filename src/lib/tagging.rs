use anyhow::{Context, Result};
use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::{Accessor, Tag};
use std::path::Path;
use tracing::warn;

use crate::item::{MediaItem, TagField};

/// Read the current tag state of a file into a [`MediaItem`].
///
/// A file whose tags cannot be read still yields an item with empty fields;
/// missing metadata is exactly the case the inference engine exists for, so
/// the failure is reported and swallowed rather than propagated.
pub fn read_item(path: &Path) -> MediaItem {
    let mut item = MediaItem::new(path);

    match lofty::read_from_path(path) {
        Ok(tagged_file) => {
            if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
                item.artist = tag.artist().map(|s| s.to_string()).unwrap_or_default();
                item.title = tag.title().map(|s| s.to_string()).unwrap_or_default();
                item.album = tag.album().map(|s| s.to_string()).unwrap_or_default();
                item.track = tag.track().unwrap_or(0);
            }
        }
        Err(e) => {
            warn!("Could not read tags from {} ({})", path.display(), e);
        }
    }

    item
}

/// Write inferred field values back to a file's primary tag.
///
/// Creates a tag of the file's primary type when the file has none yet.
pub fn write_fields(path: &Path, fields: &[TagField]) -> Result<()> {
    let mut tagged_file = lofty::read_from_path(path)
        .with_context(|| format!("Failed to open '{}' for tagging", path.display()))?;

    if tagged_file.primary_tag_mut().is_none() {
        let tag_type = tagged_file.primary_tag_type();
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .primary_tag_mut()
        .with_context(|| format!("No writable tag for '{}'", path.display()))?;

    for field in fields {
        match field {
            TagField::Artist(v) => tag.set_artist(v.clone()),
            TagField::Title(v) => tag.set_title(v.clone()),
            TagField::Track(v) => tag.set_track(*v),
            TagField::Album(v) => tag.set_album(v.clone()),
        }
    }

    tagged_file
        .save_to_path(path, WriteOptions::default())
        .with_context(|| format!("Failed to save tags to '{}'", path.display()))
}
