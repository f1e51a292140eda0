use tracing::{debug, warn};

use crate::cascade::MatchRecord;
use crate::config::CompiledConfig;
use crate::item::MediaItem;
use crate::sanitize::{is_bad_title, sanitize};

/// Reconcile one successful template match against the group's working state.
///
/// Cross-item consistency decides which captured field is the artist: a field
/// is only trusted as the artist when its value is uniform across every
/// sibling. Capture maps carry an explicit `None` for named groups that did
/// not participate, so a field captured for only part of the group is
/// non-uniform no matter how the group is ordered. All abort and rejection
/// paths are silent no-ops with diagnostics; a failed inference must never
/// block the surrounding import.
///
/// `items`, `record` and `names` are parallel slices over the same group.
pub fn apply_matches(
    items: &mut [MediaItem],
    record: &MatchRecord,
    names: &[String],
    config: &CompiledConfig,
) {
    let keys = &record[0];

    // A divergent tag means the template matched unrelated structure.
    if keys.contains_key("tag") && !field_is_uniform(record, "tag") {
        debug!("Skipping match: 'tag' captures differ across the group");
        return;
    }

    // Decide which captured field is the artist and which carries titles.
    let (artist, title_key) = if keys.contains_key("artist") {
        if field_is_uniform(record, "artist") {
            (capture(record, 0, "artist"), "title")
        } else if field_is_uniform(record, "title") {
            // Roles inverted: the uniform "title" is actually the artist.
            (capture(record, 0, "title"), "artist")
        } else {
            debug!("Skipping match: neither 'artist' nor 'title' is uniform");
            return;
        }
    } else {
        (None, "title")
    };

    if let Some(raw) = artist {
        let resolved = sanitize(raw, &config.artist_post_sub, config.final_strip);
        for (index, item) in items.iter_mut().enumerate() {
            // A populated artist is never overwritten.
            if item.artist.is_empty() {
                debug!("Item {}: inferred artist '{}'", index, resolved);
                item.artist = resolved.clone();
            }
        }
    }

    for (index, item) in items.iter_mut().enumerate() {
        if is_bad_title(&item.title, &config.bad_titles) {
            // Fall back to the base file name when the match carries no title.
            let source = capture(record, index, title_key).unwrap_or(names[index].as_str());
            let title = sanitize(source, &config.title_post_sub, config.final_strip);
            debug!("Item {}: inferred title '{}'", index, title);
            item.title = title;
        }

        if item.track == 0 {
            if let Some(captured) = capture(record, index, "track") {
                apply_track(index, item, captured, config.limit_tracknumber);
            }
        }
    }
}

/// Validate and assign one captured track number.
fn apply_track(index: usize, item: &mut MediaItem, captured: &str, limit: u32) {
    let track = match captured.trim().parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            warn!(
                "Item {}: discarding unparsable track capture '{}'",
                index, captured
            );
            return;
        }
    };
    if track > limit {
        warn!(
            "Item {}: discarding track {} above limit {}",
            index, track, limit
        );
        return;
    }
    // A bare numeric artist name misread as a track number.
    if track.to_string() == item.artist {
        warn!(
            "Item {}: discarding track {} equal to the artist name",
            index, track
        );
        return;
    }
    debug!("Item {}: inferred track {}", index, track);
    item.track = track;
}

/// One item's captured value for a field, `None` when it did not participate.
fn capture<'a>(record: &'a MatchRecord, index: usize, key: &str) -> Option<&'a str> {
    record[index].get(key).and_then(|v| v.as_deref())
}

/// Is a captured field identical across all items? Absence counts as a
/// value, so "captured here, absent there" is not uniform.
fn field_is_uniform(record: &MatchRecord, key: &str) -> bool {
    let first = record[0].get(key);
    record.iter().all(|map| map.get(key) == first)
}
