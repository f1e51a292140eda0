use tracing::debug;

use crate::cascade::find_all_matches;
use crate::config::{CompiledConfig, InferConfig};
use crate::item::{FieldMutation, MediaItem, TagField};
use crate::reconcile::apply_matches;

/// The extraction engine: one compiled configuration, invoked once per item
/// group. Stateless across invocations; every call re-derives base names from
/// the current paths and works on a private copy of the group.
#[derive(Debug)]
pub struct InferenceEngine {
    config: CompiledConfig,
}

impl InferenceEngine {
    pub fn new(config: &InferConfig) -> Self {
        Self {
            config: config.compile(),
        }
    }

    /// Run the template cascade over one item group and report the mutations.
    ///
    /// Every template in the list is tried, in order, and every one that
    /// matches the whole group is reconciled immediately. Deliberately no
    /// break on the first success: a later catch-all template can still fill
    /// in a title that an earlier, aborted pass left bad, and existing
    /// pattern lists rely on that layering.
    pub fn process(&self, items: &[MediaItem]) -> Vec<FieldMutation> {
        if items.is_empty() {
            return Vec::new();
        }

        let names: Vec<String> = items.iter().map(MediaItem::base_name).collect();
        let mut work: Vec<MediaItem> = items.to_vec();

        for template in &self.config.templates {
            if let Some(record) = find_all_matches(&names, template) {
                debug!(
                    "Template '{}' matched all {} item(s)",
                    template.pattern(),
                    items.len()
                );
                apply_matches(&mut work, &record, &names, &self.config);
            }
        }

        if self.config.fill_album_from_title {
            for item in &mut work {
                if item.album.is_empty() {
                    item.album = item.title.clone();
                }
            }
        }

        diff(items, &work)
    }
}

/// Compare the working state against the input group, one mutation per
/// changed field.
fn diff(before: &[MediaItem], after: &[MediaItem]) -> Vec<FieldMutation> {
    let mut mutations = Vec::new();
    for (index, (old, new)) in before.iter().zip(after).enumerate() {
        if new.artist != old.artist {
            mutations.push(FieldMutation {
                item: index,
                field: TagField::Artist(new.artist.clone()),
            });
        }
        if new.title != old.title {
            mutations.push(FieldMutation {
                item: index,
                field: TagField::Title(new.title.clone()),
            });
        }
        if new.track != old.track {
            mutations.push(FieldMutation {
                item: index,
                field: TagField::Track(new.track),
            });
        }
        if new.album != old.album {
            mutations.push(FieldMutation {
                item: index,
                field: TagField::Album(new.album.clone()),
            });
        }
    }
    for mutation in &mutations {
        debug!("Item {}: {}", mutation.item, mutation.field);
    }
    mutations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> InferenceEngine {
        InferenceEngine::new(&InferConfig::default())
    }

    fn apply(items: &mut [MediaItem], mutations: &[FieldMutation]) {
        for m in mutations {
            let item = &mut items[m.item];
            match &m.field {
                TagField::Artist(v) => item.artist = v.clone(),
                TagField::Title(v) => item.title = v.clone(),
                TagField::Track(v) => item.track = *v,
                TagField::Album(v) => item.album = v.clone(),
            }
        }
    }

    #[test]
    fn test_album_group_with_uniform_artist() {
        let mut items = vec![
            MediaItem::new("/in/Artist - Song1.mp3"),
            MediaItem::new("/in/Artist - Song2.mp3"),
        ];
        let mutations = engine().process(&items);
        apply(&mut items, &mutations);

        assert_eq!(items[0].artist, "Artist");
        assert_eq!(items[1].artist, "Artist");
        assert_eq!(items[0].title, "Song1");
        assert_eq!(items[1].title, "Song2");
    }

    #[test]
    fn test_single_item_with_track_prefix() {
        let mut items = vec![MediaItem::new("/in/03 Intro.mp3")];
        let mutations = engine().process(&items);
        apply(&mut items, &mutations);

        assert_eq!(items[0].title, "Intro");
        assert_eq!(items[0].track, 3);
    }

    #[test]
    fn test_idempotent_on_well_formed_metadata() {
        let items = vec![MediaItem {
            path: "/in/01 - Artist - Song.mp3".into(),
            artist: "Artist".to_string(),
            title: "Song".to_string(),
            track: 1,
            album: "Album".to_string(),
        }];
        assert!(engine().process(&items).is_empty());
    }

    // Deliberate behavior, not an oversight: the cascade tries every
    // template, so a later catch-all may still act after an earlier pass
    // aborted. Breaking on the first match must fail this test and become a
    // conscious decision.
    #[test]
    fn test_later_template_still_runs_after_aborted_pass() {
        // "a - p" / "b - q": artist and title both vary, so the
        // artist/title template aborts; the trailing catch-all
        // `^(?P<title>.+)$` still supplies whole-name titles.
        let mut items = vec![
            MediaItem::new("/in/a - p.mp3"),
            MediaItem::new("/in/b - q.mp3"),
        ];
        let mutations = engine().process(&items);
        apply(&mut items, &mutations);

        assert!(items[0].artist.is_empty());
        assert_eq!(items[0].title, "a - p");
        assert_eq!(items[1].title, "b - q");
    }

    #[test]
    fn test_album_fallback_copies_title_into_empty_album() {
        let config = InferConfig {
            fill_album_from_title: true,
            ..InferConfig::default()
        };
        let mut items = vec![MediaItem::new("/in/Artist - Song.mp3")];
        let mutations = InferenceEngine::new(&config).process(&items);
        apply(&mut items, &mutations);

        assert_eq!(items[0].album, "Song");
    }

    #[test]
    fn test_album_fallback_keeps_populated_album() {
        let config = InferConfig {
            fill_album_from_title: true,
            ..InferConfig::default()
        };
        let items = vec![MediaItem {
            path: "/in/Artist - Song.mp3".into(),
            artist: "Artist".to_string(),
            title: "Song".to_string(),
            track: 1,
            album: "Kept".to_string(),
        }];
        assert!(InferenceEngine::new(&config).process(&items).is_empty());
    }

    #[test]
    fn test_empty_group_yields_no_mutations() {
        assert!(engine().process(&[]).is_empty());
    }

    #[test]
    fn test_empty_template_list_only_runs_album_fallback() {
        let config = InferConfig {
            custom_matchlist: Vec::new(),
            fill_album_from_title: true,
            ..InferConfig::default()
        };
        let mut items = vec![MediaItem {
            path: "/in/whatever.mp3".into(),
            title: "Song".to_string(),
            ..MediaItem::default()
        }];
        let mutations = InferenceEngine::new(&config).process(&items);
        apply(&mut items, &mutations);
        assert_eq!(items[0].album, "Song");
    }

    #[test]
    fn test_partial_tag_capture_aborts_in_any_group_order() {
        // The optional tag participates for only one of the two names, so
        // the pass must abort whichever item comes first in the group.
        let config = InferConfig {
            custom_matchlist: vec![r"^(?P<title>[^(]+?)\s*(?:\((?P<tag>.+)\))?$".to_string()],
            ..InferConfig::default()
        };
        let engine = InferenceEngine::new(&config);

        let forward = vec![
            MediaItem::new("/in/SongB.mp3"),
            MediaItem::new("/in/SongA (1999).mp3"),
        ];
        let reversed = vec![
            MediaItem::new("/in/SongA (1999).mp3"),
            MediaItem::new("/in/SongB.mp3"),
        ];

        assert!(engine.process(&forward).is_empty());
        assert!(engine.process(&reversed).is_empty());
    }

    #[test]
    fn test_numbered_album_filenames_end_to_end() {
        let mut items = vec![
            MediaItem::new("/in/01 - Artist - One.mp3"),
            MediaItem::new("/in/02 - Artist - Two.mp3"),
        ];
        let mutations = engine().process(&items);
        apply(&mut items, &mutations);

        assert_eq!(items[0].artist, "Artist");
        assert_eq!(items[0].title, "One");
        assert_eq!(items[0].track, 1);
        assert_eq!(items[1].title, "Two");
        assert_eq!(items[1].track, 2);
    }
}
