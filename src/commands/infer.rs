use anyhow::Result;
use regtag::{tagging, InferConfig, InferenceEngine, MediaItem, TagField};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::utils;

/// Outcome counts for one inference run.
#[derive(Debug, Default)]
pub struct InferStats {
    pub groups: usize,
    pub fields_inferred: usize,
    /// Files written, or files that would have been written under dry run.
    pub files_updated: usize,
    pub files_failed: usize,
}

/// Run filename inference over a music directory.
///
/// Each directory with audio files is one item group (or each file on its
/// own with `singles`); per group the current tags are read, the engine is
/// asked for mutations, and the mutations are written back unless `dry_run`.
/// A file that fails to save is reported and skipped; inference never fails
/// the run.
pub fn run(
    music_dir: &str,
    config_path: Option<&str>,
    dry_run: bool,
    quiet: bool,
    singles: bool,
) -> Result<()> {
    if !quiet {
        info!("🔍 Scanning music directory: {}", music_dir);
    }
    let stats = infer_music_dir(music_dir, config_path, dry_run, quiet, singles)?;

    if !quiet {
        if stats.groups == 0 {
            info!("✅ No audio files found. Nothing to infer.");
        } else if dry_run {
            info!(
                "🎭 This was a dry run. Would have updated {} file(s) with {} inferred field(s) across {} group(s).",
                stats.files_updated, stats.fields_inferred, stats.groups
            );
        } else {
            info!(
                "🎉 Updated {} file(s) with {} inferred field(s) across {} group(s) ({} failed)",
                stats.files_updated, stats.fields_inferred, stats.groups, stats.files_failed
            );
        }
    }

    Ok(())
}

/// The actual pipeline, separated from the summary logging.
fn infer_music_dir(
    music_dir: &str,
    config_path: Option<&str>,
    dry_run: bool,
    quiet: bool,
    singles: bool,
) -> Result<InferStats> {
    let config = load_config(config_path)?;
    let engine = InferenceEngine::new(&config);
    let groups = utils::collect_groups(music_dir, singles)?;

    let mut stats = InferStats {
        groups: groups.len(),
        ..InferStats::default()
    };

    for group in &groups {
        let items: Vec<MediaItem> = group.iter().map(|p| tagging::read_item(p)).collect();
        let mutations = engine.process(&items);
        if mutations.is_empty() {
            continue;
        }
        stats.fields_inferred += mutations.len();

        // The engine addresses items by index; regroup per file for writing.
        let mut per_item: BTreeMap<usize, Vec<TagField>> = BTreeMap::new();
        for mutation in mutations {
            per_item.entry(mutation.item).or_default().push(mutation.field);
        }

        for (index, fields) in per_item {
            let path = &items[index].path;
            if dry_run {
                if !quiet {
                    for field in &fields {
                        info!("Would set {} on {}", field, path.display());
                    }
                }
                stats.files_updated += 1;
                continue;
            }
            match tagging::write_fields(path, &fields) {
                Ok(()) => {
                    stats.files_updated += 1;
                    if !quiet {
                        for field in &fields {
                            info!("✅ {}: set {}", path.display(), field);
                        }
                    }
                }
                Err(e) => {
                    stats.files_failed += 1;
                    warn!("Failed to update {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(stats)
}

/// Merge the optional config file over the defaults.
pub fn load_config(config_path: Option<&str>) -> Result<InferConfig> {
    match config_path {
        Some(path) => InferConfig::load(shellexpand::tilde(path).as_ref()),
        None => Ok(InferConfig::default()),
    }
}
