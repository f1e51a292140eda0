use anyhow::Result;
use regtag::audio::is_audio_file;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn get_default_music_dir() -> String {
    std::env::var("XDG_MUSIC_DIR").unwrap_or_else(|_| shellexpand::tilde("~/Music").into_owned())
}

/// Collect the item groups to infer over.
///
/// Every directory that contains audio files forms one group (the files that
/// belong to one album import); with `singles` each file becomes its own
/// group instead. Groups and their files come back sorted so runs are
/// reproducible.
pub fn collect_groups(music_dir: &str, singles: bool) -> Result<Vec<Vec<PathBuf>>> {
    let music_dir = shellexpand::tilde(music_dir).to_string();
    let root = Path::new(&music_dir);

    if !root.exists() {
        return Err(anyhow::anyhow!(
            "Music directory '{}' does not exist",
            root.display()
        ));
    }
    if !root.is_dir() {
        return Err(anyhow::anyhow!(
            "Music path '{}' is not a directory",
            root.display()
        ));
    }

    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path) {
            let dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            by_dir.entry(dir).or_default().push(path.to_path_buf());
        }
    }

    let mut groups = Vec::new();
    for (_, mut files) in by_dir {
        files.sort();
        if singles {
            groups.extend(files.into_iter().map(|f| vec![f]));
        } else {
            groups.push(files);
        }
    }
    Ok(groups)
}
