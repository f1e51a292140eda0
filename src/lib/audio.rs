use std::path::Path;

/// Audio formats whose tags lofty can read and write.
/// Please update this list when adding new audio formats
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "aac", "m4a", "m4b", "mp4", "flac", "ogg", "oga", "opus", "spx", "ape", "mpc", "wv",
    "aiff", "aif", "wav",
];

/// Check if a file path has a supported audio extension
pub fn is_audio_file<P: AsRef<Path>>(path: P) -> bool {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    AUDIO_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file("test.mp3"));
        assert!(is_audio_file("test.flac"));
        assert!(is_audio_file("test.MP3")); // Case insensitive
        assert!(is_audio_file("test.FLAC")); // Case insensitive
        assert!(!is_audio_file("test.txt"));
        assert!(!is_audio_file("test.jpg"));
        assert!(!is_audio_file("test"));
    }
}
