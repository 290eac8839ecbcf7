//! Lyrics discovery for local audio files
//!
//! Finds LRC lyrics next to the audio file or embedded in its tags.

use anyhow::{Context, Result};
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use std::fs;
use std::path::{Path, PathBuf};

use super::encoding::decode_lyrics;
use crate::features::lyrics::LyricTimeline;

/// Where a lyric set came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricsSource {
    File(PathBuf),
    Embedded,
}

/// Read and parse an LRC file
pub fn load_lyrics_file(path: &Path) -> Result<LyricTimeline> {
    let bytes = fs::read(path).with_context(|| format!("reading lyrics from {:?}", path))?;
    Ok(LyricTimeline::from_lrc(&decode_lyrics(&bytes)))
}

/// Find lyrics for an audio file
///
/// Priority:
/// 1. `explicit` path, when given
/// 2. Same-name `.lrc` file (song.mp3 -> song.lrc)
/// 3. Embedded lyrics tag
///
/// A source that yields no timed lines is skipped.
pub fn find_lyrics(
    audio_path: &Path,
    explicit: Option<&Path>,
) -> Option<(LyricTimeline, LyricsSource)> {
    let candidates = explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(find_lyrics_file(audio_path));

    for path in candidates {
        match load_lyrics_file(&path) {
            Ok(timeline) if !timeline.is_empty() => {
                tracing::info!("Loaded {} lyric lines from {:?}", timeline.len(), path);
                return Some((timeline, LyricsSource::File(path)));
            }
            Ok(_) => tracing::warn!("No timed lyric lines in {:?}", path),
            Err(e) => tracing::warn!("{:#}", e),
        }
    }

    let embedded = extract_embedded_lyrics(audio_path)?;
    let timeline = LyricTimeline::from_lrc(&embedded);
    if timeline.is_empty() {
        tracing::debug!("Embedded lyrics in {:?} carry no timestamps", audio_path);
        return None;
    }
    tracing::info!("Loaded {} embedded lyric lines", timeline.len());
    Some((timeline, LyricsSource::Embedded))
}

/// Same-name `.lrc` next to the audio file, either extension case
fn find_lyrics_file(audio_path: &Path) -> Option<PathBuf> {
    ["lrc", "LRC"]
        .iter()
        .map(|ext| audio_path.with_extension(ext))
        .find(|path| path.is_file())
}

fn extract_embedded_lyrics(audio_path: &Path) -> Option<String> {
    let tagged_file = Probe::open(audio_path).ok()?.read().ok()?;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())?;

    tag.get_string(&ItemKey::Lyrics)
        .filter(|lyrics| !lyrics.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("glowline-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_sidecar_lrc_is_found() {
        let dir = scratch_dir("sidecar");
        let audio = dir.join("song.mp3");
        fs::write(&audio, b"not really audio").unwrap();
        fs::write(dir.join("song.lrc"), "[00:01.00]one\n[00:03.00]two").unwrap();

        let (timeline, source) = find_lyrics(&audio, None).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(source, LyricsSource::File(dir.join("song.lrc")));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = scratch_dir("explicit");
        let audio = dir.join("track.flac");
        let explicit = dir.join("other.lrc");
        fs::write(dir.join("track.lrc"), "[00:01.00]sidecar").unwrap();
        fs::write(&explicit, "[00:01.00]explicit\n[00:02.00]second\n[00:03.00]third").unwrap();

        let (timeline, source) = find_lyrics(&audio, Some(&explicit)).unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(source, LyricsSource::File(explicit));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_everything_is_none() {
        let dir = scratch_dir("missing");
        let audio = dir.join("nothing.ogg");
        assert!(find_lyrics(&audio, Some(&dir.join("absent.lrc"))).is_none());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_unreadable_file_has_context() {
        let err = load_lyrics_file(Path::new("/definitely/not/here.lrc")).unwrap_err();
        assert!(format!("{:#}", err).contains("reading lyrics"));
    }
}
