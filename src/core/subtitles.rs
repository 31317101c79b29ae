//! Subtitle renaming.
//!
//! Runs after the videos have their final names. Each subtitle is named
//! after the video it belongs to, followed by `.forced` and the language
//! code when known: `Up (2009).forced.deu.srt`.

use super::executor::Executor;
use crate::models::media::{Artifact, ArtifactType, MediaItem, SubtitleInfo};
use crate::models::plan::PlannedArtifact;
use crate::models::report::{EntryStatus, RenameReport};
use crate::services::messages::{Message, MessageSink};
use crate::utils::{fs, language};
use std::path::{Path, PathBuf};

/// Extension pairs that travel together: a `.sub` and its `.idx` index.
const COMPANIONS: &[(&str, &str)] = &[("sub", "idx")];

/// Work out language and forced flag from a subtitle file name.
///
/// `video_basenames` are the names the matching video had or has; the first
/// one that prefixes the subtitle name is stripped before matching.
pub fn infer_subtitle_info(subtitle: &Artifact, video_basenames: &[String]) -> SubtitleInfo {
    let basename = subtitle.basename().to_lowercase();
    let mut shortname = video_basenames
        .iter()
        .map(|b| b.to_lowercase())
        .filter(|b| !b.is_empty())
        .find_map(|b| basename.strip_prefix(&b).map(str::to_string))
        .unwrap_or_else(|| basename.clone());

    let forced = subtitle.filename().to_lowercase().contains("forced");
    if forced {
        if let Ok(re) = regex::Regex::new(r"[[:punct:]]*forced") {
            shortname = re.replace_all(&shortname, "").into_owned();
        }
    }

    let language = language::detect_in_name(&shortname)
        .map(str::to_string)
        .unwrap_or_default();
    if !language.is_empty() {
        tracing::debug!("Found language '{}' in subtitle {:?}", language, subtitle.path);
    }

    SubtitleInfo { language, forced }
}

/// The video a subtitle belongs to: same stacking index, else the first one.
fn matching_video<'a>(item: &'a MediaItem, subtitle: &Artifact) -> Option<&'a Artifact> {
    let videos = item.artifacts_of(ArtifactType::PrimaryVideo);
    if subtitle.stacking != 0 {
        if let Some(video) = videos.iter().find(|v| v.stacking == subtitle.stacking) {
            return Some(*video);
        }
        tracing::debug!("No video with stacking {} for {:?}, using the first", subtitle.stacking, subtitle.path);
    }
    videos.first().copied()
}

/// Plan the new name of a subtitle. Returns `None` when the item has no
/// video to name it after.
pub fn plan_subtitle(item: &MediaItem, subtitle: &Artifact, old_video_basename: &str) -> Option<PlannedArtifact> {
    let video = matching_video(item, subtitle)?;

    let info = match &subtitle.subtitle {
        // resolved elsewhere, possibly as "en" or "German"
        Some(info) => SubtitleInfo {
            language: language::lookup(&info.language)
                .map(str::to_string)
                .unwrap_or_else(|| info.language.clone()),
            forced: info.forced,
        },
        None => infer_subtitle_info(
            subtitle,
            &[old_video_basename.to_string(), item.video_basename_without_stacking()],
        ),
    };

    let mut name = video.basename();
    if info.forced {
        name.push_str(".forced");
    }
    if !info.language.is_empty() {
        name.push('.');
        name.push_str(&info.language);
    }
    name.push('.');
    name.push_str(&subtitle.extension());

    let mut target = subtitle.with_path(item.path.join(name));
    target.subtitle = Some(info);
    target.container_format = subtitle.extension();
    Some(PlannedArtifact::moved(subtitle, target))
}

/// Path of the companion file of a subtitle, if its extension has one.
fn companion_path(path: &Path) -> Option<PathBuf> {
    let ext = path.extension()?.to_string_lossy().into_owned();
    let (_, companion) = COMPANIONS.iter().find(|(main, _)| ext.eq_ignore_ascii_case(main))?;
    // keep the case style of the main extension
    let companion = if ext.chars().all(|c| c.is_ascii_uppercase()) {
        companion.to_uppercase()
    } else {
        companion.to_string()
    };
    Some(path.with_extension(companion))
}

/// Whether a subtitle is a companion of another tracked subtitle.
fn is_companion(item: &MediaItem, subtitle: &Artifact) -> bool {
    item.artifacts_of(ArtifactType::Subtitle)
        .iter()
        .any(|other| companion_path(&other.path).is_some_and(|c| c == subtitle.path))
}

/// Rename every subtitle of an item.
///
/// Updates the item's artifacts in place and returns the paths that now
/// hold subtitles, for cleanup's needed set. Failures are reported and the
/// subtitle keeps its old name.
pub fn rename_subtitles(
    item: &mut MediaItem,
    old_video_basename: &str,
    executor: &Executor,
    sink: &dyn MessageSink,
    report: &mut RenameReport,
) -> Vec<PathBuf> {
    let mut needed = Vec::new();
    let subtitles: Vec<Artifact> = item
        .artifacts_of(ArtifactType::Subtitle)
        .into_iter()
        .filter(|s| !is_companion(item, s))
        .cloned()
        .collect();

    for subtitle in subtitles {
        let Some(planned) = plan_subtitle(item, &subtitle, old_video_basename) else {
            needed.push(subtitle.path.clone());
            continue;
        };

        let entry = executor.execute(&planned);
        let moved = !matches!(entry.status, EntryStatus::Failed { .. });
        if let EntryStatus::Failed { error } = &entry.status {
            sink.push(Message::error(&subtitle.path, error.clone()));
        }
        report.entries.push(entry);

        if !moved {
            needed.push(subtitle.path.clone());
            continue;
        }

        needed.push(planned.target.path.clone());
        replace_artifact(item, &subtitle.path, planned.target.clone());

        if let (Some(old), Some(new)) = (companion_path(&subtitle.path), companion_path(&planned.target.path)) {
            move_companion(item, &old, &new, executor);
            needed.push(new);
        }
    }

    needed
}

/// Move a companion file alongside its subtitle. Best effort.
fn move_companion(item: &mut MediaItem, old: &Path, new: &Path, executor: &Executor) {
    if old == new || !old.exists() {
        return;
    }
    match fs::move_file(old, new, executor.config().verify_checksum) {
        Ok(()) => {
            tracing::debug!("Moved companion {:?} -> {:?}", old, new);
            let tracked = item.artifacts.iter().find(|a| a.path == old).cloned();
            if let Some(tracked) = tracked {
                replace_artifact(item, old, tracked.with_path(new));
            }
        }
        Err(e) => tracing::debug!("Could not move companion {:?}: {}", old, e),
    }
}

fn replace_artifact(item: &mut MediaItem, old: &Path, new: Artifact) {
    if let Some(slot) = item.artifacts.iter_mut().find(|a| a.path == old) {
        *slot = new;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> MediaItem {
        let mut item = MediaItem::new("/m", "/m/Up (2009)", "Up");
        let mut cd1 = Artifact::new(ArtifactType::PrimaryVideo, "/m/Up (2009)/Up (2009) cd1.avi");
        cd1.stacking = 1;
        cd1.stacking_marker = "cd1".to_string();
        let mut cd2 = Artifact::new(ArtifactType::PrimaryVideo, "/m/Up (2009)/Up (2009) cd2.avi");
        cd2.stacking = 2;
        cd2.stacking_marker = "cd2".to_string();
        item.artifacts.push(cd1);
        item.artifacts.push(cd2);
        item
    }

    #[test]
    fn test_infer_language_and_forced() {
        let sub = Artifact::new(ArtifactType::Subtitle, "/m/x/up.forced.german.srt");
        let info = infer_subtitle_info(&sub, &["up".to_string()]);
        assert!(info.forced);
        assert_eq!(info.language, "deu");

        let sub = Artifact::new(ArtifactType::Subtitle, "/m/x/Up_en.srt");
        let info = infer_subtitle_info(&sub, &["up".to_string()]);
        assert!(!info.forced);
        assert_eq!(info.language, "eng");

        let sub = Artifact::new(ArtifactType::Subtitle, "/m/x/commentary.srt");
        assert_eq!(infer_subtitle_info(&sub, &["up".to_string()]), SubtitleInfo::default());
    }

    #[test]
    fn test_plan_uses_resolved_info() {
        let item = item();
        let mut sub = Artifact::new(ArtifactType::Subtitle, "/m/Up (2009)/whatever.srt");
        sub.subtitle = Some(SubtitleInfo {
            language: "fra".to_string(),
            forced: true,
        });
        let planned = plan_subtitle(&item, &sub, "old").unwrap();
        assert_eq!(planned.target.path, Path::new("/m/Up (2009)/Up (2009) cd1.forced.fra.srt"));
    }

    #[test]
    fn test_plan_normalizes_resolved_language() {
        let item = item();
        let mut sub = Artifact::new(ArtifactType::Subtitle, "/m/Up (2009)/whatever.srt");
        sub.subtitle = Some(SubtitleInfo {
            language: "German".to_string(),
            forced: false,
        });
        let planned = plan_subtitle(&item, &sub, "old").unwrap();
        assert_eq!(planned.target.path, Path::new("/m/Up (2009)/Up (2009) cd1.deu.srt"));
        assert_eq!(planned.target.subtitle.unwrap().language, "deu");

        sub.subtitle = Some(SubtitleInfo {
            language: "tlh".to_string(),
            forced: false,
        });
        let planned = plan_subtitle(&item, &sub, "old").unwrap();
        assert_eq!(planned.target.path, Path::new("/m/Up (2009)/Up (2009) cd1.tlh.srt"));
    }

    #[test]
    fn test_plan_matches_stacking() {
        let item = item();
        let mut sub = Artifact::new(ArtifactType::Subtitle, "/m/Up (2009)/old cd2.eng.srt");
        sub.stacking = 2;
        let planned = plan_subtitle(&item, &sub, "old").unwrap();
        assert_eq!(planned.target.path, Path::new("/m/Up (2009)/Up (2009) cd2.eng.srt"));

        sub.stacking = 7;
        let planned = plan_subtitle(&item, &sub, "old").unwrap();
        assert_eq!(planned.target.path, Path::new("/m/Up (2009)/Up (2009) cd1.eng.srt"));
    }

    #[test]
    fn test_companion_path() {
        assert_eq!(companion_path(Path::new("/m/a.sub")), Some(PathBuf::from("/m/a.idx")));
        assert_eq!(companion_path(Path::new("/m/a.SUB")), Some(PathBuf::from("/m/a.IDX")));
        assert_eq!(companion_path(Path::new("/m/a.srt")), None);
    }

    #[test]
    fn test_no_video_no_plan() {
        let item = MediaItem::new("/m", "/m/x", "X");
        let sub = Artifact::new(ArtifactType::Subtitle, "/m/x/a.srt");
        assert!(plan_subtitle(&item, &sub, "a").is_none());
    }
}
