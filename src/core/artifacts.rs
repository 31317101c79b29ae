//! Per-artifact target planning.
//!
//! Every artifact type has its own planning function returning zero, one or
//! many [`PlannedArtifact`]s. An empty list means the source is left for
//! cleanup. Planning never touches the file system, except for asking the
//! [`NfoInspector`] whether a metadata document is one of ours.

use crate::generators::artwork;
use crate::models::media::{Artifact, ArtifactType, MediaItem};
use crate::models::naming::{FanartNaming, NfoNaming, PosterNaming};
use crate::models::plan::PlannedArtifact;
use crate::models::policy::NamingPolicy;
use crate::services::nfo::NfoInspector;
use crate::utils::stacking;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Everything artifact planning needs besides the artifact itself.
pub struct PlanContext<'a> {
    /// Item as it is now (after any directory move).
    pub item: &'a MediaItem,
    pub policy: &'a NamingPolicy,
    /// New basename for renamed files.
    pub basename: String,
    /// Root the item is moving to.
    pub new_root: PathBuf,
    /// Whether the new root is shared with other items.
    pub shared_dir: bool,
    pub inspector: &'a dyn NfoInspector,
}

impl PlanContext<'_> {
    /// Same file below the new root, name untouched. Subfolders are kept.
    fn relocated(&self, artifact: &Artifact) -> Artifact {
        artifact.rebased(&self.item.path, &self.new_root)
    }

    /// A new file name directly below the new root.
    fn renamed(&self, artifact: &Artifact, filename: &str) -> Artifact {
        artifact.with_path(self.new_root.join(filename))
    }
}

/// Derive the basename for renamed files.
///
/// With a usable filename template this is the expanded template; otherwise
/// (or when the expansion is empty) the current name of the first video
/// without its stacking marker.
pub fn derive_basename(item: &MediaItem, policy: &NamingPolicy) -> String {
    if !policy.is_filename_template_usable() {
        tracing::warn!("Filename template is not usable, keeping file names");
        return item.video_basename_without_stacking();
    }

    let basename = crate::generators::template::expand_filename(&policy.filename_template, item, policy);
    if basename.is_empty() {
        tracing::warn!(
            "Filename template '{}' expanded to nothing for '{}', keeping file names",
            policy.filename_template,
            item.title
        );
        return item.video_basename_without_stacking();
    }
    basename
}

/// Plan the targets of one artifact.
pub fn plan_artifact(ctx: &PlanContext<'_>, artifact: &Artifact) -> Vec<PlannedArtifact> {
    if !ctx.policy.is_filename_template_usable() && !ctx.item.is_disc() {
        // folder-only rename
        return match artifact.artifact_type {
            ArtifactType::PrimaryVideo => vec![PlannedArtifact::moved(artifact, ctx.relocated(artifact))],
            ArtifactType::Subtitle => vec![PlannedArtifact::kept(artifact)],
            _ => vec![PlannedArtifact::copied(artifact, ctx.relocated(artifact))],
        };
    }

    match artifact.artifact_type {
        ArtifactType::PrimaryVideo => plan_video(ctx, artifact),
        ArtifactType::Trailer => plan_suffixed(ctx, artifact, "-trailer"),
        ArtifactType::Sample => plan_suffixed(ctx, artifact, "-sample"),
        ArtifactType::Subtitle => vec![PlannedArtifact::kept(artifact)],
        ArtifactType::MetadataDocument => plan_metadata_document(ctx, artifact),
        ArtifactType::Poster => plan_poster(ctx, artifact),
        ArtifactType::Fanart => plan_fanart(ctx, artifact),
        ArtifactType::Banner
        | ArtifactType::ClearArt
        | ArtifactType::DiscArt
        | ArtifactType::Logo
        | ArtifactType::Thumb => plan_fixed_artwork(ctx, artifact),
        ArtifactType::ExtraFanart | ArtifactType::ExtraThumb => plan_extra_artwork(ctx, artifact),
        ArtifactType::Audio | ArtifactType::Text | ArtifactType::Other => {
            vec![PlannedArtifact::copied(artifact, ctx.relocated(artifact))]
        }
    }
}

fn plan_video(ctx: &PlanContext<'_>, video: &Artifact) -> Vec<PlannedArtifact> {
    if ctx.item.is_disc() || video.is_disc_file() {
        return vec![PlannedArtifact::moved(video, ctx.relocated(video))];
    }
    let filename = format!(
        "{}{}.{}",
        ctx.basename,
        stacking::stacking_suffix(ctx.policy.stacking_delimiter(), &video.stacking_marker, video.stacking),
        video.extension()
    );
    vec![PlannedArtifact::moved(video, ctx.renamed(video, &filename))]
}

/// Trailers and samples: `<basename><suffix>.<ext>`.
fn plan_suffixed(ctx: &PlanContext<'_>, artifact: &Artifact, suffix: &str) -> Vec<PlannedArtifact> {
    let filename = format!("{}{}.{}", ctx.basename, suffix, artifact.extension());
    vec![PlannedArtifact::copied(artifact, ctx.renamed(artifact, &filename))]
}

fn plan_metadata_document(ctx: &PlanContext<'_>, nfo: &Artifact) -> Vec<PlannedArtifact> {
    if !ctx.inspector.is_own_document(&nfo.path) {
        if ctx.policy.nfo_cleanup {
            return Vec::new();
        }
        return vec![PlannedArtifact::kept(nfo)];
    }

    let variants: Vec<NfoNaming> = if ctx.shared_dir {
        vec![NfoNaming::FilenameNfo]
    } else {
        ctx.policy.nfo_variants.clone()
    };

    let mut seen = HashSet::new();
    variants
        .into_iter()
        .map(|naming| artwork::nfo_filename(naming, &ctx.basename, ctx.item.disc_layout))
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .map(|name| PlannedArtifact::copied(nfo, ctx.renamed(nfo, &name)))
        .collect()
}

fn plan_poster(ctx: &PlanContext<'_>, poster: &Artifact) -> Vec<PlannedArtifact> {
    let variants: Vec<PosterNaming> = if ctx.shared_dir {
        vec![PosterNaming::FilenamePosterJpg, PosterNaming::FilenamePosterPng]
    } else {
        ctx.policy.poster_variants.clone()
    };
    let names = variants
        .into_iter()
        .map(|naming| artwork::poster_filename(naming, &ctx.basename));
    plan_image_variants(ctx, poster, names)
}

fn plan_fanart(ctx: &PlanContext<'_>, fanart: &Artifact) -> Vec<PlannedArtifact> {
    let variants: Vec<FanartNaming> = if ctx.shared_dir {
        vec![FanartNaming::FilenameFanartJpg, FanartNaming::FilenameFanartPng]
    } else {
        ctx.policy.fanart_variants.clone()
    };
    let names = variants
        .into_iter()
        .map(|naming| artwork::fanart_filename(naming, &ctx.basename));
    plan_image_variants(ctx, fanart, names)
}

/// Fan an image out to every distinct variant whose extension matches the
/// image's real format. Images are never converted by renaming.
fn plan_image_variants(
    ctx: &PlanContext<'_>,
    image: &Artifact,
    names: impl Iterator<Item = String>,
) -> Vec<PlannedArtifact> {
    let real_ext = image.real_image_extension();
    let mut seen = HashSet::new();
    names
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .filter(|name| {
            let matches = artwork::extension_of(name) == real_ext;
            if !matches {
                tracing::debug!("Skipping {} for {:?}: image is {}", name, image.path, real_ext);
            }
            matches
        })
        .map(|name| PlannedArtifact::copied(image, ctx.renamed(image, &name)))
        .collect()
}

/// Banner, clear art, disc art, logo and thumb: `<type>.<ext>` in an
/// exclusive directory, `<basename>-<type>.<ext>` in a shared one.
fn plan_fixed_artwork(ctx: &PlanContext<'_>, artwork: &Artifact) -> Vec<PlannedArtifact> {
    let Some(stem) = artwork.artifact_type.artwork_stem() else {
        return Vec::new();
    };
    if !ctx.policy.artwork.enabled(artwork.artifact_type) {
        return Vec::new();
    }

    let relocated = ctx.relocated(artwork);
    let filename = if ctx.shared_dir {
        format!("{}-{}.{}", ctx.basename, stem, artwork.extension())
    } else {
        format!("{}.{}", stem, artwork.extension())
    };
    let target = relocated.with_filename(relocated.parent(), &filename);
    vec![PlannedArtifact::copied(artwork, target)]
}

fn plan_extra_artwork(ctx: &PlanContext<'_>, artwork: &Artifact) -> Vec<PlannedArtifact> {
    if ctx.shared_dir || !ctx.policy.artwork.enabled(artwork.artifact_type) {
        return Vec::new();
    }
    vec![PlannedArtifact::copied(artwork, ctx.relocated(artwork))]
}

/// Every file name a metadata document, poster or fanart of this item could
/// have had under any naming variant, below `root`. Used to find leftovers
/// of earlier policies. Variants without a name are left out.
pub fn all_variant_paths(item: &MediaItem, basename: &str, root: &Path) -> Vec<PathBuf> {
    let nfo = NfoNaming::ALL
        .iter()
        .map(|n| artwork::nfo_filename(*n, basename, item.disc_layout));
    let posters = PosterNaming::ALL
        .iter()
        .map(|n| artwork::poster_filename(*n, basename));
    let fanart = FanartNaming::ALL
        .iter()
        .map(|n| artwork::fanart_filename(*n, basename));

    nfo.chain(posters)
        .chain(fanart)
        .filter(|name| !name.is_empty())
        .map(|name| root.join(name))
        .collect()
}
