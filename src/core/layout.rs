//! Destination directory planning.
//!
//! Planning is pure: [`plan_layout`] only looks at the item and the policy.
//! [`apply_layout`] performs the directory action and is the first step of a
//! rename that touches the file system.

use crate::generators::template;
use crate::models::media::MediaItem;
use crate::models::plan::{FolderTransition, LayoutDecision};
use crate::models::policy::NamingPolicy;
use crate::utils::fs;
use crate::{Error, Result};
use std::path::{Component, Path};

/// Decide the new root of an item and whether it will share its directory.
pub fn plan_layout(item: &MediaItem, policy: &NamingPolicy) -> Result<LayoutDecision> {
    let old_root = item.path.clone();

    if policy.folder_template.trim().is_empty() {
        tracing::info!("Folder template is empty, keeping {:?}", old_root);
        return Ok(LayoutDecision {
            new_root: old_root.clone(),
            old_root,
            shared_dir: item.shared_dir,
            folder_template_empty: true,
            transition: FolderTransition::Unchanged,
        });
    }

    // The folder must identify exactly one item, otherwise it is shared.
    let shared_dir = !policy.is_folder_template_unique();

    let relative = template::expand_folder(&policy.folder_template, item, policy);
    let new_root = if relative.is_empty() {
        tracing::warn!(
            "Folder template '{}' expanded to nothing for '{}', keeping {:?}",
            policy.folder_template,
            item.title,
            old_root
        );
        old_root.clone()
    } else {
        if Path::new(&relative)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(Error::layout(
                item.data_source.join(&relative),
                "destination escapes the datasource",
            ));
        }
        item.data_source.join(&relative)
    };

    let transition = if new_root == old_root {
        FolderTransition::Unchanged
    } else if shared_dir {
        FolderTransition::Shared
    } else if item.shared_dir {
        FolderTransition::Upgrade
    } else {
        FolderTransition::MoveDirectory
    };

    tracing::debug!(
        "Layout for '{}': {:?} -> {:?} ({:?}, shared: {})",
        item.title,
        old_root,
        new_root,
        transition,
        shared_dir
    );

    Ok(LayoutDecision {
        old_root,
        new_root,
        shared_dir,
        folder_template_empty: false,
        transition,
    })
}

/// Perform the directory action of a layout decision.
///
/// After a directory move the item's root and every artifact below it point
/// into the new directory. Any failure is a [`Error::Layout`] and nothing
/// else has been touched.
pub fn apply_layout(item: &mut MediaItem, decision: &LayoutDecision) -> Result<()> {
    match decision.transition {
        FolderTransition::Unchanged => Ok(()),
        FolderTransition::MoveDirectory => {
            fs::move_directory(&decision.old_root, &decision.new_root)
                .map_err(|e| Error::layout(&decision.new_root, e.to_string()))?;
            item.rebase_artifacts(&decision.old_root, &decision.new_root);
            item.path = decision.new_root.clone();
            tracing::info!("Moved {:?} to {:?}", decision.old_root, decision.new_root);
            Ok(())
        }
        FolderTransition::Upgrade => {
            std::fs::create_dir_all(&decision.new_root)
                .map_err(|e| Error::layout(&decision.new_root, e.to_string()))?;
            tracing::info!("Upgrading '{}' into its own directory {:?}", item.title, decision.new_root);
            Ok(())
        }
        FolderTransition::Shared => {
            if !decision.new_root.exists() {
                std::fs::create_dir_all(&decision.new_root)
                    .map_err(|e| Error::layout(&decision.new_root, e.to_string()))?;
            }
            tracing::info!("'{}' will share {:?}", item.title, decision.new_root);
            Ok(())
        }
    }
}
