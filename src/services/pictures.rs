//! Picture folder scanning and random selection

use std::{
    fs,
    path::{Path, PathBuf},
};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, Result};

/// File extensions treated as pictures, compared case-insensitively
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Scope a random picture is drawn from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "path", rename_all = "lowercase")]
pub enum FolderSelection {
    /// Every picture under the base folder, recursively
    #[default]
    All,
    /// Pictures directly inside one folder
    Folder(PathBuf),
}

/// One node of the folder picker tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub name: String,
    /// Path relative to the pictures base, usable with `PUT /folder`
    pub path: String,
    pub children: Vec<FolderNode>,
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Sorted entries of `dir`; unreadable folders count as empty
fn read_sorted(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => {
            let mut paths: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .collect();
            paths.sort();
            paths
        }
        Err(e) => {
            debug!("Cannot read {}: {}", dir.display(), e);
            Vec::new()
        }
    }
}

/// Real subdirectories of `dir`, sorted. Symlinked directories are not
/// followed, so a link back up the tree cannot be walked twice.
fn read_subdirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|entry| entry.path())
        .collect();
    dirs.sort();
    dirs
}

/// All folders below `base`, depth first
pub fn list_subfolders(base: &Path) -> Vec<PathBuf> {
    let mut folders = Vec::new();
    for path in read_subdirs(base) {
        folders.push(path.clone());
        folders.extend(list_subfolders(&path));
    }
    folders
}

/// Pictures directly inside `dir`
pub fn list_image_files(dir: &Path) -> Vec<PathBuf> {
    read_sorted(dir)
        .into_iter()
        .filter(|path| path.is_file() && is_image_file(path))
        .collect()
}

/// Pictures anywhere below `base`
pub fn list_all_pictures(base: &Path) -> Vec<PathBuf> {
    let mut pictures = list_image_files(base);
    for folder in list_subfolders(base) {
        pictures.extend(list_image_files(&folder));
    }
    pictures
}

/// Folder tree under `base` for the picker view
pub fn folder_tree(base: &Path) -> Vec<FolderNode> {
    read_subdirs(base)
        .into_iter()
        .map(|path| node_for(base, &path))
        .collect()
}

fn node_for(base: &Path, path: &Path) -> FolderNode {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let relative = path.strip_prefix(base).unwrap_or(path);

    FolderNode {
        name,
        path: relative.to_string_lossy().into_owned(),
        children: read_subdirs(path)
            .into_iter()
            .map(|child| node_for(base, &child))
            .collect(),
    }
}

#[derive(Debug, Clone)]
pub struct PictureSource {
    base: PathBuf,
}

impl PictureSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Files eligible for `scope`
    pub fn candidates(&self, scope: &FolderSelection) -> Vec<PathBuf> {
        match scope {
            FolderSelection::All => list_all_pictures(&self.base),
            FolderSelection::Folder(folder) => list_image_files(folder),
        }
    }

    /// Uniformly random picture from `scope`, `None` when it has none
    pub fn pick_random(&self, scope: &FolderSelection) -> Option<PathBuf> {
        self.pick_random_with(scope, &mut rand::thread_rng())
    }

    pub fn pick_random_with<R: Rng + ?Sized>(
        &self,
        scope: &FolderSelection,
        rng: &mut R,
    ) -> Option<PathBuf> {
        let candidates = self.candidates(scope);
        let picked = candidates.choose(rng).cloned();
        if picked.is_none() {
            debug!("No pictures in scope {:?}", scope);
        }
        picked
    }

    /// Turn a picker path (relative to the base, `None` for all) into a scope
    pub fn resolve(&self, relative: Option<&str>) -> Result<FolderSelection> {
        let relative = match relative.map(str::trim) {
            None | Some("") => return Ok(FolderSelection::All),
            Some(r) => r,
        };

        let candidate = self.base.join(relative);
        if !candidate.is_dir() {
            return Err(AppError::FolderNotFound(candidate));
        }

        let base = self.base.canonicalize()?;
        let folder = candidate.canonicalize()?;
        if !folder.starts_with(&base) {
            return Err(AppError::FolderOutsideBase(candidate));
        }
        if folder == base {
            return Ok(FolderSelection::All);
        }
        Ok(FolderSelection::Folder(candidate))
    }
}
