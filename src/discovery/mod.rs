//! Library discovery: walks a project tree and collects license files.
//!
//! - [`exclude`] — compiled exclusion globs, checked before descending.
//! - [`lockfile`] — `Package.resolved` parsing for the package-cache scan.
//! - [`order`] — the name ordering applied to results.

pub mod exclude;
pub mod lockfile;
pub mod order;

use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::DiscoveryError;
use crate::license::classifier::classify;
use crate::models::Library;

pub use exclude::Exclusions;

/// Accepted license file stems, compared lowercased.
const LICENSE_STEMS: [&str; 2] = ["license", "licence"];

/// Accepted license file extensions, compared exactly.
const LICENSE_EXTENSIONS: [&str; 4] = ["", "text", "txt", "md"];

/// Find every library with a license file under `root`.
///
/// Hidden files and directories are never visited, and excluded paths are
/// pruned before descent. Each library is named after the directory holding
/// its license file; the first file found for a name wins (case-insensitive).
/// Directory entries are visited in file-name order so the survivor is stable.
///
/// When `include_lockfiles` is set, each `Package.resolved` triggers a scan
/// of `cache_dir` (or the platform package cache) whose results are limited
/// to the packages pinned in that lockfile.
///
/// The result is sorted with [`order::natural_cmp`]. Any error aborts the
/// whole run.
pub fn discover(
    root: &Path,
    exclusions: &Exclusions,
    cache_dir: Option<&Path>,
    include_lockfiles: bool,
) -> Result<Vec<Library>, DiscoveryError> {
    let root = root
        .canonicalize()
        .map_err(|source| DiscoveryError::DirectoryUnavailable {
            path: root.to_path_buf(),
            source,
        })?;
    if !root.is_dir() {
        return Err(DiscoveryError::DirectoryUnavailable {
            path: root,
            source: std::io::Error::other("not a directory"),
        });
    }

    let mut libraries: Vec<Library> = Vec::new();

    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, &root, exclusions));

    for entry in walker {
        let entry = entry.map_err(|err| DiscoveryError::DirectoryUnavailable {
            path: err.path().map_or_else(|| root.clone(), Path::to_path_buf),
            source: err.into(),
        })?;
        if entry.depth() == 0 || entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();

        if include_lockfiles && lockfile::is_lockfile(path) {
            let found = discover_pinned(path, cache_dir)?;
            for library in found {
                if !contains_name(&libraries, &library.name) {
                    libraries.push(library);
                }
            }
            continue;
        }

        let Some(name) = package_name(path) else {
            continue;
        };
        if contains_name(&libraries, &name) || !is_license_file(path) {
            continue;
        }

        let license_path = relative_path(path, &root);
        let text = std::fs::read_to_string(path).map_err(|source| {
            DiscoveryError::UnreadableLicenseFile {
                path: license_path.clone(),
                source,
            }
        })?;
        let license_text = text.trim().to_string();
        let license_type = classify(&license_text);

        debug!("found {} ({}) at {}", name, license_type, license_path);

        libraries.push(Library {
            name,
            license_path,
            license_type,
            license_text,
        });
    }

    libraries.sort_by(|a, b| order::natural_cmp(&a.name, &b.name));
    Ok(libraries)
}

/// Scan the package cache for the packages pinned in `lockfile_path`.
fn discover_pinned(
    lockfile_path: &Path,
    cache_dir: Option<&Path>,
) -> Result<Vec<Library>, DiscoveryError> {
    let pinned = lockfile::resolve(lockfile_path)?;

    let cache = cache_location(cache_dir, default_cache_dir())?;

    info!(
        "{} pins {} package names, scanning {}",
        lockfile_path.display(),
        pinned.len(),
        cache.display()
    );

    let libraries = discover(&cache, &Exclusions::none(), None, false)?
        .into_iter()
        .filter(|library| pinned.contains(&library.name.to_lowercase()))
        .collect();

    Ok(libraries)
}

/// The explicit cache directory if given, else `fallback`.
fn cache_location(
    cache_dir: Option<&Path>,
    fallback: Option<PathBuf>,
) -> Result<PathBuf, DiscoveryError> {
    match cache_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => fallback.ok_or(DiscoveryError::CacheLocationUnavailable),
    }
}

/// Where Swift Package Manager keeps checked-out packages when no cache is given.
#[cfg(target_os = "macos")]
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library/Developer/Xcode/DerivedData"))
}

/// Where Swift Package Manager keeps checked-out packages when no cache is given.
#[cfg(not(target_os = "macos"))]
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|cache| cache.join("org.swift.swiftpm"))
}

fn keep_entry(entry: &DirEntry, root: &Path, exclusions: &Exclusions) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if is_hidden(entry) {
        return false;
    }
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    if exclusions.is_excluded(relative, entry.path()) {
        debug!("excluded {}", entry.path().display());
        return false;
    }
    true
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn contains_name(libraries: &[Library], name: &str) -> bool {
    let name = name.to_lowercase();
    libraries.iter().any(|l| l.name.to_lowercase() == name)
}

/// Name of the directory holding `path`.
fn package_name(path: &Path) -> Option<String> {
    path.parent()?
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// `LICENSE`, `licence.txt`, `License.md` and the like, as a regular file.
fn is_license_file(path: &Path) -> bool {
    let stem = match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => stem.to_lowercase(),
        None => return false,
    };
    let extension = match path.extension() {
        Some(ext) => match ext.to_str() {
            Some(ext) => ext,
            None => return false,
        },
        None => "",
    };

    LICENSE_STEMS.contains(&stem.as_str())
        && LICENSE_EXTENSIONS.contains(&extension)
        && path.is_file()
}

/// `path` relative to `root`, with `/` separators.
fn relative_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
