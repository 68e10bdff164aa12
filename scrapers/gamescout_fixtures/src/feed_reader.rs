use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{
    error::{FixtureError, Result},
    types::{FeedDocument, RawMatch},
};

/// One league feed, parsed and flattened into (match, enclosing round) pairs.
#[derive(Debug, Clone)]
pub struct LeagueFeed {
    pub source: PathBuf,
    pub league: String,
    pub matches: Vec<(RawMatch, Option<String>)>,
}

impl LeagueFeed {
    pub fn from_document(source: &Path, document: FeedDocument) -> Self {
        let league = match document.name().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let stem = source
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| source.display().to_string());
                warn!("Feed {:?} has no league name, using '{}'", source, stem);
                stem
            }
        };

        let matches = match document {
            FeedDocument::Flat { matches, .. } => matches.into_iter().map(|m| (m, None)).collect(),
            FeedDocument::Rounds { rounds, .. } => rounds
                .into_iter()
                .flat_map(|round| {
                    let name = round.name;
                    round.matches.into_iter().map(move |m| (m, name.clone()))
                })
                .collect(),
        };

        Self {
            source: source.to_path_buf(),
            league,
            matches,
        }
    }
}

pub struct FeedReader {
    root: PathBuf,
    auxiliary_markers: Vec<String>,
}

impl FeedReader {
    pub fn new(root: impl Into<PathBuf>, auxiliary_markers: Vec<String>) -> Self {
        Self {
            root: root.into(),
            auxiliary_markers,
        }
    }

    fn is_auxiliary(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.auxiliary_markers
            .iter()
            .any(|marker| name.contains(&marker.to_lowercase()))
    }

    /// All match feed files under the root, sorted so repeated runs visit them in the same order.
    pub fn feed_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(FixtureError::FeedDirMissing(self.root.clone()));
        }

        let mut files = Vec::new();
        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if dir == self.root => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping unreadable directory {:?}: {}", dir, e);
                    continue;
                }
            };

            for entry in entries {
                let (path, file_type) = match entry.and_then(|e| Ok((e.path(), e.file_type()?))) {
                    Ok(found) => found,
                    Err(e) => {
                        warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                        continue;
                    }
                };

                // Symlinks are never followed; an alias or a loop would feed the same files twice.
                if file_type.is_symlink() {
                    debug!("Skipping symlink {:?}", path);
                } else if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                    if self.is_auxiliary(&path) {
                        debug!("Skipping auxiliary file {:?}", path);
                    } else {
                        files.push(path);
                    }
                }
            }
        }

        files.sort();
        Ok(files)
    }

    pub fn read_feed(path: &Path) -> Result<LeagueFeed> {
        let content = fs::read_to_string(path)?;
        let document: FeedDocument = serde_json::from_str(&content)?;
        Ok(LeagueFeed::from_document(path, document))
    }

    /// Parses every feed. Files that cannot be read or lack a match collection are
    /// logged and left out; only a missing root fails.
    pub fn read_all(&self) -> Result<FeedScan> {
        let files = self.feed_files()?;
        let scan = files.iter().fold(FeedScan::default(), |mut scan, path| {
            match Self::read_feed(path) {
                Ok(feed) => {
                    debug!("Read {} matches for {} from {:?}", feed.matches.len(), feed.league, path);
                    scan.feeds.push(feed);
                }
                Err(e) => {
                    warn!("Error processing feed file {:?}: {}", path, e);
                    scan.skipped.push(path.clone());
                }
            }
            scan
        });
        Ok(scan)
    }
}

#[derive(Debug, Default)]
pub struct FeedScan {
    pub feeds: Vec<LeagueFeed>,
    pub skipped: Vec<PathBuf>,
}
