use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of routes kept in the recent-pages list
pub const MAX_RECENT: usize = 5;

/// Bounded most-recent-first list of visited routes.
///
/// Stored on disk as a JSON array of route strings, capped at
/// [`MAX_RECENT`] entries with deduplication on insert: re-visiting a
/// route moves it back to the front.
#[derive(Debug)]
pub struct RecentPages {
    routes: Vec<String>,
    path: PathBuf,
}

impl RecentPages {
    /// Load the list from `path`, starting empty if the file is missing
    /// or unreadable as JSON.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let routes = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(routes) => routes,
                Err(e) => {
                    warn!("Ignoring corrupt recent-pages file {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        let mut recent = Self { routes, path };
        recent.enforce_invariants();
        recent
    }

    /// Record a visit, moving the route to the front
    pub fn record(&mut self, route: &str) {
        self.routes.retain(|r| r != route);
        self.routes.insert(0, route.to_string());
        self.routes.truncate(MAX_RECENT);
        self.save();
    }

    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn clear(&mut self) {
        self.routes.clear();
        self.save();
    }

    // A file written by hand may exceed the cap or repeat routes
    fn enforce_invariants(&mut self) {
        let mut seen = Vec::new();
        self.routes.retain(|r| {
            if seen.contains(r) {
                false
            } else {
                seen.push(r.clone());
                true
            }
        });
        self.routes.truncate(MAX_RECENT);
    }

    fn save(&self) {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(dir) {
                    warn!("Failed to create data directory {}: {}", dir.display(), e);
                    return;
                }
            }
        }
        match serde_json::to_string(&self.routes) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!("Failed to save recent pages to {}: {}", self.path.display(), e);
                }
            }
            Err(e) => warn!("Failed to serialize recent pages: {}", e),
        }
    }
}

/// Resolve the recent-pages file location from the data directory
pub fn recent_pages_path(data_dir: &Path) -> PathBuf {
    data_dir.join("recent-pages.json")
}

/// Announce where the recent-pages list lives at startup
pub fn log_storage_location(path: &Path) {
    info!("Recent pages stored in {}", path.display());
}
