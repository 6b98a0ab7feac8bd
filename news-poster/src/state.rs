use crate::dedup::History;
use crate::types::Result;
use fd_lock::{RwLock, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk record of posted titles
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PostedState {
    #[serde(default)]
    pub titles: Vec<String>,
}

/// JSON-file persistence for the posting history
pub struct StateStore {
    path: PathBuf,
    history_limit: usize,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>, history_limit: usize) -> Self {
        Self {
            path: path.into(),
            history_limit,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history; a missing file means nothing has been posted yet
    pub fn load(&self) -> Result<History> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No state file at {}, starting fresh", self.path.display());
                return Ok(History::with_limit(self.history_limit));
            }
            Err(e) => return Err(e.into()),
        };

        let state: PostedState = serde_json::from_str(&raw)?;
        debug!("Loaded {} posted titles", state.titles.len());
        Ok(History::from_titles(state.titles, self.history_limit))
    }

    /// Write the history through a temp file and rename it over the old state
    pub fn save(&self, history: &History) -> Result<()> {
        let state = PostedState {
            titles: history.titles().to_vec(),
        };
        let json = serde_json::to_string_pretty(&state)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!("Saved {} posted titles to {}", history.len(), self.path.display());
        Ok(())
    }

    /// Advisory lock on a sidecar file next to the state file
    pub fn lock_file(&self) -> Result<StateLock> {
        let mut lock_path = self.path.clone().into_os_string();
        lock_path.push(".lock");

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        Ok(StateLock {
            lock: RwLock::new(file),
        })
    }
}

/// Exclusive claim on the state file for the duration of a run
pub struct StateLock {
    lock: RwLock<File>,
}

impl StateLock {
    /// Blocks until any overlapping run releases the state
    pub fn acquire(&mut self) -> Result<RwLockWriteGuard<'_, File>> {
        let guard = self.lock.write()?;
        debug!("Acquired state lock");
        Ok(guard)
    }

    /// `None` if another handle currently holds the lock
    pub fn try_acquire(&mut self) -> Result<Option<RwLockWriteGuard<'_, File>>> {
        match self.lock.try_write() {
            Ok(guard) => Ok(Some(guard)),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
