use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Fixed storage key for the persisted playback record.
pub const STORAGE_KEY: &str = "musicPlayerState";

/// Persisted music-player state, JSON-encoded as `{"playing":bool}`.
///
/// The record survives restarts and is never deleted — only overwritten.
///
/// # Example
/// ```
/// use bk_core::playback::PlaybackState;
/// let state = PlaybackState { playing: true };
/// let json = serde_json::to_string(&state).unwrap();
/// assert_eq!(json, r#"{"playing":true}"#);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaybackState {
    /// Whether the soundtrack should be playing.
    pub playing: bool,
}

/// Capability interface for the playback record. Injected explicitly —
/// never accessed as ambient global state.
pub trait PlaybackStore {
    /// Read the persisted record. `None` when absent or unreadable.
    fn load(&self) -> Option<PlaybackState>;

    /// Write the record. Failures are logged by the implementation, not
    /// surfaced: persistence is best-effort, like browser local storage.
    fn save(&self, state: &PlaybackState);
}

/// JSON file store: one record under `{dir}/musicPlayerState.json`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store rooted in the given state directory.
    #[must_use]
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlaybackStore for JsonFileStore {
    fn load(&self) -> Option<PlaybackState> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!(
                    "Playback record at {} is corrupt, ignoring: {e}",
                    self.path.display()
                );
                None
            }
        }
    }

    fn save(&self, state: &PlaybackState) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            log::warn!("Cannot create state dir {}: {e}", parent.display());
            return;
        }
        match serde_json::to_string(state) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("Cannot write {}: {e}", self.path.display());
                }
            }
            Err(e) => log::warn!("Cannot encode playback record: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().is_none());

        store.save(&PlaybackState { playing: true });
        assert_eq!(store.load(), Some(PlaybackState { playing: true }));

        store.save(&PlaybackState { playing: false });
        assert_eq!(store.load(), Some(PlaybackState { playing: false }));
    }

    #[test]
    fn file_name_uses_fixed_storage_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(
            store
                .path()
                .file_name()
                .is_some_and(|n| n == "musicPlayerState.json")
        );
    }

    #[test]
    fn corrupt_record_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn wire_format_matches_original_record() {
        let state: PlaybackState = serde_json::from_str(r#"{"playing":false}"#).unwrap();
        assert!(!state.playing);
    }
}
