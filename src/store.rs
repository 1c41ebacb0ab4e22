//! Persisted like-store
//!
//! A JSON array of profiles on disk, one entry per user the bot decided to
//! like. Lookup is by profile id. The file is rewritten sorted by id after
//! every mutation, via a temp file and rename so a crash mid-write never
//! leaves a truncated store behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::api::profile::Profile;

/// In-memory view of the liked-users file.
#[derive(Debug)]
pub struct LikeStore {
    path: PathBuf,
    entries: Vec<Profile>,
}

impl LikeStore {
    /// Load the store from `path`. A missing file is an empty store;
    /// a malformed file is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                entries: Vec::new(),
            });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read like-store file {}", path.display()))?;
        let entries: Vec<Profile> = serde_json::from_str(&contents)
            .with_context(|| format!("malformed like-store file {}", path.display()))?;
        Ok(Self { path, entries })
    }

    /// Write all entries back to the file, sorted ascending by id.
    pub fn save(&mut self) -> Result<()> {
        self.entries.sort_by(|a, b| a.id.cmp(&b.id));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create like-store directory {}", parent.display())
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.entries)
            .context("failed to serialize like-store")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)
            .with_context(|| format!("failed to write like-store file {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace like-store file {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.entries.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Profile> {
        self.entries.iter_mut().find(|p| p.id == id)
    }

    /// Insert or overwrite the entry with the profile's id.
    pub fn put(&mut self, profile: Profile) {
        match self.entries.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.entries.push(profile),
        }
    }

    /// Remove and return the entry with `id`, if present.
    pub fn remove(&mut self, id: &str) -> Option<Profile> {
        let pos = self.entries.iter().position(|p| p.id == id)?;
        Some(self.entries.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, school: Option<&str>, nb_times: Option<u32>) -> Profile {
        let mut p = Profile::with_id(id);
        p.school = school.map(str::to_string);
        p.nb_times = nb_times;
        p
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LikeStore::load(dir.path().join("likes.json")).expect("load");
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("likes.json");
        fs::write(&path, "{not json").expect("write");
        let err = LikeStore::load(&path).expect_err("should fail");
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_round_trip_preserves_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("likes.json");

        let mut store = LikeStore::load(&path).expect("load");
        store.put(profile("u2", Some("MIT"), Some(5)));
        store.put(profile("u1", Some("ENS"), None));
        store.save().expect("save");

        let reloaded = LikeStore::load(&path).expect("reload");
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("u2"), store.get("u2"));
        assert_eq!(reloaded.get("u1").and_then(|p| p.school.as_deref()), Some("ENS"));
        assert_eq!(reloaded.get("u2").and_then(|p| p.nb_times), Some(5));
    }

    #[test]
    fn test_save_sorts_by_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("likes.json");

        let mut store = LikeStore::load(&path).expect("load");
        store.put(profile("zz", None, None));
        store.put(profile("aa", None, None));
        store.put(profile("mm", None, None));
        store.save().expect("save");

        let contents = fs::read_to_string(&path).expect("read");
        let parsed: Vec<Profile> = serde_json::from_str(&contents).expect("parse");
        let ids: Vec<&str> = parsed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["aa", "mm", "zz"]);
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = LikeStore::load(dir.path().join("likes.json")).expect("load");

        store.put(profile("u1", Some("MIT"), Some(2)));
        store.put(profile("u1", Some("MIT"), Some(7)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("u1").and_then(|p| p.nb_times), Some(7));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = LikeStore::load(dir.path().join("likes.json")).expect("load");

        store.put(profile("u1", None, None));
        assert!(store.contains("u1"));
        let removed = store.remove("u1").expect("removed");
        assert_eq!(removed.id, "u1");
        assert!(!store.contains("u1"));
        assert!(store.remove("u1").is_none());
    }
}
