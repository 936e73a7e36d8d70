//! Client-local persisted state.
//!
//! A profile-namespaced key/value store: one JSON file per key on native
//! platforms, an in-memory map on wasm. The client keeps its transcript
//! under `history` and its theme preference under `theme`.

#[cfg(target_arch = "wasm32")]
use once_cell::sync::Lazy;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::sync::Mutex;

use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use std::fs;

/// In-memory storage for wasm builds, keyed by `<root>/<key>`.
#[cfg(target_arch = "wasm32")]
static MEM_STORAGE: Lazy<Mutex<HashMap<String, String>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

#[derive(Clone, Debug)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Store rooted in the platform data directory, namespaced by profile.
    pub fn new(profile: &str) -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("cache"));
        Self {
            root: base.join("moodchat").join(sanitize(profile)),
        }
    }

    /// Store rooted at an explicit directory. Lets tests run against a
    /// temporary dir instead of the real data dir.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize(key)))
    }

    #[cfg(target_arch = "wasm32")]
    fn mem_key(&self, key: &str) -> String {
        format!("{}/{}", self.root.display(), sanitize(key))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn get(&self, key: &str) -> Option<String> {
        let storage = MEM_STORAGE.lock().ok()?;
        storage.get(&self.mem_key(key)).cloned()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn set(&self, key: &str, value: &str) -> Result<(), String> {
        fs::create_dir_all(&self.root)
            .map_err(|e| format!("failed to create storage directory: {e}"))?;
        fs::write(self.key_path(key), value).map_err(|e| format!("failed to write storage: {e}"))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut storage = MEM_STORAGE.lock().map_err(|e| e.to_string())?;
        storage.insert(self.mem_key(key), value.to_string());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn remove(&self, key: &str) -> Result<(), String> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(path).map_err(|e| format!("failed to delete storage key: {e}"))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn remove(&self, key: &str) -> Result<(), String> {
        let mut storage = MEM_STORAGE.lock().map_err(|e| e.to_string())?;
        storage.remove(&self.mem_key(key));
        Ok(())
    }

    /// All keys currently present, without the `.json` suffix.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Ok(entries) = fs::read_dir(&self.root) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        keys
    }

    #[cfg(target_arch = "wasm32")]
    pub fn keys(&self) -> Vec<String> {
        let prefix = format!("{}/", self.root.display());
        let storage = match MEM_STORAGE.lock() {
            Ok(storage) => storage,
            Err(_) => return Vec::new(),
        };
        let mut keys: Vec<String> = storage
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
            .collect();
        keys.sort();
        keys
    }
}

/// Profile and key names become file names; anything unusual flattens to `_`.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_flattens_path_separators() {
        assert_eq!(sanitize("a/b\\c d"), "a_b_c_d");
        assert_eq!(sanitize("history"), "history");
    }
}
