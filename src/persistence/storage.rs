//! Platform storage backends for [`ProfileStore`]

use super::{Profile, ProfileStore, decode, encode};

/// JSON file on disk, written via a temp file and rename
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn write(&self, json: &str) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ProfileStore for FileStore {
    fn load(&self) -> Profile {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                if let Some(profile) = decode(&json) {
                    log::info!("Loaded profile from {}", self.path.display());
                    return profile;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No profile at {}, starting fresh", self.path.display());
            }
            Err(e) => log::warn!("Failed to read {}: {}", self.path.display(), e),
        }
        Profile::default()
    }

    fn save(&mut self, profile: &Profile) {
        match self.write(&encode(profile)) {
            Ok(()) => log::info!("Profile saved to {}", self.path.display()),
            Err(e) => log::warn!("Failed to save profile to {}: {}", self.path.display(), e),
        }
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "rocket_escape_profile";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ProfileStore for LocalStorageStore {
    fn load(&self) -> Profile {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(profile) = decode(&json) {
                    log::info!("Loaded profile from LocalStorage");
                    return profile;
                }
            }
        }

        log::info!("No profile found, starting fresh");
        Profile::default()
    }

    fn save(&mut self, profile: &Profile) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(Self::STORAGE_KEY, &encode(profile)).is_err() {
                log::warn!("LocalStorage rejected profile save");
            }
        }
    }
}
