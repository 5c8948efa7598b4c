//! Favorite cities, persisted as a JSON array of location labels.

use skycast_core::{AppError, FavoritesError, StorageError};

use crate::store::KeyValueStore;

/// Default key the list is stored under.
pub const FAVORITES_KEY: &str = "weatherFavorites";

/// Ordered list of favorite location labels ("London, GB").
///
/// Every mutation is written through to the store.
pub struct Favorites<S: KeyValueStore> {
    store: S,
    key: String,
    cities: Vec<String>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Load favorites from `store` under `key`.
    ///
    /// A missing key is an empty list. A stored value that isn't a JSON
    /// string array is logged and treated as empty; it is overwritten on the
    /// next mutation.
    pub fn load(store: S, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        let cities = match store.get(&key)? {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(cities) => cities,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable favorites under {}: {}", key, e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        tracing::debug!("Loaded {} favorites", cities.len());
        Ok(Self { store, key, cities })
    }

    pub fn list(&self) -> &[String] {
        &self.cities
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.cities.iter().any(|c| c == label)
    }

    /// Append `label` and persist.
    pub fn add(&mut self, label: &str) -> Result<(), AppError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(FavoritesError::NoCitySelected.into());
        }
        if self.contains(label) {
            return Err(FavoritesError::DuplicateFavorite(label.to_string()).into());
        }

        self.cities.push(label.to_string());
        if let Err(e) = self.save() {
            self.cities.pop();
            return Err(e.into());
        }

        tracing::info!("Added favorite: {}", label);
        Ok(())
    }

    /// Remove every entry equal to `label` and persist. Returns whether
    /// anything was removed. The list is left unchanged if the write fails.
    pub fn remove(&mut self, label: &str) -> Result<bool, StorageError> {
        let previous = self.cities.clone();
        self.cities.retain(|c| c != label);
        let removed = self.cities.len() != previous.len();

        if let Err(e) = self.save() {
            self.cities = previous;
            return Err(e);
        }

        if removed {
            tracing::info!("Removed favorite: {}", label);
        }
        Ok(removed)
    }

    fn save(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.cities)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        self.store.set(&self.key, &json)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// City part of a favorite label: the text before the first comma.
pub fn search_term(label: &str) -> &str {
    label.split(',').next().unwrap_or(label).trim()
}
