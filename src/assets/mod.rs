/*!
 * Asset Loading
 *
 * Type-keyed loader registry with a shared cache. Render processes call
 * `load::<T>(key)` and get back an `Arc<T>`; which loader runs is decided by
 * the requested type alone.
 */

pub mod glyph_sheet;

pub use glyph_sheet::{GlyphSheet, GlyphSheetLoader};

use crate::core::AssetError;
use ahash::RandomState;
use dashmap::DashMap;
use log::{debug, info};
use parking_lot::RwLock;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Loader strategy for one asset type
pub trait AssetLoader<T>: Send + Sync {
    fn load(&self, key: &str) -> Result<T, AssetError>;
}

impl<T, F> AssetLoader<T> for F
where
    F: Fn(&str) -> Result<T, AssetError> + Send + Sync,
{
    fn load(&self, key: &str) -> Result<T, AssetError> {
        self(key)
    }
}

/// Concrete wrapper so a typed loader can live in an `Any` table
struct LoaderEntry<T>(Arc<dyn AssetLoader<T>>);

type AnyArc = Arc<dyn Any + Send + Sync>;

/// Shared asset cache
///
/// Cheap to clone; clones share loaders and cached assets.
#[derive(Clone, Default)]
pub struct AssetManager {
    loaders: Arc<RwLock<HashMap<TypeId, AnyArc, RandomState>>>,
    cache: Arc<DashMap<(TypeId, String), AnyArc, RandomState>>,
}

impl AssetManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the loader used for `T`
    pub fn register<T, L>(&self, loader: L)
    where
        T: Send + Sync + 'static,
        L: AssetLoader<T> + 'static,
    {
        let entry: AnyArc = Arc::new(LoaderEntry::<T>(Arc::new(loader)));
        if self
            .loaders
            .write()
            .insert(TypeId::of::<T>(), entry)
            .is_some()
        {
            info!("Replaced asset loader for {}", type_name::<T>());
        } else {
            info!("Registered asset loader for {}", type_name::<T>());
        }
    }

    /// Cached asset for `key`, loading it on first request
    pub fn load<T>(&self, key: &str) -> Result<Arc<T>, AssetError>
    where
        T: Send + Sync + 'static,
    {
        let cache_key = (TypeId::of::<T>(), key.to_string());
        if let Some(cached) = self.cache.get(&cache_key) {
            if let Ok(asset) = Arc::clone(cached.value()).downcast::<T>() {
                debug!("Asset cache hit: {} {:?}", type_name::<T>(), key);
                return Ok(asset);
            }
        }

        // Loader runs with no lock held; it may itself load other assets
        let loader = self.loader::<T>()?;
        let asset = Arc::new(loader.load(key)?);
        debug!("Loaded asset {} {:?}", type_name::<T>(), key);

        let stored = self
            .cache
            .entry(cache_key)
            .or_insert_with(|| asset.clone() as AnyArc)
            .value()
            .clone();
        Ok(stored.downcast::<T>().unwrap_or(asset))
    }

    fn loader<T: Send + Sync + 'static>(&self) -> Result<Arc<dyn AssetLoader<T>>, AssetError> {
        let entry = self
            .loaders
            .read()
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| AssetError::NoLoader(type_name::<T>().to_string()))?;
        entry
            .downcast::<LoaderEntry<T>>()
            .map(|entry| Arc::clone(&entry.0))
            .map_err(|_| AssetError::NoLoader(type_name::<T>().to_string()))
    }

    pub fn is_cached<T: 'static>(&self, key: &str) -> bool {
        self.cache
            .contains_key(&(TypeId::of::<T>(), key.to_string()))
    }

    /// Drop the cached `T` for `key`; holders of the `Arc` keep their copy
    pub fn evict<T: 'static>(&self, key: &str) -> bool {
        self.cache
            .remove(&(TypeId::of::<T>(), key.to_string()))
            .is_some()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl std::fmt::Debug for AssetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetManager")
            .field("loaders", &self.loaders.read().len())
            .field("cached", &self.cache.len())
            .finish()
    }
}
