use core::hash::BuildHasherDefault;
use std::path::PathBuf;
use std::string::String;
use std::sync::{Arc, RwLock};

use hashbrown::HashMap;
use rustc_hash::FxHasher;

use crate::{Banner, Font, LoadError};

type Fonts = HashMap<Banner, Arc<Font<String>>, BuildHasherDefault<FxHasher>>;

/// Fonts loaded from a directory, shared read-only between threads.
///
/// Lookups take a read lock. A miss loads the file without holding the lock
/// and then inserts it; if two threads race, the first insert wins. Failed
/// loads are never cached.
pub struct FontCache {
    dir: PathBuf,
    fonts: Option<RwLock<Fonts>>,
}

impl FontCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fonts: Some(RwLock::new(Fonts::default())),
        }
    }

    /// A cache that reads the font file again on every lookup.
    pub fn uncached(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fonts: None,
        }
    }

    pub fn get(&self, banner: Banner) -> Result<Arc<Font<String>>, LoadError> {
        let fonts = match self.fonts {
            Some(ref x) => x,
            None => return Font::load(&self.dir, banner).map(Arc::new),
        };
        if let Some(font) = read(fonts).get(&banner) {
            return Ok(font.clone());
        }
        let font = Arc::new(Font::load(&self.dir, banner)?);
        let mut fonts = fonts.write().unwrap_or_else(|e| e.into_inner());
        Ok(fonts.entry(banner).or_insert(font).clone())
    }

    /// Load every banner up front. Failures are logged and left for the
    /// next lookup to retry.
    pub fn preload(&self) {
        if self.fonts.is_none() {
            return;
        }
        for banner in Banner::ALL {
            if let Err(e) = self.get(banner) {
                log::warn!("{}", e);
            }
        }
    }

    /// Number of fonts currently held.
    pub fn len(&self) -> usize {
        match self.fonts {
            Some(ref x) => read(x).len(),
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Cached fonts are never mutated in place, so a poisoned lock still guards
// consistent data.
fn read(fonts: &RwLock<Fonts>) -> std::sync::RwLockReadGuard<'_, Fonts> {
    fonts.read().unwrap_or_else(|e| e.into_inner())
}
