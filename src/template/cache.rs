//! Process-wide cache of compiled templates.
//!
//! Entries are keyed by page name and layout, created on first use and kept
//! for the life of the process. In development mode nothing is ever stored,
//! so every render recompiles from disk and template edits show up at once.
//!
//! The lock only guards map access. Compilation happens outside of it, and
//! [`TemplateCache::put`] keeps whichever entry was stored first, so two
//! renders racing on a cold key end up sharing one template.

use super::{CompiledTemplate, kind::Layout};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

/// Composite cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: String,
    pub layout: Layout,
}

impl CacheKey {
    pub fn new(name: impl Into<String>, layout: Layout) -> Self {
        Self {
            name: name.into(),
            layout,
        }
    }
}

/// Thread-safe, never-evicting template cache.
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: Mutex<HashMap<CacheKey, Arc<CompiledTemplate>>>,
    dev_mode: bool,
}

impl TemplateCache {
    /// Create an empty cache. `dev_mode` disables storing entries.
    pub fn new(dev_mode: bool) -> Self {
        Self {
            templates: Mutex::new(HashMap::new()),
            dev_mode,
        }
    }

    pub fn is_dev_mode(&self) -> bool {
        self.dev_mode
    }

    /// Look up a compiled template.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CompiledTemplate>> {
        self.templates.lock().get(key).cloned()
    }

    /// Store `template` under `key` unless an entry already exists.
    ///
    /// Returns the cached entry, which is `template` itself on first insert or
    /// in development mode.
    pub fn put(&self, key: CacheKey, template: CompiledTemplate) -> Arc<CompiledTemplate> {
        let template = Arc::new(template);
        if self.dev_mode {
            return template;
        }
        self.templates
            .lock()
            .entry(key)
            .or_insert(template)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.templates.lock().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::Environment;

    fn compiled(source: &'static str) -> CompiledTemplate {
        let mut env = Environment::new();
        env.add_template("page.html", source).unwrap();
        CompiledTemplate::new(env, "page.html".into(), Layout::Full)
    }

    #[test]
    fn test_get_after_put() {
        let cache = TemplateCache::new(false);
        let key = CacheKey::new("home", Layout::Full);

        assert!(cache.get(&key).is_none());
        let stored = cache.put(key.clone(), compiled("home"));

        let hit = cache.get(&key).unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_keeps_first_entry() {
        let cache = TemplateCache::new(false);
        let key = CacheKey::new("home", Layout::Full);

        let first = cache.put(key.clone(), compiled("first"));
        let second = cache.put(key.clone(), compiled("second"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.get(&key).unwrap().render(()).unwrap(), "first");
    }

    #[test]
    fn test_layout_is_part_of_key() {
        let cache = TemplateCache::new(false);

        cache.put(CacheKey::new("schedule", Layout::Full), compiled("full"));
        cache.put(CacheKey::new("schedule", Layout::Partial), compiled("partial"));

        assert_eq!(cache.len(), 2);
        let partial = cache.get(&CacheKey::new("schedule", Layout::Partial)).unwrap();
        assert_eq!(partial.render(()).unwrap(), "partial");
    }

    #[test]
    fn test_keys_do_not_collide_like_concatenation() {
        // "a" + "bc" and "ab" + "c" would share a concatenated key
        let a = CacheKey::new("layout_error.html", Layout::Full);
        let b = CacheKey::new("layout_full.html", Layout::Error);
        assert_ne!(a, b);
    }

    #[test]
    fn test_dev_mode_never_stores() {
        let cache = TemplateCache::new(true);
        let key = CacheKey::new("home", Layout::Full);

        let stored = cache.put(key.clone(), compiled("home"));
        assert_eq!(stored.render(()).unwrap(), "home");
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
        assert!(cache.is_dev_mode());
    }

    #[test]
    fn test_concurrent_puts_converge() {
        let cache = Arc::new(TemplateCache::new(false));
        let key = CacheKey::new("home", Layout::Full);

        let winners: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let cache = Arc::clone(&cache);
                    let key = key.clone();
                    s.spawn(move || cache.put(key, compiled("home")))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        assert!(winners.iter().all(|w| Arc::ptr_eq(w, &winners[0])));
    }
}
