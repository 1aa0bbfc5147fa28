use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

enum CacheEntry<T> {
    Generating,
    Ready {
        value: Arc<T>,
        generated_at: Instant,
        revalidating: bool,
    },
}

/// Результат обращения к кэшу страниц.
#[derive(Debug)]
pub(crate) enum Lookup<T> {
    /// Страница есть. При `revalidate == true` вызывающий должен запустить
    /// перегенерацию: флаг выдаётся только одному вызывающему на интервал.
    Cached { value: Arc<T>, revalidate: bool },
    /// Страница генерируется впервые другим вызывающим.
    Generating,
    /// Записи не было, теперь она помечена как генерируемая этим вызывающим.
    Claimed,
    /// Записи не было, а кэш заполнен: генерацию запускать нельзя.
    Full,
}

/// Кэш сгенерированных страниц с перегенерацией по интервалу.
///
/// Устаревшая страница продолжает отдаваться, пока новая не готова.
/// Число записей (вместе с генерируемыми) не превышает `capacity`.
pub(crate) struct PageCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    interval: Duration,
    capacity: usize,
}

impl<T> PageCache<T> {
    pub(crate) fn new(interval: Duration) -> Self {
        Self::with_capacity(interval, usize::MAX)
    }

    pub(crate) fn with_capacity(interval: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            interval,
            capacity,
        }
    }

    pub(crate) fn lookup(&self, key: &str) -> Lookup<T> {
        let mut entries = self.entries();
        let full = entries.len() >= self.capacity;
        match entries.entry(key.to_string()) {
            Entry::Vacant(_) if full => Lookup::Full,
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry::Generating);
                Lookup::Claimed
            }
            Entry::Occupied(mut occupied) => match occupied.get_mut() {
                CacheEntry::Generating => Lookup::Generating,
                CacheEntry::Ready {
                    value,
                    generated_at,
                    revalidating,
                } => {
                    let revalidate = !*revalidating && generated_at.elapsed() >= self.interval;
                    if revalidate {
                        *revalidating = true;
                    }
                    Lookup::Cached {
                        value: Arc::clone(value),
                        revalidate,
                    }
                }
            },
        }
    }

    pub(crate) fn store(&self, key: &str, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.entries().insert(
            key.to_string(),
            CacheEntry::Ready {
                value: Arc::clone(&value),
                generated_at: Instant::now(),
                revalidating: false,
            },
        );
        value
    }

    /// Откатывает неудавшуюся генерацию: новая запись удаляется,
    /// у существующей снимается флаг перегенерации.
    pub(crate) fn abandon(&self, key: &str) {
        let mut entries = self.entries();
        if matches!(entries.get(key), Some(CacheEntry::Generating)) {
            entries.remove(key);
        } else if let Some(CacheEntry::Ready { revalidating, .. }) = entries.get_mut(key) {
            *revalidating = false;
        }
    }

    pub(crate) fn remove(&self, key: &str) {
        self.entries().remove(key);
    }

    /// Удаляет устаревшие записи, для которых `evictable` истинно.
    /// Записи в процессе перегенерации не трогаются.
    pub(crate) fn evict_stale(&self, evictable: impl Fn(&T) -> bool) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| match entry {
            CacheEntry::Generating => true,
            CacheEntry::Ready {
                value,
                generated_at,
                revalidating,
            } => *revalidating || generated_at.elapsed() < self.interval || !evictable(value),
        });
        before - entries.len()
    }

    /// Число готовых записей, удовлетворяющих условию.
    pub(crate) fn count_ready(&self, counted: impl Fn(&T) -> bool) -> usize {
        self.entries()
            .values()
            .filter(|entry| matches!(entry, CacheEntry::Ready { value, .. } if counted(value)))
            .count()
    }

    /// Все записи, включая генерируемые.
    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_lookup_claims_and_second_sees_generating() {
        let cache: PageCache<u32> = PageCache::new(Duration::from_secs(60));

        assert!(matches!(cache.lookup("a"), Lookup::Claimed));
        assert!(matches!(cache.lookup("a"), Lookup::Generating));
        assert_eq!(cache.count_ready(|_| true), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn fresh_entry_is_served_without_revalidation() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.store("a", 1);

        match cache.lookup("a") {
            Lookup::Cached { value, revalidate } => {
                assert_eq!(*value, 1);
                assert!(!revalidate);
            }
            other => panic!("expected cached entry, got {other:?}"),
        }
    }

    #[test]
    fn stale_entry_asks_for_revalidation_once() {
        let cache = PageCache::new(Duration::ZERO);
        cache.store("a", 1);

        assert!(matches!(
            cache.lookup("a"),
            Lookup::Cached {
                revalidate: true,
                ..
            }
        ));
        assert!(matches!(
            cache.lookup("a"),
            Lookup::Cached {
                revalidate: false,
                ..
            }
        ));

        cache.abandon("a");
        assert!(matches!(
            cache.lookup("a"),
            Lookup::Cached {
                revalidate: true,
                ..
            }
        ));
    }

    #[test]
    fn abandon_removes_claimed_entry() {
        let cache: PageCache<u32> = PageCache::new(Duration::from_secs(60));
        assert!(matches!(cache.lookup("a"), Lookup::Claimed));

        cache.abandon("a");

        assert!(matches!(cache.lookup("a"), Lookup::Claimed));
    }

    #[test]
    fn store_replaces_stale_value() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.store("a", 1);
        cache.store("a", 2);

        match cache.lookup("a") {
            Lookup::Cached { value, .. } => assert_eq!(*value, 2),
            other => panic!("expected cached entry, got {other:?}"),
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn full_cache_refuses_new_keys_but_serves_existing() {
        let cache = PageCache::with_capacity(Duration::from_secs(60), 2);
        cache.store("a", 1);
        assert!(matches!(cache.lookup("b"), Lookup::Claimed));

        assert!(matches!(cache.lookup("c"), Lookup::Full));
        assert!(matches!(cache.lookup("a"), Lookup::Cached { .. }));
        assert!(matches!(cache.lookup("b"), Lookup::Generating));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evict_stale_removes_only_matching_expired_entries() {
        let cache = PageCache::new(Duration::ZERO);
        cache.store("missing", None);
        cache.store("post", Some(1));
        assert!(matches!(cache.lookup("generating"), Lookup::Claimed));

        let evicted = cache.evict_stale(Option::is_none);

        assert_eq!(evicted, 1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.count_ready(Option::is_some), 1);
    }

    #[test]
    fn fresh_entries_survive_eviction() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.store("missing", None::<u32>);

        assert_eq!(cache.evict_stale(Option::is_none), 0);
        assert_eq!(cache.len(), 1);
    }
}
