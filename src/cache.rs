use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use lru::LruCache;
use tokio::{sync::watch, task::JoinHandle};

use crate::exception::Exception;
use crate::form::Form;
use crate::param::{DEFAULT_CACHE_SIZE, DEFAULT_SWEEP_INTERVAL_SECS};
use crate::token::redact;

/// 表单的存储后端。
///
/// 实现方需要自行处理过期：已过期的记录与不存在的记录一样返回 `FormNotFound`。
#[cfg_attr(test, mockall::automock)]
pub trait Cache {
    fn get(&self, token: &str) -> Result<Form, Exception>;

    /// 覆盖写入，不要求 `expires_at` 在未来
    fn set(&self, token: &str, form: Form, expires_at: DateTime<Utc>);

    /// 删除不存在的令牌不算错误
    fn remove(&self, token: &str);

    /// 取出并删除
    fn take(&self, token: &str) -> Result<Form, Exception> {
        let form = self.get(token)?;
        self.remove(token);
        Ok(form)
    }
}

struct CacheEntry {
    form: Form,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// 基于内存的表单缓存。
///
/// 内部是一把读写锁保护的无界 LRU 表，读操作使用 `peek`。
/// 有效表单只会被显式删除或在过期后回收，不会因容量而被淘汰。
/// `capacity` 是软上限：每当记录数达到它的整数倍时，写入前先回收过期表单。
pub struct MemoryCache {
    store: RwLock<LruCache<String, CacheEntry>>,
    capacity: usize,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::from_capacity(DEFAULT_CACHE_SIZE)
    }
}

impl MemoryCache {
    // 根据容量构造
    pub fn from_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            warn!("缓存容量被设置为0，改用默认容量{}", DEFAULT_CACHE_SIZE);
            DEFAULT_CACHE_SIZE
        } else {
            capacity
        };
        Self {
            store: RwLock::new(LruCache::unbounded()),
            capacity,
        }
    }

    // 锁中毒时数据依然完整：所有修改都是单步的 put/pop，清扫只删除过期记录
    fn read_store(&self) -> RwLockReadGuard<'_, LruCache<String, CacheEntry>> {
        self.store.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, LruCache<String, CacheEntry>> {
        self.store.write().unwrap_or_else(|e| e.into_inner())
    }

    /// 清除所有在 `now` 时刻已过期的表单，返回清除数量。
    ///
    /// 标记与删除在同一次写锁内完成。
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        Self::purge_locked(&mut self.write_store(), now)
    }

    fn purge_locked(store: &mut LruCache<String, CacheEntry>, now: DateTime<Utc>) -> usize {
        let marked: Vec<String> = store
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(token, _)| token.clone())
            .collect();
        for token in &marked {
            store.pop(token);
        }
        marked.len()
    }

    /// 当前持有的记录数，包括已过期但尚未回收的记录
    pub fn len(&self) -> usize {
        self.read_store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 软上限，超过后仍会继续写入
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Cache for MemoryCache {
    fn get(&self, token: &str) -> Result<Form, Exception> {
        let now = Utc::now();
        {
            let store = self.read_store();
            match store.peek(token) {
                None => {
                    debug!("缓存未命中：{}", redact(token));
                    return Err(Exception::FormNotFound);
                }
                Some(entry) if !entry.is_expired(now) => return Ok(entry.form.clone()),
                Some(_) => {}
            }
        }
        // 读锁释放后记录可能已被重新写入，需在写锁下再次确认
        let mut store = self.write_store();
        if store.peek(token).is_some_and(|entry| entry.is_expired(now)) {
            store.pop(token);
            debug!("缓存记录已过期并被移除：{}", redact(token));
        }
        Err(Exception::FormNotFound)
    }

    fn set(&self, token: &str, form: Form, expires_at: DateTime<Utc>) {
        let entry = CacheEntry { form, expires_at };
        let mut store = self.write_store();
        let held = store.len();
        // 只在达到上限的整数倍时清扫，摊还后每次写入仍是常数开销
        if held > 0 && held % self.capacity == 0 && !store.contains(token) {
            let purged = Self::purge_locked(&mut store, Utc::now());
            if purged > 0 {
                debug!("缓存达到容量上限，回收了{}个过期表单", purged);
            } else {
                warn!("缓存中有效表单数{}已达到容量上限{}，继续写入", held, self.capacity);
            }
        }
        store.put(token.to_string(), entry);
    }

    fn remove(&self, token: &str) {
        self.write_store().pop(token);
    }

    fn take(&self, token: &str) -> Result<Form, Exception> {
        let now = Utc::now();
        match self.write_store().pop(token) {
            Some(entry) if !entry.is_expired(now) => Ok(entry.form),
            _ => Err(Exception::FormNotFound),
        }
    }
}

/// 定期清扫过期表单的后台任务。
///
/// 只是回收内存的手段，`get` 的惰性过期检查才保证正确性。
/// 必须在 tokio 运行时内启动，并由宿主调用 [`Sweeper::stop`] 结束。
pub struct Sweeper {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Sweeper {
    pub fn start(cache: Arc<MemoryCache>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS)
        } else {
            interval
        };
        let (shutdown, mut signal) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // 第一次 tick 会立即完成
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let purged = cache.purge_expired(Utc::now());
                        if purged > 0 {
                            debug!("后台清扫移除了{}个过期表单", purged);
                        }
                    }
                    changed = signal.changed() => {
                        if changed.is_err() || *signal.borrow() {
                            debug!("后台清扫任务收到停止信号");
                            break;
                        }
                    }
                }
            }
        });
        Self { shutdown, task }
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!("后台清扫任务异常退出：{}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn later() -> DateTime<Utc> {
        Utc::now() + ChronoDuration::minutes(5)
    }

    fn earlier() -> DateTime<Utc> {
        Utc::now() - ChronoDuration::seconds(1)
    }

    #[test]
    fn test_cache_creation() {
        let cache = MemoryCache::from_capacity(10);
        assert_eq!(cache.capacity(), 10);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_zero_capacity_falls_back() {
        let cache = MemoryCache::from_capacity(0);
        assert_eq!(cache.capacity(), DEFAULT_CACHE_SIZE);
    }

    #[test]
    fn test_cache_set_and_get() {
        let cache = MemoryCache::from_capacity(3);
        let form = Form::new("test", "test");
        cache.set("foo", form.clone(), later());

        assert_eq!(cache.get("foo").unwrap(), form);
        // 读取不会消费记录
        assert!(cache.get("foo").is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_not_found() {
        let cache = MemoryCache::from_capacity(3);
        assert_eq!(cache.get("nonexistent"), Err(Exception::FormNotFound));
    }

    #[test]
    fn test_cache_expired_entry_is_removed_on_read() {
        let cache = MemoryCache::from_capacity(3);
        cache.set("old", Form::new("old", "/"), earlier());
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get("old"), Err(Exception::FormNotFound));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_cache_remove() {
        let cache = MemoryCache::from_capacity(3);
        cache.set("foo", Form::new("test", "test"), later());
        cache.remove("foo");
        assert_eq!(cache.get("foo"), Err(Exception::FormNotFound));
        // 重复删除不报错
        cache.remove("foo");
        cache.remove("never-set");
    }

    #[test]
    fn test_cache_update_existing() {
        let cache = MemoryCache::from_capacity(3);
        cache.set("foo", Form::new("old", "/"), earlier());
        cache.set("foo", Form::new("new", "/"), later());

        assert_eq!(cache.get("foo").unwrap().name, "new");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_take_consumes() {
        let cache = MemoryCache::from_capacity(3);
        cache.set("foo", Form::new("test", "/"), later());

        assert_eq!(cache.take("foo").unwrap().name, "test");
        assert_eq!(cache.take("foo"), Err(Exception::FormNotFound));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_take_expired() {
        let cache = MemoryCache::from_capacity(3);
        cache.set("foo", Form::new("test", "/"), earlier());
        assert_eq!(cache.take("foo"), Err(Exception::FormNotFound));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_live_entries_survive_capacity() {
        let cache = MemoryCache::from_capacity(2);
        cache.set("a", Form::new("a", "/"), later());
        cache.set("b", Form::new("b", "/"), later());
        cache.set("c", Form::new("c", "/"), later());
        cache.set("d", Form::new("d", "/"), later());
        cache.set("e", Form::new("e", "/"), later());

        assert_eq!(cache.len(), 5);
        for token in ["a", "b", "c", "d", "e"] {
            assert_eq!(cache.get(token).unwrap().name, token);
        }
    }

    #[test]
    fn test_cache_reclaims_expired_at_capacity() {
        let cache = MemoryCache::from_capacity(2);
        cache.set("gone", Form::new("gone", "/"), earlier());
        cache.set("kept", Form::new("kept", "/"), later());
        // 第三次写入时达到上限，先回收过期记录
        cache.set("new", Form::new("new", "/"), later());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("kept").is_ok());
        assert!(cache.get("new").is_ok());
    }

    #[test]
    fn test_cache_overwrite_at_capacity_keeps_expired() {
        let cache = MemoryCache::from_capacity(2);
        cache.set("gone", Form::new("gone", "/"), earlier());
        cache.set("kept", Form::new("kept", "/"), later());
        // 覆盖已有令牌不会触发清扫
        cache.set("kept", Form::new("again", "/"), later());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("kept").unwrap().name, "again");
    }

    #[test]
    fn test_purge_expired() {
        let cache = MemoryCache::from_capacity(5);
        cache.set("gone1", Form::new("x", "/"), earlier());
        cache.set("gone2", Form::new("x", "/"), earlier());
        cache.set("kept", Form::new("x", "/"), later());

        assert_eq!(cache.purge_expired(Utc::now()), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("kept").is_ok());
    }

    #[test]
    fn test_purge_uses_given_instant() {
        let cache = MemoryCache::from_capacity(5);
        let expires = Utc::now() + ChronoDuration::minutes(1);
        cache.set("foo", Form::new("x", "/"), expires);

        assert_eq!(cache.purge_expired(expires), 0);
        assert_eq!(cache.purge_expired(expires + ChronoDuration::seconds(1)), 1);
    }

    #[tokio::test]
    async fn test_sweeper_reclaims_and_stops() {
        let cache = Arc::new(MemoryCache::from_capacity(5));
        cache.set("gone", Form::new("x", "/"), earlier());
        cache.set("kept", Form::new("x", "/"), later());

        let sweeper = Sweeper::start(Arc::clone(&cache), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(cache.len(), 1);
        assert!(!sweeper.is_finished());
        sweeper.stop().await;
    }

    struct SingleSlot {
        slot: std::sync::Mutex<Option<Form>>,
    }

    impl Cache for SingleSlot {
        fn get(&self, _token: &str) -> Result<Form, Exception> {
            self.slot.lock().unwrap().clone().ok_or(Exception::FormNotFound)
        }

        fn set(&self, _token: &str, form: Form, _expires_at: DateTime<Utc>) {
            *self.slot.lock().unwrap() = Some(form);
        }

        fn remove(&self, _token: &str) {
            self.slot.lock().unwrap().take();
        }
    }

    #[test]
    fn test_default_take_gets_then_removes() {
        let cache = SingleSlot {
            slot: std::sync::Mutex::new(None),
        };
        cache.set("t", Form::new("slot", "/"), later());

        assert_eq!(cache.take("t").unwrap().name, "slot");
        assert_eq!(cache.get("t"), Err(Exception::FormNotFound));
    }
}
