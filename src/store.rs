use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::models::{Article, Category, Feed};

/// Subscribable single-value container. Readers observe the latest value
/// through `get` or a `watch` subscription; only the owning service module
/// is supposed to write.
#[derive(Debug, Clone)]
pub struct Store<T> {
    tx: watch::Sender<T>,
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Store<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate the current value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Subscribe to changes. The receiver sees the current value immediately
    /// and every subsequent `set`/`update`; dropping it unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Store<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

/// Monotonic token source used to let the newest list request win: a load
/// takes a token before the network call and only writes its result while
/// that token is still the latest.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

/// Named loading flags, one per UI-visible operation kind.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlags {
    pub feeds: Store<bool>,
    pub articles: Store<bool>,
    pub categories: Store<bool>,
    pub adding: Store<bool>,
    pub deleting: Store<bool>,
}

/// Named user-facing error slots, one per resource plus a general one.
#[derive(Debug, Clone, Default)]
pub struct ErrorSlots {
    pub feeds: Store<Option<String>>,
    pub articles: Store<Option<String>>,
    pub categories: Store<Option<String>>,
    pub general: Store<Option<String>>,
}

impl ErrorSlots {
    pub fn clear_all(&self) {
        self.feeds.set(None);
        self.articles.set(None);
        self.categories.set(None);
        self.general.set(None);
    }
}

/// All client-side state: the latest known server collections plus the
/// loading/error bookkeeping the UI renders. Replaced wholesale on list
/// reloads, patched element-wise on delete/update; lost on restart.
#[derive(Debug, Default)]
pub struct AppState {
    pub feeds: Store<Vec<Feed>>,
    pub articles: Store<Vec<Article>>,
    pub categories: Store<Vec<Category>>,
    pub loading: LoadingFlags,
    pub errors: ErrorSlots,
    pub(crate) feeds_gen: Generation,
    pub(crate) articles_gen: Generation,
    pub(crate) categories_gen: Generation,
}

pub fn shared_state() -> Arc<AppState> {
    Arc::new(AppState::default())
}
