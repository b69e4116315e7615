//! Author detail modal controller.
//!
//! A finite-state coordinator over the store, the relatedness engine, the
//! session cache, and the remote fetcher. All dependencies are injected at
//! construction, so multiple independent controllers can coexist and tests
//! run without shared process state.
//!
//! # State machine
//!
//! ```text
//! Closed --open(key)--> Opening(key) --resolved--> Open(key)
//!   Open: biography sub-state Cached | Loading | Loaded | Error
//!   Loading --fetch ok--> Loaded (cache put, then display)
//!   Loading --fetch err--> Error (manual link, no cache write, no retry)
//!   Open --close--> Closed
//!   Open(a) --open(b)--> Opening(b)   (supersedes; a's fetch is discarded)
//! ```
//!
//! The only asynchronous step is the biography fetch. Stale completions are
//! discarded by an epoch check rather than transport-level cancellation: the
//! epoch bumps on every `open` and `close`, and a fetch that finishes under
//! an old epoch writes nothing, neither to the cache nor to the display.

use crate::cache::BioCache;
use crate::fetch::{BIO_CHAR_BUDGET, BioFetcher, truncate_extract};
use crate::models::{BioState, DomainBadge, DomainKind, ModalState, OpenModal};
use crate::services::{RelatednessConfig, RelatednessEngine};
use crate::storage::AuthorStore;
use crate::{Error, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Coordinates the author detail modal for one presentation surface.
pub struct ModalController {
    store: Arc<AuthorStore>,
    cache: BioCache,
    fetcher: Arc<dyn BioFetcher>,
    engine: RelatednessEngine,
    state: Mutex<ControllerState>,
    watch_tx: watch::Sender<ModalState>,
}

/// Mutable controller state behind the lock.
struct ControllerState {
    modal: ModalState,
    /// Bumped on every open and close; a biography fetch completing under
    /// an older epoch is stale and discarded.
    epoch: u64,
    /// Epoch of the outstanding fetch, if one is in flight. Prevents a
    /// duplicate fetch for the same key within one epoch.
    fetch_in_flight: Option<u64>,
}

impl ModalController {
    /// Creates a controller with its dependencies injected.
    #[must_use]
    pub fn new(store: Arc<AuthorStore>, cache: BioCache, fetcher: Arc<dyn BioFetcher>) -> Self {
        let engine = RelatednessEngine::new(Arc::clone(&store));
        let (watch_tx, _) = watch::channel(ModalState::Closed);
        Self {
            store,
            cache,
            fetcher,
            engine,
            state: Mutex::new(ControllerState {
                modal: ModalState::Closed,
                epoch: 0,
                fetch_in_flight: None,
            }),
            watch_tx,
        }
    }

    /// Sets the relatedness scoring weights.
    #[must_use]
    pub fn with_relatedness_config(mut self, config: RelatednessConfig) -> Self {
        self.engine = self.engine.with_config(config);
        self
    }

    /// Subscribes to state changes.
    ///
    /// The receiver observes every transition the controller publishes,
    /// starting from the current state. Presentation layers render from
    /// these snapshots instead of reaching into the core.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ModalState> {
        self.watch_tx.subscribe()
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ModalState {
        self.lock().modal.clone()
    }

    /// Opens the modal for an author.
    ///
    /// Resolves header, works, domains, and related data synchronously. The
    /// biography sub-state starts at `Cached` on a session-cache hit,
    /// otherwise `Loading` (drive it with [`Self::load_biography`]). An
    /// author without a category record degrades to empty works, domains,
    /// and related lists.
    ///
    /// Re-entrant opens supersede cleanly: any outstanding biography fetch
    /// for the previous author is discarded at completion time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthorNotFound`] if the store never loaded the key;
    /// the controller state is unchanged.
    pub fn open(&self, key: &str) -> Result<OpenModal> {
        let Some(author) = self.store.get(key) else {
            tracing::warn!(key, "author not found");
            return Err(Error::AuthorNotFound(key.to_string()));
        };

        let mut guard = self.lock();
        guard.epoch += 1;
        guard.modal = ModalState::Opening(key.to_string());
        self.publish(&guard);

        let category = self.store.category(key);
        let (works, domains) = category.as_ref().map_or_else(
            || (Vec::new(), Vec::new()),
            |c| {
                let mut domains = Vec::with_capacity(1 + c.bridges.len());
                domains.push(DomainBadge {
                    name: c.primary.clone(),
                    kind: DomainKind::Primary,
                });
                domains.extend(c.bridges.iter().map(|b| DomainBadge {
                    name: b.clone(),
                    kind: DomainKind::Bridge,
                }));
                (c.works.clone(), domains)
            },
        );
        let related = self.engine.rank(key);

        let biography = self
            .cache
            .get(&author.wikipedia_page_id)
            .map_or(BioState::Loading, BioState::Cached);

        let modal = OpenModal {
            key: key.to_string(),
            author,
            works,
            domains,
            related,
            biography,
        };
        tracing::debug!(
            key,
            related = modal.related.len(),
            cached_bio = !matches!(modal.biography, BioState::Loading),
            "modal opened"
        );
        guard.modal = ModalState::Open(modal.clone());
        self.publish(&guard);
        Ok(modal)
    }

    /// Closes the modal.
    ///
    /// Any in-flight biography fetch becomes stale and its result is
    /// discarded when it completes.
    pub fn close(&self) {
        let mut guard = self.lock();
        if guard.modal.is_closed() {
            return;
        }
        guard.epoch += 1;
        guard.modal = ModalState::Closed;
        self.publish(&guard);
    }

    /// Drives an outstanding `Loading` biography sub-state to completion.
    ///
    /// No-op unless the modal is open with the biography still `Loading`,
    /// and at most one fetch is outstanding per open: a concurrent call
    /// while one is in flight returns without issuing a duplicate request.
    /// On success the truncated text is cached, then displayed; on failure
    /// the sub-state becomes `Error` with the author's external link and
    /// nothing is cached. A single attempt, no automatic retry.
    pub async fn load_biography(&self) {
        let (epoch, page_id, wikipedia_url) = {
            let mut guard = self.lock();
            let ModalState::Open(modal) = &guard.modal else {
                return;
            };
            if modal.biography != BioState::Loading {
                return;
            }
            if guard.fetch_in_flight == Some(guard.epoch) {
                tracing::debug!("biography fetch already outstanding");
                return;
            }
            let snapshot = (
                guard.epoch,
                modal.author.wikipedia_page_id.clone(),
                modal.author.wikipedia_url.clone(),
            );
            guard.fetch_in_flight = Some(guard.epoch);
            snapshot
        };

        // Suspension point: the lock is never held across the fetch.
        let result = self.fetcher.fetch(&page_id).await;

        let mut guard = self.lock();
        if guard.fetch_in_flight == Some(epoch) {
            guard.fetch_in_flight = None;
        }
        if guard.epoch != epoch {
            tracing::debug!(page_id, "discarding stale biography result");
            return;
        }
        let ModalState::Open(modal) = &mut guard.modal else {
            return;
        };
        match result {
            Ok(extract) => {
                let text = truncate_extract(&extract, BIO_CHAR_BUDGET);
                self.cache.put(&page_id, &text);
                modal.biography = BioState::Loaded(text);
            },
            Err(e) => {
                tracing::warn!(page_id, error = %e, "biography unavailable, offering manual link");
                modal.biography = BioState::Error { wikipedia_url };
            },
        }
        self.publish(&guard);
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, guard: &MutexGuard<'_, ControllerState>) {
        self.watch_tx.send_replace(guard.modal.clone());
    }
}

impl std::fmt::Debug for ModalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalController")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const AUTHORS: &str = r#"{
        "euler": {
            "full_name": "Leonhard Euler",
            "wikipedia_url": "https://en.wikipedia.org/wiki/Leonhard_Euler",
            "wikipedia_page_id": "Leonhard_Euler"
        },
        "gauss": {
            "full_name": "Carl Friedrich Gauss",
            "wikipedia_url": "https://en.wikipedia.org/wiki/Carl_Friedrich_Gauss",
            "wikipedia_page_id": "Carl_Friedrich_Gauss"
        },
        "uncategorized": {
            "full_name": "Unknown Author",
            "wikipedia_url": "https://en.wikipedia.org/wiki/Unknown",
            "wikipedia_page_id": "Unknown"
        }
    }"#;

    const CATEGORIES: &str = r#"{
        "euler": {"primary_problem": "number theory", "bridges": ["analysis"], "works": ["Introductio"]},
        "gauss": {"primary_problem": "number theory", "bridges": ["geometry"]}
    }"#;

    struct StaticFetcher {
        extract: crate::Result<String>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn ok(extract: &str) -> Self {
            Self {
                extract: Ok(extract.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                extract: Err(crate::Error::Fetch {
                    page_id: "Leonhard_Euler".to_string(),
                    cause: "status 503".to_string(),
                }),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BioFetcher for StaticFetcher {
        async fn fetch(&self, page_id: &str) -> crate::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.extract {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(crate::Error::Fetch {
                    page_id: page_id.to_string(),
                    cause: "status 503".to_string(),
                }),
            }
        }
    }

    fn controller(fetcher: Arc<StaticFetcher>) -> ModalController {
        let store = Arc::new(AuthorStore::from_json(AUTHORS, CATEGORIES).unwrap());
        ModalController::new(store, BioCache::in_memory(), fetcher)
    }

    #[test]
    fn test_open_resolves_synchronous_data() {
        let modal = controller(Arc::new(StaticFetcher::ok("")))
            .open("euler")
            .unwrap();
        assert_eq!(modal.author.full_name, "Leonhard Euler");
        assert_eq!(modal.works, vec!["Introductio".to_string()]);
        assert_eq!(modal.domains.len(), 2);
        assert_eq!(modal.domains[0].kind, DomainKind::Primary);
        assert_eq!(modal.domains[0].name, "number theory");
        assert_eq!(modal.related[0].key.as_str(), "gauss");
        assert_eq!(modal.biography, BioState::Loading);
    }

    #[test]
    fn test_open_unknown_key_reports_and_leaves_state_closed() {
        let ctl = controller(Arc::new(StaticFetcher::ok("")));
        let err = ctl.open("unknown_key").unwrap_err();
        assert!(matches!(err, Error::AuthorNotFound(_)));
        assert!(ctl.state().is_closed());
    }

    #[test]
    fn test_open_without_category_degrades_to_empty() {
        let modal = controller(Arc::new(StaticFetcher::ok("")))
            .open("uncategorized")
            .unwrap();
        assert!(modal.works.is_empty());
        assert!(modal.domains.is_empty());
        assert!(modal.related.is_empty());
        assert_eq!(modal.biography, BioState::Loading);
    }

    #[tokio::test]
    async fn test_fetch_success_caches_and_displays() {
        let fetcher = Arc::new(StaticFetcher::ok("Euler was a Swiss mathematician."));
        let ctl = controller(Arc::clone(&fetcher));
        ctl.open("euler").unwrap();
        ctl.load_biography().await;

        let state = ctl.state();
        let modal = state.as_open().unwrap();
        assert_eq!(
            modal.biography,
            BioState::Loaded("Euler was a Swiss mathematician.".to_string())
        );
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_warm_cache_skips_second_fetch() {
        let fetcher = Arc::new(StaticFetcher::ok("Euler was a Swiss mathematician."));
        let ctl = controller(Arc::clone(&fetcher));
        ctl.open("euler").unwrap();
        ctl.load_biography().await;
        ctl.close();

        let modal = ctl.open("euler").unwrap();
        assert_eq!(
            modal.biography,
            BioState::Cached("Euler was a Swiss mathematician.".to_string())
        );
        ctl.load_biography().await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_error_with_link_and_caches_nothing() {
        let fetcher = Arc::new(StaticFetcher::failing());
        let cache = BioCache::in_memory();
        let store = Arc::new(AuthorStore::from_json(AUTHORS, CATEGORIES).unwrap());
        let ctl = ModalController::new(store, cache.clone(), fetcher);
        ctl.open("euler").unwrap();
        ctl.load_biography().await;

        let state = ctl.state();
        assert_eq!(
            state.as_open().unwrap().biography,
            BioState::Error {
                wikipedia_url: "https://en.wikipedia.org/wiki/Leonhard_Euler".to_string()
            }
        );
        assert!(cache.get("Leonhard_Euler").is_none());

        // no auto-retry: driving again refetches nothing (sub-state is Error)
        ctl.load_biography().await;
        let state = ctl.state();
        assert!(matches!(
            state.as_open().unwrap().biography,
            BioState::Error { .. }
        ));
    }

    #[tokio::test]
    async fn test_load_biography_is_noop_when_closed() {
        let fetcher = Arc::new(StaticFetcher::ok("text"));
        let ctl = controller(Arc::clone(&fetcher));
        ctl.load_biography().await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert!(ctl.state().is_closed());
    }

    #[test]
    fn test_close_is_idempotent() {
        let ctl = controller(Arc::new(StaticFetcher::ok("")));
        ctl.close();
        assert!(ctl.state().is_closed());
        ctl.open("euler").unwrap();
        ctl.close();
        ctl.close();
        assert!(ctl.state().is_closed());
    }
}
