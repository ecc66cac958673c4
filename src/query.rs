//! Query/Mutation Cache
//!
//! Read cache keyed by page number, with in-flight request deduplication and
//! whole-collection invalidation on every successful write. Single-threaded
//! (`Rc`/`RefCell`) — the cache is only ever replaced per key, never patched
//! in place. No Leptos dependency here so the layer tests natively.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::api::{ApiError, GroceryApi};
use crate::models::{GroceryItem, ItemDraft, Page};

type PageFuture = Shared<LocalBoxFuture<'static, Result<Page, ApiError>>>;

/// Caching wrapper around a `GroceryApi`.
///
/// Reads hit the cache first; concurrent misses for the same page share a
/// single in-flight transport call. Every successful write clears the whole
/// cache (creates and deletes shift item counts across all pages) and fires
/// the invalidation listener so the controller refetches.
#[derive(Clone)]
pub struct QueryCache {
    api: Rc<dyn GroceryApi>,
    pages: Rc<RefCell<HashMap<u32, Page>>>,
    in_flight: Rc<RefCell<HashMap<u32, PageFuture>>>,
    /// Bumped on every invalidation; a fetch only caches its result if the
    /// generation it started under is still current.
    generation: Rc<Cell<u64>>,
    on_invalidate: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl QueryCache {
    pub fn new(api: impl GroceryApi + 'static) -> Self {
        Self {
            api: Rc::new(api),
            pages: Rc::new(RefCell::new(HashMap::new())),
            in_flight: Rc::new(RefCell::new(HashMap::new())),
            generation: Rc::new(Cell::new(0)),
            on_invalidate: Rc::new(RefCell::new(None)),
        }
    }

    /// Register the listener fired after every invalidation.
    pub fn set_on_invalidate(&self, listener: impl Fn() + 'static) {
        *self.on_invalidate.borrow_mut() = Some(Rc::new(listener));
    }

    /// Fetch one page, serving from the cache when fresh.
    pub async fn query(&self, page: u32) -> Result<Page, ApiError> {
        if let Some(hit) = self.pages.borrow().get(&page).cloned() {
            return Ok(hit);
        }
        self.fetch(page).await
    }

    /// The shared in-flight fetch for `page`, creating it on first request.
    /// Failed reads are not cached; the in-flight entry is removed on settle.
    /// A fetch that started before an invalidation settles without caching —
    /// its result is pre-write data and must not shadow the refetch.
    fn fetch(&self, page: u32) -> PageFuture {
        if let Some(pending) = self.in_flight.borrow().get(&page) {
            return pending.clone();
        }
        let api = Rc::clone(&self.api);
        let pages = Rc::clone(&self.pages);
        let in_flight = Rc::clone(&self.in_flight);
        let generation = Rc::clone(&self.generation);
        let started = generation.get();
        let fut = async move {
            let result = api.list(page).await;
            if generation.get() == started {
                in_flight.borrow_mut().remove(&page);
                if let Ok(fetched) = &result {
                    pages.borrow_mut().insert(page, fetched.clone());
                }
            }
            result
        }
        .boxed_local()
        .shared();
        self.in_flight.borrow_mut().insert(page, fut.clone());
        fut
    }

    pub async fn create(&self, draft: ItemDraft) -> Result<GroceryItem, ApiError> {
        let created = self.api.create(draft).await?;
        self.invalidate_all();
        Ok(created)
    }

    pub async fn replace(&self, id: String, draft: ItemDraft) -> Result<GroceryItem, ApiError> {
        let updated = self.api.replace(id, draft).await?;
        self.invalidate_all();
        Ok(updated)
    }

    pub async fn patch_purchased(&self, id: String, purchased: bool) -> Result<GroceryItem, ApiError> {
        let patched = self.api.patch_purchased(id, purchased).await?;
        self.invalidate_all();
        Ok(patched)
    }

    pub async fn remove(&self, id: String) -> Result<(), ApiError> {
        self.api.remove(id).await?;
        self.invalidate_all();
        Ok(())
    }

    /// Drop every cached page, detach any in-flight reads (they started
    /// before the write and may carry pre-write data), and notify the
    /// listener. The next `query` for any page goes back to the transport.
    pub fn invalidate_all(&self) {
        self.pages.borrow_mut().clear();
        self.in_flight.borrow_mut().clear();
        self.generation.set(self.generation.get() + 1);
        let listener = self.on_invalidate.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;
    use futures::executor::block_on;
    use futures::join;
    use std::cell::Cell;
    use std::task::Poll;

    fn item(id: &str, name: &str) -> GroceryItem {
        GroceryItem {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            quantity: 1.0,
            unit: Unit::Pieces,
            purchased: false,
        }
    }

    fn page_of(current_page: u32, results: Vec<GroceryItem>) -> Page {
        Page {
            count: results.len() as u32,
            current_page,
            total_pages: 3,
            next: String::new(),
            previous: String::new(),
            results,
        }
    }

    /// Recording fake backend. `yield_in_list` parks each list call once so
    /// concurrent readers genuinely overlap.
    #[derive(Clone, Default)]
    struct FakeApi {
        calls: Rc<RefCell<Vec<String>>>,
        pages: Rc<RefCell<HashMap<u32, Page>>>,
        yield_in_list: bool,
        fail_list: bool,
        fail_create: bool,
    }

    impl FakeApi {
        fn with_page(self, page: u32, value: Page) -> Self {
            self.pages.borrow_mut().insert(page, value);
            self
        }

        fn list_calls(&self) -> usize {
            self.calls.borrow().iter().filter(|c| c.starts_with("list")).count()
        }
    }

    async fn yield_once() {
        let yielded = Cell::new(false);
        futures::future::poll_fn(|cx| {
            if yielded.get() {
                Poll::Ready(())
            } else {
                yielded.set(true);
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await;
    }

    impl GroceryApi for FakeApi {
        fn list(&self, page: u32) -> LocalBoxFuture<'_, Result<Page, ApiError>> {
            self.calls.borrow_mut().push(format!("list {}", page));
            let should_yield = self.yield_in_list;
            let fail = self.fail_list;
            let stored = self.pages.borrow().get(&page).cloned();
            async move {
                if should_yield {
                    yield_once().await;
                }
                if fail {
                    return Err(ApiError::FetchFailed);
                }
                Ok(stored.unwrap_or_else(|| page_of(page, vec![item("x", "Filler")])))
            }
            .boxed_local()
        }

        fn create(&self, draft: ItemDraft) -> LocalBoxFuture<'_, Result<GroceryItem, ApiError>> {
            self.calls
                .borrow_mut()
                .push(format!("create {}", serde_json::to_string(&draft).unwrap()));
            let fail = self.fail_create;
            async move {
                if fail {
                    return Err(ApiError::CreateFailed("name already exists".to_string()));
                }
                Ok(GroceryItem {
                    id: "srv-1".to_string(),
                    name: draft.name,
                    description: draft.description,
                    quantity: draft.quantity,
                    unit: draft.unit,
                    purchased: false,
                })
            }
            .boxed_local()
        }

        fn replace(&self, id: String, draft: ItemDraft) -> LocalBoxFuture<'_, Result<GroceryItem, ApiError>> {
            self.calls.borrow_mut().push(format!("replace {}", id));
            async move {
                Ok(GroceryItem {
                    id,
                    name: draft.name,
                    description: draft.description,
                    quantity: draft.quantity,
                    unit: draft.unit,
                    purchased: false,
                })
            }
            .boxed_local()
        }

        fn patch_purchased(&self, id: String, purchased: bool) -> LocalBoxFuture<'_, Result<GroceryItem, ApiError>> {
            self.calls.borrow_mut().push(format!("patch {} {}", id, purchased));
            for page in self.pages.borrow_mut().values_mut() {
                for entry in &mut page.results {
                    if entry.id == id {
                        entry.purchased = purchased;
                    }
                }
            }
            let patched = self
                .pages
                .borrow()
                .values()
                .flat_map(|p| p.results.iter())
                .find(|entry| entry.id == id)
                .cloned();
            async move { patched.ok_or(ApiError::PatchFailed) }.boxed_local()
        }

        fn remove(&self, id: String) -> LocalBoxFuture<'_, Result<(), ApiError>> {
            self.calls.borrow_mut().push(format!("remove {}", id));
            for page in self.pages.borrow_mut().values_mut() {
                page.results.retain(|entry| entry.id != id);
            }
            async move { Ok(()) }.boxed_local()
        }
    }

    #[test]
    fn query_returns_page_matching_requested_number() {
        let cache = QueryCache::new(FakeApi::default());
        block_on(async {
            for p in 1..=3 {
                let page = cache.query(p).await.unwrap();
                assert_eq!(page.current_page, p);
            }
        });
    }

    #[test]
    fn cached_page_is_served_without_a_second_transport_call() {
        let api = FakeApi::default();
        let cache = QueryCache::new(api.clone());
        block_on(async {
            cache.query(1).await.unwrap();
            cache.query(1).await.unwrap();
        });
        assert_eq!(api.list_calls(), 1);
    }

    #[test]
    fn concurrent_queries_share_one_list_call() {
        let api = FakeApi {
            yield_in_list: true,
            ..FakeApi::default()
        };
        let cache = QueryCache::new(api.clone());
        block_on(async {
            let (a, b) = join!(cache.query(2), cache.query(2));
            assert_eq!(a.unwrap().current_page, 2);
            assert_eq!(b.unwrap().current_page, 2);
        });
        assert_eq!(api.list_calls(), 1);
    }

    #[test]
    fn write_invalidates_every_cached_page() {
        let api = FakeApi::default();
        let cache = QueryCache::new(api.clone());
        let invalidations = Rc::new(Cell::new(0));
        let seen = Rc::clone(&invalidations);
        cache.set_on_invalidate(move || seen.set(seen.get() + 1));

        block_on(async {
            cache.query(1).await.unwrap();
            cache.query(2).await.unwrap();
            cache.create(ItemDraft::default()).await.unwrap();
            cache.query(1).await.unwrap();
            cache.query(2).await.unwrap();
        });

        // Both pages refetched after the create, not just the current one.
        assert_eq!(api.list_calls(), 4);
        assert_eq!(invalidations.get(), 1);
    }

    #[test]
    fn post_write_query_does_not_join_a_pre_write_fetch() {
        let api = FakeApi {
            yield_in_list: true,
            ..FakeApi::default()
        }
        .with_page(1, page_of(1, vec![item("a", "Milk")]));
        let cache = QueryCache::new(api.clone());

        block_on(async {
            // A read starts, then a delete lands while it is still in
            // flight, then a fresh read follows the delete.
            let stale_read = cache.query(1);
            let write_then_read = async {
                cache.remove("a".to_string()).await.unwrap();
                cache.query(1).await.unwrap()
            };
            let (_, fresh) = join!(stale_read, write_then_read);
            assert!(fresh.results.iter().all(|entry| entry.id != "a"));

            // The pre-write fetch settled after the invalidation; it must
            // not have cached the deleted item over the refetched page.
            let cached = cache.query(1).await.unwrap();
            assert!(cached.results.iter().all(|entry| entry.id != "a"));
        });
        // The post-write read hit the transport instead of joining the
        // pre-write fetch.
        assert_eq!(api.list_calls(), 2);
    }

    #[test]
    fn failed_mutation_leaves_cache_intact() {
        let api = FakeApi {
            fail_create: true,
            ..FakeApi::default()
        }
        .with_page(1, page_of(1, vec![item("a", "Milk")]));
        let cache = QueryCache::new(api.clone());

        block_on(async {
            cache.query(1).await.unwrap();
            let err = cache
                .create(ItemDraft {
                    name: "Milk".to_string(),
                    ..ItemDraft::default()
                })
                .await;
            assert_eq!(err, Err(ApiError::CreateFailed("name already exists".to_string())));
            // The cached page survives the failed write.
            cache.query(1).await.unwrap();
        });
        assert_eq!(api.list_calls(), 1);
    }

    #[test]
    fn failed_read_is_not_cached() {
        let api = FakeApi {
            fail_list: true,
            ..FakeApi::default()
        };
        let cache = QueryCache::new(api.clone());
        block_on(async {
            assert_eq!(cache.query(1).await, Err(ApiError::FetchFailed));
            assert_eq!(cache.query(1).await, Err(ApiError::FetchFailed));
        });
        // Each attempt went back to the transport.
        assert_eq!(api.list_calls(), 2);
    }

    #[test]
    fn create_sends_draft_and_returns_unpurchased_item() {
        let api = FakeApi::default();
        let cache = QueryCache::new(api.clone());
        let draft = ItemDraft {
            name: "Eggs".to_string(),
            description: Some("Free range".to_string()),
            quantity: 12.0,
            unit: Unit::Packs,
        };
        let created = block_on(cache.create(draft)).unwrap();
        assert!(!created.id.is_empty());
        assert!(!created.purchased);
        let calls = api.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("\"name\":\"Eggs\""));
        assert!(calls[0].contains("\"unit\":\"Packs\""));
    }

    #[test]
    fn remove_then_query_refetches_without_the_item() {
        let api = FakeApi::default().with_page(
            1,
            page_of(1, vec![item("a", "Milk"), item("b", "Bread")]),
        );
        let cache = QueryCache::new(api.clone());
        block_on(async {
            let before = cache.query(1).await.unwrap();
            assert!(before.results.iter().any(|entry| entry.id == "a"));

            cache.remove("a".to_string()).await.unwrap();

            let after = cache.query(1).await.unwrap();
            assert!(after.results.iter().all(|entry| entry.id != "a"));
        });
        assert_eq!(api.list_calls(), 2);
    }

    #[test]
    fn toggle_patches_and_next_fetch_reflects_purchased() {
        let api = FakeApi::default().with_page(1, page_of(1, vec![item("a", "Milk")]));
        let cache = QueryCache::new(api.clone());
        block_on(async {
            cache.query(1).await.unwrap();
            let patched = cache.patch_purchased("a".to_string(), true).await.unwrap();
            assert!(patched.purchased);

            let after = cache.query(1).await.unwrap();
            assert!(after.results[0].purchased);
        });
        assert!(api.calls.borrow().contains(&"patch a true".to_string()));
        assert_eq!(api.list_calls(), 2);
    }
}
