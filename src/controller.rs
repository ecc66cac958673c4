//! List State Controller
//!
//! Owns the page/error/loading signals and the handlers the view calls.
//! Built once in `App` and passed down as an explicit prop — no context
//! channel. Every failed operation, reads included, lands in `error`; only
//! `clear_error` (the banner's dismiss button) clears it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::{ItemDraft, Page};
use crate::query::QueryCache;

/// Boolean signal that stays true while any of several overlapping
/// operations is still pending.
#[derive(Clone, Copy)]
pub struct Busy {
    pending: RwSignal<u32>,
    active: RwSignal<bool>,
}

impl Busy {
    fn new() -> Self {
        Self {
            pending: RwSignal::new(0),
            active: RwSignal::new(false),
        }
    }

    pub fn get(&self) -> bool {
        self.active.get()
    }

    fn begin(&self) {
        self.pending.update(|n| *n += 1);
        self.active.set(true);
    }

    fn end(&self) {
        self.pending.update(|n| *n = n.saturating_sub(1));
        self.active.set(self.pending.get_untracked() > 0);
    }
}

#[derive(Clone, Copy)]
pub struct ListController {
    cache: StoredValue<QueryCache, LocalStorage>,
    /// Requested page, 1-indexed. Not clamped — the fetched Page's own
    /// bounds drive what the pagination buttons disable.
    pub page: RwSignal<u32>,
    /// Message for the dismissible error banner.
    pub error: RwSignal<Option<String>>,
    /// The last successfully fetched page, `None` until the first load.
    pub items: RwSignal<Option<Page>>,
    /// True while any page read is in flight.
    pub loading: Busy,
    /// True while any write is in flight.
    pub mutating: Busy,
    /// Bumped by cache invalidation so the load effect refetches.
    refresh: RwSignal<u32>,
}

impl ListController {
    pub fn new(cache: QueryCache) -> Self {
        let refresh = RwSignal::new(0u32);
        cache.set_on_invalidate(move || refresh.update(|v| *v += 1));
        Self {
            cache: StoredValue::new_local(cache),
            page: RwSignal::new(1),
            error: RwSignal::new(None),
            items: RwSignal::new(None),
            loading: Busy::new(),
            mutating: Busy::new(),
            refresh,
        }
    }

    /// Wire the load effect: refetch whenever the page changes or a write
    /// invalidates the cache. Called once from `App`.
    pub fn start(&self) {
        let this = *self;
        Effect::new(move |_| {
            let page = this.page.get();
            let refresh = this.refresh.get();
            web_sys::console::log_1(&format!("[APP] Loading page {} (refresh {})", page, refresh).into());
            spawn_local(async move {
                this.loading.begin();
                match this.cache.get_value().query(page).await {
                    Ok(fetched) => {
                        // A late response for a page we've since navigated
                        // away from stays in the cache but doesn't clobber
                        // the view.
                        if this.page.get_untracked() == page {
                            this.items.set(Some(fetched));
                        }
                    }
                    Err(err) => this.error.set(Some(err.to_string())),
                }
                this.loading.end();
            });
        });
    }

    pub fn set_page(&self, page: u32) {
        self.page.set(page);
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    pub fn add(&self, draft: ItemDraft) {
        let this = *self;
        spawn_local(async move {
            this.mutating.begin();
            if let Err(err) = this.cache.get_value().create(draft).await {
                this.error.set(Some(err.to_string()));
            }
            this.mutating.end();
        });
    }

    pub fn update(&self, id: String, draft: ItemDraft) {
        let this = *self;
        spawn_local(async move {
            this.mutating.begin();
            if let Err(err) = this.cache.get_value().replace(id, draft).await {
                this.error.set(Some(err.to_string()));
            }
            this.mutating.end();
        });
    }

    pub fn delete(&self, id: String) {
        let this = *self;
        spawn_local(async move {
            this.mutating.begin();
            if let Err(err) = this.cache.get_value().remove(id).await {
                this.error.set(Some(err.to_string()));
            }
            this.mutating.end();
        });
    }

    pub fn toggle_purchased(&self, id: String, purchased: bool) {
        let this = *self;
        spawn_local(async move {
            this.mutating.begin();
            if let Err(err) = this.cache.get_value().patch_purchased(id, purchased).await {
                this.error.set(Some(err.to_string()));
            }
            this.mutating.end();
        });
    }
}
