//! Pagination Component
//!
//! Previous/Next plus numbered page buttons, bounds taken from the fetched
//! Page itself.

use leptos::prelude::*;

use crate::controller::ListController;

/// Page numbers to render for a pager over `total_pages` pages. Always at
/// least one button, even before the first load.
pub fn page_numbers(total_pages: u32) -> Vec<u32> {
    (1..=total_pages.max(1)).collect()
}

#[component]
pub fn Pagination(controller: ListController) -> impl IntoView {
    let items = controller.items;
    let current = move || items.get().map(|page| page.current_page).unwrap_or(1);
    let total_pages = move || items.get().map(|page| page.total_pages).unwrap_or(1);
    let total_items = move || items.get().map(|page| page.count).unwrap_or(0);

    view! {
        <div class="pagination">
            <button
                class="btn btn-pagination"
                disabled=move || current() <= 1
                on:click=move |_| {
                    let page = current();
                    if page > 1 {
                        controller.set_page(page - 1);
                    }
                }
            >
                "Previous"
            </button>

            <div class="pagination-pages">
                <For
                    each=move || page_numbers(total_pages())
                    key=|page| *page
                    children=move |page| {
                        let active = move || current() == page;
                        view! {
                            <button
                                class=move || if active() { "btn btn-page active" } else { "btn btn-page" }
                                on:click=move |_| controller.set_page(page)
                            >
                                {page}
                            </button>
                        }
                    }
                />
            </div>

            <button
                class="btn btn-pagination"
                disabled=move || current() >= total_pages()
                on:click=move |_| {
                    let page = current();
                    if page < total_pages() {
                        controller.set_page(page + 1);
                    }
                }
            >
                "Next"
            </button>

            <div class="pagination-info">
                {move || format!("Page {} of {} ({} total items)", current(), total_pages(), total_items())}
            </div>
        </div>
    }
}
