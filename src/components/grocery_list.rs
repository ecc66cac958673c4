//! Grocery List Component
//!
//! Top-level list: error banner, add form, item rows, pagination.

use leptos::prelude::*;

use crate::components::{AddGroceryForm, GroceryItemRow, Pagination};
use crate::controller::ListController;

#[component]
pub fn GroceryList(controller: ListController) -> impl IntoView {
    let items = controller.items;
    let results = move || items.get().map(|page| page.results).unwrap_or_default();

    view! {
        <div class="grocery-list-container">
            <h1>"Grocery List"</h1>

            {move || controller.error.get().map(|message| view! {
                <div class="error-message">
                    <span class="error-text">{message}</span>
                    <button
                        class="error-close"
                        aria-label="Dismiss error"
                        on:click=move |_| controller.clear_error()
                    >
                        "×"
                    </button>
                </div>
            })}

            <AddGroceryForm controller=controller />

            {move || (controller.loading.get() && items.get().is_none()).then(|| view! {
                <div class="loading">"Loading grocery list..."</div>
            })}

            <div class="grocery-items">
                {move || (items.get().is_some() && results().is_empty()).then(|| view! {
                    <p class="empty-message">
                        "Your grocery list is empty. Add some items to get started!"
                    </p>
                })}
                <For
                    each=results
                    key=|item| {
                        // Key on every mutable field so a changed item re-renders.
                        (
                            item.id.clone(),
                            item.name.clone(),
                            item.description.clone(),
                            item.quantity.to_bits(),
                            item.unit,
                            item.purchased,
                        )
                    }
                    children=move |item| view! { <GroceryItemRow item=item controller=controller /> }
                />
            </div>

            <Pagination controller=controller />
        </div>
    }
}
