//! Grocery Item Row Component
//!
//! One item, either viewing or editing in place. The edit buffer belongs to
//! the row and is discarded on cancel, never merged.

use leptos::prelude::*;

use crate::controller::ListController;
use crate::models::{GroceryItem, ItemDraft, Unit};

#[component]
pub fn GroceryItemRow(item: GroceryItem, controller: ListController) -> impl IntoView {
    let seed = ItemDraft::from_item(&item);
    let (draft, set_draft) = signal(seed.clone());
    let (editing, set_editing) = signal(false);

    view! {
        {move || if editing.get() {
            let save_id = item.id.clone();
            let discard = seed.clone();
            view! {
                <div class="grocery-item editing">
                    <div class="item-content">
                        <input
                            type="text"
                            class="edit-input name-input"
                            placeholder="Item name"
                            prop:value=move || draft.get().name
                            on:input=move |ev| set_draft.update(|d| d.name = event_target_value(&ev))
                        />
                        <input
                            type="text"
                            class="edit-input description-input"
                            placeholder="Description"
                            prop:value=move || draft.get().description.unwrap_or_default()
                            on:input=move |ev| set_draft.update(|d| {
                                let text = event_target_value(&ev);
                                d.description = (!text.is_empty()).then_some(text);
                            })
                        />
                        <div class="quantity-unit">
                            <input
                                type="number"
                                min="0"
                                step="0.1"
                                class="edit-input quantity-input"
                                prop:value=move || draft.get().quantity.to_string()
                                on:input=move |ev| set_draft.update(|d| {
                                    if let Ok(quantity) = event_target_value(&ev).parse() {
                                        d.quantity = quantity;
                                    }
                                })
                            />
                            <select
                                class="edit-select"
                                on:change=move |ev| set_draft.update(|d| {
                                    if let Some(unit) = Unit::from_str(&event_target_value(&ev)) {
                                        d.unit = unit;
                                    }
                                })
                            >
                                {Unit::ALL.iter().map(|option| {
                                    let option = *option;
                                    view! {
                                        <option
                                            value=option.as_str()
                                            selected=move || draft.get().unit == option
                                        >
                                            {option.as_str()}
                                        </option>
                                    }
                                }).collect_view()}
                            </select>
                        </div>
                    </div>
                    <div class="item-actions">
                        <button
                            class="btn btn-save"
                            on:click=move |_| {
                                controller.update(save_id.clone(), draft.get());
                                set_editing.set(false);
                            }
                        >
                            "Save"
                        </button>
                        <button
                            class="btn btn-cancel"
                            on:click=move |_| {
                                set_draft.set(discard.clone());
                                set_editing.set(false);
                            }
                        >
                            "Cancel"
                        </button>
                    </div>
                </div>
            }.into_any()
        } else {
            let toggle_id = item.id.clone();
            let delete_id = item.id.clone();
            let purchased = item.purchased;
            view! {
                <div class=if purchased { "grocery-item purchased" } else { "grocery-item" }>
                    <div class="item-content">
                        <div class="item-main">
                            <span class="item-name">{item.name.clone()}</span>
                            {item.description.clone().map(|text| view! {
                                <span class="item-description">{text}</span>
                            })}
                        </div>
                        <div class="item-quantity">
                            <span>{format!("{} {}", item.quantity, item.unit)}</span>
                        </div>
                    </div>
                    <div class="item-actions">
                        <button
                            class=if purchased { "btn btn-unpurchase" } else { "btn btn-purchase" }
                            on:click=move |_| controller.toggle_purchased(toggle_id.clone(), !purchased)
                        >
                            {if purchased { "Unpurchase" } else { "Purchased" }}
                        </button>
                        <button
                            class="btn btn-edit"
                            disabled=purchased
                            on:click=move |_| set_editing.set(true)
                        >
                            "Edit"
                        </button>
                        <button
                            class="btn btn-delete"
                            on:click=move |_| controller.delete(delete_id.clone())
                        >
                            "Delete"
                        </button>
                    </div>
                </div>
            }.into_any()
        }}
    }
}
