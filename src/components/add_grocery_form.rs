//! Add Grocery Form Component
//!
//! Collapsed name input that expands on focus to the full draft fields.

use leptos::prelude::*;

use crate::controller::ListController;
use crate::models::{ItemDraft, Unit};

#[component]
pub fn AddGroceryForm(controller: ListController) -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (quantity, set_quantity) = signal(String::from("1"));
    let (unit, set_unit) = signal(Unit::default());
    let (expanded, set_expanded) = signal(false);

    let reset = move || {
        set_name.set(String::new());
        set_description.set(String::new());
        set_quantity.set(String::from("1"));
        set_unit.set(Unit::default());
        set_expanded.set(false);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let item_name = name.get();
        if item_name.is_empty() {
            return;
        }
        let text = description.get();
        controller.add(ItemDraft {
            name: item_name,
            description: (!text.is_empty()).then_some(text),
            quantity: quantity.get().parse().unwrap_or(1.0),
            unit: unit.get(),
        });
        reset();
    };

    view! {
        <form class="add-grocery-form" on:submit=on_submit>
            <div class="form-row">
                <input
                    type="text"
                    class="form-input name-input"
                    placeholder="Add a new item..."
                    required=true
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    on:focus=move |_| set_expanded.set(true)
                />
                {move || expanded.get().then(|| view! {
                    <input
                        type="number"
                        min="0"
                        step="0.1"
                        class="form-input quantity-input"
                        required=true
                        prop:value=move || quantity.get()
                        on:input=move |ev| set_quantity.set(event_target_value(&ev))
                    />
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            if let Some(selected) = Unit::from_str(&event_target_value(&ev)) {
                                set_unit.set(selected);
                            }
                        }
                    >
                        {Unit::ALL.iter().map(|option| {
                            let option = *option;
                            view! {
                                <option value=option.as_str() selected=move || unit.get() == option>
                                    {option.as_str()}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                })}
            </div>
            {move || expanded.get().then(|| view! {
                <div class="form-row">
                    <input
                        type="text"
                        class="form-input description-input-full"
                        placeholder="Description (optional)"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-actions">
                    <button
                        type="submit"
                        class="btn btn-add"
                        disabled=move || controller.mutating.get()
                    >
                        "Add Item"
                    </button>
                    <button type="button" class="btn btn-cancel" on:click=move |_| reset()>
                        "Cancel"
                    </button>
                </div>
            })}
        </form>
    }
}
