//! UI Components
//!
//! Leptos components for the grocery list.

mod add_grocery_form;
mod grocery_item_row;
mod grocery_list;
mod pagination;

pub use add_grocery_form::AddGroceryForm;
pub use grocery_item_row::GroceryItemRow;
pub use grocery_list::GroceryList;
pub use pagination::Pagination;
