//! Grocery List Frontend App
//!
//! Wires config, transport, cache and controller once, then renders the
//! list. All dependencies are passed down as explicit props.

use leptos::prelude::*;

use crate::api::RestApi;
use crate::components::GroceryList;
use crate::config::ApiConfig;
use crate::controller::ListController;
use crate::query::QueryCache;

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::load();
    let cache = QueryCache::new(RestApi::new(config));
    let controller = ListController::new(cache);
    controller.start();

    view! {
        <GroceryList controller=controller />
    }
}
