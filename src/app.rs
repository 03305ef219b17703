use leptos::prelude::*;

use crate::api::cache::QueryCache;
use crate::api::client::ArticleClient;
use crate::components::article_list::ArticleList;
use crate::components::article_search::ArticleSearch;
use crate::components::create_article::CreateArticle;
use crate::components::toast::{Toaster, Toasts};
use crate::config::ApiConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppTab {
    Articles,
    Create,
    Search,
}

/// Root shell: constructs the query cache and data client once, provides
/// them through context, and composes the three tabs plus the toaster.
#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::from_build_env();
    let cache = QueryCache::new();
    let client = ArticleClient::new(config.clone(), cache.clone());

    provide_context(config);
    provide_context(cache);
    provide_context(client);
    provide_context(Toasts::new());

    let active = RwSignal::new(AppTab::Articles);

    view! {
        <Toaster/>
        <div class="app">
            <header class="app-header">
                <h1>"Article Management System"</h1>
                <p class="muted">"Manage your articles with ease"</p>
            </header>

            <nav class="tabs">
                {tab_button(active, AppTab::Articles, "Articles")}
                {tab_button(active, AppTab::Create, "Create Article")}
                {tab_button(active, AppTab::Search, "Search")}
            </nav>

            <main>
                {move || match active.get() {
                    AppTab::Articles => view! { <ArticleList/> }.into_any(),
                    AppTab::Create => view! { <CreateArticle/> }.into_any(),
                    AppTab::Search => view! { <ArticleSearch/> }.into_any(),
                }}
            </main>
        </div>
    }
}

fn tab_button(active: RwSignal<AppTab>, tab: AppTab, label: &'static str) -> impl IntoView {
    view! {
        <button
            class="tab"
            class:active=move || active.get() == tab
            on:click=move |_| active.set(tab)
        >
            {label}
        </button>
    }
}
