use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::ArticleClient;
use crate::components::toast::Toasts;
use crate::debounce::Generation;
use crate::models::article::Article;

const DEBOUNCE_MS: u32 = 500;
pub const MIN_QUERY_CHARS: usize = 2;

/// Server-side search tab. Keystrokes are debounced for 500 ms; queries
/// under two characters are never issued. Results live outside the main
/// collection cache and are guarded against late responses: a reply to a
/// superseded query is discarded, not rendered.
#[component]
pub fn ArticleSearch() -> impl IntoView {
    let client = expect_context::<ArticleClient>();
    let toasts = expect_context::<Toasts>();

    let raw_input = RwSignal::new(String::new());
    let committed = RwSignal::new(String::new());
    let limit = RwSignal::new(10usize);
    let searching = RwSignal::new(false);
    let results = RwSignal::new(None::<Result<Vec<Article>, String>>);

    // One generation per concern: pending keystroke timers, and issued
    // requests. Superseding either leaves the stale task inert.
    let keystroke_gen = Generation::new();
    let request_gen = Generation::new();

    let run_search = {
        let client = client.clone();
        let toasts = toasts.clone();
        let request_gen = request_gen.clone();
        move |query: String, limit_now: usize| {
            let client = client.clone();
            let toasts = toasts.clone();
            let request_gen = request_gen.clone();
            let token = request_gen.next();
            searching.set(true);
            spawn_local(async move {
                let outcome = client.search(&query, limit_now).await;
                if !request_gen.is_current(token) {
                    tracing::debug!(query = %query, "discarding response to superseded search");
                    return;
                }
                // The tab may have been switched away mid-flight.
                if results.try_get_untracked().is_none() {
                    return;
                }
                match outcome {
                    Ok(list) => results.set(Some(Ok(list))),
                    Err(e) => {
                        tracing::error!(error = %e, query = %query, "search failed");
                        toasts.error(e.user_message());
                        results.set(Some(Err(e.user_message())));
                    }
                }
                searching.set(false);
            });
        }
    };

    let handle_keystroke = {
        let keystroke_gen = keystroke_gen.clone();
        let run_search = run_search.clone();
        move |value: String| {
            raw_input.set(value.clone());
            let token = keystroke_gen.next();
            let keystroke_gen = keystroke_gen.clone();
            let run_search = run_search.clone();
            spawn_local(async move {
                TimeoutFuture::new(DEBOUNCE_MS).await;
                if !keystroke_gen.is_current(token) {
                    return;
                }
                if committed.try_get_untracked().is_none() {
                    return;
                }
                let query = value.trim().to_string();
                committed.set(query.clone());
                if query.chars().count() >= MIN_QUERY_CHARS {
                    run_search(query, limit.get_untracked());
                } else {
                    results.set(None);
                    searching.set(false);
                }
            });
        }
    };

    // Changing the limit re-issues immediately: the committed query
    // already sat through its quiet period.
    let handle_limit = {
        let run_search = run_search.clone();
        move |value: String| {
            let chosen = value.parse().unwrap_or(10);
            limit.set(chosen);
            let query = committed.get_untracked();
            if query.chars().count() >= MIN_QUERY_CHARS {
                run_search(query, chosen);
            }
        }
    };

    view! {
        <div class="article-search">
            <div class="search-toolbar">
                <input
                    type="text"
                    placeholder="Search articles..."
                    prop:value=raw_input
                    on:input=move |ev| handle_keystroke(event_target_value(&ev))
                />
                <select on:change=move |ev| handle_limit(event_target_value(&ev))>
                    <option value="5">"5 results"</option>
                    <option value="10" selected=true>"10 results"</option>
                    <option value="15">"15 results"</option>
                    <option value="20">"20 results"</option>
                </select>
            </div>

            {move || {
                if searching.get() {
                    return Some(view! { <p class="muted">"Searching..."</p> }.into_any());
                }
                let query = committed.get();
                if query.chars().count() < MIN_QUERY_CHARS {
                    return Some(
                        view! {
                            <p class="muted">"Type at least 2 characters to search."</p>
                        }
                        .into_any(),
                    );
                }
                match results.get() {
                    Some(Ok(list)) if list.is_empty() => Some(
                        view! {
                            <p class="muted">{format!("No results for \"{query}\".")}</p>
                        }
                        .into_any(),
                    ),
                    Some(Ok(list)) => Some(
                        view! {
                            <div class="card-stack">
                                <h3>"Search Results"</h3>
                                {list
                                    .into_iter()
                                    .map(|article| {
                                        view! {
                                            <div class="card">
                                                <h4>{article.title}</h4>
                                                <p class="content-preview">{article.content}</p>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                        .into_any(),
                    ),
                    Some(Err(message)) => Some(
                        view! { <p class="error">"Search error: " {message}</p> }.into_any(),
                    ),
                    None => None,
                }
            }}
        </div>
    }
}
