use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::cache::Tag;
use crate::api::client::ArticleClient;
use crate::components::edit_article::EditArticle;
use crate::components::toast::Toasts;
use crate::models::article::Article;

pub const PAGE_SIZE: usize = 6;
const LONG_CONTENT_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthFilter {
    All,
    /// Content longer than 1000 characters.
    Long,
    /// Content of at most 1000 characters.
    Short,
}

impl LengthFilter {
    fn matches(self, article: &Article) -> bool {
        match self {
            LengthFilter::All => true,
            LengthFilter::Long => article.content.chars().count() > LONG_CONTENT_CHARS,
            LengthFilter::Short => article.content.chars().count() <= LONG_CONTENT_CHARS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    Oldest,
    Title,
}

/// Which side panel is showing. One tagged state instead of a boolean per
/// dialog keeps "which payload is open" a single fact: opening a second
/// dialog replaces the first.
#[derive(Debug, Clone, PartialEq)]
enum ListDialog {
    Closed,
    Summary(Article),
    Edit(Article),
    ConfirmDelete(Article),
}

/// The client-side pipeline: term filter, length filter, sort. Applied on
/// every render over the cached collection; pagination happens after.
pub(crate) fn apply_view_pipeline(
    articles: &[Article],
    term: &str,
    filter: LengthFilter,
    sort: SortOrder,
) -> Vec<Article> {
    let term = term.trim().to_lowercase();
    let mut visible: Vec<Article> = articles
        .iter()
        .filter(|a| term.is_empty() || a.title.to_lowercase().contains(&term))
        .filter(|a| filter.matches(a))
        .cloned()
        .collect();

    match sort {
        SortOrder::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => visible.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Title => visible.sort_by(|a, b| a.title.cmp(&b.title)),
    }

    visible
}

pub(crate) fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// The 1-based page's slice. A page past the end is empty, never a panic:
/// shrinking filters may leave `page` beyond the last page, and the view
/// renders that state rather than silently moving the user.
pub(crate) fn page_slice(items: &[Article], page: usize) -> &[Article] {
    let start = page.saturating_sub(1) * PAGE_SIZE;
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

fn parse_filter(value: &str) -> LengthFilter {
    match value {
        "long" => LengthFilter::Long,
        "short" => LengthFilter::Short,
        _ => LengthFilter::All,
    }
}

fn parse_sort(value: &str) -> SortOrder {
    match value {
        "oldest" => SortOrder::Oldest,
        "title" => SortOrder::Title,
        _ => SortOrder::Newest,
    }
}

/// The articles tab: cached collection with client-side search, length
/// filter, sort and pagination, plus the row mutations and their dialogs.
#[component]
pub fn ArticleList() -> impl IntoView {
    let client = expect_context::<ArticleClient>();
    let toasts = expect_context::<Toasts>();

    let page = RwSignal::new(1usize);
    let search_term = RwSignal::new(String::new());
    let filter = RwSignal::new(LengthFilter::All);
    let sort = RwSignal::new(SortOrder::Newest);
    let dialog = RwSignal::new(ListDialog::Closed);

    let articles = LocalResource::new({
        let client = client.clone();
        move || {
            let client = client.clone();
            // Subscribes this read to the collection tag: any mutation
            // bumps the epoch and the list refetches.
            let _epoch = client.cache().track(Tag::ArticleList);
            async move { client.list().await.map_err(|e| e.to_string()) }
        }
    });

    let row_client = client.clone();
    let row_toasts = toasts.clone();
    let dialog_client = client.clone();
    let dialog_toasts = toasts.clone();

    view! {
        <div class="article-list">
            <div class="list-toolbar">
                <input
                    type="text"
                    placeholder="Filter by title..."
                    prop:value=search_term
                    on:input=move |ev| search_term.set(event_target_value(&ev))
                />
                <select on:change=move |ev| filter.set(parse_filter(&event_target_value(&ev)))>
                    <option value="all">"All lengths"</option>
                    <option value="long">"Long (over 1000 chars)"</option>
                    <option value="short">"Short"</option>
                </select>
                <select on:change=move |ev| sort.set(parse_sort(&event_target_value(&ev)))>
                    <option value="newest">"Newest first"</option>
                    <option value="oldest">"Oldest first"</option>
                    <option value="title">"By title"</option>
                </select>
            </div>

            <Transition fallback=|| view! { <p class="muted">"Loading articles..."</p> }>
                {move || {
                    let client = row_client.clone();
                    let toasts = row_toasts.clone();
                    articles.get().map(|res| match &res {
                        Ok(all) => {
                            let visible = apply_view_pipeline(
                                all,
                                &search_term.get(),
                                filter.get(),
                                sort.get(),
                            );
                            let pages = total_pages(visible.len());
                            let current = page.get();
                            let shown = page_slice(&visible, current).to_vec();

                            let body = if all.is_empty() {
                                view! { <p class="muted">"No articles yet."</p> }.into_any()
                            } else if visible.is_empty() {
                                view! { <p class="muted">"No articles match the current filters."</p> }
                                    .into_any()
                            } else if shown.is_empty() {
                                view! { <p class="muted">"Nothing on this page: the filters shrank the list."</p> }
                                    .into_any()
                            } else {
                                shown
                                    .into_iter()
                                    .map(|article| article_card(article, &client, &toasts, dialog))
                                    .collect_view()
                                    .into_any()
                            };

                            view! {
                                <div class="card-stack">{body}</div>
                                <div class="pager">
                                    <button
                                        disabled={current <= 1}
                                        on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                                    >
                                        "Previous"
                                    </button>
                                    <span class="pager-label">
                                        {format!("Page {} of {}", current, pages)}
                                    </span>
                                    <button
                                        disabled={current >= pages}
                                        on:click=move |_| page.update(|p| *p += 1)
                                    >
                                        "Next"
                                    </button>
                                </div>
                            }
                            .into_any()
                        }
                        Err(e) => {
                            view! { <p class="error">"Error loading articles: " {e.clone()}</p> }
                                .into_any()
                        }
                    })
                }}
            </Transition>

            {move || {
                let client = dialog_client.clone();
                let toasts = dialog_toasts.clone();
                match dialog.get() {
                    ListDialog::Closed => None,
                    ListDialog::Summary(article) => Some(
                        view! {
                            <div class="dialog-backdrop" on:click=move |_| dialog.set(ListDialog::Closed)>
                                <div class="dialog" on:click=|ev| ev.stop_propagation()>
                                    <h3>"Summary: " {article.title.clone()}</h3>
                                    <p class="summary-text">{article.summary.clone()}</p>
                                    <div class="dialog-actions">
                                        <button on:click=move |_| dialog.set(ListDialog::Closed)>
                                            "Close"
                                        </button>
                                    </div>
                                </div>
                            </div>
                        }
                        .into_any(),
                    ),
                    ListDialog::Edit(article) => Some(
                        view! {
                            <EditArticle
                                article=article
                                on_close=Callback::new(move |_| dialog.set(ListDialog::Closed))
                            />
                        }
                        .into_any(),
                    ),
                    ListDialog::ConfirmDelete(article) => {
                        let title = article.title.clone();
                        let id = article.id.clone();
                        let confirm = move |_| {
                            let client = client.clone();
                            let toasts = toasts.clone();
                            let id = id.clone();
                            dialog.set(ListDialog::Closed);
                            spawn_local(async move {
                                match client.delete(&id).await {
                                    Ok(()) => toasts.success("Article deleted"),
                                    Err(e) => {
                                        tracing::error!(error = %e, id = %id, "delete failed");
                                        toasts.error(e.user_message());
                                    }
                                }
                            });
                        };
                        Some(
                            view! {
                                <div class="dialog-backdrop">
                                    <div class="dialog">
                                        <h3>"Delete article?"</h3>
                                        <p>{format!("\"{title}\" will be permanently removed.")}</p>
                                        <div class="dialog-actions">
                                            <button on:click=move |_| dialog.set(ListDialog::Closed)>
                                                "Cancel"
                                            </button>
                                            <button class="danger" on:click=confirm>
                                                "Delete"
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                            .into_any(),
                        )
                    }
                }
            }}
        </div>
    }
}

fn article_card(
    article: Article,
    client: &ArticleClient,
    toasts: &Toasts,
    dialog: RwSignal<ListDialog>,
) -> impl IntoView {
    let edit_target = article.clone();
    let delete_target = article.clone();
    let summary_target = article.clone();

    let summarize = {
        let client = client.clone();
        let toasts = toasts.clone();
        let article = article.clone();
        move |_| {
            let client = client.clone();
            let toasts = toasts.clone();
            let mut article = article.clone();
            spawn_local(async move {
                match client.summarize(&article.id).await {
                    Ok(resp) => {
                        article.summary = resp.summary;
                        toasts.success("Summary generated");
                        // The list may have been unmounted while the
                        // request was in flight.
                        if dialog.try_get_untracked().is_some() {
                            dialog.set(ListDialog::Summary(article));
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, id = %article.id, "summarize failed");
                        toasts.error(e.user_message());
                    }
                }
            });
        }
    };

    let embed = {
        let client = client.clone();
        let toasts = toasts.clone();
        let id = article.id.clone();
        move |_| {
            let client = client.clone();
            let toasts = toasts.clone();
            let id = id.clone();
            spawn_local(async move {
                match client.embed(&id).await {
                    Ok(resp) => toasts.success(resp.message),
                    Err(e) => {
                        tracing::error!(error = %e, id = %id, "embed failed");
                        toasts.error(e.user_message());
                    }
                }
            });
        }
    };

    view! {
        <div class="card">
            <div class="card-head">
                <h3>{article.title.clone()}</h3>
                <span class="muted">
                    {article.created_at.format("%Y-%m-%d %H:%M").to_string()}
                </span>
            </div>
            {(!article.description.is_empty())
                .then(|| view! { <p class="description">{article.description.clone()}</p> })}
            <p class="content-preview">{article.content.clone()}</p>
            <div class="card-actions">
                <button on:click=move |_| dialog.set(ListDialog::Edit(edit_target.clone()))>
                    "Edit"
                </button>
                <button
                    class="danger"
                    on:click=move |_| dialog.set(ListDialog::ConfirmDelete(delete_target.clone()))
                >
                    "Delete"
                </button>
                <button on:click=summarize>"Summarize"</button>
                <button on:click=embed>"Embed"</button>
                {article.has_summary().then(|| {
                    let summary_target = summary_target.clone();
                    view! {
                        <button on:click=move |_| dialog.set(ListDialog::Summary(summary_target.clone()))>
                            "View summary"
                        </button>
                    }
                })}
            </div>
        </div>
    }
}
