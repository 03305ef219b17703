use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::ArticleClient;
use crate::components::toast::Toasts;
use crate::models::article::{Article, ArticleUpdate};

/// Modal edit form, pre-populated from the article passed in. Submits the
/// full editable field set as a partial update; server-assigned
/// timestamps never appear in the payload. Success closes the modal,
/// failure keeps it open with the edits intact.
#[component]
pub fn EditArticle(article: Article, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let client = expect_context::<ArticleClient>();
    let toasts = expect_context::<Toasts>();

    let title = RwSignal::new(article.title.clone());
    let content = RwSignal::new(article.content.clone());
    let description = RwSignal::new(article.description.clone());
    let summary = RwSignal::new(article.summary.clone());
    let saving = RwSignal::new(false);
    let id = article.id.clone();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let update = ArticleUpdate {
            title: Some(title.get_untracked()),
            content: Some(content.get_untracked()),
            description: Some(description.get_untracked()),
            summary: Some(summary.get_untracked()),
        };

        let client = client.clone();
        let toasts = toasts.clone();
        let id = id.clone();
        saving.set(true);
        spawn_local(async move {
            let outcome = client.update(&id, &update).await;
            if saving.try_get_untracked().is_none() {
                return;
            }
            saving.set(false);
            match outcome {
                Ok(_) => {
                    toasts.success("Article updated successfully");
                    on_close.run(());
                }
                Err(e) => {
                    tracing::error!(error = %e, id = %id, "failed to update article");
                    toasts.error(e.user_message());
                }
            }
        });
    };

    view! {
        <div class="dialog-backdrop">
            <div class="dialog">
                <h3>"Edit Article"</h3>
                <form class="article-form" on:submit=on_submit>
                    <label>
                        "Title"
                        <input
                            type="text"
                            prop:value=title
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Content"
                        <textarea
                            rows="6"
                            prop:value=content
                            on:input=move |ev| content.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label>
                        "Description"
                        <textarea
                            rows="3"
                            prop:value=description
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label>
                        "Summary"
                        <textarea
                            rows="3"
                            prop:value=summary
                            on:input=move |ev| summary.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <div class="dialog-actions">
                        <button type="button" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
