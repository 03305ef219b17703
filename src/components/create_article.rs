use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::ArticleClient;
use crate::components::toast::Toasts;
use crate::models::article::ArticleDraft;

/// Field-scoped validation outcome for the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftErrors {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl DraftErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Title and content must be non-empty after trimming; description is
/// unconstrained. Failures block submission before any request is built.
pub(crate) fn validate_draft(title: &str, content: &str) -> DraftErrors {
    let mut errors = DraftErrors::default();
    if title.trim().is_empty() {
        errors.title = Some("Title is required".to_string());
    }
    if content.trim().is_empty() {
        errors.content = Some("Content is required".to_string());
    }
    errors
}

/// The create tab: local form state, inline validation, reset on success,
/// input retained on failure.
#[component]
pub fn CreateArticle() -> impl IntoView {
    let client = expect_context::<ArticleClient>();
    let toasts = expect_context::<Toasts>();

    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let errors = RwSignal::new(DraftErrors::default());
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let checked = validate_draft(&title.get_untracked(), &content.get_untracked());
        if !checked.is_empty() {
            errors.set(checked);
            return;
        }
        errors.set(DraftErrors::default());

        let draft = ArticleDraft {
            title: title.get_untracked(),
            content: content.get_untracked(),
            description: description.get_untracked(),
            // Not user-settable at creation; the backend schema carries it.
            summary: String::new(),
        };

        let client = client.clone();
        let toasts = toasts.clone();
        submitting.set(true);
        spawn_local(async move {
            let outcome = client.create(&draft).await;
            if submitting.try_get_untracked().is_none() {
                return;
            }
            submitting.set(false);
            match outcome {
                Ok(article) => {
                    toasts.success("Article created");
                    tracing::debug!(id = %article.id, "created from form");
                    title.set(String::new());
                    content.set(String::new());
                    description.set(String::new());
                }
                Err(e) => {
                    // Keep the user's input; nothing is reset on failure.
                    tracing::error!(error = %e, "failed to create article");
                    toasts.error(e.user_message());
                }
            }
        });
    };

    view! {
        <form class="article-form" on:submit=on_submit>
            <h2>"Create New Article"</h2>

            <label>
                "Title"
                <input
                    type="text"
                    placeholder="Enter article title"
                    prop:value=title
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
            </label>
            {move || errors.get().title.map(|msg| view! { <p class="field-error">{msg}</p> })}

            <label>
                "Description"
                <input
                    type="text"
                    placeholder="Brief description of the article"
                    prop:value=description
                    on:input=move |ev| description.set(event_target_value(&ev))
                />
            </label>

            <label>
                "Content"
                <textarea
                    rows="6"
                    placeholder="Write your article content here..."
                    prop:value=content
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>
            </label>
            {move || errors.get().content.map(|msg| view! { <p class="field-error">{msg}</p> })}

            <button type="submit" disabled=move || submitting.get()>
                {move || if submitting.get() { "Creating..." } else { "Create Article" }}
            </button>
        </form>
    }
}
