use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

const DISMISS_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
}

/// Context-provided toast queue. Views push mutation outcomes here; the
/// shell mounts a single [`Toaster`] that renders whatever is queued.
#[derive(Debug, Clone)]
pub struct Toasts {
    entries: ArcRwSignal<Vec<Toast>>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            entries: ArcRwSignal::new(Vec::new()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    /// Reactive read of the queued toasts.
    pub fn current(&self) -> Vec<Toast> {
        self.entries.get()
    }

    pub fn dismiss(&self, id: Uuid) {
        self.entries.update(|entries| entries.retain(|t| t.id != id));
    }

    fn push(&self, level: ToastLevel, message: String) {
        let toast = Toast {
            id: Uuid::new_v4(),
            level,
            message,
        };
        let id = toast.id;
        self.entries.update(|entries| entries.push(toast));

        let entries = self.entries.clone();
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DISMISS_MS).await;
            entries.update(|entries| entries.retain(|t| t.id != id));
        });
    }
}

/// Renders the toast stack; clicking a toast dismisses it early.
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    view! {
        <div class="toast-stack">
            {move || {
                let handle = toasts.clone();
                toasts
                    .current()
                    .into_iter()
                    .map(|toast| {
                        let handle = handle.clone();
                        let id = toast.id;
                        let class = match toast.level {
                            ToastLevel::Success => "toast toast-success",
                            ToastLevel::Error => "toast toast-error",
                        };
                        view! {
                            <div class=class on:click=move |_| handle.dismiss(id)>
                                {toast.message.clone()}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
