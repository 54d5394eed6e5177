//! Intelligence page: free-text questions over past conversations.
//!
//! The query session lives with the page: leaving the route drops the last
//! answer and the next visit starts empty.

use leptos::prelude::*;

use chatline::state::query::{QueryState, SUGGESTED_QUERIES};

use crate::util::format::searched_label;
use crate::util::markdown::render_markdown_html;

/// Query form, answer card and suggested follow-up questions.
#[component]
pub fn IntelligencePage() -> impl IntoView {
    let session = RwSignal::new(QueryState::default());

    let do_search = move || {
        let Some(text) = session
            .try_update(|s| {
                let query = s.query.clone();
                s.begin(&query)
            })
            .flatten()
        else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                let result = crate::net::api::query(&text, None).await;
                session.update(|s| {
                    let _ = s.finish(text, result);
                });
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = text;
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_search();
        }
    };

    let can_search = move || {
        let state = session.get();
        !state.loading && !state.query.trim().is_empty()
    };

    view! {
        <div class="intelligence-page">
            <header class="intelligence-page__header toolbar">
                <a class="btn toolbar__back" href="/" title="Back to conversations">
                    "←"
                </a>
                <span class="toolbar__title">"Conversation Intelligence"</span>
            </header>

            <p class="intelligence-page__intro">
                "Ask questions across all of your past conversations."
            </p>

            <div class="intelligence-page__form">
                <textarea
                    class="intelligence-page__query"
                    placeholder="What would you like to know?"
                    rows="3"
                    prop:value=move || session.get().query
                    on:input=move |ev| session.update(|s| s.set_query(event_target_value(&ev)))
                    on:keydown=on_keydown
                ></textarea>
                <button class="btn btn--primary" on:click=move |_| do_search() disabled=move || !can_search()>
                    {move || if session.get().loading { "Searching..." } else { "Search" }}
                </button>
            </div>

            <Show when=move || session.get().error.is_some()>
                <p class="intelligence-page__error">{move || session.get().error.unwrap_or_default()}</p>
            </Show>

            {move || {
                session
                    .get()
                    .loading
                    .then(|| view! { <p class="intelligence-page__loading">"Analyzing conversations..."</p> })
            }}

            {move || {
                session
                    .get()
                    .result
                    .map(|outcome| {
                        let rendered = render_markdown_html(&outcome.response);
                        view! {
                            <section class="intelligence-page__answer">
                                <h2 class="intelligence-page__answer-query">{outcome.query}</h2>
                                <div class="intelligence-page__answer-body" inner_html=rendered></div>
                                {searched_label(outcome.searched_conversations)
                                    .map(|label| view! { <p class="intelligence-page__searched">{label}</p> })}
                            </section>
                            <section class="intelligence-page__suggestions">
                                <span class="intelligence-page__suggestions-label">"Try asking"</span>
                                {SUGGESTED_QUERIES
                                    .iter()
                                    .map(|&suggestion| {
                                        view! {
                                            <button
                                                class="btn intelligence-page__suggestion"
                                                on:click=move |_| session.update(|s| s.suggest(suggestion))
                                            >
                                                {suggestion}
                                            </button>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </section>
                        }
                    })
            }}
        </div>
    }
}
