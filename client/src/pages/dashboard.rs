//! Dashboard page listing conversations with create and search.
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route. Loads the conversation list on mount, filters it locally,
//! and coordinates the create->navigate flow. The search text starts empty
//! on every visit.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use chatline::state::conversations::ConversationsState;
use chatline::types::ConversationId;

use crate::components::conversation_card::ConversationCard;

/// Dashboard page: create box, search box and the conversation cards.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let conversations = expect_context::<RwSignal<ConversationsState>>();
    let navigate = use_navigate();
    let new_title = RwSignal::new(String::new());
    let created_id = RwSignal::new(None::<ConversationId>);

    conversations.update(|s| s.set_filter(String::new()));

    #[cfg(feature = "csr")]
    {
        conversations.update(ConversationsState::begin_load);
        leptos::task::spawn_local(async move {
            let result = crate::net::api::list_conversations().await;
            conversations.update(|s| {
                let _ = s.finish_load(result);
            });
        });
    }

    Effect::new(move || {
        if let Some(id) = created_id.get() {
            created_id.set(None);
            navigate(&format!("/chat/{id}"), NavigateOptions::default());
        }
    });

    let do_create = move || {
        let Some(title) = conversations
            .try_update(|s| s.begin_create(&new_title.get_untracked()))
            .flatten()
        else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                let result = crate::net::api::create_conversation(&title).await;
                let created = conversations
                    .try_update(|s| s.finish_create(result).ok())
                    .flatten();
                if let Some(conversation) = created {
                    new_title.set(String::new());
                    created_id.set(Some(conversation.id));
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = title;
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            do_create();
        }
    };

    let can_create = move || !new_title.get().trim().is_empty() && !conversations.get().create_pending;

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__title">"Conversations"</span>
                <span class="toolbar__spacer"></span>
                <a class="btn toolbar__intelligence" href="/intelligence">
                    "Intelligence"
                </a>
            </header>

            <div class="dashboard-page__create">
                <input
                    class="dashboard-page__create-input"
                    type="text"
                    placeholder="Start a new conversation..."
                    prop:value=move || new_title.get()
                    on:input=move |ev| new_title.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button class="btn btn--primary" on:click=move |_| do_create() disabled=move || !can_create()>
                    {move || if conversations.get().create_pending { "Creating..." } else { "New Chat" }}
                </button>
            </div>

            <input
                class="dashboard-page__search"
                type="search"
                placeholder="Search conversations..."
                prop:value=move || conversations.get().filter
                on:input=move |ev| conversations.update(|s| s.set_filter(event_target_value(&ev)))
            />

            <Show when=move || conversations.get().error.is_some()>
                <p class="dashboard-page__error">{move || conversations.get().error.unwrap_or_default()}</p>
            </Show>

            <div class="dashboard-page__cards">
                {move || {
                    let state = conversations.get();
                    if state.loading && state.items.is_empty() {
                        return view! { <p class="dashboard-page__placeholder">"Loading conversations..."</p> }
                            .into_any();
                    }
                    let visible = state.visible();
                    if visible.is_empty() {
                        let text = if state.filter.trim().is_empty() {
                            "No conversations yet. Start one above."
                        } else {
                            "No conversations match your search."
                        };
                        return view! { <p class="dashboard-page__placeholder">{text}</p> }.into_any();
                    }
                    visible
                        .into_iter()
                        .cloned()
                        .map(|conversation| view! { <ConversationCard conversation=conversation/> })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </div>
    }
}
