//! Chat page for a single conversation thread.
//!
//! SYSTEM CONTEXT
//! ==============
//! Driven by the `/chat/:id` route param. Every mount and every param change
//! starts a fresh load; completions for superseded loads are discarded by
//! the state's load tickets. Leaving the page releases the thread so the next
//! mount loads again. Sends are optimistic and rolled back on failure.

use chrono::Utc;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use chatline::state::conversation::{ConversationState, Phase};
use chatline::types::ConversationId;

use crate::components::chat_input::ChatInput;
use crate::components::message_bubble::MessageBubble;
use crate::util::format::status_label;

/// Thread view with header actions, message list and composer.
#[component]
pub fn ChatPage() -> impl IntoView {
    let thread = expect_context::<RwSignal<ConversationState>>();
    let params = use_params_map();
    let navigate = use_navigate();
    let confirm_end = RwSignal::new(false);
    let leave = RwSignal::new(false);
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    let route_id = move || {
        params
            .read()
            .get("id")
            .and_then(|raw| raw.parse::<ConversationId>().ok())
    };

    on_cleanup(move || thread.update(ConversationState::release));

    Effect::new(move || {
        let route = route_id();
        let Some(id) = thread.with_untracked(|s| s.needs_load(route)) else {
            return;
        };
        let Some(ticket) = thread.try_update(|s| s.begin_load(id)) else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                let result = crate::net::api::get_conversation(ticket.id).await;
                thread.update(|s| {
                    let _ = s.finish_load(ticket, result);
                });
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ticket;
        }
    });

    Effect::new(move || {
        let state = thread.get();
        let _ = state.messages.len();
        let _ = state.awaiting_reply;

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    Effect::new(move || {
        if leave.get() {
            leave.set(false);
            navigate("/", NavigateOptions::default());
        }
    });

    let on_send = Callback::new(move |content: String| {
        let Some(Ok(Some(pending))) = thread.try_update(|s| s.begin_send(&content, Utc::now())) else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                let result = crate::net::api::send_message(pending.conversation_id, &pending.content).await;
                thread.update(|s| match result {
                    Ok(reply) => {
                        let _ = s.confirm_send(&pending, reply, Utc::now());
                    }
                    Err(e) => s.rollback_send(&pending, &e),
                });
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = pending;
        }
    });

    let on_end_confirm = Callback::new(move |()| {
        confirm_end.set(false);
        let Some(Ok(id)) = thread.try_update(ConversationState::begin_end) else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                let result = crate::net::api::end_conversation(id).await;
                let ended = thread
                    .try_update(|s| s.finish_end(id, result, Utc::now()).is_ok())
                    .unwrap_or(false);
                if ended {
                    leave.set(true);
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    });
    let on_end_cancel = Callback::new(move |()| confirm_end.set(false));

    let title = move || {
        thread
            .get()
            .conversation
            .map_or_else(|| "Loading...".to_owned(), |c| c.title)
    };
    let status = move || {
        thread
            .get()
            .conversation
            .map_or("loading", |c| status_label(c.status.is_active()))
    };
    let is_active = move || thread.get().phase() == Phase::Active;
    let input_disabled = Signal::derive(move || !thread.get().can_send());

    view! {
        <div class="chat-page">
            <header class="chat-page__header toolbar">
                <a class="btn toolbar__back" href="/" title="Back to conversations">
                    "←"
                </a>
                <div class="chat-page__heading">
                    <span class="chat-page__title">{title}</span>
                    <span class="chat-page__status">{status}</span>
                </div>
                <span class="toolbar__spacer"></span>
                <a class="btn toolbar__new-chat" href="/">
                    "New Chat"
                </a>
                <Show when=is_active>
                    <button
                        class="btn btn--danger toolbar__end"
                        on:click=move |_| confirm_end.set(true)
                        disabled=move || thread.get().ending
                    >
                        {move || if thread.get().ending { "Ending..." } else { "End Chat" }}
                    </button>
                </Show>
            </header>

            <div class="chat-page__messages" node_ref=messages_ref>
                {move || {
                    let state = thread.get();
                    match state.phase() {
                        Phase::Unloaded | Phase::Loading => {
                            view! { <p class="chat-page__placeholder">"Loading messages..."</p> }.into_any()
                        }
                        Phase::Failed => {
                            view! {
                                <div class="chat-page__failed">
                                    <p class="chat-page__error">
                                        {format!("Error: {}", state.error.unwrap_or_default())}
                                    </p>
                                    <a class="btn btn--primary" href="/">
                                        "Go Back"
                                    </a>
                                </div>
                            }
                                .into_any()
                        }
                        Phase::Active | Phase::Ended if state.messages.is_empty() => {
                            view! { <p class="chat-page__placeholder">"No messages yet. Start the conversation."</p> }
                                .into_any()
                        }
                        Phase::Active | Phase::Ended => {
                            state
                                .messages
                                .into_iter()
                                .map(|message| view! { <MessageBubble message=message/> })
                                .collect::<Vec<_>>()
                                .into_any()
                        }
                    }
                }}

                {move || {
                    thread
                        .get()
                        .awaiting_reply
                        .then(|| view! { <div class="chat-page__thinking">"AI is thinking..."</div> })
                }}
            </div>

            {move || {
                let state = thread.get();
                let summary = state.conversation.as_ref().and_then(|c| c.summary.clone());
                (state.phase() == Phase::Ended)
                    .then(|| {
                        view! {
                            <div class="chat-page__summary">
                                <span class="chat-page__summary-label">"Summary"</span>
                                <p>{summary.unwrap_or_else(|| "This conversation has ended.".to_owned())}</p>
                            </div>
                        }
                    })
            }}

            <Show when=move || {
                let state = thread.get();
                state.conversation.is_some() && state.error.is_some()
            }>
                <p class="chat-page__error">{move || thread.get().error.unwrap_or_default()}</p>
            </Show>

            <ChatInput disabled=input_disabled on_send=on_send/>

            <Show when=move || confirm_end.get()>
                <ConfirmEndDialog on_confirm=on_end_confirm on_cancel=on_end_cancel/>
            </Show>
        </div>
    }
}

/// Modal asking the user to confirm ending the conversation.
#[component]
fn ConfirmEndDialog(on_confirm: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <p class="dialog__text">"Are you sure you want to end this conversation?"</p>
                <p class="dialog__hint">"A summary is generated and no further messages can be sent."</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(())>
                        "End Chat"
                    </button>
                </div>
            </div>
        </div>
    }
}
