//! Card for one conversation in the dashboard list.
//!
//! DESIGN
//! ======
//! Stateless: everything shown is derived from the `Conversation` passed in.
//! The whole card is a link so the router handles navigation.

use leptos::prelude::*;

use chatline::types::Conversation;

use crate::util::format::{created_label, message_count_label, status_label};

/// A clickable card linking to `/chat/{id}`.
#[component]
pub fn ConversationCard(conversation: Conversation) -> impl IntoView {
    let href = format!("/chat/{}", conversation.id);
    let active = conversation.status.is_active();
    let created = created_label(conversation.created_at, chrono::Utc::now());

    view! {
        <a class="conversation-card" class:conversation-card--ended=!active href=href>
            <div class="conversation-card__header">
                <span class="conversation-card__title">{conversation.title}</span>
                <span class="conversation-card__count">{message_count_label(conversation.message_count)}</span>
            </div>
            {conversation
                .summary
                .filter(|s| !s.is_empty())
                .map(|summary| view! { <p class="conversation-card__summary">{summary}</p> })}
            <div class="conversation-card__footer">
                <span class="conversation-card__date">{created}</span>
                <span class="badge" class:badge--active=active class:badge--ended=!active>
                    {status_label(active)}
                </span>
            </div>
        </a>
    }
}
