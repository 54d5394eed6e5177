//! Chat bubble for a single message.
//!
//! SYSTEM CONTEXT
//! ==============
//! Bodies are markdown. Prose is injected as sanitized HTML; top-level fenced
//! code blocks render as their own `<pre>` with a copy-to-clipboard button.

use leptos::prelude::*;

use chatline::types::{Message, Sender};

use crate::util::format::time_label;
use crate::util::markdown::{Segment, copy_text, language_class, split_segments};

/// One message, aligned by sender.
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let is_user = message.sender == Sender::User;
    let pending = message.id.is_provisional() && is_user;
    let time = time_label(message.created_at);

    let body = split_segments(&message.content)
        .into_iter()
        .map(|segment| match segment {
            Segment::Html(html) => view! { <div class="message-bubble__prose" inner_html=html></div> }.into_any(),
            Segment::Code { language, code } => view! { <CodeBlock language=language code=code/> }.into_any(),
        })
        .collect::<Vec<_>>();

    view! {
        <div class="message-row" class:message-row--user=is_user class:message-row--ai=!is_user>
            <div class="message-bubble" class:message-bubble--pending=pending>
                <div class="message-bubble__body">{body}</div>
                <span class="message-bubble__time">{time}</span>
            </div>
        </div>
    }
}

#[component]
fn CodeBlock(language: String, code: String) -> impl IntoView {
    let copied = RwSignal::new(false);
    let class = language_class(&language);

    let on_copy = {
        let code = code.clone();
        move |_| {
            let Some(text) = copy_text(&code) else {
                return;
            };
            #[cfg(feature = "csr")]
            {
                if let Some(window) = web_sys::window() {
                    if let Some(clipboard) = window.navigator().clipboard() {
                        let _ = clipboard.write_text(&text);
                        copied.set(true);
                        leptos::task::spawn_local(async move {
                            gloo_timers::future::sleep(std::time::Duration::from_secs(2)).await;
                            copied.set(false);
                        });
                    }
                }
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = text;
            }
        }
    };

    view! {
        <div class="code-block">
            <pre class="code-block__pre">
                <code class=class>{code}</code>
            </pre>
            <button class="code-block__copy" on:click=on_copy>
                {move || if copied.get() { "Copied" } else { "Copy" }}
            </button>
        </div>
    }
}
