//! Message composer at the bottom of the thread.

use leptos::prelude::*;

/// Single-line input with a send button. Submits on Enter and clears itself
/// once a non-blank message is handed to `on_send`.
#[component]
pub fn ChatInput(#[prop(into)] disabled: Signal<bool>, on_send: Callback<String>) -> impl IntoView {
    let input = RwSignal::new(String::new());

    let submit = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || disabled.get_untracked() {
            return;
        }
        input.set(String::new());
        on_send.run(text);
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            submit();
        }
    };

    let can_send = move || !disabled.get() && !input.get().trim().is_empty();

    view! {
        <div class="chat-input">
            <input
                class="chat-input__field"
                type="text"
                placeholder="Type your message..."
                disabled=move || disabled.get()
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
            <button class="btn btn--primary chat-input__send" on:click=move |_| submit() disabled=move || !can_send()>
                "Send"
            </button>
        </div>
    }
}
