//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use chatline::state::conversation::ConversationState;
use chatline::state::conversations::ConversationsState;

use crate::pages::{chat::ChatPage, dashboard::DashboardPage, intelligence::IntelligencePage};

/// Root application component.
///
/// Provides the list and thread state contexts shared across routes and sets
/// up client-side routing. Query state is owned by its page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(RwSignal::new(ConversationsState::default()));
    provide_context(RwSignal::new(ConversationState::default()));

    view! {
        <Stylesheet id="chatline" href="/pkg/chatline.css"/>
        <Title text="Chatline"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=(StaticSegment("chat"), ParamSegment("id")) view=ChatPage/>
                <Route path=StaticSegment("intelligence") view=IntelligencePage/>
            </Routes>
        </Router>
    }
}
