//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::home::HomePage;
use crate::render::PanelData;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ko">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts and sets up client-side routing.
/// The server renders the signed-out state; the stored session and locale
/// are restored once the app is running in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let ui = RwSignal::new(UiState::default());
    let data = RwSignal::new(PanelData::default());

    provide_context(auth);
    provide_context(ui);
    provide_context(data);

    // Effects only run in the browser.
    Effect::new(move || {
        use crate::util::storage;

        ui.update(|u| u.locale = storage::load_locale());
        let restored = AuthState::from_token(storage::load_token());
        if !restored.is_authenticated() {
            return;
        }
        auth.set(restored);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::util::session;

            match crate::net::browser::me(&session::token(auth)).await {
                Ok(user) => auth.update(|a| a.user = Some(user)),
                Err(e) => session::report(ui, auth, &e),
            }
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/pantry.css"/>
        <Title text="Pantry"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=ParamSegment("panel") view=HomePage/>
            </Routes>
        </Router>
    }
}
