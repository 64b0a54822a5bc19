//! Panel navigation bar with locale toggle and sign-out.

use leptos::prelude::*;

use crate::i18n::MessageKey;
use crate::state::auth::AuthState;
use crate::state::ui::{Panel, UiState};
use crate::util::{session, storage};

#[component]
pub fn PanelNav() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let locale = move || ui.with(|u| u.locale);

    let on_logout = move |_| {
        let token = session::token(auth);
        session::signed_out(ui, auth);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            // An unrevoked row still expires server-side.
            let _ = crate::net::browser::logout(&token).await;
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = token;
    };

    let on_locale = move |_| {
        let next = ui.with_untracked(|u| u.locale.toggled());
        storage::save_locale(next);
        ui.update(|u| u.locale = next);
    };

    view! {
        <nav class="panel-nav">
            {Panel::ALL
                .into_iter()
                .map(|panel| {
                    let class = move || {
                        if ui.with(|u| u.panel == panel) {
                            "panel-nav__link panel-nav__link--active"
                        } else {
                            "panel-nav__link"
                        }
                    };
                    view! {
                        <a class=class href=format!("/{panel}")>
                            {move || locale().text(panel.title_key())}
                        </a>
                    }
                })
                .collect_view()}
            <span class="panel-nav__spacer"></span>
            <span class="panel-nav__user">
                {move || auth.with(|a| a.display_name().unwrap_or_default().to_owned())}
            </span>
            <button class="btn panel-nav__locale" on:click=on_locale>
                {move || locale().toggled().tag().to_uppercase()}
            </button>
            <button class="btn panel-nav__logout" on:click=on_logout>
                {move || locale().text(MessageKey::ActionLogout)}
            </button>
        </nav>
    }
}
