//! Sign-in and registration form.

use leptos::prelude::*;
use models::{LoginRequest, RegisterRequest};

use super::field::TextField;
use crate::i18n::MessageKey;
use crate::state::auth::AuthState;
use crate::state::forms::{LoginForm, RegisterForm};
use crate::state::ui::{Screen, UiState};
use crate::util::session;

enum Submit {
    Login(LoginRequest),
    Register(RegisterRequest),
}

/// `register` picks the registration variant, which also asks for a name.
#[component]
pub fn AuthForm(register: bool) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let form = RwSignal::new(RegisterForm::default());
    let busy = RwSignal::new(false);
    let text = move |key: MessageKey| ui.with(|u| u.locale.text(key));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let typed = form.get_untracked();
        let submit = if register {
            typed.to_request().map(Submit::Register)
        } else {
            LoginForm { email: typed.email, password: typed.password }.to_request().map(Submit::Login)
        };
        let submit = match submit {
            Ok(submit) => submit,
            Err(key) => {
                ui.update(|u| u.notify_invalid(key));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let (result, key) = match submit {
                Submit::Login(req) => (crate::net::browser::login(&req).await, MessageKey::LoginSuccess),
                Submit::Register(req) => (crate::net::browser::register(&req).await, MessageKey::RegisterSuccess),
            };
            match result {
                Ok(response) => session::signed_in(ui, auth, response, key),
                Err(e) => session::report(ui, auth, &e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (submit, auth);
    };

    let on_switch = move |_| {
        ui.update(|u| {
            u.screen = if register { Screen::Login } else { Screen::Register };
            u.clear_message();
        });
    };

    let title = if register { MessageKey::TitleRegister } else { MessageKey::TitleLogin };
    let action = if register { MessageKey::ActionRegister } else { MessageKey::ActionLogin };
    let switch = if register { MessageKey::SwitchToLogin } else { MessageKey::SwitchToRegister };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>{move || text(title)}</h1>
                <TextField
                    label=MessageKey::LabelEmail
                    kind="email"
                    value=Signal::derive(move || form.with(|f| f.email.clone()))
                    on_input=Callback::new(move |v| form.update(|f| f.email = v))
                />
                <Show when=move || register>
                    <TextField
                        label=MessageKey::LabelName
                        value=Signal::derive(move || form.with(|f| f.name.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.name = v))
                    />
                </Show>
                <TextField
                    label=MessageKey::LabelPassword
                    kind="password"
                    value=Signal::derive(move || form.with(|f| f.password.clone()))
                    on_input=Callback::new(move |v| form.update(|f| f.password = v))
                />
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || text(action)}
                </button>
                <button class="btn btn--link" type="button" on:click=on_switch>
                    {move || text(switch)}
                </button>
            </form>
        </div>
    }
}
