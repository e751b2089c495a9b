//! Login form

use crate::app::Route;
use crate::auth::use_services;
use coffee_http::client::ClientError;
use coffee_http::types::Credentials;
use yew::prelude::*;
use yew_router::prelude::*;

/// Error flag shown after a login attempt; any failure sets it
fn authentication_error_after<T>(result: &Result<T, ClientError>) -> bool {
    result.is_err()
}

#[function_component(LoginMask)]
pub fn login_mask() -> Html {
    let services = use_services();
    let navigator = use_navigator();

    let username = use_state(String::new);
    let password = use_state(String::new);
    let remember_me = use_state(|| false);
    let authentication_error = use_state(|| false);
    let submitting = use_state(|| false);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_remember_change = {
        let remember_me = remember_me.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            remember_me.set(input.checked());
        })
    };

    let on_submit = {
        let login_service = services.login_service.clone();
        let username = username.clone();
        let password = password.clone();
        let remember_me = remember_me.clone();
        let authentication_error = authentication_error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let credentials = Credentials::new((*username).clone(), (*password).clone(), *remember_me);
            let login_service = login_service.clone();
            let authentication_error = authentication_error.clone();
            let submitting = submitting.clone();
            let navigator = navigator.clone();

            submitting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = login_service.login(&credentials).await;
                submitting.set(false);
                authentication_error.set(authentication_error_after(&result));
                if result.is_ok() {
                    if let Some(navigator) = navigator {
                        navigator.push(&Route::List);
                    }
                }
            });
        })
    };

    html! {
        <div class="login-mask">
            <h2>{"Sign in"}</h2>
            if *authentication_error {
                <div class="alert alert-danger">
                    <strong>{"Failed to sign in!"}</strong>
                    {" Please check your credentials and try again."}
                </div>
            }
            <form onsubmit={on_submit}>
                <div class="form-group">
                    <label for="username">{"Login"}</label>
                    <input
                        type="text"
                        id="username"
                        name="username"
                        class="form-control"
                        value={(*username).clone()}
                        oninput={on_username_input}
                    />
                </div>
                <div class="form-group">
                    <label for="password">{"Password"}</label>
                    <input
                        type="password"
                        id="password"
                        name="password"
                        class="form-control"
                        value={(*password).clone()}
                        oninput={on_password_input}
                    />
                </div>
                <div class="form-check">
                    <input
                        type="checkbox"
                        id="remember"
                        name="remember"
                        class="form-check-input"
                        checked={*remember_me}
                        onchange={on_remember_change}
                    />
                    <label for="remember" class="form-check-label">{"Remember me"}</label>
                </div>
                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    {"Sign in"}
                </button>
            </form>
        </div>
    }
}
