use crate::auth::{ServicesProvider, error_handler};
use crate::components::{CoffeeList, LoginMask, NotFound};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    List,
    #[at("/login")]
    Login,
    /// Target of the catch-all redirect
    #[at("/ideas")]
    Ideas,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Where a route sends the browser instead of rendering a page
fn redirect_target(route: &Route) -> Option<Route> {
    match route {
        Route::NotFound => Some(Route::Ideas),
        _ => None,
    }
}

fn switch(route: Route) -> Html {
    if let Some(to) = redirect_target(&route) {
        return html! { <Redirect<Route> to={to} /> };
    }

    match route {
        Route::List => html! { <CoffeeList /> },
        Route::Login => html! { <LoginMask /> },
        Route::Ideas | Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <HashRouter>
            <ServicesProvider>
                <AppContent />
            </ServicesProvider>
        </HashRouter>
    }
}

/// Routes plus the redirect to the login form when the session expires
#[function_component(AppContent)]
fn app_content() -> Html {
    let navigator = use_navigator();

    use_effect_with((), move |_| {
        if let Some(navigator) = navigator {
            error_handler::set_auth_error_callback(Rc::new(move || {
                navigator.push(&Route::Login);
            }));
        }
        error_handler::clear_auth_error_callback
    });

    html! {
        <main class="container">
            <Switch<Route> render={switch} />
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_paths_are_recognized() {
        assert_eq!(Route::recognize("/"), Some(Route::List));
        assert_eq!(Route::recognize("/login"), Some(Route::Login));
        assert_eq!(Route::recognize("/ideas"), Some(Route::Ideas));
    }

    #[test]
    fn unknown_paths_fall_through_to_the_redirect() {
        assert_eq!(Route::recognize("/espresso"), Some(Route::NotFound));
        assert_eq!(Route::recognize("/login/extra"), Some(Route::NotFound));
    }

    #[test]
    fn unknown_paths_redirect_to_ideas() {
        let route = Route::recognize("/espresso").unwrap();
        assert_eq!(redirect_target(&route), Some(Route::Ideas));
    }

    #[test]
    fn declared_routes_render_without_redirect() {
        for route in [Route::List, Route::Login, Route::Ideas] {
            assert_eq!(redirect_target(&route), None);
        }
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::List.to_path(), "/");
        assert_eq!(Route::Login.to_path(), "/login");
        assert_eq!(Route::Ideas.to_path(), "/ideas");
    }
}
