use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found">
            <h2>{"Nothing here yet"}</h2>
            <Link<Route> to={Route::List}>{"Back to the coffee list"}</Link<Route>>
        </div>
    }
}
