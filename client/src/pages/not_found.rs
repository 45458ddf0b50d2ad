use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page not-found">
            <h1>"404"</h1>
            <p class="muted">"Page not found."</p>
            <A href="/" attr:class="btn btn--primary">"Back to Dashboard"</A>
        </div>
    }
}
