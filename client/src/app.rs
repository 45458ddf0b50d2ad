//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::hooks::use_navigate;
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use social::store::AppStore;

use crate::components::app_shell::AppShell;
use crate::pages::{
    ai_assistant::AiAssistantPage, communities::CommunitiesPage, community_detail::CommunityDetailPage,
    create_community::CreateCommunityPage, create_post::CreatePostPage, dashboard::DashboardPage, login::LoginPage,
    not_found::NotFoundPage, payment_success::PaymentSuccessPage, post_detail::PostDetailPage, profile::ProfilePage,
    register::RegisterPage,
};
use crate::state::{ai::AiState, auth::AuthState, payment::PaymentState};
use crate::util::{auth::install_unauth_redirect, env};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
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
/// Provides the shared contexts, restores the previous session, and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let store = RwSignal::new(initial_store());
    let ai = RwSignal::new(AiState::default());
    let payment = RwSignal::new(PaymentState::default());

    provide_context(auth);
    provide_context(store);
    provide_context(ai);
    provide_context(payment);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(crate::net::session::restore(auth, store));

    on_cleanup(move || {
        store.try_update(AppStore::teardown);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/nichenet.css"/>
        <Title text="NicheNet"/>

        <Router>
            <Routes fallback=NotFoundPage>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("") view=|| view! { <Protected><AppShell><DashboardPage/></AppShell></Protected> }/>
                <Route
                    path=StaticSegment("communities")
                    view=|| view! { <Protected><AppShell><CommunitiesPage/></AppShell></Protected> }
                />
                <Route
                    path=(StaticSegment("communities"), StaticSegment("create"))
                    view=|| view! { <Protected><AppShell><CreateCommunityPage/></AppShell></Protected> }
                />
                <Route
                    path=(StaticSegment("communities"), ParamSegment("id"))
                    view=|| view! { <Protected><AppShell><CommunityDetailPage/></AppShell></Protected> }
                />
                <Route
                    path=(StaticSegment("communities"), ParamSegment("id"), StaticSegment("posts"), StaticSegment("create"))
                    view=|| view! { <Protected><AppShell><CreatePostPage/></AppShell></Protected> }
                />
                <Route
                    path=(StaticSegment("posts"), ParamSegment("id"))
                    view=|| view! { <Protected><AppShell><PostDetailPage/></AppShell></Protected> }
                />
                <Route
                    path=StaticSegment("ai-assistant")
                    view=|| view! { <Protected><AppShell><AiAssistantPage/></AppShell></Protected> }
                />
                <Route
                    path=StaticSegment("profile")
                    view=|| view! { <Protected><AppShell><ProfilePage/></AppShell></Protected> }
                />
                <Route
                    path=StaticSegment("payment-success")
                    view=|| view! { <Protected><AppShell><PaymentSuccessPage/></AppShell></Protected> }
                />
            </Routes>
        </Router>
    }
}

/// Seeded demo data without a backend, an empty store with one. Nobody is
/// signed in until the session is restored.
fn initial_store() -> AppStore {
    if env::is_demo() {
        let mut store = AppStore::seeded();
        store.set_user(None);
        store
    } else {
        AppStore::new(None)
    }
}

/// Spinner while auth loads, redirect to `/login` once it has loaded empty.
#[component]
fn Protected(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    view! {
        <Show
            when=move || auth.get().is_authenticated()
            fallback=|| view! {
                <div class="page-spinner">
                    <div class="spinner"></div>
                </div>
            }
        >
            {children()}
        </Show>
    }
}
