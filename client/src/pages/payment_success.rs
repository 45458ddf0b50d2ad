//! Landing page after a hosted checkout redirect.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use social::payment::{PremiumGate, Verification};

use crate::state::ai::AiState;
use crate::util::storage;

#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    let ai = expect_context::<RwSignal<AiState>>();
    let query = use_query_map();
    let verification = RwSignal::new(Verification::Processing);

    Effect::new(move || {
        let session_id = query.read().get("session_id").filter(|id| !id.is_empty());
        let Some(session_id) = session_id else {
            verification.set(Verification::missing_session());
            return;
        };
        verification.set(Verification::Processing);
        leptos::task::spawn_local(async move {
            let outcome = match crate::net::payments::check_status(&session_id).await {
                Ok(status) => Verification::from_status(&status),
                Err(e) => {
                    leptos::logging::warn!("payment verification failed: {e}");
                    Verification::Failed("Failed to verify payment".to_owned())
                }
            };
            if outcome == Verification::Succeeded {
                ai.update(|s| s.gate = PremiumGate::Unlocked);
                storage::save_json(storage::PREMIUM_KEY, &true);
            }
            verification.set(outcome);
        });
    });

    view! {
        <div class="page payment-result">
            <div class="panel payment-result__card">
                {move || match verification.get() {
                    Verification::Processing => view! {
                        <span class="spinner"></span>
                        <h1>"Processing Payment"</h1>
                        <p class="muted">"Please wait while we verify your payment..."</p>
                    }
                    .into_any(),
                    Verification::Succeeded => view! {
                        <div class="payment-result__icon payment-result__icon--ok">"✓"</div>
                        <h1>"Payment Successful!"</h1>
                        <p class="muted">"Your AI Assistant is now unlocked."</p>
                        <A href="/ai-assistant" attr:class="btn btn--primary">"Go to AI Assistant"</A>
                    }
                    .into_any(),
                    Verification::Pending(status) => view! {
                        <div class="payment-result__icon">"…"</div>
                        <h1>"Payment Pending"</h1>
                        <p class="muted">{format!("Current status: {status}")}</p>
                        <A href="/profile" attr:class="btn btn--secondary">"View Payment History"</A>
                    }
                    .into_any(),
                    Verification::Failed(message) => view! {
                        <div class="payment-result__icon payment-result__icon--error">"✕"</div>
                        <h1>"Payment Error"</h1>
                        <p class="muted">{message}</p>
                        <A href="/ai-assistant" attr:class="btn btn--secondary">"Back to AI Assistant"</A>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
