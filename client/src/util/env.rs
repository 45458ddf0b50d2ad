//! Build-time configuration for the browser bundle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment, so credentials are baked in at
//! compile time with `option_env!`. A missing backend URL or key puts the app
//! in demo mode: seeded data, local-only mutations.

use social::payment::PaymentMode;
use social::rest::BackendConfig;
use social::wallet::WalletConfig;

const SUPABASE_URL: Option<&str> = option_env!("NICHENET_SUPABASE_URL");
const SUPABASE_ANON_KEY: Option<&str> = option_env!("NICHENET_SUPABASE_ANON_KEY");
const STRIPE_PUBLIC_KEY: Option<&str> = option_env!("NICHENET_STRIPE_PUBLIC_KEY");
const WALLETCONNECT_PROJECT_ID: Option<&str> = option_env!("NICHENET_WALLETCONNECT_PROJECT_ID");

/// Hosted backend settings, or `None` in demo mode.
pub fn backend() -> Option<BackendConfig> {
    BackendConfig::from_parts(SUPABASE_URL, SUPABASE_ANON_KEY)
}

pub fn is_demo() -> bool {
    backend().is_none()
}

pub fn payment_mode() -> PaymentMode {
    PaymentMode::from_publishable_key(STRIPE_PUBLIC_KEY)
}

pub fn wallet() -> WalletConfig {
    WalletConfig::new(WALLETCONNECT_PROJECT_ID)
}
