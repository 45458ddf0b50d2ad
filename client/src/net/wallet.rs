//! Injected EIP-1193 provider access for the connect button.

#![allow(clippy::unused_async)]

use social::wallet::{WalletState, parse_chain_id};

/// Ask the browser wallet for an account, then read its current chain.
pub async fn connect() -> WalletState {
    #[cfg(feature = "hydrate")]
    {
        let Some(provider) = provider() else {
            return WalletState::NoProvider;
        };
        let accounts = match request(&provider, "eth_requestAccounts").await {
            Ok(v) => v,
            Err(e) => return WalletState::Error(e),
        };
        let address = js_sys::Array::from(&accounts).get(0).as_string();
        let Some(address) = address else {
            return WalletState::Error("wallet returned no accounts".to_owned());
        };
        let chain_id = request(&provider, "eth_chainId")
            .await
            .ok()
            .and_then(|v| v.as_string())
            .and_then(|hex| parse_chain_id(&hex));
        WalletState::Connected { address, chain_id }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = parse_chain_id;
        WalletState::NoProvider
    }
}

#[cfg(feature = "hydrate")]
fn provider() -> Option<wasm_bindgen::JsValue> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str("ethereum"))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

#[cfg(feature = "hydrate")]
async fn request(provider: &wasm_bindgen::JsValue, method: &str) -> Result<wasm_bindgen::JsValue, String> {
    use wasm_bindgen::{JsCast, JsValue};

    let func = js_sys::Reflect::get(provider, &JsValue::from_str("request"))
        .map_err(|_| "provider has no request method".to_owned())?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| "provider request is not callable".to_owned())?;
    let args = js_sys::Object::new();
    js_sys::Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
        .map_err(|_| "failed to build request".to_owned())?;
    let promise = func
        .call1(provider, &args)
        .map_err(describe)?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| "provider did not return a promise".to_owned())?;
    wasm_bindgen_futures::JsFuture::from(promise).await.map_err(describe)
}

/// Provider rejections are `{code, message}` objects.
#[cfg(feature = "hydrate")]
fn describe(err: wasm_bindgen::JsValue) -> String {
    js_sys::Reflect::get(&err, &wasm_bindgen::JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "wallet request rejected".to_owned())
}
