//! Change-feed WebSocket client.
//!
//! The `RealtimeHandle` returned by [`subscribe`] owns one socket task: it
//! connects, joins the subscription's channel, heartbeats, hands every
//! decoded insert to the callback, and reconnects with exponential backoff
//! after a drop. [`RealtimeHandle::unsubscribe`] (or dropping the handle)
//! sends `phx_leave` and ends the task.
//!
//! All socket logic is gated behind `#[cfg(feature = "hydrate")]`; on the
//! server `subscribe` returns an inert handle.

use serde::de::DeserializeOwned;
use social::realtime::Subscription;

/// Keeps a subscription alive; dropping it unsubscribes.
pub struct RealtimeHandle {
    #[cfg(feature = "hydrate")]
    stop: Option<futures::channel::oneshot::Sender<()>>,
}

impl RealtimeHandle {
    pub fn unsubscribe(mut self) {
        self.stop_now();
    }

    fn stop_now(&mut self) {
        #[cfg(feature = "hydrate")]
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

impl Drop for RealtimeHandle {
    fn drop(&mut self) {
        self.stop_now();
    }
}

/// Start delivering inserts for `subscription` to `on_insert`.
pub fn subscribe<T, F>(subscription: Subscription, access_token: Option<String>, on_insert: F) -> RealtimeHandle
where
    T: DeserializeOwned + 'static,
    F: Fn(T) + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        let Some(config) = crate::util::env::backend() else {
            leptos::logging::warn!("realtime disabled: backend not configured");
            return RealtimeHandle { stop: None };
        };
        let (stop_tx, stop_rx) = futures::channel::oneshot::channel();
        leptos::task::spawn_local(socket_loop(config.realtime_url(), subscription, access_token, on_insert, stop_rx));
        RealtimeHandle { stop: Some(stop_tx) }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (subscription, access_token, on_insert);
        RealtimeHandle {}
    }
}

#[cfg(feature = "hydrate")]
enum SocketEnd {
    Stopped,
    Dropped(String),
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "hydrate")]
async fn socket_loop<T, F>(
    url: String,
    subscription: Subscription,
    access_token: Option<String>,
    on_insert: F,
    stop: futures::channel::oneshot::Receiver<()>,
) where
    T: DeserializeOwned + 'static,
    F: Fn(T) + 'static,
{
    use futures::FutureExt;
    use social::realtime::{Backoff, RefCounter};

    let mut stop = stop.fuse();
    let mut backoff = Backoff::default();
    let mut refs = RefCounter::default();

    loop {
        match run_socket(&url, &subscription, access_token.as_deref(), &on_insert, &mut stop, &mut refs, &mut backoff).await {
            SocketEnd::Stopped => {
                leptos::logging::log!("realtime {} closed", subscription.topic);
                return;
            }
            SocketEnd::Dropped(reason) => {
                leptos::logging::warn!("realtime {} dropped: {reason}", subscription.topic);
            }
        }

        let delay = u32::try_from(backoff.next_delay_ms()).unwrap_or(u32::MAX);
        futures::select! {
            () = gloo_timers::future::TimeoutFuture::new(delay).fuse() => {}
            _ = stop => return,
        }
    }
}

/// Connect, join, and pump messages until the socket drops or we are stopped.
#[cfg(feature = "hydrate")]
async fn run_socket<T, F>(
    url: &str,
    subscription: &Subscription,
    access_token: Option<&str>,
    on_insert: &F,
    stop: &mut futures::future::Fuse<futures::channel::oneshot::Receiver<()>>,
    refs: &mut social::realtime::RefCounter,
    backoff: &mut social::realtime::Backoff,
) -> SocketEnd
where
    T: DeserializeOwned + 'static,
    F: Fn(T) + 'static,
{
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;
    use social::realtime::{HEARTBEAT_INTERVAL_SECS, PhoenixMessage, decode_insert};

    let ws = match WebSocket::open(url) {
        Ok(ws) => ws,
        Err(e) => return SocketEnd::Dropped(e.to_string()),
    };
    let (mut write, read) = ws.split();
    let mut read = read.fuse();

    let join = subscription.join_message(access_token, refs.next());
    match join.encode() {
        Ok(text) => {
            if let Err(e) = write.send(Message::Text(text)).await {
                return SocketEnd::Dropped(e.to_string());
            }
        }
        Err(e) => return SocketEnd::Dropped(e.to_string()),
    }
    backoff.reset();

    let heartbeat_ms = u32::try_from(HEARTBEAT_INTERVAL_SECS * 1000).unwrap_or(u32::MAX);
    let mut ticks = gloo_timers::future::IntervalStream::new(heartbeat_ms).fuse();

    loop {
        futures::select! {
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => match decode_insert::<T>(&text, &subscription.topic) {
                    Ok(Some(record)) => on_insert(record),
                    Ok(None) => {}
                    Err(e) => leptos::logging::warn!("realtime decode failed: {e}"),
                },
                Some(Ok(Message::Bytes(_))) => {}
                Some(Err(e)) => return SocketEnd::Dropped(e.to_string()),
                None => return SocketEnd::Dropped("socket closed".to_owned()),
            },
            _ = ticks.next() => {
                if let Ok(text) = PhoenixMessage::heartbeat(refs.next()).encode() {
                    if let Err(e) = write.send(Message::Text(text)).await {
                        return SocketEnd::Dropped(e.to_string());
                    }
                }
            },
            _ = stop => {
                if let Ok(text) = subscription.leave_message(refs.next()).encode() {
                    let _ = write.send(Message::Text(text)).await;
                }
                let _ = write.close().await;
                return SocketEnd::Stopped;
            },
        }
    }
}
