use super::*;
use crate::model::{Comment, Post};

fn insert_frame(topic: &str, kind: &str, record: &Value) -> String {
    json!({
        "topic": topic,
        "event": "postgres_changes",
        "payload": { "data": { "type": kind, "table": "posts", "record": record } },
        "ref": null,
    })
    .to_string()
}

fn post_row() -> Value {
    json!({
        "post_id": 9,
        "community_id": 1,
        "user_id": "u1",
        "title": "Live post",
        "content": "Arrived over the socket",
        "created_at": "2024-01-15T10:30:00Z",
    })
}

// =============================================================================
// OUTGOING FRAMES
// =============================================================================

#[test]
fn community_join_frame_filters_posts_by_community() {
    let sub = Subscription::community_posts("7");
    let frame: Value = serde_json::from_str(&sub.join_message(Some("jwt"), 1).encode().unwrap()).unwrap();
    assert_eq!(frame["topic"], "realtime:community-posts-7");
    assert_eq!(frame["event"], "phx_join");
    assert_eq!(frame["ref"], "1");
    let change = &frame["payload"]["config"]["postgres_changes"][0];
    assert_eq!(change["event"], "INSERT");
    assert_eq!(change["schema"], "public");
    assert_eq!(change["table"], "posts");
    assert_eq!(change["filter"], "community_id=eq.7");
    assert_eq!(frame["payload"]["access_token"], "jwt");
}

#[test]
fn comment_subscription_targets_comments_table() {
    let sub = Subscription::post_comments("p3");
    assert_eq!(sub.topic, "realtime:post-comments-p3");
    assert_eq!(sub.table, "comments");
    assert_eq!(sub.filter, "post_id=eq.p3");
}

#[test]
fn heartbeat_and_leave_frames() {
    let hb: Value = serde_json::from_str(&PhoenixMessage::heartbeat(4).encode().unwrap()).unwrap();
    assert_eq!(hb, json!({"topic": "phoenix", "event": "heartbeat", "payload": {}, "ref": "4"}));

    let leave = Subscription::community_posts("7").leave_message(5);
    assert_eq!(leave.event, "phx_leave");
    assert_eq!(leave.topic, "realtime:community-posts-7");
}

#[test]
fn ref_counter_is_monotonic() {
    let mut refs = RefCounter::default();
    assert_eq!((refs.next(), refs.next(), refs.next()), (1, 2, 3));
}

// =============================================================================
// INCOMING FRAMES
// =============================================================================

#[test]
fn decode_insert_yields_post_record() {
    let topic = "realtime:community-posts-1";
    let post: Option<Post> = decode_insert(&insert_frame(topic, "INSERT", &post_row()), topic).unwrap();
    let post = post.unwrap();
    assert_eq!(post.id, "9");
    assert_eq!(post.replies, 0);
    assert!(post.username.is_none());
}

#[test]
fn decode_insert_ignores_other_events_and_topics() {
    let topic = "realtime:community-posts-1";
    let reply = json!({"topic": topic, "event": "phx_reply", "payload": {"status": "ok"}, "ref": "1"}).to_string();
    assert_eq!(decode_insert::<Post>(&reply, topic).unwrap(), None);

    let other = insert_frame("realtime:community-posts-2", "INSERT", &post_row());
    assert_eq!(decode_insert::<Post>(&other, topic).unwrap(), None);

    let update = insert_frame(topic, "UPDATE", &post_row());
    assert_eq!(decode_insert::<Post>(&update, topic).unwrap(), None);
}

#[test]
fn decode_insert_rejects_malformed_record() {
    let topic = "realtime:post-comments-1";
    let frame = insert_frame(topic, "INSERT", &json!({"comment_id": 1}));
    assert!(matches!(decode_insert::<Comment>(&frame, topic), Err(ApiError::Decode(_))));
    assert!(decode_insert::<Comment>("not json", topic).is_err());
}

// =============================================================================
// BACKOFF
// =============================================================================

#[test]
fn backoff_doubles_to_cap_and_resets() {
    let mut backoff = Backoff::default();
    let delays: Vec<u64> = (0..6).map(|_| backoff.next_delay_ms()).collect();
    assert_eq!(delays, vec![1_000, 2_000, 4_000, 8_000, 10_000, 10_000]);
    backoff.reset();
    assert_eq!(backoff.next_delay_ms(), 1_000);
}
