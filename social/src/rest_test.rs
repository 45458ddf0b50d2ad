use super::*;
use time::macros::datetime;

fn config() -> BackendConfig {
    BackendConfig::from_parts(Some("https://proj.supabase.co/"), Some("anon-key")).unwrap()
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn from_parts_requires_both_values() {
    assert!(BackendConfig::from_parts(None, Some("k")).is_none());
    assert!(BackendConfig::from_parts(Some("https://x.co"), Some("  ")).is_none());
    assert_eq!(config().url(), "https://proj.supabase.co");
}

#[test]
fn surface_urls() {
    let cfg = config();
    assert_eq!(cfg.rest_url("posts"), "https://proj.supabase.co/rest/v1/posts");
    assert_eq!(cfg.auth_url("/signup"), "https://proj.supabase.co/auth/v1/signup");
    assert_eq!(
        cfg.realtime_url(),
        "wss://proj.supabase.co/realtime/v1/websocket?apikey=anon-key&vsn=1.0.0"
    );
}

#[test]
fn realtime_url_maps_plain_http_to_ws() {
    let cfg = BackendConfig::from_parts(Some("http://localhost:54321"), Some("k")).unwrap();
    assert!(cfg.realtime_url().starts_with("ws://localhost:54321/realtime/v1/websocket"));
}

// =============================================================================
// QUERY BUILDER
// =============================================================================

#[test]
fn query_url_encodes_params_in_order() {
    let url = Query::table("posts")
        .select("*")
        .eq("post_id", "42")
        .order("created_at", false)
        .url(&config());
    assert_eq!(
        url,
        "https://proj.supabase.co/rest/v1/posts?select=%2A&post_id=eq.42&order=created_at.desc"
    );
}

#[test]
fn get_carries_auth_headers_with_anon_fallback() {
    let req = Query::table("communities").get(&config(), None);
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.header("apikey"), Some("anon-key"));
    assert_eq!(req.header("authorization"), Some("Bearer anon-key"));
    assert!(req.body.is_none());

    let req = Query::table("communities").get(&config(), Some("user-jwt"));
    assert_eq!(req.header("Authorization"), Some("Bearer user-jwt"));
}

#[test]
fn paged_request_sets_range_and_count() {
    let req = list_communities(&config(), None, PageRequest::new(2, 10), "");
    assert_eq!(req.header("Range"), Some("10-19"));
    assert_eq!(req.header("Range-Unit"), Some("items"));
    assert_eq!(req.header("Prefer"), Some("count=exact"));
    assert!(!req.url.contains("or="));
    assert!(req.url.ends_with("order=created_at.desc"));
}

#[test]
fn community_search_uses_or_ilike_filter() {
    let req = list_communities(&config(), None, PageRequest::first(10), "web3");
    let expected = urlencoding::encode("(name.ilike.*web3*,description.ilike.*web3*,topic.ilike.*web3*)");
    assert!(req.url.contains(&format!("or={expected}")), "{}", req.url);
}

#[test]
fn sanitize_search_strips_reserved_chars() {
    assert_eq!(sanitize_search(" a,b(c)* "), "abc");
    assert_eq!(sanitize_search("()"), "");
}

#[test]
fn single_lookup_requests_object() {
    let req = get_community(&config(), None, "7");
    assert_eq!(req.header("Accept"), Some("application/vnd.pgrst.object+json"));
    assert!(req.url.contains("community_id=eq.7"));
}

#[test]
fn insert_returns_representation_with_json_array_body() {
    let post = NewPost {
        user_id: "u1".to_owned(),
        community_id: "c1".to_owned(),
        title: "Hello there".to_owned(),
        content: "First post in here".to_owned(),
        created_at: datetime!(2024-01-15 10:30 UTC),
    };
    let req = create_post(&config(), Some("jwt"), &post).unwrap();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.header("Prefer"), Some("return=representation"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body[0]["community_id"], "c1");
    assert_eq!(body[0]["created_at"], "2024-01-15T10:30:00Z");
}

#[test]
fn leave_deletes_matching_membership() {
    let req = leave_community(&config(), Some("jwt"), "u1", "c1");
    assert_eq!(req.method, Method::Delete);
    assert!(req.url.ends_with("community_members?user_id=eq.u1&community_id=eq.c1"));
}

#[test]
fn comments_are_oldest_first_and_posts_newest_first() {
    let comments = list_comments(&config(), None, "p1", PageRequest::first(20));
    assert!(comments.url.contains("order=created_at.asc"));
    assert_eq!(comments.header("Range"), Some("0-19"));
    let posts = list_posts(&config(), None, "c1", PageRequest::first(10));
    assert!(posts.url.contains("order=created_at.desc"));
    assert!(posts.url.contains(&*urlencoding::encode("comments(count)")));
}

#[test]
fn update_profile_is_patch_without_absent_fields() {
    let changes = ProfileUpdate { bio: Some("hi".to_owned()), ..ProfileUpdate::default() };
    let req = update_profile(&config(), Some("jwt"), "u1", &changes).unwrap();
    assert_eq!(req.method, Method::Patch);
    assert_eq!(req.body.as_deref(), Some(r#"{"bio":"hi"}"#));
}

// =============================================================================
// AUTH
// =============================================================================

#[test]
fn sign_up_sends_username_metadata() {
    let req = sign_up(&config(), "a@b.edu", "Abcdef12", "sam").unwrap();
    assert_eq!(req.url, "https://proj.supabase.co/auth/v1/signup");
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["data"]["username"], "sam");
}

#[test]
fn sign_in_uses_password_grant() {
    let req = sign_in(&config(), "a@b.edu", "Abcdef12").unwrap();
    assert!(req.url.ends_with("/auth/v1/token?grant_type=password"));
}

#[test]
fn sign_out_and_user_use_session_token() {
    assert_eq!(sign_out(&config(), "jwt").header("Authorization"), Some("Bearer jwt"));
    assert_eq!(current_user(&config(), "jwt").method, Method::Get);
}

#[test]
fn parse_sign_up_accepts_session_or_bare_user() {
    let with_session = r#"{"access_token":"t","refresh_token":"r","expires_at":100,"user":{"id":"u1","email":"a@b.edu"}}"#;
    let outcome = parse_sign_up(with_session).unwrap();
    assert_eq!(outcome.user.id, "u1");
    assert!(outcome.session.is_some());

    let bare = r#"{"id":"u2","email":"c@d.edu","user_metadata":{"username":"sam"}}"#;
    let outcome = parse_sign_up(bare).unwrap();
    assert_eq!(outcome.user.username_hint(), Some("sam"));
    assert!(outcome.session.is_none());

    assert!(matches!(parse_sign_up("nope"), Err(ApiError::Decode(_))));
}

// =============================================================================
// RESPONSE DECODING
// =============================================================================

#[test]
fn decode_page_prefers_content_range_total() {
    let body = r#"[{"community_id":1,"name":"Rustaceans","member_count":3}]"#;
    let page: Page<crate::model::Community> = decode_page(body, Some("0-0/12")).unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.items[0].id, "1");

    let page: Page<crate::model::Community> = decode_page(body, None).unwrap();
    assert_eq!(page.total, 1);
}

#[test]
fn decode_first_of_empty_is_not_found() {
    assert_eq!(decode_first::<serde_json::Value>("[]"), Err(ApiError::NotFound));
}

#[test]
fn membership_no_rows_means_not_member() {
    assert_eq!(membership_from_response(200, "{}"), Ok(true));
    let no_rows = r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned"}"#;
    assert_eq!(membership_from_response(406, no_rows), Ok(false));
    assert!(membership_from_response(500, "boom").is_err());
}
