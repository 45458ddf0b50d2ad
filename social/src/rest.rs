//! Request builders for the backend-as-a-service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to two backend surfaces: the auth service under
//! `{url}/auth/v1` and the table API under `{url}/rest/v1`. This module only
//! *describes* requests ([`RestRequest`]) and decodes response bodies; the
//! client's network layer executes them with `gloo-net`. Keeping the URL and
//! header rules here makes them testable without a browser.
//!
//! TRADE-OFFS
//! ==========
//! Search terms are interpolated into a PostgREST `or=(...)` filter. The
//! reserved characters `,()` are stripped from the term first rather than
//! quoted, so a search for `"a,b"` searches for `"ab"`.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ApiError;
use crate::model::{
    AuthUser, Comment, NewComment, NewCommunity, NewIdea, NewMembership, NewPost, NewProfile, Post, ProfileUpdate,
    Session,
};
use crate::page::{Page, PageRequest, parse_content_range};

/// Embed that resolves a row's author name.
pub const AUTHOR_EMBED: &str = "*,profiles:user_id(username)";
/// Author embed plus the reply count used by feed cards.
pub const POST_FEED_EMBED: &str = "*,profiles:user_id(username),comments(count)";

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

// =============================================================================
// CONFIG
// =============================================================================

/// Project URL and anonymous key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    url: String,
    anon_key: String,
}

impl BackendConfig {
    /// Build from optional settings. Returns `None` (demo mode) when either
    /// part is missing or blank.
    #[must_use]
    pub fn from_parts(url: Option<&str>, anon_key: Option<&str>) -> Option<Self> {
        let url = url.map(str::trim).filter(|s| !s.is_empty())?;
        let anon_key = anon_key.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self { url: url.trim_end_matches('/').to_owned(), anon_key: anon_key.to_owned() })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    #[must_use]
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }

    #[must_use]
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }

    /// WebSocket endpoint for change notifications (`https` → `wss`).
    #[must_use]
    pub fn realtime_url(&self) -> String {
        let socket_base = if let Some(rest) = self.url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.url.clone()
        };
        format!(
            "{socket_base}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
            urlencoding::encode(&self.anon_key)
        )
    }
}

// =============================================================================
// REQUEST DESCRIPTION
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully described HTTP request, ready for any client to send.
#[derive(Clone, Debug, PartialEq)]
pub struct RestRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RestRequest {
    fn new(method: Method, url: String) -> Self {
        Self { method, url, headers: Vec::new(), body: None }
    }

    fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let text = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Some(text);
        Ok(self.with_header("Content-Type", "application/json"))
    }

    fn authorized(self, config: &BackendConfig, token: Option<&str>) -> Self {
        let bearer = token.unwrap_or(config.anon_key());
        self.with_header("apikey", config.anon_key()).with_header("Authorization", format!("Bearer {bearer}"))
    }

    /// First header value with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// =============================================================================
// TABLE QUERY BUILDER
// =============================================================================

/// PostgREST query against one table.
#[derive(Clone, Debug, Default)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
    range: Option<PageRequest>,
    count_exact: bool,
    single: bool,
}

impl Query {
    #[must_use]
    pub fn table(table: &str) -> Self {
        Self { table: table.to_owned(), ..Self::default() }
    }

    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_owned(), columns.to_owned()));
        self
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    /// Raw `or=(...)` filter; `filter` is the comma-joined condition list.
    #[must_use]
    pub fn or(mut self, filter: &str) -> Self {
        self.params.push(("or".to_owned(), format!("({filter})")));
        self
    }

    #[must_use]
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params.push(("order".to_owned(), format!("{column}.{dir}")));
        self
    }

    #[must_use]
    pub fn range(mut self, page: PageRequest) -> Self {
        self.range = Some(page);
        self
    }

    #[must_use]
    pub fn count_exact(mut self) -> Self {
        self.count_exact = true;
        self
    }

    /// Ask for exactly one object; zero rows become [`ApiError::NotFound`].
    #[must_use]
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    #[must_use]
    pub fn url(&self, config: &BackendConfig) -> String {
        let mut url = config.rest_url(&self.table);
        for (i, (key, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn request(&self, method: Method, config: &BackendConfig, token: Option<&str>, returning: bool) -> RestRequest {
        let mut req = RestRequest::new(method, self.url(config)).authorized(config, token);
        if self.single {
            req = req.with_header("Accept", SINGLE_OBJECT);
        }
        let mut prefer = Vec::new();
        if returning {
            prefer.push("return=representation");
        }
        if self.count_exact {
            prefer.push("count=exact");
        }
        if !prefer.is_empty() {
            req = req.with_header("Prefer", prefer.join(","));
        }
        if let Some(page) = self.range {
            req = req
                .with_header("Range-Unit", "items")
                .with_header("Range", page.range_header());
        }
        req
    }

    #[must_use]
    pub fn get(&self, config: &BackendConfig, token: Option<&str>) -> RestRequest {
        self.request(Method::Get, config, token, false)
    }

    /// Insert `rows` and return the stored representation.
    pub fn insert<T: Serialize + ?Sized>(
        &self,
        config: &BackendConfig,
        token: Option<&str>,
        rows: &T,
    ) -> Result<RestRequest, ApiError> {
        self.request(Method::Post, config, token, true).with_json(rows)
    }

    pub fn update<T: Serialize + ?Sized>(
        &self,
        config: &BackendConfig,
        token: Option<&str>,
        changes: &T,
    ) -> Result<RestRequest, ApiError> {
        self.request(Method::Patch, config, token, true).with_json(changes)
    }

    #[must_use]
    pub fn delete(&self, config: &BackendConfig, token: Option<&str>) -> RestRequest {
        self.request(Method::Delete, config, token, false)
    }
}

/// Strip the characters PostgREST reserves inside `or=(...)`.
#[must_use]
pub fn sanitize_search(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*'))
        .collect::<String>()
        .trim()
        .to_owned()
}

// =============================================================================
// TABLE OPERATIONS
// =============================================================================

pub fn create_profile(config: &BackendConfig, token: Option<&str>, profile: &NewProfile) -> Result<RestRequest, ApiError> {
    Query::table("profiles").select("*").insert(config, token, &[profile])
}

#[must_use]
pub fn get_profile(config: &BackendConfig, token: Option<&str>, user_id: &str) -> RestRequest {
    Query::table("profiles").select("*").eq("user_id", user_id).single().get(config, token)
}

pub fn update_profile(
    config: &BackendConfig,
    token: Option<&str>,
    user_id: &str,
    changes: &ProfileUpdate,
) -> Result<RestRequest, ApiError> {
    Query::table("profiles").select("*").eq("user_id", user_id).update(config, token, changes)
}

/// Newest communities first, optionally filtered by a name/description/topic search.
#[must_use]
pub fn list_communities(config: &BackendConfig, token: Option<&str>, page: PageRequest, search: &str) -> RestRequest {
    let mut query = Query::table("communities").select("*");
    let term = sanitize_search(search);
    if !term.is_empty() {
        query = query.or(&format!("name.ilike.*{term}*,description.ilike.*{term}*,topic.ilike.*{term}*"));
    }
    query.order("created_at", false).range(page).count_exact().get(config, token)
}

#[must_use]
pub fn get_community(config: &BackendConfig, token: Option<&str>, community_id: &str) -> RestRequest {
    Query::table("communities").select("*").eq("community_id", community_id).single().get(config, token)
}

pub fn create_community(
    config: &BackendConfig,
    token: Option<&str>,
    community: &NewCommunity,
) -> Result<RestRequest, ApiError> {
    Query::table("communities").select("*").insert(config, token, &[community])
}

pub fn join_community(
    config: &BackendConfig,
    token: Option<&str>,
    membership: &NewMembership,
) -> Result<RestRequest, ApiError> {
    Query::table("community_members").select("*").insert(config, token, &[membership])
}

#[must_use]
pub fn leave_community(config: &BackendConfig, token: Option<&str>, user_id: &str, community_id: &str) -> RestRequest {
    Query::table("community_members")
        .eq("user_id", user_id)
        .eq("community_id", community_id)
        .delete(config, token)
}

#[must_use]
pub fn check_membership(config: &BackendConfig, token: Option<&str>, user_id: &str, community_id: &str) -> RestRequest {
    Query::table("community_members")
        .select("*")
        .eq("user_id", user_id)
        .eq("community_id", community_id)
        .single()
        .get(config, token)
}

#[must_use]
pub fn list_posts(config: &BackendConfig, token: Option<&str>, community_id: &str, page: PageRequest) -> RestRequest {
    Query::table("posts")
        .select(POST_FEED_EMBED)
        .eq("community_id", community_id)
        .order("created_at", false)
        .range(page)
        .count_exact()
        .get(config, token)
}

#[must_use]
pub fn get_post(config: &BackendConfig, token: Option<&str>, post_id: &str) -> RestRequest {
    Query::table("posts").select(AUTHOR_EMBED).eq("post_id", post_id).single().get(config, token)
}

/// Oldest comments first.
#[must_use]
pub fn list_comments(config: &BackendConfig, token: Option<&str>, post_id: &str, page: PageRequest) -> RestRequest {
    Query::table("comments")
        .select(AUTHOR_EMBED)
        .eq("post_id", post_id)
        .order("created_at", true)
        .range(page)
        .count_exact()
        .get(config, token)
}

pub fn create_post(config: &BackendConfig, token: Option<&str>, post: &NewPost) -> Result<RestRequest, ApiError> {
    Query::table("posts").select(AUTHOR_EMBED).insert(config, token, &[post])
}

pub fn add_comment(config: &BackendConfig, token: Option<&str>, comment: &NewComment) -> Result<RestRequest, ApiError> {
    Query::table("comments").select(AUTHOR_EMBED).insert(config, token, &[comment])
}

pub fn save_idea(config: &BackendConfig, token: Option<&str>, idea: &NewIdea) -> Result<RestRequest, ApiError> {
    Query::table("ai_ideas").select("*").insert(config, token, &[idea])
}

#[must_use]
pub fn list_ideas(config: &BackendConfig, token: Option<&str>, user_id: &str) -> RestRequest {
    Query::table("ai_ideas")
        .select("*")
        .eq("user_id", user_id)
        .order("created_at", false)
        .get(config, token)
}

// =============================================================================
// AUTH OPERATIONS
// =============================================================================

pub fn sign_up(config: &BackendConfig, email: &str, password: &str, username: &str) -> Result<RestRequest, ApiError> {
    RestRequest::new(Method::Post, config.auth_url("signup"))
        .authorized(config, None)
        .with_json(&json!({ "email": email, "password": password, "data": { "username": username } }))
}

pub fn sign_in(config: &BackendConfig, email: &str, password: &str) -> Result<RestRequest, ApiError> {
    RestRequest::new(Method::Post, config.auth_url("token?grant_type=password"))
        .authorized(config, None)
        .with_json(&json!({ "email": email, "password": password }))
}

#[must_use]
pub fn sign_out(config: &BackendConfig, access_token: &str) -> RestRequest {
    RestRequest::new(Method::Post, config.auth_url("logout")).authorized(config, Some(access_token))
}

#[must_use]
pub fn current_user(config: &BackendConfig, access_token: &str) -> RestRequest {
    RestRequest::new(Method::Get, config.auth_url("user")).authorized(config, Some(access_token))
}

/// Result of a sign-up: the new account, plus a session when the project
/// does not require email confirmation.
#[derive(Clone, Debug, PartialEq)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    pub session: Option<Session>,
}

/// Decode a sign-up body, which is a session when auto-confirm is on and a
/// bare user otherwise.
pub fn parse_sign_up(body: &str) -> Result<SignUpOutcome, ApiError> {
    if let Ok(session) = serde_json::from_str::<Session>(body) {
        return Ok(SignUpOutcome { user: session.user.clone(), session: Some(session) });
    }
    let user = decode_json::<AuthUser>(body)?;
    Ok(SignUpOutcome { user, session: None })
}

pub fn parse_session(body: &str) -> Result<Session, ApiError> {
    decode_json(body)
}

// =============================================================================
// RESPONSE DECODING
// =============================================================================

/// Map a response status to `Ok(())` or the classified error.
pub fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::from_response(status, body))
    }
}

pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// First row of an insert/update that returned its representation.
pub fn decode_first<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    decode_json::<Vec<T>>(body)?.into_iter().next().ok_or(ApiError::NotFound)
}

/// Rows plus the total from `Content-Range`; falls back to the row count.
pub fn decode_page<T: DeserializeOwned>(body: &str, content_range: Option<&str>) -> Result<Page<T>, ApiError> {
    let items: Vec<T> = decode_json(body)?;
    let total = content_range
        .and_then(parse_content_range)
        .unwrap_or(items.len() as u64);
    Ok(Page::new(items, total))
}

/// Membership lookups treat "no rows" as "not a member".
pub fn membership_from_response(status: u16, body: &str) -> Result<bool, ApiError> {
    match check_status(status, body) {
        Ok(()) => Ok(true),
        Err(ApiError::NotFound) => Ok(false),
        Err(e) => Err(e),
    }
}

/// A post opened on its own page with the first page of its replies.
#[derive(Clone, Debug, PartialEq)]
pub struct PostThread {
    pub post: Post,
    pub comments: Page<Comment>,
}

