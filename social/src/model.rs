//! Backend records as the browser sees them.
//!
//! DESIGN
//! ======
//! Read records deserialize straight from backend rows (snake_case column
//! names, `*_id` keys). Rows that embed related tables (`profiles`,
//! `comments(count)`) go through a private wire struct and are flattened into
//! display fields. Insert payloads are separate `New*` structs so a read
//! record is never sent back as-is.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

// =============================================================================
// LENIENT FIELD DECODERS
// =============================================================================

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept integer or string primary keys.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accept a list of strings or a single string (model output is not strict).
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        None => Vec::new(),
    })
}

/// Accept a single string or a list of strings joined with `"; "`.
fn text_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => s,
        Some(OneOrMany::Many(items)) => items.join("; "),
        None => String::new(),
    })
}

fn initial_of(name: &str) -> char {
    name.chars()
        .next()
        .map_or('?', |c| c.to_uppercase().next().unwrap_or(c))
}

// =============================================================================
// READ RECORDS
// =============================================================================

/// A user profile (`profiles` table).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user_id", deserialize_with = "id_string")]
    pub id: String,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub interests: Vec<String>,
}

impl User {
    /// Upper-cased first letter of the username, for avatar badges.
    #[must_use]
    pub fn initial(&self) -> char {
        initial_of(&self.username)
    }
}

/// A community (`communities` table) plus the client-held membership flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Community {
    #[serde(rename = "community_id", deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub member_count: u32,
    /// Never stored server-side; set from a membership lookup.
    #[serde(default, skip_serializing)]
    pub is_joined: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Deserialize)]
struct AuthorRef {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Deserialize)]
struct CountRef {
    #[serde(default)]
    count: u32,
}

/// A post in a community feed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "PostRow")]
pub struct Post {
    pub id: String,
    pub community_id: String,
    pub author_id: String,
    /// Author name resolved through the `profiles` embed; absent on
    /// real-time inserts.
    pub username: Option<String>,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub replies: u32,
}

impl Post {
    #[must_use]
    pub fn author_label(&self) -> &str {
        self.username.as_deref().unwrap_or("anonymous")
    }

    #[must_use]
    pub fn author_initial(&self) -> char {
        initial_of(self.author_label())
    }
}

#[derive(Deserialize)]
struct PostRow {
    #[serde(deserialize_with = "id_string")]
    post_id: String,
    #[serde(deserialize_with = "id_string")]
    community_id: String,
    #[serde(deserialize_with = "id_string")]
    user_id: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    profiles: Option<AuthorRef>,
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    content: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(default)]
    comments: Option<Vec<CountRef>>,
    #[serde(default)]
    replies: Option<u32>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        let username = row
            .username
            .or_else(|| row.profiles.and_then(|p| p.username));
        let replies = row
            .replies
            .or_else(|| row.comments.and_then(|c| c.first().map(|r| r.count)))
            .unwrap_or(0);
        Self {
            id: row.post_id,
            community_id: row.community_id,
            author_id: row.user_id,
            username,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            replies,
        }
    }
}

/// A reply on a post.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "CommentRow")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub username: Option<String>,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl Comment {
    #[must_use]
    pub fn author_label(&self) -> &str {
        self.username.as_deref().unwrap_or("anonymous")
    }
}

#[derive(Deserialize)]
struct CommentRow {
    #[serde(deserialize_with = "id_string")]
    comment_id: String,
    #[serde(deserialize_with = "id_string")]
    post_id: String,
    #[serde(deserialize_with = "id_string")]
    user_id: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    profiles: Option<AuthorRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    content: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.comment_id,
            post_id: row.post_id,
            author_id: row.user_id,
            username: row
                .username
                .or_else(|| row.profiles.and_then(|p| p.username)),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Review state of a saved idea.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    #[default]
    Pending,
    Validated,
    Rejected,
}

impl ValidationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
        }
    }
}

/// A saved AI-generated idea (`ai_ideas` table).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AiIdea {
    #[serde(rename = "idea_id", deserialize_with = "id_string")]
    pub id: String,
    #[serde(rename = "user_id", deserialize_with = "id_string")]
    pub author_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_market: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "text_or_list")]
    pub challenges: String,
    #[serde(default, deserialize_with = "text_or_list")]
    pub next_steps: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub validation_status: ValidationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Structured idea produced by the LLM, before it is saved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDraft {
    #[serde(default, deserialize_with = "text_or_list")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_list")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_list")]
    pub target_market: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "text_or_list")]
    pub challenges: String,
    #[serde(default, deserialize_with = "text_or_list")]
    pub next_steps: String,
}

/// A suggested team member for an idea.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub role: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "text_or_list")]
    pub responsibilities: String,
    #[serde(default, deserialize_with = "text_or_list")]
    pub importance: String,
}

/// A row of payment history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Minor currency units (cents).
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

// =============================================================================
// AUTH
// =============================================================================

/// The authenticated account as reported by the auth service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl AuthUser {
    /// Username captured at sign-up, if the auth service echoed it.
    #[must_use]
    pub fn username_hint(&self) -> Option<&str> {
        self.user_metadata.get("username").and_then(serde_json::Value::as_str)
    }
}

/// A signed-in session persisted in browser storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|at| at <= now.unix_timestamp())
    }
}

// =============================================================================
// WRITE PAYLOADS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewProfile {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub interests: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewCommunity {
    pub creator_id: String,
    pub name: String,
    pub description: String,
    pub topic: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewMembership {
    pub user_id: String,
    pub community_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewPost {
    pub user_id: String,
    pub community_id: String,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewComment {
    pub user_id: String,
    pub post_id: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewIdea {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub target_market: String,
    pub features: Vec<String>,
    pub challenges: String,
    pub next_steps: String,
    pub validation_status: ValidationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl NewIdea {
    /// Insert payload for a freshly generated idea; always starts `pending`.
    #[must_use]
    pub fn from_draft(user_id: &str, draft: &IdeaDraft, now: OffsetDateTime) -> Self {
        Self {
            user_id: user_id.to_owned(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            target_market: draft.target_market.clone(),
            features: draft.features.clone(),
            challenges: draft.challenges.clone(),
            next_steps: draft.next_steps.clone(),
            validation_status: ValidationStatus::Pending,
            created_at: now,
        }
    }
}

/// User-entered fields of a new community.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommunityDraft {
    pub name: String,
    pub description: String,
    pub topic: String,
}

/// User-entered fields of a new post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub community_id: String,
    pub title: String,
    pub content: String,
}
