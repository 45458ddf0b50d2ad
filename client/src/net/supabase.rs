//! Hosted backend operations.
//!
//! Each function builds its request with `social::rest`, sends it through
//! [`backend::send`], and decodes the reply. Without backend credentials
//! every call fails with [`ApiError::NotConfigured`]; pages check
//! [`crate::util::env::is_demo`] first and use the local store instead.
//!
//! ERROR HANDLING
//! ==============
//! Errors are returned, never swallowed. Callers log them and show an inline
//! message.

use social::ApiError;
use social::model::{
    AiIdea, AuthUser, Comment, Community, CommunityDraft, IdeaDraft, NewComment, NewCommunity, NewIdea,
    NewMembership, NewPost, NewProfile, Post, PostDraft, ProfileUpdate, Session, User,
};
use social::page::{Page, PageRequest};
use social::rest::{self, BackendConfig, PostThread};
use time::OffsetDateTime;

use super::backend::send;
use crate::state::auth::fallback_user;
use crate::util::env;

fn config() -> Result<BackendConfig, ApiError> {
    env::backend().ok_or(ApiError::NotConfigured)
}

// =============================================================================
// AUTH
// =============================================================================

/// Password sign-in, then the profile row.
///
/// # Errors
///
/// Wrong credentials surface as the backend's own message.
pub async fn sign_in(email: &str, password: &str) -> Result<(Session, User), ApiError> {
    let cfg = config()?;
    let body = send(rest::sign_in(&cfg, email, password)?).await?.into_body()?;
    let session = rest::parse_session(&body)?;
    let user = load_profile(&cfg, &session.access_token, &session.user).await?;
    Ok((session, user))
}

/// Create the account and its profile row.
///
/// Returns `None` when the project requires email confirmation before the
/// first sign-in.
///
/// # Errors
///
/// Any backend failure of the sign-up or profile insert.
pub async fn sign_up(
    email: &str,
    password: &str,
    username: &str,
    now: OffsetDateTime,
) -> Result<Option<(Session, User)>, ApiError> {
    let cfg = config()?;
    let body = send(rest::sign_up(&cfg, email, password, username)?).await?.into_body()?;
    let outcome = rest::parse_sign_up(&body)?;
    let token = outcome.session.as_ref().map(|s| s.access_token.as_str());
    let profile = NewProfile {
        user_id: outcome.user.id.clone(),
        username: username.to_owned(),
        email: email.to_owned(),
        bio: String::new(),
        interests: Vec::new(),
        created_at: now,
    };
    let body = send(rest::create_profile(&cfg, token, &profile)?).await?.into_body()?;
    let user: User = rest::decode_first(&body)?;
    Ok(outcome.session.map(|session| (session, user)))
}

/// Revoke the session server-side. Callers clear local state regardless.
///
/// # Errors
///
/// Any backend failure.
pub async fn sign_out(access_token: &str) -> Result<(), ApiError> {
    let cfg = config()?;
    send(rest::sign_out(&cfg, access_token)).await?.into_body()?;
    Ok(())
}

/// Re-validate a stored session and load its profile.
///
/// # Errors
///
/// An expired or revoked token fails with the backend's 401.
pub async fn restore(session: &Session) -> Result<User, ApiError> {
    let cfg = config()?;
    let body = send(rest::current_user(&cfg, &session.access_token)).await?.into_body()?;
    let account: AuthUser = rest::decode_json(&body)?;
    load_profile(&cfg, &session.access_token, &account).await
}

async fn load_profile(cfg: &BackendConfig, token: &str, account: &AuthUser) -> Result<User, ApiError> {
    let result = send(rest::get_profile(cfg, Some(token), &account.id))
        .await?
        .into_body()
        .and_then(|body| rest::decode_json::<User>(&body));
    match result {
        Ok(user) => Ok(user),
        Err(ApiError::NotFound) => Ok(fallback_user(account)),
        Err(e) => Err(e),
    }
}

/// # Errors
///
/// Any backend failure.
pub async fn update_profile(token: &str, user_id: &str, changes: &ProfileUpdate) -> Result<User, ApiError> {
    let cfg = config()?;
    let body = send(rest::update_profile(&cfg, Some(token), user_id, changes)?).await?.into_body()?;
    rest::decode_first(&body)
}

// =============================================================================
// COMMUNITIES
// =============================================================================

/// # Errors
///
/// Any backend failure.
pub async fn fetch_communities(token: Option<&str>, page: PageRequest, search: &str) -> Result<Page<Community>, ApiError> {
    let cfg = config()?;
    let resp = send(rest::list_communities(&cfg, token, page, search)).await?;
    let content_range = resp.content_range.clone();
    let body = resp.into_body()?;
    rest::decode_page(&body, content_range.as_deref())
}

/// # Errors
///
/// [`ApiError::NotFound`] for an unknown id.
pub async fn fetch_community(token: Option<&str>, community_id: &str) -> Result<Community, ApiError> {
    let cfg = config()?;
    let body = send(rest::get_community(&cfg, token, community_id)).await?.into_body()?;
    rest::decode_json(&body)
}

/// Create a community and join it as its first member.
///
/// # Errors
///
/// Any backend failure of either insert.
pub async fn create_community(
    token: &str,
    user_id: &str,
    draft: CommunityDraft,
    now: OffsetDateTime,
) -> Result<Community, ApiError> {
    let cfg = config()?;
    let new = NewCommunity {
        creator_id: user_id.to_owned(),
        name: draft.name,
        description: draft.description,
        topic: draft.topic,
        created_at: now,
    };
    let body = send(rest::create_community(&cfg, Some(token), &new)?).await?.into_body()?;
    let mut community: Community = rest::decode_first(&body)?;
    join_community(token, user_id, &community.id, now).await?;
    community.is_joined = true;
    community.member_count = community.member_count.max(1);
    Ok(community)
}

/// # Errors
///
/// Any backend failure.
pub async fn join_community(token: &str, user_id: &str, community_id: &str, now: OffsetDateTime) -> Result<(), ApiError> {
    let cfg = config()?;
    let membership = NewMembership { user_id: user_id.to_owned(), community_id: community_id.to_owned(), joined_at: now };
    send(rest::join_community(&cfg, Some(token), &membership)?).await?.into_body()?;
    Ok(())
}

/// # Errors
///
/// Any backend failure.
pub async fn leave_community(token: &str, user_id: &str, community_id: &str) -> Result<(), ApiError> {
    let cfg = config()?;
    send(rest::leave_community(&cfg, Some(token), user_id, community_id)).await?.into_body()?;
    Ok(())
}

/// # Errors
///
/// Any backend failure other than "no rows".
pub async fn is_member(token: &str, user_id: &str, community_id: &str) -> Result<bool, ApiError> {
    let cfg = config()?;
    let resp = send(rest::check_membership(&cfg, Some(token), user_id, community_id)).await?;
    rest::membership_from_response(resp.status, &resp.body)
}

// =============================================================================
// POSTS AND COMMENTS
// =============================================================================

/// # Errors
///
/// Any backend failure.
pub async fn fetch_posts(token: Option<&str>, community_id: &str, page: PageRequest) -> Result<Page<Post>, ApiError> {
    let cfg = config()?;
    let resp = send(rest::list_posts(&cfg, token, community_id, page)).await?;
    let content_range = resp.content_range.clone();
    let body = resp.into_body()?;
    rest::decode_page(&body, content_range.as_deref())
}

/// A post with one page of its comments.
///
/// # Errors
///
/// [`ApiError::NotFound`] for an unknown post; any other backend failure.
pub async fn fetch_post_thread(token: Option<&str>, post_id: &str, page: PageRequest) -> Result<PostThread, ApiError> {
    let cfg = config()?;
    let body = send(rest::get_post(&cfg, token, post_id)).await?.into_body()?;
    let post: Post = rest::decode_json(&body)?;
    let comments = fetch_comments(&cfg, token, post_id, page).await?;
    Ok(PostThread { post, comments })
}

/// Further comment pages after the thread's first.
///
/// # Errors
///
/// Any backend failure.
pub async fn fetch_comment_page(token: Option<&str>, post_id: &str, page: PageRequest) -> Result<Page<Comment>, ApiError> {
    let cfg = config()?;
    fetch_comments(&cfg, token, post_id, page).await
}

async fn fetch_comments(
    cfg: &BackendConfig,
    token: Option<&str>,
    post_id: &str,
    page: PageRequest,
) -> Result<Page<Comment>, ApiError> {
    let resp = send(rest::list_comments(cfg, token, post_id, page)).await?;
    let content_range = resp.content_range.clone();
    let body = resp.into_body()?;
    rest::decode_page(&body, content_range.as_deref())
}

/// # Errors
///
/// Any backend failure.
pub async fn create_post(token: &str, user_id: &str, draft: PostDraft, now: OffsetDateTime) -> Result<Post, ApiError> {
    let cfg = config()?;
    let new = NewPost {
        user_id: user_id.to_owned(),
        community_id: draft.community_id,
        title: draft.title,
        content: draft.content,
        created_at: now,
    };
    let body = send(rest::create_post(&cfg, Some(token), &new)?).await?.into_body()?;
    rest::decode_first(&body)
}

/// # Errors
///
/// Any backend failure.
pub async fn add_comment(
    token: &str,
    user_id: &str,
    post_id: &str,
    content: &str,
    now: OffsetDateTime,
) -> Result<Comment, ApiError> {
    let cfg = config()?;
    let new = NewComment { user_id: user_id.to_owned(), post_id: post_id.to_owned(), content: content.to_owned(), created_at: now };
    let body = send(rest::add_comment(&cfg, Some(token), &new)?).await?.into_body()?;
    rest::decode_first(&body)
}

// =============================================================================
// IDEAS
// =============================================================================

/// # Errors
///
/// Any backend failure.
pub async fn save_idea(token: &str, user_id: &str, draft: &IdeaDraft, now: OffsetDateTime) -> Result<AiIdea, ApiError> {
    let cfg = config()?;
    let new = NewIdea::from_draft(user_id, draft, now);
    let body = send(rest::save_idea(&cfg, Some(token), &new)?).await?.into_body()?;
    rest::decode_first(&body)
}

/// # Errors
///
/// Any backend failure.
pub async fn fetch_ideas(token: &str, user_id: &str) -> Result<Vec<AiIdea>, ApiError> {
    let cfg = config()?;
    let body = send(rest::list_ideas(&cfg, Some(token), user_id)).await?.into_body()?;
    rest::decode_json(&body)
}
