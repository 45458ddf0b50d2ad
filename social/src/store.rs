//! Injected application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client provides one `AppStore` through a Leptos context at the
//! root component and tears it down when that component is cleaned up. Pages
//! read and mutate it through the methods here; nothing else holds a copy.
//!
//! DESIGN
//! ======
//! The store is a plain value. Remote calls happen in the client first and
//! their results are written back with `upsert_community`, `set_membership`,
//! `prepend_post`, `set_user`, and `replace_ideas`; the local mutations below
//! are the optimistic half of each flow.
//! Join and leave are guarded by the membership flag so a double click cannot
//! drift the member count.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use time::OffsetDateTime;
use time::macros::datetime;
use uuid::Uuid;

use crate::model::{
    AiIdea, Community, CommunityDraft, IdeaDraft, Post, PostDraft, ProfileUpdate, User, ValidationStatus,
};

/// Counters shown on the profile page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileStats {
    pub communities: usize,
    pub posts: usize,
    pub ideas: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppStore {
    pub user: Option<User>,
    pub communities: Vec<Community>,
    pub posts: Vec<Post>,
    pub ideas: Vec<AiIdea>,
}

impl AppStore {
    /// An empty store for a signed-in (or anonymous) user.
    #[must_use]
    pub fn new(user: Option<User>) -> Self {
        Self { user, ..Self::default() }
    }

    /// Demo data shown when no backend is configured.
    #[must_use]
    pub fn seeded() -> Self {
        let user = User {
            id: "1".to_owned(),
            username: "student_builder".to_owned(),
            email: "student@university.edu".to_owned(),
            bio: "CS student passionate about AI and startups".to_owned(),
            interests: ["AI", "Web3", "Biotech", "Startups"].map(str::to_owned).to_vec(),
        };
        let communities = vec![
            seed_community(
                "1",
                "AI Ethics in Healthcare",
                "Discussing ethical implications of AI in medical applications",
                "AI Ethics",
                245,
                true,
            ),
            seed_community(
                "2",
                "Python for Biotech Research",
                "Sharing Python tools and techniques for biological research",
                "Programming",
                189,
                false,
            ),
            seed_community(
                "3",
                "Web3 Gaming Guilds",
                "Building the future of blockchain-based gaming",
                "Web3",
                312,
                true,
            ),
            seed_community(
                "4",
                "Startup Pitch Practice",
                "Practice your startup pitches with fellow entrepreneurs",
                "Entrepreneurship",
                156,
                false,
            ),
        ];
        let posts = vec![
            Post {
                id: "1".to_owned(),
                community_id: "1".to_owned(),
                author_id: "2".to_owned(),
                username: Some("med_student_ai".to_owned()),
                title: "Bias in AI diagnostic tools - how to address?".to_owned(),
                content: "I've been researching bias in AI diagnostic systems. What are the best practices for ensuring fairness?".to_owned(),
                created_at: datetime!(2024-01-15 10:30 UTC),
                replies: 12,
            },
            Post {
                id: "2".to_owned(),
                community_id: "3".to_owned(),
                author_id: "3".to_owned(),
                username: Some("game_dev_pro".to_owned()),
                title: "NFT marketplace for in-game assets".to_owned(),
                content: "Working on a decentralized marketplace for trading game items. Looking for feedback on the economic model.".to_owned(),
                created_at: datetime!(2024-01-15 09:15 UTC),
                replies: 8,
            },
        ];
        Self { user: Some(user), communities, posts, ideas: Vec::new() }
    }

    // =========================================================================
    // MEMBERSHIP
    // =========================================================================

    /// Mark a community joined and count the new member.
    ///
    /// Returns `false` when the community is unknown or already joined.
    pub fn join_community(&mut self, community_id: &str) -> bool {
        match self.community_mut(community_id) {
            Some(c) if !c.is_joined => {
                c.is_joined = true;
                c.member_count = c.member_count.saturating_add(1);
                true
            }
            _ => false,
        }
    }

    /// Reverse of [`AppStore::join_community`]; the count never goes below zero.
    pub fn leave_community(&mut self, community_id: &str) -> bool {
        match self.community_mut(community_id) {
            Some(c) if c.is_joined => {
                c.is_joined = false;
                c.member_count = c.member_count.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    /// Record a membership flag read from the backend without touching counts.
    pub fn set_membership(&mut self, community_id: &str, joined: bool) {
        if let Some(c) = self.community_mut(community_id) {
            c.is_joined = joined;
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    #[must_use]
    pub fn community(&self, community_id: &str) -> Option<&Community> {
        self.communities.iter().find(|c| c.id == community_id)
    }

    fn community_mut(&mut self, community_id: &str) -> Option<&mut Community> {
        self.communities.iter_mut().find(|c| c.id == community_id)
    }

    #[must_use]
    pub fn joined_communities(&self) -> Vec<&Community> {
        self.communities.iter().filter(|c| c.is_joined).collect()
    }

    /// Case-insensitive match of `query` against name and description, and of
    /// `topic` against the topic (`None` or `"all"` matches everything).
    #[must_use]
    pub fn filter_communities(&self, query: &str, topic: Option<&str>) -> Vec<&Community> {
        let needle = query.trim().to_lowercase();
        let topic = topic.filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("all"));
        self.communities
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
            })
            .filter(|c| topic.is_none_or(|t| c.topic == t))
            .collect()
    }

    /// Distinct topics in first-seen order.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for c in &self.communities {
            if !c.topic.is_empty() && !out.contains(&c.topic) {
                out.push(c.topic.clone());
            }
        }
        out
    }

    /// Posts from joined communities, newest first.
    #[must_use]
    pub fn feed_for_joined(&self) -> Vec<&Post> {
        let mut feed: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| self.community(&p.community_id).is_some_and(|c| c.is_joined))
            .collect();
        feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        feed
    }

    #[must_use]
    pub fn posts_in(&self, community_id: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.community_id == community_id).collect()
    }

    #[must_use]
    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    #[must_use]
    pub fn stats(&self) -> ProfileStats {
        let author = self.user.as_ref().map(|u| u.id.as_str());
        ProfileStats {
            communities: self.joined_communities().len(),
            posts: self.posts.iter().filter(|p| Some(p.author_id.as_str()) == author).count(),
            ideas: self.ideas.len(),
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Prepend a locally authored post and return it.
    pub fn create_post(&mut self, draft: PostDraft, now: OffsetDateTime) -> Post {
        let (author_id, username) = match &self.user {
            Some(u) => (u.id.clone(), Some(u.username.clone())),
            None => (String::new(), None),
        };
        let post = Post {
            id: Uuid::new_v4().to_string(),
            community_id: draft.community_id,
            author_id,
            username,
            title: draft.title,
            content: draft.content,
            created_at: now,
            replies: 0,
        };
        self.posts.insert(0, post.clone());
        post
    }

    /// Keep a post the backend accepted at the top of the feed.
    pub fn prepend_post(&mut self, post: Post) {
        self.posts.retain(|p| p.id != post.id);
        self.posts.insert(0, post);
    }

    /// Create a community locally; the creator is its first member.
    pub fn create_community(&mut self, draft: CommunityDraft, now: OffsetDateTime) -> Community {
        let community = Community {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            topic: draft.topic,
            member_count: 1,
            is_joined: true,
            created_at: Some(now),
        };
        self.communities.insert(0, community.clone());
        community
    }

    /// Prepend a generated idea as `pending` and return it.
    pub fn save_idea(&mut self, draft: &IdeaDraft, now: OffsetDateTime) -> AiIdea {
        let idea = AiIdea {
            id: Uuid::new_v4().to_string(),
            author_id: self.user.as_ref().map(|u| u.id.clone()).unwrap_or_default(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            target_market: draft.target_market.clone(),
            features: draft.features.clone(),
            challenges: draft.challenges.clone(),
            next_steps: draft.next_steps.clone(),
            validation_status: ValidationStatus::Pending,
            created_at: now,
        };
        self.ideas.insert(0, idea.clone());
        idea
    }

    /// Insert or replace a single community (e.g. after create or detail fetch).
    pub fn upsert_community(&mut self, community: Community) {
        match self.community_mut(&community.id) {
            Some(existing) => {
                let joined = existing.is_joined || community.is_joined;
                *existing = Community { is_joined: joined, ..community };
            }
            None => self.communities.insert(0, community),
        }
    }

    pub fn replace_ideas(&mut self, ideas: Vec<AiIdea>) {
        self.ideas = ideas;
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Apply a profile edit to the local user; no-op without a user.
    pub fn update_profile(&mut self, update: &ProfileUpdate) {
        let Some(user) = self.user.as_mut() else {
            return;
        };
        if let Some(username) = &update.username {
            user.username.clone_from(username);
        }
        if let Some(email) = &update.email {
            user.email.clone_from(email);
        }
        if let Some(bio) = &update.bio {
            user.bio.clone_from(bio);
        }
        if let Some(interests) = &update.interests {
            user.interests.clone_from(interests);
        }
    }

    /// Drop everything held for the session.
    pub fn teardown(&mut self) {
        *self = Self::default();
    }
}

fn seed_community(id: &str, name: &str, description: &str, topic: &str, members: u32, joined: bool) -> Community {
    Community {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        topic: topic.to_owned(),
        member_count: members,
        is_joined: joined,
        created_at: None,
    }
}
