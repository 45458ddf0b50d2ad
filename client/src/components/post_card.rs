//! Summary card for a post in a feed.

use leptos::prelude::*;
use social::format::{relative_time, truncate_text};
use social::model::Post;

use crate::util::clock;

const EXCERPT_LEN: usize = 240;

#[component]
pub fn PostCard(post: Post, #[prop(optional, into)] community_name: Option<String>) -> impl IntoView {
    let href = format!("/posts/{}", post.id);
    let author = post.author_label().to_owned();
    let initial = post.author_initial().to_string();
    let when = relative_time(post.created_at, clock::now());
    let replies = match post.replies {
        1 => "1 reply".to_owned(),
        n => format!("{n} replies"),
    };

    view! {
        <a class="post-card" href=href>
            <span class="avatar avatar--small">{initial}</span>
            <div class="post-card__body">
                <div class="post-card__meta">
                    <span class="post-card__author">{author}</span>
                    <span class="post-card__time">{when}</span>
                    {community_name.map(|name| view! { <span class="post-card__community">"in " {name}</span> })}
                </div>
                <h3 class="post-card__title">{post.title}</h3>
                <p class="post-card__excerpt">{truncate_text(&post.content, EXCERPT_LEN)}</p>
                <span class="post-card__replies">{replies}</span>
            </div>
        </a>
    }
}
