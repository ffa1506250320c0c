//! Forum feed model.
//!
//! The feed is an ordered list of posts, most recent first. User posts are
//! prepended; seed posts keep their relative order beneath them. Comments
//! are append-only and owned by their post.

use crate::error::{Error, Result, require};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author name used when the caller does not identify itself.
pub const DEFAULT_AUTHOR: &str = "You";
/// Avatar used for anonymous posts.
pub const DEFAULT_POST_AVATAR: &str = "https://randomuser.me/api/portraits/lego/1.jpg";
/// Avatar used for anonymous comments.
pub const DEFAULT_COMMENT_AVATAR: &str = "https://randomuser.me/api/portraits/lego/2.jpg";

/// Opaque post identifier, unique within a feed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(CompactString);

impl PostId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(CompactString::new(uuid::Uuid::new_v4().to_string()))
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(CompactString::new(id))
    }
}

/// A comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Display name of the commenter.
    pub author: String,
    /// Avatar image reference.
    pub avatar: String,
    /// Comment body.
    pub text: String,
}

/// A forum post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier.
    pub id: PostId,
    /// Display name of the author.
    pub author: String,
    /// Avatar image reference.
    pub avatar: String,
    /// Display-only timestamp label.
    pub created: String,
    /// Post body.
    pub content: String,
    /// Heart count, never decreases.
    pub likes: u64,
    /// Comments in insertion order.
    pub comments: Vec<Comment>,
}

/// Ordered collection of posts for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Feed {
    posts: Vec<Post>,
}

impl Feed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a feed holding the sample discussion threads.
    pub fn seeded() -> Self {
        Self {
            posts: crate::seed::posts(),
        }
    }

    /// Publish a new post at the top of the feed.
    pub fn create_post(
        &mut self,
        author: impl Into<String>,
        avatar: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<&Post> {
        let content = content.into();
        require("content", &content)?;

        let post = Post {
            id: PostId::generate(),
            author: author.into(),
            avatar: avatar.into(),
            created: chrono::Local::now().format("%H:%M %p").to_string(),
            content,
            likes: 0,
            comments: Vec::new(),
        };
        tracing::debug!("created post {}", post.id);
        self.posts.insert(0, post);
        Ok(&self.posts[0])
    }

    /// Append a comment to the post with the given id.
    pub fn add_comment(
        &mut self,
        id: &PostId,
        author: impl Into<String>,
        avatar: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<&Comment> {
        let text = text.into();
        require("text", &text)?;

        let post = self.get_mut(id)?;
        post.comments.push(Comment {
            author: author.into(),
            avatar: avatar.into(),
            text,
        });
        let last = post.comments.len() - 1;
        Ok(&post.comments[last])
    }

    /// Add one heart to a post and return the new count.
    ///
    /// Every call counts; repeated likes from the same caller are not
    /// de-duplicated.
    pub fn like_post(&mut self, id: &PostId) -> Result<u64> {
        let post = self.get_mut(id)?;
        post.likes = post.likes.saturating_add(1);
        Ok(post.likes)
    }

    /// Posts in current display order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Look up a post by id.
    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the feed has no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn get_mut(&mut self, id: &PostId) -> Result<&mut Post> {
        self.posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| Error::not_found("post", id.as_str()))
    }
}
