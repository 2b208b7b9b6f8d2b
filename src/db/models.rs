//! Database Models - the blog post entity and its row mapping (used by sqlx/serde).

use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

use crate::validation::is_blank;

/// Post tags: clients send either a single string or a list of strings,
/// and get back whatever shape they stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    Single(String),
    List(Vec<String>),
}

impl Tags {
    /// A blank string or an empty list carries no tags.
    pub fn is_blank(&self) -> bool {
        match self {
            Tags::Single(tag) => is_blank(tag),
            Tags::List(tags) => tags.is_empty(),
        }
    }
}

/// Blog post model
///
/// `id` is `None` until the post has been handed to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub tags: Option<Tags>,
}

impl BlogPost {
    /// A post that has not been persisted yet.
    pub fn new(title: String, content: String, tags: Option<Tags>) -> Self {
        Self {
            id: None,
            title,
            content,
            tags,
        }
    }

    /// Overwrite each field for which a non-blank value was supplied.
    ///
    /// Blank strings (see [`is_blank`]) and empty tag lists count as "not
    /// provided", so this can never clear a field. The id is never touched.
    pub fn merge(&mut self, title: Option<String>, content: Option<String>, tags: Option<Tags>) {
        if let Some(title) = title.filter(|t| !is_blank(t)) {
            self.title = title;
        }
        if let Some(content) = content.filter(|c| !is_blank(c)) {
            self.content = content;
        }
        if let Some(tags) = tags.filter(|t| !t.is_blank()) {
            self.tags = Some(tags);
        }
    }
}

/// Row shape of the `blog_posts` table.
#[derive(Debug, FromRow)]
pub struct BlogPostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: Option<Json<Tags>>,
}

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        Self {
            id: Some(row.id),
            title: row.title,
            content: row.content,
            tags: row.tags.map(|Json(tags)| tags),
        }
    }
}
