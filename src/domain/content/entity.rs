// src/domain/content/entity.rs
use crate::domain::content::value_objects::{ContentBody, ContentItemId, ContentTitle};
use chrono::{DateTime, Utc};

/// The canonical, currently-live version of a piece of long-form content.
/// `body` is only ever mutated through the mutation repository together
/// with a ledger entry; nothing else writes it.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: ContentItemId,
    pub title: ContentTitle,
    pub body: ContentBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn set_body(&mut self, body: ContentBody, now: DateTime<Utc>) {
        self.body = body;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub title: ContentTitle,
    pub body: ContentBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
