//! Community Post Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Community feed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post ID.
    pub id: Uuid,
    /// Author's user ID.
    pub author_id: Uuid,
    /// Post body.
    pub content: String,
    /// When the post was published.
    pub created_at: DateTime<Utc>,
}
