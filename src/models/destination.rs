//! Destination document model with its embedded comment sequence.

use serde::{Deserialize, Serialize};

use super::User;

/// Author reference inside a comment.
///
/// Stored and persisted as the raw user id; GET routes resolve it to the
/// referenced user's full representation before serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentAuthor {
    Resolved(User),
    Id(String),
}

impl CommentAuthor {
    /// The referenced user id, whether or not the reference has been resolved.
    pub fn user_id(&self) -> &str {
        match self {
            CommentAuthor::Resolved(user) => &user.id,
            CommentAuthor::Id(id) => id,
        }
    }
}

/// A user-authored rating attached to exactly one destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub rating: i32,
    pub text: String,
    pub author: CommentAuthor,
    pub created_at: String,
    pub updated_at: String,
}

/// A travel location owning an ordered sequence of comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub featured: bool,
    pub comments: Vec<Comment>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new destination.
///
/// The comment sequence always starts empty; inline comments are not accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestinationRequest {
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
}

/// Request body for updating an existing destination.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDestinationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
}

/// Request body for appending a comment to a destination.
///
/// Carries no author field: the author is always the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub rating: i32,
    pub text: String,
}

/// Request body for partially updating a comment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_comment(author: CommentAuthor) -> Comment {
        Comment {
            id: "c-1".to_string(),
            rating: 5,
            text: "Great views".to_string(),
            author,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn author_reference_serializes_as_id_string() {
        let comment = sample_comment(CommentAuthor::Id("u-1".to_string()));
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["author"], "u-1");
    }

    #[test]
    fn resolved_author_serializes_as_user_object() {
        let user = User {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            admin: false,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        };
        let comment = sample_comment(CommentAuthor::Resolved(user));
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["author"]["username"], "alice");
        assert_eq!(json["author"]["id"], "u-1");
    }

    #[test]
    fn author_reference_parses_from_stored_json() {
        let comment: Comment = serde_json::from_str(
            r#"{"id":"c-1","rating":4,"text":"ok","author":"u-9",
                "createdAt":"2024-01-01T00:00:00+00:00","updatedAt":"2024-01-01T00:00:00+00:00"}"#,
        )
        .unwrap();
        assert_eq!(comment.author.user_id(), "u-9");
    }

    #[test]
    fn comment_payload_has_no_author_field() {
        let payload: CreateCommentRequest =
            serde_json::from_str(r#"{"rating":5,"text":"Great","author":"intruder"}"#).unwrap();
        assert_eq!(payload.rating, 5);
        assert_eq!(payload.text, "Great");
    }
}
