//! Embedded comment management for destination documents.
//!
//! Comments live inside their destination document rather than in a table
//! of their own. Every mutation loads the document, edits the comment
//! sequence in memory, and writes the whole document back, so a write
//! that loses the race simply overwrites the earlier one. Append order is
//! preserved across updates and removals.

use chrono::Utc;

use crate::db::DocumentStore;
use crate::errors::AppError;
use crate::models::{
    Comment, CommentAuthor, CreateCommentRequest, Destination, UpdateCommentRequest, User,
};

/// Manages the comment sequence embedded in destination documents.
#[derive(Clone)]
pub struct CommentManager {
    store: DocumentStore,
}

impl CommentManager {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Append a comment to a destination.
    ///
    /// The comment's author is always the caller; any author supplied in
    /// the payload was already discarded during deserialization. Returns
    /// the updated destination with raw author references.
    pub async fn append(
        &self,
        destination_id: &str,
        author: &User,
        request: &CreateCommentRequest,
    ) -> Result<Destination, AppError> {
        let mut destination = self.fetch(destination_id).await?;

        validate_rating(request.rating)?;
        validate_text(&request.text)?;

        let now = Utc::now().to_rfc3339();

        destination.comments.push(Comment {
            id: uuid::Uuid::new_v4().to_string(),
            rating: request.rating,
            text: request.text.clone(),
            author: CommentAuthor::Id(author.id.clone()),
            created_at: now.clone(),
            updated_at: now,
        });

        self.store.save_destination(&mut destination).await?;
        Ok(destination)
    }

    /// All comments of a destination, authors resolved.
    pub async fn get_all(&self, destination_id: &str) -> Result<Vec<Comment>, AppError> {
        let mut destination = self.fetch(destination_id).await?;
        self.store
            .populate_comment_authors(&mut destination.comments)
            .await?;
        Ok(destination.comments)
    }

    /// A single comment, author resolved.
    pub async fn get_one(
        &self,
        destination_id: &str,
        comment_id: &str,
    ) -> Result<Comment, AppError> {
        let mut destination = self.fetch(destination_id).await?;
        let index = comment_index(&destination, comment_id)?;

        let mut comment = destination.comments.swap_remove(index);
        self.store
            .populate_comment_authors(std::slice::from_mut(&mut comment))
            .await?;
        Ok(comment)
    }

    /// Update a comment's rating and text. Only the author may do this.
    pub async fn update(
        &self,
        destination_id: &str,
        comment_id: &str,
        caller: &User,
        request: &UpdateCommentRequest,
    ) -> Result<Destination, AppError> {
        let mut destination = self.fetch(destination_id).await?;
        let index = comment_index(&destination, comment_id)?;

        let comment = &mut destination.comments[index];
        if comment.author.user_id() != caller.id {
            return Err(AppError::Forbidden(format!(
                "{} is not authorized to update this comment.",
                caller.id
            )));
        }

        if let Some(rating) = request.rating {
            validate_rating(rating)?;
            comment.rating = rating;
        }
        if let Some(text) = &request.text {
            validate_text(text)?;
            comment.text = text.clone();
        }
        comment.updated_at = Utc::now().to_rfc3339();

        self.store.save_destination(&mut destination).await?;
        Ok(destination)
    }

    /// Remove a comment. Only the author may do this; the order of the
    /// remaining comments is preserved.
    pub async fn delete_one(
        &self,
        destination_id: &str,
        comment_id: &str,
        caller: &User,
    ) -> Result<Destination, AppError> {
        let mut destination = self.fetch(destination_id).await?;
        let index = comment_index(&destination, comment_id)?;

        if destination.comments[index].author.user_id() != caller.id {
            return Err(AppError::Forbidden(format!(
                "{} is not authorized to delete this comment.",
                caller.id
            )));
        }

        destination.comments.remove(index);
        self.store.save_destination(&mut destination).await?;
        Ok(destination)
    }

    /// Remove every comment from a destination. The destination's own
    /// fields are untouched.
    pub async fn delete_all(&self, destination_id: &str) -> Result<Destination, AppError> {
        let mut destination = self.fetch(destination_id).await?;
        destination.comments.clear();
        self.store.save_destination(&mut destination).await?;
        Ok(destination)
    }

    async fn fetch(&self, destination_id: &str) -> Result<Destination, AppError> {
        self.store
            .get_destination(destination_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Destination {} not found", destination_id))
            })
    }
}

fn comment_index(destination: &Destination, comment_id: &str) -> Result<usize, AppError> {
    destination
        .comments
        .iter()
        .position(|c| c.id == comment_id)
        .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))
}

fn validate_rating(rating: i32) -> Result<(), AppError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ))
    }
}

fn validate_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Comment text must not be empty".to_string(),
        ));
    }
    Ok(())
}
