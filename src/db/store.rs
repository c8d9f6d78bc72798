//! Document store for CRUD operations.
//!
//! Destinations are stored as whole documents: the embedded comment
//! sequence lives in a JSON column and is written back in one piece.
//! Writes are last-write-wins; there is no version tracking.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Comment, CommentAuthor, CreateDestinationRequest, CreatePartnerRequest, Destination, Partner,
    UpdateDestinationRequest, UpdatePartnerRequest, User,
};

/// Document store for all data operations.
#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== DESTINATION OPERATIONS ====================

    /// List all destinations.
    pub async fn list_destinations(&self) -> Result<Vec<Destination>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, description, image, featured, comments, created_at, updated_at FROM destinations ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(destination_from_row).collect()
    }

    /// Get a destination by ID.
    pub async fn get_destination(&self, id: &str) -> Result<Option<Destination>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, description, image, featured, comments, created_at, updated_at FROM destinations WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(destination_from_row).transpose()
    }

    /// Create a new destination with an empty comment sequence.
    pub async fn create_destination(
        &self,
        request: &CreateDestinationRequest,
    ) -> Result<Destination, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO destinations (id, name, description, image, featured, comments, created_at, updated_at) VALUES (?, ?, ?, ?, ?, '[]', ?, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.image)
        .bind(request.featured as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Destination {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            image: request.image.clone(),
            featured: request.featured,
            comments: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a destination's own fields.
    ///
    /// The comments column is left untouched so comment writes and field
    /// updates do not clobber each other.
    pub async fn update_destination(
        &self,
        id: &str,
        request: &UpdateDestinationRequest,
    ) -> Result<Destination, AppError> {
        let existing = self
            .get_destination(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Destination {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let description = request.description.as_ref().unwrap_or(&existing.description);
        let image = request.image.as_ref().unwrap_or(&existing.image);
        let featured = request.featured.unwrap_or(existing.featured);

        let result = sqlx::query(
            "UPDATE destinations SET name = ?, description = ?, image = ?, featured = ?, updated_at = ? WHERE id = ?"
        )
        .bind(name)
        .bind(description)
        .bind(image)
        .bind(featured as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Destination {} not found", id)));
        }

        Ok(Destination {
            id: id.to_string(),
            name: name.clone(),
            description: description.clone(),
            image: image.clone(),
            featured,
            comments: existing.comments,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Persist a whole destination document, comments included.
    ///
    /// Comment authors are normalized back to raw user ID references
    /// before writing; the comments column never stores resolved user
    /// records. Refreshes the document's `updated_at` in place.
    pub async fn save_destination(&self, destination: &mut Destination) -> Result<(), AppError> {
        for comment in &mut destination.comments {
            if let CommentAuthor::Resolved(user) = &comment.author {
                comment.author = CommentAuthor::Id(user.id.clone());
            }
        }
        destination.updated_at = Utc::now().to_rfc3339();

        let comments_json = serde_json::to_string(&destination.comments)?;

        let result = sqlx::query(
            "UPDATE destinations SET name = ?, description = ?, image = ?, featured = ?, comments = ?, updated_at = ? WHERE id = ?"
        )
        .bind(&destination.name)
        .bind(&destination.description)
        .bind(&destination.image)
        .bind(destination.featured as i32)
        .bind(&comments_json)
        .bind(&destination.updated_at)
        .bind(&destination.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Destination {} not found",
                destination.id
            )));
        }

        Ok(())
    }

    /// Delete a destination.
    pub async fn delete_destination(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Destination {} not found", id)));
        }

        Ok(())
    }

    /// Delete all destinations, returning how many rows went away.
    pub async fn delete_all_destinations(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM destinations")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ==================== AUTHOR POPULATION ====================

    /// Resolve comment author references into full user records.
    ///
    /// Each distinct author is fetched once. References to users that no
    /// longer exist are left as raw IDs.
    pub async fn populate_comment_authors(
        &self,
        comments: &mut [Comment],
    ) -> Result<(), AppError> {
        let mut authors: HashMap<String, Option<User>> = HashMap::new();

        for comment in comments.iter_mut() {
            let author_id = comment.author.user_id().to_string();
            let resolved = match authors.get(&author_id) {
                Some(cached) => cached.clone(),
                None => {
                    let user = self.get_user(&author_id).await?;
                    authors.insert(author_id, user.clone());
                    user
                }
            };
            if let Some(user) = resolved {
                comment.author = CommentAuthor::Resolved(user);
            }
        }

        Ok(())
    }

    /// Resolve authors for a single destination's comments.
    pub async fn populate_destination(
        &self,
        destination: &mut Destination,
    ) -> Result<(), AppError> {
        self.populate_comment_authors(&mut destination.comments)
            .await
    }

    /// Resolve authors across a list of destinations.
    pub async fn populate_destinations(
        &self,
        destinations: &mut [Destination],
    ) -> Result<(), AppError> {
        for destination in destinations.iter_mut() {
            self.populate_comment_authors(&mut destination.comments)
                .await?;
        }
        Ok(())
    }

    // ==================== PARTNER OPERATIONS ====================

    /// List all partners.
    pub async fn list_partners(&self) -> Result<Vec<Partner>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, image, featured, description, created_at, updated_at FROM partners ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(partner_from_row).collect())
    }

    /// Get a partner by ID.
    pub async fn get_partner(&self, id: &str) -> Result<Option<Partner>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, image, featured, description, created_at, updated_at FROM partners WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(partner_from_row))
    }

    /// Create a new partner.
    pub async fn create_partner(
        &self,
        request: &CreatePartnerRequest,
    ) -> Result<Partner, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO partners (id, name, image, featured, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.image)
        .bind(request.featured as i32)
        .bind(&request.description)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Partner {
            id,
            name: request.name.clone(),
            image: request.image.clone(),
            featured: request.featured,
            description: request.description.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a partner.
    pub async fn update_partner(
        &self,
        id: &str,
        request: &UpdatePartnerRequest,
    ) -> Result<Partner, AppError> {
        let existing = self
            .get_partner(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Partner {} not found", id)))?;

        let now = Utc::now().to_rfc3339();

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let image = request.image.as_ref().unwrap_or(&existing.image);
        let featured = request.featured.unwrap_or(existing.featured);
        let description = request.description.as_ref().unwrap_or(&existing.description);

        let result = sqlx::query(
            "UPDATE partners SET name = ?, image = ?, featured = ?, description = ?, updated_at = ? WHERE id = ?"
        )
        .bind(name)
        .bind(image)
        .bind(featured as i32)
        .bind(description)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Partner {} not found", id)));
        }

        Ok(Partner {
            id: id.to_string(),
            name: name.clone(),
            image: image.clone(),
            featured,
            description: description.clone(),
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a partner.
    pub async fn delete_partner(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM partners WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Partner {} not found", id)));
        }

        Ok(())
    }

    /// Delete all partners, returning how many rows went away.
    pub async fn delete_all_partners(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM partners")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ==================== USER OPERATIONS ====================

    /// Create a new user with the given access token.
    pub async fn create_user(
        &self,
        username: &str,
        token: &str,
        admin: bool,
    ) -> Result<User, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (id, username, token, admin, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(username)
        .bind(token)
        .bind(admin as i32)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id,
            username: username.to_string(),
            admin,
            created_at: now,
        })
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, username, admin, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Look up the user owning the given access token.
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, username, admin, created_at FROM users WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Ensure the bootstrap admin account exists and carries the
    /// configured token. Creates it on first startup, rotates the token
    /// on later ones.
    pub async fn ensure_admin_user(&self, token: &str) -> Result<User, AppError> {
        let row = sqlx::query(
            "SELECT id, username, admin, created_at FROM users WHERE username = 'admin'",
        )
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let user = user_from_row(&row);
                sqlx::query("UPDATE users SET token = ?, admin = 1 WHERE id = ?")
                    .bind(token)
                    .bind(&user.id)
                    .execute(&self.pool)
                    .await?;
                Ok(User {
                    admin: true,
                    ..user
                })
            }
            None => self.create_user("admin", token, true).await,
        }
    }
}

// Helper functions for row conversion

fn destination_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Destination, AppError> {
    let featured: i32 = row.get("featured");
    let comments_json: String = row.get("comments");
    let comments: Vec<Comment> = serde_json::from_str(&comments_json)?;

    Ok(Destination {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        image: row.get("image"),
        featured: featured != 0,
        comments,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn partner_from_row(row: &sqlx::sqlite::SqliteRow) -> Partner {
    let featured: i32 = row.get("featured");
    Partner {
        id: row.get("id"),
        name: row.get("name"),
        image: row.get("image"),
        featured: featured != 0,
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    let admin: i32 = row.get("admin");
    User {
        id: row.get("id"),
        username: row.get("username"),
        admin: admin != 0,
        created_at: row.get("created_at"),
    }
}
