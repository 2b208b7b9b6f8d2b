/**
 * Blog Routes
 * CRUD API endpoints for blog posts
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::models::{BlogPost, Tags};
use crate::error::ApiError;
use crate::extract::Payload;
use crate::store::BlogPostStore;
use crate::validation;
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for POST and PATCH /blog/posts
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Tags>,
}

impl PostPayload {
    /// Build an unsaved post. `title` and `content` must be present;
    /// blank values are left for validation to report.
    fn into_post(self) -> Result<BlogPost, ApiError> {
        let title = self.title.ok_or(ApiError::MissingParameter("title"))?;
        let content = self.content.ok_or(ApiError::MissingParameter("content"))?;
        Ok(BlogPost::new(title, content, self.tags))
    }
}

/// Request body for PUT /blog/posts
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdatePostPayload {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Tags>,
}

/// Request body for DELETE /blog/posts
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeletePostPayload {
    pub id: Option<i64>,
}

pub const DELETED_MESSAGE: &str = "Successfully deleted post.";

// ============================================================================
// Helpers
// ============================================================================

/// Validate, then write. Nothing reaches the store if validation fails.
async fn save(store: &dyn BlogPostStore, mut post: BlogPost) -> Result<BlogPost, ApiError> {
    let errors = validation::validate(&post);
    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "blog post failed validation");
        return Err(ApiError::Validation(errors));
    }

    store.persist(&mut post).await?;
    Ok(post)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /blog/posts - All posts, ascending by id
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let posts = state.store.find_all().await?;
    tracing::debug!(count = posts.len(), "listed blog posts");
    Ok(Json(posts))
}

/// GET /blog/posts/{id} - Single post
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BlogPost>, ApiError> {
    match state.store.find(id).await? {
        Some(post) => Ok(Json(post)),
        None => {
            tracing::debug!(id, "blog post not found");
            Err(ApiError::PostNotFound)
        }
    }
}

/// POST /blog/posts - Create a post
pub async fn create_post(
    State(state): State<AppState>,
    Payload(payload): Payload<PostPayload>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let post = save(state.store.as_ref(), payload.into_post()?).await?;
    tracing::info!(id = ?post.id, "blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /blog/posts - Update an existing post in place
///
/// Only non-empty fields overwrite the stored values. Responds with
/// 201 Created rather than 200, which existing clients expect.
pub async fn update_post(
    State(state): State<AppState>,
    Payload(payload): Payload<UpdatePostPayload>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let id = payload.id.ok_or(ApiError::MissingIdentifier)?;
    let mut post = state
        .store
        .find(id)
        .await?
        .ok_or(ApiError::MissingIdentifier)?;

    post.merge(payload.title, payload.content, payload.tags);

    let post = save(state.store.as_ref(), post).await?;
    tracing::info!(id, "blog post updated");
    Ok((StatusCode::CREATED, Json(post)))
}

/// PATCH /blog/posts - Create a post
///
/// Despite the verb this never touches an existing record: any id in the
/// body is ignored and a new post is created, exactly like POST. Kept for
/// compatibility with clients that rely on it.
pub async fn patch_post(
    State(state): State<AppState>,
    Payload(payload): Payload<PostPayload>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let post = save(state.store.as_ref(), payload.into_post()?).await?;
    tracing::info!(id = ?post.id, "blog post created via PATCH");
    Ok((StatusCode::CREATED, Json(post)))
}

/// DELETE /blog/posts - Delete a post
pub async fn delete_post(
    State(state): State<AppState>,
    Payload(payload): Payload<DeletePostPayload>,
) -> Result<Json<&'static str>, ApiError> {
    let id = payload.id.ok_or(ApiError::MissingDeleteId)?;
    let post = state
        .store
        .find(id)
        .await?
        .ok_or(ApiError::DeleteTargetNotFound(id))?;

    // A concurrent delete may win between find and remove.
    if !state.store.remove(&post).await? {
        return Err(ApiError::DeleteTargetNotFound(id));
    }

    tracing::info!(id, "blog post deleted");
    Ok(Json(DELETED_MESSAGE))
}
