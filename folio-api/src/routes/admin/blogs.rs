/// Blog post management
///
/// # Endpoints
///
/// - `POST /add/blog` - Form `title`, `content`, `tags`, `date`, file `cover_file`
/// - `POST /edit/blog/:id`
/// - `GET|POST /delete/blog/:id`
///
/// All redirect to `/dashboard?tab=blog`.

use axum::{
    extract::{Path, State},
    response::Response,
};
use folio_shared::{
    models::blog::{Blog, CreateBlog, UpdateBlog},
    storage::upload::{store_upload, UploadFolder},
};
use tracing::info;

use super::{back_to, back_to_with_flash, not_found, Tab};
use crate::{app::AppState, error::ApiResult, forms::AdminForm};

/// Publish a post
pub async fn add_blog(State(state): State<AppState>, form: AdminForm) -> ApiResult<Response> {
    let title = form.required("title")?;
    let content = form.required("content")?;
    let tags = form.required("tags")?;
    let date = form.required("date")?;

    let cover_image =
        store_upload(state.storage.as_ref(), form.file("cover_file"), UploadFolder::Blog).await;

    let blog = Blog::create(
        &state.db,
        CreateBlog {
            title,
            content,
            tags,
            date,
            cover_image,
        },
    )
    .await?;

    info!(blog_id = blog.id, "Blog post added");
    Ok(back_to(Tab::Blog))
}

/// Edit a post
pub async fn edit_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: AdminForm,
) -> ApiResult<Response> {
    Blog::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| not_found("Blog", id))?;

    let cover_image =
        store_upload(state.storage.as_ref(), form.file("cover_file"), UploadFolder::Blog).await;

    let update = UpdateBlog {
        title: form.text("title"),
        content: form.text("content"),
        tags: form.text("tags"),
        date: form.text("date"),
        cover_image,
    };

    Blog::update(&state.db, id, update)
        .await?
        .ok_or_else(|| not_found("Blog", id))?;

    info!(blog_id = id, "Blog post updated");
    Ok(back_to_with_flash(&state, Tab::Blog, "Blog updated successfully!"))
}

/// Delete a post
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let removed = Blog::delete(&state.db, id).await?;

    info!(blog_id = id, removed, "Blog post deleted");
    Ok(back_to(Tab::Blog))
}
