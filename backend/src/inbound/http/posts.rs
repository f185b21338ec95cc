//! Post HTTP handlers.
//!
//! ```text
//! GET    /posts
//! GET    /posts/{post_id}
//! POST   /posts
//! PATCH  /posts/{post_id}
//! DELETE /posts/{post_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::PostId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::posts_dto::{PostRequest, PostResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    TITLE, USER_ID, parse_post_id, parse_user_id, require,
};

/// List every post with its author.
#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "All posts", body = [PostResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let posts = state.posts_query.list_posts().await?;
    Ok(web::Json(posts.iter().map(PostResponse::from).collect()))
}

/// Fetch one post.
#[utoipa::path(
    get,
    path = "/posts/{post_id}",
    params(("post_id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "Post or author not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{post_id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PostResponse>> {
    let post_id = parse_post_id(path.into_inner())?;
    let post = state.posts_query.get_post(post_id).await?;
    Ok(web::Json(PostResponse::from(&post)))
}

/// Create a post.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Author not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let PostRequest { title, user_id } = payload.into_inner();
    let title = require(title, TITLE)?;
    let user_id = parse_user_id(require(user_id, USER_ID)?)?;

    let post = state.posts.create_post(user_id, title).await?;
    Ok(HttpResponse::Created().json(PostResponse::from(&post)))
}

/// Retitle a post. Only its author may do so.
#[utoipa::path(
    patch,
    path = "/posts/{post_id}",
    params(("post_id" = i64, Path, description = "Post identifier")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Caller is not the author", body = ErrorSchema),
        (status = 404, description = "Post or author not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[patch("/posts/{post_id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PostRequest>,
) -> ApiResult<web::Json<PostResponse>> {
    let PostRequest { title, user_id } = payload.into_inner();
    let title = require(title, TITLE)?;
    let user_id = parse_user_id(require(user_id, USER_ID)?)?;
    let post_id = parse_post_id(path.into_inner())?;

    let post = state.posts.update_post(post_id, title, user_id).await?;
    Ok(web::Json(PostResponse::from(&post)))
}

/// Delete a post. Succeeds whether or not the post exists.
#[utoipa::path(
    delete,
    path = "/posts/{post_id}",
    params(("post_id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 204, description = "Post removed or already absent"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{post_id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    if let Ok(post_id) = PostId::new(path.into_inner()) {
        state.posts.delete_post(post_id).await?;
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
