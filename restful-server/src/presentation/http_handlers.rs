use crate::application::{AuthService, CategoryService, PostService, UserService};
use crate::domain::category::CategoryForm;
use crate::domain::post::PostForm;
use crate::domain::user::{UserForm, UserResponse};
use crate::domain::DomainError;
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type ApiResult = Result<HttpResponse, DomainError>;

// Ответ с токеном
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// Пагинация
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn created_at(req: &HttpRequest, id: i64, body: impl Serialize) -> HttpResponse {
    let location = format!("{}/{}", req.path().trim_end_matches('/'), id);
    HttpResponse::Created()
        .insert_header(("Location", location))
        .json(body)
}

fn deleted(id: i64) -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header(("Entity", id.to_string()))
        .finish()
}

/// Decodes a urlencoded body inside the handler, for routes whose ownership
/// check must precede any judgement of the payload.
async fn read_form<T>(req: &HttpRequest, payload: web::Payload) -> Result<T, DomainError>
where
    T: DeserializeOwned + 'static,
{
    web::Form::<T>::from_request(req, &mut payload.into_inner())
        .await
        .map(web::Form::into_inner)
        .map_err(|e| {
            tracing::debug!("Rejected form body: {}", e);
            DomainError::BadRequest("Invalid form body".to_string())
        })
}

pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json("Welcome to this API")
}

// ============== Auth Handlers ==============

pub async fn register(
    auth_service: web::Data<Arc<AuthService>>,
    form: web::Form<UserForm>,
) -> ApiResult {
    let (token, user) = auth_service.register(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(AuthResponse { token, user }))
}

pub async fn login(auth_service: web::Data<Arc<AuthService>>, form: web::Form<UserForm>) -> ApiResult {
    let (token, user) = auth_service.login(form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AuthResponse { token, user }))
}

// ============== User Handlers ==============

pub async fn create_user(
    req: HttpRequest,
    user_service: web::Data<Arc<UserService>>,
    form: web::Form<UserForm>,
) -> ApiResult {
    let user = user_service.create_user(form.into_inner()).await?;
    Ok(created_at(&req, user.id, user))
}

pub async fn list_users(
    user_service: web::Data<Arc<UserService>>,
    query: web::Query<PaginationQuery>,
) -> ApiResult {
    let users = user_service.list_users(query.limit, query.offset).await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user(user_service: web::Data<Arc<UserService>>, path: web::Path<i64>) -> ApiResult {
    let user = user_service.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_user(
    req: HttpRequest,
    auth: AuthenticatedUser,
    user_service: web::Data<Arc<UserService>>,
    path: web::Path<i64>,
    payload: web::Payload,
) -> ApiResult {
    let user_id = path.into_inner();

    tracing::info!("Updating user id={} for user_id={}", user_id, auth.user_id);

    user_service.ensure_self(user_id, auth.user_id)?;
    let form = read_form::<UserForm>(&req, payload).await?;

    let user = user_service
        .update_user(user_id, auth.user_id, form)
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn delete_user(
    auth: AuthenticatedUser,
    user_service: web::Data<Arc<UserService>>,
    path: web::Path<i64>,
) -> ApiResult {
    let user_id = path.into_inner();

    tracing::info!("Deleting user id={} for user_id={}", user_id, auth.user_id);

    user_service.delete_user(user_id, auth.user_id).await?;
    Ok(deleted(user_id))
}

// ============== Category Handlers ==============

pub async fn create_category(
    req: HttpRequest,
    auth: AuthenticatedUser,
    category_service: web::Data<Arc<CategoryService>>,
    form: web::Form<CategoryForm>,
) -> ApiResult {
    tracing::info!("Creating category for user_id={}", auth.user_id);

    let category = category_service.create_category(form.into_inner()).await?;
    Ok(created_at(&req, category.id, category))
}

pub async fn list_categories(
    category_service: web::Data<Arc<CategoryService>>,
    query: web::Query<PaginationQuery>,
) -> ApiResult {
    let categories = category_service
        .list_categories(query.limit, query.offset)
        .await?;
    Ok(HttpResponse::Ok().json(categories))
}

pub async fn get_category(
    category_service: web::Data<Arc<CategoryService>>,
    path: web::Path<i64>,
) -> ApiResult {
    let category = category_service.get_category(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

pub async fn update_category(
    auth: AuthenticatedUser,
    category_service: web::Data<Arc<CategoryService>>,
    path: web::Path<i64>,
    form: web::Form<CategoryForm>,
) -> ApiResult {
    let category_id = path.into_inner();

    tracing::info!(
        "Updating category id={} for user_id={}",
        category_id,
        auth.user_id
    );

    let category = category_service
        .update_category(category_id, form.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

pub async fn delete_category(
    auth: AuthenticatedUser,
    category_service: web::Data<Arc<CategoryService>>,
    path: web::Path<i64>,
) -> ApiResult {
    let category_id = path.into_inner();

    tracing::info!(
        "Deleting category id={} for user_id={}",
        category_id,
        auth.user_id
    );

    category_service.delete_category(category_id).await?;
    Ok(deleted(category_id))
}

// ============== Post Handlers ==============

pub async fn create_post(
    req: HttpRequest,
    auth: AuthenticatedUser,
    post_service: web::Data<Arc<PostService>>,
    form: web::Form<PostForm>,
) -> ApiResult {
    tracing::info!("Creating post for user_id={}", auth.user_id);

    let post = post_service
        .create_post(auth.user_id, form.into_inner())
        .await?;
    Ok(created_at(&req, post.id, post))
}

pub async fn list_posts(
    post_service: web::Data<Arc<PostService>>,
    query: web::Query<PaginationQuery>,
) -> ApiResult {
    tracing::info!(
        "Listing posts with limit={:?}, offset={:?}",
        query.limit,
        query.offset
    );

    let posts = post_service.list_posts(query.limit, query.offset).await?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get_post(post_service: web::Data<Arc<PostService>>, path: web::Path<i64>) -> ApiResult {
    let post = post_service.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn update_post(
    req: HttpRequest,
    auth: AuthenticatedUser,
    post_service: web::Data<Arc<PostService>>,
    path: web::Path<i64>,
    payload: web::Payload,
) -> ApiResult {
    let post_id = path.into_inner();

    tracing::info!("Updating post id={} for user_id={}", post_id, auth.user_id);

    let post = post_service.owned_post(post_id, auth.user_id).await?;
    let form = read_form::<PostForm>(&req, payload).await?;

    let post = post_service.update_post(post, form).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    auth: AuthenticatedUser,
    post_service: web::Data<Arc<PostService>>,
    path: web::Path<i64>,
) -> ApiResult {
    let post_id = path.into_inner();

    tracing::info!("Deleting post id={} for user_id={}", post_id, auth.user_id);

    post_service.delete_post(post_id, auth.user_id).await?;
    Ok(deleted(post_id))
}
