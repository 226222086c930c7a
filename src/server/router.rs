//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their utoipa annotations
//! collected into a unified OpenAPI document, and Swagger UI is served at
//! `/api/docs` for interactive exploration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with every API endpoint and the
/// Swagger UI documentation mount.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Stanton", description = "Stanton API"), tags(
        (name = controller::health::META_TAG, description = "Service metadata"),
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::admin_users::ADMIN_TAG, description = "Administrative user management"),
        (name = controller::admin_database::ADMIN_DATABASE_TAG, description = "Database diagnostics"),
        (name = controller::members::MEMBERS_TAG, description = "Member directory"),
        (name = controller::blog::BLOG_TAG, description = "Blog feed"),
        (name = controller::items::ITEMS_TAG, description = "Items"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::health::health))
        .routes(routes!(controller::auth::discord_login))
        .routes(routes!(controller::auth::discord_callback))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::me))
        .routes(routes!(controller::auth::user_me))
        .routes(routes!(controller::auth::change_password))
        .routes(routes!(controller::admin_users::list_users))
        .routes(routes!(controller::admin_users::update_user_role))
        .routes(routes!(controller::admin_users::update_user_rank))
        .routes(routes!(controller::admin_users::deactivate_user))
        .routes(routes!(controller::admin_database::database_status))
        .routes(routes!(controller::admin_database::test_connection))
        .routes(routes!(controller::members::list_members))
        .routes(routes!(
            controller::members::get_member,
            controller::members::update_member
        ))
        .routes(routes!(controller::blog::list_posts))
        .routes(routes!(controller::blog::get_post))
        .routes(routes!(
            controller::blog::list_all_posts,
            controller::blog::create_post
        ))
        .routes(routes!(
            controller::blog::update_post,
            controller::blog::delete_post
        ))
        .routes(routes!(
            controller::items::list_items,
            controller::items::create_item
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
