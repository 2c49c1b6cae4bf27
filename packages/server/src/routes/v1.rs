use axum::extract::DefaultBodyLimit;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/contents", content_routes())
        .nest("/categories", category_routes())
        .nest("/tags", tag_routes())
        .nest("/comments", comment_routes())
        .nest("/media", media_routes(config))
        .nest("/users", user_routes(config))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn content_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::content::list_contents,
            handlers::content::create_content
        ))
        .routes(routes!(handlers::content::list_published))
        .routes(routes!(handlers::content::list_mine))
        .routes(routes!(handlers::content::get_by_slug))
        .routes(routes!(
            handlers::content::update_content,
            handlers::content::delete_content
        ))
        .routes(routes!(handlers::content::list_by_category))
        .routes(routes!(handlers::content::list_by_tag))
        .routes(routes!(handlers::content::list_by_author))
        .routes(routes!(
            handlers::comment::list_comments,
            handlers::comment::create_comment
        ))
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::category::list_categories,
            handlers::category::create_category
        ))
        .routes(routes!(
            handlers::category::get_category,
            handlers::category::update_category,
            handlers::category::delete_category
        ))
}

fn tag_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::tag::list_tags, handlers::tag::create_tag))
        .routes(routes!(handlers::tag::delete_tag))
}

fn comment_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::comment::update_comment_status))
        .routes(routes!(handlers::comment::delete_comment))
}

fn media_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::media::upload_media))
        .routes(routes!(handlers::media::list_my_uploads))
        .routes(routes!(handlers::media::get_media_info))
        .routes(routes!(
            handlers::media::get_media_file,
            handlers::media::delete_media
        ))
        .layer(DefaultBodyLimit::max(config.media.body_limit()))
}

fn user_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::avatar::upload_avatar,
            handlers::avatar::get_avatar,
            handlers::avatar::delete_avatar
        ))
        .routes(routes!(handlers::avatar::get_avatar_file))
        .layer(DefaultBodyLimit::max(config.avatar.body_limit()))
}
