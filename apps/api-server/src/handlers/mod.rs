//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod share;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_published))
                    .route("", web::post().to(posts::create))
                    .route("/mine", web::get().to(posts::list_mine))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}/publish", web::post().to(posts::publish))
                    .route("/{id}/comments", web::post().to(comments::create))
                    .route("/{id}/share", web::post().to(share::share))
                    .route(
                        "/{year}/{month}/{day}/{slug}",
                        web::get().to(posts::detail),
                    )
                    .route(
                        "/{year}/{month}/{day}/{slug}/comments",
                        web::get().to(comments::list),
                    ),
            ),
    );
}
