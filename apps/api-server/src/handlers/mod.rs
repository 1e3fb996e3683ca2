//! HTTP handlers and route configuration.

mod account;
mod auth;
mod health;
mod posts;

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
            // Account management (authenticated)
            .service(
                web::scope("/account")
                    .route("/profile", web::patch().to(account::update_profile))
                    .route("/password", web::put().to(account::change_password))
                    .route("", web::delete().to(account::delete_account)),
            )
            // The owner's own posts, all statuses (authenticated)
            .service(web::scope("/manage").route("/posts", web::get().to(posts::manage_list)))
            // Post routes; the transition routes must be registered before
            // the bare `{...}` matchers
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}/publish", web::post().to(posts::publish))
                    .route("/{id}/unpublish", web::post().to(posts::unpublish))
                    .route("/{id}/archive", web::post().to(posts::archive))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{slug_or_id}", web::get().to(posts::get)),
            ),
    );
}
