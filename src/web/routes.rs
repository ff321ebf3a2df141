// src/web/routes.rs
use crate::{
    services::{
        catalog_service::ScholarshipResource,
        content_service::{PageResource, PartnerResource, PostResource, StoryResource},
        taxonomy_service::{CategoryResource, CountryResource, LevelResource, TagResource},
    },
    state::AppState,
    web::{admin_handlers, auth_handlers, crud, mw_admin, mw_auth, public_handlers},
};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Public site -------------------------------------------------------
    let public_routes = Router::new()
        .route("/", get(public_handlers::home))
        .route("/scholarships", get(public_handlers::scholarship_index))
        .route("/scholarships/{slug}", get(public_handlers::scholarship_detail))
        .route("/posts", get(public_handlers::post_index))
        .route("/posts/{slug}", get(public_handlers::post_detail))
        .route("/p/{slug}", get(public_handlers::page_detail))
        .route("/stories", get(public_handlers::story_index))
        .route("/stories/{slug}", get(public_handlers::story_detail))
        .route("/search", get(public_handlers::search))
        .route("/subscribe", post(public_handlers::subscribe));

    // --- Auth (public; /me answers anonymous callers too) -------------------
    let auth_routes = Router::new()
        .route("/login", post(auth_handlers::handle_login))
        .route("/logout", post(auth_handlers::handle_logout))
        .route("/me", get(auth_handlers::current_user));

    // --- User management: login AND admin role -----------------------------
    let user_routes = Router::new()
        .route(
            "/",
            get(admin_handlers::list_users).post(admin_handlers::create_user),
        )
        .route(
            "/{id}",
            put(admin_handlers::update_user).delete(admin_handlers::delete_user),
        )
        .route("/{id}/password", post(admin_handlers::change_password))
        .route_layer(middleware::from_fn(mw_admin::require_admin));

    // --- Admin API: everything below requires a valid session --------------
    let admin_routes = Router::new()
        .nest("/scholarships", crud::resource_router::<ScholarshipResource>())
        .nest("/posts", crud::resource_router::<PostResource>())
        .nest("/countries", crud::resource_router::<CountryResource>())
        .nest("/levels", crud::resource_router::<LevelResource>())
        .nest("/categories", crud::resource_router::<CategoryResource>())
        .nest("/tags", crud::resource_router::<TagResource>())
        .nest("/pages", crud::resource_router::<PageResource>())
        .nest("/partners", crud::resource_router::<PartnerResource>())
        .nest("/stories", crud::resource_router::<StoryResource>())
        .nest("/users", user_routes)
        .route("/subscribers", get(admin_handlers::list_subscribers))
        .route("/subscribers/{id}", delete(admin_handlers::delete_subscriber))
        .route(
            "/settings",
            get(admin_handlers::get_settings).put(admin_handlers::update_settings),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/api/auth", auth_routes)
        .nest("/api/admin", admin_routes)
        .with_state(app_state)
}
