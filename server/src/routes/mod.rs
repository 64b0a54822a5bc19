//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API under `/api` plus a `/healthz` check, and
//! [`leptos_app`] stitches the Leptos SSR web client onto the same router.
//! Handlers authenticate with [`auth::AuthUser`], open an RLS-scoped
//! transaction for the caller, delegate to a service and commit.

pub mod ai;
pub mod auth;
pub mod ingredients;
pub mod meal_plans;
pub mod recipes;
pub mod shopping;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, patch, post};
use tower_http::compression::CompressionLayer;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::db::{self, UserTx};
use crate::error::ApiError;
use crate::services::store::StoreError;
use crate::state::AppState;

/// JSON API router without the web client.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_allow_origin.as_deref());

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/dashboard", get(ingredients::dashboard))
        .route("/api/ingredients", get(ingredients::list).post(ingredients::create))
        .route("/api/ingredients/expiring", get(ingredients::expiring))
        .route(
            "/api/ingredients/{id}",
            get(ingredients::get_one)
                .patch(ingredients::update)
                .delete(ingredients::delete),
        )
        .route("/api/recipes", get(recipes::list).post(recipes::create))
        .route("/api/recipes/{id}", get(recipes::get_one).delete(recipes::delete))
        .route("/api/meal-plans", get(meal_plans::list).post(meal_plans::create))
        .route("/api/meal-plans/{id}", axum::routing::delete(meal_plans::delete))
        .route("/api/shopping-list", get(shopping::list).post(shopping::create))
        .route("/api/shopping-list/{id}", patch(shopping::update).delete(shopping::delete))
        .route("/api/shopping-list/from-recipe/{recipe_id}", post(shopping::from_recipe))
        .route("/api/ai/recipes", post(ai::recipes))
        .route("/api/ai/meal-plan", post(ai::meal_plan))
        .route("/api/ai/nutrition", post(ai::nutrition))
        .route("/api/ai/price", post(ai::price))
        .route("/api/ai/substitutes", post(ai::substitutes))
        .route("/api/ai/cooking-tip", post(ai::cooking_tip))
        .route(
            "/api/ai/recognize",
            post(ai::recognize).layer(DefaultBodyLimit::max(ai::RECOGNIZE_BODY_LIMIT)),
        )
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes plus the server-rendered web client and its `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[package.metadata.leptos]` section or `LEPTOS_*` variables).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // WASM, JS and CSS bundles built by cargo-leptos.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(app(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

/// CORS for the configured origin, or any origin when unset or unparsable.
pub(crate) fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => layer.allow_origin(value),
        Some(Err(_)) => {
            tracing::warn!(origin = ?origin, "invalid CORS_ALLOW_ORIGIN; allowing any origin");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// TRANSACTION HELPERS
// =============================================================================

/// Open a transaction that RLS scopes to `user_id`.
pub(crate) async fn user_tx(state: &AppState, user_id: Uuid) -> Result<UserTx, ApiError> {
    db::begin_for_user(&state.pool, user_id)
        .await
        .map_err(|e| StoreError::from(e).into())
}

pub(crate) async fn commit(tx: UserTx) -> Result<(), ApiError> {
    tx.commit().await.map_err(|e| StoreError::from(e).into())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
