/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Users
 * - `GET /users` - List users
 * - `POST /users` - Create a user
 * - `GET /users/{id}` - Get a user
 * - `PUT|PATCH /users/{id}` - Update a user
 * - `DELETE /users/{id}` - Delete a user
 *
 * ## Authentication
 * - `POST /login` - Log in, sets the auth cookies and the session
 * - `POST /logout` - Clear the auth cookies
 * - `GET /profile` - The logged-in user (requires authentication)
 */

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::backend::auth::{get_profile, login, logout};
use crate::backend::middleware::require_auth;
use crate::backend::server::state::AppState;
use crate::backend::users::{create_user, delete_user, get_user, list_users, update_user};

/// Add the user CRUD routes
pub fn configure_user_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
}

/// Add the login, logout and profile routes
///
/// `/profile` is wrapped in the auth guard; the other two are public.
pub fn configure_auth_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/profile", get(get_profile))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth));

    router
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(protected)
}
