/**
 * API Route Tables
 *
 * Routes are split into two tables. [`public_routes`] needs no credential.
 * [`protected_routes`] is wrapped in the bearer-token middleware by the
 * router, so every handler in it can take `AuthUser` or `AdminUser`.
 *
 * A path may appear in both tables only with different methods
 * (`GET /groups` is public, `POST /groups` is protected).
 */

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::backend::admin::handlers as admin;
use crate::backend::auth::{login, register, get_me};
use crate::backend::communities::handlers as communities;
use crate::backend::friends::handlers as friends;
use crate::backend::hangouts::handlers as hangouts;
use crate::backend::lists::handlers as lists;
use crate::backend::messaging::handlers as messaging;
use crate::backend::monetization::handlers as monetization;
use crate::backend::notifications::handlers as notifications;
use crate::backend::posts::handlers as posts;
use crate::backend::server::state::AppState;
use crate::backend::upload::handlers::upload;
use crate::backend::users::handlers as users;
use crate::shared::social::MAX_UPLOAD_BYTES;

/// Slack for multipart boundaries and headers around the file part
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users/{username}", get(users::get_user))
        .route("/search/users", get(users::search_users))
        .route("/explore", get(posts::explore))
        .route("/shorts", get(posts::shorts))
        .route("/posts/{id}", get(posts::get_post))
        .route("/groups", get(communities::list_groups))
        .route("/groups/{id}", get(communities::get_group))
        .route("/pages", get(communities::list_pages))
        .route("/pages/{id}", get(communities::get_page))
}

/// Routes that require an authenticated, non-banned user
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        // Users and the social graph
        .route("/users/{username}/update", put(users::update_user))
        .route("/users/{username}/follow", post(users::follow_user))
        .route("/users/{username}/unfollow", post(users::unfollow_user))
        .route("/users/{username}/block", post(users::block_user))
        .route("/users/{username}/unblock", post(users::unblock_user))
        .route("/users/{username}/pin-post", post(users::pin_post))
        // Posts
        .route("/feed", get(posts::get_feed))
        .route("/posts", post(posts::create_post))
        .route("/posts/live", post(posts::create_live_post))
        .route("/posts/{id}/like", post(posts::like_post))
        .route("/posts/{id}/share", post(posts::share_post))
        .route("/posts/{id}/react", post(posts::react_to_post))
        .route("/posts/{id}/hide", post(posts::hide_post))
        .route("/posts/{id}/comment", post(posts::comment_on_post))
        .route("/posts/{id}/comment/{comment_id}/reply", post(posts::reply_to_comment))
        // Groups and pages
        .route("/groups", post(communities::create_group))
        .route("/groups/{id}/join", post(communities::join_group))
        .route("/groups/{id}/leave", post(communities::leave_group))
        .route("/groups/{id}/posts", post(communities::post_to_group))
        .route("/pages", post(communities::create_page))
        .route("/pages/{id}/follow", post(communities::follow_page))
        .route("/pages/{id}/unfollow", post(communities::unfollow_page))
        .route("/pages/{id}/posts", post(communities::post_to_page))
        // Friend requests
        .route(
            "/friend-requests",
            get(friends::list_friend_requests).post(friends::send_friend_request),
        )
        .route("/friend-requests/{id}/accept", post(friends::accept_friend_request))
        .route("/friend-requests/{id}/reject", post(friends::reject_friend_request))
        // Notifications and messages
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/{id}/read", post(notifications::mark_read))
        .route("/messages", post(messaging::send_message))
        .route("/messages/{username}", get(messaging::get_conversation))
        // Lists, hangouts, monetization
        .route("/lists", get(lists::get_lists).post(lists::create_list))
        .route("/lists/{id}/add", post(lists::add_to_list))
        .route("/hangouts", get(hangouts::list_hangouts).post(hangouts::create_hangout))
        .route("/hangouts/{id}/join", post(hangouts::join_hangout))
        .route("/hangouts/{id}/leave", post(hangouts::leave_hangout))
        .route("/monetization", get(monetization::get_monetization))
        .route("/monetization/update", post(monetization::update_monetization))
        // Administration
        .route("/contact-admin", post(admin::contact_admin))
        .route("/admin/messages", get(admin::admin_messages))
        .route("/admin/deleted-posts", get(admin::deleted_posts))
        .route("/admin/sponsored-posts", post(admin::create_sponsored_post))
        .route("/users/{username}/ban", post(admin::ban_user))
        .route("/users/{username}/unban", post(admin::unban_user))
        .route("/users/{username}/verify", post(admin::verify_user))
        .route("/posts/{id}/delete", post(admin::delete_post))
        // Uploads
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD)),
        )
}
