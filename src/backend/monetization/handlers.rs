//! Monetization HTTP Handlers
//!
//! Earnings are simulated bookkeeping; nothing here touches a chain or a
//! payment provider.

use axum::{extract::State, Json};

use super::db;
use crate::backend::auth::users::set_total_nft_earnings;
use crate::backend::error::{ApiJson, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::store::Store;
use crate::shared::social::{Monetization, UpdateMonetizationRequest};

/// `GET /monetization`
pub async fn get_monetization(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Monetization>, BackendError> {
    let record = db::get_monetization(&store, &auth.username)
        .await?
        .unwrap_or_else(|| Monetization::empty(&auth.username));
    Ok(Json(record))
}

/// `POST /monetization/update`
pub async fn update_monetization(
    State(store): State<Store>,
    AuthUser(auth): AuthUser,
    ApiJson(request): ApiJson<UpdateMonetizationRequest>,
) -> Result<Json<Monetization>, BackendError> {
    request.validate()?;

    let record = Monetization {
        username: auth.username.clone(),
        total_earnings: request.total(),
        ad_earnings: request.ad_earnings,
        nft_earnings: request.nft_earnings,
    };
    db::upsert_monetization(&store, &record).await?;
    set_total_nft_earnings(&store, &auth.username, record.nft_earnings).await?;

    tracing::debug!("Updated earnings of {}", auth.username);
    Ok(Json(record))
}
