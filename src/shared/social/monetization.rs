//! Simulated earnings bookkeeping

use serde::{Deserialize, Serialize};

use crate::shared::SharedError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Monetization {
    pub username: String,
    pub total_earnings: f64,
    pub ad_earnings: f64,
    pub nft_earnings: f64,
}

impl Monetization {
    /// Record for a user with no earnings yet
    pub fn empty(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            total_earnings: 0.0,
            ad_earnings: 0.0,
            nft_earnings: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMonetizationRequest {
    #[serde(default)]
    pub ad_earnings: f64,
    #[serde(default)]
    pub nft_earnings: f64,
}

impl UpdateMonetizationRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        for (field, value) in [("ad_earnings", self.ad_earnings), ("nft_earnings", self.nft_earnings)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SharedError::validation(field, "Earnings must be a non-negative number"));
            }
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.ad_earnings + self.nft_earnings
    }
}
