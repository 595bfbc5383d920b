//! Database operations for earnings records

use crate::backend::store::{Store, StoreError};
use crate::shared::social::Monetization;

pub async fn get_monetization(store: &Store, username: &str) -> Result<Option<Monetization>, StoreError> {
    store
        .timed(
            sqlx::query_as::<_, Monetization>(
                "SELECT username, total_earnings, ad_earnings, nft_earnings FROM monetization WHERE username = ?",
            )
            .bind(username)
            .fetch_optional(store.pool()),
        )
        .await
}

/// Insert or replace the earnings record of `record.username`
pub async fn upsert_monetization(store: &Store, record: &Monetization) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query(
                r#"
                INSERT INTO monetization (username, total_earnings, ad_earnings, nft_earnings)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (username) DO UPDATE SET
                    total_earnings = excluded.total_earnings,
                    ad_earnings = excluded.ad_earnings,
                    nft_earnings = excluded.nft_earnings
                "#,
            )
            .bind(&record.username)
            .bind(record.total_earnings)
            .bind(record.ad_earnings)
            .bind(record.nft_earnings)
            .execute(store.pool()),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_upsert_replaces_record() {
        let store = Store::in_memory(Duration::from_secs(5)).await.unwrap();
        store.migrate().await.unwrap();
        assert_eq!(get_monetization(&store, "alice").await.unwrap(), None);

        let mut record = Monetization::empty("alice");
        record.ad_earnings = 1.5;
        record.total_earnings = 1.5;
        upsert_monetization(&store, &record).await.unwrap();

        record.nft_earnings = 2.0;
        record.total_earnings = 3.5;
        upsert_monetization(&store, &record).await.unwrap();

        assert_eq!(get_monetization(&store, "alice").await.unwrap(), Some(record));
    }
}
