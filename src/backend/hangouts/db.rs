//! Database operations for hangouts and their participants

use chrono::Utc;
use uuid::Uuid;

use crate::backend::store::{Store, StoreError};
use crate::shared::social::Hangout;

const HANGOUT_COLUMNS: &str = "id, name, description, creator, date, location, created_at";

/// Store a hangout; the creator becomes its first participant
pub async fn create_hangout(store: &Store, hangout: &Hangout) -> Result<(), StoreError> {
    store
        .timed(
            sqlx::query(
                r#"
                INSERT INTO hangouts (id, name, description, creator, date, location, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(hangout.id)
            .bind(&hangout.name)
            .bind(&hangout.description)
            .bind(&hangout.creator)
            .bind(&hangout.date)
            .bind(&hangout.location)
            .bind(hangout.created_at)
            .execute(store.pool()),
        )
        .await?;

    join(store, hangout.id, &hangout.creator).await?;
    Ok(())
}

pub async fn get_hangout(store: &Store, id: Uuid) -> Result<Option<Hangout>, StoreError> {
    let sql = format!("SELECT {} FROM hangouts WHERE id = ?", HANGOUT_COLUMNS);
    store
        .timed(sqlx::query_as::<_, Hangout>(&sql).bind(id).fetch_optional(store.pool()))
        .await
}

pub async fn list_hangouts(store: &Store) -> Result<Vec<Hangout>, StoreError> {
    let sql = format!(
        "SELECT {} FROM hangouts ORDER BY created_at DESC, rowid DESC",
        HANGOUT_COLUMNS
    );
    store
        .timed(sqlx::query_as::<_, Hangout>(&sql).fetch_all(store.pool()))
        .await
}

pub async fn join(store: &Store, id: Uuid, username: &str) -> Result<bool, StoreError> {
    let result = store
        .timed(
            sqlx::query(
                "INSERT OR IGNORE INTO hangout_participants (hangout_id, username, joined_at) VALUES (?, ?, ?)",
            )
            .bind(id)
            .bind(username)
            .bind(Utc::now())
            .execute(store.pool()),
        )
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn leave(store: &Store, id: Uuid, username: &str) -> Result<bool, StoreError> {
    let result = store
        .timed(
            sqlx::query("DELETE FROM hangout_participants WHERE hangout_id = ? AND username = ?")
                .bind(id)
                .bind(username)
                .execute(store.pool()),
        )
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn participants(store: &Store, id: Uuid) -> Result<Vec<String>, StoreError> {
    store
        .timed(
            sqlx::query_scalar(
                "SELECT username FROM hangout_participants WHERE hangout_id = ? ORDER BY joined_at, rowid",
            )
            .bind(id)
            .fetch_all(store.pool()),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_participants_are_a_set() {
        let store = Store::in_memory(Duration::from_secs(5)).await.unwrap();
        store.migrate().await.unwrap();

        let hangout = Hangout {
            id: Uuid::new_v4(),
            name: "Picnic".to_string(),
            description: String::new(),
            creator: "alice".to_string(),
            date: "Saturday".to_string(),
            location: "Park".to_string(),
            created_at: Utc::now(),
        };
        create_hangout(&store, &hangout).await.unwrap();

        assert!(join(&store, hangout.id, "bob").await.unwrap());
        assert!(!join(&store, hangout.id, "bob").await.unwrap());
        assert_eq!(participants(&store, hangout.id).await.unwrap(), vec!["alice", "bob"]);

        assert!(leave(&store, hangout.id, "bob").await.unwrap());
        assert_eq!(participants(&store, hangout.id).await.unwrap(), vec!["alice"]);
    }
}
