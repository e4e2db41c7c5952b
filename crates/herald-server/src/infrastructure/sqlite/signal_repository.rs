use async_trait::async_trait;
use herald_core::{NewSignal, Signal, SignalId, SignalPayload, Timestamp};
use herald_ports::{HeraldError, HeraldResult, SignalRepository};
use tracing::debug;

use super::{Database, storage_error};

#[derive(sqlx::FromRow)]
struct SignalRow {
    #[sqlx(rename = "ID")]
    id: i64,
    #[sqlx(rename = "Symbol")]
    symbol: String,
    #[sqlx(rename = "Full_Signal")]
    full_signal: String,
    #[sqlx(rename = "Timestamp")]
    timestamp: Timestamp,
}

impl TryFrom<SignalRow> for Signal {
    type Error = HeraldError;

    fn try_from(row: SignalRow) -> Result<Self, Self::Error> {
        let payload = SignalPayload::from_json(row.full_signal).map_err(|e| {
            HeraldError::Storage(format!("signal {} has a corrupt payload: {}", row.id, e))
        })?;

        Ok(Signal {
            id: row.id,
            symbol: row.symbol,
            payload,
            created_at: row.timestamp,
        })
    }
}

/// Append-only signal table
///
/// There is deliberately no update or delete statement here.
pub struct SqliteSignalRepository {
    db: Database,
}

impl SqliteSignalRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SignalRepository for SqliteSignalRepository {
    async fn create_signal(&self, signal: NewSignal) -> HeraldResult<Signal> {
        let created_at = self.db.clock().now();

        let id: SignalId = sqlx::query_scalar(
            r#"
                INSERT INTO "Signal" ("Symbol", "Full_Signal", "Timestamp")
                VALUES (?, ?, ?)
                RETURNING "ID"
            "#,
        )
        .bind(signal.symbol())
        .bind(signal.payload().as_str())
        .bind(created_at)
        .fetch_one(self.db.pool())
        .await
        .map_err(storage_error)?;

        debug!(id, symbol = signal.symbol(), "Signal stored");
        Ok(signal.into_signal(id, created_at))
    }

    async fn get_signal(&self, id: SignalId) -> HeraldResult<Option<Signal>> {
        let row: Option<SignalRow> = sqlx::query_as(
            r#"SELECT "ID", "Symbol", "Full_Signal", "Timestamp" FROM "Signal" WHERE "ID" = ?"#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
        .map_err(storage_error)?;

        row.map(Signal::try_from).transpose()
    }

    async fn list_signals(&self) -> HeraldResult<Vec<Signal>> {
        let rows: Vec<SignalRow> = sqlx::query_as(
            r#"SELECT "ID", "Symbol", "Full_Signal", "Timestamp" FROM "Signal" ORDER BY "ID""#,
        )
        .fetch_all(self.db.pool())
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(Signal::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use herald_clock::{Clock, FixedClock};
    use std::sync::Arc;

    async fn setup() -> (Arc<FixedClock>, SqliteSignalRepository) {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let db = Database::in_memory(clock.clone()).await.unwrap();
        (clock, db.signals())
    }

    fn new_signal(raw: &str) -> NewSignal {
        NewSignal::from_payload(SignalPayload::from_json(raw).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let (_clock, repo) = setup().await;

        let first = repo.create_signal(new_signal(r#"{"symbol":"BTCUSD"}"#)).await.unwrap();
        let second = repo.create_signal(new_signal(r#"{"symbol":"ETHUSD"}"#)).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.symbol, "BTCUSD");
        assert_eq!(second.symbol, "ETHUSD");
    }

    #[tokio::test]
    async fn test_timestamp_comes_from_store_clock() {
        let (clock, repo) = setup().await;
        let expected = clock.now();

        let signal = repo.create_signal(new_signal(r#"{"symbol":"BTCUSD"}"#)).await.unwrap();
        assert_eq!(signal.created_at, expected);

        clock.advance(Duration::minutes(5));
        let stored = repo.get_signal(signal.id).await.unwrap().unwrap();
        assert_eq!(stored.created_at, expected);
    }

    #[tokio::test]
    async fn test_payload_round_trips_verbatim() {
        let (_clock, repo) = setup().await;
        let raw = r#"{"symbol":"ETHUSD", "Full_Signal":"Buy signal for ETHUSD at current price","n":1.50}"#;

        let signal = repo.create_signal(new_signal(raw)).await.unwrap();
        let stored = repo.get_signal(signal.id).await.unwrap().unwrap();

        assert_eq!(stored.payload.as_str(), raw);
        assert_eq!(stored, signal);
    }

    #[tokio::test]
    async fn test_get_unknown_signal() {
        let (_clock, repo) = setup().await;
        assert!(repo.get_signal(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let (clock, repo) = setup().await;
        assert!(repo.list_signals().await.unwrap().is_empty());

        for symbol in ["BTCUSD", "ETHUSD", "SOLUSD"] {
            repo.create_signal(new_signal(&format!(r#"{{"symbol":"{symbol}"}}"#)))
                .await
                .unwrap();
            clock.advance(Duration::seconds(1));
        }

        let symbols: Vec<_> = repo
            .list_signals()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.symbol)
            .collect();
        assert_eq!(symbols, vec!["BTCUSD", "ETHUSD", "SOLUSD"]);
    }
}
