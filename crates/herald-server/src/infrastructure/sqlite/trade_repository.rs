use async_trait::async_trait;
use herald_core::{NewTrade, Side, Timestamp, Trade, TradeId, TradeStatus, ValidationError};
use herald_ports::{HeraldError, HeraldResult, TradeRepository};
use tracing::debug;

use super::{Database, storage_error};

const TRADE_COLUMNS: &str = r#""ID", "Symbol", "Side", "Entry_Price", "Stop_Loss", "Target", "Status", "Timestamp", "SignalId""#;

#[derive(sqlx::FromRow)]
struct TradeRow {
    #[sqlx(rename = "ID")]
    id: i64,
    #[sqlx(rename = "Symbol")]
    symbol: String,
    #[sqlx(rename = "Side")]
    side: String,
    #[sqlx(rename = "Entry_Price")]
    entry_price: f64,
    #[sqlx(rename = "Stop_Loss")]
    stop_loss: f64,
    #[sqlx(rename = "Target")]
    target: f64,
    #[sqlx(rename = "Status")]
    status: String,
    #[sqlx(rename = "Timestamp")]
    timestamp: Timestamp,
    #[sqlx(rename = "SignalId")]
    signal_id: i64,
}

impl TryFrom<TradeRow> for Trade {
    type Error = HeraldError;

    fn try_from(row: TradeRow) -> Result<Self, Self::Error> {
        let corrupt = |e: ValidationError| {
            HeraldError::Storage(format!("trade {} is corrupt: {}", row.id, e))
        };
        let side = Side::try_from(row.side.as_str()).map_err(corrupt)?;
        let status = TradeStatus::try_from(row.status.as_str()).map_err(corrupt)?;

        Ok(Trade {
            id: row.id,
            signal_id: row.signal_id,
            symbol: row.symbol,
            side,
            entry_price: row.entry_price,
            stop_loss: row.stop_loss,
            target: row.target,
            status,
            created_at: row.timestamp,
        })
    }
}

/// Trade table, linked to `Signal` by `SignalId`
pub struct SqliteTradeRepository {
    db: Database,
}

impl SqliteTradeRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TradeRepository for SqliteTradeRepository {
    async fn create_trade(&self, trade: NewTrade) -> HeraldResult<Trade> {
        let created_at = self.db.clock().now();

        // Existence check and insert are one statement, so a trade can never
        // be stored against a signal that is not there.
        let id: Option<TradeId> = sqlx::query_scalar(
            r#"
                INSERT INTO "Trade" (
                    "Symbol", "Side", "Entry_Price", "Stop_Loss", "Target",
                    "Status", "Timestamp", "SignalId"
                )
                SELECT ?, ?, ?, ?, ?, ?, ?, ?
                WHERE EXISTS (SELECT 1 FROM "Signal" WHERE "ID" = ?)
                RETURNING "ID"
            "#,
        )
        .bind(trade.symbol())
        .bind(trade.side().as_str())
        .bind(trade.entry_price())
        .bind(trade.stop_loss())
        .bind(trade.target())
        .bind(trade.status().as_str())
        .bind(created_at)
        .bind(trade.signal_id())
        .bind(trade.signal_id())
        .fetch_optional(self.db.pool())
        .await
        .map_err(storage_error)?;

        let Some(id) = id else {
            return Err(HeraldError::SignalNotFound(trade.signal_id()));
        };

        let trade = trade.into_trade(id, created_at);
        debug!(%trade, "Trade stored");
        Ok(trade)
    }

    async fn get_trade(&self, id: TradeId) -> HeraldResult<Option<Trade>> {
        let row: Option<TradeRow> = sqlx::query_as(&format!(
            r#"SELECT {TRADE_COLUMNS} FROM "Trade" WHERE "ID" = ?"#
        ))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
        .map_err(storage_error)?;

        row.map(Trade::try_from).transpose()
    }

    async fn list_trades(&self) -> HeraldResult<Vec<Trade>> {
        let rows: Vec<TradeRow> =
            sqlx::query_as(&format!(r#"SELECT {TRADE_COLUMNS} FROM "Trade" ORDER BY "ID""#))
                .fetch_all(self.db.pool())
                .await
                .map_err(storage_error)?;

        rows.into_iter().map(Trade::try_from).collect()
    }

    async fn update_trade_status(&self, id: TradeId, status: TradeStatus) -> HeraldResult<Trade> {
        // Guard and write are one statement: only an open trade, or one
        // already at the requested status, is touched.
        let row: Option<TradeRow> = sqlx::query_as(&format!(
            r#"
                UPDATE "Trade" SET "Status" = ?
                WHERE "ID" = ? AND ("Status" = ? OR "Status" = ?)
                RETURNING {TRADE_COLUMNS}
            "#
        ))
        .bind(status.as_str())
        .bind(id)
        .bind(TradeStatus::Open.as_str())
        .bind(status.as_str())
        .fetch_optional(self.db.pool())
        .await
        .map_err(storage_error)?;

        match row {
            Some(row) => {
                let trade = Trade::try_from(row)?;
                debug!(%trade, "Trade status updated");
                Ok(trade)
            }
            None => {
                let current = self
                    .get_trade(id)
                    .await?
                    .ok_or(HeraldError::TradeNotFound(id))?;
                // The guard only fails for a terminal trade at another status
                Err(ValidationError::InvalidTransition {
                    from: current.status,
                    to: status,
                }
                .into())
            }
        }
    }
}
