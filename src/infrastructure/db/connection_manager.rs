//! Connection manager for the target MySQL database.
//!
//! Holds at most one active connection pool. Connecting with new parameters
//! replaces the pool only after a successful health check; a failed attempt
//! leaves the previous pool (if any) in place. The schema is introspected
//! from `information_schema` on every request, never cached.

use crate::domain::connection::ConnectParams;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::db::SchemaProvider;
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Configuration for the connection manager
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Maximum connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            connect_timeout_secs: 10,
        }
    }
}

struct ActiveConnection {
    pool: MySqlPool,
    database: String,
}

/// One row of `information_schema.columns`, as fetched: `nullable` is the
/// raw YES/NO flag and `key` the raw column_key value.
struct ColumnRow {
    name: String,
    col_type: String,
    nullable: String,
    key: String,
}

/// Render one table as a `CREATE TABLE`-style block.
fn render_table_block(table: &str, columns: &[ColumnRow]) -> String {
    let lines: Vec<String> = columns
        .iter()
        .map(|column| {
            let mut line = format!("  `{}` {}", column.name, column.col_type);
            if column.nullable.eq_ignore_ascii_case("NO") {
                line.push_str(" NOT NULL");
            }
            if column.key == "PRI" {
                line.push_str(" PRIMARY KEY");
            }
            line
        })
        .collect();

    format!("CREATE TABLE `{}` (\n{}\n);", table, lines.join(",\n"))
}

/// Join per-table blocks into the schema text. A database with no tables
/// renders as an empty string, not an error.
fn render_schema(blocks: &[String]) -> String {
    blocks.join("\n\n")
}

pub struct ConnectionManager {
    active: RwLock<Option<ActiveConnection>>,
    config: ConnectionConfig,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::with_config(ConnectionConfig::default())
    }

    pub fn with_config(config: ConnectionConfig) -> Self {
        Self {
            active: RwLock::new(None),
            config,
        }
    }

    fn build_options(params: &ConnectParams, port: u16) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(params.host.trim())
            .port(port)
            .username(params.user.trim())
            .password(&params.password)
            .database(params.database.trim())
    }

    /// Open a pool for the given parameters and replace the active one.
    /// Validation, connect, and health check all happen before the swap, so
    /// any failure leaves the previous connection usable.
    pub async fn connect(&self, params: &ConnectParams) -> Result<()> {
        let port = params.validate()?;
        let options = Self::build_options(params, port);

        let connect_result = tokio::time::timeout(
            Duration::from_secs(self.config.connect_timeout_secs),
            MySqlPoolOptions::new()
                .max_connections(self.config.max_connections)
                .connect_with(options),
        )
        .await;

        let pool = match connect_result {
            Ok(Ok(pool)) => pool,
            Ok(Err(e)) => {
                error!("Failed to connect to MySQL: {}", e);
                return Err(AppError::DatabaseError(format!("Connection failed: {}", e)));
            }
            Err(_) => {
                return Err(AppError::DatabaseError(format!(
                    "Connection timed out after {} seconds",
                    self.config.connect_timeout_secs
                )));
            }
        };

        sqlx::query("SELECT 1 as health_check")
            .fetch_one(&pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!("Connected but health check failed: {}", e))
            })?;

        info!(
            "Connected to MySQL at {}:{}/{}",
            params.host.trim(),
            port,
            params.database.trim()
        );

        let mut active = self.active.write().await;
        if let Some(previous) = active.take() {
            previous.pool.close().await;
        }
        *active = Some(ActiveConnection {
            pool,
            database: params.database.trim().to_string(),
        });

        Ok(())
    }

    pub async fn is_connected(&self) -> bool {
        self.active.read().await.is_some()
    }

    /// Clone the active pool and its database name, or fail when nothing is
    /// connected yet.
    async fn get_active(&self) -> Result<(MySqlPool, String)> {
        let guard = self.active.read().await;
        match guard.as_ref() {
            Some(conn) => Ok((conn.pool.clone(), conn.database.clone())),
            None => Err(AppError::DatabaseError(
                "Not connected to a database".to_string(),
            )),
        }
    }

    /// List base table names of the connected database, ordered by name.
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let (pool, database) = self.get_active().await?;

        let query = r#"
            SELECT table_name AS name
            FROM information_schema.tables
            WHERE table_schema = ? AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let rows = sqlx::query(query)
            .bind(&database)
            .fetch_all(&pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to list tables: {}", e)))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("name").map_err(|e| {
                    AppError::DatabaseError(format!("Failed to parse table name: {}", e))
                })
            })
            .collect()
    }

    async fn describe_table(
        &self,
        pool: &MySqlPool,
        database: &str,
        table: &str,
    ) -> Result<String> {
        let query = r#"
            SELECT
                column_name AS name,
                column_type AS col_type,
                is_nullable AS nullable,
                column_key AS col_key
            FROM information_schema.columns
            WHERE table_schema = ? AND table_name = ?
            ORDER BY ordinal_position
        "#;

        let rows = sqlx::query(query)
            .bind(database)
            .bind(table)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to list columns for '{}': {}", table, e))
            })?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(ColumnRow {
                name: row.try_get("name").map_err(|e| {
                    AppError::DatabaseError(format!("Failed to parse column: {}", e))
                })?,
                col_type: row.try_get("col_type").map_err(|e| {
                    AppError::DatabaseError(format!("Failed to parse column: {}", e))
                })?,
                nullable: row.try_get("nullable").map_err(|e| {
                    AppError::DatabaseError(format!("Failed to parse column: {}", e))
                })?,
                key: row.try_get("col_key").map_err(|e| {
                    AppError::DatabaseError(format!("Failed to parse column: {}", e))
                })?,
            });
        }

        Ok(render_table_block(table, &columns))
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaProvider for ConnectionManager {
    /// Render a fresh `CREATE TABLE`-style snapshot of every base table,
    /// used verbatim as the schema section of the prompt.
    async fn describe_schema(&self) -> Result<String> {
        let tables = self.list_tables().await?;
        let (pool, database) = self.get_active().await?;

        let mut blocks = Vec::with_capacity(tables.len());
        for table in &tables {
            blocks.push(self.describe_table(&pool, &database, table).await?);
        }

        info!("Described schema: {} tables", blocks.len());

        Ok(render_schema(&blocks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, col_type: &str, nullable: &str, key: &str) -> ColumnRow {
        ColumnRow {
            name: name.to_string(),
            col_type: col_type.to_string(),
            nullable: nullable.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn test_nullable_column_has_no_not_null_suffix() {
        let block = render_table_block("Artist", &[column("Name", "varchar(120)", "YES", "")]);
        assert_eq!(
            block,
            "CREATE TABLE `Artist` (\n  `Name` varchar(120)\n);"
        );
    }

    #[test]
    fn test_primary_key_column_gets_both_suffixes() {
        let block = render_table_block("Artist", &[column("ArtistId", "int", "NO", "PRI")]);
        assert_eq!(
            block,
            "CREATE TABLE `Artist` (\n  `ArtistId` int NOT NULL PRIMARY KEY\n);"
        );
    }

    #[test]
    fn test_columns_joined_with_comma_per_line() {
        let block = render_table_block(
            "Track",
            &[
                column("TrackId", "int", "NO", "PRI"),
                column("Name", "varchar(200)", "NO", ""),
                column("Composer", "varchar(220)", "YES", ""),
            ],
        );
        assert_eq!(
            block,
            "CREATE TABLE `Track` (\n  `TrackId` int NOT NULL PRIMARY KEY,\n  `Name` varchar(200) NOT NULL,\n  `Composer` varchar(220)\n);"
        );
    }

    #[test]
    fn test_table_without_columns_renders_empty_body() {
        let block = render_table_block("Empty", &[]);
        assert_eq!(block, "CREATE TABLE `Empty` (\n\n);");
    }

    #[test]
    fn test_schema_without_tables_is_empty_not_an_error() {
        assert_eq!(render_schema(&[]), "");
    }

    #[test]
    fn test_schema_blocks_separated_by_blank_line() {
        let blocks = vec![
            render_table_block("Artist", &[column("ArtistId", "int", "NO", "PRI")]),
            render_table_block("Track", &[column("TrackId", "int", "NO", "PRI")]),
        ];
        let schema = render_schema(&blocks);
        assert!(schema.contains("CREATE TABLE `Artist`"));
        assert!(schema.contains(");\n\nCREATE TABLE `Track`"));
    }
}
