//! PostgreSQL-backed player store and the DDL it needs.

use super::{ListQuery, PlayerStore};
use crate::error::StoreError;
use crate::model::{NewPlayer, Player, Role};
use crate::sql::{self, bind_all, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{ConnectOptions, PgPool, Row};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgPlayerStore {
    pool: PgPool,
}

impl PgPlayerStore {
    pub fn new(pool: PgPool) -> Self {
        PgPlayerStore { pool }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<PgRow>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn fetch_player(&self, q: &QueryBuf) -> Result<Option<Player>, StoreError> {
        self.fetch_optional(q).await?.map(|r| row_to_player(&r)).transpose()
    }
}

#[async_trait]
impl PlayerStore for PgPlayerStore {
    async fn create(&self, player: NewPlayer) -> Result<Player, StoreError> {
        let q = sql::insert(Uuid::new_v4(), &player);
        self.fetch_player(&q)
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))
    }

    async fn list(&self, query: &ListQuery) -> Result<(Vec<Player>, u64), StoreError> {
        let count_q = sql::count(&query.filter);
        tracing::debug!(sql = %count_q.sql, params = ?count_q.params, "query");
        let total: i64 = bind_all(sqlx::query(&count_q.sql), &count_q.params)
            .fetch_one(&self.pool)
            .await?
            .try_get(0)?;

        let page_q = sql::select_page(query);
        tracing::debug!(sql = %page_q.sql, params = ?page_q.params, "query");
        let rows = bind_all(sqlx::query(&page_q.sql), &page_q.params)
            .fetch_all(&self.pool)
            .await?;
        let players = rows.iter().map(row_to_player).collect::<Result<Vec<_>, _>>()?;
        Ok((players, u64::try_from(total).unwrap_or(0)))
    }

    async fn update_by_id(&self, id: Uuid, player: NewPlayer) -> Result<Option<Player>, StoreError> {
        self.fetch_player(&sql::update(id, &player)).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.fetch_optional(&sql::delete(id)).await?.is_some())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Player>, StoreError> {
        self.fetch_player(&sql::select_by_id(id)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_player(row: &PgRow) -> Result<Player, StoreError> {
    let role: String = row.try_get("role")?;
    Ok(Player {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        team: row.try_get("team")?,
        country: row.try_get("country")?,
        runs: row.try_get("runs")?,
        image: row.try_get("image")?,
        role: role.parse::<Role>().map_err(StoreError::Corrupt)?,
        salary: row.try_get("salary")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Create the players table and its team index if missing.
pub async fn ensure_players_table(pool: &PgPool) -> Result<(), StoreError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            team TEXT NOT NULL,
            country TEXT NOT NULL,
            runs BIGINT NOT NULL,
            image TEXT NOT NULL,
            role TEXT NOT NULL,
            salary DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        sql::PLAYERS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS players_team_idx ON {} (team)",
        sql::PLAYERS_TABLE
    ))
    .execute(pool)
    .await?;
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(database_url: &str) -> Result<(String, String), StoreError> {
    let mut url = url::Url::parse(database_url)
        .map_err(|e| sqlx::Error::Configuration(format!("invalid DATABASE_URL: {}", e).into()))?;
    let db_name = url.path().trim_start_matches('/').to_string();
    url.set_path("/postgres");
    Ok((url.to_string(), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_swaps_database_and_keeps_query() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432/cricket?sslmode=disable").unwrap();
        assert_eq!(db, "cricket");
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres?sslmode=disable");
    }

    #[test]
    fn url_without_database_yields_empty_name() {
        let (_, db) = parse_db_name_from_url("postgres://localhost").unwrap();
        assert_eq!(db, "");
    }

    #[test]
    fn quote_ident_doubles_quotes() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
