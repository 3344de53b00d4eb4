//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for players.

use crate::model::NewPlayer;
use crate::sql::PgBindValue;
use crate::store::{ListQuery, PlayerFilter, SortKey};
use uuid::Uuid;

pub const PLAYERS_TABLE: &str = "players";

/// Column list shared by every SELECT and RETURNING clause.
const COLUMNS: &str = "id, name, team, country, runs, image, role, salary, created_at, updated_at";

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<PgBindValue>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }
}

/// Escapes LIKE metacharacters so the search term matches literally.
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn where_clause(q: &mut QueryBuf, filter: &PlayerFilter) -> String {
    let mut parts = Vec::new();
    if let Some(team) = &filter.team {
        let n = q.push_param(team.as_str());
        parts.push(format!("team = ${}", n));
    }
    if let Some(search) = &filter.search {
        let n = q.push_param(format!("%{}%", escape_like(search)));
        parts.push(format!("name ILIKE ${}", n));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

fn order_clause(sort: Option<SortKey>) -> String {
    match sort {
        Some(key) => format!(" ORDER BY {} DESC, created_at, id", key.column()),
        None => " ORDER BY created_at, id".to_string(),
    }
}

/// COUNT over the filter alone; skip and limit do not apply.
pub fn count(filter: &PlayerFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, filter);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", PLAYERS_TABLE, where_sql);
    q
}

/// SELECT page: filter, optional descending sort, optional LIMIT, OFFSET skip.
pub fn select_page(query: &ListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, &query.filter);
    let limit_sql = query
        .limit
        .map(|n| format!(" LIMIT ${}", q.push_param(clamp_i64(n))))
        .unwrap_or_default();
    let offset = q.push_param(clamp_i64(query.skip));
    q.sql = format!(
        "SELECT {} FROM {}{}{}{} OFFSET ${}",
        COLUMNS,
        PLAYERS_TABLE,
        where_sql,
        order_clause(query.sort),
        limit_sql,
        offset
    );
    q
}

fn clamp_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

pub fn select_by_id(id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("SELECT {} FROM {} WHERE id = ${}", COLUMNS, PLAYERS_TABLE, n);
    q
}

fn push_fields(q: &mut QueryBuf, player: &NewPlayer) -> [usize; 7] {
    [
        q.push_param(player.name.as_str()),
        q.push_param(player.team.as_str()),
        q.push_param(player.country.as_str()),
        q.push_param(player.runs),
        q.push_param(player.image.as_str()),
        q.push_param(player.role.as_str()),
        q.push_param(player.salary),
    ]
}

/// INSERT with caller-assigned id; timestamps come from column defaults.
pub fn insert(id: Uuid, player: &NewPlayer) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id_param = q.push_param(id);
    let [name, team, country, runs, image, role, salary] = push_fields(&mut q, player);
    q.sql = format!(
        "INSERT INTO {} (id, name, team, country, runs, image, role, salary) \
         VALUES (${}, ${}, ${}, ${}, ${}, ${}, ${}, ${}) RETURNING {}",
        PLAYERS_TABLE, id_param, name, team, country, runs, image, role, salary, COLUMNS
    );
    q
}

/// UPDATE by id: replaces every payload field and bumps updated_at.
pub fn update(id: Uuid, player: &NewPlayer) -> QueryBuf {
    let mut q = QueryBuf::new();
    let [name, team, country, runs, image, role, salary] = push_fields(&mut q, player);
    let id_param = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET name = ${}, team = ${}, country = ${}, runs = ${}, image = ${}, role = ${}, \
         salary = ${}, updated_at = NOW() WHERE id = ${} RETURNING {}",
        PLAYERS_TABLE, name, team, country, runs, image, role, salary, id_param, COLUMNS
    );
    q
}

/// DELETE by id.
pub fn delete(id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE id = ${} RETURNING id", PLAYERS_TABLE, n);
    q
}
