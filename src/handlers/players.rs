//! Player handlers: create, list, update, delete, description.

use crate::error::AppError;
use crate::model::NewPlayer;
use crate::response::{confirm, PlayerPage};
use crate::service::RequestValidator;
use crate::state::AppState;
use crate::store::{ListQuery, PlayerFilter, SortKey};
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;

/// Raw list query. Values are parsed by hand so bad input gets a field-specific message.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub team: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub search: Option<String>,
}

/// A player id. Anything that is not a UUID cannot name a record, so it reads as absent.
fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::NotFound)
}

fn validated_body(body: Result<Json<Value>, JsonRejection>) -> Result<NewPlayer, AppError> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(RequestValidator::validate(&body)?)
}

fn paging_value(name: &str, value: Option<&str>, default: u64, min: u64) -> Result<u64, AppError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => s.parse::<u64>().ok().filter(|n| *n >= min).ok_or_else(|| {
            let kind = if min == 0 { "a non-negative" } else { "a positive" };
            AppError::BadRequest(format!("\"{}\" must be {} integer", name, kind))
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl ListParams {
    /// Resolve into the echoed page/limit and the store query. `limit=0` means no limit.
    pub fn into_query(self) -> Result<(u64, u64, ListQuery), AppError> {
        let page = paging_value("page", self.page.as_deref(), DEFAULT_PAGE, 1)?;
        let limit = paging_value("limit", self.limit.as_deref(), DEFAULT_LIMIT, 0)?;
        let query = ListQuery {
            filter: PlayerFilter {
                team: non_empty(self.team),
                search: non_empty(self.search),
            },
            sort: self.sort_by.as_deref().and_then(SortKey::from_param),
            skip: (page - 1).saturating_mul(limit),
            limit: Some(limit).filter(|n| *n > 0),
        };
        Ok((page, limit, query))
    }
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let player = validated_body(body)?;
    let stored = state.store.create(player).await.map_err(AppError::Rejected)?;
    tracing::info!(id = %stored.id, "player created");
    Ok(confirm(StatusCode::CREATED, "Player created successfully"))
}

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (page, limit, query) = params.into_query()?;
    let (players, total) = state
        .store
        .list(&query)
        .await
        .map_err(AppError::failed("Failed to fetch players"))?;
    Ok(Json(PlayerPage {
        page,
        limit,
        total,
        players,
    }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let player = validated_body(body)?;
    let id = parse_id(&id_str)?;
    state
        .store
        .update_by_id(id, player)
        .await
        .map_err(AppError::Rejected)?
        .ok_or(AppError::NotFound)?;
    tracing::info!(%id, "player updated");
    Ok(confirm(StatusCode::OK, "Player updated successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let deleted = state
        .store
        .delete_by_id(id)
        .await
        .map_err(AppError::failed("Failed to delete player"))?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    tracing::info!(%id, "player deleted");
    Ok(confirm(StatusCode::OK, "Player deleted successfully"))
}

pub async fn description(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let player = state
        .store
        .get_by_id(id)
        .await
        .map_err(AppError::failed("Failed to fetch player details"))?
        .ok_or(AppError::NotFound)?;
    Ok(Json(player))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>) -> ListParams {
        ListParams {
            page: page.map(Into::into),
            limit: limit.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_first_page_of_ten() {
        let (page, limit, q) = ListParams::default().into_query().unwrap();
        assert_eq!((page, limit, q.skip, q.limit), (1, 10, 0, Some(10)));
        assert_eq!(q.sort, None);
        assert_eq!(q.filter, PlayerFilter::default());
    }

    #[test]
    fn skip_is_page_minus_one_times_limit() {
        let (page, limit, q) = params(Some("2"), Some("5")).into_query().unwrap();
        assert_eq!((page, limit, q.skip), (2, 5, 5));
    }

    #[test]
    fn zero_limit_is_unbounded_and_echoed() {
        let (page, limit, q) = params(Some("3"), Some("0")).into_query().unwrap();
        assert_eq!((page, limit, q.skip, q.limit), (3, 0, 0, None));
    }

    #[test]
    fn rejects_bad_paging() {
        for (p, l, field) in [(Some("0"), None, "page"), (Some("x"), None, "page"), (None, Some("-3"), "limit")] {
            match params(p, l).into_query() {
                Err(AppError::BadRequest(msg)) => assert!(msg.contains(field), "{}", msg),
                other => panic!("unexpected {:?}", other.map(|(p, l, _)| (p, l))),
            }
        }
    }

    #[test]
    fn only_runs_and_salary_sort() {
        for (raw, key) in [("runs", Some(SortKey::Runs)), ("salary", Some(SortKey::Salary)), ("name", None)] {
            let p = ListParams {
                sort_by: Some(raw.into()),
                ..Default::default()
            };
            assert_eq!(p.into_query().unwrap().2.sort, key);
        }
    }

    #[test]
    fn empty_filters_are_ignored() {
        let p = ListParams {
            team: Some(String::new()),
            search: Some("ab".into()),
            ..Default::default()
        };
        let q = p.into_query().unwrap().2;
        assert_eq!(q.filter.team, None);
        assert_eq!(q.filter.search.as_deref(), Some("ab"));
    }

    #[test]
    fn malformed_id_reads_as_absent() {
        assert!(matches!(parse_id("nope"), Err(AppError::NotFound)));
        assert!(parse_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
