//! Handlers shared by every resource: fetch one, delete one, list.
//!
//! | Method   | Path                  | Notes |
//! |----------|-----------------------|-------|
//! | `GET`    | `/{resource}`         | `?limit=&offset=` plus the resource's filter fields |
//! | `GET`    | `/{resource}/{id}`    | 404 if absent or owned by another tenant |
//! | `DELETE` | `/{resource}/{id}`    | 204 on success |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use fleet_core::{
  Record,
  filter::{Filter, Page},
  store::{FleetStore, Repository},
};
use serde::{Deserialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
  AppState,
  auth::Tenant,
  error::ApiError,
  extract::{ApiPath, ApiQuery},
};

/// Paging query parameters. Out-of-range values are clamped, not rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
  pub limit:  Option<i64>,
  pub offset: Option<i64>,
}

/// `GET /{resource}`
pub async fn list<S, F>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiQuery(page): ApiQuery<PageParams>,
  ApiQuery(filter): ApiQuery<F>,
) -> Result<Json<Page<F::Record>>, ApiError>
where
  S: FleetStore + Repository<F::Record> + 'static,
  F: Filter + DeserializeOwned + Send + Sync,
{
  let page = state
    .service
    .list(owner, &filter, page.limit, page.offset)
    .await?;
  Ok(Json(page))
}

/// `GET /{resource}/{id}`
pub async fn get_one<S, R>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<R>, ApiError>
where
  S: FleetStore + Repository<R> + 'static,
  R: Record,
{
  let record = state.service.get::<R>(id, owner).await?;
  Ok(Json(record))
}

/// `DELETE /{resource}/{id}`
pub async fn delete_one<S, R>(
  State(state): State<AppState<S>>,
  Tenant(owner): Tenant,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: FleetStore + Repository<R> + 'static,
  R: Record,
{
  state.service.delete::<R>(id, owner).await?;
  Ok(StatusCode::NO_CONTENT)
}
