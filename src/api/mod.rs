pub mod members;
pub mod projects;
pub mod reload;
pub mod tools;

use crate::error::DashboardError;
use crate::store::{RecordStore, Snapshot};
use actix_web::web;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

/// Fetch the snapshot off the async executor; a reload reads the workbook from disk.
pub async fn load_snapshot(
    store: &web::Data<RecordStore>,
    force_reload: bool,
) -> Result<Arc<Snapshot>, DashboardError> {
    let store = store.clone();
    web::block(move || store.get_snapshot(force_reload))
        .await?
        .map_err(DashboardError::from)
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    /// Calendar year, defaults to the current one
    pub year: Option<i32>,
}
