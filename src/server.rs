//! JSON query service over the journal catalog.
//!
//! Routes mirror the browsing pages of the directory:
//!
//! | Route                        | Returns                              |
//! |------------------------------|--------------------------------------|
//! | `GET /health`                | `OK`                                 |
//! | `GET /areas`                 | distinct subject areas               |
//! | `GET /areas/{area}`          | journals in an area                  |
//! | `GET /catalogos`             | distinct catalogs                    |
//! | `GET /catalogos/{catalogo}`  | journals in a catalog                |
//! | `GET /explorar/{letra}`      | journals starting with a letter      |
//! | `GET /buscar?q=`             | journals whose title contains `q`    |
//! | `GET /revista/{titulo}`      | one journal plus its ranking data    |

use crate::catalog::{Catalog, Selection};
use crate::error::Result;
use crate::record::JournalRecord;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// Build the router over a loaded catalog
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/areas", get(areas_handler))
        .route("/areas/{area}", get(area_handler))
        .route("/catalogos", get(catalogs_handler))
        .route("/catalogos/{catalogo}", get(catalog_handler))
        .route("/explorar/{letra}", get(browse_handler))
        .route("/buscar", get(search_handler))
        .route("/revista/{titulo}", get(journal_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(catalog)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(addr: SocketAddr, catalog: Arc<Catalog>) -> Result<()> {
    info!(%addr, journals = catalog.len(), "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(catalog)).await?;
    Ok(())
}

/// A list of names (areas or catalogs)
#[derive(Debug, Serialize)]
pub struct NamesResponse {
    pub count: usize,
    pub items: Vec<String>,
}

/// Journals matching one filter
#[derive(Debug, Serialize)]
pub struct JournalsResponse {
    /// The area, catalog, letter or query that was applied
    pub filter: String,
    pub count: usize,
    pub journals: BTreeMap<String, JournalRecord>,
}

/// Detail view of one journal
#[derive(Debug, Serialize)]
pub struct JournalDetail {
    pub titulo: String,
    pub revista: JournalRecord,
    pub ranking: serde_json::Value,
}

/// Query string of `/buscar`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

async fn areas_handler(State(catalog): State<Arc<Catalog>>) -> Json<NamesResponse> {
    Json(names(catalog.areas()))
}

async fn area_handler(
    State(catalog): State<Arc<Catalog>>,
    Path(area): Path<String>,
) -> Json<JournalsResponse> {
    debug!(area = %area, "Area request");
    let journals = catalog.by_area(&area);
    Json(journals_response(area, journals))
}

async fn catalogs_handler(State(catalog): State<Arc<Catalog>>) -> Json<NamesResponse> {
    Json(names(catalog.catalogs()))
}

async fn catalog_handler(
    State(catalog): State<Arc<Catalog>>,
    Path(catalogo): Path<String>,
) -> Json<JournalsResponse> {
    debug!(catalogo = %catalogo, "Catalog request");
    let journals = catalog.by_catalog(&catalogo);
    Json(journals_response(catalogo, journals))
}

async fn browse_handler(
    State(catalog): State<Arc<Catalog>>,
    Path(letra): Path<String>,
) -> Json<JournalsResponse> {
    let journals = catalog.by_prefix(&letra);
    Json(journals_response(letra, journals))
}

async fn search_handler(
    State(catalog): State<Arc<Catalog>>,
    Query(params): Query<SearchParams>,
) -> Json<JournalsResponse> {
    info!(query = %params.q, "Search request");
    let journals = catalog.search(&params.q);
    Json(journals_response(params.q, journals))
}

async fn journal_handler(
    State(catalog): State<Arc<Catalog>>,
    Path(titulo): Path<String>,
) -> Json<JournalDetail> {
    Json(JournalDetail {
        revista: catalog.get(&titulo),
        ranking: catalog.ranking(&titulo),
        titulo,
    })
}

fn names(items: Vec<&str>) -> NamesResponse {
    NamesResponse {
        count: items.len(),
        items: items.into_iter().map(String::from).collect(),
    }
}

fn journals_response(filter: String, journals: Selection<'_>) -> JournalsResponse {
    let journals: BTreeMap<String, JournalRecord> = journals
        .into_iter()
        .map(|(title, record)| (title.to_string(), record.clone()))
        .collect();

    JournalsResponse {
        filter,
        count: journals.len(),
        journals,
    }
}
