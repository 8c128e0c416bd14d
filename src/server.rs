use crate::catalog::{CatalogLoader, CreatureSummary, filter_by_type, search_by_name};
use crate::client::Fetcher;
use crate::config::Config;
use crate::detail::DetailAggregator;
use crate::diagnostics::DiagnosticSink;
use crate::error::AppError;
use crate::session::Session;
use crate::task::ViewTask;
use crate::types::{TypeBadge, TypeFilter, type_badges};
use crate::view::{CardView, DetailView};
use axum::{
    Json, Router, debug_handler,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct AppState<F: Fetcher> {
    detail: Arc<DetailAggregator<F>>,
    catalog: Arc<CatalogLoader<F>>,
    session: Mutex<Session>,
}

impl<F: Fetcher> AppState<F> {
    pub fn new(fetcher: Arc<F>, config: &Config, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            detail: Arc::new(DetailAggregator::new(
                Arc::clone(&fetcher),
                &config.pokemon,
                Arc::clone(&sink),
            )),
            catalog: Arc::new(CatalogLoader::new(fetcher, &config.pokemon, sink)),
            session: Mutex::new(Session::new(config.session.clone())),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| {
            tracing::error!("Session lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

pub fn router<F: Fetcher>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route("/login", post(login_handler::<F>))
        .route("/logout", post(logout_handler::<F>))
        .route("/session", get(session_handler::<F>))
        .route("/types", get(types_handler))
        .route("/pokemon", get(list_handler::<F>))
        .route("/pokemon/{name}", get(detail_handler::<F>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SessionView {
    pub authenticated: bool,
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub r#type: Option<String>,
    pub q: Option<String>,
}

async fn login_handler<F: Fetcher>(
    State(app_state): State<Arc<AppState<F>>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = app_state.session();
    session.login(&request.username, &request.password)?;
    Ok(Json(SessionView {
        authenticated: true,
        username: session.username().map(str::to_string),
    }))
}

async fn logout_handler<F: Fetcher>(State(app_state): State<Arc<AppState<F>>>) -> StatusCode {
    app_state.session().logout();
    StatusCode::NO_CONTENT
}

async fn session_handler<F: Fetcher>(State(app_state): State<Arc<AppState<F>>>) -> Json<SessionView> {
    let session = app_state.session();
    Json(SessionView {
        authenticated: session.is_authenticated(),
        username: session.username().map(str::to_string),
    })
}

#[debug_handler]
async fn types_handler() -> Json<Vec<TypeBadge>> {
    Json(type_badges())
}

async fn list_handler<F: Fetcher>(
    State(app_state): State<Arc<AppState<F>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CardView>>, AppError> {
    app_state.session().require_login()?;
    let filter: TypeFilter = params.r#type.as_deref().unwrap_or_default().parse()?;

    // The task is dropped, and the fetch aborted, if the client goes away.
    let catalog = Arc::clone(&app_state.catalog);
    let mut task = ViewTask::spawn(async move { catalog.load().await });
    let list = task.result().await?;

    let by_type: Vec<CreatureSummary> = filter_by_type(&list, &filter).into_iter().cloned().collect();
    let matches: Vec<CardView> = search_by_name(&by_type, params.q.as_deref().unwrap_or_default())
        .into_iter()
        .map(CardView::from)
        .collect();
    tracing::debug!("Listing {} of {} creatures", matches.len(), list.len());
    Ok(Json(matches))
}

async fn detail_handler<F: Fetcher>(
    State(app_state): State<Arc<AppState<F>>>,
    Path(name): Path<String>,
) -> Result<Json<DetailView>, AppError> {
    app_state.session().require_login()?;

    let detail = Arc::clone(&app_state.detail);
    let mut task = ViewTask::spawn(async move { detail.load(&name).await });
    task.result().await.map(|detail| Json(DetailView::from(detail)))
}
