use crate::errors::AppError;
use crate::models::{Candidate, Dashboard, Record, RecordForm};
use crate::records::build_record;
use crate::state::AppState;
use crate::stats::build_dashboard;
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let records = state.store.load_all().await?;
    let dashboard = build_dashboard(&records);
    Ok(Html(render_index(today(), &dashboard)))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<Dashboard>, AppError> {
    let records = state.store.load_all().await?;
    Ok(Json(build_dashboard(&records)))
}

pub async fn submit(
    State(state): State<AppState>,
    Json(candidate): Json<Candidate>,
) -> Result<Json<Record>, AppError> {
    let record = apply_submit(&state, candidate).await?;
    Ok(Json(record))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<RecordForm>,
) -> Result<Redirect, AppError> {
    let candidate = form.into_candidate().map_err(AppError::bad_request)?;
    apply_submit(&state, candidate).await?;
    Ok(Redirect::to("/"))
}

async fn apply_submit(state: &AppState, candidate: Candidate) -> Result<Record, AppError> {
    let record = build_record(candidate, today()).map_err(AppError::validation)?;

    let _guard = state.write_lock.lock().await;
    state.store.append(record.clone()).await?;
    info!(
        date = %record.date,
        coins_earned = record.coins_earned,
        "record stored"
    );

    Ok(record)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
