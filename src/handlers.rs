use crate::errors::AppError;
use crate::filter::{filter_entries, DateRange};
use crate::joints::{body_part_at, JOINTS};
use crate::models::{
    BodyMapQuery, BodyPartResponse, ExportQuery, HistoryQuery, HistoryResponse, JointsResponse,
    JournalEntry, MedicationEntry, NewJournalEntry, NewMedication, NewSymptom, RangeQuery,
    SummaryResponse, SymptomEntry,
};
use crate::report::{build_report, Report};
use crate::state::AppState;
use crate::stats::summarize;
use crate::storage::persist_data;
use crate::store::Record;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, Utc};
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn get_joints() -> Json<JointsResponse> {
    Json(JointsResponse {
        joints: JOINTS.iter().map(|joint| joint.to_string()).collect(),
    })
}

pub async fn get_body_part(Query(query): Query<BodyMapQuery>) -> Json<BodyPartResponse> {
    Json(BodyPartResponse {
        part: body_part_at(query.y).to_string(),
    })
}

pub async fn add_symptom(
    State(state): State<AppState>,
    Json(payload): Json<NewSymptom>,
) -> Result<(StatusCode, Json<SymptomEntry>), AppError> {
    let entry = payload.into_entry(Utc::now())?;
    let stored = append_record(&state, entry).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn add_journal(
    State(state): State<AppState>,
    Json(payload): Json<NewJournalEntry>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    let entry = payload.into_entry(Utc::now())?;
    let stored = append_record(&state, entry).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn add_medication(
    State(state): State<AppState>,
    Json(payload): Json<NewMedication>,
) -> Result<(StatusCode, Json<MedicationEntry>), AppError> {
    let entry = payload.into_entry(Utc::now())?;
    let stored = append_record(&state, entry).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list_symptoms(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Json<Vec<SymptomEntry>> {
    Json(list_records(&state, &query).await)
}

pub async fn list_journal(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Json<Vec<JournalEntry>> {
    Json(list_records(&state, &query).await)
}

pub async fn list_meds(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Json<Vec<MedicationEntry>> {
    Json(list_records(&state, &query).await)
}

pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let range = DateRange::for_day(date, &Local);
    let store = state.store.lock().await;

    Json(HistoryResponse {
        date,
        symptoms: filter_entries(&store.symptoms(), &range),
        journal: filter_entries(&store.journal(), &range),
        meds: filter_entries(&store.meds(), &range),
    })
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Json<SummaryResponse> {
    let range = to_range(&query);
    let store = state.store.lock().await;
    let symptoms = filter_entries(&store.symptoms(), &range);
    let meds = filter_entries(&store.meds(), &range);

    Json(SummaryResponse {
        stats: summarize(&symptoms, &meds),
        symptoms,
        meds,
    })
}

pub async fn get_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Json<Report> {
    let range = to_range(&query.range_query());
    let store = state.store.lock().await;
    Json(build_report(&store, &range, query.mode))
}

async fn append_record<R: Record>(state: &AppState, entry: R) -> Result<R, AppError> {
    let mut store = state.store.lock().await;
    store.append(entry.clone())?;
    persist_data(&state.data_path, store.storage()).await?;

    info!(partition = %R::KIND, "appended entry");
    Ok(entry)
}

async fn list_records<R: Record>(state: &AppState, query: &RangeQuery) -> Vec<R> {
    let range = to_range(query);
    let store = state.store.lock().await;
    filter_entries(&store.get_all::<R>(), &range)
}

// A rolling `days` window wins over explicit calendar dates.
fn to_range(query: &RangeQuery) -> DateRange {
    match query.days {
        Some(days) => DateRange::last_n_days(days),
        None => DateRange::between_days(query.start, query.end, &Local),
    }
}
