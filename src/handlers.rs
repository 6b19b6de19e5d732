use crate::errors::AppError;
use crate::ledger::{forest_level, HabitId};
use crate::models::{
    AddHabitRequest, CompletionRequest, HabitView, MoodRequest, PartnerResponse, SummaryResponse,
    TodayResponse,
};
use crate::partner::{fetch_partner, Fetched};
use crate::state::{AppState, Session};
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use chrono::{Local, NaiveDate};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today_date();
    let mut session = state.session.lock().await;
    session.ledger.seed_day(today, &state.default_habits);
    let view = today_view(today, &session);
    Html(render_index(today, &view))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let today = today_date();
    let mut session = state.session.lock().await;
    session.ledger.seed_day(today, &state.default_habits);
    Ok(Json(today_view(today, &session)))
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<AddHabitRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("habit name must not be empty"));
    }

    let today = today_date();
    let mut session = state.session.lock().await;
    session.ledger.seed_day(today, &state.default_habits);
    session.ledger.add_habit(today, name);
    Ok(Json(today_view(today, &session)))
}

pub async fn set_completion(
    State(state): State<AppState>,
    Json(payload): Json<CompletionRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    let today = today_date();
    let mut session = state.session.lock().await;
    session.ledger.seed_day(today, &state.default_habits);
    session
        .ledger
        .set_completion(today, HabitId::from_u64(payload.habit_id), payload.done)?;
    let next = session.ledger.advance_streak(today, &session.streak);
    session.streak = next;
    Ok(Json(today_view(today, &session)))
}

pub async fn set_mood(
    State(state): State<AppState>,
    Json(payload): Json<MoodRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    if !(1..=10).contains(&payload.score) {
        return Err(AppError::bad_request("mood score must be between 1 and 10"));
    }

    let today = today_date();
    let mut session = state.session.lock().await;
    session.ledger.seed_day(today, &state.default_habits);
    session.ledger.set_mood(today, payload.score);
    Ok(Json(today_view(today, &session)))
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let today = today_date();
    let mut session = state.session.lock().await;
    session.ledger.seed_day(today, &state.default_habits);
    Ok(Json(session.ledger.day_summary(today, &session.streak)))
}

pub async fn get_partner(State(state): State<AppState>) -> Json<PartnerResponse> {
    let id: u32 = rand::random_range(1..=151);
    let fetched = fetch_partner(&state.http, &state.partner_api_base, id).await;
    Json(match fetched {
        Fetched::Value(partner) => PartnerResponse::Ok {
            name: partner.name,
            image: partner.image,
        },
        Fetched::Unavailable => PartnerResponse::Unavailable,
    })
}

fn today_view(date: NaiveDate, session: &Session) -> TodayResponse {
    let record = session.ledger.day(date);
    let habits = record
        .map(|record| {
            record
                .habits
                .iter()
                .map(|(id, habit)| HabitView {
                    id: id.as_u64(),
                    name: habit.name.clone(),
                    done: habit.done,
                })
                .collect()
        })
        .unwrap_or_default();

    TodayResponse {
        date: date.to_string(),
        habits,
        rate: session.ledger.completion_rate(date),
        mood: record.and_then(|record| record.mood),
        streak: session.streak.count,
        forest_level: forest_level(session.streak.count),
    }
}

fn today_date() -> NaiveDate {
    Local::now().date_naive()
}
