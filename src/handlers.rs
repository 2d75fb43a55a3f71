use crate::achievements;
use crate::errors::AppError;
use crate::models::{
    AchievementsResponse, AddWaterRequest, DashboardResponse, Goal, GoalToggleResponse, Meal,
    MealSuggestion, MealsResponse, NewGoal, NewMeal, NewWeightEntry, NewWorkout, Preferences,
    PreferencesUpdate, ProfileResponse, QuoteResponse, StatsResponse, UserProfile, WaterProgress,
    WeightEntry, Workout,
};
use crate::motivation;
use crate::repository::{keys, JsonStore, Repository};
use crate::state::AppState;
use crate::stats::{self, build_dashboard_at, build_stats};
use crate::storage::persist_store;
use crate::tracker;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use chrono::{Local, NaiveDate, Utc};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_index(&build_dashboard_at(today(), &*store)))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let store = state.store.lock().await;
    Json(build_dashboard_at(today(), &*store))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(build_stats(&*store)))
}

pub async fn list_workouts(State(state): State<AppState>) -> Json<Vec<Workout>> {
    let store = state.store.lock().await;
    Json(tracker::list_workouts(&*store))
}

pub async fn create_workout(
    State(state): State<AppState>,
    Json(payload): Json<NewWorkout>,
) -> Result<(StatusCode, Json<Workout>), AppError> {
    let workout = mutate(&state, |store| tracker::add_workout(store, payload, today())).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    mutate(&state, |store| tracker::delete_workout(store, &id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_weights(State(state): State<AppState>) -> Json<Vec<WeightEntry>> {
    let store = state.store.lock().await;
    Json(tracker::list_weights(&*store))
}

pub async fn create_weight(
    State(state): State<AppState>,
    Json(payload): Json<NewWeightEntry>,
) -> Result<(StatusCode, Json<WeightEntry>), AppError> {
    let entry = mutate(&state, |store| tracker::add_weight(store, payload, today())).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_goals(State(state): State<AppState>) -> Json<Vec<Goal>> {
    let store = state.store.lock().await;
    Json(tracker::list_goals(&*store))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Json(payload): Json<NewGoal>,
) -> Result<(StatusCode, Json<Goal>), AppError> {
    let goal = mutate(&state, |store| tracker::add_goal(store, payload, Utc::now())).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn toggle_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GoalToggleResponse>, AppError> {
    let response = mutate(&state, |store| tracker::toggle_goal(store, &id)).await?;
    Ok(Json(response))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    mutate(&state, |store| tracker::delete_goal(store, &id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_water(State(state): State<AppState>) -> Json<WaterProgress> {
    let store = state.store.lock().await;
    Json(water_progress(&store, today()))
}

pub async fn add_water(
    State(state): State<AppState>,
    payload: Option<Json<AddWaterRequest>>,
) -> Result<Json<WaterProgress>, AppError> {
    let amount = payload.and_then(|Json(body)| body.amount_ml);
    let date = today();
    let progress = mutate(&state, |store| {
        tracker::add_water(store, date, amount)?;
        Ok(water_progress(store, date))
    })
    .await?;
    Ok(Json(progress))
}

pub async fn water_add_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let date = today();
    mutate(&state, |store| tracker::add_water(store, date, None)).await?;
    Ok(Redirect::to("/"))
}

pub async fn list_meals(State(state): State<AppState>) -> Json<MealsResponse> {
    let store = state.store.lock().await;
    Json(meals_response(&store, today()))
}

pub async fn create_meal(
    State(state): State<AppState>,
    Json(payload): Json<NewMeal>,
) -> Result<(StatusCode, Json<Meal>), AppError> {
    let meal = mutate(&state, |store| tracker::add_meal(store, payload, today())).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

pub async fn list_suggestions() -> Json<&'static [MealSuggestion]> {
    Json(tracker::MEAL_SUGGESTIONS)
}

pub async fn add_suggestion(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<(StatusCode, Json<Meal>), AppError> {
    let meal = mutate(&state, |store| tracker::add_suggestion(store, index, today())).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    mutate(&state, |store| tracker::delete_meal(store, &id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    let store = state.store.lock().await;
    Json(profile_response(tracker::profile(&*store)))
}

pub async fn save_profile(
    State(state): State<AppState>,
    Json(payload): Json<UserProfile>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = mutate(&state, |store| tracker::save_profile(store, payload)).await?;
    Ok(Json(profile_response(profile)))
}

pub async fn get_achievements(
    State(state): State<AppState>,
) -> Result<Json<AchievementsResponse>, AppError> {
    let date = today();
    let (achievements, newly_unlocked) =
        mutate(&state, |store| achievements::refresh(store, date)).await?;
    Ok(Json(AchievementsResponse {
        achievements,
        newly_unlocked,
    }))
}

pub async fn get_quote(State(state): State<AppState>) -> Result<Json<QuoteResponse>, AppError> {
    let date = today();
    let quote = mutate(&state, |store| motivation::quote_of_the_day(store, date)).await?;
    Ok(Json(QuoteResponse {
        date: date.to_string(),
        quote,
    }))
}

pub async fn get_random_quote() -> Json<QuoteResponse> {
    Json(QuoteResponse {
        date: today().to_string(),
        quote: motivation::random_quote().to_string(),
    })
}

pub async fn get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    let store = state.store.lock().await;
    Json(tracker::preferences(&*store))
}

pub async fn save_preferences(
    State(state): State<AppState>,
    Json(payload): Json<PreferencesUpdate>,
) -> Result<Json<Preferences>, AppError> {
    let preferences = mutate(&state, |store| tracker::set_preferences(store, payload)).await?;
    Ok(Json(preferences))
}

async fn mutate<T>(
    state: &AppState,
    op: impl FnOnce(&mut JsonStore) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut store = state.store.lock().await;
    let value = op(&mut *store)?;
    persist_store(&state.data_path, &store).await?;
    Ok(value)
}

fn water_progress(store: &JsonStore, date: NaiveDate) -> WaterProgress {
    let records: Vec<_> = store.get(keys::DAILY_DATA);
    stats::water_progress(&records, date)
}

fn meals_response(store: &JsonStore, date: NaiveDate) -> MealsResponse {
    let all: Vec<Meal> = store.get(keys::MEALS);
    MealsResponse {
        meals: tracker::meals_on(store, date),
        budget: stats::calorie_budget(&all, date),
    }
}

fn profile_response(profile: UserProfile) -> ProfileResponse {
    let bmi = stats::bmi_report(stats::profile_bmi(&profile));
    ProfileResponse { profile, bmi }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
