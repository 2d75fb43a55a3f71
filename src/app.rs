use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/water/add", post(handlers::water_add_form))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/workouts",
            get(handlers::list_workouts).post(handlers::create_workout),
        )
        .route("/api/workouts/:id", delete(handlers::delete_workout))
        .route(
            "/api/weights",
            get(handlers::list_weights).post(handlers::create_weight),
        )
        .route("/api/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route("/api/goals/:id/toggle", post(handlers::toggle_goal))
        .route("/api/goals/:id", delete(handlers::delete_goal))
        .route("/api/water", get(handlers::get_water).post(handlers::add_water))
        .route("/api/meals", get(handlers::list_meals).post(handlers::create_meal))
        .route("/api/meals/suggestions", get(handlers::list_suggestions))
        .route("/api/meals/suggestions/:index", post(handlers::add_suggestion))
        .route("/api/meals/:id", delete(handlers::delete_meal))
        .route("/api/profile", get(handlers::get_profile).put(handlers::save_profile))
        .route("/api/achievements", get(handlers::get_achievements))
        .route("/api/quote", get(handlers::get_quote))
        .route("/api/quote/random", get(handlers::get_random_quote))
        .route(
            "/api/preferences",
            get(handlers::get_preferences).put(handlers::save_preferences),
        )
        .with_state(state)
}
