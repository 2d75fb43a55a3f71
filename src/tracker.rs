use crate::errors::AppError;
use crate::models::{
    DailyWater, Goal, GoalToggleResponse, Meal, MealSuggestion, MealType, NewGoal, NewMeal,
    NewWeightEntry, NewWorkout, Preferences, PreferencesUpdate, UserProfile, WeightEntry, Workout,
};
use crate::repository::{keys, Repository};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_WATER_ML: u32 = 250;

pub const MEAL_SUGGESTIONS: &[MealSuggestion] = &[
    MealSuggestion {
        name: "Greek Yogurt with Berries",
        calories: 150,
        meal_type: MealType::Breakfast,
    },
    MealSuggestion {
        name: "Oatmeal with Banana",
        calories: 200,
        meal_type: MealType::Breakfast,
    },
    MealSuggestion {
        name: "Grilled Chicken Salad",
        calories: 350,
        meal_type: MealType::Lunch,
    },
    MealSuggestion {
        name: "Quinoa Bowl",
        calories: 400,
        meal_type: MealType::Lunch,
    },
    MealSuggestion {
        name: "Salmon with Vegetables",
        calories: 450,
        meal_type: MealType::Dinner,
    },
    MealSuggestion {
        name: "Lean Steak with Sweet Potato",
        calories: 500,
        meal_type: MealType::Dinner,
    },
    MealSuggestion {
        name: "Apple with Almond Butter",
        calories: 180,
        meal_type: MealType::Snack,
    },
    MealSuggestion {
        name: "Protein Smoothie",
        calories: 220,
        meal_type: MealType::Snack,
    },
];

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn list_workouts(repo: &impl Repository) -> Vec<Workout> {
    repo.get(keys::WORKOUTS)
}

pub fn add_workout(
    repo: &mut impl Repository,
    input: NewWorkout,
    today: NaiveDate,
) -> Result<Workout, AppError> {
    let kind = input.kind.trim();
    if kind.is_empty() {
        return Err(AppError::bad_request("please fill in all required fields"));
    }
    if input.duration == 0 {
        return Err(AppError::bad_request("duration must be greater than zero"));
    }

    let workout = Workout {
        id: new_id(),
        kind: kind.to_string(),
        duration: input.duration,
        date: input.date.unwrap_or(today),
        calories: input.calories,
        notes: input
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty()),
    };

    let mut workouts = list_workouts(repo);
    workouts.push(workout.clone());
    repo.set(keys::WORKOUTS, &workouts)?;
    info!(id = %workout.id, kind = %workout.kind, date = %workout.date, "workout added");
    Ok(workout)
}

pub fn delete_workout(repo: &mut impl Repository, id: &str) -> Result<(), AppError> {
    let mut workouts = list_workouts(repo);
    remove_by_id(&mut workouts, id, |w| &w.id)
        .ok_or_else(|| AppError::not_found("workout", id))?;
    repo.set(keys::WORKOUTS, &workouts)
}

pub fn list_weights(repo: &impl Repository) -> Vec<WeightEntry> {
    repo.get(keys::WEIGHT_ENTRIES)
}

pub fn add_weight(
    repo: &mut impl Repository,
    input: NewWeightEntry,
    today: NaiveDate,
) -> Result<WeightEntry, AppError> {
    if !(input.weight > 0.0) || !input.weight.is_finite() {
        return Err(AppError::bad_request("please enter weight"));
    }

    let entry = WeightEntry {
        id: new_id(),
        weight: input.weight,
        date: input.date.unwrap_or(today),
    };

    let mut entries = list_weights(repo);
    entries.push(entry.clone());
    entries.sort_by_key(|entry| entry.date);
    repo.set(keys::WEIGHT_ENTRIES, &entries)?;
    Ok(entry)
}

pub fn list_goals(repo: &impl Repository) -> Vec<Goal> {
    repo.get(keys::GOALS)
}

pub fn add_goal(
    repo: &mut impl Repository,
    input: NewGoal,
    now: DateTime<Utc>,
) -> Result<Goal, AppError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("goal title must not be empty"));
    }

    let goal = Goal {
        id: new_id(),
        title: title.to_string(),
        completed: false,
        created_at: now,
    };

    let mut goals = list_goals(repo);
    goals.push(goal.clone());
    repo.set(keys::GOALS, &goals)?;
    Ok(goal)
}

pub fn toggle_goal(repo: &mut impl Repository, id: &str) -> Result<GoalToggleResponse, AppError> {
    let mut goals = list_goals(repo);
    let goal = goals
        .iter_mut()
        .find(|goal| goal.id == id)
        .ok_or_else(|| AppError::not_found("goal", id))?;

    goal.completed = !goal.completed;
    let response = GoalToggleResponse {
        goal: goal.clone(),
        just_completed: goal.completed,
    };
    repo.set(keys::GOALS, &goals)?;

    if response.just_completed {
        info!(id, title = %response.goal.title, "goal completed");
    }
    Ok(response)
}

pub fn delete_goal(repo: &mut impl Repository, id: &str) -> Result<(), AppError> {
    let mut goals = list_goals(repo);
    remove_by_id(&mut goals, id, |g| &g.id).ok_or_else(|| AppError::not_found("goal", id))?;
    repo.set(keys::GOALS, &goals)
}

pub fn add_water(
    repo: &mut impl Repository,
    today: NaiveDate,
    amount_ml: Option<u32>,
) -> Result<DailyWater, AppError> {
    let amount = amount_ml.unwrap_or(DEFAULT_WATER_ML);
    if amount == 0 {
        return Err(AppError::bad_request("amount must be greater than zero"));
    }

    let mut records: Vec<DailyWater> = repo.get(keys::DAILY_DATA);
    let record = match records.iter_mut().find(|record| record.date == today) {
        Some(record) => {
            record.water = record.water.saturating_add(amount);
            record.clone()
        }
        None => {
            let record = DailyWater {
                date: today,
                water: amount,
            };
            records.push(record.clone());
            record
        }
    };

    repo.set(keys::DAILY_DATA, &records)?;
    Ok(record)
}

pub fn meals_on(repo: &impl Repository, date: NaiveDate) -> Vec<Meal> {
    let meals: Vec<Meal> = repo.get(keys::MEALS);
    meals.into_iter().filter(|meal| meal.date == date).collect()
}

pub fn add_meal(
    repo: &mut impl Repository,
    input: NewMeal,
    today: NaiveDate,
) -> Result<Meal, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("please enter meal name and calories"));
    }
    let meal_type: MealType = input.meal_type.parse().map_err(AppError::bad_request)?;

    push_meal(repo, meal_type, name.to_string(), input.calories, today)
}

pub fn add_suggestion(
    repo: &mut impl Repository,
    index: usize,
    today: NaiveDate,
) -> Result<Meal, AppError> {
    let suggestion = MEAL_SUGGESTIONS
        .get(index)
        .ok_or_else(|| AppError::not_found("meal suggestion", &index.to_string()))?;

    push_meal(
        repo,
        suggestion.meal_type,
        suggestion.name.to_string(),
        suggestion.calories,
        today,
    )
}

pub fn delete_meal(repo: &mut impl Repository, id: &str) -> Result<(), AppError> {
    let mut meals: Vec<Meal> = repo.get(keys::MEALS);
    remove_by_id(&mut meals, id, |m| &m.id).ok_or_else(|| AppError::not_found("meal", id))?;
    repo.set(keys::MEALS, &meals)
}

fn push_meal(
    repo: &mut impl Repository,
    meal_type: MealType,
    name: String,
    calories: u32,
    date: NaiveDate,
) -> Result<Meal, AppError> {
    let meal = Meal {
        id: new_id(),
        meal_type,
        name,
        calories,
        date,
    };

    let mut meals: Vec<Meal> = repo.get(keys::MEALS);
    meals.push(meal.clone());
    repo.set(keys::MEALS, &meals)?;
    Ok(meal)
}

pub fn profile(repo: &impl Repository) -> UserProfile {
    repo.get(keys::USER_PROFILE)
}

pub fn save_profile(
    repo: &mut impl Repository,
    profile: UserProfile,
) -> Result<UserProfile, AppError> {
    repo.set(keys::USER_PROFILE, &profile)?;
    Ok(profile)
}

pub fn preferences(repo: &impl Repository) -> Preferences {
    let defaults = Preferences::default();
    Preferences {
        notifications_enabled: repo
            .get_or(keys::NOTIFICATIONS_ENABLED, defaults.notifications_enabled),
        dark_mode: repo.get_or(keys::DARK_MODE, defaults.dark_mode),
    }
}

pub fn set_preferences(
    repo: &mut impl Repository,
    update: PreferencesUpdate,
) -> Result<Preferences, AppError> {
    if let Some(enabled) = update.notifications_enabled {
        repo.set(keys::NOTIFICATIONS_ENABLED, &enabled)?;
    }
    if let Some(dark) = update.dark_mode {
        repo.set(keys::DARK_MODE, &dark)?;
    }
    Ok(preferences(repo))
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &String) -> Option<T> {
    let index = items.iter().position(|item| key(item) == id)?;
    Some(items.remove(index))
}
