use crate::models::{
    BmiReport, CalorieBudget, DailyPoint, DailyWater, DashboardResponse, Goal, Meal,
    StatsResponse, UserProfile, WaterProgress, WeightEntry, Workout,
};
use crate::motivation;
use crate::repository::{keys, Repository};
use chrono::{Duration, Local, NaiveDate};

pub const DAILY_WATER_GOAL_ML: u32 = 2000;
pub const DAILY_CALORIE_TARGET: u64 = 2000;
const WEIGHT_SERIES_LEN: usize = 30;

/// A day without a workout today yields 0 even if yesterday closes a long run.
pub fn current_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 0u32;
    for date in dates {
        let days_diff = (today - date).num_days();
        if days_diff == i64::from(streak) {
            streak += 1;
        } else if days_diff > i64::from(streak) {
            break;
        }
    }
    streak
}

pub fn workout_streak(workouts: &[Workout], today: NaiveDate) -> u32 {
    current_streak(workouts.iter().map(|workout| workout.date), today)
}

pub fn weekly_series(workouts: &[Workout], today: NaiveDate) -> Vec<DailyPoint> {
    (0..7)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let (calories, duration) = workouts
                .iter()
                .filter(|workout| workout.date == date)
                .fold((0u64, 0u64), |(calories, duration), workout| {
                    (
                        calories + u64::from(workout.calories),
                        duration + u64::from(workout.duration),
                    )
                });
            DailyPoint {
                date: date_key(date),
                label: date.format("%a").to_string(),
                calories,
                duration,
            }
        })
        .collect()
}

pub fn meal_calories_on(meals: &[Meal], date: NaiveDate) -> u64 {
    meals
        .iter()
        .filter(|meal| meal.date == date)
        .map(|meal| u64::from(meal.calories))
        .sum()
}

pub fn water_on(records: &[DailyWater], date: NaiveDate) -> u32 {
    records
        .iter()
        .find(|record| record.date == date)
        .map_or(0, |record| record.water)
}

pub fn water_progress(records: &[DailyWater], today: NaiveDate) -> WaterProgress {
    let water_ml = water_on(records, today);
    WaterProgress {
        date: date_key(today),
        water_ml,
        goal_ml: DAILY_WATER_GOAL_ML,
        percentage: capped_percentage(u64::from(water_ml), u64::from(DAILY_WATER_GOAL_ML)),
    }
}

pub fn calorie_budget(meals: &[Meal], today: NaiveDate) -> CalorieBudget {
    let consumed = meal_calories_on(meals, today);
    CalorieBudget {
        date: date_key(today),
        consumed,
        target: DAILY_CALORIE_TARGET,
        remaining: DAILY_CALORIE_TARGET as i64 - consumed as i64,
        percentage: capped_percentage(consumed, DAILY_CALORIE_TARGET),
    }
}

pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    if !(height_m > 0.0 && weight_kg > 0.0) || !height_m.is_finite() || !weight_kg.is_finite() {
        return 0.0;
    }
    (weight_kg / (height_m * height_m) * 10.0).round() / 10.0
}

pub fn profile_bmi(profile: &UserProfile) -> f64 {
    match (parse_measure(&profile.height), parse_measure(&profile.weight)) {
        (Some(height), Some(weight)) => bmi(height, weight),
        _ => 0.0,
    }
}

pub fn bmi_report(bmi: f64) -> BmiReport {
    let (category, recommendation) = if bmi <= 0.0 {
        ("Enter your data", "")
    } else if bmi < 18.5 {
        ("Underweight", "Focus on strength training and calorie surplus")
    } else if bmi < 25.0 {
        ("Healthy Weight", "Maintain your current routine!")
    } else if bmi < 30.0 {
        ("Overweight", "Combine cardio with strength training")
    } else {
        ("Obese", "Consult with a healthcare professional")
    };

    BmiReport {
        bmi,
        category: category.to_string(),
        recommendation: recommendation.to_string(),
    }
}

pub fn weight_series(entries: &[WeightEntry]) -> Vec<WeightEntry> {
    let start = entries.len().saturating_sub(WEIGHT_SERIES_LEN);
    entries[start..].to_vec()
}

pub fn build_stats(repo: &impl Repository) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), repo)
}

pub fn build_stats_at(today: NaiveDate, repo: &impl Repository) -> StatsResponse {
    let workouts: Vec<Workout> = repo.get(keys::WORKOUTS);

    StatsResponse {
        streak: workout_streak(&workouts, today),
        last_7_days: weekly_series(&workouts, today),
        total_workouts: workouts.len(),
        total_calories: workouts.iter().map(|w| u64::from(w.calories)).sum(),
        total_minutes: workouts.iter().map(|w| u64::from(w.duration)).sum(),
    }
}

pub fn build_dashboard_at(today: NaiveDate, repo: &impl Repository) -> DashboardResponse {
    let workouts: Vec<Workout> = repo.get(keys::WORKOUTS);
    let water: Vec<DailyWater> = repo.get(keys::DAILY_DATA);
    let meals: Vec<Meal> = repo.get(keys::MEALS);
    let weights: Vec<WeightEntry> = repo.get(keys::WEIGHT_ENTRIES);
    let goals: Vec<Goal> = repo.get(keys::GOALS);
    let profile: UserProfile = repo.get(keys::USER_PROFILE);

    DashboardResponse {
        date: date_key(today),
        streak: workout_streak(&workouts, today),
        last_7_days: weekly_series(&workouts, today),
        water: water_progress(&water, today),
        calories: calorie_budget(&meals, today),
        weight_series: weight_series(&weights),
        bmi: bmi_report(profile_bmi(&profile)),
        goals_completed: goals.iter().filter(|goal| goal.completed).count(),
        goals_total: goals.len(),
        quote: motivation::peek_quote(repo, today),
    }
}

pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_measure(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn capped_percentage(value: u64, goal: u64) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (value as f64 / goal as f64 * 100.0).min(100.0)
}
