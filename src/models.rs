use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::achievements::AchievementStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: u32,
    pub date: NaiveDate,
    pub calories: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    pub id: String,
    pub weight: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWater {
    pub date: NaiveDate,
    pub water: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        MealType::ALL
            .into_iter()
            .find(|meal| meal.as_str() == lower)
            .ok_or_else(|| {
                format!("invalid meal type '{s}', must be one of: breakfast, lunch, dinner, snack")
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    pub calories: u32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: String,
    pub height: String,
    pub weight: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub notifications_enabled: bool,
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications_enabled: false,
            dark_mode: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewWorkout {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: u32,
    pub date: Option<NaiveDate>,
    pub calories: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewWeightEntry {
    pub weight: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct NewGoal {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddWaterRequest {
    pub amount_ml: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct NewMeal {
    #[serde(rename = "type")]
    pub meal_type: String,
    pub name: String,
    pub calories: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct PreferencesUpdate {
    pub notifications_enabled: Option<bool>,
    pub dark_mode: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub label: String,
    pub calories: u64,
    pub duration: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub streak: u32,
    pub last_7_days: Vec<DailyPoint>,
    pub total_workouts: usize,
    pub total_calories: u64,
    pub total_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterProgress {
    pub date: String,
    pub water_ml: u32,
    pub goal_ml: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieBudget {
    pub date: String,
    pub consumed: u64,
    pub target: u64,
    pub remaining: i64,
    pub percentage: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MealsResponse {
    pub meals: Vec<Meal>,
    pub budget: CalorieBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MealSuggestion {
    pub name: &'static str,
    pub calories: u32,
    #[serde(rename = "type")]
    pub meal_type: MealType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiReport {
    pub bmi: f64,
    pub category: String,
    pub recommendation: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub bmi: BmiReport,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalToggleResponse {
    pub goal: Goal,
    pub just_completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub date: String,
    pub quote: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<AchievementStatus>,
    pub newly_unlocked: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date: String,
    pub streak: u32,
    pub last_7_days: Vec<DailyPoint>,
    pub water: WaterProgress,
    pub calories: CalorieBudget,
    pub weight_series: Vec<WeightEntry>,
    pub bmi: BmiReport,
    pub goals_completed: usize,
    pub goals_total: usize,
    pub quote: String,
}
