use crate::errors::AppError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

pub mod keys {
    pub const WORKOUTS: &str = "workouts";
    pub const WEIGHT_ENTRIES: &str = "weightEntries";
    pub const GOALS: &str = "goals";
    pub const DAILY_DATA: &str = "dailyData";
    pub const MEALS: &str = "meals";
    pub const USER_PROFILE: &str = "userProfile";
    pub const UNLOCKED_ACHIEVEMENTS: &str = "unlockedAchievements";
    pub const NOTIFICATIONS_ENABLED: &str = "notificationsEnabled";
    pub const DARK_MODE: &str = "darkMode";
    pub const TODAY_QUOTE: &str = "todayQuote";
    pub const LAST_QUOTE_DATE: &str = "lastQuoteDate";
}

pub trait Repository {
    fn get_raw(&self, key: &str) -> Option<&Value>;

    fn set_raw(&mut self, key: &str, value: Value);

    fn get<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.get_or(key, T::default())
    }

    fn get_or<T>(&self, key: &str, fallback: T) -> T
    where
        T: DeserializeOwned,
    {
        match self.get_raw(key) {
            None | Some(Value::Null) => fallback,
            Some(value) => match T::deserialize(value) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!("ignoring malformed value under '{key}': {err}");
                    fallback
                }
            },
        }
    }

    fn set<T>(&mut self, key: &str, value: &T) -> Result<(), AppError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        self.set_raw(key, value);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonStore {
    entries: BTreeMap<String, Value>,
}

impl JsonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Repository for JsonStore {
    fn get_raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn set_raw(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Preferences;

    #[test]
    fn missing_key_reads_default() {
        let store = JsonStore::new();
        let workouts: Vec<crate::models::Workout> = store.get(keys::WORKOUTS);
        assert!(workouts.is_empty());
        assert!(store.get_or(keys::DARK_MODE, Preferences::default().dark_mode));
    }

    #[test]
    fn set_replaces_the_whole_value() {
        let mut store = JsonStore::new();
        store.set(keys::UNLOCKED_ACHIEVEMENTS, &["streak_7"]).unwrap();
        store
            .set(keys::UNLOCKED_ACHIEVEMENTS, &vec!["workouts_10".to_string()])
            .unwrap();
        let ids: Vec<String> = store.get(keys::UNLOCKED_ACHIEVEMENTS);
        assert_eq!(ids, vec!["workouts_10".to_string()]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn malformed_value_reads_default() {
        let mut store = JsonStore::new();
        store.set_raw(keys::GOALS, serde_json::json!({ "not": "a list" }));
        let goals: Vec<crate::models::Goal> = store.get(keys::GOALS);
        assert!(goals.is_empty());
    }

    #[test]
    fn store_serializes_as_flat_object() {
        let mut store = JsonStore::new();
        store.set(keys::NOTIFICATIONS_ENABLED, &true).unwrap();
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json, serde_json::json!({ "notificationsEnabled": true }));
    }
}
