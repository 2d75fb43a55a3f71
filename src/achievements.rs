use crate::errors::AppError;
use crate::models::{Goal, Workout};
use crate::repository::{keys, Repository};
use crate::stats::workout_streak;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    Streak,
    Workouts,
    CompletedGoals,
}

struct Achievement {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    metric: Metric,
    target: u32,
}

const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "streak_7",
        title: "Week Warrior",
        description: "Complete a 7-day workout streak",
        metric: Metric::Streak,
        target: 7,
    },
    Achievement {
        id: "workouts_10",
        title: "Getting Started",
        description: "Complete 10 workouts",
        metric: Metric::Workouts,
        target: 10,
    },
    Achievement {
        id: "workouts_25",
        title: "Dedicated",
        description: "Complete 25 workouts",
        metric: Metric::Workouts,
        target: 25,
    },
    Achievement {
        id: "goals_5",
        title: "Goal Getter",
        description: "Complete 5 goals",
        metric: Metric::CompletedGoals,
        target: 5,
    },
    Achievement {
        id: "goals_10",
        title: "Achiever",
        description: "Complete 10 goals",
        metric: Metric::CompletedGoals,
        target: 10,
    },
    Achievement {
        id: "streak_30",
        title: "Unstoppable",
        description: "Complete a 30-day workout streak",
        metric: Metric::Streak,
        target: 30,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub streak: u32,
    pub workouts: u32,
    pub completed_goals: u32,
}

impl Progress {
    pub fn collect(workouts: &[Workout], goals: &[Goal], today: NaiveDate) -> Self {
        Self {
            streak: workout_streak(workouts, today),
            workouts: u32::try_from(workouts.len()).unwrap_or(u32::MAX),
            completed_goals: u32::try_from(goals.iter().filter(|g| g.completed).count())
                .unwrap_or(u32::MAX),
        }
    }

    fn value(&self, metric: Metric) -> u32 {
        match metric {
            Metric::Streak => self.streak,
            Metric::Workouts => self.workouts,
            Metric::CompletedGoals => self.completed_goals,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementStatus {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unlocked: bool,
    pub progress: u32,
    pub target: u32,
    pub percent: f64,
}

pub fn evaluate(progress: &Progress) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|achievement| {
            let value = progress.value(achievement.metric);
            AchievementStatus {
                id: achievement.id.to_string(),
                title: achievement.title.to_string(),
                description: achievement.description.to_string(),
                unlocked: value >= achievement.target,
                progress: value.min(achievement.target),
                target: achievement.target,
                percent: (f64::from(value) / f64::from(achievement.target) * 100.0).min(100.0),
            }
        })
        .collect()
}

pub fn unlock_new(
    repo: &mut impl Repository,
    statuses: &[AchievementStatus],
) -> Result<Vec<String>, AppError> {
    let mut unlocked: Vec<String> = repo.get(keys::UNLOCKED_ACHIEVEMENTS);
    let newly: Vec<String> = statuses
        .iter()
        .filter(|status| status.unlocked && !unlocked.contains(&status.id))
        .map(|status| status.id.clone())
        .collect();

    if !newly.is_empty() {
        info!(achievements = ?newly, "achievements unlocked");
        unlocked.extend(newly.iter().cloned());
        repo.set(keys::UNLOCKED_ACHIEVEMENTS, &unlocked)?;
    }
    Ok(newly)
}

pub fn refresh(
    repo: &mut impl Repository,
    today: NaiveDate,
) -> Result<(Vec<AchievementStatus>, Vec<String>), AppError> {
    let workouts: Vec<Workout> = repo.get(keys::WORKOUTS);
    let goals: Vec<Goal> = repo.get(keys::GOALS);
    let statuses = evaluate(&Progress::collect(&workouts, &goals, today));
    let newly = unlock_new(repo, &statuses)?;
    Ok((statuses, newly))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::JsonStore;

    #[test]
    fn progress_is_clamped_to_target() {
        let statuses = evaluate(&Progress {
            streak: 3,
            workouts: 12,
            completed_goals: 0,
        });
        let by_id = |id: &str| statuses.iter().find(|s| s.id == id).unwrap().clone();

        let week = by_id("streak_7");
        assert!(!week.unlocked);
        assert_eq!(week.progress, 3);

        let started = by_id("workouts_10");
        assert!(started.unlocked);
        assert_eq!(started.progress, 10);
        assert_eq!(started.percent, 100.0);

        let dedicated = by_id("workouts_25");
        assert!(!dedicated.unlocked);
        assert_eq!(dedicated.progress, 12);
        assert_eq!(dedicated.percent, 48.0);
    }

    #[test]
    fn unlocks_are_reported_once() {
        let mut store = JsonStore::new();
        let statuses = evaluate(&Progress {
            streak: 7,
            workouts: 10,
            completed_goals: 5,
        });

        let first = unlock_new(&mut store, &statuses).unwrap();
        assert_eq!(first, vec!["streak_7", "workouts_10", "goals_5"]);

        let second = unlock_new(&mut store, &statuses).unwrap();
        assert!(second.is_empty());

        let stored: Vec<String> = store.get(keys::UNLOCKED_ACHIEVEMENTS);
        assert_eq!(stored.len(), 3);
    }

    #[test]
    fn refresh_reads_collections_from_store() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut store = JsonStore::new();
        let workouts: Vec<Workout> = (0..10)
            .map(|i| Workout {
                id: i.to_string(),
                kind: "Yoga".into(),
                duration: 20,
                date: today,
                calories: 90,
                notes: None,
            })
            .collect();
        store.set(keys::WORKOUTS, &workouts).unwrap();

        let (statuses, newly) = refresh(&mut store, today).unwrap();
        assert_eq!(statuses.len(), 6);
        assert_eq!(newly, vec!["workouts_10"]);
    }
}
