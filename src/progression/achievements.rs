//! Achievements unlocked from lifetime progress

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::profile::Difficulty;
use crate::sim::SessionSummary;

/// What has to be reached to unlock an achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Requirement {
    /// Best score on any difficulty
    Score(u64),
    /// Best score on one difficulty
    DifficultyScore(Difficulty, u64),
    /// Lifetime hazard kills
    Kills(u64),
    /// Lifetime coins collected
    Coins(u64),
    GamesPlayed(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub requirement: Requirement,
    /// Coins paid into the wallet on unlock
    pub reward: u64,
}

const fn achievement(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    requirement: Requirement,
    reward: u64,
) -> Achievement {
    Achievement {
        id,
        name,
        description,
        requirement,
        reward,
    }
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    achievement("score_10", "First Steps", "Score 10 points", Requirement::Score(10), 50),
    achievement("score_25", "Getting Better", "Score 25 points", Requirement::Score(25), 100),
    achievement("score_50", "Pro Player", "Score 50 points", Requirement::Score(50), 250),
    achievement("score_100", "Master", "Score 100 points", Requirement::Score(100), 500),
    achievement("score_150", "Legend", "Score 150 points", Requirement::Score(150), 1000),
    achievement("kills_10", "Hunter", "Destroy 10 hazards", Requirement::Kills(10), 100),
    achievement("kills_50", "Warrior", "Destroy 50 hazards", Requirement::Kills(50), 300),
    achievement("kills_100", "Destroyer", "Destroy 100 hazards", Requirement::Kills(100), 750),
    achievement("kills_250", "Annihilator", "Destroy 250 hazards", Requirement::Kills(250), 1500),
    achievement("coins_100", "Collector", "Collect 100 coins total", Requirement::Coins(100), 50),
    achievement("coins_500", "Rich", "Collect 500 coins total", Requirement::Coins(500), 200),
    achievement(
        "coins_2500",
        "Millionaire",
        "Collect 2500 coins total",
        Requirement::Coins(2500),
        500,
    ),
    achievement("games_10", "Dedicated", "Play 10 games", Requirement::GamesPlayed(10), 100),
    achievement("games_50", "Addicted", "Play 50 games", Requirement::GamesPlayed(50), 300),
    achievement(
        "easy_30",
        "Easy Champion",
        "Score 30 in Easy mode",
        Requirement::DifficultyScore(Difficulty::Easy, 30),
        150,
    ),
    achievement(
        "hard_25",
        "Hard Challenger",
        "Score 25 in Hard mode",
        Requirement::DifficultyScore(Difficulty::Hard, 25),
        200,
    ),
    achievement(
        "hard_50",
        "Hard Master",
        "Score 50 in Hard mode",
        Requirement::DifficultyScore(Difficulty::Hard, 50),
        400,
    ),
    achievement(
        "crazy_20",
        "Crazy Survivor",
        "Score 20 in Crazy mode",
        Requirement::DifficultyScore(Difficulty::Crazy, 20),
        300,
    ),
    achievement(
        "crazy_50",
        "Crazy Legend",
        "Score 50 in Crazy mode",
        Requirement::DifficultyScore(Difficulty::Crazy, 50),
        750,
    ),
];

/// Look up an achievement by id
pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Lifetime counters the achievements are checked against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementProgress {
    /// Ids of unlocked achievements, in unlock order
    pub unlocked: Vec<String>,
    pub games_played: u32,
    pub best_scores: BTreeMap<Difficulty, u64>,
    pub total_coins: u64,
    pub total_kills: u64,
}

impl AchievementProgress {
    /// Fold a finished session into the lifetime counters
    pub fn record(&mut self, difficulty: Difficulty, summary: &SessionSummary) {
        self.games_played = self.games_played.saturating_add(1);
        self.total_coins = self.total_coins.saturating_add(summary.coins_collected);
        self.total_kills = self
            .total_kills
            .saturating_add(u64::from(summary.kill_count));
        let best = self.best_scores.entry(difficulty).or_insert(0);
        *best = (*best).max(summary.final_score);
    }

    pub fn best_score(&self, difficulty: Difficulty) -> u64 {
        self.best_scores.get(&difficulty).copied().unwrap_or(0)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    pub(crate) fn meets(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Score(value) => {
                self.best_scores.values().copied().max().unwrap_or(0) >= value
            }
            Requirement::DifficultyScore(difficulty, value) => self.best_score(difficulty) >= value,
            Requirement::Kills(value) => self.total_kills >= value,
            Requirement::Coins(value) => self.total_coins >= value,
            Requirement::GamesPlayed(value) => self.games_played >= value,
        }
    }

    /// Unlock every achievement whose requirement is now met
    ///
    /// Returns the newly unlocked achievements and their summed reward.
    pub fn check(&mut self) -> (Vec<&'static Achievement>, u64) {
        let mut unlocked = Vec::new();
        let mut reward = 0;
        for achievement in ACHIEVEMENTS {
            if self.is_unlocked(achievement.id) || !self.meets(achievement.requirement) {
                continue;
            }
            log::info!("Achievement unlocked: {} (+{})", achievement.name, achievement.reward);
            self.unlocked.push(achievement.id.to_string());
            reward += achievement.reward;
            unlocked.push(achievement);
        }
        (unlocked, reward)
    }
}
