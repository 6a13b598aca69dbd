//! Progression layer fed by finished sessions
//!
//! Holds per-difficulty leaderboards, lifetime achievement progress, the
//! coin wallet and the shop inventory it pays for. Nothing here touches
//! storage: callers serialize `Progress` to JSON and keep it wherever they
//! like.

pub mod achievements;
pub mod highscores;
pub mod shop;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use achievements::{ACHIEVEMENTS, Achievement, AchievementProgress, Requirement};
pub use highscores::{HighScoreEntry, HighScores, MAX_HIGH_SCORES};
pub use shop::{Inventory, ItemKind, SHOP_BIRDS, SHOP_WEAPONS, ShopItem};

use crate::error::GameError;
use crate::profile::Difficulty;
use crate::sim::SessionSummary;

/// What recording one session changed
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// Leaderboard rank reached (1-indexed), if any
    pub rank: Option<usize>,
    /// Beat the previous best on this difficulty
    pub new_best: bool,
    pub unlocked: Vec<&'static Achievement>,
    /// Coins paid out for the unlocked achievements
    pub reward: u64,
}

/// Everything the player keeps between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub high_scores: BTreeMap<Difficulty, HighScores>,
    pub achievements: AchievementProgress,
    /// Spendable coins: collected coins plus achievement rewards, minus purchases
    pub wallet: u64,
    pub inventory: Inventory,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaderboard for a difficulty (empty if never played)
    pub fn high_scores(&self, difficulty: Difficulty) -> HighScores {
        self.high_scores.get(&difficulty).cloned().unwrap_or_default()
    }

    /// Fold a session-end summary into leaderboards, achievements and wallet
    pub fn record_session(
        &mut self,
        difficulty: Difficulty,
        summary: &SessionSummary,
        timestamp: f64,
    ) -> SessionOutcome {
        let table = self.high_scores.entry(difficulty).or_default();
        let previous_best = table.top_score();
        let rank = table.add_score(summary, timestamp);
        let new_best = summary.final_score > 0
            && previous_best.is_none_or(|best| summary.final_score > best);

        self.achievements.record(difficulty, summary);
        let (unlocked, reward) = self.achievements.check();
        self.wallet = self
            .wallet
            .saturating_add(summary.coins_collected)
            .saturating_add(reward);

        log::info!(
            "Recorded {} session: score {}, rank {:?}, {} achievements, wallet {}",
            difficulty,
            summary.final_score,
            rank,
            unlocked.len(),
            self.wallet
        );

        SessionOutcome {
            rank,
            new_best,
            unlocked,
            reward,
        }
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse saved progress (missing fields start empty)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u64, coins: u64, kills: u32) -> SessionSummary {
        SessionSummary {
            final_score: score,
            coins_collected: coins,
            kill_count: kills,
        }
    }

    #[test]
    fn test_first_session_is_new_best() {
        let mut progress = Progress::new();
        let outcome = progress.record_session(Difficulty::Hard, &summary(26, 4, 0), 1000.0);
        assert_eq!(outcome.rank, Some(1));
        assert!(outcome.new_best);
        assert_eq!(outcome.reward, 50 + 100 + 200);
        assert_eq!(progress.wallet, 4 + outcome.reward);
        assert_eq!(progress.high_scores(Difficulty::Hard).top_score(), Some(26));
        assert!(progress.high_scores(Difficulty::Easy).is_empty());
    }

    #[test]
    fn test_lower_score_ranks_without_new_best() {
        let mut progress = Progress::new();
        progress.record_session(Difficulty::Easy, &summary(8, 0, 0), 1.0);
        let outcome = progress.record_session(Difficulty::Easy, &summary(5, 2, 0), 2.0);
        assert_eq!(outcome.rank, Some(2));
        assert!(!outcome.new_best);
        assert!(outcome.unlocked.is_empty());
    }

    #[test]
    fn test_zero_score_counts_as_game_only() {
        let mut progress = Progress::new();
        let outcome = progress.record_session(Difficulty::Crazy, &summary(0, 0, 0), 1.0);
        assert_eq!(outcome.rank, None);
        assert!(!outcome.new_best);
        assert_eq!(progress.achievements.games_played, 1);
    }

    #[test]
    fn test_json_round_trip() {
        let mut progress = Progress::new();
        progress.record_session(Difficulty::Crazy, &summary(21, 9, 3), 5.0);
        let json = progress.to_json().expect("serialize");
        let loaded = Progress::from_json(&json).expect("parse");
        assert_eq!(loaded, progress);
        assert!(loaded.achievements.is_unlocked("crazy_20"));
    }

    #[test]
    fn test_from_json_defaults_and_errors() {
        let empty = Progress::from_json("{}").expect("empty object");
        assert_eq!(empty, Progress::default());
        assert!(matches!(Progress::from_json("[1,2"), Err(GameError::Json(_))));
    }
}
