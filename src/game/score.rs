use tracing::debug;

use crate::entity::PlayerId;
use crate::events::GameEvent;

/// Cumulative scores of a match, carried across rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    names: Vec<String>,
    scores: Vec<i32>,
    frozen: Option<Vec<i32>>,
}

impl Scoreboard {
    pub fn new(names: Vec<String>) -> Self {
        let scores = vec![0; names.len()];
        Scoreboard {
            names,
            scores,
            frozen: None,
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Applies a kill: +1 for killing someone else, -1 for killing yourself.
    pub fn record(&mut self, event: &GameEvent) {
        let GameEvent::PlayerKilled { victim, killer } = *event else {
            return;
        };
        let (player, delta) = if victim == killer { (victim, -1) } else { (killer, 1) };
        if let Some(score) = self.scores.get_mut(player) {
            *score += delta;
            debug!(player, delta, score = *score, "Score changed");
        }
    }

    pub fn score(&self, player: PlayerId) -> Option<i32> {
        self.scores.get(player).copied()
    }

    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    pub fn name(&self, player: PlayerId) -> Option<&str> {
        self.names.get(player).map(String::as_str)
    }

    /// Snapshots the scores at the end of a round.
    pub fn freeze(&mut self) {
        self.frozen = Some(self.scores.clone());
    }

    pub fn thaw(&mut self) {
        self.frozen = None;
    }

    /// The scores as of the last finished round, while it is being shown.
    pub fn final_scores(&self) -> Option<&[i32]> {
        self.frozen.as_deref()
    }

    /// `(name, score)` rows, best first. Ties keep roster order.
    pub fn table(&self) -> Vec<(&str, i32)> {
        let mut rows: Vec<(&str, i32)> = self.names.iter().map(String::as_str).zip(self.scores.iter().copied()).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}
