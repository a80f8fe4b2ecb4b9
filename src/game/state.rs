use strum_macros::AsRefStr;

use crate::entity::PlayerId;

/// The lifecycle of a match.
///
/// `Loading` waits for a round to be started, `Running` simulates it, `RoundOver`
/// holds the frozen result until the next round is requested. `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
pub enum GameStage {
    #[default]
    Loading,
    Running,
    RoundOver {
        /// The last player standing, if anyone survived.
        winner: Option<PlayerId>,
    },
    Terminated,
}

impl GameStage {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStage::Running)
    }
}
