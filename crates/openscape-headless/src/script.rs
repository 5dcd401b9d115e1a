//! Scripted input: actions stamped with the tick before which they are sent.
//!
//! ```json
//! {
//!   "ticks": 60,
//!   "steps": [
//!     { "tick": 0, "action": { "kind": "click_tile", "x": 14, "y": 10 } },
//!     { "tick": 5, "action": { "kind": "buy", "item": "bronze_kiteshield" } }
//!   ]
//! }
//! ```

use std::time::Duration;

use openscape_core::{Action, Session};
use serde::{Deserialize, Serialize};

/// One scheduled action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Tick counter value at which the action is submitted.
    pub tick: u64,
    /// The action.
    pub action: Action,
}

/// A replayable run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Total ticks to run. Defaults to the driver's tick count when absent.
    #[serde(default)]
    pub ticks: Option<u64>,
    /// Scheduled actions, in submission order for equal ticks.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Runs the script against `session`.
    ///
    /// Before each tick, every step scheduled for the current tick counter is
    /// submitted in order. Steps scheduled past the last tick are ignored.
    /// The clock passed to the session advances by the configured tick rate;
    /// with `realtime` the driver also sleeps that long between ticks.
    pub fn run(&self, session: &mut Session, default_ticks: u64, realtime: bool) {
        let total = self.ticks.unwrap_or(default_ticks);
        let rate = session.config().tick_rate_ms;

        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.tick);
        let mut pending = steps.into_iter().peekable();

        for tick in 0..total {
            let now_ms = tick * rate;
            while let Some(step) = pending.next_if(|s| s.tick <= tick) {
                tracing::debug!(tick, action = ?step.action, "scripted action");
                session.submit(step.action, now_ms);
            }
            session.step(now_ms);
            if realtime {
                std::thread::sleep(Duration::from_millis(rate));
            }
        }

        let skipped = pending.count();
        if skipped > 0 {
            tracing::warn!(skipped, total, "steps scheduled after the last tick were not sent");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openscape_core::SimConfig;

    #[test]
    fn parses_tagged_actions() {
        let json = r#"{
            "ticks": 3,
            "steps": [
                { "tick": 0, "action": { "kind": "equip", "index": 0 } },
                { "tick": 1, "action": { "kind": "tick" } }
            ]
        }"#;
        let script: Script = serde_json::from_str(json).unwrap();
        assert_eq!(script.ticks, Some(3));
        assert_eq!(script.steps[0].action, Action::Equip { index: 0 });
        assert_eq!(script.steps[1].action, Action::Tick);
    }

    #[test]
    fn empty_script_only_ticks() {
        let mut session = Session::new(SimConfig::default(), 1);
        Script::default().run(&mut session, 12, false);
        assert_eq!(session.tick(), 12);
    }

    #[test]
    fn steps_run_before_their_tick() {
        let script = Script {
            ticks: Some(2),
            steps: vec![Step {
                tick: 1,
                action: Action::Equip { index: 0 },
            }],
        };
        let mut session = Session::new(SimConfig::default(), 1);
        script.run(&mut session, 100, false);
        assert_eq!(session.tick(), 2);
        assert!(session.state().player.inventory.is_empty());
    }

    #[test]
    fn scripted_ticks_count_toward_the_total() {
        let script = Script {
            ticks: Some(4),
            steps: vec![Step {
                tick: 0,
                action: Action::Tick,
            }],
        };
        let mut session = Session::new(SimConfig::default(), 1);
        script.run(&mut session, 100, false);
        assert_eq!(session.tick(), 5);
    }
}
