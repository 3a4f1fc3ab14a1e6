#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure round lifecycle system driving a campaign of slingshot rounds.
//!
//! The director consumes [`Event`] streams and responds exclusively with new
//! [`Command`] batches: a lost round is restarted from the same spec, a won
//! round advances the campaign to the next spec, and winning the final round
//! marks the campaign complete.

use slingshot_core::{Command, Event, RoundOutcome, RoundSpec};

/// Ordered list of rounds that make up one campaign.
#[derive(Clone, Debug)]
pub struct Config {
    rounds: Vec<RoundSpec>,
}

impl Config {
    /// Creates a campaign configuration from an ordered round list.
    #[must_use]
    pub fn new(rounds: Vec<RoundSpec>) -> Self {
        Self { rounds }
    }
}

/// System that owns round progression across a campaign.
#[derive(Debug)]
pub struct Director {
    rounds: Vec<RoundSpec>,
    current: usize,
    campaign_complete: bool,
}

impl Director {
    /// Creates a director for the supplied campaign.
    ///
    /// An empty campaign is considered complete from the start.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let campaign_complete = config.rounds.is_empty();
        Self {
            rounds: config.rounds,
            current: 0,
            campaign_complete,
        }
    }

    /// Emits the command that configures the campaign's first round.
    pub fn start(&self, out: &mut Vec<Command>) {
        if let Some(spec) = self.rounds.first() {
            out.push(Command::ConfigureRound { spec: spec.clone() });
        }
    }

    /// Consumes round judgements and emits lifecycle commands in response.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            let Event::RoundEnded { outcome } = event else {
                continue;
            };
            match outcome {
                RoundOutcome::Lost => {
                    out.push(Command::RestartRound);
                }
                RoundOutcome::Won => {
                    if self.has_next_round() {
                        self.current += 1;
                        out.push(Command::ConfigureRound {
                            spec: self.rounds[self.current].clone(),
                        });
                    } else {
                        self.campaign_complete = true;
                    }
                }
                RoundOutcome::InProgress => {}
            }
        }
    }

    /// Zero-based index of the round currently being played.
    #[must_use]
    pub fn current_round(&self) -> usize {
        self.current
    }

    /// Reports whether another round follows the current one.
    #[must_use]
    pub fn has_next_round(&self) -> bool {
        self.current + 1 < self.rounds.len()
    }

    /// Reports whether the final round has been won.
    #[must_use]
    pub fn campaign_complete(&self) -> bool {
        self.campaign_complete
    }
}
