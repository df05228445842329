//! Common types used throughout the lineup service

use serde::{Deserialize, Serialize};

/// A competitor's skill estimate (Elo scale, typically 0 to 3000)
pub type Rating = f64;

/// Modeled likelihood, in [0, 1], that the first competitor wins
pub type WinProbability = f64;

/// Identifier used by the rating provider for a player profile
pub type PlayerId = String;

/// A rated competitor on a team roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub rating: Rating,
}

impl Player {
    pub fn new(name: impl Into<String>, rating: Rating) -> Self {
        Self {
            name: name.into(),
            rating,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An ordered team lineup; position `i` plays position `i` of the opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Reorder the roster by a permutation of its positions
    pub fn reordered(&self, order: &[usize]) -> Self {
        Self {
            players: order.iter().map(|&i| self.players[i].clone()).collect(),
        }
    }

    /// Home lineup used by the sample matchup
    pub fn sample_home() -> Self {
        Self::new(vec![
            Player::new("A1", 2000.0),
            Player::new("A2", 1920.0),
            Player::new("A3", 1800.0),
            Player::new("A4", 1700.0),
            Player::new("A5", 1750.0),
            Player::new("A6", 1500.0),
        ])
    }

    /// Away lineup used by the sample matchup
    pub fn sample_away() -> Self {
        Self::new(vec![
            Player::new("B1", 2300.0),
            Player::new("B2", 2000.0),
            Player::new("B3", 1825.0),
            Player::new("B4", 1800.0),
            Player::new("B5", 1705.0),
            Player::new("B6", 500.0),
        ])
    }
}

impl std::fmt::Display for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.players.iter().map(|p| p.name.as_str()).collect();
        write!(f, "({})", names.join(", "))
    }
}

/// Probabilities of each dual-meet result from the home team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeetOutcome {
    pub win: f64,
    pub tie: f64,
    pub loss: f64,
}

impl MeetOutcome {
    /// Expected meet score: win probability minus loss probability
    pub fn payoff(&self) -> f64 {
        self.win - self.loss
    }

    pub fn total(&self) -> f64 {
        self.win + self.tie + self.loss
    }
}

/// A lineup together with how often the averaged strategy plays it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedLineup {
    pub roster: Roster,
    pub probability: f64,
}
