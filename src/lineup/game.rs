//! Two-team lineup game in normal form
//!
//! Each side's strategies are orderings of its roster. The payoff for the
//! home side is the expected meet score; the away side receives its
//! negation.

use crate::error::Result;
use crate::lineup::meet::{outcome_from_match_probabilities, ratings, validate_matchup};
use crate::lineup::permutation::PermutationIndex;
use crate::rating::WinProbabilityModel;
use crate::types::{MeetOutcome, Roster};
use tracing::debug;

/// Strategies available to one team
#[derive(Debug, Clone)]
pub struct StrategySet {
    roster: Roster,
    orders: Vec<Vec<usize>>,
}

impl StrategySet {
    /// Every ordering of the roster, in permutation-id order
    pub fn all_orderings(roster: Roster) -> Result<Self> {
        let orders = if roster.len() == 6 {
            PermutationIndex::six().iter().map(|p| p.to_vec()).collect()
        } else {
            PermutationIndex::new(roster.len())?
                .iter()
                .map(|p| p.to_vec())
                .collect()
        };
        Ok(Self { roster, orders })
    }

    /// Only the roster's given order
    pub fn fixed(roster: Roster) -> Self {
        let orders = vec![(0..roster.len()).collect()];
        Self { roster, orders }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Position order of strategy `id`
    pub fn order(&self, id: usize) -> Option<&[usize]> {
        self.orders.get(id).map(Vec::as_slice)
    }

    /// Lineup played by strategy `id`
    pub fn lineup(&self, id: usize) -> Option<Roster> {
        self.order(id).map(|order| self.roster.reordered(order))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

/// Payoff matrix between the home and away strategy sets
#[derive(Debug, Clone)]
pub struct LineupGame {
    home: StrategySet,
    away: StrategySet,
    outcomes: Vec<Vec<MeetOutcome>>,
}

impl LineupGame {
    /// Build the game; home always permutes, away only when `away_permutes`
    pub fn new(
        home_roster: Roster,
        away_roster: Roster,
        away_permutes: bool,
        model: &dyn WinProbabilityModel,
    ) -> Result<Self> {
        validate_matchup(&home_roster, &away_roster)?;

        let home = StrategySet::all_orderings(home_roster)?;
        let away = if away_permutes {
            StrategySet::all_orderings(away_roster)?
        } else {
            StrategySet::fixed(away_roster)
        };

        // Match probabilities only depend on which two players meet
        let table = model.pairwise(&ratings(home.roster()), &ratings(away.roster()));

        let outcomes = home
            .orders
            .iter()
            .map(|home_order| {
                away.orders
                    .iter()
                    .map(|away_order| {
                        let probabilities: Vec<f64> = home_order
                            .iter()
                            .zip(away_order)
                            .map(|(&h, &a)| table[h][a])
                            .collect();
                        outcome_from_match_probabilities(&probabilities)
                    })
                    .collect()
            })
            .collect();

        debug!(
            "Built lineup game with {} home and {} away strategies using the {} model",
            home.len(),
            away.len(),
            model.name()
        );

        Ok(Self {
            home,
            away,
            outcomes,
        })
    }

    pub fn home(&self) -> &StrategySet {
        &self.home
    }

    pub fn away(&self) -> &StrategySet {
        &self.away
    }

    /// Meet outcome when home plays `home_id` and away plays `away_id`
    pub fn outcome(&self, home_id: usize, away_id: usize) -> MeetOutcome {
        self.outcomes[home_id][away_id]
    }

    /// Home payoff for a strategy pair
    pub fn home_payoff(&self, home_id: usize, away_id: usize) -> f64 {
        self.outcomes[home_id][away_id].payoff()
    }

    /// Away payoff for a strategy pair
    pub fn away_payoff(&self, away_id: usize, home_id: usize) -> f64 {
        -self.home_payoff(home_id, away_id)
    }

    /// Home strategy with the best payoff against a fixed away strategy
    pub fn best_home_response(&self, away_id: usize) -> usize {
        (0..self.home.len())
            .max_by(|&x, &y| {
                self.home_payoff(x, away_id)
                    .total_cmp(&self.home_payoff(y, away_id))
            })
            .unwrap_or(0)
    }
}
