//! Regret matching self-play over lineup strategies
//!
//! Both teams repeatedly sample a lineup from their current mixed strategy
//! and accumulate regret against the lineup the other side sampled. The
//! time-averaged strategies approach an equilibrium of the lineup game.

use crate::lineup::game::LineupGame;
use crate::types::WeightedLineup;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Cumulative regret and strategy weights for one player
#[derive(Debug, Clone)]
pub struct RegretMatcher {
    regret_sum: Vec<f64>,
    strategy_sum: Vec<f64>,
}

impl RegretMatcher {
    pub fn new(n_strategies: usize) -> Self {
        Self {
            regret_sum: vec![0.0; n_strategies],
            strategy_sum: vec![0.0; n_strategies],
        }
    }

    pub fn len(&self) -> usize {
        self.regret_sum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regret_sum.is_empty()
    }

    /// Positive regrets normalized; uniform when no regret is positive
    pub fn current_strategy(&self) -> Vec<f64> {
        let positive: Vec<f64> = self.regret_sum.iter().map(|r| r.max(0.0)).collect();
        let total: f64 = positive.iter().sum();
        if total > 0.0 {
            positive.into_iter().map(|r| r / total).collect()
        } else {
            vec![1.0 / self.len() as f64; self.len()]
        }
    }

    /// Draw a strategy id from the current mix
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match WeightedIndex::new(self.current_strategy()) {
            Ok(dist) => dist.sample(rng),
            Err(_) => 0,
        }
    }

    /// Accumulate regret given the payoff of every strategy against the
    /// opponent's play, and the strategy actually played. The strategy sum
    /// takes the mix after this round's regret.
    pub fn update<F>(&mut self, played: usize, payoff_of: F)
    where
        F: Fn(usize) -> f64,
    {
        let realized = payoff_of(played);
        for (i, regret) in self.regret_sum.iter_mut().enumerate() {
            *regret += payoff_of(i) - realized;
        }

        let strategy = self.current_strategy();
        for (sum, p) in self.strategy_sum.iter_mut().zip(&strategy) {
            *sum += p;
        }
    }

    /// Time-averaged strategy
    pub fn average_strategy(&self) -> Vec<f64> {
        let total: f64 = self.strategy_sum.iter().sum();
        if total > 0.0 {
            self.strategy_sum.iter().map(|s| s / total).collect()
        } else {
            vec![1.0 / self.len() as f64; self.len()]
        }
    }
}

/// Average strategies found by self-play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverReport {
    pub iterations: usize,
    /// Home lineups by descending probability
    pub home_strategy: Vec<WeightedLineup>,
    /// Away lineups by descending probability
    pub away_strategy: Vec<WeightedLineup>,
    /// Home payoff of the averaged strategies against each other
    pub expected_payoff: f64,
}

impl SolverReport {
    /// Home lineups played more often than `threshold`
    pub fn home_above(&self, threshold: f64) -> impl Iterator<Item = &WeightedLineup> {
        self.home_strategy
            .iter()
            .filter(move |l| l.probability > threshold)
    }

    /// Away lineups played more often than `threshold`
    pub fn away_above(&self, threshold: f64) -> impl Iterator<Item = &WeightedLineup> {
        self.away_strategy
            .iter()
            .filter(move |l| l.probability > threshold)
    }
}

fn weighted_lineups(
    strategy: &[f64],
    lineup: impl Fn(usize) -> Option<crate::types::Roster>,
) -> Vec<WeightedLineup> {
    let mut lineups: Vec<WeightedLineup> = strategy
        .iter()
        .enumerate()
        .filter_map(|(id, &probability)| {
            lineup(id).map(|roster| WeightedLineup {
                roster,
                probability,
            })
        })
        .collect();
    lineups.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    lineups
}

/// Run `iterations` rounds of regret matching self-play with a seeded RNG
pub fn train(game: &LineupGame, iterations: usize, seed: u64) -> SolverReport {
    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut home = RegretMatcher::new(game.home().len());
    let mut away = RegretMatcher::new(game.away().len());

    info!(
        "Training lineup strategies: {} home x {} away strategies, {} iterations",
        home.len(),
        away.len(),
        iterations
    );

    for iteration in 0..iterations {
        let home_played = home.sample(&mut rng);
        let away_played = away.sample(&mut rng);

        home.update(home_played, |h| game.home_payoff(h, away_played));
        away.update(away_played, |a| game.away_payoff(a, home_played));

        if iteration > 0 && iteration % 1000 == 0 {
            debug!("Completed {} iterations", iteration);
        }
    }

    let home_average = home.average_strategy();
    let away_average = away.average_strategy();

    let expected_payoff: f64 = home_average
        .iter()
        .enumerate()
        .flat_map(|(h, &ph)| {
            away_average
                .iter()
                .enumerate()
                .map(move |(a, &pa)| (h, a, ph * pa))
        })
        .map(|(h, a, weight)| weight * game.home_payoff(h, a))
        .sum();

    info!(
        "Training finished in {:.2}ms, expected home payoff {:.4}",
        start.elapsed().as_secs_f64() * 1000.0,
        expected_payoff
    );

    SolverReport {
        iterations,
        home_strategy: weighted_lineups(&home_average, |id| game.home().lineup(id)),
        away_strategy: weighted_lineups(&away_average, |id| game.away().lineup(id)),
        expected_payoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::EloModel;
    use crate::types::{Player, Roster};

    fn small_game(away_permutes: bool) -> LineupGame {
        let home = Roster::new(vec![
            Player::new("A1", 2000.0),
            Player::new("A2", 1700.0),
            Player::new("A3", 1400.0),
        ]);
        let away = Roster::new(vec![
            Player::new("B1", 2300.0),
            Player::new("B2", 1650.0),
            Player::new("B3", 1350.0),
        ]);
        LineupGame::new(home, away, away_permutes, &EloModel::default()).unwrap()
    }

    #[test]
    fn test_uniform_without_regret() {
        let matcher = RegretMatcher::new(4);
        assert_eq!(matcher.current_strategy(), vec![0.25; 4]);
        assert_eq!(matcher.average_strategy(), vec![0.25; 4]);
    }

    #[test]
    fn test_regret_shifts_weight() {
        let mut matcher = RegretMatcher::new(3);
        // Strategy 2 would have paid 1.0 while strategy 0 paid nothing
        matcher.update(0, |i| [0.0, 0.5, 1.0][i]);

        let strategy = matcher.current_strategy();
        assert!((strategy[0] - 0.0).abs() < 1e-12);
        assert!((strategy[1] - 1.0 / 3.0).abs() < 1e-12);
        assert!((strategy[2] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_includes_updated_mix() {
        let mut matcher = RegretMatcher::new(3);
        matcher.update(0, |i| [0.0, 0.5, 1.0][i]);

        // One round: the average is the mix after that round's regret
        let average = matcher.average_strategy();
        assert!((average[0] - 0.0).abs() < 1e-12);
        assert!((average[1] - 1.0 / 3.0).abs() < 1e-12);
        assert!((average[2] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_follows_pure_strategy() {
        let mut matcher = RegretMatcher::new(3);
        matcher.update(0, |i| if i == 1 { 1.0 } else { 0.0 });
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(matcher.sample(&mut rng), 1);
        }
    }

    #[test]
    fn test_report_probabilities_sum_to_one() {
        let report = train(&small_game(true), 2000, 42);

        let home_total: f64 = report.home_strategy.iter().map(|l| l.probability).sum();
        let away_total: f64 = report.away_strategy.iter().map(|l| l.probability).sum();
        assert!((home_total - 1.0).abs() < 1e-9);
        assert!((away_total - 1.0).abs() < 1e-9);
        assert_eq!(report.home_strategy.len(), 6);
        assert_eq!(report.iterations, 2000);
        assert!((-1.0..=1.0).contains(&report.expected_payoff));
    }

    #[test]
    fn test_report_is_sorted() {
        let report = train(&small_game(true), 500, 1);
        for pair in report.home_strategy.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        assert!(report.home_above(0.0).count() >= 1);
    }

    #[test]
    fn test_same_seed_same_report() {
        let game = small_game(true);
        let first = train(&game, 300, 99);
        let second = train(&game, 300, 99);
        assert_eq!(first.expected_payoff, second.expected_payoff);
        assert_eq!(first.home_strategy[0].roster, second.home_strategy[0].roster);
    }

    #[test]
    fn test_fixed_opponent_converges_to_best_response() {
        let game = small_game(false);
        let report = train(&game, 3000, 5);

        let best = game.home().lineup(game.best_home_response(0)).unwrap();
        assert_eq!(report.away_strategy.len(), 1);
        assert_eq!(report.home_strategy[0].roster, best);
        assert!(report.home_strategy[0].probability > 0.5);
    }
}
