//! Dual-meet outcome probabilities
//!
//! A meet is a set of independent singles matches, position against
//! position. The team winning more than half of them wins the meet; an even
//! split is a tie.

use crate::error::{LineupError, Result};
use crate::lineup::permutation::MAX_ROSTER_SIZE;
use crate::rating::WinProbabilityModel;
use crate::types::{MeetOutcome, Rating, Roster, WinProbability};

/// Check that two rosters can face each other
pub fn validate_matchup(home: &Roster, away: &Roster) -> Result<()> {
    if home.len() != away.len() {
        return Err(LineupError::RosterSizeMismatch {
            home: home.len(),
            away: away.len(),
        }
        .into());
    }
    if home.is_empty() {
        return Err(LineupError::EmptyRoster.into());
    }
    if home.len() > MAX_ROSTER_SIZE {
        return Err(LineupError::RosterTooLarge {
            size: home.len(),
            max: MAX_ROSTER_SIZE,
        }
        .into());
    }
    Ok(())
}

/// Meet outcome given each position's home win probability.
///
/// Enumerates all `2^n` match results; bit `j` of a result set means the
/// home player won match `j`. Callers pass rosters that went through
/// [`validate_matchup`], so `n <= MAX_ROSTER_SIZE`.
pub(crate) fn outcome_from_match_probabilities(
    match_probabilities: &[WinProbability],
) -> MeetOutcome {
    let team_size = match_probabilities.len();
    debug_assert!(team_size <= MAX_ROSTER_SIZE);
    let mut outcome = MeetOutcome {
        win: 0.0,
        tie: 0.0,
        loss: 0.0,
    };

    for results in 0u32..(1u32 << team_size) {
        let wins = results.count_ones() as usize;

        let probability: f64 = match_probabilities
            .iter()
            .enumerate()
            .map(|(j, &p)| if (results >> j) & 1 == 1 { p } else { 1.0 - p })
            .product();

        if 2 * wins > team_size {
            outcome.win += probability;
        } else if 2 * wins < team_size {
            outcome.loss += probability;
        } else {
            outcome.tie += probability;
        }
    }

    outcome
}

/// Probability of each meet result for `home` against `away` in the given order
pub fn meet_outcome(
    home: &Roster,
    away: &Roster,
    model: &dyn WinProbabilityModel,
) -> Result<MeetOutcome> {
    validate_matchup(home, away)?;

    let match_probabilities: Vec<WinProbability> = home
        .players
        .iter()
        .zip(&away.players)
        .map(|(h, a)| model.win_probability(h.rating, a.rating))
        .collect();

    Ok(outcome_from_match_probabilities(&match_probabilities))
}

/// Expected meet score for the home side, `P(win) - P(loss)`
pub fn payoff(home: &Roster, away: &Roster, model: &dyn WinProbabilityModel) -> Result<f64> {
    Ok(meet_outcome(home, away, model)?.payoff())
}

/// Ratings of a roster in lineup order
pub fn ratings(roster: &Roster) -> Vec<Rating> {
    roster.players.iter().map(|p| p.rating).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{EloModel, FixedProbabilityModel};
    use crate::types::Player;

    fn roster(ratings: &[f64]) -> Roster {
        Roster::new(
            ratings
                .iter()
                .enumerate()
                .map(|(i, &r)| Player::new(format!("P{}", i + 1), r))
                .collect(),
        )
    }

    #[test]
    fn test_outcome_sums_to_one() {
        let model = EloModel::default();
        let outcome = meet_outcome(&Roster::sample_home(), &Roster::sample_away(), &model).unwrap();
        assert!((outcome.total() - 1.0).abs() < 1e-6);
        assert!(outcome.win > 0.0 && outcome.tie > 0.0 && outcome.loss > 0.0);
    }

    #[test]
    fn test_coin_flip_six_matches() {
        let model = FixedProbabilityModel::new(0.5);
        let team = roster(&[1500.0; 6]);
        let outcome = meet_outcome(&team, &team, &model).unwrap();

        // C(6,3) / 64 ties, the rest split evenly
        assert!((outcome.tie - 20.0 / 64.0).abs() < 1e-12);
        assert!((outcome.win - 22.0 / 64.0).abs() < 1e-12);
        assert!((outcome.loss - 22.0 / 64.0).abs() < 1e-12);
        assert!(outcome.payoff().abs() < 1e-12);
    }

    #[test]
    fn test_odd_team_cannot_tie() {
        let model = FixedProbabilityModel::new(0.6);
        let team = roster(&[1500.0; 3]);
        let outcome = meet_outcome(&team, &team, &model).unwrap();

        assert_eq!(outcome.tie, 0.0);
        // Win at least two of three at 60% each
        let expected_win = 3.0 * 0.6 * 0.6 * 0.4 + 0.6 * 0.6 * 0.6;
        assert!((outcome.win - expected_win).abs() < 1e-12);
    }

    #[test]
    fn test_single_match_meet() {
        let model = EloModel::default();
        let outcome = meet_outcome(&roster(&[1600.0]), &roster(&[1700.0]), &model).unwrap();
        assert!((outcome.win - crate::rating::win_probability(1600.0, 1700.0)).abs() < 1e-12);
        assert_eq!(outcome.tie, 0.0);
    }

    #[test]
    fn test_payoff_is_antisymmetric() {
        let model = EloModel::default();
        let home = Roster::sample_home();
        let away = Roster::sample_away();

        let forward = payoff(&home, &away, &model).unwrap();
        let reverse = payoff(&away, &home, &model).unwrap();
        assert!((forward + reverse).abs() < 1e-9);
        assert!((-1.0..=1.0).contains(&forward));
    }

    #[test]
    fn test_stronger_team_is_favoured() {
        let model = EloModel::default();
        let strong = roster(&[2200.0, 2100.0, 2000.0, 1900.0]);
        let weak = roster(&[1800.0, 1700.0, 1600.0, 1500.0]);
        let outcome = meet_outcome(&strong, &weak, &model).unwrap();
        assert!(outcome.win > outcome.loss);
        assert!(payoff(&strong, &weak, &model).unwrap() > 0.0);
    }

    #[test]
    fn test_invalid_matchups() {
        let model = EloModel::default();
        assert!(meet_outcome(&roster(&[1500.0, 1600.0]), &roster(&[1500.0]), &model).is_err());
        assert!(meet_outcome(&roster(&[]), &roster(&[]), &model).is_err());
        assert!(meet_outcome(&roster(&[1500.0; 9]), &roster(&[1500.0; 9]), &model).is_err());
    }

    #[test]
    fn test_oversized_rosters_are_rejected_not_enumerated() {
        let model = FixedProbabilityModel::new(0.5);
        let team = roster(&[1500.0; 32]);

        let err = meet_outcome(&team, &team, &model).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LineupError>(),
            Some(LineupError::RosterTooLarge { size: 32, max: MAX_ROSTER_SIZE })
        ));
    }

    #[test]
    fn test_largest_roster_enumerates() {
        let outcome = outcome_from_match_probabilities(&[0.5; MAX_ROSTER_SIZE]);
        // C(8,4) / 256 ties
        assert!((outcome.tie - 70.0 / 256.0).abs() < 1e-12);
        assert!((outcome.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratings_in_order() {
        assert_eq!(ratings(&roster(&[3.0, 1.0, 2.0])), vec![3.0, 1.0, 2.0]);
    }
}
