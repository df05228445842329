//! Canonical ranking of lineup orderings
//!
//! Every permutation of `0..n` is assigned its lexicographic rank through the
//! Lehmer code. [`PermutationIndex`] keeps both directions of the mapping so
//! that solver strategies can be stored as plain integers.

use crate::error::{LineupError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Largest roster the lineup solver will enumerate (8! = 40320 orderings)
pub const MAX_ROSTER_SIZE: usize = 8;

/// Number of orderings of a six-player roster
pub const N_STRATEGIES: usize = 720;

static SIX_PLAYER_INDEX: Lazy<PermutationIndex> = Lazy::new(|| PermutationIndex::build(6));

/// n! for the small sizes used here
pub fn factorial(n: usize) -> usize {
    (1..=n).product()
}

fn check_size(n: usize) -> Result<()> {
    if n > MAX_ROSTER_SIZE {
        return Err(LineupError::RosterTooLarge {
            size: n,
            max: MAX_ROSTER_SIZE,
        }
        .into());
    }
    Ok(())
}

/// Lexicographic rank of a permutation of `0..perm.len()`
pub fn rank(perm: &[usize]) -> Result<usize> {
    let n = perm.len();
    check_size(n)?;

    let mut seen = vec![false; n];
    for &value in perm {
        if value >= n || seen[value] {
            return Err(LineupError::InvalidPermutation {
                reason: format!("{:?} is not a permutation of 0..{}", perm, n),
            }
            .into());
        }
        seen[value] = true;
    }

    let mut rank = 0;
    for (i, &value) in perm.iter().enumerate() {
        let smaller_after = perm[i + 1..].iter().filter(|&&v| v < value).count();
        rank += smaller_after * factorial(n - 1 - i);
    }
    Ok(rank)
}

/// Permutation of `0..n` with the given lexicographic rank
pub fn unrank(n: usize, rank: usize) -> Result<Vec<usize>> {
    check_size(n)?;
    let total = factorial(n);
    if rank >= total {
        return Err(LineupError::InvalidPermutation {
            reason: format!("rank {} out of range for {} elements ({} orderings)", rank, n, total),
        }
        .into());
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut perm = Vec::with_capacity(n);
    let mut rest = rank;
    for i in 0..n {
        let block = factorial(n - 1 - i);
        let digit = rest / block;
        rest %= block;
        perm.push(remaining.remove(digit));
    }
    Ok(perm)
}

/// Advance to the lexicographic successor; false once `perm` is the last
/// ordering
fn next_permutation(perm: &mut [usize]) -> bool {
    let Some(pivot) = perm.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let Some(successor) = perm.iter().rposition(|&v| v > perm[pivot]) else {
        return false;
    };
    perm.swap(pivot, successor);
    perm[pivot + 1..].reverse();
    true
}

/// Bidirectional mapping between orderings of `0..n` and ids in `0..n!`
#[derive(Debug, Clone)]
pub struct PermutationIndex {
    size: usize,
    by_id: Vec<Vec<usize>>,
    by_permutation: HashMap<Vec<usize>, usize>,
}

impl PermutationIndex {
    /// Build the index for `n` elements
    pub fn new(n: usize) -> Result<Self> {
        check_size(n)?;
        Ok(Self::build(n))
    }

    fn build(n: usize) -> Self {
        let mut by_id = Vec::with_capacity(factorial(n));
        let mut perm: Vec<usize> = (0..n).collect();
        loop {
            by_id.push(perm.clone());
            if !next_permutation(&mut perm) {
                break;
            }
        }

        let by_permutation = by_id
            .iter()
            .enumerate()
            .map(|(id, perm)| (perm.clone(), id))
            .collect();

        Self {
            size: n,
            by_id,
            by_permutation,
        }
    }

    /// Shared index for six-player rosters, built on first use
    pub fn six() -> &'static PermutationIndex {
        &SIX_PLAYER_INDEX
    }

    /// Number of elements being permuted
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of orderings (n!)
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Ordering with the given id
    pub fn permutation(&self, id: usize) -> Option<&[usize]> {
        self.by_id.get(id).map(Vec::as_slice)
    }

    /// Id of the given ordering
    pub fn id_of(&self, perm: &[usize]) -> Option<usize> {
        self.by_permutation.get(perm).copied()
    }

    /// All orderings in id order
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.by_id.iter().map(Vec::as_slice)
    }
}
