use crate::validation::MAX_PLAYERS;

/// Factorials up to the largest coalition size we enumerate
pub(crate) const FACTORIAL_LIMIT: usize = MAX_PLAYERS + 1;
pub(crate) const FACTORIALS: [u64; FACTORIAL_LIMIT] = {
    let mut facts = [1u64; FACTORIAL_LIMIT];
    let mut i = 1;
    while i < FACTORIAL_LIMIT {
        facts[i] = facts[i - 1] * (i as u64);
        i += 1;
    }
    facts
};

/// Factorial of `n`; callers validate `n <= MAX_PLAYERS` beforehand
pub(crate) fn factorial(n: usize) -> f64 {
    FACTORIALS[n] as f64
}

/// Probability that exactly `coalition_size` other players precede a given
/// player in a uniformly random arrival order of `n_players`
pub(crate) fn ordering_weight(coalition_size: usize, n_players: usize) -> f64 {
    factorial(coalition_size) * factorial(n_players - coalition_size - 1) / factorial(n_players)
}

/// Number of non-empty coalitions over `n_players`
pub(crate) fn coalition_count(n_players: usize) -> usize {
    (1usize << n_players) - 1
}
