//! Lazy prime enumeration used to pick bucket-store capacities

/// Returns a lazy, strictly increasing iterator over every prime `p <= bound`.
///
/// The iterator is finite: it yields nothing once the next candidate passes `bound`.
#[must_use]
pub fn primes_up_to(bound: usize) -> Primes {
    primes_in(2, bound)
}

/// Returns a lazy, strictly increasing iterator over the primes in `from..=bound`.
///
/// Used to find the next capacity without walking every prime below it.
#[must_use]
pub fn primes_in(from: usize, bound: usize) -> Primes {
    let candidate = match from {
        0..=2 => 2,
        odd if odd % 2 == 1 => odd,
        even => even.saturating_add(1),
    };
    Primes { candidate, bound }
}

/// Returns true if `n` is prime
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut divisor: usize = 3;
    // divisor <= n / divisor is the overflow-free form of divisor^2 <= n
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor = divisor.saturating_add(2);
    }
    true
}

/// Iterator over the primes up to an inclusive bound, see [`primes_up_to`]
#[derive(Debug, Clone)]
pub struct Primes {
    /// Next number to test
    candidate: usize,
    /// Inclusive upper bound of the sequence
    bound: usize,
}

impl Iterator for Primes {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.candidate <= self.bound {
            let n = self.candidate;
            // Past 2 only odd numbers are tested
            let step = if n == 2 { 1 } else { 2 };
            match n.checked_add(step) {
                Some(next) => self.candidate = next,
                None => self.bound = 0,
            }
            if is_prime(n) {
                return Some(n);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primes_up_to_small_bound() {
        let primes: Vec<usize> = primes_up_to(30).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_bound_is_inclusive() {
        assert_eq!(primes_up_to(13).last(), Some(13));
        assert_eq!(primes_up_to(2).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_empty_below_two() {
        assert_eq!(primes_up_to(0).next(), None);
        assert_eq!(primes_up_to(1).next(), None);
    }

    #[test]
    fn test_primes_in_range() {
        assert_eq!(primes_in(34, 51).collect::<Vec<_>>(), vec![37, 41, 43, 47]);
        assert_eq!(primes_in(37, 37).next(), Some(37));
        assert_eq!(primes_in(24, 28).next(), None);
        assert_eq!(primes_in(0, 5).collect::<Vec<_>>(), vec![2, 3, 5]);
    }

    #[test]
    fn test_primes_near_usize_max_terminate() {
        // usize::MAX is divisible by 3 on every supported target
        assert_eq!(primes_in(usize::MAX - 1, usize::MAX).next(), None);
    }

    #[test]
    fn test_is_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(37));
        assert!(!is_prime(39));
        assert!(is_prime(109_345_121));
    }

    #[test]
    fn test_sequence_is_increasing() {
        let primes: Vec<usize> = primes_up_to(1000).collect();
        assert_eq!(primes.len(), 168);
        assert!(primes.windows(2).all(|w| w[0] < w[1]));
    }
}
