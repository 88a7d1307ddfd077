/// Binomial coefficient C(a, b).
///
/// Each partial product `numer / k` is itself a binomial coefficient, so the
/// running value stays exact and never exceeds the final result by more than
/// a factor of `b`. Returns 0 when `b > a`.
pub fn choose(a: u32, b: u32) -> u64 {
    if b > a {
        return 0;
    }
    let b = b.min(a - b);
    let mut value: u64 = 1;
    for k in 1..=u64::from(b) {
        value = value * (u64::from(a - b) + k) / k;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_edges_are_one() {
        for a in 0..=20 {
            assert_eq!(choose(a, 0), 1);
            assert_eq!(choose(a, a), 1);
        }
    }

    #[test]
    fn choose_is_symmetric() {
        for a in 0..=20 {
            for b in 0..=a {
                assert_eq!(choose(a, b), choose(a, a - b), "C({a},{b})");
            }
        }
    }

    #[test]
    fn choose_matches_pascal_triangle() {
        for a in 1..=20 {
            for b in 1..a {
                assert_eq!(choose(a, b), choose(a - 1, b - 1) + choose(a - 1, b));
            }
        }
        assert_eq!(choose(5, 2), 10);
        assert_eq!(choose(20, 10), 184_756);
        assert_eq!(choose(40, 20), 137_846_528_820);
    }

    #[test]
    fn choose_outside_domain_is_zero() {
        assert_eq!(choose(3, 4), 0);
    }
}
