//! Closed-form object counts.
//!
//!Every function returns `None` instead of wrapping when the result does not fit in a `u64`.

///The binomial coefficient `C(n, k)`, zero when `k > n`.
///
///```
///# use combinatoria::count::binomial;
///assert_eq!(binomial(6, 3), Some(20));
///assert_eq!(binomial(3, 6), Some(0));
///assert_eq!(binomial(70, 35), None);
///```
#[must_use]
pub fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    // acc is C(n, i) at the top of each iteration and these grow with i up to k <= n/2.
    for i in 0..k {
        acc = acc * u128::from(n - i) / u128::from(i + 1);
        if acc > u128::from(u64::MAX) {
            return None;
        }
    }
    u64::try_from(acc).ok()
}

///`n!`
#[must_use]
pub fn factorial(n: u64) -> Option<u64> {
    (1..=n).try_fold(1u64, |acc, x| acc.checked_mul(x))
}

///The `n`-th Catalan number, the number of Dyck paths with `n` up steps.
#[must_use]
pub fn catalan(n: u64) -> Option<u64> {
    let mut acc: u128 = 1;
    for i in 0..n {
        acc = acc * u128::from(2 * (2 * i + 1)) / u128::from(i + 2);
        if acc > u128::from(u64::MAX) {
            return None;
        }
    }
    u64::try_from(acc).ok()
}

///The `n`-th Motzkin number, the number of Motzkin paths of length `n`.
///
///```
///# use combinatoria::count::motzkin;
///let firsts: Vec<_> = (0..8).map(|n| motzkin(n).unwrap()).collect();
///assert_eq!(firsts, [1, 1, 2, 4, 9, 21, 51, 127]);
///```
#[must_use]
pub fn motzkin(n: u64) -> Option<u64> {
    let (mut previous, mut current): (u128, u128) = (1, 1);
    for i in 2..=n {
        let next = (u128::from(2 * i + 1) * current + u128::from(3 * i - 3) * previous)
            / u128::from(i + 2);
        if next > u128::from(u64::MAX) {
            return None;
        }
        previous = current;
        current = next;
    }
    u64::try_from(current).ok()
}

///The number of partitions of `n` into positive parts.
#[must_use]
pub fn partition_number(n: usize) -> Option<u64> {
    let mut ways = vec![0u64; n + 1];
    ways[0] = 1;
    for part in 1..=n {
        for total in part..=n {
            ways[total] = ways[total].checked_add(ways[total - part])?;
        }
    }
    Some(ways[n])
}

///The `n`-th Bell number, the number of partitions of a set of `n` elements.
#[must_use]
pub fn bell(n: usize) -> Option<u64> {
    // Bell triangle. Row i starts with Bell(i) and ends with Bell(i + 1), so it is kept in u128.
    let mut row = vec![1u128];
    for _ in 0..n {
        let mut next = Vec::with_capacity(row.len() + 1);
        next.push(*row.last()?);
        for &x in &row {
            let value = next.last()?.checked_add(x)?;
            next.push(value);
        }
        row = next;
    }
    u64::try_from(*row.first()?).ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn binomials_match_pascal() {
        for n in 0..40u64 {
            for k in 1..n {
                assert_eq!(
                    binomial(n, k),
                    Some(binomial(n - 1, k - 1).unwrap() + binomial(n - 1, k).unwrap())
                );
            }
        }
        assert_eq!(binomial(0, 0), Some(1));
        assert_eq!(binomial(67, 33), Some(14_226_520_737_620_288_370));
        assert_eq!(binomial(68, 34), None);
    }

    #[test]
    fn known_sequences() {
        let catalans: Vec<_> = (0..10).map(|n| catalan(n).unwrap()).collect();
        assert_eq!(catalans, [1, 1, 2, 5, 14, 42, 132, 429, 1430, 4862]);

        let partitions: Vec<_> = (0..=20).map(|n| partition_number(n).unwrap()).collect();
        assert_eq!(
            partitions,
            [
                1, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42, 56, 77, 101, 135, 176, 231, 297, 385, 490,
                627
            ]
        );

        let bells: Vec<_> = (0..10).map(|n| bell(n).unwrap()).collect();
        assert_eq!(bells, [1, 1, 2, 5, 15, 52, 203, 877, 4140, 21147]);

        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(20), Some(2_432_902_008_176_640_000));
        assert_eq!(factorial(21), None);
    }

    #[test]
    fn overflow_is_reported() {
        assert!(catalan(35).is_some());
        assert!(catalan(40).is_none());
        assert!(bell(25).is_some());
        assert!(bell(26).is_none());
        assert!(motzkin(200).is_none());
    }
}
