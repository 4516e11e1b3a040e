pub mod common;
use common::*;
use specimen::integer::{self, Integers, Range};

#[test]
fn range_produces_only_contained_values() {
    for (start, end) in [(0, 0), (-5, 5), (10, 1_000), (i64::MIN, i64::MAX), (i64::MAX - 3, i64::MAX)] {
        let range = Range::new(start, end).unwrap();
        for value in templates(&range, start.unsigned_abs(), COUNT) {
            assert!((start..=end).contains(&value), "{value} in [{start}, {end}]");
        }
    }
}

#[test]
fn single_point_range_always_produces_its_point() {
    let range = Range::new(5, 5).unwrap();
    assert!(templates(&range, 0, COUNT).into_iter().all(|value| value == 5));
    assert_eq!(range.simplify(&5).count(), 0);
}

#[test]
fn inverted_range_fails_at_construction() {
    assert_eq!(Range::new(6, 5).unwrap_err(), Error::invalid_range(6, 5));
}

#[test]
fn range_reuses_a_small_pool_within_a_run() {
    let range = Range::new(0, 1_000_000).unwrap();
    let mut random = Random::with_seed(9);
    let parameter = range.draw(&mut random);
    let mut values = (0..COUNT)
        .map(|_| range.produce_template(&mut random, &parameter).unwrap())
        .collect::<Vec<_>>();
    values.sort_unstable();
    values.dedup();
    assert!(values.len() < 20, "{}", values.len());
}

#[test]
fn integers_cover_both_signs() {
    let values = templates(&Integers::new(), 1, COUNT);
    assert!(values.iter().any(|&value| value < 0));
    assert!(values.iter().any(|&value| value > 0));
    assert!(values.iter().any(|&value| value == 0));
}

#[test]
fn simplify_boundary_values() {
    assert_eq!(integer::simplify(0).count(), 0);
    assert_eq!(integer::simplify(1).collect::<Vec<_>>(), [0]);
    assert_eq!(integer::simplify(2).collect::<Vec<_>>(), [0, 1]);

    let hundred = integer::simplify(100).collect::<Vec<_>>();
    assert_eq!(hundred.len(), 100);
    assert_eq!(&hundred[..3], &[0, 50, 99]);
    assert!(!hundred[2..].contains(&50));
    assert_eq!(hundred.last(), Some(&1));
}

#[test]
fn simplify_never_grows_the_magnitude() {
    for value in templates(&Integers::new(), 2, COUNT) {
        for candidate in integer::simplify(value) {
            assert_ne!(candidate, value);
            if value < 0 && candidate == value.saturating_neg() {
                continue;
            }
            assert!(candidate.unsigned_abs() < value.unsigned_abs(), "{candidate} from {value}");
        }
    }
}

#[test]
fn simplify_is_repeatable() {
    for value in [-1_000_003, -7, 12, 101, 1 << 40, i64::MAX] {
        let left = integer::simplify(value).collect::<Vec<_>>();
        let right = integer::simplify(value).collect::<Vec<_>>();
        assert_eq!(left, right);
    }
}

#[test]
fn first_candidates_reach_zero_quickly() {
    for value in templates(&Integers::new(), 3, COUNT) {
        assert!(descend(&Integers::new(), value, 3).is_some());
    }
}

#[test]
fn range_simplify_stays_in_range() {
    let range = Range::new(-20, 30).unwrap();
    for value in -20..=30 {
        for candidate in range.simplify(&value) {
            assert!(range.contains(&candidate));
            assert_ne!(candidate, value);
        }
    }
    assert_eq!(descend(&range, 30, 100), Some(50));
}

#[test]
fn basic_round_trips() -> Result<()> {
    let range = Range::new(-3, 3)?;
    for value in templates(&Integers::new(), 4, COUNT) {
        assert_eq!(Integers::new().from_basic(&Integers::new().to_basic(&value))?, value);
    }
    for value in templates(&range, 5, COUNT) {
        assert_eq!(range.from_basic(&range.to_basic(&value))?, value);
    }
    Ok(())
}

#[test]
fn malformed_basic_is_bad_data() {
    let range = Range::new(-3, 3).unwrap();
    for basic in [
        Basic::Integer(4),
        Basic::Integer(i128::MAX),
        Basic::Sequence(vec![Basic::Integer(0)]),
    ] {
        assert!(range.from_basic(&basic).unwrap_err().is_bad_data());
    }
    assert!(Integers::new().from_basic(&Basic::Integer(i128::from(i64::MAX) + 1)).unwrap_err().is_bad_data());
}
