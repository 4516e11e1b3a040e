pub mod common;
use common::*;
use specimen::{
    float::{Float, Interval},
    integer::{Integers, Range},
    union::{Union, Weight},
};

fn bands() -> Union<f64, f64> {
    Union::new(Weight::one(Float::new(Interval::new(0.0, 1.0).unwrap()).boxed()))
        .with(Weight::new(3.0, Float::new(Interval::new(10.0, 20.0).unwrap()).boxed()).unwrap())
}

#[test]
fn templates_are_attributed_to_the_first_containing_branch() {
    let bands = bands();
    assert_eq!(bands.simplify(&20.0).collect::<Vec<_>>(), [10.0]);
    assert_eq!(bands.simplify(&1.0).collect::<Vec<_>>(), [0.0]);
    assert_eq!(bands.simplify(&0.0).count(), 0);
    assert_eq!(bands.simplify(&5.0).count(), 0);
    assert!(!bands.contains(&5.0));
}

#[test]
fn every_template_is_contained() {
    let bands = bands();
    for value in templates(&bands, 1, COUNT) {
        assert!(bands.contains(&value), "{value}");
        assert_eq!(bands.from_basic(&bands.to_basic(&value)), Ok(value));
    }
}

#[test]
fn decoding_rejects_templates_no_branch_contains() {
    let bands = bands();
    let error = bands.from_basic(&Basic::from(5.0f64.to_bits())).unwrap_err();
    assert!(error.is_bad_data());
}

#[test]
fn or_combines_two_strategies() {
    let either = Range::new(-3, -1).unwrap().or(Range::new(1, 3).unwrap());
    let values = templates(&either, 2, COUNT);
    assert!(values.iter().all(|value| (1..=3).contains(&value.abs())));
    assert!(values.iter().any(|&value| value < 0));
    assert!(values.iter().any(|&value| value > 0));
    assert_eq!(either.simplify(&3).collect::<Vec<_>>(), [2, 1, 1]);
    assert_eq!(either.simplify(&-1).collect::<Vec<_>>(), [-2, -3, -3]);
}

#[test]
fn branches_fall_through_when_the_first_has_nothing_simpler() {
    let union = Union::new(Weight::one(Range::new(7, 7).unwrap().boxed()))
        .with(Weight::one(Integers::new().boxed()));
    assert_eq!(union.simplify(&7).collect::<Vec<_>>()[..3], [0, 3, 6]);
}

#[test]
fn searches_shrink_within_the_owning_branch() {
    let value = find(bands(), |value| value >= 10.0, Settings::DEFAULT.seed(3)).unwrap();
    assert_eq!(value, 10.0);
}
