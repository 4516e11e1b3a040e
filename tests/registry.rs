pub mod common;
use common::*;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
struct Celsius(f64);

impl Example for Celsius {
    type Template = f64;
}

fn registry() -> Registry {
    let mut registry = Registry::standard();
    registry.register_for_type(Kind::Named("celsius"), |registry, _| {
        let degrees = registry.resolve::<f64>(&Descriptor::float_range(-273.15, 1_000.0))?;
        Ok(degrees.map(Celsius).boxed())
    });
    registry
}

#[test]
fn standard_types_resolve() -> Result<()> {
    logger();
    let registry = registry();
    let integers = registry.resolve::<i64>(&Descriptor::INTEGER)?;
    let floats = registry.resolve::<f64>(&Descriptor::FLOAT)?;
    assert_eq!(templates(&integers, 1, COUNT).len(), COUNT);
    assert!(templates(&floats, 1, COUNT).iter().any(|value| value.is_nan()));
    Ok(())
}

#[test]
fn complex_numbers_pack_two_floats() -> Result<()> {
    let complex = registry().resolve::<Complex>(&Descriptor::COMPLEX)?;
    let template = (1.0, -2.5);
    assert_eq!(complex.reify(&template), Complex::new(1.0, -2.5));
    assert_eq!(complex.reify(&template).to_string(), "1-2.5i");
    assert_eq!(complex.from_basic(&complex.to_basic(&template))?, template);
    Ok(())
}

#[test]
fn ranges_resolve_for_any_bounds() -> Result<()> {
    let registry = registry();
    let digits = registry.resolve::<i64>(&Descriptor::integer_range(0, 9))?;
    assert!(templates(&digits, 2, COUNT).iter().all(|value| (0..=9).contains(value)));

    let unit = registry.resolve::<f64>(&Descriptor::float_range(0.0, 1.0))?;
    assert!(templates(&unit, 2, COUNT).iter().all(|value| (0.0..=1.0).contains(value)));
    Ok(())
}

#[test]
fn tuples_resolve_their_items() -> Result<()> {
    let registry = registry();
    let descriptor = Descriptor::tuple([Descriptor::integer_range(1, 3), Descriptor::FLOAT]);
    let pair = registry.resolve::<(i64, f64)>(&descriptor)?;
    for (first, _) in templates(&pair, 3, COUNT) {
        assert!((1..=3).contains(&first));
    }
    assert!(registry.resolve::<(f64, i64)>(&descriptor).is_err());

    let nested = Descriptor::tuple([Descriptor::INTEGER, Descriptor::INTEGER]);
    let value = find(
        registry.resolve::<(i64, i64)>(&nested)?,
        |(left, right)| left + right >= 10,
        Settings::DEFAULT.seed(4),
    )?;
    assert_eq!(value.0 + value.1, 10);
    Ok(())
}

#[test]
fn named_types_resolve_through_their_factory() -> Result<()> {
    let celsius = registry().resolve::<Celsius>(&Descriptor::named("celsius"))?;
    let value = find(&celsius, |Celsius(degrees)| degrees > 100.0, Settings::DEFAULT.seed(5))?;
    assert!(value > Celsius(100.0) && value <= Celsius(1_000.0));
    Ok(())
}

#[test]
fn missing_descriptors_are_reported() {
    let registry = registry();
    let error = registry.resolve::<Celsius>(&Descriptor::named("kelvin")).unwrap_err();
    assert_eq!(error, Error::DescriptorNotFound { descriptor: "kelvin".into() });
    assert!(registry.resolve::<Complex>(&Descriptor::INTEGER).is_err());
}

#[test]
fn strategies_are_shared_between_threads() -> Result<()> {
    let registry = registry();
    let integers = registry.resolve::<i64>(&Descriptor::integer_range(-5, 5))?;
    std::thread::scope(|scope| {
        for seed in 0..4 {
            let integers = integers.clone();
            scope.spawn(move || {
                assert!(templates(&integers, seed, COUNT).iter().all(|value| value.abs() <= 5));
            });
        }
    });
    Ok(())
}
