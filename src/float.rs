use crate::{
    basic::Basic,
    error::{Error, Result},
    integer,
    parameter::{Distribution, Parameter},
    random::Random,
    strategy::{Boxed, Simplify, Strategy},
    union::{Union, Weight},
    wrap::Wrap,
};
use core::iter;
use std::sync::OnceLock;

/// How a [`Float`] produces its values.
pub trait Policy: Send + Sync {
    fn parameter(&self) -> &Distribution;
    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64>;

    fn simplify(&self, value: f64) -> Simplify<f64> {
        simplify(value)
    }

    fn contains(&self, _value: f64) -> bool {
        true
    }
}

/// Templates are encoded as the IEEE-754 bit pattern of the value, so that
/// `-0.0`, every NaN payload and every subnormal survive a round trip.
#[derive(Clone, Debug)]
pub struct Float<P>(P);

#[derive(Clone, Debug)]
pub struct Gaussian {
    parameter: Distribution,
}

/// Values in the fixed interval `[lower, upper]`, clustered toward one end.
///
/// Each run picks a cut point and a side, then samples uniformly between the
/// cut and the chosen bound.
#[derive(Clone, Debug)]
pub struct Interval {
    lower: f64,
    upper: f64,
    parameter: Distribution,
}

/// `left + inner * length`, where `inner` is an [`Interval`] over `[0, 1]`.
#[derive(Clone, Debug)]
pub struct Bounded {
    inner: Interval,
    parameter: Distribution,
}

#[derive(Clone, Debug)]
pub struct Exponential {
    parameter: Distribution,
}

/// Any bit pattern.
#[derive(Clone, Debug)]
pub struct FullRange {
    parameter: Distribution,
}

/// `U * 2^-k` for a uniform `U` and a large `k`, which clusters values very
/// close to zero.
#[derive(Clone, Debug)]
pub struct Small {
    parameter: Distribution,
}

#[derive(Clone, Debug)]
pub struct Integral<S = Boxed<i64>>(S);

/// A handful of values that break naive numeric code.
#[derive(Clone, Debug)]
pub struct Nasty {
    parameter: Distribution,
}

const NASTY: [f64; 6] = [
    0.0,
    f64::MIN_POSITIVE,
    -f64::MIN_POSITIVE,
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::NAN,
];

/// Returns the generic simplification sequence of `value`.
///
/// - `0.0` and `-0.0` have no simpler value.
/// - NaN yields `0.0`, `inf` and `-inf`.
/// - An infinity yields the largest finite float of the same sign.
/// - Otherwise: the absolute value (for negative values), `0.0`, the
///   truncation toward zero, the value shifted by every simplification of its
///   integer part, and finally half the value when its magnitude exceeds `1`.
///
/// Candidates equal to `value` are skipped.
pub fn simplify(value: f64) -> Simplify<f64> {
    if value == 0.0 {
        return Simplify::empty();
    } else if value.is_nan() {
        return Simplify::new([0.0, f64::INFINITY, f64::NEG_INFINITY].into_iter());
    } else if value.is_infinite() {
        return Simplify::new(iter::once(f64::MAX.copysign(value)));
    }

    let negation = (value < 0.0).then_some(-value);
    let truncated = value.trunc();
    // `i64::MIN as f64` is exactly `-2^63` and `i64::MAX as f64` rounds up to `2^63`.
    let integral = (truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
        .then_some(truncated as i64);
    let shifts = integral.into_iter().flat_map(move |whole| {
        let truncated = whole as f64;
        (truncated != value).then_some(truncated).into_iter().chain(
            integer::simplify(whole)
                .map(move |other| value + (i128::from(other) - i128::from(whole)) as f64),
        )
    });
    let half = (value.abs() > 1.0).then_some(value / 2.0);

    Simplify::new(
        negation
            .into_iter()
            .chain(iter::once(0.0))
            .chain(shifts)
            .chain(half)
            .filter(move |candidate| candidate.to_bits() != value.to_bits()),
    )
}

/// Computes `value * 2^-exponent`, rounding once when the result is subnormal.
pub fn scale_down(value: f64, exponent: u32) -> f64 {
    // `2^-1022` is the smallest power of two that is still a normal float.
    const STEP: u32 = 1022;
    let mut value = value * f64::from_bits(u64::from(1023 - exponent % STEP) << 52);
    for _ in 0..exponent / STEP {
        if value == 0.0 {
            break;
        }
        value *= f64::MIN_POSITIVE;
    }
    value
}

/// The largest `k` such that `2^-k` is not zero (`1074` for IEEE-754 doubles).
pub fn max_exponent() -> u32 {
    static MAX: OnceLock<u32> = OnceLock::new();
    *MAX.get_or_init(|| {
        let (mut lower, mut upper) = (0, 1);
        while scale_down(1.0, upper) > 0.0 {
            lower = upper;
            upper *= 2;
        }
        while upper > lower + 1 {
            let middle = lower + (upper - lower) / 2;
            if scale_down(1.0, middle) > 0.0 {
                lower = middle;
            } else {
                upper = middle;
            }
        }
        lower
    })
}

fn lerp(left: f64, right: f64, ratio: f64) -> f64 {
    (left * (1.0 - ratio) + right * ratio).clamp(left, right)
}

impl<P: Policy> Float<P> {
    pub const fn new(policy: P) -> Self {
        Self(policy)
    }

    pub const fn policy(&self) -> &P {
        &self.0
    }
}

impl Float<Wrap<Union<f64, f64>>> {
    /// The general float strategy: a union of every policy, with [`Nasty`]
    /// weighted twice, whose integral branch draws from `integers`.
    pub fn composite(integers: Boxed<i64>) -> Self {
        let branches = [
            Float::new(Gaussian::new()).boxed(),
            Float::new(Bounded::new()).boxed(),
            Float::new(Exponential::new()).boxed(),
            Float::new(Integral::new(integers)).boxed(),
            Float::new(Nasty::new()).boxed(),
            Float::new(Nasty::new()).boxed(),
            Float::new(FullRange::new()).boxed(),
            Float::new(Small::new()).boxed(),
        ];
        Self::new(Wrap::new(Union::from(branches.map(Weight::one))))
    }
}

impl<P: Policy> Strategy for Float<P> {
    type Template = f64;
    type Value = f64;

    fn parameter(&self) -> &Distribution {
        self.0.parameter()
    }

    fn produce_template(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        self.0.produce(random, parameter)
    }

    fn reify(&self, template: &f64) -> f64 {
        *template
    }

    fn simplify(&self, template: &f64) -> Simplify<f64> {
        self.0.simplify(*template)
    }

    fn to_basic(&self, template: &f64) -> Basic {
        Basic::from(template.to_bits())
    }

    fn from_basic(&self, basic: &Basic) -> Result<f64> {
        let value = f64::from_bits(basic.integer()?);
        if self.0.contains(value) {
            Ok(value)
        } else {
            Err(Error::bad_data(format!("{value} is outside of the strategy")))
        }
    }

    fn contains(&self, template: &f64) -> bool {
        self.0.contains(*template)
    }
}

impl Gaussian {
    pub fn new() -> Self {
        Self {
            parameter: Distribution::composite([("mean", Distribution::normal(0.0, 1.0))]),
        }
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for Gaussian {
    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        Ok(random.normal(parameter.float("mean")?, 1.0))
    }
}

impl Interval {
    /// Fails with [`Error::InvalidRange`] unless both bounds are finite and
    /// `lower <= upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower.is_finite() && upper.is_finite() && lower <= upper {
            Ok(Self::unchecked(lower, upper))
        } else {
            Err(Error::invalid_range(lower, upper))
        }
    }

    fn unchecked(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            parameter: Distribution::composite([
                ("cut", Distribution::uniform_float(0.0, 1.0)),
                ("leftwards", Distribution::biased_coin(0.5)),
            ]),
        }
    }

    pub const fn lower(&self) -> f64 {
        self.lower
    }

    pub const fn upper(&self) -> f64 {
        self.upper
    }
}

impl Policy for Interval {
    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        let cut = lerp(self.lower, self.upper, parameter.float("cut")?);
        let (left, right) = if parameter.coin("leftwards")? {
            (self.lower, cut)
        } else {
            (cut, self.upper)
        };
        Ok(lerp(left, right, random.f64()))
    }

    fn simplify(&self, value: f64) -> Simplify<f64> {
        let (lower, upper) = (self.lower, self.upper);
        let middle = lerp(lower, upper, 0.5);
        if value == lower {
            Simplify::empty()
        } else if value == upper {
            Simplify::new(iter::once(lower))
        } else if value == middle {
            Simplify::new([lower, upper].into_iter())
        } else {
            Simplify::new([lower, upper, middle].into_iter())
        }
    }

    fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

impl Bounded {
    pub fn new() -> Self {
        let inner = Interval::unchecked(0.0, 1.0);
        let parameter = Distribution::composite([
            ("left", Distribution::normal(0.0, 1.0)),
            ("length", Distribution::exponential(1.0)),
            ("spread", inner.parameter.clone()),
        ]);
        Self { inner, parameter }
    }
}

impl Default for Bounded {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for Bounded {
    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        let inner = self.inner.produce(random, parameter.field("spread")?)?;
        Ok(parameter.float("left")? + inner * parameter.float("length")?)
    }
}

impl Exponential {
    pub fn new() -> Self {
        Self {
            parameter: Distribution::composite([
                ("rate", Distribution::gamma(2.0, 50.0)),
                ("zero_point", Distribution::normal(0.0, 1.0)),
                ("negative", Distribution::biased_coin(0.5)),
            ]),
        }
    }
}

impl Default for Exponential {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for Exponential {
    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        let value = random.exponential(parameter.float("rate")?);
        let value = if parameter.coin("negative")? {
            -value
        } else {
            value
        };
        Ok(parameter.float("zero_point")? + value)
    }
}

impl FullRange {
    pub fn new() -> Self {
        Self {
            parameter: Distribution::composite([
                ("negative_probability", Distribution::uniform_float(0.0, 1.0)),
                ("subnormal_probability", Distribution::uniform_float(0.0, 0.5)),
            ]),
        }
    }
}

impl Default for FullRange {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for FullRange {
    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        let sign = u64::from(random.coin(parameter.float("negative_probability")?));
        let exponent = if random.coin(parameter.float("subnormal_probability")?) {
            0
        } else {
            random.bits(11)
        };
        let fraction = random.bits(52);
        Ok(f64::from_bits(sign << 63 | exponent << 52 | fraction))
    }
}

impl Small {
    pub fn new() -> Self {
        Self {
            parameter: Distribution::composite([
                ("negative_probability", Distribution::uniform_float(0.0, 1.0)),
                (
                    "min_exponent",
                    Distribution::uniform_integer(0, i64::from(max_exponent())),
                ),
            ]),
        }
    }
}

impl Default for Small {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for Small {
    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        let maximum = max_exponent();
        let minimum = u32::try_from(parameter.integer("min_exponent")?)
            .map_err(|_| Error::parameter("min_exponent"))?
            .min(maximum);
        let exponent = random.u64(u64::from(minimum)..=u64::from(maximum));
        let value = scale_down(random.f64(), exponent as u32);
        if random.coin(parameter.float("negative_probability")?) {
            Ok(-value)
        } else {
            Ok(value)
        }
    }
}

impl<S: Strategy<Template = i64>> Integral<S> {
    pub const fn new(integers: S) -> Self {
        Self(integers)
    }
}

impl<S: Strategy<Template = i64>> Policy for Integral<S> {
    fn parameter(&self) -> &Distribution {
        self.0.parameter()
    }

    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        Ok(self.0.produce_template(random, parameter)? as f64)
    }
}

impl Nasty {
    pub fn new() -> Self {
        Self {
            parameter: Distribution::non_empty_subset(0, NASTY.len() as i64 - 1, 0.5),
        }
    }
}

impl Default for Nasty {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for Nasty {
    fn parameter(&self) -> &Distribution {
        &self.parameter
    }

    fn produce(&self, random: &mut Random, parameter: &Parameter) -> Result<f64> {
        let subset = parameter
            .as_subset()
            .ok_or_else(|| Error::parameter("subset"))?;
        random
            .choose(subset)
            .and_then(|&index| NASTY.get(usize::try_from(index).ok()?))
            .copied()
            .ok_or_else(|| Error::parameter("subset"))
    }
}
