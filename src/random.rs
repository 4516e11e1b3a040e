use core::{f64::consts::TAU, ops::RangeBounds};
use fastrand::Rng;

#[derive(Debug, Clone)]
pub struct Random(Rng);

impl Random {
    pub fn new(seed: Option<u64>) -> Self {
        Self(seed.map_or_else(Rng::new, Rng::with_seed))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(Rng::with_seed(seed))
    }

    pub fn seed(&self) -> u64 {
        self.0.get_seed()
    }

    #[inline]
    fn open(&mut self) -> f64 {
        1.0 - self.0.f64()
    }

    /// The low `count` bits of a uniform `u64`.
    #[inline]
    pub fn bits(&mut self, count: u32) -> u64 {
        match count {
            0 => 0,
            64.. => self.0.u64(..),
            _ => self.0.u64(..) >> (64 - count),
        }
    }

    #[inline]
    pub fn coin(&mut self, probability: f64) -> bool {
        self.0.f64() < probability
    }

    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.0.f64() * (high - low)
    }

    pub fn normal(&mut self, mean: f64, deviation: f64) -> f64 {
        let radius = (-2.0 * self.open().ln()).sqrt();
        let angle = TAU * self.0.f64();
        mean + deviation * radius * angle.cos()
    }

    pub fn exponential(&mut self, rate: f64) -> f64 {
        -self.open().ln() / rate
    }

    // Marsaglia and Tsang.
    pub fn gamma(&mut self, shape: f64, scale: f64) -> f64 {
        if shape.is_nan() || shape <= 0.0 {
            return f64::NAN;
        } else if shape < 1.0 {
            let boost = self.open().powf(shape.recip());
            return self.gamma(shape + 1.0, scale) * boost;
        }

        let d = shape - 1.0 / 3.0;
        let c = (9.0 * d).sqrt().recip();
        loop {
            let x = self.normal(0.0, 1.0);
            let v = 1.0 + c * x;
            if v <= 0.0 {
                continue;
            }
            let v = v * v * v;
            let u = self.open();
            if u < 1.0 - 0.0331 * x.powi(4) || u.ln() < 0.5 * x * x + d * (1.0 - v + v.ln()) {
                break d * v * scale;
            }
        }
    }

    pub fn beta(&mut self, alpha: f64, beta: f64) -> f64 {
        let left = self.gamma(alpha, 1.0);
        let right = self.gamma(beta, 1.0);
        let total = left + right;
        if total > 0.0 {
            left / total
        } else {
            // Both draws underflowed; fall back to the mean's coin.
            f64::from(u8::from(self.coin(alpha / (alpha + beta))))
        }
    }

    /// Number of failures before the first success of a `probability` coin.
    pub fn geometric(&mut self, probability: f64) -> i64 {
        if probability >= 1.0 {
            0
        } else if probability <= 0.0 {
            i64::MAX
        } else {
            // Saturating conversion.
            (self.open().ln() / (-probability).ln_1p()).floor() as i64
        }
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let last = items.len().checked_sub(1)?;
        items.get(self.0.usize(0..=last))
    }
}

macro_rules! bridge {
    ($type:ident) => {
        impl Random {
            #[inline]
            pub fn $type(&mut self) -> $type {
                self.0.$type()
            }
        }
    };
    ($($type:ident),*) => {$(bridge!($type);)*}
}

macro_rules! range {
    ($type:ident) => {
        impl Random {
            #[inline]
            pub fn $type<R: RangeBounds<$type>>(&mut self, range: R) -> $type {
                self.0.$type(range)
            }
        }
    };
    ($($type:ident),*) => {$(range!($type);)*}
}

bridge!(f64, bool);
range!(i64, u64, u128, usize);
