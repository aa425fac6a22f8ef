use crate::functions::numeric::MAX_EXACT_EXPONENT;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Exact rational number used for multipliers and rational powers.
/// Always kept in lowest terms with the sign on the numerator.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
  /// Panics when `denom` is zero: a zero denominator is never constructed.
  pub fn new(numer: i64, denom: i64) -> Self {
    assert!(denom != 0, "Rational with zero denominator");
    Rational(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
  }

  pub fn from_bigints(numer: BigInt, denom: BigInt) -> Self {
    assert!(!denom.is_zero(), "Rational with zero denominator");
    Rational(BigRational::new(numer, denom))
  }

  pub fn from_integer(n: i64) -> Self {
    Rational(BigRational::from_integer(BigInt::from(n)))
  }

  pub fn from_bigint(n: BigInt) -> Self {
    Rational(BigRational::from_integer(n))
  }

  pub fn zero() -> Self {
    Rational(BigRational::zero())
  }

  pub fn one() -> Self {
    Rational(BigRational::one())
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_zero()
  }

  pub fn is_one(&self) -> bool {
    self.0.is_one()
  }

  pub fn is_integer(&self) -> bool {
    self.0.is_integer()
  }

  pub fn is_negative(&self) -> bool {
    self.0.is_negative()
  }

  pub fn is_positive(&self) -> bool {
    self.0.is_positive()
  }

  pub fn sign(&self) -> i8 {
    if self.0.is_negative() {
      -1
    } else if self.0.is_zero() {
      0
    } else {
      1
    }
  }

  pub fn numer(&self) -> &BigInt {
    self.0.numer()
  }

  pub fn denom(&self) -> &BigInt {
    self.0.denom()
  }

  pub fn abs(&self) -> Self {
    Rational(self.0.abs())
  }

  /// `None` for zero.
  pub fn invert(&self) -> Option<Self> {
    if self.is_zero() {
      None
    } else {
      Some(Rational(self.0.recip()))
    }
  }

  pub fn checked_div(&self, other: &Rational) -> Option<Self> {
    if other.is_zero() {
      None
    } else {
      Some(Rational(&self.0 / &other.0))
    }
  }

  pub fn floor(&self) -> Self {
    Rational(self.0.floor())
  }

  /// Fractional part in `[0, 1)`.
  pub fn fract(&self) -> Self {
    Rational(&self.0 - self.0.floor())
  }

  /// Integer power. Panics on a negative exponent of zero.
  pub fn pow(&self, exp: i32) -> Self {
    Rational(Pow::pow(&self.0, exp))
  }

  pub fn to_f64(&self) -> f64 {
    self.0.to_f64().unwrap_or_else(|| {
      let n = self.numer().to_f64().unwrap_or(f64::NAN);
      let d = self.denom().to_f64().unwrap_or(f64::NAN);
      n / d
    })
  }

  pub fn to_i64(&self) -> Option<i64> {
    if self.is_integer() {
      self.numer().to_i64()
    } else {
      None
    }
  }

  /// Parses an unsigned decimal literal such as `12`, `1.25`, `.5` or `3e-2`
  /// into an exact rational. Scales beyond `MAX_EXACT_EXPONENT` powers of ten
  /// are refused.
  pub fn parse_decimal(text: &str) -> Option<Self> {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
      Some(pos) => (&text[..pos], text[pos + 1..].parse::<i32>().ok()?),
      None => (text, 0),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
      Some((i, f)) => (i, f),
      None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
      return None;
    }
    let digits = format!("{int_part}{frac_part}");
    if !digits.chars().all(|c| c.is_ascii_digit()) {
      return None;
    }
    let numer: BigInt = digits.parse().ok()?;
    let ten = Rational::from_integer(10);
    let scale = exponent.checked_sub(i32::try_from(frac_part.len()).ok()?)?;
    if i64::from(scale).abs() > MAX_EXACT_EXPONENT {
      return None;
    }
    Some(Rational::from_bigint(numer) * ten.pow(scale))
  }
}

impl fmt::Display for Rational {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_integer() {
      write!(f, "{}", self.numer())
    } else {
      write!(f, "{}/{}", self.numer(), self.denom())
    }
  }
}

impl From<i64> for Rational {
  fn from(n: i64) -> Self {
    Rational::from_integer(n)
  }
}

impl From<BigInt> for Rational {
  fn from(n: BigInt) -> Self {
    Rational::from_bigint(n)
  }
}

macro_rules! forward_binop {
  ($trait:ident, $method:ident) => {
    impl $trait for Rational {
      type Output = Rational;

      fn $method(self, rhs: Rational) -> Rational {
        Rational(self.0.$method(rhs.0))
      }
    }

    impl<'a> $trait<&'a Rational> for &'a Rational {
      type Output = Rational;

      fn $method(self, rhs: &'a Rational) -> Rational {
        Rational((&self.0).$method(&rhs.0))
      }
    }
  };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

impl Neg for Rational {
  type Output = Rational;

  fn neg(self) -> Rational {
    Rational(-self.0)
  }
}

impl Neg for &Rational {
  type Output = Rational;

  fn neg(self) -> Rational {
    Rational(-&self.0)
  }
}
