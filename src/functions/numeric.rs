//! Exact exponentiation of rationals.

use super::arithmetic::{collapse_product, multiply};
use super::keys::multiplicative_key;
use crate::AlgebraError;
use crate::rational::Rational;
use crate::syntax::{Node, Symbol, imaginary_unit, make_integer, make_number};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::collections::BTreeMap;

/// Largest integral exponent applied to an exact rational.
pub const MAX_EXACT_EXPONENT: i64 = 10_000;

/// Trial division stops here; any cofactor left over is treated as prime.
const PRIME_SEARCH_LIMIT: u64 = 1_000_000;

/// `base^exponent` for rationals, kept exact.
///
/// Roots that do not resolve are returned as products of prime radicals
/// (`12^(1/2)` is `2*3^(1/2)`). Negative bases pick up a power of `-1`,
/// which is the imaginary unit for square roots.
pub fn numeric_power(
  base: &Rational,
  exponent: &Rational,
) -> Result<Symbol, AlgebraError> {
  if base.is_zero() {
    return match exponent.sign() {
      1 => Ok(Symbol::zero()),
      0 => Err(AlgebraError::Indeterminate("0^0".to_string())),
      _ => Err(AlgebraError::DivisionByZero(format!("0^({exponent})"))),
    };
  }
  if exponent.is_zero() || base.is_one() {
    return Ok(Symbol::one());
  }
  let whole = exact_exponent(&exponent.floor())?;
  if exponent.is_integer() {
    return Ok(make_number(base.pow(whole)));
  }
  if base.is_negative() {
    let magnitude = numeric_power(&base.abs(), exponent)?;
    return multiply(magnitude, minus_one_power(exponent));
  }
  let upper = integer_root_power(base.numer(), exponent)?;
  if base.is_integer() {
    return Ok(upper);
  }
  let lower = integer_root_power(base.denom(), &-exponent)?;
  multiply(upper, lower)
}

/// `(-1)^exponent` using real odd roots and `i` for half-integral powers.
/// Anything else stays a radical of `-1` with exponent in `(0, 2)`.
pub(crate) fn minus_one_power(exponent: &Rational) -> Symbol {
  let two = Rational::from_integer(2);
  let reduced = exponent - &(&two * &(exponent / &two).floor());
  if reduced.is_zero() {
    return Symbol::one();
  }
  if reduced.is_one() {
    return make_integer(-1);
  }
  if *reduced.denom() == BigInt::from(2) {
    let unit = imaginary_unit();
    return if reduced.numer().is_one() {
      unit
    } else {
      unit.with_multiplier(Rational::from_integer(-1))
    };
  }
  if reduced.denom().is_odd() {
    return if reduced.numer().is_odd() {
      make_integer(-1)
    } else {
      Symbol::one()
    };
  }
  Symbol::from_node(Node::GeneralizedPower {
    base: Box::new(make_integer(-1)),
    exponent: Box::new(make_number(reduced)),
  })
}

/// `n^exponent` for a positive integer `n`.
fn integer_root_power(
  n: &BigInt,
  exponent: &Rational,
) -> Result<Symbol, AlgebraError> {
  let whole = exact_exponent(&exponent.floor())?;
  let fract = exponent.fract();
  let mut coefficient = Rational::from_bigint(n.clone()).pow(whole);
  let mut factors = BTreeMap::new();
  if !fract.is_zero() {
    for (prime, multiplicity) in prime_factors(n) {
      let scaled = &fract * &Rational::from_integer(multiplicity);
      let lifted = exact_exponent(&scaled.floor())?;
      if lifted != 0 {
        let lift = Rational::from_bigint(prime.clone()).pow(lifted);
        coefficient = coefficient * lift;
      }
      let rest = scaled.fract();
      if rest.is_zero() {
        continue;
      }
      let radical = Symbol::from_node(Node::GeneralizedPower {
        base: Box::new(make_number(Rational::from_bigint(prime))),
        exponent: Box::new(make_number(rest)),
      });
      factors.insert(multiplicative_key(&radical), radical);
    }
  }
  Ok(collapse_product(factors, coefficient))
}

fn exact_exponent(exponent: &Rational) -> Result<i32, AlgebraError> {
  exponent
    .to_i64()
    .filter(|e| e.abs() <= MAX_EXACT_EXPONENT)
    .and_then(|e| i32::try_from(e).ok())
    .ok_or_else(|| {
      AlgebraError::NumericOverflow(format!(
        "exponent {exponent} exceeds {MAX_EXACT_EXPONENT}"
      ))
    })
}

/// Prime factorization by trial division, ascending.
pub(crate) fn prime_factors(n: &BigInt) -> Vec<(BigInt, i64)> {
  let mut rest = n.abs();
  let mut out = Vec::new();
  let mut divisor = BigInt::from(2);
  let mut tried = 0u64;
  while &divisor * &divisor <= rest && tried < PRIME_SEARCH_LIMIT {
    let mut count = 0;
    while (&rest % &divisor).is_zero() {
      rest /= &divisor;
      count += 1;
    }
    if count > 0 {
      out.push((divisor.clone(), count));
    }
    divisor += if tried == 0 { 1u32 } else { 2u32 };
    tried += 1;
  }
  if rest > BigInt::one() {
    out.push((rest, 1));
  }
  out
}
