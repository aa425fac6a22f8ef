//! The canonical-form combinators. Every operation takes its operands by
//! value and returns a canonical symbol.

mod add;
mod multiply;
mod power;

pub use add::add;
pub(crate) use multiply::collapse_product;
pub use multiply::multiply;
pub(crate) use power::{make_generalized_power, power_rational};
pub use power::{distribute_exponent, power};

use super::convert::distribute_multiplier;
use crate::AlgebraError;
use crate::rational::Rational;
use crate::syntax::{Node, PARENS, Symbol, make_integer};

pub fn negate(symbol: Symbol) -> Result<Symbol, AlgebraError> {
  multiply(make_integer(-1), symbol)
}

pub fn subtract(a: Symbol, b: Symbol) -> Result<Symbol, AlgebraError> {
  add(a, negate(b)?)
}

/// `a * b^-1`. Dividing by the exact number zero is a domain error.
pub fn divide(a: Symbol, b: Symbol) -> Result<Symbol, AlgebraError> {
  let b = unwrap_parens(b)?;
  if b.is_zero() {
    return Err(AlgebraError::DivisionByZero(format!("({a})/0")));
  }
  multiply(a, invert(b)?)
}

pub fn invert(symbol: Symbol) -> Result<Symbol, AlgebraError> {
  power(symbol, make_integer(-1))
}

/// Multiplies the coefficient of `symbol` by `factor`, distributing it when
/// `symbol` is an open sum.
pub(crate) fn scale(symbol: Symbol, factor: &Rational) -> Symbol {
  if factor.is_one() {
    return symbol;
  }
  if factor.is_zero() || symbol.is_zero() {
    return Symbol::zero();
  }
  let multiplier = &symbol.multiplier * factor;
  distribute_multiplier(symbol.with_multiplier(multiplier))
}

/// Replaces a single-argument `parens(...)` wrapper by its content.
pub(crate) fn unwrap_parens(symbol: Symbol) -> Result<Symbol, AlgebraError> {
  let Symbol { multiplier, node } = symbol;
  match node {
    Node::Function { name, args, power } if name == PARENS && args.len() == 1 => {
      let Some(inner) = args.into_iter().next() else {
        unreachable!("length checked above")
      };
      let raised = power_rational(unwrap_parens(inner)?, &power)?;
      Ok(scale(raised, &multiplier))
    }
    node => Ok(Symbol { multiplier, node }),
  }
}
