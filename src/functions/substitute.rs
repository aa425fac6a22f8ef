//! Rebuilding symbols after their leaves change.

use super::arithmetic::{add, multiply, power, power_rational, scale};
use super::elementary::apply_function;
use crate::AlgebraError;
use crate::syntax::{Node, Symbol};

/// Replaces every occurrence of the variable `name` by `value` and
/// re-canonicalizes the result.
pub fn substitute(
  symbol: &Symbol,
  name: &str,
  value: &Symbol,
) -> Result<Symbol, AlgebraError> {
  rebuild(symbol, &|var| (var == name).then(|| value.clone()))
}

/// Renames every application of function `from` to `to`, in place.
///
/// Child keys that include the function's text go stale; call
/// [`update_hash`] before combining the result further.
pub fn rename_function(symbol: &mut Symbol, from: &str, to: &str) {
  match &mut symbol.node {
    Node::Number | Node::Variable { .. } => {}
    Node::Function { name, args, .. } => {
      if name == from {
        *name = to.to_string();
      }
      for arg in args {
        rename_function(arg, from, to);
      }
    }
    Node::GeneralizedPower { base, exponent } => {
      rename_function(base, from, to);
      rename_function(exponent, from, to);
    }
    Node::AdditivePoly { terms, .. } | Node::Additive { terms, .. } => {
      for term in terms.values_mut() {
        rename_function(term, from, to);
      }
    }
    Node::Multiplicative { factors } => {
      for factor in factors.values_mut() {
        rename_function(factor, from, to);
      }
    }
  }
}

/// Re-derives every key of `symbol` from its current structure, merging
/// children that became like terms after an in-place edit.
pub fn update_hash(symbol: &Symbol) -> Result<Symbol, AlgebraError> {
  rebuild(symbol, &|_| None)
}

fn rebuild(
  symbol: &Symbol,
  replace: &dyn Fn(&str) -> Option<Symbol>,
) -> Result<Symbol, AlgebraError> {
  let body = match &symbol.node {
    Node::Number => return Ok(symbol.clone()),
    Node::Variable { name, power } => {
      let base = replace(name).unwrap_or_else(|| Symbol::variable(name));
      power_rational(base, power)?
    }
    Node::Function { name, args, power } => {
      let args = args
        .iter()
        .map(|arg| rebuild(arg, replace))
        .collect::<Result<Vec<_>, _>>()?;
      power_rational(apply_function(name, args)?, power)?
    }
    Node::GeneralizedPower { base, exponent } => {
      power(rebuild(base, replace)?, rebuild(exponent, replace)?)?
    }
    Node::AdditivePoly { terms, power, .. }
    | Node::Additive { terms, power } => {
      let mut sum = Symbol::zero();
      for term in terms.values() {
        sum = add(sum, rebuild(term, replace)?)?;
      }
      power_rational(sum, power)?
    }
    Node::Multiplicative { factors } => {
      let mut product = Symbol::one();
      for factor in factors.values() {
        product = multiply(product, rebuild(factor, replace)?)?;
      }
      product
    }
  };
  Ok(scale(body, &symbol.multiplier))
}
