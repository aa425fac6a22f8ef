use crate::rational::Rational;
use crate::syntax::{CONSTANTS, Node, Symbol};
use std::collections::BTreeSet;

/// Whether `symbol` references the variable `name`. Exponents of
/// generalized powers are only searched when `deep` is set.
pub fn contains(symbol: &Symbol, name: &str, deep: bool) -> bool {
  match &symbol.node {
    Node::Number => false,
    Node::Variable { name: var, .. } => var == name,
    Node::Function { args, .. } => {
      args.iter().any(|arg| contains(arg, name, deep))
    }
    Node::GeneralizedPower { base, exponent } => {
      contains(base, name, deep) || (deep && contains(exponent, name, deep))
    }
    Node::AdditivePoly { terms, .. } | Node::Additive { terms, .. } => {
      terms.values().any(|term| contains(term, name, deep))
    }
    Node::Multiplicative { factors } => {
      factors.values().any(|factor| contains(factor, name, deep))
    }
  }
}

/// Sorted names of the variables in `symbol`, excluding `i`, `pi` and `e`.
pub fn free_variables(symbol: &Symbol) -> Vec<String> {
  let mut names = BTreeSet::new();
  collect_variables(symbol, &mut names);
  names.into_iter().collect()
}

fn collect_variables(symbol: &Symbol, names: &mut BTreeSet<String>) {
  match &symbol.node {
    Node::Number => {}
    Node::Variable { name, .. } => {
      if !CONSTANTS.contains(&name.as_str()) {
        names.insert(name.clone());
      }
    }
    Node::Function { args, .. } => {
      for arg in args {
        collect_variables(arg, names);
      }
    }
    Node::GeneralizedPower { base, exponent } => {
      collect_variables(base, names);
      collect_variables(exponent, names);
    }
    Node::AdditivePoly { .. }
    | Node::Additive { .. }
    | Node::Multiplicative { .. } => {
      for child in symbol.children() {
        collect_variables(child, names);
      }
    }
  }
}

/// No free variables anywhere, exponents included.
pub fn is_constant(symbol: &Symbol) -> bool {
  free_variables(symbol).is_empty()
}

/// Whether `symbol` is a polynomial in its free variables with constant
/// coefficients. With `include_denominator`, negative integer powers of
/// variables are accepted as well (Laurent polynomials).
pub fn is_polynomial(symbol: &Symbol, include_denominator: bool) -> bool {
  if is_constant(symbol) {
    return true;
  }
  let power_ok = |p: &Rational| {
    p.is_integer() && (include_denominator || !p.is_negative())
  };
  match &symbol.node {
    Node::Number => true,
    Node::Variable { power, .. } => power_ok(power),
    Node::Function { .. } | Node::GeneralizedPower { .. } => false,
    Node::AdditivePoly { terms, power, .. }
    | Node::Additive { terms, power } => {
      power_ok(power)
        && terms
          .values()
          .all(|term| is_polynomial(term, include_denominator))
    }
    Node::Multiplicative { factors } => factors
      .values()
      .all(|factor| is_polynomial(factor, include_denominator)),
  }
}

/// Exact structural equality, multiplier included.
pub fn equals(a: &Symbol, b: &Symbol) -> bool {
  a == b
}
