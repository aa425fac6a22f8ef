//! Canonical keys addressing children inside composite symbols, and the
//! separate orderings used to print them.
//!
//! Keys derive from structure only: a child's multiplier never enters its
//! key, and neither does its rational power when the container merges by
//! exponent (products) or groups same-base terms (sums).

use crate::syntax::{
  Group, IMAGINARY_UNIT, Node, Symbol, atom_text, body_text, function_text,
  make_integer, sum_body, to_text,
};
use std::cmp::Ordering;

/// Slot of the constant term inside an additive container.
pub const NUMBER_KEY: &str = "#";

/// Key of `symbol` as a child of a container of group `container`.
pub fn key_for_group(symbol: &Symbol, container: Group) -> String {
  match container {
    Group::AdditivePoly => power_key(symbol),
    Group::Additive => additive_key(symbol),
    Group::Multiplicative => multiplicative_key(symbol),
    _ => to_text(symbol),
  }
}

/// Slot of a term inside an additive-poly container: its rational power.
pub fn power_key(symbol: &Symbol) -> String {
  symbol
    .rational_power()
    .map(|p| p.to_string())
    .unwrap_or_else(|| "1".to_string())
}

/// Terms sharing this key are either identical up to multiplier or differ
/// only in rational power.
pub fn additive_key(symbol: &Symbol) -> String {
  match &symbol.node {
    Node::Number => NUMBER_KEY.to_string(),
    Node::Variable { name, .. } => name.clone(),
    Node::Function { name, args, .. } => function_text(name, args),
    Node::GeneralizedPower { .. } | Node::Multiplicative { .. } => {
      body_text(symbol)
    }
    Node::AdditivePoly { base, power, .. } if power.is_one() => base.clone(),
    Node::AdditivePoly { .. } | Node::Additive { .. } => {
      format!("({})", sum_body(symbol))
    }
  }
}

/// Factors sharing this key have the same base and merge by adding
/// exponents. `i` shares its slot with the radicals of `-1`; a number
/// raised to a symbolic exponent keeps a slot apart from the radicals of
/// that number, since their rational parts never fold into one another.
pub fn multiplicative_key(symbol: &Symbol) -> String {
  match &symbol.node {
    Node::Number => NUMBER_KEY.to_string(),
    Node::Variable { name, .. } if name == IMAGINARY_UNIT => {
      atom_text(&make_integer(-1))
    }
    Node::Variable { name, .. } => name.clone(),
    Node::Function { name, args, .. } => function_text(name, args),
    Node::GeneralizedPower { base, exponent } => {
      if base.is_number() && exponent.is_number() {
        atom_text(base)
      } else if base.is_number() {
        format!("{}^", atom_text(base))
      } else {
        multiplicative_key(base)
      }
    }
    Node::AdditivePoly { .. } | Node::Additive { .. } => {
      format!("({})", sum_body(symbol))
    }
    Node::Multiplicative { .. } => body_text(symbol),
  }
}

fn is_numeric_power(symbol: &Symbol) -> bool {
  matches!(&symbol.node, Node::GeneralizedPower { base, .. } if base.is_number())
}

/// Display order of the terms of a sum: the constant first, then by key.
pub fn term_order(a: &Symbol, b: &Symbol) -> Ordering {
  b.is_number()
    .cmp(&a.is_number())
    .then_with(|| additive_key(a).cmp(&additive_key(b)))
    .then_with(|| a.group().cmp(&b.group()))
    .then_with(|| power_order(a, b))
}

/// Display order of the factors of a product: numeric radicals first, then
/// by group and key.
pub fn factor_order(a: &Symbol, b: &Symbol) -> Ordering {
  is_numeric_power(b)
    .cmp(&is_numeric_power(a))
    .then_with(|| a.group().cmp(&b.group()))
    .then_with(|| display_key(a).cmp(&display_key(b)))
    .then_with(|| power_order(a, b))
}

fn display_key(symbol: &Symbol) -> String {
  match &symbol.node {
    Node::Variable { name, .. } => name.clone(),
    _ => multiplicative_key(symbol),
  }
}

/// Ascending rational power.
pub fn power_order(a: &Symbol, b: &Symbol) -> Ordering {
  match (a.rational_power(), b.rational_power()) {
    (Some(pa), Some(pb)) => pa.cmp(pb),
    _ => to_text(a).cmp(&to_text(b)),
  }
}
