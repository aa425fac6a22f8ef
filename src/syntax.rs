use crate::AlgebraError;
use crate::functions::keys::{factor_order, power_order, term_order};
use crate::rational::Rational;
use std::collections::BTreeMap;
use std::fmt;

/// Name of the imaginary unit variable.
pub const IMAGINARY_UNIT: &str = "i";

/// Names that read as variables but denote constants.
pub const CONSTANTS: [&str; 3] = ["i", "pi", "e"];

/// Function name used to model an explicit parenthesis.
pub const PARENS: &str = "parens";

/// Classification of a symbol. The derived order is the total order the
/// combinators use to decide which operand becomes the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
  Number,
  Variable,
  GeneralizedPower,
  Function,
  AdditivePoly,
  Multiplicative,
  Additive,
}

impl Group {
  pub fn is_composite(self) -> bool {
    matches!(
      self,
      Group::AdditivePoly | Group::Multiplicative | Group::Additive
    )
  }

  pub fn name(self) -> &'static str {
    match self {
      Group::Number => "NUMBER",
      Group::Variable => "VARIABLE",
      Group::GeneralizedPower => "GENERALIZED_POWER",
      Group::Function => "FUNCTION",
      Group::AdditivePoly => "ADDITIVE_POLY",
      Group::Multiplicative => "MULTIPLICATIVE",
      Group::Additive => "ADDITIVE",
    }
  }
}

impl fmt::Display for Group {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Group-specific payload of a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Number,
  Variable {
    name: String,
    power: Rational,
  },
  /// `base^exponent` with a symbolic exponent. The base carries multiplier 1
  /// and rational power 1; a number base keeps its value.
  GeneralizedPower {
    base: Box<Symbol>,
    exponent: Box<Symbol>,
  },
  Function {
    name: String,
    args: Vec<Symbol>,
    power: Rational,
  },
  /// Terms sharing one base, keyed by the text of their rational power.
  AdditivePoly {
    base: String,
    terms: BTreeMap<String, Symbol>,
    power: Rational,
  },
  /// Factors keyed by their multiplicative key. Powers applied to a product
  /// are always distributed over its factors.
  Multiplicative {
    factors: BTreeMap<String, Symbol>,
  },
  Additive {
    terms: BTreeMap<String, Symbol>,
    power: Rational,
  },
}

/// A canonical algebraic expression: a rational multiplier times a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
  pub(crate) multiplier: Rational,
  pub(crate) node: Node,
}

/// View of a symbol's power slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Power {
  Rational(Rational),
  Symbolic(Symbol),
}

pub fn make_number(value: Rational) -> Symbol {
  Symbol {
    multiplier: value,
    node: Node::Number,
  }
}

pub fn make_integer(value: i64) -> Symbol {
  make_number(Rational::from_integer(value))
}

pub fn is_valid_name(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
    _ => false,
  }
}

pub fn make_variable(name: &str) -> Result<Symbol, AlgebraError> {
  if !is_valid_name(name) {
    return Err(AlgebraError::InvalidVariableName(name.to_string()));
  }
  Ok(Symbol::variable(name))
}

pub fn make_function(name: &str, args: Vec<Symbol>) -> Symbol {
  Symbol {
    multiplier: Rational::one(),
    node: Node::Function {
      name: name.to_string(),
      args,
      power: Rational::one(),
    },
  }
}

pub fn imaginary_unit() -> Symbol {
  Symbol::variable(IMAGINARY_UNIT)
}

impl Symbol {
  pub fn zero() -> Self {
    make_number(Rational::zero())
  }

  pub fn one() -> Self {
    make_number(Rational::one())
  }

  pub(crate) fn variable(name: &str) -> Self {
    Symbol {
      multiplier: Rational::one(),
      node: Node::Variable {
        name: name.to_string(),
        power: Rational::one(),
      },
    }
  }

  pub(crate) fn from_node(node: Node) -> Self {
    Symbol {
      multiplier: Rational::one(),
      node,
    }
  }

  pub fn group(&self) -> Group {
    match self.node {
      Node::Number => Group::Number,
      Node::Variable { .. } => Group::Variable,
      Node::GeneralizedPower { .. } => Group::GeneralizedPower,
      Node::Function { .. } => Group::Function,
      Node::AdditivePoly { .. } => Group::AdditivePoly,
      Node::Multiplicative { .. } => Group::Multiplicative,
      Node::Additive { .. } => Group::Additive,
    }
  }

  pub fn node(&self) -> &Node {
    &self.node
  }

  pub fn multiplier(&self) -> &Rational {
    &self.multiplier
  }

  pub fn power(&self) -> Power {
    match &self.node {
      Node::GeneralizedPower { exponent, .. } => {
        Power::Symbolic(exponent.as_ref().clone())
      }
      _ => Power::Rational(
        self.rational_power().cloned().unwrap_or_else(Rational::one),
      ),
    }
  }

  /// The rational power field, if this group has one.
  pub fn rational_power(&self) -> Option<&Rational> {
    match &self.node {
      Node::Variable { power, .. }
      | Node::Function { power, .. }
      | Node::AdditivePoly { power, .. }
      | Node::Additive { power, .. } => Some(power),
      _ => None,
    }
  }

  /// Group the base had before being raised to a symbolic exponent.
  pub fn previous_group(&self) -> Option<Group> {
    match &self.node {
      Node::GeneralizedPower { base, .. } => Some(base.group()),
      _ => None,
    }
  }

  /// Name, numeric value or structural text identifying this symbol's base.
  pub fn value(&self) -> String {
    match &self.node {
      Node::Number => self.multiplier.to_string(),
      Node::Variable { name, .. } | Node::Function { name, .. } => {
        name.clone()
      }
      Node::GeneralizedPower { base, .. } => atom_text(base),
      Node::AdditivePoly { base, .. } => base.clone(),
      Node::Multiplicative { .. } => body_text(self),
      Node::Additive { .. } => sum_body(self),
    }
  }

  pub fn args(&self) -> &[Symbol] {
    match &self.node {
      Node::Function { args, .. } => args,
      _ => &[],
    }
  }

  pub fn children(&self) -> Vec<&Symbol> {
    match &self.node {
      Node::AdditivePoly { terms, .. } | Node::Additive { terms, .. } => {
        terms.values().collect()
      }
      Node::Multiplicative { factors } => factors.values().collect(),
      _ => Vec::new(),
    }
  }

  pub fn is_number(&self) -> bool {
    matches!(self.node, Node::Number)
  }

  pub fn is_zero(&self) -> bool {
    self.multiplier.is_zero()
  }

  pub fn is_one(&self) -> bool {
    self.is_number() && self.multiplier.is_one()
  }

  /// A sum whose power is 1, so that its terms can merge with others.
  pub fn is_open_sum(&self) -> bool {
    match &self.node {
      Node::AdditivePoly { power, .. } | Node::Additive { power, .. } => {
        power.is_one()
      }
      _ => false,
    }
  }

  pub(crate) fn is_open_additive(&self) -> bool {
    matches!(&self.node, Node::Additive { power, .. } if power.is_one())
  }

  pub(crate) fn is_open_poly(&self) -> bool {
    matches!(&self.node, Node::AdditivePoly { power, .. } if power.is_one())
  }

  pub(crate) fn with_multiplier(self, multiplier: Rational) -> Self {
    Symbol {
      multiplier,
      node: self.node,
    }
  }

  /// Splits off the rational power, returning the base at power 1.
  pub(crate) fn split_power(self) -> (Symbol, Rational) {
    let Symbol { multiplier, node } = self;
    let (node, power) = match node {
      Node::Variable { name, power } => (
        Node::Variable {
          name,
          power: Rational::one(),
        },
        power,
      ),
      Node::Function { name, args, power } => (
        Node::Function {
          name,
          args,
          power: Rational::one(),
        },
        power,
      ),
      Node::AdditivePoly { base, terms, power } => (
        Node::AdditivePoly {
          base,
          terms,
          power: Rational::one(),
        },
        power,
      ),
      Node::Additive { terms, power } => (
        Node::Additive {
          terms,
          power: Rational::one(),
        },
        power,
      ),
      other => (other, Rational::one()),
    };
    (Symbol { multiplier, node }, power)
  }

  /// Overwrites the rational power field without any normalization.
  pub(crate) fn set_rational_power(&mut self, new_power: Rational) {
    match &mut self.node {
      Node::Variable { power, .. }
      | Node::Function { power, .. }
      | Node::AdditivePoly { power, .. }
      | Node::Additive { power, .. } => *power = new_power,
      _ => debug_assert!(new_power.is_one(), "group has no power field"),
    }
  }

  /// Open-sum terms in display order, with polynomial children flattened.
  pub(crate) fn sum_terms(&self) -> Vec<&Symbol> {
    let mut out = Vec::new();
    match &self.node {
      Node::Additive { terms, .. } => {
        let mut children: Vec<&Symbol> = terms.values().collect();
        children.sort_by(|a, b| term_order(a, b));
        for child in children {
          if child.is_open_poly() {
            out.extend(child.sum_terms());
          } else {
            out.push(child);
          }
        }
      }
      Node::AdditivePoly { terms, .. } => {
        let mut children: Vec<&Symbol> = terms.values().collect();
        children.sort_by(|a, b| power_order(a, b));
        out.extend(children);
      }
      _ => out.push(self),
    }
    out
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&to_text(self))
  }
}

/// Canonical infix serialization, readable back by the parser.
pub fn to_text(symbol: &Symbol) -> String {
  if symbol.is_number() {
    return symbol.multiplier.to_string();
  }
  if symbol.is_open_sum() && symbol.multiplier.is_one() {
    return sum_body(symbol);
  }
  with_coefficient(&symbol.multiplier, &body_text(symbol))
}

fn with_coefficient(multiplier: &Rational, body: &str) -> String {
  if multiplier.is_one() {
    body.to_string()
  } else if multiplier.is_integer() {
    if (-multiplier).is_one() {
      format!("-{body}")
    } else {
      format!("{multiplier}*{body}")
    }
  } else if multiplier.is_negative() {
    format!("-({})*{body}", multiplier.abs())
  } else {
    format!("({multiplier})*{body}")
  }
}

fn power_suffix(base: String, power: &Rational) -> String {
  if power.is_one() {
    base
  } else if power.is_integer() && power.is_positive() {
    format!("{base}^{power}")
  } else {
    format!("{base}^({power})")
  }
}

pub(crate) fn function_text(name: &str, args: &[Symbol]) -> String {
  let args: Vec<String> = args.iter().map(to_text).collect();
  format!("{}({})", name, args.join(","))
}

/// Text of a symbol ignoring its multiplier.
pub(crate) fn body_text(symbol: &Symbol) -> String {
  match &symbol.node {
    Node::Number => symbol.multiplier.to_string(),
    Node::Variable { name, power } => power_suffix(name.clone(), power),
    Node::Function { name, args, power } => {
      power_suffix(function_text(name, args), power)
    }
    Node::GeneralizedPower { base, exponent } => {
      format!("{}^{}", atom_text(base), exponent_text(exponent))
    }
    Node::AdditivePoly { power, .. } | Node::Additive { power, .. } => {
      power_suffix(format!("({})", sum_body(symbol)), power)
    }
    Node::Multiplicative { factors } => {
      let mut factors: Vec<&Symbol> = factors.values().collect();
      factors.sort_by(|a, b| factor_order(a, b));
      let parts: Vec<String> = factors.into_iter().map(body_text).collect();
      parts.join("*")
    }
  }
}

/// Terms of a sum joined with signs, without parentheses, power or
/// multiplier.
pub(crate) fn sum_body(symbol: &Symbol) -> String {
  let mut out = String::new();
  for (i, term) in symbol.sum_terms().into_iter().enumerate() {
    if i == 0 {
      out.push_str(&to_text(term));
    } else if term.multiplier.is_negative() {
      let positive = term.clone().with_multiplier(term.multiplier.abs());
      out.push('-');
      out.push_str(&to_text(&positive));
    } else {
      out.push('+');
      out.push_str(&to_text(term));
    }
  }
  out
}

/// Text of a generalized power base.
pub(crate) fn atom_text(base: &Symbol) -> String {
  match &base.node {
    Node::Number => {
      if base.multiplier.is_integer() && base.multiplier.is_positive() {
        base.multiplier.to_string()
      } else {
        format!("({})", base.multiplier)
      }
    }
    Node::Variable { .. } | Node::Function { .. }
      if base.multiplier.is_one() =>
    {
      body_text(base)
    }
    Node::AdditivePoly { .. } | Node::Additive { .. }
      if base.multiplier.is_one() =>
    {
      body_text(base)
    }
    _ => format!("({})", to_text(base)),
  }
}

fn exponent_text(exponent: &Symbol) -> String {
  let bare = match &exponent.node {
    Node::Number => {
      exponent.multiplier.is_integer() && exponent.multiplier.is_positive()
    }
    Node::Variable { power, .. } | Node::Function { power, .. } => {
      exponent.multiplier.is_one() && power.is_one()
    }
    _ => false,
  };
  if bare {
    to_text(exponent)
  } else {
    format!("({})", to_text(exponent))
  }
}

/// Builds an additive container from already-keyed terms, collapsing
/// empty and single-term containers.
pub(crate) fn collapse_sum(terms: BTreeMap<String, Symbol>) -> Symbol {
  if terms.len() > 1 {
    return Symbol::from_node(Node::Additive {
      terms,
      power: Rational::one(),
    });
  }
  terms.into_values().next().unwrap_or_else(Symbol::zero)
}

pub(crate) fn collapse_poly(
  base: String,
  terms: BTreeMap<String, Symbol>,
) -> Symbol {
  if terms.len() > 1 {
    return Symbol::from_node(Node::AdditivePoly {
      base,
      terms,
      power: Rational::one(),
    });
  }
  terms.into_values().next().unwrap_or_else(Symbol::zero)
}
