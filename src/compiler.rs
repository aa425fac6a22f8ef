//! Compiles canonical symbols into stack programs evaluated over `f64`.

use crate::AlgebraError;
use crate::functions::free_variables;
use crate::rational::Rational;
use crate::syntax::{IMAGINARY_UNIT, Node, PARENS, Symbol};
use log::debug;

/// Host numeric functions a compiled program may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostFn {
  Sin,
  Cos,
  Tan,
  Sec,
  Csc,
  Cot,
  Asin,
  Acos,
  Atan,
  Atan2,
  Sinh,
  Cosh,
  Tanh,
  Asinh,
  Acosh,
  Atanh,
  Exp,
  Log,
  Log10,
  Sqrt,
  Abs,
  Floor,
  Ceil,
  Sign,
  Erf,
  Identity,
}

impl HostFn {
  pub fn from_name(name: &str) -> Option<Self> {
    let host = match name {
      "sin" => HostFn::Sin,
      "cos" => HostFn::Cos,
      "tan" => HostFn::Tan,
      "sec" => HostFn::Sec,
      "csc" => HostFn::Csc,
      "cot" => HostFn::Cot,
      "asin" => HostFn::Asin,
      "acos" => HostFn::Acos,
      "atan" => HostFn::Atan,
      "atan2" => HostFn::Atan2,
      "sinh" => HostFn::Sinh,
      "cosh" => HostFn::Cosh,
      "tanh" => HostFn::Tanh,
      "asinh" => HostFn::Asinh,
      "acosh" => HostFn::Acosh,
      "atanh" => HostFn::Atanh,
      "exp" => HostFn::Exp,
      "log" => HostFn::Log,
      "log10" => HostFn::Log10,
      "sqrt" => HostFn::Sqrt,
      "abs" => HostFn::Abs,
      "floor" => HostFn::Floor,
      "ceil" => HostFn::Ceil,
      "sign" => HostFn::Sign,
      "erf" => HostFn::Erf,
      PARENS => HostFn::Identity,
      _ => return None,
    };
    Some(host)
  }

  pub fn arity(self) -> usize {
    match self {
      HostFn::Atan2 => 2,
      _ => 1,
    }
  }

  fn apply(self, args: &[f64]) -> f64 {
    let x = args.first().copied().unwrap_or(f64::NAN);
    match self {
      HostFn::Sin => x.sin(),
      HostFn::Cos => x.cos(),
      HostFn::Tan => x.tan(),
      HostFn::Sec => 1.0 / x.cos(),
      HostFn::Csc => 1.0 / x.sin(),
      HostFn::Cot => 1.0 / x.tan(),
      HostFn::Asin => x.asin(),
      HostFn::Acos => x.acos(),
      HostFn::Atan => x.atan(),
      HostFn::Atan2 => x.atan2(args.get(1).copied().unwrap_or(f64::NAN)),
      HostFn::Sinh => x.sinh(),
      HostFn::Cosh => x.cosh(),
      HostFn::Tanh => x.tanh(),
      HostFn::Asinh => x.asinh(),
      HostFn::Acosh => x.acosh(),
      HostFn::Atanh => x.atanh(),
      HostFn::Exp => x.exp(),
      HostFn::Log => x.ln(),
      HostFn::Log10 => x.log10(),
      HostFn::Sqrt => x.sqrt(),
      HostFn::Abs => x.abs(),
      HostFn::Floor => x.floor(),
      HostFn::Ceil => x.ceil(),
      HostFn::Sign => {
        if x == 0.0 || x.is_nan() {
          x
        } else {
          x.signum()
        }
      }
      HostFn::Erf => erf(x),
      HostFn::Identity => x,
    }
  }
}

/// Stack machine instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
  Const(f64),
  Load(usize),
  /// Pops `n` values and pushes their sum.
  Add(usize),
  /// Pops `n` values and pushes their product.
  Mul(usize),
  Pow,
  Call(HostFn),
}

/// A symbol compiled against an ordered variable list.
#[derive(Debug, Clone)]
pub struct Compiled {
  ops: Vec<Op>,
  variables: Vec<String>,
  max_stack: usize,
}

impl Compiled {
  pub fn variables(&self) -> &[String] {
    &self.variables
  }

  pub fn ops(&self) -> &[Op] {
    &self.ops
  }

  /// Evaluates with `values[k]` bound to `variables()[k]`. Missing values
  /// read as NaN.
  pub fn call(&self, values: &[f64]) -> f64 {
    let mut stack: Vec<f64> = Vec::with_capacity(self.max_stack);
    for op in &self.ops {
      match op {
        Op::Const(c) => stack.push(*c),
        Op::Load(idx) => {
          stack.push(values.get(*idx).copied().unwrap_or(f64::NAN))
        }
        Op::Add(n) => {
          let start = stack.len().saturating_sub(*n);
          let sum: f64 = stack.drain(start..).sum();
          stack.push(sum);
        }
        Op::Mul(n) => {
          let start = stack.len().saturating_sub(*n);
          let product: f64 = stack.drain(start..).product();
          stack.push(product);
        }
        Op::Pow => {
          let exponent = stack.pop().unwrap_or(f64::NAN);
          let base = stack.pop().unwrap_or(f64::NAN);
          stack.push(base.powf(exponent));
        }
        Op::Call(host) => {
          let start = stack.len().saturating_sub(host.arity());
          let args: Vec<f64> = stack.drain(start..).collect();
          stack.push(host.apply(&args));
        }
      }
    }
    stack.pop().unwrap_or(f64::NAN)
  }
}

/// Compiles `symbol` over `variables`, or over its free variables in sorted
/// order when none are given.
pub fn build(
  symbol: &Symbol,
  variables: Option<&[&str]>,
) -> Result<Compiled, AlgebraError> {
  let variables: Vec<String> = match variables {
    Some(names) => names.iter().map(|n| n.to_string()).collect(),
    None => free_variables(symbol),
  };
  let mut emitter = Emitter {
    variables: &variables,
    ops: Vec::new(),
    depth: 0,
    max_stack: 0,
  };
  emitter.emit(symbol)?;
  debug!(
    "compiled {symbol} over {variables:?} into {} ops",
    emitter.ops.len()
  );
  let Emitter { ops, max_stack, .. } = emitter;
  Ok(Compiled {
    ops,
    variables,
    max_stack,
  })
}

/// Value of a symbol without free variables.
pub fn numeric_value(symbol: &Symbol) -> Result<f64, AlgebraError> {
  let no_variables: &[&str] = &[];
  Ok(build(symbol, Some(no_variables))?.call(&[]))
}

struct Emitter<'a> {
  variables: &'a [String],
  ops: Vec<Op>,
  depth: usize,
  max_stack: usize,
}

impl Emitter<'_> {
  fn push(&mut self, op: Op) {
    let (popped, pushed) = match &op {
      Op::Const(_) | Op::Load(_) => (0, 1),
      Op::Add(n) | Op::Mul(n) => (*n, 1),
      Op::Pow => (2, 1),
      Op::Call(host) => (host.arity(), 1),
    };
    self.depth = (self.depth + pushed).saturating_sub(popped);
    self.max_stack = self.max_stack.max(self.depth);
    self.ops.push(op);
  }

  fn emit(&mut self, symbol: &Symbol) -> Result<(), AlgebraError> {
    if symbol.is_number() {
      self.push(Op::Const(symbol.multiplier.to_f64()));
      return Ok(());
    }
    match &symbol.node {
      Node::Number => unreachable!("handled above"),
      Node::Variable { name, power } => {
        self.emit_variable(name)?;
        self.emit_power(power);
      }
      Node::Function { name, args, power } => {
        let host = HostFn::from_name(name)
          .ok_or_else(|| AlgebraError::UnknownFunction(name.clone()))?;
        if host.arity() != args.len() {
          return Err(AlgebraError::ArgumentCount {
            name: name.clone(),
            expected: host.arity(),
            given: args.len(),
          });
        }
        for arg in args {
          self.emit(arg)?;
        }
        self.push(Op::Call(host));
        self.emit_power(power);
      }
      Node::GeneralizedPower { base, exponent } => {
        if base.multiplier.is_negative() && exponent.is_number() {
          return Err(AlgebraError::NotReal(symbol.to_string()));
        }
        self.emit(base)?;
        self.emit(exponent)?;
        self.push(Op::Pow);
      }
      Node::AdditivePoly { terms, power, .. }
      | Node::Additive { terms, power } => {
        for term in terms.values() {
          self.emit(term)?;
        }
        self.push(Op::Add(terms.len()));
        self.emit_power(power);
      }
      Node::Multiplicative { factors } => {
        for factor in factors.values() {
          self.emit(factor)?;
        }
        self.push(Op::Mul(factors.len()));
      }
    }
    if !symbol.multiplier.is_one() {
      self.push(Op::Const(symbol.multiplier.to_f64()));
      self.push(Op::Mul(2));
    }
    Ok(())
  }

  fn emit_variable(&mut self, name: &str) -> Result<(), AlgebraError> {
    match name {
      "pi" => self.push(Op::Const(std::f64::consts::PI)),
      "e" => self.push(Op::Const(std::f64::consts::E)),
      IMAGINARY_UNIT => {
        return Err(AlgebraError::NotReal(IMAGINARY_UNIT.to_string()));
      }
      _ => {
        let idx = self
          .variables
          .iter()
          .position(|v| v == name)
          .ok_or_else(|| AlgebraError::UnboundVariable(name.to_string()))?;
        self.push(Op::Load(idx));
      }
    }
    Ok(())
  }

  fn emit_power(&mut self, power: &Rational) {
    if power.is_one() {
      return;
    }
    self.push(Op::Const(power.to_f64()));
    self.push(Op::Pow);
  }
}

/// Error function: Taylor series near zero, continued fraction for the tail.
pub fn erf(x: f64) -> f64 {
  let sign = if x < 0.0 { -1.0 } else { 1.0 };
  let x = x.abs();
  if x > 4.0 {
    return sign * (1.0 - erfc_tail(x));
  }
  let mut sum = x;
  let mut term = x;
  for n in 1..100 {
    term *= -x * x / n as f64;
    let contribution = term / (2 * n + 1) as f64;
    sum += contribution;
    if contribution.abs() < 1e-16 * sum.abs() {
      break;
    }
  }
  sign * sum * 2.0 / std::f64::consts::PI.sqrt()
}

/// `erfc(x)` for large `x` by Lentz's method.
fn erfc_tail(x: f64) -> f64 {
  const TINY: f64 = 1e-30;
  let mut f = x;
  let mut c = x;
  let mut d = 0.0;
  for n in 1..200 {
    let a = n as f64 * 0.5;
    d = x + a * d;
    if d.abs() < TINY {
      d = TINY;
    }
    c = x + a / c;
    if c.abs() < TINY {
      c = TINY;
    }
    d = 1.0 / d;
    let delta = c * d;
    f *= delta;
    if (delta - 1.0).abs() < 1e-15 {
      break;
    }
  }
  (-x * x).exp() / (f * std::f64::consts::PI.sqrt())
}
