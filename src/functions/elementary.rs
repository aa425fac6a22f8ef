//! Function application with the simplifications applied at construction.

use super::arithmetic::{power, scale};
use super::convert::primitive_part;
use crate::AlgebraError;
use crate::rational::Rational;
use crate::syntax::{Node, PARENS, Symbol, make_function, make_number};
use num_integer::Integer;

/// Functions taking exactly one argument.
const UNARY: [&str; 25] = [
  "sin", "cos", "tan", "sec", "csc", "cot", "asin", "acos", "atan", "sinh",
  "cosh", "tanh", "asinh", "acosh", "atanh", "exp", "log", "log10", "sqrt",
  "abs", "floor", "ceil", "sign", "erf", PARENS,
];

/// Applies `name` to `args`.
///
/// `parens` disappears, `sqrt` and `exp` become powers and `abs` pulls out
/// its rational content. Everything else is kept as a function node.
pub fn apply_function(
  name: &str,
  args: Vec<Symbol>,
) -> Result<Symbol, AlgebraError> {
  if UNARY.contains(&name) && args.len() != 1 {
    return Err(AlgebraError::ArgumentCount {
      name: name.to_string(),
      expected: 1,
      given: args.len(),
    });
  }
  if name == "atan2" && args.len() != 2 {
    return Err(AlgebraError::ArgumentCount {
      name: name.to_string(),
      expected: 2,
      given: args.len(),
    });
  }
  match name {
    PARENS | "sqrt" | "exp" | "abs" => {
      let Some(arg) = args.into_iter().next() else {
        unreachable!("arity checked above")
      };
      match name {
        PARENS => Ok(arg),
        "sqrt" => power(arg, make_number(Rational::new(1, 2))),
        "exp" => power(Symbol::variable("e"), arg),
        _ => Ok(absolute_value(arg)),
      }
    }
    _ => Ok(make_function(name, args)),
  }
}

fn absolute_value(arg: Symbol) -> Symbol {
  let (content, body) = primitive_part(arg);
  let magnitude = content.abs();
  if body.is_one() {
    return make_number(magnitude);
  }
  let even_power = body
    .rational_power()
    .is_some_and(|p| p.is_integer() && p.numer().is_even());
  let already_absolute =
    matches!(&body.node, Node::Function { name, .. } if name == "abs");
  if even_power || already_absolute {
    return scale(body, &magnitude);
  }
  scale(make_function("abs", vec![body]), &magnitude)
}
