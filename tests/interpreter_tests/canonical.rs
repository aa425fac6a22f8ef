use super::*;
use symcanon::functions::{
  additive_key, demote, key_for_group, multiplicative_key, power_key,
  primitive_part,
};
use symcanon::{Group, convert};

mod canonical {
  use super::*;

  mod groups {
    use super::*;

    fn group_of(input: &str) -> Group {
      evaluate(input).unwrap().group()
    }

    #[test]
    fn atoms() {
      assert_eq!(group_of("3/4"), Group::Number);
      assert_eq!(group_of("x"), Group::Variable);
      assert_eq!(group_of("x^2"), Group::Variable);
      assert_eq!(group_of("sin(x)"), Group::Function);
      assert_eq!(group_of("x^y"), Group::GeneralizedPower);
      assert_eq!(group_of("sqrt(2)"), Group::GeneralizedPower);
    }

    #[test]
    fn containers() {
      assert_eq!(group_of("x + x^2"), Group::AdditivePoly);
      assert_eq!(group_of("x + y"), Group::Additive);
      assert_eq!(group_of("x * y"), Group::Multiplicative);
      assert_eq!(group_of("(x + 1)^2"), Group::Additive);
    }

    #[test]
    fn single_children_collapse() {
      assert_eq!(group_of("x + y - y"), Group::Variable);
      assert_eq!(group_of("x * y / y"), Group::Variable);
      assert_eq!(group_of("2*x - x"), Group::Variable);
    }

    #[test]
    fn group_order_is_total() {
      assert!(Group::Number < Group::Variable);
      assert!(Group::Variable < Group::GeneralizedPower);
      assert!(Group::GeneralizedPower < Group::Function);
      assert!(Group::Function < Group::AdditivePoly);
      assert!(Group::AdditivePoly < Group::Multiplicative);
      assert!(Group::Multiplicative < Group::Additive);
    }
  }

  mod equality {
    use super::*;

    #[test]
    fn operand_order_does_not_matter() {
      assert_eq!(evaluate("x*y*z").unwrap(), evaluate("z*x*y").unwrap());
      assert_eq!(evaluate("a + b + c").unwrap(), evaluate("c + a + b").unwrap());
      assert_eq!(
        evaluate("(x + 1)*(y + 2)").unwrap(),
        evaluate("(2 + y)*(1 + x)").unwrap()
      );
    }

    #[test]
    fn multiplier_is_part_of_identity() {
      assert_ne!(evaluate("2*x").unwrap(), evaluate("x").unwrap());
      assert_ne!(evaluate("x^2").unwrap(), evaluate("x").unwrap());
    }

    #[test]
    fn text_round_trips() {
      for input in [
        "x+x^2+y",
        "(1/2)*x",
        "-(3/4)*x",
        "x^(-1)*y",
        "2*(1+x)^2",
        "(-1)^x*2^x",
        "sin(1+y)*(1+y)",
      ] {
        let symbol = evaluate(input).unwrap();
        assert_eq!(symbol.to_string(), input);
        assert_eq!(evaluate(&symbol.to_string()).unwrap(), symbol);
      }
    }
  }

  mod keys {
    use super::*;

    #[test]
    fn additive_key_ignores_multiplier_and_power() {
      let a = evaluate("3*x^2").unwrap();
      let b = evaluate("x").unwrap();
      assert_eq!(additive_key(&a), "x");
      assert_eq!(additive_key(&a), additive_key(&b));
      assert_eq!(additive_key(&evaluate("5").unwrap()), "#");
    }

    #[test]
    fn multiplicative_key_is_the_base() {
      assert_eq!(multiplicative_key(&evaluate("x^-2").unwrap()), "x");
      assert_eq!(multiplicative_key(&evaluate("x^y").unwrap()), "x");
      assert_eq!(multiplicative_key(&evaluate("2^x").unwrap()), "2^");
      assert_eq!(multiplicative_key(&evaluate("sqrt(2)").unwrap()), "2");
      assert_eq!(multiplicative_key(&evaluate("i").unwrap()), "(-1)");
      assert_eq!(
        multiplicative_key(&evaluate("(-1)^(1/4)").unwrap()),
        "(-1)"
      );
      assert_eq!(
        multiplicative_key(&evaluate("(x + 1)^3").unwrap()),
        multiplicative_key(&evaluate("x + 1").unwrap())
      );
    }

    #[test]
    fn power_key_is_the_rational_power() {
      assert_eq!(power_key(&evaluate("x^2").unwrap()), "2");
      assert_eq!(power_key(&evaluate("x^(1/2)").unwrap()), "1/2");
      assert_eq!(power_key(&evaluate("x").unwrap()), "1");
    }

    #[test]
    fn key_depends_on_container() {
      let term = evaluate("4*x^3").unwrap();
      assert_eq!(key_for_group(&term, Group::AdditivePoly), "3");
      assert_eq!(key_for_group(&term, Group::Additive), "x");
      assert_eq!(key_for_group(&term, Group::Multiplicative), "x");
    }
  }

  mod conversion {
    use super::*;

    #[test]
    fn into_additive_wraps_one_term() {
      let sum = convert(evaluate("x").unwrap(), Group::Additive);
      assert_eq!(sum.group(), Group::Additive);
      assert_eq!(sum.children().len(), 1);
      assert_eq!(sum.to_string(), "x");
    }

    #[test]
    fn closed_sums_are_wrapped_not_reused() {
      let closed = evaluate("(x + 1)^2").unwrap();
      let sum = convert(closed.clone(), Group::Additive);
      assert_eq!(sum.children(), [&closed]);
      assert_eq!(sum.to_string(), "(1+x)^2");

      let scaled = evaluate("-2*(x - y)^2").unwrap();
      let poly = convert(scaled.clone(), Group::AdditivePoly);
      assert_eq!(poly.children(), [&scaled]);
      assert_eq!(poly.value(), "(x-y)");

      let open = evaluate("x + 1").unwrap();
      assert_eq!(convert(open.clone(), Group::Additive), open);
    }

    #[test]
    fn into_product_moves_multiplier_up() {
      let product = convert(evaluate("3*x").unwrap(), Group::Multiplicative);
      assert_eq!(product.group(), Group::Multiplicative);
      assert_eq!(product.multiplier().to_string(), "3");
      assert!(product.children()[0].multiplier().is_one());
    }

    #[test]
    fn into_poly_uses_power_keys() {
      let poly = convert(evaluate("x^2").unwrap(), Group::AdditivePoly);
      assert_eq!(poly.group(), Group::AdditivePoly);
      assert_eq!(poly.value(), "x");
    }

    #[test]
    fn generalized_power_demotes_back() {
      let original = evaluate("x^2").unwrap();
      let raised = convert(original.clone(), Group::GeneralizedPower);
      assert_eq!(raised.group(), Group::GeneralizedPower);
      assert_eq!(raised.previous_group(), Some(Group::Variable));
      assert_eq!(demote(raised).unwrap(), original);
    }

    #[test]
    fn primitive_part_of_sum() {
      let (content, rest) = primitive_part(evaluate("2 + 2*x").unwrap());
      assert_eq!(content.to_string(), "2");
      assert_eq!(rest.to_string(), "1+x");

      let (content, rest) = primitive_part(evaluate("y - x").unwrap());
      assert_eq!(content.to_string(), "-1");
      assert_eq!(rest.to_string(), "x-y");

      let (content, rest) = primitive_part(evaluate("x/2 + 1/3").unwrap());
      assert_eq!(content.to_string(), "1/6");
      assert_eq!(rest.to_string(), "2+3*x");
    }
  }
}
