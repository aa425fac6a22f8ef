use super::*;

mod arithmetic {
  use super::*;

  mod rational {
    use super::*;

    #[test]
    fn addition() {
      assert_eq!(interpret("1 + 2").unwrap(), "3");
      assert_eq!(interpret("(1 + 2) + 3").unwrap(), "6");
      assert_eq!(interpret("1/2 + 1/3").unwrap(), "5/6");
    }

    #[test]
    fn subtraction() {
      assert_eq!(interpret("7 - 3 - 1").unwrap(), "3");
      assert_eq!(interpret("-1 + 3").unwrap(), "2");
      assert_eq!(interpret("1 - - 1").unwrap(), "2");
    }

    #[test]
    fn multiplication_and_precedence() {
      assert_eq!(interpret("2 * 3 + 4 * 5").unwrap(), "26");
      assert_eq!(interpret("2 * (3 + 4)").unwrap(), "14");
    }

    #[test]
    fn division_stays_exact() {
      assert_eq!(interpret("10 / 2").unwrap(), "5");
      assert_eq!(interpret("10 / 3").unwrap(), "10/3");
      assert_eq!(interpret("-6 / 8").unwrap(), "-3/4");
    }

    #[test]
    fn decimals_become_rationals() {
      assert_eq!(interpret("0.5 + 1/4").unwrap(), "3/4");
      assert_eq!(interpret("1.5e1").unwrap(), "15");
      assert_eq!(interpret("2.5E-1").unwrap(), "1/4");
    }
  }

  mod like_terms {
    use super::*;

    #[test]
    fn variable_plus_itself() {
      assert_eq!(interpret("x + x").unwrap(), "2*x");
    }

    #[test]
    fn coefficients_merge() {
      assert_eq!(interpret("2*x + 3*x").unwrap(), "5*x");
      assert_eq!(interpret("x/2 + x/3").unwrap(), "(5/6)*x");
    }

    #[test]
    fn cancellation_is_exact_zero() {
      assert_eq!(interpret("x - x").unwrap(), "0");
      assert_eq!(interpret("x + y - x").unwrap(), "y");
      assert_eq!(interpret("sin(x) - sin(x)").unwrap(), "0");
    }

    #[test]
    fn sums_merge_term_by_term() {
      assert_eq!(interpret("(x + 1) + (1 + x)").unwrap(), "2+2*x");
      assert_eq!(interpret("(x + y) - (y + x)").unwrap(), "0");
    }

    #[test]
    fn same_base_different_powers_group() {
      assert_eq!(interpret("x^2 + x").unwrap(), "x+x^2");
      assert_eq!(interpret("x^-1 + x^2").unwrap(), "x^(-1)+x^2");
      assert_eq!(interpret("1 + x + x^2").unwrap(), "1+x+x^2");
      assert_eq!(interpret("x + y + x^2").unwrap(), "x+x^2+y");
      assert_eq!(interpret("x^2 + x - x^2").unwrap(), "x");
    }

    #[test]
    fn numeric_coefficients() {
      assert_eq!(interpret("x/2").unwrap(), "(1/2)*x");
      assert_eq!(interpret("-3*x/4").unwrap(), "-(3/4)*x");
      assert_eq!(interpret("-x").unwrap(), "-x");
      assert_eq!(interpret("1 - x").unwrap(), "1-x");
    }
  }

  mod products {
    use super::*;

    #[test]
    fn variable_times_itself() {
      assert_eq!(interpret("x * x").unwrap(), "x^2");
      assert_eq!(interpret("x * x^2 * x^-3").unwrap(), "1");
    }

    #[test]
    fn factors_print_in_key_order() {
      assert_eq!(interpret("y * x").unwrap(), "x*y");
      assert_eq!(interpret("y / x").unwrap(), "x^(-1)*y");
      assert_eq!(interpret("x / y").unwrap(), "x*y^(-1)");
    }

    #[test]
    fn number_distributes_over_open_sum() {
      assert_eq!(interpret("2*(x + 1)").unwrap(), "2+2*x");
      assert_eq!(interpret("-(x - y)").unwrap(), "-x+y");
    }

    #[test]
    fn sums_as_factors() {
      assert_eq!(interpret("(x + 1)*(x + 1)").unwrap(), "(1+x)^2");
      assert_eq!(interpret("(2*x + 2)*(x + 1)").unwrap(), "2*(1+x)^2");
      assert_eq!(interpret("(x + 1)*y").unwrap(), "y*(1+x)");
      assert_eq!(interpret("(x + 1)/(x + 1)").unwrap(), "1");
      assert_eq!(interpret("1/(x + 1)").unwrap(), "(1+x)^(-1)");
    }

    #[test]
    fn reciprocals_key_consistently() {
      let left = evaluate("a/x * b/x").unwrap();
      let right = evaluate("(a*b)/x^2").unwrap();
      assert_eq!(left, right);
      assert_eq!(left.to_string(), "a*b*x^(-2)");
    }

    #[test]
    fn imaginary_unit_squares_to_minus_one() {
      assert_eq!(interpret("i * i").unwrap(), "-1");
      assert_eq!(interpret("i * i * i").unwrap(), "-i");
      assert_eq!(interpret("2*i * 3*i").unwrap(), "-6");
    }
  }

  mod closed_sums {
    use super::*;
    use symcanon::add;

    fn both_orders(a: &str, b: &str) -> String {
      let left = add(evaluate(a).unwrap(), evaluate(b).unwrap()).unwrap();
      let right = add(evaluate(b).unwrap(), evaluate(a).unwrap()).unwrap();
      assert_eq!(left, right, "{a} + {b}");
      left.to_string()
    }

    #[test]
    fn keep_their_power_next_to_a_number() {
      assert_eq!(both_orders("1/(x + 1)", "1"), "1+(1+x)^(-1)");
      assert_eq!(both_orders("(x - y)^2", "1"), "1+(x-y)^2");
    }

    #[test]
    fn keep_their_power_next_to_a_term() {
      assert_eq!(both_orders("x", "(x - y)^2"), "(x-y)^2+x");
      assert_eq!(
        both_orders("sin(x)", "2*(1 + x)^(-1)"),
        "2*(1+x)^(-1)+sin(x)"
      );
      assert_eq!(both_orders("-2*(x - y)^2", "x"), "-2*(x-y)^2+x");
    }

    #[test]
    fn group_by_power_when_bases_match() {
      assert_eq!(
        both_orders("(x + x^2)^2", "(x + x^2)^3"),
        "(x+x^2)^2+(x+x^2)^3"
      );
      assert_eq!(
        both_orders("(1 + x)^(-1)", "(1 + x)^2"),
        "(1+x)^(-1)+(1+x)^2"
      );
    }

    #[test]
    fn like_closed_sums_merge() {
      assert_eq!(interpret("(x - y)^2 + 3*(x - y)^2").unwrap(), "4*(x-y)^2");
      assert_eq!(interpret("(x - y)^2 + 1 - (x - y)^2").unwrap(), "1");
      assert_eq!(
        interpret("1/(x + 1) + (x + 1)^2 - 1/(x + 1)").unwrap(),
        "(1+x)^2"
      );
    }

    #[test]
    fn open_sums_still_flatten() {
      assert_eq!(interpret("(1 + x) + 1/(1 + x)").unwrap(), "1+(1+x)^(-1)+x");
    }
  }
}
