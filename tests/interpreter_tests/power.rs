use super::*;
use symcanon::{Rational, make_integer, make_number, multiply, power};

mod power {
  use super::*;

  mod numeric {
    use super::*;

    #[test]
    fn integer_exponents() {
      assert_eq!(interpret("2^10").unwrap(), "1024");
      assert_eq!(interpret("(2/3)^2").unwrap(), "4/9");
      assert_eq!(interpret("2^-2").unwrap(), "1/4");
      assert_eq!(interpret("(-3)^3").unwrap(), "-27");
      assert_eq!(interpret("-3^2").unwrap(), "-9");
    }

    #[test]
    fn exact_roots() {
      assert_eq!(interpret("27^(2/3)").unwrap(), "9");
      assert_eq!(interpret("sqrt(1/4)").unwrap(), "1/2");
      assert_eq!(interpret("(4/9)^(-1/2)").unwrap(), "3/2");
      assert_eq!(interpret("(-8)^(1/3)").unwrap(), "-2");
    }

    #[test]
    fn radicals_are_factored() {
      assert_eq!(interpret("sqrt(2)").unwrap(), "2^(1/2)");
      assert_eq!(interpret("sqrt(8)").unwrap(), "2*2^(1/2)");
      assert_eq!(interpret("sqrt(12)").unwrap(), "2*3^(1/2)");
      assert_eq!(interpret("sqrt(2) * sqrt(2)").unwrap(), "2");
      assert_eq!(interpret("sqrt(2) * sqrt(3)").unwrap(), "2^(1/2)*3^(1/2)");
    }

    #[test]
    fn negative_square_roots_are_imaginary() {
      assert_eq!(interpret("(-9)^(1/2)").unwrap(), "3*i");
      assert_eq!(interpret("sqrt(-4)").unwrap(), "2*i");
      assert_eq!(interpret("sqrt(-1) * sqrt(-1)").unwrap(), "-1");
    }

    #[test]
    fn powers_of_i_cycle() {
      assert_eq!(interpret("i^2").unwrap(), "-1");
      assert_eq!(interpret("i^3").unwrap(), "-i");
      assert_eq!(interpret("i^4").unwrap(), "1");
      assert_eq!(interpret("i^5").unwrap(), "i");
    }

    #[test]
    fn i_merges_with_radicals_of_minus_one() {
      let minus_one = || make_integer(-1);
      let root = |n, d| make_number(Rational::new(n, d));
      let product = multiply(
        power(minus_one(), root(1, 2)).unwrap(),
        power(minus_one(), root(1, 4)).unwrap(),
      )
      .unwrap();
      assert_eq!(product, power(minus_one(), root(3, 4)).unwrap());
      assert_eq!(interpret("i * (-1)^(1/4)").unwrap(), "(-1)^(3/4)");
      assert_eq!(interpret("(-1)^(1/4) * (-1)^(1/4)").unwrap(), "i");
      assert_eq!(interpret("i * (-1)^(3/4)").unwrap(), "(-1)^(5/4)");
      assert_eq!(interpret("x * (-1)^(1/4) * i").unwrap(), "(-1)^(3/4)*x");
    }
  }

  mod rational_exponents {
    use super::*;

    #[test]
    fn nested_powers_multiply() {
      assert_eq!(interpret("(x^2)^3").unwrap(), "x^6");
      assert_eq!(interpret("(x^(1/2))^2").unwrap(), "x");
      assert_eq!(interpret("(x^3)^(1/3)").unwrap(), "x");
    }

    #[test]
    fn even_root_of_even_power_is_absolute() {
      assert_eq!(interpret("(x^2)^(1/2)").unwrap(), "abs(x)");
      assert_eq!(interpret("sqrt(x^2)").unwrap(), "abs(x)");
      assert_eq!(interpret("abs(x)^2").unwrap(), "x^2");
    }

    #[test]
    fn absolute_value_does_not_nest() {
      assert_eq!(interpret("abs(abs(x))").unwrap(), "abs(x)");
      assert_eq!(interpret("abs(-2*abs(x))").unwrap(), "2*abs(x)");
      assert_eq!(interpret("abs(abs(x)^3)").unwrap(), "abs(x)^3");
    }

    #[test]
    fn products_distribute() {
      assert_eq!(interpret("(x*y)^2").unwrap(), "x^2*y^2");
      assert_eq!(interpret("(2*x)^3").unwrap(), "8*x^3");
      assert_eq!(interpret("(x/y)^-1").unwrap(), "x^(-1)*y");
    }

    #[test]
    fn sums_keep_their_power() {
      assert_eq!(interpret("(x + 1)^2").unwrap(), "(1+x)^2");
      assert_eq!(interpret("(x + 1)^2 * (x + 1)").unwrap(), "(1+x)^3");
      assert_eq!(interpret("(2*x + 2)^2").unwrap(), "4*(1+x)^2");
    }
  }

  mod symbolic_exponents {
    use super::*;

    #[test]
    fn same_base_adds_exponents() {
      assert_eq!(interpret("x^y * x^z").unwrap(), "x^(y+z)");
      assert_eq!(interpret("x^y * x").unwrap(), "x^(1+y)");
      assert_eq!(interpret("x^y / x^y").unwrap(), "1");
    }

    #[test]
    fn numeric_bases() {
      assert_eq!(interpret("2^x * 2^x").unwrap(), "2^(2*x)");
      assert_eq!(interpret("(-2)^x").unwrap(), "(-1)^x*2^x");
      assert_eq!(interpret("(1/2)^x").unwrap(), "2^(-x)");
      assert_eq!(interpret("1^x").unwrap(), "1");
      assert_eq!(interpret("0^x").unwrap(), "0");
    }

    #[test]
    fn symbolic_powers_stay_apart_from_radicals() {
      assert_eq!(interpret("2^x * sqrt(2)").unwrap(), "2^(1/2)*2^x");
      assert_eq!(interpret("sqrt(2) * 2^x * sqrt(2)").unwrap(), "2*2^x");
      assert_eq!(interpret("2^(x + 1/2) * 2^(-x)").unwrap(), "2^(1/2)");
    }

    #[test]
    fn exp_is_a_power_of_e() {
      assert_eq!(interpret("exp(x)").unwrap(), "e^x");
      assert_eq!(interpret("exp(x) * exp(y)").unwrap(), "e^(x+y)");
    }

    #[test]
    fn symbolic_powers_of_i_are_powers_of_minus_one() {
      assert_eq!(
        evaluate("i^x * i^y").unwrap(),
        evaluate("i^(x + y)").unwrap()
      );
      assert_eq!(evaluate("i^(2*x)").unwrap(), evaluate("(-1)^x").unwrap());
    }
  }
}
