use std::fmt;
use std::iter::Sum;
use std::ops;

use serde::{
    Deserialize,
    Serialize
};

use crate::math::interpolationerror::InterpolationError;
use crate::math::polynomial::newtonsolver::NewtonSolver;

// ─────────────────────────────────────────────
// Polynomial
// ─────────────────────────────────────────────
//
// 單變數稠密多項式，係數依次方由低到高存放：
//   p(x) = coefs[0] + coefs[1]*x + ... + coefs[n]*x^n
//
// 不變量：最後一個係數非零；零多項式存為 [0.0]。
// 因此 degree = coefs.len() - 1。
// 所有運算都回傳新的多項式，不提供就地修改。
//
// 序列化為 JSON 係數陣列。NaN/inf 係數會被 serde_json 寫成 null，
// 無法再讀回，因此只有全為有限係數的多項式能來回轉換。

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coefs: Vec<f64>,
}

impl Polynomial {
    /// 以升冪係數建構，會去除尾端的零係數（至少保留一個）。
    ///
    /// 空的係數列表沒有意義，直接 panic。
    pub fn new(coefs: Vec<f64>) -> Polynomial {
        assert!(!coefs.is_empty(), "polynomial requires at least one coefficient");
        let mut coefs = coefs;
        while coefs.len() > 1 && coefs[coefs.len() - 1] == 0.0 {
            coefs.pop();
        }
        Polynomial { coefs }
    }

    pub fn constant(c: f64) -> Polynomial {
        Polynomial::new(vec![c])
    }

    pub fn zero() -> Polynomial {
        Polynomial { coefs: vec![0.0] }
    }

    pub fn one() -> Polynomial {
        Polynomial { coefs: vec![1.0] }
    }

    /// coef * x^power
    pub fn monomial(coef: f64, power: usize) -> Polynomial {
        let mut coefs = vec![0.0; power + 1];
        coefs[power] = coef;
        Polynomial::new(coefs)
    }

    /// (x - root)
    pub fn linear_factor(root: f64) -> Polynomial {
        Polynomial::new(vec![-root, 1.0])
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefs
    }

    /// 取 x^power 的係數；超出範圍會 panic。
    pub fn coefficient(&self, power: usize) -> f64 {
        self.coefs[power]
    }

    pub fn degree(&self) -> usize {
        self.coefs.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefs.len() == 1 && self.coefs[0] == 0.0
    }

    /// 直接求值：Σ coefs[i] * x^i
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefs
            .iter()
            .enumerate()
            .map(|(i, &c)| c * x.powi(i as i32))
            .sum()
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let (longer, shorter) = if self.coefs.len() >= other.coefs.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut coefs = longer.coefs.clone();
        for (c, &s) in coefs.iter_mut().zip(shorter.coefs.iter()) {
            *c += s;
        }
        Polynomial::new(coefs)
    }

    pub fn scale(&self, scalar: f64) -> Polynomial {
        Polynomial::new(self.coefs.iter().map(|&c| scalar * c).collect())
    }

    pub fn subtract(&self, other: &Polynomial) -> Polynomial {
        self.add(&other.scale(-1.0))
    }

    /// a * x^shift * self
    fn distribute(&self, a: f64, shift: usize) -> Polynomial {
        let mut coefs = vec![0.0; shift];
        coefs.extend(self.coefs.iter().map(|&c| a * c));
        Polynomial::new(coefs)
    }

    /// 對 self 每個非零係數 a_i，把 a_i * x^i * other 累加進結果。
    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        self.coefs
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a != 0.0)
            .fold(Polynomial::zero(), |acc, (i, &a)| acc.add(&other.distribute(a, i)))
    }

    /// 除數為 0 時依 IEEE 規則產生 inf / NaN。
    pub fn divide_by_scalar(&self, scalar: f64) -> Polynomial {
        Polynomial::new(self.coefs.iter().map(|&c| c / scalar).collect())
    }

    pub fn derivative(&self) -> Polynomial {
        if self.coefs.len() == 1 {
            return Polynomial::zero();
        }
        Polynomial::new(
            (1..self.coefs.len())
                .map(|i| i as f64 * self.coefs[i])
                .collect()
        )
    }

    /// 平方求冪
    pub fn power(&self, n: u32) -> Polynomial {
        match n {
            0 => Polynomial::one(),
            1 => self.clone(),
            n if n % 2 == 0 => {
                let half = self.power(n / 2);
                half.multiply(&half)
            }
            n => self.power(n - 1).multiply(self),
        }
    }

    /// p(inner(x))，以 Horner 形式展開。
    pub fn compose(&self, inner: &Polynomial) -> Polynomial {
        let last = self.coefs.len() - 1;
        self.coefs[..last]
            .iter()
            .rev()
            .fold(Polynomial::constant(self.coefs[last]), |acc, &c| {
                acc.multiply(inner).add(&Polynomial::constant(c))
            })
    }

    /// 回傳 q 使得 q(t) = p(t + x0)。
    ///
    /// 樣條區段以 t = x - x_i 表示，`segment.shift(-x_i)` 即為以原始 x 表示的多項式。
    pub fn shift(&self, x0: f64) -> Polynomial {
        self.compose(&Polynomial::new(vec![x0, 1.0]))
    }

    /// 以預設的 Newton 設定（10000 次、1e-11）求根。
    pub fn root(&self, initial_guess: f64) -> Result<f64, InterpolationError> {
        NewtonSolver::default().solve(self, initial_guess)
    }
}

impl Default for Polynomial {
    fn default() -> Polynomial {
        Polynomial::zero()
    }
}

impl TryFrom<Vec<f64>> for Polynomial {
    type Error = InterpolationError;

    fn try_from(coefs: Vec<f64>) -> Result<Polynomial, InterpolationError> {
        if coefs.is_empty() {
            return Err(InterpolationError::invalid_input("empty coefficient list"));
        }
        Ok(Polynomial::new(coefs))
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(polynomial: Polynomial) -> Vec<f64> {
        polynomial.coefs
    }
}

impl From<f64> for Polynomial {
    fn from(c: f64) -> Polynomial {
        Polynomial::constant(c)
    }
}

impl ops::Index<usize> for Polynomial {
    type Output = f64;

    fn index(&self, power: usize) -> &f64 {
        &self.coefs[power]
    }
}

// 例：3 + -2x + 0.5x^2
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, &c) in self.coefs.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match i {
                0 => write!(f, "{}", c)?,
                1 => write!(f, "{}x", c)?,
                _ => write!(f, "{}x^{}", c, i)?,
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────
// 運算子（皆委派給具名函數）
// ─────────────────────────────────────────────

impl ops::Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Polynomial {
        Polynomial::add(self, rhs)
    }
}

impl ops::Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        Polynomial::add(&self, &rhs)
    }
}

impl ops::Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Polynomial {
        self.subtract(rhs)
    }
}

impl ops::Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Polynomial) -> Polynomial {
        self.subtract(&rhs)
    }
}

impl ops::Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Polynomial {
        self.multiply(rhs)
    }
}

impl ops::Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        self.multiply(&rhs)
    }
}

impl ops::Mul<f64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, scalar: f64) -> Polynomial {
        self.scale(scalar)
    }
}

impl ops::Mul<f64> for Polynomial {
    type Output = Polynomial;

    fn mul(self, scalar: f64) -> Polynomial {
        self.scale(scalar)
    }
}

impl<'a> ops::Mul<&'a Polynomial> for f64 {
    type Output = Polynomial;

    fn mul(self, polynomial: &'a Polynomial) -> Polynomial {
        polynomial.scale(self)
    }
}

impl ops::Mul<Polynomial> for f64 {
    type Output = Polynomial;

    fn mul(self, polynomial: Polynomial) -> Polynomial {
        polynomial.scale(self)
    }
}

impl ops::Div<f64> for &Polynomial {
    type Output = Polynomial;

    fn div(self, scalar: f64) -> Polynomial {
        self.divide_by_scalar(scalar)
    }
}

impl ops::Div<f64> for Polynomial {
    type Output = Polynomial;

    fn div(self, scalar: f64) -> Polynomial {
        self.divide_by_scalar(scalar)
    }
}

impl ops::Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl ops::Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl Sum for Polynomial {
    fn sum<I: Iterator<Item = Polynomial>>(iter: I) -> Polynomial {
        iter.fold(Polynomial::zero(), |acc, p| acc.add(&p))
    }
}

impl<'a> Sum<&'a Polynomial> for Polynomial {
    fn sum<I: Iterator<Item = &'a Polynomial>>(iter: I) -> Polynomial {
        iter.fold(Polynomial::zero(), |acc, p| acc.add(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_coefs_close(actual: &Polynomial, expected: &[f64]) {
        assert_eq!(actual.coefficients().len(), expected.len(), "{actual:?} vs {expected:?}");
        for (&a, &e) in actual.coefficients().iter().zip(expected) {
            assert_close(a, e, 1e-9);
        }
    }

    #[test_log::test]
    fn new_trims_trailing_zeros() {
        let p = Polynomial::new(vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(p.coefficients(), &[1.0, 2.0]);
        assert_eq!(p.degree(), 1);

        let zero = Polynomial::new(vec![0.0, 0.0, 0.0]);
        assert_eq!(zero.coefficients(), &[0.0]);
        assert_eq!(zero.degree(), 0);
        assert!(zero.is_zero());
    }

    #[test_log::test]
    #[should_panic(expected = "at least one coefficient")]
    fn new_rejects_empty_coefficients() {
        let _ = Polynomial::new(vec![]);
    }

    #[test_log::test]
    fn evaluate_sums_powers() {
        // 1 + 2x + 3x^2
        let p = Polynomial::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(p.evaluate(0.0), 1.0);
        assert_eq!(p.evaluate(2.0), 17.0);
        assert_eq!(p.evaluate(-1.0), 2.0);
        assert!(p.evaluate(f64::NAN).is_nan());
    }

    #[test_log::test]
    fn add_pads_shorter_operand_and_renormalizes() {
        let p = Polynomial::new(vec![1.0, 2.0, 3.0]);
        let q = Polynomial::new(vec![4.0, 5.0]);
        assert_eq!(p.add(&q).coefficients(), &[5.0, 7.0, 3.0]);
        assert_eq!(q.add(&p), p.add(&q));

        let cancel = Polynomial::new(vec![0.0, 0.0, -3.0]);
        assert_eq!(p.add(&cancel).coefficients(), &[1.0, 2.0]);
    }

    #[test_log::test]
    fn scale_by_zero_collapses() {
        let p = Polynomial::new(vec![1.0, 2.0, 3.0]);
        assert!(p.scale(0.0).is_zero());
        assert_eq!(p.scale(2.0).coefficients(), &[2.0, 4.0, 6.0]);
    }

    #[test_log::test]
    fn subtract_self_is_zero() {
        let p = Polynomial::new(vec![1.5, -2.0, 3.25]);
        assert!(p.subtract(&p).is_zero());
        assert_eq!((&p - &Polynomial::constant(1.5)).coefficients(), &[0.0, -2.0, 3.25]);
    }

    #[test_log::test]
    fn multiply_convolves() {
        // (x - 1)(x + 1) = x^2 - 1
        let p = Polynomial::linear_factor(1.0);
        let q = Polynomial::linear_factor(-1.0);
        assert_eq!(p.multiply(&q).coefficients(), &[-1.0, 0.0, 1.0]);

        // (1 + x^2)(2 + 3x) = 2 + 3x + 2x^2 + 3x^3
        let r = Polynomial::new(vec![1.0, 0.0, 1.0]);
        let s = Polynomial::new(vec![2.0, 3.0]);
        assert_eq!(r.multiply(&s).coefficients(), &[2.0, 3.0, 2.0, 3.0]);

        assert!(r.multiply(&Polynomial::zero()).is_zero());
        assert!(Polynomial::zero().multiply(&r).is_zero());
    }

    #[test_log::test]
    fn divide_by_scalar_divides_each_coefficient() {
        let p = Polynomial::new(vec![2.0, 4.0, 8.0]);
        assert_eq!(p.divide_by_scalar(2.0).coefficients(), &[1.0, 2.0, 4.0]);
        assert_eq!((&p / 4.0).coefficients(), &[0.5, 1.0, 2.0]);

        let inf = p.divide_by_scalar(0.0);
        assert!(inf.coefficients().iter().all(|c| c.is_infinite()));
    }

    #[test_log::test]
    fn derivative_of_constant_is_zero() {
        assert!(Polynomial::constant(7.0).derivative().is_zero());
        assert!(Polynomial::zero().derivative().is_zero());
    }

    #[test_log::test]
    fn derivative_lowers_degree() {
        // 5 + 3x + 2x^2 + x^3 -> 3 + 4x + 3x^2
        let p = Polynomial::new(vec![5.0, 3.0, 2.0, 1.0]);
        assert_eq!(p.derivative().coefficients(), &[3.0, 4.0, 3.0]);
        assert_eq!(p.derivative().derivative().coefficients(), &[4.0, 6.0]);
    }

    #[test_log::test]
    fn power_by_squaring() {
        let p = Polynomial::new(vec![1.0, 1.0]);
        assert_eq!(p.power(0), Polynomial::one());
        assert_eq!(p.power(1), p);
        assert_eq!(p.power(2).coefficients(), &[1.0, 2.0, 1.0]);
        assert_eq!(p.power(3).coefficients(), &[1.0, 3.0, 3.0, 1.0]);
        assert_eq!(p.power(4).coefficients(), &[1.0, 4.0, 6.0, 4.0, 1.0]);
        assert_eq!(p.power(5), p.power(4).multiply(&p));
    }

    #[test_log::test]
    fn shift_re_expands_around_new_origin() {
        // p(x) = x^2, p(t + 3) = 9 + 6t + t^2
        let p = Polynomial::monomial(1.0, 2);
        assert_coefs_close(&p.shift(3.0), &[9.0, 6.0, 1.0]);

        let q = Polynomial::new(vec![2.0, -1.0, 0.5, 0.25]);
        let shifted = q.shift(-1.5);
        for &t in &[-2.0, 0.0, 0.75, 4.0] {
            assert_close(shifted.evaluate(t), q.evaluate(t - 1.5), 1e-9);
        }
    }

    #[test_log::test]
    fn compose_substitutes_inner_polynomial() {
        // (x^2 + 1) o (2x - 1) = 4x^2 - 4x + 2
        let outer = Polynomial::new(vec![1.0, 0.0, 1.0]);
        let inner = Polynomial::new(vec![-1.0, 2.0]);
        assert_coefs_close(&outer.compose(&inner), &[2.0, -4.0, 4.0]);
        assert_eq!(Polynomial::constant(3.0).compose(&inner), Polynomial::constant(3.0));
    }

    #[test_log::test]
    fn root_of_quadratic() {
        let p = Polynomial::new(vec![-4.0, 0.0, 1.0]);
        let root = p.root(3.0).expect("x^2 - 4 converges from 3");
        assert_close(root, 2.0, 1e-9);
        let root = p.root(-3.0).expect("x^2 - 4 converges from -3");
        assert_close(root, -2.0, 1e-9);
    }

    #[test_log::test]
    fn display_omits_zero_terms() {
        let p = Polynomial::new(vec![3.0, -2.0, 0.0, 0.5]);
        assert_eq!(p.to_string(), "3 + -2x + 0.5x^3");
        assert_eq!(Polynomial::new(vec![0.0, 1.0]).to_string(), "1x");
        assert_eq!(Polynomial::zero().to_string(), "0");
    }

    #[test_log::test]
    fn operators_delegate_to_named_functions() {
        let p = Polynomial::new(vec![1.0, 2.0]);
        let q = Polynomial::new(vec![0.0, 1.0]);
        assert_eq!(&p + &q, p.add(&q));
        assert_eq!(&p * &q, p.multiply(&q));
        assert_eq!(2.0 * &p, p.scale(2.0));
        assert_eq!(-&p, p.scale(-1.0));
        let total: Polynomial = vec![p.clone(), q.clone(), p.clone()].into_iter().sum();
        assert_eq!(total.coefficients(), &[2.0, 5.0]);
    }

    #[test_log::test]
    fn serde_round_trip_renormalizes() {
        let p: Polynomial = serde_json::from_str("[1.0, 2.0, 0.0]").expect("valid json");
        assert_eq!(p.coefficients(), &[1.0, 2.0]);
        assert_eq!(serde_json::to_string(&p).expect("serializable"), "[1.0,2.0]");
        assert!(serde_json::from_str::<Polynomial>("[]").is_err());
    }

    #[test_log::test]
    fn serde_rejects_non_finite_coefficients() {
        let p = Polynomial::new(vec![1.0, 2.0]).divide_by_scalar(0.0);
        let json = serde_json::to_string(&p).expect("serializable");
        assert_eq!(json, "[null,null]");
        assert!(serde_json::from_str::<Polynomial>(&json).is_err());
    }

    #[test_log::test]
    fn index_reads_coefficient() {
        let p = Polynomial::new(vec![4.0, 5.0, 6.0]);
        assert_eq!(p[0], 4.0);
        assert_eq!(p[2], 6.0);
        assert_eq!(p.coefficient(1), 5.0);
    }
}
