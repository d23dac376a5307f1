use log::debug;

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    validate_points,
    NonparametricCurve,
    Point2D
};
use crate::math::interpolationerror::InterpolationError;
use crate::math::polynomial::polynomial::Polynomial;

// ─────────────────────────────────────────────────────────────────────────────
// LagrangePolynomial - 係數形式
// ─────────────────────────────────────────────────────────────────────────────
//
//   L(x) = Σ_k y_k · Π_{i≠k} (x - x_i) / (x_k - x_i)
//
// 直接以多項式乘法展開成 monomial 係數，需要 O(n²) 次多項式乘法。
//
// 注意：
//   - 全域插值，n > 10 可能出現 Runge 振盪，數值上也不穩定
//   - 只適用於少量點（≤ 10）；大量點請使用 CubicSpline

#[derive(Clone, Debug, PartialEq)]
pub struct LagrangePolynomial {
    points: Vec<Point2D>,
    polynomial: Polynomial,
    deriv_polynomial: Polynomial,
    second_deriv_polynomial: Polynomial,
}

impl LagrangePolynomial {
    /// 點會先依 x 排序；x 重複或含非有限值時回傳 `InvalidInput`。
    pub fn new(mut points: Vec<Point2D>) -> Result<LagrangePolynomial, InterpolationError> {
        points.sort_by(|a, b| a.x().total_cmp(&b.x()));
        validate_points(&points, 1)?;
        debug!("building Lagrange polynomial through {} points", points.len());

        let polynomial = Self::expand(&points);
        let deriv_polynomial = polynomial.derivative();
        let second_deriv_polynomial = deriv_polynomial.derivative();
        Ok(LagrangePolynomial { points, polynomial, deriv_polynomial, second_deriv_polynomial })
    }

    /// Σ_k y_k · L_k(x)
    fn expand(points: &[Point2D]) -> Polynomial {
        points
            .iter()
            .enumerate()
            .map(|(k, pk)| {
                let (numerator, denominator) = points
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != k)
                    .fold((Polynomial::one(), 1.0), |(numerator, denominator), (_, pi)| {
                        (
                            numerator.multiply(&Polynomial::linear_factor(pi.x())),
                            denominator * (pk.x() - pi.x()),
                        )
                    });
                numerator.divide_by_scalar(denominator).scale(pk.y())
            })
            .sum()
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    pub fn into_polynomial(self) -> Polynomial {
        self.polynomial
    }
}

impl NonparametricCurve for LagrangePolynomial {
    fn points(&self) -> Vec<Point2D> {
        self.points.clone()
    }

    fn min_x(&self) -> f64 {
        self.points[0].x()
    }

    fn max_x(&self) -> f64 {
        self.points[self.points.len() - 1].x()
    }
}

impl Curve for LagrangePolynomial {
    fn value(&self, x: f64) -> f64 {
        self.polynomial.evaluate(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        self.deriv_polynomial.evaluate(x)
    }

    fn second_derivative(&self, x: f64) -> f64 {
        self.second_deriv_polynomial.evaluate(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_points(data: &[(f64, f64)]) -> Vec<Point2D> {
        data.iter().map(|&pt| Point2D::from(pt)).collect()
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test_log::test]
    fn single_point_is_constant() {
        let lagrange = LagrangePolynomial::new(to_points(&[(2.0, 5.0)])).expect("one point");
        assert_eq!(lagrange.polynomial(), &Polynomial::constant(5.0));
        assert_eq!(lagrange.derivative(10.0), 0.0);
    }

    #[test_log::test]
    fn recovers_quadratic() {
        // y = x^2 - 4
        let lagrange = LagrangePolynomial::new(to_points(&[(-1.0, -3.0), (0.0, -4.0), (2.0, 0.0)]))
            .expect("distinct points");
        let coefs = lagrange.polynomial().coefficients();
        assert_eq!(coefs.len(), 3);
        assert_close(coefs[0], -4.0, 1e-12);
        assert_close(coefs[1], 0.0, 1e-12);
        assert_close(coefs[2], 1.0, 1e-12);
        assert_close(lagrange.derivative(3.0), 6.0, 1e-12);
        assert_close(lagrange.second_derivative(-7.0), 2.0, 1e-12);
    }

    #[test_log::test]
    fn sorts_points_before_building() {
        let lagrange = LagrangePolynomial::new(to_points(&[(2.0, 4.0), (0.0, 0.0), (1.0, 1.0)]))
            .expect("distinct points");
        assert_eq!(lagrange.min_x(), 0.0);
        assert_eq!(lagrange.max_x(), 2.0);
        assert_close(lagrange.value(3.0), 9.0, 1e-12);
    }

    #[test_log::test]
    fn interpolates_every_point() {
        let data = [(0.0, 6.67), (6.0, 17.33), (10.0, 42.67), (13.0, 37.33), (17.0, 30.10)];
        let lagrange = LagrangePolynomial::new(to_points(&data)).expect("distinct points");
        assert_eq!(lagrange.polynomial().degree(), 4);
        for &(x, y) in &data {
            assert_close(lagrange.value(x), y, 1e-8);
        }
    }

    #[test_log::test]
    fn non_finite_queries_propagate() {
        let lagrange = LagrangePolynomial::new(to_points(&[(-1.0, -3.0), (0.0, -4.0), (2.0, 0.0)]))
            .expect("distinct points");
        assert!(lagrange.value(f64::NAN).is_nan());
        assert!(lagrange.derivative(f64::NAN).is_nan());
        // 二次式的二階導數是常數
        assert_eq!(lagrange.second_derivative(f64::NAN), lagrange.second_derivative(0.0));
        assert!(!lagrange.value(f64::INFINITY).is_finite());
        assert!(!lagrange.value(f64::NEG_INFINITY).is_finite());
    }

    #[test_log::test]
    fn rejects_empty_and_duplicate_x() {
        assert!(matches!(
            LagrangePolynomial::new(Vec::new()),
            Err(InterpolationError::InvalidInput(_))
        ));
        assert!(matches!(
            LagrangePolynomial::new(to_points(&[(1.0, 1.0), (1.0, 2.0)])),
            Err(InterpolationError::InvalidInput(_))
        ));
    }
}
