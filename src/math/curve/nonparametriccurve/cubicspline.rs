use log::{
    debug,
    warn
};
use nalgebra::{
    DMatrix,
    DVector
};

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    validate_points,
    NonparametricCurve,
    Point2D
};
use crate::math::interpolationerror::InterpolationError;
use crate::math::polynomial::polynomial::Polynomial;
use crate::math::polynomial::polynomialformat::PiecewiseGnuplotFormat;

// ─────────────────────────────────────────────
// SplineSegment
// ─────────────────────────────────────────────

/// 樣條的第 i 段，定義於 [x_i, x_{i+1}]。
///
/// 多項式以平移後的變數 t = x - x_i 表示：
///   S_i(t) = a_i + b_i*t + c_i*t^2 + d_i*t^3
#[derive(Clone, Debug, PartialEq)]
pub struct SplineSegment {
    lhs_x: f64,
    rhs_x: f64,
    polynomial: Polynomial,
    deriv_polynomial: Polynomial,
}

impl SplineSegment {
    fn new(lhs_x: f64, rhs_x: f64, polynomial: Polynomial) -> SplineSegment {
        let deriv_polynomial = polynomial.derivative();
        SplineSegment { lhs_x, rhs_x, polynomial, deriv_polynomial }
    }

    pub fn breakpoint(&self) -> f64 {
        self.lhs_x
    }

    pub fn right_breakpoint(&self) -> f64 {
        self.rhs_x
    }

    /// 以 t = x - x_i 表示的多項式
    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// 以原始 x 表示的同一個三次多項式
    pub fn polynomial_in_x(&self) -> Polynomial {
        self.polynomial.shift(-self.lhs_x)
    }

    pub fn value(&self, x: f64) -> f64 {
        self.polynomial.evaluate(x - self.lhs_x)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        self.deriv_polynomial.evaluate(x - self.lhs_x)
    }

    pub fn second_derivative(&self, x: f64) -> f64 {
        self.deriv_polynomial.derivative().evaluate(x - self.lhs_x)
    }
}

// ─────────────────────────────────────────────
// 邊界條件
// ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SplineBoundary {
    /// 兩端二階導數為 0
    Natural,
    /// 兩端一階導數分別為 fp0、fpn
    Clamped { fp0: f64, fpn: f64 },
}

// ─────────────────────────────────────────────
// 聯立方程組
// ─────────────────────────────────────────────
//
// n+1 個點、n 段，h[i] = x[i+1] - x[i]。未知數 c[0..=n]（二階導數的一半）。
// 內部方程式（i = 1..n-1）：
//   h[i-1]*c[i-1] + 2*(h[i-1]+h[i])*c[i] + h[i]*c[i+1]
//     = 3/h[i]*(y[i+1]-y[i]) - 3/h[i-1]*(y[i]-y[i-1])
// 第 0 列與第 n 列依邊界條件設定。

fn build_interior_system(points: &[Point2D], h: &[f64]) -> (DMatrix<f64>, DVector<f64>) {
    let n = h.len();
    let mut mat = DMatrix::<f64>::zeros(n + 1, n + 1);
    let mut alpha = DVector::<f64>::zeros(n + 1);

    for i in 1..n {
        mat[(i, i - 1)] = h[i - 1];
        mat[(i, i)]     = 2.0 * (h[i - 1] + h[i]);
        mat[(i, i + 1)] = h[i];
        alpha[i] = 3.0 * (Point2D::slope(&points[i], &points[i + 1])
                        - Point2D::slope(&points[i - 1], &points[i]));
    }
    (mat, alpha)
}

fn apply_boundary(
    boundary: SplineBoundary,
    points: &[Point2D],
    h: &[f64],
    mat: &mut DMatrix<f64>,
    alpha: &mut DVector<f64>,
) {
    let n = h.len();
    match boundary {
        // c[0] = c[n] = 0
        SplineBoundary::Natural => {
            mat[(0, 0)] = 1.0;
            mat[(n, n)] = 1.0;
            alpha[0] = 0.0;
            alpha[n] = 0.0;
        }
        SplineBoundary::Clamped { fp0, fpn } => {
            mat[(0, 0)] = 2.0 * h[0];
            mat[(0, 1)] = h[0];
            alpha[0] = 3.0 * (Point2D::slope(&points[0], &points[1]) - fp0);

            mat[(n, n - 1)] = h[n - 1];
            mat[(n, n)]     = 2.0 * h[n - 1];
            alpha[n] = 3.0 * (fpn - Point2D::slope(&points[n - 1], &points[n]));
        }
    }
}

fn solve_moments(mat: DMatrix<f64>, alpha: &DVector<f64>) -> Result<Vec<f64>, InterpolationError> {
    let c = mat.lu().solve(alpha).ok_or(InterpolationError::SingularSystem)?;
    if c.iter().any(|v| !v.is_finite()) {
        return Err(InterpolationError::SingularSystem);
    }
    Ok(c.iter().copied().collect())
}

/// 由 c[0..=n] 求各段的 a, b, c, d，並以多項式運算組出 S_i(t)。
fn build_segments(points: &[Point2D], h: &[f64], c: &[f64]) -> Vec<SplineSegment> {
    let t = Polynomial::new(vec![0.0, 1.0]);
    let t2 = t.power(2);
    let t3 = t.power(3);

    (0..h.len())
        .map(|i| {
            let a_i = points[i].y();
            let b_i = Point2D::slope(&points[i], &points[i + 1]) - h[i] * (c[i + 1] + 2.0 * c[i]) / 3.0;
            let c_i = c[i];
            let d_i = (c[i + 1] - c[i]) / (3.0 * h[i]);

            let polynomial = Polynomial::constant(a_i)
                .add(&t.scale(b_i))
                .add(&t2.scale(c_i))
                .add(&t3.scale(d_i));
            SplineSegment::new(points[i].x(), points[i + 1].x(), polynomial)
        })
        .collect()
}

// ─────────────────────────────────────────────
// CubicSpline
// ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct CubicSpline {
    boundary: SplineBoundary,
    points: Vec<Point2D>,
    segments: Vec<SplineSegment>,
}

impl CubicSpline {
    /// 點必須依 x 嚴格遞增，且至少兩個點。
    pub fn new(points: Vec<Point2D>, boundary: SplineBoundary) -> Result<CubicSpline, InterpolationError> {
        validate_points(&points, 2)?;
        if let SplineBoundary::Clamped { fp0, fpn } = boundary {
            if !fp0.is_finite() || !fpn.is_finite() {
                return Err(InterpolationError::invalid_input(format!(
                    "clamped end slopes must be finite, got ({}, {})",
                    fp0, fpn
                )));
            }
        }
        debug!("building {:?} cubic spline through {} points", boundary, points.len());

        let n = points.len() - 1;
        let h: Vec<f64> = (0..n).map(|i| points[i + 1].x() - points[i].x()).collect();

        let (mut mat, mut alpha) = build_interior_system(&points, &h);
        apply_boundary(boundary, &points, &h, &mut mat, &mut alpha);

        let c = solve_moments(mat, &alpha).inspect_err(|_| {
            warn!("cubic spline system through {} points is singular", points.len());
        })?;
        let segments = build_segments(&points, &h, &c);

        Ok(CubicSpline { boundary, points, segments })
    }

    pub fn natural(points: Vec<Point2D>) -> Result<CubicSpline, InterpolationError> {
        CubicSpline::new(points, SplineBoundary::Natural)
    }

    pub fn clamped(points: Vec<Point2D>, fp0: f64, fpn: f64) -> Result<CubicSpline, InterpolationError> {
        CubicSpline::new(points, SplineBoundary::Clamped { fp0, fpn })
    }

    pub fn boundary(&self) -> SplineBoundary {
        self.boundary
    }

    pub fn segments(&self) -> &[SplineSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn breakpoints(&self) -> Vec<f64> {
        self.points.iter().map(|pt| pt.x()).collect()
    }

    /// 各段以原始 x 表示的多項式
    pub fn polynomials_in_x(&self) -> Vec<Polynomial> {
        self.segments.iter().map(|s| s.polynomial_in_x()).collect()
    }

    /// 區間外的 x 歸到第一段或最後一段；恰在內部節點上時取右側那一段。
    /// NaN 歸到第一段，求值結果仍為 NaN。
    pub fn find_segment(&self, x: f64) -> usize {
        if x.is_nan() || x <= self.min_x() {
            0
        } else if x >= self.max_x() {
            self.segments.len() - 1
        } else {
            self.segments.partition_point(|s| s.lhs_x <= x).saturating_sub(1)
        }
    }

    /// gnuplot 的分段表示式（以原始 x 表示）
    pub fn to_gnuplot(&self) -> String {
        let pieces = self.polynomials_in_x();
        let breakpoints = self.breakpoints();
        PiecewiseGnuplotFormat::new(&pieces, &breakpoints).to_string()
    }
}

impl NonparametricCurve for CubicSpline {
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

impl Curve for CubicSpline {
    fn value(&self, x: f64) -> f64 {
        self.segments[self.find_segment(x)].value(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        self.segments[self.find_segment(x)].derivative(x)
    }

    fn second_derivative(&self, x: f64) -> f64 {
        self.segments[self.find_segment(x)].second_derivative(x)
    }
}
