use serde::{
    Deserialize,
    Serialize
};

use crate::math::interpolationerror::InterpolationError;

/// 樣本點 (x, y)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// 兩點連線的斜率
    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Point2D {
        Point2D::new(x, y)
    }
}

pub trait NonparametricCurve {
    fn points(&self) -> Vec<Point2D>;

    fn min_x(&self) -> f64;

    fn max_x(&self) -> f64;
}

/// 檢查點數至少為 `necessary_points`、座標皆為有限值且 x 嚴格遞增。
pub fn validate_points(points: &[Point2D], necessary_points: usize) -> Result<(), InterpolationError> {
    if points.len() < necessary_points {
        return Err(InterpolationError::invalid_input(format!(
            "at least {} points required, got {}",
            necessary_points,
            points.len()
        )));
    }
    if let Some(pt) = points.iter().find(|pt| !pt.x.is_finite() || !pt.y.is_finite()) {
        return Err(InterpolationError::invalid_input(format!(
            "non-finite point ({}, {})",
            pt.x, pt.y
        )));
    }
    if let Some(i) = (1..points.len()).find(|&i| points[i].x <= points[i - 1].x) {
        return Err(InterpolationError::invalid_input(format!(
            "x values must be strictly increasing: x[{}] = {} follows x[{}] = {}",
            i,
            points[i].x,
            i - 1,
            points[i - 1].x
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(xs: &[f64]) -> Vec<Point2D> {
        xs.iter().map(|&x| Point2D::new(x, x * x)).collect()
    }

    #[test_log::test]
    fn accepts_increasing_points() {
        assert_eq!(validate_points(&points(&[0.0, 1.0, 2.5]), 2), Ok(()));
    }

    #[test_log::test]
    fn rejects_too_few_points() {
        let error = validate_points(&points(&[1.0]), 2).unwrap_err();
        assert!(matches!(error, InterpolationError::InvalidInput(_)));
    }

    #[test_log::test]
    fn rejects_duplicate_and_unsorted_x() {
        assert!(validate_points(&points(&[0.0, 1.0, 1.0]), 2).is_err());
        assert!(validate_points(&points(&[0.0, 2.0, 1.0]), 2).is_err());
    }

    #[test_log::test]
    fn rejects_non_finite_coordinates() {
        let pts = vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, f64::NAN)];
        assert!(validate_points(&pts, 2).is_err());
        let pts = vec![Point2D::new(0.0, 0.0), Point2D::new(f64::INFINITY, 1.0)];
        assert!(validate_points(&pts, 2).is_err());
    }

    #[test_log::test]
    fn slope_between_points() {
        let lhs = Point2D::from((1.0, 2.0));
        let rhs = Point2D::from((3.0, 8.0));
        assert_eq!(Point2D::slope(&lhs, &rhs), 3.0);
    }
}
