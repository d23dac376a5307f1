use std::fmt;

use crate::math::polynomial::polynomial::Polynomial;

// ─────────────────────────────────────────────
// gnuplot 表示式
// ─────────────────────────────────────────────
//
// 單一多項式：  c0 + c1*x + c2*x**2 + ...
// 分段多項式：  x<x_1 ? S_0 : x<x_2 ? S_1 : ... : S_{n-1}
//
// 係數以 `{:?}` 輸出（最短可還原表示），避免丟失精度。

pub struct GnuplotFormat<'a>(pub &'a Polynomial);

impl fmt::Display for GnuplotFormat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let polynomial = self.0;
        if polynomial.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, &c) in polynomial.coefficients().iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match i {
                0 => write!(f, "{:?}", c)?,
                1 => write!(f, "{:?}*x", c)?,
                _ => write!(f, "{:?}*x**{}", c, i)?,
            }
        }
        Ok(())
    }
}

/// `pieces[i]` 適用於 x < `breakpoints[i + 1]`，最後一段涵蓋其餘部分。
/// `breakpoints` 至少要有 `pieces.len()` 個元素（第 0 個不會用到）。
pub struct PiecewiseGnuplotFormat<'a> {
    pieces: &'a [Polynomial],
    breakpoints: &'a [f64],
}

impl<'a> PiecewiseGnuplotFormat<'a> {
    pub(crate) fn new(pieces: &'a [Polynomial], breakpoints: &'a [f64]) -> PiecewiseGnuplotFormat<'a> {
        assert!(!pieces.is_empty(), "piecewise expression requires at least one piece");
        assert!(
            breakpoints.len() >= pieces.len(),
            "piecewise expression requires a breakpoint per piece"
        );
        PiecewiseGnuplotFormat { pieces, breakpoints }
    }
}

impl fmt::Display for PiecewiseGnuplotFormat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.pieces.len() - 1;
        for (i, piece) in self.pieces[..last].iter().enumerate() {
            write!(f, "x<{:?} ? {} : ", self.breakpoints[i + 1], GnuplotFormat(piece))?;
        }
        write!(f, "{}", GnuplotFormat(&self.pieces[last]))
    }
}
