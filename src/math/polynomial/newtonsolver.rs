use log::{
    debug,
    trace,
    warn
};
use serde::{
    Deserialize,
    Serialize
};

use crate::math::interpolationerror::InterpolationError;
use crate::math::polynomial::polynomial::Polynomial;

pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_TOLERANCE: f64 = 1e-11;

// ─────────────────────────────────────────────
// NewtonSolver
// ─────────────────────────────────────────────
//
//   p_{k+1} = p_k - f(p_k) / f'(p_k)
//
// f' 只在開始時計算一次；每次迭代都以前一個迭代值求 f 與 f'。
// 相鄰迭代值之差的絕對值小於 tolerance 即視為收斂。

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonSolver {
    max_iterations: usize,
    tolerance: f64,
}

struct NewtonOutcome {
    last_iterate: f64,
    iterations: usize,
    converged: bool,
}

impl NewtonSolver {
    pub fn new(max_iterations: usize, tolerance: f64) -> NewtonSolver {
        NewtonSolver { max_iterations, tolerance }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// 未在 `max_iterations` 內收斂，或迭代值變成 inf / NaN（例如 f'(p_k) = 0）時，
    /// 回傳 `InterpolationError::NonConvergent`，其中帶有最後一個迭代值。
    pub fn solve(&self, polynomial: &Polynomial, initial_guess: f64) -> Result<f64, InterpolationError> {
        let outcome = self.iterate(polynomial, initial_guess);
        if outcome.converged {
            debug!("Newton converged to {} after {} iterations", outcome.last_iterate, outcome.iterations);
            Ok(outcome.last_iterate)
        } else {
            warn!(
                "Newton did not converge from {} after {} iterations (last iterate {})",
                initial_guess, outcome.iterations, outcome.last_iterate
            );
            Err(InterpolationError::NonConvergent {
                last_iterate: outcome.last_iterate,
                iterations: outcome.iterations,
            })
        }
    }

    /// 不論是否收斂都回傳最後一個迭代值，呼叫端須自行驗證。
    pub fn solve_best_effort(&self, polynomial: &Polynomial, initial_guess: f64) -> f64 {
        self.iterate(polynomial, initial_guess).last_iterate
    }

    fn iterate(&self, polynomial: &Polynomial, initial_guess: f64) -> NewtonOutcome {
        let derivative = polynomial.derivative();
        let mut previous = initial_guess;

        for iteration in 1..=self.max_iterations {
            let value = polynomial.evaluate(previous);
            // 恰好落在根上
            if value == 0.0 {
                return NewtonOutcome { last_iterate: previous, iterations: iteration - 1, converged: true };
            }

            let next = previous - value / derivative.evaluate(previous);
            trace!("Newton iteration {}: {} -> {}", iteration, previous, next);

            if !next.is_finite() {
                return NewtonOutcome { last_iterate: next, iterations: iteration, converged: false };
            }
            if (next - previous).abs() < self.tolerance {
                return NewtonOutcome { last_iterate: next, iterations: iteration, converged: true };
            }
            previous = next;
        }

        NewtonOutcome {
            last_iterate: previous,
            iterations: self.max_iterations,
            converged: false,
        }
    }
}

impl Default for NewtonSolver {
    fn default() -> NewtonSolver {
        NewtonSolver::new(DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE)
    }
}
