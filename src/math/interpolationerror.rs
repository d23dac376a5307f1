use thiserror::Error;

/// 多項式、樣條與插值建構時可能發生的錯誤
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    /// 點數不足、x 非嚴格遞增或含非有限值
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// 線性方程組無法求解（LU 分解遇到零主元或結果非有限）
    #[error("linear system is singular")]
    SingularSystem,
    /// Newton 迭代在上限內未達到容忍誤差，或迭代值發散為非有限值
    #[error("Newton iteration did not converge after {iterations} iterations (last iterate {last_iterate})")]
    NonConvergent {
        last_iterate: f64,
        iterations: usize,
    },
}

impl InterpolationError {
    pub fn invalid_input(message: impl Into<String>) -> InterpolationError {
        InterpolationError::InvalidInput(message.into())
    }

    /// 不收斂時的最後一個迭代值；其他錯誤回傳 None
    pub fn last_iterate(&self) -> Option<f64> {
        match self {
            InterpolationError::NonConvergent { last_iterate, .. } => Some(*last_iterate),
            _ => None,
        }
    }
}
