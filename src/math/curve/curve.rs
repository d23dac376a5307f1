/// 可在任意 x 求值與求導的一維曲線
pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;

    fn second_derivative(&self, x: f64) -> f64;
}
