use nalgebra::{DMatrix, DVector};
use factorial::Factorial;

pub struct FiniteDifferenceUtils;
impl FiniteDifferenceUtils {
    /// Stencils should be with respect to the evaluation point (i.e., the evaluation point
    /// should be 0.0, a sample one step back should be -h, etc.)
    pub fn get_fd_coefficients(stencils: &Vec<f64>, derivative_order: usize) -> Vec<f64> {
        let n = stencils.len();
        assert!(derivative_order < n);

        let mut m = DMatrix::<f64>::zeros(n, n);
        let mut v = DVector::<f64>::zeros(n);

        v[derivative_order] = derivative_order.factorial() as f64;

        for i in 0..n {
            for j in 0..n {
                m[(i,j)] = stencils[j].powi(i as i32);
            }
        }

        let m_inv = m.pseudo_inverse(0.00001).unwrap();
        let res = m_inv * v;

        return res.data.as_slice().to_vec();
    }
    /// Returns a symmetric central-difference stencil of `num_points` samples (odd, >= 3)
    /// with the given spacing, centered on 0.0.
    pub fn central_stencil(num_points: usize, spacing: f64) -> Vec<f64> {
        assert!(num_points >= 3 && num_points % 2 == 1);

        let half = (num_points / 2) as i32;
        let mut out_vec = vec![];
        for i in -half..=half {
            out_vec.push(i as f64 * spacing);
        }
        out_vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_point_first_derivative_coefficients() {
        let h = 0.1;
        let stencils = FiniteDifferenceUtils::central_stencil(3, h);
        let coeffs = FiniteDifferenceUtils::get_fd_coefficients(&stencils, 1);

        assert!((coeffs[0] - (-1.0 / (2.0 * h))).abs() < 1e-9);
        assert!(coeffs[1].abs() < 1e-9);
        assert!((coeffs[2] - 1.0 / (2.0 * h)).abs() < 1e-9);
    }

    #[test]
    fn five_point_stencil_differentiates_cubic_exactly() {
        let h = 0.05;
        let stencils = FiniteDifferenceUtils::central_stencil(5, h);
        let coeffs = FiniteDifferenceUtils::get_fd_coefficients(&stencils, 1);

        // f(x) = x^3 - 2x at x = 0.3, f'(x) = 3x^2 - 2
        let x0 = 0.3;
        let f = |x: f64| x.powi(3) - 2.0 * x;
        let mut d = 0.0;
        for (s, c) in stencils.iter().zip(coeffs.iter()) {
            d += c * f(x0 + s);
        }
        assert!((d - (3.0 * x0 * x0 - 2.0)).abs() < 1e-8);
    }
}
