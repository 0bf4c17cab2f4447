use nalgebra::DVector;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Random joint-state generation over a chain's per-DOF bounds.  A degenerate interval
/// (continuous joints report bounds of (0.0, 0.0)) is unconstrained and samples a full
/// revolution.
pub struct JointStateSamplers;
impl JointStateSamplers {
    pub fn uniform_state_in_bounds(bounds: &Vec<(f64, f64)>) -> DVector<f64> {
        let mut rng = rand::thread_rng();
        let mut out_state = DVector::zeros(bounds.len());
        for (idx, b) in bounds.iter().enumerate() {
            let (lower, upper) = if b.0 < b.1 { (b.0, b.1) } else { (-std::f64::consts::PI, std::f64::consts::PI) };
            out_state[idx] = rng.gen_range(lower..upper);
        }
        return out_state;
    }
    /// Adds zero-mean gaussian noise to each coordinate of the given joint state.  Produces
    /// nearby seeds for iterative solves.
    pub fn normal_perturbation_of_state(joint_state: &DVector<f64>, standard_deviation: f64) -> DVector<f64> {
        let mut rng = rand::thread_rng();
        let distribution = Normal::new(0.0, standard_deviation).expect("error");
        let mut out_state = joint_state.clone();
        for value in out_state.iter_mut() {
            *value += distribution.sample(&mut rng);
        }
        return out_state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_bounds_sample_full_revolution() {
        let bounds = vec![(0.0, 0.0), (-1.0, 1.0)];
        for _ in 0..20 {
            let s = JointStateSamplers::uniform_state_in_bounds(&bounds);
            assert!(s[0] >= -std::f64::consts::PI && s[0] <= std::f64::consts::PI);
            assert!(s[1] >= -1.0 && s[1] <= 1.0);
        }
    }

    #[test]
    fn perturbation_keeps_dimension() {
        let state = DVector::from_column_slice(&[0.1, 0.2, 0.3]);
        let perturbed = JointStateSamplers::normal_perturbation_of_state(&state, 0.01);
        assert_eq!(perturbed.len(), 3);
        assert!((perturbed - state).norm() < 1.0);
    }
}
