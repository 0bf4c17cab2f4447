use std::sync::Arc;
use nalgebra::{DMatrix, DVector};
use crate::robot_modules::robot_chain_module::RobotChainModule;
use crate::robot_modules::robot_joint_state_module::{JointStateInput, JointStateKind, JointStateSource, RobotJointStateModule};
use crate::utils::utils_errors::ArmKinError;
use crate::utils::utils_math::finite_difference::FiniteDifferenceUtils;

/// Spacing of the central-difference stencil used to differentiate the inertia matrix with
/// respect to the joint positions.  Joint coordinates are radian- or meter-scale, so 1e-3 keeps
/// the O(h^4) truncation error of the five-point stencil well below the tolerances the Coriolis
/// matrix is consumed at.
const INERTIA_FD_SPACING: f64 = 1e-3;
const INERTIA_FD_STENCIL_POINTS: usize = 5;

/// The `RobotDynamicsModule` computes dynamics quantities on a serial chain: the joint-space
/// inertia (generalized mass) matrix, the Cartesian-space inertia obtained from it by congruence
/// transform with the Jacobian, and the Coriolis matrix obtained from the Christoffel symbols of
/// the inertia matrix.
///
/// The gravity vector is fixed at zero throughout: these routines compute generalized mass and
/// velocity-product terms only, never gravity torques.
#[derive(Clone)]
pub struct RobotDynamicsModule {
    robot_chain_module: RobotChainModule,
    robot_joint_state_module: RobotJointStateModule
}
impl RobotDynamicsModule {
    pub fn new(robot_chain_module: RobotChainModule, joint_state_source: Arc<dyn JointStateSource>) -> Self {
        let robot_joint_state_module = RobotJointStateModule::new(&robot_chain_module, joint_state_source);
        Self {
            robot_chain_module,
            robot_joint_state_module
        }
    }
    pub fn new_from_model(robot_model_module: &crate::robot_modules::robot_model_module::RobotModelModule, base_link_name: &str, tip_link_name: &str, joint_state_source: Arc<dyn JointStateSource>) -> Result<Self, ArmKinError> {
        let robot_chain_module = RobotChainModule::new(robot_model_module, base_link_name, tip_link_name)?;
        return Ok(Self::new(robot_chain_module, joint_state_source));
    }
    pub fn robot_chain_module(&self) -> &RobotChainModule {
        &self.robot_chain_module
    }
    pub fn robot_joint_state_module(&self) -> &RobotJointStateModule {
        &self.robot_joint_state_module
    }
    /// Computes the N x N joint-space inertia matrix M(q).  The matrix is assembled link by link
    /// from each link's center-of-mass Jacobian and URDF inertial parameters, so it is symmetric
    /// and positive semi-definite by construction.
    pub fn inertia(&self, joint_positions: &JointStateInput) -> Result<DMatrix<f64>, ArmKinError> {
        let joint_state = self.robot_joint_state_module.joints_to_state(&JointStateKind::Positions, joint_positions)?;
        return self.inertia_from_state(&joint_state);
    }
    fn inertia_from_state(&self, joint_state: &DVector<f64>) -> Result<DMatrix<f64>, ArmKinError> {
        let num_dofs = self.robot_chain_module.num_dofs();
        let segment_poses = self.robot_chain_module.fk_segment_poses(joint_state)?;

        let mut inertia_matrix = DMatrix::zeros(num_dofs, num_dofs);

        for (segment_idx, segment) in self.robot_chain_module.segments().iter().enumerate() {
            let body = segment.body();
            if body.mass() == 0.0 && body.inertia_matrix().norm() == 0.0 { continue; }

            let com_pose = segment_poses[segment_idx] * body.com_offset();
            let com_point = com_pose.translation.vector;

            let jacobian = self.robot_chain_module.jacobian_at_point(&segment_poses, segment_idx, &com_point)?;
            let linear_jacobian = jacobian.rows(0, 3).into_owned();
            let angular_jacobian = jacobian.rows(3, 3).into_owned();

            let rotation = com_pose.rotation.to_rotation_matrix();
            let world_inertia = rotation.matrix() * body.inertia_matrix() * rotation.matrix().transpose();
            let world_inertia = DMatrix::from_fn(3, 3, |i, j| world_inertia[(i, j)]);

            inertia_matrix += body.mass() * linear_jacobian.transpose() * &linear_jacobian;
            inertia_matrix += angular_jacobian.transpose() * world_inertia * &angular_jacobian;
        }

        return Ok(inertia_matrix);
    }
    /// Computes the 6 x 6 Cartesian-space inertia `(J M^-1 J^T)^-1` at the given configuration.
    ///
    /// Known edge case: `J M^-1 J^T` is structurally singular for chains with fewer than six
    /// degrees of freedom, and becomes singular at kinematically singular configurations of any
    /// chain.  In both cases the call fails with a `SingularConfigurationError` rather than
    /// returning a regularized result.
    pub fn cart_inertia(&self, joint_positions: &JointStateInput) -> Result<DMatrix<f64>, ArmKinError> {
        let joint_state = self.robot_joint_state_module.joints_to_state(&JointStateKind::Positions, joint_positions)?;

        let inertia_matrix = self.inertia_from_state(&joint_state)?;
        let jacobian = self.robot_chain_module.jacobian(&joint_state)?;

        let inertia_inverse = inertia_matrix.try_inverse();
        if inertia_inverse.is_none() {
            return Err(ArmKinError::new_singular_configuration_error("Joint-space inertia matrix is not invertible.", file!(), line!()));
        }

        let operational = &jacobian * inertia_inverse.unwrap() * jacobian.transpose();
        return match operational.try_inverse() {
            None => { Err(ArmKinError::new_singular_configuration_error("J * M^-1 * J^T is not invertible.", file!(), line!())) }
            Some(cart_inertia) => { Ok(cart_inertia) }
        };
    }
    /// Computes the N x N Coriolis matrix C(q, qdot) via the Christoffel-symbol formula
    ///
    /// `C[i][j] = sum_k 0.5 * (dM[i][j]/dq_k + dM[i][k]/dq_j - dM[j][k]/dq_i) * qdot_k`
    ///
    /// The position-partials of M(q) are obtained by five-point central differences whose
    /// stencil coefficients come from `FiniteDifferenceUtils`; no symbolic differentiation
    /// facility is required.  Evaluated at qdot = 0 the result is exactly the zero matrix.
    pub fn coriolis_matrix(&self, joint_positions: &JointStateInput, joint_velocities: &JointStateInput) -> Result<DMatrix<f64>, ArmKinError> {
        let pos_vel = self.robot_joint_state_module.joints_to_pos_vel(joint_positions, joint_velocities)?;
        let joint_state = pos_vel.positions();
        let joint_rates = pos_vel.velocities();

        let num_dofs = self.robot_chain_module.num_dofs();

        let stencils = FiniteDifferenceUtils::central_stencil(INERTIA_FD_STENCIL_POINTS, INERTIA_FD_SPACING);
        let coefficients = FiniteDifferenceUtils::get_fd_coefficients(&stencils, 1);

        // inertia_partials[k] = dM/dq_k evaluated at joint_state
        let mut inertia_partials = Vec::with_capacity(num_dofs);
        for k in 0..num_dofs {
            let mut partial = DMatrix::zeros(num_dofs, num_dofs);
            for (stencil, coefficient) in stencils.iter().zip(coefficients.iter()) {
                if coefficient.abs() < 1e-12 { continue; }
                let mut perturbed_state = joint_state.clone();
                perturbed_state[k] += stencil;
                partial += self.inertia_from_state(&perturbed_state)? * *coefficient;
            }
            inertia_partials.push(partial);
        }

        let mut coriolis = DMatrix::zeros(num_dofs, num_dofs);
        for i in 0..num_dofs {
            for j in 0..num_dofs {
                let mut c_ij = 0.0;
                for k in 0..num_dofs {
                    let christoffel = 0.5 * (inertia_partials[k][(i, j)] + inertia_partials[j][(i, k)] - inertia_partials[i][(j, k)]);
                    c_ij += christoffel * joint_rates[k];
                }
                coriolis[(i, j)] = c_ij;
            }
        }

        return Ok(coriolis);
    }
}
