use std::sync::Arc;
use nalgebra::{DMatrix, DVector, UnitQuaternion, Vector3};
use serde::{Serialize, Deserialize};
use crate::robot_modules::robot_chain_module::RobotChainModule;
use crate::robot_modules::robot_joint_state_module::{JointStateInput, JointStateKind, JointStateSource, RobotJointStateModule};
use crate::utils::utils_errors::ArmKinError;

/// The `RobotKinematicsModule` performs kinematics queries on a serial chain: forward position
/// and velocity kinematics, the geometric Jacobian with its transpose and pseudo-inverse, and a
/// seeded iterative inverse kinematics solve.  It is constructed from a `RobotChainModule` and a
/// `JointStateSource`; any joint state argument may be given explicitly or resolved from the
/// source's current values (`JointStateInput::UseCurrent`).
///
/// Every query is a pure function of its inputs plus the immutable chain captured at
/// construction; nothing is cached between calls.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use nalgebra::DVector;
/// use armkin::robot_modules::robot_model_module::RobotModelModule;
/// use armkin::robot_modules::robot_chain_module::RobotChainModule;
/// use armkin::robot_modules::robot_joint_state_module::{JointStateInput, StoredJointState};
/// use armkin::robot_modules::robot_kinematics_module::RobotKinematicsModule;
///
/// let urdf = r#"
/// <robot name="planar_2r">
///   <link name="base_link"/>
///   <joint name="joint1" type="revolute">
///     <parent link="base_link"/> <child link="link1"/>
///     <axis xyz="0 0 1"/> <limit lower="-3.0" upper="3.0" effort="10" velocity="10"/>
///   </joint>
///   <link name="link1"/>
///   <joint name="joint2" type="revolute">
///     <origin xyz="1 0 0"/>
///     <parent link="link1"/> <child link="link2"/>
///     <axis xyz="0 0 1"/> <limit lower="-3.0" upper="3.0" effort="10" velocity="10"/>
///   </joint>
///   <link name="link2"/>
/// </robot>"#;
///
/// let model = RobotModelModule::new_from_urdf_string(urdf).expect("error");
/// let chain = RobotChainModule::new(&model, "base_link", "link2").expect("error");
/// let source = Arc::new(StoredJointState::new_from_chain(&chain));
/// let kinematics = RobotKinematicsModule::new(chain, source);
///
/// let pose = kinematics.forward_position(&JointStateInput::Explicit(DVector::zeros(2))).expect("error");
/// assert!((pose.position().x - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct RobotKinematicsModule {
    robot_chain_module: RobotChainModule,
    robot_joint_state_module: RobotJointStateModule,
    ik_solver_parameters: IkSolverParameters
}
impl RobotKinematicsModule {
    pub fn new(robot_chain_module: RobotChainModule, joint_state_source: Arc<dyn JointStateSource>) -> Self {
        let robot_joint_state_module = RobotJointStateModule::new(&robot_chain_module, joint_state_source);
        Self {
            robot_chain_module,
            robot_joint_state_module,
            ik_solver_parameters: IkSolverParameters::default()
        }
    }
    /// Builds the chain between `base_link_name` and `tip_link_name` and wraps it.  Fails at
    /// construction if the two links do not form a connected chain in the model.
    pub fn new_from_model(robot_model_module: &crate::robot_modules::robot_model_module::RobotModelModule, base_link_name: &str, tip_link_name: &str, joint_state_source: Arc<dyn JointStateSource>) -> Result<Self, ArmKinError> {
        let robot_chain_module = RobotChainModule::new(robot_model_module, base_link_name, tip_link_name)?;
        return Ok(Self::new(robot_chain_module, joint_state_source));
    }
    pub fn with_ik_solver_parameters(mut self, ik_solver_parameters: IkSolverParameters) -> Self {
        self.ik_solver_parameters = ik_solver_parameters;
        self
    }
    pub fn robot_chain_module(&self) -> &RobotChainModule {
        &self.robot_chain_module
    }
    pub fn robot_joint_state_module(&self) -> &RobotJointStateModule {
        &self.robot_joint_state_module
    }
    pub fn ik_solver_parameters(&self) -> &IkSolverParameters {
        &self.ik_solver_parameters
    }
    /// Computes the pose of the tip link in the base frame at the given joint positions.
    pub fn forward_position(&self, joint_positions: &JointStateInput) -> Result<Pose, ArmKinError> {
        let joint_state = self.robot_joint_state_module.joints_to_state(&JointStateKind::Positions, joint_positions)?;
        let tip_pose = self.robot_chain_module.fk_tip_pose(&joint_state)?;
        return Ok(Pose::new_from_isometry(&tip_pose));
    }
    /// Computes the spatial velocity of the tip link in the base frame at the given joint
    /// positions and velocities.
    pub fn forward_velocity(&self, joint_positions: &JointStateInput, joint_velocities: &JointStateInput) -> Result<CartesianTwist, ArmKinError> {
        let pos_vel = self.robot_joint_state_module.joints_to_pos_vel(joint_positions, joint_velocities)?;
        let (linear, angular) = self.robot_chain_module.fk_tip_velocity(pos_vel.positions(), pos_vel.velocities())?;
        return Ok(CartesianTwist { linear, angular });
    }
    /// Computes the 6 x N geometric Jacobian of the tip link.  Rows 0..3 are linear, rows 3..6
    /// angular.  Recomputed fresh on every call.
    pub fn jacobian(&self, joint_positions: &JointStateInput) -> Result<DMatrix<f64>, ArmKinError> {
        let joint_state = self.robot_joint_state_module.joints_to_state(&JointStateKind::Positions, joint_positions)?;
        return self.robot_chain_module.jacobian(&joint_state);
    }
    pub fn jacobian_transpose(&self, joint_positions: &JointStateInput) -> Result<DMatrix<f64>, ArmKinError> {
        return Ok(self.jacobian(joint_positions)?.transpose());
    }
    /// Computes the Moore-Penrose pseudo-inverse of the Jacobian via SVD.  Near-singular
    /// configurations do not fail: singular values below the rank tolerance are truncated and a
    /// best-effort pseudo-inverse is returned.
    pub fn jacobian_pseudo_inverse(&self, joint_positions: &JointStateInput) -> Result<DMatrix<f64>, ArmKinError> {
        let jacobian = self.jacobian(joint_positions)?;
        let res = jacobian.pseudo_inverse(self.ik_solver_parameters.pseudo_inverse_rank_tolerance);
        return match res {
            Ok(pseudo_inverse) => { Ok(pseudo_inverse) }
            Err(s) => { Err(ArmKinError::new_generic_error_str(&format!("Pseudo-inverse failed: {}", s), file!(), line!())) }
        };
    }
    /// Damped-least-squares iterative inverse kinematics.
    ///
    /// The seed defaults to the current joint positions from the joint state source; a supplied
    /// seed must have length N or the call fails with an `InvalidSeedError`.  When
    /// `target_orientation` is None, the solve constrains position only (the damped update
    /// handles the under-determined system).  Returns `Ok(None)` when the iteration budget is
    /// exhausted without meeting tolerance; this is the expected outcome for unreachable
    /// targets, and no reseeding or retrying happens internally.
    pub fn inverse_position(&self, target_position: &Vector3<f64>, target_orientation: Option<&UnitQuaternion<f64>>, seed: Option<&DVector<f64>>) -> Result<Option<DVector<f64>>, ArmKinError> {
        let num_dofs = self.robot_chain_module.num_dofs();

        let mut joint_state = match seed {
            None => { self.robot_joint_state_module.joints_to_state(&JointStateKind::Positions, &JointStateInput::UseCurrent)? }
            Some(seed) => {
                if seed.len() != num_dofs {
                    return Err(ArmKinError::new_invalid_seed_error(seed.len(), num_dofs, file!(), line!()));
                }
                seed.clone()
            }
        };

        let params = &self.ik_solver_parameters;
        let bounds = self.robot_chain_module.dof_bounds();

        for _ in 0..params.max_iterations {
            let tip_pose = self.robot_chain_module.fk_tip_pose(&joint_state)?;

            let position_error = target_position - tip_pose.translation.vector;
            let orientation_error = match target_orientation {
                None => { Vector3::zeros() }
                Some(target_orientation) => {
                    let rotation_error = target_orientation * tip_pose.rotation.inverse();
                    match rotation_error.axis() {
                        None => { Vector3::zeros() }
                        Some(axis) => { axis.into_inner() * rotation_error.angle() }
                    }
                }
            };

            let converged = match target_orientation {
                None => { position_error.norm() < params.position_tolerance }
                Some(_) => { position_error.norm() < params.position_tolerance && orientation_error.norm() < params.angle_tolerance }
            };
            if converged {
                return Ok(Some(joint_state));
            }

            let full_jacobian = self.robot_chain_module.jacobian(&joint_state)?;
            let (jacobian, error_twist) = match target_orientation {
                None => {
                    (full_jacobian.rows(0, 3).into_owned(), DVector::from_column_slice(position_error.as_slice()))
                }
                Some(_) => {
                    let mut e = DVector::zeros(6);
                    e[0] = position_error.x; e[1] = position_error.y; e[2] = position_error.z;
                    e[3] = orientation_error.x; e[4] = orientation_error.y; e[5] = orientation_error.z;
                    (full_jacobian, e)
                }
            };

            // dq = J^T (J J^T + lambda^2 I)^{-1} e
            let m = jacobian.nrows();
            let damped = &jacobian * jacobian.transpose() + DMatrix::identity(m, m) * (params.damping * params.damping);
            let damped_inverse = damped.try_inverse();
            match damped_inverse {
                None => { return Ok(None) }
                Some(damped_inverse) => {
                    let delta = jacobian.transpose() * damped_inverse * error_twist;
                    joint_state += delta;
                }
            }

            for (idx, b) in bounds.iter().enumerate() {
                if b.0 < b.1 {
                    joint_state[idx] = joint_state[idx].clamp(b.0, b.1);
                }
            }
        }

        return Ok(None);
    }
}

/// The pose of the tip link in the base frame: a position and a unit-quaternion orientation.
/// Immutable once computed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pose {
    position: Vector3<f64>,
    orientation: UnitQuaternion<f64>
}
impl Pose {
    pub fn new_from_isometry(isometry: &nalgebra::Isometry3<f64>) -> Self {
        Self {
            position: isometry.translation.vector,
            orientation: isometry.rotation
        }
    }
    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }
    pub fn orientation(&self) -> &UnitQuaternion<f64> {
        &self.orientation
    }
    /// Flat representation `[x, y, z, qx, qy, qz, qw]`.
    pub fn to_vec_representation(&self) -> Vec<f64> {
        let q = self.orientation.coords;
        return vec![self.position.x, self.position.y, self.position.z, q[0], q[1], q[2], q[3]];
    }
}

/// The spatial velocity of the tip link in the base frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartesianTwist {
    linear: Vector3<f64>,
    angular: Vector3<f64>
}
impl CartesianTwist {
    pub fn linear(&self) -> &Vector3<f64> {
        &self.linear
    }
    pub fn angular(&self) -> &Vector3<f64> {
        &self.angular
    }
    /// Flat representation `[vx, vy, vz, wx, wy, wz]`, matching the Jacobian's row layout.
    pub fn to_dvector(&self) -> DVector<f64> {
        let mut out_vec = DVector::zeros(6);
        out_vec[0] = self.linear.x; out_vec[1] = self.linear.y; out_vec[2] = self.linear.z;
        out_vec[3] = self.angular.x; out_vec[4] = self.angular.y; out_vec[5] = self.angular.z;
        return out_vec;
    }
}

/// Parameters of the damped-least-squares inverse kinematics solve and the Jacobian
/// pseudo-inverse.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IkSolverParameters {
    pub max_iterations: usize,
    pub position_tolerance: f64,
    pub angle_tolerance: f64,
    /// Damping factor (lambda).  Higher values are more robust near singularities at the cost
    /// of slower convergence.
    pub damping: f64,
    /// Singular values below this threshold are truncated in `jacobian_pseudo_inverse`.
    pub pseudo_inverse_rank_tolerance: f64
}
impl Default for IkSolverParameters {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            position_tolerance: 1e-6,
            angle_tolerance: 1e-5,
            damping: 0.05,
            pseudo_inverse_rank_tolerance: 1e-7
        }
    }
}
