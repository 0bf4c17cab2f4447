use nalgebra::{DMatrix, DVector, Isometry3, Matrix3, Translation3, UnitQuaternion, Vector3};
use serde::{Serialize, Deserialize};
use crate::robot_modules::robot_model_module::RobotModelModule;
use crate::utils::utils_console::{armkin_print, PrintColor, PrintMode};
use crate::utils::utils_errors::ArmKinError;
use crate::utils::utils_robot::joint::{JointAxis, JointAxisPrimitiveType};
use crate::utils::utils_robot::urdf_joint::JointTypeWrapper;
use crate::utils::utils_sampling::JointStateSamplers;

/// The `RobotChainModule` is an ordered sequence of `ChainSegment` objects from a base link to a
/// tip link, extracted from a `RobotModelModule`.  Each segment corresponds to one URDF joint on
/// the path and the link that joint drives: it carries the joint's fixed origin transform, its
/// (optional) degree of freedom, and the driven link's rigid-body parameters.  The chain's order
/// and degree-of-freedom count are set once at construction and never change; every kinematics
/// query on the chain is a pure function of the joint values it is given.
///
/// The segment order induces the indexing of all joint state vectors used by the kinematics and
/// dynamics modules: index k refers to the k'th non-fixed joint walking from base to tip.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RobotChainModule {
    robot_name: String,
    base_link_name: String,
    tip_link_name: String,
    segments: Vec<ChainSegment>,
    num_dofs: usize,
    dof_joint_names: Vec<String>,
    dof_segment_idxs: Vec<usize>
}
impl RobotChainModule {
    /// Builds the chain between the given base and tip links.  Fails with a
    /// `ChainConnectionError` if the two links do not form a connected chain in the model, and
    /// with a `GenericError` if a joint on the path has a multi-DOF type (floating, planar,
    /// spherical) that a serial chain of scalar joints cannot represent.
    pub fn new(robot_model_module: &RobotModelModule, base_link_name: &str, tip_link_name: &str) -> Result<Self, ArmKinError> {
        let base_link_idx = robot_model_module.get_link_idx_from_name(base_link_name);
        let tip_link_idx = robot_model_module.get_link_idx_from_name(tip_link_name);
        if base_link_idx.is_none() || tip_link_idx.is_none() {
            return Err(ArmKinError::new_chain_connection_error(base_link_name, tip_link_name, file!(), line!()));
        }

        let link_chain = robot_model_module.get_link_chain(base_link_idx.unwrap(), tip_link_idx.unwrap())?;
        if link_chain.is_none() {
            return Err(ArmKinError::new_chain_connection_error(base_link_name, tip_link_name, file!(), line!()));
        }
        let link_chain = link_chain.unwrap();

        let mut segments = vec![];
        let mut dof_joint_names = vec![];
        let mut dof_segment_idxs = vec![];

        let links = robot_model_module.links();
        let joints = robot_model_module.joints();

        for link_idx in link_chain.iter().skip(1) {
            let link = &links[*link_idx];
            let joint_idx = link.preceding_joint_idx();
            if joint_idx.is_none() {
                return Err(ArmKinError::new_chain_connection_error(base_link_name, tip_link_name, file!(), line!()));
            }
            let joint = &joints[joint_idx.unwrap()];

            match joint.urdf_joint().joint_type() {
                JointTypeWrapper::Floating | JointTypeWrapper::Planar | JointTypeWrapper::Spherical => {
                    let s = format!("Joint {} has a multi-dof type {:?} that cannot appear in a serial chain.", joint.name(), joint.urdf_joint().joint_type());
                    return Err(ArmKinError::new_generic_error_str(&s, file!(), line!()));
                }
                _ => { }
            }

            if joint.joint_axis().is_some() {
                dof_joint_names.push(joint.name().to_string());
                dof_segment_idxs.push(segments.len());
            }

            let rpy = joint.urdf_joint().origin_rpy();
            let xyz = joint.urdf_joint().origin_xyz();
            let fixed_transform = Isometry3::from_parts(
                Translation3::new(xyz[0], xyz[1], xyz[2]),
                UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2]));

            segments.push(ChainSegment {
                joint_name: joint.name().to_string(),
                child_link_name: link.name().to_string(),
                fixed_transform,
                joint_axis: joint.joint_axis().clone(),
                body: ChainSegmentBody::new_from_link(link)
            });
        }

        let num_dofs = dof_joint_names.len();

        Ok(Self {
            robot_name: robot_model_module.robot_name().to_string(),
            base_link_name: base_link_name.to_string(),
            tip_link_name: tip_link_name.to_string(),
            segments,
            num_dofs,
            dof_joint_names,
            dof_segment_idxs
        })
    }
    pub fn robot_name(&self) -> &str {
        &self.robot_name
    }
    pub fn base_link_name(&self) -> &str {
        &self.base_link_name
    }
    pub fn tip_link_name(&self) -> &str {
        &self.tip_link_name
    }
    pub fn segments(&self) -> &Vec<ChainSegment> {
        &self.segments
    }
    pub fn num_dofs(&self) -> usize {
        self.num_dofs
    }
    /// Names of the chain's non-fixed joints in base-to-tip order.  This order defines the
    /// indexing of every joint state vector consumed by the kinematics and dynamics modules.
    pub fn dof_joint_names(&self) -> &Vec<String> {
        &self.dof_joint_names
    }
    /// Segment index of each non-fixed joint, in state-vector order.
    pub fn dof_segment_idxs(&self) -> &Vec<usize> {
        &self.dof_segment_idxs
    }
    /// Names of the links driven by each segment, base to tip.
    pub fn segment_names(&self) -> Vec<String> {
        let mut out_vec = vec![];
        for s in &self.segments {
            out_vec.push(s.child_link_name.clone());
        }
        return out_vec;
    }
    /// Lower and upper bounds of each degree of freedom, in state-vector order.  A continuous
    /// joint reports (0.0, 0.0); callers that clamp or sample must treat a degenerate interval
    /// as unconstrained.
    pub fn dof_bounds(&self) -> Vec<(f64, f64)> {
        let mut out_vec = vec![];
        for segment_idx in &self.dof_segment_idxs {
            let joint_axis = self.segments[*segment_idx].joint_axis.as_ref().unwrap();
            out_vec.push(joint_axis.bounds());
        }
        out_vec
    }
    /// Samples a joint state uniformly within the chain's joint bounds.  Continuous joints
    /// sample a full revolution.
    pub fn sample_dof_state(&self) -> DVector<f64> {
        return JointStateSamplers::uniform_state_in_bounds(&self.dof_bounds());
    }
    /// Computes the pose of each segment's driven link in the base frame at the given joint
    /// state.  This is the workhorse behind tip-pose forward kinematics, the Jacobian, and the
    /// dynamics module's per-link center-of-mass Jacobians.
    pub fn fk_segment_poses(&self, joint_state: &DVector<f64>) -> Result<Vec<Isometry3<f64>>, ArmKinError> {
        if joint_state.len() != self.num_dofs {
            return Err(ArmKinError::new_state_vec_wrong_size_error("fk_segment_poses", joint_state.len(), self.num_dofs, file!(), line!()));
        }

        let mut out_poses = Vec::with_capacity(self.segments.len());
        let mut curr_pose = Isometry3::identity();
        let mut dof_idx = 0;

        for segment in &self.segments {
            curr_pose *= segment.fixed_transform;
            if let Some(joint_axis) = &segment.joint_axis {
                let joint_value = joint_state[dof_idx];
                dof_idx += 1;
                curr_pose *= segment.joint_motion(joint_axis, joint_value);
            }
            out_poses.push(curr_pose);
        }

        return Ok(out_poses);
    }
    /// Computes the pose of the tip link in the base frame at the given joint state.
    /// Deterministic, closed-form, O(N) in the number of segments.
    pub fn fk_tip_pose(&self, joint_state: &DVector<f64>) -> Result<Isometry3<f64>, ArmKinError> {
        let segment_poses = self.fk_segment_poses(joint_state)?;
        return match segment_poses.last() {
            None => { Ok(Isometry3::identity()) }
            Some(pose) => { Ok(pose.clone()) }
        };
    }
    /// Propagates position and velocity pairs along the chain and returns the linear and angular
    /// velocity of the tip link's frame origin, both expressed in the base frame.
    ///
    /// The recursion carries the angular velocity of each body and the translational velocity of
    /// its frame origin: the joint origin is first transported as a point of the preceding body,
    /// then the joint's own rate is added about (or along) its world-frame axis.
    pub fn fk_tip_velocity(&self, joint_state: &DVector<f64>, joint_velocities: &DVector<f64>) -> Result<(Vector3<f64>, Vector3<f64>), ArmKinError> {
        if joint_state.len() != self.num_dofs {
            return Err(ArmKinError::new_state_vec_wrong_size_error("fk_tip_velocity", joint_state.len(), self.num_dofs, file!(), line!()));
        }
        if joint_velocities.len() != self.num_dofs {
            return Err(ArmKinError::new_state_vec_wrong_size_error("fk_tip_velocity", joint_velocities.len(), self.num_dofs, file!(), line!()));
        }

        let mut curr_pose = Isometry3::identity();
        let mut angular_velocity = Vector3::zeros();
        let mut linear_velocity = Vector3::zeros();
        let mut prev_origin = Vector3::zeros();
        let mut dof_idx = 0;

        for segment in &self.segments {
            let pre_motion_pose = curr_pose * segment.fixed_transform;
            let joint_origin: Vector3<f64> = pre_motion_pose.translation.vector;

            // The joint origin is a point of the preceding body.
            linear_velocity += angular_velocity.cross(&(joint_origin - prev_origin));
            prev_origin = joint_origin;

            match &segment.joint_axis {
                None => {
                    curr_pose = pre_motion_pose;
                }
                Some(joint_axis) => {
                    let joint_value = joint_state[dof_idx];
                    let joint_rate = joint_velocities[dof_idx];
                    dof_idx += 1;

                    let world_axis = pre_motion_pose.rotation * joint_axis.axis_as_unit().into_inner();
                    curr_pose = pre_motion_pose * segment.joint_motion(joint_axis, joint_value);

                    match joint_axis.axis_primitive_type() {
                        JointAxisPrimitiveType::Rotation => {
                            angular_velocity += world_axis * joint_rate;
                        }
                        JointAxisPrimitiveType::Translation => {
                            let new_origin: Vector3<f64> = curr_pose.translation.vector;
                            linear_velocity += angular_velocity.cross(&(new_origin - joint_origin));
                            linear_velocity += world_axis * joint_rate;
                            prev_origin = new_origin;
                        }
                    }
                }
            }
        }

        return Ok((linear_velocity, angular_velocity));
    }
    /// Computes the geometric Jacobian whose columns map the chain's joint rates to the spatial
    /// velocity of `end_point` (a point in the base frame rigidly attached to the segment with
    /// index `end_segment_idx`).  Rows 0..3 are linear, rows 3..6 angular.  Joints past the end
    /// segment contribute zero columns.
    ///
    /// `segment_poses` must come from `fk_segment_poses` at the joint state of interest.
    pub fn jacobian_at_point(&self, segment_poses: &Vec<Isometry3<f64>>, end_segment_idx: usize, end_point: &Vector3<f64>) -> Result<DMatrix<f64>, ArmKinError> {
        if segment_poses.len() != self.segments.len() {
            return Err(ArmKinError::new_state_vec_wrong_size_error("jacobian_at_point", segment_poses.len(), self.segments.len(), file!(), line!()));
        }
        if end_segment_idx >= self.segments.len() {
            return Err(ArmKinError::new_idx_out_of_bound_error(end_segment_idx, self.segments.len(), file!(), line!()));
        }

        let mut jacobian = DMatrix::zeros(6, self.num_dofs);

        for (dof_idx, segment_idx) in self.dof_segment_idxs.iter().enumerate() {
            if *segment_idx > end_segment_idx { continue; }

            let segment = &self.segments[*segment_idx];
            let joint_axis = segment.joint_axis.as_ref().unwrap();
            let pose = &segment_poses[*segment_idx];

            let rotated_axis = pose.rotation * joint_axis.axis_as_unit().into_inner();

            match joint_axis.axis_primitive_type() {
                JointAxisPrimitiveType::Rotation => {
                    let connector_vec = end_point - pose.translation.vector;
                    let cross_vec = rotated_axis.cross(&connector_vec);

                    jacobian[(0, dof_idx)] = cross_vec.x; jacobian[(1, dof_idx)] = cross_vec.y; jacobian[(2, dof_idx)] = cross_vec.z;
                    jacobian[(3, dof_idx)] = rotated_axis.x; jacobian[(4, dof_idx)] = rotated_axis.y; jacobian[(5, dof_idx)] = rotated_axis.z;
                }
                JointAxisPrimitiveType::Translation => {
                    jacobian[(0, dof_idx)] = rotated_axis.x; jacobian[(1, dof_idx)] = rotated_axis.y; jacobian[(2, dof_idx)] = rotated_axis.z;
                }
            }
        }

        return Ok(jacobian);
    }
    /// Computes the 6 x N geometric Jacobian of the tip link at the given joint state.
    pub fn jacobian(&self, joint_state: &DVector<f64>) -> Result<DMatrix<f64>, ArmKinError> {
        let segment_poses = self.fk_segment_poses(joint_state)?;
        if self.segments.is_empty() {
            return Ok(DMatrix::zeros(6, self.num_dofs));
        }
        let end_segment_idx = self.segments.len() - 1;
        let end_point = segment_poses[end_segment_idx].translation.vector;
        return self.jacobian_at_point(&segment_poses, end_segment_idx, &end_point);
    }
    /// Prints a per-segment summary of the chain.
    pub fn print_chain_summary(&self) {
        armkin_print(&format!("Chain {} ({} -> {}) --->", self.robot_name, self.base_link_name, self.tip_link_name), PrintMode::Println, PrintColor::Blue, true);
        for (i, segment) in self.segments.iter().enumerate() {
            armkin_print(&format!("   > Segment {}: joint {} -> link {}", i, segment.joint_name, segment.child_link_name), PrintMode::Println, PrintColor::Cyan, false);
            match &segment.joint_axis {
                None => { armkin_print("      -- Fixed.", PrintMode::Println, PrintColor::None, false); }
                Some(joint_axis) => {
                    armkin_print(&format!("      -- {:?} about axis {:?}, bounds {:?}", joint_axis.axis_primitive_type(), joint_axis.axis().as_slice(), joint_axis.bounds()), PrintMode::Println, PrintColor::None, false);
                }
            }
        }
    }
}

/// One element of a kinematic chain: the URDF joint on the base-to-tip path together with the
/// link that joint drives.  `fixed_transform` is the joint's origin offset in the parent link's
/// frame; the optional `joint_axis` holds the segment's single degree of freedom.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSegment {
    joint_name: String,
    child_link_name: String,
    fixed_transform: Isometry3<f64>,
    joint_axis: Option<JointAxis>,
    body: ChainSegmentBody
}
impl ChainSegment {
    pub fn joint_name(&self) -> &str {
        &self.joint_name
    }
    pub fn child_link_name(&self) -> &str {
        &self.child_link_name
    }
    pub fn fixed_transform(&self) -> &Isometry3<f64> {
        &self.fixed_transform
    }
    pub fn joint_axis(&self) -> &Option<JointAxis> {
        &self.joint_axis
    }
    pub fn body(&self) -> &ChainSegmentBody {
        &self.body
    }
    /// The variable part of this segment's transform at the given joint value.
    fn joint_motion(&self, joint_axis: &JointAxis, joint_value: f64) -> Isometry3<f64> {
        match joint_axis.axis_primitive_type() {
            JointAxisPrimitiveType::Rotation => {
                Isometry3::from_parts(Translation3::identity(), UnitQuaternion::from_axis_angle(&joint_axis.axis_as_unit(), joint_value))
            }
            JointAxisPrimitiveType::Translation => {
                let t = joint_value * joint_axis.axis();
                Isometry3::from_parts(Translation3::new(t[0], t[1], t[2]), UnitQuaternion::identity())
            }
        }
    }
}

/// Rigid-body parameters of the link a chain segment drives, taken from the URDF inertial
/// element.  The center of mass offset and rotational inertia are expressed in the link's
/// inertial frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSegmentBody {
    mass: f64,
    com_offset: Isometry3<f64>,
    inertia_matrix: Matrix3<f64>
}
impl ChainSegmentBody {
    fn new_from_link(link: &crate::utils::utils_robot::link::Link) -> Self {
        let xyz = link.urdf_link().inertial_origin_xyz();
        let rpy = link.urdf_link().inertial_origin_rpy();
        Self {
            mass: link.urdf_link().inertial_mass(),
            com_offset: Isometry3::from_parts(
                Translation3::new(xyz[0], xyz[1], xyz[2]),
                UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2])),
            inertia_matrix: link.urdf_link().inertial_matrix()
        }
    }
    pub fn mass(&self) -> f64 {
        self.mass
    }
    pub fn com_offset(&self) -> &Isometry3<f64> {
        &self.com_offset
    }
    pub fn inertia_matrix(&self) -> &Matrix3<f64> {
        &self.inertia_matrix
    }
}
