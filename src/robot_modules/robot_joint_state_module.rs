use std::collections::HashMap;
use std::sync::Arc;
use nalgebra::DVector;
use serde::{Serialize, Deserialize};
use crate::robot_modules::robot_chain_module::RobotChainModule;
use crate::utils::utils_errors::ArmKinError;
use crate::utils::utils_nalgebra::conversions::NalgebraConversions;

/// A source of live joint state, injected into the kinematics and dynamics modules at
/// construction.  Implementations typically wrap a robot driver; `StoredJointState` provides a
/// map-backed implementation for offline use and tests.
///
/// Each lookup is an unsynchronized snapshot: the module never assumes that two lookups (within
/// or across calls) observe a consistent state.
pub trait JointStateSource: Send + Sync {
    /// The known joint names, in the source's fixed order.
    fn joint_names(&self) -> Vec<String>;
    fn joint_position(&self, joint_name: &str) -> Option<f64>;
    fn joint_velocity(&self, joint_name: &str) -> Option<f64>;
    fn joint_effort(&self, joint_name: &str) -> Option<f64>;
}

/// Selects which of the three per-joint scalars a state resolution reads.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum JointStateKind {
    Positions,
    Velocities,
    Torques
}

/// How a joint state argument is supplied to a query: either an explicit vector indexed in chain
/// order, or a request to pull the current values from the `JointStateSource`.  Resolution
/// happens exactly once at the start of each call.
#[derive(Clone, Debug)]
pub enum JointStateInput {
    Explicit(DVector<f64>),
    UseCurrent
}
impl JointStateInput {
    pub fn new_explicit_from_vec(v: &Vec<f64>) -> Self {
        JointStateInput::Explicit(NalgebraConversions::vec_to_dvector(v))
    }
}

/// A paired position and velocity state, both indexed in chain order.  Velocity kinematics
/// routines need both vectors at once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JointPosVel {
    positions: DVector<f64>,
    velocities: DVector<f64>
}
impl JointPosVel {
    pub fn positions(&self) -> &DVector<f64> {
        &self.positions
    }
    pub fn velocities(&self) -> &DVector<f64> {
        &self.velocities
    }
}

/// The `RobotJointStateModule` resolves joint state arguments into ordered state vectors.  The
/// ordering is the chain's non-fixed joint order; values pulled from the `JointStateSource` are
/// looked up by joint name, one lookup per degree of freedom.
#[derive(Clone)]
pub struct RobotJointStateModule {
    dof_joint_names: Vec<String>,
    num_dofs: usize,
    joint_state_source: Arc<dyn JointStateSource>
}
impl RobotJointStateModule {
    pub fn new(robot_chain_module: &RobotChainModule, joint_state_source: Arc<dyn JointStateSource>) -> Self {
        Self {
            dof_joint_names: robot_chain_module.dof_joint_names().clone(),
            num_dofs: robot_chain_module.num_dofs(),
            joint_state_source
        }
    }
    pub fn num_dofs(&self) -> usize {
        self.num_dofs
    }
    pub fn dof_joint_names(&self) -> &Vec<String> {
        &self.dof_joint_names
    }
    pub fn joint_state_source(&self) -> &Arc<dyn JointStateSource> {
        &self.joint_state_source
    }
    /// Resolves a joint state input into an ordered N-vector of the given kind.  An explicit
    /// input must already have length N; a `UseCurrent` input reads each of the chain's joints
    /// from the source by name and fails with a `MissingJointError` on the first absent name.
    pub fn joints_to_state(&self, kind: &JointStateKind, input: &JointStateInput) -> Result<DVector<f64>, ArmKinError> {
        match input {
            JointStateInput::Explicit(joint_state) => {
                if joint_state.len() != self.num_dofs {
                    return Err(ArmKinError::new_state_vec_wrong_size_error("joints_to_state", joint_state.len(), self.num_dofs, file!(), line!()));
                }
                return Ok(joint_state.clone());
            }
            JointStateInput::UseCurrent => {
                let mut out_state = DVector::zeros(self.num_dofs);
                for (idx, name) in self.dof_joint_names.iter().enumerate() {
                    let value = match kind {
                        JointStateKind::Positions => { self.joint_state_source.joint_position(name) }
                        JointStateKind::Velocities => { self.joint_state_source.joint_velocity(name) }
                        JointStateKind::Torques => { self.joint_state_source.joint_effort(name) }
                    };
                    match value {
                        None => { return Err(ArmKinError::new_missing_joint_error(name, file!(), line!())) }
                        Some(value) => { out_state[idx] = value; }
                    }
                }
                return Ok(out_state);
            }
        }
    }
    /// Resolves paired position and velocity inputs, as needed by velocity kinematics.
    pub fn joints_to_pos_vel(&self, position_input: &JointStateInput, velocity_input: &JointStateInput) -> Result<JointPosVel, ArmKinError> {
        let positions = self.joints_to_state(&JointStateKind::Positions, position_input)?;
        let velocities = self.joints_to_state(&JointStateKind::Velocities, velocity_input)?;
        return Ok(JointPosVel { positions, velocities });
    }
}

/// A map-backed `JointStateSource`.  Useful as an offline stand-in for a robot driver and as a
/// test fixture; joint values default to zero for every name given at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredJointState {
    ordered_joint_names: Vec<String>,
    positions: HashMap<String, f64>,
    velocities: HashMap<String, f64>,
    efforts: HashMap<String, f64>
}
impl StoredJointState {
    pub fn new(ordered_joint_names: Vec<String>) -> Self {
        let mut positions = HashMap::new();
        let mut velocities = HashMap::new();
        let mut efforts = HashMap::new();

        for name in &ordered_joint_names {
            positions.insert(name.clone(), 0.0);
            velocities.insert(name.clone(), 0.0);
            efforts.insert(name.clone(), 0.0);
        }

        Self {
            ordered_joint_names,
            positions,
            velocities,
            efforts
        }
    }
    pub fn new_from_chain(robot_chain_module: &RobotChainModule) -> Self {
        return Self::new(robot_chain_module.dof_joint_names().clone());
    }
    pub fn set_joint_position(&mut self, joint_name: &str, value: f64) {
        self.positions.insert(joint_name.to_string(), value);
    }
    pub fn set_joint_velocity(&mut self, joint_name: &str, value: f64) {
        self.velocities.insert(joint_name.to_string(), value);
    }
    pub fn set_joint_effort(&mut self, joint_name: &str, value: f64) {
        self.efforts.insert(joint_name.to_string(), value);
    }
    pub fn remove_joint(&mut self, joint_name: &str) {
        self.ordered_joint_names.retain(|n| n != joint_name);
        self.positions.remove(joint_name);
        self.velocities.remove(joint_name);
        self.efforts.remove(joint_name);
    }
}
impl JointStateSource for StoredJointState {
    fn joint_names(&self) -> Vec<String> {
        self.ordered_joint_names.clone()
    }
    fn joint_position(&self, joint_name: &str) -> Option<f64> {
        self.positions.get(joint_name).copied()
    }
    fn joint_velocity(&self, joint_name: &str) -> Option<f64> {
        self.velocities.get(joint_name).copied()
    }
    fn joint_effort(&self, joint_name: &str) -> Option<f64> {
        self.efforts.get(joint_name).copied()
    }
}
