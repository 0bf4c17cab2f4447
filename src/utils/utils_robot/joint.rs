use nalgebra::{Vector3, Unit};
use serde::{Serialize, Deserialize};
use crate::utils::utils_robot::urdf_joint::{JointTypeWrapper, URDFJoint};

/// A Joint holds all necessary information about a robot joint (specified by a robot URDF file)
/// in order to do kinematic and dynamic computations on a robot model.  A joint either carries a
/// single `JointAxis` encoding its one degree of freedom (revolute, continuous, or prismatic
/// joints) or no axis at all (fixed joints).  Multi-DOF URDF joint types (floating, planar,
/// spherical) are not representable in a serial chain of scalar joints and are rejected at
/// chain-construction time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Joint {
    name: String,
    joint_idx: usize,
    preceding_link_idx: Option<usize>,
    child_link_idx: Option<usize>,
    joint_axis: Option<JointAxis>,
    urdf_joint: URDFJoint
}
impl Joint {
    /// Returns a joint corresponding to the given URDFJoint.  This will be automatically called
    /// by the RobotModelModule.
    pub fn new(urdf_joint: URDFJoint, joint_idx: usize) -> Self {
        let name = urdf_joint.name().to_string();

        let joint_axis = match urdf_joint.joint_type() {
            JointTypeWrapper::Revolute | JointTypeWrapper::Continuous => {
                Some(JointAxis::new(joint_idx, urdf_joint.axis(), JointAxisPrimitiveType::Rotation, (urdf_joint.limits_lower(), urdf_joint.limits_upper())))
            }
            JointTypeWrapper::Prismatic => {
                Some(JointAxis::new(joint_idx, urdf_joint.axis(), JointAxisPrimitiveType::Translation, (urdf_joint.limits_lower(), urdf_joint.limits_upper())))
            }
            _ => { None }
        };

        Self {
            name,
            joint_idx,
            preceding_link_idx: None,
            child_link_idx: None,
            joint_axis,
            urdf_joint
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn joint_idx(&self) -> usize {
        self.joint_idx
    }
    pub fn preceding_link_idx(&self) -> Option<usize> {
        self.preceding_link_idx
    }
    pub fn child_link_idx(&self) -> Option<usize> {
        self.child_link_idx
    }
    pub fn joint_axis(&self) -> &Option<JointAxis> {
        &self.joint_axis
    }
    pub fn num_dofs(&self) -> usize {
        return if self.joint_axis.is_some() { 1 } else { 0 };
    }
    pub fn is_fixed(&self) -> bool {
        self.joint_axis.is_none()
    }
    pub fn urdf_joint(&self) -> &URDFJoint {
        &self.urdf_joint
    }
    pub fn set_preceding_link_idx(&mut self, preceding_link_idx: Option<usize>) {
        self.preceding_link_idx = preceding_link_idx;
    }
    pub fn set_child_link_idx(&mut self, child_link_idx: Option<usize>) {
        self.child_link_idx = child_link_idx;
    }
}

/// A JointAxis encodes a single degree of freedom in a robot model.  A joint axis can
/// characterize either a rotation around the axis or a translation along the axis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JointAxis {
    joint_idx: usize,
    axis_as_unit: Unit<Vector3<f64>>,
    axis: Vector3<f64>,
    axis_primitive_type: JointAxisPrimitiveType,
    bounds: (f64, f64)
}
impl JointAxis {
    pub fn new(joint_idx: usize, axis: Vector3<f64>, axis_primitive_type: JointAxisPrimitiveType, bounds: (f64, f64)) -> Self {
        Self {
            joint_idx,
            axis_as_unit: Unit::new_normalize(axis.clone()),
            axis,
            axis_primitive_type,
            bounds
        }
    }
    pub fn joint_idx(&self) -> usize {
        self.joint_idx
    }
    pub fn axis_as_unit(&self) -> Unit<Vector3<f64>> {
        self.axis_as_unit
    }
    pub fn axis(&self) -> Vector3<f64> {
        self.axis
    }
    pub fn axis_primitive_type(&self) -> &JointAxisPrimitiveType {
        &self.axis_primitive_type
    }
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }
}

/// Specifies the transform type for a JointAxis object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum JointAxisPrimitiveType {
    Rotation,
    Translation
}
