use nalgebra::Vector3;
use serde::{Serialize, Deserialize};

/// This struct holds the information provided by a URDF file on a Joint (parsed by urdf_rs)
/// that is needed for kinematic and dynamic computations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct URDFJoint {
    name: String,
    joint_type: JointTypeWrapper,
    origin_xyz: Vector3<f64>,
    origin_rpy: Vector3<f64>,
    parent_link: String,
    child_link: String,
    axis: Vector3<f64>,
    limits_lower: f64,
    limits_upper: f64
}
impl URDFJoint {
    pub fn new_from_urdf_joint(joint: &urdf_rs::Joint) -> Self {
        Self {
            name: joint.name.clone(),
            joint_type: JointTypeWrapper::from_joint_type(&joint.joint_type),
            origin_xyz: Vector3::new(joint.origin.xyz[0], joint.origin.xyz[1], joint.origin.xyz[2]),
            origin_rpy: Vector3::new(joint.origin.rpy[0], joint.origin.rpy[1], joint.origin.rpy[2]),
            parent_link: joint.parent.link.clone(),
            child_link: joint.child.link.clone(),
            axis: Vector3::new(joint.axis.xyz[0], joint.axis.xyz[1], joint.axis.xyz[2]),
            limits_lower: joint.limit.lower,
            limits_upper: joint.limit.upper
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn joint_type(&self) -> &JointTypeWrapper {
        &self.joint_type
    }
    pub fn origin_xyz(&self) -> Vector3<f64> {
        self.origin_xyz
    }
    pub fn origin_rpy(&self) -> Vector3<f64> {
        self.origin_rpy
    }
    pub fn parent_link(&self) -> &str {
        &self.parent_link
    }
    pub fn child_link(&self) -> &str {
        &self.child_link
    }
    pub fn axis(&self) -> Vector3<f64> {
        self.axis
    }
    pub fn limits_lower(&self) -> f64 {
        self.limits_lower
    }
    pub fn limits_upper(&self) -> f64 {
        self.limits_upper
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum JointTypeWrapper {
    Revolute,
    Continuous,
    Prismatic,
    Fixed,
    Floating,
    Planar,
    Spherical
}
impl JointTypeWrapper {
    pub fn from_joint_type(j: &urdf_rs::JointType) -> Self {
        match j {
            urdf_rs::JointType::Revolute => { Self::Revolute }
            urdf_rs::JointType::Continuous => { Self::Continuous }
            urdf_rs::JointType::Prismatic => { Self::Prismatic }
            urdf_rs::JointType::Fixed => { Self::Fixed }
            urdf_rs::JointType::Floating => { Self::Floating }
            urdf_rs::JointType::Planar => { Self::Planar }
            urdf_rs::JointType::Spherical => { Self::Spherical }
        }
    }
}
