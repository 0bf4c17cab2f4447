use nalgebra::{Vector3, Matrix3};
use serde::{Serialize, Deserialize};

/// This struct holds the information provided by a URDF file on a Link (parsed by urdf_rs)
/// that is needed for kinematic and dynamic computations.  The inertial fields describe the
/// link's rigid-body parameters in the link's inertial frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct URDFLink {
    name: String,
    inertial_origin_xyz: Vector3<f64>,
    inertial_origin_rpy: Vector3<f64>,
    inertial_matrix: Matrix3<f64>,
    inertial_mass: f64
}
impl URDFLink {
    pub fn new_from_urdf_link(link: &urdf_rs::Link) -> Self {
        Self {
            name: link.name.clone(),
            inertial_origin_xyz: Vector3::new(link.inertial.origin.xyz[0], link.inertial.origin.xyz[1], link.inertial.origin.xyz[2]),
            inertial_origin_rpy: Vector3::new(link.inertial.origin.rpy[0], link.inertial.origin.rpy[1], link.inertial.origin.rpy[2]),
            inertial_matrix: Matrix3::new(link.inertial.inertia.ixx, link.inertial.inertia.ixy, link.inertial.inertia.ixz, link.inertial.inertia.ixy, link.inertial.inertia.iyy, link.inertial.inertia.iyz, link.inertial.inertia.ixz, link.inertial.inertia.iyz, link.inertial.inertia.izz),
            inertial_mass: link.inertial.mass.value
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn inertial_origin_xyz(&self) -> Vector3<f64> {
        self.inertial_origin_xyz
    }
    pub fn inertial_origin_rpy(&self) -> Vector3<f64> {
        self.inertial_origin_rpy
    }
    pub fn inertial_matrix(&self) -> Matrix3<f64> {
        self.inertial_matrix
    }
    pub fn inertial_mass(&self) -> f64 {
        self.inertial_mass
    }
}
