use std::sync::Arc;
use nalgebra::{DMatrix, DVector};
use armkin::robot_modules::robot_chain_module::RobotChainModule;
use armkin::robot_modules::robot_dynamics_module::RobotDynamicsModule;
use armkin::robot_modules::robot_joint_state_module::{JointStateInput, StoredJointState};
use armkin::robot_modules::robot_model_module::RobotModelModule;
use armkin::utils::utils_errors::ArmKinError;

// Planar 2R arm with unit link lengths and a unit point mass at the middle of each link.  With
// point masses the inertia and Coriolis matrices have simple closed forms to test against:
//
//   M11 = m1*lc1^2 + m2*(l1^2 + lc2^2 + 2*l1*lc2*cos q2)    = 1.5 + cos q2
//   M12 = m2*(lc2^2 + l1*lc2*cos q2)                        = 0.25 + 0.5*cos q2
//   M22 = m2*lc2^2                                          = 0.25
//
//   h = -m2*l1*lc2*sin q2 = -0.5*sin q2
//   C  = [[h*q2d, h*(q1d + q2d)], [-h*q1d, 0]]
const PLANAR_2R_URDF: &str = r#"
<robot name="planar_2r_point_mass">
  <link name="base_link"/>
  <joint name="joint1" type="revolute">
    <parent link="base_link"/>
    <child link="link1"/>
    <axis xyz="0 0 1"/>
    <limit lower="-3.1" upper="3.1" effort="10" velocity="10"/>
  </joint>
  <link name="link1">
    <inertial>
      <origin xyz="0.5 0 0"/>
      <mass value="1.0"/>
      <inertia ixx="0" ixy="0" ixz="0" iyy="0" iyz="0" izz="0"/>
    </inertial>
  </link>
  <joint name="joint2" type="revolute">
    <origin xyz="1 0 0"/>
    <parent link="link1"/>
    <child link="link2"/>
    <axis xyz="0 0 1"/>
    <limit lower="-3.1" upper="3.1" effort="10" velocity="10"/>
  </joint>
  <link name="link2">
    <inertial>
      <origin xyz="0.5 0 0"/>
      <mass value="1.0"/>
      <inertia ixx="0" ixy="0" ixz="0" iyy="0" iyz="0" izz="0"/>
    </inertial>
  </link>
  <joint name="ee_joint" type="fixed">
    <origin xyz="1 0 0"/>
    <parent link="link2"/>
    <child link="ee_link"/>
  </joint>
  <link name="ee_link"/>
</robot>"#;

const SPATIAL_6R_URDF: &str = r#"
<robot name="spatial_6r">
  <link name="base_link"/>
  <joint name="joint1" type="revolute">
    <origin xyz="0 0 0.1"/>
    <parent link="base_link"/>
    <child link="link1"/>
    <axis xyz="0 0 1"/>
    <limit lower="-3.1" upper="3.1" effort="10" velocity="10"/>
  </joint>
  <link name="link1">
    <inertial>
      <origin xyz="0 0 0.05"/>
      <mass value="2.0"/>
      <inertia ixx="0.01" ixy="0" ixz="0" iyy="0.01" iyz="0" izz="0.01"/>
    </inertial>
  </link>
  <joint name="joint2" type="revolute">
    <origin xyz="0 0 0.1"/>
    <parent link="link1"/>
    <child link="link2"/>
    <axis xyz="0 1 0"/>
    <limit lower="-3.1" upper="3.1" effort="10" velocity="10"/>
  </joint>
  <link name="link2">
    <inertial>
      <origin xyz="0.15 0 0"/>
      <mass value="2.0"/>
      <inertia ixx="0.01" ixy="0" ixz="0" iyy="0.02" iyz="0" izz="0.02"/>
    </inertial>
  </link>
  <joint name="joint3" type="revolute">
    <origin xyz="0.3 0 0"/>
    <parent link="link2"/>
    <child link="link3"/>
    <axis xyz="0 1 0"/>
    <limit lower="-3.1" upper="3.1" effort="10" velocity="10"/>
  </joint>
  <link name="link3">
    <inertial>
      <origin xyz="0.1 0 0"/>
      <mass value="1.5"/>
      <inertia ixx="0.005" ixy="0" ixz="0" iyy="0.01" iyz="0" izz="0.01"/>
    </inertial>
  </link>
  <joint name="joint4" type="revolute">
    <origin xyz="0.25 0 0"/>
    <parent link="link3"/>
    <child link="link4"/>
    <axis xyz="1 0 0"/>
    <limit lower="-3.1" upper="3.1" effort="10" velocity="10"/>
  </joint>
  <link name="link4">
    <inertial>
      <origin xyz="0.05 0 0"/>
      <mass value="1.0"/>
      <inertia ixx="0.003" ixy="0" ixz="0" iyy="0.005" iyz="0" izz="0.005"/>
    </inertial>
  </link>
  <joint name="joint5" type="revolute">
    <origin xyz="0.1 0 0"/>
    <parent link="link4"/>
    <child link="link5"/>
    <axis xyz="0 1 0"/>
    <limit lower="-3.1" upper="3.1" effort="10" velocity="10"/>
  </joint>
  <link name="link5">
    <inertial>
      <origin xyz="0.05 0 0"/>
      <mass value="1.0"/>
      <inertia ixx="0.003" ixy="0" ixz="0" iyy="0.005" iyz="0" izz="0.005"/>
    </inertial>
  </link>
  <joint name="joint6" type="revolute">
    <origin xyz="0.1 0 0"/>
    <parent link="link5"/>
    <child link="link6"/>
    <axis xyz="1 0 0"/>
    <limit lower="-3.1" upper="3.1" effort="10" velocity="10"/>
  </joint>
  <link name="link6">
    <inertial>
      <origin xyz="0.05 0 0"/>
      <mass value="0.5"/>
      <inertia ixx="0.002" ixy="0" ixz="0" iyy="0.003" iyz="0" izz="0.003"/>
    </inertial>
  </link>
</robot>"#;

fn planar_2r_dynamics() -> RobotDynamicsModule {
    let model = RobotModelModule::new_from_urdf_string(PLANAR_2R_URDF).expect("error");
    let chain = RobotChainModule::new(&model, "base_link", "ee_link").expect("error");
    let source = Arc::new(StoredJointState::new_from_chain(&chain));
    RobotDynamicsModule::new(chain, source)
}

fn spatial_6r_dynamics() -> RobotDynamicsModule {
    let model = RobotModelModule::new_from_urdf_string(SPATIAL_6R_URDF).expect("error");
    let chain = RobotChainModule::new(&model, "base_link", "link6").expect("error");
    let source = Arc::new(StoredJointState::new_from_chain(&chain));
    RobotDynamicsModule::new(chain, source)
}

fn planar_2r_inertia_closed_form(q2: f64) -> DMatrix<f64> {
    let mut m = DMatrix::zeros(2, 2);
    m[(0, 0)] = 1.5 + q2.cos();
    m[(0, 1)] = 0.25 + 0.5 * q2.cos();
    m[(1, 0)] = m[(0, 1)];
    m[(1, 1)] = 0.25;
    m
}

#[test]
fn test_inertia_matches_closed_form() {
    let dynamics = planar_2r_dynamics();

    for q in [vec![0.0, 0.0], vec![0.3, 0.5], vec![-1.0, 2.1]] {
        let inertia = dynamics.inertia(&JointStateInput::new_explicit_from_vec(&q)).expect("error");
        let expected = planar_2r_inertia_closed_form(q[1]);
        assert!((&inertia - expected).norm() < 1e-12);
    }
}

#[test]
fn test_inertia_symmetric_positive_definite() {
    let dynamics = planar_2r_dynamics();
    let chain = dynamics.robot_chain_module();

    for _ in 0..10 {
        let q = chain.sample_dof_state();
        let inertia = dynamics.inertia(&JointStateInput::Explicit(q)).expect("error");
        assert!((&inertia - inertia.transpose()).norm() < 1e-10);

        let eigenvalues = inertia.symmetric_eigen().eigenvalues;
        for eigenvalue in eigenvalues.iter() {
            assert!(*eigenvalue > 1e-6);
        }
    }
}

#[test]
fn test_inertia_use_current_matches_explicit() {
    let model = RobotModelModule::new_from_urdf_string(PLANAR_2R_URDF).expect("error");
    let chain = RobotChainModule::new(&model, "base_link", "ee_link").expect("error");

    let mut stored = StoredJointState::new_from_chain(&chain);
    stored.set_joint_position("joint1", 0.3);
    stored.set_joint_position("joint2", 0.5);
    let dynamics = RobotDynamicsModule::new(chain, Arc::new(stored));

    let from_current = dynamics.inertia(&JointStateInput::UseCurrent).expect("error");
    let from_explicit = dynamics.inertia(&JointStateInput::new_explicit_from_vec(&vec![0.3, 0.5])).expect("error");
    assert!((from_current - from_explicit).norm() < 1e-14);
}

#[test]
fn test_inertia_rejects_wrong_state_length() {
    let dynamics = planar_2r_dynamics();
    let res = dynamics.inertia(&JointStateInput::Explicit(DVector::zeros(5)));
    assert!(matches!(res, Err(ArmKinError::GenericError(_))));
}

#[test]
fn test_coriolis_zero_at_rest() {
    let dynamics = planar_2r_dynamics();
    let positions = JointStateInput::new_explicit_from_vec(&vec![0.3, 0.5]);
    let velocities = JointStateInput::Explicit(DVector::zeros(2));

    let coriolis = dynamics.coriolis_matrix(&positions, &velocities).expect("error");
    assert_eq!(coriolis.norm(), 0.0);
}

#[test]
fn test_coriolis_matches_closed_form() {
    let dynamics = planar_2r_dynamics();
    let (q1, q2) = (0.3, 0.5);
    let (q1d, q2d) = (0.2, -0.4);
    let positions = JointStateInput::new_explicit_from_vec(&vec![q1, q2]);
    let velocities = JointStateInput::new_explicit_from_vec(&vec![q1d, q2d]);

    let coriolis = dynamics.coriolis_matrix(&positions, &velocities).expect("error");

    let h = -0.5 * q2.sin();
    let mut expected = DMatrix::zeros(2, 2);
    expected[(0, 0)] = h * q2d;
    expected[(0, 1)] = h * (q1d + q2d);
    expected[(1, 0)] = -h * q1d;
    expected[(1, 1)] = 0.0;

    // The inertia partials come from a five-point central difference, so the comparison is
    // against a truncation error of order h^4.
    assert!((coriolis - expected).norm() < 1e-8);
}

#[test]
fn test_cart_inertia_on_six_dof_chain() {
    let dynamics = spatial_6r_dynamics();
    let q = vec![0.1, 0.4, -0.3, 0.5, 0.3, -0.2];
    let cart_inertia = dynamics.cart_inertia(&JointStateInput::new_explicit_from_vec(&q)).expect("error");

    assert_eq!(cart_inertia.nrows(), 6);
    assert_eq!(cart_inertia.ncols(), 6);
    assert!((&cart_inertia - cart_inertia.transpose()).norm() < 1e-6);
    for i in 0..6 {
        assert!(cart_inertia[(i, i)].is_finite());
        assert!(cart_inertia[(i, i)] > 0.0);
    }
}

#[test]
fn test_cart_inertia_singular_below_six_dofs() {
    // J M^-1 J^T of a 2-DOF chain is a 6x6 matrix of rank at most 2.
    let dynamics = planar_2r_dynamics();
    let res = dynamics.cart_inertia(&JointStateInput::new_explicit_from_vec(&vec![0.3, 0.5]));
    assert!(matches!(res, Err(ArmKinError::SingularConfigurationError(_))));
}

#[test]
fn test_six_dof_inertia_symmetric_positive_definite() {
    let dynamics = spatial_6r_dynamics();
    let chain = dynamics.robot_chain_module();

    for _ in 0..5 {
        let q = chain.sample_dof_state();
        let inertia = dynamics.inertia(&JointStateInput::Explicit(q)).expect("error");
        assert_eq!(inertia.nrows(), 6);
        assert!((&inertia - inertia.transpose()).norm() < 1e-9);

        let eigenvalues = inertia.symmetric_eigen().eigenvalues;
        for eigenvalue in eigenvalues.iter() {
            assert!(*eigenvalue > 0.0);
        }
    }
}
