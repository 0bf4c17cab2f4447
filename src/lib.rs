//! Armkin is a kinematics and dynamics library for serial manipulators described by URDF.
//! It parses a robot description into a link/joint model, extracts a base-to-tip chain from it,
//! and computes forward position and velocity kinematics, geometric Jacobians (with transpose and
//! pseudo-inverse), damped least squares inverse kinematics, the joint-space and Cartesian-space
//! inertia matrices, and the Coriolis matrix.  Joint state can be supplied explicitly per call or
//! pulled from a pluggable `JointStateSource` (e.g., a robot driver).

pub mod robot_modules;
pub mod utils;
