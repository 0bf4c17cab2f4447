use std::error::Error;
use std::fmt;

/// A common error type returned by functions throughout the crate.
#[derive(Clone, Debug)]
pub enum ArmKinError {
    GenericError(String),
    IdxOutOfBoundError(String),
    UrdfParseError(String),
    ChainConnectionError(String),
    MissingJointError(String),
    InvalidSeedError(String),
    SingularConfigurationError(String)
}
impl ArmKinError {
    pub fn new_generic_error_str(s: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: {} -- File: {}, Line: {}", s, file, line);
        return Self::GenericError(s);
    }
    pub fn new_idx_out_of_bound_error(given_idx: usize, length_of_array: usize, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Index {:?} is too large for the array of length {:?} -- File: {}, Line: {}", given_idx, length_of_array, file, line);
        return Self::IdxOutOfBoundError(s);
    }
    pub fn new_urdf_parse_error(message: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Could not parse URDF.  {} -- File: {}, Line: {}", message, file, line);
        return Self::UrdfParseError(s);
    }
    pub fn new_chain_connection_error(base_link_name: &str, tip_link_name: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Links {} and {} do not form a connected chain in the robot model -- File: {}, Line: {}", base_link_name, tip_link_name, file, line);
        return Self::ChainConnectionError(s);
    }
    pub fn new_missing_joint_error(joint_name: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Joint {} was not found in the joint state source -- File: {}, Line: {}", joint_name, file, line);
        return Self::MissingJointError(s);
    }
    pub fn new_invalid_seed_error(given_len: usize, num_dofs: usize, file: &str, line: u32) -> Self {
        let s = format!("ERROR: IK seed has length {} but the chain has {} degrees of freedom -- File: {}, Line: {}", given_len, num_dofs, file, line);
        return Self::InvalidSeedError(s);
    }
    pub fn new_singular_configuration_error(message: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Singular configuration.  {} -- File: {}, Line: {}", message, file, line);
        return Self::SingularConfigurationError(s);
    }
    pub fn new_state_vec_wrong_size_error(function_name: &str, given_len: usize, expected_len: usize, file: &str, line: u32) -> Self {
        let s = format!("ERROR: State vector of length {} given to function {} (expected length {}) -- File: {}, Line: {}", given_len, function_name, expected_len, file, line);
        return Self::GenericError(s);
    }
    pub fn message(&self) -> &str {
        match self {
            ArmKinError::GenericError(s) => { s }
            ArmKinError::IdxOutOfBoundError(s) => { s }
            ArmKinError::UrdfParseError(s) => { s }
            ArmKinError::ChainConnectionError(s) => { s }
            ArmKinError::MissingJointError(s) => { s }
            ArmKinError::InvalidSeedError(s) => { s }
            ArmKinError::SingularConfigurationError(s) => { s }
        }
    }
}
impl fmt::Display for ArmKinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
impl Error for ArmKinError {}
