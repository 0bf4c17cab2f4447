use std::collections::HashMap;
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::utils::utils_console::{armkin_print, PrintColor, PrintMode};
use crate::utils::utils_errors::ArmKinError;
use crate::utils::utils_robot::joint::Joint;
use crate::utils::utils_robot::link::Link;
use crate::utils::utils_robot::urdf_joint::URDFJoint;
use crate::utils::utils_robot::urdf_link::URDFLink;

/// The `RobotModelModule` wraps a parsed URDF robot description.  It holds the robot's links and
/// joints along with their connectivity (preceding/child indices), exposes the root link of the
/// link tree, and can extract the ordered sequence of links between any two links.  It is the
/// starting point for building a `RobotChainModule`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RobotModelModule {
    robot_name: String,
    links: Vec<Link>,
    joints: Vec<Joint>,
    root_link_idx: usize,
    link_name_to_idx_hashmap: HashMap<String, usize>,
    joint_name_to_idx_hashmap: HashMap<String, usize>
}
impl RobotModelModule {
    /// Parses a robot model from a URDF document given as a string.  A leading XML declaration
    /// (`<?xml ... ?>`) is tolerated and stripped before parsing, as robot descriptions served
    /// by parameter servers often carry one.
    pub fn new_from_urdf_string(urdf_string: &str) -> Result<Self, ArmKinError> {
        let mut s = urdf_string.trim_start();
        if s.starts_with("<?xml") {
            match s.find("?>") {
                None => { return Err(ArmKinError::new_urdf_parse_error("Unterminated xml declaration.", file!(), line!())) }
                Some(idx) => { s = &s[idx+2..]; }
            }
        }

        let urdf_robot_res = urdf_rs::read_from_string(s);
        match &urdf_robot_res {
            Ok(urdf_robot) => { return Self::new_from_urdf_robot(urdf_robot); }
            Err(e) => { return Err(ArmKinError::new_urdf_parse_error(&format!("{}", e), file!(), line!())) }
        }
    }
    pub fn new_from_urdf_file<P: AsRef<Path>>(path: P) -> Result<Self, ArmKinError> {
        let urdf_robot_res = urdf_rs::read_file(path);
        match &urdf_robot_res {
            Ok(urdf_robot) => { return Self::new_from_urdf_robot(urdf_robot); }
            Err(e) => { return Err(ArmKinError::new_urdf_parse_error(&format!("{}", e), file!(), line!())) }
        }
    }
    fn new_from_urdf_robot(urdf_robot: &urdf_rs::Robot) -> Result<Self, ArmKinError> {
        let mut joints = vec![];
        let mut links = vec![];

        let mut link_name_to_idx_hashmap = HashMap::new();
        let mut joint_name_to_idx_hashmap = HashMap::new();

        for (i, j) in urdf_robot.joints.iter().enumerate() {
            joint_name_to_idx_hashmap.insert(j.name.clone(), i);
            joints.push(Joint::new(URDFJoint::new_from_urdf_joint(j), i));
        }
        for (i, l) in urdf_robot.links.iter().enumerate() {
            link_name_to_idx_hashmap.insert(l.name.clone(), i);
            links.push(Link::new(URDFLink::new_from_urdf_link(l), i));
        }

        let mut out_self = Self {
            robot_name: urdf_robot.name.clone(),
            links,
            joints,
            root_link_idx: 0,
            link_name_to_idx_hashmap,
            joint_name_to_idx_hashmap
        };

        out_self.assign_all_link_connections();
        out_self.assign_all_joint_connections();
        out_self.set_root_link_idx()?;

        Ok(out_self)
    }
    fn assign_all_link_connections(&mut self) {
        let l1 = self.links.len();
        let l2 = self.joints.len();

        for i in 0..l1 {
            for j in 0..l2 {
                if self.links[i].name() == self.joints[j].urdf_joint().child_link() {
                    let link_idx = self.get_link_idx_from_name( self.joints[j].urdf_joint().parent_link() );
                    let joint_idx = self.get_joint_idx_from_name( &self.joints[j].name().to_string() );
                    self.links[i].set_preceding_link_idx( link_idx );
                    self.links[i].set_preceding_joint_idx( joint_idx );
                }

                if self.links[i].name() == self.joints[j].urdf_joint().parent_link() {
                    let link_idx = self.get_link_idx_from_name( self.joints[j].urdf_joint().child_link() );
                    if link_idx.is_some() { self.links[i].add_child_link_idx(link_idx.unwrap()); }
                }
            }
        }
    }
    fn assign_all_joint_connections(&mut self) {
        let l = self.joints.len();

        for i in 0..l {
            let link_idx = self.get_link_idx_from_name( self.joints[i].urdf_joint().parent_link().to_string().as_str() );
            self.joints[i].set_preceding_link_idx(link_idx);
            let link_idx = self.get_link_idx_from_name( self.joints[i].urdf_joint().child_link().to_string().as_str() );
            self.joints[i].set_child_link_idx(link_idx);
        }
    }
    fn set_root_link_idx(&mut self) -> Result<(), ArmKinError> {
        let l = self.links.len();
        for i in 0..l {
            if self.links[i].preceding_link_idx().is_none() {
                self.root_link_idx = i;
                return Ok(());
            }
        }
        return Err(ArmKinError::new_urdf_parse_error("Robot model has no root link (link tree contains a cycle).", file!(), line!()));
    }
    /// Returns the ordered sequence of link indices from `start_link_idx` to `end_link_idx`,
    /// inclusive on both ends.  Returns None if no chain exists between the two links
    /// (i.e., `start_link_idx` is not an ancestor of `end_link_idx` in the link tree).
    pub fn get_link_chain(&self, start_link_idx: usize, end_link_idx: usize) -> Result<Option<Vec<usize>>, ArmKinError> {
        if start_link_idx >= self.links.len() { return Err(ArmKinError::new_idx_out_of_bound_error(start_link_idx, self.links.len(), file!(), line!())); }
        if end_link_idx >= self.links.len() { return Err(ArmKinError::new_idx_out_of_bound_error(end_link_idx, self.links.len(), file!(), line!())); }

        let mut out_chain = vec![end_link_idx];
        let mut curr_link_idx = end_link_idx;

        while curr_link_idx != start_link_idx {
            // A malformed model can contain a cycle off the root; bound the walk.
            if out_chain.len() > self.links.len() { return Ok(None); }
            let preceding_link_idx = self.links[curr_link_idx].preceding_link_idx();
            match preceding_link_idx {
                None => { return Ok(None) }
                Some(preceding_link_idx) => {
                    out_chain.push(preceding_link_idx);
                    curr_link_idx = preceding_link_idx;
                }
            }
        }

        out_chain.reverse();
        return Ok(Some(out_chain));
    }
    pub fn robot_name(&self) -> &str {
        &self.robot_name
    }
    pub fn links(&self) -> &Vec<Link> {
        &self.links
    }
    pub fn joints(&self) -> &Vec<Joint> {
        &self.joints
    }
    pub fn root_link_idx(&self) -> usize {
        self.root_link_idx
    }
    pub fn root_link_name(&self) -> &str {
        self.links[self.root_link_idx].name()
    }
    pub fn num_dofs(&self) -> usize {
        let mut num_dofs = 0;
        for j in &self.joints {
            num_dofs += j.num_dofs();
        }
        return num_dofs;
    }
    pub fn get_link_idx_from_name(&self, link_name: &str) -> Option<usize> {
        let res = self.link_name_to_idx_hashmap.get(link_name);
        match res {
            None => { return None }
            Some(u) => { return Some(*u) }
        }
    }
    pub fn get_joint_idx_from_name(&self, joint_name: &str) -> Option<usize> {
        let res = self.joint_name_to_idx_hashmap.get(joint_name);
        match res {
            None => { return None }
            Some(u) => { return Some(*u) }
        }
    }
    /// Prints a count summary of the robot description (links, joints, and degrees of freedom).
    pub fn print_robot_description(&self) {
        armkin_print(&format!("Robot {} --->", self.robot_name), PrintMode::Println, PrintColor::Blue, true);
        armkin_print(&format!("   > URDF links: {}", self.links.len()), PrintMode::Println, PrintColor::None, false);
        armkin_print(&format!("   > URDF joints: {}", self.joints.len()), PrintMode::Println, PrintColor::None, false);
        armkin_print(&format!("   > URDF non-fixed joints: {}", self.num_dofs()), PrintMode::Println, PrintColor::None, false);
        armkin_print(&format!("   > Root link: {}", self.root_link_name()), PrintMode::Println, PrintColor::None, false);
    }
}
