use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::utils::utils_errors::ArmKinError;

pub trait ToAndFromJsonString: Serialize + DeserializeOwned {
    fn convert_to_json_string(&self) -> String {
        serde_json::to_string(self).expect("error")
    }
    fn load_from_json_string(json_string: &str) -> Result<Self, ArmKinError> where Self: Sized {
        let load: Result<Self, _> = serde_json::from_str(json_string);
        return if let Ok(load) = load { Ok(load) } else {
            Err(ArmKinError::new_generic_error_str(&format!("Could not load json string {:?} into correct type.", json_string), file!(), line!()))
        }
    }
}
impl <T> ToAndFromJsonString for T where T: Serialize + DeserializeOwned { }
