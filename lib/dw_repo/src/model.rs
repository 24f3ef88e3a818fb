//! Serialized program model.
//!
//! A program model describes the classes of an application (or of the
//! Android framework) as produced by an upstream bytecode extraction:
//!
//! ```json
//! {
//!   "classes": [
//!     {
//!       "name": "com/example/Main",
//!       "superclass": "android/app/Activity",
//!       "interfaces": ["android/view/View$OnClickListener"],
//!       "methods": [
//!         { "signature": "onClick(Landroid/view/View;)V" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::errors::RepoResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProgramModel {
    #[serde(default)]
    pub classes: Vec<ClassModel>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub interface: bool,
    #[serde(default)]
    pub methods: Vec<MethodModel>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MethodModel {
    /// Dalvik subsignature, e.g. `onClick(Landroid/view/View;)V`.
    pub signature: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub native: bool,
}

impl ProgramModel {
    pub fn from_json(s: &str) -> RepoResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Reads a program model from a json file.
pub fn open<P: AsRef<Path>>(path: P) -> RepoResult<ProgramModel> {
    let file = File::open(path.as_ref())?;
    let model = serde_json::from_reader(BufReader::new(file))?;
    log::debug!("program model {:?} loaded", path.as_ref());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_model() {
        let model = ProgramModel::from_json(
            r#"{
                "classes": [
                    { "name": "a/Listener", "interface": true,
                      "methods": [ { "signature": "onClick(Landroid/view/View;)V", "abstract": true } ] },
                    { "name": "a/Impl", "interfaces": ["a/Listener"] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(model.classes.len(), 2);
        assert!(model.classes[0].interface);
        assert!(model.classes[0].methods[0].is_abstract);
        assert!(model.classes[1].superclass.is_none());
        assert_eq!(model.classes[1].interfaces, vec!["a/Listener".to_string()]);
    }

    #[test]
    fn reject_bad_model() {
        assert!(ProgramModel::from_json(r#"{ "classes": [ { "superclass": "a/B" } ] }"#).is_err());
    }
}
