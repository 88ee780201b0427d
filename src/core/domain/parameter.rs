//! Parameter types.
//!
//! A parameter is a path-addressed record in the store. Values of secure
//! parameters arrive decrypted, so the value is wiped when the parameter
//! is dropped.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use zeroize::Zeroize;

/// Storage type of a parameter.
///
/// Closed set. A copy always writes the destination with the source's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParameterType {
    String,
    SecureString,
    StringList,
}

impl ParameterType {
    /// Every supported type.
    pub const ALL: [ParameterType; 3] = [Self::String, Self::SecureString, Self::StringList];

    /// Wire name used by the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::SecureString => "SecureString",
            Self::StringList => "StringList",
        }
    }

    /// Whether values of this type are encrypted at rest.
    pub fn is_secure(&self) -> bool {
        matches!(self, Self::SecureString)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(Self::String),
            "SecureString" => Ok(Self::SecureString),
            "StringList" => Ok(Self::StringList),
            other => Err(other.to_string()),
        }
    }
}

/// A parameter read with its value.
#[derive(Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value: String,
    kind: ParameterType,
    description: Option<String>,
}

impl Parameter {
    /// Create a parameter.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        kind: ParameterType,
        description: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            description,
        }
    }

    /// Full path of the parameter.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plaintext value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Storage type.
    pub fn kind(&self) -> ParameterType {
        self.kind
    }

    /// Description, if the store returned one.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Value safe to print: secure values are masked.
    pub fn display_value(&self) -> &str {
        if self.kind.is_secure() {
            "********"
        } else {
            &self.value
        }
    }

    /// Metadata view without the value.
    pub fn summary(&self) -> ParameterSummary {
        ParameterSummary {
            name: self.name.clone(),
            kind: self.kind,
            description: self.description.clone(),
        }
    }
}

// Manual so a stray `{:?}` never prints a decrypted secret.
impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("value", &self.display_value())
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish()
    }
}

impl Drop for Parameter {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Parameter metadata as returned by listing and describe calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Write request for a single parameter.
#[derive(Clone, PartialEq, Eq)]
pub struct PutParameter<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub kind: ParameterType,
    pub description: &'a str,
    /// Replace an existing parameter instead of failing.
    pub overwrite: bool,
}

impl fmt::Debug for PutParameter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PutParameter")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("overwrite", &self.overwrite)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_type_parse() {
        for kind in ParameterType::ALL {
            assert_eq!(kind.as_str().parse::<ParameterType>().unwrap(), kind);
        }
        assert_eq!(
            "Binary".parse::<ParameterType>().unwrap_err(),
            "Binary".to_string()
        );
    }

    #[test]
    fn test_only_secure_string_is_secure() {
        assert!(ParameterType::SecureString.is_secure());
        assert!(!ParameterType::String.is_secure());
        assert!(!ParameterType::StringList.is_secure());
    }

    #[test]
    fn test_debug_masks_secure_value() {
        let param = Parameter::new(
            "/ns/staging/DB_PASSWORD",
            "hunter2",
            ParameterType::SecureString,
            None,
        );
        let debug = format!("{:?}", param);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("/ns/staging/DB_PASSWORD"));
    }

    #[test]
    fn test_display_value_keeps_plain_value() {
        let param = Parameter::new("/ns/staging/LOG_LEVEL", "info", ParameterType::String, None);
        assert_eq!(param.display_value(), "info");
    }

    #[test]
    fn test_summary_drops_value() {
        let param = Parameter::new(
            "/ns/staging/REDISCLOUD_URL",
            "redis://x",
            ParameterType::SecureString,
            Some("cache url".to_string()),
        );
        let summary = param.summary();
        assert_eq!(summary.name, "/ns/staging/REDISCLOUD_URL");
        assert_eq!(summary.kind, ParameterType::SecureString);
        assert_eq!(summary.description.as_deref(), Some("cache url"));
    }

    #[test]
    fn test_summary_json_uses_type_key() {
        let summary = ParameterSummary {
            name: "/ns/staging/LOG_LEVEL".to_string(),
            kind: ParameterType::String,
            description: None,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"name":"/ns/staging/LOG_LEVEL","type":"String"}"#);
    }
}
