use std::fmt;

use serde::{Deserialize, Serialize};

/// Value the registry writes into `result` when it accepts a `create`.
pub const RESULT_SUCCESS: &str = "success";

/// Lifecycle event carried by a phone-home request.
///
/// Unrecognized names are kept verbatim so they can be echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventName {
    Create,
    Delete,
    Other(String),
}

impl EventName {
    pub fn as_str(&self) -> &str {
        match self {
            EventName::Create => "create",
            EventName::Delete => "delete",
            EventName::Other(s) => s,
        }
    }
}

impl From<String> for EventName {
    fn from(s: String) -> Self {
        match s.as_str() {
            "create" => EventName::Create,
            "delete" => EventName::Delete,
            _ => EventName::Other(s),
        }
    }
}

impl From<&str> for EventName {
    fn from(s: &str) -> Self {
        EventName::from(s.to_string())
    }
}

impl From<EventName> for String {
    fn from(e: EventName) -> Self {
        match e {
            EventName::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_blank(v: &Option<String>) -> bool {
    v.as_deref().map_or(true, str::is_empty)
}

/// One reported instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub id: String,
    pub event_name: EventName,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub local_hostname: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub public_ipv4: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub private_ipv4: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "is_blank")]
    pub instance_type: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub keypair: Option<String>,
    /// Server-authoritative; whatever a caller sends here is discarded.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub result: Option<String>,
}

impl InstanceRecord {
    /// A bare event with only the required fields set.
    pub fn new(id: impl Into<String>, event_name: impl Into<EventName>) -> Self {
        Self {
            id: id.into(),
            event_name: event_name.into(),
            local_hostname: None,
            public_ipv4: None,
            private_ipv4: None,
            name: None,
            instance_type: None,
            region: None,
            keypair: None,
            result: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
