//! Declarative track bindings
//!
//! A binding annotates one element with a trigger intent and a payload
//! descriptor. Hosts hand bindings over as template values in this wire
//! shape:
//!
//! ```json
//! { "t": "bind", "act": "click", "data": { "id": "e1", "p": ["a", 2] } }
//! ```
//!
//! `t` selects which host lifecycle phase (re)evaluates the binding and
//! defaults to `bind` when absent; `act` picks the trigger kind; `data.p`
//! carries positional extra params for the report payload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackError};

/// Category of activity that produces a tracking report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// Element entered the page; fires synchronously at attach
    Ready,
    /// Native click on the element
    Click,
    /// Element scrolled fully into the viewport
    View,
    /// Page (or element) is going away
    Unload,
}

impl FromStr for TriggerKind {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ready" => Ok(Self::Ready),
            "click" => Ok(Self::Click),
            "view" => Ok(Self::View),
            "unload" => Ok(Self::Unload),
            other => Err(TrackError::UnknownTrigger(other.to_owned())),
        }
    }
}

/// Host lifecycle phase that (re)evaluates a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindPhase {
    /// Evaluate when the element attaches (the default)
    #[default]
    Bind,
    /// Evaluate on in-place element updates
    Update,
    /// Evaluate when the element detaches
    Unbind,
}

impl FromStr for BindPhase {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bind" => Ok(Self::Bind),
            "update" => Ok(Self::Update),
            "unbind" => Ok(Self::Unbind),
            other => Err(TrackError::UnknownPhase(other.to_owned())),
        }
    }
}

/// One positional payload param
///
/// The wire shape allows strings and numbers; every variant is stringified
/// into the report payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer param
    Int(i64),
    /// Floating-point param
    Float(f64),
    /// String param
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Tracked event descriptor: the event id plus positional extra params
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    /// Opaque identifier of the tracked event type
    pub id: String,
    /// Positional extra params appended to the report payload
    #[serde(rename = "p", default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamValue>,
}

impl EventSpec {
    /// Create a descriptor with no extra params
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: Vec::new(),
        }
    }

    /// Append one positional param
    pub fn with_param(mut self, param: impl Into<ParamValue>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Append positional params in order
    pub fn with_params(mut self, params: impl IntoIterator<Item = ParamValue>) -> Self {
        self.params.extend(params);
        self
    }
}

/// Declarative binding attached to one element
///
/// Immutable for a registration epoch; the host supplies a fresh binding
/// value on each lifecycle hook invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackBinding {
    /// Host lifecycle phase that (re)evaluates this binding
    #[serde(rename = "t", default)]
    pub phase: BindPhase,
    /// Activity that produces the report
    #[serde(rename = "act")]
    pub trigger: TriggerKind,
    /// Tracked event descriptor
    pub data: EventSpec,
}

impl TrackBinding {
    /// Create a binding for the default (`bind`) phase
    pub fn new(trigger: TriggerKind, event_id: impl Into<String>) -> Self {
        Self {
            phase: BindPhase::default(),
            trigger,
            data: EventSpec::new(event_id),
        }
    }

    /// Select the lifecycle phase that evaluates this binding
    pub fn with_phase(mut self, phase: BindPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Append one positional param
    pub fn with_param(mut self, param: impl Into<ParamValue>) -> Self {
        self.data = self.data.with_param(param);
        self
    }

    /// Append positional params in order
    pub fn with_params(mut self, params: impl IntoIterator<Item = ParamValue>) -> Self {
        self.data = self.data.with_params(params);
        self
    }

    /// Parse a binding from a host template value
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_wire_shape() {
        let value = json!({
            "t": "update",
            "act": "click",
            "data": { "id": "e1", "p": ["a", 2, 2.5] }
        });

        let binding = TrackBinding::from_value(&value).unwrap();
        assert_eq!(binding.phase, BindPhase::Update);
        assert_eq!(binding.trigger, TriggerKind::Click);
        assert_eq!(binding.data.id, "e1");
        assert_eq!(
            binding.data.params,
            vec![
                ParamValue::Text("a".to_owned()),
                ParamValue::Int(2),
                ParamValue::Float(2.5),
            ]
        );
    }

    #[test]
    fn phase_and_params_default_when_absent() {
        let value = json!({ "act": "ready", "data": { "id": "pv" } });

        let binding = TrackBinding::from_value(&value).unwrap();
        assert_eq!(binding.phase, BindPhase::Bind);
        assert_eq!(binding.trigger, TriggerKind::Ready);
        assert!(binding.data.params.is_empty());
    }

    #[test]
    fn malformed_binding_is_an_error() {
        let missing_act = json!({ "data": { "id": "e1" } });
        let err = TrackBinding::from_value(&missing_act).unwrap_err();
        assert!(matches!(err, TrackError::MalformedBinding(_)));

        let missing_id = json!({ "act": "click", "data": {} });
        assert!(TrackBinding::from_value(&missing_id).is_err());
    }

    #[test]
    fn params_stringify_like_the_wire_values() {
        assert_eq!(ParamValue::Int(2).to_string(), "2");
        assert_eq!(ParamValue::Float(2.0).to_string(), "2");
        assert_eq!(ParamValue::Float(2.5).to_string(), "2.5");
        assert_eq!(ParamValue::from("a").to_string(), "a");
    }

    #[test]
    fn trigger_and_phase_parse_from_str() {
        assert_eq!("view".parse::<TriggerKind>().unwrap(), TriggerKind::View);
        assert_eq!("unbind".parse::<BindPhase>().unwrap(), BindPhase::Unbind);

        assert!(matches!(
            "hover".parse::<TriggerKind>(),
            Err(TrackError::UnknownTrigger(_))
        ));
        assert!(matches!(
            "mounted".parse::<BindPhase>(),
            Err(TrackError::UnknownPhase(_))
        ));
    }

    #[test]
    fn builder_matches_parsed_binding() {
        let value = json!({
            "act": "view",
            "data": { "id": "banner", "p": ["top", 3] }
        });

        let built = TrackBinding::new(TriggerKind::View, "banner")
            .with_param("top")
            .with_param(3);
        assert_eq!(built, TrackBinding::from_value(&value).unwrap());
    }
}
