//! Rule module - structured compliance facts extracted from regulation text

use crate::condition::Condition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Building parameter a rule constrains
///
/// The extraction prompt restricts the service to the four named variants.
/// Anything else found in a persisted file is kept verbatim as `Other` so a
/// rule set can always be loaded and inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Parameter {
    /// `Wall_Height`
    WallHeight,

    /// `FireRating`
    FireRating,

    /// `Wall_Thickness`
    WallThickness,

    /// `Distance`
    Distance,

    /// A parameter outside the enumerated set
    Other(String),
}

impl Parameter {
    /// The enumerated parameter names, in prompt order
    pub const KNOWN: [Parameter; 4] = [
        Parameter::WallHeight,
        Parameter::FireRating,
        Parameter::WallThickness,
        Parameter::Distance,
    ];

    /// Get the wire name of the parameter
    pub fn as_str(&self) -> &str {
        match self {
            Parameter::WallHeight => "Wall_Height",
            Parameter::FireRating => "FireRating",
            Parameter::WallThickness => "Wall_Thickness",
            Parameter::Distance => "Distance",
            Parameter::Other(name) => name,
        }
    }

    /// Parse a parameter from its wire name, case-sensitively
    pub fn parse(s: &str) -> Self {
        match s {
            "Wall_Height" => Parameter::WallHeight,
            "FireRating" => Parameter::FireRating,
            "Wall_Thickness" => Parameter::WallThickness,
            "Distance" => Parameter::Distance,
            other => Parameter::Other(other.to_string()),
        }
    }

    /// Whether this is one of the enumerated parameters
    pub fn is_known(&self) -> bool {
        !matches!(self, Parameter::Other(_))
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Parameter::Other(String::new())
    }
}

impl From<String> for Parameter {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Parameter> for String {
    fn from(p: Parameter) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse(s) {
            Parameter::Other(name) => Err(format!("Invalid parameter: {}", name)),
            known => Ok(known),
        }
    }
}

/// One extracted compliance rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Clause reference, e.g. `GB50016-6.1.1`
    #[serde(default)]
    pub clause: String,

    /// Governed parameter; an absent field loads as an empty `Other`
    #[serde(default)]
    pub parameter: Parameter,

    /// Condition expression, e.g. `高层厂房:>=0.5`
    #[serde(default)]
    pub condition: String,

    /// Unit of the condition threshold
    #[serde(default)]
    pub unit: String,

    /// Free-form remark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Rule {
    /// Parse the condition expression
    pub fn parsed_condition(&self) -> Condition {
        Condition::parse(&self.condition)
    }

    /// Whether the rule is in force for `building_type`
    pub fn applies_to(&self, building_type: &str) -> bool {
        self.parsed_condition().applies_to(building_type)
    }

    /// Whether a measured value satisfies the rule
    pub fn is_satisfied_by(&self, value: f64) -> bool {
        self.parsed_condition().evaluate(value)
    }

    /// Check the rule is complete enough for a compliance checker to use
    pub fn validate(&self) -> Result<(), String> {
        if self.clause.trim().is_empty() {
            return Err("clause is empty".to_string());
        }
        if !self.parameter.is_known() {
            return Err(format!("parameter '{}' is not recognized", self.parameter));
        }
        if self.condition.trim().is_empty() {
            return Err("condition is empty".to_string());
        }
        if self.parsed_condition().threshold().is_none() {
            return Err(format!("condition '{}' has no comparison", self.condition));
        }
        Ok(())
    }
}

/// Every rule produced by one successful extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rules in response order
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the set holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Rules governing `parameter` that are in force for `building_type`
    pub fn applicable<'a>(
        &'a self,
        parameter: &'a Parameter,
        building_type: &'a str,
    ) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules
            .iter()
            .filter(move |r| &r.parameter == parameter && r.applies_to(building_type))
    }

    /// Rules a measured value fails, among those applicable
    pub fn violations<'a>(
        &'a self,
        parameter: &'a Parameter,
        building_type: &'a str,
        value: f64,
    ) -> impl Iterator<Item = &'a Rule> + 'a {
        self.applicable(parameter, building_type)
            .filter(move |r| !r.is_satisfied_by(value))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
