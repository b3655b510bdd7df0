//! Condition module - building-type scoped comparison expressions
//!
//! A rule condition reads `<building-type>:<comparison>` when it is scoped to
//! one kind of building (`高层厂房:>=0.5`) and plain `<comparison>` otherwise.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static QUALIFIED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?):\s*([<>=]+.*)").unwrap());
static COMPARISON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([<>=]+)\s*([\d.]+)").unwrap());

/// Tolerance used when an operator means equality
const EQUALITY_TOLERANCE: f64 = 0.001;

/// Comparison operator of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// Any other operator spelling (`=`, `==`, `=>` ...)
    Equal,
}

impl Operator {
    fn parse(s: &str) -> Self {
        match s.trim() {
            ">=" => Operator::GreaterOrEqual,
            "<=" => Operator::LessOrEqual,
            ">" => Operator::Greater,
            "<" => Operator::Less,
            _ => Operator::Equal,
        }
    }

    /// Get the operator as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::Equal => "=",
        }
    }

    /// Apply the operator to `value` and `threshold`
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Operator::GreaterOrEqual => value >= threshold,
            Operator::LessOrEqual => value <= threshold,
            Operator::Greater => value > threshold,
            Operator::Less => value < threshold,
            Operator::Equal => (value - threshold).abs() < EQUALITY_TOLERANCE,
        }
    }
}

/// A parsed rule condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    building_type: Option<String>,
    comparison: String,
}

impl Condition {
    /// Parse a condition expression
    ///
    /// # Examples
    ///
    /// ```
    /// use firerule_domain::Condition;
    ///
    /// let scoped = Condition::parse("高层厂房:>=0.5");
    /// assert_eq!(scoped.building_type(), Some("高层厂房"));
    /// assert_eq!(scoped.comparison(), ">=0.5");
    ///
    /// let plain = Condition::parse(">=3.0");
    /// assert_eq!(plain.building_type(), None);
    /// ```
    pub fn parse(input: &str) -> Self {
        match QUALIFIED_RE.captures(input) {
            Some(caps) => Self {
                building_type: Some(caps[1].trim().to_string()),
                comparison: caps[2].trim().to_string(),
            },
            None => Self {
                building_type: None,
                comparison: input.to_string(),
            },
        }
    }

    /// Building type qualifier, if any
    pub fn building_type(&self) -> Option<&str> {
        self.building_type.as_deref()
    }

    /// Comparison expression without the qualifier
    pub fn comparison(&self) -> &str {
        &self.comparison
    }

    /// Operator and numeric threshold, when the comparison has both
    pub fn threshold(&self) -> Option<(Operator, f64)> {
        let caps = COMPARISON_RE.captures(&self.comparison)?;
        let threshold = caps[2].parse::<f64>().ok()?;
        Some((Operator::parse(&caps[1]), threshold))
    }

    /// Whether the condition is in force for `building_type`
    ///
    /// Unqualified conditions apply everywhere; qualified ones apply when the
    /// building type contains the qualifier.
    pub fn applies_to(&self, building_type: &str) -> bool {
        match self.building_type() {
            None | Some("") => true,
            Some(qualifier) => building_type.contains(qualifier),
        }
    }

    /// Whether `value` satisfies the comparison.
    ///
    /// A comparison without an operator and threshold never holds.
    pub fn evaluate(&self, value: f64) -> bool {
        self.threshold()
            .map(|(op, threshold)| op.holds(value, threshold))
            .unwrap_or(false)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.building_type {
            Some(building_type) => write!(f, "{}:{}", building_type, self.comparison),
            None => write!(f, "{}", self.comparison),
        }
    }
}
