use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::FormData;

/// Letters outside ASCII that may appear anywhere in an address.
const INTL: &str = r"\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}";

/// Dot-atom or quoted local part, `@`, then dotted labels with an alphabetic TLD.
/// Same shape as the yup `string().email()` pattern.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let atom = format!(r"[a-z0-9!#$%&'*+\-/=?^_`{{|}}~{INTL}]+");
    let fws = r"(?:(?:[ \t]*\r\n)?[ \t]+)?";
    let qtext = format!(r"[\x01-\x08\x0b\x0c\x0e-\x1f\x7f\x21\x23-\x5b\x5d-\x7e{INTL}]");
    let qpair = format!(r"\\[\x01-\x09\x0b\x0c\x0d-\x7f{INTL}]");
    let local = format!(r#"(?:{atom}(?:\.{atom})*|"(?:{fws}(?:{qtext}|{qpair}))*{fws}")"#);
    let label = format!(r"(?:[a-z0-9{INTL}]|[a-z0-9{INTL}][a-z0-9\-._~{INTL}]*[a-z0-9{INTL}])");
    let tld = format!(r"(?:[a-z{INTL}]|[a-z{INTL}][a-z0-9\-._~{INTL}]*[a-z{INTL}])");
    Regex::new(&format!(r"(?i)^{local}@(?:{label}\.)+{tld}$")).expect("email pattern compiles")
});

/// Field name -> the single message displayed next to that field.
pub type FieldErrorMap = BTreeMap<String, String>;

/// A single constraint on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Fails when the value is absent or empty. Whitespace counts as a value.
    Required { message: &'static str },
    /// Fails on a non-empty value that is not an email address.
    Email { message: &'static str },
    /// Fails on a present value shorter than `min` characters (empty included).
    MinLength { min: usize, message: &'static str },
}

impl Rule {
    /// Returns the failure message, or `None` when `value` satisfies the rule.
    fn check(&self, value: Option<&str>) -> Option<&'static str> {
        match *self {
            Rule::Required { message } => match value {
                Some(v) if !v.is_empty() => None,
                _ => Some(message),
            },
            Rule::Email { message } => match value {
                Some(v) if !v.is_empty() && !EMAIL_RE.is_match(v) => Some(message),
                _ => None,
            },
            Rule::MinLength { min, message } => match value {
                Some(v) if v.chars().count() < min => Some(message),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    pub fn required(mut self, message: &'static str) -> Self {
        self.rules.push(Rule::Required { message });
        self
    }

    pub fn email(mut self, message: &'static str) -> Self {
        self.rules.push(Rule::Email { message });
        self
    }

    pub fn min_length(mut self, min: usize, message: &'static str) -> Self {
        self.rules.push(Rule::MinLength { min, message });
        self
    }
}

/// An ordered set of field constraints for one form.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Check every rule of every field. Never stops at the first violation, so
    /// the caller can show all of them at once.
    pub fn validate(&self, data: &impl FormData) -> Result<(), ValidationFailure> {
        let violations: Vec<FieldViolation> = self
            .fields
            .iter()
            .flat_map(|field| {
                let value = data.field(field.name);
                field.rules.iter().filter_map(move |rule| {
                    rule.check(value).map(|message| FieldViolation {
                        path: field.name.to_string(),
                        message: message.to_string(),
                    })
                })
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { violations })
        }
    }
}

/// Sign-in form: email (required, formatted) and password (required).
pub fn sign_in_schema() -> Schema {
    Schema::new(vec![
        FieldSchema::new("email")
            .required("Email is required.")
            .email("Enter a valid email address."),
        FieldSchema::new("password").required("Password is required."),
    ])
}

/// Sign-up form. The password only carries a length rule, so an empty password
/// reports the length message rather than a "required" one.
pub fn sign_up_schema() -> Schema {
    Schema::new(vec![
        FieldSchema::new("name").required("Name is required."),
        FieldSchema::new("email")
            .required("Email is required.")
            .email("Enter a valid email address."),
        FieldSchema::new("password").min_length(6, "Minimum 6 characters."),
    ])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub path: String,
    pub message: String,
}

/// Every violated rule, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.violations.len())
    }
}

impl std::error::Error for ValidationFailure {}

/// Collapse a failure into one message per field. A later violation for the
/// same field overwrites an earlier one.
pub fn get_validation_errors(failure: &ValidationFailure) -> FieldErrorMap {
    let mut errors = FieldErrorMap::new();
    for violation in &failure.violations {
        errors.insert(violation.path.clone(), violation.message.clone());
    }
    errors
}
