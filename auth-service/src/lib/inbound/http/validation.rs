use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Generic length bounds shared by every validated field.
const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 50;

/// Declarative rule for one request body field.
///
/// Every rule means: required, non-empty after trimming, and within the
/// generic length bounds. The empty/missing case carries a field-specific
/// message; length violations use generic ones.
pub struct FieldRule {
    pub field: &'static str,
    pub required_message: &'static str,
}

/// A named set of field rules applied to a request body before any handler
/// logic runs.
pub struct Schema {
    rules: &'static [FieldRule],
}

/// One violated field with its human-readable message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Rule set for registration bodies. Optional fields (role, avatar) are
/// passed through unvalidated.
pub static CREATE_USER_SCHEMA: Schema = Schema {
    rules: &[
        FieldRule {
            field: "name",
            required_message: "First name is required.",
        },
        FieldRule {
            field: "lastname",
            required_message: "Last name is required.",
        },
        FieldRule {
            field: "email",
            required_message: "Email is required.",
        },
        FieldRule {
            field: "password",
            required_message: "Password is required.",
        },
        FieldRule {
            field: "confirmPassword",
            required_message: "Password confirmation is required.",
        },
    ],
};

/// Rule set for login bodies.
pub static LOGIN_SCHEMA: Schema = Schema {
    rules: &[
        FieldRule {
            field: "email",
            required_message: "Email is required.",
        },
        FieldRule {
            field: "password",
            required_message: "Password is required.",
        },
    ],
};

impl Schema {
    /// Validate a raw JSON body against this rule set.
    ///
    /// Returns the body with validated fields trimmed, or every violated
    /// field with one message each. An empty string counts as missing.
    pub fn validate(&self, body: &Value) -> Result<Map<String, Value>, Vec<FieldViolation>> {
        let object = body.as_object().cloned().unwrap_or_default();

        let mut trimmed = object.clone();
        let mut violations = Vec::new();

        for rule in self.rules {
            match object.get(rule.field) {
                None | Some(Value::Null) => violations.push(FieldViolation {
                    field: rule.field.to_string(),
                    message: rule.required_message.to_string(),
                }),
                Some(Value::String(raw)) => {
                    let value = raw.trim();
                    if value.is_empty() {
                        violations.push(FieldViolation {
                            field: rule.field.to_string(),
                            message: rule.required_message.to_string(),
                        });
                    } else if value.chars().count() < MIN_LENGTH {
                        violations.push(FieldViolation {
                            field: rule.field.to_string(),
                            message: format!(
                                "{} must be at least {} characters.",
                                rule.field, MIN_LENGTH
                            ),
                        });
                    } else if value.chars().count() > MAX_LENGTH {
                        violations.push(FieldViolation {
                            field: rule.field.to_string(),
                            message: format!(
                                "{} must be at most {} characters.",
                                rule.field, MAX_LENGTH
                            ),
                        });
                    } else {
                        trimmed.insert(rule.field.to_string(), Value::String(value.to_string()));
                    }
                }
                Some(_) => violations.push(FieldViolation {
                    field: rule.field.to_string(),
                    message: format!("{} must be a string.", rule.field),
                }),
            }
        }

        if violations.is_empty() {
            Ok(trimmed)
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn messages_for<'a>(violations: &'a [FieldViolation], field: &str) -> Vec<&'a str> {
        violations
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.message.as_str())
            .collect()
    }

    #[test]
    fn test_valid_registration_body_is_trimmed() {
        let body = json!({
            "name": "  David ",
            "lastname": "Durand",
            "email": "david@example.com",
            "password": "secret123",
            "confirmPassword": "secret123",
            "avatar": "avatars/1.png"
        });

        let trimmed = CREATE_USER_SCHEMA.validate(&body).expect("Body is valid");

        assert_eq!(trimmed["name"], "David");
        assert_eq!(trimmed["lastname"], "Durand");
        // Unvalidated fields pass through untouched
        assert_eq!(trimmed["avatar"], "avatars/1.png");
    }

    #[test]
    fn test_missing_field_uses_custom_message() {
        let body = json!({
            "lastname": "Durand",
            "email": "david@example.com",
            "password": "secret123",
            "confirmPassword": "secret123"
        });

        let violations = CREATE_USER_SCHEMA.validate(&body).unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(
            messages_for(&violations, "name"),
            vec!["First name is required."]
        );
    }

    #[test]
    fn test_empty_string_equals_missing() {
        let missing = json!({"password": "secret123"});
        let empty = json!({"email": "", "password": "secret123"});
        let blank = json!({"email": "   ", "password": "secret123"});

        for body in [missing, empty, blank] {
            let violations = LOGIN_SCHEMA.validate(&body).unwrap_err();
            assert_eq!(
                messages_for(&violations, "email"),
                vec!["Email is required."]
            );
        }
    }

    #[test]
    fn test_every_violation_is_reported() {
        let body = json!({"email": "ab"});

        let violations = CREATE_USER_SCHEMA.validate(&body).unwrap_err();

        // 4 missing fields plus one too-short email
        assert_eq!(violations.len(), 5);
        assert_eq!(
            messages_for(&violations, "email"),
            vec!["email must be at least 3 characters."]
        );
        assert_eq!(
            messages_for(&violations, "confirmPassword"),
            vec!["Password confirmation is required."]
        );
    }

    #[test]
    fn test_length_bounds() {
        let long = "x".repeat(51);
        let body = json!({"email": "david@example.com", "password": long});

        let violations = LOGIN_SCHEMA.validate(&body).unwrap_err();
        assert_eq!(
            messages_for(&violations, "password"),
            vec!["password must be at most 50 characters."]
        );
    }

    #[test]
    fn test_non_string_field() {
        let body = json!({"email": 42, "password": "secret123"});

        let violations = LOGIN_SCHEMA.validate(&body).unwrap_err();
        assert_eq!(
            messages_for(&violations, "email"),
            vec!["email must be a string."]
        );
    }

    #[test]
    fn test_non_object_body_reports_all_fields() {
        let violations = LOGIN_SCHEMA.validate(&json!("not an object")).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
