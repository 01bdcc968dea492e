use crate::duration::parse_duration;
use std::sync::Arc;
use tfplug::schema::{Validator, ValidatorRequest, ValidatorResponse};
use tfplug::types::{Diagnostic, Dynamic};

pub const INVALID_TIME_DURATION_SUMMARY: &str = "Invalid Attribute Value Time Duration";

/// Validates that a string attribute's value is parseable as a duration.
/// Null (unconfigured) and unknown (known after apply) values are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeDuration;

impl Validator for TimeDuration {
    fn description(&self) -> String {
        r#"must be a string containing a sequence of decimal numbers, each with optional fraction and a unit suffix, such as "300ms", "-1.5h" or "2h45m". Valid time units are "ns", "us" (or "µs"), "ms", "s", "m", "h"."#
            .to_string()
    }

    fn validate(&self, request: ValidatorRequest) -> ValidatorResponse {
        let mut response = ValidatorResponse::default();

        match &request.config_value.value {
            Dynamic::Null | Dynamic::Unknown => {}
            Dynamic::String(s) => {
                if let Err(err) = parse_duration(s) {
                    tracing::trace!(path = %request.path, error = %err, "rejecting timeout value");
                    response.diagnostics.push(Diagnostic::attribute_error(
                        request.path,
                        INVALID_TIME_DURATION_SUMMARY,
                        format!("{:?} {}", s, self.description()),
                    ));
                }
            }
            other => {
                response.diagnostics.push(Diagnostic::attribute_error(
                    request.path,
                    INVALID_TIME_DURATION_SUMMARY,
                    format!("expected a string, got {}", other.type_name()),
                ));
            }
        }

        response
    }
}

/// Validator attached to every timeout attribute
pub fn time_duration() -> Arc<dyn Validator> {
    Arc::new(TimeDuration)
}
