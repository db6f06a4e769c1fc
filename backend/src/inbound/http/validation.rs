//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose `details` name the
//! offending field and a stable machine-readable code.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    CalendarDay, DayBoundary, Error, HabitValidationError, MoodValidationError,
    PreferencesValidationError, ShareValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    InvalidRange,
    InvalidField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidRange => "invalid_range",
            ErrorCode::InvalidField => "invalid_field",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a YYYY-MM-DD date"))
        .with_value(ErrorCode::InvalidDate, value)
}

/// Parse a query date given either as `YYYY-MM-DD` or as an RFC 3339
/// instant, which is normalised into the service reference frame.
pub(crate) fn parse_query_day(
    value: &str,
    field: FieldName,
    boundary: &DayBoundary,
) -> Result<CalendarDay, Error> {
    value
        .parse::<CalendarDay>()
        .or_else(|_| boundary.normalize(value))
        .map_err(|_| invalid_date_error(field, value))
}

pub(crate) fn parse_optional_query_day(
    value: Option<&str>,
    field: FieldName,
    boundary: &DayBoundary,
) -> Result<Option<CalendarDay>, Error> {
    value
        .map(|raw| parse_query_day(raw, field, boundary))
        .transpose()
}

pub(crate) fn inverted_range_error(from: CalendarDay, to: CalendarDay) -> Error {
    Error::invalid_request("from must not be after to").with_details(json!({
        "field": "from",
        "from": from.to_string(),
        "to": to.to_string(),
        "code": ErrorCode::InvalidRange.as_str(),
    }))
}

fn invalid_field_error(field: FieldName, message: String) -> Error {
    ValidationError::new(field, message).with_code(ErrorCode::InvalidField)
}

/// Map a habit validation failure onto the field that caused it.
pub(crate) fn habit_validation_error(error: HabitValidationError) -> Error {
    let field = match &error {
        HabitValidationError::EmptyTitle | HabitValidationError::TitleTooLong { .. } => "title",
        HabitValidationError::DescriptionTooLong { .. } => "description",
        HabitValidationError::UnknownFrequency { .. } => "frequency",
        HabitValidationError::InvalidReminderTime { .. }
        | HabitValidationError::ReminderWithoutTime => "reminder.time",
        HabitValidationError::UnknownChannel { .. }
        | HabitValidationError::ReminderWithoutChannels => "reminder.channels",
        HabitValidationError::InvalidTimezone { .. } => "reminder.timezone",
    };
    invalid_field_error(FieldName::new(field), error.to_string())
}

/// Map a mood validation failure onto the field that caused it.
pub(crate) fn mood_validation_error(error: MoodValidationError) -> Error {
    let field = match &error {
        MoodValidationError::EmptyEmoji | MoodValidationError::EmojiTooLong { .. } => "emoji",
        MoodValidationError::NoteTooLong { .. } => "note",
        MoodValidationError::UnknownRange { .. } => "range",
    };
    invalid_field_error(FieldName::new(field), error.to_string())
}

pub(crate) fn preferences_validation_error(error: PreferencesValidationError) -> Error {
    let field = match &error {
        PreferencesValidationError::UnknownTheme { .. } => "theme",
    };
    invalid_field_error(FieldName::new(field), error.to_string())
}

pub(crate) fn share_validation_error(error: ShareValidationError) -> Error {
    let field = match &error {
        ShareValidationError::EmptyImage
        | ShareValidationError::ImageTooLong { .. }
        | ShareValidationError::UnsupportedImage => "imageUrl",
    };
    invalid_field_error(FieldName::new(field), error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FROM: FieldName = FieldName::new("from");

    #[rstest]
    #[case("2026-03-04", "2026-03-04")]
    #[case("2026-03-04T23:30:00Z", "2026-03-04")]
    fn query_days_accept_dates_and_instants(#[case] raw: &str, #[case] expected: &str) {
        let day = parse_query_day(raw, FROM, &DayBoundary::utc()).expect("valid day");
        assert_eq!(day.to_string(), expected);
    }

    #[rstest]
    fn instants_are_normalised_into_the_reference_frame() {
        let boundary = DayBoundary::from_offset_minutes(60).expect("offset");
        let day = parse_query_day("2026-03-04T23:30:00Z", FROM, &boundary).expect("valid");
        assert_eq!(day.to_string(), "2026-03-05");
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2026-13-01")]
    #[case("")]
    fn malformed_query_days_are_rejected(#[case] raw: &str) {
        let error = parse_query_day(raw, FROM, &DayBoundary::utc()).expect_err("invalid");
        let details = error.details().expect("details");
        assert_eq!(details["field"], "from");
        assert_eq!(details["code"], "invalid_date");
    }

    #[rstest]
    fn invalid_uuid_reports_value() {
        let error = parse_uuid("nope", FieldName::new("id")).expect_err("invalid");
        let details = error.details().expect("details");
        assert_eq!(details["value"], "nope");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    #[case(HabitValidationError::EmptyTitle, "title")]
    #[case(HabitValidationError::ReminderWithoutChannels, "reminder.channels")]
    #[case(HabitValidationError::InvalidTimezone { max: 64 }, "reminder.timezone")]
    fn habit_errors_name_their_field(#[case] error: HabitValidationError, #[case] field: &str) {
        let mapped = habit_validation_error(error);
        assert_eq!(mapped.details().expect("details")["field"], field);
    }
}
