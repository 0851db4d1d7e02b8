use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

/// Wire format of the `event_date` form field (HTML `datetime-local`).
pub const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Validated input for create/update. `id` and `created_at` are always
/// assigned by the store, never by the caller.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDateTime,
}

// Raw form payload. Fields are Option so a missing field surfaces as a
// validation error instead of a framework-level rejection.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EventForm {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title must not be empty")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "description is required"),
        length(min = 1, max = 255, message = "description must be 1 to 255 characters")
    )]
    pub description: Option<String>,
    #[validate(required(message = "event_date is required"))]
    pub event_date: Option<String>,
}

impl EventForm {
    pub fn into_new_event(self) -> Result<NewEvent, AppError> {
        self.validate()?;

        let raw_date = self.event_date.unwrap_or_default();
        let event_date = NaiveDateTime::parse_from_str(&raw_date, FORM_DATETIME_FORMAT)
            .map_err(|_| {
                AppError::validation(format!(
                    "event_date '{raw_date}' does not match {FORM_DATETIME_FORMAT}"
                ))
            })?;

        Ok(NewEvent {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            event_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn valid_form() -> EventForm {
        EventForm {
            title: Some("Standup".to_string()),
            description: Some("Daily sync".to_string()),
            event_date: Some("2024-03-05T09:00".to_string()),
        }
    }

    #[test]
    fn valid_form_parses() {
        let new_event = valid_form().into_new_event().unwrap();
        assert_eq!(new_event.title, "Standup");
        assert_eq!(new_event.description, "Daily sync");
        assert_eq!(
            new_event.event_date,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn missing_title_is_validation_error() {
        let form = EventForm {
            title: None,
            ..valid_form()
        };
        assert!(matches!(
            form.into_new_event(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn empty_title_is_validation_error() {
        let form = EventForm {
            title: Some(String::new()),
            ..valid_form()
        };
        assert!(matches!(
            form.into_new_event(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn oversized_description_is_validation_error() {
        let form = EventForm {
            description: Some("x".repeat(256)),
            ..valid_form()
        };
        assert!(matches!(
            form.into_new_event(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn malformed_date_is_validation_error() {
        let form = EventForm {
            event_date: Some("2024-03-05 09:00".to_string()),
            ..valid_form()
        };
        assert!(matches!(
            form.into_new_event(),
            Err(AppError::Validation(_))
        ));
    }
}
