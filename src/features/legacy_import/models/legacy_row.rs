use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::features::accounts::models::AccountRole;
use crate::features::legacy_import::dtos::ImportRowErrorDto;
use crate::features::model_profiles::dtos::model_profile_dto::validate_date_of_birth;
use crate::shared::validation::{INSTAGRAM_HANDLE_REGEX, PHONE_REGEX};

/// Line of `users.csv`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LegacyUserRow {
    #[validate(length(min = 1, max = 255, message = "sub is required"))]
    pub sub: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = validate_role))]
    pub role: String,
}

impl LegacyUserRow {
    pub fn account_role(&self) -> Option<AccountRole> {
        AccountRole::from_claim(&self.role)
    }

    /// Placeholder display name until the owner edits their profile
    pub fn default_display_name(&self) -> String {
        self.email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or(&self.email)
            .to_string()
    }
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if AccountRole::from_claim(role).is_none() {
        return Err(ValidationError::new("unknown_role")
            .with_message("Role must be admin, brand or model".into()));
    }
    Ok(())
}

/// Line of `models.csv`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LegacyModelRow {
    #[validate(length(min = 1, max = 255, message = "sub is required"))]
    pub sub: String,

    #[validate(length(min = 1, max = 200, message = "Full name must be 1-200 characters"))]
    pub full_name: String,

    #[validate(length(max = 50))]
    pub gender: Option<String>,

    #[validate(custom(function = validate_date_of_birth))]
    pub date_of_birth: Option<NaiveDate>,

    #[validate(range(min = 50, max = 260, message = "Height must be 50-260 cm"))]
    pub height_cm: Option<i32>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    #[validate(length(max = 2000, message = "Bio must not exceed 2000 characters"))]
    pub bio: Option<String>,

    #[validate(regex(path = *INSTAGRAM_HANDLE_REGEX, message = "Invalid Instagram handle"))]
    pub instagram_handle: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,
}

impl LegacyModelRow {
    /// Legacy exports kept the `@`; stored handles do not
    pub fn normalize(mut self) -> Self {
        self.instagram_handle = self
            .instagram_handle
            .map(|h| h.trim_start_matches('@').to_string());
        self
    }
}

/// Valid rows with their line numbers, and what went wrong with the rest
#[derive(Debug)]
pub struct ParsedRows<T> {
    pub rows: Vec<(usize, T)>,
    pub errors: Vec<ImportRowErrorDto>,
}

/// Parse a CSV file with a header line, validating each row on its own
pub fn parse_rows<T>(data: &[u8], file: &str, prepare: fn(T) -> T) -> ParsedRows<T>
where
    T: DeserializeOwned + Validate,
{
    let mut parsed = ParsedRows {
        rows: Vec::new(),
        errors: Vec::new(),
    };
    let error = |line: usize, message: String| ImportRowErrorDto {
        file: file.to_string(),
        line,
        message,
    };

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(data);
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            parsed.errors.push(error(1, format!("Unreadable header: {}", e)));
            return parsed;
        }
    };

    let mut record = StringRecord::new();
    loop {
        let line = reader.position().line() as usize;
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(e) => {
                let line = e.position().map(|p| p.line() as usize).unwrap_or(line);
                parsed.errors.push(error(line, e.to_string()));
                continue;
            }
        }

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(line);

        let row = match record.deserialize::<T>(Some(&headers)) {
            Ok(row) => prepare(row),
            Err(e) => {
                parsed.errors.push(error(line, e.to_string()));
                continue;
            }
        };

        match row.validate() {
            Ok(()) => parsed.rows.push((line, row)),
            Err(e) => parsed.errors.push(error(line, e.to_string())),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keep<T>(row: T) -> T {
        row
    }

    #[test]
    fn test_user_rows_are_validated_one_by_one() {
        let csv = "sub,email,role\n\
                   auth0|1,jane@example.com,model\n\
                   auth0|2,not-an-email,brand\n\
                   auth0|3,ops@example.com,Admin\n\
                   auth0|4,who@example.com,visitor\n";

        let parsed = parse_rows::<LegacyUserRow>(csv.as_bytes(), "users", keep);

        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].0, 2);
        assert_eq!(parsed.rows[1].1.account_role(), Some(AccountRole::Admin));

        let lines: Vec<usize> = parsed.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 5]);
        assert!(parsed.errors.iter().all(|e| e.file == "users"));
    }

    #[test]
    fn test_quoted_fields_keep_commas_and_newlines() {
        let csv = "sub,full_name,gender,date_of_birth,height_cm,location,bio,instagram_handle,phone\n\
                   m-1,\"Doe, Jane\",female,1998-04-12,172,\"Jakarta, ID\",\"Runway\nand print\",@jane.doe,+62 812-3456-7890\n\
                   m-2,Ana,,,,,,,\n";

        let parsed = parse_rows::<LegacyModelRow>(csv.as_bytes(), "models", LegacyModelRow::normalize);

        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let (_, jane) = &parsed.rows[0];
        assert_eq!(jane.full_name, "Doe, Jane");
        assert_eq!(jane.location.as_deref(), Some("Jakarta, ID"));
        assert_eq!(jane.bio.as_deref(), Some("Runway\nand print"));
        assert_eq!(jane.instagram_handle.as_deref(), Some("jane.doe"));

        let (line, ana) = &parsed.rows[1];
        assert_eq!(*line, 4);
        assert!(ana.gender.is_none());
        assert!(ana.height_cm.is_none());
    }

    #[test]
    fn test_bad_values_are_reported_not_fatal() {
        let csv = "sub,full_name,gender,date_of_birth,height_cm,location,bio,instagram_handle,phone\n\
                   m-1,Jane,,not-a-date,,,,,\n\
                   m-2,Ana,,,tall,,,,\n\
                   m-3,Mia,,,20,,,,\n\
                   m-4,Lea,,,170,,,,\n";

        let parsed = parse_rows::<LegacyModelRow>(csv.as_bytes(), "models", keep);

        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].1.sub, "m-4");
        assert_eq!(parsed.errors.len(), 3);
    }

    #[test]
    fn test_short_rows_are_reported() {
        let csv = "sub,email,role\nauth0|1,jane@example.com\nauth0|2,ana@example.com,model\n";

        let parsed = parse_rows::<LegacyUserRow>(csv.as_bytes(), "users", keep);

        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line, 2);
    }

    #[test]
    fn test_display_name_falls_back_to_email_local_part() {
        let row = LegacyUserRow {
            sub: "s".to_string(),
            email: "studio.one@example.com".to_string(),
            role: "brand".to_string(),
        };
        assert_eq!(row.default_display_name(), "studio.one");
    }
}
