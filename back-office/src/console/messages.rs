//! Error translation for the console
//!
//! Maps an [`AppError`] to the line shown to the operator. Input and
//! business errors keep their specific message; storage failures are
//! replaced by a hint, since the raw driver text is only useful in the logs.

use shared::error::{AppError, ErrorCategory, ErrorCode};

pub fn user_message(err: &AppError) -> String {
    match err.code {
        ErrorCode::InvalidCredentials => "Login failed: invalid username or password.".into(),
        ErrorCode::AdminRequired => format!("Access denied: {}.", err.message),
        ErrorCode::DatabaseUnavailable => {
            "Cannot reach the database. Check DATABASE_URL and that the server is running.".into()
        }
        ErrorCode::TransactionFailed => {
            format!("Nothing was saved. {}", err.message)
        }
        ErrorCode::ConfigError => format!("Configuration error: {}", err.message),
        code if is_input_error(code) => format!("Invalid input: {}", err.message),
        code => match code.category() {
            ErrorCategory::System => {
                "Unexpected database error. See the log for details.".into()
            }
            _ => format!("Error: {}", err.message),
        },
    }
}

fn is_input_error(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::ValidationFailed
            | ErrorCode::InvalidFormat
            | ErrorCode::RequiredField
            | ErrorCode::ValueOutOfRange
            | ErrorCode::InvalidRequest
            | ErrorCode::MenuItemInvalidPrice
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_keep_their_message() {
        let err = AppError::validation("price must not be negative");
        assert_eq!(
            user_message(&err),
            "Invalid input: price must not be negative"
        );
    }

    #[test]
    fn test_bad_price_is_input_error() {
        let err = AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            "price must not be negative (got -3)",
        );
        assert_eq!(
            user_message(&err),
            "Invalid input: price must not be negative (got -3)"
        );
    }

    #[test]
    fn test_domain_errors() {
        let err = AppError::with_message(ErrorCode::TableNumberExists, "Table number 4 already exists");
        assert_eq!(user_message(&err), "Error: Table number 4 already exists");

        let err = AppError::invalid_credentials();
        assert!(user_message(&err).starts_with("Login failed"));
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err = AppError::database("syntax error near SELEC");
        let msg = user_message(&err);
        assert!(!msg.contains("SELEC"));

        let err = AppError::database_unavailable("Connection refused (os error 111)");
        assert!(user_message(&err).contains("DATABASE_URL"));
    }

    #[test]
    fn test_rollback_is_explained() {
        let err = AppError::transaction_failed("Changes were rolled back: duplicate subgroup");
        assert_eq!(
            user_message(&err),
            "Nothing was saved. Changes were rolled back: duplicate subgroup"
        );
    }
}
