use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::Unauthorized("test".into()), 401, "UNAUTHORIZED")]
#[case(AppError::Forbidden("test".into()), 403, "FORBIDDEN")]
#[case(AppError::NotFound("test".into()), 404, "NOT_FOUND")]
#[case(AppError::Validation("test".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::BusinessRule("test".into()), 400, "BUSINESS_RULE_VIOLATION")]
#[case(AppError::Conflict("test".into()), 409, "CONFLICT")]
#[case(AppError::Database("test".into()), 500, "DATABASE_ERROR")]
#[case(AppError::Internal("test".into()), 500, "INTERNAL_ERROR")]
fn test_app_error_status_and_code(
    #[case] error: AppError,
    #[case] status: u16,
    #[case] code: &str,
) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::Unauthorized("msg".into())),
        "Authentication failed: msg"
    );
    assert_eq!(
        format!("{}", AppError::Forbidden("msg".into())),
        "Access denied: msg"
    );
    assert_eq!(
        format!("{}", AppError::NotFound("msg".into())),
        "Not found: msg"
    );
    assert_eq!(
        format!("{}", AppError::BusinessRule("msg".into())),
        "Business rule violation: msg"
    );
    assert_eq!(
        format!("{}", AppError::Conflict("msg".into())),
        "Conflict: msg"
    );
}

#[test]
fn test_client_errors() {
    assert!(AppError::Forbidden(String::new()).is_client_error());
    assert!(AppError::BusinessRule(String::new()).is_client_error());
    assert!(!AppError::Database(String::new()).is_client_error());
    assert!(!AppError::Internal(String::new()).is_client_error());
}
