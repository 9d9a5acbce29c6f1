//! HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            // General
            ErrorCode::ValidationFailed | ErrorCode::InvalidRequest | ErrorCode::RequiredField => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists => StatusCode::CONFLICT,

            // Auth
            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::TokenExpired
            | ErrorCode::TokenInvalid => StatusCode::UNAUTHORIZED,
            ErrorCode::AccountDisabled => StatusCode::FORBIDDEN,

            // Permission
            ErrorCode::PermissionDenied | ErrorCode::EmployeeIsProtected => StatusCode::FORBIDDEN,

            // Not-found family
            ErrorCode::ProductNotFound
            | ErrorCode::CategoryNotFound
            | ErrorCode::BrandNotFound
            | ErrorCode::UnitNotFound
            | ErrorCode::InventoryNotFound
            | ErrorCode::EmployeeNotFound
            | ErrorCode::RoleNotFound
            | ErrorCode::BranchNotFound => StatusCode::NOT_FOUND,

            // Conflict family
            ErrorCode::ProductBarcodeExists
            | ErrorCode::ProductCodeExists
            | ErrorCode::EmployeeUsernameExists => StatusCode::CONFLICT,

            // Business rule violations
            ErrorCode::LastActiveAdmin | ErrorCode::NoBranchAvailable => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // System
            ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::EmployeeNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::LastActiveAdmin.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
