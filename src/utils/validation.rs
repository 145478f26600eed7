use validator::Validate;

use crate::interceptors::AppError;

/// Run `validator` rules and flatten failures into one `field: message` list
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    request.validate().map_err(|e| {
        let mut errors: Vec<String> = e
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|err| {
                        err.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, messages.join(", "))
            })
            .collect();

        // field_errors() is a HashMap
        errors.sort();

        AppError::ValidationError(errors.join("; "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CreateUserRequest, LoginRequest};

    #[test]
    fn valid_request_passes() {
        let request = LoginRequest {
            email: "ana@example.com".to_string(),
            password: "pw".to_string(),
        };

        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn failures_are_listed_per_field() {
        let request = CreateUserRequest {
            name: String::new(),
            email: "nope".to_string(),
            password: "123".to_string(),
            bio: None,
            age: Some(0),
        };

        match validate_request(&request) {
            Err(AppError::ValidationError(msg)) => {
                assert_eq!(
                    msg,
                    "age: Age must be between 1 and 150; \
                     email: Invalid email format; \
                     name: Name must be between 1 and 100 characters; \
                     password: Password must be at least 6 characters"
                );
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }
}
