use crate::domain::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Connection form fields as submitted by the UI. Everything arrives as a
/// string; the port is parsed at connect time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectParams {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ConnectParams {
    /// Reject empty fields and unparseable ports before touching the driver.
    pub fn validate(&self) -> Result<u16> {
        if self.host.trim().is_empty() {
            return Err(AppError::ValidationError("Host is required".to_string()));
        }
        if self.port.trim().is_empty() {
            return Err(AppError::ValidationError("Port is required".to_string()));
        }
        if self.user.trim().is_empty() {
            return Err(AppError::ValidationError("User is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::ValidationError("Password is required".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Database name is required".to_string(),
            ));
        }

        self.port.trim().parse::<u16>().map_err(|_| {
            AppError::ValidationError(format!("Invalid port number: '{}'", self.port))
        })
    }
}

/// Outcome of a Connect action, rendered as the success/failure indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectResult {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ConnectParams {
        ConnectParams {
            host: "localhost".to_string(),
            port: "3306".to_string(),
            user: "admin".to_string(),
            password: "admin".to_string(),
            database: "Chinook".to_string(),
        }
    }

    #[test]
    fn test_valid_params() {
        assert_eq!(params().validate().unwrap(), 3306);
    }

    #[test]
    fn test_empty_host_rejected() {
        let mut p = params();
        p.host = "  ".to_string();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("Host is required"));
    }

    #[test]
    fn test_empty_database_rejected() {
        let mut p = params();
        p.database = String::new();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("Database name is required"));
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut p = params();
        p.port = "not-a-port".to_string();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid port number"));
    }

    #[test]
    fn test_port_with_whitespace_parses() {
        let mut p = params();
        p.port = " 3307 ".to_string();
        assert_eq!(p.validate().unwrap(), 3307);
    }
}
