use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("AI interaction error: {0}")]
    AI(#[from] AIError),
    #[error("Schema validation error: {0}")]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Invalid listen address '{0}'")]
    InvalidListenAddr(String),
}

/// Failures of the outbound call to the model provider. None of these are
/// retried; they cross the orchestrator boundary unchanged.
#[derive(Debug, Error)]
pub enum AIError {
    #[error("AI API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Failed to parse AI API JSON response: {0}")]
    ResponseParseFailed(#[source] reqwest::Error),
    #[error("AI API responded with error {0}: {1}")]
    ApiResponseError(reqwest::StatusCode, String),
    #[error("AI API response contained no choices.")]
    NoChoiceInResponse,
    #[error("AI returned an empty message.")]
    EmptyMessage,
    #[error("AI network error: {0}")]
    NetworkError(String),
}

/// Failures of validating the model's raw text output against the analysis
/// response schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Model output is empty.")]
    EmptyOutput,
    #[error("Model output is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Model output does not match the analysis schema: {0}")]
    SchemaMismatch(#[source] serde_json::Error),
    #[error("final_score {0} is outside the 0-100 range")]
    ScoreOutOfRange(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_reqwest_error() -> reqwest::Error {
        // This is a reliable way to get a reqwest::Error:
        // try to connect to a non-routable address.
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            reqwest::Client::new()
                .get("http://0.0.0.0.0.0.1")
                .send()
                .await
                .unwrap_err()
        })
    }

    fn mock_json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
    }

    #[test]
    fn test_config_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err_file_read = ConfigError::FileRead("config.toml".to_string(), io_err);
        assert_eq!(
            format!("{}", err_file_read),
            "Failed to read file 'config.toml': file not found"
        );

        let toml_err = toml::from_str::<toml::Value>("invalid_toml").unwrap_err();
        let err_toml_parse = ConfigError::TomlParse("config.toml".to_string(), toml_err);
        assert!(
            format!("{}", err_toml_parse).starts_with("Failed to parse TOML from file 'config.toml': ")
        );

        let err_addr = ConfigError::InvalidListenAddr("not-an-addr".to_string());
        assert_eq!(format!("{}", err_addr), "Invalid listen address 'not-an-addr'");
    }

    #[test]
    fn test_ai_error_display() {
        let req_err = mock_reqwest_error();
        let err_request_failed = AIError::RequestFailed(req_err);
        assert!(format!("{}", err_request_failed).starts_with("AI API request failed: "));

        let err_api_response = AIError::ApiResponseError(
            reqwest::StatusCode::UNAUTHORIZED,
            "Missing bearer token".to_string(),
        );
        assert_eq!(
            format!("{}", err_api_response),
            "AI API responded with error 401 Unauthorized: Missing bearer token"
        );

        let err_no_choice = AIError::NoChoiceInResponse;
        assert_eq!(
            format!("{}", err_no_choice),
            "AI API response contained no choices."
        );

        let err_empty_message = AIError::EmptyMessage;
        assert_eq!(format!("{}", err_empty_message), "AI returned an empty message.");

        let err_network = AIError::NetworkError("connection refused".to_string());
        assert_eq!(
            format!("{}", err_network),
            "AI network error: connection refused"
        );
    }

    #[test]
    fn test_schema_error_display() {
        let err_empty = SchemaError::EmptyOutput;
        assert_eq!(format!("{}", err_empty), "Model output is empty.");

        let err_invalid = SchemaError::InvalidJson(mock_json_error());
        assert!(format!("{}", err_invalid).starts_with("Model output is not valid JSON: "));

        let err_mismatch = SchemaError::SchemaMismatch(mock_json_error());
        assert!(
            format!("{}", err_mismatch).starts_with("Model output does not match the analysis schema: ")
        );

        let err_score = SchemaError::ScoreOutOfRange(147);
        assert_eq!(
            format!("{}", err_score),
            "final_score 147 is outside the 0-100 range"
        );
    }

    #[test]
    fn test_app_error_display() {
        let config_err = ConfigError::InvalidListenAddr("x".to_string());
        let app_config_err = AppError::from(config_err);
        assert_eq!(
            format!("{}", app_config_err),
            "Configuration error: Invalid listen address 'x'"
        );

        let ai_err = AIError::EmptyMessage;
        let app_ai_err = AppError::from(ai_err);
        assert_eq!(
            format!("{}", app_ai_err),
            "AI interaction error: AI returned an empty message."
        );

        let schema_err = SchemaError::EmptyOutput;
        let app_schema_err = AppError::from(schema_err);
        assert_eq!(
            format!("{}", app_schema_err),
            "Schema validation error: Model output is empty."
        );
    }
}
