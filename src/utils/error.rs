use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Bill not found: {id}")]
    NotFound { id: String },

    #[error("Bill already exists: {id}")]
    AlreadyExists { id: String },

    #[error("Bill store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Verification request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Network,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// CLI 結束碼，每個等級都是非零
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SplitError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SplitError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        SplitError::NotFound { id: id.into() }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SplitError::InvalidInput { .. } => ErrorCategory::Input,
            SplitError::NotFound { .. }
            | SplitError::AlreadyExists { .. }
            | SplitError::StoreUnavailable { .. } => ErrorCategory::Storage,
            SplitError::ApiError(_) => ErrorCategory::Network,
            SplitError::ConfigValidationError { .. }
            | SplitError::InvalidConfigValueError { .. }
            | SplitError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SplitError::CsvError(_) | SplitError::IoError(_) | SplitError::SerializationError(_) => {
                ErrorCategory::Data
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤可重試
            SplitError::ApiError(_) => ErrorSeverity::Medium,
            SplitError::StoreUnavailable { .. } | SplitError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SplitError::InvalidInput { message } => format!("輸入資料無效: {}", message),
            SplitError::NotFound { id } => format!("找不到帳單 {}", id),
            SplitError::AlreadyExists { id } => format!("帳單 {} 已存在", id),
            SplitError::StoreUnavailable { .. } => "帳單儲存暫時無法使用".to_string(),
            SplitError::ApiError(_) => "無法連線到收據驗證服務".to_string(),
            SplitError::MissingConfigError { field } => format!("缺少必要設定: {}", field),
            SplitError::ConfigValidationError { .. } | SplitError::InvalidConfigValueError { .. } => {
                format!("設定錯誤: {}", self)
            }
            SplitError::CsvError(_) | SplitError::SerializationError(_) => {
                format!("資料格式錯誤: {}", self)
            }
            SplitError::IoError(e) => format!("檔案存取失敗: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the bill title, items, prices and participants",
            ErrorCategory::Storage => "Verify the bill id or recreate the bill",
            ErrorCategory::Network => "Check network connectivity and retry later",
            ErrorCategory::Configuration => "Review the TOML configuration file and environment variables",
            ErrorCategory::Data => "Make sure the input file exists and contains valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
