use std::fmt;

#[derive(Debug, Clone)]
pub enum SnaplinkError {
    Validation(String),
    NotFound(String),
    CodeAllocation(String),
    Serialization(String),
    FileOperation(String),
    DateParse(String),
}

impl SnaplinkError {
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::Validation(_) => "E001",
            SnaplinkError::NotFound(_) => "E002",
            SnaplinkError::CodeAllocation(_) => "E003",
            SnaplinkError::Serialization(_) => "E004",
            SnaplinkError::FileOperation(_) => "E005",
            SnaplinkError::DateParse(_) => "E006",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::Validation(_) => "Validation Error",
            SnaplinkError::NotFound(_) => "Resource Not Found",
            SnaplinkError::CodeAllocation(_) => "Code Allocation Error",
            SnaplinkError::Serialization(_) => "Serialization Error",
            SnaplinkError::FileOperation(_) => "File Operation Error",
            SnaplinkError::DateParse(_) => "Date Parse Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SnaplinkError::Validation(msg) => msg,
            SnaplinkError::NotFound(msg) => msg,
            SnaplinkError::CodeAllocation(msg) => msg,
            SnaplinkError::Serialization(msg) => msg,
            SnaplinkError::FileOperation(msg) => msg,
            SnaplinkError::DateParse(msg) => msg,
        }
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for SnaplinkError {}

// 便捷的构造函数
impl SnaplinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn code_allocation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::CodeAllocation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::FileOperation(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DateParse(msg.into())
    }
}

impl From<std::io::Error> for SnaplinkError {
    fn from(err: std::io::Error) -> Self {
        SnaplinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SnaplinkError {
    fn from(err: serde_json::Error) -> Self {
        SnaplinkError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SnaplinkError {
    fn from(err: chrono::ParseError) -> Self {
        SnaplinkError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;
