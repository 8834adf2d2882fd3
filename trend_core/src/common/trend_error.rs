use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for trend analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ErrCode {
    #[strum(serialize = "INVALID_INPUT")]
    InvalidInput,
    #[strum(serialize = "INSUFFICIENT_DATA")]
    InsufficientData,
    #[strum(serialize = "PARA_ERROR")]
    ParaError,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError,
}

impl ErrCode {
    pub fn is_input_err(&self) -> bool {
        matches!(self, ErrCode::InvalidInput | ErrCode::SrcDataFormatError)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{errcode}: {msg}")]
pub struct TrendError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl TrendError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message, ErrCode::InvalidInput)
    }

    pub fn insufficient_data(have: usize, need: usize) -> Self {
        Self::new(
            format!("need at least {} prices, got {}", need, have),
            ErrCode::InsufficientData,
        )
    }

    pub fn para(message: impl Into<String>) -> Self {
        Self::new(message, ErrCode::ParaError)
    }

    pub fn is_input_err(&self) -> bool {
        self.errcode.is_input_err()
    }

    pub fn is_insufficient_data(&self) -> bool {
        self.errcode == ErrCode::InsufficientData
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display() {
        let err = TrendError::insufficient_data(3, 50);
        assert_eq!(err.to_string(), "INSUFFICIENT_DATA: need at least 50 prices, got 3");
        assert!(err.is_insufficient_data());
        assert!(!err.is_input_err());
    }

    #[test]
    fn test_errcode_parse() {
        assert_eq!(ErrCode::from_str("PARA_ERROR").unwrap(), ErrCode::ParaError);
        assert!(ErrCode::InvalidInput.is_input_err());
        assert!(!ErrCode::ParaError.is_input_err());
    }
}
