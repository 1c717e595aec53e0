use thiserror::Error;

/// ToDo リソース全体で使用されるエラー型
///
/// 呼び出し元へメッセージをそのまま返してよいのは `Validation` のみ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// クライアント入力の不備（400 相当）
    #[error("Validation error: {0}")]
    Validation(String),

    /// 接続パラメータの欠落など、起動時に検出される設定不備
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// ストアへのクエリ・書き込みの失敗（500 相当）
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// クライアントに詳細を返してよいエラーかどうか
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type TodoResult<T> = Result<T, TodoError>;
