use crate::errors::{TodoError, TodoResult};
use serde_json::Value;

/// タイトルの最小文字数
pub const TITLE_MIN_CHARS: usize = 1;
/// タイトルの最大文字数
pub const TITLE_MAX_CHARS: usize = 300;

/// 検証済みの ToDo 作成入力
///
/// `title` 以外のフィールドは読み捨てる（拒否も保存もしない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoInput {
    title: String,
}

impl TodoInput {
    /// タイトルを検証して入力を作成
    pub fn new(title: impl Into<String>) -> TodoResult<Self> {
        let title = title.into();
        let chars = title.chars().count();

        if chars < TITLE_MIN_CHARS {
            return Err(TodoError::validation("title must not be empty"));
        }
        if chars > TITLE_MAX_CHARS {
            return Err(TodoError::validation(format!(
                "title must be at most {TITLE_MAX_CHARS} characters (got {chars})"
            )));
        }

        Ok(Self { title })
    }

    /// 生の JSON ペイロードから入力を取り出して検証
    pub fn from_payload(payload: &Value) -> TodoResult<Self> {
        let object = payload
            .as_object()
            .ok_or_else(|| TodoError::validation("request body must be a JSON object"))?;

        match object.get("title") {
            None | Some(Value::Null) => Err(TodoError::validation("title is required")),
            Some(Value::String(title)) => Self::new(title.as_str()),
            Some(_) => Err(TodoError::validation("title must be a string")),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn into_title(self) -> String {
        self.title
    }
}
