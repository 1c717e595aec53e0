use crate::input::TodoInput;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ToDo の識別子（ULID 文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 永続化済みの ToDo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// 挿入前の ToDo（ID はストア側で採番される）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl NewTodo {
    /// 検証済み入力から作成し、現在時刻（UTC）を付与する
    pub fn stamp(input: TodoInput) -> Self {
        Self::with_created_at(input, Utc::now())
    }

    /// 作成日時はマイクロ秒に切り詰める（保存値と返却値を一致させるため）
    pub fn with_created_at(input: TodoInput, created_at: DateTime<Utc>) -> Self {
        Self {
            title: input.into_title(),
            created_at: created_at.trunc_subsecs(6),
        }
    }

    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            created_at: self.created_at,
        }
    }
}
