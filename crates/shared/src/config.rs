use domain::TodoError;
use std::env;

const DEFAULT_TABLE: &str = "todos";
const DEFAULT_REGION: &str = "ap-northeast-1";
const DEFAULT_ENVIRONMENT: &str = "dev";
const DEFAULT_HTTP_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// ドキュメントストア（DynamoDB）のホスト
    pub store_host: String,
    /// ドキュメントストアのポート
    pub store_port: u16,
    pub dynamodb_table: String,
    pub environment: String,
    pub aws_region: String,
    /// HTTP サーバの待ち受けポート
    pub http_port: u16,
    /// 明示的な認証情報（未設定ならストア用のダミー値を使う）
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
}

impl Config {
    /// プロセス環境変数から設定を読み込む
    ///
    /// `DYNAMODB_HOST` と `DYNAMODB_PORT` は必須。欠けている場合は起動時エラー。
    pub fn from_env() -> Result<Self, TodoError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TodoError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| TodoError::configuration(format!("{key} must be set")))
        };
        // 空文字は未設定として扱う
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store_host = required("DYNAMODB_HOST")?;
        let store_port = parse_port("DYNAMODB_PORT", &required("DYNAMODB_PORT")?)?;
        let http_port = match optional("PORT") {
            Some(value) => parse_port("PORT", &value)?,
            None => DEFAULT_HTTP_PORT,
        };

        Ok(Config {
            store_host,
            store_port,
            dynamodb_table: optional("DYNAMODB_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            environment: optional("ENVIRONMENT")
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            aws_region: optional("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            http_port,
            aws_access_key_id: optional("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: optional("AWS_SECRET_ACCESS_KEY"),
        })
    }

    /// ストアのエンドポイント URL
    pub fn store_endpoint(&self) -> String {
        format!("http://{}:{}", self.store_host, self.store_port)
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16, TodoError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|e| TodoError::configuration(format!("{key} is not a valid port ({value}): {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_required_store_location_with_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[("DYNAMODB_HOST", "localhost"), ("DYNAMODB_PORT", "8000")]))
                .unwrap();

        assert_eq!(config.store_endpoint(), "http://localhost:8000");
        assert_eq!(config.dynamodb_table, "todos");
        assert_eq!(config.environment, "dev");
        assert_eq!(config.aws_region, "ap-northeast-1");
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.aws_access_key_id, None);
        assert_eq!(config.aws_secret_access_key, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DYNAMODB_HOST", "dynamodb-local"),
            ("DYNAMODB_PORT", "8001"),
            ("DYNAMODB_TABLE", "todos-test"),
            ("ENVIRONMENT", "local"),
            ("AWS_REGION", "us-east-1"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.store_endpoint(), "http://dynamodb-local:8001");
        assert_eq!(config.dynamodb_table, "todos-test");
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.environment, "local");
    }

    #[test]
    fn test_blank_optional_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DYNAMODB_HOST", "localhost"),
            ("DYNAMODB_PORT", "8000"),
            ("DYNAMODB_TABLE", ""),
            ("ENVIRONMENT", " "),
            ("AWS_REGION", ""),
            ("PORT", ""),
            ("AWS_ACCESS_KEY_ID", ""),
        ]))
        .unwrap();

        assert_eq!(config.dynamodb_table, "todos");
        assert_eq!(config.environment, "dev");
        assert_eq!(config.aws_region, "ap-northeast-1");
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.aws_access_key_id, None);
    }

    #[test]
    fn test_missing_host_is_configuration_error() {
        let err = Config::from_lookup(lookup_from(&[("DYNAMODB_PORT", "8000")])).unwrap_err();
        assert_eq!(err, TodoError::configuration("DYNAMODB_HOST must be set"));
    }

    #[test]
    fn test_missing_or_blank_port_is_configuration_error() {
        let err = Config::from_lookup(lookup_from(&[("DYNAMODB_HOST", "localhost")])).unwrap_err();
        assert!(matches!(err, TodoError::Configuration(_)));

        let err = Config::from_lookup(lookup_from(&[
            ("DYNAMODB_HOST", "localhost"),
            ("DYNAMODB_PORT", " "),
        ]))
        .unwrap_err();
        assert!(matches!(err, TodoError::Configuration(_)));
    }

    #[test]
    fn test_invalid_port_is_configuration_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("DYNAMODB_HOST", "localhost"),
            ("DYNAMODB_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, TodoError::Configuration(_)));
    }
}
