use crate::core::sequence::FailurePolicy;
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub jobs: Vec<JobConfig>,
    pub monitoring: Option<MonitoringConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

/// 一組輸入/輸出檔案配對
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_job_failure: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        // 驗證管道名稱
        crate::utils::validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;

        // 至少要有一組 job
        if self.jobs.is_empty() {
            return Err(EtlError::MissingConfigError {
                field: "jobs".to_string(),
            });
        }

        // 驗證每組 job 的輸入輸出路徑
        for (index, job) in self.jobs.iter().enumerate() {
            crate::utils::validation::validate_path(&format!("jobs[{}].input", index), &job.input)?;
            crate::utils::validation::validate_path(
                &format!("jobs[{}].output", index),
                &job.output,
            )?;
        }

        // 驗證失敗策略
        if let Some(policy) = self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_job_failure.as_deref())
        {
            if FailurePolicy::from_config(policy).is_none() {
                return Err(EtlError::InvalidConfigValueError {
                    field: "error_handling.on_job_failure".to_string(),
                    value: policy.to_string(),
                    reason: "Unsupported policy. Valid policies: halt, continue".to_string(),
                });
            }
        }

        Ok(())
    }

    /// 取得 job 失敗時的處理策略
    pub fn failure_policy(&self) -> FailurePolicy {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_job_failure.as_deref())
            .and_then(FailurePolicy::from_config)
            .unwrap_or_default()
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for JobConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[pipeline]
name = "unique-integers"
description = "Deduplicate and sort bounded integers"
version = "1.0.0"

[[jobs]]
input = "sample_data/sample_01.txt"
output = "sample_results/sample_01_output.txt"

[[jobs]]
input = "sample_data/sample_04.txt"
output = "sample_results/sample_04_output.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "unique-integers");
        assert_eq!(config.jobs.len(), 2);
        assert_eq!(config.jobs[0].input, "sample_data/sample_01.txt");
        assert_eq!(config.jobs[1].output, "sample_results/sample_04_output.txt");
        assert_eq!(config.failure_policy(), FailurePolicy::Halt);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_DATA_DIR", "/tmp/etl-data");

        let toml_content = r#"
[pipeline]
name = "test"
description = "test"
version = "1.0"

[[jobs]]
input = "${TEST_DATA_DIR}/in.txt"
output = "${TEST_DATA_DIR}/out.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.jobs[0].input, "/tmp/etl-data/in.txt");

        std::env::remove_var("TEST_DATA_DIR");
    }

    #[test]
    fn test_missing_env_var_left_as_is() {
        let toml_content = r#"
[pipeline]
name = "test"
description = "test"
version = "1.0"

[[jobs]]
input = "${NO_SUCH_ETL_VAR}/in.txt"
output = "out.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.jobs[0].input, "${NO_SUCH_ETL_VAR}/in.txt");
    }

    #[test]
    fn test_validation_rejects_empty_jobs() {
        let toml_content = r#"
jobs = []

[pipeline]
name = "test"
description = "test"
version = "1.0"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EtlError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_unknown_policy() {
        let toml_content = r#"
[pipeline]
name = "test"
description = "test"
version = "1.0"

[[jobs]]
input = "in.txt"
output = "out.txt"

[error_handling]
on_job_failure = "retry"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(EtlError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_continue_policy_from_config() {
        let toml_content = r#"
[pipeline]
name = "test"
description = "test"
version = "1.0"

[[jobs]]
input = "in.txt"
output = "out.txt"

[error_handling]
on_job_failure = "continue"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.failure_policy(), FailurePolicy::Continue);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"
description = "File test"
version = "1.0"

[[jobs]]
input = "in.txt"
output = "out.txt"

[monitoring]
enabled = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
        assert!(config.monitoring_enabled());
    }
}
