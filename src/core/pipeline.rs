use crate::core::{ConfigProvider, IntegerSet, Pipeline, Storage, TransformResult};
use crate::utils::error::Result;

pub struct UniqueIntPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> UniqueIntPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for UniqueIntPipeline<S, C> {
    fn extract(&self) -> Result<Vec<String>> {
        tracing::debug!("Reading input file: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path())?;

        // 非 UTF-8 位元組採寬鬆解碼；受影響的 token 之後會解析失敗而被略過
        let lines: Vec<String> = String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect();

        tracing::debug!("Read {} lines", lines.len());
        Ok(lines)
    }

    fn transform(&self, lines: Vec<String>) -> Result<TransformResult> {
        // 逐行分類並過濾，集合負責去重與範圍檢查
        let set = IntegerSet::from_lines(lines.iter().map(String::as_str));
        let values = set.sorted_values();
        tracing::debug!("Collected {} unique in-range integers", values.len());

        // 每個值一行、十進位、結尾換行；空集合產生空輸出
        let output_text: String = values.iter().map(|v| format!("{}\n", v)).collect();

        Ok(TransformResult {
            values,
            output_text,
        })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        tracing::debug!(
            "Writing {} values ({} bytes) to: {}",
            result.values.len(),
            result.output_text.len(),
            output_path
        );
        self.storage
            .write_file(&output_path, result.output_text.as_bytes())?;

        Ok(output_path)
    }
}
