//! Investigation question generation from table schemas.

use std::fs;
use std::path::PathBuf;

use crate::config::DataConfig;
use crate::error::Result;
use crate::prompt::{ChatPrompt, QuestionPrompt, SchemaDocument};

/// File written into the configured output directory.
pub const QUESTIONS_FILE: &str = "generated_questions.txt";

/// Something that turns a chat prompt into model output text.
pub trait QuestionGenerator {
    fn generate(&self, prompt: &ChatPrompt) -> Result<String>;
}

impl<F> QuestionGenerator for F
where
    F: Fn(&ChatPrompt) -> Result<String>,
{
    fn generate(&self, prompt: &ChatPrompt) -> Result<String> {
        self(prompt)
    }
}

/// Load the three schemas named in `data`, ask `generator` for questions,
/// and write the reply to `{output_path}/generated_questions.txt`.
///
/// The output directory is created if needed. Returns the written path.
pub fn generate_questions<G>(data: &DataConfig, generator: &G) -> Result<PathBuf>
where
    G: QuestionGenerator + ?Sized,
{
    let tables = data
        .schema_paths()
        .into_iter()
        .map(SchemaDocument::load)
        .collect::<Result<Vec<_>>>()?;

    let prompt = QuestionPrompt::new(tables)?.build()?;
    let questions = generator.generate(&prompt)?;

    fs::create_dir_all(&data.output_path)?;
    let path = data.output_path.join(QUESTIONS_FILE);
    fs::write(&path, &questions)?;

    tracing::info!(path = %path.display(), chars = questions.len(), "questions saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use std::cell::RefCell;

    struct Recording {
        prompts: RefCell<Vec<ChatPrompt>>,
    }

    impl QuestionGenerator for Recording {
        fn generate(&self, prompt: &ChatPrompt) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.clone());
            Ok("Question: which devices?".to_string())
        }
    }

    fn data_config(dir: &tempfile::TempDir) -> DataConfig {
        let mut paths = Vec::new();
        for name in ["SignInLogs", "DeviceEvents", "DeviceCompliance"] {
            let path = dir.path().join(format!("{name}_metadata.json"));
            fs::write(
                &path,
                format!(r#"{{"table_name": "{name}", "table_description": "", "columns": []}}"#),
            )
            .unwrap();
            paths.push(path);
        }
        DataConfig {
            table1_schema_path: paths[0].clone(),
            table2_schema_path: paths[1].clone(),
            table3_schema_path: paths[2].clone(),
            output_path: dir.path().join("out").join("nested"),
        }
    }

    #[test]
    fn test_generate_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let data = data_config(&dir);
        let generator = Recording {
            prompts: RefCell::new(Vec::new()),
        };

        let path = generate_questions(&data, &generator).unwrap();
        assert_eq!(path, data.output_path.join(QUESTIONS_FILE));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Question: which devices?");

        let prompts = generator.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].user.contains("Name: DeviceCompliance"));
    }

    #[test]
    fn test_closure_generator() {
        let dir = tempfile::tempdir().unwrap();
        let data = data_config(&dir);
        let generator = |_: &ChatPrompt| -> Result<String> { Ok("ok".to_string()) };

        let path = generate_questions(&data, &generator).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "ok");
    }

    #[test]
    fn test_missing_schema_stops_before_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = data_config(&dir);
        data.table2_schema_path = dir.path().join("missing.json");
        let generator = |_: &ChatPrompt| -> Result<String> { panic!("should not be called") };

        let result = generate_questions(&data, &generator);
        assert!(matches!(result, Err(SchemaError::NotFound { .. })));
        assert!(!data.output_path.exists());
    }

    #[test]
    fn test_generator_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let data = data_config(&dir);
        let generator = |_: &ChatPrompt| -> Result<String> {
            Err(SchemaError::InvalidInput("down".to_string()))
        };

        assert!(generate_questions(&data, &generator).is_err());
        assert!(!data.output_path.join(QUESTIONS_FILE).exists());
    }
}
