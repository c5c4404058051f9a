//! Prompt construction for investigation question generation.
//!
//! The prompt lists every table's name and schema document and asks the
//! model for complex, multi-step security investigation questions that need
//! all of the tables together.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, SchemaError};

/// System message sent ahead of the user prompt.
pub const SYSTEM_PROMPT: &str = "You are a data analyst assistant.";

/// Number of questions requested by default.
pub const DEFAULT_QUESTION_COUNT: usize = 25;

/// User prompt template. Placeholders: `{table_count}`, `{tables}`,
/// `{question_count}`.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an expert security data analyst and query generator.
You are provided with {table_count} JSON files containing the schemas of {table_count} different tables.
The schemas contain the columns of each table, their data types, and a description of what each column represents.

{tables}
Using this information, generate {question_count} interesting, complex, high-quality and non-trivial security investigation questions that can be answered by combining and analyzing data from these tables.
Ensure that the questions are complex enough to require all {table_count} tables for a comprehensive answer. The questions should be multi-step.
Ensure that the questions make sense in the context of security investigations.

Your response should have the following format:
Question:
Purpose (what does the question aim to achieve):
Reasoning (how to answer the question using all {table_count} tables):

Example:
Find all events where potentially malicious script execution that may indicate attempts to download payloads, bypass security controls, or establish persistence are observed. Identify each device where this activity was observed and analyze if there is any other anomalous behavior with the device. Correlate with Device Compliance to identify the compliance state of the device. Generate an attack chain if a true privilege escalation attempt was identified. Provide a detailed report of the analysis.
"#;

/// A table schema document as loaded from disk.
///
/// The document is kept whole so hand-written descriptions survive into the
/// prompt; only the name and description are pulled out.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub table_name: Option<String>,
    pub table_description: Option<String>,
    pub schema: Value,
}

impl SchemaDocument {
    /// Wrap an already parsed schema document.
    pub fn from_value(schema: Value) -> Self {
        let field = |key: &str| schema.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            table_name: field("table_name"),
            table_description: field("table_description"),
            schema,
        }
    }

    /// Load a schema document from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SchemaError::NotFound {
                what: "Schema file",
                path: path.to_path_buf(),
            });
        }
        let schema: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        Ok(Self::from_value(schema))
    }

    /// Name shown in the prompt.
    pub fn display_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or("(unnamed)")
    }
}

/// System and user messages for one chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

/// Builder for the investigation question prompt.
#[derive(Debug, Clone)]
pub struct QuestionPrompt {
    tables: Vec<SchemaDocument>,
    question_count: usize,
}

impl QuestionPrompt {
    /// Create a prompt over the given tables.
    pub fn new(tables: Vec<SchemaDocument>) -> Result<Self> {
        if tables.is_empty() {
            return Err(SchemaError::InvalidInput(
                "at least one table schema is required".to_string(),
            ));
        }
        Ok(Self {
            tables,
            question_count: DEFAULT_QUESTION_COUNT,
        })
    }

    /// Set the number of questions to ask for.
    pub fn with_question_count(mut self, count: usize) -> Self {
        self.question_count = count;
        self
    }

    /// Render the chat messages.
    pub fn build(&self) -> Result<ChatPrompt> {
        let mut tables = String::new();
        for (idx, doc) in self.tables.iter().enumerate() {
            let schema = serde_json::to_string_pretty(&doc.schema)?;
            tables.push_str(&format!(
                "Table {}:\nName: {}\nSchema: {}\n\n",
                idx + 1,
                doc.display_name(),
                schema
            ));
        }

        let user = QUESTION_PROMPT_TEMPLATE
            .replace("{table_count}", &self.tables.len().to_string())
            .replace("{question_count}", &self.question_count.to_string())
            .replace("{tables}", &tables);

        Ok(ChatPrompt {
            system: SYSTEM_PROMPT.to_string(),
            user,
        })
    }
}
