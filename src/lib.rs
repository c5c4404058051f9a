//! schema-scout: semantic schema inference for CSV log tables
//!
//! Classifies every column of a table into a semantic data type (boolean,
//! datetime, numerical, categorical, dynamic or string), records the
//! `strftime` format of datetime columns, and writes the result as a JSON
//! metadata document. Metadata documents for several tables can then be fed
//! to a chat model to draft cross-table investigation questions.
//!
//! # Quick Start
//!
//! ```no_run
//! use schema_scout::{SchemaInferrer, export};
//!
//! let inferrer = SchemaInferrer::new();
//! let metadata = inferrer.infer_path("SignInLogs.csv").unwrap();
//!
//! for column in &metadata.columns {
//!     println!("{}: {}", column.column_name, column.data_type);
//! }
//!
//! export::write_json(&metadata, export::default_output_path(&metadata.table_name)).unwrap();
//! ```
//!
//! # In-memory tables
//!
//! ```
//! use schema_scout::{Cell, Column, SchemaInferrer, SemanticType, Table};
//!
//! let table = Table::from_columns(vec![
//!     Column::new("Success", vec![Cell::Bool(true), Cell::Bool(false)]),
//!     Column::new("Properties", [r#"{"a": 1}"#, r#"[1, 2]"#]),
//! ])
//! .unwrap();
//!
//! let mut inferrer = SchemaInferrer::new();
//! inferrer.parallel(true);
//! let metadata = inferrer.infer(&table, "AuditLogs", "Directory audit events");
//!
//! assert_eq!(metadata.columns[0].data_type, SemanticType::Boolean);
//! assert_eq!(metadata.columns[1].data_type, SemanticType::Dynamic);
//! ```
//!
//! # Detection order
//!
//! Rules are evaluated in order and the first match wins:
//! 1. boolean: more than 95% of present values are boolean tokens
//! 2. datetime: every present value parses as a calendar date or timestamp
//! 3. numeric columns: categorical when the distinct count is at most
//!    `min(20, rows / 10)`, numerical otherwise
//! 4. categorical text: few distinct values with short average length
//! 5. dynamic: every present value is a JSON document
//! 6. string otherwise

mod config;
pub mod detect;
mod encoding;
mod error;
pub mod export;
mod inferrer;
#[cfg(feature = "http")]
mod llm;
mod metadata;
mod prompt;
mod questions;
mod reader;
mod sample;
mod sdtype;
mod table;

pub use config::{DEFAULT_DEPLOYMENT, DataConfig, GenerationParams, ModelConfig};
pub use error::{Result, SchemaError};
pub use inferrer::{SchemaInferrer, table_name_for};
pub use metadata::{ColumnMetadata, TableMetadata};
pub use prompt::{
    ChatPrompt, DEFAULT_QUESTION_COUNT, QuestionPrompt, SYSTEM_PROMPT, SchemaDocument,
};
pub use questions::{QUESTIONS_FILE, QuestionGenerator, generate_questions};
pub use reader::{CsvReader, DEFAULT_NA_VALUES};
pub use sample::{DatePreference, FormatSampling};
pub use sdtype::SemanticType;
pub use table::{Cell, Column, Table};

#[cfg(feature = "http")]
pub use llm::{AzureOpenAiClient, HttpError};

// Re-export for advanced usage
pub use encoding::{decode_text, is_utf8};
