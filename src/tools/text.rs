use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Error;
use crate::schema::Schema;
use crate::tools::decode_args;
use crate::traits::{ExecutionContext, Tool};

/// Text manipulation operations.
pub struct TextTool;

#[derive(Debug, Deserialize)]
struct TextArgs {
    text: String,
    operation: String,
}

#[async_trait]
impl Tool for TextTool {
    fn name(&self) -> &str {
        "text_processor"
    }

    fn description(&self) -> &str {
        "Process text with various operations like uppercase, lowercase, reverse, or word count"
    }

    fn parameters(&self) -> Schema {
        Schema::object()
            .with_property("text", Schema::string("The text to process"))
            .with_property(
                "operation",
                Schema::string("The operation to perform on the text").with_enum(&[
                    "uppercase",
                    "lowercase",
                    "reverse",
                    "word_count",
                    "char_count",
                ]),
            )
            .with_required(&["text", "operation"])
    }

    async fn execute(&self, _ctx: &ExecutionContext, args: &str) -> Result<String, Error> {
        let args: TextArgs = decode_args(self.name(), args)?;

        match args.operation.as_str() {
            "uppercase" => Ok(args.text.to_uppercase()),
            "lowercase" => Ok(args.text.to_lowercase()),
            "reverse" => Ok(args.text.chars().rev().collect()),
            "word_count" => Ok(args.text.split_whitespace().count().to_string()),
            "char_count" => Ok(args.text.chars().count().to_string()),
            other => Err(Error::InvalidArgument(format!(
                "unsupported operation: {other}"
            ))),
        }
    }
}
