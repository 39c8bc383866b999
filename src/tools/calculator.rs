use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Error;
use crate::schema::Schema;
use crate::tools::decode_args;
use crate::traits::{ExecutionContext, Tool};

/// Basic arithmetic over two numeric string arguments.
pub struct CalculatorTool;

#[derive(Debug, Deserialize)]
struct CalculatorArgs {
    operation: String,
    a: String,
    b: String,
}

impl CalculatorTool {
    fn parse_number(value: &str, label: &str) -> Result<f64, Error> {
        value
            .parse::<f64>()
            .map_err(|_| Error::InvalidArgument(format!("invalid number for {label}: {value}")))
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Perform basic mathematical operations (add, subtract, multiply, divide)"
    }

    fn parameters(&self) -> Schema {
        Schema::object()
            .with_property(
                "operation",
                Schema::string("The mathematical operation to perform")
                    .with_enum(&["add", "subtract", "multiply", "divide"]),
            )
            .with_property("a", Schema::string("First number"))
            .with_property("b", Schema::string("Second number"))
            .with_required(&["operation", "a", "b"])
    }

    async fn execute(&self, _ctx: &ExecutionContext, args: &str) -> Result<String, Error> {
        let args: CalculatorArgs = decode_args(self.name(), args)?;

        let a = Self::parse_number(&args.a, "a")?;
        let b = Self::parse_number(&args.b, "b")?;

        let result = match args.operation.as_str() {
            "add" => a + b,
            "subtract" => a - b,
            "multiply" => a * b,
            "divide" => {
                if b == 0.0 {
                    return Err(Error::InvalidArgument("division by zero".into()));
                }
                a / b
            }
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unsupported operation: {other}"
                )));
            }
        };

        Ok(format!("{result:.2}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(args: &str) -> Result<String, Error> {
        CalculatorTool
            .execute(&ExecutionContext::default(), args)
            .await
    }

    #[tokio::test]
    async fn adds_numeric_strings() {
        let out = run(r#"{"operation":"add","a":"45","b":"37"}"#).await.unwrap();
        assert_eq!(out, "82.00");
    }

    #[tokio::test]
    async fn divides_with_fractional_output() {
        let out = run(r#"{"operation":"divide","a":"7","b":"2"}"#).await.unwrap();
        assert_eq!(out, "3.50");
    }

    #[tokio::test]
    async fn division_by_zero_fails() {
        let err = run(r#"{"operation":"divide","a":"1","b":"0"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.contains("division by zero")));
    }

    #[tokio::test]
    async fn unknown_operation_fails() {
        let err = run(r#"{"operation":"modulo","a":"1","b":"2"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let err = run("not json").await.unwrap_err();
        assert!(matches!(err, Error::ArgumentDecode { tool, .. } if tool == "calculator"));
    }

    #[tokio::test]
    async fn non_numeric_input_fails() {
        let err = run(r#"{"operation":"add","a":"forty","b":"2"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(msg) if msg.contains("forty")));
    }
}
