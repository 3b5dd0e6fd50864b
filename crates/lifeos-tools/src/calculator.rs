// SPDX-FileCopyrightText: 2026 LifeOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic arithmetic evaluator.
//!
//! Input passes a character whitelist first, then a small recursive
//! descent parser. Bad input comes back as an error string the model can
//! read and correct, never as a hard failure.

use async_trait::async_trait;
use lifeos_core::{LifeosError, ToolSpec, UserProfile};

use crate::catalog::{required_str, Tool};

const ALLOWED_CHARS: &str = "0123456789+-*/().% ";

/// Evaluates arithmetic expressions with `+ - * / %` and parentheses.
pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "calculator".into(),
            description: "Useful for performing mathematical calculations. Input must be a \
                          string expression. Supports +, -, *, /, %, ()."
                .into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "expression": {
                        "type": "string",
                        "description": "Mathematical expression to evaluate (e.g., '200 * 0.15 + 30')."
                    }
                },
                "required": ["expression"]
            }),
        }
    }

    async fn invoke(
        &self,
        args: &serde_json::Value,
        _user: &UserProfile,
    ) -> Result<String, LifeosError> {
        let expression = required_str(args, "expression")?;

        if !expression.chars().all(|c| ALLOWED_CHARS.contains(c)) {
            return Ok(
                "Error: Caracteres inválidos. Solo se permite aritmética básica.".to_string(),
            );
        }

        Ok(match evaluate(expression) {
            Ok(value) => format_number(value),
            Err(e) => format!("Error calculando '{expression}': {e}"),
        })
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn evaluate(expression: &str) -> Result<f64, String> {
    let mut parser = Parser {
        chars: expression.chars().filter(|c| *c != ' ').collect(),
        pos: 0,
    };
    let value = parser.expr()?;
    if parser.pos != parser.chars.len() {
        return Err(format!("unexpected '{}'", parser.chars[parser.pos]));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                '+' => {
                    self.pos += 1;
                    value += self.term()?;
                }
                '-' => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                '*' => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                '/' => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    value /= divisor;
                }
                '%' => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    value %= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, String> {
        if self.peek() == Some('-') {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some('(') => {
                self.pos += 1;
                let value = self.expr()?;
                if self.peek() != Some(')') {
                    return Err("unbalanced parentheses".to_string());
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(format!("unexpected '{c}'")),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse()
            .map_err(|_| format!("bad number '{literal}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(expression: &str) -> String {
        CalculatorTool
            .invoke(
                &serde_json::json!({"expression": expression}),
                &UserProfile::guest("1"),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn evaluates_with_precedence_and_parens() {
        assert_eq!(run("200 * 0.15 + 30").await, "60");
        assert_eq!(run("2 + 3 * 4").await, "14");
        assert_eq!(run("(2 + 3) * 4").await, "20");
        assert_eq!(run("10 % 3").await, "1");
        assert_eq!(run("-5 + 2").await, "-3");
        assert_eq!(run("7 / 2").await, "3.5");
    }

    #[tokio::test]
    async fn rejects_characters_outside_the_whitelist() {
        let result = run("__import__('os')").await;
        assert!(result.starts_with("Error: Caracteres inválidos"), "got: {result}");
        let result = run("2 + x").await;
        assert!(result.starts_with("Error: Caracteres inválidos"), "got: {result}");
    }

    #[tokio::test]
    async fn reports_malformed_expressions_as_error_strings() {
        assert!(run("2 +").await.starts_with("Error calculando"));
        assert!(run("(2 + 3").await.starts_with("Error calculando"));
        assert!(run("5 / 0").await.contains("division by zero"));
    }

    #[tokio::test]
    async fn missing_argument_is_a_validation_error() {
        let err = CalculatorTool
            .invoke(&serde_json::json!({}), &UserProfile::guest("1"))
            .await
            .unwrap_err();
        assert!(matches!(err, LifeosError::Validation(_)));
    }
}
