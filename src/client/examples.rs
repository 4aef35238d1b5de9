//! Scripted example calls, run against a live session.

use std::io::Write;
use std::time::Duration;

use serde_json::{json, Value};

use super::render;
use super::session::ToolSession;
use crate::error::Result;

/// One canned tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleCall {
    pub name: &'static str,
    pub tool: &'static str,
    pub arguments: Value,
    pub description: &'static str,
}

/// The demo walk-through, in order. The last call fails on purpose.
pub fn example_calls() -> Vec<ExampleCall> {
    let call = |name, tool, arguments, description| ExampleCall {
        name,
        tool,
        arguments,
        description,
    };
    vec![
        call(
            "Get User Information",
            "get_user",
            json!({ "userId": "1" }),
            "Fetch details for user with ID 1",
        ),
        call(
            "List All Products",
            "list_products",
            json!({}),
            "Get all available products",
        ),
        call(
            "List Electronics",
            "list_products",
            json!({ "category": "electronics", "inStock": true }),
            "Get only electronics that are in stock",
        ),
        call(
            "List Products in Price Range",
            "list_products",
            json!({ "minPrice": 50, "maxPrice": 500 }),
            "Get products between $50 and $500",
        ),
        call(
            "Create Order",
            "create_order",
            json!({ "userId": "1", "productId": 2, "quantity": 3 }),
            "Order 3 wireless mice for user 1",
        ),
        call(
            "Check Health",
            "check_health",
            json!({}),
            "Verify microservice is running",
        ),
        call(
            "Get Non-existent User (Error Case)",
            "get_user",
            json!({ "userId": "999" }),
            "Try to get a user that doesn't exist",
        ),
    ]
}

/// Runs [`example_calls`] one after another.
#[derive(Debug, Clone)]
pub struct ExampleRunner {
    pause: Duration,
}

impl Default for ExampleRunner {
    fn default() -> Self {
        Self {
            pause: Duration::from_millis(500),
        }
    }
}

impl ExampleRunner {
    /// Delay between consecutive calls.
    pub fn with_pause(pause: Duration) -> Self {
        Self { pause }
    }

    /// Call every example, printing each like the interactive client does.
    /// Returns how many calls came back with `is_error` or failed outright.
    /// A connection-level failure stops the run and is returned as the error.
    pub async fn run(&self, session: &mut dyn ToolSession, out: &mut dyn Write) -> Result<usize> {
        render::banner(out, "🧪 Running Example Calls")?;

        let mut failures = 0;
        for example in example_calls() {
            writeln!(out, "▶ {}", example.name)?;
            render::call_header(out, example.tool, example.description, &example.arguments)?;
            let outcome = session.call_tool(example.tool, example.arguments).await;
            if !matches!(&outcome, Ok(result) if !result.is_error) {
                failures += 1;
            }
            render::call_outcome(out, &outcome)?;
            if let Err(err) = outcome {
                if err.is_connection_error() {
                    tracing::warn!(example = example.name, error = %err, "session lost, stopping examples");
                    return Err(err);
                }
            }

            if !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
        }
        Ok(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    #[test]
    fn examples_cover_every_tool() {
        let calls = example_calls();
        assert_eq!(calls.len(), 7);
        for kind in [
            ToolKind::GetUser,
            ToolKind::ListProducts,
            ToolKind::CreateOrder,
            ToolKind::CheckHealth,
        ] {
            assert!(calls.iter().any(|c| c.tool == kind.name()));
        }
        assert_eq!(calls.last().unwrap().arguments, json!({ "userId": "999" }));
    }
}
