//! One handler per tool, each a single request to the backing service.

use reqwest::{RequestBuilder, Url};
use serde_json::{json, Value};

use super::ToolBridge;
use crate::error::{BridgeError, Result};
use crate::tools::ToolArguments;

impl ToolBridge {
    pub(super) async fn get_user(&self, args: &ToolArguments) -> Result<String> {
        let user_id = args.get_str("userId")?;
        let url = self.endpoint(&["api", "users", user_id]);
        let user = self.fetch_json(self.http.get(url)).await?;
        pretty(&user)
    }

    pub(super) async fn list_products(&self, args: &ToolArguments) -> Result<String> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category) = args.get_str_opt("category").filter(|c| !c.is_empty()) {
            query.push(("category", category.to_string()));
        }
        for key in ["minPrice", "maxPrice", "inStock"] {
            if let Some(value) = args.get(key).and_then(query_value) {
                query.push((key, value));
            }
        }

        let mut request = self.http.get(self.endpoint(&["api", "products"]));
        if !query.is_empty() {
            request = request.query(&query);
        }
        let products = self.fetch_json(request).await?;
        pretty(&products)
    }

    pub(super) async fn create_order(&self, args: &ToolArguments) -> Result<String> {
        let field = |key: &str| args.get(key).cloned().unwrap_or(Value::Null);
        let body = json!({
            "userId": field("userId"),
            "productId": field("productId"),
            "quantity": field("quantity"),
        });
        let request = self.http.post(self.endpoint(&["api", "orders"])).json(&body);
        let order = self.fetch_json(request).await?;
        Ok(format!("✅ Order created successfully!\n\n{}", pretty(&order)?))
    }

    pub(super) async fn check_health(&self) -> Result<String> {
        let health = self
            .fetch_json(self.http.get(self.endpoint(&["api", "health"])))
            .await?;
        Ok(format!("✅ Microservice is healthy\n\n{}", pretty(&health)?))
    }

    /// Base URL plus percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send and decode a JSON body. Non-2xx responses become
    /// [`BridgeError::Api`] carrying the body's `message`, or the status
    /// line when there is none.
    async fn fetch_json(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.get("message"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
                .unwrap_or_else(|| {
                    format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown Status")
                    )
                });
            return Err(BridgeError::api(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
