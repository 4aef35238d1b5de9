//! Shared test helpers: an in-process service and fake client seams.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use shopbridge::bridge::ToolBridge;
use shopbridge::client::{Connector, ToolSession};
use shopbridge::config::ServerEntry;
use shopbridge::error::{BridgeError, Result};
use shopbridge::service::{self, RunningService, ServiceState, Store};
use shopbridge::tools::{list_tools, ToolDescriptor, ToolResult};

pub const ADMIN_KEY: &str = "test-admin-key";

/// A seeded service on an ephemeral port plus a bridge pointed at it.
pub struct TestService {
    pub running: RunningService,
    pub store: Store,
    pub bridge: ToolBridge,
}

impl TestService {
    pub async fn start() -> Self {
        Self::start_with_key(Some(ADMIN_KEY)).await
    }

    pub async fn start_with_key(api_key: Option<&str>) -> Self {
        let store = Store::seeded();
        let state = ServiceState::new(store.clone(), api_key.map(str::to_string));
        let running = service::spawn("127.0.0.1:0", state)
            .await
            .expect("service should bind an ephemeral port");
        let bridge = ToolBridge::new(&running.base_url()).expect("base url should parse");
        Self {
            running,
            store,
            bridge,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.running.base_url())
    }
}

/// Records every call made through a [`FakeSession`].
#[derive(Debug, Default)]
pub struct CallLog {
    pub calls: Vec<(String, Value)>,
    pub list_count: usize,
    pub closed: usize,
}

/// In-memory tool session with canned results.
pub struct FakeSession {
    tools: Vec<ToolDescriptor>,
    results: VecDeque<Result<ToolResult>>,
    log: Arc<Mutex<CallLog>>,
}

#[async_trait]
impl ToolSession for FakeSession {
    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>> {
        self.log.lock().unwrap().list_count += 1;
        Ok(self.tools.clone())
    }

    async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<ToolResult> {
        self.log
            .lock()
            .unwrap()
            .calls
            .push((name.to_string(), arguments));
        self.results
            .pop_front()
            .unwrap_or_else(|| Ok(ToolResult::success("ok")))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.log.lock().unwrap().closed += 1;
        Ok(())
    }
}

/// Hands out [`FakeSession`]s; entries named `broken` fail to connect.
pub struct FakeConnector {
    pub log: Arc<Mutex<CallLog>>,
    results: Mutex<VecDeque<Result<ToolResult>>>,
    pub connects: Mutex<Vec<String>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::with_results(Vec::new())
    }

    pub fn with_results(results: Vec<Result<ToolResult>>) -> Self {
        Self {
            log: Arc::new(Mutex::new(CallLog::default())),
            results: Mutex::new(results.into()),
            connects: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, entry: &ServerEntry) -> Result<Box<dyn ToolSession>> {
        self.connects.lock().unwrap().push(entry.name.clone());
        if entry.name == "broken" {
            return Err(BridgeError::Connection("spawn failed".into()));
        }
        let results = std::mem::take(&mut *self.results.lock().unwrap());
        Ok(Box::new(FakeSession {
            tools: list_tools().to_vec(),
            results,
            log: self.log.clone(),
        }))
    }
}

pub fn entry(name: &str) -> ServerEntry {
    ServerEntry {
        name: name.to_string(),
        description: format!("{name} server"),
        ..ServerEntry::local_default()
    }
}
