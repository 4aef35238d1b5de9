//! The interactive session as an explicit state machine.

use std::io::Write;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::coerce::coerce_input;
use super::prompt::Prompter;
use super::render;
use super::session::{Connector, ToolSession};
use crate::config::ServerList;
use crate::error::Result;
use crate::tools::ToolDescriptor;

/// Where the session is. Each step consumes one state and yields the next.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    ServerSelect,
    Connecting(usize),
    ConnectFailed(String),
    ToolSelect,
    ArgumentCollection(ToolDescriptor),
    Invoking {
        tool: ToolDescriptor,
        arguments: Map<String, Value>,
    },
    ResultDisplay,
    Exit,
}

/// What the user asked for at the post-call prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    AnotherTool,
    SwitchServer,
    Exit,
}

impl NextAction {
    /// Anything other than `s` or `e` (including blank) means another tool.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "s" => Self::SwitchServer,
            "e" => Self::Exit,
            _ => Self::AnotherTool,
        }
    }
}

/// Parse a one-based menu answer; blank picks the first entry.
pub fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return (len > 0).then_some(0);
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Drives one interactive run over a server list.
pub struct InteractiveClient<'a> {
    servers: &'a ServerList,
    connector: &'a dyn Connector,
    prompter: &'a mut dyn Prompter,
    out: &'a mut dyn Write,
    session: Option<Box<dyn ToolSession>>,
    tools: Vec<ToolDescriptor>,
}

impl<'a> InteractiveClient<'a> {
    pub fn new(
        servers: &'a ServerList,
        connector: &'a dyn Connector,
        prompter: &'a mut dyn Prompter,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            servers,
            connector,
            prompter,
            out,
            session: None,
            tools: Vec::new(),
        }
    }

    /// Run until the user exits or input ends. Only output failures are
    /// returned as errors; everything else is reported inline.
    pub async fn run(mut self) -> Result<()> {
        render::banner(self.out, "🚀 MCP Client Interactive Demo")?;

        let mut state = SessionState::ServerSelect;
        while state != SessionState::Exit {
            state = self.step(state).await?;
        }

        self.disconnect().await?;
        writeln!(self.out, "👋 Exiting MCP Client. Goodbye!")?;
        self.out.flush()?;
        Ok(())
    }

    /// Perform one transition.
    pub async fn step(&mut self, state: SessionState) -> Result<SessionState> {
        debug!(?state, "client step");
        match state {
            SessionState::ServerSelect => self.select_server().await,
            SessionState::Connecting(index) => self.connect(index).await,
            SessionState::ConnectFailed(message) => self.recover(&message).await,
            SessionState::ToolSelect => self.select_tool().await,
            SessionState::ArgumentCollection(tool) => self.collect_arguments(tool).await,
            SessionState::Invoking { tool, arguments } => self.invoke(tool, arguments).await,
            SessionState::ResultDisplay => self.next_action().await,
            SessionState::Exit => Ok(SessionState::Exit),
        }
    }

    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.out.flush()?;
        self.prompter.ask(prompt).await
    }

    async fn select_server(&mut self) -> Result<SessionState> {
        render::server_menu(self.out, self.servers)?;
        let Some(answer) = self.ask("Select a server [1]: ").await? else {
            return Ok(SessionState::Exit);
        };
        match parse_selection(&answer, self.servers.len()) {
            Some(index) => Ok(SessionState::Connecting(index)),
            None => {
                writeln!(self.out, "Invalid server selection.")?;
                Ok(SessionState::ServerSelect)
            }
        }
    }

    async fn connect(&mut self, index: usize) -> Result<SessionState> {
        let Some(entry) = self.servers.get(index) else {
            return Ok(SessionState::ServerSelect);
        };
        writeln!(self.out, "🔗 Connecting to {}...", entry.name)?;
        match self.connector.connect(entry).await {
            Ok(session) => {
                writeln!(self.out, "✅ Connected to MCP server: {}\n", entry.name)?;
                self.session = Some(session);
                Ok(SessionState::ToolSelect)
            }
            Err(err) => {
                warn!(server = %entry.name, error = %err, "connection failed");
                Ok(SessionState::ConnectFailed(err.to_string()))
            }
        }
    }

    async fn recover(&mut self, message: &str) -> Result<SessionState> {
        writeln!(self.out, "\n❌ Error: {message}")?;
        let answer = self.ask("Try another server [s] or exit [e]? [s]: ").await?;
        Ok(match answer {
            Some(a) if a.trim().eq_ignore_ascii_case("e") => SessionState::Exit,
            Some(_) => SessionState::ServerSelect,
            None => SessionState::Exit,
        })
    }

    async fn select_tool(&mut self) -> Result<SessionState> {
        let Some(session) = self.session.as_mut() else {
            return Ok(SessionState::ServerSelect);
        };
        match session.list_tools().await {
            Ok(tools) => self.tools = tools,
            Err(err) => {
                self.disconnect().await?;
                return Ok(SessionState::ConnectFailed(err.to_string()));
            }
        }

        render::tool_menu(self.out, &self.tools)?;
        let Some(answer) = self.ask("Select a tool to call [1]: ").await? else {
            return Ok(SessionState::Exit);
        };
        match parse_selection(&answer, self.tools.len()) {
            Some(index) => Ok(SessionState::ArgumentCollection(self.tools[index].clone())),
            None => {
                writeln!(self.out, "Invalid tool selection.")?;
                Ok(SessionState::ToolSelect)
            }
        }
    }

    async fn collect_arguments(&mut self, tool: ToolDescriptor) -> Result<SessionState> {
        let mut arguments = Map::new();
        for (key, prop) in &tool.input_schema.properties {
            let prompt = format!("Enter value for '{key}' ({}): ", prop.kind);
            let Some(answer) = self.ask(&prompt).await? else {
                return Ok(SessionState::Exit);
            };
            if let Some(value) = coerce_input(prop.kind, &answer) {
                arguments.insert(key.clone(), value);
            }
        }
        Ok(SessionState::Invoking { tool, arguments })
    }

    async fn invoke(
        &mut self,
        tool: ToolDescriptor,
        arguments: Map<String, Value>,
    ) -> Result<SessionState> {
        let Some(session) = self.session.as_mut() else {
            return Ok(SessionState::ServerSelect);
        };
        let arguments = Value::Object(arguments);
        render::call_header(self.out, &tool.name, &tool.description, &arguments)?;
        let outcome = session.call_tool(&tool.name, arguments).await;
        if let Err(err) = &outcome {
            warn!(tool = %tool.name, error = %err, "tool call failed");
        }
        render::call_outcome(self.out, &outcome)?;
        Ok(SessionState::ResultDisplay)
    }

    async fn next_action(&mut self) -> Result<SessionState> {
        let answer = self
            .ask("Try another tool [t], switch server [s], or exit [e]? [t]: ")
            .await?;
        let Some(answer) = answer else {
            return Ok(SessionState::Exit);
        };
        match NextAction::parse(&answer) {
            NextAction::AnotherTool => Ok(SessionState::ToolSelect),
            NextAction::SwitchServer => {
                self.disconnect().await?;
                writeln!(self.out, "\n✨ Interactive session completed!\n")?;
                Ok(SessionState::ServerSelect)
            }
            NextAction::Exit => {
                self.disconnect().await?;
                Ok(SessionState::Exit)
            }
        }
    }

    /// Close the current session, if any. Close failures are logged only.
    async fn disconnect(&mut self) -> Result<()> {
        self.tools.clear();
        if let Some(session) = self.session.take() {
            if let Err(err) = session.close().await {
                warn!(error = %err, "failed to close session cleanly");
            }
            writeln!(self.out, "👋 Disconnected from MCP server")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_defaults_to_first() {
        assert_eq!(parse_selection("", 3), Some(0));
        assert_eq!(parse_selection("  ", 3), Some(0));
        assert_eq!(parse_selection("", 0), None);
    }

    #[test]
    fn selection_is_one_based_and_bounded() {
        assert_eq!(parse_selection("2", 3), Some(1));
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("two", 3), None);
    }

    #[test]
    fn next_action_defaults_to_another_tool() {
        assert_eq!(NextAction::parse(""), NextAction::AnotherTool);
        assert_eq!(NextAction::parse("t"), NextAction::AnotherTool);
        assert_eq!(NextAction::parse("x"), NextAction::AnotherTool);
        assert_eq!(NextAction::parse("S"), NextAction::SwitchServer);
        assert_eq!(NextAction::parse(" e "), NextAction::Exit);
    }
}
