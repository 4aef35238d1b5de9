//! Interactive command-line client for MCP tool servers.

pub mod coerce;
pub mod examples;
pub mod machine;
pub mod prompt;
pub mod render;
pub mod session;

pub use coerce::coerce_input;
pub use examples::{example_calls, ExampleCall, ExampleRunner};
pub use machine::{parse_selection, InteractiveClient, NextAction, SessionState};
pub use prompt::{Prompter, ScriptedPrompter, StdinPrompter};
pub use session::{Connector, ToolSession};
