//! Scripted terminal for driving the engine from integration tests.

use std::collections::VecDeque;
use std::io;

use spacer::io::{InputReader, OutputWriter};

/// Replays canned lines, then reports end of input.
pub struct MockInput {
    responses: VecDeque<String>,
}

impl MockInput {
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: responses.into_iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl InputReader for MockInput {
    fn read_line(&mut self, _prompt: &str) -> Result<String, io::Error> {
        self.responses
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "No more mock responses"))
    }
}

/// Captures everything the game prints.
#[derive(Default)]
pub struct MockOutput {
    pub messages: Vec<String>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn text(&self) -> String {
        self.messages.concat()
    }
}

impl OutputWriter for MockOutput {
    fn write(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn writeln(&mut self, message: &str) {
        self.messages.push(format!("{}\n", message));
    }
}
