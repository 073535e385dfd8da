//! Prompter that replays canned answers.

use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::Mutex,
};

use entigen_core::{
    application::{ApplicationError, ports::Prompter},
    error::EntigenResult,
};
use tracing::debug;

/// Answers prompts from two queues, one for strings and one for folders.
///
/// An exhausted queue behaves like a dismissed prompt. Every prompt text is
/// recorded so tests can check what was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    strings: Mutex<VecDeque<Option<String>>>,
    directories: Mutex<VecDeque<Option<PathBuf>>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a string answer.
    pub fn answer(self, text: impl Into<String>) -> Self {
        self.push_string(Some(text.into()))
    }

    /// Queue a folder answer.
    pub fn pick(self, dir: impl Into<PathBuf>) -> Self {
        self.push_directory(Some(dir.into()))
    }

    /// Queue a dismissed string prompt.
    pub fn dismiss_string(self) -> Self {
        self.push_string(None)
    }

    /// Queue a dismissed folder prompt.
    pub fn dismiss_directory(self) -> Self {
        self.push_directory(None)
    }

    /// Prompt texts in the order they were shown.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }

    fn push_string(self, answer: Option<String>) -> Self {
        if let Ok(mut queue) = self.strings.lock() {
            queue.push_back(answer);
        }
        self
    }

    fn push_directory(self, answer: Option<PathBuf>) -> Self {
        if let Ok(mut queue) = self.directories.lock() {
            queue.push_back(answer);
        }
        self
    }

    fn record(&self, prompt: &str) -> EntigenResult<()> {
        self.asked
            .lock()
            .map_err(|_| ApplicationError::LockError)?
            .push(prompt.to_string());
        Ok(())
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_string(&self, prompt: &str, _placeholder: &str) -> EntigenResult<Option<String>> {
        self.record(prompt)?;
        let answer = self
            .strings
            .lock()
            .map_err(|_| ApplicationError::LockError)?
            .pop_front()
            .flatten();
        debug!(prompt, answered = answer.is_some(), "scripted string answer");
        Ok(answer)
    }

    fn pick_directory(&self, label: &str) -> EntigenResult<Option<PathBuf>> {
        self.record(label)?;
        let answer = self
            .directories
            .lock()
            .map_err(|_| ApplicationError::LockError)?
            .pop_front()
            .flatten();
        debug!(label, answered = answer.is_some(), "scripted folder answer");
        Ok(answer)
    }
}
