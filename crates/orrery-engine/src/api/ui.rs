//! UI command queue.
//!
//! Game code never touches the DOM. It records commands against element ids
//! and the page applies them after each tick. If the page has reported which
//! ids it actually has, commands for anything else are dropped here, so a
//! missing HUD element never breaks a frame.

use std::collections::{HashMap, HashSet};
use serde::Serialize;
use crate::error::EngineResult;

/// A single DOM-facing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UiCommand {
    /// Replace an element's text content.
    SetText { element: String, text: String },
    /// Toggle an element's active/pressed state.
    SetActive { element: String, active: bool },
    /// Fill a panel with structured data and show it.
    ShowPanel { element: String, data: serde_json::Value },
    /// Hide a panel.
    HidePanel { element: String },
}

impl UiCommand {
    pub fn element(&self) -> &str {
        match self {
            UiCommand::SetText { element, .. }
            | UiCommand::SetActive { element, .. }
            | UiCommand::ShowPanel { element, .. }
            | UiCommand::HidePanel { element } => element,
        }
    }
}

#[derive(Debug, Default)]
pub struct UiQueue {
    commands: Vec<UiCommand>,
    /// Element ids present on the page; `None` until the page reports them.
    bound: Option<HashSet<String>>,
    last_text: HashMap<String, String>,
}

impl UiQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record which element ids exist. Later commands for other ids are dropped.
    pub fn bind_elements<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bound = Some(ids.into_iter().map(Into::into).collect());
        self.commands.retain(|c| {
            self.bound
                .as_ref()
                .map_or(true, |b| b.contains(c.element()))
        });
    }

    pub fn is_bound(&self, element: &str) -> bool {
        self.bound.as_ref().map_or(true, |b| b.contains(element))
    }

    /// Set text content. Repeating the current text is a no-op.
    pub fn set_text(&mut self, element: &str, text: impl Into<String>) {
        if !self.is_bound(element) {
            return;
        }
        let text = text.into();
        if self.last_text.get(element) == Some(&text) {
            return;
        }
        self.last_text.insert(element.to_string(), text.clone());
        self.commands.push(UiCommand::SetText {
            element: element.to_string(),
            text,
        });
    }

    pub fn set_active(&mut self, element: &str, active: bool) {
        self.push(UiCommand::SetActive {
            element: element.to_string(),
            active,
        });
    }

    pub fn show_panel(&mut self, element: &str, data: serde_json::Value) {
        self.push(UiCommand::ShowPanel {
            element: element.to_string(),
            data,
        });
    }

    pub fn hide_panel(&mut self, element: &str) {
        self.push(UiCommand::HidePanel {
            element: element.to_string(),
        });
    }

    fn push(&mut self, command: UiCommand) {
        if self.is_bound(command.element()) {
            self.commands.push(command);
        }
    }

    /// Take all queued commands.
    pub fn drain(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Queued commands, oldest first.
    pub fn pending(&self) -> &[UiCommand] {
        &self.commands
    }

    /// Drain queued commands as a JSON array.
    pub fn drain_json(&mut self) -> EngineResult<String> {
        Ok(serde_json::to_string(&self.drain())?)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
