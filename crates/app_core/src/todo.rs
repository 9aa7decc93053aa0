//! Todo list persisted through the settings store

use crate::settings::{keys, SettingsStore};
use crate::AppError;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Creation time in epoch milliseconds, unique within a list
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    todos: Vec<Todo>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the list stored under `todos`; a missing key is an empty list
    pub fn load(store: &dyn SettingsStore) -> Result<Self, AppError> {
        let Some(raw) = store.get(keys::TODOS) else {
            return Ok(Self::new());
        };

        let todos: Vec<Todo> = serde_json::from_str(&raw)
            .map_err(|e| AppError::Settings(format!("Corrupt todo list: {}", e)))?;
        Ok(Self { todos })
    }

    pub fn save(&self, store: &dyn SettingsStore) -> Result<(), AppError> {
        let raw = serde_json::to_string(&self.todos)
            .map_err(|e| AppError::Settings(e.to_string()))?;
        store.set(keys::TODOS, &raw)?;
        Ok(())
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Append a new open item; blank text is ignored
    pub fn add(&mut self, text: &str) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut id = Utc::now().timestamp_millis();
        if let Some(last) = self.todos.iter().map(|t| t.id).max() {
            id = id.max(last + 1);
        }

        self.todos.push(Todo {
            id,
            text: text.to_string(),
            completed: false,
        });
        Some(id)
    }

    /// Flip completion; returns the new state
    pub fn toggle(&mut self, id: i64) -> Option<bool> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;
        Some(todo.completed)
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        self.todos.len() != before
    }
}
