//! `pixshelf todo`

use anyhow::{bail, Result};
use app_core::{FileSettingsStore, TodoList};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum TodoAction {
    /// Show all items
    List,
    /// Add an item
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Mark an item done or not done
    Toggle { id: i64 },
    /// Delete an item
    Remove { id: i64 },
}

pub fn run(action: TodoAction) -> Result<()> {
    let store = FileSettingsStore::open_default()?;
    let mut list = TodoList::load(&store)?;

    match action {
        TodoAction::List => {
            if list.is_empty() {
                println!("No todos yet.");
            }
            for todo in list.todos() {
                let mark = if todo.completed { "x" } else { " " };
                println!("[{}] {}  {}", mark, todo.id, todo.text);
            }
            return Ok(());
        }
        TodoAction::Add { text } => {
            let Some(id) = list.add(&text.join(" ")) else {
                bail!("Todo text is empty");
            };
            println!("Added {}", id);
        }
        TodoAction::Toggle { id } => match list.toggle(id) {
            Some(true) => println!("Completed {}", id),
            Some(false) => println!("Reopened {}", id),
            None => bail!("No todo with id {}", id),
        },
        TodoAction::Remove { id } => {
            if !list.remove(id) {
                bail!("No todo with id {}", id);
            }
            println!("Removed {}", id);
        }
    }

    list.save(&store)?;
    Ok(())
}
