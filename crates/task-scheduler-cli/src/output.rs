use comfy_table::{presets::UTF8_FULL, Table};
use serde::{Deserialize, Serialize};
use task_scheduler_core::{Task, TaskId};

use crate::OutputFormat;

/// A task that left the scheduler, tagged with the script step that took it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatched {
    pub step: usize,
    pub id: TaskId,
    pub priority: i64,
}

impl Dispatched {
    pub fn new(step: usize, task: Task) -> Self {
        Dispatched {
            step,
            id: task.id,
            priority: task.priority.value(),
        }
    }
}

pub fn render(dispatched: &[Dispatched], format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(dispatched)?,
        OutputFormat::Yaml => serde_yaml::to_string(dispatched)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Step", "Task ID", "Priority"]);
            for row in dispatched {
                table.add_row(vec![
                    row.step.to_string(),
                    row.id.to_string(),
                    row.priority.to_string(),
                ]);
            }
            table.to_string()
        }
    };
    Ok(rendered)
}
