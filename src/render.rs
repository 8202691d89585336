//! View description of the task list.
//!
//! `render` and `update_counter` are pure: they turn the task collection into
//! plain data that a front end draws. The TUI and the `list` command are both
//! adapters over these values.

use crate::task::Task;

/// Shown in place of the list when there are no tasks.
pub const EMPTY_MESSAGE: &str = "Nenhuma tarefa cadastrada. Adicione uma nova tarefa acima!";
/// Label of the per-task complete control.
pub const COMPLETE_LABEL: &str = "Concluir";
/// Glyph shown for completed tasks.
pub const DONE_INDICATOR: &str = "✓";
/// Accessible label of the completed indicator.
pub const DONE_ARIA_LABEL: &str = "Tarefa concluída";

/// The rendered task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty { message: &'static str },
    Items(Vec<TaskItemView>),
}

/// One rendered task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItemView {
    pub task_id: u64,
    pub title: String,
    /// Title is drawn struck-through.
    pub completed: bool,
    pub tag: String,
    /// Creation date as stored, `DD/MM/YYYY`.
    pub date: String,
    pub date_label: String,
    pub action: TaskAction,
}

/// Trailing control of a rendered task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    /// Activating it completes `task_id`.
    Complete {
        task_id: u64,
        label: &'static str,
        aria_label: String,
    },
    Done {
        indicator: &'static str,
        aria_label: &'static str,
    },
}

/// Completed-count summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterView {
    pub completed: usize,
    pub label: String,
}

/// Everything a front end draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub list: ListView,
    pub counter: CounterView,
}

impl ListView {
    /// Task id behind the item at `index`, if that item can still be completed.
    pub fn completable_at(&self, index: usize) -> Option<u64> {
        match self {
            ListView::Items(items) => match items.get(index)?.action {
                TaskAction::Complete { task_id, .. } => Some(task_id),
                TaskAction::Done { .. } => None,
            },
            ListView::Empty { .. } => None,
        }
    }

    /// Number of rendered items.
    pub fn len(&self) -> usize {
        match self {
            ListView::Items(items) => items.len(),
            ListView::Empty { .. } => 0,
        }
    }
}

/// Build the full list from scratch.
pub fn render(tasks: &[Task]) -> ListView {
    if tasks.is_empty() {
        return ListView::Empty {
            message: EMPTY_MESSAGE,
        };
    }
    ListView::Items(tasks.iter().map(render_item).collect())
}

fn render_item(task: &Task) -> TaskItemView {
    let action = if task.completed {
        TaskAction::Done {
            indicator: DONE_INDICATOR,
            aria_label: DONE_ARIA_LABEL,
        }
    } else {
        TaskAction::Complete {
            task_id: task.id,
            label: COMPLETE_LABEL,
            aria_label: format!("Concluir tarefa: {}", task.name),
        }
    };

    TaskItemView {
        task_id: task.id,
        title: task.name.clone(),
        completed: task.completed,
        tag: task.tag.clone(),
        date: task.date.clone(),
        date_label: format!("Criado em: {}", task.date),
        action,
    }
}

/// Count completed tasks and label the count.
pub fn update_counter(tasks: &[Task]) -> CounterView {
    let completed = tasks.iter().filter(|t| t.completed).count();
    CounterView {
        completed,
        label: counter_label(completed),
    }
}

/// "1 tarefa concluída", otherwise "N tarefas concluídas".
pub fn counter_label(completed: usize) -> String {
    let word = if completed == 1 {
        "tarefa concluída"
    } else {
        "tarefas concluídas"
    };
    format!("{completed} {word}")
}

/// Render list and counter together.
pub fn view(tasks: &[Task]) -> View {
    View {
        list: render(tasks),
        counter: update_counter(tasks),
    }
}

/// Lay a view out as a plain-text table followed by the counter.
pub fn format_view(view: &View) -> String {
    let mut out = String::new();
    match &view.list {
        ListView::Empty { message } => {
            out.push_str(message);
            out.push('\n');
        }
        ListView::Items(items) => {
            out.push_str(&format!(
                "{:<5} {:<12} {:<10} {:<12} {}\n",
                "ID", "Etiqueta", "Data", "Situação", "Nome"
            ));
            for item in items {
                let status = match &item.action {
                    TaskAction::Complete { .. } => "aberta".to_string(),
                    TaskAction::Done { indicator, .. } => format!("{indicator} concluída"),
                };
                out.push_str(&format!(
                    "{:<5} {:<12} {:<10} {:<12} {}\n",
                    item.task_id,
                    truncate(&item.tag, 12),
                    item.date,
                    status,
                    item.title
                ));
            }
        }
    }
    out.push('\n');
    out.push_str(&view.counter.label);
    out
}

/// Print a view as a plain-text table.
pub fn print_view(view: &View) {
    println!("{}", format_view(view));
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, name: &str, completed: bool) -> Task {
        Task {
            id,
            name: name.to_string(),
            tag: "tag".to_string(),
            date: "17/10/2026".to_string(),
            completed,
        }
    }

    #[test]
    fn test_empty_collection_renders_message() {
        assert_eq!(
            render(&[]),
            ListView::Empty {
                message: EMPTY_MESSAGE
            }
        );
    }

    #[test]
    fn test_items_follow_collection_order() {
        let tasks = vec![task(3, "c", false), task(1, "a", true), task(2, "b", false)];
        let ListView::Items(items) = render(&tasks) else {
            panic!("expected items");
        };
        let ids: Vec<u64> = items.iter().map(|i| i.task_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_open_task_gets_complete_action() {
        let ListView::Items(items) = render(&[task(7, "Write spec", false)]) else {
            panic!("expected items");
        };
        let item = &items[0];
        assert!(!item.completed);
        assert_eq!(item.date, "17/10/2026");
        assert_eq!(item.date_label, "Criado em: 17/10/2026");
        assert_eq!(
            item.action,
            TaskAction::Complete {
                task_id: 7,
                label: "Concluir",
                aria_label: "Concluir tarefa: Write spec".to_string(),
            }
        );
    }

    #[test]
    fn test_completed_task_gets_indicator() {
        let ListView::Items(items) = render(&[task(1, "a", true)]) else {
            panic!("expected items");
        };
        assert!(items[0].completed);
        assert_eq!(
            items[0].action,
            TaskAction::Done {
                indicator: "✓",
                aria_label: "Tarefa concluída",
            }
        );
    }

    #[test]
    fn test_completable_at() {
        let list = render(&[task(1, "a", true), task(2, "b", false)]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.completable_at(0), None);
        assert_eq!(list.completable_at(1), Some(2));
        assert_eq!(list.completable_at(2), None);
        assert_eq!(render(&[]).completable_at(0), None);
    }

    #[test]
    fn test_counter_pluralisation() {
        assert_eq!(counter_label(0), "0 tarefas concluídas");
        assert_eq!(counter_label(1), "1 tarefa concluída");
        assert_eq!(counter_label(2), "2 tarefas concluídas");
    }

    #[test]
    fn test_counter_counts_completed_only() {
        let tasks = vec![task(1, "a", true), task(2, "b", false), task(3, "c", true)];
        let counter = update_counter(&tasks);
        assert_eq!(counter.completed, 2);
        assert_eq!(counter.label, "2 tarefas concluídas");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("frontend", 12), "frontend");
        assert_eq!(truncate("very-long-tag-name", 8), "very-lo…");
    }

    #[test]
    fn test_format_view_uses_portuguese_labels() {
        let text = format_view(&view(&[task(1, "Write spec", false), task(2, "Ship it", true)]));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "ID    Etiqueta     Data       Situação     Nome");
        assert_eq!(lines[1], "1     tag          17/10/2026 aberta       Write spec");
        assert_eq!(lines[2], "2     tag          17/10/2026 ✓ concluída  Ship it");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "1 tarefa concluída");
        assert!(!text.contains("Criado em"));
    }

    #[test]
    fn test_format_empty_view() {
        assert_eq!(
            format_view(&view(&[])),
            format!("{EMPTY_MESSAGE}\n\n0 tarefas concluídas")
        );
    }
}
