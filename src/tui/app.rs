//! Terminal front end.
//!
//! `TuiApp` draws the current `View` and the form with ratatui, and turns key
//! presses and clicks into form edits, submissions and completions on the
//! wrapped `App`.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::error;

use crate::{
    app::App,
    form::FormField,
    input::InputField,
    render::{ListView, TaskAction},
    storage::KeyValueStore,
    tui::{
        colors::{ACCENT, DARK_PURPLE, DARK_RED, GOLD},
        enums::Focus,
    },
};

/// TUI state around the application.
pub struct TuiApp<S> {
    app: App<S>,
    focus: Focus,
    task_list_state: TableState,
    /// Where the task table was last drawn, for mapping clicks to rows.
    list_area: Rect,
    status_message: String,
}

impl<S: KeyValueStore> TuiApp<S> {
    /// Wrap a bootstrapped application. The name input starts focused.
    pub fn new(app: App<S>) -> Self {
        let mut tui = TuiApp {
            app,
            focus: Focus::Form,
            task_list_state: TableState::default(),
            list_area: Rect::default(),
            status_message: String::new(),
        };
        tui.clamp_selection();
        tui
    }

    /// Keep the list selection inside the rendered items.
    fn clamp_selection(&mut self) {
        let len = self.app.view().list.len();
        match self.task_list_state.selected() {
            _ if len == 0 => self.task_list_state.select(None),
            Some(i) if i >= len => self.task_list_state.select(Some(len - 1)),
            None => self.task_list_state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Tab order: name, tag, task list.
    fn focus_next(&mut self) {
        match (self.focus, self.app.form.current_field) {
            (Focus::Form, FormField::Name) => self.app.form.next_field(),
            (Focus::Form, FormField::Tag) => self.focus = Focus::TaskList,
            (Focus::TaskList, _) => {
                self.focus = Focus::Form;
                self.app.form.focus_name();
            }
        }
    }

    fn focus_prev(&mut self) {
        match (self.focus, self.app.form.current_field) {
            (Focus::Form, FormField::Name) => self.focus = Focus::TaskList,
            (Focus::Form, FormField::Tag) => self.app.form.prev_field(),
            (Focus::TaskList, _) => {
                self.focus = Focus::Form;
                self.app.form.current_field = FormField::Tag;
                self.app.form.update_active_field();
            }
        }
    }

    fn submit_form(&mut self) {
        match self.app.submit() {
            Ok(Some(_)) => {
                let len = self.app.view().list.len();
                self.task_list_state.select(len.checked_sub(1));
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "failed to add task");
                self.set_status_message(format!("Erro ao salvar: {e}"));
            }
        }
    }

    fn complete_selected(&mut self) {
        let Some(selected) = self.task_list_state.selected() else {
            return;
        };
        let Some(task_id) = self.app.view().list.completable_at(selected) else {
            return;
        };
        if let Err(e) = self.app.complete(task_id) {
            error!(error = %e, task_id, "failed to complete task");
            self.set_status_message(format!("Erro ao salvar: {e}"));
        }
        self.clamp_selection();
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.app.form.handle_char(c),
            KeyCode::Backspace => self.app.form.handle_backspace(),
            KeyCode::Delete => self.app.form.handle_delete(),
            KeyCode::Left => self.app.form.handle_left_right(false),
            KeyCode::Right => self.app.form.handle_left_right(true),
            _ => {}
        }
    }

    fn handle_task_list_input(&mut self, key: KeyCode) {
        let len = self.app.view().list.len();
        match key {
            KeyCode::Up => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected > 0 {
                        self.task_list_state.select(Some(selected - 1));
                    }
                } else if len > 0 {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < len {
                        self.task_list_state.select(Some(selected + 1));
                    }
                } else if len > 0 {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c') => self.complete_selected(),
            _ => {}
        }
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        self.status_message.clear();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Esc => return true,
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            code => match self.focus {
                Focus::Form => self.handle_form_input(code),
                Focus::TaskList => self.handle_task_list_input(code),
            },
        }
        false
    }

    /// Index of the table row drawn at terminal cell (`column`, `row`).
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area;
        // Skip the top border and the header row; stop before the bottom border.
        let first = area.y + 2;
        let last = (area.y + area.height).saturating_sub(1);
        let inside_x = column > area.x && column + 1 < area.x + area.width;
        if !inside_x || row < first || row >= last {
            return None;
        }
        let index = self.task_list_state.offset() + usize::from(row - first);
        (index < self.app.view().list.len()).then_some(index)
    }

    /// A left click on a task row selects it and activates its complete
    /// control. Other mouse events are ignored.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(index) = self.row_at(mouse.column, mouse.row) else {
            return;
        };
        self.status_message.clear();
        self.focus = Focus::TaskList;
        self.task_list_state.select(Some(index));
        self.complete_selected();
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => return Ok(self.handle_key(key)),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(false)
    }

    fn input_block(&self, title: &'static str, focused: bool) -> Block<'static> {
        let style = if focused {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Block::default().borders(Borders::ALL).title(title).border_style(style)
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let form = &self.app.form;
        let in_form = self.focus == Focus::Form;
        let name_focused = in_form && form.current_field == FormField::Name;
        let tag_focused = in_form && form.current_field == FormField::Tag;

        let name_input = Paragraph::new(form.name.value.as_str())
            .block(self.input_block("Nome da tarefa", name_focused));
        f.render_widget(name_input, chunks[0]);

        let tag_input = Paragraph::new(form.tag.value.as_str())
            .block(self.input_block("Etiqueta", tag_focused));
        f.render_widget(tag_input, chunks[1]);

        if in_form {
            let (field, rect): (&InputField, Rect) = match form.current_field {
                FormField::Name => (&form.name, chunks[0]),
                FormField::Tag => (&form.tag, chunks[1]),
            };
            let max_x = rect.width.saturating_sub(2) as usize;
            f.set_cursor_position((
                rect.x + 1 + field.cursor.min(max_x) as u16,
                rect.y + 1,
            ));
        }
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        self.list_area = area;
        let focused = self.focus == Focus::TaskList;
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Tarefas")
            .border_style(if focused { Style::default().fg(GOLD) } else { Style::default() });

        let items = match &self.app.view().list {
            ListView::Empty { message } => {
                let empty = Paragraph::new(*message)
                    .block(block)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .wrap(Wrap { trim: true });
                f.render_widget(empty, area);
                return;
            }
            ListView::Items(items) => items,
        };

        let header = Row::new(["#", "Tarefa", "Etiqueta", "Data", ""].iter().map(|h| {
            Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(ACCENT).fg(Color::White))
        .height(1);

        let rows: Vec<Row> = items
            .iter()
            .map(|item| {
                let title_style = if item.completed {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                let action = match &item.action {
                    TaskAction::Complete { label, .. } => Span::styled(
                        format!("[ {label} ]"),
                        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                    ),
                    TaskAction::Done { indicator, .. } => {
                        Span::styled(*indicator, Style::default().fg(Color::Green))
                    }
                };
                Row::new(vec![
                    Cell::from(item.task_id.to_string()),
                    Cell::from(Span::styled(item.title.clone(), title_style)),
                    Cell::from(Span::styled(item.tag.clone(), Style::default().bg(DARK_PURPLE).fg(Color::White))),
                    Cell::from(item.date.clone()),
                    Cell::from(Line::from(action)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(4),  // ID
            Constraint::Min(25),    // Name
            Constraint::Length(12), // Tag
            Constraint::Length(12), // Date
            Constraint::Length(14), // Action
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(if focused { ">> " } else { "   " });

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let (text, bg) = if self.status_message.is_empty() {
            let hint = match self.focus {
                Focus::Form => "Enter adiciona | Tab troca de campo | Esc sai",
                Focus::TaskList => "Enter/c conclui | ↑↓ seleciona | Tab volta ao formulário | Esc sai",
            };
            (format!("{} | {}", self.app.view().counter.label, hint), ACCENT)
        } else {
            (self.status_message.clone(), DARK_RED)
        };

        let status = Paragraph::new(text)
            .style(Style::default().bg(bg).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole screen.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(3), // form
                Constraint::Min(0),    // list
                Constraint::Length(1), // status
            ])
            .split(f.area());

        let header = Paragraph::new(Line::from(vec![
            Span::styled("GERENCIADOR DE TAREFAS", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                self.app.view().counter.label.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, chunks[0]);

        self.render_form(f, chunks[1]);
        self.render_task_list(f, chunks[2]);
        self.render_status_bar(f, chunks[3]);
    }

    /// Main event loop: draw, then handle input, until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as Flag;
    use std::rc::Rc;

    use crate::error::StorageError;
    use crate::storage::MemoryStorage;
    use ratatui::backend::TestBackend;

    fn tui() -> TuiApp<MemoryStorage> {
        TuiApp::new(App::bootstrap(MemoryStorage::default()).unwrap())
    }

    fn press<S: KeyValueStore>(tui: &mut TuiApp<S>, code: KeyCode) -> bool {
        tui.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str<S: KeyValueStore>(tui: &mut TuiApp<S>, s: &str) {
        for c in s.chars() {
            press(tui, KeyCode::Char(c));
        }
    }

    fn screen<S: KeyValueStore>(tui: &mut TuiApp<S>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| tui.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_typing_and_enter_adds_task() {
        let mut tui = tui();
        type_str(&mut tui, "Write spec");
        press(&mut tui, KeyCode::Tab);
        type_str(&mut tui, "docs");
        press(&mut tui, KeyCode::Enter);

        let tasks = tui.app.store().tasks();
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[3].name, "Write spec");
        assert_eq!(tui.app.form.current_field, FormField::Name);
        assert_eq!(tui.task_list_state.selected(), Some(3));
    }

    #[test]
    fn test_enter_with_blank_tag_does_nothing() {
        let mut tui = tui();
        type_str(&mut tui, "only name");
        press(&mut tui, KeyCode::Enter);
        assert_eq!(tui.app.store().tasks().len(), 3);
        assert_eq!(tui.app.form.name.value, "only name");
        assert!(tui.status_message.is_empty());
    }

    #[test]
    fn test_complete_from_list() {
        let mut tui = tui();
        press(&mut tui, KeyCode::Tab);
        press(&mut tui, KeyCode::Tab);
        assert_eq!(tui.focus, Focus::TaskList);

        press(&mut tui, KeyCode::Down);
        press(&mut tui, KeyCode::Enter);
        assert!(tui.app.store().get(2).unwrap().completed);
        assert_eq!(tui.app.view().counter.label, "2 tarefas concluídas");

        // 'c' in the list completes; in the form it types.
        press(&mut tui, KeyCode::Up);
        press(&mut tui, KeyCode::Char('c'));
        assert!(tui.app.store().get(1).unwrap().completed);
    }

    #[test]
    fn test_focus_cycle() {
        let mut tui = tui();
        press(&mut tui, KeyCode::BackTab);
        assert_eq!(tui.focus, Focus::TaskList);
        press(&mut tui, KeyCode::BackTab);
        assert_eq!(tui.focus, Focus::Form);
        assert_eq!(tui.app.form.current_field, FormField::Tag);
        press(&mut tui, KeyCode::Tab);
        press(&mut tui, KeyCode::Tab);
        assert_eq!(tui.focus, Focus::Form);
        assert_eq!(tui.app.form.current_field, FormField::Name);
    }

    #[test]
    fn test_escape_quits() {
        let mut tui = tui();
        assert!(!press(&mut tui, KeyCode::Char('x')));
        assert!(press(&mut tui, KeyCode::Esc));
        assert!(tui.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_screen_shows_tasks_and_counter() {
        let mut tui = tui();
        let text = screen(&mut tui);
        assert!(text.contains("GERENCIADOR DE TAREFAS"));
        assert!(text.contains("Implementar tela de listagem"));
        assert!(text.contains("Concluir"));
        assert!(text.contains("1 tarefa concluída"));
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_click_on_row_completes_task() {
        let mut tui = tui();
        // Header and form take six lines; the table adds a border and its header row.
        screen(&mut tui);
        let first_row = 8;

        tui.handle_mouse(click(10, first_row + 1));
        assert!(tui.app.store().get(2).unwrap().completed);
        assert!(!tui.app.store().get(1).unwrap().completed);
        assert_eq!(tui.focus, Focus::TaskList);
        assert_eq!(tui.task_list_state.selected(), Some(1));
        assert_eq!(tui.app.view().counter.label, "2 tarefas concluídas");

        // Clicks on a done task or outside the rows change nothing.
        tui.handle_mouse(click(10, first_row + 2));
        tui.handle_mouse(click(10, first_row - 1));
        tui.handle_mouse(click(10, first_row + 5));
        assert!(!tui.app.store().get(1).unwrap().completed);
        assert_eq!(tui.app.view().counter.label, "2 tarefas concluídas");

        let mut moved = click(10, first_row);
        moved.kind = MouseEventKind::Moved;
        tui.handle_mouse(moved);
        assert!(!tui.app.store().get(1).unwrap().completed);
    }

    /// Memory storage whose writes start failing once `refuse` is set.
    #[derive(Debug, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        refuse: Rc<Flag<bool>>,
    }

    impl KeyValueStore for FlakyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.refuse.get() {
                return Err(StorageError::Io(io::Error::other("disk full")));
            }
            self.inner.set_item(key, value)
        }
    }

    fn flaky_tui() -> (TuiApp<FlakyStorage>, Rc<Flag<bool>>) {
        let storage = FlakyStorage::default();
        let refuse = Rc::clone(&storage.refuse);
        (TuiApp::new(App::bootstrap(storage).unwrap()), refuse)
    }

    #[test]
    fn test_failed_add_shows_error_and_keeps_running() {
        let (mut tui, refuse) = flaky_tui();
        refuse.set(true);

        type_str(&mut tui, "Write spec");
        press(&mut tui, KeyCode::Tab);
        type_str(&mut tui, "docs");
        assert!(!press(&mut tui, KeyCode::Enter));

        assert!(tui.status_message.starts_with("Erro ao salvar:"));
        assert_eq!(tui.app.store().tasks().len(), 3);
        assert_eq!(tui.app.store().next_id(), 4);
        assert_eq!(tui.app.view().list.len(), 3);
        assert_eq!(tui.app.form.name.value, "Write spec");
        assert_eq!(tui.app.form.tag.value, "docs");
        assert!(screen(&mut tui).contains("Erro ao salvar: storage I/O failed: disk full"));

        // Once writes work again the same input goes through.
        refuse.set(false);
        press(&mut tui, KeyCode::Enter);
        assert!(tui.status_message.is_empty());
        assert_eq!(tui.app.store().tasks().len(), 4);
        assert_eq!(tui.app.store().tasks()[3].id, 4);
    }

    #[test]
    fn test_failed_complete_shows_error_and_keeps_running() {
        let (mut tui, refuse) = flaky_tui();
        refuse.set(true);

        press(&mut tui, KeyCode::BackTab);
        assert!(!press(&mut tui, KeyCode::Enter));

        assert!(tui.status_message.starts_with("Erro ao salvar:"));
        assert!(!tui.app.store().get(1).unwrap().completed);
        assert_eq!(tui.app.view().list.completable_at(0), Some(1));
        assert_eq!(tui.app.view().counter.label, "1 tarefa concluída");
        assert!(!press(&mut tui, KeyCode::Down));
        assert!(tui.status_message.is_empty());
    }
}
