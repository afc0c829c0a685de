use std::mem;
use std::path::PathBuf;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::db::Store;
use crate::error::StoreError;
use crate::models::{EmptyBatch, SetBatch};

use super::forms::{ExerciseField, ExerciseForm, SetLineOutcome, SetLogForm};
use super::helpers::{centered_rect, surface_error};
use super::menu::MenuSelection;
use super::screens::{ExerciseList, ExercisePicker, PickPurpose, RecordsScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Longest menu code a user can type.
const MENU_INPUT_LIMIT: usize = 4;
const BANNER: &str = "GymLogger - CL";

/// High-level navigation states.
enum Screen {
    Menu,
    Exercises(ExerciseList),
    Picker(ExercisePicker),
    Records(RecordsScreen),
}

/// Popups layered over the current screen.
enum Mode {
    Normal,
    AddingExercise(ExerciseForm),
    LoggingSets(SetLogForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. Owns the store for the lifetime of the UI.
pub struct App {
    store: Store,
    backup_dir: PathBuf,
    screen: Screen,
    mode: Mode,
    menu_input: String,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: Store, backup_dir: PathBuf) -> Self {
        Self {
            store,
            backup_dir,
            screen: Screen::Menu,
            mode: Mode::Normal,
            menu_input: String::new(),
            status: None,
        }
    }

    /// Hand the store back so the caller can shut it down.
    pub fn into_store(self) -> Store {
        self.store
    }

    /// Process one key press. Returns `true` once the user chose to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingExercise(form) => self.handle_add_exercise(code, form),
            Mode::LoggingSets(form) => self.handle_log_sets(code, form),
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match &mut self.screen {
            Screen::Menu => match code {
                KeyCode::Enter => return self.submit_menu_input(exit),
                KeyCode::Backspace => {
                    self.menu_input.pop();
                }
                KeyCode::Esc => self.menu_input.clear(),
                KeyCode::Char(ch) if !ch.is_control() => {
                    if self.menu_input.chars().count() < MENU_INPUT_LIMIT {
                        self.menu_input.push(ch);
                    }
                }
                _ => {}
            },
            Screen::Exercises(list) => match code {
                KeyCode::Up => list.move_selection(-1),
                KeyCode::Down => list.move_selection(1),
                KeyCode::PageUp => list.move_selection(-5),
                KeyCode::PageDown => list.move_selection(5),
                KeyCode::Home => list.select_first(),
                KeyCode::End => list.select_last(),
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.back_to_menu(),
                _ => {}
            },
            Screen::Picker(picker) => match code {
                KeyCode::Up => picker.list.move_selection(-1),
                KeyCode::Down => picker.list.move_selection(1),
                KeyCode::PageUp => picker.list.move_selection(-5),
                KeyCode::PageDown => picker.list.move_selection(5),
                KeyCode::Home => picker.list.select_first(),
                KeyCode::End => picker.list.select_last(),
                KeyCode::Esc => self.back_to_menu(),
                KeyCode::Enter => {
                    let purpose = picker.purpose;
                    if let Some(exercise) = picker.list.current().cloned() {
                        match purpose {
                            PickPurpose::AddRecord => {
                                self.clear_status();
                                return Mode::LoggingSets(SetLogForm::new(exercise));
                            }
                            PickPurpose::ListRecords => {
                                match self.store.records_for_exercise(exercise.id) {
                                    Ok(records) => {
                                        self.clear_status();
                                        self.screen =
                                            Screen::Records(RecordsScreen::new(exercise, records));
                                    }
                                    Err(err) => self.report(err),
                                }
                            }
                        }
                    }
                }
                _ => {}
            },
            Screen::Records(records) => match code {
                KeyCode::Up => records.scroll_by(-1),
                KeyCode::Down => records.scroll_by(1),
                KeyCode::PageUp => records.scroll_by(-10),
                KeyCode::PageDown => records.scroll_by(10),
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.back_to_menu(),
                _ => {}
            },
        }
        Mode::Normal
    }

    /// Parse the typed menu code and run its handler. Anything that is not a
    /// known code re-prompts.
    fn submit_menu_input(&mut self, exit: &mut bool) -> Mode {
        let input = mem::take(&mut self.menu_input);
        match input.parse::<MenuSelection>() {
            Ok(selection) => {
                self.clear_status();
                match self.dispatch(selection, exit) {
                    Ok(mode) => mode,
                    Err(err) => {
                        self.report(err);
                        Mode::Normal
                    }
                }
            }
            Err(err) => {
                log::debug!("rejected menu input: {err}");
                self.set_status("Invalid input, please try again!", StatusKind::Error);
                Mode::Normal
            }
        }
    }

    /// Map each menu entry to its handler.
    fn dispatch(&mut self, selection: MenuSelection, exit: &mut bool) -> Result<Mode, StoreError> {
        match selection {
            MenuSelection::ListExercises => {
                let exercises = self.store.list_exercises()?;
                self.screen = Screen::Exercises(ExerciseList::new(exercises));
                Ok(Mode::Normal)
            }
            MenuSelection::AddExercise => Ok(Mode::AddingExercise(ExerciseForm::default())),
            MenuSelection::AddRecord => {
                self.open_picker(PickPurpose::AddRecord)?;
                Ok(Mode::Normal)
            }
            MenuSelection::ListRecords => {
                self.open_picker(PickPurpose::ListRecords)?;
                Ok(Mode::Normal)
            }
            MenuSelection::Backup => {
                let target = self.store.backup_to(&self.backup_dir)?;
                self.set_status(
                    format!("Backup written to {}.", target.display()),
                    StatusKind::Info,
                );
                Ok(Mode::Normal)
            }
            MenuSelection::Quit => {
                *exit = true;
                Ok(Mode::Normal)
            }
        }
    }

    fn open_picker(&mut self, purpose: PickPurpose) -> Result<(), StoreError> {
        let list = ExerciseList::new(self.store.list_exercises()?);
        if list.is_empty() {
            self.set_status(
                format!(
                    "No exercises yet. Add one first (option {}).",
                    MenuSelection::AddExercise.code()
                ),
                StatusKind::Warning,
            );
        } else {
            self.screen = Screen::Picker(ExercisePicker { purpose, list });
        }
        Ok(())
    }

    fn handle_add_exercise(&mut self, code: KeyCode, mut form: ExerciseForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add exercise cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let (name, description) = match form.parse_inputs() {
                    Ok(values) => values,
                    Err(message) => {
                        form.error = Some(message);
                        return Mode::AddingExercise(form);
                    }
                };
                match self.store.add_exercise(&name, &description) {
                    Ok(exercise) => {
                        self.set_status(
                            format!("Added exercise #{} {}.", exercise.id, exercise.name),
                            StatusKind::Info,
                        );
                        return Mode::Normal;
                    }
                    Err(err) if err.is_constraint_violation() => {
                        log::warn!("duplicate exercise {name:?}: {}", surface_error(&err));
                        form.error = Some(format!(
                            "{name} with this description already exists."
                        ));
                    }
                    Err(err) => {
                        form.error = Some(surface_error(&err));
                        self.report(err);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingExercise(form)
    }

    fn handle_log_sets(&mut self, code: KeyCode, mut form: SetLogForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Logging cancelled; no sets were saved.", StatusKind::Info);
                self.back_to_menu();
                return Mode::Normal;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => form.push_char(ch),
            KeyCode::Enter => match form.submit_line() {
                SetLineOutcome::Added | SetLineOutcome::Rejected => {}
                SetLineOutcome::Finished(batch) => {
                    self.save_sets(&form, batch);
                    self.back_to_menu();
                    return Mode::Normal;
                }
            },
            _ => {}
        }
        Mode::LoggingSets(form)
    }

    fn save_sets(&mut self, form: &SetLogForm, batch: Result<SetBatch, EmptyBatch>) {
        let batch = match batch {
            Ok(batch) => batch,
            Err(EmptyBatch) => {
                self.set_status("Aborted operation for empty record.", StatusKind::Warning);
                return;
            }
        };

        match self.store.add_records(form.exercise.id, &batch) {
            Ok(written) => self.set_status(
                format!("Logged {} sets for {}.", written.len(), form.exercise.name),
                StatusKind::Info,
            ),
            Err(err) => self.report(err),
        }
    }

    fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
    }

    /// Log a store failure and show it in the footer. The current operation is
    /// abandoned; the menu stays usable.
    fn report(&mut self, err: StoreError) {
        let message = surface_error(&err);
        log::error!("{message}");
        self.set_status(message, StatusKind::Error);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Menu => self.draw_menu(frame, content_area),
            Screen::Exercises(list) => {
                self.draw_exercise_list(frame, content_area, "Available Exercises", list)
            }
            Screen::Picker(picker) => {
                self.draw_exercise_list(frame, content_area, picker.purpose.title(), &picker.list)
            }
            Screen::Records(records) => self.draw_records(frame, content_area, records),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingExercise(form) => self.draw_exercise_form(frame, area, form),
            Mode::LoggingSets(form) => self.draw_set_log(frame, area, form),
            Mode::Normal => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                BANNER,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Main Menu Selections:"),
            Line::from("----------------------------"),
        ];
        for selection in MenuSelection::ALL {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("    {:<3}", selection.code()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(" - {}", selection.label())),
            ]));
        }
        lines.push(Line::from(""));

        let prompt = "Enter Number: ";
        lines.push(Line::from(vec![
            Span::raw(prompt),
            Span::styled(self.menu_input.clone(), Style::default().fg(Color::Yellow)),
        ]));
        let prompt_row = lines.len() as u16 - 1;

        let block = Block::default().borders(Borders::ALL).title("Main Menu");
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if matches!(self.mode, Mode::Normal) && prompt_row < inner.height {
            let cursor_x = inner.x + (prompt.len() + self.menu_input.chars().count()) as u16;
            frame.set_cursor_position((cursor_x, inner.y + prompt_row));
        }
    }

    fn draw_exercise_list(&self, frame: &mut Frame, area: Rect, title: &str, list: &ExerciseList) {
        let block = Block::default().borders(Borders::ALL).title(title.to_string());
        if list.is_empty() {
            let message = Paragraph::new("No exercises yet. Choose option 2 to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = list
            .exercises
            .iter()
            .map(|exercise| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        exercise.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("      - {}", exercise.description),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let widget = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(list.selected));
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn draw_records(&self, frame: &mut Frame, area: Rect, screen: &RecordsScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                screen.exercise.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{} sets logged", screen.records.len())),
        ])
        .block(Block::default().borders(Borders::ALL).title("Records"));
        frame.render_widget(header, chunks[0]);

        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(chunks[1]);
        if screen.records.is_empty() {
            let message = Paragraph::new("No sets logged for this exercise yet.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, chunks[1]);
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{:<19}  {:>11}  {:>8}", "Time", "Repetitions", "Weight"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("-".repeat(44)),
        ];
        let rows = (inner.height as usize).saturating_sub(lines.len());
        for record in screen.visible(rows) {
            lines.push(Line::from(format!(
                "{:<19}  {:>11}  {:>8.2}",
                record.display_time(),
                record.reps,
                record.weight
            )));
        }
        frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::AddingExercise(_)) => &[
                ("[Tab]", " Switch field   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            (_, Mode::LoggingSets(_)) => &[
                ("[Enter]", " Add set   "),
                ("[q Enter]", " Finish   "),
                ("[Esc]", " Discard"),
            ],
            (Screen::Menu, _) => &[
                ("[0-9]", " Type option   "),
                ("[Enter]", " Select   "),
                ("[Ctrl+C]", " Quit"),
            ],
            (Screen::Exercises(_), _) | (Screen::Records(_), _) => {
                &[("[↑↓]", " Scroll   "), ("[Esc]", " Back")]
            }
            (Screen::Picker(_), _) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Choose   "),
                ("[Esc]", " Back"),
            ],
        };

        Line::from(
            hints
                .iter()
                .flat_map(|(key, label)| {
                    [
                        Span::styled(key.to_string(), key_style),
                        Span::raw(label.to_string()),
                    ]
                })
                .collect::<Vec<_>>(),
        )
    }

    fn draw_exercise_form(&self, frame: &mut Frame, area: Rect, form: &ExerciseForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Exercise").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Name", ExerciseField::Name),
            form.build_line("Description", ExerciseField::Description),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            ExerciseField::Name => ("Name: ".len(), 0),
            ExerciseField::Description => ("Description: ".len(), 1),
        };
        let cursor_x = inner.x + (prefix + form.value_len(form.active)) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_set_log(&self, frame: &mut Frame, area: Rect, form: &SetLogForm) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!("Log sets: {}", form.exercise.name))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = form
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                Line::from(Span::styled(
                    format!("Set #{:<3} {:>8.2} x {}", idx + 1, entry.weight, entry.reps),
                    Style::default().fg(Color::Gray),
                ))
            })
            .collect();

        // Keep the prompt visible when many sets were entered.
        let reserved = 4;
        let overflow = lines.len().saturating_sub((inner.height as usize).saturating_sub(reserved));
        lines.drain(..overflow);

        lines.push(Line::from(format!(
            "Set #{}, type q[uit] to finish the exercise:",
            form.next_set_number()
        )));
        let prompt = "Enter WEIGHT REPS: ";
        lines.push(Line::from(vec![
            Span::raw(prompt),
            Span::styled(form.input.clone(), Style::default().fg(Color::Yellow)),
        ]));
        let prompt_row = lines.len() as u16 - 1;
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        let cursor_x = inner.x + (prompt.len() + form.input.chars().count()) as u16;
        frame.set_cursor_position((cursor_x, inner.y + prompt_row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Location;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    fn app() -> (TempDir, App) {
        let tmp = tempdir().unwrap();
        let store = Store::open(&Location::new(tmp.path().join("data"))).unwrap();
        let app = App::new(store, tmp.path().join("backups"));
        (tmp, app)
    }

    fn type_keys(app: &mut App, text: &str) -> bool {
        let mut exit = false;
        for ch in text.chars() {
            exit |= app.handle_key(KeyCode::Char(ch));
        }
        exit | app.handle_key(KeyCode::Enter)
    }

    fn status(app: &App) -> Option<(String, StatusKind)> {
        app.status.as_ref().map(|s| (s.text.clone(), s.kind))
    }

    #[test]
    fn unknown_codes_reprompt() {
        let (_tmp, mut app) = app();
        assert!(!type_keys(&mut app, "7"));
        assert_eq!(
            status(&app),
            Some(("Invalid input, please try again!".into(), StatusKind::Error))
        );
        assert!(!type_keys(&mut app, "abc"));
        assert!(matches!(app.screen, Screen::Menu));
        assert!(app.menu_input.is_empty());
    }

    #[test]
    fn quit_code_exits() {
        let (_tmp, mut app) = app();
        assert!(type_keys(&mut app, "10"));
    }

    #[test]
    fn add_exercise_then_log_and_review_sets() {
        let (_tmp, mut app) = app();

        type_keys(&mut app, "2");
        assert!(matches!(app.mode, Mode::AddingExercise(_)));
        for ch in "Squat".chars() {
            app.handle_key(KeyCode::Char(ch));
        }
        app.handle_key(KeyCode::Tab);
        type_keys(&mut app, "Barbell back squat");
        assert!(matches!(app.mode, Mode::Normal));

        type_keys(&mut app, "3");
        assert!(matches!(app.screen, Screen::Picker(_)));
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.mode, Mode::LoggingSets(_)));
        type_keys(&mut app, "100 5");
        type_keys(&mut app, "not a set");
        type_keys(&mut app, "102.5 3");
        type_keys(&mut app, "q");
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            status(&app),
            Some(("Logged 2 sets for Squat.".into(), StatusKind::Info))
        );

        type_keys(&mut app, "4");
        app.handle_key(KeyCode::Enter);
        match &app.screen {
            Screen::Records(screen) => {
                let reps: Vec<_> = screen.records.iter().map(|r| r.reps).collect();
                assert_eq!(reps, vec![3, 5]);
            }
            _ => panic!("expected the records screen"),
        }
    }

    #[test]
    fn empty_set_log_touches_nothing() {
        let (_tmp, mut app) = app();
        let squat = app.store.add_exercise("Squat", "legs").unwrap();

        type_keys(&mut app, "3");
        app.handle_key(KeyCode::Enter);
        type_keys(&mut app, "quit");
        assert_eq!(
            status(&app),
            Some((
                "Aborted operation for empty record.".into(),
                StatusKind::Warning
            ))
        );
        assert!(app.store.records_for_exercise(squat.id).unwrap().is_empty());
    }

    #[test]
    fn duplicate_exercise_keeps_the_form_open() {
        let (_tmp, mut app) = app();
        app.store.add_exercise("Squat", "legs").unwrap();

        type_keys(&mut app, "2");
        for ch in "Squat".chars() {
            app.handle_key(KeyCode::Char(ch));
        }
        app.handle_key(KeyCode::Tab);
        type_keys(&mut app, "legs");

        match &app.mode {
            Mode::AddingExercise(form) => assert_eq!(
                form.error.as_deref(),
                Some("Squat with this description already exists.")
            ),
            _ => panic!("form should stay open"),
        }
        assert_eq!(app.store.list_exercises().unwrap().len(), 1);
    }

    #[test]
    fn picker_needs_exercises() {
        let (_tmp, mut app) = app();
        type_keys(&mut app, "4");
        assert!(matches!(app.screen, Screen::Menu));
        assert_eq!(status(&app).map(|(_, kind)| kind), Some(StatusKind::Warning));
    }

    #[test]
    fn store_failures_are_reported_not_fatal() {
        let (_tmp, mut app) = app();
        app.store.add_exercise("Squat", "legs").unwrap();
        {
            let conn = rusqlite::Connection::open(app.store.path()).unwrap();
            conn.execute("DROP TABLE exercises", []).unwrap();
        }

        assert!(!type_keys(&mut app, "1"));
        let (text, kind) = status(&app).unwrap();
        assert_eq!(kind, StatusKind::Error);
        assert!(text.contains("no such table"), "{text}");
        assert!(matches!(app.screen, Screen::Menu));
    }

    #[test]
    fn backup_reports_target() {
        let (tmp, mut app) = app();
        type_keys(&mut app, "5");
        let target = tmp.path().join("backups").join("backup.sqlite3");
        assert!(target.is_file());
        assert_eq!(
            status(&app),
            Some((
                format!("Backup written to {}.", target.display()),
                StatusKind::Info
            ))
        );
    }
}
