use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{EmptyBatch, Exercise, SetBatch, SetEntry};

/// Internal representation of the "add exercise" form fields.
#[derive(Default, Clone)]
pub(crate) struct ExerciseForm {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) active: ExerciseField,
    pub(crate) error: Option<String>,
}

/// Fields available within the exercise form.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub(crate) enum ExerciseField {
    #[default]
    Name,
    Description,
}

impl ExerciseForm {
    /// Swap focus between the name and description fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ExerciseField::Name => ExerciseField::Description,
            ExerciseField::Description => ExerciseField::Name,
        };
    }

    /// Append a character to the active field. Control characters are refused.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            ExerciseField::Name => self.name.push(ch),
            ExerciseField::Description => self.description.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            ExerciseField::Name => {
                self.name.pop();
            }
            ExerciseField::Description => {
                self.description.pop();
            }
        }
    }

    /// Validate the inputs and return trimmed values ready for persistence.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Exercise name is required.".to_string());
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(format!("Enter a short description for {name}."));
        }
        Ok((name.to_string(), description.to_string()))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: ExerciseField) -> Line<'static> {
        let value = match field {
            ExerciseField::Name => &self.name,
            ExerciseField::Description => &self.description,
        };
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, field: ExerciseField) -> usize {
        match field {
            ExerciseField::Name => self.name.chars().count(),
            ExerciseField::Description => self.description.chars().count(),
        }
    }
}

/// What the set-entry prompt decided after the user pressed Enter.
#[derive(Debug, PartialEq)]
pub(crate) enum SetLineOutcome {
    /// A set was recorded in the form; keep prompting.
    Added,
    /// The line was malformed; the form carries the error and keeps prompting.
    Rejected,
    /// The quit token was entered and the collected sets are ready.
    Finished(Result<SetBatch, EmptyBatch>),
}

/// Prompt state for logging `WEIGHT REPS` sets against one exercise.
#[derive(Clone)]
pub(crate) struct SetLogForm {
    pub(crate) exercise: Exercise,
    pub(crate) input: String,
    pub(crate) entries: Vec<SetEntry>,
    pub(crate) error: Option<String>,
}

impl SetLogForm {
    pub(crate) fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            input: String::new(),
            entries: Vec::new(),
            error: None,
        }
    }

    /// Number shown in the "Set #n" prompt.
    pub(crate) fn next_set_number(&self) -> usize {
        self.entries.len() + 1
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.input.push(ch);
            self.error = None;
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    /// Consume the current input line. A line starting with `q` ends the
    /// exercise; anything else must be a `WEIGHT REPS` pair.
    pub(crate) fn submit_line(&mut self) -> SetLineOutcome {
        let line = std::mem::take(&mut self.input);
        let trimmed = line.trim();

        if trimmed
            .chars()
            .next()
            .is_some_and(|ch| ch.eq_ignore_ascii_case(&'q'))
        {
            return SetLineOutcome::Finished(SetBatch::new(std::mem::take(&mut self.entries)));
        }

        match trimmed.parse::<SetEntry>() {
            Ok(entry) => {
                self.entries.push(entry);
                self.error = None;
                SetLineOutcome::Added
            }
            Err(err) => {
                self.error = Some(format!("Invalid input ({err}), please try again!"));
                SetLineOutcome::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn squat() -> Exercise {
        Exercise {
            id: 1,
            name: "Squat".into(),
            description: "legs".into(),
        }
    }

    fn type_line(form: &mut SetLogForm, line: &str) -> SetLineOutcome {
        for ch in line.chars() {
            form.push_char(ch);
        }
        form.submit_line()
    }

    #[test]
    fn collects_sets_until_quit() {
        let mut form = SetLogForm::new(squat());
        assert_eq!(type_line(&mut form, "100 5"), SetLineOutcome::Added);
        assert_eq!(form.next_set_number(), 2);
        assert_eq!(type_line(&mut form, "oops"), SetLineOutcome::Rejected);
        assert!(form.error.is_some());
        assert_eq!(form.next_set_number(), 2);
        assert_eq!(type_line(&mut form, "102.5 3"), SetLineOutcome::Added);

        match type_line(&mut form, "quit") {
            SetLineOutcome::Finished(Ok(batch)) => assert_eq!(
                batch.entries(),
                &[
                    SetEntry { weight: 100.0, reps: 5 },
                    SetEntry { weight: 102.5, reps: 3 },
                ]
            ),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn quitting_without_sets_yields_empty_batch() {
        let mut form = SetLogForm::new(squat());
        assert_eq!(
            type_line(&mut form, "Q"),
            SetLineOutcome::Finished(Err(EmptyBatch))
        );
    }

    #[test]
    fn exercise_form_requires_both_fields() {
        let mut form = ExerciseForm::default();
        assert!(form.parse_inputs().is_err());
        for ch in "  Squat ".chars() {
            form.push_char(ch);
        }
        assert!(form.parse_inputs().is_err());
        form.toggle_field();
        for ch in "Barbell back squat".chars() {
            form.push_char(ch);
        }
        assert_eq!(
            form.parse_inputs(),
            Ok(("Squat".to_string(), "Barbell back squat".to_string()))
        );
    }
}
