use std::cmp::min;

use crate::models::{Exercise, Record};

/// What the user wants to do with the exercise they are about to pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PickPurpose {
    AddRecord,
    ListRecords,
}

impl PickPurpose {
    pub(crate) fn title(self) -> &'static str {
        match self {
            PickPurpose::AddRecord => "Select exercise to log",
            PickPurpose::ListRecords => "Select exercise to review",
        }
    }
}

/// Scrollable list of exercises with a highlighted row.
pub(crate) struct ExerciseList {
    pub(crate) exercises: Vec<Exercise>,
    pub(crate) selected: usize,
}

impl ExerciseList {
    pub(crate) fn new(exercises: Vec<Exercise>) -> Self {
        Self {
            exercises,
            selected: 0,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        if self.exercises.is_empty() {
            self.selected = 0;
            return;
        }
        let len = self.exercises.len() as isize;
        let next = (self.selected as isize + delta).clamp(0, len - 1);
        self.selected = next as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.exercises.len().saturating_sub(1);
    }

    pub(crate) fn current(&self) -> Option<&Exercise> {
        self.exercises.get(self.selected)
    }
}

/// Exercise list shown while choosing which exercise to log or review.
pub(crate) struct ExercisePicker {
    pub(crate) purpose: PickPurpose,
    pub(crate) list: ExerciseList,
}

/// Historical sets for one exercise, newest first.
pub(crate) struct RecordsScreen {
    pub(crate) exercise: Exercise,
    pub(crate) records: Vec<Record>,
    pub(crate) scroll: usize,
}

impl RecordsScreen {
    pub(crate) fn new(exercise: Exercise, records: Vec<Record>) -> Self {
        Self {
            exercise,
            records,
            scroll: 0,
        }
    }

    pub(crate) fn scroll_by(&mut self, delta: isize) {
        let max = self.records.len().saturating_sub(1) as isize;
        self.scroll = (self.scroll as isize + delta).clamp(0, max) as usize;
    }

    /// Records visible in a window of `height` rows.
    pub(crate) fn visible(&self, height: usize) -> &[Record] {
        let start = min(self.scroll, self.records.len());
        let end = min(start + height, self.records.len());
        &self.records[start..end]
    }
}
