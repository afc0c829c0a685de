use std::str::FromStr;

use thiserror::Error;

/// Main menu entries. The numeric codes are what the user types and stay the
/// same between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    ListExercises,
    AddExercise,
    AddRecord,
    ListRecords,
    Backup,
    Quit,
}

impl MenuSelection {
    pub const ALL: [MenuSelection; 6] = [
        MenuSelection::ListExercises,
        MenuSelection::AddExercise,
        MenuSelection::AddRecord,
        MenuSelection::ListRecords,
        MenuSelection::Backup,
        MenuSelection::Quit,
    ];

    pub fn code(self) -> u32 {
        match self {
            MenuSelection::ListExercises => 1,
            MenuSelection::AddExercise => 2,
            MenuSelection::AddRecord => 3,
            MenuSelection::ListRecords => 4,
            MenuSelection::Backup => 5,
            MenuSelection::Quit => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuSelection::ListExercises => "List all available exercises",
            MenuSelection::AddExercise => "Add new exercise",
            MenuSelection::AddRecord => "Add new record",
            MenuSelection::ListRecords => "List records",
            MenuSelection::Backup => "Backup database to local folder",
            MenuSelection::Quit => "Quit",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|selection| selection.code() == code)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuInputError {
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("there is no menu option {0}")]
    UnknownCode(u32),
}

impl FromStr for MenuSelection {
    type Err = MenuInputError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let code = trimmed
            .parse::<u32>()
            .map_err(|_| MenuInputError::NotANumber(trimmed.to_string()))?;
        Self::from_code(code).ok_or(MenuInputError::UnknownCode(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("1", MenuSelection::ListExercises)]
    #[case("2", MenuSelection::AddExercise)]
    #[case(" 3 ", MenuSelection::AddRecord)]
    #[case("4", MenuSelection::ListRecords)]
    #[case("5", MenuSelection::Backup)]
    #[case("10", MenuSelection::Quit)]
    #[case("010", MenuSelection::Quit)]
    fn parses_known_codes(#[case] input: &str, #[case] expected: MenuSelection) {
        assert_eq!(input.parse::<MenuSelection>(), Ok(expected));
    }

    #[rstest]
    #[case("", MenuInputError::NotANumber(String::new()))]
    #[case("list", MenuInputError::NotANumber("list".into()))]
    #[case("-1", MenuInputError::NotANumber("-1".into()))]
    #[case("0", MenuInputError::UnknownCode(0))]
    #[case("6", MenuInputError::UnknownCode(6))]
    #[case("99", MenuInputError::UnknownCode(99))]
    fn rejects_other_input(#[case] input: &str, #[case] expected: MenuInputError) {
        assert_eq!(input.parse::<MenuSelection>(), Err(expected));
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = MenuSelection::ALL.iter().map(|s| s.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), MenuSelection::ALL.len());
    }
}
