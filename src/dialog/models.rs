use snafu::OptionExt;

use super::client::{MalformedOutputSnafu, PromptError};

/// Button label that confirms a dropdown choice.
pub const CONFIRM_BUTTON: &str = "Add";
pub const CANCEL_BUTTON: &str = "Cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(String),
    Cancelled,
}

impl Selection {
    /// Reads `dropdown --string-output`, which prints the pressed button
    /// followed by the chosen item, one per line.
    pub fn from_dropdown_output(output: &str) -> Result<Self, PromptError> {
        let mut lines = output.lines();
        if lines.next().map(str::trim) != Some(CONFIRM_BUTTON) {
            return Ok(Selection::Cancelled);
        }

        let item = lines.next()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .context(MalformedOutputSnafu { output })?;
        Ok(Selection::Chosen(item.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_choice_is_selected() {
        assert_eq!(Selection::from_dropdown_output("Add\nHP-Color\n").unwrap(), Selection::Chosen("HP-Color".to_string()));
    }

    #[test]
    fn cancel_button_cancels() {
        assert_eq!(Selection::from_dropdown_output("Cancel\n").unwrap(), Selection::Cancelled);
    }

    #[test]
    fn closed_dialog_cancels() {
        assert_eq!(Selection::from_dropdown_output("").unwrap(), Selection::Cancelled);
    }

    #[test]
    fn confirmation_without_item_is_malformed() {
        assert!(matches!(Selection::from_dropdown_output("Add\n"), Err(PromptError::MalformedOutput { .. })));
    }
}
