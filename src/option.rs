/// One choice offered by a dialog: the label shown to the user and the value the
/// session resolves to when that label is picked.
///
/// Options are immutable once constructed. Their order within a session is their
/// display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOption<T> {
    label: String,
    value: T,
    is_default: bool,
}

impl<T> DialogOption<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
            is_default: false,
        }
    }

    /// An option the host should visually emphasize as the default action.
    pub fn preferred(label: impl Into<String>, value: T) -> Self {
        Self {
            is_default: true,
            ..Self::new(label, value)
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_preferred_options() {
        let proceed = DialogOption::preferred("Proceed", true);
        let cancel = DialogOption::new(String::from("Cancel"), false);

        assert_eq!(proceed.label(), "Proceed");
        assert!(*proceed.value());
        assert!(proceed.is_default());

        assert_eq!(cancel.label(), "Cancel");
        assert!(!*cancel.value());
        assert!(!cancel.is_default());
    }
}
