//! Delete confirmation dialog.
//!
//! [`confirm_dialog`] is a pure function of its four inputs. It owns no
//! state: the caller keeps the visibility flag and the target, and receives
//! the user's answer through the callbacks.

use crate::types::{Subject, SubjectId};

pub const HEADING: &str = "ARE YOU SURE TO DELETE?";
pub const CONFIRM_LABEL: &str = "Yes";
pub const CANCEL_LABEL: &str = "No";

pub struct ConfirmDialog<'a, C, X>
where
    C: FnOnce(SubjectId),
    X: FnOnce(),
{
    target: Option<&'a Subject>,
    on_confirm: C,
    on_cancel: X,
}

/// Returns `None` when the dialog is hidden, whatever the other inputs are.
pub fn confirm_dialog<'a, C, X>(
    visible: bool,
    target: Option<&'a Subject>,
    on_confirm: C,
    on_cancel: X,
) -> Option<ConfirmDialog<'a, C, X>>
where
    C: FnOnce(SubjectId),
    X: FnOnce(),
{
    if !visible {
        return None;
    }
    Some(ConfirmDialog {
        target,
        on_confirm,
        on_cancel,
    })
}

impl<'a, C, X> ConfirmDialog<'a, C, X>
where
    C: FnOnce(SubjectId),
    X: FnOnce(),
{
    pub fn heading(&self) -> &'static str {
        HEADING
    }

    pub fn target(&self) -> Option<&'a Subject> {
        self.target
    }

    /// Identifying lines: full name, then locality. Empty without a target.
    pub fn lines(&self) -> Vec<String> {
        match self.target {
            Some(subject) => vec![subject.full_name(), subject.locality.clone()],
            None => Vec::new(),
        }
    }

    pub fn actions(&self) -> [&'static str; 2] {
        [CONFIRM_LABEL, CANCEL_LABEL]
    }

    /// Passes the target id to the confirm callback. Without a target this
    /// does nothing and returns false.
    pub fn confirm(self) -> bool {
        match self.target {
            Some(subject) => {
                (self.on_confirm)(subject.id);
                true
            }
            None => {
                tracing::debug!("Delete confirmed with no target, ignoring");
                false
            }
        }
    }

    pub fn cancel(self) {
        (self.on_cancel)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn subject() -> Subject {
        Subject {
            id: SubjectId(9),
            first_name: "John".into(),
            last_name: "Doe".into(),
            locality: "San Isidro".into(),
        }
    }

    #[test]
    fn test_hidden_renders_nothing() {
        let s = subject();
        assert!(confirm_dialog(false, Some(&s), |_| {}, || {}).is_none());
        assert!(confirm_dialog(false, None, |_| {}, || {}).is_none());
    }

    #[test]
    fn test_visible_with_target_shows_identity_and_confirms_id() {
        let s = subject();
        let confirmed = RefCell::new(Vec::new());
        let dialog = confirm_dialog(true, Some(&s), |id| confirmed.borrow_mut().push(id), || {}).unwrap();

        assert_eq!(dialog.heading(), HEADING);
        assert_eq!(dialog.lines(), vec!["John Doe".to_string(), "San Isidro".to_string()]);
        assert_eq!(dialog.actions(), ["Yes", "No"]);
        assert!(dialog.confirm());
        assert_eq!(confirmed.into_inner(), vec![SubjectId(9)]);
    }

    #[test]
    fn test_visible_without_target_guards_confirm() {
        let called = Cell::new(false);
        let dialog = confirm_dialog(true, None, |_| called.set(true), || {}).unwrap();

        assert!(dialog.lines().is_empty());
        assert_eq!(dialog.actions().len(), 2);
        assert!(!dialog.confirm());
        assert!(!called.get());
    }

    #[test]
    fn test_cancel_invokes_only_cancel() {
        let s = subject();
        let confirmed = Cell::new(false);
        let cancelled = Cell::new(false);
        let dialog = confirm_dialog(true, Some(&s), |_| confirmed.set(true), || cancelled.set(true)).unwrap();
        dialog.cancel();
        assert!(cancelled.get());
        assert!(!confirmed.get());
    }
}
