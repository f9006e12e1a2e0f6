
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    OpenForm,
    OpenSuccess,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Form,
    Success,
}

/// What the booking modal markup should look like for the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalView {
    pub active: bool,
    pub scroll_locked: bool,
    pub form_hidden: bool,
    pub header_hidden: bool,
    pub success_shown: bool,
}

/// The booking dialog. The visible pane lags behind the state while the
/// dialog is closing so the success message doesn't flip back to the form
/// mid-transition; [`BookingModal::finish_close`] catches it up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingModal {
    state: ModalState,
    pane: Pane,
}

impl Default for BookingModal {
    fn default() -> Self {
        Self { state: ModalState::Closed, pane: Pane::Form }
    }
}

impl BookingModal {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    /// Returns false when the dialog was already open.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.state = ModalState::OpenForm;
        self.pane = Pane::Form;
        true
    }

    pub fn submit_succeeded(&mut self) -> bool {
        if self.state != ModalState::OpenForm {
            return false;
        }
        self.state = ModalState::OpenSuccess;
        self.pane = Pane::Success;
        true
    }

    /// Returns false when the dialog was already closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = ModalState::Closed;
        true
    }

    /// Runs once the close transition is over. Returns whether the form
    /// fields should be cleared.
    pub fn finish_close(&mut self) -> bool {
        if self.state == ModalState::OpenSuccess {
            return false;
        }
        self.pane = Pane::Form;
        true
    }

    pub fn view(&self) -> ModalView {
        let success = self.pane == Pane::Success;
        ModalView {
            active: self.is_open(),
            scroll_locked: self.is_open(),
            form_hidden: success,
            header_hidden: success,
            success_shown: success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_showing_form() {
        let modal = BookingModal::new();
        assert_eq!(modal.state(), ModalState::Closed);
        let view = modal.view();
        assert!(!view.active && !view.scroll_locked);
        assert!(!view.form_hidden && !view.success_shown);
    }

    #[test]
    fn success_round_trip() {
        let mut modal = BookingModal::new();
        assert!(modal.open());
        assert_eq!(modal.state(), ModalState::OpenForm);
        assert!(modal.view().scroll_locked);

        assert!(modal.submit_succeeded());
        assert_eq!(modal.state(), ModalState::OpenSuccess);
        let view = modal.view();
        assert!(view.form_hidden && view.header_hidden && view.success_shown);

        assert!(modal.close());
        assert_eq!(modal.state(), ModalState::Closed);
        let closing = modal.view();
        assert!(!closing.active && !closing.scroll_locked);
        // still showing success while the dialog fades out
        assert!(closing.success_shown);

        assert!(modal.finish_close());
        assert_eq!(modal.view(), BookingModal::new().view());
    }

    #[test]
    fn failed_submit_stays_on_form() {
        let mut modal = BookingModal::new();
        modal.open();
        // nothing to do on failure; the state machine is only told about success
        assert_eq!(modal.state(), ModalState::OpenForm);
        assert!(!modal.view().success_shown);
    }

    #[test]
    fn invalid_transitions_are_ignored() {
        let mut modal = BookingModal::new();
        assert!(!modal.close());
        assert!(!modal.submit_succeeded());
        modal.open();
        assert!(!modal.open());
        modal.submit_succeeded();
        assert!(!modal.submit_succeeded());
        assert_eq!(modal.state(), ModalState::OpenSuccess);
    }

    #[test]
    fn reopening_shows_the_form_again() {
        let mut modal = BookingModal::new();
        modal.open();
        modal.submit_succeeded();
        modal.close();
        modal.open();
        assert_eq!(modal.state(), ModalState::OpenForm);
        assert!(!modal.view().success_shown);
    }

    #[test]
    fn scroll_lock_follows_open_state() {
        let mut modal = BookingModal::new();
        for _ in 0..3 {
            modal.open();
            assert!(modal.view().scroll_locked);
            modal.close();
            assert!(!modal.view().scroll_locked);
        }
    }
}
