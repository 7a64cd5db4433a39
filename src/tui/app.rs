//! Application state for the TUI
//!
//! The App struct holds the dashboard state (date filter, trip table, view
//! settings) and the user's expense wizard as last saved.

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::TripDeskResult;
use crate::models::{parse_date, DateSelection, Trip, UserId};
use crate::services::trip_filter::TripView;
use crate::services::{ExpenseWizardService, TripService};
use crate::storage::Storage;
use crate::wizard::ExpenseWizard;

use super::dialogs::expense_wizard::WizardFormState;
use super::widgets::TextInput;

/// Which dashboard element has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    From,
    To,
    #[default]
    Trips,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::From => Self::To,
            Self::To => Self::Trips,
            Self::Trips => Self::From,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::From => Self::Trips,
            Self::To => Self::From,
            Self::Trips => Self::To,
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    ExpenseWizard,
}

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,

    /// Employee whose trips and expenses are shown
    pub user_id: UserId,

    /// Date used for the default selection and fresh drafts
    pub today: NaiveDate,

    pub should_quit: bool,
    pub focus: Focus,
    pub from_input: TextInput,
    pub to_input: TextInput,

    /// Selection the trip table was last filtered with
    pub selection: DateSelection,
    pub view: TripView,
    pub trips: Vec<Trip>,
    pub selected_trip_index: usize,

    pub active_dialog: ActiveDialog,

    /// The wizard as it was last saved
    pub wizard: ExpenseWizard,
    pub wizard_form: WizardFormState,

    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Build the dashboard for a user, resuming an open wizard
    pub fn new(
        storage: &'a Storage,
        settings: &'a Settings,
        user_id: UserId,
        today: NaiveDate,
    ) -> TripDeskResult<Self> {
        let wizard = ExpenseWizardService::new(storage, today).load(user_id)?;
        let today_text = today.format("%Y-%m-%d").to_string();

        let mut app = Self {
            storage,
            settings,
            user_id,
            today,
            should_quit: false,
            focus: Focus::default(),
            from_input: TextInput::new().placeholder("YYYY-MM-DD").content(&today_text),
            to_input: TextInput::new().placeholder("YYYY-MM-DD").content(&today_text),
            selection: DateSelection::single(today),
            view: TripView {
                order: settings.trip_sort_order,
                detail: settings.trip_detail_column,
            },
            trips: Vec::new(),
            selected_trip_index: 0,
            active_dialog: ActiveDialog::None,
            wizard_form: WizardFormState::from_wizard(&wizard),
            wizard,
            status_message: None,
        };

        if app.wizard.is_open() {
            app.active_dialog = ActiveDialog::ExpenseWizard;
        }
        app.refresh_trips()?;

        Ok(app)
    }

    /// Session controller for this user's wizard
    pub fn wizard_service(&self) -> ExpenseWizardService<'a> {
        ExpenseWizardService::new(self.storage, self.today)
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Re-run the trip filter with the current selection and view
    pub fn refresh_trips(&mut self) -> TripDeskResult<()> {
        self.trips = TripService::new(self.storage).list_filtered(
            self.user_id,
            &self.selection,
            self.view.order,
        )?;
        self.selected_trip_index = self
            .selected_trip_index
            .min(self.trips.len().saturating_sub(1));
        Ok(())
    }

    /// Parse the from/to inputs into a new selection and refilter
    ///
    /// An empty `to` means a single day. The previous selection stays if the
    /// inputs are invalid.
    pub fn apply_filter(&mut self) -> TripDeskResult<()> {
        let from = parse_date(self.from_input.value())?;
        let selection = if self.to_input.value().is_empty() {
            DateSelection::single(from)
        } else {
            let to = parse_date(self.to_input.value())?;
            if from == to {
                DateSelection::single(from)
            } else {
                DateSelection::range(from, to)?
            }
        };

        self.selection = selection;
        self.selected_trip_index = 0;
        self.refresh_trips()
    }

    /// Back to the single-day selection of today
    pub fn reset_filter(&mut self) -> TripDeskResult<()> {
        let today_text = self.today.format("%Y-%m-%d").to_string();
        self.from_input.set(today_text.clone());
        self.to_input.set(today_text);
        self.apply_filter()
    }

    pub fn toggle_order(&mut self) -> TripDeskResult<()> {
        self.view.order = self.view.order.toggle();
        self.refresh_trips()
    }

    pub fn cycle_column(&mut self) {
        self.view.detail = self.view.detail.cycle();
    }

    pub fn move_up(&mut self) {
        self.selected_trip_index = self.selected_trip_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_trip_index + 1 < self.trips.len() {
            self.selected_trip_index += 1;
        }
    }

    /// The focused date input, if a date input has focus
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Focus::From => Some(&mut self.from_input),
            Focus::To => Some(&mut self.to_input),
            Focus::Trips => None,
        }
    }

    /// Open (or resume) the expense wizard dialog
    pub fn open_wizard(&mut self) -> TripDeskResult<()> {
        let wizard = self.wizard_service().open(self.user_id)?;
        self.show_wizard_state(wizard);
        self.active_dialog = ActiveDialog::ExpenseWizard;
        Ok(())
    }

    /// Hide the wizard dialog; the draft is kept
    pub fn close_wizard(&mut self) -> TripDeskResult<()> {
        self.wizard = self.wizard_service().close(self.user_id)?;
        self.active_dialog = ActiveDialog::None;
        Ok(())
    }

    /// Take over a wizard state returned by the session controller
    pub fn show_wizard_state(&mut self, wizard: ExpenseWizard) {
        let step_changed = wizard.step() != self.wizard.step();
        self.wizard = wizard;
        if step_changed {
            self.wizard_form = WizardFormState::from_wizard(&self.wizard);
        } else {
            self.wizard_form.refresh(&self.wizard);
        }
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    /// The selection currently shown, for headings
    pub fn selection_label(&self) -> String {
        let format = self.settings.date_format.as_str();
        match self.selection {
            DateSelection::Single(date) => date.format(format).to_string(),
            DateSelection::Range { from, to } => {
                format!("{} to {}", from.format(format), to.format(format))
            }
        }
    }
}
