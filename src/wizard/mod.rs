//! Post-trip expense wizard
//!
//! A five-step, resumable form: one step per expense category followed by a
//! review step from which the claim is committed to an [`ExpenseSink`].
//!
//! # Example
//!
//! ```rust,ignore
//! let mut wizard = ExpenseWizard::new(today);
//! wizard.open();
//! wizard.set_cost(ExpenseCategory::Hotel, Money::parse("120.00")?)?;
//! while !wizard.step().is_review() {
//!     wizard.next();
//! }
//! let expense = wizard.commit(&sink, user_id, today)?;
//! ```

pub mod draft;
pub mod machine;
pub mod sink;
pub mod step;

pub use draft::{ExpenseDraft, MAX_CATEGORY_COST};
pub use machine::ExpenseWizard;
pub use sink::{ExpenseSink, ExpenseSubmission};
pub use step::{WizardStep, STEP_COUNT};
