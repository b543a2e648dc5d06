//! Dynamic forms generated from resolved field sets.
//!
//! A form only ever carries the fields the caller may write; binding a
//! payload rejects anything outside that set before values are coerced.

mod coerce;
mod errors;
mod form;
mod formset;

pub use errors::FormErrors;
pub use form::{BindMode, DynamicForm, FormField};
pub use formset::{FormsetOperation, FormsetRow, InlineFormset, InlineSubmission};
