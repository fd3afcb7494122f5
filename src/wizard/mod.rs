//! Step-wizard engine — state, validators, reducer, sessions, routes.
//!
//! The wizard is a linear step sequence driven by one step cursor and one
//! accumulating form-data record. Forward movement is gated by the current
//! step's validator; backward movement is unconditional. Two flow variants
//! share the engine: KYC (individuals) and KYB (businesses).

pub mod manager;
pub mod reducer;
pub mod routes;
pub mod state;
pub mod step;
pub mod validate;

pub use manager::WizardManager;
pub use reducer::{Action, Outcome, Reducer};
pub use routes::{WizardRouteState, wizard_routes};
pub use state::{DocumentFile, DocumentSlot, DocumentType, WizardState, fields};
pub use step::{Flow, Step};
pub use validate::{PhonePolicy, Validator};
