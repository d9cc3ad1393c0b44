//! # Domain Module
//!
//! Business rules for daily check-ins.
//!
//! ## Module Organization
//!
//! - **check_in**, **contacts**, **profile**: pure transitions. Each takes the
//!   current [`shared::AppState`] and returns the next one, or a
//!   [`Rejection`] leaving the input untouched. None of them do I/O.
//! - **check_in_service**, **contact_service**, **profile_service**: load the
//!   state, apply a transition, save the result.
//! - **greeting_service**: the cosmetic greeting shown after a check-in.
//! - **display**: user-facing wording.
//! - **clock**: the wall clock that decides what "today" is.
//!
//! ## Business Rules
//!
//! - One check-in per local calendar date, whatever the frequency setting
//! - Every check-in adds one to the streak; gaps never reset it
//! - At most two emergency contacts, each with a name and a phone or email
//! - The greeting never blocks or changes a saved check-in

pub mod check_in;
pub mod check_in_service;
pub mod clock;
pub mod commands;
pub mod contact_service;
pub mod contacts;
pub mod display;
pub mod greeting_service;
pub mod profile;
pub mod profile_service;
pub mod rejection;

pub use check_in_service::CheckInService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::TransitionResult;
pub use contact_service::ContactService;
pub use greeting_service::{GeminiGreetingProvider, GreetingProvider, GreetingService};
pub use profile_service::ProfileService;
pub use rejection::Rejection;
