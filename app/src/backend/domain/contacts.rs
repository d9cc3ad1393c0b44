//! Emergency contact list transitions.
//!
//! Contacts are identified only by position. The list holds at most
//! `MAX_EMERGENCY_CONTACTS` entries in insertion order.

use shared::{AppState, EmergencyContact};

use super::rejection::Rejection;

/// Check the contact invariant: a name plus a phone number or an email
pub fn validate_contact(contact: &EmergencyContact) -> Result<(), Rejection> {
    if !contact.has_name() {
        return Err(Rejection::MissingContactName);
    }
    if !contact.has_channel() {
        return Err(Rejection::MissingContactChannel);
    }
    Ok(())
}

/// Append a contact to the end of the list
pub fn add_contact(state: &AppState, contact: EmergencyContact) -> Result<AppState, Rejection> {
    if state.contacts_full() {
        return Err(Rejection::ContactListFull);
    }
    validate_contact(&contact)?;

    let mut next = state.clone();
    next.emergency_contacts.push(contact);
    Ok(next)
}

/// Remove the contact at a 0-based position
pub fn remove_contact(state: &AppState, index: usize) -> Result<AppState, Rejection> {
    if index >= state.emergency_contacts.len() {
        return Err(Rejection::ContactIndexOutOfRange { index });
    }

    let mut next = state.clone();
    next.emergency_contacts.remove(index);
    Ok(next)
}
