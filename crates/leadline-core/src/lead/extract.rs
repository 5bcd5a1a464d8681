//! Regex backstop for lead fields the model missed.
//!
//! Models reliably chat about contact details and then forget to put
//! them in the structured fields. The extractor runs over the raw
//! visitor query after generation and fills exactly the fields that
//! came back null; anything the model did return is trusted as-is.

use leadline_types::agent::AgentTurnResult;

use crate::context::patterns;

pub struct LeadExtractor;

impl LeadExtractor {
    /// Fill null lead fields from the raw visitor query.
    pub fn apply(result: &mut AgentTurnResult, query: &str) {
        if result.lead_email.is_none() {
            result.lead_email = patterns::find_email(query);
        }
        if result.lead_phone.is_none() {
            result.lead_phone = patterns::find_phone(query);
        }
        if result.lead_name.is_none() {
            result.lead_name = patterns::find_name(query);
        }
    }
}
