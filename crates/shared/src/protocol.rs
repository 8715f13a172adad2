use crate::domain::Item;

/// Resolution of a create request. A non-2xx response is an ordinary
/// business rejection, not a transport failure; there is no partial
/// success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server-confirmed (possibly server-assigned) item.
    Accepted(Item),
    Rejected { message: String },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}
