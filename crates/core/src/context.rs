/// Per-request values threaded through the query pipeline.
///
/// Carries the caller's correlation id so it can be forwarded to the
/// ratings service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    client_ref_id: Option<String>,
}

impl RequestContext {
    pub fn new(client_ref_id: Option<String>) -> Self {
        let client_ref_id = client_ref_id.filter(|id| !id.trim().is_empty());
        Self { client_ref_id }
    }

    /// Context with no correlation id.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn client_ref_id(&self) -> Option<&str> {
        self.client_ref_id.as_deref()
    }
}
