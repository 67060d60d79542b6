//! # Request Handlers
//!
//! The dispatch table entry: a pure transformation from request payload to
//! response payload.

use relay_types::RelayError;

/// A pure request-to-response transformation.
///
/// Stateless across invocations; the dispatch service owns the handler and
/// applies it from its single worker, so implementations need `Send + Sync`
/// but never see concurrent calls for the same request.
pub trait RequestHandler: Send + Sync {
    /// Transform a request payload into a response payload.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidPayload`] when the payload cannot be
    /// interpreted as the expected input.
    fn handle(&self, payload: &[u8]) -> Result<Vec<u8>, RelayError>;
}

/// The stock responder: parse a decimal integer, answer its successor.
///
/// `"123"` → `"124"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IncrementResponder;

impl RequestHandler for IncrementResponder {
    fn handle(&self, payload: &[u8]) -> Result<Vec<u8>, RelayError> {
        let text = std::str::from_utf8(payload).map_err(|_| RelayError::InvalidPayload {
            reason: "payload is not valid UTF-8".to_string(),
        })?;

        let value: i64 = text.trim().parse().map_err(|_| RelayError::InvalidPayload {
            reason: format!("not a decimal integer: {text:?}"),
        })?;

        let next = value.checked_add(1).ok_or_else(|| RelayError::InvalidPayload {
            reason: format!("increment overflows: {value}"),
        })?;

        Ok(next.to_string().into_bytes())
    }
}

impl<F> RequestHandler for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, RelayError> + Send + Sync,
{
    fn handle(&self, payload: &[u8]) -> Result<Vec<u8>, RelayError> {
        self(payload)
    }
}
