//! Command metadata shared by every bounded context.

use uuid::Uuid;

/// Metadata carried by every state-changing command.
///
/// Handlers log `command_type` together with `correlation_id`, so one
/// request can be followed across contexts in the trace output.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable, namespaced name of the command, e.g. `"session.advance_round"`.
    fn command_type(&self) -> &'static str;

    /// Id tying this command back to the request that produced it.
    fn correlation_id(&self) -> Uuid;
}
