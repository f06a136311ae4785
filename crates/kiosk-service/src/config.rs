//! Service configuration.

/// Configuration for the order service.
#[derive(Debug, Clone, Default)]
pub struct OrderServiceConfig {
    /// Enforce the `created -> processing -> completed|cancelled` status
    /// machine on `update_status`. When off (default) any status string is
    /// written as given.
    pub strict_transitions: bool,
}
