use thiserror::Error;

/// Errors surfaced by the hub. Stale pane/overlay indices are not errors;
/// those lookups return `None` instead.
#[derive(Debug, Clone, Error)]
pub enum HubError {
    #[error("script upload failed: {0}")]
    ScriptUpload(String),
    #[error("script execution failed: {0}")]
    ScriptExec(String),
    #[error("no hub bound for chart '{0}'")]
    HubUnbound(String),
}

pub type HubResult<T> = Result<T, HubError>;
