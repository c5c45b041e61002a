//! Icon display sink.

use super::IconRef;

/// Receives the icon to display. Fire-and-forget.
pub trait IconSink: Send + Sync {
    /// Displays `icon`, replacing whatever was shown before.
    fn set_icon(&self, icon: &IconRef);
}

/// Icon sink that reports icon changes through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogIconSink;

impl IconSink for LogIconSink {
    fn set_icon(&self, icon: &IconRef) {
        match icon {
            IconRef::Default(path) => {
                tracing::info!("Icon set to default ({})", path.display());
            }
            IconRef::Sized(paths) => {
                if let Some((_, path)) = paths.first() {
                    tracing::info!("Icon set to {} ({} sizes)", path.display(), paths.len());
                }
            }
        }
    }
}
