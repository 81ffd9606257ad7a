//! Support utilities shared by the hub: overlay flattening, uuid generation
//! and the cooperative yield used before script activation.

use super::entities::{Overlay, Pane};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use uuid::Uuid;

/// All overlays across all panes, in document order.
pub fn all_overlays(panes: &[Pane]) -> Vec<&Overlay> {
    panes.iter().flat_map(|pane| pane.overlays.iter()).collect()
}

/// Flattened `(pane, overlay)` positions, in document order.
pub fn overlay_positions(panes: &[Pane]) -> Vec<(usize, usize)> {
    panes
        .iter()
        .enumerate()
        .flat_map(|(pi, pane)| (0..pane.overlays.len()).map(move |oi| (pi, oi)))
        .collect()
}

/// Fresh identity token for a pane, overlay or script descriptor.
pub fn next_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Yields to the executor exactly once, so any already-enqueued
/// initialization work runs before the caller resumes.
pub fn pause() -> impl Future<Output = ()> {
    YieldNow { yielded: false }
}

struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
