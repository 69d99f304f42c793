//! Timed visual transitions for the convert and download buttons.
//!
//! Each animation is a fixed ordered list of steps, every step being a delay
//! followed by one or more state changes. A single scheduler turns a list
//! into an async stream the app consumes as a task, which keeps the ordering
//! inspectable in tests instead of buried in nested timer callbacks.

use std::time::Duration;

use futures::Stream;

/// Delay between the two visual phases of a reveal or teardown.
pub const PHASE_DELAY: Duration = Duration::from_millis(500);

/// Short settle delay so a class-style flag lands one frame after the
/// element it animates became visible.
pub const SETTLE_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualChange {
    ConvertShrunk(bool),
    DownloadVisible(bool),
    DownloadGrown(bool),
    BindDownloadUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub delay: Duration,
    pub changes: Vec<VisualChange>,
}

/// Visual state of the two buttons. The convert button's enabled flag and
/// label live on the view since they are not animated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonVisuals {
    pub convert_shrunk: bool,
    pub download_visible: bool,
    pub download_grown: bool,
    /// Only ever bound in the same step that makes the download button
    /// visible; read when the user activates the button.
    pub download_url: Option<String>,
}

impl ButtonVisuals {
    pub fn apply(&mut self, change: VisualChange) {
        match change {
            VisualChange::ConvertShrunk(value) => self.convert_shrunk = value,
            VisualChange::DownloadVisible(value) => self.download_visible = value,
            VisualChange::DownloadGrown(value) => self.download_grown = value,
            VisualChange::BindDownloadUrl(url) => self.download_url = Some(url),
        }
    }

    pub fn apply_all(&mut self, changes: Vec<VisualChange>) {
        for change in changes {
            self.apply(change);
        }
    }
}

/// Played after a successful conversion: collapse the convert button, then
/// show the download button bound to its URL, then grow it in.
pub fn reveal(download_url: String) -> Vec<Step> {
    vec![
        Step {
            delay: Duration::ZERO,
            changes: vec![VisualChange::ConvertShrunk(true)],
        },
        Step {
            delay: PHASE_DELAY,
            changes: vec![
                VisualChange::BindDownloadUrl(download_url),
                VisualChange::DownloadVisible(true),
            ],
        },
        Step {
            delay: SETTLE_DELAY,
            changes: vec![VisualChange::DownloadGrown(true)],
        },
    ]
}

/// Played when a new submission starts while the download button is still
/// showing. Always runs to completion once started.
pub fn teardown() -> Vec<Step> {
    vec![
        Step {
            delay: Duration::ZERO,
            changes: vec![VisualChange::DownloadGrown(false)],
        },
        Step {
            delay: PHASE_DELAY,
            changes: vec![VisualChange::DownloadVisible(false)],
        },
        Step {
            delay: SETTLE_DELAY,
            changes: vec![VisualChange::ConvertShrunk(false)],
        },
    ]
}

/// Run a step list as a stream, yielding each step's changes after its
/// delay. Fire-and-forget: once started it is not cancelled by later cycles.
pub fn run(steps: Vec<Step>) -> impl Stream<Item = Vec<VisualChange>> {
    futures::stream::unfold(steps.into_iter(), |mut steps| async move {
        let step = steps.next()?;
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        Some((step.changes, steps))
    })
}
