use std::time::Duration;

use tokio::task::JoinHandle;

use crate::services::common::Property;

/// Opacity animation frame interval.
const FRAME: Duration = Duration::from_millis(20);

/// A cancelable one-shot timer.
///
/// Fires the callback once after the delay unless canceled first.
/// Dropping the handle cancels the timer, so re-arming is a plain
/// replace-in-slot: the old scheduled task aborts when overwritten.
pub(crate) struct Scheduled {
    handle: JoinHandle<()>,
}

impl Scheduled {
    pub fn after(delay: Duration, on_fire: impl FnOnce() + Send + 'static) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        });

        Self { handle }
    }
}

impl Drop for Scheduled {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A cancelable linear opacity fade.
///
/// Animates the opacity property from its current value to the target over
/// the given duration, then runs the completion callback. Dropping the
/// handle aborts the animation mid-flight, leaving opacity wherever the
/// last frame put it; a reversing fade picks up from there.
pub(crate) struct Fade {
    handle: JoinHandle<()>,
}

impl Fade {
    pub fn run(
        opacity: Property<f64>,
        target: f64,
        duration: Duration,
        on_finished: impl FnOnce() + Send + 'static,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let start = opacity.get();
            let frames = (duration.as_millis() / FRAME.as_millis()).max(1) as u32;
            let step = duration / frames;

            for frame in 1..=frames {
                tokio::time::sleep(step).await;
                let progress = f64::from(frame) / f64::from(frames);
                opacity.set(start + (target - start) * progress);
            }

            opacity.set(target);
            on_finished();
        });

        Self { handle }
    }
}

impl Drop for Fade {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
