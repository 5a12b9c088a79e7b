//! Animated running total.
//!
//! [`CounterAnimation`] is the frame-by-frame state machine; [`AnimatedCounter`]
//! drives it from a tokio interval and publishes every displayed value on a
//! watch channel.

use std::{sync::Arc, time::Duration};

use rust_decimal::Decimal;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::domain::Amount;

pub const ANIMATION_DURATION_MS: u64 = 1000;
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Eases a displayed value toward a target in fixed per-frame steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    position: Amount,
    displayed: Amount,
    target: Amount,
    step: Amount,
    rising: bool,
    running: bool,
}

impl CounterAnimation {
    /// An animation at rest on `value`.
    pub fn at_rest(value: Amount) -> Self {
        Self {
            position: value,
            displayed: value,
            target: value,
            step: Amount::ZERO,
            rising: false,
            running: false,
        }
    }

    /// Starts a new run from the current displayed value toward `target`.
    pub fn retarget(&mut self, target: Amount) {
        let start = self.displayed;
        self.position = start;
        self.target = target;
        let frame_share = Decimal::from(FRAME_INTERVAL_MS) / Decimal::from(ANIMATION_DURATION_MS);
        self.step = Amount::new((target - start).value() * frame_share);
        self.rising = target > start;
        // A step too small for the decimal scale could never reach the target.
        if target == start || self.step.is_zero() {
            self.position = target;
            self.displayed = target;
            self.step = Amount::ZERO;
            self.running = false;
            return;
        }
        self.running = true;
    }

    /// Advances one frame and returns the new displayed value, or `None` when
    /// the animation is already at rest.
    pub fn tick(&mut self) -> Option<Amount> {
        if !self.running {
            return None;
        }
        self.position += self.step;
        let crossed = if self.rising {
            self.position >= self.target
        } else {
            self.position <= self.target
        };
        if crossed {
            self.position = self.target;
            self.displayed = self.target;
            self.running = false;
        } else {
            self.displayed = self.position.round_units();
        }
        Some(self.displayed)
    }

    pub fn displayed(&self) -> Amount {
        self.displayed
    }

    pub fn target(&self) -> Amount {
        self.target
    }

    pub fn step(&self) -> Amount {
        self.step
    }

    pub fn is_settled(&self) -> bool {
        !self.running
    }
}

/// Owns the single ticking task that moves the displayed total.
///
/// Must be used from within a tokio runtime. Every new target cancels the
/// task of the previous one before a new task starts, and dropping the
/// counter cancels whatever is still running.
#[derive(Debug)]
pub struct AnimatedCounter {
    sender: Arc<watch::Sender<Amount>>,
    task: Option<JoinHandle<()>>,
}

impl AnimatedCounter {
    pub fn new(initial: Amount) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
            task: None,
        }
    }

    pub fn displayed(&self) -> Amount {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Amount> {
        self.sender.subscribe()
    }

    pub fn is_animating(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Animates toward `true_total` and returns a receiver yielding each
    /// displayed value until it settles on `true_total`.
    pub async fn observe_total(&mut self, true_total: Amount) -> watch::Receiver<Amount> {
        self.cancel().await;

        let mut animation = CounterAnimation::at_rest(self.displayed());
        animation.retarget(true_total);
        tracing::debug!(
            from = %animation.displayed(),
            to = %true_total,
            step = %animation.step(),
            "counter retargeted"
        );

        let receiver = self.sender.subscribe();
        if animation.is_settled() {
            self.sender.send_replace(true_total);
            return receiver;
        }

        let sender = Arc::clone(&self.sender);
        self.task = Some(tokio::spawn(async move {
            let mut frames = time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
            frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval completes immediately.
            frames.tick().await;
            while !animation.is_settled() {
                frames.tick().await;
                if let Some(value) = animation.tick() {
                    sender.send_replace(value);
                }
            }
        }));
        receiver
    }

    /// Stops the running task, if any, and waits until it is gone.
    pub async fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            // Resolves to a cancellation error once the task has been dropped.
            let _ = task.await;
        }
    }
}

impl Drop for AnimatedCounter {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
