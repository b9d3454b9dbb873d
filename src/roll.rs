//! Dice roll sequencer
//!
//! A roll runs as a spawned tokio task: it ticks a fixed number of times,
//! showing a random dice face on every tick, then draws the final venue and
//! commits it after a short delay.
//!
//! Every roll carries a generation id. Changing the category, toggling
//! secret mode, or resetting bumps the generation, so a roll that is still
//! animating stops publishing ticks and never commits its result.

use crate::catalog::{Candidates, Category, VenueCatalog};
use crate::config::RollConfig;

use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Number of dice faces cycled through by the animation
pub const DICE_FACES: usize = 6;

/// Source of uniform random indices
///
/// Injected into the sequencer so tests can pin the outcome.
pub trait RandomSource: Send {
    /// Returns an index in `0..len`; `len` is always greater than zero
    fn index(&mut self, len: usize) -> usize;
}

/// Thread-local `rand` generator, no seeding
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Observable state of the dice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollState {
    /// A roll is animating or waiting to commit
    pub is_rolling: bool,
    /// Dice face currently shown, in `0..DICE_FACES`
    pub icon_index: usize,
    /// Last committed venue; cleared when a roll starts or the mode changes
    pub result: Option<String>,
    /// Active category
    pub category: Category,
    /// Secret mode toggle
    pub secret_mode: bool,
}

impl RollState {
    fn new(category: Category, secret_mode: bool) -> Self {
        Self {
            is_rolling: false,
            icon_index: 0,
            result: None,
            category,
            secret_mode,
        }
    }
}

/// Timing of a single roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTiming {
    /// Delay between animation ticks
    pub tick_interval: Duration,
    /// Ticks before the final draw
    pub tick_count: u32,
    /// Delay between the final draw and the commit
    pub commit_delay: Duration,
}

impl From<&RollConfig> for RollTiming {
    fn from(config: &RollConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            tick_count: config.tick_count,
            commit_delay: Duration::from_millis(config.commit_delay_ms),
        }
    }
}

impl Default for RollTiming {
    fn default() -> Self {
        Self::from(&RollConfig::default())
    }
}

impl RollTiming {
    /// Shortest tick interval a roll will use
    pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

    /// Returns this timing with the tick interval raised to at least
    /// [`Self::MIN_TICK_INTERVAL`]
    pub fn normalized(self) -> Self {
        Self {
            tick_interval: self.tick_interval.max(Self::MIN_TICK_INTERVAL),
            ..self
        }
    }
}

/// Progress notifications for front ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollEvent {
    /// A roll was accepted
    Started {
        category: Category,
        secret_mode: bool,
    },
    /// The animation moved to another dice face
    Tick { icon_index: usize },
    /// The roll finished and its result is now current
    Committed { result: String },
    /// An in-flight roll was cancelled by a category or mode change
    Invalidated,
}

struct Shared {
    state: RollState,
    generation: u64,
}

type Subscribers = Arc<Mutex<Vec<mpsc::UnboundedSender<RollEvent>>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish(subscribers: &Subscribers, event: RollEvent) {
    lock(subscribers).retain(|tx| tx.send(event.clone()).is_ok());
}

/// Drives dice rolls and owns the roll state
///
/// # Examples
///
/// ```no_run
/// use dadu::catalog::{Category, VenueCatalog};
/// use dadu::roll::{RollSequencer, RollTiming, ThreadRandom};
///
/// # async fn example() {
/// let dice = RollSequencer::new(
///     VenueCatalog::default(),
///     Box::new(ThreadRandom),
///     RollTiming::default(),
///     Category::Food,
/// );
/// if let Some(handle) = dice.roll() {
///     let venue = handle.wait().await;
///     println!("{:?}", venue);
/// }
/// # }
/// ```
pub struct RollSequencer {
    shared: Arc<Mutex<Shared>>,
    catalog: Arc<VenueCatalog>,
    random: Arc<Mutex<Box<dyn RandomSource>>>,
    timing: RollTiming,
    subscribers: Subscribers,
}

impl RollSequencer {
    /// Creates an idle sequencer with secret mode off
    ///
    /// A zero tick interval is raised to [`RollTiming::MIN_TICK_INTERVAL`].
    pub fn new(
        catalog: VenueCatalog,
        random: Box<dyn RandomSource>,
        timing: RollTiming,
        category: Category,
    ) -> Self {
        if timing.tick_interval.is_zero() {
            tracing::warn!(
                "Zero roll tick interval, using {:?}",
                RollTiming::MIN_TICK_INTERVAL
            );
        }
        let timing = timing.normalized();
        Self {
            shared: Arc::new(Mutex::new(Shared {
                state: RollState::new(category, false),
                generation: 0,
            })),
            catalog: Arc::new(catalog),
            random: Arc::new(Mutex::new(random)),
            timing,
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Starts a roll
    ///
    /// Returns `None` without touching any state if a roll is already in
    /// progress. Must be called from within a tokio runtime.
    pub fn roll(&self) -> Option<RollHandle> {
        let (generation, category, secret_mode) = {
            let mut shared = lock(&self.shared);
            if shared.state.is_rolling {
                tracing::debug!("Roll requested while rolling, ignoring");
                return None;
            }
            shared.generation += 1;
            shared.state.is_rolling = true;
            shared.state.result = None;
            (
                shared.generation,
                shared.state.category,
                shared.state.secret_mode,
            )
        };

        tracing::debug!(generation, %category, secret_mode, "Roll started");
        publish(
            &self.subscribers,
            RollEvent::Started {
                category,
                secret_mode,
            },
        );

        let task = RollTask {
            shared: Arc::clone(&self.shared),
            catalog: Arc::clone(&self.catalog),
            random: Arc::clone(&self.random),
            subscribers: Arc::clone(&self.subscribers),
            timing: self.timing,
            generation,
            category,
            secret_mode,
        };

        Some(RollHandle {
            generation,
            task: tokio::spawn(task.run()),
        })
    }

    /// Switches category, clearing the result and cancelling any roll
    pub fn set_category(&self, category: Category) {
        self.invalidate(|state| state.category = category);
    }

    /// Flips secret mode, clearing the result and cancelling any roll
    ///
    /// Returns the new secret mode value.
    pub fn toggle_secret_mode(&self) -> bool {
        let mut enabled = false;
        self.invalidate(|state| {
            state.secret_mode = !state.secret_mode;
            enabled = state.secret_mode;
        });
        enabled
    }

    /// Clears the result and dice face, cancelling any roll
    pub fn reset(&self) {
        self.invalidate(|_| {});
    }

    fn invalidate(&self, apply: impl FnOnce(&mut RollState)) {
        let was_rolling = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            apply(&mut shared.state);
            shared.state.result = None;
            shared.state.icon_index = 0;
            std::mem::replace(&mut shared.state.is_rolling, false)
        };

        if was_rolling {
            tracing::debug!("In-flight roll invalidated");
            publish(&self.subscribers, RollEvent::Invalidated);
        }
    }

    /// Subscribes to roll progress events
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<RollEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.subscribers).push(tx);
        rx
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> RollState {
        lock(&self.shared).state.clone()
    }

    /// Whether a roll is in progress
    pub fn is_rolling(&self) -> bool {
        lock(&self.shared).state.is_rolling
    }

    /// Active category
    pub fn category(&self) -> Category {
        lock(&self.shared).state.category
    }

    /// Whether secret mode is on
    pub fn secret_mode(&self) -> bool {
        lock(&self.shared).state.secret_mode
    }

    /// Last committed result, if any
    pub fn result(&self) -> Option<String> {
        lock(&self.shared).state.result.clone()
    }

    /// The catalog rolls draw from
    pub fn catalog(&self) -> &VenueCatalog {
        &self.catalog
    }

    /// Number of options the next roll draws from
    pub fn option_count(&self) -> usize {
        let state = self.snapshot();
        self.catalog.option_count(state.category, state.secret_mode)
    }
}

/// Handle to a running roll
#[derive(Debug)]
pub struct RollHandle {
    generation: u64,
    task: JoinHandle<Option<String>>,
}

impl RollHandle {
    /// Generation id of this roll
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits for the roll to finish
    ///
    /// Returns the committed venue, or `None` if the roll was invalidated
    /// before committing.
    pub async fn wait(self) -> Option<String> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Roll task failed: {}", e);
                None
            }
        }
    }
}

struct RollTask {
    shared: Arc<Mutex<Shared>>,
    catalog: Arc<VenueCatalog>,
    random: Arc<Mutex<Box<dyn RandomSource>>>,
    subscribers: Subscribers,
    timing: RollTiming,
    generation: u64,
    category: Category,
    secret_mode: bool,
}

/// Clears `is_rolling` when a roll task ends without committing
///
/// Runs on every exit path of the task, including a panic or an abort. A
/// roll that was invalidated in the meantime is left alone.
struct RollingGuard {
    shared: Arc<Mutex<Shared>>,
    generation: u64,
}

impl Drop for RollingGuard {
    fn drop(&mut self) {
        let mut shared = lock(&self.shared);
        if shared.generation == self.generation && shared.state.is_rolling {
            tracing::warn!(
                generation = self.generation,
                "Roll ended without committing"
            );
            shared.state.is_rolling = false;
        }
    }
}

impl RollTask {
    async fn run(self) -> Option<String> {
        let _guard = RollingGuard {
            shared: Arc::clone(&self.shared),
            generation: self.generation,
        };
        let start = tokio::time::Instant::now() + self.timing.tick_interval;
        let mut ticker = tokio::time::interval_at(start, self.timing.tick_interval);

        for _ in 0..self.timing.tick_count {
            ticker.tick().await;
            let icon_index = self.draw(DICE_FACES);
            {
                let mut shared = lock(&self.shared);
                if shared.generation != self.generation {
                    return None;
                }
                shared.state.icon_index = icon_index;
            }
            publish(&self.subscribers, RollEvent::Tick { icon_index });
        }

        let selected = self.select();
        tokio::time::sleep(self.timing.commit_delay).await;

        {
            let mut shared = lock(&self.shared);
            if shared.generation != self.generation {
                return None;
            }
            shared.state.is_rolling = false;
            shared.state.result = selected.clone();
        }

        match &selected {
            Some(result) => {
                tracing::info!(%result, category = %self.category, "Roll committed");
                publish(
                    &self.subscribers,
                    RollEvent::Committed {
                        result: result.clone(),
                    },
                );
            }
            None => tracing::warn!(category = %self.category, "No venues to roll from"),
        }

        selected
    }

    fn draw(&self, len: usize) -> usize {
        lock(&self.random).index(len)
    }

    fn select(&self) -> Option<String> {
        match self.catalog.candidates(self.category, self.secret_mode) {
            Candidates::Fixed(value) => Some(value.to_string()),
            Candidates::Pick(options) if options.is_empty() => None,
            Candidates::Pick(options) => options
                .get(self.draw(options.len()))
                .map(|venue| venue.to_string()),
        }
    }
}
