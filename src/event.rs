use color_eyre::eyre::WrapErr;
use ratatui::crossterm::event::{self, Event as CrosstermEvent};
use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// Emitted at the configured tick rate.
    Tick,
    /// Raw terminal input.
    Crossterm(CrosstermEvent),
    /// Events emitted by the application itself, usually in response to a key press.
    App(AppEvent),
    /// The input thread failed and stopped; no further input will arrive.
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Next,
    Previous,
    First,
    Last,
    Quit,
}

/// Terminal event handler.
///
/// Input polling happens on a background thread; everything arrives on a single channel.
#[derive(Debug)]
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`] and spawns the polling thread.
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let actor = EventThread::new(sender.clone(), tick_rate);
        thread::spawn(|| actor.run());
        Self { sender, receiver }
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> color_eyre::Result<Event> {
        Ok(self.receiver.recv()?)
    }

    /// A handler with no input thread, fed only through `send` and `push`.
    #[cfg(test)]
    pub(crate) fn without_input() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    #[cfg(test)]
    pub(crate) fn push(&self, event: Event) {
        let _ = self.sender.send(event);
    }

    /// Queue an app event to be handled on the next loop iteration.
    pub fn send(&mut self, app_event: AppEvent) {
        // The receiver lives in `self`, so this cannot fail.
        let _ = self.sender.send(Event::App(app_event));
    }
}

struct EventThread {
    sender: mpsc::Sender<Event>,
    tick_rate: Duration,
}

impl EventThread {
    fn new(sender: mpsc::Sender<Event>, tick_rate: Duration) -> Self {
        Self { sender, tick_rate }
    }

    /// Runs the poll loop, reporting a failure to the main loop before exiting.
    fn run(self) {
        if let Err(err) = self.poll_loop() {
            self.send(Event::Error(format!("{err:#}")));
        }
    }

    /// Polls crossterm and emits ticks until the channel closes or polling fails.
    fn poll_loop(&self) -> color_eyre::Result<()> {
        let mut last_tick = Instant::now();
        loop {
            let timeout = self.tick_rate.saturating_sub(last_tick.elapsed());
            if timeout == Duration::ZERO {
                last_tick = Instant::now();
                if !self.send(Event::Tick) {
                    break;
                }
            }
            if event::poll(timeout).wrap_err("failed to poll for crossterm events")? {
                let event = event::read().wrap_err("failed to read crossterm event")?;
                if !self.send(Event::Crossterm(event)) {
                    break;
                }
            }
        }
        Ok(())
    }

    fn send(&self, event: Event) -> bool {
        self.sender.send(event).is_ok()
    }
}
