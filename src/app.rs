use std::time::Duration;

use color_eyre::eyre::bail;

use crate::event::{AppEvent, Event, EventHandler};
use crate::model::{Model, View};

use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub model: Model,
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(model: Model, tick_rate: Duration) -> Self {
        Self::with_events(model, EventHandler::new(tick_rate))
    }

    pub fn with_events(model: Model, events: EventHandler) -> Self {
        Self {
            running: true,
            model,
            events,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| self.model.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    pub fn handle_events(&mut self) -> color_eyre::Result<()> {
        match self.events.next()? {
            Event::Tick => self.tick(),
            Event::Crossterm(event) => {
                if let CrosstermEvent::Key(key_event) = event {
                    if key_event.kind == KeyEventKind::Press {
                        self.handle_key_event(key_event);
                    }
                }
            }
            Event::App(app_event) => match app_event {
                AppEvent::Next => self.model.select_next(),
                AppEvent::Previous => self.model.select_previous(),
                AppEvent::First => self.model.select_first(),
                AppEvent::Last => self.model.select_last(),
                AppEvent::Quit => self.quit(),
            },
            Event::Error(message) => bail!("terminal input failed: {message}"),
        }
        Ok(())
    }

    /// Forwards a key press to the model and queues whatever it maps to.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if let Some(app_event) = self.model.handle_key_event(key_event) {
            self.events.send(app_event);
        }
    }

    /// Handles the tick event of the terminal.
    ///
    /// The film list never changes after startup, so there is nothing to update.
    pub fn tick(&self) {}

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
