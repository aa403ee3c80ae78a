use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    widgets::ListState,
    Frame,
};

use crate::event::AppEvent;
use crate::movie::Movie;
use crate::ui;

/// What the terminal loop needs from a screen.
pub trait View {
    fn render(&mut self, frame: &mut Frame);

    /// Maps a key press to the app event it triggers, if any.
    fn handle_key_event(&mut self, key_event: KeyEvent) -> Option<AppEvent>;
}

/// The film list shown for the whole session.
#[derive(Debug)]
pub struct Model {
    movies: Vec<Movie>,
    pub list_state: ListState,
}

impl Model {
    pub fn new(movies: Vec<Movie>) -> Self {
        let selected = if movies.is_empty() { None } else { Some(0) };
        Self {
            movies,
            list_state: ListState::default().with_selected(selected),
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.list_state.selected().and_then(|i| self.movies.get(i))
    }

    /// Plain text rendering: one `Title (ReleaseDate)` line per film.
    pub fn view(&self) -> String {
        self.movies.iter().map(|movie| format!("{movie}\n")).collect()
    }

    pub fn select_next(&mut self) {
        if self.movies.is_empty() {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        let new_selected = if selected >= self.movies.len() - 1 {
            0
        } else {
            selected + 1
        };
        self.list_state.select(Some(new_selected));
    }

    pub fn select_previous(&mut self) {
        if self.movies.is_empty() {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.movies.len() - 1
        } else {
            selected - 1
        };
        self.list_state.select(Some(new_selected));
    }

    pub fn select_first(&mut self) {
        if !self.movies.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.movies.is_empty() {
            self.list_state.select(Some(self.movies.len() - 1));
        }
    }
}

impl View for Model {
    fn render(&mut self, frame: &mut Frame) {
        ui::render(self, frame);
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(AppEvent::Quit),
            KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
                Some(AppEvent::Quit)
            }
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::Next),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::Previous),
            KeyCode::Home | KeyCode::Char('g') => Some(AppEvent::First),
            KeyCode::End | KeyCode::Char('G') => Some(AppEvent::Last),
            _ => None,
        }
    }
}
