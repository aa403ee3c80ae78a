use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Stylize},
    widgets::{Block, BorderType, List, Paragraph, Wrap},
    Frame,
};

use crate::model::Model;

const HELP: &str = "↓/j next  ↑/k previous  g/G first/last  q quit";

/// Renders the user interface.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(model, frame, header);

    if model.movies().is_empty() {
        let placeholder = Paragraph::new("No films returned")
            .block(Block::bordered().border_type(BorderType::Rounded))
            .centered();
        frame.render_widget(placeholder, body);
    } else {
        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);
        render_list(model, frame, list_area);
        render_detail(model, frame, detail_area);
    }

    frame.render_widget(Paragraph::new(HELP).fg(Color::DarkGray), footer);
}

fn render_header(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title("ghiblist")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded);

    let text = format!("Studio Ghibli films: {}", model.movies().len());

    let paragraph = Paragraph::new(text).block(block).fg(Color::Blue).centered();

    frame.render_widget(paragraph, area);
}

fn render_list(model: &mut Model, frame: &mut Frame, area: Rect) {
    let films_list = List::new(model.movies().iter().map(|movie| movie.to_string()))
        .block(
            Block::bordered()
                .title("Films")
                .title_alignment(Alignment::Center)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(Color::Yellow)
        .highlight_symbol(">> ");

    frame.render_stateful_widget(films_list, area, &mut model.list_state);
}

fn render_detail(model: &Model, frame: &mut Frame, area: Rect) {
    let (title, description) = match model.selected_movie() {
        Some(movie) => (movie.title.as_str(), movie.description.as_str()),
        None => ("", ""),
    };

    let paragraph = Paragraph::new(description)
        .block(
            Block::bordered()
                .title(title)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
