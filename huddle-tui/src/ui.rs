// UI module - split into cohesive submodules for maintainability
pub mod theme;
mod formatting;
mod sections;
mod mention_dropdown;
mod modals;

// Re-export main render function
pub use self::render_main::render;

// Main render logic
mod render_main {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, Paragraph},
        Frame,
    };

    use crate::app::App;
    use super::theme::get_theme_colors;
    use super::sections::{render_comments, render_composer, render_footer, render_post_header, render_toasts};
    use super::modals::{render_delete_confirmation_modal, render_help_modal, render_report_modal};
    use super::mention_dropdown::render_mention_dropdown;

    /// Render the UI
    pub fn render(app: &mut App, frame: &mut Frame) {
        let area = frame.area();

        let theme = get_theme_colors(app);

        frame.render_widget(Clear, area);

        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, area);

        const MIN_WIDTH: u16 = 50;
        const MIN_HEIGHT: u16 = 16;

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let warning = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Terminal Too Small",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                    Style::default().fg(theme.text),
                )),
                Line::from(Span::styled(
                    format!("Current size: {}x{}", area.width, area.height),
                    Style::default().fg(theme.warning),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error)),
            );

            frame.render_widget(warning, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Post header + reactions
                Constraint::Min(3),    // Comments
                Constraint::Length(5), // Composer
                Constraint::Length(1), // Footer
            ])
            .split(area);

        render_post_header(frame, app, chunks[0]);
        render_comments(frame, app, chunks[1]);
        render_composer(frame, app, chunks[2]);
        render_footer(frame, app, chunks[3]);

        render_toasts(frame, app, area);

        if app.comments_state.pending_delete.is_some() {
            render_delete_confirmation_modal(frame, app, area);
        }
        if app.report_state.is_some() {
            render_report_modal(frame, app, area);
        }
        if app.show_help {
            render_help_modal(frame, app, area);
        }

        // Drawn last so it floats over everything else
        render_mention_dropdown(frame, app, area);
    }
}
