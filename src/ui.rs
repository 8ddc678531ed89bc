pub mod charting;
pub mod home;
pub mod processing;
pub mod screen;
pub mod section;
pub mod slides;
pub mod wrapped;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::app::App;
use crate::particles::{FieldKind, ParticleField};
use crate::ui::screen::current_screen;

const CONFETTI_COLORS: [Color; 7] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

const DUST_COLORS: [Color; 4] = [section::GOLD, section::MUTED, section::FAINT, Color::White];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        current_screen(self.state()).render(self, area, buf);
    }
}

/// Draw a particle field with positions relative to `area`.
pub fn render_particles(field: &ParticleField, area: Rect, buf: &mut Buffer) {
    let colors: &[Color] = match field.kind {
        FieldKind::Burst => &CONFETTI_COLORS,
        FieldKind::Ambient => &DUST_COLORS,
    };

    for particle in &field.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;

        if x < area.width && y < area.height {
            let color = colors[particle.color_index % colors.len()];

            // fade with age
            let alpha = particle.life();
            let style = if alpha > 0.7 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else if alpha > 0.3 {
                Style::default().fg(color)
            } else {
                Style::default().fg(color).add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&particle.symbol.to_string());
                cell.set_style(style);
            }
        }
    }
}
