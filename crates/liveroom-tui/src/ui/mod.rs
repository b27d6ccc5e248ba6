//! Screen layout and widgets.
//!
//! Each submodule draws one region of the room screen from [`App`] state;
//! none of them touch I/O beyond the ratatui frame they are handed.

mod feed;
mod input;
mod rank;
mod stage;
mod status;

use liveroom_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use crate::InputState;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input: &InputState) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let [main_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(MAIN_AREA_MIN_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(frame.area());

    render_main_area(frame, app, main_area);
    input::render(frame, app, input, input_area);
    status::render(frame, app, status_area);
}

/// Message feed on the left, stage and gift rank stacked on the right.
fn render_main_area(frame: &mut Frame, app: &App, area: Rect) {
    const FEED_AREA_MIN_WIDTH: u16 = 20;
    const SIDE_PANEL_WIDTH: u16 = 26;

    let [feed_area, side_area] = Layout::horizontal([
        Constraint::Min(FEED_AREA_MIN_WIDTH),
        Constraint::Length(SIDE_PANEL_WIDTH),
    ])
    .areas(area);

    feed::render(frame, app, feed_area);
    render_side_panel(frame, app, side_area);
}

fn render_side_panel(frame: &mut Frame, app: &App, area: Rect) {
    const STAGE_HEIGHT: u16 = 10;
    const RANK_MIN_HEIGHT: u16 = 3;

    let [stage_area, rank_area] =
        Layout::vertical([Constraint::Length(STAGE_HEIGHT), Constraint::Min(RANK_MIN_HEIGHT)])
            .areas(area);

    stage::render(frame, app, stage_area);
    rank::render(frame, app, rank_area);
}
