use termcube_core::{Action, Color, Config, Orbit, Session};
use termcube_terminal::{Rasterizer, TerminalApp};

fn app(width: u16, height: u16) -> TerminalApp {
    TerminalApp::with_size(Session::new(Config::default(), 7), width, height)
}

fn color_at(r: &Rasterizer, x: i32, y: i32) -> Option<Color> {
    r.grid().get(x, y).filter(|c| c.ch != ' ').map(|c| c.color)
}

fn bottom_row(r: &Rasterizer) -> String {
    r.grid().rows().last().unwrap_or_default()
}

fn idle(app: &mut TerminalApp, frames: usize) {
    for _ in 0..frames {
        app.frame(None);
    }
}

#[test]
fn first_frame_shows_front_face_and_hud() {
    let mut app = app(80, 24);
    app.frame(None);

    let r = app.rasterizer();
    assert_eq!(color_at(r, 40, 12), Some(Color::Red));
    assert!(r.grid().rows().next().unwrap().starts_with("FPS: 0"));
    assert_eq!(bottom_row(r).trim(), "");
}

#[test]
fn move_history_appears_on_bottom_row() {
    let mut app = app(80, 24);
    app.frame(Action::from_char('r'));
    idle(&mut app, 60);
    app.frame(Action::from_char('U'));
    idle(&mut app, 60);

    assert_eq!(app.session().moves().to_string(), "rU");
    assert!(bottom_row(app.rasterizer()).starts_with("rU"));
}

#[test]
fn undo_clears_history() {
    let mut app = app(80, 24);
    app.frame(Action::from_char('f'));
    idle(&mut app, 60);
    app.frame(Some(Action::Undo));
    idle(&mut app, 60);

    assert!(app.session().moves().is_empty());
    assert_eq!(bottom_row(app.rasterizer()).trim(), "");
    assert_eq!(color_at(app.rasterizer(), 40, 12), Some(Color::Red));
}

#[test]
fn orbit_changes_the_picture() {
    let mut app = app(80, 24);
    app.frame(None);
    let before = app.rasterizer().grid().clone();

    app.frame(Some(Action::Orbit(Orbit::YawUp)));
    app.frame(Some(Action::Orbit(Orbit::PitchUp)));
    idle(&mut app, 10);

    assert_ne!(app.rasterizer().grid(), &before);
    let orbit = app.session().orbit();
    assert!(orbit.yaw.abs() > 0.1);
    assert!(orbit.pitch.abs() > 0.1);
}

#[test]
fn resize_rescales_the_grid() {
    let mut app = app(80, 24);
    app.frame(None);
    app.resize(40, 12);
    app.frame(None);

    let r = app.rasterizer();
    assert_eq!((r.width(), r.height()), (40, 12));
    assert_eq!(r.grid().rows().count(), 12);
    assert_eq!(color_at(r, 20, 6), Some(Color::Red));
}

#[test]
fn nearest_faces_win_without_culling() {
    let mut config = Config::default();
    config.render.cull_backfaces = false;
    let mut app = TerminalApp::with_size(Session::new(config, 7), 80, 24);
    app.frame(None);

    // Back and interior faces are drawn too, but the front face is nearest.
    assert_eq!(color_at(app.rasterizer(), 40, 12), Some(Color::Red));
}
