//! Session control surface
//!
//! [`GameSession`] owns the whole simulation and is the only mutation entry
//! point for a host: `start`, `pause`/`resume`, `restart`, and `run_frame`
//! once per display refresh. Scheduling stays with the host.

use super::map::MapError;
use super::raycast::Raycaster;
use super::state::{GameState, SessionPhase};
use super::tick::{TickInput, tick};
use crate::renderer::{Frame, HudUpdate, PresentationSink, Viewport, render_frame};
use crate::settings::Settings;

/// A single game: map, entities, counters and the frame pipeline
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    raycaster: Raycaster,
    viewport: Viewport,
    /// HUD values last sent to the sink
    last_hud: Option<HudUpdate>,
}

impl GameSession {
    /// Build an idle session from settings
    pub fn new(settings: &Settings) -> Result<Self, MapError> {
        let map = settings.build_map()?;
        let mut state = GameState::new(map, settings.seed, settings.enemy_count);
        state.player.fov = settings.clamped_fov();
        state.player.look_sensitivity = settings.mouse_sensitivity;

        log::info!(
            "Session created: {}x{} map, {} enemies, seed {:#x}",
            state.map.width(),
            state.map.height(),
            settings.enemy_count,
            settings.seed
        );

        Ok(Self {
            state,
            raycaster: Raycaster::default(),
            viewport: Viewport::new(settings.viewport_width, settings.viewport_height),
            last_hud: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Host surface resized
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Begin a run from `Idle` or after a run has ended. No-op while a run is live.
    pub fn start(&mut self) {
        match self.state.phase {
            SessionPhase::Idle | SessionPhase::Ended(_) => self.begin_run(),
            phase => log::debug!("start() ignored in {:?}", phase),
        }
    }

    /// Begin a fresh run regardless of the current phase
    pub fn restart(&mut self) {
        self.begin_run();
    }

    pub fn pause(&mut self) {
        if self.state.phase == SessionPhase::Playing {
            self.state.phase = SessionPhase::Paused;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == SessionPhase::Paused {
            self.state.phase = SessionPhase::Playing;
            log::info!("Resumed");
        }
    }

    fn begin_run(&mut self) {
        self.state.reset();
        self.state.phase = SessionPhase::Playing;
        // Force a HUD refresh on the first frame
        self.last_hud = None;
        log::info!(
            "Run started with {} enemies",
            self.state.active_enemy_count()
        );
    }

    /// Current HUD values (health floored at zero)
    pub fn hud(&self) -> HudUpdate {
        HudUpdate {
            health: self.state.health.max(0),
            ammo: self.state.ammo,
            score: self.state.score,
        }
    }

    /// Run one frame: simulate, render, report.
    ///
    /// One-shot parts of `input` (fire, pause, pointer delta) are consumed.
    /// Rendering also happens while paused or ended so the host always has a
    /// current picture.
    pub fn run_frame<S: PresentationSink + ?Sized>(&mut self, input: &mut TickInput, sink: &mut S) {
        tick(&mut self.state, input);
        input.consume_one_shots();

        let frame = self.render();
        sink.draw(self.viewport, &frame);

        for event in self.state.drain_events() {
            sink.event(&event);
        }

        let hud = self.hud();
        if self.last_hud != Some(hud) {
            sink.hud(hud);
            self.last_hud = Some(hud);
        }
    }

    /// Render the current state without advancing it
    pub fn render(&self) -> Frame {
        render_frame(&self.state, &self.raycaster, self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, GameEvent, Outcome};
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingSink {
        frames: usize,
        walls: usize,
        huds: Vec<HudUpdate>,
        events: Vec<GameEvent>,
    }

    impl PresentationSink for RecordingSink {
        fn draw(&mut self, _viewport: Viewport, frame: &Frame) {
            self.frames += 1;
            self.walls = frame.walls.len();
        }

        fn hud(&mut self, hud: HudUpdate) {
            self.huds.push(hud);
        }

        fn event(&mut self, event: &GameEvent) {
            self.events.push(*event);
        }
    }

    fn small_session() -> GameSession {
        let settings = Settings {
            viewport_width: 32,
            viewport_height: 24,
            enemy_count: 2,
            ..Settings::default()
        };
        GameSession::new(&settings).unwrap()
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut session = small_session();
        assert_eq!(session.phase(), SessionPhase::Idle);

        session.pause();
        assert_eq!(session.phase(), SessionPhase::Idle);

        session.start();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.state().enemies.len(), 2);

        session.pause();
        assert_eq!(session.phase(), SessionPhase::Paused);
        session.start();
        assert_eq!(session.phase(), SessionPhase::Paused);
        session.resume();
        assert_eq!(session.phase(), SessionPhase::Playing);

        session.restart();
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_hud_sent_only_on_change() {
        let mut session = small_session();
        session.start();
        let mut sink = RecordingSink::default();
        let mut input = TickInput::default();

        session.run_frame(&mut input, &mut sink);
        session.run_frame(&mut input, &mut sink);
        assert_eq!(sink.frames, 2);
        assert_eq!(sink.walls, 32);
        assert_eq!(sink.huds.len(), 1);
        assert_eq!(
            sink.huds[0],
            HudUpdate {
                health: 100,
                ammo: 30,
                score: 0
            }
        );

        input.fire = true;
        session.run_frame(&mut input, &mut sink);
        assert!(!input.fire);
        assert_eq!(sink.huds.len(), 2);
        assert_eq!(sink.huds[1].ammo, 29);

        session.run_frame(&mut input, &mut sink);
        assert_eq!(sink.huds.len(), 2);
    }

    #[test]
    fn test_paused_frame_still_renders() {
        let mut session = small_session();
        session.start();
        session.pause();
        let mut sink = RecordingSink::default();
        let mut input = TickInput {
            forward: true,
            look_delta: 40.0,
            ..Default::default()
        };
        session.run_frame(&mut input, &mut sink);
        assert_eq!(sink.frames, 1);
        assert_eq!(session.state().player.pos, Vec2::new(5.0, 5.0));
        assert_eq!(session.state().time_ticks, 0);
        assert_eq!(input.look_delta, 0.0);
    }

    #[test]
    fn test_pause_edge_from_input() {
        let mut session = small_session();
        session.start();
        let mut sink = RecordingSink::default();
        let mut input = TickInput {
            pause: true,
            ..Default::default()
        };
        session.run_frame(&mut input, &mut sink);
        assert_eq!(session.phase(), SessionPhase::Paused);
        // Edge consumed: the next frame stays paused
        session.run_frame(&mut input, &mut sink);
        assert_eq!(session.phase(), SessionPhase::Paused);
    }

    #[test]
    fn test_win_then_restart() {
        let mut session = small_session();
        session.start();
        session.state.enemies = vec![Enemy::new(99, Vec2::new(7.0, 5.0))];

        let mut sink = RecordingSink::default();
        for _ in 0..3 {
            let mut input = TickInput {
                fire: true,
                ..Default::default()
            };
            session.run_frame(&mut input, &mut sink);
        }
        assert_eq!(session.phase(), SessionPhase::Ended(Outcome::Won));
        assert_eq!(session.hud().score, 100);
        assert!(sink.events.contains(&GameEvent::EnemyKilled { enemy_id: 99 }));
        assert!(sink.events.contains(&GameEvent::Won { score: 100 }));

        // Ended still renders a final frame
        let frames = sink.frames;
        session.run_frame(&mut TickInput::default(), &mut sink);
        assert_eq!(sink.frames, frames + 1);

        session.start();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.hud(), HudUpdate { health: 100, ammo: 30, score: 0 });
        assert_eq!(session.state().active_enemy_count(), 2);
    }

    #[test]
    fn test_custom_map_and_bad_map() {
        let settings = Settings {
            map: Some(vec![
                "#######".into(),
                "#.....#".into(),
                "#######".into(),
            ]),
            enemy_count: 1,
            ..Settings::default()
        };
        let mut session = GameSession::new(&settings).unwrap();
        assert_eq!(session.state().map.width(), 7);
        session.start();
        assert!(!session.state().map.is_blocked_at(session.state().enemies[0].pos));

        let settings = Settings {
            map: Some(vec!["#.".into()]),
            ..Settings::default()
        };
        assert!(GameSession::new(&settings).is_err());
    }

    #[test]
    fn test_oversized_fov_renders_positive_walls() {
        let settings =
            Settings::from_json(r#"{ "fov": 3.5, "viewport_width": 8, "viewport_height": 100 }"#)
                .unwrap();
        let mut session = GameSession::new(&settings).unwrap();
        assert!(session.state().player.fov < std::f32::consts::PI);
        session.start();
        let frame = session.render();
        assert_eq!(frame.walls.len(), 8);
        for strip in &frame.walls {
            assert!(strip.height > 0.0, "height {}", strip.height);
            assert!(strip.depth > 0.0);
        }
    }

    #[test]
    fn test_zero_fov_projects_finite_sprites() {
        let settings = Settings {
            fov: 0.0,
            enemy_count: 0,
            ..Settings::default()
        };
        let mut session = GameSession::new(&settings).unwrap();
        session.start();
        session.state.enemies = vec![Enemy::new(1, Vec2::new(7.0, 5.0))];
        let frame = session.render();
        assert_eq!(frame.sprites.len(), 1);
        assert!(frame.sprites[0].center_x.is_finite());
    }

    #[test]
    fn test_set_viewport_changes_column_count() {
        let mut session = small_session();
        session.start();
        session.set_viewport(10, 10);
        assert_eq!(session.render().walls.len(), 10);
    }
}
