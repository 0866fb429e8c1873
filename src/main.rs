//! Grid Raider native entry point
//!
//! Headless host: drives a session with a simple autopilot at a fixed frame
//! count and logs what a real presentation layer would draw.
//!
//! Usage: `grid-raider [settings.json] [max_frames]`

use grid_raider::normalize_angle;
use grid_raider::renderer::{Frame, HudUpdate, PresentationSink, Viewport};
use grid_raider::sim::{GameEvent, GameSession, GameState, SessionPhase, TickInput};
use grid_raider::Settings;

/// Frames to run when no limit is given (~5 minutes at 60 Hz)
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 5;
/// Largest pointer delta the autopilot produces per frame (pixels)
const MAX_LOOK_PIXELS: f32 = 40.0;
/// Autopilot fires when the target is this close to the crosshair
const AIM_WINDOW: f32 = 0.05;

/// Sink that logs instead of drawing
#[derive(Default)]
struct LogSink {
    frames: u64,
    wall_strips: u64,
    sprites: u64,
}

impl PresentationSink for LogSink {
    fn draw(&mut self, _viewport: Viewport, frame: &Frame) {
        self.frames += 1;
        self.wall_strips += frame.walls.len() as u64;
        self.sprites += frame.sprites.len() as u64;
    }

    fn hud(&mut self, hud: HudUpdate) {
        log::info!(
            "HUD health={} ammo={} score={}",
            hud.health,
            hud.ammo,
            hud.score
        );
    }

    fn event(&mut self, event: &GameEvent) {
        log::debug!("{:?}", event);
    }
}

/// Turn toward the nearest live enemy, walk at it, shoot when lined up
fn autopilot(state: &GameState, input: &mut TickInput, frame: u64) {
    let player = &state.player;
    let target = state
        .enemies
        .iter()
        .filter(|e| e.active)
        .min_by(|a, b| {
            a.pos
                .distance(player.pos)
                .total_cmp(&b.pos.distance(player.pos))
        });

    let Some(enemy) = target else {
        return;
    };

    let to_enemy = enemy.pos - player.pos;
    let diff = normalize_angle(to_enemy.y.atan2(to_enemy.x) - player.angle);
    input.look_delta = (diff / player.look_sensitivity).clamp(-MAX_LOOK_PIXELS, MAX_LOOK_PIXELS);
    input.forward = to_enemy.length() > 2.0;
    // Every 4th frame, so the trigger behaves like discrete clicks
    input.fire = diff.abs() < AIM_WINDOW && frame % 4 == 0;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Grid Raider (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let max_frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let mut session = match GameSession::new(&settings) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid map: {}", e);
            std::process::exit(1);
        }
    };

    session.start();
    let mut sink = LogSink::default();
    let mut input = TickInput::default();

    for frame in 0..max_frames {
        autopilot(session.state(), &mut input, frame);
        session.run_frame(&mut input, &mut sink);
        if let SessionPhase::Ended(outcome) = session.phase() {
            log::info!("{:?} after {} frames", outcome, frame + 1);
            break;
        }
    }

    let hud = session.hud();
    println!(
        "phase={:?} score={} health={} ammo={} frames={} strips={} sprites={}",
        session.phase(),
        hud.score,
        hud.health,
        hud.ammo,
        sink.frames,
        sink.wall_strips,
        sink.sprites
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // A web host embeds the library directly; this binary is native-only
}
