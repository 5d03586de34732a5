//! Space Invaders emulator binary.
//!
//! Runs the machine with a winit window and pixels framebuffer, or in
//! headless mode for a fixed number of frames and an optional screenshot.

use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use emu_invaders::video::{RGBA_LEN, SCREEN_HEIGHT, SCREEN_WIDTH};
use emu_invaders::{
    DipSwitches, Invaders, InvadersConfig, RomSource, UnimplementedPolicy, capture, key_map,
};
use pixels::{Pixels, SurfaceTexture};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

/// Frame duration for 60 Hz.
const FRAME_DURATION: Duration = Duration::from_micros(16_667);

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "emu-invaders", about = "Space Invaders arcade emulator")]
struct Cli {
    /// Directory holding invaders.h, invaders.g, invaders.f and invaders.e
    #[arg(long, default_value = "roms")]
    roms: PathBuf,

    /// Single combined 8K ROM image (overrides --roms)
    #[arg(long)]
    rom: Option<PathBuf>,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Number of frames in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Save a PNG screenshot after the headless run
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Window scale factor
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=8))]
    scale: u32,

    /// Step over unimplemented opcodes instead of stopping
    #[arg(long)]
    skip_unimplemented: bool,

    /// Ships per game (DIP switches)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(3..=6))]
    lives: u8,

    /// Bonus ship at 1000 points instead of 1500 (DIP switch)
    #[arg(long)]
    bonus_at_1000: bool,
}

impl Cli {
    fn config(&self) -> InvadersConfig {
        let roms = match &self.rom {
            Some(path) => RomSource::Combined(path.clone()),
            None => RomSource::Directory(self.roms.clone()),
        };
        let policy = if self.skip_unimplemented {
            UnimplementedPolicy::Skip
        } else {
            UnimplementedPolicy::Fatal
        };
        InvadersConfig {
            roms,
            dip: DipSwitches {
                lives: self.lives,
                bonus_at_1000: self.bonus_at_1000,
                ..DipSwitches::default()
            },
            policy,
        }
    }
}

// ---------------------------------------------------------------------------
// Headless mode
// ---------------------------------------------------------------------------

fn run_headless(cli: &Cli, mut machine: Invaders) {
    for _ in 0..cli.frames {
        if let Err(e) = machine.run_frame() {
            fail(&e);
        }
    }
    info!(frames = cli.frames, cycles = machine.cycles(), "headless run complete");

    if let Some(ref path) = cli.screenshot {
        if let Err(e) = capture::save_screenshot(&machine, path) {
            fail(&e);
        }
        info!(path = %path.display(), "screenshot saved");
    }
}

// ---------------------------------------------------------------------------
// Windowed mode (winit + pixels)
// ---------------------------------------------------------------------------

struct App {
    machine: Invaders,
    scale: u32,
    window: Option<&'static Window>,
    pixels: Option<Pixels<'static>>,
    last_frame_time: Instant,
}

impl App {
    fn new(machine: Invaders, scale: u32) -> Self {
        Self {
            machine,
            scale,
            window: None,
            pixels: None,
            last_frame_time: Instant::now(),
        }
    }

    fn handle_key(&mut self, keycode: KeyCode, pressed: bool) {
        if let Some(button) = key_map::map_keycode(keycode) {
            if pressed {
                self.machine.press(button);
            } else {
                self.machine.release(button);
            }
        }
    }

    fn update_pixels(&mut self) {
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };
        let frame = pixels.frame_mut();
        debug_assert_eq!(frame.len(), RGBA_LEN);
        self.machine.render_rgba(frame);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_size =
            winit::dpi::LogicalSize::new(SCREEN_WIDTH * self.scale, SCREEN_HEIGHT * self.scale);
        let attrs = WindowAttributes::default()
            .with_title("Space Invaders")
            .with_inner_size(window_size)
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window: &'static Window = Box::leak(Box::new(window));
                let inner = window.inner_size();
                let surface = SurfaceTexture::new(inner.width, inner.height, window);
                match Pixels::new(SCREEN_WIDTH, SCREEN_HEIGHT, surface) {
                    Ok(pixels) => {
                        self.pixels = Some(pixels);
                    }
                    Err(e) => {
                        error!("failed to create pixels: {e}");
                        event_loop.exit();
                        return;
                    }
                }
                self.window = Some(window);
            }
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if keycode == KeyCode::Escape && event.state == ElementState::Pressed {
                        event_loop.exit();
                        return;
                    }
                    self.handle_key(keycode, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if now.duration_since(self.last_frame_time) >= FRAME_DURATION {
                    if let Err(e) = self.machine.run_frame() {
                        fail(&e);
                    }
                    self.update_pixels();
                    self.last_frame_time = now;
                }

                if let Some(pixels) = self.pixels.as_ref() {
                    if let Err(e) = pixels.render() {
                        error!("render error: {e}");
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window {
            window.request_redraw();
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn fail(e: &emu_invaders::InvadersError) -> ! {
    error!("{e}");
    process::exit(1);
}

fn make_machine(cli: &Cli) -> Invaders {
    match Invaders::new(&cli.config()) {
        Ok(machine) => machine,
        Err(e) => fail(&e),
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let machine = make_machine(&cli);

    if cli.headless {
        run_headless(&cli, machine);
        return;
    }

    let mut app = App::new(machine, cli.scale);

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            error!("failed to create event loop: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = event_loop.run_app(&mut app) {
        error!("event loop error: {e}");
        process::exit(1);
    }
}
