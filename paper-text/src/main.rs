use std::{
    env,
    num::NonZeroU32,
    path::PathBuf,
    rc::Rc,
    time::{Duration, Instant},
};

use eyre::{ensure, eyre, WrapErr};
use paper_text::{
    graphics::shake::{jitter_offset, wave_offset},
    Color, Compose, DrawHandle, Drawable, FontHandle, Passage, Position, TtfFont, TtfSettings,
    Typewriter,
};
use winit::{
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

const FONT_VAR: &str = "PAPER_TEXT_FONT";
const FPS_VAR: &str = "PAPER_TEXT_FPS";

const BACKGROUND: Color = Color::new(0x20, 0x1c, 0x2c);

struct Config {
    font: PathBuf,
    /// Typewriter pulses per second
    fps: u32,
}
impl Config {
    fn from_env() -> eyre::Result<Self> {
        let font = env::var_os(FONT_VAR)
            .map(PathBuf::from)
            .ok_or_else(|| eyre!("set {FONT_VAR} to a .ttf or .otf file"))?;

        let fps = match env::var(FPS_VAR) {
            Ok(value) => value
                .parse()
                .wrap_err_with(|| format!("parsing {FPS_VAR}={value}"))?,
            Err(_) => 30,
        };
        ensure!(fps > 0, "{FPS_VAR} must be at least 1");

        Ok(Self { font, fps })
    }
}

/// The dialog that gets typed out
fn script(writer: &mut Typewriter<Passage>, small: FontHandle, started: Instant) {
    writer
        .add_text("Oh! A visitor.")
        .wait(20)
        .add_newline()
        .add_text("Welcome to the ")
        .set_color(255, 210, 90)
        .set_shake(Some(Rc::new(move |index| {
            wave_offset(3, 8.0, started.elapsed().as_secs_f32(), index)
        })))
        .add_text("Paper Kingdom")
        .set_shake(None)
        .set_color(255, 255, 255)
        .add_text(".")
        .wait(30)
        .add_newline()
        .add_text("Beware the ")
        .set_color(200, 40, 40)
        .set_shake(Some(Rc::new(move |index| {
            // reseeded every 60ms so the word trembles
            jitter_offset(1, started.elapsed().as_millis() as u64 / 60, index)
        })))
        .add_slow_text(4, "haunted woods")
        .set_shake(None)
        .set_color(255, 255, 255)
        .add_text("...")
        .add_newline()
        .set_font(small)
        .set_color(150, 150, 170)
        .add_slow_text(2, "(press space to skip)")
        .custom(|| log::info!("dialog finished"));
}

fn redraw(window: &Window, surface: &mut softbuffer::Surface, scene: &impl Drawable) -> eyre::Result<()> {
    let size = window.inner_size();
    let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
    else {
        return Ok(());
    };

    surface
        .resize(width, height)
        .map_err(|error| eyre!("resizing surface: {error}"))?;
    let mut buffer = surface
        .buffer_mut()
        .map_err(|error| eyre!("acquiring frame buffer: {error}"))?;

    let mut handle = DrawHandle::new(&mut buffer, width.get() as usize);
    handle.clear(BACKGROUND);
    scene.draw_at(&mut handle, Position::new(32, 32));

    buffer
        .present()
        .map_err(|error| eyre!("presenting frame: {error}"))
}

fn main() -> eyre::Result<()> {
    env_logger::init();
    let config = Config::from_env()?;

    let body: FontHandle = Rc::new(TtfFont::from_path(
        &config.font,
        TtfSettings {
            size: 28.0,
            ..TtfSettings::default()
        },
    )?);
    let small: FontHandle = Rc::new(TtfFont::from_path(
        &config.font,
        TtfSettings {
            size: 18.0,
            ..TtfSettings::default()
        },
    )?);

    let mut writer = Typewriter::new(Passage::new(body));
    script(&mut writer, small, Instant::now());

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Paper Text")
        .build(&event_loop)
        .wrap_err("creating window")?;

    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|error| eyre!("creating softbuffer context: {error}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|error| eyre!("creating softbuffer surface: {error}"))?;

    let tick = Duration::from_secs(1) / config.fps;
    let mut next_tick = Instant::now();

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => control_flow.set_exit(),
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(key),
                        ..
                    },
                ..
            } => match key {
                VirtualKeyCode::Escape => control_flow.set_exit(),
                VirtualKeyCode::Space => {
                    let revealed = writer.flush();
                    log::debug!("skipped ahead {revealed} characters");
                    window.request_redraw();
                }
                _ => (),
            },
            _ => (),
        },

        Event::MainEventsCleared => {
            let now = Instant::now();
            if now >= next_tick {
                writer.pulse();
                // shaking text moves even when nothing new was revealed
                window.request_redraw();
                next_tick = now + tick;
            }
            control_flow.set_wait_until(next_tick);
        }

        Event::RedrawRequested(window_id) if window_id == window.id() => {
            if let Err(error) = redraw(&window, &mut surface, &writer) {
                log::error!("{error:#}");
                control_flow.set_exit();
            }
        }

        _ => (),
    })
}
