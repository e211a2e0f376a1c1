//! SDL window, input and frame timing.

use log::warn;
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::engine::{Command, InputState};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Command(Command),
}

/// Maps a key press to an engine command.
fn command_for(key: Keycode) -> Option<Command> {
    match key {
        Keycode::B => Some(Command::ToggleBackfaceCulling),
        Keycode::C => Some(Command::ToggleCuboidCulling),
        Keycode::R => Some(Command::TogglePipeline),
        Keycode::L => Some(Command::ToggleSpanStrategy),
        Keycode::M => Some(Command::ToggleRenderMode),
        Keycode::P => Some(Command::ToggleParallel),
        _ => None,
    }
}

/// Measures frame durations and reports frames per second once a second.
pub struct FrameTimer {
    previous_frame_time: u64,
    window_start: u64,
    frames: u32,
}

impl FrameTimer {
    pub fn new(window: &Window) -> Self {
        let now = window.timer().ticks64();
        Self {
            previous_frame_time: now,
            window_start: now,
            frames: 0,
        }
    }

    /// Marks the end of a frame. Returns the milliseconds since the last call
    /// and, once per second, the average frame rate over that second.
    pub fn tick(&mut self, window: &Window) -> (u64, Option<f32>) {
        let current_time = window.timer().ticks64();
        let delta_time = current_time - self.previous_frame_time;
        self.previous_frame_time = current_time;
        self.frames += 1;

        let elapsed = current_time - self.window_start;
        if elapsed >= 1000 {
            let fps = self.frames as f32 * 1000.0 / elapsed as f32;
            self.window_start = current_time;
            self.frames = 0;
            (delta_time, Some(fps))
        } else {
            (delta_time, None)
        }
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before the creator it borrows from so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    _texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(Error::Window)?;
        let video_subsystem = sdl_context.video().map_err(Error::Window)?;
        let timer_subsystem = sdl_context.timer().map_err(Error::Window)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| Error::Window(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| Error::Window(e.to_string()))?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(Error::Window)?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is dropped before texture_creator by field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| Error::Window(e.to_string()))?;

        Ok(Self {
            canvas,
            texture,
            _texture_creator: texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains pending events. Escape and closing the window both quit.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(command) = command_for(key) {
                        events.push(WindowEvent::Command(command));
                    }
                }
                _ => {}
            }
        }
        events
    }

    /// Keys currently held down.
    pub fn input_state(&self) -> InputState {
        let keys = self.event_pump.keyboard_state();
        InputState {
            forward: keys.is_scancode_pressed(Scancode::Up),
            backward: keys.is_scancode_pressed(Scancode::Down),
            turn_left: keys.is_scancode_pressed(Scancode::Left),
            turn_right: keys.is_scancode_pressed(Scancode::Right),
            light_forward: keys.is_scancode_pressed(Scancode::W),
            light_backward: keys.is_scancode_pressed(Scancode::S),
            light_left: keys.is_scancode_pressed(Scancode::A),
            light_right: keys.is_scancode_pressed(Scancode::D),
        }
    }

    /// Uploads an ARGB8888 frame and shows it.
    pub fn present(&mut self, pixels: &[u32]) -> Result<()> {
        self.texture
            .update(None, bytemuck::cast_slice(pixels), (self.width * 4) as usize)
            .map_err(|e| Error::Window(e.to_string()))?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))
            .map_err(Error::Window)?;
        self.canvas.present();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) {
        title_applied(self.canvas.window_mut().set_title(title), title);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

/// Logs a failed title update. SDL only rejects titles with interior NUL
/// bytes, so the frame loop carries on either way.
fn title_applied<E: std::fmt::Display>(result: std::result::Result<(), E>, title: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not set window title {title:?}: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_title_is_reported_not_dropped() {
        assert!(title_applied::<String>(Ok(()), "FPS: 60"));
        assert!(!title_applied(Err("interior nul byte"), "bad\0title"));
    }
}
