//! Terminal front end: frame loop, input handling, and presentation.

use anyhow::{ensure, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use nalgebra::Vector3;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use sv3d_core::{merge_for_render, pipeline, Camera, PointLight, Rgb, SceneObject, Viewport};
use tracing::debug;

pub mod surface;

pub use surface::TermSurface;

/// Tunable viewer behavior. Speeds are per frame, not per second.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    pub ascend_speed: f32,
    /// Degrees of yaw/pitch per cell of mouse travel.
    pub look_sensitivity: f32,
    pub fps_cap: u32,
    pub clear_color: Rgb,
    /// Screen cells per unit of view-space x (or y) at depth 1.
    pub projection_scale: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.4,
            sprint_multiplier: 3.0,
            ascend_speed: 0.5,
            look_sensitivity: 2.0,
            fps_cap: 60,
            clear_color: Rgb::BLACK,
            projection_scale: 40.0,
        }
    }
}

/// Input gathered from the terminal, drained once per frame.
#[derive(Debug, Clone, Default)]
struct InputState {
    quit: bool,
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    ascend: bool,
    descend: bool,
    sprint: bool,
    light_forward: bool,
    light_backward: bool,
    light_left: bool,
    light_right: bool,
    light_up: bool,
    light_down: bool,
    mouse_delta: (f32, f32),
    resized: Option<(u16, u16)>,
}

/// Interactive viewer: owns the scene, camera, light, and render surface.
pub struct ViewerApp {
    objects: Vec<SceneObject>,
    colors: Vec<Rgb>,
    camera: Camera,
    light: PointLight,
    viewport: Viewport,
    surface: TermSurface,
    config: ViewerConfig,
    /// Scripted per-frame spin of one object, for demo scenes.
    spin: Option<(usize, Vector3<f32>)>,
    last_mouse: Option<(u16, u16)>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl ViewerApp {
    /// Build a viewer sized to the current terminal.
    ///
    /// `colors` holds one base color per face across all objects, in object
    /// order.
    pub fn new(
        objects: Vec<SceneObject>,
        colors: Vec<Rgb>,
        camera: Camera,
        light: PointLight,
        config: ViewerConfig,
    ) -> Result<Self> {
        let total_faces: usize = objects.iter().map(|o| o.mesh.faces.len()).sum();
        ensure!(
            colors.len() == total_faces,
            "expected {total_faces} face colors, got {}",
            colors.len()
        );

        let (width, height) = terminal::size()?;

        Ok(Self {
            objects,
            colors,
            camera,
            light,
            viewport: Viewport::new(width as u32, height as u32, config.projection_scale),
            surface: TermSurface::new(width as usize, height as usize),
            config,
            spin: None,
            last_mouse: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Spin object `index` by `angles` radians every frame.
    pub fn with_spin(mut self, index: usize, angles: Vector3<f32>) -> Self {
        self.spin = Some((index, angles));
        self
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(1000 / self.config.fps_cap.max(1) as u64);

        while self.running {
            let frame_start = Instant::now();

            let input = self.collect_input()?;
            self.apply_input(&input);
            self.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Drain every pending terminal event into one per-frame input state.
    fn collect_input(&mut self) -> Result<InputState> {
        let mut input = InputState::default();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    Self::apply_key(&mut input, key);
                }
                Event::Mouse(mouse) => self.apply_mouse(&mut input, mouse),
                Event::Resize(width, height) => input.resized = Some((width, height)),
                _ => {}
            }
        }

        Ok(input)
    }

    fn apply_key(input: &mut InputState, key: KeyEvent) {
        // Raw mode swallows the interrupt signal, so catch the chord here.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') = key.code {
                input.quit = true;
            }
            return;
        }

        input.sprint |= key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => input.quit = true,
            KeyCode::Char('w') | KeyCode::Char('W') => input.forward = true,
            KeyCode::Char('s') | KeyCode::Char('S') => input.backward = true,
            KeyCode::Char('a') | KeyCode::Char('A') => input.left = true,
            KeyCode::Char('d') | KeyCode::Char('D') => input.right = true,
            KeyCode::Char(' ') => input.ascend = true,
            KeyCode::Char('c') | KeyCode::Char('C') => input.descend = true,
            KeyCode::Up => input.light_forward = true,
            KeyCode::Down => input.light_backward = true,
            KeyCode::Left => input.light_left = true,
            KeyCode::Right => input.light_right = true,
            KeyCode::Char('r') | KeyCode::Char('R') => input.light_up = true,
            KeyCode::Char('f') | KeyCode::Char('F') => input.light_down = true,
            _ => {}
        }
    }

    /// Accumulate mouse travel between frames; the first event only anchors
    /// the cursor.
    fn apply_mouse(&mut self, input: &mut InputState, mouse: MouseEvent) {
        if !matches!(
            mouse.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_)
        ) {
            return;
        }
        if let Some((last_column, last_row)) = self.last_mouse {
            input.mouse_delta.0 += mouse.column as f32 - last_column as f32;
            input.mouse_delta.1 += mouse.row as f32 - last_row as f32;
        }
        self.last_mouse = Some((mouse.column, mouse.row));
    }

    /// Route the frame's input into camera, light, and viewport state.
    fn apply_input(&mut self, input: &InputState) {
        if input.quit {
            self.running = false;
        }

        if let Some((width, height)) = input.resized {
            debug!(width, height, "terminal resized");
            self.surface.resize(width as usize, height as usize);
            self.viewport =
                Viewport::new(width as u32, height as u32, self.config.projection_scale);
        }

        let (delta_x, delta_y) = input.mouse_delta;
        if delta_x != 0.0 || delta_y != 0.0 {
            let sensitivity = self.config.look_sensitivity;
            self.camera.look(-delta_x * sensitivity, delta_y * sensitivity);
        }

        let speed = if input.sprint {
            self.config.move_speed * self.config.sprint_multiplier
        } else {
            self.config.move_speed
        };

        // Forward travel runs against the camera's front vector; vertical
        // travel is world-axis so looking down does not steer it.
        let front = self.camera.front;
        let right = self.camera.right;
        if input.forward {
            self.camera.position -= front * speed;
        }
        if input.backward {
            self.camera.position += front * speed;
        }
        if input.left {
            self.camera.position -= right * speed;
        }
        if input.right {
            self.camera.position += right * speed;
        }
        if input.ascend {
            self.camera.position += Vector3::y() * self.config.ascend_speed;
        }
        if input.descend {
            self.camera.position -= Vector3::y() * self.config.ascend_speed;
        }

        // The light flies along the camera's basis so its controls feel like
        // the camera's.
        if input.light_forward {
            self.light.position -= front * speed;
        }
        if input.light_backward {
            self.light.position += front * speed;
        }
        if input.light_left {
            self.light.position -= right * speed;
        }
        if input.light_right {
            self.light.position += right * speed;
        }
        if input.light_up {
            self.light.position += Vector3::y() * self.config.ascend_speed;
        }
        if input.light_down {
            self.light.position -= Vector3::y() * self.config.ascend_speed;
        }
    }

    fn update(&mut self) {
        self.camera.update_vectors();

        if let Some((index, angles)) = self.spin {
            if let Some(object) = self.objects.get_mut(index) {
                object.rotate_about_center(&angles);
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        self.surface.clear(self.config.clear_color);

        let scene = merge_for_render(&self.objects, &self.colors)?;
        pipeline::draw(
            &scene,
            &self.camera,
            &self.light,
            &self.viewport,
            &mut self.surface,
        )?;

        // Output to terminal
        let mut stdout = stdout();
        self.surface.present(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "SV3D | FPS: {:.1} | WASD+mouse fly, space/C rise/sink, arrows+R/F light, Q quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
