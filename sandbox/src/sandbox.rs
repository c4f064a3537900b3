use ar_stage::assets::loader::DirectoryAssetLoader;
use ar_stage::geometry::alias::{Extent, Point, ScreenPoint};
use ar_stage::session::controller::{SessionNotice, SessionState};
use ar_stage::session::host::{LimitedReason, SessionError, TrackingState};
use ar_stage::simulation::simulated_host::SimulatedHost;
use ar_stage::utils::object_uid::AnchorUid;
use ar_stage::{AppSettings, ArExperience, GesturePhase};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{Key, NamedKey};
use winit::window::Window;

const ASSETS_FOLDER_NAME: &str = "assets";
const SETTINGS_FILE_NAME: &str = "settings.json";

const SLIDER_STEP: f32 = 0.1;
const PLANE_GROWTH: f32 = 0.5;

const FLOOR_SLOT: usize = 0;
const TABLE_SLOT: usize = 1;

fn load_settings() -> anyhow::Result<AppSettings> {
    let path = Path::new(ASSETS_FOLDER_NAME).join(SETTINGS_FILE_NAME);
    if false == path.exists() {
        info!("no {} found, using default settings", path.display());
        return Ok(AppSettings::default());
    }
    Ok(AppSettings::from_json_file(&path)?)
}

struct DetectedPlane {
    uid: AnchorUid,
    extent: Extent,
}

pub(super) struct Sandbox {
    window: Arc<Window>,
    experience: ArExperience<SimulatedHost>,

    last_cursor_position: Option<(f64, f64)>,
    last_frame: Instant,

    planes: [Option<DetectedPlane>; 2],
}

impl Sandbox {
    pub(super) fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let started = Instant::now();

        let settings = load_settings()?;
        let size = window.inner_size();
        let mut host = SimulatedHost::default();
        host.camera_mutable().set_viewport(size.width as f32, size.height as f32);
        host.set_tracking_state(TrackingState::Limited(LimitedReason::Initializing));

        let loader = DirectoryAssetLoader::new(ASSETS_FOLDER_NAME);
        let experience = ArExperience::new(host, &loader, &settings)?;

        info!("sandbox initialized in {} seconds", started.elapsed().as_secs_f64());
        info!("left click: place | wheel, +/-: scale | o: occlusion | p: floor plane | t: table plane | x: drop plane");
        info!("n: normal tracking | l: limited tracking | i: interrupt / resume | f: fail");

        let sandbox = Self {
            window,
            experience,
            last_cursor_position: None,
            last_frame: Instant::now(),
            planes: [None, None],
        };
        sandbox.update_title();
        Ok(sandbox)
    }

    pub(super) fn on_resumed(&mut self) {
        self.experience.view_will_appear();
        self.last_frame = Instant::now();
    }

    pub(super) fn on_suspended(&mut self) {
        self.experience.view_will_disappear();
    }

    pub(super) fn on_window_resized(&mut self, new_size: PhysicalSize<u32>) {
        self.experience.host_mutable().camera_mutable().set_viewport(new_size.width as f32, new_size.height as f32);
    }

    pub(super) fn on_redraw(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        self.experience.host_mutable().advance_frame(delta);
        self.pump_host_events();
        self.window.request_redraw();
    }

    pub(super) fn on_mouse_move(&mut self, position: PhysicalPosition<f64>) {
        self.last_cursor_position = Some((position.x, position.y));
    }

    pub(super) fn on_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        if MouseButton::Left != button {
            return;
        }
        let Some((x, y)) = self.last_cursor_position else {
            return;
        };
        let phase = if ElementState::Pressed == state { GesturePhase::Began } else { GesturePhase::Ended };
        if let Some(uid) = self.experience.on_tap(ScreenPoint::new(x as f32, y as f32), phase) {
            info!("placed {} ({} in total)", uid, self.experience.placed_instances().len());
        }
    }

    pub(super) fn on_mouse_wheel(&mut self, delta: f64) {
        self.nudge_scale(delta > 0.0);
    }

    pub(super) fn on_keyboard_event(&mut self, event: KeyEvent) {
        if ElementState::Pressed != event.state {
            return;
        }
        match event.logical_key {
            Key::Named(NamedKey::ArrowUp) => {
                self.nudge_scale(true);
            },
            Key::Named(NamedKey::ArrowDown) => {
                self.nudge_scale(false);
            },
            Key::Character(letter_key) => {
                if "+" == letter_key || "=" == letter_key {
                    self.nudge_scale(true);
                } else if "-" == letter_key {
                    self.nudge_scale(false);
                } else if "o" == letter_key {
                    let enabled = false == self.experience.ui().occlusion_switch();
                    if false == self.experience.on_occlusion_switch_changed(enabled) {
                        info!("occlusion switch set to {}, session unchanged", enabled);
                    }
                } else if "p" == letter_key {
                    self.detect_or_grow_plane(FLOOR_SLOT, Point::new(0.0, 0.0, -1.5));
                } else if "t" == letter_key {
                    self.detect_or_grow_plane(TABLE_SLOT, Point::new(0.4, 0.75, -1.0));
                } else if "x" == letter_key {
                    self.drop_plane();
                } else if "n" == letter_key {
                    self.experience.host_mutable().set_tracking_state(TrackingState::Normal);
                } else if "l" == letter_key {
                    self.experience.host_mutable().set_tracking_state(TrackingState::Limited(LimitedReason::ExcessiveMotion));
                } else if "i" == letter_key {
                    self.toggle_interruption();
                } else if "f" == letter_key {
                    self.experience.host_mutable().fail(SessionError::WorldTrackingFailed { reason: "simulated".to_string() });
                }
            }
            _ => (),
        }
        self.pump_host_events();
    }

    fn nudge_scale(&mut self, up: bool) {
        let current = self.experience.ui().current_scale();
        // quantization floors, so aim between two steps
        let raw = if up { current + SLIDER_STEP * 1.5 } else { current - SLIDER_STEP * 0.5 };
        let _ = self.experience.on_scale_slider_changed(raw);
        self.update_title();
    }

    fn detect_or_grow_plane(&mut self, slot: usize, position: Point) {
        if let Some(plane) = self.planes[slot].as_mut() {
            plane.extent += Extent::new(PLANE_GROWTH, PLANE_GROWTH);
            let (uid, extent) = (plane.uid, plane.extent);
            let _ = self.experience.host_mutable().grow_plane(uid, extent);
            return;
        }
        let extent = Extent::new(1.0, 1.0);
        let uid = self.experience.host_mutable().detect_plane(position, extent);
        self.planes[slot] = Some(DetectedPlane { uid, extent });
    }

    fn drop_plane(&mut self) {
        let Some(plane) = self.planes.iter_mut().rev().find_map(|slot| slot.take()) else {
            return;
        };
        let _ = self.experience.host_mutable().remove_plane(plane.uid);
    }

    fn toggle_interruption(&mut self) {
        let interrupted = SessionState::Interrupted == self.experience.session().state();
        let host = self.experience.host_mutable();
        if interrupted {
            host.end_interruption();
        } else {
            host.interrupt();
        }
    }

    fn pump_host_events(&mut self) {
        let events = self.experience.host_mutable().drain_events();
        if events.is_empty() {
            return;
        }
        for event in events.iter() {
            self.experience.handle_host_event(event);
        }
        for notice in self.experience.take_notices() {
            match notice {
                SessionNotice::Failed(_) => warn!("{}", notice),
                _ => info!("{}", notice),
            }
        }
        self.update_title();
    }

    fn update_title(&self) {
        let coaching = if self.experience.coaching().active() { " | looking for a surface" } else { "" };
        let occlusion = if self.experience.ui().occlusion_switch() { "on" } else { "off" };
        self.window.set_title(&format!(
            "{} | occlusion {} | {}{}",
            self.experience.ui().label(),
            occlusion,
            self.experience.session().state(),
            coaching,
        ));
    }
}
