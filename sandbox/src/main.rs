//#![deny(warnings)] TODO: switch on, when ready

mod sandbox;

use crate::sandbox::Sandbox;
use log::{error, info, trace};
use std::env;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::ControlFlow;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::Window;
use winit::window::WindowId;

const WINDOW_TITLE: &str = "AR Stage Sandbox";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match env::current_dir() {
        Ok(path) => info!("current directory: {}", path.display()),
        Err(e) => error!("error getting current directory: {}", e),
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut application = Application::default();
    event_loop.run_app(&mut application)?;

    Ok(())
}

#[derive(Default)]
struct Application {
    sandbox: Option<Sandbox>,
}

impl ApplicationHandler for Application {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(sandbox) = self.sandbox.as_mut() {
            sandbox.on_resumed();
            return;
        }
        let window_creation = event_loop.create_window(Window::default_attributes().with_title(WINDOW_TITLE));

        match window_creation {
            Ok(ware) => {
                let window = Arc::new(ware);
                match Sandbox::new(window.clone()) {
                    Ok(mut sandbox) => {
                        sandbox.on_resumed();
                        self.sandbox = Some(sandbox);
                        window.request_redraw();
                    }
                    Err(error) => {
                        error!("failed to create the sandbox: {:#}", error);
                        event_loop.exit();
                    }
                }
            }
            Err(error) => {
                error!("could not create the window: {}", error);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                trace!("exiting the loop via close request");
                self.sandbox.as_mut().map(|sandbox| sandbox.on_suspended());
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                info!("window resized to {:?}", new_size);
                self.sandbox.as_mut().map(|sandbox| sandbox.on_window_resized(new_size));
            }
            WindowEvent::ScaleFactorChanged { scale_factor: new_scale_factor, .. } => {
                info!("window scale factor changed to {:?}", new_scale_factor);
            }
            WindowEvent::RedrawRequested => {
                self.sandbox.as_mut().map(|sandbox| sandbox.on_redraw());
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.sandbox.as_mut().map(|sandbox| sandbox.on_mouse_button(state, button));
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.sandbox.as_mut().map(|sandbox| sandbox.on_mouse_move(position));
            }
            WindowEvent::MouseWheel { delta: MouseScrollDelta::LineDelta(_, y), .. } => {
                self.sandbox.as_mut().map(|sandbox| sandbox.on_mouse_wheel(y as f64));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.sandbox.as_mut().map(|sandbox| sandbox.on_keyboard_event(event));
            }
            _ => (),
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.sandbox.as_mut().map(|sandbox| sandbox.on_suspended());
    }
}
