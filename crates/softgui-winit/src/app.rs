use std::fmt;
use std::time::{Duration, Instant};

pub use winit::error::{EventLoopError, OsError};
use winit::event::StartCause;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::WindowId;

use crate::{
    event::{Event, HandleStatus},
    time::{FrameTime, TickSchedule, TimeTracker},
    window::{Window, WindowDescriptor},
};

pub struct AppCtx<'a> {
    event_loop: &'a ActiveEventLoop,
}

impl AppCtx<'_> {
    pub fn create_window(&mut self, descriptor: WindowDescriptor) -> Result<Window, OsError> {
        Window::open(self.event_loop, descriptor)
    }

    pub fn exit(&self) {
        self.event_loop.exit();
    }
}

/// Errors that end [`run_app`] early.
#[derive(Debug)]
pub enum RunError {
    /// The winit event loop could not be created or failed while running.
    EventLoop(EventLoopError),
    /// The OS refused to create a window.
    Os(OsError),
    /// The app factory failed for another reason (e.g. no presentation backend).
    Startup(String),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::EventLoop(err) => write!(f, "event loop error: {}", err),
            RunError::Os(err) => write!(f, "failed to create window: {}", err),
            RunError::Startup(msg) => write!(f, "startup failed: {}", msg),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::EventLoop(err) => Some(err),
            RunError::Os(err) => Some(err),
            RunError::Startup(_) => None,
        }
    }
}

impl From<EventLoopError> for RunError {
    fn from(err: EventLoopError) -> Self {
        RunError::EventLoop(err)
    }
}

impl From<OsError> for RunError {
    fn from(err: OsError) -> Self {
        RunError::Os(err)
    }
}

pub trait App {
    /// Called once right after the factory built the app.
    #[allow(unused_variables)]
    fn on_start(&mut self, ctx: &mut AppCtx) {}

    /// Called once per fixed period while the loop runs (see [`LoopSettings::tick_interval`]).
    #[allow(unused_variables)]
    fn tick(&mut self, ctx: &mut AppCtx, time: &FrameTime) {}

    /// Called for every window event, strictly in arrival order.
    fn on_event(&mut self, ctx: &mut AppCtx, window_id: WindowId, event: &Event) -> HandleStatus;

    /// Called when the OS asks a window to redraw.
    fn render(&mut self, ctx: &mut AppCtx, window_id: WindowId);

    /// Called when the app is about to exit.
    #[allow(unused_variables)]
    fn on_exit(&mut self, ctx: &mut AppCtx) {}
}

pub type AppFactory = Box<dyn FnOnce(&mut AppCtx) -> Result<Box<dyn App>, RunError>>;

/// Event loop settings.
#[derive(Debug, Clone, Default)]
pub struct LoopSettings {
    /// Period of [`App::tick`]. `None` blocks until the next OS event.
    pub tick_interval: Option<Duration>,
}

struct AppProxy {
    factory: Option<AppFactory>,
    app: Option<Box<dyn App>>,
    settings: LoopSettings,
    schedule: Option<TickSchedule>,
    time_tracker: TimeTracker,
    error: Option<RunError>,
}

impl AppProxy {
    fn exit_with(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_mut() {
            let mut ctx = AppCtx { event_loop };
            app.on_exit(&mut ctx);
        }
        event_loop.exit();
    }
}

impl winit::application::ApplicationHandler for AppProxy {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(factory) = self.factory.take() else {
            return;
        };
        let mut ctx = AppCtx { event_loop };
        match factory(&mut ctx) {
            Ok(mut app) => {
                app.on_start(&mut ctx);
                self.schedule = self
                    .settings
                    .tick_interval
                    .map(|period| TickSchedule::new(period, Instant::now()));
                self.app = Some(app);
            }
            Err(err) => {
                tracing::error!("failed to start app: {}", err);
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: StartCause) {
        let (Some(app), Some(schedule)) = (self.app.as_mut(), self.schedule.as_mut()) else {
            return;
        };
        let now = Instant::now();
        if schedule.poll(now) {
            let time = self.time_tracker.tick_at(now);
            let mut ctx = AppCtx { event_loop };
            app.tick(&mut ctx, &time);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match &self.schedule {
            Some(schedule) => event_loop.set_control_flow(ControlFlow::WaitUntil(schedule.deadline())),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: winit::event::WindowEvent,
    ) {
        use winit::event::WindowEvent;

        let Some(app) = self.app.as_mut() else {
            return;
        };
        let mut ctx = AppCtx { event_loop };

        if let WindowEvent::RedrawRequested = event {
            app.render(&mut ctx, window_id);
            return;
        }

        let Some(event) = Event::from_winit(event) else {
            return;
        };

        let status = app.on_event(&mut ctx, window_id, &event);

        // Default event handling
        if let Event::CloseRequested = event
            && !status.is_consumed()
        {
            tracing::info!("Close requested for window {:?}", window_id);
            self.exit_with(event_loop);
        }
    }
}

/// Run the application built by `factory` until it exits.
///
/// The factory runs once the event loop is live, so it may create windows.
pub fn run_app(settings: LoopSettings, factory: AppFactory) -> Result<(), RunError> {
    use winit::event_loop::EventLoop;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app_proxy = AppProxy {
        factory: Some(factory),
        app: None,
        settings,
        schedule: None,
        time_tracker: TimeTracker::new(),
        error: None,
    };
    event_loop.run_app(&mut app_proxy)?;

    match app_proxy.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
