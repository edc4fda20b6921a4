//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::{Error, Result};
use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token shared by the loop and the driver.
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side effect returned by [`Model::update`].
pub enum Effect {
    /// A one-shot command; its message, if any, is fed back to the model
    /// before the next draw.
    Cmd(Box<dyn FnOnce() -> Option<Msg> + Send>),
    /// Several effects, run in order.
    Batch(Vec<Effect>),
    /// Stop the application loop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cmd(_) => f.write_str("Effect::Cmd(..)"),
            Self::Batch(v) => f.debug_tuple("Effect::Batch").field(&v.len()).finish(),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

/// Convenience constructor for an [`Effect::Cmd`].
pub fn cmd<F>(f: F) -> Effect
where
    F: FnOnce() -> Option<Msg> + Send + 'static,
{
    Effect::Cmd(Box::new(f))
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

/// Back-end driver (terminal, test harness, ...).
pub trait Driver {
    fn init(&mut self) -> Result<()>;

    /// Forward pending input to `tx`. Should return promptly so the loop
    /// can redraw; must stop early once `ctx.is_done()`.
    fn poll_msgs(&mut self, ctx: &Context, tx: &Sender<Msg>) -> Result<()>;

    fn flush(&mut self, frame: Frame) -> Result<()>;

    /// Restore the terminal. Called on every exit path of [`App::run`].
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    /// Initial grid size, used until the driver reports the real one.
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    prev: Grid,
    curr: Grid,
    resized: bool,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            prev: Grid::new(config.width, config.height),
            curr: Grid::new(config.width, config.height),
            resized: true,
        }
    }

    /// Access the model, e.g. to inspect state after the loop ended.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the model-update-view loop until the model returns
    /// [`Effect::End`] or a [`Msg::Quit`] is processed.
    ///
    /// The driver is closed on every exit path, including errors.
    pub fn run(&mut self) -> Result<()> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).map_err(|_| Error::Disconnected)?;

        loop {
            self.process_pending(&rx, &tx, &ctx)?;
            if ctx.is_done() {
                return Ok(());
            }
            self.driver.poll_msgs(&ctx, &tx)?;
        }
    }

    /// Drain queued messages, update the model, then draw and flush once.
    fn process_pending(&mut self, rx: &Receiver<Msg>, tx: &Sender<Msg>, ctx: &Context) -> Result<()> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            let quit = matches!(msg, Msg::Quit);
            if let Msg::Screen { width, height, .. } = msg {
                self.resize(width, height);
            }
            if let Some(effect) = self.model.update(msg) {
                self.handle_effect(effect, tx, ctx)?;
            }
            if quit {
                ctx.cancel();
            }
            if ctx.is_done() {
                return Ok(());
            }
            needs_draw = true;
        }

        if needs_draw {
            self.curr.fill(Default::default());
            self.model.draw(&mut self.curr);
            let frame = if self.resized {
                self.resized = false;
                Frame::full(&self.curr)
            } else {
                compute_frame(&self.prev, &self.curr)
            };
            if frame.clear || !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            self.prev.copy_from(&self.curr);
        }

        Ok(())
    }

    fn resize(&mut self, width: i32, height: i32) {
        if width == self.curr.width() && height == self.curr.height() {
            return;
        }
        log::debug!("screen resized to {width}x{height}");
        self.prev = Grid::new(width, height);
        self.curr = Grid::new(width, height);
        self.resized = true;
    }

    fn handle_effect(&mut self, effect: Effect, tx: &Sender<Msg>, ctx: &Context) -> Result<()> {
        match effect {
            Effect::End => ctx.cancel(),
            Effect::Cmd(f) => {
                if let Some(msg) = f() {
                    tx.send(msg).map_err(|_| Error::Disconnected)?;
                }
            }
            Effect::Batch(effects) => {
                for e in effects {
                    self.handle_effect(e, tx, ctx)?;
                    if ctx.is_done() {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::geom::Point;
    use crate::messages::Key;
    use crate::style::Style;

    /// Replays a fixed script of messages, then asks to quit.
    struct ScriptDriver {
        script: VecDeque<Msg>,
        frames: Vec<Frame>,
        closed: bool,
    }

    impl ScriptDriver {
        fn new(script: Vec<Msg>) -> Self {
            Self {
                script: script.into(),
                frames: Vec::new(),
                closed: false,
            }
        }
    }

    impl Driver for &mut ScriptDriver {
        fn init(&mut self) -> Result<()> {
            Ok(())
        }

        fn poll_msgs(&mut self, _ctx: &Context, tx: &Sender<Msg>) -> Result<()> {
            let msg = self.script.pop_front().unwrap_or(Msg::Quit);
            tx.send(msg).map_err(|_| Error::Disconnected)
        }

        fn flush(&mut self, frame: Frame) -> Result<()> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[derive(Debug, PartialEq)]
    struct Echo(char);

    #[derive(Default)]
    struct Typist {
        text: String,
    }

    impl Model for Typist {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::KeyDown { key: Key::Escape, .. } => Some(Effect::End),
                Msg::KeyDown { key: Key::Char(c), .. } => Some(cmd(move || Some(Msg::custom(Echo(c))))),
                msg => {
                    if let Some(Echo(c)) = msg.downcast_ref::<Echo>() {
                        self.text.push(*c);
                    }
                    None
                }
            }
        }

        fn draw(&self, grid: &mut Grid) {
            grid.print(Point::ZERO, &self.text, Style::default());
        }
    }

    #[test]
    fn commands_feed_messages_back_before_drawing() {
        let mut driver = ScriptDriver::new(vec![Msg::key(Key::Char('h')), Msg::key(Key::Char('i'))]);
        let mut app = App::new(AppConfig {
            model: Typist::default(),
            driver: &mut driver,
            width: 4,
            height: 1,
        });
        app.run().unwrap();
        assert_eq!(app.model().text, "hi");
        drop(app);
        assert!(driver.closed);
        // Init paints everything; each key then repaints exactly one cell.
        assert!(driver.frames[0].clear);
        assert_eq!(driver.frames[1].cells.len(), 1);
    }

    #[test]
    fn end_effect_stops_the_loop() {
        let mut driver = ScriptDriver::new(vec![Msg::key(Key::Escape), Msg::key(Key::Char('x'))]);
        let mut app = App::new(AppConfig {
            model: Typist::default(),
            driver: &mut driver,
            width: 4,
            height: 1,
        });
        app.run().unwrap();
        assert_eq!(app.model().text, "");
    }

    #[test]
    fn resize_triggers_a_full_repaint() {
        let mut driver = ScriptDriver::new(vec![Msg::screen(6, 2)]);
        let mut app = App::new(AppConfig {
            model: Typist::default(),
            driver: &mut driver,
            width: 4,
            height: 1,
        });
        app.run().unwrap();
        drop(app);
        let last = driver.frames.last().unwrap();
        assert!(last.clear);
        assert_eq!((last.width, last.height), (6, 2));
        assert_eq!(last.cells.len(), 12);
    }
}
