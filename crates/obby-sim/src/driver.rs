use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use obby_core::level::LevelDescription;

use crate::game::ObbyGame;

/// Nominal display refresh interval.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Callback run once on the next display refresh with a millisecond timestamp.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Source of display refreshes. The browser host wraps `requestAnimationFrame`;
/// headless hosts use [`ManualScheduler`].
pub trait FrameScheduler: Clone + 'static {
    fn request_frame(&self, callback: FrameCallback);
}

/// Owned handle for a self-rescheduling per-frame callback.
///
/// Each run asks the scheduler for the next one. Once cancelled (or dropped) no further
/// tick runs, even for callbacks the scheduler has already queued.
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    alive: Option<Rc<Cell<bool>>>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            alive: None,
        }
    }

    /// Start ticking, replacing any loop already running.
    pub fn start(&mut self, tick: impl FnMut(f64) + 'static) {
        self.cancel();
        let alive = Rc::new(Cell::new(true));
        self.alive = Some(Rc::clone(&alive));
        schedule(self.scheduler.clone(), alive, Rc::new(RefCell::new(tick)));
    }

    pub fn cancel(&mut self) {
        if let Some(alive) = self.alive.take() {
            alive.set(false);
        }
    }

    pub fn is_running(&self) -> bool {
        self.alive.as_ref().is_some_and(|alive| alive.get())
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn schedule<S: FrameScheduler>(
    scheduler: S,
    alive: Rc<Cell<bool>>,
    tick: Rc<RefCell<dyn FnMut(f64)>>,
) {
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move |timestamp| {
        if !alive.get() {
            return;
        }
        (&mut *tick.borrow_mut())(timestamp);
        if alive.get() {
            schedule(next, alive, tick);
        }
    }));
}

/// Draws the game after each simulated frame.
pub type RenderFn = Box<dyn FnMut(&ObbyGame, f64)>;

/// Runs simulate-then-render once per display refresh for a shared game.
pub struct FrameDriver<S: FrameScheduler> {
    game: Rc<RefCell<ObbyGame>>,
    render: Rc<RefCell<RenderFn>>,
    frames: FrameLoop<S>,
}

impl<S: FrameScheduler> FrameDriver<S> {
    pub fn new(
        game: Rc<RefCell<ObbyGame>>,
        scheduler: S,
        render: impl FnMut(&ObbyGame, f64) + 'static,
    ) -> Self {
        Self {
            game,
            render: Rc::new(RefCell::new(Box::new(render))),
            frames: FrameLoop::new(scheduler),
        }
    }

    pub fn game(&self) -> &Rc<RefCell<ObbyGame>> {
        &self.game
    }

    pub fn start(&mut self) {
        let game = Rc::clone(&self.game);
        let render = Rc::clone(&self.render);
        self.frames.start(move |timestamp| {
            let mut game = game.borrow_mut();
            game.frame();
            (&mut *render.borrow_mut())(&*game, timestamp);
        });
    }

    pub fn stop(&mut self) {
        self.frames.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.frames.is_running()
    }

    /// Stop the loop, load `level` from a clean state and start again.
    pub fn replace_level(&mut self, level: LevelDescription) {
        self.stop();
        self.game.borrow_mut().load_level(level);
        self.start();
    }
}

/// Scheduler that only advances when pumped. Each pump runs everything queued so far
/// at a timestamp one [`FRAME_MS`] later than the previous pump.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<VecDeque<FrameCallback>>>,
    now: Rc<Cell<f64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the callbacks queued before this call. Returns how many ran.
    pub fn pump(&self) -> usize {
        let due: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        let timestamp = self.now.get() + FRAME_MS;
        self.now.set(timestamp);
        let count = due.len();
        for callback in due {
            callback(timestamp);
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn now(&self) -> f64 {
        self.now.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) {
        self.queue.borrow_mut().push_back(callback);
    }
}
