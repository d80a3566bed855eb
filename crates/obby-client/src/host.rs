use std::cell::RefCell;
use std::rc::Rc;

use obby_core::level::{Difficulty, LevelDescription};
use obby_levelgen::{GenerateError, LevelGenerator, LevelSlot, ProceduralGenerator, validate_level};
use obby_sim::{FrameDriver, ObbyGame};

use crate::bridge::{RafScheduler, push_ui_state};

/// Browser-side state: the running frame driver plus the level slot feeding it.
pub struct Host {
    driver: FrameDriver<RafScheduler>,
    slot: LevelSlot,
    seed: u64,
    generating: bool,
    last_error: Option<String>,
}

impl Host {
    /// Wrap a driver already running `level`.
    pub fn new(driver: FrameDriver<RafScheduler>, level: LevelDescription, seed: u64) -> Self {
        Self {
            driver,
            slot: LevelSlot::new(level),
            seed,
            generating: false,
            last_error: None,
        }
    }

    pub fn game(&self) -> &Rc<RefCell<ObbyGame>> {
        self.driver.game()
    }

    pub fn slot(&self) -> &LevelSlot {
        &self.slot
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Mark a generation as in flight. Returns `None` while another one is running.
    pub fn begin_generation(&mut self) -> Option<ProceduralGenerator> {
        if self.generating {
            return None;
        }
        self.generating = true;
        self.last_error = None;
        Some(ProceduralGenerator::new(
            self.seed.wrapping_add(self.slot.generation()),
        ))
    }

    /// Settle an in-flight generation. Only a complete level reaches the game.
    pub fn finish_generation(&mut self, result: Result<LevelDescription, GenerateError>) {
        self.generating = false;
        match result {
            Ok(level) => self.install(level),
            Err(e) => {
                tracing::warn!(error = %e, "level generation failed");
                self.last_error = Some(e.to_string());
            },
        }
    }

    /// Start the running level over from its default spawn and clear the counters.
    pub fn reset(&self) {
        self.game().borrow_mut().reset();
    }

    fn install(&mut self, level: LevelDescription) {
        self.slot.accept(level.clone());
        self.driver.replace_level(level);
        self.last_error = None;
    }
}

/// Generate a level for `theme` and install it, reporting progress to the page.
pub async fn generate_level(host: &Rc<RefCell<Host>>, theme: &str, difficulty: &str) {
    let difficulty = difficulty.parse::<Difficulty>().unwrap_or_else(|e| {
        crate::diag::console_warn!("{e}, using {}", Difficulty::default());
        Difficulty::default()
    });

    let generator = {
        let mut host = host.borrow_mut();
        let Some(generator) = host.begin_generation() else {
            return;
        };
        push_ui_state(&host);
        generator
    };

    let result = generator.generate(theme, difficulty).await;

    let mut host = host.borrow_mut();
    host.finish_generation(result);
    push_ui_state(&host);
}

/// Install a level handed over by the page as JSON.
pub fn load_level_json(host: &Rc<RefCell<Host>>, json: &str) {
    let result = LevelDescription::from_json(json)
        .map_err(GenerateError::from)
        .and_then(validate_level);
    let mut host = host.borrow_mut();
    host.finish_generation(result);
    push_ui_state(&host);
}

/// Build the game, attach listeners and start the frame loop on `#game-canvas`.
#[cfg(target_family = "wasm")]
pub fn launch() -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};

    use obby_core::config::ObbyConfig;

    use crate::bridge::{UiCallbacks, attach_input_listeners, attach_ui_callbacks, window_string};
    use crate::canvas::CanvasPainter;
    use crate::renderer::Renderer;
    use crate::theme::Theme;

    const CANVAS_ID: &str = "game-canvas";

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("missing #game-canvas"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    let config = match window_string("_obbyConfig") {
        Some(toml) => ObbyConfig::from_toml(&toml).unwrap_or_else(|e| {
            crate::diag::console_warn!("Bad _obbyConfig: {e}, using defaults");
            ObbyConfig::default()
        }),
        None => ObbyConfig::default(),
    };
    let theme = window_string("_obbyTheme")
        .map(|json| Theme::from_json(&json))
        .unwrap_or_default();

    canvas.set_width(config.viewport.width as u32);
    canvas.set_height(config.viewport.height as u32);

    let painter = CanvasPainter::new(&canvas)?;
    let renderer = Renderer::new(theme, config.viewport.clone());
    let level = LevelDescription::default();
    let game = ObbyGame::new(config, level.clone()).with_callbacks(UiCallbacks);
    let game = Rc::new(RefCell::new(game));

    let mut driver = FrameDriver::new(Rc::clone(&game), RafScheduler, move |game, time_ms| {
        painter.paint(&renderer.render_game(game, time_ms));
    });
    driver.start();

    attach_input_listeners(&game);
    let host = Rc::new(RefCell::new(Host::new(driver, level, js_sys::Date::now() as u64)));
    attach_ui_callbacks(&host);
    push_ui_state(&host.borrow());
    tracing::info!("obby host started");
    Ok(())
}
