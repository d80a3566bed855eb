use std::cell::RefCell;
use std::rc::Rc;

use obby_core::events::DeathCause;
use obby_sim::driver::{FrameCallback, FrameScheduler};
use obby_sim::{ObbyGame, SessionCallbacks};

use crate::host::Host;

#[cfg(target_family = "wasm")]
use wasm_bindgen::JsCast;

/// Schedules frames with `window.requestAnimationFrame`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RafScheduler;

impl FrameScheduler for RafScheduler {
    #[cfg(target_family = "wasm")]
    fn request_frame(&self, callback: FrameCallback) {
        use wasm_bindgen::closure::Closure;

        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| callback(time));
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            crate::diag::console_warn!("requestAnimationFrame failed: {e:?}");
        }
        closure.forget();
    }

    #[cfg(not(target_family = "wasm"))]
    fn request_frame(&self, _callback: FrameCallback) {}
}

/// Forwards death and win transitions to the page.
#[derive(Debug, Default)]
pub struct UiCallbacks;

impl SessionCallbacks for UiCallbacks {
    fn on_death(&mut self, cause: DeathCause) {
        let payload = serde_json::json!({ "cause": cause }).to_string();
        call_window_fn("_obbyDeath", Some(&payload));
    }

    fn on_win(&mut self) {
        call_window_fn("_obbyWin", None);
    }
}

/// Push generator/slot state to JavaScript after it changes.
pub fn push_ui_state(host: &Host) {
    let stats = host.slot().level().stats();
    let state = serde_json::json!({
        "generation": host.slot().generation(),
        "blocks": stats.block_count,
        "length": stats.length,
        "backgroundColor": host.slot().level().background_color,
        "generating": host.is_generating(),
        "error": host.last_error(),
    });
    match serde_json::to_string(&state) {
        Ok(json_str) => call_window_fn("_obbyUpdate", Some(&json_str)),
        Err(e) => crate::diag::console_warn!("Failed to serialize UI state: {e}"),
    }
}

/// Read a string global set by the page before the module starts.
pub fn window_string(name: &str) -> Option<String> {
    #[cfg(target_family = "wasm")]
    {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str(name))
            .ok()?
            .as_string()
    }
    #[cfg(not(target_family = "wasm"))]
    {
        let _ = name;
        None
    }
}

/// Call a function on the window object without eval().
/// If `json_arg` is Some, the JSON string is parsed to a JS object and passed as the argument.
fn call_window_fn(name: &str, json_arg: Option<&str>) {
    #[cfg(target_family = "wasm")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(val) = js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str(name))
        else {
            return;
        };
        if !val.is_function() {
            return;
        }
        let func: js_sys::Function = val.unchecked_into();
        let result = if let Some(json_str) = json_arg {
            match js_sys::JSON::parse(json_str) {
                Ok(parsed) => func.call1(&wasm_bindgen::JsValue::NULL, &parsed),
                Err(e) => {
                    crate::diag::console_warn!("JSON parse failed for {name}: {e:?}");
                    return;
                },
            }
        } else {
            func.call0(&wasm_bindgen::JsValue::NULL)
        };
        if let Err(e) = result {
            crate::diag::console_warn!("JS bridge {name} failed: {e:?}");
        }
    }
    #[cfg(not(target_family = "wasm"))]
    let _ = (name, json_arg);
}

/// Attach keyboard listeners to the document and release held keys on blur.
#[cfg(target_family = "wasm")]
pub fn attach_input_listeners(game: &Rc<RefCell<ObbyGame>>) {
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    // keydown
    {
        let game = Rc::clone(game);
        let closure = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |evt: web_sys::KeyboardEvent| {
                let code = evt.code();
                // Keep the page from scrolling
                if matches!(
                    code.as_str(),
                    "Space" | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
                ) {
                    evt.prevent_default();
                }
                game.borrow_mut().key_down(&code);
            },
        );
        let _ =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // keyup
    {
        let game = Rc::clone(game);
        let closure = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |evt: web_sys::KeyboardEvent| {
                game.borrow_mut().key_up(&evt.code());
            },
        );
        let _ =
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // blur: keyup never arrives for keys held while focus leaves
    {
        let game = Rc::clone(game);
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            game.borrow_mut().release_all_keys();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(not(target_family = "wasm"))]
pub fn attach_input_listeners(_game: &Rc<RefCell<ObbyGame>>) {}

/// Attach JS->Rust bridge callbacks via global functions on window.
#[cfg(target_family = "wasm")]
pub fn attach_ui_callbacks(host: &Rc<RefCell<Host>>) {
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };

    // _obbyGenerate(theme, difficulty)
    {
        let host = Rc::clone(host);
        let closure =
            Closure::<dyn FnMut(String, String)>::new(move |theme: String, difficulty: String| {
                let host = Rc::clone(&host);
                wasm_bindgen_futures::spawn_local(async move {
                    crate::host::generate_level(&host, &theme, &difficulty).await;
                });
            });
        let _ = js_sys::Reflect::set(
            &window,
            &"_obbyGenerate".into(),
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }

    // _obbyLoadLevel(json)
    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(String)>::new(move |json: String| {
            let host = Rc::clone(&host);
            // Deferred so a call made from inside a frame callback never re-borrows the game
            wasm_bindgen_futures::spawn_local(async move {
                crate::host::load_level_json(&host, &json);
            });
        });
        let _ = js_sys::Reflect::set(
            &window,
            &"_obbyLoadLevel".into(),
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }

    // _obbyRestart()
    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut()>::new(move || {
            let host = Rc::clone(&host);
            wasm_bindgen_futures::spawn_local(async move {
                host.borrow().game().borrow_mut().restart();
            });
        });
        let _ = js_sys::Reflect::set(
            &window,
            &"_obbyRestart".into(),
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }

    // _obbyReset()
    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut()>::new(move || {
            let host = Rc::clone(&host);
            wasm_bindgen_futures::spawn_local(async move {
                let host = host.borrow();
                host.reset();
                push_ui_state(&host);
            });
        });
        let _ = js_sys::Reflect::set(
            &window,
            &"_obbyReset".into(),
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }
}

#[cfg(not(target_family = "wasm"))]
pub fn attach_ui_callbacks(_host: &Rc<RefCell<Host>>) {}
