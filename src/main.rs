//! Runaway No entry point
//!
//! Wires the DOM events to the session on the web; runs a headless demo
//! natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, KeyboardEvent, MouseEvent, TouchEvent};

    use runaway_no::platform::dom::ids;
    use runaway_no::platform::{
        PageView, RafScheduler, current_viewport, first_touch_point, mouse_point,
    };
    use runaway_no::renderer::CanvasSurface;
    use runaway_no::{Session, Viewport};

    /// Page instance holding all state
    struct Page {
        session: Session,
        view: PageView,
        surface: CanvasSurface,
        scheduler: RafScheduler,
        viewport: Viewport,
    }

    impl Page {
        /// Re-measure the viewport; re-center the No button while still asking
        fn resize(&mut self, viewport: Viewport) {
            self.viewport = viewport;
            self.surface.resize(viewport);
            if let Some(pos) = self.session.place_initial(&self.view.layout()) {
                self.view.place_no(pos);
            }
        }

        fn pointer_moved(&mut self, pointer: glam::Vec2) {
            let layout = self.view.layout();
            if let Some(dodge) = self.session.on_pointer_move(&layout, pointer) {
                self.view.apply_dodge(&dodge);
            }
        }

        fn no_clicked(&mut self, pointer: glam::Vec2) {
            let layout = self.view.layout();
            if let Some(dodge) = self.session.on_no_click(&layout, pointer) {
                self.view.apply_dodge(&dodge);
            }
        }

        fn yes_clicked(&mut self) {
            let Page {
                session,
                view,
                surface,
                scheduler,
                viewport,
            } = self;
            view.show_result();
            session.on_yes_click(viewport, surface, scheduler);
        }

        fn frame(&mut self) {
            let Page {
                session,
                surface,
                scheduler,
                viewport,
                ..
            } = self;
            session.frame(viewport, surface, scheduler);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let viewport = current_viewport(&window);
        let view = PageView::from_document(&document)?;
        let surface = CanvasSurface::from_document(&document, ids::CONFETTI, viewport)?;

        let seed = js_sys::Date::now() as u64;
        let page = Rc::new(RefCell::new(Page {
            session: Session::new(seed),
            view,
            surface,
            scheduler: RafScheduler::new(window.clone()),
            viewport,
        }));
        log::info!("Session started with seed: {}", seed);

        // Frame callback: re-enters the page on every display refresh
        {
            let page_for_frame = page.clone();
            page.borrow()
                .scheduler
                .set_callback(move |_time: f64| page_for_frame.borrow_mut().frame());
        }

        {
            let mut p = page.borrow_mut();
            let layout = p.view.layout();
            if let Some(pos) = p.session.place_initial(&layout) {
                p.view.place_no(pos);
            }
        }

        setup_pointer_handlers(page.clone())?;
        setup_button_handlers(page.clone())?;
        setup_window_handlers(page)?;

        log::info!("Runaway No ready");
        Ok(())
    }

    fn setup_pointer_handlers(page: Rc<RefCell<Page>>) -> Result<(), JsValue> {
        let area = page.borrow().view.play_area().clone();

        // Desktop: dodge the cursor as it approaches
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                page.borrow_mut().pointer_moved(mouse_point(&event));
            });
            area.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mobile: dodge the finger
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(point) = first_touch_point(&event) {
                    page.borrow_mut().pointer_moved(point);
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            area.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_button_handlers(page: Rc<RefCell<Page>>) -> Result<(), JsValue> {
        let (no, yes) = {
            let p = page.borrow();
            (p.view.no_button().clone(), p.view.yes_button().clone())
        };

        // Also dodge if they somehow click it
        {
            let page = page.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                page.borrow_mut().no_clicked(mouse_point(&event));
            });
            no.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                page.borrow_mut().yes_clicked();
            });
            yes.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_window_handlers(page: Rc<RefCell<Page>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Resize: canvas backing store and initial No placement
        {
            let page = page.clone();
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let viewport = current_viewport(&window_clone);
                page.borrow_mut().resize(viewport);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard: "d" dumps the session
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "d" {
                    match page.borrow().session.snapshot_json() {
                        Ok(json) => log::info!("{}", json),
                        Err(e) => log::warn!("Session snapshot failed: {}", e),
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Runaway No starting...");

    if let Err(e) = wasm_page::run() {
        log::error!("Page setup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Runaway No (native) starting...");
    log::info!("The page needs a browser - run with `trunk serve`; running a headless demo");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Chase the No button for a while, click Yes, and let the confetti settle
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use glam::Vec2;
    use runaway_no::frame::ManualScheduler;
    use runaway_no::renderer::CountingSurface;
    use runaway_no::sim::Layout;
    use runaway_no::{Rect, Session, Viewport};

    let viewport = Viewport::new(1280.0, 720.0, 1.0);
    let layout = Layout {
        area: Rect::new(240.0, 160.0, 800.0, 600.0),
        button_size: Vec2::new(100.0, 40.0),
    };

    let mut session = Session::new(0x5eed);
    session.place_initial(&layout);

    for _ in 0..10 {
        let state = session.dodge_state();
        let target = layout.area.origin + state.position + layout.button_size * 0.5;
        // Approach from slightly off-center, like a real cursor
        if let Some(dodge) = session.on_pointer_move(&layout, target + Vec2::new(12.0, -6.0))
            && let Some(text) = dodge.prompt
        {
            log::info!("prompt: {}", text);
        }
    }
    log::info!(
        "{} dodges, yes scale {:.2}",
        session.dodge_state().dodges,
        session.dodge_state().yes_scale
    );

    let mut surface = CountingSurface::default();
    let mut scheduler = ManualScheduler::new();
    session.on_yes_click(&viewport, &mut surface, &mut scheduler);
    while scheduler.take_pending().is_some() {
        session.frame(&viewport, &mut surface, &mut scheduler);
    }

    log::info!(
        "confetti finished: {} frames, {} rects, {} circles, surface clear: {}",
        session.animation().frames(),
        surface.rects,
        surface.circles,
        surface.blank
    );
}
