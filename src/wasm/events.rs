use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, MouseEvent, WheelEvent};

use crate::crop::Viewport;
use crate::error::Result;
use crate::input::InputState;

/// Feeds document pointer-move and wheel events into `input`.
///
/// The listeners live for the rest of the page, so their closures are leaked.
pub fn listen(document: &Document, input: Rc<RefCell<InputState>>, viewport: Viewport) -> Result<()> {
    let pointer = {
        let input = input.clone();
        Closure::wrap(Box::new(move |evt: MouseEvent| {
            input.borrow_mut().pointer_moved(
                f64::from(evt.page_x()),
                f64::from(evt.page_y()),
                viewport,
            );
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    document.add_event_listener_with_callback("mousemove", pointer.as_ref().unchecked_ref())?;
    pointer.forget();

    let wheel = Closure::wrap(Box::new(move |evt: WheelEvent| {
        input.borrow_mut().wheel(evt.delta_x(), evt.delta_y());
    }) as Box<dyn FnMut(WheelEvent)>);
    document.add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())?;
    wheel.forget();

    Ok(())
}
