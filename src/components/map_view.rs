use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, TouchEvent};
use yew::prelude::*;

use crate::model::SectorRegistry;
use crate::render;
use crate::state::{TouchPoint, Viewport};
use crate::util::{clog, is_touch_device};

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub registry: SectorRegistry,
    /// Invoked with the sector id when a tap lands inside its polygon;
    /// nothing is emitted on a miss.
    pub on_sector_tap: Callback<String>,
    pub image_src: AttrValue,
}

fn touch_points(canvas: &HtmlCanvasElement, list: &web_sys::TouchList) -> Vec<TouchPoint> {
    let rect = canvas.get_bounding_client_rect();
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(t) = list.item(i) {
            out.push(TouchPoint {
                x: t.client_x() as f64 - rect.left(),
                y: t.client_y() as f64 - rect.top(),
            });
        }
    }
    out
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let img_ref = use_node_ref();
    let viewport = use_mut_ref(Viewport::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);

    // Mount effect: draw closure + event wiring
    {
        let canvas_ref = canvas_ref.clone();
        let img_ref = img_ref.clone();
        let viewport = viewport.clone();
        let draw_ref_setup = draw_ref.clone();
        let registry = props.registry.clone();
        let on_sector_tap = props.on_sector_tap.clone();
        use_effect_with((), move |_| {
            // Touch-only controller: without touch capability nothing is
            // attached and the canvas stays blank.
            if !is_touch_device() {
                clog("no touch capability, campus map viewer inert");
                return Box::new(|| ()) as Box<dyn FnOnce()>;
            }
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            let img: HtmlImageElement = img_ref.cast::<HtmlImageElement>().expect("img");

            // Full redraw under the current transform. Repeated calls with
            // an unchanged transform repaint the same pixels.
            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let img = img.clone();
                let viewport = viewport.clone();
                let registry = registry.clone();
                Rc::new(move || {
                    if !canvas.is_connected() || !img.complete() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => c.dyn_into::<CanvasRenderingContext2d>().unwrap(),
                        None => return,
                    };
                    let w = img.natural_width();
                    let h = img.natural_height();
                    canvas.set_width(w);
                    canvas.set_height(h);
                    let t = viewport.borrow().transform;
                    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
                    ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
                    // translate-then-scale as one matrix, so the scale is
                    // applied around the translated origin
                    ctx.set_transform(t.scale, 0.0, 0.0, t.scale, t.origin_x, t.origin_y)
                        .ok();
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &img, 0.0, 0.0, w as f64, h as f64,
                    )
                    .ok();
                    for sector in registry.iter() {
                        let pts = sector.points();
                        render::draw_polygon(
                            &ctx,
                            &pts,
                            render::SECTOR_STROKE,
                            render::SECTOR_LINE_WIDTH,
                        );
                        render::draw_sector_icon(&ctx, &sector.id, &pts, &sector.icon);
                    }
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());

            // First render once the image has its natural dimensions
            let load_cb = {
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            img.add_event_listener_with_callback("load", load_cb.as_ref().unchecked_ref())
                .ok();

            let touch_start_cb = {
                let canvas = canvas.clone();
                let viewport = viewport.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = touch_points(&canvas, &e.touches());
                    viewport.borrow_mut().on_touch_start(&touches);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_move_cb = {
                let canvas = canvas.clone();
                let viewport = viewport.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = touch_points(&canvas, &e.touches());
                    let handled = viewport.borrow_mut().on_touch_move(&touches);
                    if handled {
                        e.prevent_default();
                        if let Some(f) = &*draw_ref.borrow() {
                            f();
                        }
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_end_cb = {
                let canvas = canvas.clone();
                let viewport = viewport.clone();
                let registry = registry.clone();
                let on_sector_tap = on_sector_tap.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let remaining = e.touches().length() as usize;
                    let lifted = touch_points(&canvas, &e.changed_touches());
                    let tap = viewport.borrow_mut().on_touch_end(remaining, &lifted);
                    if let Some((ix, iy)) = tap {
                        if let Some(sector) = registry.hit_test(ix, iy) {
                            clog(&format!("tap resolved to sector {}", sector.id));
                            on_sector_tap.emit(sector.id.clone());
                        }
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();

            // A cancelled gesture ends without ever resolving a tap
            let touch_cancel_cb = {
                let viewport = viewport.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let remaining = e.touches().length() as usize;
                    viewport.borrow_mut().on_touch_end(remaining, &[]);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_cancel_cb.as_ref().unchecked_ref(),
                )
                .ok();

            // Window resize never resets pan/zoom, it only repaints
            let resize_cb = {
                let img = img.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    if img.complete() {
                        if let Some(f) = &*draw_ref.borrow() {
                            f();
                        }
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // The image may already be decoded (cache hit), in which case
            // no load event fires
            (draw_closure)();

            let window_clone = window.clone();
            Box::new(move || {
                let _ = img
                    .remove_event_listener_with_callback("load", load_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_cancel_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                let _keep_alive = (
                    &load_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                    &touch_cancel_cb,
                    &resize_cb,
                );
            }) as Box<dyn FnOnce()>
        });
    }

    html! {
        <div class="map-container" style="position:relative; width:100%; overflow:hidden;">
            <img
                ref={img_ref}
                id="campus-map-img"
                src={props.image_src.clone()}
                alt="Campus map"
                style="display:none;"
            />
            <canvas ref={canvas_ref} id="interactive-canvas" style="display:block; max-width:100%;" />
        </div>
    }
}
