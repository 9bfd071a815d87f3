use yew::prelude::*;

use super::map_view::MapView;
use super::sector_info_panel::SectorInfoPanel;
use crate::model::SectorRegistry;
use crate::util::clog;

/// Element the hosting page fills with the sector registry JSON.
const SECTOR_DATA_ID: &str = "sector-data";
const MAP_IMAGE_SRC: &str = "assets/campus-map.png";

fn load_registry() -> SectorRegistry {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SECTOR_DATA_ID))
        .and_then(|el| el.text_content());
    let Some(raw) = raw else {
        clog("sector-data element missing, starting with an empty registry");
        return SectorRegistry::default();
    };
    match SectorRegistry::from_json(&raw) {
        Ok(reg) => {
            clog(&format!("loaded {} sectors", reg.len()));
            reg
        }
        Err(err) => {
            clog(&format!("sector-data parse failed: {err}"));
            SectorRegistry::default()
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let registry = use_state(load_registry);
    let selected = use_state(|| None::<String>);

    let on_sector_tap = {
        let selected = selected.clone();
        Callback::from(move |id: String| selected.set(Some(id)))
    };
    let on_close = {
        let selected = selected.clone();
        Callback::from(move |_| selected.set(None))
    };

    let sector = (*selected).as_ref().and_then(|id| registry.get(id)).cloned();

    html! {
        <div id="root">
            <MapView
                registry={(*registry).clone()}
                on_sector_tap={on_sector_tap}
                image_src={MAP_IMAGE_SRC}
            />
            <SectorInfoPanel sector={sector} on_close={on_close} />
        </div>
    }
}
