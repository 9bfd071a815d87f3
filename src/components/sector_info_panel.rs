use yew::prelude::*;

use crate::model::Sector;

#[derive(Properties, PartialEq, Clone)]
pub struct SectorInfoPanelProps {
    pub sector: Option<Sector>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn SectorInfoPanel(props: &SectorInfoPanelProps) -> Html {
    let Some(sector) = &props.sector else {
        return html! {};
    };

    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let panel_style = "position:absolute; right:12px; top:50%; transform:translateY(-50%); \
        background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:8px; \
        padding:12px 16px; min-width:200px; max-width:260px; font-size:13px; color:#c9d1d9;";
    let header_style =
        "font-weight:600; font-size:15px; margin-bottom:8px; display:flex; align-items:center; gap:8px;";

    html! {
        <div style={panel_style}>
            <div style={header_style}>
                <span>{ sector.icon.clone() }</span>
                <span>{ sector.id.clone() }</span>
            </div>
            <button onclick={close}>{"Close"}</button>
        </div>
    }
}
