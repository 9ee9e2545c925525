//! State/city picker modal.

use crate::state::WidgetState;
use crate::widgets::Widgets;
use dioxus::prelude::*;
use storefront_core::location::Dropdown;
use storefront_core::messages;

#[derive(Props, Clone, PartialEq)]
struct RegionSelectProps {
    id: &'static str,
    label: &'static str,
    dropdown: Dropdown,
    selected: Option<String>,
    on_change: EventHandler<String>,
}

/// `<select>` with a leading empty option carrying the dropdown caption.
#[component]
fn RegionSelect(props: RegionSelectProps) -> Element {
    let selected = props.selected.unwrap_or_default();
    let caption = props.dropdown.caption().to_string();
    let options = props.dropdown.options().to_vec();
    let on_change = props.on_change;

    rsx! {
        label {
            r#for: props.id,
            style: "display: block; font-weight: bold; margin: 8px 0 4px;",
            {props.label}
        }
        select {
            id: props.id,
            style: "width: 100%; padding: 6px;",
            disabled: !props.dropdown.is_enabled(),
            onchange: move |evt: Event<FormData>| on_change.call(evt.value()),
            option { value: "", selected: selected.is_empty(), "{caption}" }
            for region in options {
                option {
                    key: "{region.id}",
                    value: "{region.id}",
                    selected: region.id == selected,
                    "{region.name}"
                }
            }
        }
    }
}

/// Modal with the two dropdowns and the save button. Clicking the backdrop
/// closes it; clicks inside the dialog do not reach the backdrop.
#[component]
pub fn LocationModal() -> Element {
    let state = use_context::<WidgetState>();
    let widgets = use_context::<Widgets>();

    if !(state.modal_open)() {
        return rsx! {};
    }

    let states = state.states.read().clone();
    let cities = state.cities.read().clone();
    let selection = state.selection.read().clone();
    let save_enabled = (state.save_enabled)();
    let saving = (state.saving)();
    let resolved = state.resolved_address.read().clone();

    let picker = widgets.picker.clone();
    let on_backdrop = move |_| picker.close();
    let picker = widgets.picker.clone();
    let on_close = move |_| picker.close();

    let picker = widgets.picker.clone();
    let on_state = move |state_id: String| {
        let picker = picker.clone();
        spawn(async move {
            picker.on_state_change(&state_id).await;
        });
    };
    let picker = widgets.picker.clone();
    let on_city = move |city_id: String| picker.on_city_change(&city_id);

    let picker = widgets.picker.clone();
    let on_save = move |_| {
        if !picker.check_online() {
            return;
        }
        let picker = picker.clone();
        spawn(async move {
            picker.save().await;
        });
    };

    rsx! {
        div {
            id: "location-modal",
            style: "position: fixed; inset: 0; z-index: 900; display: flex; align-items: center; justify-content: center; background: rgba(0,0,0,0.5);",
            onclick: on_backdrop,
            div {
                style: "direction: rtl; width: 360px; padding: 16px; background: white; border-radius: 8px;",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    style: "display: flex; justify-content: space-between; align-items: center;",
                    h3 { style: "margin: 0;", {messages::LOCATION_MODAL_TITLE} }
                    button { onclick: on_close, "×" }
                }
                RegionSelect {
                    id: "state-select",
                    label: messages::LOCATION_STATE_LABEL,
                    dropdown: states,
                    selected: selection.state_id().map(str::to_string),
                    on_change: on_state,
                }
                RegionSelect {
                    id: "city-select",
                    label: messages::LOCATION_CITY_LABEL,
                    dropdown: cities,
                    selected: selection.city_id().map(str::to_string),
                    on_change: on_city,
                }
                if let Some(address) = resolved {
                    p {
                        id: "resolved-address",
                        style: "margin: 12px 0 0; color: #2E7D32;",
                        "📍 {address}"
                    }
                }
                button {
                    id: "save-location",
                    style: "margin-top: 12px; width: 100%; padding: 8px;",
                    disabled: !save_enabled || saving,
                    onclick: on_save,
                    if saving {
                        {messages::LOCATION_SAVING}
                    } else {
                        {messages::LOCATION_SAVE_LABEL}
                    }
                }
            }
        }
    }
}
