use yew::prelude::*;

use crate::config::{NAV_OFFSET, PHONE_HREF};
use crate::scroll::engine::ScrollOptions;
use crate::scroll::provider::use_smooth_scroll;

#[function_component(MobileCta)]
pub fn mobile_cta() -> Html {
    let scroll = use_smooth_scroll();

    let book = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        scroll.scroll_to("#book", ScrollOptions::with_offset(NAV_OFFSET));
    });

    html! {
        <div class="mobile-cta">
            <a href={PHONE_HREF} class="mobile-cta-link">{"Call"}</a>
            <button type="button" class="mobile-cta-book" onclick={book}>
                {"Book Now"}
            </button>
            <a href="https://maps.google.com" target="_blank" rel="noopener noreferrer" class="mobile-cta-link">
                {"Directions"}
            </a>
        </div>
    }
}
