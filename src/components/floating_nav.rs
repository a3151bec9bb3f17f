use gloo_events::EventListener;
use yew::prelude::*;

use crate::config::NAV_OFFSET;
use crate::scroll::engine::ScrollOptions;
use crate::scroll::provider::use_smooth_scroll;

pub const SECTIONS: [(&str, &str); 4] = [
    ("Services", "#services"),
    ("Reviews", "#reviews"),
    ("FAQ", "#faq"),
    ("Book Now", "#book"),
];

/// Fraction of the viewport height a section top must pass to become active.
const ACTIVE_LINE: f64 = 0.45;

/// Index of the last section whose top has crossed the activation line.
/// `tops` are viewport-relative, `None` for sections missing from the page.
pub fn active_section(tops: &[Option<f64>], viewport_height: f64) -> usize {
    let line = viewport_height * ACTIVE_LINE;
    tops.iter()
        .enumerate()
        .filter(|(_, top)| top.map_or(false, |top| top <= line))
        .map(|(index, _)| index)
        .last()
        .unwrap_or(0)
}

#[function_component(FloatingNav)]
pub fn floating_nav() -> Html {
    let scroll = use_smooth_scroll();
    let active = use_state_eq(|| 0usize);

    {
        let active = active.clone();
        use_effect_with_deps(
            move |_| {
                let listener = web_sys::window().map(|window| {
                    let target = window.clone();
                    EventListener::new(&target, "scroll", move |_| {
                        let Some(document) = window.document() else {
                            return;
                        };
                        let height = window
                            .inner_height()
                            .ok()
                            .and_then(|height| height.as_f64())
                            .unwrap_or(0.0);
                        let tops: Vec<Option<f64>> = SECTIONS
                            .iter()
                            .map(|(_, href)| {
                                document
                                    .query_selector(href)
                                    .ok()
                                    .flatten()
                                    .map(|section| section.get_bounding_client_rect().top())
                            })
                            .collect();
                        active.set(active_section(&tops, height));
                    })
                });
                move || drop(listener)
            },
            (),
        );
    }

    let pills = SECTIONS
        .iter()
        .enumerate()
        .map(|(index, (label, href))| {
            let onclick = {
                let scroll = scroll.clone();
                let href = *href;
                Callback::from(move |e: MouseEvent| {
                    e.prevent_default();
                    scroll.scroll_to(href, ScrollOptions::with_offset(NAV_OFFSET));
                })
            };
            html! {
                <button
                    type="button"
                    key={*href}
                    class={classes!("nav-pill", (*active == index).then(|| "active"))}
                    {onclick}
                >
                    {*label}
                </button>
            }
        })
        .collect::<Html>();

    html! {
        <nav class="floating-nav">
            <div class="floating-nav-pills">
                { pills }
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_first_section() {
        let tops = [Some(900.0), Some(1800.0), Some(2600.0), Some(3200.0)];
        assert_eq!(active_section(&tops, 800.0), 0);
    }

    #[test]
    fn last_section_past_the_line_wins() {
        let tops = [Some(-1700.0), Some(-800.0), Some(300.0), Some(900.0)];
        assert_eq!(active_section(&tops, 800.0), 2);
    }

    #[test]
    fn missing_sections_are_skipped() {
        let tops = [Some(-900.0), None, None, Some(500.0)];
        assert_eq!(active_section(&tops, 800.0), 0);
        assert_eq!(active_section(&tops, 1200.0), 3);
    }
}
