use log::{error, info};
use yew::prelude::*;

use super::coordinator::{require_provider, ScrollCoordinator, ScrollHandle};
use super::dom::BrowserPlatform;
use super::error::ScrollError;
use crate::config::{self, ScrollConfig};

#[derive(Properties, PartialEq)]
pub struct SmoothScrollProps {
    pub children: Children,
    /// Overrides the config read from index.html.
    #[prop_or_default]
    pub config: Option<ScrollConfig>,
}

#[function_component(SmoothScroll)]
pub fn smooth_scroll(props: &SmoothScrollProps) -> Html {
    let coordinator = use_memo(|_| ScrollCoordinator::new(), ());
    let handle = coordinator.handle();

    {
        let coordinator = coordinator.clone();
        let overrides = props.config.clone();
        use_effect_with_deps(
            move |_| {
                let config = overrides.unwrap_or_else(config::scroll_config);
                match BrowserPlatform::new().and_then(|platform| coordinator.mount(platform, config)) {
                    Ok(_) => info!("Smooth scrolling mounted"),
                    Err(e) => error!("Smooth scrolling disabled: {}", e),
                }
                move || coordinator.unmount()
            },
            (),
        );
    }

    html! {
        <ContextProvider<ScrollHandle> context={handle}>
            { for props.children.iter() }
        </ContextProvider<ScrollHandle>>
    }
}

#[hook]
pub fn use_try_smooth_scroll() -> Result<ScrollHandle, ScrollError> {
    require_provider(use_context::<ScrollHandle>())
}

/// The scroll capability of the enclosing `<SmoothScroll>`. Panics when there
/// is none, since that is a wiring mistake rather than a runtime condition.
#[hook]
pub fn use_smooth_scroll() -> ScrollHandle {
    match use_try_smooth_scroll() {
        Ok(handle) => handle,
        Err(e) => panic!("{}", e),
    }
}
