use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod scroll {
    pub mod coordinator;
    pub mod dom;
    pub mod engine;
    pub mod error;
    pub mod provider;
    #[cfg(test)]
    pub mod testing;
}
mod components {
    pub mod floating_nav;
    pub mod mobile_cta;
}
mod pages {
    pub mod landing;
}

use components::{floating_nav::FloatingNav, mobile_cta::MobileCta};
use pages::landing::Landing;
use scroll::provider::SmoothScroll;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Landing page");
            html! { <Landing /> }
        }
        Route::NotFound => {
            info!("Unknown route, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <SmoothScroll>
                <FloatingNav />
                <MobileCta />
                <Switch<Route> render={switch} />
            </SmoothScroll>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
