use yew::prelude::*;

use crate::config::NAV_OFFSET;
use crate::scroll::engine::ScrollOptions;
use crate::scroll::provider::use_smooth_scroll;

#[derive(Properties, PartialEq)]
struct SectionProps {
    id: AttrValue,
    title: AttrValue,
    children: Children,
}

#[function_component(Section)]
fn section(props: &SectionProps) -> Html {
    html! {
        <section id={props.id.clone()} class="landing-section">
            <h2>{props.title.to_string()}</h2>
            { for props.children.iter() }
        </section>
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let scroll = use_smooth_scroll();

    let book = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        scroll.scroll_to("#book", ScrollOptions::with_offset(NAV_OFFSET));
    });

    html! {
        <main class="landing-page">
            <header class="hero">
                <div class="hero-backdrop"></div>
                <div class="hero-content">
                    <p class="hero-eyebrow">{"Pro Auto Services"}</p>
                    <h1>{"Dealer precision. Local heart."}</h1>
                    <button type="button" class="hero-cta" onclick={book}>
                        {"Book Appointment"}
                    </button>
                </div>
            </header>

            <Section id="services" title="Services">
                <p>{"Tires, mechanics and roadside response."}</p>
            </Section>
            <Section id="reviews" title="Reviews">
                <p>{"What drivers say about us."}</p>
            </Section>
            <Section id="faq" title="FAQ">
                <p>{"Answers before you book."}</p>
            </Section>
            <Section id="book" title="Book Now">
                <p>{"Pick a service and a time that works for you."}</p>
            </Section>

            <footer class="landing-footer">
                <span>{"Pro Auto Services"}</span>
                <span>{"Dealer precision. Local heart."}</span>
            </footer>

            <style>
                {r#"
                .landing-page {
                    min-height: 100vh;
                    background: #0f172a;
                    color: #e2e8f0;
                }

                .hero {
                    position: relative;
                    height: 100vh;
                    display: flex;
                    align-items: flex-end;
                    overflow: hidden;
                }

                .hero-backdrop {
                    position: absolute;
                    inset: 0;
                    background: linear-gradient(to top, rgba(2, 6, 23, 0.95), rgba(15, 23, 42, 0.1));
                }

                .hero-content {
                    position: relative;
                    padding: 0 2rem 7rem;
                    max-width: 48rem;
                }

                .hero-cta, .mobile-cta-book {
                    border: none;
                    border-radius: 9999px;
                    background: #dc2626;
                    color: #fff;
                    padding: 0.75rem 1.5rem;
                    text-transform: uppercase;
                    letter-spacing: 0.18em;
                    cursor: pointer;
                }

                .landing-section {
                    min-height: 80vh;
                    padding: 6rem 2rem;
                    max-width: 80rem;
                    margin: 0 auto;
                }

                .landing-footer {
                    display: flex;
                    justify-content: space-between;
                    padding: 2.5rem 2rem 6rem;
                    border-top: 1px solid rgba(226, 232, 240, 0.1);
                }

                .floating-nav {
                    position: fixed;
                    bottom: 1.5rem;
                    left: 50%;
                    transform: translateX(-50%);
                    z-index: 50;
                }

                .floating-nav-pills {
                    display: grid;
                    grid-template-columns: repeat(4, 1fr);
                    gap: 0.25rem;
                    padding: 0.75rem;
                    border-radius: 9999px;
                    background: rgba(15, 23, 42, 0.8);
                    backdrop-filter: blur(10px);
                }

                .nav-pill {
                    border: none;
                    border-radius: 9999px;
                    background: transparent;
                    color: rgba(226, 232, 240, 0.7);
                    padding: 0.5rem 1rem;
                    text-transform: uppercase;
                    cursor: pointer;
                }

                .nav-pill.active {
                    color: #f1f5f9;
                    background: rgba(220, 38, 38, 0.25);
                }

                .mobile-cta {
                    display: none;
                }

                @media (max-width: 768px) {
                    .floating-nav {
                        display: none;
                    }

                    .mobile-cta {
                        position: fixed;
                        bottom: 0;
                        left: 0;
                        right: 0;
                        z-index: 50;
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        gap: 0.5rem;
                        padding: 0.75rem 1rem;
                        background: rgba(15, 23, 42, 0.9);
                    }

                    .mobile-cta-link {
                        flex: 1;
                        text-align: center;
                        color: rgba(226, 232, 240, 0.8);
                    }
                }
                "#}
            </style>
        </main>
    }
}
