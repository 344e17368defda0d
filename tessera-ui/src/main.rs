//! Tessera Dashboard
//!
//! Client dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Overview of the published monthly data (records, source, age)
//! - Line, bar, area and pie charts over the loaded rows
//! - Setup guide and example chart gallery until data is configured
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It reads `/data/monthly_data.json` from the same origin it is
//! served from; charts are rendered to SVG by the `tessera` crate.

use leptos::*;

mod app;
mod components;
mod fetch;
mod pages;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
