mod app;
mod chat_panel;
mod components;

pub mod chat_log;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod model;
pub mod session;
pub mod types;
pub mod upload;

use app::App;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
