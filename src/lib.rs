pub mod batch;
pub mod branding;
pub mod configs;
pub mod error;
pub mod form;
pub mod invoker;
pub mod loader;
pub mod page;
pub mod record;
mod render;

pub use error::{AppErr, Result};
pub use render::{
    render, Mode, RenderFault, Request, Stage, ABOUT, MODE_PROMPT, SIDEBAR_HEADER, TITLE,
};
