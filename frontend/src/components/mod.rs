pub mod analyzer;
pub mod chat;
pub mod generator;
pub mod header;
pub mod predictor;
pub mod theme_toggle;
pub mod utils;

use crate::api::GlooTransport;
use shared::ClientConfig;
use std::rc::Rc;
use yew::prelude::*;

/// Props handed to every page component.
#[derive(Properties, PartialEq, Clone)]
pub struct PageProps {
    pub config: Rc<ClientConfig>,
    pub transport: GlooTransport,
}
