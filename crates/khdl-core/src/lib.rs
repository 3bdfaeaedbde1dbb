pub mod config;
pub mod logging;

pub mod crawler;
pub mod decision;
pub mod pipeline;
pub mod resolver;
pub mod retry;
pub mod status;
pub mod storage;
pub mod transport;
pub mod url_model;
