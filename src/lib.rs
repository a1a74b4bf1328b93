pub mod config;
pub mod content;
pub mod logger;
pub mod markup;
pub mod site;
pub mod text_utils;
pub mod view;
mod test_data;
