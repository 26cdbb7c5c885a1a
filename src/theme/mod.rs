pub mod component;
pub mod engine;
pub mod menu;
pub mod properties;
pub mod redraw;
pub mod resources;
pub mod script;
pub mod scrollbar;
pub mod textbox;
