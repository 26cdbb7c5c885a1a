//! Keylcd renders themeable vector graphics onto a keyboard-embedded LCD.
//!
//! The crate is built around one pipeline: a cached SVG template is cloned,
//! merged with live application state, mutated by stateful components
//! (menus, scrollbars), rasterized, overdrawn with out-of-band text, and
//! pushed to a display daemon as a packed 16-bit frame.
//!
//! # Pipeline overview
//!
//! 1. **Clone**: [`Theme`] deep-copies its cached [`VectorDocument`] template
//! 2. **Mutate**: conditional pruning, component draws, progress/shadow/image
//!    expansion, text-box extraction
//! 3. **Substitute**: `${key}` placeholders resolved from a [`PropertyMap`]
//! 4. **Rasterize**: `usvg`/`resvg` onto a tiny-skia pixmap
//! 5. **Overdraw**: extracted text boxes via [`TextRender`], attached
//!    sub-surfaces, script foreground hook
//! 6. **Transmit** (optional): [`DaemonDriver`] packs the raster into the
//!    device's vertical-scan 5-6-5 format and frames it for the wire
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immutable templates**: the cached document is never mutated in place;
//!   every render pass works on a fresh copy.
//! - **Best-effort rendering**: hook and structural failures are logged and
//!   isolated; a render pass never aborts because a script or lookup failed.
//! - **Single-threaded rendering**: a [`Theme`] must not be rendered
//!   concurrently; only the driver's key-event receive loop runs on its own
//!   thread.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod document;
mod driver;
mod foundation;
mod raster;
mod text;
mod theme;

pub use document::css::{format_style, parse_style, size_to_em};
pub use document::model::{Element, Node, VectorDocument};
pub use driver::control::{Control, ControlHint, ControlSet, ControlValue};
pub use driver::daemon::{
    DaemonConfig, DaemonDriver, KeyCallback, LCD_BPP, LCD_HEIGHT, LCD_WIDTH, MKeyLights,
};
pub use driver::keys::{Key, KeyState, key_for_code};
pub use foundation::error::{KeylcdError, KeylcdResult};
pub use foundation::geom::Bounds;
pub use raster::codec::{decode_rgb565, encode_rgb565, pack_frame, rotate270_hflip};
pub use raster::surface::{new_surface, png_data_uri, premul_over_blit};
pub use text::render::{Align, Slant, TextAttributes, TextColor, TextRender, VAlign, Wrap};
pub use theme::component::{Component, DrawContext};
pub use theme::engine::{RenderOutput, Theme, WindowHandle};
pub use theme::menu::{Menu, MenuModel};
pub use theme::properties::{PropertyMap, PropertyValue, escape_xml, substitute};
pub use theme::redraw::RedrawScheduler;
pub use theme::resources::resolve_variant_path;
pub use theme::script::{DocumentProcessor, ThemeScript};
pub use theme::scrollbar::{Scrollbar, ScrollValues};
pub use theme::textbox::TextBox;
