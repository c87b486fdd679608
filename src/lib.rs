//! Void Assembly core crate.
//!
//! The outro screen of the portfolio hides an easter egg: hold an overscroll
//! past the end of the page and the contact panel dissolves into the owner's
//! name flying together out of the void; scroll back up to undo it.
//!
//! The gesture lifecycle ([`machine`]), the letter choreography ([`letters`])
//! and the spring-smoothed style values ([`scene`]) are plain Rust with no
//! browser types, so they run under `cargo test` on the host. The wasm
//! exports below mount the whole thing onto an existing page section.

use wasm_bindgen::prelude::*;

pub mod config;
mod dom;
pub mod easing;
pub mod error;
pub mod letters;
mod logging;
pub mod machine;
pub mod scene;
pub mod viewport;

use config::EggConfig;
use error::EggError;
use letters::{Axis::*, Direction::*, LetterConfig, Speed::*};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

// -----------------------------------------------------------------------------
// Default name rows. The anchor `T` zooms in place; everything else flies in.
// -----------------------------------------------------------------------------

pub const FIRST_ROW: &[LetterConfig] = &[
    LetterConfig::new('M', Y, Negative, Slowest),
    LetterConfig::new('U', X, Negative, Medium),
    LetterConfig::new('S', Y, Positive, Fast),
    LetterConfig::new('T', X, Positive, Fast).anchor(),
    LetterConfig::new('A', X, Positive, Fast),
    LetterConfig::new('F', Y, Negative, Medium),
    LetterConfig::new('A', Y, Positive, Slowest),
];

pub const SECOND_ROW: &[LetterConfig] = &[
    LetterConfig::new('S', X, Negative, Slowest),
    LetterConfig::new('I', Y, Negative, Medium),
    LetterConfig::new('D', Y, Positive, Fast),
    LetterConfig::new('D', X, Positive, Fast),
    LetterConfig::new('I', Y, Negative, Medium),
    LetterConfig::new('Q', X, Negative, Slowest),
    LetterConfig::new('U', Y, Positive, Medium),
    LetterConfig::new('I', X, Positive, Fast),
];

pub fn default_rows() -> Vec<Vec<LetterConfig>> {
    vec![FIRST_ROW.to_vec(), SECOND_ROW.to_vec()]
}

/// Rows for an arbitrary name; the middle glyph of the first name is the anchor.
pub fn rows_for_name(first: &str, last: &str) -> Vec<Vec<LetterConfig>> {
    // counted after upper-casing, which can expand a char into several glyphs
    let first_len = first.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_uppercase).count();
    let anchor = (first_len > 0).then_some(first_len / 2);
    vec![letters::row_for(first, anchor), letters::row_for(last, None)]
}

fn parse_config(config_json: Option<String>) -> Result<EggConfig, EggError> {
    match config_json {
        None => Ok(EggConfig::default()),
        #[cfg(feature = "serde_json")]
        Some(src) => EggConfig::from_json(&src),
        #[cfg(not(feature = "serde_json"))]
        Some(_) => Err(EggError::ConfigUnsupported),
    }
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Mount onto the section `section_id`. `content_id` names the contact panel
/// that fades out; `config_json` may override any [`EggConfig`] field.
#[wasm_bindgen]
pub fn mount_void_assembly(
    section_id: &str,
    content_id: Option<String>,
    config_json: Option<String>,
) -> Result<(), JsValue> {
    let config = parse_config(config_json)?;
    dom::mount(section_id, content_id.as_deref(), default_rows(), config)?;
    Ok(())
}

#[wasm_bindgen]
pub fn mount_void_assembly_with_name(
    section_id: &str,
    content_id: Option<String>,
    first_name: &str,
    last_name: &str,
    config_json: Option<String>,
) -> Result<(), JsValue> {
    let config = parse_config(config_json)?;
    dom::mount(section_id, content_id.as_deref(), rows_for_name(first_name, last_name), config)?;
    Ok(())
}

/// Tear down listeners, timers and the pending frame, and remove the overlay.
#[wasm_bindgen]
pub fn unmount_void_assembly() {
    dom::unmount();
}

/// Current Animation Progress (0 when nothing is mounted).
#[wasm_bindgen]
pub fn void_assembly_progress() -> f64 {
    dom::progress()
}
