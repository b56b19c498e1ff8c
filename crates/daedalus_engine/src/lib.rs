#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]
//! Program model and codecs for Daedalus, a 2D language whose programs are
//! pixels drawn from a fixed 16 color palette.

mod error;
pub use error::*;

mod palette_handling;
pub use palette_handling::*;

mod opcode;
pub use opcode::*;

mod literal;
pub use literal::*;

mod position;
pub use position::*;

mod grid;
pub use grid::*;

mod draw_context;
pub use draw_context::*;

mod raster;
pub use raster::*;

pub mod formats;

mod shared_program;
pub use shared_program::*;

mod config;
pub use config::*;
