//=========================================================================
// Stepwise Engine: Library Root
//
// A 2D game loop shim: fixed-timestep simulation with render
// interpolation, a scene lifecycle stack, and a Winit host.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the host-independent systems under `core`
// - Keep the Winit adapter (`platform`) private
//
// Typical usage:
// ```no_run
// use stepwise_engine::prelude::*;
//
// fn main() -> Result<(), EngineError> {
//     init_logging(LoggingConfig::default());
//     let engine = EngineBuilder::new().build();
//     let game = engine.scene_game(content, audio, Box::new(TitleScene::new()?));
//     engine.run(game)
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the timing, scene and driver systems. They are usable
// without a window, e.g. from a custom host or from tests.
//
pub mod core;
pub mod logging;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration (window, event loop,
// event mapping) and is not part of the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineConfig};
