//! Virtual pet cat core: layered sprite compositing with user colours,
//! ping-pong animation with idle fidgets and blinking, hunger/happiness/energy
//! regulation with sleep, pointer interaction and pixel-perfect collision.
//!
//! Windowing and drawing belong to the host; it feeds `Cat::update` a delta
//! time plus pointer events and draws `Cat::image` at `Cat::rect`.

pub mod assets;
pub mod cat;
pub mod config;
pub mod draggable;
pub mod error;
pub mod input;
pub mod render;
pub mod spatial;

pub use assets::{AssetSource, Assets, DirAssets, MemoryAssets};
pub use cat::accessory::AccessorySlot;
pub use cat::interaction::{Activity, PointerReaction};
pub use cat::record::{InitialState, SaveRecord};
pub use cat::{Cat, ClipKind};
pub use config::CatConfig;
pub use draggable::DraggableItem;
pub use error::CatError;
pub use input::{MouseButton, PointerEvent, PointerKind};
pub use render::customization::CustomizationProfile;
pub use spatial::HitRegion;
