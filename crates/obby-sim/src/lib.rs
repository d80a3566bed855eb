//! Single-player obby simulation: actor physics, axis-separated collision response,
//! the dead/won session machine, camera follow and the per-frame driver.
//!
//! Everything here is deterministic and host-agnostic. Hosts feed key events into an
//! [`ObbyGame`] and call [`ObbyGame::frame`] once per display refresh, usually through a
//! [`FrameDriver`].

pub mod actor;
pub mod camera;
pub mod collision;
pub mod driver;
pub mod game;
pub mod input;
pub mod session;
pub mod simulator;

pub use actor::Actor;
pub use camera::Camera;
pub use collision::{Axis, Resolution, Trigger, respond};
pub use driver::{FRAME_MS, FrameDriver, FrameLoop, FrameScheduler, ManualScheduler};
pub use game::ObbyGame;
pub use input::{Action, Controls, InputState};
pub use session::{GameSession, NoCallbacks, SessionCallbacks, SessionState};
pub use simulator::Simulator;
