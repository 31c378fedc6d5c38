mod component;
mod drag;
mod forces;
pub mod loader;
mod render;
mod simulation;
mod state;
mod types;

pub use component::{ForceGraphSvg, SessionHandle};
pub use render::SvgScene;
pub use state::{GraphSession, Parameter, Viewport};
pub use types::{EdgeSpec, GraphDocument, GraphSettings, NodeId, NodeSpec};
