mod coordinates;
mod route;
mod stop;
mod velocity;

pub use coordinates::Coordinates;
pub use route::{ActiveWindow, Route, RouteDraft};
pub use stop::{Stop, StopDraft};
pub use velocity::{DistanceMeasurement, VelocityRecord};
